//! Emitter collaborator
//!
//! Turns one class definition into a source artifact on disk. The core only
//! depends on the `ClassEmitter` trait; the bundled `RustModuleEmitter` is a
//! deliberately simple line-writer that produces one Rust module per class,
//! one method stub per procedure, each stub carrying the full procedure name
//! the remote call needs.

use crate::builder::snake_case;
use crate::error::EmitError;
use crate::model::{ClassDefinition, MethodDefinition};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Emitter collaborator: produces one source artifact per class at a
/// location derivable from the fully-qualified class name.
pub trait ClassEmitter: Send + Sync {
    fn emit(&self, class: &ClassDefinition) -> Result<PathBuf, EmitError>;
}

/// Default emitter: writes `<out_dir>/<vendor_snake>/<class_snake>.rs`.
pub struct RustModuleEmitter {
    out_dir: PathBuf,
    vendor_alias: String,
}

impl RustModuleEmitter {
    pub fn new(out_dir: PathBuf, vendor_alias: impl Into<String>) -> Self {
        Self {
            out_dir,
            vendor_alias: vendor_alias.into(),
        }
    }

    /// Artifact location for a class, derived from vendor alias and class
    /// name.
    pub fn artifact_path(&self, class: &ClassDefinition) -> PathBuf {
        self.out_dir
            .join(snake_case(&self.vendor_alias))
            .join(format!("{}.rs", snake_case(&class.class_name)))
    }

    fn render(&self, class: &ClassDefinition) -> String {
        let mut out = String::new();
        out.push_str("//! Generated by sdkgen. Do not edit.\n");
        out.push_str(&format!("//!\n//! Client class `{}`.\n\n", class.full_name()));
        out.push_str(&format!("pub struct {};\n\n", class.class_name));
        out.push_str(&format!("impl {} {{\n", class.class_name));
        for (i, method) in class.methods().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            render_method(&mut out, method);
        }
        out.push_str("}\n");
        out
    }
}

fn render_method(out: &mut String, method: &MethodDefinition) {
    out.push_str(&format!(
        "    /// Remote procedure `{}`.\n",
        method.procedure_name
    ));
    if !method.arguments().is_empty() {
        out.push_str("    ///\n");
        for arg in method.arguments() {
            let mut line = format!("    /// - `{}`: {}", arg.name, arg.type_name);
            if arg.optional {
                line.push_str(" (optional)");
            }
            if let Some(default) = &arg.default {
                line.push_str(&format!(", default {}", default));
            }
            line.push('\n');
            out.push_str(&line);
        }
    }
    if let Some(returns) = &method.returns {
        out.push_str(&format!("    ///\n    /// Returns: {}\n", returns));
    }
    out.push_str(&format!(
        "    pub fn {}() -> &'static str {{\n        \"{}\"\n    }}\n",
        snake_case(&method.name),
        method.procedure_name
    ));
}

impl ClassEmitter for RustModuleEmitter {
    fn emit(&self, class: &ClassDefinition) -> Result<PathBuf, EmitError> {
        let path = self.artifact_path(class);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.render(class))?;
        debug!(fqn = %class.full_name(), path = %path.display(), "Class emitted");
        Ok(path)
    }
}
