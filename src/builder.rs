//! Model builder
//!
//! Consumes the raw descriptor and populates the definition model: groups
//! dot-delimited procedure names into classes, one class per name prefix,
//! methods mapping 1:1 to remote procedures. Grouping happens before method
//! insertion, so method names can only collide within one class, never
//! across classes.

use crate::descriptor::RawDescriptor;
use crate::error::MakerError;
use crate::model::{ArgumentDefinition, DefinitionModel, MethodDefinition};
use serde_json::Value;
use tracing::{debug, info};

/// Class name used for procedures whose name carries no dot.
pub const DEFAULT_CLASS_NAME: &str = "Main";

/// Convert a raw identifier to PascalCase, safe for use as a type name.
/// Words are split on any non-alphanumeric character.
pub fn pascal_case(raw: &str) -> String {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert an identifier to snake_case, safe for use as a module or file
/// name.
///
/// Every uppercase letter after the first character gets its own `_`
/// separator, so on Pascal-cased input (what `pascal_case` produces, what
/// class names and vendor aliases are) the mapping is injective: distinct
/// names never share a file name (`Ab` → `ab`, `AB` → `a_b`).
pub fn snake_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() {
                if !out.is_empty() && !out.ends_with('_') {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

/// Builds the definition model from a raw descriptor.
///
/// The target namespace is explicit configuration; the vendor alias becomes
/// a sub-namespace under it, so two vendors' generated classes never share a
/// fully-qualified name.
pub struct ModelBuilder {
    namespace: String,
    vendor_alias: String,
}

impl ModelBuilder {
    pub fn new(namespace: impl Into<String>, vendor_alias: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            vendor_alias: vendor_alias.into(),
        }
    }

    /// Namespace generated classes live under: `{namespace}.{vendor_alias}`.
    pub fn class_namespace(&self) -> String {
        format!("{}.{}", self.namespace, self.vendor_alias)
    }

    /// Build the model. Iterates procedures in descriptor order; each
    /// procedure becomes one method on the class derived from its name
    /// prefix.
    pub fn build(&self, descriptor: &RawDescriptor) -> Result<DefinitionModel, MakerError> {
        let procedures = descriptor.procedures()?;
        let namespace = self.class_namespace();
        let mut model = DefinitionModel::new();

        for (procedure_name, procedure_data) in procedures {
            let method = build_method(procedure_name, procedure_data)?;
            let class_name = class_name_for(procedure_name);
            debug!(procedure = %procedure_name, class = %class_name, "Mapped procedure");
            model
                .class_or_create(&namespace, &class_name)
                .add_method(method)?;
        }

        info!(
            class_count = model.class_count(),
            namespace = %namespace,
            "Definition model built"
        );
        Ok(model)
    }
}

/// Derive the class name from a procedure name: the literal `Main` when the
/// name has no dot, otherwise the first segment Pascal-cased.
fn class_name_for(procedure_name: &str) -> String {
    match procedure_name.split_once('.') {
        None => DEFAULT_CLASS_NAME.to_string(),
        Some((prefix, _)) => pascal_case(prefix),
    }
}

fn build_method(procedure_name: &str, procedure_data: &Value) -> Result<MethodDefinition, MakerError> {
    let entry = procedure_data.as_object().ok_or_else(|| {
        MakerError::MalformedDescriptor(format!(
            "procedure \"{}\" entry is not an object",
            procedure_name
        ))
    })?;
    let parameters = entry
        .get("parameters")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            MakerError::MalformedDescriptor(format!(
                "procedure \"{}\" lacks a \"parameters\" list",
                procedure_name
            ))
        })?;

    let short_name = procedure_name
        .rsplit('.')
        .next()
        .unwrap_or(procedure_name);
    let mut method = MethodDefinition::new(short_name, procedure_name);
    method.set_returns(entry.get("returns").filter(|v| !v.is_null()).cloned());

    for parameter in parameters {
        method.add_argument(build_argument(procedure_name, parameter)?);
    }
    Ok(method)
}

fn build_argument(procedure_name: &str, parameter: &Value) -> Result<ArgumentDefinition, MakerError> {
    let entry = parameter.as_object().ok_or_else(|| {
        MakerError::MalformedDescriptor(format!(
            "procedure \"{}\" has a non-object parameter entry",
            procedure_name
        ))
    })?;
    let field = |key: &str| -> Result<String, MakerError> {
        entry
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                MakerError::MalformedDescriptor(format!(
                    "procedure \"{}\" parameter lacks \"{}\"",
                    procedure_name, key
                ))
            })
    };

    Ok(ArgumentDefinition::new(
        field("name")?,
        field("type")?,
        entry
            .get("optional")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        // A missing (or null) default means "no default", not an error.
        entry.get("default").filter(|v| !v.is_null()).cloned(),
    ))
}
