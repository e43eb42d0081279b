//! Definition model
//!
//! In-memory representation of generated classes, their methods, and arguments.
//! Pure data, no I/O. Built once per run by the model builder and handed
//! read-only to the regeneration coordinator and the emitter.

use crate::error::MakerError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One argument of a generated method.
///
/// Order within the owning method is significant: it mirrors the descriptor's
/// parameter order exactly and defines the generated call signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    pub name: String,
    /// Remote type descriptor as stated by the catalog (e.g. "int", "string").
    #[serde(rename = "type")]
    pub type_name: String,
    pub optional: bool,
    /// Default value, if the catalog declares one.
    pub default: Option<Value>,
}

impl ArgumentDefinition {
    pub fn new(name: String, type_name: String, optional: bool, default: Option<Value>) -> Self {
        Self {
            name,
            type_name,
            optional,
            default,
        }
    }
}

/// One callable method of a generated class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    /// Short name: the last dot-segment of the procedure name.
    pub name: String,
    /// Full original procedure name. The emitter needs this to issue the
    /// real remote call.
    pub procedure_name: String,
    /// Return-type descriptor from the catalog, if declared.
    pub returns: Option<Value>,
    /// Arguments in descriptor parameter order.
    arguments: Vec<ArgumentDefinition>,
}

impl MethodDefinition {
    pub fn new(name: impl Into<String>, procedure_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            procedure_name: procedure_name.into(),
            returns: None,
            arguments: Vec::new(),
        }
    }

    pub fn set_returns(&mut self, returns: Option<Value>) {
        self.returns = returns;
    }

    /// Append an argument. Order of calls defines the signature order.
    pub fn add_argument(&mut self, argument: ArgumentDefinition) {
        self.arguments.push(argument);
    }

    pub fn arguments(&self) -> &[ArgumentDefinition] {
        &self.arguments
    }
}

/// One generated class: a grouping of procedures sharing a name prefix.
///
/// Methods are keyed by short name with insertion order preserved so emission
/// is deterministic with respect to descriptor order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub namespace: String,
    pub class_name: String,
    methods: IndexMap<String, MethodDefinition>,
}

impl ClassDefinition {
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            class_name: class_name.into(),
            methods: IndexMap::new(),
        }
    }

    /// Dot-joined fully-qualified name: `{namespace}.{class_name}`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.class_name)
    }

    /// Attach a method to this class.
    ///
    /// Method short names are unique within a class. A second occurrence of
    /// the same short name is an error rather than a silent merge: two remote
    /// procedures that happen to share a trailing segment are semantically
    /// distinct and must not overwrite each other.
    pub fn add_method(&mut self, method: MethodDefinition) -> Result<(), MakerError> {
        if let Some(existing) = self.methods.get(&method.name) {
            return Err(MakerError::DuplicateMethod {
                class: self.full_name(),
                method: method.name.clone(),
                existing: existing.procedure_name.clone(),
                incoming: method.procedure_name,
            });
        }
        self.methods.insert(method.name.clone(), method);
        Ok(())
    }

    pub fn method(&self, name: &str) -> Option<&MethodDefinition> {
        self.methods.get(name)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        self.methods.values()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

/// The complete model of one build pass: class definitions keyed by class
/// name, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionModel {
    classes: IndexMap<String, ClassDefinition>,
}

impl DefinitionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a class definition, or create it under the given namespace.
    /// Creation happens at most once per distinct class name per build pass.
    pub fn class_or_create(&mut self, namespace: &str, class_name: &str) -> &mut ClassDefinition {
        self.classes
            .entry(class_name.to_string())
            .or_insert_with(|| ClassDefinition::new(namespace, class_name))
    }

    /// Look up a class definition that must already exist.
    pub fn class(&self, class_name: &str) -> Result<&ClassDefinition, MakerError> {
        self.classes
            .get(class_name)
            .ok_or_else(|| MakerError::ClassNotFound(class_name.to_string()))
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
