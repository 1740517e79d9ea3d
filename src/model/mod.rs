//! In-memory code model of a single Java project.
//!
//! The model is a flat mapping from *simple* type name to [`TypeEntry`].
//! Keys are project-scoped: two types with the same simple name in different
//! packages collide and the last parsed file wins. This is a known
//! limitation inherited from keying on simple names.
//!
//! A model is built fresh for every analyzed project, enriched exactly once
//! by the call graph builder, and treated as read-only by every detector.
//! Iteration over type names is always sorted (the map is a `BTreeMap`), so
//! any tie-break that picks "the first match" is deterministic.

use serde::Serialize;
use std::collections::BTreeMap;

/// A single method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub type_name: String,
    pub name: String,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// A field declaration.
///
/// One record per declaration statement: `int a, b;` is a single entry with
/// two declarators. Detectors that compare field-type multisets (Memento)
/// count declarations, not declarators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub declared_type: String,
    pub declarators: Vec<String>,
    pub modifiers: Vec<String>,
}

impl FieldInfo {
    pub fn new(declared_type: impl Into<String>) -> Self {
        Self {
            declared_type: declared_type.into(),
            declarators: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

/// A constructor declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorInfo {
    pub modifiers: Vec<String>,
    pub parameters: Vec<Parameter>,
}

impl ConstructorInfo {
    pub fn new(modifiers: &[&str]) -> Self {
        Self {
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, type_name: &str, name: &str) -> Self {
        self.parameters.push(Parameter::new(type_name, name));
        self
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

/// An incoming call record: who calls this method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomingCall {
    pub caller_class: String,
    pub caller_method: String,
}

/// An outgoing call record: what this method calls.
///
/// `resolved` is false for best-effort guesses derived from the call's
/// syntactic scope. Unresolved calls are still recorded, never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingCall {
    pub callee_class: String,
    pub callee_method: String,
    pub resolved: bool,
}

/// A method declaration, including its call-graph records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub return_type: String,
    pub modifiers: Vec<String>,
    /// True when the declaration carries an explicit `@Override` marker.
    pub is_override: bool,
    pub parameters: Vec<Parameter>,
    pub incoming_calls: Vec<IncomingCall>,
    pub outgoing_calls: Vec<OutgoingCall>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            modifiers: Vec::new(),
            is_override: false,
            parameters: Vec::new(),
            incoming_calls: Vec::new(),
            outgoing_calls: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_parameter(mut self, type_name: &str, name: &str) -> Self {
        self.parameters.push(Parameter::new(type_name, name));
        self
    }

    pub fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

/// A local variable declaration inside a method body.
///
/// Only the Facade detector consumes these: a type with any local variable
/// declarations is considered to do real work of its own rather than pass
/// calls through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalVariable {
    pub declared_type: String,
    pub name: String,
}

/// Everything the engine knows about one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeEntry {
    pub name: String,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub modifiers: Vec<String>,
    /// Interfaces this type implements, in declaration order.
    pub implements: Vec<String>,
    /// Supertypes this type extends, in declaration order.
    pub extends: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub constructors: Vec<ConstructorInfo>,
    pub methods: Vec<MethodInfo>,
    pub locals: Vec<LocalVariable>,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: false,
            is_abstract: false,
            modifiers: Vec::new(),
            implements: Vec::new(),
            extends: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            locals: Vec::new(),
        }
    }

    /// Empty stub for a file that could not be parsed.
    ///
    /// Stubs keep the file visible in the model and in reports without
    /// contributing any structure a detector could match on.
    pub fn stub(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        let mut entry = Self::new(name);
        entry.is_interface = true;
        entry
    }

    /// All declared supertypes: `implements` followed by `extends`.
    pub fn supertypes(&self) -> impl Iterator<Item = &String> {
        self.implements.iter().chain(self.extends.iter())
    }

    /// True when this type implements or extends `parent`.
    pub fn derives_from(&self, parent: &str) -> bool {
        self.supertypes().any(|s| s == parent)
    }

    /// True when this type names `parent` in its `implements` list only.
    pub fn implements_type(&self, parent: &str) -> bool {
        self.implements.iter().any(|s| s == parent)
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// The declared types of all fields, one per declaration, unsorted.
    pub fn field_types(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.declared_type.as_str()).collect()
    }
}

/// The project-wide mapping from simple type name to [`TypeEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeModel {
    types: BTreeMap<String, TypeEntry>,
}

impl CodeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a type, replacing any previous entry with the same simple name
    /// (last write wins).
    pub fn insert(&mut self, entry: TypeEntry) {
        self.types.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.types.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut TypeEntry> {
        self.types.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// All entries in sorted name order.
    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    /// All type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.types.keys()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types whose `implements` list names `iface`, in sorted order.
    pub fn implementors<'a>(&'a self, iface: &'a str) -> impl Iterator<Item = &'a TypeEntry> {
        self.types().filter(move |t| t.implements_type(iface))
    }

    /// Types that implement or extend `parent`, in sorted order.
    pub fn subtypes<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a TypeEntry> {
        self.types().filter(move |t| t.derives_from(parent))
    }
}
