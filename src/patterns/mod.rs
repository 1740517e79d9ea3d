//! Design pattern detectors.
//!
//! One module per pattern, all implementing [`PatternDetector`]. The
//! [`registry`] function is the single source of truth for which patterns
//! exist and in what order they are reported.
//!
//! Detectors are stateless and independent: each one reads the enriched
//! [`CodeModel`] and produces its own [`PatternEvidence`], never another
//! detector's output. All iteration runs over the model's sorted type names,
//! so every tie-break ("pick the first creator") is deterministic and two
//! runs over the same model produce identical evidence.

mod abstract_factory;
mod adapter;
mod decorator;
mod facade;
mod factory_method;
mod memento;
mod observer;
mod singleton;
mod visitor;

pub use abstract_factory::AbstractFactoryDetector;
pub use adapter::AdapterDetector;
pub use decorator::DecoratorDetector;
pub use facade::FacadeDetector;
pub use factory_method::FactoryMethodDetector;
pub use memento::MementoDetector;
pub use observer::ObserverDetector;
pub use singleton::SingletonDetector;
pub use visitor::VisitorDetector;

use crate::model::CodeModel;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Trait for design pattern detectors.
pub trait PatternDetector: Send + Sync {
    /// Stable machine name of the pattern (snake_case).
    fn name(&self) -> &'static str;

    /// Run the detector against the model and return its evidence,
    /// possibly empty. Must be read-only and must not panic on any
    /// well-typed model.
    fn detect(&self, model: &CodeModel) -> PatternEvidence;
}

/// All registered detectors, in reporting order.
pub fn registry() -> Vec<Box<dyn PatternDetector>> {
    vec![
        Box::new(SingletonDetector::new()),
        Box::new(FactoryMethodDetector::new()),
        Box::new(AbstractFactoryDetector::new()),
        Box::new(AdapterDetector::new()),
        Box::new(DecoratorDetector::new()),
        Box::new(VisitorDetector::new()),
        Box::new(FacadeDetector::new()),
        Box::new(ObserverDetector::new()),
        Box::new(MementoDetector::new()),
    ]
}

/// Roles filled by one Factory Method instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FactoryMethodRoles {
    pub abstract_product: String,
    pub concrete_product: BTreeSet<String>,
    pub concrete_factory: BTreeSet<String>,
}

/// Roles filled by one Abstract Factory instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AbstractFactoryRoles {
    pub concrete_factory: BTreeSet<String>,
    /// Abstract product -> its concrete products.
    pub abstract_product: BTreeMap<String, BTreeSet<String>>,
}

/// Roles filled by one Adapter class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdapterRoles {
    pub targets: BTreeSet<String>,
    pub adaptees: BTreeSet<String>,
}

/// Roles grouped under one base Decorator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecoratorRoles {
    pub component: String,
    pub concrete_component: BTreeSet<String>,
    pub concrete_decorator: BTreeSet<String>,
}

/// Roles grouped under one Element interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitorRoles {
    pub concrete_element: BTreeSet<String>,
    /// Visitor interface -> its concrete visitors.
    pub visitor: BTreeMap<String, BTreeSet<String>>,
}

/// Roles grouped under one Subscriber type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObserverRoles {
    /// Publisher -> its concrete publishers.
    pub publisher: BTreeMap<String, BTreeSet<String>>,
    pub concrete_observer: BTreeSet<String>,
}

/// Roles grouped under one Memento type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MementoRoles {
    /// Originator -> its concrete originators.
    pub originator: BTreeMap<String, BTreeSet<String>>,
    pub concrete_memento: BTreeSet<String>,
    /// Caretaker -> its concrete caretakers.
    pub caretaker: BTreeMap<String, BTreeSet<String>>,
}

/// Typed evidence produced by one detector.
///
/// One variant per pattern; the payload serializes directly to the reported
/// `roleKey -> roleSpecificPayload` shape. Evidence is never mutated after a
/// detector returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PatternEvidence {
    /// Qualifying singleton class names.
    Singleton(BTreeSet<String>),
    /// Canonical creator -> roles.
    FactoryMethod(BTreeMap<String, FactoryMethodRoles>),
    /// Abstract factory -> roles.
    AbstractFactory(BTreeMap<String, AbstractFactoryRoles>),
    /// Adapter class -> targets and adaptees.
    Adapter(BTreeMap<String, AdapterRoles>),
    /// Base decorator -> roles.
    Decorator(BTreeMap<String, DecoratorRoles>),
    /// Element interface -> roles.
    Visitor(BTreeMap<String, VisitorRoles>),
    /// Facade class -> its exclusive subsystems.
    Facade(BTreeMap<String, BTreeSet<String>>),
    /// Subscriber type -> roles.
    Observer(BTreeMap<String, ObserverRoles>),
    /// Memento type -> roles.
    Memento(BTreeMap<String, MementoRoles>),
}

impl PatternEvidence {
    /// True when the detector found nothing; empty evidence is omitted from
    /// all reports.
    pub fn is_empty(&self) -> bool {
        match self {
            PatternEvidence::Singleton(classes) => classes.is_empty(),
            PatternEvidence::FactoryMethod(map) => map.is_empty(),
            PatternEvidence::AbstractFactory(map) => map.is_empty(),
            PatternEvidence::Adapter(map) => map.is_empty(),
            PatternEvidence::Decorator(map) => map.is_empty(),
            PatternEvidence::Visitor(map) => map.is_empty(),
            PatternEvidence::Facade(map) => map.is_empty(),
            PatternEvidence::Observer(map) => map.is_empty(),
            PatternEvidence::Memento(map) => map.is_empty(),
        }
    }

    /// Number of role-key entries (classes for Singleton, otherwise map
    /// entries).
    pub fn instances(&self) -> usize {
        match self {
            PatternEvidence::Singleton(classes) => classes.len(),
            PatternEvidence::FactoryMethod(map) => map.len(),
            PatternEvidence::AbstractFactory(map) => map.len(),
            PatternEvidence::Adapter(map) => map.len(),
            PatternEvidence::Decorator(map) => map.len(),
            PatternEvidence::Visitor(map) => map.len(),
            PatternEvidence::Facade(map) => map.len(),
            PatternEvidence::Observer(map) => map.len(),
            PatternEvidence::Memento(map) => map.len(),
        }
    }

    /// The role-key names, for compact reporting.
    pub fn keys(&self) -> Vec<&String> {
        match self {
            PatternEvidence::Singleton(classes) => classes.iter().collect(),
            PatternEvidence::FactoryMethod(map) => map.keys().collect(),
            PatternEvidence::AbstractFactory(map) => map.keys().collect(),
            PatternEvidence::Adapter(map) => map.keys().collect(),
            PatternEvidence::Decorator(map) => map.keys().collect(),
            PatternEvidence::Visitor(map) => map.keys().collect(),
            PatternEvidence::Facade(map) => map.keys().collect(),
            PatternEvidence::Observer(map) => map.keys().collect(),
            PatternEvidence::Memento(map) => map.keys().collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared model builders for detector tests.

    use crate::model::{ConstructorInfo, FieldInfo, MethodInfo, TypeEntry};

    pub fn class(name: &str) -> TypeEntry {
        TypeEntry::new(name)
    }

    pub fn interface(name: &str) -> TypeEntry {
        TypeEntry::interface(name)
    }

    pub fn implementing(name: &str, ifaces: &[&str]) -> TypeEntry {
        let mut entry = TypeEntry::new(name);
        entry.implements = ifaces.iter().map(|i| i.to_string()).collect();
        entry
    }

    pub fn extending(name: &str, parents: &[&str]) -> TypeEntry {
        let mut entry = TypeEntry::new(name);
        entry.extends = parents.iter().map(|p| p.to_string()).collect();
        entry
    }

    pub fn field(declared_type: &str, modifiers: &[&str]) -> FieldInfo {
        FieldInfo::new(declared_type).with_modifiers(modifiers)
    }

    pub fn method(name: &str, return_type: &str, modifiers: &[&str]) -> MethodInfo {
        MethodInfo::new(name, return_type).with_modifiers(modifiers)
    }

    pub fn ctor(modifiers: &[&str]) -> ConstructorInfo {
        ConstructorInfo::new(modifiers)
    }
}
