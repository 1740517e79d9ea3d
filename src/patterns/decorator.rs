//! Decorator detector.
//!
//! Decorator is a structural pattern that attaches new behavior to objects
//! by placing them inside wrapper objects that implement the same interface.
//!
//! Role assignment, per Component interface:
//! - base Decorator: an implementor with a non-public field of the Component
//!   type AND a public constructor taking a Component parameter
//! - ConcreteDecorator: extenders of a base Decorator
//! - ConcreteComponent: any other implementor, confirmed only when it
//!   declares a method whose name appears on some base Decorator
//!   (shared-vocabulary heuristic)
//!
//! Decorators that no confirmed ConcreteComponent shares a method name with
//! are dropped from the evidence.

use super::{DecoratorRoles, PatternDetector, PatternEvidence};
use crate::model::{CodeModel, TypeEntry};
use std::collections::{BTreeMap, BTreeSet};

pub struct DecoratorDetector;

impl DecoratorDetector {
    pub fn new() -> Self {
        Self
    }

    fn is_base_decorator(entry: &TypeEntry, component: &str) -> bool {
        let has_component_field = entry
            .fields
            .iter()
            .any(|f| f.declared_type == component && !f.has_modifier("public"));
        let has_wrapping_constructor = entry.constructors.iter().any(|c| {
            c.has_modifier("public") && c.parameters.iter().any(|p| p.type_name == component)
        });
        has_component_field && has_wrapping_constructor
    }
}

impl Default for DecoratorDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for DecoratorDetector {
    fn name(&self) -> &'static str {
        "decorator"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        let mut decorators = BTreeMap::new();

        for component in model.types().filter(|t| t.is_interface) {
            let mut bases: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
            let mut candidates: Vec<&TypeEntry> = Vec::new();

            for implementor in model.implementors(&component.name) {
                if Self::is_base_decorator(implementor, &component.name) {
                    let concrete: BTreeSet<String> = model
                        .types()
                        .filter(|t| t.extends.iter().any(|p| p == &implementor.name))
                        .map(|t| t.name.clone())
                        .collect();
                    bases.insert(implementor.name.as_str(), concrete);
                } else {
                    candidates.push(implementor);
                }
            }
            if bases.is_empty() {
                continue;
            }

            // Method vocabulary of all base decorators; on a name clash the
            // smallest decorator name claims the method.
            let mut vocabulary: BTreeMap<&str, &str> = BTreeMap::new();
            for decorator in bases.keys().copied() {
                if let Some(entry) = model.get(decorator) {
                    for m in &entry.methods {
                        vocabulary.entry(m.name.as_str()).or_insert(decorator);
                    }
                }
            }

            // Components are confirmed by sharing a method name with a
            // decorator; only decorators named this way survive.
            let mut confirmed_components: BTreeSet<String> = BTreeSet::new();
            let mut used_decorators: BTreeSet<&str> = BTreeSet::new();
            for candidate in &candidates {
                for m in &candidate.methods {
                    if let Some(&decorator) = vocabulary.get(m.name.as_str()) {
                        confirmed_components.insert(candidate.name.clone());
                        used_decorators.insert(decorator);
                    }
                }
            }

            for decorator in used_decorators {
                decorators.insert(
                    decorator.to_string(),
                    DecoratorRoles {
                        component: component.name.clone(),
                        concrete_component: confirmed_components.clone(),
                        concrete_decorator: bases[decorator].clone(),
                    },
                );
            }
        }

        PatternEvidence::Decorator(decorators)
    }
}
