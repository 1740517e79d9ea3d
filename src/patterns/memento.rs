//! Memento detector.
//!
//! Memento is a behavioral pattern that saves and restores an object's
//! state without exposing its internals.
//!
//! Role assignment, keyed by the Memento type M:
//! - Originator: a type with a method returning a known type M such that
//!   (a) no method on M takes parameters (a snapshot only exposes getters)
//!   and (b) M's field-type multiset exactly equals the Originator's,
//!   cardinality included
//! - ConcreteMemento: implementors/extenders of M
//! - Caretaker: any type with a field whose declared type contains M's name
//!   (substring, so `List<M>` and `Stack<M>` count)
//! - ConcreteCaretaker / ConcreteOriginator: implementors/extenders of a
//!   Caretaker / Originator
//!
//! Post-pass: an Originator that itself implements or extends anything is
//! dropped. The rule prunes specializations but can also delete legitimate
//! originators that implement unrelated interfaces; it is preserved as-is.

use super::{MementoRoles, PatternDetector, PatternEvidence};
use crate::model::{CodeModel, TypeEntry};
use std::collections::BTreeMap;

pub struct MementoDetector;

impl MementoDetector {
    pub fn new() -> Self {
        Self
    }

    /// Exact, cardinality-sensitive comparison of field-type multisets.
    fn field_multisets_match(a: &TypeEntry, b: &TypeEntry) -> bool {
        let mut left = a.field_types();
        let mut right = b.field_types();
        left.sort_unstable();
        right.sort_unstable();
        left == right
    }
}

impl Default for MementoDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for MementoDetector {
    fn name(&self) -> &'static str {
        "memento"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        let mut mementos: BTreeMap<String, MementoRoles> = BTreeMap::new();

        for originator in model.types() {
            for method in &originator.methods {
                let Some(memento) = model.get(&method.return_type) else {
                    continue;
                };

                let has_parameterized_method =
                    memento.methods.iter().any(|m| !m.parameters.is_empty());
                if has_parameterized_method {
                    continue;
                }

                if !Self::field_multisets_match(memento, originator) {
                    continue;
                }

                let roles = mementos.entry(memento.name.clone()).or_default();

                roles
                    .originator
                    .entry(originator.name.clone())
                    .or_default()
                    .extend(model.subtypes(&originator.name).map(|t| t.name.clone()));

                roles
                    .concrete_memento
                    .extend(model.subtypes(&memento.name).map(|t| t.name.clone()));

                for caretaker in model.types().filter(|t| {
                    t.fields
                        .iter()
                        .any(|f| f.declared_type.contains(&memento.name))
                }) {
                    roles
                        .caretaker
                        .entry(caretaker.name.clone())
                        .or_default()
                        .extend(model.subtypes(&caretaker.name).map(|t| t.name.clone()));
                }
            }
        }

        // Specialization pruning: an originator that inherits from anything
        // is removed, even when the supertype is unrelated.
        for roles in mementos.values_mut() {
            roles.originator.retain(|name, _| {
                model
                    .get(name)
                    .map_or(true, |t| t.implements.is_empty() && t.extends.is_empty())
            });
        }

        PatternEvidence::Memento(mementos)
    }
}
