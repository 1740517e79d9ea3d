//! Visitor detector.
//!
//! Visitor is a behavioral pattern that separates algorithms from the
//! objects they operate on.
//!
//! Role assignment:
//! - Visitor: an interface with at least one implementor that overrides
//!   (explicit `@Override`) a method sharing a name with a Visitor method
//! - ConcreteVisitor: those implementors
//! - Element: an interface with a method accepting a Visitor-typed parameter
//! - ConcreteElement: implementors of the Element
//!
//! Evidence is keyed by Element; each Element lists its concrete elements
//! and every Visitor (with concrete visitors) it accepts.

use super::{PatternDetector, PatternEvidence, VisitorRoles};
use crate::model::CodeModel;
use std::collections::{BTreeMap, BTreeSet};

pub struct VisitorDetector;

impl VisitorDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VisitorDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for VisitorDetector {
    fn name(&self) -> &'static str {
        "visitor"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        let mut elements: BTreeMap<String, VisitorRoles> = BTreeMap::new();

        for visitor in model.types().filter(|t| t.is_interface) {
            let visitor_methods: BTreeSet<&str> =
                visitor.methods.iter().map(|m| m.name.as_str()).collect();

            let concrete_visitors: BTreeSet<String> = model
                .implementors(&visitor.name)
                .filter(|cv| {
                    cv.methods
                        .iter()
                        .any(|m| m.is_override && visitor_methods.contains(m.name.as_str()))
                })
                .map(|cv| cv.name.clone())
                .collect();
            if concrete_visitors.is_empty() {
                continue;
            }

            for element in model.types().filter(|t| t.is_interface) {
                let accepts_visitor = element.methods.iter().any(|m| {
                    m.parameters.iter().any(|p| p.type_name == visitor.name)
                });
                if !accepts_visitor {
                    continue;
                }

                let roles = elements.entry(element.name.clone()).or_default();
                roles.concrete_element.extend(
                    model.implementors(&element.name).map(|t| t.name.clone()),
                );
                roles
                    .visitor
                    .insert(visitor.name.clone(), concrete_visitors.clone());
            }
        }

        PatternEvidence::Visitor(elements)
    }
}
