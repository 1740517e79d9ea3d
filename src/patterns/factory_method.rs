//! Factory Method detector.
//!
//! Factory Method is a creational pattern that provides an interface for
//! creating objects in a superclass while letting subclasses alter the type
//! of objects created.
//!
//! Role assignment:
//! - Product: any interface `P`
//! - ConcreteProduct: implementors of `P`
//! - Creator: any type with a method returning `P`
//! - ConcreteCreator: implementors/extenders of a Creator
//!
//! All four roles must be non-empty for the pattern to fire. The evidence is
//! keyed by one canonical Creator: the lexicographically smallest creator
//! that actually has a concrete implementor.

use super::{FactoryMethodRoles, PatternDetector, PatternEvidence};
use crate::model::CodeModel;
use std::collections::{BTreeMap, BTreeSet};

pub struct FactoryMethodDetector;

impl FactoryMethodDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FactoryMethodDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for FactoryMethodDetector {
    fn name(&self) -> &'static str {
        "factory_method"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        let mut factories = BTreeMap::new();

        for product in model.types().filter(|t| t.is_interface) {
            let concrete_products: BTreeSet<String> = model
                .implementors(&product.name)
                .map(|t| t.name.clone())
                .collect();
            if concrete_products.is_empty() {
                continue;
            }

            let creators: BTreeSet<&str> = model
                .types()
                .filter(|t| t.methods.iter().any(|m| m.return_type == product.name))
                .map(|t| t.name.as_str())
                .collect();
            if creators.is_empty() {
                continue;
            }

            // Creators only count once something concrete extends them.
            let mut extended_creators: BTreeSet<&str> = BTreeSet::new();
            let mut concrete_creators: BTreeSet<String> = BTreeSet::new();
            for candidate in model.types() {
                for creator in &creators {
                    if candidate.derives_from(creator) {
                        extended_creators.insert(creator);
                        concrete_creators.insert(candidate.name.clone());
                    }
                }
            }

            let Some(canonical) = extended_creators.iter().next() else {
                continue;
            };

            factories.insert(
                canonical.to_string(),
                FactoryMethodRoles {
                    abstract_product: product.name.clone(),
                    concrete_product: concrete_products,
                    concrete_factory: concrete_creators,
                },
            );
        }

        PatternEvidence::FactoryMethod(factories)
    }
}
