//! Adapter detector.
//!
//! Adapter is a structural pattern that lets objects with incompatible
//! interfaces collaborate.
//!
//! For every (Target, Adapter) pair where the Adapter implements or extends
//! the Target and shares at least one method signature with it (same name,
//! return type, and modifiers), the Adaptee is found two ways:
//!
//! - **Object Adapter**: a non-public field on the Adapter whose declared
//!   type is a different known type
//! - **Class Adapter**: the Adapter implements/extends a second known type
//!   that is not the Target
//!
//! One class can adapt several targets and wrap several adaptees; all of
//! them accumulate under the adapter's evidence entry.

use super::{AdapterRoles, PatternDetector, PatternEvidence};
use crate::model::{CodeModel, TypeEntry};
use std::collections::BTreeMap;

pub struct AdapterDetector;

impl AdapterDetector {
    pub fn new() -> Self {
        Self
    }

    fn shares_signature(adapter: &TypeEntry, target: &TypeEntry) -> bool {
        adapter.methods.iter().any(|am| {
            target.methods.iter().any(|tm| {
                am.name == tm.name
                    && am.return_type == tm.return_type
                    && am.modifiers == tm.modifiers
            })
        })
    }
}

impl Default for AdapterDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for AdapterDetector {
    fn name(&self) -> &'static str {
        "adapter"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        let mut adapters: BTreeMap<String, AdapterRoles> = BTreeMap::new();

        for target in model.types() {
            for adapter in model.types() {
                if !adapter.derives_from(&target.name) {
                    continue;
                }
                if !Self::shares_signature(adapter, target) {
                    continue;
                }

                // Object Adapter: wraps the adaptee in a field.
                for field in &adapter.fields {
                    if model.contains(&field.declared_type)
                        && field.declared_type != target.name
                        && !field.has_modifier("public")
                    {
                        let roles = adapters.entry(adapter.name.clone()).or_default();
                        roles.targets.insert(target.name.clone());
                        roles.adaptees.insert(field.declared_type.clone());
                    }
                }

                // Class Adapter: inherits from the adaptee directly.
                for parent in adapter.supertypes() {
                    if model.contains(parent) && parent != &target.name {
                        let roles = adapters.entry(adapter.name.clone()).or_default();
                        roles.targets.insert(target.name.clone());
                        roles.adaptees.insert(parent.clone());
                    }
                }
            }
        }

        PatternEvidence::Adapter(adapters)
    }
}
