//! Singleton detector.
//!
//! Singleton is a creational pattern that ensures a class has only one
//! instance while providing a global access point to it.
//!
//! A class qualifies when all three hold:
//! - at least one `private static` field of its own type (the instance)
//! - every declared constructor is `private`
//! - at least one `public static` method returns its own type (the accessor)
//!
//! A class with no constructors at all passes the constructor check; Java's
//! implicit default constructor is public, but the model only sees declared
//! members.

use super::{PatternDetector, PatternEvidence};
use crate::model::CodeModel;
use std::collections::BTreeSet;

pub struct SingletonDetector;

impl SingletonDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SingletonDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for SingletonDetector {
    fn name(&self) -> &'static str {
        "singleton"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        let mut classes = BTreeSet::new();

        for entry in model.types() {
            let has_instance_field = entry.fields.iter().any(|f| {
                f.declared_type == entry.name
                    && f.has_modifier("private")
                    && f.has_modifier("static")
            });
            if !has_instance_field {
                continue;
            }

            // All constructors must be private; static creation comes later.
            let all_constructors_private =
                entry.constructors.iter().all(|c| c.has_modifier("private"));
            if !all_constructors_private {
                continue;
            }

            let has_creation_method = entry.methods.iter().any(|m| {
                m.return_type == entry.name
                    && m.has_modifier("public")
                    && m.has_modifier("static")
            });
            if !has_creation_method {
                continue;
            }

            classes.insert(entry.name.clone());
        }

        PatternEvidence::Singleton(classes)
    }
}
