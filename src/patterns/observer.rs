//! Observer detector.
//!
//! Observer is a behavioral pattern where a publisher notifies a set of
//! subscribers about events.
//!
//! Role assignment:
//! - Publisher: a type with a method parameter of some *other* known type S
//!   (the subscribe/unsubscribe signature) and a field whose declared type
//!   mentions S (the subscriber store - substring match, so `List<S>`
//!   counts)
//! - Subscriber: S
//! - ConcreteObserver: implementors/extenders of S
//! - ConcretePublisher: implementors/extenders of the Publisher
//!
//! One inheritance level is walked upward: when a known ancestor of the
//! Publisher also has a method accepting S, the ancestor is registered as an
//! additional Publisher role with the Publisher as its concrete
//! implementor.

use super::{ObserverRoles, PatternDetector, PatternEvidence};
use crate::model::CodeModel;
use std::collections::{BTreeMap, BTreeSet};

pub struct ObserverDetector;

impl ObserverDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ObserverDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for ObserverDetector {
    fn name(&self) -> &'static str {
        "observer"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        let mut subscribers: BTreeMap<String, ObserverRoles> = BTreeMap::new();

        for publisher in model.types() {
            for method in &publisher.methods {
                for param in &method.parameters {
                    let Some(subscriber) = model.get(&param.type_name) else {
                        continue;
                    };
                    if subscriber.name == publisher.name {
                        continue;
                    }

                    let stores_subscribers = publisher
                        .fields
                        .iter()
                        .any(|f| f.declared_type.contains(&subscriber.name));
                    if !stores_subscribers {
                        continue;
                    }

                    let concrete_observers: BTreeSet<String> = model
                        .subtypes(&subscriber.name)
                        .map(|t| t.name.clone())
                        .collect();
                    let concrete_publishers: BTreeSet<String> = model
                        .subtypes(&publisher.name)
                        .map(|t| t.name.clone())
                        .collect();

                    let roles = subscribers.entry(subscriber.name.clone()).or_default();
                    roles
                        .publisher
                        .entry(publisher.name.clone())
                        .or_default()
                        .extend(concrete_publishers);
                    roles.concrete_observer.extend(concrete_observers);

                    // One level up: an ancestor that also accepts S is a
                    // publisher in its own right, with this type as its
                    // concrete implementation.
                    for parent in publisher.supertypes() {
                        let Some(ancestor) = model.get(parent) else {
                            continue;
                        };
                        let ancestor_accepts = ancestor.methods.iter().any(|m| {
                            m.parameters.iter().any(|p| p.type_name == subscriber.name)
                        });
                        if ancestor_accepts {
                            roles
                                .publisher
                                .entry(ancestor.name.clone())
                                .or_default()
                                .insert(publisher.name.clone());
                        }
                    }
                }
            }
        }

        PatternEvidence::Observer(subscribers)
    }
}
