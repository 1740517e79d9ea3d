//! Facade detector.
//!
//! Facade is a structural pattern that provides a simplified entry point to
//! a complex set of classes.
//!
//! A candidate Facade is a type with no local variable declarations across
//! its methods (the proxy for "thin pass-through") whose methods call into
//! at least one different known type. Each called type is a candidate
//! Subsystem, kept only under the exclusivity rule: every incoming call on
//! every method of the subsystem must originate from the facade itself. A
//! single call from anywhere else - including from inside the subsystem -
//! disqualifies that subsystem. Facades with no surviving subsystem are
//! dropped.
//!
//! This is the one detector that reads call-graph records on both ends,
//! which is why detection can only start after the call graph builder has
//! finished.

use super::{PatternDetector, PatternEvidence};
use crate::model::CodeModel;
use std::collections::{BTreeMap, BTreeSet};

pub struct FacadeDetector;

impl FacadeDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FacadeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for FacadeDetector {
    fn name(&self) -> &'static str {
        "facade"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        // Pass 1: thin types and the known classes they call into.
        let mut candidates: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for entry in model.types() {
            if !entry.locals.is_empty() {
                continue;
            }
            let mut callees: BTreeSet<&str> = BTreeSet::new();
            for m in &entry.methods {
                for call in &m.outgoing_calls {
                    if call.callee_class != entry.name && model.contains(&call.callee_class) {
                        callees.insert(call.callee_class.as_str());
                    }
                }
            }
            if !callees.is_empty() {
                candidates.insert(entry.name.as_str(), callees);
            }
        }

        // Pass 2: exclusivity - the subsystem answers to nobody else.
        let mut facades = BTreeMap::new();
        for (facade, subsystems) in &candidates {
            let mut exclusive: BTreeSet<String> = BTreeSet::new();
            for subsystem in subsystems {
                let Some(entry) = model.get(subsystem) else {
                    continue;
                };
                let only_facade_calls = entry.methods.iter().all(|m| {
                    m.incoming_calls
                        .iter()
                        .all(|call| call.caller_class == *facade)
                });
                if only_facade_calls {
                    exclusive.insert((*subsystem).to_string());
                }
            }
            if !exclusive.is_empty() {
                facades.insert((*facade).to_string(), exclusive);
            }
        }

        PatternEvidence::Facade(facades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IncomingCall, LocalVariable, MethodInfo, OutgoingCall};
    use crate::patterns::fixtures::*;

    fn outgoing(callee_class: &str, callee_method: &str) -> OutgoingCall {
        OutgoingCall {
            callee_class: callee_class.into(),
            callee_method: callee_method.into(),
            resolved: true,
        }
    }

    fn incoming(caller_class: &str, caller_method: &str) -> IncomingCall {
        IncomingCall {
            caller_class: caller_class.into(),
            caller_method: caller_method.into(),
        }
    }

    /// VideoFacade delegates to Codec and Muxer, both called only by it.
    fn facade_model() -> CodeModel {
        let mut model = CodeModel::new();

        let mut facade = class("VideoFacade");
        let mut convert = MethodInfo::new("convert", "void").with_modifiers(&["public"]);
        convert.outgoing_calls.push(outgoing("Codec", "decode"));
        convert.outgoing_calls.push(outgoing("Muxer", "mux"));
        facade.methods.push(convert);
        model.insert(facade);

        let mut codec = class("Codec");
        let mut decode = MethodInfo::new("decode", "void").with_modifiers(&["public"]);
        decode.incoming_calls.push(incoming("VideoFacade", "convert"));
        codec.methods.push(decode);
        model.insert(codec);

        let mut muxer = class("Muxer");
        let mut mux = MethodInfo::new("mux", "void").with_modifiers(&["public"]);
        mux.incoming_calls.push(incoming("VideoFacade", "convert"));
        muxer.methods.push(mux);
        model.insert(muxer);

        model
    }

    fn detect(model: &CodeModel) -> BTreeMap<String, BTreeSet<String>> {
        match FacadeDetector::new().detect(model) {
            PatternEvidence::Facade(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn thin_delegator_with_exclusive_subsystems_is_a_facade() {
        let facades = detect(&facade_model());
        assert_eq!(
            facades["VideoFacade"],
            ["Codec", "Muxer"].map(String::from).into()
        );
    }

    #[test]
    fn one_foreign_incoming_call_excludes_that_subsystem() {
        let mut model = facade_model();
        let mut codec = model.get("Codec").unwrap().clone();
        codec.methods[0]
            .incoming_calls
            .push(incoming("DebugHarness", "poke"));
        model.insert(codec);
        model.insert(class("DebugHarness"));

        let facades = detect(&model);
        assert_eq!(facades["VideoFacade"], ["Muxer".to_string()].into());
    }

    #[test]
    fn facade_with_no_exclusive_subsystem_is_dropped() {
        let mut model = facade_model();
        for name in ["Codec", "Muxer"] {
            let mut entry = model.get(name).unwrap().clone();
            entry.methods[0]
                .incoming_calls
                .push(incoming("DebugHarness", "poke"));
            model.insert(entry);
        }
        model.insert(class("DebugHarness"));

        assert!(detect(&model).is_empty());
    }

    #[test]
    fn local_variables_disqualify_the_candidate() {
        let mut model = facade_model();
        let mut facade = model.get("VideoFacade").unwrap().clone();
        facade.locals.push(LocalVariable {
            declared_type: "int".into(),
            name: "frames".into(),
        });
        model.insert(facade);

        assert!(detect(&model).is_empty());
    }

    #[test]
    fn self_calls_do_not_make_a_subsystem() {
        let mut model = CodeModel::new();
        let mut loner = class("Loner");
        let mut run = MethodInfo::new("run", "void");
        run.outgoing_calls.push(outgoing("Loner", "helper"));
        loner.methods.push(run);
        loner.methods.push(MethodInfo::new("helper", "void"));
        model.insert(loner);

        assert!(detect(&model).is_empty());
    }

    #[test]
    fn calls_to_unknown_types_are_ignored() {
        let mut model = facade_model();
        let mut facade = model.get("VideoFacade").unwrap().clone();
        facade.methods[0]
            .outgoing_calls
            .push(outgoing("java.util.List", "add"));
        model.insert(facade);

        let facades = detect(&model);
        assert!(!facades["VideoFacade"].contains("java.util.List"));
    }

    #[test]
    fn subsystem_self_call_breaks_exclusivity() {
        let mut model = facade_model();
        let mut codec = model.get("Codec").unwrap().clone();
        codec.methods[0].incoming_calls.push(incoming("Codec", "retry"));
        model.insert(codec);

        let facades = detect(&model);
        assert!(!facades["VideoFacade"].contains("Codec"));
    }
}
