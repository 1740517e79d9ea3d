//! Call graph assembly.
//!
//! Resolves the syntactic call sites collected by the parser into
//! caller -> callee records on the code model. This is the one mutator of a
//! [`CodeModel`]: every detector runs only after [`CallGraphBuilder::build`]
//! has returned the enriched model, so the builder acts as a hard barrier
//! between extraction and detection.
//!
//! Resolution never fails. Every call expression yields either a
//! [`Resolution::Resolved`] pair or a [`Resolution::Unresolved`] best-effort
//! guess derived from the call's syntactic scope, and both outcomes are
//! recorded as outgoing calls. Incoming records are only attached when the
//! resolved callee actually exists in the model.

use crate::model::{CodeModel, IncomingCall, OutgoingCall};
use crate::parser::CallSite;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::BTreeMap;

/// Outcome of resolving one call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The callee was pinned to a known class.
    Resolved {
        callee_class: String,
        callee_method: String,
    },
    /// Best-effort guess; `best_guess` is the receiver-derived class name.
    Unresolved { best_guess: String },
}

/// Capability for resolving a call expression against the model.
///
/// Implementations must not mutate anything and must not fail: a call that
/// cannot be pinned down returns `Unresolved`, never an error.
pub trait Resolver {
    fn resolve(&self, model: &CodeModel, site: &CallSite) -> Resolution;
}

/// Resolves calls from their syntactic scope.
///
/// The scope chain, tried in order: a call without a receiver belongs to the
/// caller's own class; a receiver naming a known type is a static call to
/// that type; a receiver naming a field (then a local variable) of the
/// caller resolves to the declared type of that field/variable when known.
/// Anything else is unresolved with the receiver text as the guess.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeResolver;

impl ScopeResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for ScopeResolver {
    fn resolve(&self, model: &CodeModel, site: &CallSite) -> Resolution {
        let receiver = match &site.receiver {
            None => {
                return Resolution::Resolved {
                    callee_class: site.caller_class.clone(),
                    callee_method: site.method_name.clone(),
                }
            }
            Some(receiver) => receiver.as_str(),
        };

        // Receiver names a known type: a static call.
        if model.contains(receiver) {
            return Resolution::Resolved {
                callee_class: receiver.to_string(),
                callee_method: site.method_name.clone(),
            };
        }

        // Receiver names a field or local of the caller.
        if let Some(caller) = model.get(&site.caller_class) {
            let declared = caller
                .fields
                .iter()
                .find(|f| f.declarators.iter().any(|d| d == receiver))
                .map(|f| f.declared_type.as_str())
                .or_else(|| {
                    caller
                        .locals
                        .iter()
                        .find(|l| l.name == receiver)
                        .map(|l| l.declared_type.as_str())
                });
            if let Some(declared) = declared {
                let class = erase_generics(declared);
                if model.contains(class) {
                    return Resolution::Resolved {
                        callee_class: class.to_string(),
                        callee_method: site.method_name.clone(),
                    };
                }
                return Resolution::Unresolved {
                    best_guess: class.to_string(),
                };
            }
        }

        Resolution::Unresolved {
            best_guess: receiver.to_string(),
        }
    }
}

/// `List<Subscriber>` -> `List`, `Counter[]` -> `Counter`.
fn erase_generics(declared: &str) -> &str {
    let end = declared
        .find(['<', '['])
        .unwrap_or(declared.len());
    declared[..end].trim()
}

/// Counts reported after assembly, for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallGraphStats {
    pub methods: usize,
    pub resolved_edges: usize,
    pub unresolved_calls: usize,
}

/// The one mutator of a [`CodeModel`].
pub struct CallGraphBuilder<R: Resolver = ScopeResolver> {
    model: CodeModel,
    resolver: R,
    graph: DiGraph<(String, String), ()>,
    indices: BTreeMap<(String, String), NodeIndex>,
    unresolved: usize,
}

impl CallGraphBuilder<ScopeResolver> {
    pub fn new(model: CodeModel) -> Self {
        Self::with_resolver(model, ScopeResolver::new())
    }
}

impl<R: Resolver> CallGraphBuilder<R> {
    pub fn with_resolver(model: CodeModel, resolver: R) -> Self {
        Self {
            model,
            resolver,
            graph: DiGraph::new(),
            indices: BTreeMap::new(),
            unresolved: 0,
        }
    }

    pub fn add_calls<'a>(&mut self, sites: impl IntoIterator<Item = &'a CallSite>) {
        for site in sites {
            self.add_call(site);
        }
    }

    /// Record one call expression on the model.
    ///
    /// The outgoing record is always attached to the caller's method (when
    /// the caller is known); the incoming record only when the resolved
    /// callee class and method both exist in the model.
    pub fn add_call(&mut self, site: &CallSite) {
        let resolution = self.resolver.resolve(&self.model, site);

        let (callee_class, resolved) = match &resolution {
            Resolution::Resolved { callee_class, .. } => (callee_class.clone(), true),
            Resolution::Unresolved { best_guess } => {
                self.unresolved += 1;
                (best_guess.clone(), false)
            }
        };

        if let Some(caller) = self.model.get_mut(&site.caller_class) {
            if let Some(method) = caller.methods.iter_mut().find(|m| m.name == site.caller_method) {
                method.outgoing_calls.push(OutgoingCall {
                    callee_class: callee_class.clone(),
                    callee_method: site.method_name.clone(),
                    resolved,
                });
            }
        }

        if resolved {
            let attached = self
                .model
                .get_mut(&callee_class)
                .and_then(|callee| {
                    callee
                        .methods
                        .iter_mut()
                        .find(|m| m.name == site.method_name)
                })
                .map(|method| {
                    method.incoming_calls.push(IncomingCall {
                        caller_class: site.caller_class.clone(),
                        caller_method: site.caller_method.clone(),
                    });
                })
                .is_some();

            if attached {
                let from = self.node(site.caller_class.clone(), site.caller_method.clone());
                let to = self.node(callee_class, site.method_name.clone());
                self.graph.update_edge(from, to, ());
            }
        }
    }

    fn node(&mut self, class: String, method: String) -> NodeIndex {
        let key = (class, method);
        if let Some(&index) = self.indices.get(&key) {
            return index;
        }
        let index = self.graph.add_node(key.clone());
        self.indices.insert(key, index);
        index
    }

    pub fn stats(&self) -> CallGraphStats {
        CallGraphStats {
            methods: self.graph.node_count(),
            resolved_edges: self.graph.edge_count(),
            unresolved_calls: self.unresolved,
        }
    }

    /// Finish assembly and release the enriched model.
    ///
    /// After this returns, nothing mutates the model again: detectors take
    /// it by shared reference only.
    pub fn build(self) -> CodeModel {
        self.model
    }
}
