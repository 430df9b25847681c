use std::collections::HashMap;

use crate::problem::{MethodReference, TextLocation};

/// A call from `caller` to some callee, at `location` inside the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub caller: MethodReference,
    pub location: Option<TextLocation>,
}

/// Lookup of the call sites that invoke a method.
pub trait CallGraph {
    /// Call sites calling `method`, in discovery order. Empty for roots and
    /// for methods the graph does not know.
    fn caller_sites(&self, method: &MethodReference) -> &[CallSite];
}

/// In-memory call graph keyed by callee.
#[derive(Debug, Clone, Default)]
pub struct MapCallGraph {
    callers: HashMap<MethodReference, Vec<CallSite>>,
}

impl MapCallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `caller` calls `callee` at `location`.
    pub fn add_call(
        &mut self,
        caller: MethodReference,
        callee: MethodReference,
        location: Option<TextLocation>,
    ) {
        self.callers
            .entry(callee)
            .or_default()
            .push(CallSite { caller, location });
    }
}

impl CallGraph for MapCallGraph {
    fn caller_sites(&self, method: &MethodReference) -> &[CallSite] {
        self.callers.get(method).map(Vec::as_slice).unwrap_or(&[])
    }
}
