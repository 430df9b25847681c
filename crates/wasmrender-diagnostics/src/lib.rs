//! Problem reporting for the wasmrender toolchain.
//!
//! Turns compilation problems into readable multi-line messages with a
//! synthesized call stack, and routes them to a sink by severity:
//!
//! ```text
//! Method not found: Foo.bar()
//!     at Main.run(Main.java:12)
//!     at Main.main(Main.java:3)
//! ```
//!
//! This crate does not depend on the binary encoder.

mod call_graph;
mod problem;
mod report;

pub use call_graph::{CallGraph, CallSite, MapCallGraph};
pub use problem::{CallLocation, MethodReference, Problem, Severity, TextLocation};
pub use report::{
    describe_problem, describe_problems, render_call_location, render_call_stack, LogSink,
    ProblemSink,
};
