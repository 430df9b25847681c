//! Problem text rendering and severity routing.

use std::collections::HashSet;

use log::{error, warn};

use crate::call_graph::CallGraph;
use crate::problem::{CallLocation, MethodReference, Problem, Severity, TextLocation};

/// Receives rendered problem messages.
pub trait ProblemSink {
    fn error(&mut self, text: &str);
    fn warning(&mut self, text: &str);
}

/// Routes problems to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProblemSink for LogSink {
    fn error(&mut self, text: &str) {
        error!("{text}");
    }

    fn warning(&mut self, text: &str) {
        warn!("{text}");
    }
}

/// Append `Class.method(File.java:LINE)` to `out`.
///
/// Unknown methods print as `unknown method`; the file name is reduced to its
/// last path component and omitted when unknown.
pub fn render_call_location(
    method: Option<&MethodReference>,
    location: Option<&TextLocation>,
    out: &mut String,
) {
    match method {
        Some(method) => out.push_str(&method.to_string()),
        None => out.push_str("unknown method"),
    }
    if let Some(location) = location {
        out.push('(');
        if let Some(file_name) = &location.file_name {
            let short = file_name.rsplit('/').next().unwrap_or(file_name);
            out.push_str(short);
            out.push(':');
        }
        out.push_str(&location.line.to_string());
        out.push(')');
    }
}

/// Append one `at` line for `location` and one per caller up the call graph.
///
/// Each step follows the first recorded caller. The walk ends at a method
/// without callers, or at a method already printed.
pub fn render_call_stack(
    graph: &dyn CallGraph,
    location: Option<&CallLocation>,
    out: &mut String,
) {
    let Some(location) = location else {
        return;
    };
    out.push_str("\n    at ");
    render_call_location(location.method.as_ref(), location.source.as_ref(), out);

    let Some(mut current) = location.method.as_ref() else {
        return;
    };
    let mut visited = HashSet::new();
    visited.insert(current);
    while let Some(site) = graph.caller_sites(current).first() {
        out.push_str("\n    at ");
        render_call_location(Some(&site.caller), site.location.as_ref(), out);
        if !visited.insert(&site.caller) {
            break;
        }
        current = &site.caller;
    }
}

/// The full message for one problem: its text followed by the call stack.
pub fn describe_problem(problem: &Problem, graph: &dyn CallGraph) -> String {
    let mut text = problem.text.clone();
    render_call_stack(graph, problem.location.as_ref(), &mut text);
    text
}

/// Describe every problem and hand it to `sink` according to its severity.
pub fn describe_problems(problems: &[Problem], graph: &dyn CallGraph, sink: &mut dyn ProblemSink) {
    for problem in problems {
        let text = describe_problem(problem, graph);
        match problem.severity {
            Severity::Error => sink.error(&text),
            Severity::Warning => sink.warning(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_graph::MapCallGraph;

    fn method(class: &str, name: &str) -> MethodReference {
        MethodReference::new(class, name)
    }

    #[derive(Default)]
    struct Recorder {
        errors: Vec<String>,
        warnings: Vec<String>,
    }

    impl ProblemSink for Recorder {
        fn error(&mut self, text: &str) {
            self.errors.push(text.to_string());
        }

        fn warning(&mut self, text: &str) {
            self.warnings.push(text.to_string());
        }
    }

    #[test]
    fn test_call_location_formats() {
        let mut out = String::new();
        render_call_location(
            Some(&method("a.B", "c")),
            Some(&TextLocation::new(Some("src/a/B.java"), 7)),
            &mut out,
        );
        assert_eq!(out, "a.B.c(B.java:7)");

        let mut out = String::new();
        render_call_location(None, Some(&TextLocation::new(None, 3)), &mut out);
        assert_eq!(out, "unknown method(3)");

        let mut out = String::new();
        render_call_location(Some(&method("X", "y")), None, &mut out);
        assert_eq!(out, "X.y");
    }

    #[test]
    fn test_no_location_no_stack() {
        let graph = MapCallGraph::new();
        let problem = Problem::error("boom");
        assert_eq!(describe_problem(&problem, &graph), "boom");
    }

    #[test]
    fn test_stack_follows_first_caller() {
        let mut graph = MapCallGraph::new();
        graph.add_call(
            method("Main", "run"),
            method("Util", "parse"),
            Some(TextLocation::new(Some("app/Main.java"), 12)),
        );
        graph.add_call(method("Other", "call"), method("Util", "parse"), None);
        graph.add_call(
            method("Main", "main"),
            method("Main", "run"),
            Some(TextLocation::new(Some("app/Main.java"), 3)),
        );

        let problem = Problem::error("Method not found: Foo.bar").at(CallLocation::new(
            Some(method("Util", "parse")),
            Some(TextLocation::new(Some("Util.java"), 40)),
        ));
        assert_eq!(
            describe_problem(&problem, &graph),
            "Method not found: Foo.bar\n    at Util.parse(Util.java:40)\n    at Main.run(Main.java:12)\n    at Main.main(Main.java:3)"
        );
    }

    #[test]
    fn test_unknown_method_has_single_frame() {
        let graph = MapCallGraph::new();
        let problem = Problem::warning("odd")
            .at(CallLocation::new(None, Some(TextLocation::new(None, 9))));
        assert_eq!(
            describe_problem(&problem, &graph),
            "odd\n    at unknown method(9)"
        );
    }

    #[test]
    fn test_recursive_callers_terminate() {
        let mut graph = MapCallGraph::new();
        graph.add_call(method("A", "f"), method("A", "g"), None);
        graph.add_call(method("A", "g"), method("A", "f"), None);

        let problem = Problem::error("loop")
            .at(CallLocation::new(Some(method("A", "g")), None));
        assert_eq!(
            describe_problem(&problem, &graph),
            "loop\n    at A.g\n    at A.f\n    at A.g"
        );
    }

    #[test]
    fn test_routing_by_severity() {
        let graph = MapCallGraph::new();
        let problems = vec![
            Problem::error("e1"),
            Problem::warning("w1"),
            Problem::error("e2"),
        ];
        let mut sink = Recorder::default();
        describe_problems(&problems, &graph, &mut sink);
        assert_eq!(sink.errors, vec!["e1", "e2"]);
        assert_eq!(sink.warnings, vec!["w1"]);
    }

    #[test]
    fn test_log_sink_accepts_both_severities() {
        let graph = MapCallGraph::new();
        let problems = vec![Problem::error("e"), Problem::warning("w")];
        describe_problems(&problems, &graph, &mut LogSink);
    }
}
