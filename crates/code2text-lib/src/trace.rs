//! Tracing hooks for matching and resolution.
//!
//! [`NoopTracer`] compiles away entirely; [`PrintTracer`] collects one line
//! per event, filtered by [`Verbosity`], for the CLI's `-v` output.

use code2text_core::NodeId;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// (-v): captures, fallbacks and renders. No text.
    #[default]
    Default,
    /// (-vv): every event. Text on leaves.
    Verbose,
    /// (-vvv): every event. Rendered output too.
    VeryVerbose,
}

/// Instrumentation points of a render pass.
///
/// - `trace_capture` - after registering a match (`accepted` is false when an
///   earlier pattern already claimed the node)
/// - `trace_rootless_match` - a match bound neither `root` nor `root_text`
/// - `trace_fallback` - a node without a capture gets the generic rendering
/// - `trace_defer` - a frame waits for `pending` dependencies
/// - `trace_text` - a `_text` dependency resolved to source text
/// - `trace_cycle` - a dependency on a waiting frame was rendered blank
/// - `trace_render` - a node's output was memoized
pub trait Tracer {
    fn trace_capture(&mut self, node: NodeId, kind: &str, accepted: bool);

    fn trace_rootless_match(&mut self);

    fn trace_fallback(&mut self, node: NodeId, kind: &str);

    fn trace_defer(&mut self, node: NodeId, pending: usize);

    fn trace_text(&mut self, node: NodeId, text: &str);

    fn trace_cycle(&mut self, node: NodeId, dependency: NodeId);

    fn trace_render(&mut self, node: NodeId, output: &str);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_capture(&mut self, _node: NodeId, _kind: &str, _accepted: bool) {}

    #[inline(always)]
    fn trace_rootless_match(&mut self) {}

    #[inline(always)]
    fn trace_fallback(&mut self, _node: NodeId, _kind: &str) {}

    #[inline(always)]
    fn trace_defer(&mut self, _node: NodeId, _pending: usize) {}

    #[inline(always)]
    fn trace_text(&mut self, _node: NodeId, _text: &str) {}

    #[inline(always)]
    fn trace_cycle(&mut self, _node: NodeId, _dependency: NodeId) {}

    #[inline(always)]
    fn trace_render(&mut self, _node: NodeId, _output: &str) {}
}

/// Longest text shown before truncation.
const TEXT_WIDTH: usize = 40;

/// Tracer that collects trace lines for display.
#[derive(Debug, Default)]
pub struct PrintTracer {
    verbosity: Verbosity,
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn verbose(&self) -> bool {
        self.verbosity != Verbosity::Default
    }

    fn push(&mut self, event: &str, node: Option<NodeId>, content: &str) {
        let node = node.map(|id| format!("#{id}")).unwrap_or_default();
        let line = format!("{event:<9}{node:<7}{content}");
        self.lines.push(line.trim_end().to_owned());
    }
}

impl Tracer for PrintTracer {
    fn trace_capture(&mut self, node: NodeId, kind: &str, accepted: bool) {
        if accepted {
            self.push("capture", Some(node), kind);
        } else if self.verbose() {
            self.push("shadowed", Some(node), kind);
        }
    }

    fn trace_rootless_match(&mut self) {
        if self.verbose() {
            self.push("skip", None, "match without root");
        }
    }

    fn trace_fallback(&mut self, node: NodeId, kind: &str) {
        self.push("fallback", Some(node), kind);
    }

    fn trace_defer(&mut self, node: NodeId, pending: usize) {
        if self.verbose() {
            self.push("defer", Some(node), &format!("{pending} pending"));
        }
    }

    fn trace_text(&mut self, node: NodeId, text: &str) {
        if self.verbose() {
            self.push("text", Some(node), &quote(text));
        }
    }

    fn trace_cycle(&mut self, node: NodeId, dependency: NodeId) {
        self.push("cycle", Some(node), &format!("needs waiting #{dependency}"));
    }

    fn trace_render(&mut self, node: NodeId, output: &str) {
        if self.verbosity == Verbosity::VeryVerbose {
            self.push("render", Some(node), &quote(output));
        } else {
            self.push("render", Some(node), "");
        }
    }
}

fn quote(text: &str) -> String {
    format!("{:?}", truncate_text(text, TEXT_WIDTH))
}

pub(crate) fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{truncated}…")
    }
}
