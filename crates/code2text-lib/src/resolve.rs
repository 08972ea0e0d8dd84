//! Bottom-up rendering of a tree from its capture table.
//!
//! The resolver never recurses. A work stack starts at the tree root; the top
//! frame either finds all of its dependencies memoized and renders, or pushes
//! the missing ones and waits. Every node is rendered at most once, so nodes
//! shared by several captures cost nothing extra.

use std::collections::{HashMap, HashSet};

use code2text_core::{NodeId, Query, SyntaxNode};

use crate::capture::{Capture, CaptureTable};
use crate::options::RenderOptions;
use crate::pattern::Pattern;
use crate::trace::{NoopTracer, Tracer};

/// Rendered output per node id, plus the source text of `_text` dependencies.
///
/// Entries are written once and never change. The two kinds are kept apart so
/// a node can be both rendered and quoted as text.
#[derive(Debug, Default)]
pub struct RenderMemo {
    rendered: HashMap<NodeId, String>,
    text: HashMap<NodeId, String>,
}

impl RenderMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&str> {
        self.rendered.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.rendered.contains_key(&id)
    }

    /// Returns `false` and keeps the old entry if `id` is already rendered.
    pub fn insert(&mut self, id: NodeId, output: String) -> bool {
        if self.rendered.contains_key(&id) {
            return false;
        }
        self.rendered.insert(id, output);
        true
    }

    pub fn get_text(&self, id: NodeId) -> Option<&str> {
        self.text.get(&id).map(String::as_str)
    }

    pub fn contains_text(&self, id: NodeId) -> bool {
        self.text.contains_key(&id)
    }

    /// Memoize a node's (escaped) source text. First write wins.
    pub fn insert_text(&mut self, id: NodeId, text: String) -> bool {
        if self.text.contains_key(&id) {
            return false;
        }
        self.text.insert(id, text);
        true
    }

    pub fn take(&mut self, id: NodeId) -> Option<String> {
        self.rendered.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}

/// Render `root` with `patterns`, earlier patterns taking priority.
pub fn render<N, Q>(patterns: &[Pattern<Q>], root: &N, options: RenderOptions) -> String
where
    N: SyntaxNode,
    Q: Query<N>,
{
    render_with(patterns, root, options, &mut NoopTracer)
}

pub fn render_with<N, Q, T>(
    patterns: &[Pattern<Q>],
    root: &N,
    options: RenderOptions,
    tracer: &mut T,
) -> String
where
    N: SyntaxNode,
    Q: Query<N>,
    T: Tracer,
{
    let mut table = CaptureTable::new();
    for pattern in patterns {
        pattern.match_tree_with(root, &mut table, tracer);
    }
    resolve(&mut table, root, &options, tracer)
}

/// Render `root` from an already populated capture table.
///
/// Nodes without a capture get a fallback capture added to `table`.
pub fn resolve<N, T>(
    table: &mut CaptureTable<N>,
    root: &N,
    options: &RenderOptions,
    tracer: &mut T,
) -> String
where
    N: SyntaxNode,
    T: Tracer,
{
    let mut memo = RenderMemo::new();
    let mut stack = vec![root.clone()];
    // Frames waiting on dependencies. Everything above such a frame on the
    // stack is one of its transitive dependencies.
    let mut waiting: HashSet<NodeId> = HashSet::new();

    while let Some(node) = stack.last().cloned() {
        let id = node.id();
        if memo.contains(id) {
            stack.pop();
            continue;
        }

        if !table.contains(id) {
            tracer.trace_fallback(id, node.kind());
            table.register(Capture::fallback(&node));
        }
        let Some(capture) = table.get(id) else {
            stack.pop();
            continue;
        };

        let mut pending = 0;
        for requirement in capture.requirements() {
            let dep = requirement.node.id();
            if requirement.is_text() {
                if !memo.contains_text(dep) {
                    let text = requirement.node.text();
                    tracer.trace_text(dep, text);
                    memo.insert_text(dep, options.escape_text(text).into_owned());
                }
                continue;
            }
            if memo.contains(dep) {
                continue;
            }
            if dep == id || waiting.contains(&dep) {
                // A capture bound one of its own ancestors; render it blank.
                tracer.trace_cycle(id, dep);
                continue;
            }
            stack.push(requirement.node.clone());
            pending += 1;
        }

        if pending > 0 {
            tracer.trace_defer(id, pending);
            waiting.insert(id);
            continue;
        }

        let output = capture.format(&memo, options);
        tracer.trace_render(id, &output);
        stack.pop();
        waiting.remove(&id);
        memo.insert(id, output);
    }

    memo.take(root.id()).unwrap_or_default()
}
