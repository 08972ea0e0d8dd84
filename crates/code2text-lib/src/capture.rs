//! Captures: a matched root node, its bindings and the template it renders with.

use std::collections::HashMap;

use code2text_core::{NodeId, SyntaxNode};
use indexmap::IndexMap;

use crate::options::RenderOptions;
use crate::pattern::{ListForm, Selection};
use crate::resolve::RenderMemo;
use crate::template;
use crate::{ROOT, ROOT_TEXT, TEXT_SUFFIX};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding<N> {
    Scalar(N),
    /// Every node bound to a `_list` name, in match order.
    Sequence(Vec<N>),
}

impl<N> Binding<N> {
    pub fn nodes(&self) -> &[N] {
        match self {
            Binding::Scalar(node) => std::slice::from_ref(node),
            Binding::Sequence(nodes) => nodes,
        }
    }
}

/// Non-root bindings of one match, in first-bound order.
pub type Bindings<N> = IndexMap<String, Binding<N>>;

/// How a capture's root node is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootRole {
    /// `@root`: the selected template.
    Rendered,
    /// `@root_text`: the node's own source text, or a template around `{root_text}`.
    Text,
}

impl RootRole {
    pub fn binding_name(self) -> &'static str {
        match self {
            RootRole::Rendered => ROOT,
            RootRole::Text => ROOT_TEXT,
        }
    }
}

/// A dependency of a capture on another node's output.
#[derive(Clone, Copy, Debug)]
pub struct Requirement<'c, N> {
    pub name: &'c str,
    pub node: &'c N,
}

impl<N> Requirement<'_, N> {
    /// `_text` dependencies take the node's source text instead of its rendering.
    pub fn is_text(&self) -> bool {
        self.name.ends_with(TEXT_SUFFIX)
    }
}

#[derive(Clone, Debug)]
pub struct Capture<N> {
    root: N,
    role: RootRole,
    bindings: Bindings<N>,
    /// `None` when no alternative qualified: the capture renders empty.
    template: Option<String>,
    list_forms: IndexMap<String, ListForm>,
}

impl<N: SyntaxNode> Capture<N> {
    pub fn new(
        root: N,
        role: RootRole,
        bindings: Bindings<N>,
        selection: Option<Selection<'_>>,
    ) -> Self {
        let (template, list_forms) = match selection {
            Some(selection) => (
                Some(selection.template.to_owned()),
                selection.list_forms.cloned().unwrap_or_default(),
            ),
            None => (None, IndexMap::new()),
        };
        Self {
            root,
            role,
            bindings,
            template,
            list_forms,
        }
    }

    /// Generic rendering for a node no pattern claimed: `(kind {ch0} {ch1} ...)`.
    pub fn fallback(node: &N) -> Self {
        let mut template = format!("({}", node.kind());
        let mut bindings = IndexMap::new();
        for (i, child) in node.children().into_iter().enumerate() {
            let name = format!("ch{i}");
            template.push_str(&format!(" {{{name}}}"));
            bindings.insert(name, Binding::Scalar(child));
        }
        template.push(')');
        Self {
            root: node.clone(),
            role: RootRole::Rendered,
            bindings,
            template: Some(template),
            list_forms: IndexMap::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.root.id()
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn role(&self) -> RootRole {
        self.role
    }

    pub fn bindings(&self) -> &Bindings<N> {
        &self.bindings
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn list_forms(&self) -> &IndexMap<String, ListForm> {
        &self.list_forms
    }

    /// Every node this capture needs rendered first, sequences flattened.
    pub fn requirements(&self) -> Vec<Requirement<'_, N>> {
        self.bindings
            .iter()
            .flat_map(|(name, binding)| {
                binding.nodes().iter().map(move |node| Requirement {
                    name: name.as_str(),
                    node,
                })
            })
            .collect()
    }

    /// Render the capture from its dependencies' memoized output.
    ///
    /// Dependencies missing from `memo` substitute as blank.
    pub fn format(&self, memo: &RenderMemo, options: &RenderOptions) -> String {
        let Some(template) = self.template.as_deref() else {
            return String::new();
        };

        let mut values: HashMap<&str, String> = HashMap::new();
        for (name, binding) in &self.bindings {
            let value = match binding {
                Binding::Scalar(node) if name.ends_with(TEXT_SUFFIX) => {
                    memo.get_text(node.id()).unwrap_or_default().to_owned()
                }
                Binding::Scalar(node) => memo.get(node.id()).unwrap_or_default().to_owned(),
                Binding::Sequence(nodes) => self.join_list(name, nodes, memo, options),
            };
            values.insert(name, value);
        }

        if self.role == RootRole::Text {
            let text = options.escape_text(self.root.text()).into_owned();
            values.insert(ROOT_TEXT, text);
        }

        // An empty `root_text` template stands for the text alone.
        let out = if self.role == RootRole::Text && template.is_empty() {
            values.remove(ROOT_TEXT).unwrap_or_default()
        } else {
            let template = options.escape_text(template);
            template::substitute(&template, |name| values.get(name).map(String::as_str))
        };

        if options.is_html() && !out.is_empty() {
            format!(
                r#"<span class="tree-node" data-id="{}">{out}</span>"#,
                self.root.id()
            )
        } else {
            out
        }
    }

    fn join_list(
        &self,
        name: &str,
        nodes: &[N],
        memo: &RenderMemo,
        options: &RenderOptions,
    ) -> String {
        let form = self.list_forms.get(name);
        let html = form
            .and_then(|form| form.html)
            .filter(|_| options.is_html());
        let separator = match (html, form.and_then(|form| form.join.as_deref())) {
            (Some(html), _) => html.separator(),
            (None, Some(join)) => join,
            (None, None) => " ",
        };

        let joined = nodes
            .iter()
            .filter_map(|node| memo.get(node.id()))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(separator);

        match html {
            Some(html) => html.wrap(&joined),
            None => joined,
        }
    }
}

/// Captures of one render pass, keyed by root node id.
#[derive(Debug)]
pub struct CaptureTable<N> {
    captures: HashMap<NodeId, Capture<N>>,
}

impl<N> Default for CaptureTable<N> {
    fn default() -> Self {
        Self {
            captures: HashMap::new(),
        }
    }
}

impl<N: SyntaxNode> CaptureTable<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `capture` unless its root already has one.
    ///
    /// Returns `false` when an earlier capture keeps the slot.
    pub fn register(&mut self, capture: Capture<N>) -> bool {
        match self.captures.entry(capture.id()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(capture);
                true
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Capture<N>> {
        self.captures.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.captures.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}
