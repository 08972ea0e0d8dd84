//! Compiled rules and the matcher that turns query matches into captures.

use std::collections::HashSet;

use code2text_core::{Query, QueryMatch, SyntaxNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::capture::{Binding, Bindings, Capture, CaptureTable, RootRole};
use crate::trace::{NoopTracer, Tracer};
use crate::{LIST_SUFFIX, ROOT, ROOT_TEXT};

/// HTML markup for a list binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HtmlList {
    #[serde(alias = "p")]
    Paragraph,
    #[serde(alias = "ul")]
    UnorderedList,
    #[serde(alias = "ol")]
    OrderedList,
}

impl HtmlList {
    pub(crate) fn separator(self) -> &'static str {
        match self {
            HtmlList::Paragraph => "</p><p>",
            HtmlList::UnorderedList | HtmlList::OrderedList => "</li><li>",
        }
    }

    pub(crate) fn wrap(self, joined: &str) -> String {
        match self {
            HtmlList::Paragraph => format!("<p>{joined}</p>"),
            HtmlList::UnorderedList => format!("<ul><li>{joined}</li></ul>"),
            HtmlList::OrderedList => format!("<ol><li>{joined}</li></ol>"),
        }
    }
}

/// How one list binding is joined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListForm {
    /// Text-mode separator; a single space when absent.
    pub join: Option<String>,
    /// HTML-mode markup; overrides `join` in HTML mode.
    pub html: Option<HtmlList>,
}

/// One conditional choice of template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alternative {
    /// Binding names that must all be bound. Empty means always.
    pub condition: Vec<String>,
    pub template: String,
    pub list_forms: IndexMap<String, ListForm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputSpec {
    /// A single template used for every match.
    Template(String),
    /// Ordered alternatives; the first satisfied one wins.
    Alternatives(Vec<Alternative>),
}

/// The template a match renders with, borrowed from its [`OutputSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection<'p> {
    pub template: &'p str,
    pub list_forms: Option<&'p IndexMap<String, ListForm>>,
}

/// `true` when every name in `condition` is bound.
pub fn satisfies<N>(condition: &[String], bindings: &Bindings<N>) -> bool {
    condition.iter().all(|name| bindings.contains_key(name))
}

/// A compiled rule: a structural query and its [`OutputSpec`], optionally scoped by an ancestor query.
#[derive(Clone, Debug)]
pub struct Pattern<Q> {
    query: Q,
    ancestor: Option<Q>,
    output: OutputSpec,
}

impl<Q> Pattern<Q> {
    pub fn new(query: Q, output: OutputSpec) -> Self {
        Self {
            query,
            ancestor: None,
            output,
        }
    }

    /// Restrict matching to subtrees whose root the ancestor query captures as `@root`.
    pub fn with_ancestor(mut self, ancestor: Q) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn ancestor(&self) -> Option<&Q> {
        self.ancestor.as_ref()
    }

    pub fn output(&self) -> &OutputSpec {
        &self.output
    }

    /// Pick the template for a match with the given bindings.
    ///
    /// `None` means no alternative qualified and the match renders empty.
    pub fn resolve_output<N>(&self, bindings: &Bindings<N>) -> Option<Selection<'_>> {
        self.select(|name| bindings.contains_key(name))
    }

    fn select(&self, is_bound: impl Fn(&str) -> bool) -> Option<Selection<'_>> {
        match &self.output {
            OutputSpec::Template(template) => Some(Selection {
                template,
                list_forms: None,
            }),
            OutputSpec::Alternatives(alternatives) => alternatives
                .iter()
                .find(|alt| alt.condition.iter().all(|name| is_bound(name)))
                .map(|alt| Selection {
                    template: &alt.template,
                    list_forms: Some(&alt.list_forms),
                }),
        }
    }

    /// Run the query over `root` and register a capture for every match.
    pub fn match_tree<N>(&self, root: &N, table: &mut CaptureTable<N>)
    where
        N: SyntaxNode,
        Q: Query<N>,
    {
        self.match_tree_with(root, table, &mut NoopTracer);
    }

    pub fn match_tree_with<N, T>(&self, root: &N, table: &mut CaptureTable<N>, tracer: &mut T)
    where
        N: SyntaxNode,
        Q: Query<N>,
        T: Tracer,
    {
        let Some(ancestor) = &self.ancestor else {
            for m in self.query.matches(root) {
                self.register_match(m, table, tracer);
            }
            return;
        };

        let mut seen = HashSet::new();
        for scope in ancestor.matches(root) {
            let Some(scope_root) = scope.get(ROOT) else {
                continue;
            };
            if !seen.insert(scope_root.id()) {
                continue;
            }
            for m in self.query.matches(scope_root) {
                self.register_match(m, table, tracer);
            }
        }
    }

    fn register_match<N, T>(&self, m: QueryMatch<N>, table: &mut CaptureTable<N>, tracer: &mut T)
    where
        N: SyntaxNode,
        T: Tracer,
    {
        let Some((root, role, bindings)) = collect_bindings(m) else {
            tracer.trace_rootless_match();
            return;
        };
        // The root binding was split off but still counts as bound.
        let root_name = role.binding_name();
        let selection = self.select(|name| name == root_name || bindings.contains_key(name));
        let id = root.id();
        let kind = root.kind().to_owned();
        let accepted = table.register(Capture::new(root, role, bindings, selection));
        tracer.trace_capture(id, &kind, accepted);
    }
}

/// Split a match into its root node, root role and remaining bindings.
///
/// Names ending in `_list` accumulate every node in match order; other
/// names keep the last node bound. `root` wins over `root_text`.
fn collect_bindings<N: SyntaxNode>(m: QueryMatch<N>) -> Option<(N, RootRole, Bindings<N>)> {
    let mut bindings: Bindings<N> = IndexMap::new();
    for (name, node) in m.into_captures() {
        if name.ends_with(LIST_SUFFIX) {
            match bindings.entry(name).or_insert_with(|| Binding::Sequence(Vec::new())) {
                Binding::Sequence(nodes) => nodes.push(node),
                Binding::Scalar(_) => {}
            }
        } else {
            bindings.insert(name, Binding::Scalar(node));
        }
    }

    let (name, role) = if bindings.contains_key(ROOT) {
        (ROOT, RootRole::Rendered)
    } else if bindings.contains_key(ROOT_TEXT) {
        (ROOT_TEXT, RootRole::Text)
    } else {
        return None;
    };
    match bindings.shift_remove(name)? {
        Binding::Scalar(root) => Some((root, role, bindings)),
        Binding::Sequence(_) => None,
    }
}
