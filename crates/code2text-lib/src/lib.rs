//! code2text: render syntax trees to natural language or HTML.
//!
//! A rule set is an ordered list of [`Pattern`]s. Each pattern pairs a
//! structural query with an output template; every node the query captures
//! as `@root` (or `@root_text`) gets that template. Nodes no pattern claims
//! fall back to a generic `(kind child...)` rendering.
//!
//! # Example
//!
//! ```
//! use code2text_core::sexp::{SexpCompiler, SexpTree};
//! use code2text_lib::{RenderOptions, parse_rules, render};
//!
//! let rules = parse_rules(r#"[
//!     {"pattern": "(add left: (_) @a right: (_) @b) @root", "output": "{a} plus {b}"},
//!     {"pattern": "(num) @root_text", "output": ""}
//! ]"#).expect("valid rules");
//! let patterns = rules.compile(&SexpCompiler).expect("valid patterns");
//!
//! let tree = SexpTree::parse(r#"(add left: (num "1") right: (num "2"))"#).expect("valid tree");
//! assert_eq!(render(&patterns, &tree.root(), RenderOptions::new()), "1 plus 2");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod capture;
mod escape;
mod options;
mod pattern;
mod resolve;
mod rules;
mod template;
pub mod trace;

#[cfg(test)]
mod pattern_tests;
#[cfg(test)]
mod rules_tests;

use std::path::PathBuf;

pub use capture::{Binding, Bindings, Capture, CaptureTable, Requirement, RootRole};
pub use escape::escape_html;
pub use options::{EscapeFn, RenderMode, RenderOptions};
pub use pattern::{Alternative, HtmlList, ListForm, OutputSpec, Pattern, Selection, satisfies};
pub use resolve::{RenderMemo, render, render_with, resolve};
pub use rules::{RawAlternative, RawCondition, RawListForm, RawOutput, RawRule, RuleSet};
pub use rules::{compile_rules, load_rules, parse_rules};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};

// ============================================================================
// Binding names
// ============================================================================

/// Binding naming the node a pattern renders.
pub const ROOT: &str = "root";

/// Binding naming a node rendered as its own escaped source text.
pub const ROOT_TEXT: &str = "root_text";

/// Suffix for bindings collecting every matched node into a list.
pub const LIST_SUFFIX: &str = "_list";

/// Suffix for bindings substituted with the node's raw source text.
pub const TEXT_SUFFIX: &str = "_text";

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while loading or compiling rules.
///
/// Rendering itself never fails: unknown placeholders become blank and
/// unclaimed nodes fall back to the generic rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rule {index}: invalid pattern: {source}")]
    InvalidPattern {
        index: usize,
        #[source]
        source: code2text_core::QueryError,
    },

    #[error("rule {index}: invalid ancestor pattern: {source}")]
    InvalidAncestor {
        index: usize,
        #[source]
        source: code2text_core::QueryError,
    },

    #[error("malformed rules: {0}")]
    MalformedRules(#[from] serde_json::Error),

    #[error("malformed rules in {}: {source}", path.display())]
    MalformedFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no rule files in {}", .0.display())]
    NoRules(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
