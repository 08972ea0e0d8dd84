//! Grammars compiled into the binary, each behind its `lang-*` feature.

use std::sync::{Arc, LazyLock};

use crate::{Lang, LangInner};

/// One enabled grammar: lookup names and file extensions.
struct Builtin {
    names: &'static [&'static str],
    extensions: &'static [&'static str],
    load: fn() -> Lang,
}

/// Declares a constructor per grammar plus the `BUILTINS` lookup table.
///
/// Each grammar is loaded at most once per process; constructors hand out
/// clones of the shared handle.
macro_rules! define_langs {
    (
        $(
            $fn_name:ident => {
                feature: $feature:literal,
                name: $name:literal,
                ts_lang: $ts_lang:expr,
                names: [$($alias:literal),* $(,)?],
                extensions: [$($ext:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            #[cfg(feature = $feature)]
            pub fn $fn_name() -> Lang {
                static GRAMMAR: LazyLock<Lang> =
                    LazyLock::new(|| Arc::new(LangInner::new($name, $ts_lang.into())));
                Lang::clone(&GRAMMAR)
            }
        )*

        static BUILTINS: &[Builtin] = &[
            $(
                #[cfg(feature = $feature)]
                Builtin {
                    names: &[$($alias),*],
                    extensions: &[$($ext),*],
                    load: $fn_name,
                },
            )*
        ];
    };
}

/// Look a grammar up by name or alias, ignoring case.
pub fn from_name(name: &str) -> Option<Lang> {
    let name = name.to_ascii_lowercase();
    BUILTINS
        .iter()
        .find(|builtin| builtin.names.contains(&name.as_str()))
        .map(|builtin| (builtin.load)())
}

/// Look a grammar up by file extension (without the dot), ignoring case.
pub fn from_ext(ext: &str) -> Option<Lang> {
    let ext = ext.to_ascii_lowercase();
    BUILTINS
        .iter()
        .find(|builtin| builtin.extensions.contains(&ext.as_str()))
        .map(|builtin| (builtin.load)())
}

/// Every enabled grammar, in declaration order.
pub fn all() -> Vec<Lang> {
    BUILTINS.iter().map(|builtin| (builtin.load)()).collect()
}

define_langs! {
    bash => {
        feature: "lang-bash",
        name: "bash",
        ts_lang: arborium_bash::language(),
        names: ["bash", "sh", "shell"],
        extensions: ["sh", "bash"],
    },
    c => {
        feature: "lang-c",
        name: "c",
        ts_lang: arborium_c::language(),
        names: ["c"],
        extensions: ["c", "h"],
    },
    go => {
        feature: "lang-go",
        name: "go",
        ts_lang: arborium_go::language(),
        names: ["go", "golang"],
        extensions: ["go"],
    },
    javascript => {
        feature: "lang-javascript",
        name: "javascript",
        ts_lang: arborium_javascript::language(),
        names: ["javascript", "js", "jsx"],
        extensions: ["js", "mjs", "cjs", "jsx"],
    },
    json => {
        feature: "lang-json",
        name: "json",
        ts_lang: arborium_json::language(),
        names: ["json"],
        extensions: ["json"],
    },
    python => {
        feature: "lang-python",
        name: "python",
        ts_lang: arborium_python::language(),
        names: ["python", "py"],
        extensions: ["py", "pyi"],
    },
    rust => {
        feature: "lang-rust",
        name: "rust",
        ts_lang: arborium_rust::language(),
        names: ["rust", "rs"],
        extensions: ["rs"],
    },
    typescript => {
        feature: "lang-typescript",
        name: "typescript",
        ts_lang: arborium_typescript::language(),
        names: ["typescript", "ts"],
        extensions: ["ts", "mts", "cts"],
    },
}
