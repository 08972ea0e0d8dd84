use std::fmt;
use std::path::Path;

use code2text_langs::Lang;

/// Pseudo-language name for hand-written S-expression trees.
pub const SEXP: &str = "sexp";

/// Where a source tree comes from.
pub enum SourceLang {
    /// `code2text_core::sexp` trees.
    Sexp,
    TreeSitter(Lang),
}

impl SourceLang {
    pub fn name(&self) -> &str {
        match self {
            SourceLang::Sexp => SEXP,
            SourceLang::TreeSitter(lang) => lang.name(),
        }
    }
}

impl fmt::Debug for SourceLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn from_name(name: &str) -> Option<SourceLang> {
    match name.to_ascii_lowercase().as_str() {
        SEXP | "s-expression" => Some(SourceLang::Sexp),
        _ => code2text_langs::from_name(name).map(SourceLang::TreeSitter),
    }
}

pub fn from_ext(ext: &str) -> Option<SourceLang> {
    if ext.eq_ignore_ascii_case(SEXP) {
        return Some(SourceLang::Sexp);
    }
    code2text_langs::from_ext(ext).map(SourceLang::TreeSitter)
}

/// Resolve the source language.
///
/// Order: explicit flag, source file extension, then the extension of a rule
/// directory name (`rules.js/` → javascript).
pub fn resolve_lang(
    explicit: Option<&str>,
    source_path: Option<&Path>,
    rules_path: Option<&Path>,
) -> Result<SourceLang, String> {
    if let Some(name) = explicit {
        return from_name(name).ok_or_else(|| unknown_language(name));
    }

    if let Some(path) = source_path
        && path.as_os_str() != "-"
        && let Some(ext) = path.extension().and_then(|e| e.to_str())
    {
        return from_ext(ext).ok_or_else(|| {
            format!("cannot infer language from extension '.{ext}', use -l/--lang")
        });
    }

    if let Some(lang) = rules_path.and_then(lang_from_rules_dir) {
        return Ok(lang);
    }

    Err("-l/--lang is required (cannot infer the language)".to_owned())
}

/// `rules.ts/` → typescript.
pub fn lang_from_rules_dir(path: &Path) -> Option<SourceLang> {
    if !path.is_dir() {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    from_ext(ext)
}

fn unknown_language(name: &str) -> String {
    let mut message = format!("unknown language: '{name}'");
    if let Some(suggestion) = suggest_language(name) {
        message.push_str(&format!("\n\nDid you mean '{suggestion}'?"));
    }
    message.push_str("\n\nRun 'code2text langs' for the full list.");
    message
}

/// Suggest similar language names for typos.
pub fn suggest_language(input: &str) -> Option<String> {
    let input_lower = input.to_lowercase();
    code2text_langs::all()
        .iter()
        .map(|lang| lang.name().to_owned())
        .chain([SEXP.to_owned()])
        .filter(|name| levenshtein(name, &input_lower) <= 2)
        .min_by_key(|name| levenshtein(name, &input_lower))
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut curr = vec![i + 1; b_chars.len() + 1];
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        prev = curr;
    }
    prev[b_chars.len()]
}
