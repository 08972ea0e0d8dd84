//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use code2text_lib::Verbosity;

use crate::commands::check::CheckArgs;
use crate::commands::render::RenderArgs;
use crate::commands::tree::TreeArgs;

pub struct RenderParams {
    pub rules_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub html: bool,
    pub verbose: u8,
}

impl RenderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            rules_path: rules_path(m),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            html: m.get_flag("html"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<RenderParams> for RenderArgs {
    fn from(p: RenderParams) -> Self {
        Self {
            rules_path: p.rules_path,
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            html: p.html,
            verbosity: parse_verbosity(p.verbose),
        }
    }
}

pub struct TreeParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub raw: bool,
    pub spans: bool,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            raw: p.raw,
            spans: p.spans,
        }
    }
}

pub struct CheckParams {
    pub rules_path: PathBuf,
    pub lang: Option<String>,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            rules_path: rules_path(m),
            lang: m.get_one::<String>("lang").cloned(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            rules_path: p.rules_path,
            lang: p.lang,
        }
    }
}

pub struct LangsParams;

impl LangsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

/// RULES is a required positional; clap rejects the command without it.
fn rules_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("rules_path").cloned().unwrap_or_default()
}

/// `-v` count to tracer verbosity; no flag means no tracing.
fn parse_verbosity(count: u8) -> Option<Verbosity> {
    match count {
        0 => None,
        1 => Some(Verbosity::Default),
        2 => Some(Verbosity::Verbose),
        _ => Some(Verbosity::VeryVerbose),
    }
}
