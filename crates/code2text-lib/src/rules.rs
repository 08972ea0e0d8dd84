//! Rule library records and their compilation into [`Pattern`]s.
//!
//! ```json
//! [{"pattern": "(return_statement (_) @value) @root", "output": "return {value}"},
//!  {"pattern": "(call_expression arguments: (arguments (_)* @arg_list)) @root",
//!   "output": [{"condition": ["arg_list"], "template": "call with {arg_list}",
//!               "listForms": {"arg_list": {"join": ", ", "htmlType": "unorderedList"}}},
//!              {"template": "call"}]}]
//! ```

use std::fs;
use std::path::Path;

use code2text_core::QueryCompiler;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::pattern::{Alternative, HtmlList, ListForm, OutputSpec, Pattern};
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRule {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestor: Option<String>,
    pub output: RawOutput,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOutput {
    Template(String),
    Alternatives(Vec<RawAlternative>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAlternative {
    #[serde(default, alias = "cond", skip_serializing_if = "Vec::is_empty")]
    pub condition: Vec<RawCondition>,
    /// Missing means the alternative renders empty.
    #[serde(default, alias = "output", skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(
        default,
        rename = "listForms",
        alias = "lists",
        alias = "list_forms",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub list_forms: IndexMap<String, RawListForm>,
}

/// A required binding: `"name"` or `{"has": "name"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCondition {
    Name(String),
    Has { has: String },
}

impl RawCondition {
    pub fn name(&self) -> &str {
        match self {
            RawCondition::Name(name) | RawCondition::Has { has: name } => name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<String>,
    #[serde(
        default,
        rename = "htmlType",
        alias = "html_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub html_type: Option<HtmlList>,
}

impl RawRule {
    pub fn output_spec(&self) -> OutputSpec {
        match &self.output {
            RawOutput::Template(template) => OutputSpec::Template(template.clone()),
            RawOutput::Alternatives(alternatives) => OutputSpec::Alternatives(
                alternatives
                    .iter()
                    .map(|alt| Alternative {
                        condition: alt.condition.iter().map(|c| c.name().to_owned()).collect(),
                        template: alt.template.clone().unwrap_or_default(),
                        list_forms: alt
                            .list_forms
                            .iter()
                            .map(|(name, form)| {
                                let form = ListForm {
                                    join: form.join.clone(),
                                    html: form.html_type,
                                };
                                (name.clone(), form)
                            })
                            .collect(),
                    })
                    .collect(),
            ),
        }
    }

    /// Compile the pattern and ancestor queries. `index` labels errors.
    pub fn compile<C>(&self, index: usize, compiler: &C) -> Result<Pattern<C::Query>>
    where
        C: QueryCompiler + ?Sized,
    {
        let query = compiler
            .compile(&self.pattern)
            .map_err(|source| Error::InvalidPattern { index, source })?;
        let pattern = Pattern::new(query, self.output_spec());

        let Some(ancestor) = &self.ancestor else {
            return Ok(pattern);
        };
        let ancestor = compiler
            .compile(ancestor)
            .map_err(|source| Error::InvalidAncestor { index, source })?;
        Ok(pattern.with_ancestor(ancestor))
    }
}

/// An ordered rule library. Earlier rules win when two claim the same node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<RawRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RawRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RawRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append `other`'s rules after this set's.
    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    pub fn compile<C>(&self, compiler: &C) -> Result<Vec<Pattern<C::Query>>>
    where
        C: QueryCompiler + ?Sized,
    {
        compile_rules(&self.rules, compiler)
    }
}

/// Compile every rule in order. The first failure aborts the whole set.
pub fn compile_rules<C>(rules: &[RawRule], compiler: &C) -> Result<Vec<Pattern<C::Query>>>
where
    C: QueryCompiler + ?Sized,
{
    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| rule.compile(index, compiler))
        .collect()
}

/// Parse a JSON rule library.
pub fn parse_rules(json: &str) -> Result<RuleSet> {
    Ok(serde_json::from_str(json)?)
}

/// Load rules from a JSON file, or from every `*.json` file in a directory
/// in file-name order.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    if !fs::metadata(path).map_err(io_error)?.is_dir() {
        return load_file(path);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(io_error)? {
        let file = entry.map_err(io_error)?.path();
        if file.is_file() && file.extension().is_some_and(|ext| ext == "json") {
            files.push(file);
        }
    }
    if files.is_empty() {
        return Err(Error::NoRules(path.to_path_buf()));
    }
    files.sort();

    let mut rules = RuleSet::default();
    for file in &files {
        rules.extend(load_file(file)?);
    }
    Ok(rules)
}

fn load_file(path: &Path) -> Result<RuleSet> {
    let json = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| Error::MalformedFile {
        path: path.to_path_buf(),
        source,
    })
}
