//! `{name}` placeholder substitution.
//!
//! A placeholder is `{` followed by one or more ASCII letters, digits or
//! underscores and a closing `}`. Anything else, including a lone `{`, is
//! copied through untouched.

/// Replace every placeholder with `lookup(name)`, or nothing when it yields `None`.
pub(crate) fn substitute<'v>(template: &str, lookup: impl Fn(&str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match placeholder(after) {
            Some(name) => {
                out.push_str(lookup(name).unwrap_or(""));
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The name at the start of `text` if it is followed by `}`.
fn placeholder(text: &str) -> Option<&str> {
    let len = text
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    (len > 0 && text.as_bytes().get(len) == Some(&b'}')).then(|| &text[..len])
}
