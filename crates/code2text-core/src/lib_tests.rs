use std::collections::HashSet;

use crate::{NodeId, QueryError, QueryMatch};

#[test]
fn node_ids_hash_by_raw_value() {
    let mut seen = HashSet::new();
    seen.insert(NodeId::from_raw(7));
    seen.insert(NodeId::from_raw(7));
    seen.insert(NodeId::from_raw(8));

    assert_eq!(seen.len(), 2);
}

#[test]
fn node_id_display_is_raw_value() {
    assert_eq!(NodeId::from_raw(42).to_string(), "42");
}

#[test]
fn query_match_get_returns_first_binding() {
    let m = QueryMatch::new(vec![
        ("a".to_owned(), 1),
        ("b".to_owned(), 2),
        ("a".to_owned(), 3),
    ]);

    assert_eq!(m.get("a"), Some(&1));
    assert_eq!(m.get("b"), Some(&2));
    assert_eq!(m.get("c"), None);
    assert!(!m.is_empty());
}

#[test]
fn query_error_display_includes_offset() {
    let err = QueryError::new("unexpected `)`", 12);
    insta::assert_snapshot!(err.to_string(), @"unexpected `)` (at byte 12)");
}
