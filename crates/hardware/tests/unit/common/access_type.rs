//! # Access Type Tests
//!
//! Verifies trace-character parsing and the write predicate.

use cachesim_core::common::AccessType;

#[test]
fn parses_lower_and_upper_case_tags() {
    assert_eq!(AccessType::from_trace_char('r'), Some(AccessType::Read));
    assert_eq!(AccessType::from_trace_char('R'), Some(AccessType::Read));
    assert_eq!(AccessType::from_trace_char('w'), Some(AccessType::Write));
    assert_eq!(AccessType::from_trace_char('W'), Some(AccessType::Write));
}

#[test]
fn rejects_other_tags() {
    for c in ['x', 'l', 's', ' ', '0'] {
        assert_eq!(AccessType::from_trace_char(c), None, "tag {c:?}");
    }
}

#[test]
fn trace_char_matches_parser() {
    for kind in [AccessType::Read, AccessType::Write] {
        assert_eq!(AccessType::from_trace_char(kind.as_trace_char()), Some(kind));
    }
}

#[test]
fn only_writes_are_writes() {
    assert!(AccessType::Write.is_write());
    assert!(!AccessType::Read.is_write());
}
