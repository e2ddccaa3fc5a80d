//! Diagnostic assertion helpers.

use versym::Diagnostic;
use versym::semantic::Severity;

/// Messages of all diagnostics, sorted, for order-insensitive comparison.
pub fn sorted_messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    let mut messages: Vec<String> = diagnostics.iter().map(|d| d.message.to_string()).collect();
    messages.sort();
    messages
}

pub fn errors(diagnostics: &[Diagnostic]) -> Vec<&Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect()
}

/// Assert exactly one diagnostic carries `message`.
pub fn assert_single_message(diagnostics: &[Diagnostic], message: &str) {
    let matching = diagnostics
        .iter()
        .filter(|d| &*d.message == message)
        .count();
    assert_eq!(
        matching, 1,
        "expected one diagnostic \"{}\", got: {:#?}",
        message, diagnostics
    );
}

pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors = errors(diagnostics);
    assert!(errors.is_empty(), "unexpected errors: {:#?}", errors);
}
