//! Diagnostics: build and resolve findings.
//!
//! Every recoverable problem found while building or resolving a symbol
//! table is a [`Diagnostic`]. They accumulate; nothing here aborts a pass.

use std::sync::Arc;

use crate::base::{FileId, LineIndex, TextRange};
use crate::project::ProjectError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// What went wrong, independent of wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Duplicate declaration, or an out-of-line kind that conflicts with its prototype.
    AlreadyExists,
    /// No symbol, member, or file by that name.
    NotFound,
    /// A symbol was found but is the wrong kind, or has no members.
    InvalidArgument,
}

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// The file containing the offending text, when known.
    pub file: Option<FileId>,
    /// Byte range of the offending text within `file`.
    pub range: Option<TextRange>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(kind: DiagnosticKind, message: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            code: None,
            message: message.into(),
            file: None,
            range: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(kind: DiagnosticKind, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, message)
        }
    }

    /// Set the location for this diagnostic.
    pub fn with_location(mut self, file: Option<FileId>, range: Option<TextRange>) -> Self {
        self.file = file;
        self.range = range;
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Render as `path:line:col: message`, 1-based, when a line index is available.
    pub fn render(&self, path: Option<&str>, lines: Option<&LineIndex>) -> String {
        match (path, self.range, lines) {
            (Some(path), Some(range), Some(lines)) => {
                let at = lines.line_col(range.start());
                format!("{}:{}:{}: {}", path, at.line + 1, at.col + 1, self.message)
            }
            (Some(path), _, _) => format!("{}: {}", path, self.message),
            _ => self.message.to_string(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<ProjectError> for Diagnostic {
    fn from(err: ProjectError) -> Self {
        match &err {
            ProjectError::NotFound { .. } => Diagnostic::error(DiagnosticKind::NotFound, err.to_string())
                .with_code(codes::FILE_NOT_FOUND),
            ProjectError::Parse { .. } => {
                Diagnostic::error(DiagnosticKind::InvalidArgument, err.to_string())
                    .with_code(codes::PARSE_FAILED)
            }
        }
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes for symbol table findings.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Build and resolve errors
/// - **W0001-W0099**: Warnings
pub mod codes {
    /// Unqualified name not found in any enclosing scope.
    pub const UNRESOLVED_SYMBOL: &str = "E0001";
    /// Qualified member not found in its parent scope.
    pub const NO_SUCH_MEMBER: &str = "E0002";
    /// Symbol found but of the wrong kind.
    pub const KIND_MISMATCH: &str = "E0003";
    /// Duplicate definition in one scope.
    pub const DUPLICATE_DEFINITION: &str = "E0004";
    /// Member access into a type without members.
    pub const NO_MEMBERS: &str = "E0005";
    /// Out-of-line definition conflicts with its prototype.
    pub const OUT_OF_LINE_CONFLICT: &str = "E0006";
    /// Translation unit or include file unknown to the project.
    pub const FILE_NOT_FOUND: &str = "E0007";
    /// Source file could not be parsed.
    pub const PARSE_FAILED: &str = "E0008";

    /// Out-of-line method had no prototype and was added to its class.
    pub const INJECTED_METHOD: &str = "W0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during one build or resolve pass.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        tracing::debug!("[DIAG] {:?}: {}", diagnostic.kind, diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// Add a duplicate definition error.
    pub fn already_defined(
        &mut self,
        name: &str,
        scope_path: &str,
        file: Option<FileId>,
        range: Option<TextRange>,
    ) {
        self.add(
            Diagnostic::error(
                DiagnosticKind::AlreadyExists,
                format!("\"{}\" is already defined in the {} scope", name, scope_path),
            )
            .with_location(file, range)
            .with_code(codes::DUPLICATE_DEFINITION),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the collected diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Add diagnostics already reported by another pass.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}
