//! Cross-table integrity of reference links.

use smol_str::SmolStr;
use thiserror::Error;

use super::scope::{ScopeId, TableId};
use super::table::SymbolTable;

/// A reference link or handle that escapes its owning table.
///
/// This is a data-loss class failure in the host program, not a finding
/// about the analyzed source, so it is never reported as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error(
        "reference \"{identifier}\" in table {owner:?} is bound to a scope of table {target:?}"
    )]
    ForeignTarget {
        identifier: SmolStr,
        owner: TableId,
        target: TableId,
    },

    #[error("reference \"{identifier}\" is bound to scope #{index}, which does not exist")]
    DanglingTarget { identifier: SmolStr, index: usize },

    #[error("handle #{index} of table {handle:?} used with table {owner:?}")]
    ForeignHandle {
        owner: TableId,
        handle: TableId,
        index: usize,
    },
}

impl SymbolTable {
    /// Verify that every resolved link points into this table.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        for node in &self.refs {
            if let Some(target) = node.component().resolved {
                self.check_target(&node.component().identifier, target)?;
            }
        }
        Ok(())
    }

    fn check_target(&self, identifier: &SmolStr, target: ScopeId) -> Result<(), IntegrityError> {
        if target.table() != self.id {
            return Err(IntegrityError::ForeignTarget {
                identifier: identifier.clone(),
                owner: self.id,
                target: target.table(),
            });
        }
        if target.index() >= self.scopes.len() {
            return Err(IntegrityError::DanglingTarget {
                identifier: identifier.clone(),
                index: target.index(),
            });
        }
        Ok(())
    }
}

impl Drop for SymbolTable {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Err(err) = self.check_integrity() {
            tracing::error!("[INTEGRITY] {}", err);
            panic!("symbol table integrity violated: {err}");
        }
    }
}
