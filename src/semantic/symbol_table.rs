//! Scope tree and reference chains of one SystemVerilog design
mod integrity;
mod lookup;
mod passes;
mod print;
mod reference;
mod scope;
mod symbol;
mod table;

pub use integrity::IntegrityError;
pub use reference::{RefId, RefKind, ReferenceComponent, ReferenceNode};
pub use scope::{ScopeId, ScopeNode, TableId};
pub use symbol::{DeclarationType, KindCheck, RequiredKind, SymbolInfo, SymbolKind};
pub use table::SymbolTable;
pub(crate) use table::DetachedBody;
