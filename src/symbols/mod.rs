//! Symbol vocabulary and substitution for scaffold.
//!
//! This module handles:
//! - The closed set of placeholders a template may contain
//! - Binding values to them and rewriting text

pub mod symbol;
pub mod table;

pub use symbol::Symbol;
pub use table::SymbolTable;
