//! Scaffold - CLI tool for materializing project templates.
//!
//! This library provides the core functionality for scaffold, including:
//! - The symbol vocabulary and single-pass text substitution
//! - Skip, quote and verbatim policies keyed on file names
//! - Walking a template tree and writing the renamed, substituted copy
//! - Configuration discovery and value binding for the CLI
//!
//! # Example
//!
//! ```no_run
//! use scaffold_cli::materialize::Materializer;
//! use scaffold_cli::policy::Policy;
//! use scaffold_cli::symbols::{Symbol, SymbolTable};
//!
//! let mut symbols = SymbolTable::new();
//! symbols.bind(Symbol::ProductName, "MyApp");
//! symbols.bind(Symbol::OrganizationName, "Rocket Insights, Inc.");
//!
//! let policy = Policy::default();
//! let report = Materializer::new("template/__PRODUCT_NAME__", "MyApp", &symbols, &policy)
//!     .run()
//!     .unwrap();
//! println!("wrote {} files", report.written.len());
//! ```

pub mod bindings;
pub mod config;
pub mod error;
pub mod materialize;
pub mod policy;
pub mod symbols;

pub use error::{Result, ScaffoldError};
