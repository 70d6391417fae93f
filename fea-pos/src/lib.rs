//! Resolving GPOS value records from Adobe OpenType Feature File statements.
//!
//! The input is a stream of already tokenized [`Statement`]s; the output is
//! a [`Compilation`] containing every positioning rule, with all names
//! resolved and every value record in a single canonical form.

#![deny(missing_docs)]

pub mod ast;
pub mod compile;
mod types;


pub use ast::{PosStatement, Statement};
pub use compile::{compile, Compilation, CompilerError, ContextTag, Opts, ResolveError};
pub use types::{
    DeviceAdjustment, DeviceClause, DeviceTable, GlyphName, GlyphOrClass, Literal, Metrics,
    NameKind, PosKey, PosRule, SourceValueRecord, SymbolTable, ValueRecord,
};
