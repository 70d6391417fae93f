//! Resolving positioning statements into canonical rules

use crate::ast::Statement;

use self::compile_ctx::CompilationCtx;

pub use context::ContextTag;
pub use error::{CompilerError, ResolveError};
pub use opts::{Opts, RedefinitionScope};
pub use output::{Compilation, LookupKind, PosLookup, RawRecords};
pub use rules::{Insertion, RuleTable};
pub use valuerecordext::ValueRecordExt;

mod compile_ctx;
mod context;
mod error;
mod opts;
mod output;
mod rules;
mod valuerecordext;

/// Run the compilation pass over the statements of one compilation unit.
///
/// Compilation stops at the first error, and no partial output is returned.
pub fn compile(
    statements: impl IntoIterator<Item = Statement>,
    opts: &Opts,
) -> Result<Compilation, CompilerError> {
    let mut ctx = CompilationCtx::new(opts);
    ctx.compile(statements)?;
    Ok(ctx.build())
}
