//! Error types related to compilation

use smol_str::SmolStr;

use crate::types::{NameKind, PosKey, PosRule};

/// An error encountered while resolving a single statement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A scalar, array or value record name that was never defined
    #[error("undefined {kind} '{name}'")]
    UndefinedName {
        /// What sort of name was expected
        kind: NameKind,
        /// The name as written
        name: SmolStr,
    },
    /// An array used where a different number of values is needed
    #[error("'{name}' has {found} values, expected {expected}")]
    WrongArity {
        /// The array, as written (`@name`)
        name: SmolStr,
        /// How many values the use site needs
        expected: usize,
        /// How many values the array holds
        found: usize,
    },
    /// A device table lists the same size twice
    #[error("ppem {ppem} appears more than once in device table")]
    DuplicatePpem {
        /// The repeated size
        ppem: u16,
    },
    /// A device delta that does not fit in a signed byte
    #[error("device delta {delta} at ppem {ppem} is outside the range -128..=127")]
    DeltaOutOfRange {
        /// The size of the offending entry
        ppem: u16,
        /// The offending delta
        delta: i16,
    },
    /// A rule for a key that already has a different value in scope
    #[error("conflicting redefinition of '{key}': previously '{previous}', now '{new}'")]
    ConflictingRedefinition {
        /// The glyph, class or pair being positioned
        key: PosKey,
        /// The value already recorded for `key`
        previous: Box<PosRule>,
        /// The value that was rejected
        new: Box<PosRule>,
    },
    /// A name defined a second time
    #[error("{kind} '{name}' is already defined")]
    DuplicateDefinition {
        /// What sort of name was defined
        kind: NameKind,
        /// The name as written
        name: SmolStr,
    },
    /// A block closed with a different name than it was opened with
    #[error("block '{found}' does not match open block '{expected}'")]
    MismatchedBlockEnd {
        /// The name of the open block
        expected: SmolStr,
        /// The name in the closing statement
        found: SmolStr,
    },
    /// A feature inside a feature, or a lookup inside a lookup
    #[error("'{inner}' cannot be nested inside '{outer}'")]
    NestedBlock {
        /// The block that is already open
        outer: SmolStr,
        /// The block that was opened inside it
        inner: SmolStr,
    },
    /// The input ended inside a block
    #[error("block '{0}' is never closed")]
    UnclosedBlock(SmolStr),
    /// A block end with no matching start
    #[error("end of '{0}', which was never opened")]
    UnopenedBlock(SmolStr),
    /// A named lookup containing both single and pair rules
    #[error("'{0}' mixes single and pair adjustments")]
    MixedLookupTypes(SmolStr),
}

/// An error reported by the compiler
///
/// Compilation stops at the first error, so there is only ever one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("statement {index}: {error}")]
pub struct CompilerError {
    /// The index of the offending statement in the input
    pub index: usize,
    /// What went wrong
    #[source]
    pub error: ResolveError,
}

impl ResolveError {
    pub(crate) fn undefined(kind: NameKind, name: impl Into<SmolStr>) -> Self {
        ResolveError::UndefinedName {
            kind,
            name: name.into(),
        }
    }
}
