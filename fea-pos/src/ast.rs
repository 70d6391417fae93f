//! The statements consumed by the compiler.
//!
//! These are produced by a front end that has already tokenized the source;
//! every statement corresponds to a single construct in the FEA source.

use smol_str::SmolStr;
use write_fonts::types::Tag;

use crate::types::{GlyphOrClass, Literal, SourceValueRecord};

/// A single top-level or block-level statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// A named integer
    DefineScalar {
        /// The name of the scalar
        name: SmolStr,
        /// Its value
        value: i16,
    },
    /// A named array: `@name = [seven eight nine];`
    DefineArray {
        /// The name of the array, without the `@`
        name: SmolStr,
        /// The items, in source order
        items: Vec<Literal>,
    },
    /// `valueRecordDef <1 2 3 4> name;`
    DefineValueRecord {
        /// The name of the record
        name: SmolStr,
        /// The record, resolved when it is defined
        value: SourceValueRecord,
    },
    /// `feature kern {`
    FeatureStart(Tag),
    /// `} kern;`
    FeatureEnd(Tag),
    /// `lookup name {`
    LookupStart(SmolStr),
    /// `} name;`
    LookupEnd(SmolStr),
    /// A positioning rule
    Pos(PosStatement),
    /// `subtable;`
    Subtable,
}

/// A `pos` statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PosStatement {
    /// `pos A -100;`
    Single {
        /// The glyph or class being adjusted
        target: GlyphOrClass,
        /// The adjustment
        value: SourceValueRecord,
    },
    /// `pos A V -50;` or `pos A <0 0 0 0> V <1 2 3 4>;`
    Pair {
        /// The first glyph or class of the pair
        first: GlyphOrClass,
        /// The second glyph or class of the pair
        second: GlyphOrClass,
        /// The adjustment to the first glyph
        first_value: SourceValueRecord,
        /// The adjustment to the second glyph, if one was written
        second_value: Option<SourceValueRecord>,
    },
}

impl Statement {
    /// A named scalar definition
    pub fn scalar(name: impl Into<SmolStr>, value: i16) -> Self {
        Statement::DefineScalar {
            name: name.into(),
            value,
        }
    }

    /// A named array definition
    pub fn array(name: impl Into<SmolStr>, items: impl IntoIterator<Item = Literal>) -> Self {
        Statement::DefineArray {
            name: name.into(),
            items: items.into_iter().collect(),
        }
    }

    /// `valueRecordDef <value> <name>;`
    pub fn value_record(name: impl Into<SmolStr>, value: SourceValueRecord) -> Self {
        Statement::DefineValueRecord {
            name: name.into(),
            value,
        }
    }

    /// `pos <target> <value>;`
    pub fn single_pos(target: GlyphOrClass, value: SourceValueRecord) -> Self {
        Statement::Pos(PosStatement::Single { target, value })
    }

    /// `pos <first> <second> <value>;`
    pub fn pair_pos(first: GlyphOrClass, second: GlyphOrClass, value: SourceValueRecord) -> Self {
        Statement::Pos(PosStatement::Pair {
            first,
            second,
            first_value: value,
            second_value: None,
        })
    }
}
