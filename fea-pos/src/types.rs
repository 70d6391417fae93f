use std::fmt::{Display, Formatter};

use smol_str::SmolStr;

mod device;
mod symbols;
mod value_record;

pub use device::{DeviceAdjustment, DeviceClause, DeviceTable};
pub use symbols::{Literal, NameKind, SymbolTable};
pub use value_record::{Metrics, SourceValueRecord, ValueRecord};

/// The name of a glyph, as written in the source.
pub type GlyphName = SmolStr;

/// The target of a positioning rule: a single glyph, or a named glyph class.
///
/// Classes are not expanded; a rule on `@kern1` is keyed by the class name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GlyphOrClass {
    /// A single named glyph
    Glyph(GlyphName),
    /// A named glyph class, without the `@`
    Class(SmolStr),
}

/// Identifies a positioning rule within a lookup.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosKey {
    /// A single adjustment, keyed by its target alone
    Single(GlyphOrClass),
    /// A pair adjustment
    Pair(GlyphOrClass, GlyphOrClass),
}

/// The resolved value of a positioning rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosRule {
    /// The adjustment of a single adjustment rule
    Single(ValueRecord),
    /// The adjustments of a pair adjustment rule
    Pair {
        /// The adjustment to the first glyph
        first: ValueRecord,
        /// The adjustment to the second glyph, if any
        second: Option<ValueRecord>,
    },
}

impl GlyphOrClass {
    /// A single glyph
    pub fn glyph(name: impl Into<GlyphName>) -> Self {
        GlyphOrClass::Glyph(name.into())
    }

    /// A glyph class, by name
    pub fn class(name: impl Into<SmolStr>) -> Self {
        GlyphOrClass::Class(name.into())
    }
}

impl PosKey {
    /// The key of a pair adjustment rule
    pub fn pair(first: GlyphOrClass, second: GlyphOrClass) -> Self {
        PosKey::Pair(first, second)
    }
}

impl Display for GlyphOrClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GlyphOrClass::Glyph(name) => write!(f, "{name}"),
            GlyphOrClass::Class(name) => write!(f, "@{name}"),
        }
    }
}

impl Display for PosKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PosKey::Single(target) => write!(f, "{target}"),
            PosKey::Pair(first, second) => write!(f, "{first} {second}"),
        }
    }
}

impl Display for PosRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PosRule::Single(record) => write!(f, "{record}"),
            PosRule::Pair {
                first,
                second: None,
            } => write!(f, "{first}"),
            PosRule::Pair {
                first,
                second: Some(second),
            } => write!(f, "{first} {second}"),
        }
    }
}
