//! Horizontal and vertical positioning contexts

use write_fonts::types::Tag;

use crate::types::ValueRecord;

/// The writing direction of the block a rule appears in.
///
/// A bare value like `pos A -100;` adjusts the x advance in a horizontal
/// context, and the y advance in a vertical one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContextTag {
    /// Bare values adjust the x advance
    #[default]
    Horizontal,
    /// Bare values adjust the y advance; used in `vkrn` and friends
    Vertical,
}

impl ContextTag {
    const VERTICAL_FEATURES: &'static [Tag] = &[
        Tag::new(b"valt"),
        Tag::new(b"vhal"),
        Tag::new(b"vkrn"),
        Tag::new(b"vpal"),
    ];

    /// The context for rules in the feature with this tag.
    ///
    /// This also applies to lookup blocks nested in that feature.
    pub fn for_feature(tag: Tag) -> Self {
        if Self::VERTICAL_FEATURES.contains(&tag) {
            ContextTag::Vertical
        } else {
            ContextTag::Horizontal
        }
    }

    /// Expand a bare value to a full record.
    pub fn resolve_single(self, value: i16) -> ValueRecord {
        match self {
            ContextTag::Horizontal => ValueRecord::x_advance(value),
            ContextTag::Vertical => ValueRecord::y_advance(value),
        }
    }

    /// `true` for the vertical writing direction.
    pub fn is_vertical(self) -> bool {
        self == ContextTag::Vertical
    }
}
