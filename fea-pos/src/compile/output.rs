//! The result of a compilation

use indexmap::IndexMap;
use smol_str::SmolStr;
use write_fonts::{tables::gpos::ValueRecord as RawValueRecord, types::Tag};

use crate::types::{PosKey, PosRule};

use super::{ContextTag, ValueRecordExt};

/// The type of rules a lookup contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LookupKind {
    /// GPOS type 1
    Single,
    /// GPOS type 2
    Pair,
}

/// A lookup and its resolved rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosLookup {
    /// The name of the lookup, or `None` for rules written directly in a feature
    pub name: Option<SmolStr>,
    /// The feature this lookup was defined in, if any
    pub feature: Option<Tag>,
    /// The axis bare values in this lookup were resolved on
    pub context: ContextTag,
    /// Whether this lookup holds single or pair adjustments
    pub kind: LookupKind,
    /// Rules, in the order they were first defined
    pub rules: IndexMap<PosKey, PosRule>,
}

/// A pair of binary value records for a single rule.
///
/// The second record is only present for pair adjustments.
pub type RawRecords = (RawValueRecord, Option<RawValueRecord>);

/// The output of a compilation operation.
///
/// Contains every positioning rule in the unit, grouped by lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compilation {
    /// Every non-empty lookup, in the order it was opened
    pub lookups: Vec<PosLookup>,
}

impl Compilation {
    /// All rules, in lookup order and then definition order.
    pub fn rules(&self) -> impl Iterator<Item = (&PosKey, &PosRule)> + '_ {
        self.lookups.iter().flat_map(|lookup| lookup.rules.iter())
    }

    /// The first rule stored for this key, in any lookup.
    pub fn get(&self, key: &PosKey) -> Option<&PosRule> {
        self.lookups.iter().find_map(|lookup| lookup.rules.get(key))
    }

    /// The lookups defined in the given feature, in order.
    pub fn lookups_for_feature(&self, tag: Tag) -> impl Iterator<Item = &PosLookup> + '_ {
        self.lookups
            .iter()
            .filter(move |lookup| lookup.feature == Some(tag))
    }
}

impl PosLookup {
    pub(crate) fn new(
        name: Option<SmolStr>,
        feature: Option<Tag>,
        context: ContextTag,
        kind: LookupKind,
    ) -> Self {
        PosLookup {
            name,
            feature,
            context,
            kind,
            rules: Default::default(),
        }
    }

    /// Lower each rule to the binary value records for this lookup type.
    ///
    /// Zero fields are dropped unless they carry a device table. In pair
    /// rules an all-zero record becomes a zero advance on the lookup's axis,
    /// and a missing second record is empty.
    pub fn build_records(&self) -> IndexMap<PosKey, RawRecords> {
        self.rules
            .iter()
            .map(|(key, rule)| {
                let records = match rule {
                    PosRule::Single(record) => (record.build().clear_zeros(), None),
                    PosRule::Pair { first, second } => (
                        first.build().for_pair_pos(self.context),
                        Some(
                            second
                                .as_ref()
                                .map(|second| second.build().for_pair_pos(self.context))
                                .unwrap_or_default(),
                        ),
                    ),
                };
                (key.clone(), records)
            })
            .collect()
    }
}
