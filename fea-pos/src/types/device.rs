//! Device tables: per-ppem adjustments to a single metric

use std::fmt::{Display, Formatter};

use write_fonts::tables::layout::Device;

use crate::compile::ResolveError;

/// A single `<ppem> <delta>` entry in a device table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceAdjustment {
    /// The size, in pixels per em, this entry applies to
    pub ppem: u16,
    /// The adjustment, in pixels
    pub delta: i16,
}

/// A device clause as written in a value record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeviceClause {
    /// `<device NULL>`
    Null,
    /// `<device 11 -1, 12 -1>`, as `(ppem, delta)` pairs in source order
    Entries(Vec<(u16, i16)>),
}

/// A validated, non-empty device table.
///
/// Entries are sorted by ppem, and each ppem appears at most once.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceTable {
    entries: Vec<DeviceAdjustment>,
}

impl DeviceClause {
    /// Validate this clause; `NULL` and an empty list both resolve to `None`.
    pub fn resolve(&self) -> Result<Option<DeviceTable>, ResolveError> {
        match self {
            DeviceClause::Null => Ok(None),
            DeviceClause::Entries(entries) => DeviceTable::new(entries.iter().copied()),
        }
    }
}

impl DeviceTable {
    /// Validate a set of `(ppem, delta)` pairs.
    ///
    /// Returns `None` if there are no entries.
    pub fn new(
        entries: impl IntoIterator<Item = (u16, i16)>,
    ) -> Result<Option<DeviceTable>, ResolveError> {
        let mut entries = entries
            .into_iter()
            .map(|(ppem, delta)| DeviceAdjustment { ppem, delta })
            .collect::<Vec<_>>();
        if entries.is_empty() {
            return Ok(None);
        }
        entries.sort_by_key(|adj| adj.ppem);
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].ppem == pair[1].ppem) {
            return Err(ResolveError::DuplicatePpem { ppem: pair[0].ppem });
        }

        // binary device tables store at most 8 bits per delta
        if let Some(bad) = entries.iter().find(|adj| i8::try_from(adj.delta).is_err()) {
            return Err(ResolveError::DeltaOutOfRange {
                ppem: bad.ppem,
                delta: bad.delta,
            });
        }
        Ok(Some(DeviceTable { entries }))
    }

    /// The adjustments, sorted by ppem.
    pub fn entries(&self) -> &[DeviceAdjustment] {
        &self.entries
    }

    /// Compile to a binary device table covering the first through last ppem.
    ///
    /// Sizes within that range that have no entry get a delta of zero.
    pub fn build(&self) -> Device {
        // new() guarantees at least one entry
        let start = self.entries[0].ppem;
        let end = self.entries[self.entries.len() - 1].ppem;
        let mut values = vec![0i8; (end - start) as usize + 1];
        for adj in &self.entries {
            // new() guarantees every delta fits
            values[(adj.ppem - start) as usize] = adj.delta as i8;
        }
        Device::new(start, end, &values)
    }
}

impl Display for DeviceTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("<device ")?;
        for (i, adj) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", adj.ppem, adj.delta)?;
        }
        f.write_str(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjustments(table: &DeviceTable) -> Vec<(u16, i16)> {
        table
            .entries()
            .iter()
            .map(|adj| (adj.ppem, adj.delta))
            .collect()
    }

    #[test]
    fn sorted_by_ppem() {
        let in_order = DeviceTable::new([(11, 111), (12, 112)]).unwrap().unwrap();
        let reversed = DeviceTable::new([(12, 112), (11, 111)]).unwrap().unwrap();
        assert_eq!(adjustments(&in_order), vec![(11, 111), (12, 112)]);
        assert_eq!(in_order, reversed);
    }

    #[test]
    fn duplicate_ppem() {
        assert_eq!(
            DeviceTable::new([(11, 111), (11, 112)]),
            Err(ResolveError::DuplicatePpem { ppem: 11 })
        );
        // the duplicate doesn't have to be adjacent in the source
        assert_eq!(
            DeviceTable::new([(11, 1), (14, 2), (11, 3)]),
            Err(ResolveError::DuplicatePpem { ppem: 11 })
        );
    }

    #[test]
    fn duplicate_wins_over_delta_range() {
        assert_eq!(
            DeviceTable::new([(11, 111), (11, 222)]),
            Err(ResolveError::DuplicatePpem { ppem: 11 })
        );
        assert_eq!(
            DeviceTable::new([(12, 300), (11, 1), (12, -300)]),
            Err(ResolveError::DuplicatePpem { ppem: 12 })
        );
    }

    #[test]
    fn null_and_empty() {
        assert_eq!(DeviceClause::Null.resolve(), Ok(None));
        assert_eq!(DeviceClause::Entries(Vec::new()).resolve(), Ok(None));
    }

    #[test]
    fn delta_out_of_range() {
        assert_eq!(
            DeviceTable::new([(11, 128)]),
            Err(ResolveError::DeltaOutOfRange {
                ppem: 11,
                delta: 128
            })
        );
        assert!(DeviceTable::new([(11, -128)]).is_ok());
    }

    #[test]
    fn build_fills_gaps() {
        let table = DeviceTable::new([(14, -2), (11, 1)]).unwrap().unwrap();
        let expected = Device::new(11, 14, &[1, 0, 0, -2]);
        assert_eq!(table.build(), expected);
    }

    #[test]
    fn display() {
        let table = DeviceTable::new([(12, 112), (11, 111)]).unwrap().unwrap();
        assert_eq!(table.to_string(), "<device 11 111, 12 112>");
    }
}
