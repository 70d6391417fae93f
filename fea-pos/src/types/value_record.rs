//! Value records, in source and canonical form

use std::fmt::{Display, Formatter};

use smol_str::SmolStr;
use write_fonts::tables::{gpos::ValueRecord as RawValueRecord, layout::DeviceOrVariationIndex};

use crate::compile::{ContextTag, ResolveError};

use super::{DeviceClause, DeviceTable, Literal, SymbolTable};

/// The four metrics of a value record, as written in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Metrics {
    /// `<1 0 800 0>`; each item must produce exactly one value
    Literals([Literal; 4]),
    /// `<@name>` style expansion of a four-item array
    Array(SmolStr),
}

/// The syntactic forms of a value record, before resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceValueRecord {
    /// A bare value; the axis depends on context
    Single(Literal),
    /// x placement, y placement, x advance, y advance
    Placement(Metrics),
    /// As `Placement`, with one device clause for each metric
    PlacementWithDevices(Metrics, [DeviceClause; 4]),
    /// A reference to a record defined with `valueRecordDef`
    Named(SmolStr),
    /// `<NULL>`
    Null,
}

/// A fully resolved value record.
///
/// Unset metrics are zero, so different source forms that describe the same
/// adjustment compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRecord {
    /// Horizontal adjustment to the glyph's position
    pub x_placement: i16,
    /// Vertical adjustment to the glyph's position
    pub y_placement: i16,
    /// Adjustment to the horizontal advance
    pub x_advance: i16,
    /// Adjustment to the vertical advance
    pub y_advance: i16,
    /// Per-size adjustments to `x_placement`
    pub x_placement_device: Option<DeviceTable>,
    /// Per-size adjustments to `y_placement`
    pub y_placement_device: Option<DeviceTable>,
    /// Per-size adjustments to `x_advance`
    pub x_advance_device: Option<DeviceTable>,
    /// Per-size adjustments to `y_advance`
    pub y_advance_device: Option<DeviceTable>,
}

impl SourceValueRecord {
    /// Resolve names and devices, producing a canonical record.
    ///
    /// `context` is only consulted for the bare `Single` form.
    pub fn normalize(
        &self,
        symbols: &SymbolTable,
        context: ContextTag,
    ) -> Result<ValueRecord, ResolveError> {
        match self {
            SourceValueRecord::Single(literal) => {
                let value = symbols.resolve_one(literal)?;
                Ok(context.resolve_single(value))
            }
            SourceValueRecord::Placement(metrics) => {
                let [x_placement, y_placement, x_advance, y_advance] = metrics.resolve(symbols)?;
                Ok(ValueRecord::new(
                    x_placement,
                    y_placement,
                    x_advance,
                    y_advance,
                ))
            }
            SourceValueRecord::PlacementWithDevices(metrics, devices) => {
                let [x_placement, y_placement, x_advance, y_advance] = metrics.resolve(symbols)?;
                let [x_place_dev, y_place_dev, x_adv_dev, y_adv_dev] = devices;
                Ok(ValueRecord {
                    x_placement_device: x_place_dev.resolve()?,
                    y_placement_device: y_place_dev.resolve()?,
                    x_advance_device: x_adv_dev.resolve()?,
                    y_advance_device: y_adv_dev.resolve()?,
                    ..ValueRecord::new(x_placement, y_placement, x_advance, y_advance)
                })
            }
            SourceValueRecord::Named(name) => symbols.value_record(name).cloned(),
            SourceValueRecord::Null => Ok(ValueRecord::default()),
        }
    }
}

impl Metrics {
    /// Four literal numbers
    pub fn numbers(values: [i16; 4]) -> Self {
        Metrics::Literals(values.map(Literal::Number))
    }

    fn resolve(&self, symbols: &SymbolTable) -> Result<[i16; 4], ResolveError> {
        match self {
            Metrics::Literals([a, b, c, d]) => Ok([
                symbols.resolve_one(a)?,
                symbols.resolve_one(b)?,
                symbols.resolve_one(c)?,
                symbols.resolve_one(d)?,
            ]),
            Metrics::Array(name) => {
                let values = symbols.resolve(&Literal::Array(name.clone()), 4)?;
                Ok([values[0], values[1], values[2], values[3]])
            }
        }
    }
}

impl ValueRecord {
    /// A record with the four metrics set and no devices.
    pub fn new(x_placement: i16, y_placement: i16, x_advance: i16, y_advance: i16) -> Self {
        ValueRecord {
            x_placement,
            y_placement,
            x_advance,
            y_advance,
            ..Default::default()
        }
    }

    /// A record that only adjusts the x advance.
    pub fn x_advance(x_advance: i16) -> Self {
        ValueRecord {
            x_advance,
            ..Default::default()
        }
    }

    /// A record that only adjusts the y advance.
    pub fn y_advance(y_advance: i16) -> Self {
        ValueRecord {
            y_advance,
            ..Default::default()
        }
    }

    /// `true` if this record only adjusts the x advance.
    ///
    /// Such a record could have been written as a bare value in a horizontal
    /// context.
    pub fn is_single_value(&self) -> bool {
        self.x_placement == 0
            && self.y_placement == 0
            && self.y_advance == 0
            && self.x_placement_device.is_none()
            && self.y_placement_device.is_none()
            && self.y_advance_device.is_none()
    }

    /// `true` if all metrics are zero and there are no devices
    pub fn is_zero(&self) -> bool {
        self == &ValueRecord::default()
    }

    fn has_devices(&self) -> bool {
        self.x_placement_device.is_some()
            || self.y_placement_device.is_some()
            || self.x_advance_device.is_some()
            || self.y_advance_device.is_some()
    }

    /// Convert to the `write-fonts` representation.
    ///
    /// Every field is set; use [`ValueRecordExt`] to drop the empty ones.
    ///
    /// [`ValueRecordExt`]: crate::compile::ValueRecordExt
    pub fn build(&self) -> RawValueRecord {
        fn device(table: &DeviceTable) -> DeviceOrVariationIndex {
            DeviceOrVariationIndex::Device(table.build())
        }

        let mut out = RawValueRecord::new()
            .with_x_placement(self.x_placement)
            .with_y_placement(self.y_placement)
            .with_x_advance(self.x_advance)
            .with_y_advance(self.y_advance);
        if let Some(table) = &self.x_placement_device {
            out = out.with_x_placement_device(device(table));
        }
        if let Some(table) = &self.y_placement_device {
            out = out.with_y_placement_device(device(table));
        }
        if let Some(table) = &self.x_advance_device {
            out = out.with_x_advance_device(device(table));
        }
        if let Some(table) = &self.y_advance_device {
            out = out.with_y_advance_device(device(table));
        }
        out
    }
}

impl Display for ValueRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_single_value() && self.x_advance_device.is_none() {
            return write!(f, "{}", self.x_advance);
        }
        write!(
            f,
            "<{} {} {} {}",
            self.x_placement, self.y_placement, self.x_advance, self.y_advance
        )?;
        if self.has_devices() {
            for device in [
                &self.x_placement_device,
                &self.y_placement_device,
                &self.x_advance_device,
                &self.y_advance_device,
            ] {
                match device {
                    Some(table) => write!(f, " {table}")?,
                    None => f.write_str(" <device NULL>")?,
                }
            }
        }
        f.write_str(">")
    }
}
