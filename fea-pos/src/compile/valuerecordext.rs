//! Preparing binary value records for a specific lookup type

use write_fonts::tables::gpos::{ValueFormat, ValueRecord};

use super::ContextTag;

/// Extra helper methods on the `write-fonts` ValueRecord
pub trait ValueRecordExt {
    /// Unset any zero field that has no device
    fn clear_zeros(self) -> Self;
    /// Modify this record for use in a pair adjustment in the given context
    fn for_pair_pos(self, context: ContextTag) -> Self;
    /// `true` if we are not null, but our set values are all 0
    fn is_all_zeros(&self) -> bool;
}

impl ValueRecordExt for ValueRecord {
    fn clear_zeros(mut self) -> Self {
        if self.x_placement == Some(0) && self.x_placement_device.is_none() {
            self.x_placement = None;
        }

        if self.y_placement == Some(0) && self.y_placement_device.is_none() {
            self.y_placement = None;
        }

        if self.x_advance == Some(0) && self.x_advance_device.is_none() {
            self.x_advance = None;
        }

        if self.y_advance == Some(0) && self.y_advance_device.is_none() {
            self.y_advance = None;
        }

        self
    }

    fn is_all_zeros(&self) -> bool {
        let device_mask = ValueFormat::X_PLACEMENT_DEVICE
            | ValueFormat::Y_PLACEMENT_DEVICE
            | ValueFormat::X_ADVANCE_DEVICE
            | ValueFormat::Y_ADVANCE_DEVICE;

        let format = self.format();
        if format.is_empty() || format.intersects(device_mask) {
            return false;
        }
        let all_values = [
            self.x_placement,
            self.y_placement,
            self.x_advance,
            self.y_advance,
        ];
        all_values.iter().all(|v| v.unwrap_or_default() == 0)
    }

    // In pair pos tables, an explicit record that is all zeros still has to
    // occupy a field, so it becomes a zero advance on the context's axis.
    fn for_pair_pos(self, context: ContextTag) -> Self {
        if !self.is_all_zeros() {
            return self.clear_zeros();
        }
        let mut out = self.clear_zeros();
        if context.is_vertical() {
            out.y_advance = Some(0);
        } else {
            out.x_advance = Some(0);
        }
        out
    }
}
