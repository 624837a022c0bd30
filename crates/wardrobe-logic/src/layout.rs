//! Derived space layout — zones, per-slot column analysis and vertical anchors.
//!
//! Recomputed from the authoritative [`SpaceConfig`] on every read; nothing
//! here is cached across config changes.

use serde::{Deserialize, Serialize};

use crate::column_slots::{analyze_column_slots, ColumnIntrusion, ColumnSlotInfo};
use crate::indexing::{LayoutError, SlotBounds};
use crate::space::{validate_space, SpaceConfig};
use crate::zones::{ZoneKind, ZoneLayout};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceLayout {
    pub zones: ZoneLayout,
    /// Column analysis indexed by global slot.
    pub column_slots: Vec<ColumnSlotInfo>,
    pub internal_height: f64,
    pub base_frame_height: f64,
    pub floor_start: f64,
    /// Outer room height.
    pub space_height: f64,
    /// Ceiling drop applied to the dropped zone (0 without one).
    pub drop_height: f64,
}

impl SpaceLayout {
    /// Validate `space` and derive its layout.
    pub fn derive(space: &SpaceConfig) -> Result<Self, LayoutError> {
        let errors = validate_space(space);
        if !errors.is_empty() {
            return Err(LayoutError::InvalidSpace(errors));
        }
        let zones = ZoneLayout::compute(space)?;
        let column_slots = analyze_column_slots(&zones, &space.columns);
        Ok(Self {
            zones,
            column_slots,
            internal_height: space.internal_height(),
            base_frame_height: space.base_frame_height(),
            floor_start: space.floor_start(),
            space_height: space.height,
            drop_height: space.active_dropped_ceiling().map_or(0.0, |d| d.drop_height),
        })
    }

    pub fn slot_count(&self, zone: ZoneKind) -> usize {
        self.zones.zone_slot_count(zone)
    }

    pub fn slot_bounds(&self, zone: ZoneKind, local: usize) -> Option<SlotBounds> {
        self.zones.slot_bounds(zone, local)
    }

    pub fn column_info(&self, zone: ZoneKind, local: usize) -> Option<&ColumnSlotInfo> {
        let global = self.zones.to_global(zone, local)?;
        self.column_slots.get(global)
    }

    pub fn intrusion(&self, zone: ZoneKind, local: usize) -> Option<&ColumnIntrusion> {
        self.column_info(zone, local)?.intrusion.as_ref()
    }

    pub fn has_column(&self, zone: ZoneKind, local: usize) -> bool {
        self.intrusion(zone, local).is_some()
    }

    /// Interior height of a zone; upper cabinets hang from its top.
    pub fn zone_height(&self, zone: ZoneKind) -> f64 {
        match zone {
            ZoneKind::Normal => self.internal_height,
            ZoneKind::Dropped => self.internal_height - self.drop_height,
        }
    }

    /// Tallest module a zone accepts: room height under the dropped ceiling.
    ///
    /// The normal zone has no limit.
    pub fn height_limit(&self, zone: ZoneKind) -> Option<f64> {
        match zone {
            ZoneKind::Normal => None,
            ZoneKind::Dropped => Some(self.space_height - self.drop_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{Column, DroppedCeiling};

    #[test]
    fn invalid_space_is_rejected() {
        let mut space = SpaceConfig::default();
        space.width = -1.0;
        assert!(matches!(
            SpaceLayout::derive(&space),
            Err(LayoutError::InvalidSpace(_))
        ));
    }

    #[test]
    fn dropped_zone_is_lower() {
        let mut space = SpaceConfig::default();
        space.dropped_ceiling = Some(DroppedCeiling {
            enabled: true,
            ..DroppedCeiling::default()
        });
        let layout = SpaceLayout::derive(&space).unwrap();
        // 2400 - 50 (top) - 65 (base)
        assert_eq!(layout.zone_height(ZoneKind::Normal), 2285.0);
        assert_eq!(layout.zone_height(ZoneKind::Dropped), 2085.0);
        // 2400 - 200
        assert_eq!(layout.height_limit(ZoneKind::Dropped), Some(2200.0));
        assert_eq!(layout.height_limit(ZoneKind::Normal), None);
    }

    #[test]
    fn column_lookup_by_zone_slot() {
        let mut space = SpaceConfig::default();
        space.columns.push(Column::new("c", 1000.0, 300.0, 300.0, 2400.0));
        let layout = SpaceLayout::derive(&space).unwrap();
        assert!(layout.has_column(ZoneKind::Normal, 1));
        assert!(!layout.has_column(ZoneKind::Normal, 4));
        assert!(layout.column_info(ZoneKind::Dropped, 0).is_none());
    }
}
