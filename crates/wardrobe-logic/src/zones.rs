//! Zone partitioning — normal and dropped-ceiling sections.
//!
//! With a dropped ceiling enabled the room is split into two zones, each
//! indexed independently. Without one, a single normal zone covers the whole
//! cavity.
//!
//! Algorithm:
//! 1. Outer spans: the dropped zone takes `[0, dw]` (left) or `[W - dw, W]`
//!    (right); the normal zone takes the complement, so outer widths sum to W
//! 2. Each zone's cavity is its outer span minus the frame/gap on the side
//!    that touches a room edge; the shared boundary has no reduction
//! 3. Each cavity gets its own slot count (explicit, or one slot per 600mm)
//!    and optional custom widths, then runs through [`index_span`]
//! 4. Global slot indices run left to right across zones
//!
//! Zone boundaries depend only on the dropped-ceiling config; columns never
//! move them.

use serde::{Deserialize, Serialize};

use crate::indexing::{default_column_count, index_span, IndexingResult, LayoutError, SlotBounds};
use crate::space::{Side, SpaceConfig};

/// Which ceiling section a slot or module belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    #[default]
    Normal,
    Dropped,
}

/// One zone: its outer span and its slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub outer_start: f64,
    pub outer_width: f64,
    pub slots: IndexingResult,
    /// Global index of this zone's first slot.
    pub global_offset: usize,
}

impl Zone {
    pub fn outer_end(&self) -> f64 {
        self.outer_start + self.outer_width
    }

    pub fn slot_count(&self) -> usize {
        self.slots.column_count
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.outer_start && x <= self.outer_end()
    }
}

/// A slot seen from the whole room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSlot {
    pub global_index: usize,
    pub zone: ZoneKind,
    pub local_index: usize,
    pub bounds: SlotBounds,
}

/// Zones ordered left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub zones: Vec<Zone>,
}

impl ZoneLayout {
    /// Partition `space` into zones and index each.
    pub fn compute(space: &SpaceConfig) -> Result<Self, LayoutError> {
        let Some(dc) = space.active_dropped_ceiling() else {
            let width = space.internal_width();
            let count = explicit_count(space.custom_column_count)
                .unwrap_or_else(|| default_column_count(width));
            let slots = index_span(
                space.internal_start_x(),
                width,
                count,
                space.custom_slot_widths.as_deref(),
            )?;
            return Ok(Self {
                zones: vec![Zone {
                    kind: ZoneKind::Normal,
                    outer_start: 0.0,
                    outer_width: space.width,
                    slots,
                    global_offset: 0,
                }],
            });
        };

        let total = space.width;
        let dropped_width = dc.width;
        let normal_width = total - dropped_width;

        // (kind, outer start, outer width, room side touched)
        let spans = match dc.position {
            Side::Left => [
                (ZoneKind::Dropped, 0.0, dropped_width, Side::Left),
                (ZoneKind::Normal, dropped_width, normal_width, Side::Right),
            ],
            Side::Right => [
                (ZoneKind::Normal, 0.0, normal_width, Side::Left),
                (ZoneKind::Dropped, normal_width, dropped_width, Side::Right),
            ],
        };

        let mut zones = Vec::with_capacity(2);
        let mut offset = 0;
        for (kind, outer_start, outer_width, room_side) in spans {
            let reduction = space.side_reduction(room_side);
            let (start, width) = match room_side {
                Side::Left => (outer_start + reduction, outer_width - reduction),
                Side::Right => (outer_start, outer_width - reduction),
            };
            let (explicit, custom) = match kind {
                ZoneKind::Dropped => (dc.column_count, dc.slot_widths.as_deref()),
                ZoneKind::Normal => (
                    space.custom_column_count,
                    space.custom_slot_widths.as_deref(),
                ),
            };
            let count = explicit_count(explicit).unwrap_or_else(|| default_column_count(width));
            let slots = index_span(start, width, count, custom)?;
            log::debug!(
                "{kind:?} zone: outer [{outer_start}, {}], cavity {width}mm, {} slots",
                outer_start + outer_width,
                slots.column_count
            );
            let n = slots.column_count;
            zones.push(Zone {
                kind,
                outer_start,
                outer_width,
                slots,
                global_offset: offset,
            });
            offset += n;
        }

        Ok(Self { zones })
    }

    pub fn zone(&self, kind: ZoneKind) -> Option<&Zone> {
        self.zones.iter().find(|z| z.kind == kind)
    }

    pub fn has_dropped(&self) -> bool {
        self.zone(ZoneKind::Dropped).is_some()
    }

    /// Slots in the given zone (0 if the zone does not exist).
    pub fn zone_slot_count(&self, kind: ZoneKind) -> usize {
        self.zone(kind).map_or(0, Zone::slot_count)
    }

    pub fn total_slots(&self) -> usize {
        self.zones.iter().map(Zone::slot_count).sum()
    }

    pub fn to_global(&self, kind: ZoneKind, local: usize) -> Option<usize> {
        let zone = self.zone(kind)?;
        (local < zone.slot_count()).then(|| zone.global_offset + local)
    }

    pub fn to_local(&self, global: usize) -> Option<(ZoneKind, usize)> {
        self.zones.iter().find_map(|z| {
            (global >= z.global_offset && global < z.global_offset + z.slot_count())
                .then(|| (z.kind, global - z.global_offset))
        })
    }

    /// Bounds of a zone-local slot.
    pub fn slot_bounds(&self, kind: ZoneKind, local: usize) -> Option<SlotBounds> {
        self.zone(kind)?.slots.slot_bounds(local)
    }

    /// Every slot, left to right.
    pub fn global_slots(&self) -> Vec<GlobalSlot> {
        self.zones
            .iter()
            .flat_map(|z| {
                (0..z.slot_count()).filter_map(move |local| {
                    Some(GlobalSlot {
                        global_index: z.global_offset + local,
                        zone: z.kind,
                        local_index: local,
                        bounds: z.slots.slot_bounds(local)?,
                    })
                })
            })
            .collect()
    }

    /// Zone and local slot under a room X (nearest slot when X is on a frame).
    pub fn locate(&self, x: f64) -> Option<(ZoneKind, usize)> {
        let zone = self
            .zones
            .iter()
            .find(|z| z.contains_x(x))
            .or_else(|| {
                if x < 0.0 {
                    self.zones.first()
                } else {
                    self.zones.last()
                }
            })?;
        Some((zone.kind, zone.slots.slot_at(x)))
    }
}

fn explicit_count(count: Option<u32>) -> Option<usize> {
    count.filter(|c| *c > 0).map(|c| c as usize)
}
