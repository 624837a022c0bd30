//! Slot availability and smart-skip search.
//!
//! A candidate slot (or slot pair for dual furniture) is free when no other
//! module in the same zone occupies any of its slots, except:
//!
//! - an upper cabinet and a lower cabinet may share a slot (they stack)
//! - a split-eligible column slot holds up to two single modules, one on
//!   each side of the column, while a free remainder is left
//!
//! Columns never block single furniture (bounds adjust instead), but dual
//! furniture is never allowed on a column slot.
//!
//! Modules whose catalog entry is missing are skipped.

use serde::{Deserialize, Serialize};

use crate::bounds::free_split_side;
use crate::indexing::SlotBounds;
use crate::layout::SpaceLayout;
use crate::modules::{ModuleCatalog, ModuleCategory, PlacedModule};
use crate::zones::ZoneKind;

/// Scan direction for the smart skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// A module asking for a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub zone: ZoneKind,
    /// Zone-local slot (left slot of a dual pair).
    pub slot_index: usize,
    pub is_dual: bool,
    pub category: ModuleCategory,
    /// Module being moved; ignored as an occupant.
    pub exclude_id: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    pub fn at(self, slot_index: usize) -> Self {
        Self { slot_index, ..self }
    }

    fn slots(&self) -> Vec<usize> {
        if self.is_dual {
            vec![self.slot_index, self.slot_index + 1]
        } else {
            vec![self.slot_index]
        }
    }
}

/// Zone-local slots a placed module covers, resolving a missing index from its X.
pub(crate) fn resolved_slots(layout: &SpaceLayout, module: &PlacedModule) -> Vec<usize> {
    if module.slot_index.is_some() {
        return module.occupied_slots();
    }
    let Some(zone) = layout.zones.zone(module.effective_zone()) else {
        return Vec::new();
    };
    match zone
        .slots
        .slot_from_position(module.position.x, module.is_dual_slot)
    {
        Some(i) if module.is_dual_slot => vec![i, i + 1],
        Some(i) => vec![i],
        None => Vec::new(),
    }
}

/// X span a placed single module covers inside `slot`.
///
/// Without stored column fields the module is taken to fill the slot.
pub(crate) fn occupied_span(module: &PlacedModule, slot: SlotBounds) -> (f64, f64) {
    match (module.adjusted_position, module.adjusted_width) {
        (Some(p), Some(w)) => (p.x - w / 2.0, p.x + w / 2.0),
        _ => (slot.left, slot.right),
    }
}

/// Other modules in `slot` that do not stack with `category`.
pub(crate) fn blocking_occupants<'m>(
    layout: &SpaceLayout,
    placed: &'m [PlacedModule],
    catalog: &dyn ModuleCatalog,
    zone: ZoneKind,
    slot: usize,
    exclude_id: Option<&str>,
    category: ModuleCategory,
) -> Vec<&'m PlacedModule> {
    occupants(layout, placed, catalog, zone, slot, exclude_id)
        .into_iter()
        .filter(|(_, other)| !other.stacks_with(category))
        .map(|(m, _)| m)
        .collect()
}

/// Other modules in `slot` with their categories.
fn occupants<'m>(
    layout: &SpaceLayout,
    placed: &'m [PlacedModule],
    catalog: &dyn ModuleCatalog,
    zone: ZoneKind,
    slot: usize,
    exclude_id: Option<&str>,
) -> Vec<(&'m PlacedModule, ModuleCategory)> {
    placed
        .iter()
        .filter(|m| Some(m.id.as_str()) != exclude_id)
        .filter(|m| m.effective_zone() == zone)
        .filter(|m| resolved_slots(layout, m).contains(&slot))
        .filter_map(|m| match catalog.get(&m.module_id) {
            Some(spec) => Some((m, spec.category)),
            None => {
                log::warn!("module {} references unknown type {}", m.id, m.module_id);
                None
            }
        })
        .collect()
}

/// Whether `candidate` may occupy its slot(s).
pub fn is_slot_available(
    layout: &SpaceLayout,
    placed: &[PlacedModule],
    catalog: &dyn ModuleCatalog,
    candidate: &Candidate,
) -> bool {
    let zone = candidate.zone;
    let count = layout.slot_count(zone);
    let slots = candidate.slots();

    if slots.iter().any(|s| *s >= count) {
        return false;
    }
    if candidate.is_dual && slots.iter().any(|s| layout.has_column(zone, *s)) {
        return false;
    }

    for &slot in &slots {
        let blocking = blocking_occupants(
            layout,
            placed,
            catalog,
            zone,
            slot,
            candidate.exclude_id,
            candidate.category,
        );
        if blocking.is_empty() {
            continue;
        }
        let shared = !candidate.is_dual
            && blocking.len() < 2
            && blocking.iter().all(|m| !m.is_dual_slot)
            && layout.column_info(zone, slot).is_some_and(|info| {
                let taken: Vec<_> = blocking
                    .iter()
                    .map(|m| occupied_span(m, info.bounds))
                    .collect();
                info.allows_multiple()
                    && info
                        .intrusion
                        .as_ref()
                        .is_some_and(|i| free_split_side(info.bounds, i, &taken).is_some())
            });
        if !shared {
            return false;
        }
    }
    true
}

/// Nearest free slot from `candidate.slot_index` in `direction`, within the zone.
///
/// `None` when the zone edge is reached first; the caller keeps the module
/// where it is.
pub fn find_next_available_slot(
    layout: &SpaceLayout,
    placed: &[PlacedModule],
    catalog: &dyn ModuleCatalog,
    candidate: &Candidate,
    direction: Direction,
) -> Option<usize> {
    let count = layout.slot_count(candidate.zone);
    let last = count.checked_sub(if candidate.is_dual { 2 } else { 1 })?;
    let mut index = candidate.slot_index;
    loop {
        index = match direction {
            Direction::Left => index.checked_sub(1)?,
            Direction::Right => index + 1,
        };
        if index > last {
            return None;
        }
        if is_slot_available(layout, placed, catalog, &candidate.at(index)) {
            return Some(index);
        }
    }
}

/// Occupants of one global slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOccupancy {
    pub global_index: usize,
    pub zone: ZoneKind,
    pub local_index: usize,
    pub occupants: Vec<String>,
}

/// Debug map of which module sits where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyReport {
    pub slots: Vec<SlotOccupancy>,
    /// Global slots holding an illegal combination of modules.
    pub conflicts: Vec<usize>,
}

pub fn slot_occupancy(
    layout: &SpaceLayout,
    placed: &[PlacedModule],
    catalog: &dyn ModuleCatalog,
) -> OccupancyReport {
    let mut slots: Vec<SlotOccupancy> = layout
        .zones
        .global_slots()
        .into_iter()
        .map(|s| SlotOccupancy {
            global_index: s.global_index,
            zone: s.zone,
            local_index: s.local_index,
            occupants: Vec::new(),
        })
        .collect();
    // (upper, lower, general, dual) per slot
    let mut tallies = vec![(0usize, 0usize, 0usize, false); slots.len()];

    for module in placed {
        let Some(spec) = catalog.get(&module.module_id) else {
            log::warn!("module {} references unknown type {}", module.id, module.module_id);
            continue;
        };
        let zone = module.effective_zone();
        for local in resolved_slots(layout, module) {
            let Some(global) = layout.zones.to_global(zone, local) else {
                log::warn!("module {} sits outside {zone:?} zone (slot {local})", module.id);
                continue;
            };
            slots[global].occupants.push(module.id.clone());
            let tally = &mut tallies[global];
            match spec.category {
                ModuleCategory::Upper => tally.0 += 1,
                ModuleCategory::Lower => tally.1 += 1,
                ModuleCategory::General => tally.2 += 1,
            }
            tally.3 |= module.is_dual_slot;
        }
    }

    let mut conflicts = Vec::new();
    for (global, &(upper, lower, general, dual)) in tallies.iter().enumerate() {
        let info = layout.column_slots.get(global);
        let capacity = if info.is_some_and(|i| i.allows_multiple()) {
            2
        } else {
            1
        };
        let has_column = info.is_some_and(|i| i.has_column());
        let over = if general > 0 {
            general + upper + lower > capacity
        } else {
            upper > capacity || lower > capacity
        };
        if over || (dual && has_column) {
            log::warn!(
                "slot {global} conflict: {:?}",
                slots[global].occupants
            );
            conflicts.push(global);
        }
    }

    OccupancyReport { slots, conflicts }
}
