//! Placement resolution — from a target slot to one atomic module update.
//!
//! Shared by the drag and keyboard controllers and by new-module placement.
//! Resolution is a pure function of the current space, placed modules and
//! catalog; it either yields a complete [`ModuleUpdate`] or a
//! [`PlacementRejection`] and never partially applies.
//!
//! Steps:
//! 1. A dual module aimed at a column slot is rejected
//! 2. Crossing zones, a dual module stays dual only if two consecutive free
//!    slots exist from the target; otherwise it converts to its single
//!    variant, and is rejected if the single placement collides too
//! 3. The resolved slot set must be free (upper/lower cabinets may stack)
//! 4. X comes from the zone's single or dual slot centres
//! 5. Column bounds, depth and hinge come from the slot's intrusion; a
//!    second module in a split-eligible slot takes the remainder the first
//!    one left free, or is rejected
//! 6. Y anchors upper cabinets under the zone ceiling and everything else
//!    on the floor start; dropped-zone heights are clamped to the space
//!    height minus the drop
//! 7. Adjusted fields that no longer apply are cleared

use serde::{Deserialize, Serialize};

use crate::availability::{
    blocking_occupants, is_slot_available, occupied_span, resolved_slots, Candidate,
};
use crate::bounds::{free_split_side, furniture_bounds, optimal_hinge, side_bounds, SplitSide};
use crate::column_slots::ColumnIntrusion;
use crate::indexing::{LayoutError, SlotBounds};
use crate::layout::SpaceLayout;
use crate::modules::{ModuleCatalog, ModuleCategory, ModuleSpec, PlacedModule, Position};
use crate::space::{Side, SpaceConfig};
use crate::zones::ZoneKind;

/// A zone-local slot chosen by a picker or the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub zone: ZoneKind,
    pub slot_index: usize,
}

impl Target {
    pub fn new(zone: ZoneKind, slot_index: usize) -> Self {
        Self { zone, slot_index }
    }
}

/// Why a move or placement was refused. State is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementRejection {
    #[error("module {0} is not placed")]
    UnknownModule(String),
    #[error("no catalog entry for {0}")]
    MissingSpec(String),
    #[error("slot {slot} is outside the {zone:?} zone")]
    OutOfRange { zone: ZoneKind, slot: usize },
    #[error("dual module cannot occupy column slot {slot}")]
    DualIntoColumnSlot { slot: usize },
    #[error("dual module at slot {slot} has no partner slot")]
    NoDualPartner { slot: usize },
    #[error("slot {slot} in the {zone:?} zone is occupied")]
    Collision { zone: ZoneKind, slot: usize },
    #[error("dual module fits neither as dual nor as single at slot {slot}")]
    ConversionFailed { slot: usize },
    #[error("furniture at slot {slot} would be only {width}mm wide")]
    NonRenderable { slot: usize, width: f64 },
}

/// Atomic partial update for one placed module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUpdate {
    pub id: String,
    pub module_id: String,
    pub zone: Option<ZoneKind>,
    pub slot_index: Option<usize>,
    pub is_dual_slot: bool,
    pub position: Position,
    pub custom_width: Option<f64>,
    pub adjusted_width: Option<f64>,
    pub adjusted_position: Option<Position>,
    pub custom_depth: Option<f64>,
    pub hinge_position: Side,
}

impl ModuleUpdate {
    /// Update that puts `module` back exactly as it is.
    pub fn restore(module: &PlacedModule) -> Self {
        Self {
            id: module.id.clone(),
            module_id: module.module_id.clone(),
            zone: module.zone,
            slot_index: module.slot_index,
            is_dual_slot: module.is_dual_slot,
            position: module.position,
            custom_width: module.custom_width,
            adjusted_width: module.adjusted_width,
            adjusted_position: module.adjusted_position,
            custom_depth: module.custom_depth,
            hinge_position: module.hinge_position,
        }
    }

    pub fn target(&self) -> Option<Target> {
        Some(Target::new(self.zone?, self.slot_index?))
    }
}

impl PlacedModule {
    /// Apply `update`; `None` adjusted fields clear the cached values.
    pub fn apply(&mut self, update: &ModuleUpdate) {
        self.module_id = update.module_id.clone();
        self.zone = update.zone;
        self.slot_index = update.slot_index;
        self.is_dual_slot = update.is_dual_slot;
        self.position = update.position;
        self.custom_width = update.custom_width;
        self.adjusted_width = update.adjusted_width;
        self.adjusted_position = update.adjusted_position;
        self.custom_depth = update.custom_depth;
        self.hinge_position = update.hinge_position;
    }
}

/// Read snapshot for one gesture tick.
pub struct EditContext<'a> {
    pub space: &'a SpaceConfig,
    pub layout: SpaceLayout,
    pub placed: &'a [PlacedModule],
    pub catalog: &'a dyn ModuleCatalog,
}

impl<'a> EditContext<'a> {
    pub fn new(
        space: &'a SpaceConfig,
        placed: &'a [PlacedModule],
        catalog: &'a dyn ModuleCatalog,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            space,
            layout: SpaceLayout::derive(space)?,
            placed,
            catalog,
        })
    }

    pub fn module(&self, id: &str) -> Option<&'a PlacedModule> {
        self.placed.iter().find(|m| m.id == id)
    }
}

/// Resolve moving (or placing) `module` to `target`.
pub fn resolve_placement(
    ctx: &EditContext,
    module: &PlacedModule,
    target: Target,
) -> Result<ModuleUpdate, PlacementRejection> {
    let layout = &ctx.layout;
    let mut spec = ctx
        .catalog
        .get(&module.module_id)
        .ok_or_else(|| PlacementRejection::MissingSpec(module.module_id.clone()))?;
    let mut is_dual = module.is_dual_slot || spec.is_dual_type();

    let Target { zone, slot_index } = target;
    let count = layout.slot_count(zone);
    if slot_index >= count {
        return Err(PlacementRejection::OutOfRange {
            zone,
            slot: slot_index,
        });
    }

    if is_dual && layout.has_column(zone, slot_index) {
        return Err(PlacementRejection::DualIntoColumnSlot { slot: slot_index });
    }

    let candidate = Candidate {
        zone,
        slot_index,
        is_dual,
        category: spec.category,
        exclude_id: Some(module.id.as_str()),
    };

    if is_dual {
        let partner = slot_index + 1;
        let pair_free = partner < count
            && !layout.has_column(zone, partner)
            && is_slot_available(layout, ctx.placed, ctx.catalog, &candidate);
        if !pair_free {
            if module.effective_zone() != zone {
                let single = ctx.catalog.single_variant(&spec);
                let single_candidate = Candidate {
                    is_dual: false,
                    category: single.category,
                    ..candidate
                };
                if !is_slot_available(layout, ctx.placed, ctx.catalog, &single_candidate) {
                    return Err(PlacementRejection::ConversionFailed { slot: slot_index });
                }
                log::info!(
                    "module {}: {} -> {} entering {zone:?} zone",
                    module.id,
                    spec.id,
                    single.id
                );
                spec = single;
                is_dual = false;
            } else if partner >= count {
                return Err(PlacementRejection::NoDualPartner { slot: slot_index });
            } else if layout.has_column(zone, partner) {
                return Err(PlacementRejection::DualIntoColumnSlot { slot: partner });
            } else {
                return Err(PlacementRejection::Collision {
                    zone,
                    slot: slot_index,
                });
            }
        }
    } else if !is_slot_available(layout, ctx.placed, ctx.catalog, &candidate) {
        return Err(PlacementRejection::Collision {
            zone,
            slot: slot_index,
        });
    }

    slot_geometry(ctx, module, &spec, target, is_dual)
}

/// Position, column adjustments and hinge for `module` at an admitted target.
fn slot_geometry(
    ctx: &EditContext,
    module: &PlacedModule,
    spec: &ModuleSpec,
    target: Target,
    is_dual: bool,
) -> Result<ModuleUpdate, PlacementRejection> {
    let layout = &ctx.layout;
    let Target { zone, slot_index } = target;
    let out_of_range = PlacementRejection::OutOfRange {
        zone,
        slot: slot_index,
    };
    let slots = &layout.zones.zone(zone).ok_or(out_of_range.clone())?.slots;
    let slot = slots.slot_bounds(slot_index).ok_or(out_of_range)?;

    let x = if is_dual {
        slots
            .dual_position(slot_index)
            .ok_or(PlacementRejection::NoDualPartner { slot: slot_index })?
    } else {
        slot.center
    };
    let custom_width = slots.occupied_width(slot_index, is_dual);

    let intrusion = if is_dual {
        None
    } else {
        layout.intrusion(zone, slot_index)
    };
    let split = match intrusion {
        Some(i) if i.allow_multiple_furniture => {
            shared_slot_side(ctx, module, spec, target, slot, i)?
        }
        _ => None,
    };
    let bounds = match (intrusion, split) {
        (Some(i), Some(side)) => side_bounds(slot, i, side),
        _ => furniture_bounds(slot, intrusion, None),
    };
    if intrusion.is_some() && !bounds.is_renderable() {
        return Err(PlacementRejection::NonRenderable {
            slot: slot_index,
            width: bounds.render_width,
        });
    }

    let zone_height = layout.zone_height(zone);
    let height = layout
        .height_limit(zone)
        .map_or(spec.height, |limit| spec.height.min(limit));
    let y = match spec.category {
        ModuleCategory::Upper => layout.floor_start + zone_height - height / 2.0,
        ModuleCategory::Lower | ModuleCategory::General => layout.floor_start + height / 2.0,
    };

    let depth = bounds.adjusted_depth.unwrap_or(spec.depth);
    // Depth-adjusted bodies sit in front of the column, others against the back wall.
    let z = match intrusion {
        Some(i) if bounds.depth_adjustment_needed => i.column.front_z() + depth / 2.0,
        _ => depth / 2.0,
    };
    let position = Position::new(x, y, z);

    let update = ModuleUpdate {
        id: module.id.clone(),
        module_id: spec.id.clone(),
        zone: Some(zone),
        slot_index: Some(slot_index),
        is_dual_slot: is_dual,
        position,
        custom_width,
        adjusted_width: intrusion.map(|_| bounds.render_width),
        adjusted_position: intrusion.map(|_| Position::new(bounds.center, y, z)),
        custom_depth: bounds.adjusted_depth,
        hinge_position: match split {
            Some(side) => side.into(),
            None => optimal_hinge(intrusion, None, module.hinge_position),
        },
    };
    log::debug!(
        "module {} -> {zone:?} slot {slot_index} (dual={is_dual}) at x={x}, width {:?}",
        module.id,
        update.adjusted_width.or(custom_width)
    );
    Ok(update)
}

/// Remainder for `module` when a split-eligible slot already holds another body.
///
/// `None` when the slot is otherwise empty (default bounds apply).
fn shared_slot_side(
    ctx: &EditContext,
    module: &PlacedModule,
    spec: &ModuleSpec,
    target: Target,
    slot: SlotBounds,
    intrusion: &ColumnIntrusion,
) -> Result<Option<SplitSide>, PlacementRejection> {
    let taken: Vec<_> = blocking_occupants(
        &ctx.layout,
        ctx.placed,
        ctx.catalog,
        target.zone,
        target.slot_index,
        Some(module.id.as_str()),
        spec.category,
    )
    .into_iter()
    .map(|m| occupied_span(m, slot))
    .collect();
    if taken.is_empty() {
        return Ok(None);
    }
    match free_split_side(slot, intrusion, &taken) {
        Some(side) => {
            log::debug!(
                "module {} shares slot {}: {side:?} remainder",
                module.id,
                target.slot_index
            );
            Ok(Some(side))
        }
        None => Err(PlacementRejection::Collision {
            zone: target.zone,
            slot: target.slot_index,
        }),
    }
}

/// Create a new module of catalog type `module_id` at `target`.
pub fn place_new_module(
    ctx: &EditContext,
    id: impl Into<String>,
    module_id: &str,
    target: Target,
) -> Result<PlacedModule, PlacementRejection> {
    let spec = ctx
        .catalog
        .get(module_id)
        .ok_or_else(|| PlacementRejection::MissingSpec(module_id.to_string()))?;
    let mut module = PlacedModule::new(id, module_id);
    module.zone = Some(target.zone);
    module.is_dual_slot = spec.is_dual_type();
    module.has_door = true;

    let update = resolve_placement(ctx, &module, target)?;
    module.apply(&update);
    log::info!(
        "placed {} ({}) in {:?} slot {}",
        module.id,
        module.module_id,
        target.zone,
        target.slot_index
    );
    Ok(module)
}

/// What a column change means for one placed module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ReconcileAction {
    /// Refreshed position and column fields.
    Update(ModuleUpdate),
    /// Dual module now touches a column slot.
    RemoveDual { id: String },
    /// Module no longer fits beside the column and must not render.
    Hide { id: String, width: f64 },
}

/// Re-evaluate every placed module against the current columns.
pub fn reconcile_columns(ctx: &EditContext) -> Vec<ReconcileAction> {
    let layout = &ctx.layout;
    let mut actions = Vec::new();

    for module in ctx.placed {
        let zone = module.effective_zone();
        let slots = resolved_slots(layout, module);
        let Some(&first) = slots.first() else {
            continue;
        };

        if module.is_dual_slot {
            if slots.iter().any(|s| layout.has_column(zone, *s)) {
                log::warn!("dual module {} now overlaps a column slot", module.id);
                actions.push(ReconcileAction::RemoveDual {
                    id: module.id.clone(),
                });
            } else if module.has_column_adjustment() {
                let mut update = ModuleUpdate::restore(module);
                update.adjusted_width = None;
                update.adjusted_position = None;
                update.custom_depth = None;
                actions.push(ReconcileAction::Update(update));
            }
            continue;
        }

        let Some(spec) = ctx.catalog.get(&module.module_id) else {
            log::warn!("module {} references unknown type {}", module.id, module.module_id);
            continue;
        };

        match slot_geometry(ctx, module, &spec, Target::new(zone, first), false) {
            Ok(update) => {
                if update != ModuleUpdate::restore(module) {
                    actions.push(ReconcileAction::Update(update));
                }
            }
            Err(PlacementRejection::NonRenderable { width, .. }) => {
                log::warn!("module {} hidden: only {width}mm beside column", module.id);
                actions.push(ReconcileAction::Hide {
                    id: module.id.clone(),
                    width,
                });
            }
            Err(e) => log::warn!("module {} not reconciled: {e}", module.id),
        }
    }

    actions
}
