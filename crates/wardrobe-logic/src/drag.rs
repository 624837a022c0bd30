//! Drag controller — `idle -> dragging -> (committed | cancelled)`.
//!
//! Each pointer-move resolves the pointer to a target slot through a
//! [`SlotPicker`], then runs [`resolve_placement`]. A legal target yields one
//! [`ModuleUpdate`]; anything else leaves the module at its last valid
//! position. Pointer-up commits without further geometry changes; cancel
//! emits an update restoring the snapshot taken when the drag began.

use crate::layout::SpaceLayout;
use crate::modules::PlacedModule;
use crate::placement::{
    resolve_placement, EditContext, ModuleUpdate, PlacementRejection, Target,
};

/// Maps a pointer to a target slot (the renderer's raycast, in practice).
pub trait SlotPicker {
    type Pointer;

    fn pick(&self, layout: &SpaceLayout, pointer: &Self::Pointer) -> Option<Target>;
}

/// Picks the slot under a room X coordinate (mm).
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldXPicker;

impl SlotPicker for WorldXPicker {
    type Pointer = f64;

    fn pick(&self, layout: &SpaceLayout, x: &f64) -> Option<Target> {
        let (zone, slot) = layout.zones.locate(*x)?;
        Some(Target::new(zone, slot))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DragSession {
    snapshot: PlacedModule,
    last_target: Option<Target>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Apply this update to the store.
    Updated(ModuleUpdate),
    /// Pointer still over the same slot, or over nothing.
    Unchanged,
    /// Target refused; module stays at its last valid position.
    Rejected(PlacementRejection),
    /// Drag finished at the last valid position.
    Committed { id: String },
    /// Drag abandoned; apply this update to restore the start state.
    Cancelled(ModuleUpdate),
    /// No drag in progress.
    Idle,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.snapshot.id.as_str())
    }

    /// Start dragging `module`. Returns `false` if a drag is already running.
    pub fn begin(&mut self, module: &PlacedModule) -> bool {
        if self.session.is_some() {
            return false;
        }
        log::debug!("drag start: {}", module.id);
        self.session = Some(DragSession {
            snapshot: module.clone(),
            last_target: module.zone.zip(module.slot_index).map(|(z, s)| Target::new(z, s)),
        });
        true
    }

    /// Resolve one pointer-move tick against the current store snapshot.
    pub fn pointer_move<P: SlotPicker>(
        &mut self,
        ctx: &EditContext,
        picker: &P,
        pointer: &P::Pointer,
    ) -> DragOutcome {
        let Some(session) = self.session.as_mut() else {
            return DragOutcome::Idle;
        };
        let Some(target) = picker.pick(&ctx.layout, pointer) else {
            return DragOutcome::Unchanged;
        };
        if session.last_target == Some(target) {
            return DragOutcome::Unchanged;
        }

        let Some(module) = ctx.module(&session.snapshot.id) else {
            return DragOutcome::Rejected(PlacementRejection::UnknownModule(
                session.snapshot.id.clone(),
            ));
        };

        match resolve_placement(ctx, module, target) {
            Ok(update) => {
                session.last_target = Some(target);
                DragOutcome::Updated(update)
            }
            Err(rejection) => {
                log::warn!("drag {} to {target:?} rejected: {rejection}", module.id);
                DragOutcome::Rejected(rejection)
            }
        }
    }

    /// Finish the drag where it is.
    pub fn pointer_up(&mut self) -> DragOutcome {
        match self.session.take() {
            Some(session) => {
                log::info!(
                    "drag committed: {} at {:?}",
                    session.snapshot.id,
                    session.last_target
                );
                DragOutcome::Committed {
                    id: session.snapshot.id,
                }
            }
            None => DragOutcome::Idle,
        }
    }

    /// Abandon the drag and restore the start state.
    pub fn cancel(&mut self) -> DragOutcome {
        match self.session.take() {
            Some(session) => {
                log::info!("drag cancelled: {}", session.snapshot.id);
                DragOutcome::Cancelled(ModuleUpdate::restore(&session.snapshot))
            }
            None => DragOutcome::Idle,
        }
    }
}
