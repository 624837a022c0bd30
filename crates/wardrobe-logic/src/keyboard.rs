//! Keyboard navigation for the module being edited.
//!
//! Arrow keys smart-skip to the nearest free slot in the module's zone,
//! continuing past slots whose resolution is rejected (e.g. a column slot
//! too narrow to render in). Delete/Backspace remove the module;
//! Escape/Enter leave edit mode. Neither terminal key changes geometry.

use serde::{Deserialize, Serialize};

use crate::availability::{find_next_available_slot, resolved_slots, Candidate, Direction};
use crate::placement::{resolve_placement, EditContext, ModuleUpdate, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Delete,
    Backspace,
    Escape,
    Enter,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" => Key::Escape,
            "Enter" => Key::Enter,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Moved(ModuleUpdate),
    /// No legal slot in that direction; module stays put.
    Stayed,
    Removed { id: String },
    ExitedEditMode,
    /// Not editing, or a key with no binding.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardNavController {
    editing: Option<String>,
}

impl KeyboardNavController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_edit_mode(&mut self, id: impl Into<String>) {
        let id = id.into();
        log::debug!("edit mode: {id}");
        self.editing = Some(id);
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn handle_key(&mut self, ctx: &EditContext, key: Key) -> KeyOutcome {
        let Some(id) = self.editing.clone() else {
            return KeyOutcome::Ignored;
        };
        match key {
            Key::ArrowLeft => self.step(ctx, &id, Direction::Left),
            Key::ArrowRight => self.step(ctx, &id, Direction::Right),
            Key::Delete | Key::Backspace => {
                self.editing = None;
                log::info!("removed {id}");
                KeyOutcome::Removed { id }
            }
            Key::Escape | Key::Enter => {
                self.editing = None;
                KeyOutcome::ExitedEditMode
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }

    fn step(&self, ctx: &EditContext, id: &str, direction: Direction) -> KeyOutcome {
        let Some(module) = ctx.module(id) else {
            log::warn!("edited module {id} is not placed");
            return KeyOutcome::Ignored;
        };
        let Some(spec) = ctx.catalog.get(&module.module_id) else {
            log::warn!("module {id} references unknown type {}", module.module_id);
            return KeyOutcome::Ignored;
        };
        let zone = module.effective_zone();
        let Some(&current) = resolved_slots(&ctx.layout, module).first() else {
            return KeyOutcome::Stayed;
        };

        let mut candidate = Candidate {
            zone,
            slot_index: current,
            is_dual: module.is_dual_slot || spec.is_dual_type(),
            category: spec.category,
            exclude_id: Some(id),
        };
        while let Some(next) =
            find_next_available_slot(&ctx.layout, ctx.placed, ctx.catalog, &candidate, direction)
        {
            match resolve_placement(ctx, module, Target::new(zone, next)) {
                Ok(update) => {
                    log::info!("{id} moved {direction:?} to {zone:?} slot {next}");
                    return KeyOutcome::Moved(update);
                }
                Err(rejection) => {
                    log::debug!("{id}: skipping slot {next}: {rejection}");
                    candidate = candidate.at(next);
                }
            }
        }
        KeyOutcome::Stayed
    }
}
