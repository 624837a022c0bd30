//! Placed modules and the module catalog.
//!
//! [`PlacedModule`] is the store's persisted furniture record. Its
//! `adjusted_*` and `custom_depth` fields are derived caches that exist only
//! while the module sits in a column slot.
//!
//! The catalog is an external collaborator seen through [`ModuleCatalog`];
//! [`StaticCatalog`] backs it with a plain list.

use serde::{Deserialize, Serialize};

use crate::space::Side;
use crate::zones::ZoneKind;

pub const DUAL_PREFIX: &str = "dual-";
pub const SINGLE_PREFIX: &str = "single-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A furniture module placed in the space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedModule {
    /// Instance id.
    pub id: String,
    /// Catalog id.
    pub module_id: String,
    pub position: Position,
    /// Zone-local slot index.
    #[serde(default)]
    pub slot_index: Option<usize>,
    #[serde(default)]
    pub zone: Option<ZoneKind>,
    #[serde(default)]
    pub is_dual_slot: bool,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub has_door: bool,
    #[serde(default = "default_hinge")]
    pub hinge_position: Side,
    /// Width of the slot (or pair) the module occupies.
    #[serde(default)]
    pub custom_width: Option<f64>,
    /// Render width after column intrusion.
    #[serde(default)]
    pub adjusted_width: Option<f64>,
    /// Render centre after column intrusion.
    #[serde(default)]
    pub adjusted_position: Option<Position>,
    /// Reduced depth in front of a medium column.
    #[serde(default)]
    pub custom_depth: Option<f64>,
}

fn default_hinge() -> Side {
    Side::Right
}

impl PlacedModule {
    pub fn new(id: impl Into<String>, module_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            module_id: module_id.into(),
            position: Position::default(),
            slot_index: None,
            zone: None,
            is_dual_slot: false,
            rotation: 0.0,
            has_door: false,
            hinge_position: default_hinge(),
            custom_width: None,
            adjusted_width: None,
            adjusted_position: None,
            custom_depth: None,
        }
    }

    /// Zone the module belongs to; an unset zone is the normal zone.
    pub fn effective_zone(&self) -> ZoneKind {
        self.zone.unwrap_or_default()
    }

    /// Zone-local slots covered, starting at `slot_index`.
    pub fn occupied_slots(&self) -> Vec<usize> {
        match self.slot_index {
            Some(i) if self.is_dual_slot => vec![i, i + 1],
            Some(i) => vec![i],
            None => Vec::new(),
        }
    }

    pub fn has_column_adjustment(&self) -> bool {
        self.adjusted_width.is_some()
            || self.adjusted_position.is_some()
            || self.custom_depth.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    Upper,
    Lower,
    #[default]
    General,
}

impl ModuleCategory {
    /// Upper and lower cabinets stack vertically and may share a slot.
    pub fn stacks_with(self, other: ModuleCategory) -> bool {
        matches!(
            (self, other),
            (ModuleCategory::Upper, ModuleCategory::Lower)
                | (ModuleCategory::Lower, ModuleCategory::Upper)
        )
    }
}

/// Catalog entry for a module type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSpec {
    pub id: String,
    #[serde(default)]
    pub category: ModuleCategory,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    #[serde(default)]
    pub is_dual: bool,
}

impl ModuleSpec {
    pub fn is_dual_type(&self) -> bool {
        self.is_dual || is_dual_id(&self.id)
    }

    /// Single-width counterpart derived from a dual spec.
    pub fn derive_single(&self) -> ModuleSpec {
        ModuleSpec {
            id: to_single_id(&self.id),
            width: self.width / 2.0,
            is_dual: false,
            ..self.clone()
        }
    }
}

pub fn is_dual_id(module_id: &str) -> bool {
    module_id.starts_with(DUAL_PREFIX)
}

/// `dual-...` becomes `single-...`; other ids are returned unchanged.
pub fn to_single_id(module_id: &str) -> String {
    match module_id.strip_prefix(DUAL_PREFIX) {
        Some(rest) => format!("{SINGLE_PREFIX}{rest}"),
        None => module_id.to_string(),
    }
}

/// Module definitions by catalog id.
pub trait ModuleCatalog {
    fn get(&self, module_id: &str) -> Option<ModuleSpec>;

    /// Single variant of a dual spec, derived when the catalog lacks it.
    fn single_variant(&self, dual: &ModuleSpec) -> ModuleSpec {
        self.get(&to_single_id(&dual.id))
            .filter(|s| !s.is_dual_type())
            .unwrap_or_else(|| dual.derive_single())
    }
}

/// Catalog backed by a list of specs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticCatalog {
    pub modules: Vec<ModuleSpec>,
}

impl StaticCatalog {
    pub fn new(modules: Vec<ModuleSpec>) -> Self {
        Self { modules }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl ModuleCatalog for StaticCatalog {
    fn get(&self, module_id: &str) -> Option<ModuleSpec> {
        self.modules.iter().find(|m| m.id == module_id).cloned()
    }
}
