//! Space configuration — the room cavity the wardrobe is built into.
//!
//! This module provides the persisted data model for a space (dimensions,
//! installation, frames, base, dropped ceiling, structural columns) and the
//! derived interior measurements every other module builds on, independent
//! of any store or UI framework.
//!
//! All lengths are millimetres in the room frame: X = 0 at the room's left
//! outer edge, Y = 0 at the floor, Z = 0 at the back wall.
//!
//! ```
//! use wardrobe_logic::space::{SpaceConfig, validate_space};
//!
//! let space = SpaceConfig::default();
//! assert!(validate_space(&space).is_empty());
//! assert_eq!(space.internal_width(), 3500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{dropped, frame};

/// Left or right side of the room (also used for door hinges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// How the wardrobe sits between the walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallType {
    /// Walls on both sides.
    #[serde(alias = "built-in")]
    Builtin,
    /// Wall on one side, end panel on the other.
    #[serde(alias = "semi-standing")]
    Semistanding,
    /// No walls; end panels on both sides.
    #[serde(alias = "free-standing")]
    Freestanding,
}

/// Whether a decorative frame surrounds the opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurroundType {
    Surround,
    NoSurround,
}

/// Surround frame thickness per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSize {
    pub left: f64,
    pub right: f64,
    pub top: f64,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            left: frame::DEFAULT_FRAME,
            right: frame::DEFAULT_FRAME,
            top: frame::DEFAULT_TOP_FRAME,
        }
    }
}

/// No-surround spacing per side. `None` derives the gap from wall presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    pub left: Option<f64>,
    pub right: Option<f64>,
}

/// Which sides have a physical wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub left: bool,
    pub right: bool,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
        }
    }
}

/// What the carcasses stand on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BaseConfig {
    /// Floor-standing plinth frame of the given height.
    Floor { height: f64 },
    /// Legs/stand with no plinth; optional float height above the floor.
    Stand {
        #[serde(default, rename = "floatHeight")]
        float_height: Option<f64>,
    },
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig::Floor {
            height: frame::DEFAULT_BASE_HEIGHT,
        }
    }
}

/// A lowered ceiling section on one side of the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DroppedCeiling {
    pub enabled: bool,
    pub position: Side,
    /// Outer width of the dropped section.
    pub width: f64,
    /// How far the ceiling drops.
    pub drop_height: f64,
    /// Explicit slot count for the dropped zone.
    pub column_count: Option<u32>,
    /// Explicit per-slot widths for the dropped zone.
    pub slot_widths: Option<Vec<f64>>,
}

impl Default for DroppedCeiling {
    fn default() -> Self {
        Self {
            enabled: false,
            position: Side::Right,
            width: dropped::DEFAULT_WIDTH,
            drop_height: dropped::DEFAULT_DROP_HEIGHT,
            column_count: None,
            slot_widths: None,
        }
    }
}

/// Plan position of a column centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanPosition {
    pub x: f64,
    pub z: f64,
}

/// A structural column (pillar) standing against the back wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub position: PlanPosition,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl Column {
    /// A column of the given footprint centred at `x`, flush to the back wall.
    pub fn new(id: impl Into<String>, x: f64, width: f64, depth: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            position: PlanPosition { x, z: depth / 2.0 },
            width,
            depth,
            height,
        }
    }

    pub fn left_edge(&self) -> f64 {
        self.position.x - self.width / 2.0
    }

    pub fn right_edge(&self) -> f64 {
        self.position.x + self.width / 2.0
    }

    /// Z of the column's front face.
    pub fn front_z(&self) -> f64 {
        self.position.z + self.depth / 2.0
    }

    /// Length of `[start, end]` covered by this column.
    pub fn overlap_with(&self, start: f64, end: f64) -> f64 {
        (self.right_edge().min(end) - self.left_edge().max(start)).max(0.0)
    }
}

/// The authoritative space description, as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceConfig {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub install_type: InstallType,
    pub surround_type: SurroundType,
    #[serde(default)]
    pub frame_size: FrameSize,
    #[serde(default)]
    pub gap_config: GapConfig,
    #[serde(default)]
    pub wall_config: WallConfig,
    #[serde(default)]
    pub base_config: BaseConfig,
    /// Floor finish thickness, if a finish is laid.
    #[serde(default)]
    pub floor_finish: Option<f64>,
    #[serde(default)]
    pub dropped_ceiling: Option<DroppedCeiling>,
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Explicit slot count for the whole space (or the normal zone).
    #[serde(default)]
    pub custom_column_count: Option<u32>,
    /// Explicit per-slot widths for the whole space (or the normal zone).
    #[serde(default)]
    pub custom_slot_widths: Option<Vec<f64>>,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            width: 3600.0,
            height: 2400.0,
            depth: 580.0,
            install_type: InstallType::Builtin,
            surround_type: SurroundType::Surround,
            frame_size: FrameSize::default(),
            gap_config: GapConfig::default(),
            wall_config: WallConfig::default(),
            base_config: BaseConfig::default(),
            floor_finish: None,
            dropped_ceiling: None,
            columns: Vec::new(),
            custom_column_count: None,
            custom_slot_widths: None,
        }
    }
}

impl SpaceConfig {
    /// Parse a space from the store's JSON shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Width taken from the cavity on one side by a frame or gap.
    pub fn side_reduction(&self, side: Side) -> f64 {
        match self.surround_type {
            SurroundType::Surround => match side {
                Side::Left => self.frame_size.left,
                Side::Right => self.frame_size.right,
            },
            SurroundType::NoSurround => {
                let (configured, wall) = match side {
                    Side::Left => (self.gap_config.left, self.wall_config.left),
                    Side::Right => (self.gap_config.right, self.wall_config.right),
                };
                configured.unwrap_or(if wall {
                    frame::WALL_GAP
                } else {
                    frame::END_PANEL_GAP
                })
            }
        }
    }

    /// Interior cavity width between frames/gaps.
    pub fn internal_width(&self) -> f64 {
        self.width - self.side_reduction(Side::Left) - self.side_reduction(Side::Right)
    }

    /// Room X where the cavity starts.
    pub fn internal_start_x(&self) -> f64 {
        self.side_reduction(Side::Left)
    }

    /// Height of the plinth frame (0 for a stand).
    pub fn base_frame_height(&self) -> f64 {
        match self.base_config {
            BaseConfig::Floor { height } => height,
            BaseConfig::Stand { .. } => 0.0,
        }
    }

    fn float_height(&self) -> f64 {
        match self.base_config {
            BaseConfig::Floor { .. } => 0.0,
            BaseConfig::Stand { float_height } => float_height.unwrap_or(0.0),
        }
    }

    /// Interior height between base and top frame.
    pub fn internal_height(&self) -> f64 {
        self.height
            - self.floor_finish.unwrap_or(0.0)
            - self.frame_size.top
            - self.base_frame_height()
            - self.float_height()
    }

    /// Y where lower furniture bodies start.
    pub fn floor_start(&self) -> f64 {
        self.floor_finish.unwrap_or(0.0) + self.base_frame_height() + self.float_height()
    }

    /// The dropped ceiling, if present and enabled.
    pub fn active_dropped_ceiling(&self) -> Option<&DroppedCeiling> {
        self.dropped_ceiling.as_ref().filter(|d| d.enabled)
    }
}

/// Space validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f64 },
    #[error("frames and gaps leave no interior width ({0}mm)")]
    NoInteriorWidth(f64),
    #[error("negative {name} frame/gap: {value}")]
    NegativeReduction { name: &'static str, value: f64 },
    #[error("dropped ceiling width {width}mm must lie strictly inside the space width {total}mm")]
    DroppedWidthOutOfRange { width: f64, total: f64 },
    #[error("drop height {drop}mm must be below the space height {height}mm")]
    DropHeightTooLarge { drop: f64, height: f64 },
    #[error("column {id}: {reason}")]
    InvalidColumn { id: String, reason: &'static str },
    #[error("explicit slot count must be at least 1")]
    ZeroColumnCount,
    #[error("install type {install:?} does not match wall flags (left={left}, right={right})")]
    InstallWallMismatch {
        install: InstallType,
        left: bool,
        right: bool,
    },
}

/// Validate a space, returning all errors found.
pub fn validate_space(space: &SpaceConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    for (name, value) in [
        ("width", space.width),
        ("height", space.height),
        ("depth", space.depth),
    ] {
        if value <= 0.0 {
            errors.push(ConfigError::NonPositiveDimension { name, value });
        }
    }

    for (name, value) in [
        ("left", space.side_reduction(Side::Left)),
        ("right", space.side_reduction(Side::Right)),
        ("top", space.frame_size.top),
    ] {
        if value < 0.0 {
            errors.push(ConfigError::NegativeReduction { name, value });
        }
    }

    if space.width > 0.0 && space.internal_width() <= 0.0 {
        errors.push(ConfigError::NoInteriorWidth(space.internal_width()));
    }

    if let Some(dc) = space.active_dropped_ceiling() {
        if dc.width <= 0.0 || dc.width >= space.width {
            errors.push(ConfigError::DroppedWidthOutOfRange {
                width: dc.width,
                total: space.width,
            });
        }
        if dc.drop_height >= space.height {
            errors.push(ConfigError::DropHeightTooLarge {
                drop: dc.drop_height,
                height: space.height,
            });
        }
        if dc.column_count == Some(0) {
            errors.push(ConfigError::ZeroColumnCount);
        }
    }

    if space.custom_column_count == Some(0) {
        errors.push(ConfigError::ZeroColumnCount);
    }

    for c in &space.columns {
        if c.width <= 0.0 {
            errors.push(ConfigError::InvalidColumn {
                id: c.id.clone(),
                reason: "width must be positive",
            });
        }
        if c.depth <= 0.0 {
            errors.push(ConfigError::InvalidColumn {
                id: c.id.clone(),
                reason: "depth must be positive",
            });
        }
        if c.right_edge() <= 0.0 || c.left_edge() >= space.width {
            errors.push(ConfigError::InvalidColumn {
                id: c.id.clone(),
                reason: "lies outside the room",
            });
        }
    }

    let walls = space.wall_config;
    let consistent = match space.install_type {
        InstallType::Builtin => walls.left && walls.right,
        InstallType::Semistanding => walls.left != walls.right,
        InstallType::Freestanding => !walls.left && !walls.right,
    };
    if !consistent {
        errors.push(ConfigError::InstallWallMismatch {
            install: space.install_type,
            left: walls.left,
            right: walls.right,
        });
    }

    errors
}
