//! Layout constants — thresholds, clearances and product defaults.
//!
//! Plain `f64` millimetre constants with no store dependency.
//! Both the library and the headless harness use these.

/// Slot sizing.
pub mod slots {
    /// Largest slot width the automatic slot count aims for.
    pub const MAX_DEFAULT_SLOT_WIDTH: f64 = 600.0;
    /// Allowed drift between summed slot widths and the cavity width.
    pub const WIDTH_TOLERANCE: f64 = 0.1;
    /// Slot widths are rounded to this many decimal places.
    pub const WIDTH_DECIMALS: i32 = 1;
    /// A stored X within this distance of a slot centre belongs to that slot.
    pub const POSITION_TOLERANCE: f64 = 10.0;
}

/// Frame, gap and base defaults.
pub mod frame {
    /// Surround frame thickness per side when none is configured.
    pub const DEFAULT_FRAME: f64 = 50.0;
    /// Top frame height when none is configured.
    pub const DEFAULT_TOP_FRAME: f64 = 50.0;
    /// No-surround spacing next to a wall.
    pub const WALL_GAP: f64 = 2.0;
    /// No-surround spacing next to an end panel (no wall on that side).
    pub const END_PANEL_GAP: f64 = 20.0;
    /// Floor-standing base frame height.
    pub const DEFAULT_BASE_HEIGHT: f64 = 65.0;
}

/// Dropped-ceiling defaults.
pub mod dropped {
    pub const DEFAULT_WIDTH: f64 = 900.0;
    pub const DEFAULT_DROP_HEIGHT: f64 = 200.0;
}

/// Column (structural pillar) classification and clearances.
pub mod columns {
    /// Columns at or below this depth are "Column A" (shallow).
    pub const SHALLOW_MAX_DEPTH: f64 = 200.0;
    /// Columns at or below this depth (and above shallow) are "Column C" (medium).
    pub const MEDIUM_MAX_DEPTH: f64 = 400.0;
    /// Columns at or beyond this depth split continuous frames.
    pub const FRAME_SPLIT_DEPTH: f64 = 730.0;
    /// Overlap from which a medium column switches to depth adjustment.
    pub const DEPTH_ADJUST_OVERLAP: f64 = 150.0;
    /// Standard cabinet depth the depth adjustment subtracts from.
    pub const STANDARD_CABINET_DEPTH: f64 = 730.0;
    /// Clearance kept between furniture and a column face.
    pub const FACE_MARGIN: f64 = 2.0;
    /// Column centre within this distance of the slot centre counts as centred.
    pub const CENTER_TOLERANCE: f64 = 3.0;
    /// Both clear gaps above this need a mullion panel.
    pub const MULLION_MIN_GAP: f64 = 10.0;
    /// Margin subtracted from each side of a split placement.
    pub const SPLIT_MARGIN: f64 = 10.0;
    /// Both sides must reach this for an equal split to be offered.
    pub const EQUAL_SPLIT_MIN_WIDTH: f64 = 200.0;
    /// Largest front pocket offered in front of a shallow column.
    pub const FRONT_POCKET_MAX_WIDTH: f64 = 300.0;
    /// Columns shallower than this leave room for a front pocket.
    pub const FRONT_POCKET_MAX_COLUMN_DEPTH: f64 = 500.0;
    /// Safety margin between a free pocket and the column.
    pub const POCKET_SAFETY_MARGIN: f64 = 5.0;
}

/// Furniture minimums.
pub mod furniture {
    /// Narrowest renderable furniture body.
    pub const MIN_WIDTH: f64 = 150.0;
    /// Shallowest furniture body after depth adjustment.
    pub const MIN_DEPTH: f64 = 200.0;
    /// Gap subtracted from the slot width for the door leaf.
    pub const DOOR_GAP: f64 = 3.0;
    /// Widest single body considered when sizing a free pocket.
    pub const MAX_SINGLE_WIDTH: f64 = 600.0;
}

/// Renderer scene units.
pub mod units {
    /// Scene units per millimetre.
    pub const SCENE_PER_MM: f64 = 0.01;
}

/// Round `value` to [`slots::WIDTH_DECIMALS`] decimal places.
pub fn round_mm(value: f64) -> f64 {
    let factor = 10f64.powi(slots::WIDTH_DECIMALS);
    (value * factor).round() / factor
}
