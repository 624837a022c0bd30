//! Furniture bounds inside column-intruded slots.
//!
//! Turns a slot's original bounds plus its [`ColumnIntrusion`] into the
//! furniture's render width, centre and (for medium columns) depth. Also
//! covers the door hinge side, split placement options, free pockets beside
//! a column and the pillar cover door.
//!
//! Width adjustment keeps [`columns::FACE_MARGIN`] clear of the column face.
//! A result narrower than [`furniture::MIN_WIDTH`] must not be rendered or
//! placed.

use serde::{Deserialize, Serialize};

use crate::column_slots::{
    adjusted_depth, ColumnIntrusion, ColumnType, IntrusionDirection, ProcessingMethod,
};
use crate::constants::{columns, furniture};
use crate::indexing::SlotBounds;
use crate::space::Side;

/// Which remainder of a centre-intruded slot to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitSide {
    Left,
    Right,
}

impl SplitSide {
    pub fn opposite(self) -> Self {
        match self {
            SplitSide::Left => SplitSide::Right,
            SplitSide::Right => SplitSide::Left,
        }
    }
}

/// Hinge on the outer edge of the remainder, away from the column.
impl From<SplitSide> for Side {
    fn from(side: SplitSide) -> Self {
        match side {
            SplitSide::Left => Side::Left,
            SplitSide::Right => Side::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureBounds {
    pub left: f64,
    pub right: f64,
    pub center: f64,
    pub render_width: f64,
    pub depth_adjustment_needed: bool,
    /// Replacement depth when `depth_adjustment_needed`.
    pub adjusted_depth: Option<f64>,
}

impl FurnitureBounds {
    fn full(slot: SlotBounds) -> Self {
        Self {
            left: slot.left,
            right: slot.right,
            center: slot.center,
            render_width: slot.width(),
            depth_adjustment_needed: false,
            adjusted_depth: None,
        }
    }

    fn span(left: f64, right: f64) -> Self {
        let right = right.max(left);
        Self {
            left,
            right,
            center: (left + right) / 2.0,
            render_width: right - left,
            depth_adjustment_needed: false,
            adjusted_depth: None,
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.render_width >= furniture::MIN_WIDTH
    }
}

/// Remainder a centre intrusion defaults to: the larger one, right on a tie.
fn default_side(intrusion: &ColumnIntrusion) -> SplitSide {
    if intrusion.left_clear > intrusion.right_clear {
        SplitSide::Left
    } else {
        SplitSide::Right
    }
}

/// Side of the column the furniture ends up on.
fn furniture_side(intrusion: &ColumnIntrusion, side: Option<SplitSide>) -> SplitSide {
    match intrusion.direction {
        IntrusionDirection::FromLeft => SplitSide::Right,
        IntrusionDirection::FromRight => SplitSide::Left,
        IntrusionDirection::Center => side.unwrap_or_else(|| default_side(intrusion)),
    }
}

/// Bounds of furniture placed in `slot`.
///
/// `side` picks the remainder for centre intrusions; ignored otherwise.
pub fn furniture_bounds(
    slot: SlotBounds,
    intrusion: Option<&ColumnIntrusion>,
    side: Option<SplitSide>,
) -> FurnitureBounds {
    let Some(intrusion) = intrusion else {
        return FurnitureBounds::full(slot);
    };

    if intrusion.method == ProcessingMethod::DepthAdjustment {
        return FurnitureBounds {
            depth_adjustment_needed: true,
            adjusted_depth: Some(adjusted_depth(intrusion.column.depth)),
            ..FurnitureBounds::full(slot)
        };
    }

    side_bounds(slot, intrusion, furniture_side(intrusion, side))
}

/// Bounds of the remainder on one side of the column, whatever the direction.
pub fn side_bounds(
    slot: SlotBounds,
    intrusion: &ColumnIntrusion,
    side: SplitSide,
) -> FurnitureBounds {
    let column = &intrusion.column;
    match side {
        SplitSide::Right => {
            let left = (column.right_edge() + columns::FACE_MARGIN).max(slot.left);
            FurnitureBounds::span(left.min(slot.right), slot.right)
        }
        SplitSide::Left => {
            let right = (column.left_edge() - columns::FACE_MARGIN).min(slot.right);
            FurnitureBounds::span(slot.left, right.max(slot.left))
        }
    }
}

/// Door hinge side for furniture in a slot: away from the column, on the
/// same remainder [`furniture_bounds`] picks.
///
/// Without a column the stored hinge is kept.
pub fn optimal_hinge(
    intrusion: Option<&ColumnIntrusion>,
    side: Option<SplitSide>,
    stored: Side,
) -> Side {
    match intrusion {
        Some(intrusion) => furniture_side(intrusion, side).into(),
        None => stored,
    }
}

/// Remainder of a split-eligible slot still free next to `occupied` X spans.
///
/// The default furniture side is tried first. `None` when both remainders
/// are taken or too narrow.
pub fn free_split_side(
    slot: SlotBounds,
    intrusion: &ColumnIntrusion,
    occupied: &[(f64, f64)],
) -> Option<SplitSide> {
    let pockets = find_free_spaces_in_column_slot(slot, intrusion, occupied);
    let preferred = furniture_side(intrusion, None);
    [preferred, preferred.opposite()].into_iter().find(|side| {
        let kind = match side {
            SplitSide::Left => PocketKind::Left,
            SplitSide::Right => PocketKind::Right,
        };
        let bounds = side_bounds(slot, intrusion, *side);
        pockets.iter().any(|p| p.kind == kind)
            && bounds.is_renderable()
            && !occupied
                .iter()
                .any(|(l, r)| l.max(bounds.left) < r.min(bounds.right))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementKind {
    Single,
    SplitWeighted,
    SplitEqual,
}

/// One furniture body of a placement option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub left: f64,
    pub right: f64,
    pub center: f64,
    pub width: f64,
    pub depth: Option<f64>,
}

impl Piece {
    fn new(left: f64, right: f64, depth: Option<f64>) -> Self {
        Self {
            left,
            right,
            center: (left + right) / 2.0,
            width: right - left,
            depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementOption {
    pub kind: PlacementKind,
    pub pieces: Vec<Piece>,
}

/// Ways to furnish a slot with a medium column; weighted split first.
///
/// Non-medium columns get no options (their bounds come from
/// [`furniture_bounds`]).
pub fn cabinet_placement_options(
    slot: SlotBounds,
    intrusion: &ColumnIntrusion,
) -> Vec<PlacementOption> {
    if intrusion.column_type != ColumnType::Medium {
        return Vec::new();
    }

    let mut options = Vec::new();
    let (l, r) = (intrusion.left_clear, intrusion.right_clear);

    if intrusion.split.can_split {
        let lw = (l - columns::SPLIT_MARGIN).max(furniture::MIN_WIDTH);
        let rw = (r - columns::SPLIT_MARGIN).max(furniture::MIN_WIDTH);
        options.push(PlacementOption {
            kind: PlacementKind::SplitWeighted,
            pieces: vec![
                Piece::new(slot.left, slot.left + lw, None),
                Piece::new(slot.right - rw, slot.right, None),
            ],
        });
    }

    if intrusion.split.equal_available {
        let w = l.min(r) - columns::SPLIT_MARGIN;
        options.push(PlacementOption {
            kind: PlacementKind::SplitEqual,
            pieces: vec![
                Piece::new(slot.left, slot.left + w, None),
                Piece::new(slot.right - w, slot.right, None),
            ],
        });
    }

    options.push(PlacementOption {
        kind: PlacementKind::Single,
        pieces: vec![Piece::new(
            slot.left,
            slot.right,
            Some(adjusted_depth(intrusion.column.depth)),
        )],
    });

    options
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PocketKind {
    Left,
    Right,
    Front,
}

/// Unused space beside or in front of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeSpace {
    pub kind: PocketKind,
    pub left: f64,
    pub right: f64,
    pub center: f64,
    pub width: f64,
    /// Usable depth for a front pocket.
    pub depth: Option<f64>,
}

impl FreeSpace {
    fn new(kind: PocketKind, left: f64, right: f64, depth: Option<f64>) -> Self {
        Self {
            kind,
            left,
            right,
            center: (left + right) / 2.0,
            width: right - left,
            depth,
        }
    }
}

/// Pockets at least [`furniture::MIN_WIDTH`] wide that no occupant overlaps.
///
/// `occupied` holds the X spans of furniture already in the slot.
pub fn find_free_spaces_in_column_slot(
    slot: SlotBounds,
    intrusion: &ColumnIntrusion,
    occupied: &[(f64, f64)],
) -> Vec<FreeSpace> {
    let column = &intrusion.column;
    let mut pockets = Vec::new();

    let left_end = (column.left_edge() - columns::POCKET_SAFETY_MARGIN).min(slot.right);
    if left_end > slot.left {
        let right_limit = left_end.min(slot.left + furniture::MAX_SINGLE_WIDTH);
        pockets.push(FreeSpace::new(PocketKind::Left, slot.left, right_limit, None));
    }

    let right_start = (column.right_edge() + columns::POCKET_SAFETY_MARGIN).max(slot.left);
    if right_start < slot.right {
        let left_limit = right_start.max(slot.right - furniture::MAX_SINGLE_WIDTH);
        pockets.push(FreeSpace::new(PocketKind::Right, left_limit, slot.right, None));
    }

    if column.depth < columns::FRONT_POCKET_MAX_COLUMN_DEPTH {
        let depth = columns::STANDARD_CABINET_DEPTH - column.depth;
        let width = column.width.min(columns::FRONT_POCKET_MAX_WIDTH);
        if depth >= furniture::MIN_DEPTH {
            let half = width / 2.0;
            pockets.push(FreeSpace::new(
                PocketKind::Front,
                column.position.x - half,
                column.position.x + half,
                Some(depth),
            ));
        }
    }

    pockets
        .into_iter()
        .filter(|p| p.width >= furniture::MIN_WIDTH)
        .filter(|p| {
            !occupied
                .iter()
                .any(|(l, r)| l.max(p.left) < r.min(p.right))
        })
        .collect()
}

/// A non-storage door covering a column slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarCoverDoor {
    pub center: f64,
    pub width: f64,
    pub hinge: Side,
    pub has_mullion: bool,
}

pub fn pillar_cover_door(slot: SlotBounds, intrusion: &ColumnIntrusion) -> PillarCoverDoor {
    PillarCoverDoor {
        center: slot.center,
        width: intrusion.door_width,
        hinge: optimal_hinge(Some(intrusion), None, Side::Right),
        has_mullion: intrusion.needs_mullion,
    }
}
