//! Column intrusion analysis per slot.
//!
//! For every global slot this module decides whether a structural column
//! intrudes, classifies it and picks how furniture in that slot is sized.
//!
//! Classification by column depth `d` (product vocabulary in brackets):
//!
//! | Depth           | Type      | Method                                         |
//! |-----------------|-----------|------------------------------------------------|
//! | `d <= 200`      | shallow   | width adjustment (Column A)                    |
//! | `200 < d <= 400`| medium    | depth adjustment if overlap >= 150, else width |
//! | `d > 400`       | deep      | width adjustment (Column B)                    |
//!
//! Columns at least 730mm deep also split continuous frames; see
//! [`frame_segments`] and [`deep_column_clear_spans`].
//!
//! When several columns overlap one slot, the one with the largest overlap
//! owns it.

use serde::{Deserialize, Serialize};

use crate::constants::{columns, furniture};
use crate::indexing::SlotBounds;
use crate::space::Column;
use crate::zones::{ZoneKind, ZoneLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Shallow,
    Medium,
    Deep,
}

impl ColumnType {
    pub fn classify(depth: f64) -> Self {
        if depth <= columns::SHALLOW_MAX_DEPTH {
            ColumnType::Shallow
        } else if depth <= columns::MEDIUM_MAX_DEPTH {
            ColumnType::Medium
        } else {
            ColumnType::Deep
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessingMethod {
    /// Shrink the furniture to the clear side of the column.
    WidthAdjustment,
    /// Keep the full slot width and pull the furniture forward of the column.
    DepthAdjustment,
}

/// Which side of the slot the column comes in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntrusionDirection {
    FromLeft,
    FromRight,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitKind {
    SplitWeighted,
    SplitEqual,
}

/// Whether two pieces fit either side of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitAnalysis {
    pub can_split: bool,
    pub recommended: Option<SplitKind>,
    pub equal_available: bool,
}

/// The column that owns a slot and what it does to furniture there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnIntrusion {
    pub column: Column,
    pub column_type: ColumnType,
    pub method: ProcessingMethod,
    pub direction: IntrusionDirection,
    /// Length of the slot covered by the column.
    pub overlap: f64,
    pub left_clear: f64,
    pub right_clear: f64,
    /// Larger clear width minus the face margin; 0 when the column covers the slot.
    pub available_width: f64,
    pub door_width: f64,
    pub needs_mullion: bool,
    /// Furniture depth under depth adjustment.
    pub adjusted_depth: Option<f64>,
    /// Two single pieces may share this slot.
    pub allow_multiple_furniture: bool,
    pub split: SplitAnalysis,
    /// Column is deep enough to cut continuous frames.
    pub splits_frame: bool,
}

impl ColumnIntrusion {
    pub fn covers_slot(&self) -> bool {
        self.left_clear <= 0.0 && self.right_clear <= 0.0
    }
}

/// Column analysis for one global slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSlotInfo {
    pub slot_index: usize,
    pub zone: ZoneKind,
    pub local_index: usize,
    pub bounds: SlotBounds,
    pub intrusion: Option<ColumnIntrusion>,
}

impl ColumnSlotInfo {
    pub fn has_column(&self) -> bool {
        self.intrusion.is_some()
    }

    pub fn allows_multiple(&self) -> bool {
        self.intrusion
            .as_ref()
            .is_some_and(|i| i.allow_multiple_furniture)
    }
}

/// Furniture depth when pulled forward of a column of depth `column_depth`.
pub fn adjusted_depth(column_depth: f64) -> f64 {
    (columns::STANDARD_CABINET_DEPTH - column_depth).max(furniture::MIN_DEPTH)
}

/// Analyse one slot against every column.
pub fn analyze_slot(slot: SlotBounds, cols: &[Column]) -> Option<ColumnIntrusion> {
    let (column, overlap) = cols
        .iter()
        .map(|c| (c, c.overlap_with(slot.left, slot.right)))
        .filter(|(_, overlap)| *overlap > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))?;

    let slot_width = slot.width();
    let left_clear = (column.left_edge() - slot.left).clamp(0.0, slot_width);
    let right_clear = (slot.right - column.right_edge()).clamp(0.0, slot_width);
    let covers = left_clear <= 0.0 && right_clear <= 0.0;

    let direction = if covers || (column.position.x - slot.center).abs() <= columns::CENTER_TOLERANCE
    {
        IntrusionDirection::Center
    } else if column.left_edge() <= slot.left {
        IntrusionDirection::FromLeft
    } else if column.right_edge() >= slot.right {
        IntrusionDirection::FromRight
    } else if left_clear < right_clear {
        IntrusionDirection::FromLeft
    } else {
        IntrusionDirection::FromRight
    };

    let column_type = ColumnType::classify(column.depth);
    let method = if column_type == ColumnType::Medium && overlap >= columns::DEPTH_ADJUST_OVERLAP {
        ProcessingMethod::DepthAdjustment
    } else {
        ProcessingMethod::WidthAdjustment
    };

    let available_width = if covers {
        0.0
    } else {
        (left_clear.max(right_clear) - columns::FACE_MARGIN).max(0.0)
    };

    let can_split = left_clear >= furniture::MIN_WIDTH && right_clear >= furniture::MIN_WIDTH;
    let equal_available = left_clear >= columns::EQUAL_SPLIT_MIN_WIDTH
        && right_clear >= columns::EQUAL_SPLIT_MIN_WIDTH;

    Some(ColumnIntrusion {
        column: column.clone(),
        column_type,
        method,
        direction,
        overlap,
        left_clear,
        right_clear,
        available_width,
        door_width: slot_width - furniture::DOOR_GAP,
        needs_mullion: left_clear > columns::MULLION_MIN_GAP
            && right_clear > columns::MULLION_MIN_GAP,
        adjusted_depth: (method == ProcessingMethod::DepthAdjustment)
            .then(|| adjusted_depth(column.depth)),
        allow_multiple_furniture: column_type == ColumnType::Medium && can_split,
        split: SplitAnalysis {
            can_split,
            recommended: can_split.then_some(SplitKind::SplitWeighted),
            equal_available,
        },
        splits_frame: column.depth >= columns::FRAME_SPLIT_DEPTH,
    })
}

/// Analyse every slot of the layout, indexed by global slot.
pub fn analyze_column_slots(layout: &ZoneLayout, cols: &[Column]) -> Vec<ColumnSlotInfo> {
    layout
        .global_slots()
        .into_iter()
        .map(|slot| {
            let intrusion = analyze_slot(slot.bounds, cols);
            if let Some(i) = &intrusion {
                log::debug!(
                    "slot {} ({:?} {}): column {} {:?} {:?} {:?}, overlap {}mm, clear {}/{}",
                    slot.global_index,
                    slot.zone,
                    slot.local_index,
                    i.column.id,
                    i.column_type,
                    i.method,
                    i.direction,
                    i.overlap,
                    i.left_clear,
                    i.right_clear
                );
            }
            ColumnSlotInfo {
                slot_index: slot.global_index,
                zone: slot.zone,
                local_index: slot.local_index,
                bounds: slot.bounds,
                intrusion,
            }
        })
        .collect()
}

/// A horizontal run of room X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Split a continuous frame at every deep column's physical edges.
///
/// Pieces hidden behind a column are dropped; empty pieces are skipped.
pub fn frame_segments(span: Span, cols: &[Column]) -> Vec<Span> {
    let mut cuts: Vec<(f64, f64)> = cols
        .iter()
        .filter(|c| c.depth >= columns::FRAME_SPLIT_DEPTH)
        .map(|c| (c.left_edge().max(span.start), c.right_edge().min(span.end)))
        .filter(|(l, r)| r > l)
        .collect();
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut segments = Vec::new();
    let mut cursor = span.start;
    for (left, right) in cuts {
        if left > cursor {
            segments.push(Span::new(cursor, left));
        }
        cursor = cursor.max(right);
    }
    if span.end > cursor {
        segments.push(Span::new(cursor, span.end));
    }
    segments
}

/// Clear boundaries either side of one deep column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepColumnSpan {
    pub column_id: String,
    pub left: Span,
    pub right: Span,
}

/// Left/right clear spans of every deep column inside `span`.
pub fn deep_column_clear_spans(span: Span, cols: &[Column]) -> Vec<DeepColumnSpan> {
    cols.iter()
        .filter(|c| c.depth >= columns::FRAME_SPLIT_DEPTH)
        .filter(|c| c.overlap_with(span.start, span.end) > 0.0)
        .map(|c| DeepColumnSpan {
            column_id: c.id.clone(),
            left: Span::new(span.start, c.left_edge().max(span.start)),
            right: Span::new(c.right_edge().min(span.end), span.end),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(left: f64, right: f64) -> SlotBounds {
        SlotBounds::new(left, right)
    }

    #[test]
    fn no_overlap_means_no_column() {
        let cols = [Column::new("c", 2000.0, 300.0, 300.0, 2400.0)];
        assert!(analyze_slot(slot(0.0, 500.0), &cols).is_none());
    }

    #[test]
    fn classification_bands() {
        assert_eq!(ColumnType::classify(150.0), ColumnType::Shallow);
        assert_eq!(ColumnType::classify(200.0), ColumnType::Shallow);
        assert_eq!(ColumnType::classify(300.0), ColumnType::Medium);
        assert_eq!(ColumnType::classify(400.0), ColumnType::Medium);
        assert_eq!(ColumnType::classify(730.0), ColumnType::Deep);
    }

    #[test]
    fn medium_column_inside_slot_uses_depth_adjustment() {
        // 300 x 300 column centred in slot [1000, 1500].
        let cols = [Column::new("c", 1250.0, 300.0, 300.0, 2400.0)];
        let info = analyze_slot(slot(1000.0, 1500.0), &cols).unwrap();
        assert_eq!(info.column_type, ColumnType::Medium);
        assert_eq!(info.method, ProcessingMethod::DepthAdjustment);
        assert_eq!(info.direction, IntrusionDirection::Center);
        assert_eq!(info.adjusted_depth, Some(430.0));
        assert_eq!(info.door_width, 497.0);
        assert!(!info.allow_multiple_furniture);
    }

    #[test]
    fn small_medium_overlap_stays_width_adjusted() {
        // Column crosses the left edge, only 100mm inside the slot.
        let cols = [Column::new("c", 1000.0, 200.0, 300.0, 2400.0)];
        let info = analyze_slot(slot(1000.0, 1500.0), &cols).unwrap();
        assert_eq!(info.overlap, 100.0);
        assert_eq!(info.method, ProcessingMethod::WidthAdjustment);
        assert_eq!(info.direction, IntrusionDirection::FromLeft);
        assert_eq!(info.left_clear, 0.0);
        assert_eq!(info.right_clear, 400.0);
        assert_eq!(info.available_width, 398.0);
        assert!(info.adjusted_depth.is_none());
    }

    #[test]
    fn overlap_of_exactly_150_depth_adjusts() {
        // 150mm-wide medium column fully inside the slot.
        let cols = [Column::new("c", 1250.0, 150.0, 300.0, 2400.0)];
        let info = analyze_slot(slot(1000.0, 1500.0), &cols).unwrap();
        assert_eq!(info.overlap, 150.0);
        assert_eq!(info.method, ProcessingMethod::DepthAdjustment);
        assert_eq!(info.adjusted_depth, Some(430.0));
    }

    #[test]
    fn crossing_right_edge_is_from_right() {
        let cols = [Column::new("c", 1500.0, 300.0, 150.0, 2400.0)];
        let info = analyze_slot(slot(1000.0, 1500.0), &cols).unwrap();
        assert_eq!(info.direction, IntrusionDirection::FromRight);
        assert_eq!(info.column_type, ColumnType::Shallow);
        assert_eq!(info.left_clear, 350.0);
    }

    #[test]
    fn off_centre_column_intrudes_from_nearer_side() {
        let cols = [Column::new("c", 1100.0, 100.0, 600.0, 2400.0)];
        let info = analyze_slot(slot(1000.0, 1500.0), &cols).unwrap();
        assert_eq!(info.left_clear, 50.0);
        assert_eq!(info.right_clear, 350.0);
        assert_eq!(info.direction, IntrusionDirection::FromLeft);
        assert_eq!(info.column_type, ColumnType::Deep);
        assert!(info.needs_mullion);
    }

    #[test]
    fn covering_column_leaves_no_width() {
        let cols = [Column::new("c", 1250.0, 800.0, 800.0, 2400.0)];
        let info = analyze_slot(slot(1000.0, 1500.0), &cols).unwrap();
        assert!(info.covers_slot());
        assert_eq!(info.direction, IntrusionDirection::Center);
        assert_eq!(info.available_width, 0.0);
        assert!(info.splits_frame);
    }

    #[test]
    fn largest_overlap_owns_slot() {
        let cols = [
            Column::new("small", 1020.0, 100.0, 300.0, 2400.0),
            Column::new("big", 1400.0, 200.0, 300.0, 2400.0),
        ];
        let info = analyze_slot(slot(1000.0, 1500.0), &cols).unwrap();
        assert_eq!(info.column.id, "big");
    }

    #[test]
    fn wide_slot_medium_column_is_split_eligible() {
        let cols = [Column::new("c", 1300.0, 200.0, 300.0, 2400.0)];
        let info = analyze_slot(slot(1000.0, 1600.0), &cols).unwrap();
        assert!(info.split.can_split);
        assert!(info.split.equal_available);
        assert_eq!(info.split.recommended, Some(SplitKind::SplitWeighted));
        assert!(info.allow_multiple_furniture);
    }

    #[test]
    fn frame_is_cut_only_by_deep_columns() {
        let cols = [
            Column::new("deep", 1000.0, 200.0, 800.0, 2400.0),
            Column::new("shallow", 2000.0, 200.0, 300.0, 2400.0),
        ];
        let segments = frame_segments(Span::new(0.0, 3000.0), &cols);
        assert_eq!(segments, vec![Span::new(0.0, 900.0), Span::new(1100.0, 3000.0)]);

        let spans = deep_column_clear_spans(Span::new(0.0, 3000.0), &cols);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].column_id, "deep");
        assert_eq!(spans[0].left, Span::new(0.0, 900.0));
        assert_eq!(spans[0].right, Span::new(1100.0, 3000.0));
    }

    #[test]
    fn frame_column_at_edge_leaves_one_piece() {
        let cols = [Column::new("deep", 50.0, 200.0, 800.0, 2400.0)];
        let segments = frame_segments(Span::new(0.0, 3000.0), &cols);
        assert_eq!(segments, vec![Span::new(150.0, 3000.0)]);
    }

    #[test]
    fn analysis_covers_every_global_slot() {
        use crate::space::SpaceConfig;
        let mut space = SpaceConfig::default();
        space.columns.push(Column::new("c", 1000.0, 300.0, 300.0, 2400.0));
        let layout = ZoneLayout::compute(&space).unwrap();
        let infos = analyze_column_slots(&layout, &space.columns);
        assert_eq!(infos.len(), layout.total_slots());
        assert!(infos.iter().any(ColumnSlotInfo::has_column));
        for (i, info) in infos.iter().enumerate() {
            assert_eq!(info.slot_index, i);
        }
    }
}
