//! Slot indexing for a single span (no zoning).
//!
//! Divides an interior cavity into furniture slots and derives boundaries,
//! single-slot centres and dual-slot centres.
//!
//! Algorithm:
//! 1. Custom widths, if supplied, are used as-is (their sum must match the
//!    cavity within [`slots::WIDTH_TOLERANCE`])
//! 2. Otherwise the width is split evenly, rounded to 0.1mm, with the
//!    rounding remainder pushed onto the last slot
//! 3. Boundaries accumulate from `start_x`; centres sit half a slot past
//!    each boundary; dual centres are the midpoint of adjacent centres
//!
//! ```
//! use wardrobe_logic::indexing::index_span;
//!
//! let idx = index_span(0.0, 3000.0, 6, None).unwrap();
//! assert_eq!(idx.slot_widths, vec![500.0; 6]);
//! assert_eq!(idx.dual_position(0), Some(500.0));
//! assert_eq!(idx.dual_position(5), None);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{round_mm, slots};
use crate::space::ConfigError;

/// Layout derivation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("span width must be positive, got {0}mm")]
    NonPositiveWidth(f64),
    #[error("a span needs at least one slot")]
    ZeroSlots,
    #[error("slot {index} has non-positive width {width}mm")]
    NonPositiveSlotWidth { index: usize, width: f64 },
    #[error("custom slot widths sum to {actual}mm but the cavity is {expected}mm")]
    SlotWidthMismatch { expected: f64, actual: f64 },
    #[error("invalid space: {0:?}")]
    InvalidSpace(Vec<ConfigError>),
}

/// Left/right/centre of one slot (or slot pair).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotBounds {
    pub left: f64,
    pub right: f64,
    pub center: f64,
}

impl SlotBounds {
    pub fn new(left: f64, right: f64) -> Self {
        Self {
            left,
            right,
            center: (left + right) / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Slots of one contiguous span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexingResult {
    pub column_count: usize,
    /// Nominal slot width (even split width, or the mean in custom mode).
    pub column_width: f64,
    pub slot_widths: Vec<f64>,
    pub start_x: f64,
    pub width: f64,
    /// `column_count + 1` slot edges.
    pub boundaries: Vec<f64>,
    /// Centre of each single slot.
    pub positions: Vec<f64>,
    /// Centre of each dual pair starting at index `i` (`column_count - 1` entries).
    pub dual_positions: Vec<f64>,
}

impl IndexingResult {
    pub fn end_x(&self) -> f64 {
        self.boundaries.last().copied().unwrap_or(self.start_x)
    }

    /// Centre of single slot `i`.
    pub fn position(&self, i: usize) -> Option<f64> {
        self.positions.get(i).copied()
    }

    /// Centre of the pair `[i, i + 1]`; `None` for the last slot.
    pub fn dual_position(&self, i: usize) -> Option<f64> {
        self.dual_positions.get(i).copied()
    }

    pub fn slot_bounds(&self, i: usize) -> Option<SlotBounds> {
        if i >= self.column_count {
            return None;
        }
        Some(SlotBounds::new(self.boundaries[i], self.boundaries[i + 1]))
    }

    /// Bounds of the pair `[i, i + 1]`.
    pub fn dual_bounds(&self, i: usize) -> Option<SlotBounds> {
        if i + 1 >= self.column_count {
            return None;
        }
        Some(SlotBounds::new(self.boundaries[i], self.boundaries[i + 2]))
    }

    /// Width occupied by a module starting at `i`.
    pub fn occupied_width(&self, i: usize, is_dual: bool) -> Option<f64> {
        if is_dual {
            self.dual_bounds(i).map(|b| b.width())
        } else {
            self.slot_widths.get(i).copied()
        }
    }

    /// Slot containing `x`, clamped to the first/last slot when outside.
    pub fn slot_at(&self, x: f64) -> usize {
        if self.column_count == 0 || x <= self.start_x {
            return 0;
        }
        self.boundaries
            .windows(2)
            .position(|edge| x >= edge[0] && x <= edge[1])
            .unwrap_or(self.column_count - 1)
    }

    /// Slot whose (single or dual) centre matches a stored X.
    pub fn slot_from_position(&self, x: f64, is_dual: bool) -> Option<usize> {
        let centres = if is_dual {
            &self.dual_positions
        } else {
            &self.positions
        };
        centres
            .iter()
            .position(|c| (c - x).abs() < slots::POSITION_TOLERANCE)
    }
}

/// Automatic slot count: slots no wider than [`slots::MAX_DEFAULT_SLOT_WIDTH`].
pub fn default_column_count(width: f64) -> usize {
    if width <= slots::MAX_DEFAULT_SLOT_WIDTH {
        return 1;
    }
    (width / slots::MAX_DEFAULT_SLOT_WIDTH).ceil() as usize
}

/// Split `width` into `column_count` even slots.
fn even_widths(width: f64, column_count: usize) -> Vec<f64> {
    let nominal = round_mm(width / column_count as f64);
    let mut widths = vec![nominal; column_count];
    let rest = round_mm(width - nominal * (column_count - 1) as f64);
    widths[column_count - 1] = rest;
    widths
}

/// Index a span starting at `start_x` of the given width.
///
/// `custom_widths` switches to custom mode and overrides `column_count`.
pub fn index_span(
    start_x: f64,
    width: f64,
    column_count: usize,
    custom_widths: Option<&[f64]>,
) -> Result<IndexingResult, LayoutError> {
    if width <= 0.0 {
        return Err(LayoutError::NonPositiveWidth(width));
    }

    let slot_widths = match custom_widths {
        Some(custom) if !custom.is_empty() => {
            let actual: f64 = custom.iter().sum();
            if (actual - width).abs() > slots::WIDTH_TOLERANCE {
                return Err(LayoutError::SlotWidthMismatch {
                    expected: width,
                    actual,
                });
            }
            custom.to_vec()
        }
        _ => {
            if column_count == 0 {
                return Err(LayoutError::ZeroSlots);
            }
            even_widths(width, column_count)
        }
    };

    if let Some((index, &w)) = slot_widths.iter().enumerate().find(|(_, w)| **w <= 0.0) {
        return Err(LayoutError::NonPositiveSlotWidth { index, width: w });
    }

    let count = slot_widths.len();
    let mut boundaries = Vec::with_capacity(count + 1);
    boundaries.push(start_x);
    for w in &slot_widths {
        let last = boundaries[boundaries.len() - 1];
        boundaries.push(last + w);
    }

    let positions: Vec<f64> = slot_widths
        .iter()
        .enumerate()
        .map(|(i, w)| boundaries[i] + w / 2.0)
        .collect();

    let dual_positions = positions.windows(2).map(|p| (p[0] + p[1]) / 2.0).collect();

    let column_width = if custom_widths.is_some_and(|c| !c.is_empty()) {
        round_mm(width / count as f64)
    } else {
        slot_widths[0]
    };

    Ok(IndexingResult {
        column_count: count,
        column_width,
        slot_widths,
        start_x,
        width,
        boundaries,
        positions,
        dual_positions,
    })
}
