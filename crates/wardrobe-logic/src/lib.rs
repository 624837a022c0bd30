//! Pure layout and placement logic for the wardrobe configurator.
//!
//! This crate contains the slot-indexing and column-aware placement engine,
//! independent of any renderer, UI framework or document store. Functions
//! take plain data (a space config, the placed modules, a catalog) and
//! return results, so every rule is unit-testable and the same code can run
//! behind a web editor, a native tool or the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`availability`] | Slot availability, upper/lower stacking, smart-skip search, occupancy map |
//! | [`bounds`] | Furniture bounds beside columns, hinge side, split options, free pockets |
//! | [`column_slots`] | Per-slot column intrusion analysis and frame segmentation |
//! | [`constants`] | Thresholds, clearances and product defaults (mm) |
//! | [`drag`] | Drag controller and slot pickers |
//! | [`indexing`] | Slot widths, boundaries and single/dual centres for one span |
//! | [`keyboard`] | Keyboard navigation, delete and edit-mode exit |
//! | [`layout`] | Derived per-read layout: zones, column analysis, vertical anchors |
//! | [`modules`] | Placed modules and the module catalog |
//! | [`placement`] | Target resolution, dual/single conversion, column reconciliation |
//! | [`space`] | Space configuration, interior measurements and validation |
//! | [`units`] | Room millimetres to renderer scene units |
//! | [`zones`] | Normal/dropped-ceiling zone partitioning |

pub mod availability;
pub mod bounds;
pub mod column_slots;
pub mod constants;
pub mod drag;
pub mod indexing;
pub mod keyboard;
pub mod layout;
pub mod modules;
pub mod placement;
pub mod space;
pub mod units;
pub mod zones;
