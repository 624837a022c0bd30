//! Wardrobe Headless Placement Harness
//!
//! Validates layout and editing logic without a renderer or store.
//! Runs entirely in-process against the sample fixture plus seeded random
//! sweeps.
//!
//! Usage:
//!   cargo run -p wardrobe-simtest
//!   cargo run -p wardrobe-simtest -- --verbose
//!   RUST_LOG=wardrobe_logic=debug cargo run -p wardrobe-simtest

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use wardrobe_logic::availability::slot_occupancy;
use wardrobe_logic::bounds::furniture_bounds;
use wardrobe_logic::column_slots::{adjusted_depth, ProcessingMethod};
use wardrobe_logic::drag::{DragController, DragOutcome, WorldXPicker};
use wardrobe_logic::indexing::{default_column_count, index_span};
use wardrobe_logic::keyboard::{Key, KeyOutcome, KeyboardNavController};
use wardrobe_logic::layout::SpaceLayout;
use wardrobe_logic::modules::{ModuleCatalog, ModuleSpec, PlacedModule, StaticCatalog};
use wardrobe_logic::placement::{
    place_new_module, reconcile_columns, resolve_placement, EditContext, PlacementRejection,
    ReconcileAction, Target,
};
use wardrobe_logic::space::{
    validate_space, Column, DroppedCeiling, GapConfig, Side, SpaceConfig, SurroundType,
};
use wardrobe_logic::zones::ZoneKind;

// ── Sample fixture (store JSON shape) ───────────────────────────────────
const SAMPLE_JSON: &str = include_str!("../../../data/sample_space.json");

const SEED: u64 = 0x5EED_2026;

#[derive(Debug, Deserialize)]
struct Fixture {
    space: SpaceConfig,
    catalog: Vec<ModuleSpec>,
    modules: Vec<PlacedModule>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    println!("=== Wardrobe Placement Harness ===\n");

    let mut results = Vec::new();

    // 1. Sample fixture
    results.extend(validate_fixture(verbose));

    // 2. Slot indexing sweep
    results.extend(validate_indexing_sweep(verbose));

    // 3. Zone partition sweep
    results.extend(validate_zone_sweep(verbose));

    // 4. Column bounds sweep
    results.extend(validate_column_sweep(verbose));

    // 5. End-to-end scenarios
    results.extend(validate_scenarios(verbose));

    // 6. Editing flows on the fixture
    results.extend(validate_editing(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_fixture() -> Result<Fixture, String> {
    serde_json::from_str(SAMPLE_JSON).map_err(|e| format!("JSON parse error: {e}"))
}

fn flush_space(width: f64, slots: u32) -> SpaceConfig {
    SpaceConfig {
        width,
        surround_type: SurroundType::NoSurround,
        gap_config: GapConfig {
            left: Some(0.0),
            right: Some(0.0),
        },
        custom_column_count: Some(slots),
        ..SpaceConfig::default()
    }
}

// ── 1. Fixture ──────────────────────────────────────────────────────────

fn validate_fixture(verbose: bool) -> Vec<TestResult> {
    println!("--- Sample Fixture ---");
    let mut results = Vec::new();

    let fixture = match load_fixture() {
        Ok(f) => f,
        Err(e) => {
            results.push(TestResult::new("fixture_parse", false, e));
            return results;
        }
    };

    log::info!(
        "fixture: {}mm wide, {} columns, {} modules",
        fixture.space.width,
        fixture.space.columns.len(),
        fixture.modules.len()
    );

    let errors = validate_space(&fixture.space);
    results.push(TestResult::new(
        "fixture_space_valid",
        errors.is_empty(),
        format!("{} validation errors {errors:?}", errors.len()),
    ));

    let catalog = StaticCatalog::new(fixture.catalog);
    let missing: Vec<_> = fixture
        .modules
        .iter()
        .filter(|m| catalog.get(&m.module_id).is_none())
        .map(|m| m.id.as_str())
        .collect();
    results.push(TestResult::new(
        "fixture_catalog_complete",
        missing.is_empty(),
        format!("modules without catalog entry: {missing:?}"),
    ));

    let layout = match SpaceLayout::derive(&fixture.space) {
        Ok(l) => l,
        Err(e) => {
            results.push(TestResult::new("fixture_layout", false, e.to_string()));
            return results;
        }
    };
    let normal = layout.slot_count(ZoneKind::Normal);
    let dropped = layout.slot_count(ZoneKind::Dropped);
    results.push(TestResult::new(
        "fixture_zone_slots",
        normal == 5 && dropped == 2,
        format!("normal={normal}, dropped={dropped}"),
    ));

    let column_slots: Vec<_> = layout
        .column_slots
        .iter()
        .filter(|s| s.has_column())
        .map(|s| s.slot_index)
        .collect();
    results.push(TestResult::new(
        "fixture_column_slot",
        column_slots == vec![2],
        format!("column slots {column_slots:?}"),
    ));

    let report = slot_occupancy(&layout, &fixture.modules, &catalog);
    if verbose {
        for slot in &report.slots {
            println!(
                "  slot {:>2} {:?}/{}: {:?}",
                slot.global_index, slot.zone, slot.local_index, slot.occupants
            );
        }
    }
    results.push(TestResult::new(
        "fixture_no_conflicts",
        report.conflicts.is_empty(),
        format!("conflicting slots {:?}", report.conflicts),
    ));

    // Stored column fields should already match what reconciliation computes.
    match EditContext::new(&fixture.space, &fixture.modules, &catalog) {
        Ok(ctx) => {
            let actions = reconcile_columns(&ctx);
            results.push(TestResult::new(
                "fixture_reconciled",
                actions.is_empty(),
                format!("{} pending actions {actions:?}", actions.len()),
            ));
        }
        Err(e) => results.push(TestResult::new("fixture_reconciled", false, e.to_string())),
    }

    results
}

// ── 2. Indexing sweep ───────────────────────────────────────────────────

fn validate_indexing_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Indexing Sweep ---");
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut sum_failures = 0;
    let mut order_failures = 0;
    let mut dual_failures = 0;
    let runs = 500;

    for _ in 0..runs {
        let width: f64 = rng.gen_range(300.0..8000.0);
        let width = (width * 10.0).round() / 10.0;
        let count = if rng.gen_bool(0.5) {
            default_column_count(width)
        } else {
            rng.gen_range(1..16)
        };
        let Ok(idx) = index_span(rng.gen_range(0.0..60.0), width, count, None) else {
            sum_failures += 1;
            continue;
        };
        let sum: f64 = idx.slot_widths.iter().sum();
        if (sum - width).abs() > 0.1 {
            sum_failures += 1;
            if verbose {
                println!("  width {width} / {count}: sum {sum}");
            }
        }
        if idx.boundaries.windows(2).any(|b| b[1] <= b[0]) {
            order_failures += 1;
        }
        if idx.dual_positions.len() + 1 != idx.column_count {
            dual_failures += 1;
        }
    }

    vec![
        TestResult::new(
            "indexing_sum_matches_width",
            sum_failures == 0,
            format!("{sum_failures}/{runs} failures"),
        ),
        TestResult::new(
            "indexing_boundaries_increase",
            order_failures == 0,
            format!("{order_failures}/{runs} failures"),
        ),
        TestResult::new(
            "indexing_dual_count",
            dual_failures == 0,
            format!("{dual_failures}/{runs} failures"),
        ),
    ]
}

// ── 3. Zone sweep ───────────────────────────────────────────────────────

fn validate_zone_sweep(_verbose: bool) -> Vec<TestResult> {
    println!("--- Zone Sweep ---");
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let mut partition_failures = 0;
    let mut straddle_failures = 0;
    let mut layout_errors = 0;
    let runs = 300;

    for _ in 0..runs {
        let width = rng.gen_range(1800.0..6000.0_f64).round();
        let dropped = rng.gen_range(400.0..(width - 1000.0)).round();
        let mut space = SpaceConfig {
            width,
            ..SpaceConfig::default()
        };
        space.dropped_ceiling = Some(DroppedCeiling {
            enabled: true,
            position: if rng.gen_bool(0.5) { Side::Left } else { Side::Right },
            width: dropped,
            ..DroppedCeiling::default()
        });
        let Ok(layout) = SpaceLayout::derive(&space) else {
            layout_errors += 1;
            continue;
        };
        let total: f64 = layout.zones.zones.iter().map(|z| z.outer_width).sum();
        if (total - width).abs() > 1e-9 {
            partition_failures += 1;
        }
        for zone in &layout.zones.zones {
            if zone.slots.start_x < zone.outer_start - 1e-9
                || zone.slots.end_x() > zone.outer_end() + 0.1
            {
                straddle_failures += 1;
            }
        }
    }

    vec![
        TestResult::new(
            "zones_derive",
            layout_errors == 0,
            format!("{layout_errors}/{runs} layout errors"),
        ),
        TestResult::new(
            "zones_partition_width",
            partition_failures == 0,
            format!("{partition_failures}/{runs} failures"),
        ),
        TestResult::new(
            "zones_slots_inside_zone",
            straddle_failures == 0,
            format!("{straddle_failures} slots straddle a zone boundary"),
        ),
    ]
}

// ── 4. Column sweep ─────────────────────────────────────────────────────

fn validate_column_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Column Sweep ---");
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    let mut negative_width = 0;
    let mut depth_mismatch = 0;
    let mut dual_in_column = 0;
    let mut checked = 0;

    let catalog = StaticCatalog::new(vec![ModuleSpec {
        id: "dual-wardrobe".into(),
        category: Default::default(),
        width: 1000.0,
        height: 2000.0,
        depth: 580.0,
        is_dual: true,
    }]);

    for run in 0..200 {
        let mut space = flush_space(3000.0, 6);
        for i in 0..rng.gen_range(1..4) {
            let width = rng.gen_range(80.0..700.0_f64).round();
            let depth = rng.gen_range(100.0..900.0_f64).round();
            let x = rng.gen_range(0.0..3000.0_f64).round();
            space
                .columns
                .push(Column::new(format!("c{run}-{i}"), x, width, depth, 2400.0));
        }
        let Ok(ctx) = EditContext::new(&space, &[], &catalog) else {
            continue;
        };
        for info in &ctx.layout.column_slots {
            let Some(intrusion) = &info.intrusion else {
                continue;
            };
            checked += 1;
            let b = furniture_bounds(info.bounds, Some(intrusion), None);
            if b.render_width < 0.0 {
                negative_width += 1;
            }
            if intrusion.method == ProcessingMethod::DepthAdjustment
                && b.adjusted_depth != Some(adjusted_depth(intrusion.column.depth))
            {
                depth_mismatch += 1;
            }
            let dual = PlacedModule {
                zone: Some(ZoneKind::Normal),
                is_dual_slot: true,
                ..PlacedModule::new("d", "dual-wardrobe")
            };
            for start in [info.local_index.saturating_sub(1), info.local_index] {
                if resolve_placement(&ctx, &dual, Target::new(ZoneKind::Normal, start)).is_ok() {
                    dual_in_column += 1;
                    if verbose {
                        println!("  dual accepted at {start} next to column slot {}", info.local_index);
                    }
                }
            }
        }
    }

    vec![
        TestResult::new(
            "columns_render_width_non_negative",
            negative_width == 0,
            format!("{negative_width}/{checked} negative"),
        ),
        TestResult::new(
            "columns_depth_adjustment",
            depth_mismatch == 0,
            format!("{depth_mismatch}/{checked} mismatched depths"),
        ),
        TestResult::new(
            "columns_block_dual",
            dual_in_column == 0,
            format!("{dual_in_column} dual placements touched a column slot"),
        ),
    ]
}

// ── 5. Scenarios ────────────────────────────────────────────────────────

fn scenario_catalog() -> StaticCatalog {
    let spec = |id: &str, width: f64, is_dual: bool| ModuleSpec {
        id: id.into(),
        category: Default::default(),
        width,
        height: 2000.0,
        depth: 580.0,
        is_dual,
    };
    StaticCatalog::new(vec![
        spec("single-wardrobe", 500.0, false),
        spec("dual-wardrobe", 1000.0, true),
    ])
}

fn validate_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();
    let catalog = scenario_catalog();

    // Plain 3000mm space, 6 slots, dual at slot 0.
    let space = flush_space(3000.0, 6);
    match EditContext::new(&space, &[], &catalog) {
        Ok(ctx) => {
            let placed =
                place_new_module(&ctx, "d", "dual-wardrobe", Target::new(ZoneKind::Normal, 0));
            let x = placed.as_ref().map(|m| m.position.x);
            results.push(TestResult::new(
                "scenario_dual_centre",
                x == Ok(500.0),
                format!("dual centre {x:?}"),
            ));
        }
        Err(e) => results.push(TestResult::new("scenario_dual_centre", false, e.to_string())),
    }

    // 300mm-deep column inside slot 2.
    let mut space = flush_space(3000.0, 6);
    space
        .columns
        .push(Column::new("col", 1250.0, 300.0, 300.0, 2400.0));
    match EditContext::new(&space, &[], &catalog) {
        Ok(ctx) => {
            let placed =
                place_new_module(&ctx, "s", "single-wardrobe", Target::new(ZoneKind::Normal, 2));
            let ok = placed.as_ref().is_ok_and(|m| {
                m.custom_depth == Some(430.0)
                    && m.adjusted_width == Some(500.0)
                    && m.position.x == 1250.0
            });
            results.push(TestResult::new(
                "scenario_column_c",
                ok,
                format!("{placed:?}"),
            ));
        }
        Err(e) => results.push(TestResult::new("scenario_column_c", false, e.to_string())),
    }

    // Dropped zone on the left; dual crosses into a normal zone with one free slot.
    let mut space = flush_space(3000.0, 4);
    space.dropped_ceiling = Some(DroppedCeiling {
        enabled: true,
        position: Side::Left,
        width: 900.0,
        column_count: Some(3),
        ..DroppedCeiling::default()
    });
    let module = |id: &str, module_id: &str, zone, slot| PlacedModule {
        zone: Some(zone),
        slot_index: Some(slot),
        is_dual_slot: module_id.starts_with("dual-"),
        ..PlacedModule::new(id, module_id)
    };
    let mut modules = vec![
        module("dual", "dual-wardrobe", ZoneKind::Dropped, 1),
        module("n1", "single-wardrobe", ZoneKind::Normal, 1),
    ];
    match EditContext::new(&space, &modules, &catalog) {
        Ok(ctx) => {
            let normal_start = ctx
                .layout
                .zones
                .zone(ZoneKind::Normal)
                .map(|z| (z.slots.start_x, z.slots.end_x()));
            results.push(TestResult::new(
                "scenario_normal_zone_span",
                normal_start == Some((900.0, 3000.0)),
                format!("{normal_start:?}"),
            ));
            let u = resolve_placement(&ctx, &modules[0], Target::new(ZoneKind::Normal, 0));
            let converted = u
                .as_ref()
                .is_ok_and(|u| !u.is_dual_slot && u.module_id == "single-wardrobe");
            results.push(TestResult::new(
                "scenario_cross_zone_convert",
                converted,
                format!("{u:?}"),
            ));
        }
        Err(e) => results.push(TestResult::new("scenario_cross_zone", false, e.to_string())),
    }

    modules.push(module("n0", "single-wardrobe", ZoneKind::Normal, 0));
    if let Ok(ctx) = EditContext::new(&space, &modules, &catalog) {
        let u = resolve_placement(&ctx, &modules[0], Target::new(ZoneKind::Normal, 0));
        results.push(TestResult::new(
            "scenario_cross_zone_reject",
            u == Err(PlacementRejection::ConversionFailed { slot: 0 }),
            format!("{u:?}"),
        ));
    }

    results
}

// ── 6. Editing flows ────────────────────────────────────────────────────

fn validate_editing(_verbose: bool) -> Vec<TestResult> {
    println!("--- Editing Flows ---");
    let mut results = Vec::new();
    let fixture = match load_fixture() {
        Ok(f) => f,
        Err(e) => {
            results.push(TestResult::new("editing_fixture", false, e));
            return results;
        }
    };
    let catalog = StaticCatalog::new(fixture.catalog);
    let space = fixture.space;
    let modules = fixture.modules;

    let Ok(ctx) = EditContext::new(&space, &modules, &catalog) else {
        results.push(TestResult::new("editing_context", false, "layout failed"));
        return results;
    };

    // Keyboard: drawer in the dropped zone steps right, then hits the zone edge.
    let mut keys = KeyboardNavController::new();
    keys.enter_edit_mode("m5");
    let first = keys.handle_key(&ctx, Key::ArrowRight);
    let moved_to = match &first {
        KeyOutcome::Moved(u) => u.slot_index,
        _ => None,
    };
    results.push(TestResult::new(
        "keyboard_smart_skip",
        moved_to == Some(1),
        format!("{first:?}"),
    ));
    let left = keys.handle_key(&ctx, Key::ArrowLeft);
    results.push(TestResult::new(
        "keyboard_zone_edge",
        left == KeyOutcome::Stayed,
        format!("{left:?}"),
    ));

    // Drag: dual wardrobe into the dropped zone (2 slots, one taken) converts.
    let mut drag = DragController::new();
    drag.begin(&modules[0]);
    let outcome = drag.pointer_move(&ctx, &WorldXPicker, &3300.0);
    let converted = matches!(&outcome, DragOutcome::Updated(u) if !u.is_dual_slot && u.zone == Some(ZoneKind::Dropped));
    results.push(TestResult::new(
        "drag_cross_zone_convert",
        converted,
        format!("{outcome:?}"),
    ));
    let cancelled = drag.cancel();
    let restored = matches!(&cancelled, DragOutcome::Cancelled(u) if u.is_dual_slot && u.slot_index == Some(0));
    results.push(TestResult::new(
        "drag_cancel_restores",
        restored,
        format!("{cancelled:?}"),
    ));

    // A deep column added under the dual wardrobe forces its removal.
    let mut changed = space.clone();
    changed
        .columns
        .push(Column::new("col-deep", 400.0, 200.0, 800.0, 2400.0));
    if let Ok(ctx) = EditContext::new(&changed, &modules, &catalog) {
        let actions = reconcile_columns(&ctx);
        let removes_dual = actions
            .iter()
            .any(|a| matches!(a, ReconcileAction::RemoveDual { id } if id == "m1"));
        results.push(TestResult::new(
            "reconcile_removes_dual",
            removes_dual,
            format!("{actions:?}"),
        ));
    }

    results
}
