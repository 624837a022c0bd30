//! Integration tests for the full placement pipeline.
//!
//! Exercises: SpaceConfig → ZoneLayout → column analysis → availability
//! → resolution → drag / keyboard controllers
//!
//! All tests are pure logic — no renderer, no store.

use wardrobe_logic::availability::{
    find_next_available_slot, is_slot_available, Candidate, Direction,
};
use wardrobe_logic::column_slots::{ColumnType, ProcessingMethod};
use wardrobe_logic::drag::{DragController, DragOutcome, WorldXPicker};
use wardrobe_logic::keyboard::{Key, KeyOutcome, KeyboardNavController};
use wardrobe_logic::layout::SpaceLayout;
use wardrobe_logic::modules::{
    ModuleCatalog, ModuleCategory, ModuleSpec, PlacedModule, StaticCatalog,
};
use wardrobe_logic::placement::{
    place_new_module, resolve_placement, EditContext, PlacementRejection, Target,
};
use wardrobe_logic::space::{Column, DroppedCeiling, GapConfig, Side, SpaceConfig, SurroundType};
use wardrobe_logic::zones::ZoneKind;

// ── Helpers ────────────────────────────────────────────────────────────

/// Built-in, no-surround space with flush sides so slots tile the full width.
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

fn dropped_left(mut space: SpaceConfig, width: f64, slots: u32) -> SpaceConfig {
    space.dropped_ceiling = Some(DroppedCeiling {
        enabled: true,
        position: Side::Left,
        width,
        column_count: Some(slots),
        ..DroppedCeiling::default()
    });
    space
}

fn spec(id: &str, category: ModuleCategory, width: f64, height: f64) -> ModuleSpec {
    ModuleSpec {
        id: id.to_string(),
        category,
        width,
        height,
        depth: 580.0,
        is_dual: id.starts_with("dual-"),
    }
}

fn catalog() -> StaticCatalog {
    StaticCatalog::new(vec![
        spec("single-wardrobe", ModuleCategory::General, 500.0, 2000.0),
        spec("dual-wardrobe", ModuleCategory::General, 1000.0, 2000.0),
        spec("dual-shelf", ModuleCategory::General, 1000.0, 1800.0),
        spec("single-tall", ModuleCategory::General, 500.0, 2200.0),
        spec("single-ceiling", ModuleCategory::General, 500.0, 2300.0),
        spec("single-upper", ModuleCategory::Upper, 500.0, 600.0),
        spec("single-lower", ModuleCategory::Lower, 500.0, 800.0),
    ])
}

fn placed(id: &str, module_id: &str, zone: ZoneKind, slot: usize) -> PlacedModule {
    PlacedModule {
        zone: Some(zone),
        slot_index: Some(slot),
        is_dual_slot: module_id.starts_with("dual-"),
        ..PlacedModule::new(id, module_id)
    }
}

// ── Indexing invariants ────────────────────────────────────────────────

#[test]
fn slot_widths_sum_to_cavity() {
    for width in [1200.0, 2400.0, 2999.0, 3600.0, 4870.0] {
        for surround in [SurroundType::Surround, SurroundType::NoSurround] {
            let space = SpaceConfig {
                width,
                surround_type: surround,
                ..SpaceConfig::default()
            };
            let layout = SpaceLayout::derive(&space).unwrap();
            let slots = &layout.zones.zones[0].slots;
            let sum: f64 = slots.slot_widths.iter().sum();
            assert!(
                (sum - space.internal_width()).abs() <= 0.1,
                "width {width} {surround:?}: {sum} vs {}",
                space.internal_width()
            );
            for i in 0..slots.column_count {
                assert_eq!(slots.boundaries[i + 1], slots.boundaries[i] + slots.slot_widths[i]);
            }
        }
    }
}

#[test]
fn zone_outer_widths_sum_to_total() {
    for (width, dropped) in [(3000.0, 900.0), (3600.0, 1200.0), (2400.0, 600.0)] {
        for position in [Side::Left, Side::Right] {
            let mut space = flush_space(width, 4);
            space.dropped_ceiling = Some(DroppedCeiling {
                enabled: true,
                position,
                width: dropped,
                ..DroppedCeiling::default()
            });
            let layout = SpaceLayout::derive(&space).unwrap();
            let total: f64 = layout.zones.zones.iter().map(|z| z.outer_width).sum();
            assert_eq!(total, width);
        }
    }
}

// ── Scenario 1: plain 3000mm space ─────────────────────────────────────

#[test]
fn scenario_even_slots_and_dual_centre() {
    let space = flush_space(3000.0, 6);
    let cat = catalog();
    let ctx = EditContext::new(&space, &[], &cat).unwrap();
    let slots = &ctx.layout.zones.zones[0].slots;
    assert_eq!(slots.slot_widths, vec![500.0; 6]);

    let m = place_new_module(&ctx, "d1", "dual-wardrobe", Target::new(ZoneKind::Normal, 0))
        .unwrap();
    let expected = (slots.positions[0] + slots.positions[1]) / 2.0;
    assert_eq!(m.position.x, expected);
    assert_eq!(m.position.x, 500.0);
    assert!(m.is_dual_slot);
    assert_eq!(m.adjusted_width, None);
}

// ── Scenario 2: Column C inside slot 2 ─────────────────────────────────

#[test]
fn scenario_column_c_depth_adjustment() {
    let mut space = flush_space(3000.0, 6);
    space.columns.push(Column::new("col", 1250.0, 300.0, 300.0, 2400.0));
    let cat = catalog();
    let ctx = EditContext::new(&space, &[], &cat).unwrap();

    let info = ctx.layout.column_info(ZoneKind::Normal, 2).unwrap();
    let intrusion = info.intrusion.as_ref().unwrap();
    assert_eq!(intrusion.column_type, ColumnType::Medium);
    assert_eq!(intrusion.method, ProcessingMethod::DepthAdjustment);

    let m = place_new_module(&ctx, "s1", "single-wardrobe", Target::new(ZoneKind::Normal, 2))
        .unwrap();
    assert_eq!(m.custom_depth, Some(430.0));
    assert_eq!(m.adjusted_width, Some(500.0));
    assert_eq!(m.position.x, 1250.0);
    assert_eq!(m.adjusted_position.map(|p| p.x), Some(1250.0));
}

// ── Scenario 3: dual crossing from dropped into normal zone ────────────

fn cross_zone_space() -> SpaceConfig {
    // Dropped zone [0, 900] with 3 slots; normal zone [900, 3000] with 4.
    dropped_left(flush_space(3000.0, 4), 900.0, 3)
}

#[test]
fn scenario_normal_zone_span() {
    let space = cross_zone_space();
    let layout = SpaceLayout::derive(&space).unwrap();
    let normal = layout.zones.zone(ZoneKind::Normal).unwrap();
    assert_eq!(normal.slots.start_x, 900.0);
    assert_eq!(normal.slots.end_x(), 3000.0);
    assert_eq!(normal.slots.slot_widths, vec![525.0; 4]);
}

#[test]
fn scenario_dual_converts_to_single_across_zones() {
    let space = cross_zone_space();
    let cat = catalog();
    let modules = vec![
        placed("dual", "dual-wardrobe", ZoneKind::Dropped, 1),
        placed("n1", "single-wardrobe", ZoneKind::Normal, 1),
        placed("n2", "single-wardrobe", ZoneKind::Normal, 2),
        placed("n3", "single-wardrobe", ZoneKind::Normal, 3),
    ];
    let ctx = EditContext::new(&space, &modules, &cat).unwrap();

    let mut drag = DragController::new();
    drag.begin(&modules[0]);
    let update = match drag.pointer_move(&ctx, &WorldXPicker, &1000.0) {
        DragOutcome::Updated(u) => u,
        other => panic!("expected conversion, got {other:?}"),
    };
    assert_eq!(update.module_id, "single-wardrobe");
    assert!(!update.is_dual_slot);
    assert_eq!(update.zone, Some(ZoneKind::Normal));
    assert_eq!(update.slot_index, Some(0));
    assert_eq!(update.position.x, 900.0 + 262.5);
    assert_eq!(update.custom_width, Some(525.0));
}

#[test]
fn scenario_dual_rejected_when_single_slot_taken() {
    let space = cross_zone_space();
    let cat = catalog();
    let modules = vec![
        placed("dual", "dual-wardrobe", ZoneKind::Dropped, 1),
        placed("n0", "single-wardrobe", ZoneKind::Normal, 0),
        placed("n2", "single-wardrobe", ZoneKind::Normal, 2),
    ];
    let ctx = EditContext::new(&space, &modules, &cat).unwrap();

    let mut drag = DragController::new();
    drag.begin(&modules[0]);
    assert_eq!(
        drag.pointer_move(&ctx, &WorldXPicker, &1000.0),
        DragOutcome::Rejected(PlacementRejection::ConversionFailed { slot: 0 })
    );
    // Cancelling puts the dual back in the dropped zone.
    match drag.cancel() {
        DragOutcome::Cancelled(u) => {
            assert_eq!(u.zone, Some(ZoneKind::Dropped));
            assert!(u.is_dual_slot);
        }
        other => panic!("expected cancel, got {other:?}"),
    }
}

#[test]
fn dual_stays_dual_when_target_zone_has_room() {
    let space = cross_zone_space();
    let cat = catalog();
    let modules = vec![placed("dual", "dual-wardrobe", ZoneKind::Dropped, 1)];
    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    let u = resolve_placement(&ctx, &modules[0], Target::new(ZoneKind::Normal, 2)).unwrap();
    assert!(u.is_dual_slot);
    assert_eq!(u.module_id, "dual-wardrobe");
    assert_eq!(u.position.x, 900.0 + 1050.0 + 525.0);
}

#[test]
fn missing_single_variant_is_derived() {
    let space = cross_zone_space();
    let cat = catalog();
    let modules = vec![
        placed("dual", "dual-shelf", ZoneKind::Dropped, 0),
        placed("n1", "single-wardrobe", ZoneKind::Normal, 1),
    ];
    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    assert!(cat.get("single-shelf").is_none());
    let u = resolve_placement(&ctx, &modules[0], Target::new(ZoneKind::Normal, 0)).unwrap();
    assert_eq!(u.module_id, "single-shelf");
    assert!(!u.is_dual_slot);
}

#[test]
fn dropped_zone_clamps_height() {
    let space = cross_zone_space();
    let cat = catalog();
    let ctx = EditContext::new(&space, &[], &cat).unwrap();
    // Limit is the room height under the drop: 2400 - 200 = 2200.
    let tall = place_new_module(&ctx, "t", "single-tall", Target::new(ZoneKind::Dropped, 0))
        .unwrap();
    assert_eq!(tall.position.y, 65.0 + 2200.0 / 2.0);
    let over = place_new_module(&ctx, "c", "single-ceiling", Target::new(ZoneKind::Dropped, 1))
        .unwrap();
    assert_eq!(over.position.y, 65.0 + 2200.0 / 2.0);
    // The normal zone takes the full height.
    let normal = place_new_module(&ctx, "n", "single-ceiling", Target::new(ZoneKind::Normal, 0))
        .unwrap();
    assert_eq!(normal.position.y, 65.0 + 2300.0 / 2.0);
}

#[test]
fn dual_leaving_last_dropped_slot_lands_in_single_free_slot() {
    // Dropped zone [0, 900] with 4 slots of 225; the dual covers slots 2 and 3.
    let space = dropped_left(flush_space(3000.0, 4), 900.0, 4);
    let cat = catalog();
    let mut modules = vec![
        placed("dual", "dual-wardrobe", ZoneKind::Dropped, 2),
        placed("n1", "single-wardrobe", ZoneKind::Normal, 1),
        placed("n2", "single-wardrobe", ZoneKind::Normal, 2),
        placed("n3", "single-wardrobe", ZoneKind::Normal, 3),
    ];
    {
        let layout = SpaceLayout::derive(&space).unwrap();
        let last = layout.slot_count(ZoneKind::Dropped) - 1;
        assert_eq!(modules[0].occupied_slots().last(), Some(&last));
    }

    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    let mut drag = DragController::new();
    drag.begin(&modules[0]);
    match drag.pointer_move(&ctx, &WorldXPicker, &1000.0) {
        DragOutcome::Updated(u) => {
            assert_eq!(u.module_id, "single-wardrobe");
            assert!(!u.is_dual_slot);
            assert_eq!(u.zone, Some(ZoneKind::Normal));
            assert_eq!(u.slot_index, Some(0));
        }
        other => panic!("expected conversion, got {other:?}"),
    }
    assert_eq!(drag.pointer_up(), DragOutcome::Committed { id: "dual".to_string() });

    // Same move with the last normal slot also taken is refused.
    modules.push(placed("n0", "single-wardrobe", ZoneKind::Normal, 0));
    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    let mut drag = DragController::new();
    drag.begin(&modules[0]);
    assert_eq!(
        drag.pointer_move(&ctx, &WorldXPicker, &1000.0),
        DragOutcome::Rejected(PlacementRejection::ConversionFailed { slot: 0 })
    );
}

// ── Split-eligible column slots ────────────────────────────────────────

/// Slot 2 of five 600mm slots is [1200, 1800]; a 300mm-deep column sits at its centre.
fn split_slot_space(column_width: f64) -> SpaceConfig {
    let mut space = flush_space(3000.0, 5);
    space
        .columns
        .push(Column::new("col", 1500.0, column_width, 300.0, 2400.0));
    space
}

fn render_span(m: &PlacedModule) -> (f64, f64) {
    let x = m.adjusted_position.map_or(m.position.x, |p| p.x);
    let w = m.adjusted_width.or(m.custom_width).unwrap_or(0.0);
    (x - w / 2.0, x + w / 2.0)
}

#[test]
fn two_singles_share_split_slot_without_overlap() {
    // 100mm column leaves 250mm each side.
    let space = split_slot_space(100.0);
    let cat = catalog();
    let target = Target::new(ZoneKind::Normal, 2);
    let mut modules = Vec::new();

    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    assert!(ctx.layout.column_info(ZoneKind::Normal, 2).unwrap().allows_multiple());
    let a = place_new_module(&ctx, "a", "single-wardrobe", target).unwrap();
    modules.push(a);

    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    let b = place_new_module(&ctx, "b", "single-wardrobe", target).unwrap();
    modules.push(b);

    let (a, b) = (render_span(&modules[0]), render_span(&modules[1]));
    assert_eq!(a, (1552.0, 1800.0));
    assert_eq!(b, (1200.0, 1448.0));
    assert!(a.0 >= b.1 || b.0 >= a.1, "bodies overlap: {a:?} {b:?}");
    assert_eq!(modules[0].hinge_position, Side::Right);
    assert_eq!(modules[1].hinge_position, Side::Left);

    // Both remainders are taken now.
    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    assert_eq!(
        place_new_module(&ctx, "c", "single-wardrobe", target),
        Err(PlacementRejection::Collision {
            zone: ZoneKind::Normal,
            slot: 2
        })
    );
}

#[test]
fn depth_adjusted_body_leaves_no_room_to_share() {
    // 300mm column depth-adjusts; the first body spans the whole slot.
    let space = split_slot_space(300.0);
    let cat = catalog();
    let target = Target::new(ZoneKind::Normal, 2);

    let ctx = EditContext::new(&space, &[], &cat).unwrap();
    assert!(ctx.layout.column_info(ZoneKind::Normal, 2).unwrap().allows_multiple());
    let a = place_new_module(&ctx, "a", "single-wardrobe", target).unwrap();
    assert_eq!(render_span(&a), (1200.0, 1800.0));

    let modules = vec![a];
    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    assert_eq!(
        place_new_module(&ctx, "b", "single-wardrobe", target),
        Err(PlacementRejection::Collision {
            zone: ZoneKind::Normal,
            slot: 2
        })
    );
}

// ── Availability properties ────────────────────────────────────────────

#[test]
fn availability_is_symmetric() {
    let space = flush_space(3000.0, 6);
    let cat = catalog();
    let layout = SpaceLayout::derive(&space).unwrap();
    let kinds = ["single-wardrobe", "dual-wardrobe", "single-upper", "single-lower"];
    for a_kind in kinds {
        for b_kind in kinds {
            for a_slot in 0..5 {
                for b_slot in 0..5 {
                    let a = placed("a", a_kind, ZoneKind::Normal, a_slot);
                    let b = placed("b", b_kind, ZoneKind::Normal, b_slot);
                    let as_candidate = |m: &PlacedModule| Candidate {
                        zone: ZoneKind::Normal,
                        slot_index: m.slot_index.unwrap_or(0),
                        is_dual: m.is_dual_slot,
                        category: cat.get(&m.module_id).map(|s| s.category).unwrap_or_default(),
                        exclude_id: None,
                    };
                    let b_ok = is_slot_available(
                        &layout,
                        std::slice::from_ref(&a),
                        &cat,
                        &as_candidate(&b),
                    );
                    let a_ok = is_slot_available(
                        &layout,
                        std::slice::from_ref(&b),
                        &cat,
                        &as_candidate(&a),
                    );
                    assert_eq!(a_ok, b_ok, "{a_kind}@{a_slot} vs {b_kind}@{b_slot}");
                }
            }
        }
    }
}

#[test]
fn next_slot_is_none_past_edges() {
    let space = flush_space(3000.0, 6);
    let cat = catalog();
    let layout = SpaceLayout::derive(&space).unwrap();
    let c = Candidate {
        zone: ZoneKind::Normal,
        slot_index: 0,
        is_dual: false,
        category: ModuleCategory::General,
        exclude_id: None,
    };
    assert_eq!(
        find_next_available_slot(&layout, &[], &cat, &c, Direction::Left),
        None
    );
    assert_eq!(
        find_next_available_slot(&layout, &[], &cat, &c.at(5), Direction::Right),
        None
    );
}

// ── Keyboard flow ──────────────────────────────────────────────────────

#[test]
fn keyboard_walks_past_stacked_and_occupied_slots() {
    let space = flush_space(3000.0, 6);
    let cat = catalog();
    let mut modules = vec![
        placed("lower", "single-lower", ZoneKind::Normal, 0),
        placed("upper", "single-upper", ZoneKind::Normal, 1),
        placed("block", "single-lower", ZoneKind::Normal, 1),
        placed("wall", "single-wardrobe", ZoneKind::Normal, 2),
    ];
    let mut keys = KeyboardNavController::new();
    keys.enter_edit_mode("lower");

    // Slot 1 already holds a lower cabinet; slot 2 a full-height unit.
    let outcome = {
        let ctx = EditContext::new(&space, &modules, &cat).unwrap();
        keys.handle_key(&ctx, Key::ArrowRight)
    };
    let update = match outcome {
        KeyOutcome::Moved(u) => u,
        other => panic!("expected move, got {other:?}"),
    };
    assert_eq!(update.slot_index, Some(3));
    modules[0].apply(&update);

    let ctx = EditContext::new(&space, &modules, &cat).unwrap();
    match keys.handle_key(&ctx, Key::ArrowLeft) {
        KeyOutcome::Moved(u) => assert_eq!(u.slot_index, Some(0)),
        other => panic!("expected move back, got {other:?}"),
    }
    assert_eq!(keys.handle_key(&ctx, Key::Escape), KeyOutcome::ExitedEditMode);
}
