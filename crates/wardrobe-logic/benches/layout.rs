//! Layout and placement benchmarks.
//!
//! - Layout derivation (zones + column analysis) for growing slot counts
//! - Availability scans over a crowded space
//! - Full move resolution
//!
//! Run with: `cargo bench -p wardrobe-logic`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use wardrobe_logic::availability::{find_next_available_slot, Candidate, Direction};
use wardrobe_logic::layout::SpaceLayout;
use wardrobe_logic::modules::{ModuleCategory, ModuleSpec, PlacedModule, StaticCatalog};
use wardrobe_logic::placement::{resolve_placement, EditContext, Target};
use wardrobe_logic::space::{Column, DroppedCeiling, Side, SpaceConfig};
use wardrobe_logic::zones::ZoneKind;

// ============================================================================
// Fixtures
// ============================================================================

fn space(slots: u32) -> SpaceConfig {
    let width = 600.0 * f64::from(slots) + 900.0;
    SpaceConfig {
        width,
        custom_column_count: Some(slots),
        dropped_ceiling: Some(DroppedCeiling {
            enabled: true,
            position: Side::Right,
            ..DroppedCeiling::default()
        }),
        columns: (0..slots / 4)
            .map(|i| Column::new(format!("c{i}"), 300.0 + 2400.0 * f64::from(i), 300.0, 300.0, 2400.0))
            .collect(),
        ..SpaceConfig::default()
    }
}

fn catalog() -> StaticCatalog {
    StaticCatalog::new(vec![ModuleSpec {
        id: "single-wardrobe".to_string(),
        category: ModuleCategory::General,
        width: 600.0,
        height: 2000.0,
        depth: 580.0,
        is_dual: false,
    }])
}

/// Every other normal-zone slot occupied.
fn crowd(layout: &SpaceLayout) -> Vec<PlacedModule> {
    (0..layout.slot_count(ZoneKind::Normal))
        .step_by(2)
        .map(|i| PlacedModule {
            zone: Some(ZoneKind::Normal),
            slot_index: Some(i),
            ..PlacedModule::new(format!("m{i}"), "single-wardrobe")
        })
        .collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for slots in [6u32, 24, 96] {
        let s = space(slots);
        group.bench_with_input(BenchmarkId::new("derive", slots), &s, |b, s| {
            b.iter(|| SpaceLayout::derive(black_box(s)))
        });
    }
    group.finish();
}

fn bench_availability(c: &mut Criterion) {
    let mut group = c.benchmark_group("availability");
    let s = space(96);
    let cat = catalog();
    let layout = SpaceLayout::derive(&s).expect("bench space is valid");
    let placed = crowd(&layout);
    let candidate = Candidate {
        zone: ZoneKind::Normal,
        slot_index: 0,
        is_dual: true,
        category: ModuleCategory::General,
        exclude_id: None,
    };

    group.bench_function("smart_skip_right_96", |b| {
        b.iter(|| {
            find_next_available_slot(
                &layout,
                black_box(&placed),
                &cat,
                &candidate,
                Direction::Right,
            )
        })
    });
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let s = space(24);
    let cat = catalog();
    let layout = SpaceLayout::derive(&s).expect("bench space is valid");
    let placed = crowd(&layout);
    let ctx = EditContext::new(&s, &placed, &cat).expect("bench space is valid");

    group.bench_function("single_move", |b| {
        b.iter(|| resolve_placement(&ctx, black_box(&placed[0]), Target::new(ZoneKind::Normal, 5)))
    });
    group.finish();
}

criterion_group!(benches, bench_layout, bench_availability, bench_resolve);
criterion_main!(benches);
