use cartesian_chart::api::{ChartEngine, ChartEngineConfig};
use cartesian_chart::chart::{Axis, ColumnChart};
use cartesian_chart::core::{
    AxisMeasurement, AxisPosition, ChartValues, Entry, EntryModel,
    HorizontalDimensionsAccumulator, HorizontalLayout, Point, Rect, VirtualLayout,
};
use cartesian_chart::interaction::{EntryLocationMap, MarkerEntryModel};
use cartesian_chart::render::{Color, NullRenderer};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn sawtooth(id: u64, count: usize) -> EntryModel {
    let entries = (0..count)
        .map(|i| Entry::new(i as f64 * 0.5, (i % 37) as f64))
        .collect();
    EntryModel::single(id, entries).expect("valid generated dataset")
}

fn bench_values_resolution_10k(c: &mut Criterion) {
    let model = sawtooth(1, 10_000);

    c.bench_function("values_resolution_10k", |b| {
        b.iter(|| {
            let _ = ChartValues::resolve(black_box(&model), None, None)
                .expect("resolution should succeed");
        })
    });
}

fn bench_layout_set_bounds(c: &mut Criterion) {
    let model = sawtooth(1, 2_000);
    let values = ChartValues::resolve(&model, None, None).expect("resolvable");
    let surface = Rect::new(0.0, 0.0, 1_600.0, 900.0);
    let measurements = [
        AxisMeasurement::new(AxisPosition::Start, 48.0),
        AxisMeasurement::new(AxisPosition::Bottom, 24.0),
    ];

    c.bench_function("layout_set_bounds_2k", |b| {
        b.iter(|| {
            let _ = VirtualLayout::new(HorizontalLayout::Segmented)
                .set_bounds(
                    black_box(surface),
                    black_box(&measurements),
                    0.0,
                    HorizontalDimensionsAccumulator::default(),
                    &values,
                    model.entry_count(),
                )
                .expect("layout should fit");
        })
    });
}

fn bench_closest_entry_10k(c: &mut Criterion) {
    let mut map = EntryLocationMap::default();
    for index in 0..10_000 {
        map.insert(MarkerEntryModel {
            location: Point::new(index as f64 * 3.0, 50.0),
            entry: Entry::new(index as f64, 1.0),
            series_index: 0,
            index,
            color: Color::BLACK,
        });
    }

    c.bench_function("closest_entry_10k", |b| {
        b.iter(|| {
            let _ = map.closest(black_box(14_999.4));
        })
    });
}

fn bench_engine_render_2k(c: &mut Criterion) {
    let mut engine = ChartEngine::new(
        NullRenderer::new(1_600, 900),
        ColumnChart::default(),
        ChartEngineConfig::default(),
    )
    .expect("engine init");
    engine.add_axis(Axis::start()).expect("add axis");
    engine.add_axis(Axis::bottom()).expect("add axis");
    engine.set_model(sawtooth(1, 2_000)).expect("set model");

    c.bench_function("engine_render_2k", |b| {
        b.iter(|| {
            let _ = engine.render().expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_values_resolution_10k,
    bench_layout_set_bounds,
    bench_closest_entry_10k,
    bench_engine_render_2k
);
criterion_main!(benches);
