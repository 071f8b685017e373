use approx::relative_eq;
use cartesian_chart::core::{
    AxisMeasurement, AxisPosition, ChartValues, Entry, EntryModel,
    HorizontalDimensionsAccumulator, HorizontalLayout, Point, Rect, VirtualLayout,
};
use cartesian_chart::interaction::{
    EntryLocationMap, MarkerEntryModel, ScrollState, ZoomConfig, ZoomState,
};
use cartesian_chart::render::Color;
use proptest::prelude::*;

fn base_step() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.25), Just(0.5), Just(1.0), Just(2.0), Just(5.0)]
}

proptest! {
    #[test]
    fn resolved_step_aligns_every_entry(
        start in -1_000i32..1_000,
        base in base_step(),
        gaps in prop::collection::vec(1u32..6, 1..40)
    ) {
        let mut x = f64::from(start) * base;
        let mut entries = vec![Entry::new(x, 0.0)];
        for gap in gaps {
            x += f64::from(gap) * base;
            entries.push(Entry::new(x, f64::from(gap)));
        }
        let model = EntryModel::single(1, entries).expect("valid dataset");
        let values = ChartValues::resolve(&model, None, None).expect("resolvable");

        prop_assert!(values.x_step > 0.0);
        prop_assert!(values.x_step >= base * (1.0 - 1e-9));
        for entry in &model.series()[0] {
            prop_assert!(values.x_spacing_multiplier(entry.x).is_ok());
        }
    }

    #[test]
    fn scroll_value_never_leaves_its_range(
        max in 0.0f64..2_000.0,
        deltas in prop::collection::vec(-800.0f64..800.0, 1..30)
    ) {
        let mut state = ScrollState::default();
        state.set_max_value(max);
        for delta in deltas {
            let before = state.value();
            let expected = (before + delta).clamp(0.0, max);

            let mut absolute = state.clone();
            absolute.scroll_to(expected);
            let outcome = state.scroll_by(delta);

            prop_assert!((0.0..=max).contains(&state.value()));
            prop_assert!(relative_eq!(state.value(), absolute.value(), epsilon = 1e-9));
            prop_assert!(relative_eq!(
                outcome.consumed + outcome.unconsumed,
                delta,
                epsilon = 1e-9
            ));
        }
    }

    #[test]
    fn zoom_gesture_keeps_the_centroid_anchored(
        centroid_x in 0.0f64..400.0,
        scroll in 0.0f64..1_000.0,
        content_left in 0.0f64..60.0,
        change in 0.5f64..1.8
    ) {
        let mut zoom = ZoomState::new(ZoomConfig::default());
        let before = zoom.factor();
        let delta = zoom
            .on_zoom_gesture(centroid_x, change, scroll, content_left)
            .expect("factor stays within bounds");
        let after = zoom.factor();

        let content_x_before = (scroll + centroid_x - content_left) / before;
        let content_x_after = (scroll + delta + centroid_x - content_left) / after;
        prop_assert!((content_x_before - content_x_after).abs() < 1.0);
        prop_assert!(zoom.was_overridden());
    }

    #[test]
    fn shrinking_extent_only_pulls_the_value_down(
        value in 0.0f64..500.0,
        new_max in 0.0f64..500.0
    ) {
        let mut state = ScrollState::default();
        state.set_max_value(500.0);
        state.scroll_to(value);
        state.set_max_value(new_max);
        prop_assert!(relative_eq!(state.value(), value.min(new_max), epsilon = 1e-9));
    }

    #[test]
    fn hit_resolution_is_deterministic(
        xs in prop::collection::vec(0.0f64..1_000.0, 1..50),
        touch_x in -100.0f64..1_100.0
    ) {
        let mut map = EntryLocationMap::default();
        for (index, x) in xs.iter().enumerate() {
            map.insert(MarkerEntryModel {
                location: Point::new(*x, 10.0),
                entry: Entry::new(index as f64, 0.0),
                series_index: index % 3,
                index,
                color: Color::BLACK,
            });
        }
        let bounds = Rect::new(-200.0, 0.0, 1_200.0, 100.0);
        let touch = Point::new(touch_x, 50.0);

        let first = map.closest_marker_entries(touch, bounds).expect("non-empty map");
        let second = map.closest_marker_entries(touch, bounds).expect("non-empty map");
        prop_assert_eq!(&first, &second);

        let nearest = xs
            .iter()
            .map(|x| (x - touch_x).abs())
            .fold(f64::INFINITY, f64::min);
        prop_assert!(((first[0].location.x - touch_x).abs() - nearest).abs() <= 1e-9);
    }

    #[test]
    fn layout_round_trip_reproduces_x_spacing(
        count in 2usize..200,
        surface_width in 120.0f64..3_000.0,
        start_axis in 0.0f64..60.0,
        label_overflow in 0.0f64..20.0,
        full_width in any::<bool>()
    ) {
        let entries = (0..count).map(|i| Entry::new(i as f64, 1.0)).collect();
        let model = EntryModel::single(1, entries).expect("valid dataset");
        let values = ChartValues::resolve(&model, None, None).expect("resolvable");
        let horizontal_layout = if full_width {
            HorizontalLayout::full_width()
        } else {
            HorizontalLayout::Segmented
        };
        let axes = [
            AxisMeasurement::new(AxisPosition::Start, start_axis),
            AxisMeasurement {
                start_overflow: label_overflow,
                end_overflow: label_overflow,
                ..AxisMeasurement::new(AxisPosition::Bottom, 20.0)
            },
        ];
        let composer = VirtualLayout::new(horizontal_layout);

        let layout = composer
            .set_bounds(
                Rect::new(0.0, 0.0, surface_width, 200.0),
                &axes,
                0.0,
                HorizontalDimensionsAccumulator::default(),
                &values,
                count,
            )
            .expect("content to lay out");
        let content_width = layout.content_bounds.width();
        prop_assert!(relative_eq!(
            layout.dimensions.content_width(&values, 1.0),
            content_width,
            max_relative = 1e-9
        ));

        // Lay out again on a surface sized from the derived content bounds.
        let rederived = composer
            .set_bounds(
                Rect::new(0.0, 0.0, start_axis + content_width, 200.0),
                &axes,
                0.0,
                HorizontalDimensionsAccumulator::default(),
                &values,
                count,
            )
            .expect("content to lay out");
        prop_assert!(relative_eq!(
            rederived.content_bounds.width(),
            content_width,
            max_relative = 1e-9
        ));
        prop_assert!(relative_eq!(
            rederived.dimensions.x_spacing,
            layout.dimensions.x_spacing,
            max_relative = 1e-9
        ));
    }
}

#[test]
fn growing_extent_keeps_the_scroll_value() {
    let mut state = ScrollState::default();
    state.set_max_value(180.0);
    state.scroll_to(150.0);
    state.set_max_value(200.0);
    assert_eq!(state.value(), 150.0);
    assert_eq!(state.max_value(), 200.0);
}
