use cartesian_chart::api::{ChartEngine, ChartEngineConfig};
use cartesian_chart::chart::{ColumnChart, FadingEdges};
use cartesian_chart::core::{AxisValuesOverride, HorizontalLayout};
use cartesian_chart::error::ChartError;
use cartesian_chart::interaction::{
    AutoScaleUp, AutoScrollCondition, ChartScrollSpec, InitialScroll, ZoomConfig,
};
use cartesian_chart::render::NullRenderer;

#[test]
fn config_json_round_trip() {
    let config = ChartEngineConfig::default()
        .with_horizontal_layout(HorizontalLayout::FullWidth {
            scalable_start_padding: 4.0,
            scalable_end_padding: 4.0,
            unscalable_start_padding: 0.0,
            unscalable_end_padding: 12.0,
        })
        .with_scroll(ChartScrollSpec {
            initial_scroll: InitialScroll::End,
            auto_scroll_condition: AutoScrollCondition::OnModelSizeIncreased,
            ..ChartScrollSpec::default()
        })
        .with_auto_scale_up(AutoScaleUp::None)
        .with_fading_edges(FadingEdges::symmetric(24.0))
        .with_values_override(AxisValuesOverride::zero_based_y())
        .with_x_step(0.5);

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let config = ChartEngineConfig::from_json_str("{}").expect("parse");
    assert_eq!(config, ChartEngineConfig::default());
    assert!(config.scroll.is_scroll_enabled);
    assert!(config.zoom.is_zoom_enabled);
    assert_eq!(config.horizontal_layout, HorizontalLayout::Segmented);

    let config = ChartEngineConfig::from_json_str(
        r#"{ "horizontal_layout": { "kind": "full_width", "unscalable_end_padding": 8.0 },
             "scroll": { "initial_scroll": { "kind": "end" } },
             "zoom": { "max_zoom": 4.0 } }"#,
    )
    .expect("parse partial config");
    assert_eq!(
        config.horizontal_layout,
        HorizontalLayout::FullWidth {
            scalable_start_padding: 0.0,
            scalable_end_padding: 0.0,
            unscalable_start_padding: 0.0,
            unscalable_end_padding: 8.0,
        }
    );
    assert_eq!(config.scroll.initial_scroll, InitialScroll::End);
    assert_eq!(config.zoom.max_zoom, 4.0);
    assert_eq!(config.zoom.min_zoom, 0.1);
}

#[test]
fn invalid_sections_are_rejected() {
    let inverted_zoom = ChartEngineConfig::default().with_zoom(ZoomConfig {
        is_zoom_enabled: true,
        min_zoom: 5.0,
        max_zoom: 2.0,
    });
    assert!(matches!(
        inverted_zoom.validate(),
        Err(ChartError::InvalidConfig(_))
    ));

    let negative_duration = ChartEngineConfig::default().with_scroll(ChartScrollSpec {
        auto_scroll_duration_secs: -1.0,
        ..ChartScrollSpec::default()
    });
    assert!(negative_duration.validate().is_err());

    let negative_padding =
        ChartEngineConfig::default().with_horizontal_layout(HorizontalLayout::FullWidth {
            scalable_start_padding: -1.0,
            scalable_end_padding: 0.0,
            unscalable_start_padding: 0.0,
            unscalable_end_padding: 0.0,
        });
    assert!(negative_padding.validate().is_err());

    let zero_step = ChartEngineConfig::default().with_x_step(0.0);
    assert!(
        ChartEngine::new(NullRenderer::default(), ColumnChart::default(), zero_step).is_err()
    );
}

#[test]
fn malformed_json_maps_to_config_error() {
    let err = ChartEngineConfig::from_json_str("{ \"zoom\": 3 }").expect_err("zoom is an object");
    assert!(matches!(err, ChartError::InvalidConfig(message) if message.contains("parse")));

    let err = ChartEngineConfig::from_json_str(r#"{ "zoom": { "min_zoom": 0.0 } }"#)
        .expect_err("zero min zoom");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}
