use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::chart::{ChartLayer, DrawContext};
use crate::core::{
    AxisMeasurement, ChartLayout, ChartValues, EntryModel, HorizontalDimensionsAccumulator,
    Viewport, VirtualLayout,
};
use crate::error::ChartResult;
use crate::interaction::{EntryLocationMap, MarkerEntries, MarkerTransition, max_scroll_distance};
use crate::render::{RenderFrame, Renderer};

use super::{
    ChartEngine, DrawOutcome, DrawPassState, DrawStats, SkipReason,
    engine_core::{EngineCore, HandledModel},
};

pub(super) struct RenderCoordinator;

/// Everything the drawing half of a pass needs, fixed by the measuring half.
struct MeasuredPass {
    model: Arc<EntryModel>,
    values: ChartValues,
    layout: ChartLayout,
    zoom: f64,
}

enum PassPlan {
    Draw(MeasuredPass),
    Skip(SkipReason),
}

impl RenderCoordinator {
    pub(super) fn render<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<DrawOutcome> {
        engine.drain_input();
        let viewport = engine.renderer.surface_size();

        let plan = measure(&mut engine.core, viewport);
        let pass = match plan {
            Ok(PassPlan::Draw(pass)) => pass,
            Ok(PassPlan::Skip(reason)) => {
                skip(&mut engine.core, reason);
                return Ok(DrawOutcome::Skipped(reason));
            }
            Err(err) => {
                abort(&mut engine.core);
                return Err(err);
            }
        };

        let mut frame = RenderFrame::new(viewport);
        let drawn = draw(&mut engine.core, &mut frame, pass)
            .and_then(|stats| engine.renderer.render(&frame).map(|()| stats));
        match drawn {
            Ok(stats) => Ok(DrawOutcome::Drawn(stats)),
            Err(err) => {
                abort(&mut engine.core);
                warn!(error = %err, "draw pass failed");
                Err(err)
            }
        }
    }
}

fn measure(core: &mut EngineCore, viewport: Viewport) -> ChartResult<PassPlan> {
    core.runtime.state = DrawPassState::Measuring;
    if !viewport.is_valid() {
        return Ok(PassPlan::Skip(SkipReason::EmptySurface));
    }
    let Some(model) = core.data.model.clone() else {
        return Ok(PassPlan::Skip(SkipReason::NoModel));
    };
    if model.is_empty() {
        return Ok(PassPlan::Skip(SkipReason::EmptyContent));
    }

    let values = core
        .data
        .resolve_values(&core.chart, &model, core.config.x_step)?;

    let mut accumulator = HorizontalDimensionsAccumulator::default();
    core.chart
        .update_dimensions(&model, &values, &mut accumulator);

    let horizontal_layout = core.config.horizontal_layout;
    let measurements: Vec<AxisMeasurement> = core
        .parts
        .axes
        .iter()
        .map(|axis| axis.measure(&values, horizontal_layout))
        .collect();
    let surface = viewport.bounds();
    let legend_height = core
        .parts
        .legend
        .as_ref()
        .map_or(0.0, |legend| legend.height(surface.width()));

    let layout = match VirtualLayout::new(horizontal_layout).set_bounds(
        surface,
        &measurements,
        legend_height,
        accumulator,
        &values,
        model.entry_count(),
    ) {
        Ok(layout) => layout,
        Err(empty) => return Ok(PassPlan::Skip(empty.into())),
    };

    let scroll_enabled = core.config.scroll.is_scroll_enabled;
    let zoom = core.session.zoom.resolve_for_pass(
        &layout.dimensions,
        &values,
        layout.content_bounds,
        core.config.auto_scale_up,
        scroll_enabled,
    );
    core.session.scroll.set_max_value(max_scroll_distance(
        &layout.dimensions,
        &values,
        layout.content_bounds,
        zoom,
    ));
    handle_model_change(core, &model, values);

    trace!(
        model_id = model.id(),
        x_spacing = layout.dimensions.x_spacing,
        zoom,
        max_scroll = core.session.scroll.max_value(),
        "measured draw pass"
    );
    Ok(PassPlan::Draw(MeasuredPass {
        model,
        values,
        layout,
        zoom,
    }))
}

/// Initial scroll for the first dataset, auto-scroll for later ones.
fn handle_model_change(core: &mut EngineCore, model: &EntryModel, values: ChartValues) {
    let model_id = model.id();
    let entry_count = model.entry_count();
    let spec = core.config.scroll;
    match core.data.handled {
        Some(handled) if handled.model_id == model_id => return,
        None => {
            core.session
                .scroll
                .handle_initial_scroll(spec.initial_scroll, model_id);
        }
        Some(handled) => {
            let values_changed = !handled.values.same_range(&values);
            if spec.should_auto_scroll(values_changed, handled.entry_count, entry_count) {
                core.session
                    .scroll
                    .start_transition(spec.auto_scroll, spec.auto_scroll_duration_secs);
            }
            core.session.scroll.mark_initial_scroll_handled(model_id);
        }
    }
    core.data.handled = Some(HandledModel {
        model_id,
        values,
        entry_count,
    });
}

/// Returns to `Idle` after a failed pass, dropping the previous pass' layout
/// and entry locations.
fn abort(core: &mut EngineCore) {
    core.runtime.state = DrawPassState::Idle;
    core.runtime.last_layout = None;
    core.runtime.last_locations.clear();
}

fn skip(core: &mut EngineCore, reason: SkipReason) {
    core.runtime.state = DrawPassState::EmptyLayout;
    core.runtime.last_layout = None;
    core.runtime.last_locations.clear();
    debug!(?reason, "skipped draw pass");
}

fn draw(
    core: &mut EngineCore,
    frame: &mut RenderFrame,
    pass: MeasuredPass,
) -> ChartResult<DrawStats> {
    core.runtime.state = DrawPassState::Drawing;
    let MeasuredPass {
        model,
        values,
        layout,
        zoom,
    } = pass;
    let bounds = layout.content_bounds;
    let selected_index = core
        .session
        .resolve_click(&core.runtime.last_locations, &layout);
    let scroll = core.session.scroll.value();
    let max_scroll = core.session.scroll.max_value();
    let mut locations = EntryLocationMap::default();

    let layer = core.config.fading_edges.map(|_| frame.save_layer());
    {
        let mut ctx = DrawContext::new(frame, bounds, values, layout.dimensions, scroll, zoom);
        for axis in &core.parts.axes {
            if let Some(axis_bounds) = layout.axis_bounds(axis.position()) {
                axis.draw_behind_chart(&mut ctx, axis_bounds)?;
            }
        }

        let clip = ctx.frame.save();
        ctx.frame.clip_rect(bounds);
        for decoration in &core.parts.decorations {
            decoration.draw_behind_chart(&mut ctx)?;
        }
        core.chart
            .draw_scrollable(&mut ctx, &model, Some(&mut locations), selected_index)?;
        ctx.frame.restore_to_count(clip);
    }
    if let (Some(fading_edges), Some(layer)) = (core.config.fading_edges, layer) {
        fading_edges.apply(frame, bounds, scroll, max_scroll);
        frame.restore_to_count(layer);
    }

    {
        let mut ctx = DrawContext::new(frame, bounds, values, layout.dimensions, scroll, zoom);
        for axis in &core.parts.axes {
            if let Some(axis_bounds) = layout.axis_bounds(axis.position()) {
                axis.draw_above_chart(&mut ctx, axis_bounds)?;
            }
        }

        let clip = ctx.frame.save();
        ctx.frame.clip_rect(bounds);
        for decoration in &core.parts.decorations {
            decoration.draw_above_chart(&mut ctx)?;
        }
        ctx.frame.restore_to_count(clip);

        core.chart.draw_non_scrollable(&mut ctx, &model)?;
    }

    if let (Some(legend), Some(legend_bounds)) = (core.parts.legend.as_ref(), layout.legend_bounds)
    {
        legend.draw(frame, legend_bounds)?;
    }

    let marker_entries = match (core.parts.marker.as_ref(), core.session.touch_point) {
        (Some(marker), Some(point)) => {
            let entries = locations.closest_marker_entries(point, bounds);
            if let Some(entries) = entries.as_deref() {
                marker.draw(frame, bounds, entries)?;
            }
            entries
        }
        _ => None,
    };
    notify_marker_listener(core, marker_entries, &layout);

    let stats = DrawStats {
        commands: frame.commands.len(),
        zoom,
        scroll,
        max_scroll,
        marker_entries: core.session.marker_entries.len(),
    };
    core.runtime.last_layout = Some(layout);
    core.runtime.last_locations = locations;
    core.runtime.state = DrawPassState::Idle;
    Ok(stats)
}

fn notify_marker_listener(
    core: &mut EngineCore,
    entries: Option<MarkerEntries>,
    layout: &ChartLayout,
) {
    let transition = core.session.marker_tracker.observe(entries.as_deref());
    let entries = entries.unwrap_or_default();
    if let (Some(transition), Some(listener)) = (transition, core.parts.marker_listener.as_mut()) {
        // A hidden marker reports the entries it last showed.
        let reported = match transition {
            MarkerTransition::Hidden => &core.session.marker_entries,
            MarkerTransition::Shown | MarkerTransition::Moved => &entries,
        };
        listener.on_visibility_changed(transition.is_visible(), reported, layout.content_bounds);
    }
    core.session.marker_entries = entries;
}
