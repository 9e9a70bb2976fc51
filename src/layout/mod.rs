mod axis;
mod candidates;
mod colors;
mod cost;
pub mod geometry;
pub(crate) mod label_placement;
mod text;
mod types;

pub use axis::{LinearScale, calculate_step};
pub use label_placement::{PlacementParams, place_labels};
pub use types::*;

use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::ScatterPlot;
use crate::log::debug;
use crate::theme::Theme;
use std::collections::HashMap;
use text::measure_label;

/// Tolerance for ticks that land on the plot edge after float rounding.
const EDGE_EPSILON: f32 = 1e-3;

/// Name to input position. The first point wins when names repeat.
pub(crate) fn name_index(plot: &ScatterPlot) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(plot.points.len());
    for (idx, point) in plot.points.iter().enumerate() {
        index.entry(point.name.as_str()).or_insert(idx);
    }
    index
}

/// Lay out a scatter plot on a `render.width` x `render.height` canvas: axes,
/// point anchors, colors, connectors and collision-free labels.
pub fn compute_layout(
    plot: &ScatterPlot,
    theme: &Theme,
    config: &LayoutConfig,
    render: &RenderConfig,
) -> Layout {
    let (width, height) = (render.width, render.height);
    let margin = config.margin;
    let bounds = Rect::new(margin, margin, width - 2.0 * margin, height - 2.0 * margin);
    let points = &plot.points;
    let index = name_index(plot);

    let x_max = axis::x_domain_max(points.iter().map(|p| p.x), config.x_max, config.x_headroom);
    let y_max = axis::y_domain_max(config.y_max);
    let x_scale = LinearScale::new((0.0, x_max), (margin, width - margin));
    let y_scale = LinearScale::new((0.0, y_max), (height - margin, margin));

    let anchors: Vec<(f32, f32)> = points
        .iter()
        .map(|p| (x_scale.to_px(p.x), y_scale.to_px(p.y)))
        .collect();
    let colors = colors::assign_colors(points, &index, theme);
    let connectors = colors::build_connectors(points, &anchors, &colors, &index);

    let blocks: Vec<TextBlock> = points
        .iter()
        .map(|p| measure_label(&p.name, theme, config))
        .collect();
    let pad = config.label_padding * 2.0;
    let requests: Vec<LabelRequest> = anchors
        .iter()
        .zip(&blocks)
        .map(|(&anchor, block)| LabelRequest {
            anchor,
            width: block.width + pad,
            height: block.height + pad,
        })
        .collect();
    let segments: Vec<Segment> = connectors.iter().map(|c| c.segment).collect();

    let params = PlacementParams::from_config(config);
    let placement = place_labels(&requests, &segments, bounds, &params);
    debug!(
        points = points.len(),
        connectors = connectors.len(),
        iterations = placement.relaxation.iterations,
        "scatter layout computed"
    );

    let right_edge = width - margin;
    let x_axis = axis::build_axis(&plot.x_label, x_max, &x_scale, config.target_tick_steps, |px| {
        px <= right_edge + EDGE_EPSILON
    });
    let y_axis = axis::build_axis(&plot.y_label, y_max, &y_scale, config.target_tick_steps, |py| {
        py >= margin - EDGE_EPSILON
    });

    let point_layouts = points
        .iter()
        .zip(anchors)
        .zip(colors)
        .zip(blocks)
        .map(|(((point, anchor), color), label)| {
            let tooltip = measure_label(
                &format!("{}: ({:.3}, {:.3})", point.name, point.x, point.y),
                theme,
                config,
            );
            PointLayout {
                name: point.name.clone(),
                value: (point.x, point.y),
                anchor,
                color,
                label,
                tooltip,
            }
        })
        .collect();

    Layout {
        width,
        height,
        margin,
        bounds,
        x_axis,
        y_axis,
        points: point_layouts,
        connectors,
        labels: placement.labels,
        relaxation: placement.relaxation,
    }
}
