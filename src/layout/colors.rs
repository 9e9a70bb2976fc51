use super::{ConnectorLayout, Segment};
use crate::ir::Point;
use crate::log::debug;
use crate::theme::Theme;
use std::collections::HashMap;

/// Per-point colors, indexed like `points`.
///
/// Base points take evenly spaced hues in input order. A connected point
/// inherits the color of its target when that target already has one at the
/// time it is visited; anything else gets the theme fallback.
pub(crate) fn assign_colors(
    points: &[Point],
    index: &HashMap<&str, usize>,
    theme: &Theme,
) -> Vec<String> {
    let base_count = points.iter().filter(|p| p.is_base()).count();
    let mut palette = theme.palette(base_count).into_iter();
    let mut colors: Vec<Option<String>> = points
        .iter()
        .map(|p| if p.is_base() { palette.next() } else { None })
        .collect();

    for (idx, point) in points.iter().enumerate() {
        let Some(target) = point.connected_to.as_deref() else {
            continue;
        };
        let inherited = index
            .get(target)
            .and_then(|&target_idx| colors[target_idx].clone());
        colors[idx] = Some(inherited.unwrap_or_else(|| theme.fallback_point_color.clone()));
    }

    colors
        .into_iter()
        .map(|color| color.unwrap_or_else(|| theme.fallback_point_color.clone()))
        .collect()
}

/// One connector per point whose `connected_to` names a known point, running
/// from the target's anchor to the point's own anchor.
pub(crate) fn build_connectors(
    points: &[Point],
    anchors: &[(f32, f32)],
    colors: &[String],
    index: &HashMap<&str, usize>,
) -> Vec<ConnectorLayout> {
    let mut connectors = Vec::new();
    for (idx, point) in points.iter().enumerate() {
        let Some(target) = point.connected_to.as_deref() else {
            continue;
        };
        let Some(&target_idx) = index.get(target) else {
            debug!(point = %point.name, missing = target, "skipping connector to unknown point");
            continue;
        };
        connectors.push(ConnectorLayout {
            from: points[target_idx].name.clone(),
            to: point.name.clone(),
            segment: Segment::new(anchors[target_idx], anchors[idx]),
            color: colors[target_idx].clone(),
        });
    }
    connectors
}
