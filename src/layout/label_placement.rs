// Point label placement and collision avoidance.
//
// Three phases run once per render over an owned `LayoutState`:
// a greedy initial pass in input order, a bounded repulsion pass, and the
// leader-line projection. Everything here is pure geometry.

use super::candidates::{compass_candidates, spiral_candidates};
use super::cost::{LABEL_OVERLAP_COST, Obstacles, candidate_cost, is_collision_free};
use super::geometry::{closest_point_on_rect, rect_within_bounds, rects_intersect, segment_intersects_rect};
use super::{
    Compass, LabelPlacementResult, LabelRequest, PlacedLabel, Placement, Rect, RelaxationReport,
    Segment,
};
use crate::config::LayoutConfig;
use crate::log::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementParams {
    /// Minimum clearance between two label boxes.
    pub label_gap: f32,
    /// Radius of the drawn point; added to `label_gap` around anchors.
    pub point_radius: f32,
    pub compass_offset: f32,
    pub spiral_start_radius: f32,
    pub spiral_radius_step: f32,
    /// Exclusive upper bound on the spiral radius.
    pub spiral_max_radius: f32,
    pub spiral_angle_step_deg: f32,
    pub relax_max_iterations: usize,
    pub relax_step: f32,
}

impl PlacementParams {
    pub fn anchor_gap(&self) -> f32 {
        self.label_gap + self.point_radius
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            label_gap: config.label_gap,
            point_radius: config.point_radius,
            compass_offset: config.compass_offset,
            spiral_start_radius: config.spiral_start_radius,
            spiral_radius_step: config.spiral_radius_step,
            spiral_max_radius: config.spiral_max_radius,
            spiral_angle_step_deg: config.spiral_angle_step_deg,
            relax_max_iterations: config.relax_max_iterations,
            relax_step: config.relax_step,
        }
    }
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

/// Placement state owned by one render: the committed boxes grow during the
/// initial pass and move during relaxation.
struct LayoutState<'a> {
    requests: &'a [LabelRequest],
    anchors: Vec<(f32, f32)>,
    segments: &'a [Segment],
    bounds: Rect,
    placed: Vec<Rect>,
    placements: Vec<Placement>,
}

impl<'a> LayoutState<'a> {
    fn new(requests: &'a [LabelRequest], segments: &'a [Segment], bounds: Rect) -> Self {
        Self {
            requests,
            anchors: requests.iter().map(|request| request.anchor).collect(),
            segments,
            bounds,
            placed: Vec::with_capacity(requests.len()),
            placements: Vec::with_capacity(requests.len()),
        }
    }

    fn obstacles(&self) -> Obstacles<'_> {
        Obstacles {
            placed: &self.placed,
            anchors: &self.anchors,
            segments: self.segments,
            bounds: &self.bounds,
        }
    }

    fn commit(&mut self, rect: Rect, placement: Placement) {
        self.placed.push(rect);
        self.placements.push(placement);
    }
}

/// Place one label per request, then relax leftover collisions.
///
/// Requests are handled in order, so earlier labels get first pick of
/// contested space. The result holds one label per request, in request order.
pub fn place_labels(
    requests: &[LabelRequest],
    segments: &[Segment],
    bounds: Rect,
    params: &PlacementParams,
) -> LabelPlacementResult {
    if requests.is_empty() {
        return LabelPlacementResult::default();
    }

    let mut state = LayoutState::new(requests, segments, bounds);
    initial_placement(&mut state, params);
    let relaxation = relax(&mut state.placed, segments, &bounds, params);

    let labels = project_leader_lines(requests, &state.placed, &state.placements);
    LabelPlacementResult { labels, relaxation }
}

fn initial_placement(state: &mut LayoutState<'_>, params: &PlacementParams) {
    let requests = state.requests;
    for (idx, request) in requests.iter().enumerate() {
        let (rect, placement) = choose_position(state, idx, request, params);
        if placement.is_fallback() {
            warn!(label = idx, "no collision-free slot, using fixed offset");
        } else {
            debug!(label = idx, ?placement, x = rect.x, y = rect.y, "label placed");
        }
        state.commit(rect, placement);
    }
}

fn choose_position(
    state: &LayoutState<'_>,
    idx: usize,
    request: &LabelRequest,
    params: &PlacementParams,
) -> (Rect, Placement) {
    let obstacles = state.obstacles();
    let (w, h) = (request.width, request.height);

    let mut best: Option<(Compass, Rect)> = None;
    let mut min_cost = u32::MAX;
    for (direction, rect) in compass_candidates(request.anchor, w, h, params) {
        let cost = candidate_cost(&rect, idx, &obstacles, params);
        if cost < min_cost {
            min_cost = cost;
            best = Some((direction, rect));
        }
    }
    if let Some((direction, rect)) = best {
        if min_cost < LABEL_OVERLAP_COST {
            return (rect, Placement::Compass { direction });
        }
    }

    if let Some(candidate) = spiral_candidates(request.anchor, w, h, params)
        .find(|candidate| is_collision_free(&candidate.rect, &obstacles, params))
    {
        return (
            candidate.rect,
            Placement::Spiral {
                radius: candidate.radius,
                angle_deg: candidate.angle_deg,
            },
        );
    }

    let (x, y) = Compass::Right.offset(request.anchor, w, h, params.compass_offset);
    (Rect::new(x, y, w, h), Placement::Fallback)
}

/// Push overlapping labels apart in small steps until nothing collides or
/// the iteration budget runs out. A move that would leave `bounds` is
/// skipped for that label.
pub(crate) fn relax(
    rects: &mut [Rect],
    segments: &[Segment],
    bounds: &Rect,
    params: &PlacementParams,
) -> RelaxationReport {
    let step = params.relax_step;
    let mut iterations = 0;
    let mut has_overlap = true;

    while has_overlap && iterations < params.relax_max_iterations {
        has_overlap = false;
        for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                if !rects_intersect(&rects[i], &rects[j], params.label_gap) {
                    continue;
                }
                has_overlap = true;
                let (cx1, cy1) = rects[i].center();
                let (cx2, cy2) = rects[j].center();
                let angle = (cy1 - cy2).atan2(cx1 - cx2);
                let (dx, dy) = (step * angle.cos(), step * angle.sin());
                let moved_i = rects[i].moved_to(rects[i].x + dx, rects[i].y + dy);
                let moved_j = rects[j].moved_to(rects[j].x - dx, rects[j].y - dy);
                if rect_within_bounds(&moved_i, bounds) {
                    rects[i] = moved_i;
                }
                if rect_within_bounds(&moved_j, bounds) {
                    rects[j] = moved_j;
                }
            }

            for segment in segments {
                if !segment_intersects_rect(segment.start, segment.end, &rects[i]) {
                    continue;
                }
                has_overlap = true;
                let (cx, cy) = rects[i].center();
                let (mx, my) = segment.midpoint();
                let angle = (cy - my).atan2(cx - mx);
                let moved = rects[i].moved_to(
                    rects[i].x + step * angle.cos(),
                    rects[i].y + step * angle.sin(),
                );
                if rect_within_bounds(&moved, bounds) {
                    rects[i] = moved;
                }
            }
        }
        iterations += 1;
    }

    let report = RelaxationReport {
        iterations,
        converged: !has_overlap,
    };
    debug!(iterations, converged = report.converged, "relaxation finished");
    report
}

/// Attach to every final box the point of its outline closest to its anchor.
pub(crate) fn project_leader_lines(
    requests: &[LabelRequest],
    rects: &[Rect],
    placements: &[Placement],
) -> Vec<PlacedLabel> {
    requests
        .iter()
        .zip(rects)
        .zip(placements)
        .enumerate()
        .map(|(index, ((request, rect), placement))| PlacedLabel {
            index,
            anchor: request.anchor,
            rect: *rect,
            leader_end: closest_point_on_rect(request.anchor, rect),
            placement: *placement,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(50.0, 50.0, 700.0, 500.0)
    }

    fn request(x: f32, y: f32) -> LabelRequest {
        LabelRequest {
            anchor: (x, y),
            width: 40.0,
            height: 16.0,
        }
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = place_labels(&[], &[], bounds(), &PlacementParams::default());
        assert!(result.labels.is_empty());
        assert_eq!(result.relaxation, RelaxationReport::default());
    }

    #[test]
    fn lone_label_goes_right() {
        let result = place_labels(&[request(200.0, 200.0)], &[], bounds(), &PlacementParams::default());
        let label = &result.labels[0];
        assert_eq!(label.rect, Rect::new(215.0, 192.0, 40.0, 16.0));
        assert_eq!(
            label.placement,
            Placement::Compass {
                direction: Compass::Right
            }
        );
        assert_eq!(label.leader_end, (215.0, 200.0));
        assert!(result.relaxation.converged);
        assert_eq!(result.relaxation.iterations, 1);
    }

    #[test]
    fn right_edge_forces_left_slot() {
        let result = place_labels(&[request(740.0, 300.0)], &[], bounds(), &PlacementParams::default());
        assert_eq!(
            result.labels[0].placement,
            Placement::Compass {
                direction: Compass::Left
            }
        );
        assert_eq!(result.labels[0].rect.x, 740.0 - 15.0 - 40.0);
    }

    #[test]
    fn earlier_label_wins_contested_slot() {
        // Both anchors sit against the right edge, so only their left slots
        // are in bounds; the left slots collide with each other.
        let requests = [request(740.0, 300.0), request(740.0, 315.0)];
        let result = place_labels(&requests, &[], bounds(), &PlacementParams::default());
        assert_eq!(
            result.labels[0].placement,
            Placement::Compass {
                direction: Compass::Left
            }
        );
        assert_ne!(
            result.labels[1].placement,
            Placement::Compass {
                direction: Compass::Left
            }
        );
    }

    #[test]
    fn candidate_over_foreign_anchor_is_rejected() {
        // Second anchor sits exactly where the first label's right slot would be.
        let requests = [request(200.0, 200.0), request(235.0, 200.0)];
        let result = place_labels(&requests, &[], bounds(), &PlacementParams::default());
        let params = PlacementParams::default();
        for label in &result.labels {
            assert!(!label.placement.is_fallback());
            for other in &result.labels {
                if other.index != label.index {
                    assert!(!crate::layout::geometry::rect_contains_point_with_gap(
                        &label.rect,
                        other.anchor,
                        params.anchor_gap()
                    ));
                }
            }
        }
        assert_ne!(
            result.labels[0].placement,
            Placement::Compass {
                direction: Compass::Right
            }
        );
    }

    #[test]
    fn crowded_anchor_falls_back_to_spiral() {
        let params = PlacementParams::default();
        // Neighbours on all four sides at 30px take out every compass slot.
        let requests = [
            request(400.0, 300.0),
            request(460.0, 300.0),
            request(340.0, 300.0),
            request(400.0, 250.0),
            request(400.0, 350.0),
        ];
        let mut state = LayoutState::new(&requests, &[], bounds());
        let (_, placement) = choose_position(&state, 0, &requests[0], &params);
        assert_eq!(
            placement,
            Placement::Compass {
                direction: Compass::Top
            }
        );

        // With a wall of placed labels around it, every compass slot costs
        // at least one label overlap.
        state.placed = vec![
            Rect::new(380.0, 250.0, 100.0, 16.0),
            Rect::new(320.0, 334.0, 100.0, 16.0),
            Rect::new(300.0, 270.0, 40.0, 60.0),
            Rect::new(460.0, 270.0, 40.0, 60.0),
        ];
        let (rect, placement) = choose_position(&state, 0, &requests[0], &params);
        // Ring 70 at 45 degrees misses the bottom wall's gap by half a pixel
        // and ring 70 at 90 degrees sits inside the lower anchor's gap; the
        // next ring's 45 degree slot is the first clear one.
        assert_eq!(
            placement,
            Placement::Spiral {
                radius: 75.0,
                angle_deg: 45.0
            }
        );
        assert_eq!(rect, ring_rect((400.0, 300.0), 75.0, 45.0));
        assert!(is_collision_free(&rect, &state.obstacles(), &params));
    }

    fn ring_rect(anchor: (f32, f32), radius: f32, angle_deg: f32) -> Rect {
        let rad = angle_deg.to_radians();
        Rect::centered(
            (anchor.0 + radius * rad.cos(), anchor.1 + radius * rad.sin()),
            40.0,
            16.0,
        )
    }

    #[test]
    fn spiral_takes_first_clear_angle_on_ring() {
        // Bounds hug the anchor so every compass slot leaves them. The label's
        // own anchor blocks rings 15 and 20 entirely and ring 25 up to 60
        // degrees; 75 degrees is the first slot clear of it, ahead of 90.
        let tight = Rect::new(386.0, 290.0, 41.0, 43.0);
        let result = place_labels(&[request(400.0, 300.0)], &[], tight, &PlacementParams::default());
        let label = &result.labels[0];
        assert_eq!(
            label.placement,
            Placement::Spiral {
                radius: 25.0,
                angle_deg: 75.0
            }
        );
        assert_eq!(label.rect, ring_rect((400.0, 300.0), 25.0, 75.0));
        assert!(rect_within_bounds(&label.rect, &tight));
    }

    #[test]
    fn oversized_spiral_radius_still_terminates() {
        let params = PlacementParams {
            spiral_max_radius: 1.0e9,
            ..PlacementParams::default()
        };
        let requests = [request(740.0, 300.0), request(740.0, 300.0)];
        let result = place_labels(&requests, &[], bounds(), &params);
        assert_eq!(result.labels.len(), 2);
        assert!(matches!(result.labels[1].placement, Placement::Spiral { .. }));
    }

    #[test]
    fn hopeless_label_uses_fixed_fallback() {
        // Drawable area smaller than the label: nothing can be in bounds.
        let tiny = Rect::new(0.0, 0.0, 10.0, 10.0);
        let result = place_labels(&[request(5.0, 5.0)], &[], tiny, &PlacementParams::default());
        assert_eq!(result.labels[0].placement, Placement::Fallback);
        assert_eq!(result.labels[0].rect, Rect::new(20.0, -3.0, 40.0, 16.0));
    }

    #[test]
    fn relax_separates_overlapping_pair() {
        let params = PlacementParams::default();
        let mut rects = vec![
            Rect::new(300.0, 300.0, 40.0, 16.0),
            Rect::new(310.0, 300.0, 40.0, 16.0),
        ];
        let report = relax(&mut rects, &[], &bounds(), &params);
        assert!(report.converged);
        assert!(!rects_intersect(&rects[0], &rects[1], params.label_gap));
        // Pushed apart horizontally: first left, second right.
        assert!(rects[0].x < 300.0);
        assert!(rects[1].x > 310.0);
        assert_eq!(rects[0].y, 300.0);
    }

    #[test]
    fn relax_stops_at_iteration_cap() {
        let params = PlacementParams {
            relax_max_iterations: 3,
            ..PlacementParams::default()
        };
        let mut rects = vec![
            Rect::new(300.0, 300.0, 40.0, 16.0),
            Rect::new(300.0, 300.0, 40.0, 16.0),
        ];
        let report = relax(&mut rects, &[], &bounds(), &params);
        assert_eq!(report.iterations, 3);
        assert!(!report.converged);
    }

    #[test]
    fn relax_never_leaves_bounds() {
        let params = PlacementParams::default();
        let b = bounds();
        let mut rects = vec![
            Rect::new(50.0, 50.0, 40.0, 16.0),
            Rect::new(55.0, 50.0, 40.0, 16.0),
        ];
        relax(&mut rects, &[], &b, &params);
        for rect in &rects {
            assert!(rect_within_bounds(rect, &b));
        }
    }

    #[test]
    fn relax_moves_label_off_segment() {
        let params = PlacementParams::default();
        let segment = Segment::new((200.0, 310.0), (400.0, 310.0));
        let mut rects = vec![Rect::new(300.0, 300.0, 40.0, 16.0)];
        let report = relax(&mut rects, &[segment], &bounds(), &params);
        assert!(report.converged);
        assert!(!segment_intersects_rect(segment.start, segment.end, &rects[0]));
    }

    #[test]
    fn leader_ends_on_label_outline() {
        let requests = [request(100.0, 100.0)];
        let rects = [Rect::new(120.0, 60.0, 40.0, 16.0)];
        let labels = project_leader_lines(&requests, &rects, &[Placement::Fallback]);
        assert_eq!(labels[0].leader_end, (120.0, 76.0));
    }

    #[test]
    fn placement_is_deterministic() {
        let requests: Vec<LabelRequest> = (0..30)
            .map(|i| request(100.0 + (i * 37 % 500) as f32, 100.0 + (i * 53 % 400) as f32))
            .collect();
        let segments = [Segment::new((100.0, 100.0), (600.0, 480.0))];
        let params = PlacementParams::default();
        let a = place_labels(&requests, &segments, bounds(), &params);
        let b = place_labels(&requests, &segments, bounds(), &params);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.relaxation, b.relaxation);
    }
}
