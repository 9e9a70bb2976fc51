use super::geometry::{
    rect_contains_point_with_gap, rect_within_bounds, rects_intersect, segment_intersects_rect,
};
use super::label_placement::PlacementParams;
use super::{Rect, Segment};

pub(crate) const LABEL_OVERLAP_COST: u32 = 1000;
pub(crate) const ANCHOR_OVERLAP_COST: u32 = 10_000;
pub(crate) const SEGMENT_OVERLAP_COST: u32 = 10_000;
pub(crate) const OUT_OF_BOUNDS_COST: u32 = 20_000;

/// Everything a candidate label box can collide with.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Obstacles<'a> {
    pub placed: &'a [Rect],
    pub anchors: &'a [(f32, f32)],
    pub segments: &'a [Segment],
    pub bounds: &'a Rect,
}

impl Obstacles<'_> {
    pub fn hits_label(&self, rect: &Rect, gap: f32) -> bool {
        self.placed.iter().any(|other| rects_intersect(rect, other, gap))
    }

    /// `skip` excludes the anchor the label belongs to.
    pub fn hits_anchor(&self, rect: &Rect, gap: f32, skip: Option<usize>) -> bool {
        self.anchors
            .iter()
            .enumerate()
            .any(|(idx, anchor)| Some(idx) != skip && rect_contains_point_with_gap(rect, *anchor, gap))
    }

    pub fn hits_segment(&self, rect: &Rect) -> bool {
        self.segments
            .iter()
            .any(|segment| segment_intersects_rect(segment.start, segment.end, rect))
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect_within_bounds(rect, self.bounds)
    }
}

/// Weighted collision cost of placing the label owned by anchor `owner` at
/// `rect`. Each obstacle class contributes once, however many members it hits.
pub(crate) fn candidate_cost(
    rect: &Rect,
    owner: usize,
    obstacles: &Obstacles<'_>,
    params: &PlacementParams,
) -> u32 {
    let mut cost = 0;
    if obstacles.hits_label(rect, params.label_gap) {
        cost += LABEL_OVERLAP_COST;
    }
    if obstacles.hits_anchor(rect, params.anchor_gap(), Some(owner)) {
        cost += ANCHOR_OVERLAP_COST;
    }
    if obstacles.hits_segment(rect) {
        cost += SEGMENT_OVERLAP_COST;
    }
    if !obstacles.contains(rect) {
        cost += OUT_OF_BOUNDS_COST;
    }
    cost
}

/// Spiral acceptance test: no label, no anchor (own included), no segment,
/// fully inside bounds.
pub(crate) fn is_collision_free(rect: &Rect, obstacles: &Obstacles<'_>, params: &PlacementParams) -> bool {
    !obstacles.hits_label(rect, params.label_gap)
        && !obstacles.hits_anchor(rect, params.anchor_gap(), None)
        && !obstacles.hits_segment(rect)
        && obstacles.contains(rect)
}
