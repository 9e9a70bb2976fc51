// Rectangle, point and segment predicates shared by every placement stage.
// All functions are pure.

use super::Rect;

/// True when `a` and `b` come closer than `gap` to each other on both axes.
/// Touching at exactly `gap` distance does not count.
pub fn rects_intersect(a: &Rect, b: &Rect, gap: f32) -> bool {
    a.x < b.right() + gap
        && a.right() + gap > b.x
        && a.y < b.bottom() + gap
        && a.bottom() + gap > b.y
}

/// True when `point` lies strictly inside `rect` grown by `gap` on every side.
pub fn rect_contains_point_with_gap(rect: &Rect, point: (f32, f32), gap: f32) -> bool {
    let (px, py) = point;
    rect.x < px + gap && rect.right() > px - gap && rect.y < py + gap && rect.bottom() > py - gap
}

/// Parametric crossing test between segments `p1-p2` and `p3-p4`. Both
/// parameters must lie in the open interval (0, 1); parallel segments never
/// cross.
fn segments_cross(p1: (f32, f32), p2: (f32, f32), p3: (f32, f32), p4: (f32, f32)) -> bool {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    let (x3, y3) = p3;
    let (x4, y4) = p4;
    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        return false;
    }
    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;
    t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0
}

/// True when the segment crosses one of the rectangle's four edges.
///
/// A segment lying entirely inside the rectangle crosses no edge and is not
/// reported, nor is one that merely ends on an edge.
pub fn segment_intersects_rect(start: (f32, f32), end: (f32, f32), rect: &Rect) -> bool {
    let top_left = (rect.x, rect.y);
    let top_right = (rect.right(), rect.y);
    let bottom_right = (rect.right(), rect.bottom());
    let bottom_left = (rect.x, rect.bottom());
    segments_cross(start, end, top_left, top_right)
        || segments_cross(start, end, top_right, bottom_right)
        || segments_cross(start, end, bottom_right, bottom_left)
        || segments_cross(start, end, bottom_left, top_left)
}

/// Inclusive containment of `rect` in `bounds`.
pub fn rect_within_bounds(rect: &Rect, bounds: &Rect) -> bool {
    rect.x >= bounds.x
        && rect.right() <= bounds.right()
        && rect.y >= bounds.y
        && rect.bottom() <= bounds.bottom()
}

/// Nearest point on the outline of `rect` to `point`.
///
/// Inside the horizontal span the answer is on the top or bottom edge, inside
/// the vertical span on the left or right edge; otherwise it is the nearest
/// corner.
pub fn closest_point_on_rect(point: (f32, f32), rect: &Rect) -> (f32, f32) {
    let (px, py) = point;
    let (left, right, top, bottom) = (rect.x, rect.right(), rect.y, rect.bottom());
    let in_x = px >= left && px <= right;
    let in_y = py >= top && py <= bottom;

    if in_x && in_y {
        // Anchor under the label: snap to the nearest edge.
        let candidates = [
            (px - left, (left, py)),
            (right - px, (right, py)),
            (py - top, (px, top)),
            (bottom - py, (px, bottom)),
        ];
        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.0 < best.0 {
                best = *candidate;
            }
        }
        return best.1;
    }
    if in_x {
        let y = if py < top { top } else { bottom };
        return (px, y);
    }
    if in_y {
        let x = if px < left { left } else { right };
        return (x, py);
    }

    let corners = [(left, top), (right, top), (left, bottom), (right, bottom)];
    let mut closest = corners[0];
    let mut min_dist = f32::INFINITY;
    for corner in corners {
        let dist = (px - corner.0).hypot(py - corner.1);
        if dist < min_dist {
            min_dist = dist;
            closest = corner;
        }
    }
    closest
}
