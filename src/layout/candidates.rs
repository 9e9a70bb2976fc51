use super::label_placement::PlacementParams;
use super::{Compass, Rect};

impl Compass {
    /// Tie-break order used by the initial placement pass.
    pub const ALL: [Compass; 8] = [
        Compass::Right,
        Compass::Left,
        Compass::Top,
        Compass::Bottom,
        Compass::TopRight,
        Compass::TopLeft,
        Compass::BottomRight,
        Compass::BottomLeft,
    ];

    /// Top-left corner of a `w`×`h` box placed in this slot around `anchor`,
    /// `clearance` pixels away from it.
    pub fn offset(self, anchor: (f32, f32), w: f32, h: f32, clearance: f32) -> (f32, f32) {
        let (px, py) = anchor;
        let east = px + clearance;
        let west = px - clearance - w;
        let north = py - clearance - h;
        let south = py + clearance;
        match self {
            Compass::Right => (east, py - h / 2.0),
            Compass::Left => (west, py - h / 2.0),
            Compass::Top => (px - w / 2.0, north),
            Compass::Bottom => (px - w / 2.0, south),
            Compass::TopRight => (east, north),
            Compass::TopLeft => (west, north),
            Compass::BottomRight => (east, south),
            Compass::BottomLeft => (west, south),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compass::Right => "right",
            Compass::Left => "left",
            Compass::Top => "top",
            Compass::Bottom => "bottom",
            Compass::TopRight => "top-right",
            Compass::TopLeft => "top-left",
            Compass::BottomRight => "bottom-right",
            Compass::BottomLeft => "bottom-left",
        }
    }
}

pub(crate) fn compass_candidates(
    anchor: (f32, f32),
    w: f32,
    h: f32,
    params: &PlacementParams,
) -> impl Iterator<Item = (Compass, Rect)> + '_ {
    Compass::ALL.into_iter().map(move |direction| {
        let (x, y) = direction.offset(anchor, w, h, params.compass_offset);
        (direction, Rect::new(x, y, w, h))
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SpiralCandidate {
    pub radius: f32,
    pub angle_deg: f32,
    pub rect: Rect,
}

/// Boxes centered on rings of growing radius around `anchor`: every angle
/// step of one ring before moving outward, radius strictly below
/// `spiral_max_radius`.
pub(crate) fn spiral_candidates(
    anchor: (f32, f32),
    w: f32,
    h: f32,
    params: &PlacementParams,
) -> impl Iterator<Item = SpiralCandidate> + '_ {
    let ring_count = ring_count(params);
    let angle_count = angle_count(params);
    let radius_of =
        move |ring: usize| params.spiral_start_radius + ring as f32 * params.spiral_radius_step;
    (0..ring_count)
        .take_while(move |&ring| radius_of(ring) < params.spiral_max_radius)
        .flat_map(move |ring| {
            let radius = radius_of(ring);
            (0..angle_count).map(move |step| {
                let angle_deg = step as f32 * params.spiral_angle_step_deg;
                let rad = angle_deg.to_radians();
                let center = (anchor.0 + radius * rad.cos(), anchor.1 + radius * rad.sin());
                SpiralCandidate {
                    radius,
                    angle_deg,
                    rect: Rect::centered(center, w, h),
                }
            })
        })
}

/// Upper limits on the spiral grid, whatever the configured steps say.
pub(crate) const MAX_SPIRAL_RINGS: usize = 1_000;
pub(crate) const MAX_SPIRAL_ANGLES: usize = 720;

fn ring_count(params: &PlacementParams) -> usize {
    step_count(
        params.spiral_start_radius,
        params.spiral_max_radius,
        params.spiral_radius_step,
        MAX_SPIRAL_RINGS,
    )
}

fn angle_count(params: &PlacementParams) -> usize {
    step_count(0.0, 360.0, params.spiral_angle_step_deg, MAX_SPIRAL_ANGLES)
}

/// Number of values `start + k * step` strictly below `end`, at most `cap`.
fn step_count(start: f32, end: f32, step: f32, cap: usize) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let span = f64::from(end) - f64::from(start);
    if span.is_nan() || span <= 0.0 {
        return 0;
    }
    let count = (span / f64::from(step)).ceil();
    if count >= cap as f64 { cap } else { count as usize }
}
