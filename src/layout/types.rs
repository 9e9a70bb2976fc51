use serde::Serialize;

/// Axis-aligned rectangle in pixel space, `(x, y)` being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: (f32, f32), width: f32, height: f32) -> Self {
        Self::new(
            center.0 - width / 2.0,
            center.1 - height / 2.0,
            width,
            height,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, top-left moved to `(x, y)`.
    pub fn moved_to(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }
}

/// Directed connector from the linked point to the point that declared the link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: (f32, f32),
    pub end: (f32, f32),
}

impl Segment {
    pub fn new(start: (f32, f32), end: (f32, f32)) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> (f32, f32) {
        (
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }
}

/// The eight fixed label slots around an anchor, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compass {
    Right,
    Left,
    Top,
    Bottom,
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

/// How a label ended up where it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Placement {
    Compass { direction: Compass },
    Spiral { radius: f32, angle_deg: f32 },
    /// No collision-free slot existed; the label sits at the fixed right
    /// offset and may overlap.
    Fallback,
}

impl Placement {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Placement::Fallback)
    }
}

/// One label the engine has to place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRequest {
    pub anchor: (f32, f32),
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    /// Index into the input sequence the request came from.
    pub index: usize,
    pub anchor: (f32, f32),
    pub rect: Rect,
    pub leader_end: (f32, f32),
    pub placement: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RelaxationReport {
    pub iterations: usize,
    /// `false` when the iteration cap was hit with collisions still present.
    pub converged: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LabelPlacementResult {
    pub labels: Vec<PlacedLabel>,
    pub relaxation: RelaxationReport,
}

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub text: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct PointLayout {
    pub name: String,
    /// Data-space coordinates.
    pub value: (f32, f32),
    pub anchor: (f32, f32),
    pub color: String,
    pub label: TextBlock,
    /// `name: (x, y)` hover text, measured like the label.
    pub tooltip: TextBlock,
}

#[derive(Debug, Clone)]
pub struct ConnectorLayout {
    pub from: String,
    pub to: String,
    pub segment: Segment,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct AxisTick {
    pub value: f32,
    /// Pixel position along the axis.
    pub position: f32,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct AxisLayout {
    pub title: String,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Margin-inset drawable area.
    pub bounds: Rect,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
    pub points: Vec<PointLayout>,
    pub connectors: Vec<ConnectorLayout>,
    /// One entry per point, in input order.
    pub labels: Vec<PlacedLabel>,
    pub relaxation: RelaxationReport,
}
