use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_to: Option<String>,
}

impl Point {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            connected_to: None,
        }
    }

    pub fn connected(name: impl Into<String>, x: f32, y: f32, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            connected_to: Some(to.into()),
        }
    }

    /// Points without a `connected_to` link each own a hue of the palette.
    pub fn is_base(&self) -> bool {
        self.connected_to.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ScatterPlot {
    pub points: Vec<Point>,
    pub x_label: String,
    pub y_label: String,
}

impl ScatterPlot {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
        }
    }
}
