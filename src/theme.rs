use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub tick_font_size: f32,
    pub text_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub background: String,
    pub tooltip_background: String,
    pub tooltip_text_color: String,
    /// Used for points whose `connected_to` does not lead to a colored point.
    pub fallback_point_color: String,
    pub palette_saturation: f32,
    pub palette_value: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 12.0,
            tick_font_size: 10.0,
            text_color: "#000000".to_string(),
            axis_color: "black".to_string(),
            grid_color: "lightgray".to_string(),
            background: "#FFFFFF".to_string(),
            tooltip_background: "#333333".to_string(),
            tooltip_text_color: "#FFFFFF".to_string(),
            fallback_point_color: "#666666".to_string(),
            palette_saturation: 1.0,
            palette_value: 0.7,
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            tick_font_size: 10.0,
            text_color: "#E6EAF2".to_string(),
            axis_color: "#A7B1C2".to_string(),
            grid_color: "#3A4150".to_string(),
            background: "#1B1F27".to_string(),
            tooltip_background: "#E6EAF2".to_string(),
            tooltip_text_color: "#1B1F27".to_string(),
            fallback_point_color: "#9AA4B5".to_string(),
            palette_saturation: 0.65,
            palette_value: 0.95,
        }
    }

    /// `count` evenly spaced hues around the color wheel.
    pub fn palette(&self, count: usize) -> Vec<String> {
        if count == 0 {
            return Vec::new();
        }
        let hue_step = 360.0 / count as f32;
        (0..count)
            .map(|i| hsv_to_hex(i as f32 * hue_step, self.palette_saturation, self.palette_value))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

/// Convert HSV (`h` in degrees, `s`/`v` in 0..=1) to `#rrggbb`.
pub fn hsv_to_hex(h: f32, s: f32, v: f32) -> String {
    let sector = (h / 60.0).floor();
    let f = h / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let channel = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}
