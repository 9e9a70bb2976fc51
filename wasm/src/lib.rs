use scatter_rs_renderer::{RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScatterRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    margin: Option<f32>,
    fast_text: Option<bool>,
}

fn build_render_options(options: ScatterRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("dark") {
        RenderOptions::dark()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }
    if let Some(margin) = options.margin {
        render_options.layout.margin = margin;
    }
    // No system fonts inside the browser sandbox.
    render_options.layout.fast_text_metrics = options.fast_text.unwrap_or(true);

    render_options
}

#[wasm_bindgen]
pub fn render_scatter_svg(data: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<ScatterRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        ScatterRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(data, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
