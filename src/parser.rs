use crate::ir::{Point, ScatterPlot};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid scatter data: {0}")]
    Syntax(#[from] json5::Error),
    #[error("point #{index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate point name `{name}`")]
    DuplicateName { name: String },
    #[error("point `{name}` has a non-finite coordinate")]
    NonFinite { name: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScatterFile {
    Points(Vec<Point>),
    Document(ScatterDocument),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScatterDocument {
    x_label: Option<String>,
    y_label: Option<String>,
    #[serde(alias = "data")]
    points: Vec<Point>,
}

/// Parse scatter input written as JSON or JSON5.
///
/// Accepts either a bare array of points or an object carrying `points`
/// (alias `data`) plus optional axis titles. `connectedTo` references are not
/// resolved here; dangling ones are dropped at layout time.
pub fn parse_scatter(input: &str) -> Result<ScatterPlot, ParseError> {
    let file: ScatterFile = json5::from_str(input)?;
    let mut plot = ScatterPlot::default();
    let points = match file {
        ScatterFile::Points(points) => points,
        ScatterFile::Document(doc) => {
            if let Some(label) = doc.x_label {
                plot.x_label = label;
            }
            if let Some(label) = doc.y_label {
                plot.y_label = label;
            }
            doc.points
        }
    };

    let mut seen = HashSet::new();
    for (index, point) in points.iter().enumerate() {
        if point.name.trim().is_empty() {
            return Err(ParseError::EmptyName { index });
        }
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ParseError::NonFinite {
                name: point.name.clone(),
            });
        }
        if !seen.insert(point.name.as_str()) {
            return Err(ParseError::DuplicateName {
                name: point.name.clone(),
            });
        }
    }

    plot.points = points;
    Ok(plot)
}
