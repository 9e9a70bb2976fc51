use crate::ir::ScatterPlot;
use crate::layout::{Layout, Placement, Rect, RelaxationReport};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub bounds: Rect,
    pub x_axis: AxisDump,
    pub y_axis: AxisDump,
    pub points: Vec<PointDump>,
    pub connectors: Vec<ConnectorDump>,
    pub relaxation: RelaxationReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisDump {
    pub title: String,
    pub max: f32,
    pub step: f32,
    pub ticks: Vec<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDump {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_to: Option<String>,
    pub anchor: [f32; 2],
    pub color: String,
    pub label: Rect,
    pub leader_end: [f32; 2],
    pub placement: Placement,
}

#[derive(Debug, Serialize)]
pub struct ConnectorDump {
    pub from: String,
    pub to: String,
    pub points: [[f32; 2]; 2],
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, plot: &ScatterPlot) -> Self {
        let points = layout
            .labels
            .iter()
            .filter_map(|label| {
                let point = layout.points.get(label.index)?;
                Some(PointDump {
                    name: point.name.clone(),
                    x: point.value.0,
                    y: point.value.1,
                    connected_to: plot
                        .points
                        .get(label.index)
                        .and_then(|p| p.connected_to.clone()),
                    anchor: [point.anchor.0, point.anchor.1],
                    color: point.color.clone(),
                    label: label.rect,
                    leader_end: [label.leader_end.0, label.leader_end.1],
                    placement: label.placement,
                })
            })
            .collect();

        let connectors = layout
            .connectors
            .iter()
            .map(|connector| {
                let (start, end) = (connector.segment.start, connector.segment.end);
                ConnectorDump {
                    from: connector.from.clone(),
                    to: connector.to.clone(),
                    points: [[start.0, start.1], [end.0, end.1]],
                }
            })
            .collect();

        let axis = |axis: &crate::layout::AxisLayout| AxisDump {
            title: axis.title.clone(),
            max: axis.max,
            step: axis.step,
            ticks: axis.ticks.iter().map(|t| t.value).collect(),
        };

        LayoutDump {
            width: layout.width,
            height: layout.height,
            bounds: layout.bounds,
            x_axis: axis(&layout.x_axis),
            y_axis: axis(&layout.y_axis),
            points,
            connectors,
            relaxation: layout.relaxation,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, plot: &ScatterPlot) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, plot);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
