use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_scatter;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "scatr", version, about = "Scatter plot renderer with collision-free point labels")]
pub struct Args {
    /// Input file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, scatter settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width, overrides the config file
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height, overrides the config file
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Margin around the plot area
    #[arg(short = 'm', long = "margin")]
    pub margin: Option<f32>,

    /// X axis title
    #[arg(long = "xLabel")]
    pub x_label: Option<String>,

    /// Y axis title
    #[arg(long = "yLabel")]
    pub y_label: Option<String>,

    /// Write the computed layout as JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    crate::log::init();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(margin) = args.margin {
        config.layout.margin = margin;
    }

    let input = read_input(args.input.as_deref())?;
    let mut plot = parse_scatter(&input)?;
    if let Some(label) = args.x_label {
        plot.x_label = label;
    }
    if let Some(label) = args.y_label {
        plot.y_label = label;
    }

    let layout = compute_layout(&plot, &config.theme, &config.layout, &config.render);
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout, &plot)?;
    }
    let svg = render_svg(&layout, &config.theme, &config.layout);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render)?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
