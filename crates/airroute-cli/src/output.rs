//! Output formatting for command results.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use airroute_lib::{DatasetPaths, Itinerary};

use crate::terminal::{format_km, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

/// JSON view of a resolved dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadOutput {
    pub airports_path: String,
    pub routes_path: String,
}

impl From<&DatasetPaths> for DownloadOutput {
    fn from(paths: &DatasetPaths) -> Self {
        Self {
            airports_path: paths.airports.display().to_string(),
            routes_path: paths.routes.display().to_string(),
        }
    }
}

/// Request context printed alongside an itinerary.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub source: &'a str,
    pub destination: &'a str,
    pub max_hops: usize,
}

impl OutputFormat {
    pub fn render_download(self, paths: &DatasetPaths) -> Result<()> {
        match self {
            OutputFormat::Text => {
                println!("Dataset available at {}", dataset_dir(paths));
                println!("  airports: {}", paths.airports.display());
                println!("  routes:   {}", paths.routes.display());
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&DownloadOutput::from(paths))
                    .context("failed to serialize download output")?;
                println!("{json}");
            }
        }
        Ok(())
    }

    pub fn render_route(self, context: RouteContext<'_>, itinerary: &Itinerary) -> Result<()> {
        match self {
            OutputFormat::Text => {
                print!("{}", route_text(context, itinerary, &ColorPalette::detect()));
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(itinerary)
                    .context("failed to serialize itinerary")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}

fn dataset_dir(paths: &DatasetPaths) -> String {
    paths
        .airports
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| paths.airports.display().to_string())
}

/// Render an itinerary as tagged lines followed by the total distance.
pub fn route_text(context: RouteContext<'_>, itinerary: &Itinerary, p: &ColorPalette) -> String {
    let mut out = String::new();

    if itinerary.is_empty() {
        let _ = writeln!(
            out,
            "No route found from {} to {} within {} hops.",
            context.source, context.destination, context.max_hops
        );
        return out;
    }

    let _ = writeln!(
        out,
        "Route from {} to {} ({} hops):",
        context.source,
        context.destination,
        itinerary.hop_count()
    );

    let last = itinerary.len() - 1;
    for (index, stop) in itinerary.stops().iter().enumerate() {
        let (tag_color, tag) = match index {
            0 => (p.tag_depart, "DEP"),
            i if i == last => (p.tag_arrive, "ARR"),
            _ => (p.tag_stop, "VIA"),
        };
        let _ = writeln!(
            out,
            "{tag_color} {tag} {reset} {bold}{code}{reset} {gray}{name}{reset} {green}{distance}{reset}",
            reset = p.reset,
            bold = p.white_bold,
            code = stop.code,
            gray = p.gray,
            name = stop.name,
            green = p.green,
            distance = format_km(stop.distance_km),
        );
    }

    let _ = writeln!(
        out,
        "\nTotal distance: {}",
        format_km(itinerary.total_distance_km())
    );
    out
}
