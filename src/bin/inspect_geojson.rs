use anyhow::Context;
use std::path::PathBuf;

use choropleth::data_loader::load_geojson;
use choropleth::table::{Column, Geometry};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: inspect_geojson <file.geojson>")?;

    println!("Inspecting GeoJSON file: {}", path.display());

    let table = load_geojson(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    println!("\n=== FILE INFORMATION ===");
    println!("\nFeatures: {}", table.len());

    let mut kinds = std::collections::BTreeMap::new();
    for geometry in table.geometries() {
        *kinds.entry(geometry.type_name()).or_insert(0usize) += 1;
    }
    println!("\nGeometry types:");
    for (kind, count) in &kinds {
        println!("  {} = {}", kind, count);
    }

    if let Some(b) = table.bounds() {
        println!(
            "\nBounds: x [{}, {}], y [{}, {}]",
            b.min_x, b.max_x, b.min_y, b.max_y
        );
    }

    println!("\nColumns:");
    for name in table.column_names() {
        let Some(column) = table.column(name) else { continue };
        match column {
            Column::Numeric(values) => {
                let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
                let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
                let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let missing = values.len() - finite.len();
                if finite.is_empty() {
                    println!("  {} (numeric) no values", name);
                } else {
                    println!(
                        "  {} (numeric) min = {}, max = {}, missing = {}",
                        name, min, max, missing
                    );
                }
            }
            other => println!("  {} ({})", name, other.kind()),
        }
    }

    if let Some(Geometry::Polygon(rings)) = table.geometries().first() {
        println!(
            "\nFirst polygon: {} ring(s), {} vertices in outer ring",
            rings.len(),
            rings.first().map_or(0, Vec::len)
        );
    }

    Ok(())
}
