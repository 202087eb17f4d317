/// Example: Render the built-in cube to a PNG
///
/// Usage: cargo run --example render_cube -- [size] [output-dir]

use std::env;
use std::path::PathBuf;
use wirefig_core::{render_figure, Figure, RenderConfig};
use wirefig_terminal::export;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let size: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(2.0);
    let dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("output"));

    let figure = Figure::cube(size);
    let config = RenderConfig {
        show_vertices: true,
        show_labels: true,
        ..RenderConfig::default()
    };
    let canvas = render_figure(&figure, &config, 800, 600)?;

    let path = export::output_path(&dir, &figure.name);
    export::save_png(&canvas, &path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
