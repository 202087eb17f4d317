/// Example: Open a figure file in the terminal viewer
///
/// Usage: cargo run --example view_figure -- samples/house.yaml

use std::env;
use std::io;
use std::path::Path;
use wirefig_core::{Figure, RenderConfig};
use wirefig_terminal::{load_figure, TerminalApp};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <figure-file>", args[0]);
        eprintln!("\nNo figure file provided, using default cube...");
        let mut app = TerminalApp::new(Figure::cube(2.0), RenderConfig::default())?;
        return app.run();
    }

    let path = &args[1];
    println!("Loading figure: {}", path);

    let figure = load_figure(Path::new(path))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let config = RenderConfig::for_figure(&figure)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    println!(
        "Loaded {}: {} points, {} edges",
        figure.name,
        figure.points.len(),
        figure.edges.len()
    );
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(figure, config)?.with_source(path);
    app.run()
}
