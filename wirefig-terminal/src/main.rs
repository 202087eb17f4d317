/// wirefig - render wireframe figures to PNG or view them in the terminal
///
/// Usage:
///   wirefig generate figure.yaml -o output   write output/<name>.png
///   wirefig view figure.yaml                 interactive terminal viewer
///   wirefig figure.yaml                      same as generate
use anyhow::{bail, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wirefig_core::{draw_grid, Canvas, Figure, RenderConfig};
use wirefig_terminal::{export, load_figure, TerminalApp};

/// Largest canvas side accepted for PNG output, in pixels
const MAX_CANVAS_SIDE: u32 = 16_384;

#[derive(Parser, Debug)]
#[command(name = "wirefig", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Figure file to render (same as `generate FILE`)
    file: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a figure file to a PNG
    #[command(visible_aliases = ["gen", "png"])]
    Generate {
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Open a figure file in the interactive terminal viewer
    #[command(visible_alias = "show")]
    View {
        file: PathBuf,
        /// Directory for snapshots taken with `p`
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,
    /// Canvas width in pixels, overrides the figure's render settings
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels, overrides the figure's render settings
    #[arg(long)]
    height: Option<u32>,
    /// Overlay a reference grid
    #[arg(long)]
    grid: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = match (cli.command, cli.file) {
        (Some(command), _) => command,
        (None, Some(file)) => Command::Generate {
            file,
            output: cli.output,
        },
        (None, None) => {
            Cli::command().print_help()?;
            bail!("no figure file given");
        }
    };

    let default_level = match command {
        Command::Generate { .. } => "info",
        Command::View { .. } => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match command {
        Command::Generate { file, output } => generate(&file, &output),
        Command::View { file, output } => view(&file, output),
    }
}

fn generate(file: &Path, args: &OutputArgs) -> Result<()> {
    let figure = load_figure(file)?;
    let config = RenderConfig::for_figure(&figure)
        .with_context(|| format!("invalid render settings in {}", file.display()))?;

    let (width, height) = canvas_size(&figure, args)?;

    let mut canvas = Canvas::new(width, height);
    wirefig_core::draw_figure(&mut canvas, &figure, &figure.camera, &config)
        .with_context(|| format!("failed to render {}", figure.name))?;
    if args.grid {
        draw_grid(&mut canvas);
    }

    let path = export::output_path(&args.output, &figure.name);
    export::save_png(&canvas, &path)?;

    info!(
        figure = %figure.name,
        points = figure.points.len(),
        edges = figure.edges.len(),
        "wrote {}",
        path.display()
    );
    println!("{}", path.display());
    Ok(())
}

/// CLI flags first, then the figure's render settings, then 800x600
fn canvas_size(figure: &Figure, args: &OutputArgs) -> Result<(u32, u32)> {
    let (file_width, file_height) = figure
        .render
        .clone()
        .unwrap_or_default()
        .canvas_size();
    let width = args.width.filter(|&w| w > 0).unwrap_or(file_width);
    let height = args.height.filter(|&h| h > 0).unwrap_or(file_height);

    if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
        bail!("canvas {width}x{height} is too large (at most {MAX_CANVAS_SIDE} pixels per side)");
    }
    Ok((width, height))
}

fn view(file: &Path, output: PathBuf) -> Result<()> {
    let figure = load_figure(file)?;
    let config = RenderConfig::for_figure(&figure)
        .with_context(|| format!("invalid render settings in {}", file.display()))?;

    let mut app = TerminalApp::new(figure, config)
        .context("failed to query terminal size")?
        .with_source(file)
        .with_output_dir(output);
    app.run().context("terminal viewer failed")?;
    Ok(())
}
