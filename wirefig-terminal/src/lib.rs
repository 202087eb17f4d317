/// Terminal front end: figure files, PNG export and the interactive viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::fs;
use std::io::{self, stdout, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use wirefig_core::{
    draw_figure, draw_grid,
    loader::{self, Format},
    Canvas, Figure, LoadError, RenderConfig,
};

pub mod export;
pub mod renderer;
pub mod view;

pub use renderer::TerminalRenderer;
pub use view::{Action, ViewState};

const KEY_HELP: &str = "arrows/wasd/ec move  +/- dist  v l g  0 reset  r reload  p png  q quit";

#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
}

/// Read and validate a figure file. `.json` files are parsed as JSON, anything else as YAML.
pub fn load_figure(path: &Path) -> Result<Figure, FileError> {
    let source = fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    loader::parse(&source, Format::from_path(path)).map_err(|source| FileError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Interactive terminal viewer for a single figure
pub struct TerminalApp {
    state: ViewState,
    renderer: TerminalRenderer,
    source: Option<PathBuf>,
    output_dir: PathBuf,
    running: bool,
    dirty: bool,
    message: Option<String>,
}

impl TerminalApp {
    pub fn new(figure: Figure, config: RenderConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            state: ViewState::new(figure, config),
            renderer: TerminalRenderer::new(width as usize, status_rows(height)),
            source: None,
            output_dir: PathBuf::from("output"),
            running: true,
            dirty: true,
            message: None,
        })
    }

    /// File to re-read on `r`
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Directory snapshots are written to on `p`
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let poll_interval = Duration::from_millis(1000 / 30);

        while self.running {
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }

            if event::poll(poll_interval)? {
                self.handle_event(event::read()?)?;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = Action::from_key(key.code) {
                    self.handle_action(action);
                }
            }
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, status_rows(height));
                self.dirty = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Reload => {
                self.reload();
                self.dirty = true;
            }
            Action::SavePng => {
                self.save_snapshot();
                self.dirty = true;
            }
            action => {
                if self.state.apply(action) {
                    self.message = None;
                    self.dirty = true;
                }
            }
        }
    }

    fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            self.message = Some("nothing to reload".to_string());
            return;
        };

        let loaded = load_figure(&path).map_err(|e| e.to_string()).and_then(|figure| {
            RenderConfig::for_figure(&figure)
                .map(|config| (figure, config))
                .map_err(|e| e.to_string())
        });

        match loaded {
            Ok((figure, config)) => {
                info!(path = %path.display(), "reloaded figure");
                self.message = Some(format!("reloaded {}", path.display()));
                self.state.replace(figure, config);
            }
            Err(e) => {
                // Keep showing the previous figure
                warn!("reload failed: {e}");
                self.message = Some(format!("reload failed: {e}"));
            }
        }
    }

    fn save_snapshot(&mut self) {
        let (width, height) = self
            .state
            .figure
            .render
            .clone()
            .unwrap_or_default()
            .canvas_size();
        let path = export::output_path(&self.output_dir, &self.state.figure.name);

        let result = wirefig_core::render(
            &self.state.figure,
            &self.state.camera,
            &self.state.config,
            width,
            height,
        )
        .map_err(|e| e.to_string())
        .and_then(|canvas| export::save_png(&canvas, &path).map_err(|e| e.to_string()));

        self.message = Some(match result {
            Ok(()) => format!("saved {}", path.display()),
            Err(e) => {
                warn!("snapshot failed: {e}");
                format!("save failed: {e}")
            }
        });
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = self.renderer.pixel_size();
        let mut canvas = Canvas::new(width, height);
        let camera = self.state.camera.clone();

        if let Err(e) = draw_figure(&mut canvas, &self.state.figure, &camera, &self.state.config) {
            self.message = Some(e.to_string());
        }
        if self.state.show_grid {
            draw_grid(&mut canvas);
        }
        self.renderer.load(&canvas);

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Status line on the bottom row
        let (columns, rows) = terminal::size()?;
        let status = match &self.message {
            Some(message) => format!("{} | {}", self.state.status(), message),
            None => format!("{} | {}", self.state.status(), KEY_HELP),
        };
        let status: String = status.chars().take(columns as usize).collect();
        queue!(
            stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            SetBackgroundColor(Color::Black),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Rows left for the picture once the status line is reserved
fn status_rows(height: u16) -> usize {
    height.saturating_sub(1) as usize
}
