/// Interactive camera state shared by the viewer's key handling and rendering
use crossterm::event::KeyCode;
use wirefig_core::{Camera, Figure, RenderConfig};

/// World units the observer moves per key press
pub const OBSERVER_STEP: f64 = 0.5;
/// Change in projection distance per key press
pub const DISTANCE_STEP: f64 = 0.5;
/// The distance never drops below this
pub const MIN_DISTANCE: f64 = 0.5;

/// Something the user asked the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    MoveObserver { dx: f64, dy: f64, dz: f64 },
    Zoom(f64),
    ToggleVertices,
    ToggleLabels,
    ToggleGrid,
    ResetCamera,
    Reload,
    SavePng,
    Quit,
}

impl Action {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        let step = OBSERVER_STEP;
        let action = match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('a') | KeyCode::Left => Action::MoveObserver { dx: -step, dy: 0.0, dz: 0.0 },
            KeyCode::Char('d') | KeyCode::Right => Action::MoveObserver { dx: step, dy: 0.0, dz: 0.0 },
            KeyCode::Char('w') | KeyCode::Up => Action::MoveObserver { dx: 0.0, dy: step, dz: 0.0 },
            KeyCode::Char('s') | KeyCode::Down => Action::MoveObserver { dx: 0.0, dy: -step, dz: 0.0 },
            KeyCode::Char('e') | KeyCode::PageUp => Action::MoveObserver { dx: 0.0, dy: 0.0, dz: step },
            KeyCode::Char('c') | KeyCode::PageDown => Action::MoveObserver { dx: 0.0, dy: 0.0, dz: -step },
            KeyCode::Char('+') | KeyCode::Char('=') => Action::Zoom(DISTANCE_STEP),
            KeyCode::Char('-') | KeyCode::Char('_') => Action::Zoom(-DISTANCE_STEP),
            KeyCode::Char('v') => Action::ToggleVertices,
            KeyCode::Char('l') => Action::ToggleLabels,
            KeyCode::Char('g') => Action::ToggleGrid,
            KeyCode::Char('0') => Action::ResetCamera,
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Char('p') => Action::SavePng,
            _ => return None,
        };
        Some(action)
    }
}

/// The figure on screen plus the user's current camera and display toggles.
///
/// The figure's own camera is never modified; each render gets a snapshot of
/// [`ViewState::camera`].
#[derive(Debug, Clone)]
pub struct ViewState {
    pub figure: Figure,
    pub camera: Camera,
    pub config: RenderConfig,
    pub show_grid: bool,
}

impl ViewState {
    pub fn new(figure: Figure, config: RenderConfig) -> Self {
        Self {
            camera: figure.camera.clone(),
            figure,
            config,
            show_grid: false,
        }
    }

    /// Swap in a freshly loaded figure, dropping camera changes
    pub fn replace(&mut self, figure: Figure, config: RenderConfig) {
        *self = Self {
            show_grid: self.show_grid,
            ..Self::new(figure, config)
        };
    }

    /// Apply a view action. Returns whether the picture changed.
    ///
    /// Reload, save and quit are handled by the caller and report no change here.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::MoveObserver { dx, dy, dz } => {
                let (x, y, z) = {
                    let obs = &self.camera.observer;
                    (obs.x + dx, obs.y + dy, obs.z + dz)
                };
                self.camera = self.camera.with_observer(x, y, z);
            }
            Action::Zoom(delta) => {
                let distance = (self.camera.distance + delta).max(MIN_DISTANCE);
                if distance == self.camera.distance {
                    return false;
                }
                self.camera = self.camera.with_distance(distance);
            }
            Action::ToggleVertices => self.config.show_vertices = !self.config.show_vertices,
            Action::ToggleLabels => self.config.show_labels = !self.config.show_labels,
            Action::ToggleGrid => self.show_grid = !self.show_grid,
            Action::ResetCamera => {
                if self.camera == self.figure.camera {
                    return false;
                }
                self.camera = self.figure.camera.clone();
            }
            Action::Reload | Action::SavePng | Action::Quit => return false,
        }
        true
    }

    /// One-line summary of the figure and camera
    pub fn status(&self) -> String {
        let obs = &self.camera.observer;
        format!(
            "{} | observer ({:.1}, {:.1}, {:.1}) | distance {:.1} | {}{}{}",
            self.figure.name,
            obs.x,
            obs.y,
            obs.z,
            self.camera.distance,
            if self.config.show_vertices { "V" } else { "-" },
            if self.config.show_labels { "L" } else { "-" },
            if self.show_grid { "G" } else { "-" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ViewState {
        ViewState::new(Figure::cube(2.0), RenderConfig::default())
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(Action::from_key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(
            Action::from_key(KeyCode::Up),
            Some(Action::MoveObserver { dx: 0.0, dy: OBSERVER_STEP, dz: 0.0 })
        );
        assert_eq!(Action::from_key(KeyCode::Char('+')), Some(Action::Zoom(DISTANCE_STEP)));
        assert_eq!(Action::from_key(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_move_observer_leaves_figure_camera() {
        let mut state = state();
        assert!(state.apply(Action::MoveObserver { dx: 1.0, dy: -0.5, dz: 2.0 }));
        assert_eq!(state.camera.observer.x, 1.0);
        assert_eq!(state.camera.observer.y, -0.5);
        assert_eq!(state.camera.observer.z, 2.0);
        assert_eq!(state.figure.camera, Camera::default_view());
    }

    #[test]
    fn test_zoom_is_floored() {
        let mut state = state();
        state.camera = state.camera.with_distance(1.0);
        assert!(state.apply(Action::Zoom(-DISTANCE_STEP)));
        assert_eq!(state.camera.distance, MIN_DISTANCE);
        assert!(!state.apply(Action::Zoom(-DISTANCE_STEP)));
        assert_eq!(state.camera.distance, MIN_DISTANCE);
    }

    #[test]
    fn test_toggles() {
        let mut state = state();
        assert!(state.apply(Action::ToggleVertices));
        assert!(state.apply(Action::ToggleLabels));
        assert!(state.apply(Action::ToggleGrid));
        assert!(state.config.show_vertices && state.config.show_labels && state.show_grid);
        assert!(state.status().ends_with("VLG"));
    }

    #[test]
    fn test_reset_camera() {
        let mut state = state();
        assert!(!state.apply(Action::ResetCamera));
        state.apply(Action::Zoom(3.0));
        assert!(state.apply(Action::ResetCamera));
        assert_eq!(state.camera, state.figure.camera);
    }

    #[test]
    fn test_replace_keeps_grid() {
        let mut state = state();
        state.apply(Action::ToggleGrid);
        state.apply(Action::Zoom(3.0));
        state.replace(Figure::cube(4.0), RenderConfig::default());
        assert!(state.show_grid);
        assert_eq!(state.camera, Camera::default_view());
    }

    #[test]
    fn test_status() {
        let status = state().status();
        assert!(status.starts_with("cube | observer (0.0, 0.0, 0.0) | distance 10.0"));
    }
}
