/// wirefig Web - WASM binding that paints figures onto an HTML canvas
///
/// The figure is rasterized by the core pipeline and copied into the
/// canvas with `putImageData`, so the browser draws exactly what the PNG
/// exporter writes.
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};
use wirefig_core::{
    config::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH},
    loader, render, Camera, Figure, RenderConfig,
};

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse and validate a YAML figure together with its render config
fn load(source: &str) -> Result<(Figure, RenderConfig), JsValue> {
    let figure = loader::from_yaml_str(source).map_err(js_error)?;
    let config = RenderConfig::for_figure(&figure).map_err(js_error)?;
    Ok((figure, config))
}

#[wasm_bindgen]
pub struct WebViewer {
    figure: Figure,
    camera: Camera,
    config: RenderConfig,
    context: Option<CanvasRenderingContext2d>,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl WebViewer {
    /// Load a figure from YAML source
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str) -> Result<WebViewer, JsValue> {
        let (figure, config) = load(source)?;
        Ok(WebViewer {
            camera: figure.camera.clone(),
            figure,
            config,
            context: None,
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        })
    }

    /// Bind to the `<canvas>` element with the given id and take its size
    pub fn attach(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_error("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(format!("no element with id '{canvas_id}'")))?
            .dyn_into()
            .map_err(|_| js_error(format!("'{canvas_id}' is not a canvas")))?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| js_error("unexpected context type"))?;

        self.width = canvas.width();
        self.height = canvas.height();
        self.context = Some(context);
        Ok(())
    }

    /// Draw the figure through the current camera
    pub fn render(&self) -> Result<(), JsValue> {
        let context = self
            .context
            .as_ref()
            .ok_or_else(|| js_error("viewer is not attached to a canvas"))?;

        let canvas = render(&self.figure, &self.camera, &self.config, self.width, self.height)
            .map_err(js_error)?;
        let rgba = canvas.into_rgba();
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(rgba.as_slice()),
            self.width,
            self.height,
        )?;
        context.put_image_data(&image, 0.0, 0.0)
    }

    pub fn set_observer(&mut self, x: f64, y: f64, z: f64) {
        self.camera = self.camera.with_observer(x, y, z);
    }

    /// Non-positive or non-finite distances are ignored
    pub fn set_distance(&mut self, distance: f64) {
        if distance.is_finite() && distance > 0.0 {
            self.camera = self.camera.with_distance(distance);
        }
    }

    /// Return to the camera stored in the figure
    pub fn reset_camera(&mut self) {
        self.camera = self.figure.camera.clone();
    }

    #[wasm_bindgen(getter)]
    pub fn observer_x(&self) -> f64 {
        self.camera.observer.x
    }

    #[wasm_bindgen(getter)]
    pub fn observer_y(&self) -> f64 {
        self.camera.observer.y
    }

    #[wasm_bindgen(getter)]
    pub fn observer_z(&self) -> f64 {
        self.camera.observer.z
    }

    #[wasm_bindgen(getter)]
    pub fn distance(&self) -> f64 {
        self.camera.distance
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.figure.name.clone()
    }

    pub fn toggle_vertices(&mut self) -> bool {
        self.config.show_vertices = !self.config.show_vertices;
        self.config.show_vertices
    }

    pub fn toggle_labels(&mut self) -> bool {
        self.config.show_labels = !self.config.show_labels;
        self.config.show_labels
    }

    /// Replace the figure with new YAML source. On error the current figure is kept.
    pub fn reload(&mut self, source: &str) -> Result<(), JsValue> {
        let (figure, config) = load(source)?;
        self.camera = figure.camera.clone();
        self.figure = figure;
        self.config = config;
        Ok(())
    }
}
