use wirefig_core::{loader, render_figure, RenderConfig, Rgb};

const CUBE: &str = include_str!("../../samples/cube.yaml");
const HOUSE: &str = include_str!("../../samples/house.yaml");
const PYRAMID: &str = include_str!("../../samples/pyramid.json");

#[test]
fn cube_sample_loads_with_labels() {
    let figure = loader::from_yaml_str(CUBE).unwrap();
    assert_eq!(figure.points.len(), 8);
    assert_eq!(figure.edges.len(), 12);
    assert_eq!(figure.camera.observer.x, 0.5);

    let config = RenderConfig::for_figure(&figure).unwrap();
    assert!(config.show_vertices && config.show_labels);
    assert!(render_figure(&figure, &config, 400, 300).is_ok());
}

#[test]
fn house_sample_uses_legacy_keys() {
    let figure = loader::from_yaml_str(HOUSE).unwrap();
    assert_eq!(figure.name, "casa");
    assert_eq!(figure.points[8].label(), Some("I"));
    assert_eq!(figure.camera.distance, 8.0);
    assert_eq!(figure.camera.width, 12.8);

    let settings = figure.render.clone().unwrap();
    assert_eq!(settings.canvas_size(), (1024, 768));

    let config = RenderConfig::for_figure(&figure).unwrap();
    assert_eq!(config.line_width, 2.0);
    let canvas = render_figure(&figure, &config, 1024, 768).unwrap();
    assert_eq!(canvas.pixel(0, 0), Some(Rgb::from_rgb8(0x1e, 0x1e, 0x2e).to_rgba8()));
}

#[test]
fn pyramid_sample_is_json() {
    let figure = loader::from_json_str(PYRAMID).unwrap();
    assert_eq!(figure.points.len(), 5);
    assert_eq!(figure.edges.len(), 8);

    let config = RenderConfig::for_figure(&figure).unwrap();
    assert_eq!(config.line_width, 1.5);
    assert!(config.show_labels);
}
