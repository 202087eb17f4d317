//! PNG export of rendered canvases.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;
use wirefig_core::{Canvas, Surface};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("canvas buffer does not match its {width}x{height} size")]
    Buffer { width: u32, height: u32 },
}

/// `<dir>/<figure name>.png`, with path separators in the name replaced
pub fn output_path(dir: &Path, figure_name: &str) -> PathBuf {
    let stem: String = figure_name
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let stem = if stem.is_empty() { "figure".to_string() } else { stem };
    dir.join(format!("{stem}.png"))
}

/// Encode `canvas` as a PNG at `path`, creating missing parent directories
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let (width, height) = (canvas.width(), canvas.height());
    let image = RgbaImage::from_raw(width, height, canvas.as_rgba().to_vec())
        .ok_or(ExportError::Buffer { width, height })?;

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ExportError::Encode {
            path: path.to_path_buf(),
            source,
        })
}
