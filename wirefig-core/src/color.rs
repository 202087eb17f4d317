//! Color names and hex strings resolved to normalized RGB.

use nom::{
    bytes::complete::take_while_m_n,
    combinator::{all_consuming, map_res},
    sequence::tuple,
    IResult,
};

use crate::error::ColorError;

/// An RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Normalize 8-bit components, rounded to three decimals
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(normalize(r), normalize(g), normalize(b))
    }

    /// Opaque 8-bit RGBA for raster buffers
    pub fn to_rgba8(self) -> [u8; 4] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b), 255]
    }

    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const GRAY: Rgb = Rgb::new(0.5, 0.5, 0.5);
    pub const LIGHT_GRAY: Rgb = Rgb::new(0.82, 0.82, 0.82);
    pub const DARK_GRAY: Rgb = Rgb::new(0.25, 0.25, 0.25);
    pub const DARK_RED: Rgb = Rgb::new(0.8, 0.0, 0.0);
}

const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("white", Rgb::WHITE),
    ("black", Rgb::BLACK),
    ("gray", Rgb::GRAY),
    ("grey", Rgb::GRAY),
    ("lightgray", Rgb::LIGHT_GRAY),
    ("lightgrey", Rgb::LIGHT_GRAY),
    ("darkgray", Rgb::DARK_GRAY),
    ("darkgrey", Rgb::DARK_GRAY),
];

/// Resolve a color name or hex string (`#rgb`, `#rrggbb`, `#` optional).
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn resolve(spec: &str) -> Result<Rgb, ColorError> {
    let value = spec.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some((_, color)) = NAMED_COLORS.iter().find(|(name, _)| *name == value) {
        return Ok(*color);
    }

    let hex = value.strip_prefix('#').unwrap_or(&value);
    let digits: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => {
            return Err(ColorError::InvalidLength {
                value: spec.to_string(),
            })
        }
    };

    match parse_hex_triplet(&digits) {
        Ok((_, (r, g, b))) => Ok(Rgb::from_rgb8(r, g, b)),
        Err(_) => Err(ColorError::InvalidHex {
            value: spec.to_string(),
        }),
    }
}

fn parse_hex_triplet(input: &str) -> IResult<&str, (u8, u8, u8)> {
    all_consuming(tuple((hex_byte, hex_byte, hex_byte)))(input)
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |pair| u8::from_str_radix(pair, 16),
    )(input)
}

fn normalize(component: u8) -> f64 {
    (f64::from(component) / 255.0 * 1000.0).round() / 1000.0
}

fn to_byte(component: f64) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}
