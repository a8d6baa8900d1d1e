use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An opaque RGB color, written as `#rrggbb` in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hex color '{0}', expected #rrggbb or #rgb")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #abc is shorthand for #aabbcc
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Surface finish of a bead. Stored as an integer in collection documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Texture {
    #[default]
    Matte,
    Polished,
    /// Plain base color. Also what any unrecognized code decodes to.
    Flat,
}

impl Texture {
    pub fn code(self) -> i64 {
        match self {
            Texture::Matte => 0,
            Texture::Polished => 1,
            Texture::Flat => 2,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Texture::Matte,
            1 => Texture::Polished,
            2 => Texture::Flat,
            other => {
                log::warn!("unrecognized texture code {other}, using flat shading");
                Texture::Flat
            }
        }
    }
}

impl FromStr for Texture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "matte" => Ok(Texture::Matte),
            "polished" => Ok(Texture::Polished),
            "flat" => Ok(Texture::Flat),
            _ => Err(format!("unknown texture '{s}', expected matte|polished|flat")),
        }
    }
}

/// Name of the default bead that stands for an empty cell.
pub const BLANK_NAME: &str = "blank";

pub const BLANK_COLOR: Color = Color::rgb(230, 230, 228);

/// A catalog entry: a named, colored and textured bead.
///
/// Fields are only set while building the value. Once it is shared (grids hold
/// `Arc<BeadType>`), it never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeadType {
    name: String,
    catalog_number: Option<String>,
    base_color: Color,
    highlight_color: Color,
    texture: Texture,
}

impl BeadType {
    pub fn new(name: impl Into<String>, base_color: Color) -> Self {
        Self {
            name: name.into(),
            catalog_number: None,
            base_color,
            highlight_color: base_color,
            texture: Texture::Matte,
        }
    }

    /// The default bead used to fill empty cells.
    pub fn blank() -> Self {
        Self::blank_with_color(BLANK_COLOR)
    }

    pub fn blank_with_color(color: Color) -> Self {
        Self::new(BLANK_NAME, color).with_texture(Texture::Flat)
    }

    pub fn with_highlight(mut self, highlight_color: Color) -> Self {
        self.highlight_color = highlight_color;
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = texture;
        self
    }

    /// Empty numbers are treated as "no catalog number".
    pub fn with_catalog_number(mut self, number: impl Into<String>) -> Self {
        let number = number.into();
        self.catalog_number = (!number.is_empty()).then_some(number);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog_number(&self) -> Option<&str> {
        self.catalog_number.as_deref()
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    pub fn texture(&self) -> Texture {
        self.texture
    }

    pub fn fill(&self) -> Fill {
        Fill::for_bead(self.base_color, self.highlight_color, self.texture)
    }

    pub fn icon(&self) -> BeadIcon {
        BeadIcon::new(self.fill())
    }
}

/// How a bead surface is painted. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    LinearGradient {
        start: (f32, f32),
        end: (f32, f32),
        /// (position in 0..=1, color), ascending by position.
        stops: Vec<(f32, Color)>,
    },
}

impl Fill {
    pub fn for_bead(base: Color, highlight: Color, texture: Texture) -> Self {
        match texture {
            // long soft gradient reads as a matte surface
            Texture::Matte => Fill::LinearGradient {
                start: (14.0, -30.0),
                end: (14.0, 60.0),
                stops: vec![(0.0, highlight), (1.0, base)],
            },
            Texture::Polished => Fill::LinearGradient {
                start: (14.0, 0.0),
                end: (14.0, 40.0),
                stops: vec![(0.0, highlight), (0.2, highlight), (0.5, base)],
            },
            Texture::Flat => Fill::Solid(base),
        }
    }
}

/// Description of the catalog icon for a bead type.
#[derive(Debug, Clone, PartialEq)]
pub struct BeadIcon {
    pub width: u32,
    pub height: u32,
    /// Rounded rectangle as (x, y, w, h).
    pub rect: (u32, u32, u32, u32),
    pub corner_radius: u32,
    pub outline: Color,
    pub fill: Fill,
}

impl BeadIcon {
    pub const OUTLINE: Color = Color::rgb(170, 170, 168);

    fn new(fill: Fill) -> Self {
        Self {
            width: 28,
            height: 40,
            rect: (0, 0, 27, 39),
            corner_radius: 5,
            outline: Self::OUTLINE,
            fill,
        }
    }
}
