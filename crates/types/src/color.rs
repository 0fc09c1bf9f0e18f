//! Colors shared by the core and the paint surfaces.
//!
//! Cell colors travel as [`Rgb`] values. Paint surfaces also accept CSS-style
//! color strings (`rgb(…)`, `hsl(…)`, `#rrggbb`, basic keywords like `red`),
//! which is where parsing and the [`css`] formatting helpers come in.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from hue (degrees), saturation and lightness (both `0.0..=1.0`).
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0) / 60.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(channel(r + m), channel(g + m), channel(b + m))
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A color string that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("unsupported color syntax: {0:?}")]
    Unsupported(String),
    #[error("invalid color component {component:?} in {input:?}")]
    InvalidComponent { input: String, component: String },
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex, &input);
        }
        if let Some(rgb) = named(&input) {
            return Ok(rgb);
        }

        let (name, args) = split_function(&input)
            .ok_or_else(|| ColorParseError::Unsupported(input.clone()))?;

        match (name, args.len()) {
            ("rgb", 3) | ("rgba", 4) => Ok(Rgb::new(
                byte(args[0], &input)?,
                byte(args[1], &input)?,
                byte(args[2], &input)?,
            )),
            ("hsl", 3) | ("hsla", 4) => {
                let h = number(args[0].trim_end_matches("deg"), &input)?;
                let s = percent(args[1], &input)?;
                let l = percent(args[2], &input)?;
                Ok(Rgb::from_hsl(h, s, l))
            }
            _ => Err(ColorParseError::Unsupported(input.clone())),
        }
    }
}

/// CSS basic color keywords plus `orange`
const NAMED: [(&str, Rgb); 18] = [
    ("black", Rgb::new(0, 0, 0)),
    ("silver", Rgb::new(192, 192, 192)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("white", Rgb::new(255, 255, 255)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("red", Rgb::new(255, 0, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("green", Rgb::new(0, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("olive", Rgb::new(128, 128, 0)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("blue", Rgb::new(0, 0, 255)),
    ("teal", Rgb::new(0, 128, 128)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("orange", Rgb::new(255, 165, 0)),
];

fn named(input: &str) -> Option<Rgb> {
    NAMED
        .iter()
        .find(|(name, _)| *name == input)
        .map(|&(_, rgb)| rgb)
}

fn split_function(input: &str) -> Option<(&str, Vec<&str>)> {
    let open = input.find('(')?;
    let inner = input[open + 1..].strip_suffix(')')?;
    let args = inner.split(',').map(str::trim).collect();
    Some((input[..open].trim(), args))
}

fn parse_hex(hex: &str, input: &str) -> Result<Rgb, ColorParseError> {
    let invalid = || ColorParseError::InvalidComponent {
        input: input.to_string(),
        component: hex.to_string(),
    };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    match hex.len() {
        3 => Ok(Rgb::new(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        6 => Ok(Rgb::new(pair(0)?, pair(2)?, pair(4)?)),
        _ => Err(invalid()),
    }
}

fn number(component: &str, input: &str) -> Result<f64, ColorParseError> {
    component
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorParseError::InvalidComponent {
            input: input.to_string(),
            component: component.to_string(),
        })
}

fn byte(component: &str, input: &str) -> Result<u8, ColorParseError> {
    number(component, input).map(|v| v.round().clamp(0.0, 255.0) as u8)
}

fn percent(component: &str, input: &str) -> Result<f64, ColorParseError> {
    number(component.trim_end_matches('%'), input).map(|v| v / 100.0)
}

/// Color-string helpers.
pub mod css {
    /// `rgb(r,g,b)` with components rounded to integers.
    pub fn rgb(r: f64, g: f64, b: f64) -> String {
        format!("rgb({:.0},{:.0},{:.0})", r, g, b)
    }

    /// `rgba(r,g,b,a)` with a three-decimal alpha.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> String {
        format!("rgba({:.0},{:.0},{:.0},{:.3})", r, g, b, a)
    }

    /// `hsl(h,S%,L%)`; saturation and lightness are fractions in `0.0..=1.0`.
    pub fn hsl(h: f64, s: f64, l: f64) -> String {
        format!("hsl({:.0},{:.0}%,{:.0}%)", h, s * 100.0, l * 100.0)
    }

    /// `hsla(h,S%,L%,a)` with a three-decimal alpha.
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> String {
        format!("hsla({:.0},{:.0}%,{:.0}%,{:.3})", h, s * 100.0, l * 100.0, a)
    }
}
