//! Hex color parsing and RGB/HSL conversion.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected a #RRGGBB color, got {0:?}")]
pub struct ColorParseError(pub String);

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

pub fn parse_hex(input: &str) -> Result<Rgb, ColorParseError> {
    let hex = input.trim().strip_prefix('#').unwrap_or(input.trim());
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError(input.to_string()));
    }
    let channel = |at: usize| {
        u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| ColorParseError(input.to_string()))
    };
    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub fn to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    } * 60.0;

    Hsl {
        h,
        s: s * 100.0,
        l: l * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex("#FFD700").unwrap(), Rgb { r: 255, g: 215, b: 0 });
        assert_eq!(parse_hex("ffd700").unwrap(), Rgb { r: 255, g: 215, b: 0 });
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_hex("#FFD70").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
        assert!(parse_hex("").is_err());
    }

    #[test]
    fn gold_in_hsl() {
        let hsl = to_hsl(Rgb { r: 255, g: 215, b: 0 });
        assert!((hsl.h - 50.6).abs() < 0.1);
        assert!((hsl.s - 100.0).abs() < 0.01);
        assert!((hsl.l - 50.0).abs() < 0.01);
    }

    #[test]
    fn grays_have_no_hue_or_saturation() {
        let hsl = to_hsl(Rgb { r: 128, g: 128, b: 128 });
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 50.196).abs() < 0.001);
    }

    #[test]
    fn primary_blue_hue() {
        let hsl = to_hsl(Rgb { r: 0, g: 0, b: 255 });
        assert!((hsl.h - 240.0).abs() < 1e-9);
    }
}
