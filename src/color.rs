//! Color specifications
//!
//! Colors are given the way they are in matplotlib:
//!  - single letter codes: `b`, `g`, `r`, `c`, `m`, `y`, `k`, `w`,
//!  - hexadecimal RGB: `#ae76a3`,
//!  - the Tableau 10 palette: `C0` to `C9` or `tab:blue`, `tab:orange`, ...,
//!  - a few color names: `black`, `white`, `red`, ...

use crate::config::ConfigError;
use plotters::style::RGBColor;

const TABLEAU: [&str; 10] = [
    "blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan",
];

fn tableau(k: usize) -> Option<RGBColor> {
    colorous::TABLEAU10
        .get(k)
        .map(|color| RGBColor(color.r, color.g, color.b))
}

fn hex(spec: &str) -> Option<RGBColor> {
    let digits = spec.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Parses a color specification
pub fn parse(spec: &str) -> Result<RGBColor, ConfigError> {
    let spec = spec.trim();
    let lower = spec.to_lowercase();
    let color = match lower.as_str() {
        "b" | "blue" => Some(RGBColor(0, 0, 255)),
        "g" | "green" => Some(RGBColor(0, 128, 0)),
        "r" | "red" => Some(RGBColor(255, 0, 0)),
        "c" | "cyan" => Some(RGBColor(0, 191, 191)),
        "m" | "magenta" => Some(RGBColor(191, 0, 191)),
        "y" | "yellow" => Some(RGBColor(191, 191, 0)),
        "k" | "black" => Some(RGBColor(0, 0, 0)),
        "w" | "white" => Some(RGBColor(255, 255, 255)),
        "gray" | "grey" => Some(RGBColor(128, 128, 128)),
        s if s.starts_with('#') => hex(s),
        s if s.starts_with("tab:") => TABLEAU
            .iter()
            .position(|&name| name == &s[4..] || (name == "gray" && &s[4..] == "grey"))
            .and_then(tableau),
        s if s.starts_with('c') => s[1..].parse::<usize>().ok().and_then(tableau),
        _ => None,
    };
    color.ok_or_else(|| ConfigError::Color(spec.to_string()))
}
