//! Note color normalization.
//!
//! A display surface may report a note's background either as the hex the
//! note was saved with or as a computed `rgb(r, g, b)` string. Everything
//! stored or sent uses canonical lowercase `#rrggbb`.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)` into RGB channels. Alpha is dropped.
pub fn parse_rgb_function(raw: &str) -> Option<(u8, u8, u8)> {
    let trimmed = raw.trim().to_ascii_lowercase();
    let inner = trimmed
        .strip_prefix("rgba(")
        .or_else(|| trimmed.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    match parts.next() {
        None => Some((r, g, b)),
        Some(alpha) if alpha.parse::<f64>().is_ok() && parts.next().is_none() => Some((r, g, b)),
        Some(_) => None,
    }
}

/// Format channels as canonical `#rrggbb`.
#[must_use]
pub fn rgb_to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Convert any supported CSS color form to canonical `#rrggbb`.
pub fn css_color_to_hex(raw: &str) -> Option<String> {
    parse_hex_rgb(raw)
        .or_else(|| parse_rgb_function(raw))
        .map(rgb_to_hex)
}

/// Normalize a color to canonical lowercase `#rrggbb`.
pub fn normalize_hex_color(value: &str, fallback: &str) -> String {
    css_color_to_hex(value)
        .or_else(|| css_color_to_hex(fallback))
        .unwrap_or_else(|| crate::net::types::DEFAULT_NOTE_COLOR.to_owned())
}
