use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const SET1: [&str; 9] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Fraction each category colour is mixed toward white.
const CATEGORY_FADE: f64 = 0.2;

/// Set1 + Set2 + Set3, faded toward white so labels stay readable.
pub static CATEGORY_PALETTE: Lazy<Vec<String>> = Lazy::new(|| {
    SET1.iter()
        .chain(SET2.iter())
        .chain(SET3.iter())
        .map(|hex| fade_toward_white(hex, CATEGORY_FADE).unwrap_or_else(|| hex.to_string()))
        .collect()
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub legend_font_size: f32,
    pub text_color: String,
    pub legend_text_color: String,
    pub background: String,
    pub tooltip_background: String,
    pub palette: Vec<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 10.0,
            legend_font_size: 14.0,
            text_color: "#000000".to_string(),
            legend_text_color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            tooltip_background: "rgba(255, 255, 204, 0.9)".to_string(),
            palette: CATEGORY_PALETTE.clone(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 10.0,
            legend_font_size: 13.0,
            text_color: "#1C2430".to_string(),
            legend_text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            tooltip_background: "#F8FAFF".to_string(),
            palette: CATEGORY_PALETTE.clone(),
        }
    }
}

pub fn parse_hex_color(input: &str) -> Option<(u8, u8, u8)> {
    let hex = input.trim().strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Linear RGB interpolation from `color` toward white by `amount` in `[0, 1]`.
pub fn fade_toward_white(color: &str, amount: f64) -> Option<String> {
    let (r, g, b) = parse_hex_color(color)?;
    let t = amount.clamp(0.0, 1.0);
    let mix = |c: u8| -> u8 {
        let c = f64::from(c);
        (c + (255.0 - c) * t).round().clamp(0.0, 255.0) as u8
    };
    Some(format!("#{:02x}{:02x}{:02x}", mix(r), mix(g), mix(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_every_scheme_colour() {
        assert_eq!(CATEGORY_PALETTE.len(), 29);
        assert_eq!(CATEGORY_PALETTE[0], "#e94849");
    }

    #[test]
    fn fade_handles_short_hex_and_bounds() {
        assert_eq!(fade_toward_white("#000", 0.5).as_deref(), Some("#808080"));
        assert_eq!(fade_toward_white("#123456", 0.0).as_deref(), Some("#123456"));
        assert_eq!(fade_toward_white("#123456", 3.0).as_deref(), Some("#ffffff"));
        assert_eq!(fade_toward_white("red", 0.2), None);
    }
}
