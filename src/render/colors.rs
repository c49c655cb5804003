use std::cmp::Ordering;

/// Characters from dark to bright for terminal shade maps.
const SHADES: &[u8] = b" .:-=+*#%@";

/// Map `value` linearly from `[lo, hi]` to a greyscale byte (0-255).
///
/// A flat or unordered range (`hi <= lo`, or either bound NaN) maps
/// everything to mid-grey.
pub fn level_to_greyscale(value: f64, lo: f64, hi: f64) -> u8 {
    if hi.partial_cmp(&lo) != Some(Ordering::Greater) {
        return 128;
    }
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    (t * 255.0).round() as u8
}

/// Map a positive value to dB relative to `max` and clamp to `[floor_db, 0]`.
///
/// Used for log-scaled plots, where zeros and tiny values would otherwise
/// stretch the axis to minus infinity.
pub fn to_db(value: f64, max: f64, floor_db: f64) -> f64 {
    if max <= 0.0 || value <= 0.0 {
        return floor_db;
    }
    (10.0 * (value / max).log10()).max(floor_db).min(0.0)
}

/// Shade character for a greyscale level.
pub fn shade_char(grey: u8) -> char {
    let idx = grey as usize * (SHADES.len() - 1) / 255;
    SHADES[idx] as char
}

/// Glyph used to draw a trace, cycling through the palette by trace index.
pub fn trace_glyph(index: usize) -> char {
    const GLYPHS: [char; 6] = ['*', 'o', '+', 'x', '#', '%'];
    GLYPHS[index % GLYPHS.len()]
}
