//! Terminal styling helpers.
//!
//! Colour is applied only when the terminal is expected to render ANSI
//! escapes; `NO_COLOR` and `TERM=dumb` switch it off.

/// ANSI escape codes used by the text renderer.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse green for the departure tag.
    pub const TAG_DEPART: &str = "\x1b[1;7;32m";
    /// Bold reverse cyan for intermediate stops.
    pub const TAG_STOP: &str = "\x1b[1;7;36m";
    /// Bold reverse magenta for the arrival tag.
    pub const TAG_ARRIVE: &str = "\x1b[1;7;35m";
    /// Bright bold white for airport codes.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for airport names and secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for distances.
    pub const GREEN: &str = "\x1b[32m";
}

/// Resolved colour codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_depart: &'static str,
    pub tag_stop: &'static str,
    pub tag_arrive: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_depart: colors::TAG_DEPART,
            tag_stop: colors::TAG_STOP,
            tag_arrive: colors::TAG_ARRIVE,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_depart: "",
            tag_stop: "",
            tag_arrive: "",
            white_bold: "",
            gray: "",
            green: "",
        }
    }

    /// Pick [`ColorPalette::colored`] or [`ColorPalette::plain`] based on
    /// [`supports_color`].
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a number with thousand separators (commas).
///
/// ```
/// # use airroute_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format kilometres rounded to one decimal, e.g. `2,015.3 km`.
#[must_use]
pub fn format_km(distance_km: f64) -> String {
    let tenths = (distance_km.max(0.0) * 10.0).round() as u64;
    format!(
        "{}.{} km",
        format_with_separators(tenths / 10),
        tenths % 10
    )
}
