//! Terminal capability detection and coloring

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled on stdout
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Colors console text when enabled, or passes it through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Color as success (green)
    pub fn success(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Color as an error or warning (amber)
    pub fn warning(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Color as a heading (blue)
    pub fn heading(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::LightBlue>().bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Dim the text
    pub fn dim(self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Palette;

    #[test]
    fn disabled_palette_passes_text_through() {
        let palette = Palette::new(false);
        assert_eq!(palette.success("ok"), "ok");
        assert_eq!(palette.warning("careful"), "careful");
        assert_eq!(palette.heading("Title"), "Title");
        assert_eq!(palette.dim("quiet"), "quiet");
    }

    #[test]
    fn enabled_palette_wraps_text_in_escape_codes() {
        let palette = Palette::new(true);
        let colored = palette.success("ok");
        assert!(colored.contains("ok"));
        assert!(colored.starts_with('\u{1b}'));
    }
}
