//! Renderer styling configuration.
//!
//! Styles are an explicit value handed to the renderer at construction.
//! There is no process-wide style state.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on or off regardless of the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== TableStyles =====

/// Styles used by the result browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyles {
    /// Table and picker borders.
    pub border: Style,
    /// Column header row.
    pub header: Style,
    /// Row under the cursor while the table is focused.
    pub highlight: Style,
    /// Secondary text such as the page indicator.
    pub muted: Style,
    /// Key names in help lines.
    pub help_key: Style,
    /// Descriptions in help lines.
    pub help_desc: Style,
    /// The `[mode]` tag and error markers next to the filter input.
    pub mode_tag: Style,
    /// Invalid pattern marker.
    pub error: Style,
    /// Character under the filter edit cursor.
    pub edit_cursor: Style,
}

impl TableStyles {
    /// Styles for the given color configuration.
    ///
    /// Without colors only modifiers (bold, underline, reverse) remain, so
    /// the cursor row and header stay distinguishable.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                border: Style::default().fg(Color::Indexed(240)),
                header: Style::default()
                    .fg(Color::Indexed(250))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                highlight: Style::default()
                    .fg(Color::Indexed(229))
                    .bg(Color::Indexed(57)),
                muted: Style::default().fg(Color::DarkGray),
                help_key: Style::default().fg(Color::Gray),
                help_desc: Style::default().fg(Color::DarkGray),
                mode_tag: Style::default().fg(Color::Cyan),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                edit_cursor: Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                border: Style::default(),
                header: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                highlight: Style::default().add_modifier(Modifier::REVERSED),
                muted: Style::default(),
                help_key: Style::default(),
                help_desc: Style::default(),
                mode_tag: Style::default(),
                error: Style::default().add_modifier(Modifier::BOLD),
                edit_cursor: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for TableStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR env var should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_no_color_env_any_value_disables() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR with empty string should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled(), "Colors should be enabled by default");
    }

    #[test]
    fn colored_styles_have_foregrounds() {
        let styles = TableStyles::with_color_config(ColorConfig::fixed(true));
        assert!(styles.highlight.fg.is_some());
        assert!(styles.highlight.bg.is_some());
        assert!(styles.border.fg.is_some());
    }

    #[test]
    fn monochrome_styles_have_no_colors_but_keep_highlight() {
        let styles = TableStyles::with_color_config(ColorConfig::fixed(false));
        assert_eq!(styles.border.fg, None);
        assert_eq!(styles.highlight.bg, None);
        assert!(styles.highlight.add_modifier.contains(Modifier::REVERSED));
        assert!(styles.header.add_modifier.contains(Modifier::BOLD));
    }
}
