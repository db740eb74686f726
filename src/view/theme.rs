//! Menu color themes

use ratatui::style::Color;

/// Name of the theme used when none is configured
pub const DEFAULT_THEME_NAME: &str = "high-contrast";

/// Colors used by the menu bar and its popups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,

    // Menu bar
    pub menu_fg: Color,
    pub menu_bg: Color,
    pub menu_active_fg: Color,
    pub menu_active_bg: Color,

    // Popups
    pub menu_dropdown_fg: Color,
    pub menu_dropdown_bg: Color,
    pub menu_highlight_fg: Color,
    pub menu_highlight_bg: Color,
    pub menu_border_fg: Color,
    pub menu_separator_fg: Color,
    pub menu_disabled_fg: Color,
    pub menu_shadow_bg: Color,

    // Body and status line of the demo application
    pub editor_fg: Color,
    pub editor_bg: Color,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
}

impl Theme {
    /// Look up a built-in theme by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "high-contrast" => Some(Self::high_contrast()),
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Names accepted by [`Theme::from_name`]
    pub fn available_themes() -> &'static [&'static str] {
        &["high-contrast", "dark", "light"]
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            menu_fg: Color::White,
            menu_bg: Color::Black,
            menu_active_fg: Color::Black,
            menu_active_bg: Color::Yellow,
            menu_dropdown_fg: Color::White,
            menu_dropdown_bg: Color::Black,
            menu_highlight_fg: Color::Black,
            menu_highlight_bg: Color::Cyan,
            menu_border_fg: Color::White,
            menu_separator_fg: Color::Gray,
            menu_disabled_fg: Color::DarkGray,
            menu_shadow_bg: Color::DarkGray,
            editor_fg: Color::White,
            editor_bg: Color::Black,
            status_bar_fg: Color::Black,
            status_bar_bg: Color::White,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            menu_fg: Color::Rgb(204, 204, 204),
            menu_bg: Color::Rgb(60, 60, 60),
            menu_active_fg: Color::White,
            menu_active_bg: Color::Rgb(0, 122, 204),
            menu_dropdown_fg: Color::Rgb(204, 204, 204),
            menu_dropdown_bg: Color::Rgb(37, 37, 38),
            menu_highlight_fg: Color::White,
            menu_highlight_bg: Color::Rgb(9, 71, 113),
            menu_border_fg: Color::Rgb(69, 69, 69),
            menu_separator_fg: Color::Rgb(69, 69, 69),
            menu_disabled_fg: Color::Rgb(110, 110, 110),
            menu_shadow_bg: Color::Rgb(20, 20, 20),
            editor_fg: Color::Rgb(212, 212, 212),
            editor_bg: Color::Rgb(30, 30, 30),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Rgb(0, 122, 204),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            menu_fg: Color::Rgb(51, 51, 51),
            menu_bg: Color::Rgb(221, 221, 221),
            menu_active_fg: Color::White,
            menu_active_bg: Color::Rgb(0, 95, 184),
            menu_dropdown_fg: Color::Rgb(51, 51, 51),
            menu_dropdown_bg: Color::Rgb(243, 243, 243),
            menu_highlight_fg: Color::White,
            menu_highlight_bg: Color::Rgb(0, 95, 184),
            menu_border_fg: Color::Rgb(160, 160, 160),
            menu_separator_fg: Color::Rgb(200, 200, 200),
            menu_disabled_fg: Color::Rgb(160, 160, 160),
            menu_shadow_bg: Color::Rgb(150, 150, 150),
            editor_fg: Color::Black,
            editor_bg: Color::White,
            status_bar_fg: Color::White,
            status_bar_bg: Color::Rgb(0, 95, 184),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::high_contrast()
    }
}
