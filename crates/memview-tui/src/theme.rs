use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub title: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,

    // Grid
    pub address: Color,
    pub hex_bytes: Color,
    pub hex_ascii: Color,

    // Dialogs
    pub dialog_bg: Color,
    pub dialog_fg: Color,
    pub dialog_border: Color,

    pub highlight_fg: Color,
    pub error_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// Solarized Palette
struct Solarized;
impl Solarized {
    const BASE03: Color = Color::Rgb(0, 43, 54);
    const BASE02: Color = Color::Rgb(7, 54, 66);
    const BASE01: Color = Color::Rgb(88, 110, 117);
    const BASE00: Color = Color::Rgb(101, 123, 131);
    const BASE0: Color = Color::Rgb(131, 148, 150);
    const BASE1: Color = Color::Rgb(147, 161, 161);
    const BASE2: Color = Color::Rgb(238, 232, 213);
    const BASE3: Color = Color::Rgb(253, 246, 227);
    const YELLOW: Color = Color::Rgb(181, 137, 0);
    const ORANGE: Color = Color::Rgb(203, 75, 22);
    const RED: Color = Color::Rgb(220, 50, 47);
    const BLUE: Color = Color::Rgb(38, 139, 210);
    const CYAN: Color = Color::Rgb(42, 161, 152);
    const GREEN: Color = Color::Rgb(133, 153, 0);
}

impl Theme {
    /// Unknown names fall back to the dark theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Light" | "Solarized Light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Dark",
            background: Solarized::BASE03,
            foreground: Solarized::BASE0,
            border: Solarized::BLUE,
            title: Solarized::BASE1,
            selection_bg: Solarized::GREEN,
            selection_fg: Solarized::BASE3,
            status_bar_bg: Solarized::BASE02,
            status_bar_fg: Solarized::BASE1,

            address: Solarized::YELLOW,
            hex_bytes: Solarized::BASE1,
            hex_ascii: Solarized::CYAN,

            dialog_bg: Solarized::BASE02,
            dialog_fg: Solarized::BASE0,
            dialog_border: Solarized::BASE1,

            highlight_fg: Solarized::ORANGE,
            error_fg: Solarized::RED,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light",
            background: Solarized::BASE3,
            foreground: Solarized::BASE00,
            border: Solarized::BLUE,
            title: Solarized::BASE01,
            selection_bg: Solarized::GREEN,
            selection_fg: Solarized::BASE3,
            status_bar_bg: Solarized::BASE2,
            status_bar_fg: Solarized::BASE01,

            address: Solarized::BASE01,
            hex_bytes: Solarized::BASE00,
            hex_ascii: Solarized::CYAN,

            dialog_bg: Solarized::BASE2,
            dialog_fg: Solarized::BASE00,
            dialog_border: Solarized::BASE01,

            highlight_fg: Solarized::ORANGE,
            error_fg: Solarized::RED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("Light").name, "Light");
        assert_eq!(Theme::from_name("Solarized Light").name, "Light");
        assert_eq!(Theme::from_name("no such theme").name, "Dark");
    }
}
