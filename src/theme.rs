use serde::Serialize;

/// The six colors the presentation layer draws with, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub subtext: &'static str,
    pub primary: &'static str,
    pub border: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: "#f8fafc",
        surface: "#ffffff",
        text: "#1e293b",
        subtext: "#64748b",
        primary: "#6366f1",
        border: "#e2e8f0",
    };

    pub const DARK: Palette = Palette {
        background: "#0f172a",
        surface: "#1e293b",
        text: "#f8fafc",
        subtext: "#94a3b8",
        primary: "#6366f1",
        border: "#334155",
    };

    pub fn for_mode(is_dark: bool) -> Palette {
        if is_dark { Palette::DARK } else { Palette::LIGHT }
    }
}

/// Dark-mode flag plus the palette derived from it.
#[derive(Debug, Clone, Copy)]
pub struct ThemeState {
    pub is_dark: bool,
    pub colors: Palette,
}

impl ThemeState {
    pub fn new(is_dark: bool) -> Self {
        Self {
            is_dark,
            colors: Palette::for_mode(is_dark),
        }
    }

    pub fn toggle(&mut self) {
        self.is_dark = !self.is_dark;
        self.colors = Palette::for_mode(self.is_dark);
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        ThemeState::new(false)
    }
}
