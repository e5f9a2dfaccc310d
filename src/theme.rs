use crate::error::{Error, Result};
use log::info;
use ratatui::style::Color;

/// Color roles used across the UI. Every theme sets all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Palette {
    pub(crate) main_bg: Color,
    pub(crate) title_fg: Color,
    pub(crate) list_bg: Color,
    pub(crate) done_bg: Color,
    pub(crate) add_btn_bg: Color,
    pub(crate) exit_btn_bg: Color,
    pub(crate) exit_btn_fg: Color,
    pub(crate) default_fg: Color,
    pub(crate) done_fg: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Theme {
    pub(crate) key: &'static str,
    pub(crate) name: &'static str,
    pub(crate) palette: Palette,
}

impl Theme {
    fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.key.eq_ignore_ascii_case(name) || self.name.eq_ignore_ascii_case(name)
    }
}

const CALM: Theme = Theme {
    key: "calm",
    name: "Calm (Mint & Yellow)",
    palette: Palette {
        main_bg: Color::Rgb(0xE6, 0xF7, 0xF2),
        title_fg: Color::Rgb(0x00, 0x33, 0x33),
        list_bg: Color::Rgb(0xFF, 0xFA, 0xCD),
        done_bg: Color::Rgb(0xF0, 0xF0, 0xF0),
        add_btn_bg: Color::Rgb(0xCC, 0xDD, 0xDD),
        exit_btn_bg: Color::Rgb(0xFF, 0xCC, 0xCC),
        exit_btn_fg: Color::Rgb(0x80, 0x00, 0x00),
        default_fg: Color::Rgb(0x00, 0x00, 0x00),
        done_fg: Color::Rgb(0x55, 0x55, 0x55),
    },
};

const DARK: Theme = Theme {
    key: "dark",
    name: "Dark (Charcoal)",
    palette: Palette {
        main_bg: Color::Rgb(0x1C, 0x1C, 0x1C),
        title_fg: Color::Rgb(0xE0, 0xE0, 0xE0),
        list_bg: Color::Rgb(0x33, 0x33, 0x33),
        done_bg: Color::Rgb(0x2A, 0x2A, 0x2A),
        add_btn_bg: Color::Rgb(0x55, 0x55, 0x55),
        exit_btn_bg: Color::Rgb(0x8B, 0x00, 0x00),
        exit_btn_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
        default_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
        done_fg: Color::Rgb(0xA0, 0xA0, 0xA0),
    },
};

/// Fixed set of themes with exactly one selected.
#[derive(Debug)]
pub(crate) struct ThemeRegistry {
    themes: Vec<Theme>,
    current: usize,
}

impl ThemeRegistry {
    pub(crate) fn builtin() -> Self {
        ThemeRegistry {
            themes: vec![CALM, DARK],
            current: 0,
        }
    }

    pub(crate) fn current(&self) -> &Theme {
        &self.themes[self.current]
    }

    pub(crate) fn palette(&self) -> &Palette {
        &self.current().palette
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.themes.iter().map(|t| t.name)
    }

    /// Selects a theme by key or display name, ignoring case.
    pub(crate) fn select(&mut self, name: &str) -> Result<&Theme> {
        let index = self
            .themes
            .iter()
            .position(|t| t.matches(name))
            .ok_or_else(|| Error::InvalidTheme(name.to_string()))?;
        self.current = index;
        info!("Selected theme {}", self.themes[index].name);
        Ok(self.current())
    }

    pub(crate) fn cycle(&mut self) -> &Theme {
        self.current = (self.current + 1) % self.themes.len();
        info!("Selected theme {}", self.current().name);
        self.current()
    }
}
