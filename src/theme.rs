//! Read-only color theme registry.

/// RGB triple.
pub type Rgb = (u8, u8, u8);

/// Colors the renderer uses for one theme.
#[derive(Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub panel: Rgb,
    pub alive: Rgb,
    pub dead: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: "Classic",
        background: (20, 20, 20),
        panel: (40, 40, 40),
        alive: (255, 255, 255),
        dead: (0, 0, 0),
        text: (255, 255, 255),
        accent: (0, 255, 0),
    },
    Theme {
        name: "Neon",
        background: (10, 10, 20),
        panel: (30, 30, 60),
        alive: (0, 255, 255),
        dead: (20, 20, 40),
        text: (255, 255, 255),
        accent: (255, 0, 255),
    },
    Theme {
        name: "Matrix",
        background: (0, 0, 0),
        panel: (0, 20, 0),
        alive: (0, 255, 0),
        dead: (0, 10, 0),
        text: (0, 255, 0),
        accent: (0, 200, 0),
    },
    Theme {
        name: "Ocean",
        background: (10, 30, 60),
        panel: (20, 60, 100),
        alive: (100, 200, 255),
        dead: (30, 60, 100),
        text: (255, 255, 255),
        accent: (150, 220, 255),
    },
    Theme {
        name: "Fire",
        background: (40, 0, 0),
        panel: (80, 20, 0),
        alive: (255, 100, 0),
        dead: (60, 20, 0),
        text: (255, 255, 255),
        accent: (255, 150, 0),
    },
];

pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}

/// Case-insensitive lookup by name.
pub fn lookup(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// The theme after `current`, wrapping at the end.
pub fn next(current: &Theme) -> &'static Theme {
    let i = THEMES.iter().position(|t| t.name == current.name).unwrap_or(0);
    &THEMES[(i + 1) % THEMES.len()]
}
