//! Color palettes, semantic roles and the Ratatui style builders that sit on
//! top of them. Components should ask the theme for styles instead of
//! hard-coding colors.

use std::env;

use tracing::debug;

pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Environment override for the theme, wins over persisted preferences.
pub const THEME_ENV: &str = "NAVKIT_THEME";

/// Catalog entry describing a selectable theme.
#[derive(Debug)]
pub struct ThemeDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub aliases: &'static [&'static str],
    builder: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    pub fn build(&self) -> Box<dyn Theme> {
        (self.builder)()
    }

    fn matches(&self, name: &str) -> bool {
        self.id.eq_ignore_ascii_case(name) || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

static CATALOG: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "nord",
        label: "Nord",
        aliases: &["default"],
        builder: || Box::new(NordTheme::new()),
    },
    ThemeDefinition {
        id: "dracula",
        label: "Dracula",
        aliases: &[],
        builder: || Box::new(DraculaTheme::new()),
    },
];

pub fn all() -> &'static [ThemeDefinition] {
    CATALOG
}

pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    CATALOG.iter().find(|definition| definition.matches(name))
}

/// Theme plus metadata describing how it was selected.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

/// Selects a theme from the environment override, then the preferred name,
/// then the default palette.
pub fn load(preferred_theme: Option<&str>) -> LoadedTheme {
    if let Ok(theme_name) = env::var(THEME_ENV)
        && let Some(definition) = resolve(theme_name.trim())
    {
        return LoadedTheme::from_definition(definition);
    }

    if let Some(name) = preferred_theme {
        match resolve(name.trim()) {
            Some(definition) => return LoadedTheme::from_definition(definition),
            None => debug!(theme = name, "unknown theme; falling back to default"),
        }
    }

    LoadedTheme::from_definition(&CATALOG[0])
}
