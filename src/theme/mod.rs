//! Color themes for the browser UI.

mod light;
mod slate;

use ratatui::style::Style;

/// Styles for every surface the browser paints.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub prompt: Style,
    pub caption: Style,
    pub url: Style,
    pub card: Style,
    pub card_selected: Style,
    pub empty: Style,
    pub error: Style,
}

impl Theme {
    #[must_use]
    pub fn prompt_style(&self) -> Style {
        self.prompt
    }

    #[must_use]
    pub fn caption_style(&self) -> Style {
        self.caption
    }

    #[must_use]
    pub fn url_style(&self) -> Style {
        self.url
    }

    #[must_use]
    pub fn card_style(&self) -> Style {
        self.card
    }

    #[must_use]
    pub fn card_selected_style(&self) -> Style {
        self.card_selected
    }

    #[must_use]
    pub fn empty_style(&self) -> Style {
        self.empty
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        self.error
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

/// Definition for a built-in theme bundled with the application.
#[derive(Debug, Clone, Copy)]
pub struct ThemeDefinition {
    pub name: &'static str,
    pub theme: Theme,
    pub aliases: &'static [&'static str],
}

const DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        name: "slate",
        theme: slate::SLATE,
        aliases: &["dark", "default"],
    },
    ThemeDefinition {
        name: "light",
        theme: light::LIGHT,
        aliases: &[],
    },
];

/// Theme used when nothing is configured.
#[must_use]
pub fn default_theme() -> Theme {
    slate::SLATE
}

/// Names of the built-in themes, in listing order.
#[must_use]
pub fn names() -> Vec<&'static str> {
    DEFINITIONS.iter().map(|definition| definition.name).collect()
}

/// Look up a built-in theme by name or alias, case-insensitively.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    let normalized = normalize_name(name);
    DEFINITIONS
        .iter()
        .find(|definition| {
            definition.name == normalized
                || definition
                    .aliases
                    .iter()
                    .any(|alias| *alias == normalized)
        })
        .map(|definition| definition.theme)
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|ch| match ch {
            ' ' | '_' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_alias_aware() {
        assert!(by_name("Slate").is_some());
        assert!(by_name("DEFAULT").is_some());
        assert!(by_name(" light ").is_some());
        assert!(by_name("nonexistent").is_none());
    }

    #[test]
    fn every_definition_is_listed() {
        let listed = names();
        assert!(listed.contains(&"slate"));
        assert!(listed.contains(&"light"));
    }
}
