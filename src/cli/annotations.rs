use clap::Arg;
use clap::builder::{
    StyledStr,
    styling::{AnsiColor, Color, Style},
};

/// Apply dimmed styling to default and environment annotations in clap help
/// text for improved readability.
pub(crate) fn dim_cli_annotations(mut arg: Arg) -> Arg {
    let help_text = arg
        .get_help()
        .map(ToString::to_string)
        .unwrap_or_default();
    let mut styled = dim_default_annotations(&help_text);
    let mut has_help = !help_text.is_empty();

    let env_name = arg
        .get_env()
        .map(|env| env.to_string_lossy().to_string())
        .filter(|name| !name.trim().is_empty());
    if let Some(name) = env_name {
        arg = arg.hide_env(true);
        if has_help {
            styled.push_str(" ");
        }
        push_muted(&mut styled, &format!("[env: {name}=]"));
        has_help = true;
    }

    if has_help {
        arg = arg.help(styled);
    }
    arg
}

/// Re-style every `(default: …)` span of the help text with the muted style.
fn dim_default_annotations(text: &str) -> StyledStr {
    let mut styled = StyledStr::new();
    let mut rest = text;
    while let Some(start) = rest.find("(default:") {
        let Some(length) = rest[start..].find(')') else {
            break;
        };
        styled.push_str(&rest[..start]);
        push_muted(&mut styled, &rest[start..=start + length]);
        rest = &rest[start + length + 1..];
    }
    styled.push_str(rest);
    styled
}

fn push_muted(target: &mut StyledStr, annotation: &str) {
    let style = muted_style();
    let _ = std::fmt::write(target, format_args!("{style}{annotation}{style:#}"));
}

/// Muted style used to annotate clap help metadata.
fn muted_style() -> Style {
    Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)))
        .dimmed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_annotations_survive_restyling() {
        let styled = dim_default_annotations("Pick a theme (default: slate) by name");
        let rendered = styled.to_string();
        assert!(rendered.contains("Pick a theme "));
        assert!(rendered.contains("(default: slate)"));
        assert!(rendered.contains(" by name"));
    }

    #[test]
    fn env_annotation_is_appended_and_hidden_from_clap() {
        let arg = Arg::new("config")
            .env("MEMEGRID_CONFIG")
            .help("Configuration file");
        let arg = dim_cli_annotations(arg);
        let rendered = arg.get_help().expect("help").to_string();
        assert!(rendered.contains("[env: MEMEGRID_CONFIG=]"));
    }
}
