use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use memegrid::{Theme, UiConfig, api, app_dirs, theme};

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    api: ApiSection,
    ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiSection {
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    input_title: Option<String>,
    initial_query: Option<String>,
    theme: Option<String>,
    count_label: Option<String>,
    loading_text: Option<String>,
    empty_text: Option<String>,
}

#[derive(Debug)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub input_title: Option<String>,
    pub initial_query: String,
    pub theme_name: Option<String>,
    pub theme: Theme,
    pub ui: UiConfig,
}

impl ResolvedConfig {
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Endpoint: {}", self.endpoint);
        println!(
            "  UI theme: {}",
            self.theme_name
                .as_deref()
                .unwrap_or("(use the library default)")
        );
        match &self.input_title {
            Some(title) => println!("  Prompt title: {title}"),
            None => println!("  Prompt title: {}", self.ui.input_title),
        }
        if !self.initial_query.is_empty() {
            println!("  Initial query: {}", self.initial_query);
        }
        println!("  Count label: {}", self.ui.count_label);
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("memegrid")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".memegrid.toml"));
        files.push(current_dir.join("memegrid.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(endpoint) = cli.endpoint.clone() {
            self.api.endpoint = Some(endpoint);
        }
        if let Some(title) = cli.title.clone() {
            self.ui.input_title = Some(title);
        }
        if let Some(query) = cli.initial_query.clone() {
            self.ui.initial_query = Some(query);
        }
        if let Some(theme) = cli.theme.clone() {
            self.ui.theme = Some(theme);
        }
    }

    fn resolve(self) -> Result<ResolvedConfig> {
        let endpoint = self
            .api
            .endpoint
            .unwrap_or_else(|| api::TEMPLATE_ENDPOINT.to_string());
        ensure!(
            endpoint.starts_with("http://") || endpoint.starts_with("https://"),
            "endpoint must be an http(s) URL, got '{endpoint}'"
        );

        let theme_name = self.ui.theme;
        let theme = match theme_name.as_deref() {
            Some(name) => match theme::by_name(name) {
                Some(theme) => theme,
                None => bail!(
                    "unknown theme '{name}' (available: {})",
                    theme::names().join(", ")
                ),
            },
            None => theme::default_theme(),
        };

        let mut ui = UiConfig::default();
        if let Some(label) = self.ui.count_label {
            ui.count_label = label;
        }
        if let Some(text) = self.ui.loading_text {
            ui.loading_text = text;
        }
        if let Some(text) = self.ui.empty_text {
            ui.empty_text = text;
        }

        Ok(ResolvedConfig {
            endpoint,
            input_title: self.ui.input_title,
            initial_query: self.ui.initial_query.unwrap_or_default(),
            theme_name,
            theme,
            ui,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use tempfile::tempdir;

    fn bare_cli() -> CliArgs {
        CliArgs {
            config: Vec::new(),
            no_config: true,
            endpoint: None,
            title: None,
            initial_query: None,
            theme: None,
            output: crate::cli::OutputFormat::Plain,
            print_config: false,
            list_themes: false,
        }
    }

    #[test]
    fn defaults_point_at_the_public_endpoint() {
        let resolved = load(&bare_cli()).unwrap();
        assert_eq!(resolved.endpoint, api::TEMPLATE_ENDPOINT);
        assert!(resolved.initial_query.is_empty());
        assert!(resolved.input_title.is_none());
    }

    #[test]
    fn cli_overrides_win_over_defaults() {
        let mut cli = bare_cli();
        cli.endpoint = Some("http://127.0.0.1:9/memes".to_string());
        cli.initial_query = Some("doge".to_string());

        let resolved = load(&cli).unwrap();
        assert_eq!(resolved.endpoint, "http://127.0.0.1:9/memes");
        assert_eq!(resolved.initial_query, "doge");
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let mut cli = bare_cli();
        cli.endpoint = Some("ftp://example.com/memes".to_string());
        assert!(load(&cli).is_err());
    }

    #[test]
    fn unknown_theme_is_rejected_with_the_available_names() {
        let mut cli = bare_cli();
        cli.theme = Some("sepia".to_string());
        let error = load(&cli).unwrap_err();
        assert!(error.to_string().contains("sepia"));
        assert!(error.to_string().contains("slate"));
    }

    #[test]
    fn explicit_config_file_is_merged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("memegrid.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[ui]\ninitial_query = \"drake\"\ncount_label = \"Cards\"").unwrap();

        let mut cli = bare_cli();
        cli.config.push(path);

        let resolved = load(&cli).unwrap();
        assert_eq!(resolved.initial_query, "drake");
        assert_eq!(resolved.ui.count_label, "Cards");
    }

    #[test]
    fn cli_beats_the_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("memegrid.toml");
        std::fs::write(&path, "[ui]\ninitial_query = \"drake\"\n").unwrap();

        let mut cli = bare_cli();
        cli.config.push(path);
        cli.initial_query = Some("doge".to_string());

        let resolved = load(&cli).unwrap();
        assert_eq!(resolved.initial_query, "doge");
    }
}
