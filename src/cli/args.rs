use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Command, CommandFactory, FromArgMatches, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use memegrid::app_dirs;

use super::annotations::dim_cli_annotations;

/// Produce the full version banner including config and cache directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let cache_dir = match app_dirs::get_cache_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("memegrid {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "cache directory: {cache_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    let mut matches = tinted_cli_command().get_matches();
    CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

/// Apply styling customisation to the generated clap command.
fn tinted_cli_command() -> Command {
    CliArgs::command().mut_args(dim_cli_annotations)
}

#[derive(Parser, Debug)]
#[command(
    name = "memegrid",
    version,
    long_version = long_version(),
    about = "Browse and search Imgflip meme templates in the terminal",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `memegrid` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "MEMEGRID_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long,
        value_name = "URL",
        help = "Override the template listing endpoint (default: the public Imgflip API)"
    )]
    pub(crate) endpoint: Option<String>,
    #[arg(
        short = 't',
        long,
        value_name = "TITLE",
        help = "Set the input prompt title (default: Meme templates)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Provide an initial search query (default: empty)"
    )]
    pub(crate) initial_query: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: slate)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Format used to print the outcome on exit"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, help = "Print the effective configuration before starting")]
    pub(crate) print_config: bool,
    #[arg(long, help = "List available themes and exit")]
    pub(crate) list_themes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Selection as tab-separated text.
    Plain,
    /// Full outcome as a JSON document.
    Json,
}
