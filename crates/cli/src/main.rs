use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use lectern_sync::PolicyKind;
use lectern_tui::{ArticleSource, ReaderOptions};
use lectern_types::{Article, RegistryIssue, validate_registry};
use lectern_util::{ConfigOverrides, ReaderConfig, UserPreferences, default_log_path};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Read long, sectioned articles in the terminal with a menu that follows along.
#[derive(Debug, Parser)]
#[command(name = "lectern", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Article to open (YAML or JSON). The bundled demo is used when omitted.
    #[arg(env = "LECTERN_ARTICLE")]
    article: Option<PathBuf>,

    #[command(flatten)]
    reader: ReaderFlags,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the sections of an article in menu order.
    Sections {
        article: Option<PathBuf>,
        /// Print the registry as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Report problems in an article's section list. Exits non-zero when any exist.
    Check { article: Option<PathBuf> },
}

#[derive(Debug, Args)]
struct ReaderFlags {
    /// Visible fraction (0.0 to 1.0) at which a section counts as entered.
    #[arg(long)]
    threshold: Option<f32>,
    /// How a visibility batch picks the active section.
    #[arg(long, value_parser = parse_policy)]
    policy: Option<PolicyKind>,
    /// Rows kept above a section after jumping to it.
    #[arg(long)]
    scroll_margin: Option<u16>,
    /// Smooth-scroll duration in milliseconds; 0 jumps instantly.
    #[arg(long)]
    smooth_scroll_ms: Option<u64>,
    /// Narrowest terminal width that still shows the sidebar.
    #[arg(long)]
    sidebar_min_width: Option<u16>,
    /// Theme id or alias (dracula, nord, ansi256).
    #[arg(long)]
    theme: Option<String>,
}

impl ReaderFlags {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            threshold: self.threshold,
            policy: self.policy,
            scroll_margin: self.scroll_margin,
            smooth_scroll_ms: self.smooth_scroll_ms,
            sidebar_min_width: self.sidebar_min_width,
        }
    }
}

fn parse_policy(value: &str) -> Result<PolicyKind, String> {
    value.parse().map_err(|error: lectern_sync::UnknownPolicy| error.to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            init_file_tracing()?;
            run_reader(cli.article, &cli.reader).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Sections { article, json }) => {
            init_stderr_tracing();
            let article = load_article(article.as_deref())?;
            print_sections(&article, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Check { article }) => {
            init_stderr_tracing();
            let article = load_article(article.as_deref())?;
            Ok(check_article(&article))
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// The reader owns the terminal, so its logs go to a file.
fn init_file_tracing() -> Result<()> {
    let path = default_log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn load_article(path: Option<&Path>) -> Result<Article> {
    match path {
        Some(path) => Article::load_from_path(path).with_context(|| format!("failed to load {}", path.display())),
        None => Article::demo().context("failed to parse the bundled article"),
    }
}

async fn run_reader(path: Option<PathBuf>, flags: &ReaderFlags) -> Result<()> {
    let config = ReaderConfig::from_env()?.apply_overrides(&flags.overrides())?;
    if let Some(theme) = flags.theme.as_deref()
        && lectern_tui::resolve_theme(theme).is_none()
    {
        let known: Vec<&str> = lectern_tui::themes().iter().map(|definition| definition.id).collect();
        bail!("unknown theme '{theme}' (expected one of: {})", known.join(", "));
    }

    let source = match path {
        Some(path) => ArticleSource::File(path),
        None => ArticleSource::Demo,
    };
    let article = source.load()?;

    let preferences = match UserPreferences::new() {
        Ok(preferences) => preferences,
        Err(error) => {
            warn!(%error, "preferences unavailable; changes will not be saved");
            UserPreferences::ephemeral()
        }
    };
    debug!(?config, "reader configuration resolved");

    lectern_tui::run(ReaderOptions {
        article,
        source,
        config,
        theme: flags.theme.clone(),
        preferences: Arc::new(preferences),
    })
    .await
}

fn print_sections(article: &Article, json: bool) -> Result<()> {
    let registry = article.registry();
    if json {
        println!("{}", serde_json::to_string_pretty(registry.sections())?);
        return Ok(());
    }
    println!("{}", article.title);
    for (index, section) in registry.iter().enumerate() {
        let icon = section.display_meta.icon.as_deref().unwrap_or(" ");
        println!("{:>2}. {icon} {:<16} {}", index + 1, section.id, section.label);
    }
    Ok(())
}

fn check_article(article: &Article) -> ExitCode {
    let issues: Vec<RegistryIssue> = validate_registry(&article.registry());
    if issues.is_empty() {
        println!("{}: {} sections, no issues", article.title, article.sections.len());
        return ExitCode::SUCCESS;
    }
    for issue in &issues {
        println!("{issue}");
    }
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn reader_flags_become_overrides() {
        let cli = Cli::parse_from(["lectern", "--policy", "most-visible", "--threshold", "0.6", "notes.yaml"]);
        let overrides = cli.reader.overrides();
        assert_eq!(overrides.policy, Some(PolicyKind::MostVisible));
        assert_eq!(overrides.threshold, Some(0.6));
        assert_eq!(cli.article, Some(PathBuf::from("notes.yaml")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn subcommands_take_their_own_article() {
        let cli = Cli::parse_from(["lectern", "check", "notes.yaml"]);
        assert!(matches!(cli.command, Some(Command::Check { article: Some(ref path) }) if path == Path::new("notes.yaml")));
    }

    #[test]
    fn unknown_policy_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["lectern", "--policy", "loudest"]).is_err());
    }

    #[test]
    fn check_flags_duplicate_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dupes.json");
        fs::write(
            &path,
            r#"{ "title": "Dupes", "sections": [ { "id": "a", "label": "A" }, { "id": "a", "label": "Again" } ] }"#,
        )
        .expect("write article");

        let article = load_article(Some(&path)).expect("article");
        assert_eq!(check_article(&article), ExitCode::FAILURE);
        assert_eq!(check_article(&Article::demo().expect("demo")), ExitCode::SUCCESS);
    }
}
