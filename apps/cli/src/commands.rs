//! CLI command definitions, routing, and tracing setup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use docweld_core::composer::{self, ComposeConfig};
use docweld_core::expander::{self, ExpandConfig};
use docweld_core::lint::{self, LintConfig};
use docweld_core::mirror::{self, MirrorConfig};
use docweld_core::progress::ProgressReporter;
use docweld_shared::{AppConfig, LanguageConfig, ResolveConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docweld — aggregate a Markdown documentation tree into consolidated outputs.
#[derive(Parser)]
#[command(
    name = "docweld",
    version,
    about = "Aggregate a Markdown documentation tree into consolidated outputs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to docweld.toml (defaults to ./docweld.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Expand the seed index into one flattened reference document.
    Expand {
        /// Seed index file (overrides the config file value).
        #[arg(long)]
        index: Option<PathBuf>,

        /// Output file (overrides the config file value).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Compose the one-page manual for one or all configured languages.
    Compose {
        /// Language code to compose (defaults to every configured language).
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Copy the Markdown tree into the rendered-site directory.
    Mirror {
        /// Destination directory, relative to the site root.
        #[arg(long, default_value = "_site/manuals")]
        dest: PathBuf,
    },

    /// Check frontmatter across the content tree.
    Lint,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize a config file with defaults.
    Init,
    /// Show the resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docweld=info",
        1 => "docweld=debug",
        _ => "docweld=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Expand { index, out } => cmd_expand(config_path, index, out),
        Command::Compose { language } => cmd_compose(config_path, language.as_deref()),
        Command::Mirror { dest } => cmd_mirror(config_path, &dest),
        Command::Lint => cmd_lint(config_path),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the config and compute the site root it describes.
fn load_site(config_path: Option<&Path>) -> Result<(AppConfig, PathBuf)> {
    let (config, config_dir) = load_config(config_path)?;
    let root = config_dir.join(&config.site.base_dir);
    Ok((config, root))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_expand(
    config_path: Option<&Path>,
    index: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let (config, root) = load_site(config_path)?;

    let expand_config = ExpandConfig {
        index_file: index.unwrap_or_else(|| root.join(&config.expand.index_file)),
        output_file: out.unwrap_or_else(|| root.join(&config.expand.output_file)),
        resolve: ResolveConfig::from_app_config(&config, &root),
    };

    info!(
        index = %expand_config.index_file.display(),
        output = %expand_config.output_file.display(),
        "expanding seed links"
    );

    let reporter = CliProgress::new();
    let start = Instant::now();
    let report = expander::expand(&expand_config, &reporter)?;
    reporter.finish();

    println!();
    println!("  Expanded reference document written!");
    println!("  Processed: {}", report.processed);
    println!("  Failed:    {}", report.failed);
    println!("  Skipped:   {}", report.skipped);
    println!("  Output:    {}", expand_config.output_file.display());
    println!("  Changed:   {}", if report.changed { "yes" } else { "no" });
    println!("  Time:      {:.1}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

fn cmd_compose(config_path: Option<&Path>, language: Option<&str>) -> Result<()> {
    let (config, root) = load_site(config_path)?;

    let languages: Vec<LanguageConfig> = match language {
        Some(code) => {
            let lang = config
                .languages
                .iter()
                .find(|l| l.code == code)
                .ok_or_else(|| eyre!("language '{code}' is not configured in docweld.toml"))?;
            vec![lang.clone()]
        }
        None => config.languages.clone(),
    };

    if languages.is_empty() {
        return Err(eyre!("no languages configured in docweld.toml"));
    }

    let reporter = CliProgress::new();
    let start = Instant::now();

    for lang in &languages {
        let main_dir = root
            .join(&config.manual.manuals_dir)
            .join(&config.site.version)
            .join(&lang.code);

        let compose_config = ComposeConfig {
            language: lang.code.clone(),
            version: config.site.version.clone(),
            intro: lang.intro.clone(),
            appendix_dir: main_dir.join(&config.manual.appendix_dir),
            nav_fragment: root
                .join(&config.manual.nav_dir)
                .join(format!("{}.html", lang.code)),
            output_file: main_dir.join(&config.manual.output_name),
            main_dir,
            output_name: config.manual.output_name.clone(),
            excluded_slugs: config.manual.excluded_slugs.clone(),
        };

        info!(language = %lang.code, "composing one-page manual");
        let report = composer::compose(&compose_config, &reporter)?;

        println!();
        println!("  Manual composed for '{}'!", lang.code);
        println!("  Sections: {}", report.sections);
        println!("  Skipped:  {}", report.skipped);
        println!(
            "  Order:    {}",
            if report.used_nav_order {
                "navigation"
            } else {
                "alphabetical fallback"
            }
        );
        println!("  Output:   {}", compose_config.output_file.display());
        println!("  Changed:  {}", if report.changed { "yes" } else { "no" });
    }

    reporter.finish();
    println!("  Time:     {:.1}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

fn cmd_mirror(config_path: Option<&Path>, dest: &Path) -> Result<()> {
    let (config, root) = load_site(config_path)?;

    let mirror_config = MirrorConfig {
        source_dir: root.join(&config.manual.manuals_dir),
        dest_dir: if dest.is_absolute() {
            dest.to_path_buf()
        } else {
            root.join(dest)
        },
    };

    let reporter = CliProgress::new();
    let report = mirror::mirror(&mirror_config, &reporter)?;
    reporter.finish();

    println!();
    println!("  Mirrored {} pages to {}", report.copied, mirror_config.dest_dir.display());
    println!();

    Ok(())
}

fn cmd_lint(config_path: Option<&Path>) -> Result<()> {
    let (config, root) = load_site(config_path)?;

    let exempt: HashSet<String> = [config.manual.output_name.clone()].into_iter().collect();
    let lint_config = LintConfig {
        content_dir: root.join(&config.manual.manuals_dir),
        exempt_files: exempt,
    };

    let reporter = CliProgress::new();
    let report = lint::lint(&lint_config, &reporter)?;
    reporter.finish();

    if report.issues.is_empty() {
        println!();
        println!("  {} pages checked, all frontmatter valid.", report.checked);
        println!();
        return Ok(());
    }

    println!();
    for issue in &report.issues {
        println!("  {}: {}", issue.path.display(), issue.message);
    }
    Err(eyre!(
        "{} frontmatter violations across {} checked pages",
        report.issues.len(),
        report.checked
    ))
}

fn cmd_config_init(config_path: Option<&Path>) -> Result<()> {
    let dir = config_path
        .and_then(Path::parent)
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let path = init_config(dir)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn item(&self, label: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("[{current}/{total}] {label}"));
    }
}
