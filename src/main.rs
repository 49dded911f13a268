//! seo-assess CLI
//!
//! Scores page text and metadata against on-page SEO assessments.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use glob::glob;
use rayon::prelude::*;
use seo_assess::config::{ColorMode, Config, OutputFormat};
use seo_assess::output::{CompactFormatter, JsonFormatter, OutputFormatter, TextFormatter};
use seo_assess::{
    Assessment, Assessor, Catalog, DefaultMessages, DocumentOptions, Facts, MessageFormatter,
    Page, PageReport, Preset, Report, ValidityPolicy,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "seo-assess",
    version,
    about = "On-page SEO assessment",
    long_about = "Scores page text and metadata (title, meta description, URL, focus keyphrase) \
                  against a fixed, ordered set of SEO assessments."
)]
struct Cli {
    /// Page files or glob patterns ("-" or none reads stdin)
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Assessment set
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Which results count as valid
    #[arg(long, value_enum)]
    validity: Option<ValidityArg>,

    /// Also show results that are not valid
    #[arg(short, long)]
    all: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Disable specific assessments (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Only enable specific assessments (comma-separated)
    #[arg(long, value_delimiter = ',')]
    select: Option<Vec<String>>,

    /// Focus keyphrase (overrides front matter)
    #[arg(short, long)]
    keyword: Option<String>,

    /// Comma-separated keyphrase synonyms
    #[arg(long)]
    synonyms: Option<String>,

    /// SEO title
    #[arg(long)]
    title: Option<String>,

    /// Meta description
    #[arg(long)]
    description: Option<String>,

    /// Page URL or slug
    #[arg(long)]
    url: Option<String>,

    /// Page locale (e.g. en_US)
    #[arg(long)]
    locale: Option<String>,

    /// Translation catalog for feedback text
    #[arg(long)]
    messages: Option<PathBuf>,

    /// List available assessments and exit
    #[arg(long)]
    list_rules: bool,

    /// Print the facts extracted from each page instead of assessing it
    #[arg(long)]
    facts: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show detailed information about an assessment
    Explain {
        /// Assessment ID to explain
        rule_id: String,
    },
    /// Initialize a configuration file
    Init {
        /// Preset to use (recommended, cornerstone, minimal)
        #[arg(long, default_value = "recommended")]
        preset: String,

        /// Output format (yaml, json)
        #[arg(long, default_value = "yaml")]
        output_format: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Compact,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Seo,
    Cornerstone,
}

#[derive(Clone, Copy, ValueEnum)]
enum ValidityArg {
    NonZeroScore,
    HasScore,
}

impl Cli {
    /// Metadata flags as document options
    fn overrides(&self) -> DocumentOptions {
        DocumentOptions {
            keyword: self.keyword.clone().unwrap_or_default(),
            synonyms: self.synonyms.clone().unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
            locale: self.locale.clone().unwrap_or_default(),
        }
    }

    fn reads_stdin(&self) -> bool {
        self.files.is_empty() || self.files.iter().any(|f| f == "-")
    }
}

/// Print one assessment in a consistent format
fn print_rule(rule: &dyn Assessment, enabled: bool) {
    let marker = if enabled {
        "".normal()
    } else {
        " [disabled]".yellow()
    };
    println!("    {} ({}){}", rule.id().cyan(), rule.category(), marker);
    if !rule.description().is_empty() {
        println!("      {}", rule.description());
    } else if rule.name() != rule.id() {
        println!("      {}", rule.name());
    }
}

fn handle_explain(rule_id: &str, config: &Config) -> Result<()> {
    let registry = config.assessor.preset().registry();
    let Some(rule) = registry.get(rule_id) else {
        bail!(
            "Assessment '{}' not found. Use {} to see all available assessments",
            rule_id,
            "--list-rules".cyan()
        );
    };

    println!("{}", "Assessment Details".bold());
    println!();
    println!("  {}: {}", "ID".bold(), rule.id().cyan());
    println!("  {}: {}", "Name".bold(), rule.name());
    println!("  {}: {}", "Category".bold(), rule.category());
    println!("  {}: {}", "Preset".bold(), config.assessor.preset());
    if let Some(position) = registry.position(rule_id) {
        println!("  {}: {} of {}", "Position".bold(), position + 1, registry.len());
    }
    println!(
        "  {}: {}",
        "Enabled".bold(),
        if config.is_rule_enabled(rule_id) {
            "yes".green()
        } else {
            "no".red()
        }
    );
    if !rule.description().is_empty() {
        println!();
        println!("  {}", "Description".bold());
        println!("  {}", rule.description());
    }
    Ok(())
}

fn handle_init(preset: &str, output_format: &str) -> Result<()> {
    let Some(config) = Config::preset(preset) else {
        bail!(
            "Unknown preset '{}'. Available: recommended, cornerstone, minimal",
            preset
        );
    };

    let filename = if output_format == "json" {
        ".assessrc.json"
    } else {
        ".assessrc.yaml"
    };

    if Path::new(filename).exists() {
        bail!("{} already exists. Remove it first to reinitialize.", filename);
    }

    let content = if output_format == "json" {
        serde_json::to_string_pretty(&config)?
    } else {
        format!(
            "# seo-assess configuration\n# Generated with: seo-assess init --preset {}\n\n{}",
            preset,
            serde_yaml::to_string(&config)?
        )
    };

    std::fs::write(filename, content).with_context(|| format!("Failed to write {}", filename))?;

    println!("{} Created {}", "success".green().bold(), filename);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };

    config.merge_cli(
        cli.format.map(|f| match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Compact => OutputFormat::Compact,
        }),
        cli.all.then_some(true),
        cli.jobs,
        cli.disable.clone(),
        cli.select.clone(),
        cli.preset.map(|p| match p {
            PresetArg::Seo => Preset::Seo,
            PresetArg::Cornerstone => Preset::Cornerstone,
        }),
    );

    if let Some(validity) = cli.validity {
        config.assessor.validity = Some(match validity {
            ValidityArg::NonZeroScore => ValidityPolicy::NonZeroScore,
            ValidityArg::HasScore => ValidityPolicy::HasScore,
        });
    }
    if cli.messages.is_some() {
        config.messages = cli.messages.clone();
    }

    Ok(config)
}

fn load_messages(config: &Config) -> Result<Arc<dyn MessageFormatter>> {
    match &config.messages {
        Some(path) => {
            let catalog = Catalog::load(path)
                .with_context(|| format!("Failed to load messages {}", path.display()))?;
            let missing = catalog.missing_keys().len();
            if missing > 0 {
                log::warn!(
                    "catalog {} lacks {} messages; English text is used for those",
                    path.display(),
                    missing
                );
            }
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::new(DefaultMessages)),
    }
}

/// Expand glob patterns into page files
fn expand_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns.iter().filter(|p| p.as_str() != "-") {
        let paths = glob(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))?;
        for entry in paths.flatten() {
            if entry.is_file() {
                files.push(entry);
            }
        }
    }
    Ok(files)
}

fn read_pages(cli: &Cli) -> Result<Vec<(PathBuf, Result<Page, String>)>> {
    let mut pages = Vec::new();

    if cli.reads_stdin() {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        let source = PathBuf::from("<stdin>");
        let page = Page::parse(source.clone(), &content).map_err(|e| e.to_string());
        pages.push((source, page));
    }

    let files = expand_files(&cli.files)?;
    if files.is_empty() && !cli.reads_stdin() {
        bail!("No files found to assess");
    }
    for file in files {
        let page = Page::load(&file).map_err(|e| e.to_string());
        pages.push((file, page));
    }

    Ok(pages)
}

fn assess_page(
    source: &Path,
    page: Result<Page, String>,
    config: &Config,
    messages: &Arc<dyn MessageFormatter>,
    overrides: &DocumentOptions,
) -> PageReport {
    let document = match page.and_then(|p| {
        p.document(overrides, config.assessor.locale.as_deref())
            .map_err(|e| e.to_string())
    }) {
        Ok(document) => document,
        Err(e) => return PageReport::failed(source, e),
    };

    if !messages.speaks(document.locale()) {
        log::warn!(
            "{}: page locale {} has no catalog; feedback is in {}",
            source.display(),
            document.locale(),
            messages.locale()
        );
    }

    let assessor = Assessor::new(Arc::new(config.registry_for(source)))
        .with_messages(Arc::clone(messages))
        .with_parallel(config.engine.parallel())
        .with_validity(config.assessor.validity());

    match assessor.assess(&document) {
        Ok(results) => PageReport::assessed(source, results),
        Err(e) => PageReport::failed(source, e),
    }
}

fn print_facts(cli: &Cli, config: &Config) -> Result<i32> {
    let overrides = cli.overrides();
    let mut exit_code = 0;
    for (source, page) in read_pages(cli)? {
        println!("{}", source.display().to_string().underline());
        let document = page.and_then(|p| {
            p.document(&overrides, config.assessor.locale.as_deref())
                .map_err(|e| e.to_string())
        });
        match document {
            Ok(document) => {
                for (name, value) in Facts::extract(&document).named() {
                    println!("  {:<26} {}", name, value);
                }
            }
            Err(e) => {
                eprintln!("  {}: {}", "error".red().bold(), e);
                exit_code = 1;
            }
        }
        println!();
    }
    Ok(exit_code)
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(&cli)?;

    match config.output.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    for id in config.unknown_rule_ids(&config.assessor.preset().registry()) {
        log::warn!("configuration names unknown assessment '{}'", id);
    }

    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Explain { rule_id } => handle_explain(rule_id, &config)?,
            Commands::Init {
                preset,
                output_format,
            } => handle_init(preset, output_format)?,
        }
        return Ok(0);
    }

    if cli.list_rules {
        let registry = config.assessor.preset().registry();
        println!(
            "{} ({} preset, {} assessments):",
            "Available assessments".bold(),
            config.assessor.preset(),
            registry.len()
        );
        for rule in registry.iter() {
            print_rule(rule.as_ref(), config.is_rule_enabled(rule.id()));
        }
        return Ok(0);
    }

    if cli.facts {
        return print_facts(&cli, &config);
    }

    let start = Instant::now();
    let messages = load_messages(&config)?;
    let overrides = cli.overrides();
    let pages = read_pages(&cli)?;

    if cli.verbose {
        eprintln!(
            "Assessing {} {} with the {} preset",
            pages.len(),
            if pages.len() == 1 { "page" } else { "pages" },
            config.assessor.preset()
        );
    }

    let assess = |(source, page): (PathBuf, Result<Page, String>)| {
        assess_page(&source, page, &config, &messages, &overrides)
    };
    let reports: Vec<PageReport> = if config.engine.parallel() && pages.len() > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(if config.engine.jobs > 0 {
                config.engine.jobs
            } else {
                num_cpus::get()
            })
            .build()
            .context("Failed to start worker pool")?;
        pool.install(|| pages.into_par_iter().map(assess).collect())
    } else {
        pages.into_iter().map(assess).collect()
    };

    let report = Report::new(reports).with_duration(start.elapsed());

    let show_all = config.output.verbose;
    let formatter: Box<dyn OutputFormatter> = match config.output.format {
        OutputFormat::Text => {
            let mut f = TextFormatter::new().show_all(show_all);
            f.show_stats = config.output.statistics;
            Box::new(f)
        }
        OutputFormat::Json => Box::new(JsonFormatter::new().pretty().show_all(show_all)),
        OutputFormat::Compact => Box::new(CompactFormatter::new().show_all(show_all)),
    };
    print!("{}", formatter.format(&report));

    Ok(report.exit_code())
}

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}
