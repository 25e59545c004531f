mod echo;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use blogshift_core::{
    BUILTIN_PROFILES, ConfigLoader, ConfigLoaderBuilder, FetchConfig, Importer, ImporterConfig, OutputFormat,
    SiteProfile, builtin_profile, fetch_file, fetch_stdin, fetch_url,
};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::echo::{format_size, print_banner, print_detail, print_resource_summary, print_step, print_success, print_warning};

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

const FALLBACK_PROFILE: &str = "blog";

/// Output format for the imported page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Markdown,
    Html,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: markdown, html, json", s)),
        }
    }
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => OutputFormat::Markdown,
            Format::Html => OutputFormat::Html,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Migrate a blog page into a block-based document
#[derive(Parser, Debug)]
#[command(name = "blogshift")]
#[command(version)]
#[command(about = "Migrate blog pages into block-based documents", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Source URL of the page (required for file and stdin input)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Site profile: a bundled name (blog, blog-v2) or a profile file
    #[arg(short, long, value_name = "PROFILE")]
    profile: Option<String>,

    /// Directory searched for per-domain profile files
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Output format (markdown, html, json)
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    format: Format,

    /// Write to <DIR>/<path>/<name>.<ext> instead of stdout
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Include TOML frontmatter (Markdown only)
    #[arg(long)]
    frontmatter: bool,

    /// Strip images from output (Markdown only)
    #[arg(long)]
    no_images: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn is_remote(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }

    /// URL the page came from: the input itself, or `--url`
    fn source_url(&self) -> anyhow::Result<String> {
        if self.is_remote() {
            return Ok(self.input.clone());
        }

        match &self.url {
            Some(url) => Ok(url.clone()),
            None => bail!("--url is required when reading from a file or stdin"),
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,blogshift_core=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve the profile: explicit reference, then domain lookup, then `blog`
fn resolve_profile(args: &Args, url: &str) -> anyhow::Result<SiteProfile> {
    let mut loader = match &args.config_dir {
        Some(dir) => ConfigLoaderBuilder::new().custom_dir(dir).build(),
        None => ConfigLoader::default(),
    };

    if let Some(reference) = &args.profile {
        return loader.load(reference).with_context(|| format!("Failed to load profile '{}'", reference));
    }

    match loader.load_for_url(url).context("Failed to look up a profile for the URL")? {
        Some(profile) => Ok(profile),
        None => {
            tracing::debug!(url, fallback = FALLBACK_PROFILE, "no profile for domain");
            builtin_profile(FALLBACK_PROFILE).context("Failed to load bundled profile")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
    }

    let url = args.source_url()?;

    let html = if args.input == "-" {
        if args.verbose {
            print_step(1, 4, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else if args.is_remote() {
        if args.verbose {
            print_step(1, 4, &format!("Fetching {}", args.input.bright_white().underline()));
        }

        let mut config = FetchConfig { timeout: args.timeout, ..FetchConfig::default() };
        if let Some(user_agent) = &args.user_agent {
            config.user_agent = user_agent.clone();
        }

        fetch_url(&args.input, &config).await.context("Failed to fetch URL")?
    } else {
        if args.verbose {
            print_step(1, 4, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        eprintln!();
        print_step(2, 4, "Resolving site profile");
    }

    let profile = resolve_profile(&args, &url)?;

    if args.verbose {
        print_detail("Profile", profile.name.as_deref().unwrap_or("custom"));
        print_detail("Main", profile.main_selector());
        eprintln!();
        print_step(3, 4, "Importing page");
    }

    let config = ImporterConfig::builder()
        .profile(profile)
        .include_frontmatter(args.frontmatter)
        .strip_images(args.no_images)
        .build();
    let importer = Importer::with_config(config);

    let resource = match importer.process(&url, &html) {
        Ok(resource) => resource,
        Err(e @ blogshift_core::BlogshiftError::MissingMainContent(_)) if args.profile.is_none() => {
            print_warning(&format!("Try one of the bundled profiles with --profile ({})", BUILTIN_PROFILES.join(", ")));
            return Err(e).context("Failed to import page");
        }
        Err(e) => return Err(e).context("Failed to import page"),
    };

    if args.verbose {
        print_resource_summary(&resource);
        print_step(4, 4, "Writing output");
    }

    let format = OutputFormat::from(args.format);
    let output = resource
        .to_format(format, &importer.config().markdown)
        .context("Failed to render output")?;

    match &args.output_dir {
        Some(dir) => {
            let destination = dir.join(resource.destination(format.extension()));
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&destination, output)
                .with_context(|| format!("Failed to write to file: {}", destination.display()))?;
            print_success(&format!("Output written to {}", destination.display().bright_white()));
        }
        None => print!("{}", output),
    }

    Ok(())
}
