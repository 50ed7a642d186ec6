//! tsdoc-press — typedef records for TypeScript declarations and
//! post-processing of rendered documentation pages.
//!
//! - `tsdoc-press extract src/*.ts -o typedefs.json`
//! - `tsdoc-press collect -i docs.json -o docs.json`
//! - `tsdoc-press transform docs --config tsdoc-press.json`
//! - `tsdoc-press transform --page test.html < test.html` (stdin mode)

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tsdoc_press::config::{Overrides, PageContext};
use tsdoc_press::{collect, logging, page};

#[derive(Parser)]
#[command(
    name = "tsdoc-press",
    about = "Extract typedef docs from TypeScript sources and post-process rendered documentation pages"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract typedef records from TypeScript files (glob patterns and directories supported)
    Extract {
        #[arg(required = true)]
        files: Vec<String>,

        /// Output JSON file (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Append typedef records to a documentation list (JSON array of docs)
    Collect {
        /// Documentation list to read
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output JSON file (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Post-process rendered HTML pages
    Transform(TransformArgs),
}

#[derive(Args)]
struct TransformArgs {
    /// Site directory; every *.html below it is transformed. Reads stdin if omitted.
    site: Option<PathBuf>,

    /// Write transformed pages here instead of in place
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Site-relative path of the page read from stdin
    #[arg(long, default_value = "index.html")]
    page: String,

    /// JSON options file (logo, title, alias, testCoverage)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Logo image URL
    #[arg(long)]
    logo: Option<String>,

    /// Site title shown next to the logo
    #[arg(long)]
    title: Option<String>,

    /// Navigation relabel, LABEL=REPLACEMENT (repeatable)
    #[arg(long)]
    alias: Vec<String>,

    /// Coverage report URL embedded in test.html
    #[arg(long)]
    coverage_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Extract { files, output } => extract_mode(&files, output.as_deref()),
        Command::Collect { input, output } => collect_mode(&input, output.as_deref()),
        Command::Transform(args) => transform_mode(args),
    }
}

/// extract mode: parse TypeScript files directly and emit stamped records.
fn extract_mode(patterns: &[String], output: Option<&Path>) -> Result<()> {
    let input_files = expand_globs(patterns)?;

    let mut sources = Vec::new();
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        sources.push((path.to_string_lossy().to_string(), content));
    }

    let records = collect::collect_sources(
        sources
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str())),
    );
    tracing::info!(files = sources.len(), records = records.len(), "extraction finished");

    let json = serde_json::to_string_pretty(&records).context("failed to serialize records")?;
    write_output(output, &json)
}

/// collect mode: augment an existing documentation list.
fn collect_mode(input: &Path, output: Option<&Path>) -> Result<()> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let mut docs: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of docs", input.display()))?;

    let appended = collect::augment_docs(&mut docs)?;
    tracing::info!(appended, total = docs.len(), "documentation list augmented");

    let json = serde_json::to_string_pretty(&docs).context("failed to serialize docs")?;
    write_output(output, &json)
}

/// transform mode: rewrite a site directory, or a single page from stdin.
fn transform_mode(args: TransformArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => PageContext::from_file(path)?,
        None => PageContext::default(),
    };
    let ctx = base.with_overrides(Overrides {
        logo_url: args.logo,
        title: args.title,
        aliases: args.alias,
        coverage_url: args.coverage_url,
    })?;

    let Some(site) = args.site else {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        print!("{}", page::transform_page(&input, &args.page, &ctx));
        return Ok(());
    };

    if !site.is_dir() {
        anyhow::bail!("site directory not found: {}", site.display());
    }

    let pattern = format!("{}/**/*.html", glob::Pattern::escape(&site.to_string_lossy()));
    let mut pages: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    pages.sort();

    for path in &pages {
        let relative = path.strip_prefix(&site).unwrap_or(path);
        let page_path = relative.to_string_lossy();
        if !page::is_page(&page_path) {
            continue;
        }

        let markup = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let transformed = page::transform_page(&markup, &page_path, &ctx);

        let out_path = match &args.output {
            Some(dir) => dir.join(relative),
            None => path.clone(),
        };
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        fs::write(&out_path, transformed)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        tracing::debug!(page = %page_path, "transformed");
    }

    tracing::info!(pages = pages.len(), "site transformed");
    Ok(())
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{}\n", content))
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

/// File extensions recognized as TypeScript sources.
const SUPPORTED_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sorted for deterministic doc ids
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
