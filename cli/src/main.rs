//! autotoc CLI - table-of-contents inference from extracted PDF layout

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use autotoc::{
    render, JsonFormat, LayoutDocument, OutlineEngine, OutlineOptions, OutlineResult,
    OutlineSource, RenderOptions,
};

#[derive(Parser)]
#[command(name = "autotoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer a table of contents from extracted PDF layout", long_about = None)]
struct Cli {
    /// Input layout file (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the outline of one layout file
    #[command(alias = "gen")]
    Generate {
        /// Input layout file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Omit page numbers in text and Markdown output
        #[arg(long)]
        no_page_numbers: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Generate outlines for many layout files
    Batch {
        /// Input layout files (JSON)
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (next to each input if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show font statistics and heading tiers of a layout file
    Stats {
        /// Input layout file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show version information
    Version,
}

/// Engine options shared by every command.
#[derive(Args, Default)]
struct EngineArgs {
    /// Engine options file (JSON); flags override its values
    #[arg(long, value_name = "FILE", env = "AUTOTOC_CONFIG")]
    config: Option<PathBuf>,

    /// Minimum heading font size
    #[arg(long, value_name = "PT")]
    font_threshold: Option<f32>,

    /// Maximum outline depth
    #[arg(long, value_name = "N")]
    max_levels: Option<u8>,

    /// Header/footer band as a fraction of page height
    #[arg(long, value_name = "FRACTION")]
    margin: Option<f32>,

    /// Do not promote a fallback heading on pages without one
    #[arg(long)]
    no_page_fallback: bool,

    /// Ignore the document's embedded outline
    #[arg(long)]
    ignore_native: bool,

    /// Classify pages on one thread
    #[arg(long)]
    sequential: bool,
}

impl EngineArgs {
    fn to_options(&self) -> Result<OutlineOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => OutlineOptions::from_json(&fs::read_to_string(path)?)?,
            None => OutlineOptions::default(),
        };

        if let Some(threshold) = self.font_threshold {
            options = options.with_font_threshold(threshold);
        }
        if let Some(levels) = self.max_levels {
            options = options.with_max_levels(levels);
        }
        if let Some(fraction) = self.margin {
            options = options.with_margin_fraction(fraction);
        }
        if self.no_page_fallback {
            options = options.with_force_page_heading(false);
        }
        if self.ignore_native {
            options = options.always_infer();
        }
        if self.sequential {
            options = options.sequential();
        }

        Ok(options)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented plain text
    Text,
    /// Nested Markdown list
    #[value(alias = "md")]
    Markdown,
    /// JSON with statistics
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }

    fn render(
        self,
        outline: &OutlineResult,
        render_options: &RenderOptions,
        json_format: JsonFormat,
    ) -> autotoc::Result<String> {
        match self {
            OutputFormat::Text => render::to_text(outline, render_options),
            OutputFormat::Markdown => render::to_markdown(outline, render_options),
            OutputFormat::Json => render::to_json(outline, json_format),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate {
            input,
            output,
            format,
            compact,
            no_page_numbers,
            engine,
        }) => cmd_generate(
            &input,
            output.as_deref(),
            format,
            compact,
            no_page_numbers,
            &engine,
        ),
        Some(Commands::Batch {
            inputs,
            output,
            format,
            engine,
        }) => cmd_batch(&inputs, output.as_deref(), format, &engine),
        Some(Commands::Stats {
            input,
            json,
            engine,
        }) => cmd_stats(&input, json, &engine),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print the outline if input is provided
            if let Some(input) = cli.input {
                cmd_generate(
                    &input,
                    None,
                    OutputFormat::Text,
                    false,
                    false,
                    &cli.engine,
                )
            } else {
                println!("{}", "Usage: autotoc <FILE>".yellow());
                println!("       autotoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_generate(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    no_page_numbers: bool,
    engine_args: &EngineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = OutlineEngine::new(engine_args.to_options()?)?;
    let doc = LayoutDocument::from_path(input)?;
    let outline = engine.resolve(&doc);

    let render_options = RenderOptions::new().with_pages(!no_page_numbers);
    let json_format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let content = format.render(&outline, &render_options, json_format)?;

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!(
            "{} {} ({} entries, {})",
            "Saved to".green(),
            path.display(),
            outline.count,
            source_label(outline.source)
        );
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: OutputFormat,
    engine_args: &EngineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = OutlineEngine::new(engine_args.to_options()?)?;
    let render_options = RenderOptions::default();

    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut succeeded = 0usize;
    let mut failures = Vec::new();

    for input in inputs {
        pb.set_message(input.display().to_string());
        let target = output_path(input, output, format);

        let result = LayoutDocument::from_path(input)
            .map(|doc| engine.resolve(&doc))
            .and_then(|outline| format.render(&outline, &render_options, JsonFormat::Pretty))
            .and_then(|content| fs::write(&target, content).map_err(autotoc::Error::from));

        match result {
            Ok(()) => succeeded += 1,
            Err(e) => {
                log::warn!("Failed to process {}: {}", input.display(), e);
                failures.push((input.clone(), e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} files",
        "Processed".green().bold(),
        succeeded,
        inputs.len()
    );
    for (path, e) in &failures {
        println!("  {} {}: {}", "✗".red(), path.display(), e);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(autotoc::Error::Other(format!("{} file(s) failed", failures.len())).into())
    }
}

fn cmd_stats(
    input: &Path,
    json: bool,
    engine_args: &EngineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = OutlineEngine::new(engine_args.to_options()?.always_infer())?;
    let doc = LayoutDocument::from_path(input)?;
    let outline = engine.generate(&doc);

    if json {
        println!("{}", serde_json::to_string_pretty(&outline.stats)?);
        return Ok(());
    }

    let stats = &outline.stats;

    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count);
    println!("{}: {}", "Scanned".bold(), stats.pages_scanned);
    println!("{}: {}", "Failed".bold(), stats.pages_failed);
    println!("{}: {}", "Skipped".bold(), stats.pages_skipped);
    println!(
        "{}: {}",
        "Native outline".bold(),
        if doc.has_native_outline() { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Font Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    match stats.body_size {
        Some(size) => println!("{}: {:.1}pt", "Body size".bold(), size),
        None => println!("{}: {}", "Body size".bold(), "no text".dimmed()),
    }
    if let Some(color) = stats.body_color {
        println!("{}: {}", "Body colour".bold(), color);
    }
    for (i, size) in stats.heading_sizes.iter().enumerate() {
        println!("{} {}: {:.1}pt", "Level".bold(), i + 1, size);
    }

    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Entries".bold(), outline.count);
    println!("{}: {}", "Fallback headings".bold(), stats.fallback_headings);
    println!("{}: {}", "Demoted".bold(), stats.demoted);
    println!("{}: {}", "Duplicates dropped".bold(), stats.duplicates_dropped);
    println!("{}: {}", "Filtered lines".bold(), stats.lines_filtered);
    println!("{}: {}", "Malformed lines".bold(), stats.lines_malformed);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "autotoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Table-of-contents inference from PDF layout");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/autotoc".dimmed());
    println!("License: MIT");
}

/// Output path for one batch input: `<stem>.toc.<ext>`.
fn output_path(input: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let filename = format!("{}.toc.{}", stem, format.extension());
    match output_dir {
        Some(dir) => dir.join(filename),
        None => input.with_file_name(filename),
    }
}

fn source_label(source: OutlineSource) -> &'static str {
    match source {
        OutlineSource::Inferred => "inferred",
        OutlineSource::Native => "native",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_output_path() {
        let input = Path::new("/data/manual.layout.json");
        assert_eq!(
            output_path(input, None, OutputFormat::Markdown),
            PathBuf::from("/data/manual.layout.toc.md")
        );
        assert_eq!(
            output_path(input, Some(Path::new("/out")), OutputFormat::Json),
            PathBuf::from("/out/manual.layout.toc.json")
        );
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("options.json");
        fs::write(&config, r#"{ "max_levels": 5, "font_threshold": 12.0 }"#).unwrap();

        let args = EngineArgs {
            config: Some(config),
            max_levels: Some(2),
            no_page_fallback: true,
            ..EngineArgs::default()
        };
        let options = args.to_options().unwrap();
        assert_eq!(options.max_levels, 2);
        assert_eq!(options.font_threshold, 12.0);
        assert!(!options.force_page_heading);
        assert!(options.parallel);
    }

    #[test]
    fn test_missing_config_file() {
        let args = EngineArgs {
            config: Some(PathBuf::from("/nonexistent/options.json")),
            ..EngineArgs::default()
        };
        assert!(args.to_options().is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_engine_flags_without_subcommand() {
        let cli = Cli::try_parse_from([
            "autotoc",
            "--max-levels",
            "2",
            "--config",
            "options.json",
            "layout.json",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.input, Some(PathBuf::from("layout.json")));
        assert_eq!(cli.engine.max_levels, Some(2));
        assert_eq!(cli.engine.config, Some(PathBuf::from("options.json")));
    }

    #[test]
    fn test_batch_reports_failed_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(&good, r#"{ "page_count": 0, "pages": [] }"#).unwrap();
        let missing = dir.path().join("missing.json");
        let out = dir.path().join("out");

        let err = cmd_batch(
            &[good, missing],
            Some(&out),
            OutputFormat::Json,
            &EngineArgs::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<autotoc::Error>(),
            Some(autotoc::Error::Other(msg)) if msg == "1 file(s) failed"
        ));
        assert!(out.join("good.toc.json").exists());
    }
}
