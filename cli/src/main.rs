//! pagemodel CLI - convert page layout snapshots between PAGE format versions

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagemodel::convert::ConverterHub;
use pagemodel::snapshot::{self, JsonFormat};
use pagemodel::version::{FOREIGN_VERSIONS, PAGE_VERSIONS};
use pagemodel::{
    ConversionMessage, ConvertOptions, FormatVersion, LayoutConverter, LayoutStats, MessageKind,
    MissingRoute, ModelRegistry,
};

#[derive(Parser)]
#[command(name = "pagemodel")]
#[command(version)]
#[command(about = "Convert page layout snapshots between PAGE XML versions", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert page snapshots to another format version
    Convert {
        /// Input snapshot files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Target version (e.g. 2019-07-15)
        #[arg(short, long, value_name = "VERSION", value_parser = parse_version)]
        to: FormatVersion,

        /// Output directory (next to each input if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Fail when no conversion route exists
        #[arg(long)]
        strict: bool,

        /// Keep attributes as they are instead of adapting them to the target
        #[arg(long)]
        keep_attributes: bool,

        /// Also translate page, line, word and glyph scripts
        #[arg(long)]
        all_scripts: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Report what converting a snapshot would change
    Check {
        /// Input snapshot file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target version (e.g. 2010-03-19)
        #[arg(short, long, value_name = "VERSION", value_parser = parse_version)]
        to: FormatVersion,

        /// Also translate page, line, word and glyph scripts
        #[arg(long)]
        all_scripts: bool,
    },

    /// Show page information
    Info {
        /// Input snapshot file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known format versions
    Versions {
        /// Also list conversion routes
        #[arg(short, long)]
        routes: bool,
    },
}

fn parse_version(s: &str) -> Result<FormatVersion, String> {
    FormatVersion::parse(s).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Convert {
            inputs,
            to,
            output,
            strict,
            keep_attributes,
            all_scripts,
            compact,
        } => {
            let options = ConvertOptions::new()
                .with_missing_route(if strict {
                    MissingRoute::Fail
                } else {
                    MissingRoute::Proceed
                })
                .with_attribute_adaptation(!keep_attributes)
                .with_text_object_scripts(all_scripts);
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            cmd_convert(&inputs, &to, output.as_deref(), &options, format)
        }
        Commands::Check {
            input,
            to,
            all_scripts,
        } => {
            let options = ConvertOptions::new().with_text_object_scripts(all_scripts);
            cmd_check(&input, &to, &options)
        }
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Versions { routes } => cmd_versions(routes),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    inputs: &[PathBuf],
    target: &FormatVersion,
    output: Option<&Path>,
    options: &ConvertOptions,
    format: JsonFormat,
) -> Result<(), Box<dyn Error>> {
    let registry = ModelRegistry::with_defaults()?;
    let hub = ConverterHub::with_defaults()?;
    let model = registry.require(target)?;

    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failed = 0;
    let mut changes = 0;
    for input in inputs {
        pb.set_message(input.display().to_string());
        let result = snapshot::load(input, &registry).and_then(|mut page| {
            let messages = hub
                .convert_with_options(&mut page, &model, options)?
                .unwrap_or_default();
            let path = output_path(input, output, target);
            snapshot::save(&page, &path, format)?;
            Ok((path, messages))
        });

        match result {
            Ok((path, messages)) => {
                for message in &messages {
                    log::info!("{}: {}", input.display(), message);
                }
                changes += messages.len();
                pb.println(format!(
                    "{} {} ({} change(s))",
                    "Converted".green(),
                    path.display(),
                    messages.len()
                ));
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} file(s) to {}, {} change(s)",
        "Converted".green().bold(),
        inputs.len() - failed,
        target,
        changes
    );

    if failed > 0 {
        return Err(format!("{} of {} file(s) failed", failed, inputs.len()).into());
    }
    Ok(())
}

fn output_path(input: &Path, output: Option<&Path>, target: &FormatVersion) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = format!("{}.{}.json", stem, target);
    match output {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

fn cmd_check(
    input: &Path,
    target: &FormatVersion,
    options: &ConvertOptions,
) -> Result<(), Box<dyn Error>> {
    let registry = ModelRegistry::with_defaults()?;
    let hub = ConverterHub::with_defaults()?;
    let page = snapshot::load(input, &registry)?;

    let Some(source) = page.format_version() else {
        println!("{}", "Page has no format version, nothing to check".yellow());
        return Ok(());
    };

    match hub.check_with_options(&page, target, options) {
        Some(messages) if messages.is_empty() => {
            println!("{} {} -> {}", "No changes needed".green(), source, target);
        }
        Some(messages) => {
            println!(
                "{} {} -> {}",
                "Compliance report".cyan().bold(),
                source,
                target
            );
            println!("{}", "─".repeat(40).dimmed());
            for message in &messages {
                print_message(message);
            }
            println!("\n{} change(s)", messages.len());
        }
        None if source == target => {
            println!("{} {}", "Page is already at".green(), target);
        }
        None => {
            println!(
                "{} {} -> {}",
                "No conversion route".yellow(),
                source,
                target
            );
        }
    }
    Ok(())
}

fn print_message(message: &ConversionMessage) {
    let tag = match message.kind {
        MessageKind::General => "note".normal(),
        MessageKind::ValueChanged => "value".cyan(),
        MessageKind::ContentRemoved => "removed".red(),
        MessageKind::TypeChanged => "type".yellow(),
    };
    println!("  [{}] {}", tag, message.text);
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let registry = ModelRegistry::with_defaults()?;
    let page = snapshot::load(input, &registry)?;
    let stats = LayoutStats::collect(page.layout());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    match page.format_version() {
        Some(version) => println!("{}: PAGE {}", "Format".bold(), version),
        None => println!("{}: {}", "Format".bold(), "unversioned".dimmed()),
    }
    if let Some(image) = page.image_filename() {
        println!("{}: {}", "Image".bold(), image);
    }
    if let Some((width, height)) = page.image_size() {
        println!("{}: {} x {}", "Size".bold(), width, height);
    }

    let metadata = page.metadata();
    if !metadata.creator.is_empty() {
        println!("{}: {}", "Creator".bold(), metadata.creator);
    }
    println!("{}: {}", "Created".bold(), metadata.created);
    println!("{}: {}", "Modified".bold(), metadata.last_change);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Regions".bold(), stats.region_count);
    for (name, count) in &stats.regions_by_type {
        println!("  {} {}: {}", "├─".dimmed(), name, count);
    }
    println!("{}: {}", "Text lines".bold(), stats.text_line_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Glyphs".bold(), stats.glyph_count);
    println!("{}: {}", "Graphemes".bold(), stats.grapheme_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Relations".bold(), stats.relation_count);
    println!("{}: {}", "Reading order refs".bold(), stats.reading_order_refs);

    Ok(())
}

fn cmd_versions(routes: bool) -> Result<(), Box<dyn Error>> {
    println!("{}", "PAGE XML".cyan().bold());
    for version in PAGE_VERSIONS.iter() {
        println!("  {}  {}", version, version.namespace().dimmed());
    }

    println!("\n{}", "Other formats".cyan().bold());
    for version in FOREIGN_VERSIONS.iter() {
        println!("  {}", version);
    }

    if routes {
        let hub = ConverterHub::with_defaults()?;
        println!("\n{}", "Conversion routes".cyan().bold());
        for (source, target) in hub.routes() {
            let stages = hub
                .find_converter(&source, &target)
                .map(|c| c.stage_count())
                .unwrap_or(0);
            let kind = if stages > 1 {
                format!("chain of {}", stages).dimmed()
            } else {
                "direct".green()
            };
            println!("  {} -> {}  ({})", source, target, kind);
        }
    }
    Ok(())
}
