//! topicize CLI - document topic segmentation tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use topicize::{
    run_batch, run_batch_parallel, segment_with, ClassifyStrategy, Document, FontHistogram,
    ImageExporter, ImageLocator, ImageMap, NoImages, SegmentOptions,
};

#[derive(Parser)]
#[command(name = "topicize")]
#[command(version)]
#[command(about = "Segment document dumps into topic-scoped markdown records", long_about = None)]
struct Cli {
    /// Input document dump (JSON file or directory of dumps)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory for topic files
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment documents and write one JSON record per topic
    Run {
        /// Input document dump (JSON file or directory of dumps)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory for topic files
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Export page images into this directory and link them
        #[arg(long, value_name = "DIR", env = "TOPICIZE_ASSETS")]
        assets: Option<PathBuf>,

        /// Base path emitted image links are joined under
        #[arg(long, value_name = "BASE")]
        link_base: Option<String>,

        /// Line classification strategy
        #[arg(long, value_enum, default_value = "line-max")]
        strategy: Strategy,

        /// Minimum trimmed content length a topic must reach
        #[arg(long, value_name = "N")]
        min_chars: Option<usize>,

        /// Extra tag appended to every topic (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Creation date stamped on topics (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,

        /// Process documents across a thread pool
        #[arg(long)]
        parallel: bool,

        /// Pretty-print the topic JSON files
        #[arg(long)]
        pretty: bool,

        /// Report what would be written without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show inferred font-size thresholds for one document dump
    Thresholds {
        /// Input document dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print segmented topics as markdown
    #[command(alias = "md")]
    Markdown {
        /// Input document dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Line classification strategy
        #[arg(long, value_enum, default_value = "line-max")]
        strategy: Strategy,

        /// Minimum trimmed content length a topic must reach
        #[arg(long, value_name = "N")]
        min_chars: Option<usize>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Classify whole lines by their largest span size
    LineMax,
    /// Classify each span independently
    PerSpan,
}

impl From<Strategy> for ClassifyStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::LineMax => ClassifyStrategy::LineMax,
            Strategy::PerSpan => ClassifyStrategy::PerSpan,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            input,
            output,
            assets,
            link_base,
            strategy,
            min_chars,
            tags,
            date,
            parallel,
            pretty,
            dry_run,
        }) => cmd_run(
            &input,
            output.as_deref(),
            assets.as_deref(),
            link_base.as_deref(),
            strategy,
            min_chars,
            &tags,
            date.as_deref(),
            parallel,
            pretty,
            dry_run,
        ),
        Some(Commands::Thresholds { input }) => cmd_thresholds(&input),
        Some(Commands::Markdown {
            input,
            output,
            strategy,
            min_chars,
        }) => cmd_markdown(&input, output.as_deref(), strategy, min_chars),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: run if input is provided
            if let Some(input) = cli.input {
                cmd_run(
                    &input,
                    cli.output.as_deref(),
                    None,
                    None,
                    Strategy::LineMax,
                    None,
                    &[],
                    None,
                    false,
                    false,
                    false,
                )
            } else {
                println!("{}", "Usage: topicize <INPUT> [OUTPUT]".yellow());
                println!("       topicize --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    input: &Path,
    output: Option<&Path>,
    assets: Option<&Path>,
    link_base: Option<&str>,
    strategy: Strategy,
    min_chars: Option<usize>,
    tags: &[String],
    date: Option<&str>,
    parallel: bool,
    pretty: bool,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources = collect_inputs(input)?;
    if sources.is_empty() {
        println!(
            "{} no document dumps found under {}",
            "Warning:".yellow(),
            input.display()
        );
        return Ok(());
    }
    log::debug!("{} document dumps to process", sources.len());

    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_topics", stem))
    });

    let date = date
        .map(str::to_string)
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    let mut options = SegmentOptions::new()
        .with_strategy(strategy.into())
        .with_created_at(date);
    if let Some(n) = min_chars {
        options = options.with_min_topic_chars(n);
    }
    for tag in tags {
        options = options.with_tag(tag.clone());
    }

    let locator: Box<dyn ImageLocator + Sync> = match assets {
        Some(dir) if !dry_run => {
            let mut exporter = ImageExporter::new(dir);
            if let Some(base) = link_base {
                exporter = exporter.with_link_base(base);
            }
            Box::new(exporter)
        }
        _ => Box::new(NoImages),
    };

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Reading document dumps...");
    let acquired: Vec<(String, topicize::Result<Document>)> = sources
        .into_iter()
        .map(|(name, path)| {
            let doc = read_document(&path);
            pb.inc(1);
            (name, doc)
        })
        .collect();

    pb.set_message("Segmenting...");
    let reports = if parallel {
        run_batch_parallel(acquired, &locator, &options)
    } else {
        run_batch(acquired, &locator, &options)
    };
    pb.finish_with_message("Done!");

    if !dry_run {
        fs::create_dir_all(&output_dir)?;
    }

    let mut segmented_docs = 0;
    let mut skipped_docs = 0;
    let mut written = 0;
    for report in &reports {
        match report.topics() {
            Some(topics) => {
                segmented_docs += 1;
                println!(
                    "{} {} ({} topics)",
                    "Segmented".green(),
                    report.name,
                    topics.len()
                );
                for topic in topics {
                    let slug = if topic.slug.is_empty() {
                        "untitled"
                    } else {
                        topic.slug.as_str()
                    };
                    let file_name = format!("{}.json", slug);
                    if dry_run {
                        println!("  {} {}", "would write".dimmed(), file_name);
                    } else {
                        let json = if pretty {
                            serde_json::to_string_pretty(topic)?
                        } else {
                            serde_json::to_string(topic)?
                        };
                        fs::write(output_dir.join(&file_name), json)?;
                    }
                    written += 1;
                }
            }
            None => {
                skipped_docs += 1;
                println!(
                    "{} {} ({})",
                    "Skipped".yellow(),
                    report.name,
                    report.skip_reason().unwrap_or("unknown")
                );
            }
        }
    }

    println!("\n{}", "Summary:".green().bold());
    println!("  {} {} documents segmented", "├─".dimmed(), segmented_docs);
    println!("  {} {} documents skipped", "├─".dimmed(), skipped_docs);
    if dry_run {
        println!("  {} {} topics (dry run)", "└─".dimmed(), written);
    } else {
        println!(
            "  {} {} topics written to {}",
            "└─".dimmed(),
            written,
            output_dir.display()
        );
    }

    if segmented_docs == 0 {
        return Err("every document was skipped".into());
    }

    Ok(())
}

fn cmd_thresholds(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_document(input)?;
    doc.validate()?;

    let histogram = FontHistogram::from_document(&doc);
    let thresholds = histogram.thresholds();

    println!("{}", "Font Analysis".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Spans".bold(), histogram.observations());
    println!("{}: {}", "Distinct sizes".bold(), histogram.distinct_sizes());

    println!();
    println!("{}", "Heading Thresholds".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {:.1}", "Body".bold(), thresholds.body);
    println!("{}: {:.1}", "H1".bold(), thresholds.h1);
    println!("{}: {:.1}", "H2".bold(), thresholds.h2);
    println!("{}: {:.1}", "H3".bold(), thresholds.h3);

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    strategy: Strategy,
    min_chars: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_document(input)?;
    doc.validate()?;

    let name = input.file_stem().unwrap_or_default().to_string_lossy();

    let mut options = SegmentOptions::new().with_strategy(strategy.into());
    if let Some(n) = min_chars {
        options = options.with_min_topic_chars(n);
    }

    let topics = segment_with(&doc, &name, &ImageMap::new(), &options);

    let mut markdown = String::new();
    for (i, topic) in topics.iter().enumerate() {
        if i > 0 {
            markdown.push_str("\n---\n\n");
        }
        markdown.push_str(&topic.content);
    }

    if let Some(path) = output {
        fs::write(path, &markdown)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", markdown);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "topicize".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document topic segmentation tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/topicize/topicize".dimmed()
    );
    println!("License: MIT");
}

/// Read one document dump from disk.
fn read_document(path: &Path) -> topicize::Result<Document> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Expand the input path into named document dumps, sorted by file name.
fn collect_inputs(input: &Path) -> Result<Vec<(String, PathBuf)>, Box<dyn std::error::Error>> {
    let mut sources = Vec::new();

    if input.is_dir() {
        for entry in fs::read_dir(input)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                sources.push((stem_of(&path), path));
            }
        }
        sources.sort_by(|a, b| a.1.cmp(&b.1));
    } else {
        sources.push((stem_of(input), input.to_path_buf()));
    }

    Ok(sources)
}

fn stem_of(path: &Path) -> String {
    path.file_stem().unwrap_or_default().to_string_lossy().to_string()
}
