//! foreword CLI - book manuscript ingestion and appendix export tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use foreword::{ContentTruncator, TruncationOutcome};

#[derive(Parser)]
#[command(name = "foreword")]
#[command(version)]
#[command(about = "Probe book PDFs, extract bounded text, export appendix documents", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output text file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document information from a sampled probe
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: InfoFormat,
    },

    /// Extract text with page markers, bounded to a character budget
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Character budget for truncation
        #[arg(long, value_name = "CHARS")]
        budget: Option<usize>,

        /// Keep the full text regardless of length
        #[arg(long)]
        no_truncate: bool,
    },

    /// Export a markdown file as DOCX, PDF, or markdown
    Export {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Document title (defaults to the file name)
        #[arg(short, long)]
        title: Option<String>,

        /// Output file (defaults to the input with a new extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "docx")]
        format: ExportFormat,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum InfoFormat {
    /// Human-readable summary
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// Word document
    Docx,
    /// Paginated PDF
    Pdf,
    /// Markdown with the title prepended
    Md,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Info { input, format }) => cmd_info(&input, format),
        Some(Commands::Extract {
            input,
            output,
            budget,
            no_truncate,
        }) => cmd_extract(&input, output.as_deref(), budget, no_truncate),
        Some(Commands::Export {
            input,
            title,
            output,
            format,
        }) => cmd_export(&input, title.as_deref(), output.as_deref(), format),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&input, cli.output.as_deref(), None, false)
            } else {
                println!("{}", "Usage: foreword <FILE> [OUTPUT]".yellow());
                println!("       foreword --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_info(input: &Path, format: InfoFormat) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let meta = foreword::probe_pdf(&data);

    match format {
        InfoFormat::Json => println!("{}", serde_json::to_string_pretty(&meta)?),
        InfoFormat::Text => {
            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40).dimmed());

            println!("{}: {}", "File".bold(), input.display());
            if let Some(version) = foreword::detect::pdf_version(&data) {
                println!("{}: PDF {}", "Format".bold(), version);
            }
            println!("{}: {}", "Pages".bold(), meta.page_count);
            println!(
                "{}: {}",
                "Extractable text".bold(),
                if meta.has_extractable_text {
                    "Yes"
                } else {
                    "No"
                }
            );
            println!("{}: ~{}", "Words".bold(), meta.estimated_word_count);
            println!("{}: ~{}", "Characters".bold(), meta.estimated_char_count);

            if let Some(error) = &meta.error {
                println!("{}: {}", "Problem".bold(), error.red());
            }
        }
    }

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    budget: Option<usize>,
    no_truncate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Probing PDF...");
    let meta = foreword::probe_pdf(&data);
    if let Some(error) = meta.error {
        pb.finish_and_clear();
        return Err(error.into());
    }
    log::debug!(
        "probe: {} pages, ~{} words",
        meta.page_count,
        meta.estimated_word_count
    );
    pb.inc(1);

    pb.set_message("Extracting text...");
    let extraction = foreword::extract_text(&data)?;
    pb.inc(1);

    pb.set_message("Bounding content...");
    let truncator = match budget {
        Some(chars) => ContentTruncator::with_budget(chars),
        None => ContentTruncator::new(),
    };
    let outcome = if no_truncate {
        TruncationOutcome::unchanged(extraction.text.clone())
    } else {
        truncator.truncate(&extraction.text)
    };
    pb.inc(1);
    pb.finish_with_message("Done!");

    if let Some(path) = output {
        fs::write(path, &outcome.text)?;
        println!("{} {}", "Saved to".green(), path.display());

        println!("\n{}", "Summary".green().bold());
        println!("  {} pages with text: {}", "├─".dimmed(), extraction.pages_seen);
        println!("  {} characters: {}", "├─".dimmed(), outcome.final_chars);
        if outcome.was_truncated {
            println!(
                "  {} truncated to {:.1}% of original",
                "└─".dimmed(),
                outcome.kept_percentage
            );
        } else {
            println!("  {} full text kept", "└─".dimmed());
        }
    } else {
        println!("{}", outcome.text);
    }

    Ok(())
}

fn cmd_export(
    input: &Path,
    title: Option<&str>,
    output: Option<&Path>,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = fs::read_to_string(input)?;

    let title = title.map(str::to_string).unwrap_or_else(|| {
        input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    });

    let (bytes, extension) = match format {
        ExportFormat::Docx => (foreword::to_docx(&markdown, &title)?, "docx"),
        ExportFormat::Pdf => (foreword::to_pdf(&markdown, &title)?, "pdf"),
        ExportFormat::Md => (foreword::to_markdown_bytes(&markdown, &title), "md"),
    };

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(extension));
    if path == input {
        return Err("output would overwrite the input file; pass --output".into());
    }

    fs::write(&path, &bytes)?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "foreword".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Book manuscript ingestion and appendix export tool");
    println!();
    println!("License: MIT");
}
