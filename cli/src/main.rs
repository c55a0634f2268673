//! docxpack CLI - Office Open XML package tool
//!
//! Lists package parts, dumps or replaces the main document body, and
//! repacks archives.

use clap::{Args, Parser, Subcommand};
use colored::*;
use docxpack::{Compression, DocxContainer, SaveOptions, DOCUMENT_PATH};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Inspect and edit Office Open XML packages
#[derive(Parser)]
#[command(
    name = "docxpack",
    author = "iyulab",
    version,
    about = "Inspect and edit Office Open XML packages",
    long_about = "docxpack - Load, edit, and re-save DOCX/XLSX/PPTX packages.\n\n\
                  Every part of the package is preserved on save; only the parts you\n\
                  replace change."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List package entries and their sizes
    #[command(visible_alias = "ls")]
    List {
        /// Input file path
        input: PathBuf,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show package information
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Write the document body (word/document.xml) to stdout or a file
    Cat {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the document body and save the package
    Set {
        /// Input file path
        input: PathBuf,

        /// File holding the new document body
        body: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        save: SaveArgs,
    },

    /// Load and re-save a package unchanged
    Repack {
        /// Input file path
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        save: SaveArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct SaveArgs {
    /// Store entries without compression
    #[arg(long)]
    stored: bool,

    /// Deflate level (0-9)
    #[arg(long, conflicts_with = "stored", value_parser = clap::value_parser!(i64).range(0..=9))]
    level: Option<i64>,
}

impl From<SaveArgs> for SaveOptions {
    fn from(args: SaveArgs) -> Self {
        if args.stored {
            SaveOptions::stored()
        } else {
            SaveOptions::new()
                .with_compression(Compression::Deflated)
                .with_compression_level(args.level)
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List { input, json } => {
            let container = DocxContainer::open(&input)?;
            let entries = container.entry_infos();

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{:>10}  {}", entry.size, entry.name);
                }
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Loading package...");
            let container = DocxContainer::open(&input)?;
            pb.finish_and_clear();

            let total: usize = container.entries().map(|(_, data)| data.len()).sum();
            let format = docxpack::detect_format(&container);

            println!("{}", "Package Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            match format {
                Some(format) => {
                    println!("{}: {} (.{})", "Format".bold(), format, format.extension());
                    let main_part = format.main_part();
                    let status = if container.contains(main_part) {
                        "present".green()
                    } else {
                        "missing".yellow()
                    };
                    println!("{}: {} ({})", "Main part".bold(), main_part, status);
                }
                None => println!("{}: {}", "Format".bold(), "Unknown".yellow()),
            }
            println!("{}: {}", "Entries".bold(), container.len());
            println!("{}: {} bytes", "Uncompressed size".bold(), total);
            match container.document() {
                Some(body) => println!("{}: {} bytes", "Document body".bold(), body.len()),
                None => println!("{}: {}", "Document body".bold(), "absent".yellow()),
            }
        }

        Commands::Cat { input, output } => {
            let container = DocxContainer::open(&input)?;
            let body = container
                .document()
                .ok_or_else(|| format!("{} not found in {}", DOCUMENT_PATH, input.display()))?;

            match output {
                Some(path) => {
                    fs::write(&path, body)?;
                    println!(
                        "{} Wrote document body: {}",
                        "✓".green().bold(),
                        path.display()
                    );
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    handle.write_all(body)?;
                    handle.flush()?;
                }
            }
        }

        Commands::Set {
            input,
            body,
            output,
            save,
        } => {
            let pb = create_spinner("Loading package...");
            let mut container = DocxContainer::open(&input)?;
            let replaced = container.document().is_some();
            container.set_document(fs::read(&body)?);

            pb.set_message("Saving package...");
            container.save_with_options(&output, &save.into())?;
            pb.finish_and_clear();

            let verb = if replaced { "Replaced" } else { "Inserted" };
            println!(
                "{} {} document body: {}",
                "✓".green().bold(),
                verb,
                output.display()
            );
        }

        Commands::Repack {
            input,
            output,
            save,
        } => {
            let pb = create_spinner("Repacking...");
            let container = DocxContainer::open(&input)?;
            container.save_with_options(&output, &save.into())?;
            pb.finish_and_clear();

            println!(
                "{} Repacked {} entries: {}",
                "✓".green().bold(),
                container.len(),
                output.display()
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "docxpack".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Load, edit, and re-save Office Open XML packages");
    println!();
    println!("Supported formats: DOCX, XLSX, PPTX");
    println!("Repository: https://github.com/iyulab/docxpack");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_save_args() {
        let cli = Cli::parse_from([
            "docxpack", "repack", "in.docx", "-o", "out.docx", "--level", "9",
        ]);
        match cli.command {
            Commands::Repack { save, .. } => {
                let options: SaveOptions = save.into();
                assert_eq!(options.compression, Compression::Deflated);
                assert_eq!(options.compression_level, Some(9));
            }
            _ => panic!("expected repack"),
        }

        let cli = Cli::parse_from([
            "docxpack", "set", "in.docx", "body.xml", "-o", "out.docx", "--stored",
        ]);
        match cli.command {
            Commands::Set { save, .. } => {
                let options: SaveOptions = save.into();
                assert_eq!(options.compression, Compression::Stored);
            }
            _ => panic!("expected set"),
        }
    }
}
