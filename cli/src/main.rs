//! paperparse CLI - academic paper structure extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use paperparse::render::{self, TableLayout};
use paperparse::{ExtractOptions, Extraction, JsonFormat, PaperParser, RenderOptions, TableFormat};

#[derive(Parser)]
#[command(name = "paperparse")]
#[command(version)]
#[command(
    about = "Extract title, authors and sections from academic paper character dumps",
    long_about = None
)]
struct Cli {
    /// Input character dump (JSON, JSON Lines or paged JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every format (CSV, xlsx, JSON, Markdown) into a directory
    Convert {
        /// Input character dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Export as a single-row table
    #[command(alias = "csv")]
    Table {
        /// Input character dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Field delimiter
        #[arg(long, value_enum, default_value = "csv")]
        format: TableKind,

        /// Print computed column widths to stderr
        #[arg(long)]
        widths: bool,

        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Export as an xlsx workbook with sized columns
    Xlsx {
        /// Input character dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output workbook (defaults to the input name with .xlsx)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Export as JSON
    Json {
        /// Input character dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Include fallbacks and statistics
        #[arg(long)]
        report: bool,

        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Export as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input character dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Skip sections without content
        #[arg(long)]
        skip_empty: bool,

        /// Heading level for sections (2-6)
        #[arg(long, default_value = "2")]
        section_level: u8,

        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Show the lines built from the characters
    Lines {
        /// Input character dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output lines as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Show extraction statistics and fallbacks
    Info {
        /// Input character dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Show version information
    Version,
}

/// Heuristic threshold overrides.
#[derive(Args, Clone, Default)]
struct Thresholds {
    /// Vertical distance below which characters share a line
    #[arg(long, value_name = "UNITS")]
    line_tolerance: Option<f64>,

    /// Fraction of the largest font size that marks a title line
    #[arg(long, value_name = "RATIO")]
    title_ratio: Option<f64>,

    /// Font size difference tolerated within a section body
    #[arg(long, value_name = "POINTS")]
    size_tolerance: Option<f64>,

    /// Longest bold line still treated as a heading
    #[arg(long, value_name = "CHARS")]
    max_heading_chars: Option<usize>,

    /// Font name markers for bold text (repeatable)
    #[arg(long = "bold-marker", value_name = "MARKER")]
    bold_markers: Vec<String>,
}

impl Thresholds {
    fn to_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new();
        if let Some(tolerance) = self.line_tolerance {
            options = options.with_line_tolerance(tolerance);
        }
        if let Some(ratio) = self.title_ratio {
            options = options.with_title_size_ratio(ratio);
        }
        if let Some(tolerance) = self.size_tolerance {
            options = options.with_section_size_tolerance(tolerance);
        }
        if let Some(chars) = self.max_heading_chars {
            options = options.with_max_heading_chars(chars);
        }
        if !self.bold_markers.is_empty() {
            options = options.with_bold_markers(self.bold_markers.iter().cloned());
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableKind {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl From<TableKind> for TableFormat {
    fn from(kind: TableKind) -> Self {
        match kind {
            TableKind::Csv => TableFormat::Csv,
            TableKind::Tsv => TableFormat::Tsv,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            thresholds,
        }) => cmd_convert(&input, output.as_deref(), &thresholds),
        Some(Commands::Table {
            input,
            output,
            format,
            widths,
            thresholds,
        }) => cmd_table(&input, output.as_deref(), format, widths, &thresholds),
        Some(Commands::Xlsx {
            input,
            output,
            thresholds,
        }) => cmd_xlsx(&input, output.as_deref(), &thresholds),
        Some(Commands::Json {
            input,
            output,
            compact,
            report,
            thresholds,
        }) => cmd_json(&input, output.as_deref(), compact, report, &thresholds),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            skip_empty,
            section_level,
            thresholds,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            frontmatter,
            skip_empty,
            section_level,
            &thresholds,
        ),
        Some(Commands::Lines {
            input,
            json,
            thresholds,
        }) => cmd_lines(&input, json, &thresholds),
        Some(Commands::Info { input, thresholds }) => cmd_info(&input, &thresholds),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &Thresholds::default())
            } else {
                println!("{}", "Usage: paperparse <FILE> [OUTPUT]".yellow());
                println!("       paperparse --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn extract(input: &Path, thresholds: &Thresholds) -> Result<Extraction, Box<dyn std::error::Error>> {
    let options = thresholds.to_options();
    log::debug!("Extracting {} with {:?}", input.display(), options);
    let parser = PaperParser::open_with_options(input, options)?;
    let extraction = parser.parse();
    report_fallbacks(&extraction);
    Ok(extraction)
}

fn report_fallbacks(extraction: &Extraction) {
    for fallback in &extraction.fallbacks {
        eprintln!("{}: {}", "Warning".yellow().bold(), fallback);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    thresholds: &Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(5);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Inferring structure...");
    let extraction = extract(input, thresholds)?;
    pb.inc(1);

    pb.set_message("Writing table...");
    let csv = render::to_table(&extraction.document, TableFormat::Csv)?;
    fs::write(output_dir.join("paper.csv"), &csv)?;
    pb.inc(1);

    pb.set_message("Writing workbook...");
    render::write_xlsx(&extraction.document, output_dir.join("paper.xlsx"))?;
    pb.inc(1);

    pb.set_message("Writing JSON...");
    let json = render::to_json_report(&extraction, JsonFormat::Pretty)?;
    fs::write(output_dir.join("paper.json"), &json)?;
    pb.inc(1);

    pb.set_message("Writing Markdown...");
    let render_options = RenderOptions::new().with_frontmatter(true);
    let markdown = render::to_markdown(&extraction.document, &render_options)?;
    fs::write(output_dir.join("paper.md"), &markdown)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} paper.csv", "├─".dimmed());
    println!("  {} paper.xlsx", "├─".dimmed());
    println!("  {} paper.json", "├─".dimmed());
    println!("  {} paper.md", "└─".dimmed());

    Ok(())
}

fn cmd_table(
    input: &Path,
    output: Option<&Path>,
    kind: TableKind,
    widths: bool,
    thresholds: &Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract(input, thresholds)?;
    let table = render::to_table(&extraction.document, kind.into())?;

    if widths {
        for column in TableLayout::from_document(&extraction.document).columns {
            eprintln!("{:>4}  {}", column.width, column.name);
        }
    }

    // The table already ends with a newline
    if let Some(path) = output {
        fs::write(path, &table)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", table);
    }

    Ok(())
}

fn cmd_xlsx(
    input: &Path,
    output: Option<&Path>,
    thresholds: &Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract(input, thresholds)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("xlsx"));

    render::write_xlsx(&extraction.document, &path)?;
    println!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    report: bool,
    thresholds: &Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract(input, thresholds)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if report {
        render::to_json_report(&extraction, format)?
    } else {
        render::to_json(&extraction.document, format)?
    };

    write_or_print(output, &json)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    skip_empty: bool,
    section_level: u8,
    thresholds: &Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract(input, thresholds)?;

    let render_options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_empty_sections(!skip_empty)
        .with_section_level(section_level);

    let markdown = render::to_markdown(&extraction.document, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_lines(
    input: &Path,
    json: bool,
    thresholds: &Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = PaperParser::open_with_options(input, thresholds.to_options())?;
    let lines = parser.lines();

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    for (index, line) in lines.iter().enumerate() {
        let marker = if line.is_bold() { "B".bold() } else { " ".normal() };
        println!(
            "{:>5} {} p{:<3} {:>6.2} {}",
            index.to_string().dimmed(),
            marker,
            line.page(),
            line.font_size(),
            line.text()
        );
    }

    Ok(())
}

fn cmd_info(input: &Path, thresholds: &Thresholds) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract(input, thresholds)?;
    let doc = &extraction.document;
    let stats = &extraction.stats;

    println!("{}", "Paper Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), doc.title().unwrap_or_default());
    if let Some(authors) = doc.authors().filter(|a| !a.is_empty()) {
        println!("{}:", "Authors".bold());
        for author in authors.lines() {
            println!("  {}", author);
        }
    }
    for (name, body) in doc.sections() {
        println!(
            "  {} {} ({} words)",
            "§".dimmed(),
            name,
            body.split_whitespace().count()
        );
    }

    println!();
    println!("{}", "Extraction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {:.2}", "Max font size".bold(), stats.max_font_size);
    println!("{}: {}", "Title lines".bold(), stats.title_line_count);
    println!("{}: {}", "Author lines".bold(), stats.author_line_count);
    println!(
        "{}: {} ({} standard, {} dynamic)",
        "Headings".bold(),
        stats.heading_count(),
        stats.standard_heading_count,
        stats.dynamic_heading_count
    );
    println!("{}: {}", "Dropped lines".bold(), stats.dropped_line_count);
    println!("{}: {}", "Orphan lines".bold(), stats.orphan_line_count);

    if extraction.is_complete() {
        println!("{}: {}", "Fallbacks".bold(), "none".green());
    } else {
        println!("{}:", "Fallbacks".bold());
        for fallback in &extraction.fallbacks {
            println!("  {} {}", "-".yellow(), fallback);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "paperparse".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Academic paper structure extraction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_table_command() {
        let cli = Cli::try_parse_from([
            "paperparse",
            "table",
            "paper.json",
            "--format",
            "tsv",
            "--title-ratio",
            "0.9",
            "--bold-marker",
            "Heavy",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Table {
                format, thresholds, ..
            }) => {
                assert!(format == TableKind::Tsv);
                let options = thresholds.to_options();
                assert_eq!(options.title_size_ratio, 0.9);
                assert_eq!(options.bold_markers, vec!["Heavy".to_string()]);
            }
            _ => panic!("Expected table command"),
        }
    }

    #[test]
    fn test_xlsx_defaults_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("paper.json");
        fs::write(
            &input,
            r#"[{"text": "T", "page": 1, "top": 10, "x0": 1, "size": 20, "fontname": "Bold"}]"#,
        )
        .unwrap();

        cmd_xlsx(&input, None, &Thresholds::default()).unwrap();
        assert!(dir.path().join("paper.xlsx").exists());
    }

    #[test]
    fn test_default_thresholds() {
        assert_eq!(Thresholds::default().to_options(), ExtractOptions::default());
    }

    #[test]
    fn test_convert_writes_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("paper.json");
        fs::write(
            &input,
            r#"[{"text": "T", "page": 1, "top": 10, "x0": 1, "size": 20, "fontname": "Bold"}]"#,
        )
        .unwrap();

        let out = dir.path().join("out");
        cmd_convert(&input, Some(&out), &Thresholds::default()).unwrap();

        assert!(out.join("paper.csv").exists());
        assert!(out.join("paper.xlsx").exists());
        assert!(out.join("paper.json").exists());
        assert!(out.join("paper.md").exists());
    }
}
