//! troffdown CLI - markdown to troff ms converter

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use troffdown::{parse_markdown, ParseOptions, Pipeline, RenderOptions};

#[derive(Parser)]
#[command(name = "troffdown")]
#[command(version)]
#[command(about = "Convert markdown to troff ms macros", long_about = None)]
struct Cli {
    /// Input markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to ms macro source
    Ms {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// File whose contents are written before the document
        #[arg(long, value_name = "FILE")]
        preamble: Option<PathBuf>,
    },

    /// Convert markdown to PDF through troff, tr2post and ps2pdf
    Pdf {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// troff program to run
        #[arg(long, env = "TROFF", value_name = "PROGRAM")]
        troff: Option<String>,
    },

    /// Dump the parsed document tree as JSON
    Tree {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the document's title block
    Meta {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Ms {
            input,
            output,
            preamble,
        }) => cmd_ms(&input, output.as_deref(), preamble.as_deref()),
        Some(Commands::Pdf {
            input,
            output,
            troff,
        }) => cmd_pdf(&input, &output, troff),
        Some(Commands::Tree { input, compact }) => cmd_tree(&input, compact),
        Some(Commands::Meta { input }) => cmd_meta(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_ms(&input, cli.output.as_deref(), None)
            } else {
                println!("{}", "Usage: troffdown <FILE> [-o OUTPUT]".yellow());
                println!("       troffdown --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_ms(
    input: &Path,
    output: Option<&Path>,
    preamble: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(input)?;

    let mut render_options = RenderOptions::new();
    if let Some(path) = preamble {
        render_options = render_options.with_preamble(fs::read_to_string(path)?);
    }

    let ms = troffdown::to_troff_with_options(&source, &ParseOptions::default(), &render_options)?;
    write_output(output, &ms)
}

fn cmd_pdf(
    input: &Path,
    output: &Path,
    troff: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(input)?;
    let ms = troffdown::to_troff(&source)?;

    // clap already read $TROFF; an explicit flag wins over the environment.
    let mut troff_pass = troffdown::ToolPass::troff();
    if let Some(program) = troff {
        troff_pass.program = program;
    }
    let pipeline = Pipeline::new()
        .then(troff_pass)
        .then(troffdown::ToolPass::tr2post())
        .then(troffdown::ToolPass::ps2pdf());
    log::info!("Running {}", pipeline.names().join(" | "));

    let pdf = pipeline.run(ms.as_bytes())?;
    fs::write(output, &pdf)?;
    println!("{} {} ({} bytes)", "Saved to".green(), output.display(), pdf.len());

    Ok(())
}

fn cmd_tree(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(input)?;
    let doc = parse_markdown(&source, &ParseOptions::default())?;

    let json = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    println!("{}", json);

    Ok(())
}

fn cmd_meta(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(input)?;
    let Some(block) = troffdown::title_block(&source)? else {
        println!("{}", "No title block".yellow());
        return Ok(());
    };

    println!("{}", "Title Block".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Title".bold(), block.title);
    println!("{}: {}", "Date".bold(), block.date.ms_format());
    if !block.slug.is_empty() {
        println!("{}: {}", "Slug".bold(), block.slug);
    }
    for author in &block.authors {
        println!("{}: {} <{}>", "Author".bold(), author.name, author.email);
        if author.has_affiliation() {
            println!("  {}", author.affiliation.dimmed());
        }
    }
    if !block.tags.is_empty() {
        let tags: Vec<&str> = block.tags.iter().map(|t| t.as_str()).collect();
        println!("{}: {}", "Tags".bold(), tags.join(", "));
    }
    if block.has_abstract() {
        println!();
        println!("{}", "Abstract".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", block.abstract_text.trim());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "troffdown".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown to troff ms converter");
}
