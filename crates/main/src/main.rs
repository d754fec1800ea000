mod job;
mod template;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;

use dg_report::catalog::MATERIAL_CATALOG;
use dg_report::{ReportRenderer, PDF_MIME_TYPE};

/// Renders Deutsche Glasfaser daily work reports from job files.
///
/// Text is set in Liberation Sans when its files are found under
/// `assets/fonts` next to the binary, in the `DG_REPORT_FONTS_DIR` directory,
/// or in the usual system font locations. Otherwise the bundled DejaVu Sans
/// faces are used.
#[derive(Parser)]
#[command(author, version, about = "Render Tagesarbeitsbericht PDFs from job files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a job file to `Raport_DG_<object number>.pdf`.
    #[command(name = "render")]
    Render {
        /// Path of the TOML job file.
        job: PathBuf,

        /// Directory the PDF is written to.
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Directory holding the Liberation Sans font files.
        #[arg(long)]
        fonts_dir: Option<PathBuf>,
    },

    /// Print a blank job file to fill in.
    #[command(name = "template", aliases = ["init"])]
    Template {
        /// Write the template to this file instead of standard output.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the materials of the form in order.
    #[command(name = "catalog", aliases = ["materials"])]
    Catalog,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            job,
            output_dir,
            fonts_dir,
        } => run_render(&job, &output_dir, fonts_dir).map(|(path, size)| {
            println!("Generated {} ({}, {} bytes)", path.display(), PDF_MIME_TYPE, size);
        }),
        Commands::Template { output } => run_template(output.as_deref()),
        Commands::Catalog => {
            print_catalog();
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run_render(
    job_path: &Path,
    output_dir: &Path,
    fonts_dir: Option<PathBuf>,
) -> Result<(PathBuf, usize)> {
    let job = job::load(job_path)?;
    let input = job::assemble(job, Local::now().date_naive())
        .with_context(|| format!("Invalid job file {}", job_path.display()))?;

    let mut renderer = ReportRenderer::new();
    if let Some(fonts_dir) = fonts_dir {
        renderer = renderer.with_fonts_dir(fonts_dir);
    }
    let report = renderer
        .render(&input)
        .with_context(|| format!("Failed to render report for {}", job_path.display()))?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let output_path = output_dir.join(&report.file_name);
    fs::write(&output_path, &report.bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    info!("wrote {}", output_path.display());

    Ok((output_path, report.bytes.len()))
}

fn run_template(output: Option<&Path>) -> Result<()> {
    let text = template::sample_job();
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote job template to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn print_catalog() {
    for (index, entry) in MATERIAL_CATALOG.iter().enumerate() {
        println!("{:>2}. {:<24} {}", index + 1, entry.name, entry.unit);
    }
}
