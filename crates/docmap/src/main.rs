//! Command-line interface for the `docmap` documentation mapper.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    slice,
};

use clap::Parser;
use docmap_document::{Document, parse_file};
use docmap_pdf::parse_pdf;
use docmap_render::{
    Highlighter, Palette, document_map, expand_section, filtered_tree, multi_tree, refs_tree,
};

use crate::{
    config::Config,
    output::JsonOutput,
    scan::{FileKind, scan_directory},
};

mod config;
mod output;
mod scan;

#[derive(Parser)]
#[command(name = "docmap")]
#[command(version)]
#[command(about = "Instant documentation structure maps for humans and LLMs")]
/// Top-level CLI options.
struct Cli {
    /// Markdown file, PDF file, or directory to map
    target: PathBuf,

    /// Show the tree rooted at the first section matching NAME
    #[arg(short, long, value_name = "NAME")]
    section: Option<String>,

    /// Print the full content of the first section matching NAME
    #[arg(short, long, value_name = "NAME")]
    expand: Option<String>,

    /// Show cross-references between markdown documents
    #[arg(short, long)]
    refs: bool,

    /// Emit the map as JSON
    #[arg(short, long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.target.exists() {
        eprintln!("error: {} does not exist", cli.target.display());
        return ExitCode::FAILURE;
    }

    let config_root = if cli.target.is_dir() {
        cli.target.clone()
    } else {
        cli.target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    };
    let config = match Config::load(&config_root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let palette = if config.render.color {
        Palette::ansi()
    } else {
        Palette::plain()
    };

    if cli.target.is_dir() {
        run_directory(&cli, &config, &palette)
    } else {
        run_file(&cli, &config, &palette)
    }
}

/// Maps every markdown and PDF file under a directory.
fn run_directory(cli: &Cli, config: &Config, palette: &Palette) -> ExitCode {
    let excludes = match config.exclude_set() {
        Ok(set) => set,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let files = scan_directory(&cli.target, &excludes);
    let mut docs: Vec<Document> = Vec::new();
    for file in &files {
        let parsed = match file.kind {
            FileKind::Markdown => parse_file(&file.path).map_err(|e| e.to_string()),
            FileKind::Pdf => parse_pdf(&file.path).map_err(|e| e.to_string()),
        };
        match parsed {
            Ok(mut doc) => {
                doc.filename = file.rel.clone();
                docs.push(doc);
            }
            Err(message) => {
                // Unreadable files are skipped in directory mode.
                eprintln!("warning: skipping {}: {message}", file.rel);
            }
        }
    }

    if docs.is_empty() {
        eprintln!(
            "No markdown or PDF files found in {}",
            cli.target.display()
        );
        return ExitCode::FAILURE;
    }

    if cli.json {
        return print_json(&cli.target.display().to_string(), &docs);
    }
    if cli.refs {
        print!("{}", refs_tree(&docs, palette));
        return ExitCode::SUCCESS;
    }
    if let Some(name) = cli.expand.as_deref().or(cli.section.as_deref()) {
        let Some(doc) = docs.iter().find(|d| d.get_section(name).is_some()) else {
            eprintln!("Section '{name}' not found");
            return ExitCode::FAILURE;
        };
        let rendered = if cli.expand.is_some() {
            expand_section(doc, name, palette, highlighter(config).as_ref())
        } else {
            filtered_tree(doc, name, palette)
        };
        print!("{rendered}");
        return ExitCode::SUCCESS;
    }

    let dir_name = cli
        .target
        .file_name()
        .map_or_else(|| cli.target.display().to_string(), |n| n.to_string_lossy().into_owned());
    print!("{}", multi_tree(&docs, &dir_name, palette));
    ExitCode::SUCCESS
}

/// Maps a single markdown or PDF file.
fn run_file(cli: &Cli, config: &Config, palette: &Palette) -> ExitCode {
    let is_pdf = cli
        .target
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let parsed = if is_pdf {
        parse_pdf(&cli.target).map_err(|e| e.to_string())
    } else {
        parse_file(&cli.target).map_err(|e| e.to_string())
    };
    let mut doc = match parsed {
        Ok(doc) => doc,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };
    doc.filename = cli.target.display().to_string();

    if cli.json {
        return print_json(&doc.filename, slice::from_ref(&doc));
    }
    if cli.refs {
        print!("{}", refs_tree(slice::from_ref(&doc), palette));
        return ExitCode::SUCCESS;
    }
    if let Some(name) = &cli.expand {
        if doc.get_section(name).is_none() {
            eprintln!("Section '{name}' not found");
            return ExitCode::FAILURE;
        }
        print!(
            "{}",
            expand_section(&doc, name, palette, highlighter(config).as_ref())
        );
        return ExitCode::SUCCESS;
    }
    if let Some(name) = &cli.section {
        if doc.get_section(name).is_none() {
            eprintln!("Section '{name}' not found");
            return ExitCode::FAILURE;
        }
        print!("{}", filtered_tree(&doc, name, palette));
        return ExitCode::SUCCESS;
    }

    print!("{}", document_map(&doc, palette));
    ExitCode::SUCCESS
}

/// Builds the syntax highlighter when color output is enabled.
fn highlighter(config: &Config) -> Option<Highlighter> {
    config.render.color.then(Highlighter::new)
}

/// Serializes and prints documents as JSON.
fn print_json(root: &str, docs: &[Document]) -> ExitCode {
    match JsonOutput::new(root, docs).to_pretty() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}
