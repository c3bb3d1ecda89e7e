//! CLI command implementations.

use crate::config::load_config;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use revgraph_core::{load_file_list, read_file_list, review_flags, review_order, FileRecord};
use revgraph_graph::{GraphAssembler, GraphNode, LayoutedGraph};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Reads a file list from `input`, or stdin when it is `-`.
fn read_files(input: &Path) -> Result<Vec<FileRecord>> {
    let files = if input.as_os_str() == "-" {
        read_file_list(std::io::stdin().lock())?
    } else {
        load_file_list(input)?
    };
    debug!("Read {} file records", files.len());
    Ok(files)
}

fn assembler(config: Option<&Path>) -> Result<GraphAssembler> {
    Ok(GraphAssembler::new(load_config(config)?))
}

/// Show the review graph.
pub fn analyze(input: &Path, config: Option<&Path>, json: bool, layout: bool) -> Result<()> {
    let files = read_files(input)?;
    let assembler = assembler(config)?;

    if json {
        let output = if layout {
            serde_json::to_string_pretty(&assembler.assemble_with_layout(&files))?
        } else {
            serde_json::to_string_pretty(&assembler.assemble(&files))?
        };
        println!("{}", output);
        return Ok(());
    }

    let graph = assembler.assemble(&files);
    if graph.is_empty() {
        println!("No files to review");
        return Ok(());
    }

    let branches = graph.branches();
    println!("{}", "Review Graph".cyan().bold());
    println!(
        "  {} files, {} edges, {} branches",
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan(),
        branches.len().to_string().cyan()
    );

    for (branch_id, members) in &branches {
        println!();
        let header = format!("{} ({} files)", branch_id, members.len());
        println!("{}", paint(&header, &members[0].branch_color).bold());
        for node in members {
            println!("{}", node_line(node));
        }
    }

    let flags = review_flags(&files);
    if !flags.is_empty() {
        println!();
        println!("{}", "Review flags".yellow().bold());
        for flag in flags {
            println!("  {} {}", format!("{}:", flag.flag).yellow(), flag.description);
        }
    }

    Ok(())
}

/// Write the laid-out graph to `output`.
pub fn export(input: &Path, output: &Path, config: Option<&Path>) -> Result<()> {
    let files = read_files(input)?;
    let assembler = assembler(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Analyzing {} files...", files.len()));

    let layouted = assembler.assemble_with_layout(&files);
    let written = write_graph(&layouted, output);

    spinner.finish_and_clear();
    written?;

    println!(
        "{} Exported {} nodes and {} edges to {}",
        "✓".green(),
        layouted.graph.node_count().to_string().cyan(),
        layouted.graph.edge_count().to_string().cyan(),
        output.display()
    );

    Ok(())
}

fn write_graph(layouted: &LayoutedGraph, output: &Path) -> Result<()> {
    fs::write(output, serde_json::to_string_pretty(layouted)?)?;
    Ok(())
}

/// Print the review order.
///
/// With `reasons`, files are ranked by kind instead of by the graph and
/// each line carries the reason for its place.
pub fn order(input: &Path, config: Option<&Path>, reasons: bool) -> Result<()> {
    let files = read_files(input)?;

    if reasons {
        for step in review_order(&files) {
            println!("{}  {}", step.filename, step.reason.dimmed());
        }
        return Ok(());
    }

    let graph = assembler(config)?.assemble(&files);

    for path in graph.review_order() {
        println!("{}", path);
    }
    Ok(())
}

/// One tree line: indentation by level, then statistics.
fn node_line(node: &GraphNode) -> String {
    let marker = if node.level == 0 { "●" } else { "└" };
    let mut line = format!(
        "{}{} {}  {} {}",
        "  ".repeat(node.level + 1),
        paint(marker, &node.branch_color),
        node.path,
        format!("+{}", node.additions).green(),
        format!("-{}", node.deletions).red()
    );

    if node.children_count > 0 {
        let noun = if node.children_count == 1 { "file" } else { "files" };
        line.push_str(&format!(
            "  {}",
            format!("(unlocks {} {})", node.children_count, noun).dimmed()
        ));
    }
    line
}

fn paint(text: &str, hex: &str) -> colored::ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// Parses `#rrggbb`.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
