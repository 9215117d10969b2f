// Colored terminal output for analysis results.
//
// This module handles all terminal-specific formatting: colors, tables,
// progress spinners. The main.rs commands delegate here.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::global_proximity::GlobalProximity;
use crate::analysis::outliers::Outlier;
use crate::community::Community;

/// Start a spinner for a long-running stage. Call `finish_and_clear` when done.
pub fn stage_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Display the corpus-wide language proximity table, closest pairs first.
pub fn display_global(global: &GlobalProximity) {
    let graph = &global.language;
    if graph.edges.is_empty() {
        println!("No language pairs with data.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Global Language Proximity ({} languages, {} pairs) ===",
            graph.nodes.len(),
            graph.edges.len()
        )
        .bold()
    );
    println!();

    let mut edges: Vec<_> = graph.edges.iter().collect();
    edges.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let bar_width: usize = 20;
    for edge in edges {
        let filled = (edge.weight * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.min(bar_width)),
            " ".repeat(bar_width.saturating_sub(filled))
        );
        println!(
            "  {:<12} {} {}  {}",
            format!("{}-{}", edge.source, edge.target),
            colorize_weight(edge.weight, bar),
            format!("{:.4}", edge.weight).bold(),
            format!("(n={})", edge.samples.unwrap_or(0)).dimmed()
        );
    }
    println!();
}

/// Display topic communities with their three closest language pairs.
pub fn display_communities(communities: &[Community]) {
    println!(
        "\n{}",
        format!("=== Topic Communities ({}) ===", communities.len()).bold()
    );
    println!();

    for community in communities {
        println!(
            "  {} {}",
            format!("#{}", community.id).bold(),
            community.topics.join(", ")
        );
        let top: Vec<String> = community
            .ranked_pairs
            .iter()
            .take(3)
            .map(|(pair, weight)| format!("{pair} {weight:.2}"))
            .collect();
        if !top.is_empty() {
            println!("      Closest pairs: {}", top.join("  ").dimmed());
        }
    }
    println!();
}

/// Display the `top` most anomalous word pairs.
pub fn display_outliers(outliers: &[Outlier], top: usize) {
    if outliers.is_empty() {
        println!("No outliers detected.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Outliers (top {} of {}) ===", top.min(outliers.len()), outliers.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<16} {:<8} {:<34} {:>6}  {:>6}",
        "Rank".dimmed(),
        "Topic".dimmed(),
        "Pair".dimmed(),
        "Words".dimmed(),
        "Dist".dimmed(),
        "Ratio".dimmed(),
    );
    println!("  {}", "-".repeat(82).dimmed());

    for (i, outlier) in outliers.iter().take(top).enumerate() {
        let words = format!(
            "{} / {}",
            super::truncate_chars(&outlier.word_pair.0, 14),
            super::truncate_chars(&outlier.word_pair.1, 14)
        );
        println!(
            "  {:>4}. {:<16} {:<8} {:<34} {:>6.4}  {}",
            i + 1,
            super::truncate_chars(&outlier.topic, 16),
            outlier.language_pair.to_string(),
            words,
            outlier.distance,
            colorize_ratio(outlier.ratio),
        );
    }
    println!();
}

fn colorize_weight(weight: f64, text: String) -> colored::ColoredString {
    if weight >= 0.5 {
        text.bright_green()
    } else if weight >= 0.25 {
        text.bright_yellow()
    } else {
        text.bright_blue()
    }
}

fn colorize_ratio(ratio: f64) -> colored::ColoredString {
    let text = format!("{ratio:>5.1}x");
    if ratio >= 5.0 {
        text.red().bold()
    } else if ratio >= 3.5 {
        text.bright_red()
    } else {
        text.yellow()
    }
}
