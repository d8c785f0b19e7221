// Colored terminal report for one search.
//
// Each section is a separate function so main.rs can render them in order.
// All formatting decisions (colors, widths, date formats) live here; the
// search pipeline hands over plain data.

use colored::Colorize;

use super::histogram::DateBin;
use super::truncate_chars;
use crate::arxiv::categories::LabelCount;
use crate::pipeline::search::SearchResult;

const BAR_WIDTH: usize = 30;

/// Render `value / max` as a fixed-width bar.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), " ".repeat(width - filled))
}

/// Heading with the search term and how many papers came back.
pub fn display_header(result: &SearchResult) {
    let shown = result.items.len();
    let summary = match result.total_results {
        Some(total) => format!("{shown} of {total} papers"),
        None => format!("{shown} papers"),
    };
    println!(
        "\n{}",
        format!("=== arXiv: \"{}\" ({summary}) ===", result.term).bold()
    );
}

/// Paper titles, newest first.
pub fn display_recent_articles(result: &SearchResult) {
    println!("\n{}", "Most recent articles".bold());
    if result.items.is_empty() {
        println!("  No papers matched this search.");
        return;
    }
    for item in result.recent_items() {
        println!(
            "  {} {}",
            item.published_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            truncate_chars(&item.title, 100)
        );
    }
}

/// The top terms by mean TF-IDF weight, as a list.
pub fn display_top_terms(result: &SearchResult) {
    println!("\n{}", "Most important terms".bold());
    if result.top_terms.is_empty() {
        println!("  No terms left after stop-word filtering.");
        return;
    }
    for term in &result.top_terms {
        println!("  - {}", term.term);
    }
}

/// Bar chart of the top terms' TF-IDF scores.
pub fn display_score_chart(result: &SearchResult) {
    if result.top_terms.is_empty() {
        return;
    }
    println!("\n{}", "TF-IDF term importance".bold());
    let max = result
        .top_terms
        .iter()
        .filter_map(|t| result.score_of(&t.term))
        .fold(0.0f64, f64::max);
    for term in &result.top_terms {
        let score = result.score_of(&term.term).unwrap_or(0.0);
        println!(
            "  {:<20} {} {:.3}",
            truncate_chars(&term.term, 20),
            bar(score, max, BAR_WIDTH).bright_green(),
            score
        );
    }
}

/// Bar chart of raw occurrence counts of the top terms.
pub fn display_term_counts(result: &SearchResult) {
    if result.term_counts.is_empty() {
        return;
    }
    println!("\n{}", "Term occurrences".bold());
    let max = result.term_counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
    for count in &result.term_counts {
        println!(
            "  {:<20} {} {}",
            truncate_chars(&count.term, 20),
            bar(count.count as f64, max, BAR_WIDTH).bright_yellow(),
            count.count
        );
    }
}

/// Histogram of publication dates.
pub fn display_histogram(bins: &[DateBin]) {
    if bins.is_empty() {
        return;
    }
    println!("\n{}", "Publications over time".bold());
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
    for b in bins {
        println!(
            "  {} .. {} {} {}",
            b.start.format("%Y-%m-%d"),
            b.end.format("%Y-%m-%d"),
            bar(b.count as f64, max, BAR_WIDTH).bright_blue(),
            b.count
        );
    }
}

/// Bar chart of category labels.
pub fn display_categories(counts: &[LabelCount]) {
    if counts.is_empty() {
        return;
    }
    println!("\n{}", "Most common categories".bold());
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
    for c in counts {
        println!(
            "  {:<50} {} {}",
            truncate_chars(c.label, 50),
            bar(c.count as f64, max, BAR_WIDTH).bright_magenta(),
            c.count
        );
    }
}
