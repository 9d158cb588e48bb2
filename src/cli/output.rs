//! Output formatting for CLI

use crate::pipeline::TrainingResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in `[0, 1]` as a percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print an outcome tally with the given labels for White and Black wins
pub fn print_result(result: &TrainingResult, white_label: &str, black_label: &str) {
    print_kv("Episodes", &format_number(result.total_episodes));
    print_kv(
        white_label,
        &format!("{} ({})", result.wins, format_rate(result.win_rate)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", result.draws, format_rate(result.draw_rate)),
    );
    print_kv(
        black_label,
        &format!("{} ({})", result.losses, format_rate(result.loss_rate)),
    );
    print_kv("Mean plies", &format!("{:.1}", result.mean_plies));
}
