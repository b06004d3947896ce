//! Text User Interface (TUI) utilities.
//!
//! Turns [`SizeReport`]s into the console table. Everything here builds a
//! `String`; the binary decides where it goes.

use std::fmt::Write;
use std::time::Duration;

use terminal_size::{terminal_size, Width};

use crate::registry::KernelRegistry;
use crate::utils::bench::SizeReport;

/// Get the current terminal width, constrained to a reasonable range
pub fn term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Duration in milliseconds
fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// `n = 2^k (n)` for powers of two, `n = n` otherwise
pub fn size_label(n: usize) -> String {
    if n.is_power_of_two() {
        format!("n = 2^{} ({})", n.trailing_zeros(), n)
    } else {
        format!("n = {}", n)
    }
}

/// Format one size: per-trial table followed by the summary block.
pub fn format_size_report(report: &SizeReport, width: usize) -> String {
    let mut out = String::new();
    let ref_col = format!("{} (ms)", report.reference_name);
    let cand_col = format!("{} (ms)", report.candidate_name);
    let ref_w = ref_col.len().max(12);
    let cand_w = cand_col.len().max(12);
    let table_width = (4 + 3 + ref_w + 3 + cand_w + 3 + 7).min(width);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "=== {} ===", size_label(report.size));
    let _ = writeln!(
        out,
        "{:>4} | {:>ref_w$} | {:>cand_w$} | {:>7}",
        "Run", ref_col, cand_col, "Correct"
    );
    let _ = writeln!(out, "{}", "─".repeat(table_width));

    for trial in &report.trials {
        let _ = writeln!(
            out,
            "{:>4} | {:>ref_w$.4} | {:>cand_w$.4} | {:>7}",
            trial.index,
            ms(trial.reference_time),
            ms(trial.candidate_time),
            if trial.agreed { "YES" } else { "NO" }
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Summary for {}:", size_label(report.size));
    let _ = writeln!(out, "  {} avg: {:.4} ms", report.reference_name, ms(report.mean_reference));
    let _ = writeln!(out, "  {} avg: {:.4} ms", report.candidate_name, ms(report.mean_candidate));
    let _ = writeln!(out, "  Correctness: {}/{}", report.agreement_count, report.trial_count());
    let _ = writeln!(out, "  Speedup: {}", report.speedup);
    out
}

/// Format a whole sweep, one block per size in order.
pub fn format_sweep(reports: &[SizeReport], width: usize) -> String {
    reports
        .iter()
        .map(|r| format_size_report(r, width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The application header
pub fn format_header(width: usize) -> String {
    let width = width.min(80);
    let title = " Dot Product Benchmark ";
    let padding = width.saturating_sub(title.len()) / 2;
    let right_padding = width.saturating_sub(padding + title.len());
    let border = "═".repeat(width);

    format!(
        "╔{}╗\n║{}{}{}║\n╚{}╝\n",
        border,
        " ".repeat(padding),
        title,
        " ".repeat(right_padding),
        border
    )
}

/// One line per registered kernel, with its availability on this machine
pub fn format_kernel_list(registry: &KernelRegistry) -> String {
    let mut out = String::from("Available kernels:\n\n");
    for kernel in registry.all() {
        let status = match kernel.check_capability() {
            Ok(()) => "ok".to_string(),
            Err(e) => format!("unavailable: {}", e),
        };
        let display_name = match (kernel.name().starts_with("c-"), crate::utils::C_COMPILER_NAME) {
            (true, Some(compiler)) => format!("{} ({})", kernel.name(), compiler),
            _ => kernel.name().to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<20} {:<48} [{}]",
            display_name,
            kernel.description(),
            status
        );
    }
    out
}
