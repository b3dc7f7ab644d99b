//! Progress reporting for the importer
//!
//! Prints one status line per [`ImportEvent`] above an indicatif spinner that
//! names the phase currently running.

use crate::importer::{ImportEvent, ImportSummary};
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

/// Status line printer with a phase spinner
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Print the line for `event` to stdout and move the spinner to the next phase
    pub fn event(&self, event: &ImportEvent) {
        self.write_event(&mut io::stdout().lock(), event);
    }

    /// Write the line for `event` to `out` with the spinner cleared
    pub fn write_event<W: Write>(&self, out: &mut W, event: &ImportEvent) {
        let line = event_line(event);
        self.bar.suspend(|| {
            if let Err(e) = writeln!(out, "{}", line) {
                debug!("Failed to write status line: {}", e);
            }
        });

        let next = match event {
            ImportEvent::Reading { .. } => "Loading dataset...",
            ImportEvent::Loaded { .. } => "Connecting to Redis...",
            ImportEvent::Connected { .. } => "Building test cases...",
            ImportEvent::Transformed { .. } => "Writing test set...",
            ImportEvent::Persisted(_) => "Done",
        };
        self.bar.set_message(next);
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable line for one event
pub fn event_line(event: &ImportEvent) -> String {
    match event {
        ImportEvent::Reading { path } => {
            format!("{} {}...", style("Reading").bold(), path.display())
        }
        ImportEvent::Loaded {
            rows,
            columns,
            file_size,
        } => format!(
            "{} {} rows ({})\n{} {}",
            style("Loaded").bold(),
            format_number(*rows as u64),
            format_size(*file_size, BINARY),
            style("Columns:").bold(),
            columns.join(", ")
        ),
        ImportEvent::Connected { url } => {
            format!("{} {}", style("Connected to").bold(), url)
        }
        ImportEvent::Transformed {
            tests,
            skipped,
            payload_bytes,
        } => format!(
            "{} {} test cases, {} rows skipped ({})",
            style("Built").bold(),
            format_number(*tests as u64),
            format_number(*skipped as u64),
            format_size(*payload_bytes as u64, BINARY)
        ),
        ImportEvent::Persisted(outcome) => format!(
            "{} {} and {}",
            style("Wrote").bold(),
            outcome.index_key,
            outcome.payload_key
        ),
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a header at the start of the import
pub fn print_header(source: &str, target: &str, test_set_id: &str) {
    println!();
    println!(
        "{} {}",
        style("testset-importer").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Source:").bold(), source);
    println!("  {} {}", style("Target:").bold(), target);
    println!("  {} {}", style("Test set:").bold(), test_set_id);
    println!();
}

/// Print a summary of the import
pub fn print_summary(summary: &ImportSummary) {
    println!();
    match &summary.persisted {
        Some(_) => println!(
            "{} Successfully imported {} tests into set '{}'.",
            style("✓").green().bold(),
            format_number(summary.imported as u64),
            summary.test_set_id
        ),
        None => println!(
            "{} Dry run: {} tests would be imported into set '{}'.",
            style("✓").yellow().bold(),
            format_number(summary.imported as u64),
            summary.test_set_id
        ),
    }
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Rows:").bold(),
        format_number(summary.total_rows as u64)
    );
    println!(
        "  {} {}",
        style("Skipped:").bold(),
        format_number(summary.skipped as u64)
    );
    println!(
        "  {} {}",
        style("Payload:").bold(),
        format_size(summary.payload_bytes as u64, BINARY)
    );
    if let Some(outcome) = &summary.persisted {
        let index_note = if outcome.newly_indexed {
            "added"
        } else {
            "already present"
        };
        println!(
            "  {} {} ({})",
            style("Index:").bold(),
            outcome.index_key,
            index_note
        );
        println!("  {} {}", style("Key:").bold(), outcome.payload_key);
    }
    println!(
        "  {} {:.2}s",
        style("Duration:").bold(),
        summary.duration.as_secs_f64()
    );
    println!();
}
