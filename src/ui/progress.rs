//! In-place progress bar for the run command.
//!
//! Rendered to stderr so it never contaminates artifact or summary output
//! on stdout; a carriage return redraws the same line.

use std::io::{self, Write};

/// Fixed-width textual progress bar.
#[derive(Debug)]
pub struct ProgressBar {
    total: usize,
    current: usize,
    width: usize,
}

impl ProgressBar {
    pub fn new(total: usize) -> Self {
        ProgressBar {
            total,
            current: 0,
            width: 24,
        }
    }

    /// Advance by one completed check and redraw.
    pub fn tick(&mut self, label: &str) {
        self.current = (self.current + 1).min(self.total.max(1));
        let filled = self.width * self.current / self.total.max(1);
        let bar: String = (0..self.width)
            .map(|i| if i < filled { '#' } else { '-' })
            .collect();
        eprint!("\r[{}] {}/{} {:<30}", bar, self.current, self.total, truncate(label, 30));
        let _ = io::stderr().flush();
    }

    /// Clear the bar line before final output.
    pub fn finish(&self) {
        eprint!("\r{:width$}\r", "", width = self.width + 40);
        let _ = io::stderr().flush();
    }

    pub fn render_line(&self) -> String {
        let filled = self.width * self.current / self.total.max(1);
        let bar: String = (0..self.width)
            .map(|i| if i < filled { '#' } else { '-' })
            .collect();
        format!("[{}] {}/{}", bar, self.current, self.total)
    }
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let cut: String = label.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
