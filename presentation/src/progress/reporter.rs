//! Progress reporting for evaluation runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use triage_application::ports::progress::EvaluationProgress;

/// Reports progress with a single bar over the dataset
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    correct: AtomicUsize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            correct: AtomicUsize::new(0),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationProgress for ProgressReporter {
    fn on_evaluation_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Classifying");
        pb.set_message("Starting...");
        self.correct.store(0, Ordering::Relaxed);

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_item_complete(&self, id: &str, correct: bool) {
        let hits = if correct {
            self.correct.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.correct.load(Ordering::Relaxed)
        };
        self.with_bar(|pb| {
            let mark = if correct { "v".green() } else { "x".yellow() };
            pb.set_message(format!("{mark} {id} ({hits} correct)"));
            pb.inc(1);
        });
    }

    fn on_item_failed(&self, id: &str, error: &str) {
        self.with_bar(|pb| {
            pb.println(format!("  {} {}: {}", "!".red(), id, error));
            pb.inc(1);
        });
    }

    fn on_evaluation_complete(&self, succeeded: usize, failed: usize) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            let summary = if failed == 0 {
                format!("{} {} classified", "done:".green(), succeeded)
            } else {
                format!(
                    "{} {} classified, {} failed",
                    "done:".yellow(),
                    succeeded,
                    failed
                )
            };
            pb.finish_with_message(summary);
        }
    }
}

/// Simple text-based progress (no fancy UI)
///
/// One line per item on stderr, in the style of a plain log.
pub struct SimpleProgress {
    total: AtomicUsize,
    done: AtomicUsize,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self {
            total: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
        }
    }

    fn next_position(&self) -> (usize, usize) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        (done, self.total.load(Ordering::Relaxed))
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationProgress for SimpleProgress {
    fn on_evaluation_start(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        eprintln!("{} Classifying {} records", "->".cyan(), total);
    }

    fn on_item_complete(&self, id: &str, correct: bool) {
        let (done, total) = self.next_position();
        let mark = if correct { "v".green() } else { "x".yellow() };
        eprintln!("  [{done}/{total}] {mark} {id}");
    }

    fn on_item_failed(&self, id: &str, error: &str) {
        let (done, total) = self.next_position();
        eprintln!("  [{done}/{total}] {} {id} (failed: {error})", "!".red());
    }

    fn on_evaluation_complete(&self, succeeded: usize, failed: usize) {
        eprintln!("{} {} classified, {} failed", "->".cyan(), succeeded, failed);
    }
}
