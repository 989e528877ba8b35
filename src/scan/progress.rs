// file: src/scan/progress.rs
// description: progress tracking and statistics reporting for repository scans
// reference: uses indicatif for progress bars and tracks scan metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStats {
    pub repositories_scanned: usize,
    pub repositories_matched: usize,
    pub repositories_failed: usize,
    pub duration_secs: u64,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of scanned repositories that contained the sequence, in percent.
    pub fn match_rate(&self) -> f64 {
        if self.repositories_scanned == 0 {
            return 0.0;
        }
        (self.repositories_matched as f64 / self.repositories_scanned as f64) * 100.0
    }
}

pub struct ScanProgress {
    bar: ProgressBar,
    scanned: Arc<AtomicUsize>,
    matched: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ScanProgress {
    pub fn with_color(total_repositories: usize, colored: bool) -> Self {
        Self::from_bar(create_progress_bar(total_repositories as u64, colored))
    }

    /// Tracks counters without drawing anything.
    pub fn hidden() -> Self {
        Self::from_bar(ProgressBar::hidden())
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            scanned: Arc::new(AtomicUsize::new(0)),
            matched: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn start_repository(&self, full_name: &str) {
        self.bar.set_message(full_name.to_string());
    }

    pub fn inc_matched(&self) {
        self.matched.fetch_add(1, Ordering::SeqCst);
        self.inc_scanned();
    }

    pub fn inc_not_matched(&self) {
        self.inc_scanned();
    }

    pub fn inc_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.inc_scanned();
    }

    /// Prints above the bar so log lines and progress do not interleave.
    pub fn println(&self, line: impl AsRef<str>) {
        if self.bar.is_hidden() {
            eprintln!("{}", line.as_ref());
        } else {
            self.bar.println(line);
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            repositories_scanned: self.scanned.load(Ordering::SeqCst),
            repositories_matched: self.matched.load(Ordering::SeqCst),
            repositories_failed: self.failed.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn inc_scanned(&self) {
        self.scanned.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
    }
}

impl Drop for ScanProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
    };

    match ProgressStyle::default_bar().template(template) {
        Ok(style) => bar.set_style(style.progress_chars(if colored { "█▓▒░" } else { "=>-" })),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}
