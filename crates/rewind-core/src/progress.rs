use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Lookup outcome counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentStats {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
    pub error_counts: BTreeMap<String, usize>, // failures by error category
}

impl EnrichmentStats {
    pub fn unresolved(&self) -> usize {
        self.not_found + self.failed
    }
}

/// Progress tracker for the lookup stage.
/// Logs periodic progress and a final summary instead of one line per title.
pub struct ProgressTracker {
    stats: EnrichmentStats,
    start_time: std::time::Instant,
    progress_interval: usize, // Log every N items
    last_progress_log: usize,
}

impl ProgressTracker {
    /// # Arguments
    /// * `total` - Total number of events to look up
    /// * `progress_interval` - Log progress every N events
    pub fn new(total: usize, progress_interval: usize) -> Self {
        if total > 10 || progress_interval < total {
            info!("Starting metadata lookups: {} titles to resolve", total);
        }
        Self {
            stats: EnrichmentStats {
                total,
                ..EnrichmentStats::default()
            },
            start_time: std::time::Instant::now(),
            progress_interval: progress_interval.max(1),
            last_progress_log: 0,
        }
    }

    pub fn record_found(&mut self) {
        self.stats.found += 1;
    }

    pub fn record_not_found(&mut self) {
        self.stats.not_found += 1;
    }

    /// Record a failed lookup, grouped by error category in the summary
    pub fn record_failed_with_error(&mut self, error_category: &str) {
        self.stats.failed += 1;
        *self.stats.error_counts.entry(error_category.to_string()).or_insert(0) += 1;
    }

    pub fn processed(&self) -> usize {
        self.stats.found + self.stats.not_found + self.stats.failed
    }

    /// Log progress if the interval has been reached
    ///
    /// # Arguments
    /// * `current` - Number of events processed so far (1-based)
    pub fn log_progress(&mut self, current: usize) {
        if current - self.last_progress_log >= self.progress_interval || current == self.stats.total {
            let elapsed = self.start_time.elapsed();
            // Too fast to be worth a line
            if elapsed.as_secs_f64() < 0.5 && current < self.stats.total {
                return;
            }
            let rate = if elapsed.as_secs_f64() > 0.0 {
                current as f64 / elapsed.as_secs_f64()
            } else {
                0.0
            };

            info!(
                "Progress: {}/{} ({:.1} titles/sec) | Found: {} | Not found: {} | Failed: {}",
                current, self.stats.total, rate, self.stats.found, self.stats.not_found, self.stats.failed
            );
            self.last_progress_log = current;
        }
    }

    /// Log the final summary and hand back the counts
    pub fn finish(self) -> EnrichmentStats {
        let elapsed = self.start_time.elapsed();
        let stats = self.stats;

        if stats.failed > 0 {
            warn!(
                "Metadata lookups completed: {} total in {:.1}s | Found: {} | Not found: {} | Failed: {}",
                stats.total, elapsed.as_secs_f64(), stats.found, stats.not_found, stats.failed
            );

            let mut error_entries: Vec<_> = stats.error_counts.iter().collect();
            error_entries.sort_by(|a, b| b.1.cmp(a.1));
            let error_summary: Vec<String> = error_entries
                .iter()
                .map(|(category, count)| format!("{}: {}", category, count))
                .collect();
            info!("Error breakdown: {}", error_summary.join(", "));
        } else {
            info!(
                "Metadata lookups completed: {} total in {:.1}s | Found: {} | Not found: {}",
                stats.total, elapsed.as_secs_f64(), stats.found, stats.not_found
            );
        }

        stats
    }
}
