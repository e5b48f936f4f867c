use std::collections::BTreeMap;
use std::time::Instant;

/// Cross-cutting logger for scanner pipeline events.
///
/// Keeps stage timings and per-frame metrics out of the orchestration code
/// so hosts can choose between silence and a CLI-style report.
pub trait PipelineLogger: Send {
    /// Report that frame `current` was handled. `total` is known for
    /// file-backed runs and `None` for a live camera.
    fn progress(&mut self, current: usize, total: Option<usize>);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a per-frame metric (e.g. region count).
    fn metric(&mut self, name: &str, value: f64);

    /// Count one frame outcome by label.
    fn outcome(&mut self, label: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything. Used when the host has its own reporting and in tests.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: Option<usize>) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn outcome(&mut self, _label: &str) {}
}

/// Running count, sum and maximum of one recorded series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStat {
    pub count: usize,
    pub total: f64,
    pub max: f64,
}

impl RunningStat {
    fn record(&mut self, value: f64) {
        self.max = if self.count == 0 {
            value
        } else {
            self.max.max(value)
        };
        self.count += 1;
        self.total += value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// CLI logger: accumulates stage timings, metrics and outcome counts and
/// prints a summary at the end of the run.
///
/// Only running aggregates are kept, so memory stays flat on a live camera.
/// Progress lines are throttled to every `throttle_frames` frames.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: BTreeMap<String, RunningStat>,
    metrics: BTreeMap<String, RunningStat>,
    outcomes: BTreeMap<String, usize>,
    start_time: Instant,
    frames_seen: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            outcomes: BTreeMap::new(),
            start_time: Instant::now(),
            frames_seen: 0,
        }
    }

    /// Formatted summary, or `None` when nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() && self.outcomes.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames_seen;
        let mut lines = vec![format!(
            "Scan summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        for (stage, stat) in &self.timings {
            lines.push(format!(
                "  {stage:10}: avg {:6.2}ms  total {:7.1}ms",
                stat.mean(),
                stat.total
            ));
        }

        for (name, stat) in &self.metrics {
            lines.push(format!(
                "  {name}: avg {:.1}  max {:.0}",
                stat.mean(),
                stat.max
            ));
        }

        for (label, count) in &self.outcomes {
            lines.push(format!("  {label}: {count}"));
        }

        Some(lines.join("\n"))
    }

    pub fn timing_stat(&self, stage: &str) -> Option<RunningStat> {
        self.timings.get(stage).copied()
    }

    pub fn metric_stat(&self, name: &str) -> Option<RunningStat> {
        self.metrics.get(name).copied()
    }

    pub fn outcome_count(&self, label: &str) -> usize {
        self.outcomes.get(label).copied().unwrap_or(0)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: Option<usize>) {
        self.frames_seen = self.frames_seen.max(current);
        let due = current % self.throttle_frames == 0 || Some(current) == total;
        if !due {
            return;
        }
        match total {
            Some(total) if total > 0 => {
                let pct = current as f64 / total as f64 * 100.0;
                log::info!("Scanning: {current}/{total} frames ({pct:.1}%)");
            }
            _ => log::info!("Scanning: {current} frames"),
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    fn outcome(&mut self, label: &str) {
        *self.outcomes.entry(label.to_string()).or_default() += 1;
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
