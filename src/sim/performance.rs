//! Step-duration monitoring for the headless runner
//!
//! Keeps a rolling window of simulation step durations and summarizes them
//! against the tick budget.

use std::collections::VecDeque;
use std::time::Duration;

pub struct PerformanceMonitor {
    /// Rolling window of step durations
    step_durations: VecDeque<Duration>,
    /// Maximum samples to keep
    max_samples: usize,
    /// Target step duration (budget)
    target_step_duration: Duration,
}

impl PerformanceMonitor {
    pub fn new(tick_rate: u32) -> Self {
        let target_step_duration = Duration::from_secs_f64(1.0 / tick_rate as f64);
        Self {
            // ~2 seconds of samples at the target rate
            step_durations: VecDeque::with_capacity(2 * tick_rate as usize),
            max_samples: 2 * tick_rate as usize,
            target_step_duration,
        }
    }

    pub fn record(&mut self, duration: Duration) {
        if self.step_durations.len() == self.max_samples {
            self.step_durations.pop_front();
        }
        self.step_durations.push_back(duration);
    }

    pub fn average(&self) -> Duration {
        if self.step_durations.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.step_durations.iter().sum();
        total / self.step_durations.len() as u32
    }

    pub fn p95(&self) -> Duration {
        if self.step_durations.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted: Vec<Duration> = self.step_durations.iter().copied().collect();
        sorted.sort_unstable();
        let idx = (sorted.len() * 95 / 100).min(sorted.len() - 1);
        sorted[idx]
    }

    pub fn max(&self) -> Duration {
        self.step_durations.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Average step duration as a fraction of the tick budget
    pub fn budget_usage(&self) -> f64 {
        self.average().as_secs_f64() / self.target_step_duration.as_secs_f64()
    }
}
