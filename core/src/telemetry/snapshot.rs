// ## src/telemetry/snapshot.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::DecodeCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

/// Telemetry for one decode, or the merged telemetry of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: DecodeCounters,
    pub values_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &DecodeCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let values_per_sec = if elapsed.as_secs_f64() > 0.0 {
            counters.values_total() as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            values_per_sec,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    /// Fold another block's snapshot into this one.
    ///
    /// `elapsed` becomes the summed per-block decode time, not batch wall time,
    /// so `sanity_check` still holds for snapshots merged across workers.
    pub fn merge(&mut self, other: &TelemetrySnapshot) {
        self.counters.merge(&other.counters);
        self.stage_times.merge(&other.stage_times);
        self.elapsed += other.elapsed;
        self.values_per_sec = if self.elapsed.as_secs_f64() > 0.0 {
            self.counters.values_total() as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        };
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal invariants:
    /// - one read per value, four bytes per read
    /// - stage time never exceeds wall time
    pub fn sanity_check(&self) -> bool {
        let c = &self.counters;
        c.reads == c.values_total()
            && c.bytes_read == c.reads * 4
            && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
