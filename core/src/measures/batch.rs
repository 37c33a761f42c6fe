// # 📂 src/measures/batch.rs

// ## Batch decode: many blocks of one buffer, decoded in parallel

use std::thread;

use crossbeam::channel::{bounded, unbounded};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::DecodeOptions;
use crate::cursor::SliceCursor;
use crate::headers::MovespaceHeader;
use crate::measures::decode::{decode_measures, decode_measures_with};
use crate::measures::types::DecodedMeasures;
use crate::telemetry::TelemetrySnapshot;
use crate::types::MovespaceError;

/// One block to decode: where it starts and how to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockJob {
    pub start: u64,
    pub header: MovespaceHeader,
}

/// Worker pool sizing.
#[derive(Debug, Clone)]
pub struct ParallelismProfile {
    pub worker_count: usize,
    pub inflight_jobs: usize,
}

impl ParallelismProfile {
    pub fn single_threaded() -> Self {
        Self {
            worker_count: 1,
            inflight_jobs: 1,
        }
    }

    /// One worker per core minus one, capped at `hard_cap`.
    pub fn dynamic(hard_cap: usize) -> Self {
        let cores = num_cpus::get();
        let worker_count = cores.saturating_sub(1).clamp(1, hard_cap.max(1));
        debug!(cores, worker_count, "batch decode profile");
        Self {
            worker_count,
            inflight_jobs: worker_count * 2,
        }
    }
}

fn decode_job(buf: &[u8], job: &BlockJob) -> Result<DecodedMeasures, MovespaceError> {
    // Each job owns its cursor; nothing is shared but the read-only buffer.
    let mut cursor = SliceCursor::at(buf, job.start);
    decode_measures(&mut cursor, &job.header)
}

/// Decode every job in `jobs` against `buf`.
///
/// Results come back in job order. A failing job does not stop the others.
pub fn decode_blocks(
    buf: &[u8],
    jobs: &[BlockJob],
    profile: &ParallelismProfile,
) -> Vec<Result<DecodedMeasures, MovespaceError>> {
    run_jobs(buf, jobs, profile, decode_job)
}

/// Decode every job under `opts`, returning per-job results and, when
/// telemetry is on, one snapshot merged over the blocks that decoded.
///
/// Invalid options fail the whole call before any job runs.
pub fn decode_blocks_with(
    buf: &[u8],
    jobs: &[BlockJob],
    profile: &ParallelismProfile,
    opts: &DecodeOptions,
) -> Result<(Vec<Result<DecodedMeasures, MovespaceError>>, Option<TelemetrySnapshot>), MovespaceError> {
    opts.validate()?;

    let outcomes = run_jobs(buf, jobs, profile, |buf, job| {
        let mut cursor = SliceCursor::at(buf, job.start);
        decode_measures_with(&mut cursor, &job.header, opts)
    });

    let mut merged: Option<TelemetrySnapshot> = None;
    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok((decoded, snapshot)) => {
                if let Some(snapshot) = snapshot {
                    match merged.as_mut() {
                        Some(total) => total.merge(&snapshot),
                        None => merged = Some(snapshot),
                    }
                }
                results.push(Ok(decoded));
            }
            Err(e) => results.push(Err(e)),
        }
    }

    if let Some(total) = merged.as_ref() {
        debug!(
            blocks = total.counters.blocks,
            values = total.counters.values_total(),
            "batch telemetry merged"
        );
    }

    Ok((results, merged))
}

fn run_jobs<T, F>(
    buf: &[u8],
    jobs: &[BlockJob],
    profile: &ParallelismProfile,
    decode: F,
) -> Vec<Result<T, MovespaceError>>
where
    T: Send,
    F: Fn(&[u8], &BlockJob) -> Result<T, MovespaceError> + Sync,
{
    if jobs.is_empty() {
        return Vec::new();
    }

    let workers = profile.worker_count.clamp(1, jobs.len());
    if workers == 1 {
        return jobs.iter().map(|job| decode(buf, job)).collect();
    }

    let (job_tx, job_rx) = bounded::<(usize, &BlockJob)>(profile.inflight_jobs.max(1));
    let (out_tx, out_rx) = unbounded::<(usize, Result<T, MovespaceError>)>();
    let mut results: Vec<Option<Result<T, MovespaceError>>> = (0..jobs.len()).map(|_| None).collect();
    let decode = &decode;

    thread::scope(|scope| {
        // ---- Workers ----
        for i in 0..workers {
            let rx = job_rx.clone();
            let tx = out_tx.clone();
            scope.spawn(move || {
                trace!(worker = i, "batch worker starting");
                for (idx, job) in rx.iter() {
                    if tx.send((idx, decode(buf, job))).is_err() {
                        break;
                    }
                }
                trace!(worker = i, "batch worker finished");
            });
        }
        drop(job_rx);
        drop(out_tx);

        // ---- Feeder ----
        for job in jobs.iter().enumerate() {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx); // closes the queue so workers exit

        // ---- Ordered collection ----
        for (idx, res) in out_rx.iter() {
            results[idx] = Some(res);
        }
    });

    debug!(jobs = jobs.len(), workers, "batch decode finished");

    results
        .into_iter()
        .map(|r| r.unwrap_or(Err(MovespaceError::Pipeline("batch worker dropped a job"))))
        .collect()
}
