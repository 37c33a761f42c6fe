// ## 📂 File: `src/measures/decode.rs`
//! src/measures/decode.rs
//!
//! Movespace measure decoding.
//!
//! Design notes:
//! - Every outer iteration re-seeks to the same payload region and runs three
//!   passes: primary, secondary (+3.0), energy (+6.8).
//! - Within a pass the cursor advances by 1 byte per 4-byte value. The
//!   overlapping reads are part of the format and must not be "fixed".
//! - The outer loop steps its counter by 9, independent of the pass sizes.
//! - A failed read aborts the decode; the partial output is dropped.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::config::DecodeOptions;
use crate::constants::{DATA_START_OFFSET, MEASURE_STRIDE, MEASURE_WIDTH, OUTER_LOOP_STEP};
use crate::cursor::ByteCursor;
use crate::headers::MovespaceHeader;
use crate::measures::layout;
use crate::measures::types::{DecodedMeasures, MeasureError, MeasureStream};
use crate::telemetry::{DecodeCounters, Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::MovespaceError;

/// Upper bound on the up-front output reservation. Hostile counts must fail
/// on a read, not on allocation.
const MAX_PREALLOC_VALUES: u64 = 1 << 16;

/// Decode the flat measure sequence of the block starting at `cursor.tell()`.
///
/// # Returns
/// - `Ok(Vec<f64>)` with `ceil((M+E)/9) * (2M+E)` values in decode order.
/// - `Err(MeasureError::OutOfRange)` if any read runs past the buffer.
///
/// # Notes
/// - The cursor's final position is unspecified; seek explicitly before reusing it.
pub fn parse_movespace_measures<C: ByteCursor>(
    cursor: &mut C,
    header: &MovespaceHeader,
) -> Result<Vec<f64>, MeasureError> {
    let mut counters = DecodeCounters::default();
    decode_passes(cursor, header, &mut counters, None)
}

/// Decode a block and keep the header alongside the values.
pub fn decode_measures<C: ByteCursor>(
    cursor: &mut C,
    header: &MovespaceHeader,
) -> Result<DecodedMeasures, MovespaceError> {
    let values = parse_movespace_measures(cursor, header)?;
    Ok(DecodedMeasures::new(*header, values))
}

/// Decode a block under `opts`, optionally returning telemetry.
///
/// Preflight and iteration limits run before the cursor is touched, so a
/// rejected block leaves the cursor where the caller put it.
pub fn decode_measures_with<C: ByteCursor>(
    cursor: &mut C,
    header: &MovespaceHeader,
    opts: &DecodeOptions,
) -> Result<(DecodedMeasures, Option<TelemetrySnapshot>), MovespaceError> {
    opts.validate()?;

    let mut timer = opts.collect_telemetry.then(TelemetryTimer::new);
    let mut counters = DecodeCounters::default();

    let t = timer.is_some().then(Instant::now);
    preflight(cursor, header, opts)?;
    if let (Some(timer), Some(t)) = (timer.as_mut(), t) {
        timer.add_stage_time(Stage::Validate, t.elapsed());
    }

    let values = decode_passes(cursor, header, &mut counters, timer.as_mut())?;

    let snapshot = timer.map(|mut timer| {
        timer.finish();
        TelemetrySnapshot::from(&counters, &timer)
    });

    Ok((DecodedMeasures::new(*header, values), snapshot))
}

fn preflight<C: ByteCursor>(
    cursor: &C,
    header: &MovespaceHeader,
    opts: &DecodeOptions,
) -> Result<(), MeasureError> {
    if let Some(max) = opts.max_outer_iterations {
        let iterations = layout::outer_iterations(header);
        if iterations > max {
            warn!(iterations, max, "rejecting block: outer iteration limit");
            return Err(MeasureError::LimitExceeded { iterations, max });
        }
    }

    if opts.preflight_bounds {
        let required = layout::required_len(cursor.tell(), header);
        let len = cursor.len();
        if len < required {
            warn!(required, len, "rejecting block: buffer too short");
            return Err(MeasureError::Truncated { required, len });
        }
    }

    Ok(())
}

fn decode_passes<C: ByteCursor>(
    cursor: &mut C,
    header: &MovespaceHeader,
    counters: &mut DecodeCounters,
    mut timer: Option<&mut TelemetryTimer>,
) -> Result<Vec<f64>, MeasureError> {
    let start = cursor.tell();
    let data_start = start.saturating_add(DATA_START_OFFSET);
    let offset_base = data_start.saturating_add(u64::from(header.measure_count));
    let loop_value = header.loop_value();

    debug!(
        start,
        header = %header.summary(),
        iterations = layout::outer_iterations(header),
        "decoding movespace measures"
    );

    let expected = layout::expected_len(header);
    let mut out = Vec::with_capacity(expected.min(MAX_PREALLOC_VALUES) as usize);

    let passes = [
        (MeasureStream::Primary, data_start, header.measure_count),
        (MeasureStream::Secondary, offset_base, header.measure_count),
        (MeasureStream::Energy, offset_base, header.energy_measure_count),
    ];

    let mut loop_index: u64 = 0;
    while loop_index < loop_value {
        for &(stream, base, count) in &passes {
            let t = timer.is_some().then(Instant::now);
            let res = read_pass(cursor, header, stream, base, count, &mut out, counters);
            if let (Some(timer), Some(t)) = (timer.as_deref_mut(), t) {
                timer.add_stage_time(stream.into(), t.elapsed());
            }
            if let Err(e) = res {
                debug!(error = %e, decoded = out.len(), "measure decode aborted");
                return Err(e);
            }
        }
        counters.add_iteration();
        loop_index += OUTER_LOOP_STEP;
    }
    counters.add_block();

    debug!(values = out.len(), end = cursor.tell(), "decoded movespace measures");
    Ok(out)
}

fn read_pass<C: ByteCursor>(
    cursor: &mut C,
    header: &MovespaceHeader,
    stream: MeasureStream,
    base: u64,
    count: u32,
    out: &mut Vec<f64>,
    counters: &mut DecodeCounters,
) -> Result<(), MeasureError> {
    trace!(%stream, base, count, "pass");
    cursor.seek(base);
    counters.add_seek();

    for index in 0..count {
        let offset = cursor.tell();
        let raw = cursor
            .read_f32(header.endianness)
            .map_err(|source| MeasureError::OutOfRange { stream, index, offset, source })?;
        counters.add_value(stream, MEASURE_WIDTH);
        out.push(stream.apply(raw));

        cursor.seek(offset + MEASURE_STRIDE);
        counters.add_seek();
    }

    Ok(())
}
