#[cfg(test)]
mod tests {
    use std::time::Duration;

    use movespace_core::{
        config::DecodeOptions,
        cursor::SliceCursor,
        headers::{Endianness, MovespaceHeader},
        measures::{decode_measures_with, layout, MeasureStream},
        telemetry::{DecodeCounters, Stage, StageTimes, TelemetrySnapshot, TelemetryTimer},
    };

    #[test]
    fn counters_merge_and_add_assign_agree() {
        let mut a = DecodeCounters::default();
        a.add_value(MeasureStream::Primary, 4);
        a.add_seek();
        let mut b = DecodeCounters::default();
        b.add_value(MeasureStream::Energy, 4);
        b.add_iteration();
        b.add_block();

        let mut merged = a.clone();
        merged.merge(&b);
        let mut summed = a;
        summed += b;

        assert_eq!(merged, summed);
        assert_eq!(merged.reads, 2);
        assert_eq!(merged.bytes_read, 8);
        assert_eq!(merged.values_total(), 2);
        assert_eq!(merged.values_energy, 1);
    }

    #[test]
    fn counters_binary_export() {
        let mut c = DecodeCounters::default();
        for _ in 0..300 {
            c.add_value(MeasureStream::Secondary, 4);
        }
        let bytes = c.to_bytes().unwrap();
        assert_eq!(DecodeCounters::from_bytes(&bytes).unwrap(), c);
    }

    #[test]
    fn stage_times_accumulate() {
        let mut t = StageTimes::default();
        t.add(Stage::Primary, Duration::from_micros(10));
        t.add(Stage::Primary, Duration::from_micros(5));
        t.add(Stage::Energy, Duration::from_micros(1));
        assert_eq!(t.get(Stage::Primary), Duration::from_micros(15));
        assert_eq!(t.get(Stage::Secondary), Duration::ZERO);
        assert_eq!(t.total(), Duration::from_micros(16));
        assert!(t.has_all(&[Stage::Primary, Stage::Energy]));
        assert!(!t.has_all(&[Stage::Validate]));
        assert_eq!(Stage::from(MeasureStream::Secondary).to_string(), "secondary");
    }

    #[test]
    fn stage_times_merge_per_stage() {
        let mut a = StageTimes::default();
        a.add(Stage::Primary, Duration::from_micros(4));
        let mut b = StageTimes::default();
        b.add(Stage::Primary, Duration::from_micros(6));
        b.add(Stage::Validate, Duration::from_micros(2));

        a.merge(&b);
        assert_eq!(a.get(Stage::Primary), Duration::from_micros(10));
        assert_eq!(a.get(Stage::Validate), Duration::from_micros(2));
        assert_eq!(a.total(), Duration::from_micros(12));
    }

    #[test]
    fn merged_snapshots_stay_consistent() {
        let header = MovespaceHeader::new(Endianness::Little, 4, 5);
        let buf = vec![0x3Cu8; layout::required_len(0, &header) as usize];
        let opts = DecodeOptions::default();
        let decode = || {
            decode_measures_with(&mut SliceCursor::new(&buf[..]), &header, &opts)
                .unwrap()
                .1
                .unwrap()
        };

        let first = decode();
        let second = decode();
        let mut merged = first.clone();
        merged.merge(&second);

        assert_eq!(merged.counters.blocks, 2);
        assert_eq!(merged.counters.values_total(), 2 * layout::expected_len(&header));
        assert_eq!(merged.elapsed, first.elapsed + second.elapsed);
        assert_eq!(merged.total_stage_time(), first.total_stage_time() + second.total_stage_time());
        assert!(merged.sanity_check());
    }

    #[test]
    fn snapshot_from_decode_is_consistent_and_serializes() {
        let header = MovespaceHeader::new(Endianness::Big, 20, 7); // 3 iterations
        let buf = vec![0x11u8; layout::required_len(0, &header) as usize];
        let (decoded, snapshot) =
            decode_measures_with(&mut SliceCursor::new(&buf[..]), &header, &DecodeOptions::default()).unwrap();
        let snapshot = snapshot.unwrap();

        let c = &snapshot.counters;
        assert_eq!(c.outer_iterations, 3);
        assert_eq!(c.values_primary, 60);
        assert_eq!(c.values_secondary, 60);
        assert_eq!(c.values_energy, 21);
        assert_eq!(c.values_total(), decoded.len() as u64);
        assert!(snapshot.sanity_check());

        let json = snapshot.to_json().unwrap();
        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, snapshot.counters);
    }

    #[test]
    fn empty_snapshot_has_zero_rate() {
        let mut timer = TelemetryTimer::new();
        timer.finish();
        let snap = TelemetrySnapshot::from(&DecodeCounters::default(), &timer);
        assert_eq!(snap.counters.values_total(), 0);
        assert!(snap.values_per_sec == 0.0);
        assert!(snap.sanity_check());
    }
}
