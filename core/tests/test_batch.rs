#[cfg(test)]
mod tests {
    use movespace_core::{
        config::DecodeOptions,
        cursor::SliceCursor,
        headers::{Endianness, MovespaceHeader},
        measures::{decode_blocks, decode_blocks_with, decode_measures, layout, BlockJob, ParallelismProfile},
        telemetry::Stage,
    };

    fn buffer(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i * 13) % 61) as u8).collect()
    }

    fn jobs() -> Vec<BlockJob> {
        (0..24u32)
            .map(|i| BlockJob {
                start: u64::from(i) * 17,
                header: MovespaceHeader::new(
                    if i % 2 == 0 { Endianness::Big } else { Endianness::Little },
                    i % 7,
                    (i * 3) % 11,
                ),
            })
            .collect()
    }

    #[test]
    fn parallel_matches_sequential_in_order() -> anyhow::Result<()> {
        let jobs = jobs();
        let len = jobs.iter().map(|j| layout::required_len(j.start, &j.header)).max().unwrap() as usize;
        let buf = buffer(len);

        let profile = ParallelismProfile { worker_count: 4, inflight_jobs: 2 };
        let parallel = decode_blocks(&buf, &jobs, &profile);
        let sequential = decode_blocks(&buf, &jobs, &ParallelismProfile::single_threaded());

        assert_eq!(parallel.len(), jobs.len());
        for ((p, s), job) in parallel.iter().zip(&sequential).zip(&jobs) {
            let direct = decode_measures(&mut SliceCursor::at(&buf[..], job.start), &job.header)?;
            assert_eq!(p.as_ref().map_err(Clone::clone)?, &direct);
            assert_eq!(s.as_ref().map_err(Clone::clone)?, &direct);
            assert_eq!(direct.header(), &job.header);
        }
        Ok(())
    }

    #[test]
    fn failures_are_isolated() {
        let ok = MovespaceHeader::new(Endianness::Little, 2, 2);
        let buf = buffer(layout::required_len(0, &ok) as usize);
        let jobs = vec![
            BlockJob { start: 0, header: ok },
            BlockJob { start: 1, header: ok }, // one byte past the end
            BlockJob { start: 0, header: MovespaceHeader::new(Endianness::Big, 0, 0) },
        ];

        let results = decode_blocks(&buf, &jobs, &ParallelismProfile { worker_count: 3, inflight_jobs: 1 });
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_out_of_range());
        assert!(results[2].as_ref().unwrap().is_empty());
    }

    #[test]
    fn empty_job_list() {
        assert!(decode_blocks(&[], &[], &ParallelismProfile::dynamic(8)).is_empty());
    }

    #[test]
    fn dynamic_profile_has_a_worker() {
        let p = ParallelismProfile::dynamic(0);
        assert_eq!(p.worker_count, 1);
        assert!(p.inflight_jobs >= 1);
    }

    #[test]
    fn batch_telemetry_sums_every_decoded_block() -> anyhow::Result<()> {
        let jobs = jobs();
        let len = jobs.iter().map(|j| layout::required_len(j.start, &j.header)).max().unwrap() as usize;
        let buf = buffer(len);

        let profile = ParallelismProfile { worker_count: 4, inflight_jobs: 3 };
        let (results, snapshot) = decode_blocks_with(&buf, &jobs, &profile, &DecodeOptions::default())?;
        let snapshot = snapshot.expect("telemetry is on by default");

        let plain = decode_blocks(&buf, &jobs, &profile);
        for (with, without) in results.iter().zip(&plain) {
            assert_eq!(with.as_ref().map_err(Clone::clone)?, without.as_ref().map_err(Clone::clone)?);
        }

        let values: u64 = jobs.iter().map(|j| layout::expected_len(&j.header)).sum();
        let iterations: u64 = jobs.iter().map(|j| layout::outer_iterations(&j.header)).sum();
        let c = &snapshot.counters;
        assert_eq!(c.blocks, jobs.len() as u64);
        assert_eq!(c.values_total(), values);
        assert_eq!(c.reads, values);
        assert_eq!(c.outer_iterations, iterations);
        assert!(snapshot.has_all_stages(&[Stage::Validate, Stage::Primary, Stage::Secondary, Stage::Energy]));
        assert!(snapshot.sanity_check());
        Ok(())
    }

    #[test]
    fn batch_telemetry_skips_failed_blocks() -> anyhow::Result<()> {
        let ok = MovespaceHeader::new(Endianness::Big, 3, 1);
        let buf = buffer(layout::required_len(0, &ok) as usize);
        let jobs = vec![
            BlockJob { start: 0, header: ok },
            BlockJob { start: 2, header: ok }, // runs off the end
            BlockJob { start: 0, header: ok },
        ];

        let (results, snapshot) =
            decode_blocks_with(&buf, &jobs, &ParallelismProfile { worker_count: 2, inflight_jobs: 1 }, &DecodeOptions::default())?;
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_out_of_range());
        assert!(results[2].is_ok());

        let c = snapshot.expect("two blocks decoded").counters;
        assert_eq!(c.blocks, 2);
        assert_eq!(c.values_total(), 2 * layout::expected_len(&ok));
        Ok(())
    }

    #[test]
    fn batch_telemetry_off_and_invalid_options() -> anyhow::Result<()> {
        let h = MovespaceHeader::new(Endianness::Little, 1, 1);
        let buf = buffer(layout::required_len(0, &h) as usize);
        let jobs = [BlockJob { start: 0, header: h }];
        let single = ParallelismProfile::single_threaded();

        let quiet = DecodeOptions { collect_telemetry: false, ..DecodeOptions::default() };
        let (results, snapshot) = decode_blocks_with(&buf, &jobs, &single, &quiet)?;
        assert!(results[0].is_ok());
        assert!(snapshot.is_none());

        let bad = DecodeOptions { max_outer_iterations: Some(0), ..DecodeOptions::default() };
        let err = decode_blocks_with(&buf, &jobs, &single, &bad).unwrap_err();
        assert!(err.is_invalid_input());

        let (_, snapshot) = decode_blocks_with(&[], &[], &single, &DecodeOptions::default())?;
        assert!(snapshot.is_none());
        Ok(())
    }
}
