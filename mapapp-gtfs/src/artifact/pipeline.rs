use std::collections::BTreeSet;

use itertools::Itertools;
use kdam::tqdm;

use super::{
    build_stop_info, build_trip_headsigns, Artifact, ArtifactError, ArtifactWriter, FeedReader,
    FeedRow, FeedSource, FeedTable, MalformedRowPolicy, PipelineConfig, PipelineSummary,
    RouteGeometryBuilder, ShapeRow, StopRow, StopScheduleBuilder, StopTimeRow, TripIndex,
    TripRow, TripTimes, UnmatchedTripPolicy,
};

/// number of unmatched trip_ids listed in the end-of-scan warning.
const UNMATCHED_SAMPLE_SIZE: usize = 5;

/// builds the requested artifacts from the feed at `config.input_dir` and
/// writes them below `config.output_dir`.
///
/// every table the artifacts need is checked up front, and every artifact
/// is computed before the first file is written, so a failed run leaves no
/// output behind.
pub fn run(
    config: &PipelineConfig,
    artifacts: &[Artifact],
) -> Result<PipelineSummary, ArtifactError> {
    let requested = |artifact: Artifact| artifacts.contains(&artifact);
    let tables = artifacts
        .iter()
        .flat_map(|a| a.required_tables().iter().copied())
        .collect::<BTreeSet<FeedTable>>()
        .into_iter()
        .collect_vec();
    let source = FeedSource::new(&config.input_dir);
    source.require(&tables)?;
    log::info!(
        "building {} from '{}'",
        artifacts.iter().join(", "),
        config.input_dir.to_str().unwrap_or_default()
    );

    let mut summary = PipelineSummary::default();
    let policy = config.malformed_row_policy;

    let trips: Vec<TripRow> = if tables.contains(&FeedTable::Trips) {
        read_table(&source, policy, &mut summary)?
    } else {
        vec![]
    };
    summary.trips = trips.len();

    let mut scan = StopTimesScan {
        schedules: requested(Artifact::StopSchedules)
            .then(|| StopScheduleBuilder::new(&config.target_filter)),
        trip_times: requested(Artifact::TripTimes).then(TripTimes::new),
        geometry: requested(Artifact::RouteGeometry).then(|| RouteGeometryBuilder::new(&trips)),
    };
    if tables.contains(&FeedTable::StopTimes) {
        let trip_index = TripIndex::new(&trips);
        scan.run(&source, config, &trip_index, &mut summary)?;
    }
    let StopTimesScan {
        schedules,
        trip_times,
        mut geometry,
    } = scan;

    if let Some(geometry) = geometry.as_mut() {
        read_shapes(&source, policy, geometry, &mut summary)?;
    }

    let stop_info = match requested(Artifact::StopInfo) {
        true => {
            let stops: Vec<StopRow> = read_table(&source, policy, &mut summary)?;
            let (stop_info, without_location) = build_stop_info(&stops);
            summary.stops_without_location = without_location;
            Some(stop_info)
        }
        false => None,
    };
    let trip_headsigns = requested(Artifact::TripHeadsigns).then(|| build_trip_headsigns(&trips));

    if let Some(schedules) = &schedules {
        summary.untimed_stop_time_rows = schedules.untimed();
    }
    let schedules = schedules.map(StopScheduleBuilder::build);
    let trip_times = trip_times.map(TripTimes::build);
    let geometry = geometry.map(RouteGeometryBuilder::build);

    let writer = ArtifactWriter::new(&config.output_dir, config.overwrite);
    let outputs = &config.outputs;
    let mut files_written = 0;
    if let Some(schedules) = &schedules {
        summary.stop_schedules = schedules.len();
        // a filtered run refreshes only its target stops
        files_written += if config.target_filter.is_empty() {
            writer.replace_per_key(&outputs.stop_times_directory, schedules.as_map())?
        } else {
            writer.write_per_key(&outputs.stop_times_directory, schedules.as_map())?
        };
    }
    if let Some(trip_times) = &trip_times {
        summary.trip_time_ranges = trip_times.len();
        files_written += usize::from(writer.write_json(&outputs.trip_times, trip_times)?);
    }
    if let Some(geometry) = &geometry {
        summary.routes = geometry.len();
        files_written += usize::from(writer.write_json(&outputs.route_geometry, geometry)?);
    }
    if let Some(stop_info) = &stop_info {
        summary.stops = stop_info.len();
        files_written += usize::from(writer.write_json(&outputs.stop_info, stop_info)?);
    }
    if let Some(trip_headsigns) = &trip_headsigns {
        summary.trip_headsigns = trip_headsigns.len();
        files_written += usize::from(writer.write_json(&outputs.trip_headsigns, trip_headsigns)?);
    }
    summary.files_written = files_written;
    log::info!(
        "wrote {files_written} file(s) to '{}'",
        config.output_dir.to_str().unwrap_or_default()
    );
    Ok(summary)
}

/// the first `limit` stop_times rows at `stop_id`, in file order. reading
/// stops as soon as enough rows are found.
pub fn preview_stop(
    config: &PipelineConfig,
    stop_id: &str,
    limit: usize,
) -> Result<Vec<StopTimeRow>, ArtifactError> {
    let source = FeedSource::new(&config.input_dir);
    source.require(&[FeedTable::StopTimes])?;
    FeedReader::<StopTimeRow>::new(&source, config.malformed_row_policy)?
        .filter(|row| row.as_ref().map_or(true, |r| r.stop_id == stop_id))
        .take(limit)
        .collect()
}

/// the aggregations fed by the single pass over stop_times.txt.
struct StopTimesScan {
    schedules: Option<StopScheduleBuilder>,
    trip_times: Option<TripTimes>,
    geometry: Option<RouteGeometryBuilder>,
}

impl StopTimesScan {
    fn run(
        &mut self,
        source: &FeedSource,
        config: &PipelineConfig,
        trip_index: &TripIndex,
        summary: &mut PipelineSummary,
    ) -> Result<(), ArtifactError> {
        let joined = self.schedules.is_some() || self.geometry.is_some();
        let mut unmatched = 0;
        let mut unmatched_sample: Vec<String> = vec![];

        let mut reader =
            FeedReader::<StopTimeRow>::new(source, config.malformed_row_policy)?;
        let desc = format!("reading {}", reader.filename());
        let row_iter = tqdm!(reader.by_ref(), desc = desc);
        for row_result in row_iter {
            let row = row_result?;
            summary.stop_time_rows += 1;
            if let Some(trip_times) = self.trip_times.as_mut() {
                trip_times.observe(&row);
            }
            if !joined {
                continue;
            }
            let Some(trip) = trip_index.get(&row.trip_id) else {
                match config.unmatched_trip_policy {
                    UnmatchedTripPolicy::Fail => {
                        eprintln!();
                        return Err(ArtifactError::UnmatchedJoinKey {
                            trip_id: row.trip_id,
                            stop_id: row.stop_id,
                        });
                    }
                    UnmatchedTripPolicy::Drop | UnmatchedTripPolicy::Warn => {
                        log::debug!(
                            "dropping stop_times row at stop '{}' for unknown trip '{}'",
                            row.stop_id,
                            row.trip_id
                        );
                        unmatched += 1;
                        if unmatched_sample.len() < UNMATCHED_SAMPLE_SIZE
                            && !unmatched_sample.contains(&row.trip_id)
                        {
                            unmatched_sample.push(row.trip_id);
                        }
                    }
                }
                continue;
            };
            if let Some(schedules) = self.schedules.as_mut() {
                schedules.observe(&row, trip);
            }
            if let Some(geometry) = self.geometry.as_mut() {
                geometry.observe_stop(&trip.route_id, &row.stop_id);
            }
        }
        eprintln!();
        record_skipped(&reader, summary);

        summary.unmatched_stop_time_rows = unmatched;
        if unmatched > 0 && config.unmatched_trip_policy == UnmatchedTripPolicy::Warn {
            log::warn!(
                "{unmatched} stop_times row(s) reference trips missing from trips.txt and were excluded, e.g. {}",
                unmatched_sample.iter().join(", ")
            );
        }
        Ok(())
    }
}

fn read_table<T: FeedRow>(
    source: &FeedSource,
    policy: MalformedRowPolicy,
    summary: &mut PipelineSummary,
) -> Result<Vec<T>, ArtifactError> {
    let mut reader = FeedReader::<T>::new(source, policy)?;
    let desc = format!("reading {}", reader.filename());
    let rows = tqdm!(reader.by_ref(), desc = desc).collect::<Result<Vec<T>, _>>();
    eprintln!();
    let rows = rows?;
    record_skipped(&reader, summary);
    Ok(rows)
}

fn read_shapes(
    source: &FeedSource,
    policy: MalformedRowPolicy,
    geometry: &mut RouteGeometryBuilder,
    summary: &mut PipelineSummary,
) -> Result<(), ArtifactError> {
    let mut reader = FeedReader::<ShapeRow>::new(source, policy)?;
    let desc = format!("reading {}", reader.filename());
    for row_result in tqdm!(reader.by_ref(), desc = desc) {
        let row = row_result?;
        if geometry.wants_shape(&row.shape_id) {
            geometry.observe_shape_point(&row);
            summary.shape_points += 1;
        }
    }
    eprintln!();
    record_skipped(&reader, summary);
    Ok(())
}

fn record_skipped<T: FeedRow>(reader: &FeedReader<T>, summary: &mut PipelineSummary) {
    if reader.skipped() > 0 {
        summary
            .skipped_rows
            .insert(T::TABLE.filename().to_string(), reader.skipped());
    }
}

#[cfg(test)]
mod test {
    use std::{collections::BTreeMap, path::Path};

    use super::{preview_stop, run};
    use crate::artifact::{
        test_utils, Artifact, ArtifactError, MalformedRowPolicy, PipelineConfig, RouteGeometry,
        ScheduleEntry, StopInfo, TripTimeRange, UnmatchedTripPolicy,
    };

    const TRIPS: &str = "trip_id,route_id,service_id,trip_headsign,shape_id\n\
                         T1,10,WK,North,S1\n";
    const STOP_TIMES: &str = "trip_id,stop_id,arrival_time,departure_time,stop_sequence\n\
                              T1,52684,08:00:00,08:00:30,1\n";

    fn config(input_dir: &Path, output_dir: &Path) -> PipelineConfig {
        PipelineConfig {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(filepath: &Path) -> T {
        let text = std::fs::read_to_string(filepath)
            .unwrap_or_else(|e| panic!("failed reading {filepath:?}: {e}"));
        serde_json::from_str(&text).unwrap_or_else(|e| panic!("failed decoding {filepath:?}: {e}"))
    }

    #[test]
    fn test_single_trip_scenario() {
        let dir = test_utils::scratch_dir("pipeline_scenario");
        let input = dir.join("input");
        let output = dir.join("output");
        std::fs::create_dir_all(&input).expect("input dir");
        test_utils::write_table(&input, "trips.txt", TRIPS);
        test_utils::write_table(&input, "stop_times.txt", STOP_TIMES);

        let summary = run(
            &config(&input, &output),
            &[Artifact::StopSchedules, Artifact::TripTimes],
        )
        .expect("pipeline run");
        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.stop_time_rows, 1);

        let schedule = std::fs::read_to_string(output.join("stop_times").join("52684.json"))
            .expect("per-stop file");
        assert_eq!(schedule, r#"[{"r":"10","t":"08:00:00","h":"North","s":"WK"}]"#);
        let trip_times =
            std::fs::read_to_string(output.join("trip_times.json")).expect("trip times file");
        assert_eq!(trip_times, r#"{"T1":{"start":"08:00:30","end":"08:00:00"}}"#);
        assert_eq!(test_utils::list_files(&output), vec!["trip_times.json"]);
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = test_utils::scratch_dir("pipeline_missing_input");
        let output = dir.join("output");
        let result = run(&config(&dir.join("nonexistent"), &output), &Artifact::ALL);
        assert!(matches!(result, Err(ArtifactError::MissingFile { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_table_checked_before_reading() {
        let dir = test_utils::scratch_dir("pipeline_missing_table");
        let input = dir.join("input");
        let output = dir.join("output");
        std::fs::create_dir_all(&input).expect("input dir");
        test_utils::write_table(&input, "trips.txt", TRIPS);
        test_utils::write_table(&input, "stop_times.txt", STOP_TIMES);
        match run(&config(&input, &output), &Artifact::ALL) {
            Err(ArtifactError::MissingFile { filepath }) => assert!(filepath.ends_with("shapes.txt")),
            other => panic!("expected MissingFile, found {other:?}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_parse_failure_writes_nothing() {
        let dir = test_utils::scratch_dir("pipeline_parse_failure");
        let input = dir.join("input");
        let output = dir.join("output");
        std::fs::create_dir_all(&input).expect("input dir");
        test_utils::write_table(&input, "trips.txt", TRIPS);
        test_utils::write_table(
            &input,
            "stop_times.txt",
            "trip_id,stop_id,arrival_time,departure_time,stop_sequence\n\
             T1,52684,08:00:00,08:00:30,1\n\
             T1,52685,eight,08:05:00,2\n",
        );
        match run(&config(&input, &output), &[Artifact::StopSchedules]) {
            Err(ArtifactError::Parse { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected Parse, found {other:?}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_skip_policy_counts_rows() {
        let dir = test_utils::scratch_dir("pipeline_skip_policy");
        let input = dir.join("input");
        let output = dir.join("output");
        std::fs::create_dir_all(&input).expect("input dir");
        test_utils::write_table(&input, "trips.txt", TRIPS);
        test_utils::write_table(
            &input,
            "stop_times.txt",
            "trip_id,stop_id,arrival_time,departure_time,stop_sequence\n\
             T1,52684,08:00:00,08:00:30,1\n\
             T1,52685,eight,08:05:00,2\n",
        );
        let config = PipelineConfig {
            malformed_row_policy: MalformedRowPolicy::Skip,
            ..config(&input, &output)
        };
        let summary = run(&config, &[Artifact::StopSchedules]).expect("pipeline run");
        assert_eq!(summary.stop_time_rows, 1);
        assert_eq!(summary.skipped_rows.get("stop_times.txt"), Some(&1));
        assert_eq!(
            test_utils::list_files(&output.join("stop_times")),
            vec!["52684.json"]
        );
    }

    #[test]
    fn test_unmatched_trip_policies() {
        let dir = test_utils::scratch_dir("pipeline_unmatched");
        let input = dir.join("input");
        std::fs::create_dir_all(&input).expect("input dir");
        test_utils::write_table(&input, "trips.txt", TRIPS);
        test_utils::write_table(
            &input,
            "stop_times.txt",
            "trip_id,stop_id,arrival_time,departure_time,stop_sequence\n\
             T1,52684,08:00:00,08:00:30,1\n\
             GHOST,52684,09:00:00,09:00:00,1\n",
        );
        let artifacts = [Artifact::StopSchedules, Artifact::TripTimes];

        let output = dir.join("warn");
        let summary = run(&config(&input, &output), &artifacts).expect("warn run");
        assert_eq!(summary.unmatched_stop_time_rows, 1);
        let schedule: Vec<ScheduleEntry> =
            read_json(&output.join("stop_times").join("52684.json"));
        assert_eq!(schedule.len(), 1);
        // trip times do not join against trips.txt
        let trip_times: BTreeMap<String, TripTimeRange> =
            read_json(&output.join("trip_times.json"));
        assert!(trip_times.contains_key("GHOST"));

        let output = dir.join("drop");
        let drop_config = PipelineConfig {
            unmatched_trip_policy: UnmatchedTripPolicy::Drop,
            ..config(&input, &output)
        };
        let summary = run(&drop_config, &artifacts).expect("drop run");
        assert_eq!(summary.unmatched_stop_time_rows, 1);
        let schedule: Vec<ScheduleEntry> =
            read_json(&output.join("stop_times").join("52684.json"));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].time.as_str(), "08:00:00");

        let output = dir.join("fail");
        let fail_config = PipelineConfig {
            unmatched_trip_policy: UnmatchedTripPolicy::Fail,
            ..config(&input, &output)
        };
        match run(&fail_config, &artifacts) {
            Err(ArtifactError::UnmatchedJoinKey { trip_id, stop_id }) => {
                assert_eq!(trip_id, "GHOST");
                assert_eq!(stop_id, "52684");
            }
            other => panic!("expected UnmatchedJoinKey, found {other:?}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_rerun_replaces_stop_files_from_earlier_feed() {
        let dir = test_utils::scratch_dir("pipeline_rerun");
        let output = dir.join("output");
        let first = dir.join("first");
        let second = dir.join("second");
        std::fs::create_dir_all(&first).expect("first feed dir");
        std::fs::create_dir_all(&second).expect("second feed dir");
        test_utils::write_table(&first, "trips.txt", TRIPS);
        test_utils::write_table(
            &first,
            "stop_times.txt",
            "trip_id,stop_id,arrival_time,departure_time,stop_sequence\n\
             T1,X,08:00:00,08:00:00,1\n\
             T1,Y,08:05:00,08:05:00,2\n",
        );
        test_utils::write_table(&second, "trips.txt", TRIPS);
        test_utils::write_table(
            &second,
            "stop_times.txt",
            "trip_id,stop_id,arrival_time,departure_time,stop_sequence\n\
             T1,X,09:00:00,09:00:00,1\n",
        );

        run(&config(&first, &output), &[Artifact::StopSchedules]).expect("first run");
        assert_eq!(
            test_utils::list_files(&output.join("stop_times")),
            vec!["X.json", "Y.json"]
        );
        run(&config(&second, &output), &[Artifact::StopSchedules]).expect("second run");
        assert_eq!(
            test_utils::list_files(&output.join("stop_times")),
            vec!["X.json"]
        );
        let schedule: Vec<ScheduleEntry> = read_json(&output.join("stop_times").join("X.json"));
        assert_eq!(schedule[0].time.as_str(), "09:00:00");
    }

    #[test]
    fn test_filtered_rerun_keeps_other_stop_files() {
        let output = test_utils::scratch_dir("pipeline_filtered_rerun");
        let sample = test_utils::sample_feed_dir();
        run(&config(&sample, &output), &[Artifact::StopSchedules]).expect("full run");
        let config = PipelineConfig {
            target_filter: vec![String::from("52684")],
            ..config(&sample, &output)
        };
        run(&config, &[Artifact::StopSchedules]).expect("filtered run");
        assert_eq!(
            test_utils::list_files(&output.join("stop_times")),
            vec!["52684.json", "52685.json", "52686.json", "60001.json"]
        );
    }

    #[test]
    fn test_trip_times_alone_needs_only_stop_times() {
        let dir = test_utils::scratch_dir("pipeline_trip_times_only");
        let input = dir.join("input");
        let output = dir.join("output");
        std::fs::create_dir_all(&input).expect("input dir");
        test_utils::write_table(&input, "stop_times.txt", STOP_TIMES);
        let summary = run(&config(&input, &output), &[Artifact::TripTimes]).expect("run");
        assert_eq!(summary.trip_time_ranges, 1);
        assert_eq!(test_utils::list_files(&output), vec!["trip_times.json"]);
    }

    #[test]
    fn test_reads_zip_archive() {
        let dir = test_utils::scratch_dir("pipeline_archive");
        let archive = dir.join("gtfs_stm.zip");
        let output = dir.join("output");
        test_utils::write_archive(
            &archive,
            &[
                ("trips.txt", TRIPS),
                ("stop_times.txt", STOP_TIMES),
                (
                    "shapes.txt",
                    "shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\n\
                     S1,45.5,-73.5,1\n",
                ),
                (
                    "stops.txt",
                    "stop_id,stop_name,stop_lat,stop_lon\n\
                     52684,Henri-Bourassa,45.555,-73.667\n",
                ),
            ],
        );
        let summary = run(&config(&archive, &output), &Artifact::ALL).expect("run");
        assert_eq!(summary.files_written, 5);
        assert_eq!(
            test_utils::list_files(&output),
            vec![
                "stm_parcours.json",
                "stm_stops.json",
                "stm_trips.json",
                "trip_times.json"
            ]
        );
        let parcours = std::fs::read_to_string(output.join("stm_parcours.json")).expect("read");
        assert_eq!(parcours, r#"{"10":{"shapes":[[[45.5,-73.5]]],"stops":["52684"]}}"#);
        let stops = std::fs::read_to_string(output.join("stm_stops.json")).expect("read");
        assert_eq!(
            stops,
            r#"{"52684":{"name":"Henri-Bourassa","lat":45.555,"lon":-73.667}}"#
        );
        let trips = std::fs::read_to_string(output.join("stm_trips.json")).expect("read");
        assert_eq!(trips, r#"{"T1":"North"}"#);
    }

    #[test]
    fn test_sample_feed() {
        let output = test_utils::scratch_dir("pipeline_sample_feed");
        let summary = run(
            &config(&test_utils::sample_feed_dir(), &output),
            &Artifact::ALL,
        )
        .expect("sample feed run");
        assert_eq!(summary.trips, 5);
        assert_eq!(summary.stop_time_rows, 14);
        assert_eq!(summary.unmatched_stop_time_rows, 1);
        assert_eq!(summary.stops_without_location, 1);

        // padded times, stable order for equal times, past-midnight last
        let schedule: Vec<ScheduleEntry> =
            read_json(&output.join("stop_times").join("52685.json"));
        let passages = schedule
            .iter()
            .map(|e| (e.time.as_str(), e.route_id.as_ref()))
            .collect::<Vec<_>>();
        assert_eq!(
            passages,
            vec![
                ("07:34:00", "10"),
                ("08:04:00", "10"),
                ("08:04:00", "24"),
                ("09:06:00", "24"),
                ("25:15:00", "10"),
            ]
        );
        let schedule: Vec<ScheduleEntry> =
            read_json(&output.join("stop_times").join("52684.json"));
        let times = schedule.iter().map(|e| e.time.as_str()).collect::<Vec<_>>();
        assert_eq!(times, vec!["07:30:00", "08:00:00", "25:20:00"]);
        assert_eq!(schedule[2].headsign.as_ref(), "Station Berri-UQAM");

        let trip_times: BTreeMap<String, TripTimeRange> =
            read_json(&output.join("trip_times.json"));
        assert_eq!(trip_times.len(), 6);
        assert_eq!(trip_times["10-002"].start.as_str(), "07:30:00");
        assert_eq!(trip_times["10-002"].end.as_str(), "07:39:00");
        assert_eq!(trip_times["10-003"].end.as_str(), "25:20:00");

        let routes: BTreeMap<String, RouteGeometry> =
            read_json(&output.join("stm_parcours.json"));
        assert_eq!(routes.keys().collect::<Vec<_>>(), vec!["10", "24"]);
        assert_eq!(routes["10"].shapes.len(), 2);
        assert_eq!(
            routes["10"].shapes[0],
            vec![[45.555, -73.667], [45.551, -73.661], [45.546, -73.655]]
        );
        assert_eq!(routes["10"].stops, vec!["52684", "52685", "52686"]);
        assert_eq!(routes["24"].shapes.len(), 1);
        assert_eq!(routes["24"].stops, vec!["52685", "60001"]);

        let stops: BTreeMap<String, StopInfo> = read_json(&output.join("stm_stops.json"));
        assert_eq!(stops.len(), 5);
        assert_eq!(stops["60001"].lat, stops["STATION1"].lat);
        assert!(!stops.contains_key("60002"));

        let headsigns: BTreeMap<String, String> = read_json(&output.join("stm_trips.json"));
        assert_eq!(headsigns.len(), 5);
        assert_eq!(headsigns["24-002"], "Ouest");
    }

    #[test]
    fn test_target_filter_limits_stop_files() {
        let output = test_utils::scratch_dir("pipeline_target_filter");
        let config = PipelineConfig {
            target_filter: vec![String::from("52684")],
            ..config(&test_utils::sample_feed_dir(), &output)
        };
        let summary = run(&config, &[Artifact::StopSchedules]).expect("run");
        assert_eq!(summary.stop_schedules, 1);
        assert_eq!(
            test_utils::list_files(&output.join("stop_times")),
            vec!["52684.json"]
        );
    }

    #[test]
    fn test_preview_stops_after_limit() {
        let config = config(
            &test_utils::sample_feed_dir(),
            &test_utils::scratch_dir("pipeline_preview"),
        );
        let rows = preview_stop(&config, "52685", 2).expect("preview");
        let trips = rows.iter().map(|r| r.trip_id.as_str()).collect::<Vec<_>>();
        assert_eq!(trips, vec!["10-001", "10-002"]);
        assert!(preview_stop(&config, "nowhere", 10).expect("preview").is_empty());
    }
}
