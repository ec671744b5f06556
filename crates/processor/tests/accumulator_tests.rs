//! Tests for the chunk statistics accumulator
//!
//! Test Coverage:
//! - Row-count additivity and column handling
//! - Welford mean and the chunk-level variance approximation
//! - Order vs boundary sensitivity of the approximation
//! - Exact variance mode
//! - Finalization (idempotence, rounding, percentages, top values)
//! - Report section omission

use chrono::{NaiveDate, NaiveDateTime};
use processor::aggregation::{ChunkStatsAccumulator, OnlineVariance};
use processor::error::AccumulatorError;
use sheet_insights_config::{AccumulatorConfig, ColumnPolicy, VarianceMode};
use sheet_insights_types::{
    CategoricalChunkStats, ChunkStats, DateChunkStats, NumericChunkStats,
};

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Summarize raw values the way an upstream chunk analyzer would
fn numeric_chunk(column: &str, values: &[f64]) -> ChunkStats {
    let mut moments = OnlineVariance::new();
    values.iter().for_each(|v| moments.update(*v));

    let stats = NumericChunkStats::new(
        values.iter().sum(),
        moments.mean(),
        moments.std_dev().unwrap_or(0.0),
        values.iter().cloned().fold(f64::INFINITY, f64::min),
        values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        0,
    );
    ChunkStats::new(values.len() as u64, [column]).with_numeric(column, stats)
}

fn merge_all(config: AccumulatorConfig, chunks: &[ChunkStats]) -> ChunkStatsAccumulator {
    let mut acc = ChunkStatsAccumulator::new(config);
    for chunk in chunks {
        acc.add_chunk_stats(chunk).unwrap();
    }
    acc
}

fn exact() -> AccumulatorConfig {
    AccumulatorConfig {
        variance_mode: VarianceMode::Exact,
        ..Default::default()
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn hours_chunks() -> Vec<ChunkStats> {
    vec![
        ChunkStats::new(10, ["Hours"])
            .with_numeric("Hours", NumericChunkStats::new(100.0, 10.0, 2.0, 5.0, 15.0, 0)),
        ChunkStats::new(10, ["Hours"])
            .with_numeric("Hours", NumericChunkStats::new(150.0, 15.0, 3.0, 8.0, 20.0, 0)),
    ]
}

// ============================================================================
// MERGE TESTS
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_row_count_is_additive() {
        let chunks: Vec<ChunkStats> = [7u64, 0, 13, 1, 250]
            .iter()
            .map(|rows| ChunkStats::new(*rows, ["a"]))
            .collect();

        let acc = merge_all(AccumulatorConfig::default(), &chunks);
        assert_eq!(acc.total_rows(), 271);
        assert_eq!(acc.final_statistics().total_rows, 271);
        assert_eq!(acc.chunks_seen(), 5);
    }

    #[test]
    fn test_hours_scenario() {
        // Approximate: ignores the spread between the two chunk means, so this
        // is not the exact pooled std of the underlying rows.
        let acc = merge_all(AccumulatorConfig::default(), &hours_chunks());
        let hours = &acc.final_statistics().numeric_summary["Hours"];

        assert_eq!(hours.sum, 250.0);
        assert_eq!(hours.count, 20);
        assert_eq!(hours.mean, 12.5);
        assert_eq!(hours.min, 5.0);
        assert_eq!(hours.max, 20.0);
        assert_eq!(hours.std, 2.48);
        assert_eq!(hours.missing, 0);
        assert_eq!(hours.missing_pct, 0.0);

        let raw = acc.numeric_column("Hours").unwrap();
        assert!((raw.m2() - 117.0).abs() < 1e-9);
        assert!((raw.std() - (117.0f64 / 19.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_track_every_chunk() {
        let mut acc = ChunkStatsAccumulator::with_defaults();
        let mut seen_min = f64::INFINITY;
        let mut seen_max = f64::NEG_INFINITY;

        for (min, max) in [(4.0, 9.0), (-2.0, 3.0), (6.0, 40.0), (0.5, 0.5)] {
            acc.add_chunk_stats(
                &ChunkStats::new(5, ["x"])
                    .with_numeric("x", NumericChunkStats::new(0.0, 0.0, 0.0, min, max, 0)),
            )
            .unwrap();
            seen_min = f64::min(seen_min, min);
            seen_max = f64::max(seen_max, max);

            let column = acc.numeric_column("x").unwrap();
            assert!(column.min().unwrap() <= seen_min);
            assert!(column.max().unwrap() >= seen_max);
        }

        assert_eq!(acc.numeric_column("x").unwrap().min(), Some(-2.0));
        assert_eq!(acc.numeric_column("x").unwrap().max(), Some(40.0));
    }

    #[test]
    fn test_sections_are_optional() {
        let mut acc = ChunkStatsAccumulator::with_defaults();
        acc.add_chunk_stats(&ChunkStats::new(4, ["Hours", "Role", "Date"]))
            .unwrap();
        acc.add_chunk_stats(
            &ChunkStats::new(4, ["Hours", "Role", "Date"])
                .with_categorical("Role", CategoricalChunkStats::new([("Nurse", 3)], 1)),
        )
        .unwrap();

        let stats = acc.final_statistics();
        assert_eq!(stats.total_rows, 8);
        assert!(stats.numeric_summary.is_empty());
        assert!(stats.date_summary.is_empty());
        assert_eq!(stats.categorical_summary["Role"].missing_pct, 12.5);
    }

    #[test]
    fn test_chunk_parsed_from_json() {
        let json = r#"{
            "rows": 4,
            "columns": ["Hours", "Shift Date"],
            "numeric_stats": {
                "Hours": {"sum": 30, "mean": 7.5, "std": 1.2, "min": 6, "max": 9, "missing": 0}
            },
            "date_stats": {
                "Shift Date": {
                    "min_date": "2024-01-02 00:00:00",
                    "max_date": "2024-01-05 00:00:00",
                    "missing": 0
                }
            }
        }"#;
        let chunk: ChunkStats = serde_json::from_str(json).unwrap();

        let mut acc = ChunkStatsAccumulator::with_defaults();
        acc.add_chunk_stats(&chunk).unwrap();

        let stats = acc.final_statistics();
        assert_eq!(stats.numeric_summary["Hours"].mean, 7.5);
        assert_eq!(
            stats.date_summary["Shift Date"].date_range,
            "2024-01-02 to 2024-01-05"
        );
    }

    #[test]
    fn test_date_columns_merge() {
        let chunks = vec![
            ChunkStats::new(3, ["Start"])
                .with_date("Start", DateChunkStats::new(day(2024, 3, 1), day(2024, 3, 9), 0)),
            ChunkStats::new(3, ["Start"])
                .with_date("Start", DateChunkStats::new(day(2024, 2, 20), day(2024, 3, 2), 3)),
        ];
        let acc = merge_all(AccumulatorConfig::default(), &chunks);
        let start = &acc.final_statistics().date_summary["Start"];

        assert_eq!(start.min_date, Some(day(2024, 2, 20)));
        assert_eq!(start.max_date, Some(day(2024, 3, 9)));
        assert_eq!(start.date_range, "2024-02-20 to 2024-03-09");
        assert_eq!(start.missing_pct, 50.0);
    }
}

// ============================================================================
// VARIANCE APPROXIMATION TESTS
// ============================================================================

mod variance_tests {
    use super::*;

    const ROWS: [f64; 8] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

    #[test]
    fn test_approximation_ignores_chunk_order() {
        let forward = merge_all(
            AccumulatorConfig::default(),
            &[numeric_chunk("v", &ROWS[..3]), numeric_chunk("v", &ROWS[3..])],
        );
        let backward = merge_all(
            AccumulatorConfig::default(),
            &[numeric_chunk("v", &ROWS[3..]), numeric_chunk("v", &ROWS[..3])],
        );

        let f = forward.numeric_column("v").unwrap();
        let b = backward.numeric_column("v").unwrap();
        assert!((f.std() - b.std()).abs() < 1e-12);
        assert!((f.mean() - b.mean()).abs() < 1e-12);
        assert_eq!(
            forward.final_statistics().numeric_summary,
            backward.final_statistics().numeric_summary
        );
    }

    #[test]
    fn test_approximation_depends_on_chunk_boundaries() {
        let even = merge_all(
            AccumulatorConfig::default(),
            &[numeric_chunk("v", &ROWS[..4]), numeric_chunk("v", &ROWS[4..])],
        );
        let uneven = merge_all(
            AccumulatorConfig::default(),
            &[numeric_chunk("v", &ROWS[..2]), numeric_chunk("v", &ROWS[2..])],
        );

        // m2: 5 + 5 vs 0.5 + 17.5
        let even_std = even.numeric_column("v").unwrap().std();
        let uneven_std = uneven.numeric_column("v").unwrap().std();
        assert!((even_std - (10.0f64 / 7.0).sqrt()).abs() < 1e-9);
        assert!((uneven_std - (18.0f64 / 7.0).sqrt()).abs() < 1e-9);
        assert_ne!(
            even.final_statistics().numeric_summary["v"].std,
            uneven.final_statistics().numeric_summary["v"].std
        );

        // everything but the std is boundary independent
        assert_eq!(
            even.final_statistics().numeric_summary["v"].mean,
            uneven.final_statistics().numeric_summary["v"].mean
        );
    }

    #[test]
    fn test_exact_mode_matches_raw_rows_for_any_boundaries() {
        let mut raw = OnlineVariance::new();
        ROWS.iter().for_each(|v| raw.update(*v));
        let expected = raw.std_dev().unwrap();

        for split in 1..ROWS.len() {
            let acc = merge_all(
                exact(),
                &[
                    numeric_chunk("v", &ROWS[..split]),
                    numeric_chunk("v", &ROWS[split..]),
                ],
            );
            let std = acc.numeric_column("v").unwrap().std();
            assert!(
                (std - expected).abs() < 1e-9,
                "split at {split}: {std} != {expected}"
            );
        }
    }

    #[test]
    fn test_exact_mode_hours_scenario() {
        let acc = merge_all(exact(), &hours_chunks());
        let hours = &acc.final_statistics().numeric_summary["Hours"];
        // sqrt((117 + 125) / 19)
        assert_eq!(hours.std, 3.57);
        assert_eq!(hours.mean, 12.5);
    }
}

// ============================================================================
// FINALIZATION TESTS
// ============================================================================

mod finalize_tests {
    use super::*;

    #[test]
    fn test_final_statistics_is_idempotent() {
        let mut acc = merge_all(AccumulatorConfig::default(), &hours_chunks());
        acc.add_chunk_stats(
            &ChunkStats::new(5, ["Hours"])
                .with_categorical(
                    "Role",
                    CategoricalChunkStats::new([("Nurse", 3), ("Admin", 2)], 0),
                )
                .with_date("Start", DateChunkStats::new(day(2024, 1, 1), day(2024, 1, 2), 0)),
        )
        .unwrap();

        let first = acc.final_statistics();
        let second = acc.final_statistics();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(acc.generate_report("a.csv"), acc.generate_report("a.csv"));
    }

    #[test]
    fn test_missing_pct_bounds() {
        let mut acc = ChunkStatsAccumulator::with_defaults();
        assert!(acc.final_statistics().numeric_summary.is_empty());

        acc.add_chunk_stats(
            &ChunkStats::new(0, ["x"]).with_numeric(
                "x",
                NumericChunkStats {
                    missing: 3,
                    ..Default::default()
                },
            ),
        )
        .unwrap();
        assert_eq!(acc.final_statistics().numeric_summary["x"].missing_pct, 0.0);

        acc.add_chunk_stats(
            &ChunkStats::new(2, ["x"]).with_numeric(
                "x",
                NumericChunkStats {
                    missing: 2,
                    ..Default::default()
                },
            ),
        )
        .unwrap();
        let pct = acc.final_statistics().numeric_summary["x"].missing_pct;
        assert!((0.0..=100.0).contains(&pct));
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn test_top_ten_of_fifteen_values() {
        let mut acc = ChunkStatsAccumulator::with_defaults();
        // value_i appears i times, split across two chunks
        for part in [0u64, 1] {
            let top: Vec<(String, u64)> = (1..=15u64)
                .filter(|i| i % 2 == part)
                .map(|i| (format!("value_{i:02}"), i))
                .collect();
            acc.add_chunk_stats(
                &ChunkStats::new(60, ["Site"])
                    .with_categorical("Site", CategoricalChunkStats::new(top, 0)),
            )
            .unwrap();
        }

        let site = &acc.final_statistics().categorical_summary["Site"];
        assert_eq!(site.unique_values, 15);
        assert_eq!(site.top_values.len(), 10);

        let expected: Vec<String> = (6..=15u64).rev().map(|i| format!("value_{i:02}")).collect();
        let actual: Vec<String> = site.top_values.keys().cloned().collect();
        assert_eq!(actual, expected);
        assert_eq!(site.top_values["value_15"], 15);
    }

    #[test]
    fn test_top_values_ties_keep_first_encountered_order() {
        let mut acc = ChunkStatsAccumulator::new(AccumulatorConfig {
            report_top_values: 3,
            ..Default::default()
        });
        acc.add_chunk_stats(
            &ChunkStats::new(4, ["c"])
                .with_categorical("c", CategoricalChunkStats::new([("delta", 1), ("alpha", 1)], 0)),
        )
        .unwrap();
        acc.add_chunk_stats(
            &ChunkStats::new(4, ["c"]).with_categorical(
                "c",
                CategoricalChunkStats::new([("charlie", 1), ("bravo", 1), ("echo", 2)], 0),
            ),
        )
        .unwrap();

        let top: Vec<String> = acc.final_statistics().categorical_summary["c"]
            .top_values
            .keys()
            .cloned()
            .collect();
        assert_eq!(top, vec!["echo", "delta", "alpha"]);
    }

    #[test]
    fn test_numeric_values_are_rounded() {
        let acc = merge_all(
            AccumulatorConfig::default(),
            &[ChunkStats::new(3, ["x"]).with_numeric(
                "x",
                NumericChunkStats::new(10.004, 3.33467, 1.23456, 1.111, 5.559, 0),
            )],
        );
        let x = &acc.final_statistics().numeric_summary["x"];
        assert_eq!(x.sum, 10.0);
        assert_eq!(x.mean, 3.33);
        assert_eq!(x.std, 1.23);
        assert_eq!(x.min, 1.11);
        assert_eq!(x.max, 5.56);
    }
}

// ============================================================================
// COLUMN POLICY TESTS
// ============================================================================

mod column_policy_tests {
    use super::*;

    #[test]
    fn test_lenient_counts_mismatches() {
        let acc = merge_all(
            AccumulatorConfig::default(),
            &[
                ChunkStats::new(1, ["a", "b"]),
                ChunkStats::new(1, ["a", "b"]),
                ChunkStats::new(1, ["b", "a"]),
            ],
        );
        assert_eq!(acc.column_mismatches(), 1);
        assert_eq!(acc.columns(), ["a", "b"]);
        assert_eq!(acc.total_rows(), 3);
    }

    #[test]
    fn test_strict_rejects_and_keeps_state() {
        let mut acc = ChunkStatsAccumulator::new(AccumulatorConfig {
            column_policy: ColumnPolicy::Strict,
            ..Default::default()
        });
        acc.add_chunk_stats(&ChunkStats::new(2, ["a"])).unwrap();

        let err = acc.add_chunk_stats(&ChunkStats::new(9, ["z"])).unwrap_err();
        assert_eq!(
            err,
            AccumulatorError::ColumnMismatch {
                chunk: 2,
                expected: vec!["a".to_string()],
                actual: vec!["z".to_string()],
            }
        );
        assert_eq!(acc.total_rows(), 2);

        acc.add_chunk_stats(&ChunkStats::new(3, ["a"])).unwrap();
        assert_eq!(acc.total_rows(), 5);
        assert_eq!(acc.chunks_seen(), 2);
    }
}

// ============================================================================
// REPORT TESTS
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_numeric_only_report_omits_other_sections() {
        let acc = merge_all(AccumulatorConfig::default(), &hours_chunks());
        let report = acc.generate_report("timesheet.xlsx");

        assert!(report.contains("timesheet.xlsx"));
        assert!(report.contains("## Numeric Columns"));
        assert!(report.contains("### Hours"));
        assert!(!report.contains("## Categorical Columns"));
        assert!(!report.contains("## Date Columns"));
        assert!(report.contains("## Next Steps"));
    }

    #[test]
    fn test_full_report_has_all_sections_in_order() {
        let acc = merge_all(
            AccumulatorConfig::default(),
            &[ChunkStats::new(4, ["Hours", "Role", "Start"])
                .with_numeric("Hours", NumericChunkStats::new(32.0, 8.0, 1.0, 7.0, 9.0, 0))
                .with_categorical("Role", CategoricalChunkStats::new([("Nurse", 4)], 0))
                .with_date("Start", DateChunkStats::new(day(2024, 5, 1), day(2024, 5, 4), 0))],
        );
        let report = acc.generate_report("roster.csv");

        let numeric = report.find("## Numeric Columns").unwrap();
        let categorical = report.find("## Categorical Columns").unwrap();
        let dates = report.find("## Date Columns").unwrap();
        let next = report.find("## Next Steps").unwrap();
        assert!(numeric < categorical && categorical < dates && dates < next);
        assert!(report.contains("- Range: 2024-05-01 to 2024-05-04"));
        assert!(report.contains("  - Nurse: 4"));
    }
}
