//! Library-level scaling pipeline tests against on-disk artifact directories

use mpiscale::error::{ArtifactError, MetricsError};
use mpiscale::locator::ArtifactPattern;
use mpiscale::metrics::Baseline;
use mpiscale::pipeline::{PipelineConfig, ScalingPipeline};
use mpiscale::report;
use std::fs;
use tempfile::TempDir;

fn artifacts(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

#[test]
fn test_reference_two_run_report() {
    let dir = artifacts(&[
        ("scaling_runtime_2proc.txt", "Runtime: 1.0 seconds\n"),
        ("scaling_runtime_4proc.txt", "Runtime: 0.3 seconds\n"),
    ]);

    let outcome = ScalingPipeline::new(PipelineConfig::new(dir.path()))
        .run()
        .unwrap();
    assert_eq!(
        report::to_text(&outcome.table),
        "   NP   Runtime(s)    Speedup Efficiency\n\
         \x20   2     1.000000      1.000      0.500\n\
         \x20   4     0.300000      3.333      0.833\n"
    );
}

#[test]
fn test_mixed_artifact_formats() {
    let dir = artifacts(&[
        ("scaling_runtime_1proc.txt", "\n\nRuntime: 8.0 seconds\n"),
        ("scaling_runtime_2proc.txt", "4.0\n"),
        ("scaling_runtime_4proc.txt", "# stencil 1024x1024\nElapsed: 2.5s\n"),
        ("scaling_runtime_8proc.txt", "Runtime: 1.6 seconds (wall)\n"),
    ]);

    let outcome = ScalingPipeline::new(PipelineConfig::new(dir.path()))
        .run()
        .unwrap();
    let speedups: Vec<f64> = outcome.table.rows().iter().map(|r| r.speedup).collect();
    let expected = [1.0, 2.0, 3.2, 5.0];
    for (actual, expected) in speedups.iter().zip(expected) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_malformed_filename_does_not_abort_scan() {
    let dir = artifacts(&[
        ("scaling_runtime_abcproc.txt", "Runtime: 0.1 seconds\n"),
        ("scaling_runtime_2proc.txt", "Runtime: 1.0 seconds\n"),
        ("scaling_runtime_4proc.txt", "Runtime: 0.6 seconds\n"),
    ]);

    let outcome = ScalingPipeline::new(PipelineConfig::new(dir.path()))
        .run()
        .unwrap();
    assert_eq!(outcome.table.len(), 2);
    assert_eq!(outcome.skipped.len(), 1);
    match &outcome.skipped[0] {
        ArtifactError::MalformedFilename { path, .. } => {
            assert!(path.ends_with("scaling_runtime_abcproc.txt"))
        }
        other => panic!("unexpected skip reason: {}", other),
    }
}

#[test]
fn test_zero_runtime_file_dropped() {
    let dir = artifacts(&[
        ("scaling_runtime_2proc.txt", "Runtime: 1.0 seconds\n"),
        ("scaling_runtime_4proc.txt", "Runtime: 0.000000 seconds\n"),
    ]);

    let outcome = ScalingPipeline::new(PipelineConfig::new(dir.path()))
        .run()
        .unwrap();
    assert_eq!(outcome.table.len(), 1);
    assert!(matches!(
        outcome.skipped[0],
        ArtifactError::NoRuntime { .. }
    ));
}

#[test]
fn test_empty_directory_reports_no_artifacts() {
    let dir = TempDir::new().unwrap();
    let err = ScalingPipeline::new(PipelineConfig::new(dir.path()))
        .run()
        .unwrap_err();
    assert!(matches!(err, MetricsError::NoArtifacts { .. }));
}

#[test]
fn test_baseline_policies_disagree_when_two_missing() {
    let files = [
        ("scaling_runtime_1proc.txt", "Runtime: 3.0 seconds\n"),
        ("scaling_runtime_4proc.txt", "Runtime: 1.0 seconds\n"),
    ];
    let dir = artifacts(&files);

    let smallest = ScalingPipeline::new(PipelineConfig::new(dir.path()))
        .run()
        .unwrap();
    assert_eq!(smallest.table.baseline_process_count(), 1);

    let fixed = ScalingPipeline::new(
        PipelineConfig::new(dir.path()).with_baseline(Baseline::Fixed(2)),
    )
    .run();
    assert!(matches!(
        fixed,
        Err(MetricsError::MissingBaseline {
            process_count: 2,
            ..
        })
    ));
}

#[test]
fn test_custom_pattern() {
    let dir = artifacts(&[
        ("jacobi-np2.log", "time: 10.0\n"),
        ("jacobi-np16.log", "time: 1.0\n"),
        ("scaling_runtime_2proc.txt", "Runtime: 99.0 seconds\n"),
    ]);

    let config = PipelineConfig::new(dir.path()).with_pattern(ArtifactPattern::new("jacobi-np", ".log"));
    let outcome = ScalingPipeline::new(config).run().unwrap();
    let row = outcome.table.row(16).unwrap();
    assert!((row.speedup - 10.0).abs() < 1e-9);
    assert!((row.efficiency - 0.625).abs() < 1e-9);
    assert_eq!(outcome.table.len(), 2);
}
