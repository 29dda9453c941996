//! Tests for persisted sweeps
//!
//! These tests verify that:
//! - A missing location fails before any model invocation unless creation is allowed
//! - The run report, data archive and per-output areas are written
//! - Renderings land in the output areas under the expected names
//! - The archive reloads to the same tensors
//! - Output names that cannot map to their own area are rejected before running

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::tempdir;

use super::{RecordingRenderer, Rendered};
use crate::dispatch::{ARCHIVE_FILE, REPORT_FILE, RenderTarget, load_archive};
use crate::error::SweepError;
use crate::grid::ParameterSpec;
use crate::model::{Bindings, FunctionModel, OutputSelection};
use crate::sweep::{Destination, Sweep, SweepConfig};
use crate::{Delivery, Dispatcher, run_sweep};

#[test]
fn test_missing_location_fails_before_running() {
    let dir = tempdir().unwrap();
    let location = dir.path().join("results");
    let calls = AtomicUsize::new(0);
    let model = FunctionModel::new("counted", |p: &Bindings| {
        calls.fetch_add(1, Ordering::Relaxed);
        p.get("x")
    });
    let config = SweepConfig::new(vec![ParameterSpec::new("x", 0.0, 1.0, 4)])
        .destination(Destination::persist(&location));

    let result = run_sweep(&model, &config, None);

    assert!(matches!(result, Err(SweepError::LocationMissing(path)) if path == location));
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    assert!(!location.exists());
}

#[test]
fn test_persisted_layout_for_line_plots() {
    let dir = tempdir().unwrap();
    let location = dir.path().join("results");
    let model = FunctionModel::new("square", |p: &Bindings| Ok(p.get("x")?.powi(2)));
    let config = SweepConfig::new(vec![ParameterSpec::new("x", 0.0, 5.0, 10)])
        .names(["y"])
        .destination(
            Destination::persist(&location)
                .create_if_missing(true)
                .file_type("svg"),
        );
    let mut renderer = RecordingRenderer::default();

    let delivery = run_sweep(&model, &config, Some(&mut renderer)).unwrap();

    assert!(matches!(&delivery, Delivery::Persisted(path) if *path == location));

    let report = fs::read_to_string(location.join(REPORT_FILE)).unwrap();
    assert!(report.contains("Using model square"));
    assert!(report.contains("x from 0 to 5 in 10 steps"));
    assert!(report.contains("Began at "));
    assert!(report.contains("Ended at "));

    let plot = location.join("y").join("x.svg");
    assert!(plot.is_file());
    assert_eq!(renderer.calls.len(), 1);
    assert_eq!(renderer.calls[0].target(), &RenderTarget::File(plot));
}

#[test]
fn test_persisted_slices_are_named_by_third_parameter() {
    let dir = tempdir().unwrap();
    let model = FunctionModel::new("moments", |p: &Bindings| {
        let (x, y, z) = (p.get("x")?, p.get("y")?, p.get("z")?);
        Ok((x + y + z, x * y * z))
    });
    let config = SweepConfig::new(vec![
        ParameterSpec::new("x", 0.0, 1.0, 3),
        ParameterSpec::new("y", 0.0, 1.0, 2),
        ParameterSpec::new("z", 0.0, 1.0, 3),
    ])
    .outputs(OutputSelection::all(2))
    .names(["sum", "prod"])
    .destination(Destination::persist(dir.path()));
    let mut renderer = RecordingRenderer::default();

    run_sweep(&model, &config, Some(&mut renderer)).unwrap();

    for output in ["sum", "prod"] {
        for file in ["z_0.txt", "z_0.5.txt", "z_1.txt"] {
            let path = dir.path().join(output).join(file);
            assert!(path.is_file(), "missing {}", path.display());
        }
    }
    assert_eq!(renderer.calls.len(), 6);
    assert!(
        renderer
            .calls
            .iter()
            .all(|call| matches!(call, Rendered::Heatmap { shape: (3, 2), .. }))
    );
}

#[test]
fn test_archive_reloads_tensors() {
    let dir = tempdir().unwrap();
    let model = FunctionModel::new("g", |p: &Bindings| Ok(p.get("x")? + 2.0 * p.get("y")?));
    let config = SweepConfig::new(vec![
        ParameterSpec::new("x", 0.0, 1.0, 2),
        ParameterSpec::new("y", 0.0, 1.0, 3),
    ])
    .fixed("unused", 7.5)
    .reps(2);

    let outcome = Sweep::new(&config).run(&model).unwrap();
    let expected = outcome.tensors.clone();

    let destination = Destination::persist(dir.path());
    let mut dispatcher = Dispatcher::new();
    dispatcher.prepare(&destination).unwrap();
    dispatcher.deliver(outcome, &destination).unwrap();

    assert!(dir.path().join(ARCHIVE_FILE).is_file());
    assert!(dir.path().join("param_0").is_dir());

    let archive = load_archive(dir.path()).unwrap();
    assert_eq!(archive.model, "g");
    assert_eq!(archive.reps, 2);
    assert_eq!(archive.parameters, config.parameters);
    assert_eq!(archive.fixed.get("unused"), Some(&7.5));
    assert_eq!(archive.tensors, expected);
    assert_eq!(archive.tensor("param_0").unwrap().get(&[1, 2]), Some(3.0));
}

#[test]
fn test_suppressed_sweep_still_persists_data() {
    let dir = tempdir().unwrap();
    let model = FunctionModel::new("one", |_: &Bindings| Ok(1.0));
    let config = SweepConfig::new(
        ["a", "b", "c", "d"]
            .iter()
            .map(|name| ParameterSpec::new(*name, 0.0, 1.0, 2))
            .collect(),
    )
    .destination(Destination::persist(dir.path()));
    let mut renderer = RecordingRenderer::default();

    run_sweep(&model, &config, Some(&mut renderer)).unwrap();

    assert!(renderer.calls.is_empty());
    let archive = load_archive(dir.path()).unwrap();
    assert_eq!(archive.tensors[0].shape(), &[2, 2, 2, 2]);
    assert!(dir.path().join(REPORT_FILE).is_file());
}

#[test]
fn test_load_archive_from_empty_location_fails() {
    let dir = tempdir().unwrap();
    assert!(matches!(load_archive(dir.path()), Err(SweepError::Io(_))));
}

#[test]
fn test_output_names_that_escape_their_area_are_rejected() {
    let calls = AtomicUsize::new(0);
    let model = FunctionModel::new("pair", |p: &Bindings| {
        calls.fetch_add(1, Ordering::Relaxed);
        let x = p.get("x")?;
        Ok((x, 2.0 * x))
    });

    for names in [
        ["..", "b"],
        [".", "b"],
        ["", "b"],
        ["A", "A"],
        ["A/B", "A_B"],
        ["data.json", "b"],
        ["README.txt", "b"],
    ] {
        let dir = tempdir().unwrap();
        let location = dir.path().join("results");
        let config = SweepConfig::new(vec![ParameterSpec::new("x", 0.0, 1.0, 3)])
            .outputs(OutputSelection::all(2))
            .names(names)
            .destination(Destination::persist(&location).create_if_missing(true));
        let mut renderer = RecordingRenderer::default();

        let result = run_sweep(&model, &config, Some(&mut renderer));

        assert!(
            matches!(result, Err(SweepError::InvalidOutputName(_))),
            "{names:?}: {result:?}"
        );
        assert!(renderer.calls.is_empty());
        assert!(!location.join(REPORT_FILE).exists());
        assert!(!dir.path().join("x.txt").exists());
    }
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}
