//! Tests for object models
//!
//! These tests verify that:
//! - A fresh instance is constructed for every invocation
//! - Each cell of a repeated sweep is the mean of independent runs
//! - Declared attribute names label the recorded outputs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand_distr::{Distribution, Normal};

use crate::error::{Result, SweepError};
use crate::grid::ParameterSpec;
use crate::model::{Bindings, ObjectModel, Observable, OutputSelection, RunStep};
use crate::sweep::{Sweep, SweepConfig};

/// Decay with additive measurement noise
struct NoisyDecay {
    x: f64,
    lam: f64,
    noise: Option<Normal<f64>>,
    a: Option<f64>,
}

impl NoisyDecay {
    fn expected(x: f64, lam: f64) -> f64 {
        x * (-lam).exp()
    }
}

impl Observable for NoisyDecay {
    fn get_output(&self, name: &str) -> Option<f64> {
        match name {
            "A" => self.a,
            "lam" => Some(self.lam),
            _ => None,
        }
    }
}

impl RunStep for NoisyDecay {
    fn run(&mut self) -> Result<()> {
        let jitter = self.noise.map_or(0.0, |n| n.sample(&mut rand::rng()));
        self.a = Some(Self::expected(self.x, self.lam) + jitter);
        Ok(())
    }
}

fn noisy_decay(std_dev: f64) -> ObjectModel<NoisyDecay> {
    let noise = Normal::new(0.0, std_dev).unwrap();
    ObjectModel::runnable(
        "noisy_decay",
        move |p: &Bindings| {
            Ok(NoisyDecay {
                x: p.get("x")?,
                lam: p.get("lam")?,
                noise: Some(noise),
                a: None,
            })
        },
        &["A"],
    )
}

fn grid_3x3() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::new("x", 1.0, 3.0, 3),
        ParameterSpec::new("lam", 0.0, 1.0, 3),
    ]
}

#[test]
fn test_repeated_object_sweep_averages_runs() {
    let config = SweepConfig::new(grid_3x3()).reps(5);
    let outcome = Sweep::new(&config).run(&noisy_decay(0.05)).unwrap();

    let tensor = outcome.tensor("A").unwrap();
    assert_eq!(tensor.shape(), &[3, 3]);
    assert_eq!(tensor.samples.shape(), &[3, 3, 5]);

    for (indices, &mean) in tensor.values.iter() {
        let x = outcome.grid.values(0)[indices[0]];
        let lam = outcome.grid.values(1)[indices[1]];

        let mut runs = indices.clone();
        runs.push(0);
        let samples: Vec<f64> = (0..5)
            .map(|r| {
                runs[2] = r;
                *tensor.samples.get(&runs).unwrap()
            })
            .collect();
        let sample_mean = samples.iter().sum::<f64>() / 5.0;

        assert!((mean - sample_mean).abs() < 1e-12);
        assert!(
            (mean - NoisyDecay::expected(x, lam)).abs() < 0.5,
            "x={x} lam={lam}: {mean}"
        );
        // Independent runs, not one run copied five times
        assert!(samples.iter().any(|&s| s != samples[0]));
    }
}

#[test]
fn test_instance_constructed_per_invocation() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructed);
    let model = ObjectModel::new(
        "counted",
        move |p: &Bindings| {
            counter.fetch_add(1, Ordering::Relaxed);
            Ok(NoisyDecay {
                x: p.get("x")?,
                lam: p.get("lam")?,
                noise: None,
                a: Some(0.0),
            })
        },
        &["A"],
    );
    let config = SweepConfig::new(grid_3x3()).reps(2);
    Sweep::new(&config).run(&model).unwrap();
    assert_eq!(constructed.load(Ordering::Relaxed), 18);
}

#[test]
fn test_attribute_names_label_outputs() {
    let model = ObjectModel::runnable(
        "decay_pair",
        |p: &Bindings| {
            Ok(NoisyDecay {
                x: p.get("x")?,
                lam: p.get("lam")?,
                noise: None,
                a: None,
            })
        },
        &["A", "lam"],
    );
    let config = SweepConfig::new(grid_3x3()).outputs(OutputSelection::all(2));

    let outcome = Sweep::new(&config).run(&model).unwrap();
    assert_eq!(outcome.names().collect::<Vec<_>>(), vec!["A", "lam"]);
    assert_eq!(outcome.tensor("lam").unwrap().get(&[0, 2]), Some(1.0));
    assert_eq!(outcome.tensor("A").unwrap().get(&[0, 0]), Some(1.0));
}

#[test]
fn test_missing_attribute_aborts_sweep() {
    let model = ObjectModel::new(
        "no_run",
        |p: &Bindings| {
            Ok(NoisyDecay {
                x: p.get("x")?,
                lam: p.get("lam")?,
                noise: None,
                a: None,
            })
        },
        &["A"],
    );
    let config = SweepConfig::new(grid_3x3());

    assert!(matches!(
        Sweep::new(&config).run(&model),
        Err(SweepError::AttributeMissing(name)) if name == "A"
    ));
}
