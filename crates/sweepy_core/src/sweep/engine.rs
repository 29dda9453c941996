//! Sweep execution engine.
//!
//! A sweep walks `reps` full passes over the parameter grid, invoking the
//! model once per (pass, point) and writing every recorded output into its own
//! tensor at `[point indices..., pass]`. The pass axis is then collapsed by
//! arithmetic mean.

use std::fmt;

use jiff::Timestamp;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{SweepConfig, SweepProgress};
use crate::dispatch::{ARCHIVE_FILE, REPORT_FILE, VisualPlan, sanitize_filename};
use crate::error::{Result, SweepError};
use crate::grid::{ParameterGrid, ParameterSpec, Tensor};
use crate::model::{Bindings, FixedParameters, Model};

/// Lifecycle of a [`Sweep`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepPhase {
    Idle,
    Validating,
    Accumulating,
    Reducing,
    Done,
    /// A validation or model error aborted the run; no tensors were produced
    Failed,
}

impl fmt::Display for SweepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SweepPhase::Idle => "idle",
            SweepPhase::Validating => "validating",
            SweepPhase::Accumulating => "accumulating",
            SweepPhase::Reducing => "reducing",
            SweepPhase::Done => "done",
            SweepPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The result for one recorded output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTensor {
    pub name: String,
    /// Mean over passes, shaped like the parameter grid
    pub values: Tensor<f64>,
    /// Every pass, shaped like the grid plus a trailing pass axis
    pub samples: Tensor<f64>,
}

impl ResultTensor {
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    pub fn get(&self, indices: &[usize]) -> Option<f64> {
        self.values.get(indices).copied()
    }
}

/// Everything a finished sweep hands to the output dispatcher
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub model: String,
    pub grid: ParameterGrid,
    pub fixed: FixedParameters,
    pub reps: usize,
    pub tensors: Vec<ResultTensor>,
    pub visuals: VisualPlan,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

impl SweepOutcome {
    /// The tensor recorded under `name`
    pub fn tensor(&self, name: &str) -> Option<&ResultTensor> {
        self.tensors.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tensors.iter().map(|t| t.name.as_str())
    }

    pub fn specs(&self) -> &[ParameterSpec] {
        self.grid.specs()
    }
}

/// Output of the validating phase
struct Plan {
    grid: ParameterGrid,
    names: Vec<String>,
    visuals: VisualPlan,
    invocations: usize,
}

/// Drives one sweep through validation, accumulation and reduction
pub struct Sweep<'a> {
    config: &'a SweepConfig,
    progress: Option<&'a SweepProgress>,
    phase: SweepPhase,
}

impl<'a> Sweep<'a> {
    pub fn new(config: &'a SweepConfig) -> Self {
        Self {
            config,
            progress: None,
            phase: SweepPhase::Idle,
        }
    }

    /// Report completed invocations to `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: &'a SweepProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    /// Run every invocation on the current thread, in grid order.
    pub fn run<M: Model + ?Sized>(&mut self, model: &M) -> Result<SweepOutcome> {
        let result = self.execute(model, |sweep, plan| sweep.accumulate(model, plan));
        self.settle(result)
    }

    /// Run invocations on the rayon pool.
    ///
    /// Every (pass, point) cell is written exactly once, so the result matches
    /// [`Sweep::run`] for any model whose outputs do not depend on call order.
    #[cfg(feature = "parallel")]
    pub fn run_parallel<M: Model + Sync + ?Sized>(&mut self, model: &M) -> Result<SweepOutcome> {
        let result = self.execute(model, |sweep, plan| {
            sweep.accumulate_parallel(model, plan)
        });
        self.settle(result)
    }

    fn settle(&mut self, result: Result<SweepOutcome>) -> Result<SweepOutcome> {
        self.phase = match result {
            Ok(_) => SweepPhase::Done,
            Err(_) => SweepPhase::Failed,
        };
        result
    }

    fn execute<M, F>(&mut self, model: &M, accumulate: F) -> Result<SweepOutcome>
    where
        M: Model + ?Sized,
        F: FnOnce(&mut Self, &Plan) -> Result<Vec<Tensor<f64>>>,
    {
        let started_at = Timestamp::now();

        self.phase = SweepPhase::Validating;
        let plan = self.validate(model)?;
        info!(
            model = model.name(),
            shape = ?plan.grid.shape(),
            reps = self.config.reps,
            outputs = plan.names.len(),
            "starting parameter sweep"
        );

        self.phase = SweepPhase::Accumulating;
        if let Some(p) = self.progress {
            p.reset(plan.invocations);
        }
        let samples = accumulate(self, &plan)?;

        self.phase = SweepPhase::Reducing;
        let tensors = plan
            .names
            .into_iter()
            .zip(samples)
            .map(|(name, samples)| ResultTensor {
                name,
                values: samples.mean_last_axis(),
                samples,
            })
            .collect();

        let finished_at = Timestamp::now();
        info!(
            model = model.name(),
            elapsed = ?finished_at.duration_since(started_at),
            "parameter sweep finished"
        );

        Ok(SweepOutcome {
            model: model.name().to_string(),
            grid: plan.grid,
            fixed: self.config.fixed.clone(),
            reps: self.config.reps,
            tensors,
            visuals: plan.visuals,
            started_at,
            finished_at,
        })
    }

    fn validate<M: Model + ?Sized>(&self, model: &M) -> Result<Plan> {
        let config = self.config;
        if config.reps < 1 {
            return Err(SweepError::InvalidSpec(format!(
                "reps must be at least 1, got {}",
                config.reps
            )));
        }

        let grid = ParameterGrid::new(&config.parameters)?;
        let invocations = grid.total_points().checked_mul(config.reps).ok_or_else(|| {
            SweepError::InvalidSpec(format!(
                "{} points x {} reps overflows the invocation count",
                grid.total_points(),
                config.reps
            ))
        })?;
        if let Some(name) = grid.names().find(|name| config.fixed.contains_key(*name)) {
            return Err(SweepError::ParameterCollision(name.to_string()));
        }

        let names = match &config.output_names {
            Some(names) => config.outputs.resolve_names(Some(names.as_slice()))?,
            None => {
                let defaults = model
                    .default_output_names()
                    .filter(|names| names.len() == config.outputs.retained_count());
                config.outputs.resolve_names(defaults.as_deref())?
            }
        };

        check_output_names(&names)?;

        let visuals = VisualPlan::for_grid(&grid);
        if let VisualPlan::Suppressed { reason } = &visuals {
            info!("graphical output suppressed: {reason}");
        }

        Ok(Plan {
            grid,
            names,
            visuals,
            invocations,
        })
    }

    fn accumulate<M: Model + ?Sized>(&self, model: &M, plan: &Plan) -> Result<Vec<Tensor<f64>>> {
        let reps = self.config.reps;
        let mut samples = sample_tensors(plan, reps);

        for rep in 0..reps {
            debug!(rep, of = reps, "repetition pass");
            for point in plan.grid.points() {
                let recorded = self.evaluate(model, &plan.grid, &point.values)?;
                let mut cell = point.indices;
                cell.push(rep);
                for (tensor, value) in samples.iter_mut().zip(recorded) {
                    tensor.set(&cell, value);
                }
                if let Some(p) = self.progress {
                    p.increment();
                }
            }
            if let Some(p) = self.progress {
                p.add_passes(1);
            }
        }

        Ok(samples)
    }

    #[cfg(feature = "parallel")]
    fn accumulate_parallel<M: Model + Sync + ?Sized>(
        &self,
        model: &M,
        plan: &Plan,
    ) -> Result<Vec<Tensor<f64>>> {
        let reps = self.config.reps;
        let points: Vec<_> = plan.grid.points().collect();
        let jobs: Vec<_> = (0..reps)
            .flat_map(|rep| points.iter().map(move |point| (rep, point)))
            .collect();

        let results = jobs
            .par_iter()
            .map(|(_, point)| {
                let recorded = self.evaluate(model, &plan.grid, &point.values);
                if let Some(p) = self.progress {
                    p.increment();
                }
                recorded
            })
            .collect::<Result<Vec<_>>>()?;
        if let Some(p) = self.progress {
            p.add_passes(reps);
        }

        let mut samples = sample_tensors(plan, reps);
        for ((rep, point), recorded) in jobs.iter().zip(results) {
            let mut cell = point.indices.clone();
            cell.push(*rep);
            for (tensor, value) in samples.iter_mut().zip(recorded) {
                tensor.set(&cell, value);
            }
        }
        debug!(jobs = jobs.len(), "parallel accumulation complete");

        Ok(samples)
    }

    /// Invoke the model at one grid point and keep the recorded outputs
    fn evaluate<M: Model + ?Sized>(
        &self,
        model: &M,
        grid: &ParameterGrid,
        values: &[f64],
    ) -> Result<Vec<f64>> {
        let bindings = Bindings::merge(grid.names(), values, &self.config.fixed);
        let raw = model.invoke(&bindings)?;
        self.config.outputs.select(&raw)
    }
}

/// Output names become directories under a persist location: each must map to
/// its own entry there, distinct from the report and the archive.
fn check_output_names(names: &[String]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for name in names {
        let entry = sanitize_filename(name);
        let reserved = matches!(entry.as_str(), "" | "." | "..")
            || entry == REPORT_FILE
            || entry == ARCHIVE_FILE;
        if reserved || !seen.insert(entry) {
            return Err(SweepError::InvalidOutputName(name.clone()));
        }
    }
    Ok(())
}

/// One empty accumulation tensor per recorded output, shaped grid + [reps]
fn sample_tensors(plan: &Plan, reps: usize) -> Vec<Tensor<f64>> {
    let mut shape = plan.grid.shape().to_vec();
    shape.push(reps);
    plan.names
        .iter()
        .map(|_| Tensor::filled(shape.clone(), f64::NAN))
        .collect()
}
