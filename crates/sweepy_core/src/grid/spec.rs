//! Parameter specs and the cartesian grid they span.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};

/// One swept parameter: `count` evenly spaced values over `[low, high]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpecRepr")]
pub struct ParameterSpec {
    pub name: String,
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

/// Accepts both `[name, low, high, count]` and the mapping form
#[derive(Deserialize)]
#[serde(untagged)]
enum SpecRepr {
    Tuple(String, f64, f64, usize),
    Named {
        name: String,
        low: f64,
        high: f64,
        count: usize,
    },
}

impl From<SpecRepr> for ParameterSpec {
    fn from(repr: SpecRepr) -> Self {
        match repr {
            SpecRepr::Tuple(name, low, high, count)
            | SpecRepr::Named {
                name,
                low,
                high,
                count,
            } => ParameterSpec {
                name,
                low,
                high,
                count,
            },
        }
    }
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, low: f64, high: f64, count: usize) -> Self {
        Self {
            name: name.into(),
            low,
            high,
            count,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.count < 1 {
            return Err(SweepError::InvalidSpec(format!(
                "'{}' must have at least one value, got {}",
                self.name, self.count
            )));
        }
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(SweepError::InvalidSpec(format!(
                "'{}' has non-finite bounds [{}, {}]",
                self.name, self.low, self.high
            )));
        }
        if self.low > self.high {
            return Err(SweepError::InvalidSpec(format!(
                "'{}' has low {} above high {}",
                self.name, self.low, self.high
            )));
        }
        Ok(())
    }

    /// Evenly spaced values over `[low, high]`, both endpoints included.
    ///
    /// A single-point spec yields `[low]`.
    pub fn values(&self) -> Vec<f64> {
        if self.count <= 1 {
            return vec![self.low; self.count];
        }
        let last = self.count - 1;
        let span = self.high - self.low;
        (0..self.count)
            .map(|i| {
                if i == last {
                    self.high
                } else {
                    self.low + span * (i as f64 / last as f64)
                }
            })
            .collect()
    }
}

/// Product of the counts, `None` on overflow
pub(crate) fn checked_points(specs: &[ParameterSpec]) -> Option<usize> {
    specs
        .iter()
        .try_fold(1usize, |total, spec| total.checked_mul(spec.count))
}

/// A single point of the grid: per-dimension indices and the matching values
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

/// The materialised cartesian product of a list of parameter specs.
///
/// Enumeration is row-major over declaration order: the first parameter
/// varies slowest, the last fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    specs: Vec<ParameterSpec>,
    values: Vec<Vec<f64>>,
    shape: Vec<usize>,
}

impl ParameterGrid {
    pub fn new(specs: &[ParameterSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(SweepError::InvalidSpec(
                "at least one sweep parameter required".to_string(),
            ));
        }

        let mut seen = FxHashSet::default();
        for spec in specs {
            spec.validate()?;
            if !seen.insert(spec.name.as_str()) {
                return Err(SweepError::InvalidSpec(format!(
                    "parameter '{}' is declared more than once",
                    spec.name
                )));
            }
        }
        if checked_points(specs).is_none() {
            return Err(SweepError::InvalidSpec(
                "number of grid points overflows usize".to_string(),
            ));
        }

        Ok(Self {
            values: specs.iter().map(ParameterSpec::values).collect(),
            shape: specs.iter().map(|s| s.count).collect(),
            specs: specs.to_vec(),
        })
    }

    pub fn specs(&self) -> &[ParameterSpec] {
        &self.specs
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Points in one pass. Cannot overflow: construction rejects such grids.
    pub fn total_points(&self) -> usize {
        self.shape.iter().product()
    }

    /// Values along dimension `dim`
    pub fn values(&self, dim: usize) -> &[f64] {
        &self.values[dim]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.name.as_str())
    }

    pub fn name(&self, dim: usize) -> &str {
        &self.specs[dim].name
    }

    /// The point at flat row-major offset `flat`
    pub fn point(&self, flat: usize) -> Option<GridPoint> {
        if flat >= self.total_points() {
            return None;
        }
        let mut indices = vec![0; self.ndim()];
        let mut remaining = flat;
        for dim in (0..self.ndim()).rev() {
            indices[dim] = remaining % self.shape[dim];
            remaining /= self.shape[dim];
        }
        Some(self.point_at(indices))
    }

    /// Every point in enumeration order
    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        super::GridIndices::new(self.shape.clone()).map(|indices| self.point_at(indices))
    }

    fn point_at(&self, indices: Vec<usize>) -> GridPoint {
        let values = indices
            .iter()
            .zip(&self.values)
            .map(|(&i, axis)| axis[i])
            .collect();
        GridPoint { indices, values }
    }
}
