use std::collections::BTreeMap;

use crate::error::{Result, SweepError};

/// Constant parameters passed to every invocation, in name order
pub type FixedParameters = BTreeMap<String, f64>;

/// The named arguments for one model invocation.
///
/// Swept parameters come first in declaration order, followed by the fixed
/// parameters in name order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bindings {
    entries: Vec<(String, f64)>,
}

impl Bindings {
    /// Bind one grid point's values to their names and append the fixed parameters.
    ///
    /// Name collisions between `swept` and `fixed` are rejected earlier, when the
    /// sweep configuration is validated.
    pub fn merge<'a>(
        names: impl IntoIterator<Item = &'a str>,
        values: &[f64],
        fixed: &FixedParameters,
    ) -> Self {
        let mut entries = Vec::with_capacity(values.len() + fixed.len());
        entries.extend(
            names
                .into_iter()
                .zip(values)
                .map(|(name, &value)| (name.to_string(), value)),
        );
        entries.extend(fixed.iter().map(|(name, &value)| (name.clone(), value)));
        Self { entries }
    }

    /// Look up a bound value by name
    pub fn get(&self, name: &str) -> Result<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
            .ok_or_else(|| SweepError::UnboundParameter(name.to_string()))
    }

    /// Like [`Bindings::get`] but falls back to `default` when unbound
    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}
