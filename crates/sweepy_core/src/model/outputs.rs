use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};

/// The ordered numeric outputs of one model invocation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outputs(Vec<f64>);

impl Outputs {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl From<f64> for Outputs {
    fn from(value: f64) -> Self {
        Outputs(vec![value])
    }
}

impl From<Vec<f64>> for Outputs {
    fn from(values: Vec<f64>) -> Self {
        Outputs(values)
    }
}

impl<const N: usize> From<[f64; N]> for Outputs {
    fn from(values: [f64; N]) -> Self {
        Outputs(values.to_vec())
    }
}

impl From<(f64, f64)> for Outputs {
    fn from((a, b): (f64, f64)) -> Self {
        Outputs(vec![a, b])
    }
}

impl From<(f64, f64, f64)> for Outputs {
    fn from((a, b, c): (f64, f64, f64)) -> Self {
        Outputs(vec![a, b, c])
    }
}

impl From<(f64, f64, f64, f64)> for Outputs {
    fn from((a, b, c, d): (f64, f64, f64, f64)) -> Self {
        Outputs(vec![a, b, c, d])
    }
}

/// Which of a model's positional outputs are recorded
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "SelectionRepr", into = "SelectionRepr")]
pub enum OutputSelection {
    /// The model returns exactly one value, which is recorded
    #[default]
    Only,
    /// Keep the outputs whose flag is set, in their original order
    Mask(Vec<bool>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SelectionRepr {
    Keyword(String),
    Mask(Vec<bool>),
}

impl TryFrom<SelectionRepr> for OutputSelection {
    type Error = String;

    fn try_from(repr: SelectionRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            SelectionRepr::Keyword(k) if k == "only" => Ok(OutputSelection::Only),
            SelectionRepr::Keyword(k) => Err(format!(
                "record_outputs must be 'only' or a list of booleans, got '{k}'"
            )),
            SelectionRepr::Mask(mask) => Ok(OutputSelection::Mask(mask)),
        }
    }
}

impl From<OutputSelection> for SelectionRepr {
    fn from(selection: OutputSelection) -> Self {
        match selection {
            OutputSelection::Only => SelectionRepr::Keyword("only".to_string()),
            OutputSelection::Mask(mask) => SelectionRepr::Mask(mask),
        }
    }
}

impl OutputSelection {
    pub fn mask(flags: impl IntoIterator<Item = bool>) -> Self {
        OutputSelection::Mask(flags.into_iter().collect())
    }

    /// Retain every one of `n` outputs
    pub fn all(n: usize) -> Self {
        OutputSelection::Mask(vec![true; n])
    }

    /// Number of outputs that end up recorded
    pub fn retained_count(&self) -> usize {
        match self {
            OutputSelection::Only => 1,
            OutputSelection::Mask(mask) => mask.iter().filter(|&&keep| keep).count(),
        }
    }

    /// Pick the recorded values out of a raw invocation result.
    ///
    /// The raw length must match what the selection expects: exactly one value
    /// for `Only`, one value per flag for `Mask`.
    pub fn select(&self, raw: &Outputs) -> Result<Vec<f64>> {
        match self {
            OutputSelection::Only => match raw.as_slice() {
                [value] => Ok(vec![*value]),
                other => Err(SweepError::OutputCountMismatch {
                    expected: 1,
                    actual: other.len(),
                }),
            },
            OutputSelection::Mask(mask) => {
                if raw.len() != mask.len() {
                    return Err(SweepError::OutputCountMismatch {
                        expected: mask.len(),
                        actual: raw.len(),
                    });
                }
                Ok(raw
                    .as_slice()
                    .iter()
                    .zip(mask)
                    .filter(|&(_, &keep)| keep)
                    .map(|(&value, _)| value)
                    .collect())
            }
        }
    }

    /// Resolve display names for the recorded outputs.
    ///
    /// Supplied names must match the retained count; otherwise names default to
    /// `param_0`, `param_1`, ...
    pub fn resolve_names(&self, names: Option<&[String]>) -> Result<Vec<String>> {
        let expected = self.retained_count();
        match names {
            Some(names) if names.len() != expected => Err(SweepError::OutputNameMismatch {
                expected,
                actual: names.len(),
            }),
            Some(names) => Ok(names.to_vec()),
            None => Ok((0..expected).map(|i| format!("param_{i}")).collect()),
        }
    }
}
