use std::fmt;

use super::{Bindings, Model, Outputs};
use crate::error::Result;

/// A model defined as a single function of its named parameters.
///
/// The function may return a single `f64` or any several-valued type that
/// converts into [`Outputs`]; either way it is passed through positionally.
pub struct FunctionModel<F> {
    name: String,
    func: F,
}

impl<F, O> FunctionModel<F>
where
    F: Fn(&Bindings) -> Result<O>,
    O: Into<Outputs>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F, O> Model for FunctionModel<F>
where
    F: Fn(&Bindings) -> Result<O>,
    O: Into<Outputs>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, bindings: &Bindings) -> Result<Outputs> {
        (self.func)(bindings).map(Into::into)
    }
}

impl<F> fmt::Debug for FunctionModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionModel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;
    use crate::model::FixedParameters;

    #[test]
    fn test_scalar_is_wrapped() {
        let model = FunctionModel::new("square", |p: &Bindings| Ok(p.get("x")?.powi(2)));
        let bindings = Bindings::merge(["x"], &[3.0], &FixedParameters::new());
        assert_eq!(model.invoke(&bindings).unwrap().as_slice(), &[9.0]);
        assert_eq!(model.name(), "square");
    }

    #[test]
    fn test_tuple_passes_through() {
        let model = FunctionModel::new("pair", |p: &Bindings| {
            let x = p.get("x")?;
            Ok((x, -x))
        });
        let bindings = Bindings::merge(["x"], &[2.0], &FixedParameters::new());
        assert_eq!(model.invoke(&bindings).unwrap().as_slice(), &[2.0, -2.0]);
    }

    #[test]
    fn test_model_errors_propagate() {
        let model = FunctionModel::new("fails", |_: &Bindings| -> Result<f64> {
            Err(SweepError::model("diverged"))
        });
        let err = model.invoke(&Bindings::default()).unwrap_err();
        assert!(matches!(err, SweepError::Model(_)));
        assert_eq!(err.to_string(), "diverged");
    }
}
