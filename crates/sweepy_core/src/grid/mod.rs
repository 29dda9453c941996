//! Grid generation.
//!
//! A list of [`ParameterSpec`]s becomes a [`ParameterGrid`]: per-parameter
//! value sequences plus the cartesian product of their index/value pairs.
//! [`Tensor`] is the matching N-dimensional storage the engine fills.

mod spec;
mod tensor;

pub(crate) use spec::checked_points;
pub use spec::{GridPoint, ParameterGrid, ParameterSpec};
pub use tensor::{GridIndices, Tensor};
