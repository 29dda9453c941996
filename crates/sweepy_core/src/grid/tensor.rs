//! Dense N-dimensional storage for sweep results.

use serde::{Deserialize, Deserializer, Serialize, de};

/// N-dimensional tensor with a flat backing array and stride-based indexing.
///
/// Values are stored in row-major order: the last dimension varies fastest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tensor<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    #[serde(skip)]
    strides: Vec<usize>,
}

impl<T: Clone> Tensor<T> {
    /// Create a tensor of the given shape, filled with `fill`.
    pub fn filled(shape: Vec<usize>, fill: T) -> Self {
        let len = shape.iter().product();
        let strides = compute_strides(&shape);
        Self {
            data: vec![fill; len],
            shape,
            strides,
        }
    }
}

impl<T> Tensor<T> {
    /// Wrap row-major data. Returns `None` when the length does not match the shape.
    pub fn from_data(shape: Vec<usize>, data: Vec<T>) -> Option<Self> {
        let len: usize = shape.iter().product();
        if data.len() != len {
            return None;
        }
        let strides = compute_strides(&shape);
        Some(Self {
            data,
            shape,
            strides,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Convert multi-dimensional indices to a flat offset
    pub fn flat_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for ((&idx, &size), &stride) in indices.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= size {
                return None;
            }
            flat += idx * stride;
        }
        Some(flat)
    }

    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        self.flat_index(indices).map(|i| &self.data[i])
    }

    /// Set the value at the given indices. Returns `false` if out of bounds.
    pub fn set(&mut self, indices: &[usize], value: T) -> bool {
        match self.flat_index(indices) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over all indices in row-major order
    pub fn indices(&self) -> GridIndices {
        GridIndices::new(self.shape.clone())
    }

    /// Iterate over (indices, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (Vec<usize>, &T)> {
        self.indices().zip(self.data.iter())
    }
}

impl Tensor<f64> {
    /// Collapse the last axis by arithmetic mean.
    ///
    /// Because the last axis is the fastest-varying one, every output cell is
    /// the mean of one contiguous run of `shape.last()` values.
    pub fn mean_last_axis(&self) -> Tensor<f64> {
        let Some((&last, outer)) = self.shape.split_last() else {
            return self.clone();
        };
        let outer = outer.to_vec();
        if last == 0 {
            return Tensor::filled(outer, f64::NAN);
        }
        let data = self
            .data
            .chunks(last)
            .map(|run| run.iter().sum::<f64>() / last as f64)
            .collect();
        Tensor {
            strides: compute_strides(&outer),
            shape: outer,
            data,
        }
    }

    /// Extract the 1-D line along `dim` with every other dimension held at `fixed`.
    pub fn slice_1d(&self, dim: usize, fixed: &[usize]) -> Option<Vec<f64>> {
        if dim >= self.ndim() || fixed.len() != self.ndim() {
            return None;
        }
        let mut indices = fixed.to_vec();
        (0..self.shape[dim])
            .map(|i| {
                indices[dim] = i;
                self.get(&indices).copied()
            })
            .collect()
    }

    /// Extract the 2-D plane spanned by `dim1` (rows) and `dim2` (columns),
    /// holding all other dimensions at `fixed`.
    ///
    /// Returns row-major values with the row and column counts.
    pub fn slice_2d(
        &self,
        dim1: usize,
        dim2: usize,
        fixed: &[usize],
    ) -> Option<(Vec<f64>, usize, usize)> {
        if dim1 >= self.ndim() || dim2 >= self.ndim() || dim1 == dim2 {
            return None;
        }
        if fixed.len() != self.ndim() {
            return None;
        }

        let rows = self.shape[dim1];
        let cols = self.shape[dim2];
        let mut plane = Vec::with_capacity(rows * cols);
        let mut indices = fixed.to_vec();
        for r in 0..rows {
            for c in 0..cols {
                indices[dim1] = r;
                indices[dim2] = c;
                plane.push(*self.get(&indices)?);
            }
        }
        Some((plane, rows, cols))
    }
}

#[derive(Deserialize)]
struct TensorRepr<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tensor<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = TensorRepr::deserialize(deserializer)?;
        Tensor::from_data(repr.shape, repr.data)
            .ok_or_else(|| de::Error::custom("tensor data length does not match its shape"))
    }
}

/// Row-major strides for `shape`
fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Iterator over every index tuple of a shape, last dimension fastest
#[derive(Debug, Clone)]
pub struct GridIndices {
    shape: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl GridIndices {
    pub fn new(shape: Vec<usize>) -> Self {
        let done = shape.iter().any(|&n| n == 0);
        Self {
            current: vec![0; shape.len()],
            shape,
            done,
        }
    }
}

impl Iterator for GridIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current.clone();

        // Odometer increment; a zero-dimensional shape yields exactly one empty index
        self.done = true;
        for i in (0..self.shape.len()).rev() {
            self.current[i] += 1;
            if self.current[i] < self.shape[i] {
                self.done = false;
                break;
            }
            self.current[i] = 0;
        }

        Some(result)
    }
}
