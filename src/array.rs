//! Strided n-dimensional numeric arrays.
//!
//! An [`NdArray`] is a view over shared, flat [`ArrayData`] storage. The
//! view carries its own shape, strides (counted in elements) and starting
//! offset, so transposes and other axis permutations never copy data.
//!
//! ## Examples
//!
//! ```rust
//! use objson::{to_string, NdArray, Value};
//!
//! let grid = NdArray::from_rows(vec![vec![1i64, 2, 3], vec![4, 5, 6]]).unwrap();
//! assert_eq!(grid.shape(), &[2, 3]);
//! assert_eq!(to_string(&Value::from(grid.transpose())).unwrap(), "[[1,4],[2,5],[3,6]]");
//! ```

use crate::value::{Datetime64, Numeric};
use crate::{DateUnit, Error, Result, Value};
use std::sync::Arc;

/// Flat element storage in row-major order.
#[derive(Clone, Debug)]
pub enum ArrayData {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    UInt(Vec<u64>),
    Float(Vec<f64>),
    /// Epoch counts in the given unit; [`crate::NAT`] marks missing values.
    Datetime(Vec<i64>, DateUnit),
    /// Nanosecond durations.
    Timedelta(Vec<i64>),
    /// Arbitrary host values.
    Object(Vec<Value>),
}

/// Element type of an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DType {
    Bool,
    Int,
    UInt,
    Float,
    Datetime(DateUnit),
    Timedelta,
    Object,
}

impl ArrayData {
    /// Number of stored elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Bool(v) => v.len(),
            ArrayData::Int(v) => v.len(),
            ArrayData::UInt(v) => v.len(),
            ArrayData::Float(v) => v.len(),
            ArrayData::Datetime(v, _) => v.len(),
            ArrayData::Timedelta(v) => v.len(),
            ArrayData::Object(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn dtype(&self) -> DType {
        match self {
            ArrayData::Bool(_) => DType::Bool,
            ArrayData::Int(_) => DType::Int,
            ArrayData::UInt(_) => DType::UInt,
            ArrayData::Float(_) => DType::Float,
            ArrayData::Datetime(_, unit) => DType::Datetime(*unit),
            ArrayData::Timedelta(_) => DType::Timedelta,
            ArrayData::Object(_) => DType::Object,
        }
    }

    /// Materializes the element at a flat position as a host value.
    fn get(&self, pos: usize) -> Option<Value> {
        let value = match self {
            ArrayData::Bool(v) => Value::Numeric(Numeric::Bool(*v.get(pos)?)),
            ArrayData::Int(v) => Value::Numeric(Numeric::Int(*v.get(pos)?)),
            ArrayData::UInt(v) => Value::Numeric(Numeric::UInt(*v.get(pos)?)),
            ArrayData::Float(v) => Value::Numeric(Numeric::Float(*v.get(pos)?)),
            ArrayData::Datetime(v, unit) => {
                Value::Datetime64(Datetime64::new(*v.get(pos)?, *unit))
            }
            ArrayData::Timedelta(v) => Value::Timedelta64(*v.get(pos)?),
            ArrayData::Object(v) => v.get(pos)?.clone(),
        };
        Some(value)
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for ArrayData {
                fn from(values: Vec<$ty>) -> Self {
                    ArrayData::$variant(values)
                }
            }
        )*
    };
}

impl_from_vec! {
    bool => Bool,
    i64 => Int,
    u64 => UInt,
    f64 => Float,
    Value => Object,
}

/// A strided view over shared array storage.
///
/// # Examples
///
/// ```rust
/// use objson::{ArrayData, NdArray};
///
/// let cube = NdArray::new(ArrayData::Int((0..8).collect()), vec![2, 2, 2]).unwrap();
/// assert_eq!(cube.ndim(), 3);
/// assert_eq!(cube.size(), 8);
/// assert!(NdArray::new(ArrayData::Int(vec![1, 2, 3]), vec![2, 2]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct NdArray {
    data: Arc<ArrayData>,
    shape: Vec<usize>,
    strides: Vec<isize>,
    offset: usize,
}

impl NdArray {
    /// Creates a C-ordered view of `data` with the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] when the shape does not account for every element.
    pub fn new(data: ArrayData, shape: Vec<usize>) -> Result<Self> {
        let size: usize = shape.iter().product();
        if size != data.len() {
            return Err(Error::shape(&format!(
                "shape {:?} needs {} elements, storage has {}",
                shape,
                size,
                data.len()
            )));
        }
        let mut strides = vec![0isize; shape.len()];
        let mut step = 1isize;
        for axis in (0..shape.len()).rev() {
            strides[axis] = step;
            step *= shape[axis].max(1) as isize;
        }
        Ok(NdArray {
            data: Arc::new(data),
            shape,
            strides,
            offset: 0,
        })
    }

    /// Creates a one-dimensional array.
    #[must_use]
    pub fn from_vec<T>(values: Vec<T>) -> Self
    where
        Vec<T>: Into<ArrayData>,
    {
        let data = values.into();
        let len = data.len();
        NdArray {
            data: Arc::new(data),
            shape: vec![len],
            strides: vec![1],
            offset: 0,
        }
    }

    /// Creates a two-dimensional array from equally sized rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] when the rows are ragged.
    pub fn from_rows<T>(rows: Vec<Vec<T>>) -> Result<Self>
    where
        Vec<T>: Into<ArrayData>,
    {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != ncols) {
            return Err(Error::shape("rows have different lengths"));
        }
        let flat: Vec<T> = rows.into_iter().flatten().collect();
        NdArray::new(flat.into(), vec![nrows, ncols])
    }

    /// Creates a zero-dimensional array holding one element.
    #[must_use]
    pub fn scalar<T>(value: T) -> Self
    where
        Vec<T>: Into<ArrayData>,
    {
        NdArray {
            data: Arc::new(vec![value].into()),
            shape: Vec::new(),
            strides: Vec::new(),
            offset: 0,
        }
    }

    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Extent of an axis; 0 for axes past the last one.
    #[must_use]
    pub fn dim(&self, axis: usize) -> usize {
        self.shape.get(axis).copied().unwrap_or(0)
    }

    /// Stride of an axis in elements; 0 for axes past the last one.
    #[must_use]
    pub fn stride(&self, axis: usize) -> isize {
        self.strides.get(axis).copied().unwrap_or(0)
    }

    /// Total number of elements in the view.
    #[must_use]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    #[must_use]
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Flat storage position of the first element.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns a view with the axis order reversed.
    #[must_use]
    pub fn transpose(&self) -> Self {
        NdArray {
            data: Arc::clone(&self.data),
            shape: self.shape.iter().rev().copied().collect(),
            strides: self.strides.iter().rev().copied().collect(),
            offset: self.offset,
        }
    }

    /// Reads the element at a flat storage position.
    #[must_use]
    pub fn item(&self, pos: isize) -> Option<Value> {
        usize::try_from(pos).ok().and_then(|pos| self.data.get(pos))
    }

    /// Iterates the elements in logical row-major order.
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        let size = self.size();
        (0..size).filter_map(move |n| {
            let mut rem = n;
            let mut pos = self.offset as isize;
            for axis in (0..self.ndim()).rev() {
                let extent = self.shape[axis];
                pos += (rem % extent) as isize * self.strides[axis];
                rem /= extent;
            }
            self.item(pos)
        })
    }
}
