//! Labeled one- and two-axis containers.
//!
//! [`Index`] is a named label array, [`Series`] pairs a one-dimensional
//! array with an index, and [`DataFrame`] pairs a two-dimensional array with
//! a row index and a column index. Label counts are checked against the data
//! when the container is encoded, not when it is built.

use crate::{ArrayData, Error, NdArray, Result, Value};

/// A named array of axis labels.
///
/// # Examples
///
/// ```rust
/// use objson::{to_string, Index, Value};
///
/// let index = Index::new(vec![Value::from("a"), Value::from("b")]);
/// assert_eq!(to_string(&Value::from(index)).unwrap(), r#"["a","b"]"#);
/// ```
#[derive(Clone, Debug)]
pub struct Index {
    pub name: Box<Value>,
    pub values: NdArray,
}

impl Index {
    /// Creates an unnamed index from host values.
    #[must_use]
    pub fn new(labels: Vec<Value>) -> Self {
        Index::from_array(NdArray::from_vec(labels))
    }

    /// Creates an unnamed index over an existing array.
    #[must_use]
    pub fn from_array(values: NdArray) -> Self {
        Index {
            name: Box::new(Value::None),
            values,
        }
    }

    /// Creates the default `0..n` integer index.
    #[must_use]
    pub fn range(n: usize) -> Self {
        Index::from_array(NdArray::from_vec((0..n as i64).collect::<Vec<i64>>()))
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<Value>) -> Self {
        self.name = Box::new(name.into());
        self
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A one-dimensional array with an index and a name.
///
/// # Examples
///
/// ```rust
/// use objson::{to_string, NdArray, Series, Value};
///
/// let series = Series::new(NdArray::from_vec(vec![10i64, 20]));
/// assert_eq!(to_string(&Value::from(series)).unwrap(), r#"{"0":10,"1":20}"#);
/// ```
#[derive(Clone, Debug)]
pub struct Series {
    pub name: Box<Value>,
    pub index: Index,
    pub values: NdArray,
}

impl Series {
    /// Creates an unnamed series with the default range index.
    #[must_use]
    pub fn new(values: NdArray) -> Self {
        Series {
            name: Box::new(Value::None),
            index: Index::range(values.dim(0)),
            values,
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: Index) -> Self {
        self.index = index;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<Value>) -> Self {
        self.name = Box::new(name.into());
        self
    }
}

/// A two-dimensional table with row and column labels.
///
/// # Examples
///
/// ```rust
/// use objson::{to_string_with_options, DataFrame, EncodeOptions, Index, NdArray, Orient, Value};
///
/// let frame = DataFrame::new(NdArray::from_rows(vec![vec![1i64, 2]]).unwrap())
///     .unwrap()
///     .with_columns(Index::new(vec![Value::from("a"), Value::from("b")]));
///
/// let options = EncodeOptions::new().with_orient(Orient::Records);
/// let json = to_string_with_options(&Value::from(frame), options).unwrap();
/// assert_eq!(json, r#"[{"a":1,"b":2}]"#);
/// ```
#[derive(Clone, Debug)]
pub struct DataFrame {
    pub columns: Index,
    pub index: Index,
    pub values: NdArray,
}

impl DataFrame {
    /// Creates a frame with default range labels on both axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] unless `values` is two-dimensional.
    pub fn new(values: NdArray) -> Result<Self> {
        if values.ndim() != 2 {
            return Err(Error::shape(&format!(
                "a data frame needs 2 dimensions, got {}",
                values.ndim()
            )));
        }
        Ok(DataFrame {
            columns: Index::range(values.dim(1)),
            index: Index::range(values.dim(0)),
            values,
        })
    }

    /// Creates a frame from named columns of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] when the columns have different lengths.
    pub fn from_columns<T>(columns: Vec<(&str, Vec<T>)>) -> Result<Self>
    where
        Vec<T>: Into<ArrayData>,
    {
        let labels: Vec<Value> = columns.iter().map(|(name, _)| Value::from(*name)).collect();
        let data: Vec<Vec<T>> = columns.into_iter().map(|(_, col)| col).collect();
        // Stored column-major, so the row-major view is the transpose.
        let values = NdArray::from_rows(data)?.transpose();
        Ok(DataFrame::new(values)?.with_columns(Index::new(labels)))
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Index) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: Index) -> Self {
        self.index = index;
        self
    }

    /// Number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.values.dim(0)
    }

    /// Number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.values.dim(1)
    }
}
