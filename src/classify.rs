//! Type classification.
//!
//! Each node is classified once, into a primitive [`Scalar`], an array- or
//! object-shaped composite with its iterator, or a replacement value that
//! is encoded in its place. Scalar kinds are tested first, in a fixed order,
//! and only then the array-like and container kinds.

use crate::convert::{self, Scalar};
use crate::iter::{
    ArrayIter, CompositeIter, DictIter, DirIter, Field, IterAdapter, Node, SeqIter, SplitIter,
};
use crate::ser::Encoder;
use crate::traverse::ArrayTraversal;
use crate::{DataFrame, Error, HostObject, Index, NdArray, Orient, Result, Series, Value};
use std::borrow::Cow;

/// Classification of one node, alive while the node is being written.
pub enum TypeContext<'a> {
    Scalar(Scalar<'a>),
    Array(Box<dyn CompositeIter + 'a>),
    Object(Box<dyn CompositeIter + 'a>),
    /// A value produced by a fallback, encoded instead of the node.
    Replaced(Value),
}

impl Encoder<'_> {
    pub(crate) fn classify<'a>(&mut self, node: Node<'a>) -> Result<TypeContext<'a>> {
        match node {
            Node::Value(value) => self.classify_value(value),
            Node::Array(array) => Ok(array_context(array)),
            Node::Axis(traversal) => {
                let labeled = traversal.has_column_labels();
                let iter = Box::new(ArrayIter::continuing(traversal));
                Ok(if labeled {
                    TypeContext::Object(iter)
                } else {
                    TypeContext::Array(iter)
                })
            }
        }
    }

    fn classify_value<'a>(&mut self, value: &'a Value) -> Result<TypeContext<'a>> {
        let scalar = match value {
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Int(i) => Scalar::Long(*i),
            Value::BigInt(i) => Scalar::Long(convert::bigint_to_long(i)?),
            Value::Float(f) => convert::double(*f),
            Value::Bytes(bytes) => Scalar::Utf8(convert::bytes_to_utf8(bytes)),
            Value::Str(s) => Scalar::Utf8(Cow::Borrowed(s.as_str())),
            Value::None => Scalar::Null,
            Value::Decimal(d) => convert::double(d.to_f64()),
            Value::DateTime(dt) => convert::datetime(dt, &self.options)?,
            Value::Date(d) => convert::date(d, &self.options)?,
            Value::NaT => Scalar::Null,
            Value::Time(t) => convert::time(t),
            Value::Datetime64(d) => convert::datetime64(d, &self.options)?,
            Value::Timedelta(d) => convert::timedelta(d)?,
            Value::Timedelta64(nanos) => convert::timedelta64(*nanos),
            Value::Numeric(n) => convert::numeric(n)?,
            _ => return self.classify_composite(value),
        };
        Ok(TypeContext::Scalar(scalar))
    }

    fn classify_composite<'a>(&mut self, value: &'a Value) -> Result<TypeContext<'a>> {
        tracing::trace!(kind = value.kind_name(), orient = %self.orient, "composite");
        match value {
            Value::Index(index) => Ok(self.classify_index(index)),
            Value::Series(series) => self.classify_series(series),
            Value::Array(array) => Ok(array_context(array)),
            Value::DataFrame(frame) => self.classify_frame(frame),
            Value::Dict(dict) => Ok(TypeContext::Object(Box::new(DictIter::new(dict)))),
            Value::List(items) | Value::Tuple(items) => {
                Ok(TypeContext::Array(Box::new(SeqIter::new(items))))
            }
            Value::Set(items) => Ok(TypeContext::Array(Box::new(IterAdapter::new(Box::new(
                items.iter().cloned(),
            ))))),
            Value::Object(object) => self.classify_object(value, object.as_ref()),
            _ => self.fallback(value),
        }
    }

    fn classify_index<'a>(&self, index: &'a Index) -> TypeContext<'a> {
        if self.orient == Orient::Split {
            let fields = vec![
                ("name", Field::Value(&*index.name)),
                ("data", Field::Array(&index.values)),
            ];
            return TypeContext::Object(Box::new(SplitIter::new(fields, true)));
        }
        array_context(&index.values)
    }

    fn classify_series<'a>(&mut self, series: &'a Series) -> Result<TypeContext<'a>> {
        match self.orient {
            Orient::Split => {
                let fields = vec![
                    ("name", Field::Value(&*series.name)),
                    ("index", Field::Array(&series.index.values)),
                    ("data", Field::Array(&series.values)),
                ];
                Ok(TypeContext::Object(Box::new(SplitIter::new(fields, true))))
            }
            Orient::Index | Orient::Columns => {
                let labels = self.encode_labels(&series.index.values, series.values.dim(0))?;
                let traversal =
                    ArrayTraversal::new(series.values.clone(), false).with_labels(None, Some(labels));
                Ok(TypeContext::Object(Box::new(ArrayIter::fresh(traversal))))
            }
            Orient::Records | Orient::Values => Ok(array_context(&series.values)),
        }
    }

    fn classify_frame<'a>(&mut self, frame: &'a DataFrame) -> Result<TypeContext<'a>> {
        let values = &frame.values;
        match self.orient {
            Orient::Split => {
                let fields = vec![
                    ("columns", Field::Array(&frame.columns.values)),
                    ("index", Field::Array(&frame.index.values)),
                    ("data", Field::Array(values)),
                ];
                Ok(TypeContext::Object(Box::new(SplitIter::new(fields, true))))
            }
            Orient::Values => Ok(array_context(values)),
            Orient::Records => {
                let columns = self.encode_labels(&frame.columns.values, values.dim(1))?;
                let traversal =
                    ArrayTraversal::new(values.clone(), false).with_labels(None, Some(columns));
                Ok(TypeContext::Array(Box::new(ArrayIter::fresh(traversal))))
            }
            Orient::Index => {
                let rows = self.encode_labels(&frame.index.values, values.dim(0))?;
                let columns = self.encode_labels(&frame.columns.values, values.dim(1))?;
                let traversal = ArrayTraversal::new(values.clone(), false)
                    .with_labels(Some(rows), Some(columns));
                Ok(TypeContext::Object(Box::new(ArrayIter::fresh(traversal))))
            }
            Orient::Columns => {
                let rows = self.encode_labels(&frame.columns.values, values.dim(1))?;
                let columns = self.encode_labels(&frame.index.values, values.dim(0))?;
                let traversal = ArrayTraversal::new(values.clone(), true)
                    .with_labels(Some(rows), Some(columns));
                Ok(TypeContext::Object(Box::new(ArrayIter::fresh(traversal))))
            }
        }
    }

    fn classify_object<'a>(
        &mut self,
        value: &'a Value,
        object: &'a dyn HostObject,
    ) -> Result<TypeContext<'a>> {
        if let Some(items) = object.iter() {
            return Ok(TypeContext::Array(Box::new(IterAdapter::new(items))));
        }
        if let Some(result) = object.to_dict() {
            return Ok(match result {
                Ok(dict @ Value::Dict(_)) => TypeContext::Replaced(dict),
                Ok(other) => {
                    tracing::debug!(
                        type_name = object.type_name(),
                        returned = other.kind_name(),
                        "to_dict returned a non-dictionary, encoding null"
                    );
                    TypeContext::Scalar(Scalar::Null)
                }
                Err(err) => {
                    tracing::debug!(type_name = object.type_name(), error = %err, "to_dict failed, encoding null");
                    TypeContext::Scalar(Scalar::Null)
                }
            });
        }
        if self.options.default_handler.is_some() {
            return self.fallback(value);
        }
        Ok(TypeContext::Object(Box::new(DirIter::new(object))))
    }

    /// Hands a value no rule could place to the default handler.
    fn fallback<'a>(&mut self, value: &'a Value) -> Result<TypeContext<'a>> {
        match &self.options.default_handler {
            Some(handler) => {
                tracing::debug!(kind = value.kind_name(), "invoking default handler");
                Ok(TypeContext::Replaced(handler(value)?))
            }
            None => Err(Error::invalid_type(&format!(
                "{} is not JSON serializable",
                value.kind_name()
            ))),
        }
    }
}

/// Zero-dimensional arrays encode as their only item.
fn array_context(array: &NdArray) -> TypeContext<'static> {
    if array.ndim() == 0 {
        return match array.item(array.offset() as isize) {
            Some(item) => TypeContext::Replaced(item),
            None => TypeContext::Scalar(Scalar::Null),
        };
    }
    TypeContext::Array(Box::new(ArrayIter::fresh(ArrayTraversal::new(
        array.clone(),
        false,
    ))))
}
