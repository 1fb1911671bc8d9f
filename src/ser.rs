//! JSON encoding driver.
//!
//! This module provides the [`Encoder`] that walks a [`Value`] tree and
//! writes it as JSON.
//!
//! ## Overview
//!
//! Every node goes through the same steps:
//!
//! 1. the recursion depth is checked against the configured ceiling
//! 2. the node is classified into a scalar, a composite or a replacement
//! 3. scalars are written directly; composites are written by pulling
//!    children from their iterator and encoding each one the same way
//!
//! Any error aborts the whole document. Iterators, traversals and labels
//! are owned by the call that opened them and are released as it unwinds.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use objson::{to_string, value};
//!
//! let json = to_string(&value!({"a": [1, 2, null]})).unwrap();
//! assert_eq!(json, r#"{"a":[1,2,null]}"#);
//! ```
//!
//! ## Direct Encoder Usage
//!
//! The encoder can also write into a caller-supplied buffer:
//!
//! ```rust
//! use objson::{value, EncodeOptions, Encoder};
//!
//! let mut buf = [0u8; 64];
//! let mut encoder = Encoder::with_buffer(EncodeOptions::new(), &mut buf).unwrap();
//! encoder.encode(&value!([true, false])).unwrap();
//! assert_eq!(&*encoder.into_output(), b"[true,false]");
//! ```

use crate::classify::TypeContext;
use crate::convert::Scalar;
use crate::iter::{CompositeIter, Name, Node};
use crate::writer::Writer;
use crate::{EncodeOptions, Error, Orient, Result, Value};
use std::borrow::Cow;

/// The JSON encoder.
///
/// Created via [`Encoder::new`] (owned output) or [`Encoder::with_buffer`]
/// (caller-supplied buffer, spilling to the heap when it fills up).
pub struct Encoder<'b> {
    pub(crate) writer: Writer<'b>,
    pub(crate) options: EncodeOptions,
    pub(crate) orient: Orient,
    depth: usize,
}

impl Encoder<'static> {
    /// Creates an encoder with owned output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for out-of-range options.
    pub fn new(options: EncodeOptions) -> Result<Self> {
        options.validate()?;
        let writer =
            Writer::growable().with_escaping(options.ensure_ascii, options.encode_html_chars);
        Ok(Encoder::from_parts(writer, options))
    }
}

impl<'b> Encoder<'b> {
    /// Creates an encoder that writes into `buf` until it is full.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for out-of-range options.
    pub fn with_buffer(options: EncodeOptions, buf: &'b mut [u8]) -> Result<Self> {
        options.validate()?;
        let writer =
            Writer::fixed(buf).with_escaping(options.ensure_ascii, options.encode_html_chars);
        Ok(Encoder::from_parts(writer, options))
    }

    fn from_parts(writer: Writer<'b>, options: EncodeOptions) -> Self {
        Encoder {
            writer,
            orient: options.orient,
            options,
            depth: 0,
        }
    }

    /// Encodes one document, replacing whatever an earlier call produced.
    ///
    /// On failure the output is left empty.
    ///
    /// # Errors
    ///
    /// Returns the first error raised anywhere in the value tree.
    pub fn encode(&mut self, value: &Value) -> Result<()> {
        self.writer.restore(0);
        self.orient = self.options.orient;
        self.depth = 0;
        let result = self.encode_node(Node::Value(value));
        if let Err(err) = &result {
            tracing::debug!(error = %err, "encode failed");
            self.writer.restore(0);
        }
        result
    }

    pub(crate) fn encode_node(&mut self, node: Node<'_>) -> Result<()> {
        self.depth += 1;
        let result = match self.options.max_depth {
            Some(max) if self.depth > max => Err(Error::recursion_limit(max)),
            _ => self.encode_context(node),
        };
        self.depth -= 1;
        result
    }

    fn encode_context(&mut self, node: Node<'_>) -> Result<()> {
        match self.classify(node)? {
            TypeContext::Scalar(scalar) => self.write_scalar(scalar),
            TypeContext::Array(iter) => self.write_composite(iter, false),
            TypeContext::Object(iter) => self.write_composite(iter, true),
            TypeContext::Replaced(value) => self.encode_node(Node::Value(&value)),
        }
    }

    fn write_scalar(&mut self, scalar: Scalar<'_>) -> Result<()> {
        match scalar {
            Scalar::Null => self.writer.write_null(),
            Scalar::Bool(b) => self.writer.write_bool(b),
            Scalar::Long(i) => self.writer.write_long(i),
            Scalar::Double(f) => self.writer.write_double(f, self.options.double_precision),
            Scalar::Utf8(s) => self.writer.write_str(&s),
        }
    }

    fn write_composite(&mut self, mut iter: Box<dyn CompositeIter + '_>, object: bool) -> Result<()> {
        self.writer.push(if object { b'{' } else { b'[' })?;
        iter.begin(&mut self.orient);

        let mut first = true;
        while iter.next()? {
            if !first {
                self.writer.push(b',')?;
            }
            first = false;

            if object {
                match iter.name() {
                    Some(Name::Key(key)) => {
                        self.writer.write_str(&key)?;
                        self.writer.push(b':')?;
                    }
                    Some(Name::Label(label)) => self.writer.write_raw(label)?,
                    None => return Err(Error::invalid_type("object member has no name")),
                }
            }

            let child = iter
                .value()
                .ok_or_else(|| Error::invalid_type("composite yielded no value"))?;
            self.encode_node(child)?;
        }

        iter.end(&mut self.orient);
        self.writer.push(if object { b'}' } else { b']' })
    }

    /// Finishes encoding, returning the output bytes.
    ///
    /// Borrowed when the document fit the caller-supplied buffer.
    pub fn into_output(self) -> Cow<'b, [u8]> {
        self.writer.into_output()
    }

    /// Finishes encoding, returning an owned copy of the output.
    pub fn into_bytes(self) -> Vec<u8> {
        self.into_output().into_owned()
    }

    /// Finishes encoding, returning the output as a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if the output is not valid UTF-8.
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.into_bytes())
            .map_err(|e| Error::conversion(&format!("output is not UTF-8: {}", e)))
    }
}
