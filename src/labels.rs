//! Axis label rendering.
//!
//! Labels are rendered once per tabular node by running the full encoder on
//! each label value. The bytes are produced at the tail of the output
//! buffer, copied out, and the buffer is rewound, so the document itself is
//! never affected.

use crate::iter::Node;
use crate::ser::Encoder;
use crate::{Error, NdArray, Result};

/// Pre-rendered object keys, one per axis position: `"label":`.
pub type Labels = Vec<Box<[u8]>>;

impl Encoder<'_> {
    /// Renders every label of `values` as a quoted, colon-terminated key.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::LabelMismatch`] when the number of labels is not
    /// `expected`, or with the first error raised while encoding a label.
    pub(crate) fn encode_labels(&mut self, values: &NdArray, expected: usize) -> Result<Labels> {
        let found = values.size();
        if found != expected {
            tracing::debug!(expected, found, "label count does not match data shape");
            return Err(Error::label_mismatch(expected, found));
        }

        let mut labels = Labels::new();
        labels.try_reserve_exact(found)?;
        for label in values.values() {
            let mark = self.writer.mark();
            let rendered = self
                .encode_node(Node::Value(&label))
                .and_then(|()| render_key(self.writer.since(mark)));
            self.writer.restore(mark);
            labels.push(rendered?);
        }
        tracing::trace!(count = labels.len(), "rendered axis labels");
        Ok(labels)
    }
}

fn render_key(encoded: &[u8]) -> Result<Box<[u8]>> {
    let quoted = encoded.first() == Some(&b'"');
    let mut key = Vec::new();
    key.try_reserve_exact(encoded.len() + 3)?;
    if !quoted {
        key.push(b'"');
    }
    key.extend_from_slice(encoded);
    if !quoted {
        key.push(b'"');
    }
    key.push(b':');
    Ok(key.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, ArrayData, DateUnit, EncodeOptions, Value};

    fn labels_of(values: Vec<Value>, options: EncodeOptions) -> Vec<String> {
        let mut encoder = Encoder::new(options).unwrap();
        let n = values.len();
        let labels = encoder.encode_labels(&NdArray::from_vec(values), n).unwrap();
        assert!(encoder.into_bytes().is_empty());
        labels
            .iter()
            .map(|label| String::from_utf8(label.to_vec()).unwrap())
            .collect()
    }

    #[test]
    fn test_strings_keep_their_quotes() {
        let labels = labels_of(vec![value!("a"), value!("b\"c")], EncodeOptions::new());
        assert_eq!(labels, vec![r#""a":"#, r#""b\"c":"#]);
    }

    #[test]
    fn test_non_strings_are_quoted() {
        let labels = labels_of(
            vec![value!(1), value!(2.5), value!(null), value!(true)],
            EncodeOptions::new(),
        );
        assert_eq!(labels, vec![r#""1":"#, r#""2.5":"#, r#""null":"#, r#""true":"#]);
    }

    #[test]
    fn test_datetime_labels_follow_date_options() {
        let dates = NdArray::new(ArrayData::Datetime(vec![0, 86_400], DateUnit::Seconds), vec![2]).unwrap();
        let mut encoder = Encoder::new(EncodeOptions::new()).unwrap();
        let labels = encoder.encode_labels(&dates, 2).unwrap();
        assert_eq!(&*labels[1], b"\"86400000\":");
    }

    #[test]
    fn test_mismatch_leaves_output_untouched() {
        let mut encoder = Encoder::new(EncodeOptions::new()).unwrap();
        let err = encoder
            .encode_labels(&NdArray::from_vec(vec![1i64, 2]), 3)
            .unwrap_err();
        assert!(matches!(err, Error::LabelMismatch { expected: 3, found: 2 }));
        assert!(encoder.into_bytes().is_empty());
    }

    #[test]
    fn test_failed_label_rewinds_buffer() {
        let mut encoder = Encoder::new(EncodeOptions::new()).unwrap();
        let labels = NdArray::from_vec(vec![value!("ok"), Value::Callable("f".into())]);
        assert!(encoder.encode_labels(&labels, 2).is_err());
        assert!(encoder.into_bytes().is_empty());
    }
}
