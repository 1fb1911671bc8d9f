//! Composite iterator protocol.
//!
//! Every composite value is emitted through a [`CompositeIter`]: the driver
//! calls `begin` once, then alternates `next` with `name`/`value` until
//! `next` returns `false`, then calls `end`. Implementations:
//!
//! - [`DictIter`]: mapping entries, keys stringified
//! - [`SeqIter`]: borrowed list and tuple elements
//! - [`IterAdapter`]: any pull-based iterator, owning the current item
//! - [`DirIter`]: public, non-callable attributes of an opaque object
//! - [`SplitIter`]: the fixed fields of a `split` orientation
//! - [`ArrayIter`]: one axis of an array traversal

use crate::traverse::ArrayTraversal;
use crate::{Dict, HostObject, NdArray, Orient, Result, Value};
use std::borrow::Cow;

/// A child handed to the driver by a composite iterator.
pub enum Node<'a> {
    Value(&'a Value),
    /// An array opened fresh, without labels.
    Array(&'a NdArray),
    /// The next axis of a traversal that is already open.
    Axis(&'a mut ArrayTraversal),
}

/// The key of an object member.
pub enum Name<'a> {
    /// Plain text, escaped and quoted by the writer.
    Key(Cow<'a, str>),
    /// A pre-rendered label, already quoted and colon-terminated.
    Label(&'a [u8]),
}

/// Iteration over the children of one composite node.
///
/// `next` must keep returning `false` once it has returned `false`.
pub trait CompositeIter {
    fn begin(&mut self, _orient: &mut Orient) {}

    /// Moves to the next child; `false` ends the iteration.
    fn next(&mut self) -> Result<bool>;

    /// The current child.
    fn value(&mut self) -> Option<Node<'_>>;

    /// The current child's key, for object-shaped nodes.
    fn name(&self) -> Option<Name<'_>> {
        None
    }

    fn end(&mut self, _orient: &mut Orient) {}
}

pub struct DictIter<'v> {
    dict: &'v Dict,
    pos: usize,
}

impl<'v> DictIter<'v> {
    pub fn new(dict: &'v Dict) -> Self {
        DictIter { dict, pos: 0 }
    }

    fn current(&self) -> Option<(&'v crate::Key, &'v Value)> {
        self.dict.get_index(self.pos.checked_sub(1)?)
    }
}

impl CompositeIter for DictIter<'_> {
    fn next(&mut self) -> Result<bool> {
        if self.pos >= self.dict.len() {
            return Ok(false);
        }
        self.pos += 1;
        Ok(true)
    }

    fn value(&mut self) -> Option<Node<'_>> {
        self.current().map(|(_, value)| Node::Value(value))
    }

    fn name(&self) -> Option<Name<'_>> {
        self.current().map(|(key, _)| Name::Key(key.as_name()))
    }
}

pub struct SeqIter<'v> {
    items: &'v [Value],
    pos: usize,
}

impl<'v> SeqIter<'v> {
    pub fn new(items: &'v [Value]) -> Self {
        SeqIter { items, pos: 0 }
    }
}

impl CompositeIter for SeqIter<'_> {
    fn next(&mut self) -> Result<bool> {
        if self.pos >= self.items.len() {
            return Ok(false);
        }
        self.pos += 1;
        Ok(true)
    }

    fn value(&mut self) -> Option<Node<'_>> {
        self.items.get(self.pos.checked_sub(1)?).map(Node::Value)
    }
}

/// Adapts a pull-based iterator.
///
/// The current item is dropped before the next one is pulled.
pub struct IterAdapter<'v> {
    inner: std::iter::Fuse<Box<dyn Iterator<Item = Value> + 'v>>,
    current: Option<Value>,
}

impl<'v> IterAdapter<'v> {
    pub fn new(inner: Box<dyn Iterator<Item = Value> + 'v>) -> Self {
        IterAdapter {
            inner: inner.fuse(),
            current: None,
        }
    }
}

impl CompositeIter for IterAdapter<'_> {
    fn next(&mut self) -> Result<bool> {
        self.current = None;
        self.current = self.inner.next();
        Ok(self.current.is_some())
    }

    fn value(&mut self) -> Option<Node<'_>> {
        self.current.as_ref().map(Node::Value)
    }
}

/// Attribute reflection over an opaque object.
pub struct DirIter<'v> {
    object: &'v dyn HostObject,
    names: Vec<String>,
    pos: usize,
    current: Option<Value>,
}

impl<'v> DirIter<'v> {
    pub fn new(object: &'v dyn HostObject) -> Self {
        DirIter {
            object,
            names: Vec::new(),
            pos: 0,
            current: None,
        }
    }
}

impl CompositeIter for DirIter<'_> {
    fn begin(&mut self, _orient: &mut Orient) {
        self.names = self.object.dir();
        self.names.sort();
        tracing::debug!(
            type_name = self.object.type_name(),
            members = self.names.len(),
            "encoding object by attribute reflection"
        );
    }

    fn next(&mut self) -> Result<bool> {
        self.current = None;
        while self.pos < self.names.len() {
            let name = &self.names[self.pos];
            self.pos += 1;
            if name.starts_with('_') {
                continue;
            }
            match self.object.getattr(name) {
                None | Some(Value::Callable(_)) => continue,
                Some(value) => {
                    self.current = Some(value);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn value(&mut self) -> Option<Node<'_>> {
        self.current.as_ref().map(Node::Value)
    }

    fn name(&self) -> Option<Name<'_>> {
        self.current.as_ref()?;
        let name = self.names.get(self.pos.checked_sub(1)?)?;
        Some(Name::Key(Cow::Borrowed(name.as_str())))
    }
}

/// A field of a `split` object.
pub enum Field<'v> {
    Value(&'v Value),
    Array(&'v NdArray),
}

/// The fixed fields of a `split` orientation.
///
/// With `nested_values` the fields render with the `values` orientation and
/// the previous orientation comes back at `end`.
pub struct SplitIter<'v> {
    fields: Vec<(&'static str, Field<'v>)>,
    pos: usize,
    nested_values: bool,
    saved: Option<Orient>,
}

impl<'v> SplitIter<'v> {
    pub fn new(fields: Vec<(&'static str, Field<'v>)>, nested_values: bool) -> Self {
        SplitIter {
            fields,
            pos: 0,
            nested_values,
            saved: None,
        }
    }

    fn current(&self) -> Option<&(&'static str, Field<'v>)> {
        self.fields.get(self.pos.checked_sub(1)?)
    }
}

impl CompositeIter for SplitIter<'_> {
    fn begin(&mut self, orient: &mut Orient) {
        if self.nested_values {
            self.saved = Some(*orient);
            *orient = Orient::Values;
        }
    }

    fn next(&mut self) -> Result<bool> {
        if self.pos >= self.fields.len() {
            return Ok(false);
        }
        self.pos += 1;
        Ok(true)
    }

    fn value(&mut self) -> Option<Node<'_>> {
        self.current().map(|(_, field)| match field {
            Field::Value(value) => Node::Value(value),
            Field::Array(array) => Node::Array(array),
        })
    }

    fn name(&self) -> Option<Name<'_>> {
        self.current().map(|(key, _)| Name::Key(Cow::Borrowed(*key)))
    }

    fn end(&mut self, orient: &mut Orient) {
        if let Some(saved) = self.saved.take() {
            *orient = saved;
        }
    }
}

/// Ownership of the traversal an [`ArrayIter`] walks.
pub enum Traversal<'a> {
    /// Opened for this node; dropped with it.
    Fresh(Box<ArrayTraversal>),
    /// Borrowed from the enclosing axis.
    Continuing(&'a mut ArrayTraversal),
}

impl Traversal<'_> {
    fn get(&self) -> &ArrayTraversal {
        match self {
            Traversal::Fresh(traversal) => &**traversal,
            Traversal::Continuing(traversal) => &**traversal,
        }
    }

    fn get_mut(&mut self) -> &mut ArrayTraversal {
        match self {
            Traversal::Fresh(traversal) => &mut **traversal,
            Traversal::Continuing(traversal) => &mut **traversal,
        }
    }
}

/// One axis of an array.
///
/// Outer axes yield the next axis as a [`Node::Axis`] child; the innermost
/// axis yields items.
pub struct ArrayIter<'a> {
    traversal: Traversal<'a>,
    leaf: bool,
    item: Option<Value>,
}

impl<'a> ArrayIter<'a> {
    pub fn fresh(traversal: ArrayTraversal) -> Self {
        ArrayIter {
            traversal: Traversal::Fresh(Box::new(traversal)),
            leaf: false,
            item: None,
        }
    }

    pub fn continuing(traversal: &'a mut ArrayTraversal) -> Self {
        ArrayIter {
            traversal: Traversal::Continuing(traversal),
            leaf: false,
            item: None,
        }
    }
}

impl CompositeIter for ArrayIter<'_> {
    fn next(&mut self) -> Result<bool> {
        self.item = None;
        let traversal = self.traversal.get_mut();
        if !self.leaf {
            if !traversal.at_innermost() {
                return Ok(traversal.descend());
            }
            self.leaf = true;
        }
        self.item = traversal.next_item()?;
        Ok(self.item.is_some())
    }

    fn value(&mut self) -> Option<Node<'_>> {
        if self.leaf {
            self.item.as_ref().map(Node::Value)
        } else {
            Some(Node::Axis(self.traversal.get_mut()))
        }
    }

    fn name(&self) -> Option<Name<'_>> {
        let traversal = self.traversal.get();
        let label = if self.leaf {
            traversal.column_label()
        } else {
            traversal.row_label()
        };
        label.map(Name::Label)
    }

    fn end(&mut self, _orient: &mut Orient) {
        if let Traversal::Continuing(traversal) = &mut self.traversal {
            traversal.ascend();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn drain(iter: &mut dyn CompositeIter) -> usize {
        let mut count = 0;
        while iter.next().unwrap() {
            assert!(iter.value().is_some());
            count += 1;
        }
        count
    }

    #[test]
    fn test_next_is_idempotent_after_end() {
        let dict: Dict = vec![("a", 1), ("b", 2)].into_iter().collect();
        let mut iter = DictIter::new(&dict);
        assert_eq!(drain(&mut iter), 2);
        assert!(!iter.next().unwrap());
        assert!(!iter.next().unwrap());
    }

    #[test]
    fn test_dict_names_are_stringified() {
        let mut dict = Dict::new();
        dict.insert(7, "seven");
        let mut iter = DictIter::new(&dict);
        assert!(iter.next().unwrap());
        match iter.name() {
            Some(Name::Key(key)) => assert_eq!(key, "7"),
            _ => panic!("expected a key"),
        }
    }

    #[test]
    fn test_adapter_stops_pulling_after_exhaustion() {
        let pulls = Cell::new(0);
        let source = std::iter::from_fn(|| {
            pulls.set(pulls.get() + 1);
            if pulls.get() <= 2 {
                Some(Value::from(pulls.get()))
            } else {
                None
            }
        });
        let mut iter = IterAdapter::new(Box::new(source));
        assert_eq!(drain(&mut iter), 2);
        assert!(!iter.next().unwrap());
        assert_eq!(pulls.get(), 3);
    }

    #[test]
    fn test_split_restores_orientation() {
        let name = Value::from("s");
        let data = NdArray::from_vec(vec![1i64]);
        let mut iter = SplitIter::new(
            vec![("name", Field::Value(&name)), ("data", Field::Array(&data))],
            true,
        );
        let mut orient = Orient::Split;
        iter.begin(&mut orient);
        assert_eq!(orient, Orient::Values);
        assert_eq!(drain(&mut iter), 2);
        iter.end(&mut orient);
        assert_eq!(orient, Orient::Split);
    }

    #[test]
    fn test_array_iter_descends_then_reads_items() {
        let array = NdArray::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        let mut outer = ArrayIter::fresh(ArrayTraversal::new(array, false));
        let mut leaves = 0;
        while outer.next().unwrap() {
            let Some(Node::Axis(traversal)) = outer.value() else {
                panic!("expected an axis");
            };
            let mut inner = ArrayIter::continuing(traversal);
            leaves += drain(&mut inner);
            inner.end(&mut Orient::Values);
        }
        assert_eq!(leaves, 4);
        assert!(!outer.next().unwrap());
    }
}
