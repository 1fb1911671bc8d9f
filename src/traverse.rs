//! Depth-first walk over the axes of a strided array.
//!
//! The walk keeps an explicit stack of axis frames, one per open axis.
//! An outer axis hands each of its positions to a nested consumer by
//! pushing a frame for the next axis ([`ArrayTraversal::descend`]); the
//! consumer pops it again when that axis is exhausted
//! ([`ArrayTraversal::ascend`]). On the innermost axis items are read one
//! at a time ([`ArrayTraversal::next_item`]).
//!
//! The same traversal is shared by every nesting level of one array, so a
//! nested axis never re-opens the array or rebuilds its labels.

use crate::labels::Labels;
use crate::{Error, NdArray, Result, Value};

#[derive(Clone, Copy, Debug)]
struct AxisFrame {
    extent: usize,
    stride: isize,
    index: usize,
    pos: isize,
}

/// Cursor stack over one array, plus the axis labels attached to it.
#[derive(Debug)]
pub struct ArrayTraversal {
    array: NdArray,
    frames: Vec<AxisFrame>,
    transposed: bool,
    row_labels: Option<Labels>,
    column_labels: Option<Labels>,
}

impl ArrayTraversal {
    /// Opens a traversal positioned before the first item of the outer axis.
    ///
    /// With `transposed` the axes are visited last to first. Arrays with no
    /// elements yield nothing at all, whatever their shape.
    pub fn new(array: NdArray, transposed: bool) -> Self {
        let mut traversal = ArrayTraversal {
            frames: Vec::with_capacity(array.ndim()),
            array,
            transposed,
            row_labels: None,
            column_labels: None,
        };
        if traversal.array.ndim() > 0 {
            let mut root = traversal.frame_for_depth(0, traversal.array.offset() as isize);
            if traversal.array.size() == 0 {
                root.extent = 0;
            }
            traversal.frames.push(root);
        }
        traversal
    }

    /// Attaches pre-rendered labels for the outer and innermost axes.
    pub fn with_labels(mut self, rows: Option<Labels>, columns: Option<Labels>) -> Self {
        self.row_labels = rows;
        self.column_labels = columns;
        self
    }

    fn frame_for_depth(&self, depth: usize, pos: isize) -> AxisFrame {
        let ndim = self.array.ndim();
        let axis = if self.transposed { ndim - 1 - depth } else { depth };
        AxisFrame {
            extent: self.array.dim(axis),
            stride: self.array.stride(axis),
            index: 0,
            pos,
        }
    }

    /// Number of currently open axes.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when the open axis is the last one to visit.
    pub fn at_innermost(&self) -> bool {
        self.frames.len() >= self.array.ndim()
    }

    /// Returns `true` when every position of the open axis has been visited.
    pub fn exhausted(&self) -> bool {
        self.frames
            .last()
            .map_or(true, |frame| frame.index >= frame.extent)
    }

    /// Advances the open axis by one position and opens the next axis there.
    ///
    /// Returns `false`, without opening anything, once the open axis is
    /// exhausted or has no nested axis.
    pub fn descend(&mut self) -> bool {
        if self.at_innermost() || self.exhausted() {
            return false;
        }
        let depth = self.frames.len();
        let Some(parent) = self.frames.last_mut() else {
            return false;
        };
        let start = parent.pos;
        parent.pos += parent.stride;
        parent.index += 1;
        let child = self.frame_for_depth(depth, start);
        self.frames.push(child);
        true
    }

    /// Reads the next item of the innermost axis.
    pub fn next_item(&mut self) -> Result<Option<Value>> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(None);
        };
        if frame.index >= frame.extent {
            return Ok(None);
        }
        let pos = frame.pos;
        frame.pos += frame.stride;
        frame.index += 1;
        self.array
            .item(pos)
            .map(Some)
            .ok_or_else(|| Error::shape(&format!("array position {} is out of bounds", pos)))
    }

    /// Closes the open axis, returning to its parent.
    pub fn ascend(&mut self) {
        self.frames.pop();
    }

    /// Label of the innermost-axis position most recently read.
    pub fn column_label(&self) -> Option<&[u8]> {
        let frame = self.frames.last()?;
        let labels = self.column_labels.as_ref()?;
        labels.get(frame.index.checked_sub(1)?).map(|label| &label[..])
    }

    /// Label of the parent-axis position most recently descended into.
    pub fn row_label(&self) -> Option<&[u8]> {
        let frame = self.frames.get(self.frames.len().checked_sub(2)?)?;
        let labels = self.row_labels.as_ref()?;
        labels.get(frame.index.checked_sub(1)?).map(|label| &label[..])
    }

    pub fn has_column_labels(&self) -> bool {
        self.column_labels.is_some()
    }
}
