//! The canonical in-memory annotation model shared by every parser and
//! serializer.

use std::collections::{BTreeMap, HashSet};

use crate::error::ConvertError;
use crate::geometry::BoundingBox;

/// One observed (or ground-truth) object instance in one frame.
///
/// `confidence` is `None` for ground-truth sets that omit it; it is never
/// defaulted to a misleading value.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub frame_index: u32,
    pub class_id: u32,
    pub confidence: Option<f64>,
    pub bbox: BoundingBox,
}

/// An ordered collection of detections grouped by frame index.
///
/// Frames are enumerated even when they hold no detections: per-frame output
/// formats must emit an empty `frame<N>.txt` for a frame that was present in
/// the source, including one whose detections were all filtered out.
/// Insertion order within a frame is preserved for deterministic output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    frames: BTreeMap<u32, Vec<Detection>>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame as present in the source, with or without detections.
    pub fn ensure_frame(&mut self, frame_index: u32) {
        self.frames.entry(frame_index).or_default();
    }

    pub fn push(&mut self, detection: Detection) {
        self.frames
            .entry(detection.frame_index)
            .or_default()
            .push(detection);
    }

    /// Iterate frames in ascending frame-index order.
    pub fn frames(&self) -> impl Iterator<Item = (u32, &[Detection])> {
        self.frames
            .iter()
            .map(|(frame, detections)| (*frame, detections.as_slice()))
    }

    pub fn detections(&self) -> impl Iterator<Item = &Detection> {
        self.frames.values().flatten()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn len(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only detections whose class id is in `filter`. An empty filter is
    /// a pass-through identity, not an empty output. Frame enumeration is
    /// preserved either way.
    pub fn retain_classes(&mut self, filter: &HashSet<u32>) {
        if filter.is_empty() {
            return;
        }
        for detections in self.frames.values_mut() {
            detections.retain(|detection| filter.contains(&detection.class_id));
        }
    }
}

/// An ordered list of category names indexed by the detector's table ids,
/// with a background offset separating table ids from canonical class ids.
///
/// The default COCO table reserves index 0 for `__background__`, so canonical
/// class ids (as used by the yolo-style formats) sit one below their table
/// index. The offset is a property of the table, not a universal rule.
#[derive(Debug, Clone)]
pub struct ClassNameTable {
    names: Vec<String>,
    background_offset: u32,
}

impl ClassNameTable {
    pub fn new(names: Vec<String>, background_offset: u32) -> Self {
        Self {
            names,
            background_offset,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve a label to its canonical class id (table index minus the
    /// background offset). Unknown labels are fatal, never defaulted.
    pub fn class_id_for_label(&self, label: &str) -> Result<u32, ConvertError> {
        let index = self
            .names
            .iter()
            .position(|name| name == label)
            .ok_or_else(|| ConvertError::UnknownLabel(label.to_string()))? as u32;
        index
            .checked_sub(self.background_offset)
            .ok_or_else(|| ConvertError::UnknownLabel(label.to_string()))
    }

    /// Convert a raw table index (e.g. a detector `category_id`) to the
    /// canonical class id.
    pub fn class_id_from_table_index(&self, index: u32) -> Result<u32, ConvertError> {
        if (index as usize) >= self.names.len() {
            return Err(ConvertError::BadTableIndex {
                index,
                len: self.names.len(),
                offset: self.background_offset,
            });
        }
        index
            .checked_sub(self.background_offset)
            .ok_or(ConvertError::BadTableIndex {
                index,
                len: self.names.len(),
                offset: self.background_offset,
            })
    }

    /// Convert a canonical class id back to the table index.
    pub fn table_index(&self, class_id: u32) -> u32 {
        class_id + self.background_offset
    }

    /// Look up the display label for a canonical class id.
    pub fn label(&self, class_id: u32) -> Result<&str, ConvertError> {
        let index = self.table_index(class_id) as usize;
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(ConvertError::UnknownClassId(class_id))
    }
}
