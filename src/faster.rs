//! The `faster` format: the JSON document emitted by the Faster R-CNN driver,
//! one record per detection with absolute corner coordinates.
//!
//! `category_id` indexes the detector's category table directly (background
//! entry included), so it crosses the class-name table's background offset on
//! the way to a canonical class id. This keeps a direct `faster -> yolo`
//! conversion identical to the historical two-hop route through openimages.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::ConvertError;
use crate::geometry::BoundingBox;
use crate::types::{AnnotationSet, ClassNameTable, Detection};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FasterDetection {
    /// Zero-indexed frame number within the source video.
    pub image_id: u32,
    pub category_id: u32,
    /// `[xmin, ymin, xmax, ymax]` in pixels.
    pub bbox: [f64; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Parse a faster JSON stream into the canonical annotation set.
pub fn parse<R: Read>(reader: R, table: &ClassNameTable) -> Result<AnnotationSet, ConvertError> {
    let records: Vec<FasterDetection> = serde_json::from_reader(reader)?;
    let mut set = AnnotationSet::new();

    for record in records {
        let [xmin, ymin, xmax, ymax] = record.bbox;
        set.push(Detection {
            frame_index: record.image_id,
            class_id: table.class_id_from_table_index(record.category_id)?,
            confidence: record.score,
            bbox: BoundingBox::from_corners(xmin, ymin, xmax, ymax),
        });
    }

    Ok(set)
}

/// Serialize the annotation set as faster JSON.
///
/// Frames without detections cannot be represented in this shape and are
/// dropped.
pub fn write<W: Write>(
    writer: W,
    set: &AnnotationSet,
    table: &ClassNameTable,
) -> Result<(), ConvertError> {
    let records: Vec<FasterDetection> = set
        .detections()
        .map(|detection| FasterDetection {
            image_id: detection.frame_index,
            category_id: table.table_index(detection.class_id),
            bbox: [
                detection.bbox.xmin,
                detection.bbox.ymin,
                detection.bbox.xmax,
                detection.bbox.ymax,
            ],
            score: detection.confidence,
        })
        .collect();

    serde_json::to_writer(writer, &records)?;
    Ok(())
}
