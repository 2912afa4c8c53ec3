//! The `opendatacam_yolo` format: a single JSON document with one entry per
//! frame, each holding the yolo detections for that frame in relative
//! center/size coordinates.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::ConvertError;
use crate::geometry::{BoundingBox, Resolution};
use crate::types::{AnnotationSet, ClassNameTable, Detection};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeCoordinates {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedObject {
    pub class_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub relative_coordinates: RelativeCoordinates,
    /// Absent in ground-truth exports; never defaulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDetections {
    pub frame_id: u32,
    pub objects: Vec<TrackedObject>,
}

/// Parse an opendatacam JSON stream into the canonical annotation set.
///
/// A frame entry with an empty `objects` array is still recorded so the frame
/// survives into per-frame output.
pub fn parse<R: Read>(reader: R, resolution: &Resolution) -> Result<AnnotationSet, ConvertError> {
    let frames: Vec<FrameDetections> = serde_json::from_reader(reader)?;
    let mut set = AnnotationSet::new();

    for frame in frames {
        set.ensure_frame(frame.frame_id);
        for object in frame.objects {
            let rc = &object.relative_coordinates;
            set.push(Detection {
                frame_index: frame.frame_id,
                class_id: object.class_id,
                confidence: object.confidence,
                bbox: BoundingBox::from_relative_center_size(
                    rc.center_x,
                    rc.center_y,
                    rc.width,
                    rc.height,
                    resolution,
                ),
            });
        }
    }

    Ok(set)
}

/// Serialize the annotation set as opendatacam JSON, one entry per frame.
pub fn write<W: Write>(
    writer: W,
    set: &AnnotationSet,
    resolution: &Resolution,
    table: &ClassNameTable,
) -> Result<(), ConvertError> {
    let mut frames = Vec::with_capacity(set.frame_count());

    for (frame_id, detections) in set.frames() {
        let objects = detections
            .iter()
            .map(|detection| {
                let (center_x, center_y, width, height) =
                    detection.bbox.relative_center_size(resolution);
                Ok(TrackedObject {
                    class_id: detection.class_id,
                    name: Some(table.label(detection.class_id)?.to_string()),
                    relative_coordinates: RelativeCoordinates {
                        center_x,
                        center_y,
                        width,
                        height,
                    },
                    confidence: detection.confidence,
                })
            })
            .collect::<Result<Vec<_>, ConvertError>>()?;

        frames.push(FrameDetections { frame_id, objects });
    }

    serde_json::to_writer(writer, &frames)?;
    Ok(())
}
