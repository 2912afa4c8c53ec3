//! The `openimages` format: a single CSV with one row per detection, absolute
//! corner coordinates, and string labels resolved through the class-name
//! table.
//!
//! Rows are read and written by field name rather than by positional string
//! splitting, so column order mistakes surface as errors instead of silently
//! swapped coordinates.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::ConvertError;
use crate::geometry::BoundingBox;
use crate::types::{AnnotationSet, ClassNameTable, Detection};
use crate::utils::frame_index_from_name;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenImagesRow {
    /// `frame<N>.jpg`; carries the frame index.
    #[serde(rename = "ImageID")]
    pub image_id: String,
    #[serde(rename = "Source")]
    pub source: Option<String>,
    #[serde(rename = "LabelName")]
    pub label_name: String,
    #[serde(rename = "Confidence")]
    pub confidence: Option<f64>,
    #[serde(rename = "XMin")]
    pub xmin: f64,
    #[serde(rename = "XMax")]
    pub xmax: f64,
    #[serde(rename = "YMin")]
    pub ymin: f64,
    #[serde(rename = "YMax")]
    pub ymax: f64,
    #[serde(rename = "IsOccluded")]
    pub is_occluded: Option<String>,
    #[serde(rename = "IsTruncated")]
    pub is_truncated: Option<String>,
    #[serde(rename = "IsGroupOf")]
    pub is_group_of: Option<String>,
    #[serde(rename = "IsDepiction")]
    pub is_depiction: Option<String>,
    #[serde(rename = "IsInside")]
    pub is_inside: Option<String>,
}

/// Parse an openimages CSV stream into the canonical annotation set.
///
/// Labels are looked up in the class-name table, which applies its background
/// offset; an unknown label aborts the conversion.
pub fn parse<R: Read>(reader: R, table: &ClassNameTable) -> Result<AnnotationSet, ConvertError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut set = AnnotationSet::new();

    for row in csv_reader.deserialize() {
        let row: OpenImagesRow = row?;
        let frame_index = frame_index_from_name(&row.image_id)?;
        let class_id = table.class_id_for_label(&row.label_name)?;
        set.push(Detection {
            frame_index,
            class_id,
            confidence: row.confidence,
            bbox: BoundingBox::from_corners(row.xmin, row.ymin, row.xmax, row.ymax),
        });
    }

    Ok(set)
}

/// Serialize the annotation set as openimages CSV.
///
/// Frames without detections cannot be represented in this shape and are
/// dropped, as in the original tooling.
pub fn write<W: Write>(
    writer: W,
    set: &AnnotationSet,
    table: &ClassNameTable,
) -> Result<(), ConvertError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for detection in set.detections() {
        csv_writer.serialize(OpenImagesRow {
            image_id: format!("frame{}.jpg", detection.frame_index),
            source: None,
            label_name: table.label(detection.class_id)?.to_string(),
            confidence: detection.confidence,
            xmin: detection.bbox.xmin,
            xmax: detection.bbox.xmax,
            ymin: detection.bbox.ymin,
            ymax: detection.bbox.ymax,
            is_occluded: None,
            is_truncated: None,
            is_group_of: None,
            is_depiction: None,
            is_inside: None,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coco_names::coco_table;

    const HEADER: &str =
        "ImageID,Source,LabelName,Confidence,XMin,XMax,YMin,YMax,IsOccluded,IsTruncated,IsGroupOf,IsDepiction,IsInside";

    #[test]
    fn parses_row_with_background_offset() {
        let csv = format!("{HEADER}\nframe0.jpg,,person,0.8,100,200,50,150,,,,,\n");
        let set = parse(csv.as_bytes(), &coco_table()).unwrap();

        let detection = set.detections().next().unwrap();
        assert_eq!(detection.frame_index, 0);
        // "person" is table index 1; the background offset brings it to 0.
        assert_eq!(detection.class_id, 0);
        assert_eq!(detection.confidence, Some(0.8));
        assert_eq!(detection.bbox.xmin, 100.0);
        assert_eq!(detection.bbox.xmax, 200.0);
        assert_eq!(detection.bbox.ymin, 50.0);
        assert_eq!(detection.bbox.ymax, 150.0);
    }

    #[test]
    fn tolerates_padded_header_and_missing_confidence() {
        let csv = "ImageID, Source, LabelName, Confidence, XMin, XMax, YMin, YMax, IsOccluded, IsTruncated, IsGroupOf, IsDepiction, IsInside\n\
                   frame2.jpg, , car, , 10, 20, 30, 40, , , , , \n";
        let set = parse(csv.as_bytes(), &coco_table()).unwrap();

        let detection = set.detections().next().unwrap();
        assert_eq!(detection.frame_index, 2);
        assert_eq!(detection.class_id, 2);
        assert_eq!(detection.confidence, None);
    }

    #[test]
    fn unknown_label_is_fatal() {
        let csv = format!("{HEADER}\nframe0.jpg,,gryphon,0.8,100,200,50,150,,,,,\n");
        assert!(matches!(
            parse(csv.as_bytes(), &coco_table()),
            Err(ConvertError::UnknownLabel(label)) if label == "gryphon"
        ));
    }

    #[test]
    fn bad_image_id_is_fatal() {
        let csv = format!("{HEADER}\nshot0.jpg,,person,0.8,100,200,50,150,,,,,\n");
        assert!(matches!(
            parse(csv.as_bytes(), &coco_table()),
            Err(ConvertError::BadFrameToken { .. })
        ));
    }

    #[test]
    fn write_then_parse_round_trips() {
        let table = coco_table();
        let csv = format!("{HEADER}\nframe5.jpg,,bicycle,0.7,1,2,3,4,,,,,\n");
        let set = parse(csv.as_bytes(), &table).unwrap();

        let mut buffer = Vec::new();
        write(&mut buffer, &set, &table).unwrap();
        let reparsed = parse(buffer.as_slice(), &table).unwrap();

        assert_eq!(reparsed, set);
    }
}
