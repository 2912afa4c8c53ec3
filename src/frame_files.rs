//! The per-frame text formats: a directory holding one `frame<N>.txt` per
//! frame, one detection per line.
//!
//! Four line layouts share the machinery here. Floats are rendered in
//! shortest round-trip form (`512.0`, `0.1388888888888889`), reproducing the
//! output of the tooling these directories feed into evaluation with.

use glob::glob;
use indicatif::ProgressBar;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ConvertError;
use crate::geometry::{BoundingBox, Resolution};
use crate::types::{AnnotationSet, Detection};
use crate::utils::frame_index_from_stem;

/// The per-line field layout of a frame-file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLayout {
    /// `class_id confidence center_x center_y width height`, relative
    RelXywh,
    /// `class_id confidence xmin ymin width height`, absolute
    AbsXywh,
    /// `class_id center_x center_y width height`, relative
    Yolo,
    /// `class_id xmin ymin width height`, absolute
    Absolute,
}

impl TextLayout {
    pub fn has_confidence(self) -> bool {
        matches!(self, TextLayout::RelXywh | TextLayout::AbsXywh)
    }

    pub fn is_relative(self) -> bool {
        matches!(self, TextLayout::RelXywh | TextLayout::Yolo)
    }
}

/// Read a directory of `frame<N>.txt` files into the canonical annotation
/// set. Every file contributes its frame to the enumeration, empty files
/// included; a file whose name does not carry a frame token is a parse error.
pub fn read_dir(
    dir: &Path,
    layout: TextLayout,
    resolution: Option<&Resolution>,
) -> Result<AnnotationSet, ConvertError> {
    let resolution = required_resolution(layout, resolution)?;
    let pattern = format!("{}/*.txt", dir.display());
    let mut set = AnnotationSet::new();

    for entry in glob(&pattern)? {
        let path = entry?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| ConvertError::BadFrameToken {
                token: path.display().to_string(),
            })?;
        let frame_index = frame_index_from_stem(stem)?;
        set.ensure_frame(frame_index);

        let content = fs::read_to_string(&path)?;
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            set.push(parse_line(line, layout, frame_index, resolution, &path)?);
        }
    }

    Ok(set)
}

/// Write the annotation set as a directory of `frame<N>.txt` files, one per
/// frame present in the set. A frame with zero detections produces an empty
/// file, preserving the frame enumeration downstream evaluators expect.
/// Lines are newline-joined with no trailing blank line.
pub fn write_dir(
    dir: &Path,
    set: &AnnotationSet,
    layout: TextLayout,
    resolution: Option<&Resolution>,
    pb: &ProgressBar,
) -> Result<(), ConvertError> {
    let resolution = required_resolution(layout, resolution)?;

    for (frame_index, detections) in set.frames() {
        let path = dir.join(format!("frame{frame_index}.txt"));
        let mut writer = BufWriter::new(File::create(&path)?);

        let lines: Vec<String> = detections
            .iter()
            .map(|detection| format_line(detection, layout, resolution))
            .collect::<Result<_, _>>()?;
        writer.write_all(lines.join("\n").as_bytes())?;
        writer.flush()?;
        pb.inc(1);
    }

    Ok(())
}

fn required_resolution<'a>(
    layout: TextLayout,
    resolution: Option<&'a Resolution>,
) -> Result<Option<&'a Resolution>, ConvertError> {
    if layout.is_relative() && resolution.is_none() {
        return Err(ConvertError::MissingResolution(match layout {
            TextLayout::RelXywh => "rel_xywh",
            TextLayout::Yolo => "yolo",
            _ => unreachable!(),
        }));
    }
    Ok(resolution)
}

/// Parse one detection line. Layouts that carry a confidence column also
/// accept a line with that column missing (ground-truth sets omit it); the
/// confidence is then `None` rather than a made-up value.
fn parse_line(
    line: &str,
    layout: TextLayout,
    frame_index: u32,
    resolution: Option<&Resolution>,
    path: &Path,
) -> Result<Detection, ConvertError> {
    let malformed = |reason: String| ConvertError::MalformedRecord {
        path: path.to_path_buf(),
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let expected = if layout.has_confidence() { 6 } else { 5 };
    // A 5-field line in a 6-field layout is ground truth without scores.
    let has_confidence_column = match fields.len() {
        n if n == expected => layout.has_confidence(),
        n if n + 1 == expected && layout.has_confidence() => false,
        n => {
            return Err(malformed(format!(
                "expected {expected} fields, found {n}: '{line}'"
            )))
        }
    };

    let class_id: u32 = fields[0]
        .parse()
        .map_err(|_| malformed(format!("bad class id '{}'", fields[0])))?;

    let mut rest = fields[1..].iter();
    let mut next_float = |name: &str| -> Result<f64, ConvertError> {
        let field = rest
            .next()
            .ok_or_else(|| malformed(format!("missing field '{name}'")))?;
        field
            .parse::<f64>()
            .map_err(|_| malformed(format!("bad value '{field}' for field '{name}'")))
    };

    let confidence = if has_confidence_column {
        Some(next_float("confidence")?)
    } else {
        None
    };

    let (a, b, c, d) = (
        next_float("x")?,
        next_float("y")?,
        next_float("width")?,
        next_float("height")?,
    );

    let bbox = match layout {
        TextLayout::RelXywh | TextLayout::Yolo => {
            // Checked in required_resolution.
            let resolution = resolution.ok_or(ConvertError::MissingResolution("rel_xywh"))?;
            BoundingBox::from_relative_center_size(a, b, c, d, resolution)
        }
        TextLayout::AbsXywh | TextLayout::Absolute => BoundingBox::from_min_size(a, b, c, d),
    };

    Ok(Detection {
        frame_index,
        class_id,
        confidence,
        bbox,
    })
}

/// Render one detection line for the given layout. A detection without a
/// confidence serializes without the confidence column.
fn format_line(
    detection: &Detection,
    layout: TextLayout,
    resolution: Option<&Resolution>,
) -> Result<String, ConvertError> {
    let (a, b, c, d) = match layout {
        TextLayout::RelXywh | TextLayout::Yolo => {
            let resolution = resolution.ok_or(ConvertError::MissingResolution("rel_xywh"))?;
            detection.bbox.relative_center_size(resolution)
        }
        TextLayout::AbsXywh | TextLayout::Absolute => (
            detection.bbox.xmin,
            detection.bbox.ymin,
            detection.bbox.width(),
            detection.bbox.height(),
        ),
    };

    Ok(match (layout.has_confidence(), detection.confidence) {
        (true, Some(confidence)) => format!(
            "{} {:?} {:?} {:?} {:?} {:?}",
            detection.class_id, confidence, a, b, c, d
        ),
        _ => format!("{} {:?} {:?} {:?} {:?}", detection.class_id, a, b, c, d),
    })
}
