//! The conversion pipeline: parse any supported source format into the
//! canonical [`AnnotationSet`], filter, and serialize to any target format.
//!
//! Every (source, target) pair goes through the same in-memory intermediate,
//! so adding a format means adding one parser and one serializer rather than
//! another pairwise conversion function. The historical
//! `faster -> openimages -> yolo` two-hop is subsumed by a direct call.

use log::info;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::Format;
use crate::error::ConvertError;
use crate::frame_files::{self, TextLayout};
use crate::geometry::Resolution;
use crate::types::{AnnotationSet, ClassNameTable};
use crate::utils::{create_output_directory, create_progress_bar};
use crate::{faster, opendatacam, openimages};

/// Side configuration for a conversion, external to the annotation data.
pub struct ConvertOptions<'a> {
    /// Frame resolution; mandatory when either side of the conversion uses
    /// relative coordinates, unused otherwise.
    pub resolution: Option<Resolution>,
    /// Class ids to keep. Empty means keep everything.
    pub class_filter: HashSet<u32>,
    pub table: &'a ClassNameTable,
}

/// Parse the input path (file or per-frame directory) into the canonical set.
pub fn parse_input(
    input: &Path,
    format: Format,
    options: &ConvertOptions<'_>,
) -> Result<AnnotationSet, ConvertError> {
    let resolution = options.resolution.as_ref();
    match format {
        Format::OpendatacamYolo => {
            let resolution = resolution.ok_or(ConvertError::MissingResolution(format.token()))?;
            opendatacam::parse(File::open(input)?, resolution)
        }
        Format::Openimages => openimages::parse(File::open(input)?, options.table),
        Format::Faster => faster::parse(File::open(input)?, options.table),
        Format::RelXywh => frame_files::read_dir(input, TextLayout::RelXywh, resolution),
        Format::AbsXywh => frame_files::read_dir(input, TextLayout::AbsXywh, resolution),
        Format::Yolo => frame_files::read_dir(input, TextLayout::Yolo, resolution),
        Format::Absolute => frame_files::read_dir(input, TextLayout::Absolute, resolution),
    }
}

/// Serialize the (already filtered) set to the output path.
pub fn write_output(
    output: &Path,
    format: Format,
    set: &AnnotationSet,
    options: &ConvertOptions<'_>,
) -> Result<(), ConvertError> {
    let resolution = options.resolution.as_ref();
    match format {
        Format::OpendatacamYolo => {
            let resolution = resolution.ok_or(ConvertError::MissingResolution(format.token()))?;
            let mut writer = BufWriter::new(File::create(output)?);
            opendatacam::write(&mut writer, set, resolution, options.table)?;
            writer.flush()?;
            Ok(())
        }
        Format::Openimages => {
            let mut writer = BufWriter::new(File::create(output)?);
            openimages::write(&mut writer, set, options.table)?;
            writer.flush()?;
            Ok(())
        }
        Format::Faster => {
            let mut writer = BufWriter::new(File::create(output)?);
            faster::write(&mut writer, set, options.table)?;
            writer.flush()?;
            Ok(())
        }
        Format::RelXywh | Format::AbsXywh | Format::Yolo | Format::Absolute => {
            let layout = match format {
                Format::RelXywh => TextLayout::RelXywh,
                Format::AbsXywh => TextLayout::AbsXywh,
                Format::Yolo => TextLayout::Yolo,
                _ => TextLayout::Absolute,
            };
            create_output_directory(output)?;
            let pb = create_progress_bar(set.frame_count() as u64, "Write");
            frame_files::write_dir(output, set, layout, resolution, &pb)?;
            pb.finish_with_message("Frame files written");
            Ok(())
        }
    }
}

/// Run one complete conversion: parse, filter, serialize.
///
/// A missing-but-required resolution is reported before any output file or
/// directory is touched.
pub fn convert(
    input: &Path,
    input_format: Format,
    output: &Path,
    output_format: Format,
    options: &ConvertOptions<'_>,
) -> Result<(), ConvertError> {
    if (input_format.is_relative() || output_format.is_relative()) && options.resolution.is_none()
    {
        let format = if input_format.is_relative() {
            input_format
        } else {
            output_format
        };
        return Err(ConvertError::MissingResolution(format.token()));
    }

    let mut set = parse_input(input, input_format, options)?;
    info!(
        "Parsed {} detections across {} frames from {} input",
        set.len(),
        set.frame_count(),
        input_format.token()
    );

    set.retain_classes(&options.class_filter);
    if !options.class_filter.is_empty() {
        info!("{} detections retained after class filtering", set.len());
    }

    write_output(output, output_format, &set, options)?;
    info!(
        "Wrote {} output to {}",
        output_format.token(),
        output.display()
    );
    Ok(())
}
