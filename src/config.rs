use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for converting detection annotations between formats.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Path to the input annotations (a file, or a directory for per-frame formats)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Format of the input annotations
    #[arg(long = "input_format", value_enum)]
    pub input_format: Format,

    /// Path to write the output annotations to (a file, or a directory for per-frame formats)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Desired format of the output annotations
    #[arg(long = "output_format", value_enum)]
    pub output_format: Format,

    /// Optional list of class ids to keep; an empty list keeps every detection
    #[arg(long = "class_filter", use_value_delimiter = true)]
    pub class_filter: Vec<u32>,

    /// Frame width in pixels, required whenever a relative-coordinate format is involved
    #[arg(long = "width", requires = "height")]
    pub width: Option<u32>,

    /// Frame height in pixels
    #[arg(long = "height", requires = "width")]
    pub height: Option<u32>,
}

/// The supported annotation serializations.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Format {
    /// JSON emitted by the opendatacam yolo tap: one entry per frame with
    /// relative center/size boxes
    #[value(name = "opendatacam_yolo", alias = "opendatacamyolo")]
    OpendatacamYolo,
    /// CSV with one row per detection and absolute corner coordinates
    #[value(name = "openimages")]
    Openimages,
    /// JSON emitted by the Faster R-CNN driver: absolute corner boxes keyed
    /// by table category id
    #[value(name = "faster")]
    Faster,
    /// One text file per frame: `class confidence center_x center_y width height`, relative
    #[value(name = "rel_xywh", alias = "relxywh")]
    RelXywh,
    /// One text file per frame: `class confidence xmin ymin width height`, absolute
    #[value(name = "abs_xywh", alias = "absxywh")]
    AbsXywh,
    /// One text file per frame: `class center_x center_y width height`, relative
    #[value(name = "yolo")]
    Yolo,
    /// One text file per frame: `class xmin ymin width height`, absolute
    #[value(name = "absolute")]
    Absolute,
}

impl Format {
    /// The canonical command-line token for this format.
    pub fn token(self) -> &'static str {
        match self {
            Format::OpendatacamYolo => "opendatacam_yolo",
            Format::Openimages => "openimages",
            Format::Faster => "faster",
            Format::RelXywh => "rel_xywh",
            Format::AbsXywh => "abs_xywh",
            Format::Yolo => "yolo",
            Format::Absolute => "absolute",
        }
    }

    /// Whether this format stores boxes in relative coordinates, which makes
    /// a resolution mandatory for crossing into the canonical absolute space.
    pub fn is_relative(self) -> bool {
        matches!(
            self,
            Format::OpendatacamYolo | Format::RelXywh | Format::Yolo
        )
    }

    /// Whether this format is a directory of `frame<N>.txt` files rather
    /// than a single file.
    pub fn is_per_frame(self) -> bool {
        matches!(
            self,
            Format::RelXywh | Format::AbsXywh | Format::Yolo | Format::Absolute
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_parse() {
        Args::command().debug_assert();
    }

    #[test]
    fn format_tokens_round_trip() {
        for format in [
            Format::OpendatacamYolo,
            Format::Openimages,
            Format::Faster,
            Format::RelXywh,
            Format::AbsXywh,
            Format::Yolo,
            Format::Absolute,
        ] {
            let parsed = Format::from_str(format.token(), false).unwrap();
            assert_eq!(parsed, format);
        }
        // The short aliases from the original tool are still accepted.
        assert_eq!(
            Format::from_str("relxywh", false).unwrap(),
            Format::RelXywh
        );
        assert_eq!(
            Format::from_str("absxywh", false).unwrap(),
            Format::AbsXywh
        );
        assert_eq!(
            Format::from_str("opendatacamyolo", false).unwrap(),
            Format::OpendatacamYolo
        );
    }

    #[test]
    fn relative_formats_need_resolution() {
        assert!(Format::OpendatacamYolo.is_relative());
        assert!(Format::RelXywh.is_relative());
        assert!(Format::Yolo.is_relative());
        assert!(!Format::Openimages.is_relative());
        assert!(!Format::Faster.is_relative());
        assert!(!Format::AbsXywh.is_relative());
        assert!(!Format::Absolute.is_relative());
    }
}
