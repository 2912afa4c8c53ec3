//! Object-detection annotation format converter
//!
//! This library converts bounding-box annotations between detector and
//! evaluator formats through a single canonical in-memory representation,
//! with an optional class-id filter and the relative/absolute coordinate
//! conversions each target format needs.

pub mod coco_names;
pub mod config;
pub mod error;
pub mod faster;
pub mod frame_files;
pub mod geometry;
pub mod opendatacam;
pub mod openimages;
pub mod pipeline;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Args, Format};
pub use error::ConvertError;
pub use geometry::{BoundingBox, Resolution};
pub use pipeline::{convert, ConvertOptions};
pub use types::{AnnotationSet, ClassNameTable, Detection};
