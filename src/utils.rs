use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

use crate::error::ConvertError;

/// Extract the frame index from a `frame<N>` file-name stem.
///
/// The frame index is always taken from the embedded token (or an explicit
/// field in the source record), never inferred from file position; a stem
/// that does not carry the token is a parse error.
pub fn frame_index_from_stem(stem: &str) -> Result<u32, ConvertError> {
    stem.strip_prefix("frame")
        .and_then(|digits| digits.parse::<u32>().ok())
        .ok_or_else(|| ConvertError::BadFrameToken {
            token: stem.to_string(),
        })
}

/// Extract the frame index from a `frame<N>.<ext>` file name, e.g. the
/// `frame12.jpg` ImageID used by the openimages format.
pub fn frame_index_from_name(name: &str) -> Result<u32, ConvertError> {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| ConvertError::BadFrameToken {
            token: name.to_string(),
        })?;
    frame_index_from_stem(stem)
}

/// Safely create an output directory, clearing it first if it already exists.
pub fn create_output_directory(path: &Path) -> std::io::Result<std::path::PathBuf> {
    if path.exists() {
        log::warn!(
            "Directory {:?} already exists. Deleting and recreating it.",
            path
        );
        fs::remove_dir_all(path).and_then(|_| fs::create_dir_all(path))?;
    } else {
        fs::create_dir_all(path)?;
    }
    Ok(path.to_path_buf())
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_stem_parses() {
        assert_eq!(frame_index_from_stem("frame0").unwrap(), 0);
        assert_eq!(frame_index_from_stem("frame1234").unwrap(), 1234);
    }

    #[test]
    fn frame_stem_rejects_bad_tokens() {
        assert!(frame_index_from_stem("img3").is_err());
        assert!(frame_index_from_stem("frame").is_err());
        assert!(frame_index_from_stem("frame-3").is_err());
        assert!(frame_index_from_stem("3").is_err());
    }

    #[test]
    fn frame_name_strips_extension() {
        assert_eq!(frame_index_from_name("frame17.jpg").unwrap(), 17);
        assert_eq!(frame_index_from_name("frame17.txt").unwrap(), 17);
        assert!(frame_index_from_name("frame17.jpg.bak").is_err());
    }
}
