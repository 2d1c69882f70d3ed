use clap::Parser;
use std::path::PathBuf;

pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
pub const RESULTS_FILE_NAME: &str = "results.json";
pub const DEFAULT_IMAGE_DIR: &str = "dataset";

pub const WINDOW_TITLE: &str = "Annotation Tool";
pub const DEFAULT_WINDOW_WIDTH: f32 = 800.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// Overlay strokes, in screen pixels
pub const STROKE_WIDTH: f32 = 2.0;
pub const FINAL_STROKE_RGB: [u8; 3] = [0, 0, 255];
pub const PREVIEW_STROKE_RGB: [u8; 3] = [255, 0, 0];

/// Draw bounding-box regions of interest over a directory of images.
///
/// Keys: Left/Right switch image, D removes the last box, S saves,
/// Q saves and quits.
#[derive(Parser, Debug)]
#[command(name = "roi-annotate", version)]
pub struct Args {
    /// Directory holding the images; results are saved next to them
    #[arg(value_name = "IMAGE_DIR", default_value = DEFAULT_IMAGE_DIR)]
    pub image_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_dir_defaults_when_omitted() {
        let args = Args::try_parse_from(["roi-annotate"]).unwrap();
        assert_eq!(args.image_dir, PathBuf::from(DEFAULT_IMAGE_DIR));
    }

    #[test]
    fn positional_image_dir() {
        let args = Args::try_parse_from(["roi-annotate", "/data/cells"]).unwrap();
        assert_eq!(args.image_dir, PathBuf::from("/data/cells"));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Args::try_parse_from(["roi-annotate", "--recursive"]).is_err());
    }
}
