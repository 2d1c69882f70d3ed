use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A point in image pixel coordinates. May lie outside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One region of interest, top-left origin.
///
/// Persisted as a bare `[x, y, width, height]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32, u32, u32)", into = "(i32, i32, u32, u32)")]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corners, whatever the drag direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn max(&self) -> Point {
        Point::new(
            self.x.saturating_add_unsigned(self.width),
            self.y.saturating_add_unsigned(self.height),
        )
    }
}

impl From<(i32, i32, u32, u32)> for Rect {
    fn from((x, y, width, height): (i32, i32, u32, u32)) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<Rect> for (i32, i32, u32, u32) {
    fn from(r: Rect) -> Self {
        (r.x, r.y, r.width, r.height)
    }
}

/// Annotation key of an image: its file name up to the first `.`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let stem = name.split('.').next().unwrap_or(name);
        Some(Self(stem.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn corners_normalize_in_any_direction() {
        let r = Rect::from_corners(Point::new(50, 50), Point::new(10, 80));
        assert_eq!(r, Rect::new(10, 50, 40, 30));

        let r = Rect::from_corners(Point::new(10, 80), Point::new(50, 50));
        assert_eq!(r, Rect::new(10, 50, 40, 30));
    }

    #[test]
    fn rect_may_start_outside_image() {
        let r = Rect::from_corners(Point::new(-5, 3), Point::new(5, -2));
        assert_eq!(r, Rect::new(-5, -2, 10, 5));
        assert_eq!(r.max(), Point::new(5, 3));
    }

    #[test]
    fn rect_serializes_as_four_tuple() {
        let json = serde_json::to_string(&Rect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, "[1,2,3,4]");
        let back: Rect = serde_json::from_str("[7,8,9,10]").unwrap();
        assert_eq!(back, Rect::new(7, 8, 9, 10));
    }

    #[test]
    fn negative_size_is_rejected() {
        assert!(serde_json::from_str::<Rect>("[0,0,-1,4]").is_err());
    }

    #[test]
    fn id_stops_at_first_dot() {
        let id = ImageId::from_path(&PathBuf::from("/data/set/scan.v2.png")).unwrap();
        assert_eq!(id.as_str(), "scan");
        let id = ImageId::from_path(&PathBuf::from("b.jpeg")).unwrap();
        assert_eq!(id.as_str(), "b");
    }
}
