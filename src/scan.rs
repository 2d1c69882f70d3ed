use glob::{glob, Pattern};
use log::{debug, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::IMAGE_EXTENSIONS;
use crate::error::Result;
use crate::model::ImageId;

#[derive(Clone, Debug)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub id: ImageId,
}

/// Images discovered in one directory, in listing order. Fixed after scan.
#[derive(Clone, Debug, Default)]
pub struct ImageSequence {
    entries: Vec<ImageEntry>,
}

impl ImageSequence {
    /// Pairs each path with its identifier. A path whose identifier is already
    /// taken is dropped so that identifiers stay unique.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for path in paths {
            let Some(id) = ImageId::from_path(&path) else {
                warn!("Skipping image with unusable file name: {}", path.display());
                continue;
            };
            if !seen.insert(id.clone()) {
                warn!(
                    "Skipping {}: identifier '{}' already used by another image",
                    path.display(),
                    id
                );
                continue;
            }
            entries.push(ImageEntry { path, id });
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ImageId> {
        self.entries.iter().map(|e| &e.id)
    }
}

/// Lists images for `dir`.
///
/// The path is first used as a raw prefix (`<dir>*.png`); if nothing matches
/// it is treated as a directory (`<dir>/*.png`). Any failure yields an empty
/// sequence.
pub fn scan_images(dir: &Path) -> ImageSequence {
    let prefix = Pattern::escape(&dir.to_string_lossy());

    let mut files = match collect(|ext| format!("{prefix}*.{ext}")) {
        Ok(files) => files,
        Err(e) => {
            warn!("Could not scan {}: {e}", dir.display());
            return ImageSequence::default();
        }
    };

    if files.is_empty() {
        let sep = std::path::MAIN_SEPARATOR;
        files = match collect(|ext| format!("{prefix}{sep}*.{ext}")) {
            Ok(files) => files,
            Err(e) => {
                warn!("Could not scan {}: {e}", dir.display());
                return ImageSequence::default();
            }
        };
    }

    let sequence = ImageSequence::from_paths(files);
    debug!("Found {} images in {}", sequence.len(), dir.display());
    sequence
}

fn collect(pattern_for: impl Fn(&str) -> String) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for ext in IMAGE_EXTENSIONS {
        for entry in glob(&pattern_for(ext))? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => debug!("Unreadable entry while scanning: {e}"),
            }
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn ids(seq: &ImageSequence) -> Vec<String> {
        let mut ids: Vec<String> = seq.ids().map(|id| id.to_string()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn finds_recognized_extensions_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "b.png");
        touch(dir.path(), "c.jpeg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "results.json");

        let seq = scan_images(dir.path());
        assert_eq!(ids(&seq), vec!["a", "b", "c"]);
    }

    #[test]
    fn trailing_separator_also_works() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.jpg");

        let with_sep = PathBuf::from(format!(
            "{}{}",
            dir.path().display(),
            std::path::MAIN_SEPARATOR
        ));
        assert_eq!(ids(&scan_images(&with_sep)), vec!["a"]);
        assert_eq!(ids(&scan_images(dir.path())), vec!["a"]);
    }

    #[test]
    fn prefix_match_wins_over_directory_listing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "shots_1.png");
        touch(dir.path(), "shots_2.png");
        touch(dir.path(), "other.png");

        let seq = scan_images(&dir.path().join("shots_"));
        assert_eq!(ids(&seq), vec!["shots_1", "shots_2"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let seq = scan_images(Path::new("/definitely/not/here"));
        assert!(seq.is_empty());
        assert!(seq.get(0).is_none());
    }

    #[test]
    fn colliding_stems_keep_first() {
        let seq = ImageSequence::from_paths(vec![
            PathBuf::from("x/a.png"),
            PathBuf::from("x/a.jpg"),
            PathBuf::from("x/b.jpg"),
        ]);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(0).unwrap().path, PathBuf::from("x/a.png"));
        assert_eq!(seq.get(1).unwrap().id.as_str(), "b");
    }
}
