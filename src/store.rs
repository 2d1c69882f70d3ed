use log::{debug, info};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::RESULTS_FILE_NAME;
use crate::error::{AnnotateError, Result};
use crate::model::{ImageId, Rect};
use crate::scan::{scan_images, ImageSequence};

pub type Labels = BTreeMap<ImageId, Vec<Rect>>;

pub fn results_path(dir: &Path) -> PathBuf {
    dir.join(RESULTS_FILE_NAME)
}

/// Rectangles drawn on each image of a directory, in draw order.
///
/// Every scanned image has an entry, possibly empty, and no other key exists.
#[derive(Debug)]
pub struct AnnotationStore {
    dir: PathBuf,
    images: ImageSequence,
    labels: Labels,
}

impl AnnotationStore {
    /// Scans `dir` and merges in `results.json` when present.
    ///
    /// A missing results file means no prior annotations. An unreadable or
    /// malformed one is an error. Saved keys with no matching image are dropped.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut store = Self::new(dir, scan_images(dir));

        let path = results_path(dir);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved annotations at {}", path.display());
                return Ok(store);
            }
            Err(source) => return Err(AnnotateError::Io { path, source }),
        };
        let saved: Labels = serde_json::from_str(&data)
            .map_err(|source| AnnotateError::Malformed { path: path.clone(), source })?;

        let mut restored = 0;
        for (id, rects) in saved {
            match store.labels.get_mut(&id) {
                Some(list) => {
                    restored += rects.len();
                    list.extend(rects);
                }
                None => debug!("Dropping saved boxes for missing image '{id}'"),
            }
        }
        info!(
            "Loaded {} boxes for {} images from {}",
            restored,
            store.images.len(),
            path.display()
        );
        Ok(store)
    }

    /// Store with an empty list for every image in `images`.
    pub fn new(dir: &Path, images: ImageSequence) -> Self {
        let labels = images.ids().map(|id| (id.clone(), Vec::new())).collect();
        Self {
            dir: dir.to_path_buf(),
            images,
            labels,
        }
    }

    /// Writes every key, including empty ones, replacing any previous file.
    pub fn save(&self) -> Result<()> {
        let path = results_path(&self.dir);
        let data = serde_json::to_string_pretty(&self.labels).map_err(AnnotateError::Encode)?;
        std::fs::write(&path, data).map_err(|source| AnnotateError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Saved {} images to {}", self.labels.len(), path.display());
        Ok(())
    }

    /// Appends without validation; boxes may extend past the image.
    pub fn append(&mut self, id: &ImageId, rect: Rect) {
        match self.labels.get_mut(id) {
            Some(list) => list.push(rect),
            None => debug!("Ignoring box for unknown image '{id}'"),
        }
    }

    /// Drops the most recent box of `id`. Returns false if there was none.
    pub fn remove_last(&mut self, id: &ImageId) -> bool {
        self.labels
            .get_mut(id)
            .and_then(|list| list.pop())
            .is_some()
    }

    pub fn rects(&self, id: &ImageId) -> &[Rect] {
        self.labels.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn images(&self) -> &ImageSequence {
        &self.images
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
