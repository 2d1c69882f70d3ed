use log::debug;
use std::path::Path;

use crate::cursor::Cursor;
use crate::draw::DrawState;
use crate::error::Result;
use crate::model::{Point, Rect};
use crate::scan::ImageEntry;
use crate::store::AnnotationStore;

/// Keyboard actions on the main view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Previous,
    Next,
    RemoveLast,
    Save,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    /// Displayed image or its boxes changed.
    Changed,
    Saved,
    /// Save requested with no images loaded; nothing was written.
    NothingToSave,
    /// Saved (when there was anything to save); the caller should exit.
    Quit,
}

/// One annotation session over a directory, independent of any UI toolkit.
#[derive(Debug)]
pub struct Session {
    store: AnnotationStore,
    cursor: Cursor,
    draw: DrawState,
}

impl Session {
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self::new(AnnotationStore::load(dir)?))
    }

    pub fn new(store: AnnotationStore) -> Self {
        let cursor = Cursor::new(store.images().len());
        Self {
            store,
            cursor,
            draw: DrawState::Idle,
        }
    }

    pub fn handle(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Previous => Ok(self.step(-1)),
            Command::Next => Ok(self.step(1)),
            Command::RemoveLast => {
                let Some(entry) = self.current() else {
                    return Ok(Outcome::Unchanged);
                };
                let id = entry.id.clone();
                if self.store.remove_last(&id) {
                    Ok(Outcome::Changed)
                } else {
                    Ok(Outcome::Unchanged)
                }
            }
            Command::Save => {
                if self.is_empty() {
                    debug!("Nothing to save: no images loaded");
                    return Ok(Outcome::NothingToSave);
                }
                self.store.save()?;
                Ok(Outcome::Saved)
            }
            Command::Quit => {
                if !self.is_empty() {
                    self.store.save()?;
                }
                Ok(Outcome::Quit)
            }
        }
    }

    fn step(&mut self, delta: isize) -> Outcome {
        match self.cursor.advance(delta) {
            Some(index) => {
                self.draw.cancel();
                debug!("Showing image {}/{}", index + 1, self.cursor.len());
                Outcome::Changed
            }
            None => Outcome::Unchanged,
        }
    }

    pub fn press(&mut self, at: Point) {
        if !self.is_empty() {
            self.draw.press(at);
        }
    }

    pub fn drag_to(&mut self, to: Point) {
        self.draw.moved(to);
    }

    /// Commits the box of the finished drag to the current image.
    pub fn release(&mut self, at: Point) -> Option<Rect> {
        let rect = self.draw.release(at)?;
        self.commit(rect)
    }

    /// Commits the drag at its last known pointer position, for releases
    /// reported without one (pointer outside the window).
    pub fn release_at_last(&mut self) -> Option<Rect> {
        let rect = self.draw.release_at_end()?;
        self.commit(rect)
    }

    fn commit(&mut self, rect: Rect) -> Option<Rect> {
        let id = self.current()?.id.clone();
        self.store.append(&id, rect);
        debug!("Added {rect:?} to '{id}'");
        Some(rect)
    }

    pub fn preview(&self) -> Option<Rect> {
        self.draw.preview()
    }

    pub fn is_dragging(&self) -> bool {
        self.draw.is_dragging()
    }

    pub fn current(&self) -> Option<&ImageEntry> {
        self.store.images().get(self.cursor.index()?)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor.index()
    }

    pub fn current_rects(&self) -> &[Rect] {
        match self.current() {
            Some(entry) => self.store.rects(&entry.id),
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.images().is_empty()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }
}
