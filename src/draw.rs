use crate::model::{Point, Rect};

/// Pointer gesture that draws one box.
///
/// Idle until a press; while dragging the end point follows the pointer; a
/// release yields the normalized box and returns to idle. Zero-area boxes
/// from a click are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawState {
    #[default]
    Idle,
    Dragging { origin: Point, end: Point },
}

impl DrawState {
    pub fn press(&mut self, at: Point) {
        *self = DrawState::Dragging { origin: at, end: at };
    }

    pub fn moved(&mut self, to: Point) {
        if let DrawState::Dragging { end, .. } = self {
            *end = to;
        }
    }

    /// Finishes the gesture. `None` if no drag was in progress.
    pub fn release(&mut self, at: Point) -> Option<Rect> {
        match std::mem::take(self) {
            DrawState::Dragging { origin, .. } => Some(Rect::from_corners(origin, at)),
            DrawState::Idle => None,
        }
    }

    /// Finishes the gesture at the last tracked pointer position.
    pub fn release_at_end(&mut self) -> Option<Rect> {
        match *self {
            DrawState::Dragging { end, .. } => self.release(end),
            DrawState::Idle => None,
        }
    }

    /// Abandons a drag without producing a box.
    pub fn cancel(&mut self) {
        *self = DrawState::Idle;
    }

    /// Live box from the origin to the latest pointer position.
    pub fn preview(&self) -> Option<Rect> {
        match *self {
            DrawState::Dragging { origin, end } => Some(Rect::from_corners(origin, end)),
            DrawState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DrawState::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_up_and_left_normalizes() {
        let mut state = DrawState::default();
        state.press(Point::new(50, 50));
        state.moved(Point::new(30, 60));
        assert_eq!(state.preview(), Some(Rect::new(30, 50, 20, 10)));

        let rect = state.release(Point::new(10, 80));
        assert_eq!(rect, Some(Rect::new(10, 50, 40, 30)));
        assert_eq!(state, DrawState::Idle);
        assert_eq!(state.preview(), None);
    }

    #[test]
    fn click_records_zero_area_box() {
        let mut state = DrawState::default();
        state.press(Point::new(7, 9));
        assert_eq!(state.release(Point::new(7, 9)), Some(Rect::new(7, 9, 0, 0)));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = DrawState::default();
        state.moved(Point::new(1, 1));
        assert_eq!(state, DrawState::Idle);
        assert_eq!(state.release(Point::new(3, 3)), None);
    }

    #[test]
    fn release_without_position_uses_last_move() {
        let mut state = DrawState::default();
        state.press(Point::new(4, 4));
        state.moved(Point::new(10, 1));
        assert_eq!(state.release_at_end(), Some(Rect::new(4, 1, 6, 3)));
        assert_eq!(state, DrawState::Idle);
        assert_eq!(state.release_at_end(), None);
    }

    #[test]
    fn every_gesture_starts_fresh() {
        let mut state = DrawState::default();
        state.press(Point::new(0, 0));
        state.release(Point::new(5, 5));
        state.press(Point::new(100, 100));
        assert_eq!(state.preview(), Some(Rect::new(100, 100, 0, 0)));
        state.cancel();
        assert!(!state.is_dragging());
    }
}
