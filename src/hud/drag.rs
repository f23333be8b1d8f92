//! Mouse drag session for repositioning the HUD.
//!
//! A session exists only between a left press on the HUD and the matching
//! release. The HUD model holds it in an `Option` and every exit path (release,
//! another button, hide, lock, blur, drop) takes it out, so a session can never
//! outlive its gesture.

use super::types::Position;
use tracing::trace;

/// Bounds a drag may move the HUD within: the terminal size minus the HUD size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Rightmost column the HUD's left edge may reach.
    pub max_x: u16,
    /// Lowest row the HUD's top edge may reach.
    pub max_y: u16,
}

/// One drag gesture: where the pointer went down and where the HUD was then.
#[derive(Debug)]
pub struct DragSession {
    pointer_start: (u16, u16),
    hud_start: Position,
}

impl DragSession {
    /// Begins a drag with the pointer at `(x, y)` and the HUD at `hud`.
    pub fn begin(x: u16, y: u16, hud: Position) -> Self {
        trace!(x, y, "drag session started");
        Self {
            pointer_start: (x, y),
            hud_start: hud,
        }
    }

    /// Pointer movement since the press.
    pub fn offset(&self, x: u16, y: u16) -> (i32, i32) {
        (
            i32::from(x) - i32::from(self.pointer_start.0),
            i32::from(y) - i32::from(self.pointer_start.1),
        )
    }

    /// Where the HUD goes with the pointer at `(x, y)`, kept on-screen.
    pub fn position_at(&self, x: u16, y: u16, bounds: Option<Bounds>) -> Position {
        let (dx, dy) = self.offset(x, y);
        let (max_x, max_y) = bounds
            .map(|b| (i32::from(b.max_x), i32::from(b.max_y)))
            .unwrap_or((i32::from(u16::MAX), i32::from(u16::MAX)));
        Position {
            x: (i32::from(self.hud_start.x) + dx).clamp(0, max_x) as u16,
            y: (i32::from(self.hud_start.y) + dy).clamp(0, max_y) as u16,
        }
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        trace!("drag session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_follows_pointer() {
        let drag = DragSession::begin(10, 5, Position { x: 3, y: 2 });
        assert_eq!(drag.offset(14, 3), (4, -2));
        assert_eq!(drag.position_at(14, 3, None), Position { x: 7, y: 0 });
    }

    #[test]
    fn test_position_never_negative() {
        let drag = DragSession::begin(10, 10, Position { x: 1, y: 1 });
        assert_eq!(drag.position_at(0, 0, None), Position { x: 0, y: 0 });
    }

    #[test]
    fn test_position_clamped_to_bounds() {
        let drag = DragSession::begin(0, 0, Position { x: 0, y: 0 });
        let bounds = Bounds { max_x: 20, max_y: 5 };
        assert_eq!(
            drag.position_at(50, 50, Some(bounds)),
            Position { x: 20, y: 5 }
        );
    }
}
