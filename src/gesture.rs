//! Pointer gestures against the store.
//!
//! The store accepts any assignment; these helpers are how the input layer
//! keeps the gesture fields consistent:
//!
//! ```text
//!   Idle ──down (brush/pencil/eraser)──► ActiveStroke ──up/cancel──► Idle
//!   Idle ──down (shape)────────────────► ActiveShape  ──up/cancel──► Idle
//! ```
//!
//! Leaving the canvas cancels. Whatever the gesture held (`shape_start`,
//! `snapshot`) is handed back in a [`GestureEnd`] so the canvas can commit or
//! restore it; the store never keeps them past the gesture.

use egui::Pos2;

use crate::canvas::Snapshot;
use crate::store::PaintStore;
use crate::tool::{GesturePhase, ToolKind};

/// What a finished or cancelled gesture leaves behind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureEnd {
    /// The tool the gesture was made with, `None` if no gesture was active
    pub kind: Option<ToolKind>,
    pub shape_start: Option<Pos2>,
    pub snapshot: Option<Snapshot>,
    pub last_pos: Option<Pos2>,
}

impl GestureEnd {
    pub fn was_active(&self) -> bool {
        self.kind.is_some()
    }
}

/// Starts a gesture at `pos`. Shape tools also record the drag origin and a
/// snapshot of the canvas, which `take_snapshot` is only called to produce then.
///
/// A second pointer-down during a gesture is ignored and returns false.
pub fn pointer_down(
    store: &mut PaintStore,
    pos: Pos2,
    take_snapshot: impl FnOnce() -> Snapshot,
) -> bool {
    if !store.tool().is_idle() {
        log::debug!("Ignoring pointer down at {:?}, gesture already active", pos);
        return false;
    }
    let is_shape = store.tool().name.is_shape();
    let snapshot = is_shape.then(take_snapshot);
    store.update_tool(|tool| {
        tool.drawing = true;
        tool.last_pos = pos;
        tool.shape_start = is_shape.then_some(pos);
        tool.snapshot = snapshot;
    });
    true
}

/// Moves the pointer. Returns the previous position while a gesture is
/// active so the caller can draw the segment between the two.
pub fn pointer_move(store: &mut PaintStore, pos: Pos2) -> Option<Pos2> {
    if store.tool().is_idle() {
        return None;
    }
    let previous = store.tool().last_pos;
    store.update_tool(|tool| tool.last_pos = pos);
    Some(previous)
}

/// Ends the gesture at `pos`.
pub fn pointer_up(store: &mut PaintStore, pos: Pos2) -> GestureEnd {
    if store.tool().is_idle() {
        return GestureEnd::default();
    }
    store.update_tool(|tool| tool.last_pos = pos);
    finish(store)
}

/// Abandons the gesture, e.g. when the pointer leaves the canvas. The caller
/// restores `snapshot` to discard a shape preview.
pub fn cancel(store: &mut PaintStore) -> GestureEnd {
    if store.tool().is_idle() {
        return GestureEnd::default();
    }
    log::debug!("Gesture cancelled ({:?})", store.tool().phase());
    finish(store)
}

fn finish(store: &mut PaintStore) -> GestureEnd {
    let mut end = GestureEnd::default();
    store.update_tool(|tool| {
        end = GestureEnd {
            kind: Some(tool.name),
            shape_start: tool.shape_start.take(),
            snapshot: tool.snapshot.take(),
            last_pos: Some(tool.last_pos),
        };
        tool.drawing = false;
    });
    debug_assert_eq!(store.tool().phase(), GesturePhase::Idle);
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use egui::pos2;

    #[test]
    fn test_stroke_never_snapshots() {
        let mut store = PaintStore::new();
        let started = pointer_down(&mut store, pos2(1.0, 1.0), || {
            panic!("strokes must not take snapshots")
        });
        assert!(started);
        assert_eq!(store.tool().phase(), GesturePhase::ActiveStroke);
        assert!(store.tool().snapshot.is_none());
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut store = PaintStore::new();
        assert_eq!(pointer_move(&mut store, pos2(4.0, 4.0)), None);
        assert_eq!(store.tool().last_pos, Pos2::ZERO);
    }

    #[test]
    fn test_shape_gesture_clears_on_up() {
        let canvas = Canvas::new(8, 8);
        let mut store = PaintStore::new();
        store.select_tool(ToolKind::Shape);

        pointer_down(&mut store, pos2(2.0, 2.0), || canvas.snapshot());
        assert_eq!(store.tool().phase(), GesturePhase::ActiveShape);
        assert_eq!(store.tool().shape_start, Some(pos2(2.0, 2.0)));

        assert_eq!(pointer_move(&mut store, pos2(5.0, 6.0)), Some(pos2(2.0, 2.0)));

        let end = pointer_up(&mut store, pos2(6.0, 7.0));
        assert_eq!(end.kind, Some(ToolKind::Shape));
        assert_eq!(end.shape_start, Some(pos2(2.0, 2.0)));
        assert_eq!(end.last_pos, Some(pos2(6.0, 7.0)));
        assert!(end.snapshot.is_some());

        let tool = store.tool();
        assert!(tool.is_idle());
        assert!(tool.shape_start.is_none());
        assert!(tool.snapshot.is_none());
    }

    #[test]
    fn test_second_pointer_down_ignored() {
        let mut store = PaintStore::new();
        pointer_down(&mut store, pos2(1.0, 1.0), || unreachable!());
        assert!(!pointer_down(&mut store, pos2(9.0, 9.0), || unreachable!()));
        assert_eq!(store.tool().last_pos, pos2(1.0, 1.0));
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut store = PaintStore::new();
        let end = cancel(&mut store);
        assert!(!end.was_active());
    }
}
