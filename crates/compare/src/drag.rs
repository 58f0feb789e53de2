use crate::host::GestureHandler;

/// Gesture state captured when the user presses the slider.
///
/// Created on press and consumed on release, so each drag restores exactly
/// what it disabled, independently of any other control on the page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[must_use = "a drag session must be ended to restore map gestures"]
pub struct DragSession {
    dragging_was_enabled: bool,
    tap_was_enabled: bool,
}

impl DragSession {
    /// Records gesture state and disables both gestures.
    pub fn begin<G: GestureHandler>(dragging: &G, tap: Option<&G>) -> Self {
        let session = Self {
            dragging_was_enabled: dragging.enabled(),
            tap_was_enabled: tap.is_some_and(|t| t.enabled()),
        };
        dragging.disable();
        if let Some(tap) = tap {
            tap.disable();
        }
        session
    }

    /// Re-enables whatever was enabled when the session began.
    pub fn end<G: GestureHandler>(self, dragging: &G, tap: Option<&G>) {
        if self.dragging_was_enabled {
            dragging.enable();
        }
        if self.tap_was_enabled {
            if let Some(tap) = tap {
                tap.enable();
            }
        }
    }
}
