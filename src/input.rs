//=========================================================================
// Input Event Types
//
// Defines the portable representation of pointer and keyboard input.
//
// This module abstracts away host-specific input delivery (listener
// callbacks, event threads) into a unified, toolkit-friendly format
// routed by the screen layer.
//
// Responsibilities:
// - Represent pointer and keyboard inputs in a stable, portable way
// - Provide equality and hashing semantics for deduplication in tests
// - Stay Copy-cheap so events can be fanned out to many controls
//
// Event Flow:
// ```text
// Host Engine (listeners or event thread)
//         ↓
//    InputEvent (this module)
//         ↓
//    Game → ScreenDirector → ScreenCore → ControlSet
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is the same physical key regardless of keyboard layout.
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Common special keys (Space, Enter, Escape, etc.)
///
/// Additional keys can be added as needed without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Fallback for keys not explicitly mapped by the host's input layer.
    Unidentified,
}

//=== InputEvent ==========================================================

/// A pointer or keyboard event delivered by the host.
///
/// Pointer coordinates are i32 pixels with the origin at the top-left
/// of the surface; screens translate them into control-local space as
/// they route downward.
///
/// # Event Types
///
/// - **PointerDown/PointerUp**: Press and release at a position
/// - **PointerMove**: Drag/hover position updates
/// - **PointerScroll**: Wheel motion with signed velocity
/// - **KeyDown/KeyUp**: Discrete keyboard events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Pointer pressed at a surface position.
    PointerDown { x: i32, y: i32 },

    /// Pointer released at a surface position.
    PointerUp { x: i32, y: i32 },

    /// Pointer moved (or dragged) to a surface position.
    PointerMove { x: i32, y: i32 },

    /// Scroll wheel motion; positive velocity scrolls down.
    PointerScroll { velocity: i32 },

    /// Key pressed.
    KeyDown { key: KeyCode },

    /// Key released.
    KeyUp { key: KeyCode },
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_copy_and_comparable() {
        let down = InputEvent::PointerDown { x: 3, y: 4 };
        let copy = down;
        assert_eq!(down, copy);

        assert_ne!(down, InputEvent::PointerUp { x: 3, y: 4 });
        assert_ne!(
            InputEvent::KeyDown { key: KeyCode::KeyA },
            InputEvent::KeyDown { key: KeyCode::KeyB }
        );
    }

    #[test]
    fn key_events_distinguish_press_and_release() {
        assert_ne!(
            InputEvent::KeyDown { key: KeyCode::Enter },
            InputEvent::KeyUp { key: KeyCode::Enter }
        );
    }
}
