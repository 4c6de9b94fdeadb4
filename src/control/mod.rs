//=========================================================================
// Control System
//=========================================================================
//
// Interactive, positioned, sized UI elements.
//
// Architecture:
//   trait Control<A>          behavior seam (lifecycle + input hooks)
//     └─ ControlCore          concrete state every control composes
//   ControlSet<A>             ordered children + coordinate routing
//   Button<A> / Message<A>    crate-provided controls
//
// Flow:
//   ScreenCore → ControlSet::route_*() → Control hooks → FrameQueue<A>
//
//=========================================================================

//=== External Dependencies ===============================================

use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::input::KeyCode;
use crate::stage::{Stage, StageError};

//=== Module Declarations =================================================

mod button;
mod core;
mod message;
mod queue;
mod set;

//=== Public API ==========================================================

pub use button::Button;
pub use self::core::ControlCore;
pub use message::Message;
pub use queue::FrameQueue;
pub use set::ControlSet;

//=== Action Trait ========================================================

/// Marker trait for application-defined UI action enums.
///
/// Actions represent high-level UI commands (StartGame, OpenSettings,
/// Dismiss) emitted by controls. The toolkit routes actions without
/// interpreting them: a pressed button pushes its action value into the
/// frame's queue, and the application reads the queue from its screen
/// hooks before the tick ends.
///
/// # Requirements
///
/// - `Copy + Eq + Hash`: Efficient passing and deduplication
/// - `Debug`: Logging support
/// - `Send + 'static`: Thread-safe transfer
///
/// # Example
///
/// ```
/// use proscenium::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuAction { Start, Quit }
///
/// impl Action for MenuAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== UiError =============================================================

/// Errors surfaced by control and screen code.
#[derive(Debug)]
pub enum UiError {
    /// The stage rejected a scene-graph operation.
    Stage(StageError),

    /// An application control failed in its own logic.
    Control(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stage(err) => write!(f, "stage error: {}", err),
            Self::Control(err) => write!(f, "control error: {}", err),
        }
    }
}

impl Error for UiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Stage(err) => Some(err),
            Self::Control(err) => Some(err.as_ref()),
        }
    }
}

impl From<StageError> for UiError {
    fn from(err: StageError) -> Self {
        Self::Stage(err)
    }
}

//=== UiContext ===========================================================

/// Borrow bundle handed to control code.
///
/// Controls never own the stage; they receive it per call together with
/// the frame's action queue.
pub struct UiContext<'a, A: Action> {
    /// The host scene graph.
    pub stage: &'a mut dyn Stage,

    /// Actions emitted so far this tick.
    pub actions: &'a mut FrameQueue<A>,
}

impl<'a, A: Action> UiContext<'a, A> {
    /// Reborrows the context for a nested dispatch.
    pub fn reborrow(&mut self) -> UiContext<'_, A> {
        UiContext { stage: &mut *self.stage, actions: &mut *self.actions }
    }
}

//=== Control Trait =======================================================

/// Defines control behavior with lifecycle and input hooks.
///
/// Controls compose a [`ControlCore`] for their concrete state (root
/// layer, geometry, centering) and override only the hooks they need.
/// Every hook is fallible so broadcast loops can isolate a failing
/// control and keep delivering to its siblings.
///
/// # Coordinate Spaces
///
/// Pointer hooks receive coordinates already normalised to this
/// control's space by the parent [`ControlSet`], except
/// `on_pointer_leave`, which receives the parent-space position that
/// left the control's bounds.
///
/// # Minimal Implementation
///
/// Only the core accessors are required:
///
/// ```
/// use proscenium::prelude::*;
///
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum NoAction {}
/// # impl Action for NoAction {}
/// struct Backdrop {
///     core: ControlCore,
/// }
///
/// impl Control<NoAction> for Backdrop {
///     fn core(&self) -> &ControlCore { &self.core }
///     fn core_mut(&mut self) -> &mut ControlCore { &mut self.core }
/// }
/// ```
pub trait Control<A: Action> {
    /// Returns the control's concrete state.
    fn core(&self) -> &ControlCore;

    /// Returns the control's concrete state mutably.
    fn core_mut(&mut self) -> &mut ControlCore;

    //--- Lifecycle --------------------------------------------------------

    /// Called once before the control first receives events.
    fn init(&mut self, _ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        Ok(())
    }

    /// Called every tick while the control is active.
    fn update(&mut self, _delta: f32, _ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        Ok(())
    }

    /// Called every frame while the control is active.
    fn paint(&mut self, _alpha: f32, _ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        Ok(())
    }

    //--- Input Hooks ------------------------------------------------------

    /// Pointer pressed inside the control, in control-local coordinates.
    fn on_pointer_down(
        &mut self,
        _x: i32,
        _y: i32,
        _ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Pointer released, in control-local coordinates.
    ///
    /// Delivered even when the release lands outside the control, so
    /// pressed visuals can be restored.
    fn on_pointer_up(
        &mut self,
        _x: i32,
        _y: i32,
        _ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Pointer moved inside the control, in control-local coordinates.
    fn on_pointer_move(
        &mut self,
        _x: i32,
        _y: i32,
        _ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Pointer moved outside the control, in parent-space coordinates.
    fn on_pointer_leave(
        &mut self,
        _x: i32,
        _y: i32,
        _ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Scroll wheel motion; broadcast, not position-gated.
    fn on_scroll(&mut self, _velocity: i32, _ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        Ok(())
    }

    /// Key pressed; broadcast to all active controls.
    fn on_key_down(&mut self, _key: KeyCode, _ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        Ok(())
    }

    /// Key released; broadcast to all active controls.
    fn on_key_up(&mut self, _key: KeyCode, _ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
