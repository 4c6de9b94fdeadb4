//=========================================================================
// Screen System
//=========================================================================
//
// Full-window UI states and their director.
//
// Architecture:
//   ScreenDirector<K, A>
//     ├─ screens: HashMap<K, Box<dyn Screen>>
//     ├─ back_stack: Vec<K>
//     └─ current: Option<K>
//
// Exactly one screen is active at a time. The director drives the
// machinery (two-phase dispatch, re-rooting, transitions) through each
// screen's ScreenCore; user screens only implement hooks, so they
// cannot accidentally disable routing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::control::{Action, FrameQueue, UiContext, UiError};
use crate::input::KeyCode;
use crate::stage::Stage;

//=== Module Declarations =================================================

mod core;
mod director;
mod loading;

//=== Public API ==========================================================

pub use self::core::ScreenCore;
pub use director::ScreenDirector;
pub use loading::LoadingScreen;

//=== Screen Key Trait ====================================================

/// Marker trait for screen identifiers.
///
/// Screen keys uniquely identify screens in the director's registry.
/// Typically implemented by application-specific enums.
pub trait ScreenKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Screen Transition ===================================================

/// Encapsulates queued screen navigation.
///
/// Screens and controls queue transitions during a tick; the director
/// processes the queue at the tick boundary in FIFO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition<K: ScreenKey> {
    /// Shows the screen registered under the key.
    Show(K),

    /// Returns to the previously shown screen, if any.
    ShowPrevious,

    /// Shows the registered loading screen.
    ShowLoading,

    /// No transition occurs.
    Empty,
}

impl<K: ScreenKey> Default for ScreenTransition<K> {
    fn default() -> Self {
        Self::Empty
    }
}

//=== Screen Context ======================================================

/// Borrow bundle handed to screen code.
///
/// Carries the stage, the frame's emitted actions, and the navigation
/// queue. Screen hooks read actions emitted by their controls earlier
/// in the tick and queue transitions for the tick boundary.
pub struct ScreenContext<'a, K: ScreenKey, A: Action> {
    /// The host scene graph.
    pub stage: &'a mut dyn Stage,

    /// Actions emitted so far this tick.
    pub actions: &'a mut FrameQueue<A>,

    /// Pending screen transitions, processed at the tick boundary.
    pub nav: &'a mut FrameQueue<ScreenTransition<K>>,
}

impl<'a, K: ScreenKey, A: Action> ScreenContext<'a, K, A> {
    /// Reborrows the control-facing half for child dispatch.
    pub fn ui(&mut self) -> UiContext<'_, A> {
        UiContext { stage: &mut *self.stage, actions: &mut *self.actions }
    }

    /// Reborrows the whole context for a nested call.
    pub fn reborrow(&mut self) -> ScreenContext<'_, K, A> {
        ScreenContext {
            stage: &mut *self.stage,
            actions: &mut *self.actions,
            nav: &mut *self.nav,
        }
    }
}

//=== Screen Trait ========================================================

/// Defines screen behavior with lifecycle and input hooks.
///
/// Screens compose a [`ScreenCore`] that owns their layers, controls,
/// and messages. The director runs the core's two-phase dispatch first
/// and calls the matching hook afterwards, so hooks observe a screen
/// whose controls have already seen the event.
///
/// # Minimal Implementation
///
/// Only the core accessors are required:
///
/// ```
/// use proscenium::prelude::*;
///
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Key { Main }
/// # impl ScreenKey for Key {}
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum NoAction {}
/// # impl Action for NoAction {}
/// struct MainScreen {
///     core: ScreenCore<NoAction>,
/// }
///
/// impl Screen<Key, NoAction> for MainScreen {
///     fn core(&self) -> &ScreenCore<NoAction> { &self.core }
///     fn core_mut(&mut self) -> &mut ScreenCore<NoAction> { &mut self.core }
/// }
/// ```
pub trait Screen<K: ScreenKey, A: Action> {
    /// Returns the screen's concrete state.
    fn core(&self) -> &ScreenCore<A>;

    /// Returns the screen's concrete state mutably.
    fn core_mut(&mut self) -> &mut ScreenCore<A>;

    //--- Lifecycle --------------------------------------------------------

    /// Called once, lazily, before the screen is first shown.
    ///
    /// Build controls and commit layouts here.
    fn init(&mut self, _ctx: &mut ScreenContext<'_, K, A>) -> Result<(), UiError> {
        Ok(())
    }

    /// Called every time the screen becomes the current screen.
    fn on_shown(&mut self, _ctx: &mut ScreenContext<'_, K, A>) {}

    /// Called when another screen replaces this one.
    fn on_hidden(&mut self, _ctx: &mut ScreenContext<'_, K, A>) {}

    //--- Frame Hooks ------------------------------------------------------

    /// Called every tick after the core has updated controls/messages.
    fn update(&mut self, _delta: f32, _ctx: &mut ScreenContext<'_, K, A>) -> Result<(), UiError> {
        Ok(())
    }

    /// Called every frame after the core has painted controls/messages.
    fn paint(&mut self, _alpha: f32, _ctx: &mut ScreenContext<'_, K, A>) -> Result<(), UiError> {
        Ok(())
    }

    //--- Input Hooks ------------------------------------------------------

    /// Pointer pressed, in surface coordinates.
    fn on_pointer_down(
        &mut self,
        _x: i32,
        _y: i32,
        _ctx: &mut ScreenContext<'_, K, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Pointer released, in surface coordinates.
    fn on_pointer_up(
        &mut self,
        _x: i32,
        _y: i32,
        _ctx: &mut ScreenContext<'_, K, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Pointer moved, in surface coordinates.
    fn on_pointer_move(
        &mut self,
        _x: i32,
        _y: i32,
        _ctx: &mut ScreenContext<'_, K, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Scroll wheel motion.
    fn on_scroll(
        &mut self,
        _velocity: i32,
        _ctx: &mut ScreenContext<'_, K, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Key pressed.
    fn on_key_down(
        &mut self,
        _key: KeyCode,
        _ctx: &mut ScreenContext<'_, K, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }

    /// Key released.
    fn on_key_up(
        &mut self,
        _key: KeyCode,
        _ctx: &mut ScreenContext<'_, K, A>,
    ) -> Result<(), UiError> {
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
