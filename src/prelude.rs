//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use proscenium::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Frame driver
pub use crate::{Game, GameBuilder};

// Stage contract
pub use crate::stage::{
    Color, ImageId, LayerId, MemoryStage, Point, Rect, Size, Stage, StageError,
};

// Input
pub use crate::input::{InputEvent, KeyCode};

// Controls
pub use crate::control::{
    Action, Button, Control, ControlCore, ControlSet, FrameQueue, Message, UiContext, UiError,
};

// Screens
pub use crate::screen::{
    LoadingScreen, Screen, ScreenContext, ScreenCore, ScreenDirector, ScreenKey, ScreenTransition,
};
