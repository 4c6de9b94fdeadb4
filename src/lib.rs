//=========================================================================
// Proscenium — Library Root
//
// This crate defines the public API surface of the proscenium toolkit.
//
// Responsibilities:
// - Expose the stage contract the host engine implements (`Stage`)
// - Provide the screen/control/message layer built on top of it
// - Provide the per-frame driver (`Game`) hosts call into
//
// Typical usage:
// ```no_run
// use proscenium::prelude::*;
//
// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// # enum Key { Main }
// # impl ScreenKey for Key {}
// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// # enum MenuAction { Start }
// # impl Action for MenuAction {}
// # let mut stage = MemoryStage::new();
// let mut game: Game<Key, MenuAction> = GameBuilder::new().build();
// game.init(&mut stage);
// // host loop: game.update(delta, &mut stage); game.paint(alpha, &mut stage);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `stage` is the contract with the host engine (handles, geometry,
// the `Stage` trait, and the in-memory reference implementation).
//
// `input` holds the portable pointer/keyboard event types.
//
// `control` is the interactive-element layer (controls, buttons,
// messages, action queues).
//
// `screen` manages full-window UI states and navigation.
//
pub mod control;
pub mod input;
pub mod screen;
pub mod stage;

pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `game` defines the frame driver; its types are re-exported below.
//
mod game;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the driver types as the main entry points so users can
// simply `use proscenium::{Game, GameBuilder};`.
//
pub use game::{Game, GameBuilder};
