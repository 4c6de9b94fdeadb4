//=========================================================================
// Stage Contract
//=========================================================================
//
// Defines the contract between the toolkit and the host 2D engine.
//
// The host owns the real scene graph; the toolkit only holds opaque
// layer handles and issues scene-graph operations through the `Stage`
// trait. The crate never implements a renderer — `MemoryStage` is an
// in-memory reference implementation for tests and host-app test suites.
//
// Architecture:
//   Game / ScreenDirector / Controls
//         ↓ (LayerId operations)
//   trait Stage  ←─ implemented by the host engine (or MemoryStage)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::error::Error;
use std::fmt;

//=== Module Declarations =================================================

mod geometry;
pub mod memory;

//=== Public API ==========================================================

pub use geometry::{Color, Point, Rect, Size};
pub use memory::MemoryStage;

//=== Layer Handles =======================================================

/// Opaque handle to a renderable node in the host scene graph.
///
/// The toolkit never inspects a layer; it only passes handles back to
/// the stage that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

impl LayerId {
    /// Wraps a raw host-assigned id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host-assigned id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque handle to an image asset loaded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(u64);

impl ImageId {
    /// Wraps a raw host-assigned id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host-assigned id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

//=== StageError ==========================================================

/// Contract violations reported by a stage implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageError {
    /// The handle does not name a live layer on this stage.
    UnknownLayer(LayerId),

    /// A canvas drawing operation targeted a non-canvas layer.
    NotACanvas(LayerId),

    /// An attach operation targeted a parent that is not a group layer.
    NotAGroup(LayerId),

    /// Attaching the child would make it its own ancestor.
    AttachCycle { parent: LayerId, child: LayerId },
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLayer(layer) => {
                write!(f, "unknown layer handle {:?}", layer)
            }
            Self::NotACanvas(layer) => {
                write!(f, "layer {:?} is not a canvas layer", layer)
            }
            Self::NotAGroup(layer) => {
                write!(f, "layer {:?} is not a group layer", layer)
            }
            Self::AttachCycle { parent, child } => {
                write!(f, "attaching {:?} under {:?} would create a cycle", child, parent)
            }
        }
    }
}

impl Error for StageError {}

//=== Stage Trait =========================================================

/// Scene-graph operations provided by the host engine.
///
/// Object-safe so toolkit code can hold `&mut dyn Stage`. All mutating
/// operations are fallible; a well-behaved host only fails on contract
/// violations (see [`StageError`]).
///
/// # Attachment Semantics
///
/// Layers form a tree with a single parent per node. Attaching a child
/// that is already attached elsewhere reparents it. Attaching a node
/// under itself or one of its descendants is an error.
pub trait Stage {
    //--- Surface ----------------------------------------------------------

    /// Returns the current surface size.
    fn viewport(&self) -> Size;

    /// Sets the surface size. Called once by the game at init.
    fn set_viewport(&mut self, size: Size);

    /// Returns the root group layer of the scene graph.
    fn root(&self) -> LayerId;

    //--- Node Creation ----------------------------------------------------

    /// Creates an empty group layer.
    fn create_group(&mut self) -> Result<LayerId, StageError>;

    /// Creates an image layer displaying `image`.
    fn create_image(&mut self, image: ImageId) -> Result<LayerId, StageError>;

    /// Creates a canvas layer of the given size.
    fn create_canvas(&mut self, size: Size) -> Result<LayerId, StageError>;

    //--- Tree Operations --------------------------------------------------

    /// Attaches `child` under `parent`, reparenting if already attached.
    fn attach(&mut self, parent: LayerId, child: LayerId) -> Result<(), StageError>;

    /// Detaches `child` from `parent`. Detaching a non-child is a no-op.
    fn detach(&mut self, parent: LayerId, child: LayerId) -> Result<(), StageError>;

    /// Detaches every child of `parent`.
    fn detach_children(&mut self, parent: LayerId) -> Result<(), StageError>;

    /// Releases a layer. The host may defer or ignore the release.
    fn drop_layer(&mut self, layer: LayerId) -> Result<(), StageError>;

    //--- Transforms -------------------------------------------------------

    /// Sets the layer translation relative to its parent, in pixels.
    fn set_translation(&mut self, layer: LayerId, x: f32, y: f32) -> Result<(), StageError>;

    /// Sets the layer scale about its origin.
    fn set_scale(&mut self, layer: LayerId, sx: f32, sy: f32) -> Result<(), StageError>;

    /// Sets the layer opacity in `[0.0, 1.0]`.
    fn set_alpha(&mut self, layer: LayerId, alpha: f32) -> Result<(), StageError>;

    //--- Canvas Drawing ---------------------------------------------------

    /// Fills a rectangle on a canvas layer.
    fn fill_rect(&mut self, canvas: LayerId, rect: Rect, color: Color) -> Result<(), StageError>;

    /// Draws text on a canvas layer at a baseline position.
    fn draw_text(
        &mut self,
        canvas: LayerId,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
    ) -> Result<(), StageError>;
}

//=========================================================================
// Unit Tests
//=========================================================================
