//=========================================================================
// Button
//=========================================================================
//
// A pressable control with enabled/disabled visuals and a press-time
// expand transform.
//
// Expanding scales the root layer about its origin, so the translation
// is shifted by half the size growth to keep the button visually
// centered while pressed:
//
//   offset = size * (expand_scale - 1) / 2
//
// Instead of invoking callbacks, a released button emits its action
// value into the frame's action queue; the application reads the queue
// from its screen hooks before the tick ends.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::stage::{ImageId, LayerId, Size, Stage, StageError};

use super::{Action, Control, ControlCore, UiContext, UiError};

//=== Button ==============================================================

const ORIGINAL_SCALE: f32 = 1.0;
const DEFAULT_EXPAND_SCALE: f32 = 1.1;

/// A pressable control.
///
/// Defaults: auto-centering off, expanding on with scale 1.1, no
/// action value. Disabled visuals are only available when a disabled
/// image is supplied at construction.
///
/// # Invariants
///
/// - A disabled button never has its enabled layer attached, and vice
///   versa.
/// - A disabled button expands nothing and emits nothing.
pub struct Button<A: Action> {
    core: ControlCore,
    disabled_layer: Option<LayerId>,
    allows_disable: bool,
    enabled: bool,
    expanding: bool,
    expand_offset_x: i32,
    expand_offset_y: i32,
    expand_scale: f32,
    current_scale: f32,
    action: Option<A>,
}

impl<A: Action> Button<A> {
    //--- Construction -----------------------------------------------------

    /// Creates a button with an enabled image and, optionally, a
    /// disabled image.
    pub fn new(
        stage: &mut dyn Stage,
        size: Size,
        enabled_image: ImageId,
        disabled_image: Option<ImageId>,
    ) -> Result<Self, StageError> {
        let core = ControlCore::with_background(stage, size, enabled_image)?;
        Self::from_core(stage, core, disabled_image)
    }

    /// Creates a bare button with no images; visuals can be layered
    /// onto the root by the caller.
    pub fn bare(stage: &mut dyn Stage, size: Size) -> Result<Self, StageError> {
        let core = ControlCore::new(stage, size)?;
        Self::from_core(stage, core, None)
    }

    fn from_core(
        stage: &mut dyn Stage,
        mut core: ControlCore,
        disabled_image: Option<ImageId>,
    ) -> Result<Self, StageError> {
        core.set_auto_center(false);

        let disabled_layer = match disabled_image {
            Some(image) => Some(stage.create_image(image)?),
            None => None,
        };

        let mut button = Self {
            core,
            allows_disable: disabled_layer.is_some(),
            disabled_layer,
            enabled: true,
            expanding: false,
            expand_offset_x: 0,
            expand_offset_y: 0,
            expand_scale: DEFAULT_EXPAND_SCALE,
            current_scale: ORIGINAL_SCALE,
            action: None,
        };
        button.set_expanding(true);
        Ok(button)
    }

    /// Sets the action value emitted when the button is activated.
    pub fn with_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when a disabled image was supplied at construction.
    pub fn allows_disable(&self) -> bool {
        self.allows_disable
    }

    pub fn is_expanding(&self) -> bool {
        self.expanding
    }

    pub fn expand_scale(&self) -> f32 {
        self.expand_scale
    }

    pub fn action(&self) -> Option<A> {
        self.action
    }

    //--- Expand Configuration ---------------------------------------------

    /// Toggles the expand-on-press transform.
    pub fn set_expanding(&mut self, expanding: bool) {
        self.expanding = expanding;
        if expanding {
            self.recompute_expand_offsets();
        } else {
            self.expand_offset_x = 0;
            self.expand_offset_y = 0;
        }
    }

    /// Sets the expand scale; `0.0` disables expanding entirely.
    pub fn set_expand_scale(&mut self, expand_scale: f32) {
        if expand_scale == 0.0 {
            self.expanding = false;
            self.expand_offset_x = 0;
            self.expand_offset_y = 0;
        } else {
            self.expand_scale = expand_scale;
            self.expanding = true;
            self.recompute_expand_offsets();
        }
    }

    fn recompute_expand_offsets(&mut self) {
        self.expand_offset_x = (self.core.width() as f32 * (self.expand_scale - 1.0)) as i32 / 2;
        self.expand_offset_y = (self.core.height() as f32 * (self.expand_scale - 1.0)) as i32 / 2;
    }

    //--- Enabled State ----------------------------------------------------

    /// Restores the enabled visual and accepts input again.
    ///
    /// Only meaningful on buttons constructed with a disabled image.
    pub fn enable(&mut self, stage: &mut dyn Stage) -> Result<(), StageError> {
        if !self.allows_disable {
            return Ok(());
        }
        let Some(background) = self.core.background() else {
            return Ok(());
        };
        stage.detach_children(self.core.root())?;
        stage.attach(self.core.root(), background)?;
        self.enabled = true;
        Ok(())
    }

    /// Swaps in the disabled visual and stops reacting to input.
    pub fn disable(&mut self, stage: &mut dyn Stage) -> Result<(), StageError> {
        let Some(disabled) = self.disabled_layer else {
            return Ok(());
        };
        stage.detach_children(self.core.root())?;
        stage.attach(self.core.root(), disabled)?;
        self.enabled = false;
        Ok(())
    }

    //--- Press Transform --------------------------------------------------

    fn apply_pressed(&mut self, stage: &mut dyn Stage) -> Result<(), StageError> {
        // Idempotent: no-op when already at the expanded scale.
        if !self.expanding || !self.enabled || self.current_scale == self.expand_scale {
            return Ok(());
        }
        self.current_scale = self.expand_scale;
        stage.set_scale(self.core.root(), self.expand_scale, self.expand_scale)?;
        stage.set_translation(
            self.core.root(),
            (self.core.x() - self.expand_offset_x) as f32,
            (self.core.y() - self.expand_offset_y) as f32,
        )
    }

    fn apply_released(&mut self, stage: &mut dyn Stage) -> Result<(), StageError> {
        if !self.expanding || !self.enabled || self.current_scale == ORIGINAL_SCALE {
            return Ok(());
        }
        self.current_scale = ORIGINAL_SCALE;
        stage.set_scale(self.core.root(), ORIGINAL_SCALE, ORIGINAL_SCALE)?;
        stage.set_translation(self.core.root(), self.core.x() as f32, self.core.y() as f32)
    }
}

//=== Control Implementation ==============================================

impl<A: Action> Control<A> for Button<A> {
    fn core(&self) -> &ControlCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControlCore {
        &mut self.core
    }

    fn on_pointer_down(
        &mut self,
        _x: i32,
        _y: i32,
        ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        self.apply_pressed(ctx.stage)?;
        Ok(())
    }

    fn on_pointer_up(
        &mut self,
        x: i32,
        y: i32,
        ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        self.apply_released(ctx.stage)?;

        // Activation requires releasing inside an enabled button.
        if self.enabled && self.core.contains_norm(x, y) {
            if let Some(action) = self.action {
                ctx.actions.push(action);
            }
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
