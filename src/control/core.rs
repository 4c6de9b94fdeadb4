//=========================================================================
// Control Core
//=========================================================================
//
// Concrete state composed by every control.
//
// Owns the control's root group layer, optional background image
// layer, pixel geometry, and the auto-centering flag. Auto-centering
// keeps the control centered on the captured viewport: any size change
// recomputes the centered position until the control is given a manual
// position via `commit_layout_at`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::stage::{ImageId, LayerId, Point, Rect, Size, Stage, StageError};

//=== Control Core ========================================================

/// Root layer, geometry, and centering state of a control.
///
/// Positions are pixels relative to the parent control holder.
/// Layout is two-step: mutate geometry, then `commit_layout` to push
/// the resulting translation to the stage.
pub struct ControlCore {
    root: LayerId,
    background: Option<LayerId>,
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    auto_center: bool,
    viewport: Size,
}

impl ControlCore {
    //--- Construction -----------------------------------------------------

    /// Creates a core with a fresh root group and no background.
    ///
    /// Auto-centering starts enabled, so the initial position is the
    /// viewport-centered one for `size`.
    pub fn new(stage: &mut dyn Stage, size: Size) -> Result<Self, StageError> {
        let root = stage.create_group()?;
        let viewport = stage.viewport();

        let mut core = Self {
            root,
            background: None,
            width: 0,
            height: 0,
            x: 0,
            y: 0,
            auto_center: true,
            viewport,
        };
        core.set_width(size.width);
        core.set_height(size.height);
        Ok(core)
    }

    /// Creates a core with a background image layer attached under the
    /// root.
    pub fn with_background(
        stage: &mut dyn Stage,
        size: Size,
        image: ImageId,
    ) -> Result<Self, StageError> {
        let mut core = Self::new(stage, size)?;
        let background = stage.create_image(image)?;
        stage.attach(core.root, background)?;
        core.background = Some(background);
        Ok(core)
    }

    //--- Accessors --------------------------------------------------------

    /// The control's root group layer.
    pub fn root(&self) -> LayerId {
        self.root
    }

    /// The background image layer, if one was given.
    pub fn background(&self) -> Option<LayerId> {
        self.background
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// X position in pixels from the left of the parent holder.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y position in pixels from the top of the parent holder.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// The viewport captured at construction, used for centering.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn is_auto_centering(&self) -> bool {
        self.auto_center
    }

    //--- Geometry ---------------------------------------------------------

    /// Sets the width, recomputing the centered x while auto-centering.
    pub fn set_width(&mut self, width: i32) {
        self.width = width;
        if self.auto_center {
            self.x = (self.viewport.width - width) / 2;
        }
    }

    /// Sets the height, recomputing the centered y while auto-centering.
    pub fn set_height(&mut self, height: i32) {
        self.height = height;
        if self.auto_center {
            self.y = (self.viewport.height - height) / 2;
        }
    }

    /// Toggles auto-centering; enabling recenters both axes.
    pub fn set_auto_center(&mut self, auto_center: bool) {
        self.auto_center = auto_center;
        if auto_center {
            self.x = (self.viewport.width - self.width) / 2;
            self.y = (self.viewport.height - self.height) / 2;
        }
    }

    //--- Layout -----------------------------------------------------------

    /// Pushes the current position to the stage as the root translation.
    ///
    /// Required at the end of initialisation and after geometry changes.
    pub fn commit_layout(&self, stage: &mut dyn Stage) -> Result<(), StageError> {
        stage.set_translation(self.root, self.x as f32, self.y as f32)
    }

    /// Overrides the position manually, then pushes it to the stage.
    ///
    /// Disables auto-centering, so later size changes keep the manual
    /// position.
    pub fn commit_layout_at(
        &mut self,
        stage: &mut dyn Stage,
        x: i32,
        y: i32,
    ) -> Result<(), StageError> {
        self.auto_center = false;
        self.x = x;
        self.y = y;
        self.commit_layout(stage)
    }

    //--- Hit Testing ------------------------------------------------------

    /// Checks coordinates already normalised to this control's space.
    ///
    /// Bounds are inclusive on all edges.
    pub fn contains_norm(&self, x: i32, y: i32) -> bool {
        self.bounds_norm().contains(Point::new(x, y))
    }

    /// The control's bounds in its own coordinate space.
    pub fn bounds_norm(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Checks coordinates in parent-holder space.
    pub fn contains_abs(&self, x: i32, y: i32) -> bool {
        self.contains_norm(x - self.x, y - self.y)
    }

    //--- Background -------------------------------------------------------

    /// Swaps the background image, replacing any existing layer.
    pub fn set_background(
        &mut self,
        stage: &mut dyn Stage,
        image: ImageId,
    ) -> Result<(), StageError> {
        if let Some(old) = self.background.take() {
            stage.detach(self.root, old)?;
            stage.drop_layer(old)?;
        }
        let background = stage.create_image(image)?;
        stage.attach(self.root, background)?;
        self.background = Some(background);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::MemoryStage;

    fn core_on(stage: &mut MemoryStage, width: i32, height: i32) -> ControlCore {
        ControlCore::new(stage, Size::new(width, height)).unwrap()
    }

    //--- Centering Tests --------------------------------------------------

    #[test]
    fn new_core_is_centered_on_the_viewport() {
        let mut stage = MemoryStage::new();
        let core = core_on(&mut stage, 100, 40);

        // 640x480 viewport.
        assert_eq!(core.x(), 270);
        assert_eq!(core.y(), 220);
    }

    #[test]
    fn setting_width_recomputes_centered_x() {
        let mut stage = MemoryStage::new();
        let mut core = core_on(&mut stage, 100, 40);

        core.set_width(200);

        assert_eq!(core.x(), 220);
        assert_eq!(core.y(), 220);
    }

    #[test]
    fn size_changes_keep_manual_positions() {
        let mut stage = MemoryStage::new();
        let mut core = core_on(&mut stage, 100, 40);
        core.commit_layout_at(&mut stage, 5, 6).unwrap();

        core.set_width(300);
        core.set_height(300);

        assert_eq!((core.x(), core.y()), (5, 6));
    }

    #[test]
    fn enabling_auto_center_recenters_both_axes() {
        let mut stage = MemoryStage::new();
        let mut core = core_on(&mut stage, 100, 40);
        core.commit_layout_at(&mut stage, 0, 0).unwrap();

        core.set_auto_center(true);

        assert_eq!((core.x(), core.y()), (270, 220));
    }

    //--- Layout Tests -----------------------------------------------------

    #[test]
    fn commit_layout_pushes_translation_to_the_stage() {
        let mut stage = MemoryStage::new();
        let mut core = core_on(&mut stage, 100, 40);

        core.commit_layout_at(&mut stage, 12, 34).unwrap();

        assert_eq!(stage.translation_of(core.root()), Some((12.0, 34.0)));
    }

    //--- Hit Test Tests ---------------------------------------------------

    #[test]
    fn norm_range_is_inclusive() {
        let mut stage = MemoryStage::new();
        let core = core_on(&mut stage, 100, 40);

        assert!(core.contains_norm(0, 0));
        assert!(core.contains_norm(100, 40));
        assert!(!core.contains_norm(101, 0));
        assert!(!core.contains_norm(-1, 0));
    }

    #[test]
    fn bounds_norm_covers_the_control_size() {
        let mut stage = MemoryStage::new();
        let core = core_on(&mut stage, 100, 40);
        assert_eq!(core.bounds_norm(), Rect::new(0, 0, 100, 40));
    }

    #[test]
    fn abs_range_subtracts_the_position() {
        let mut stage = MemoryStage::new();
        let mut core = core_on(&mut stage, 100, 40);
        core.commit_layout_at(&mut stage, 50, 60).unwrap();

        assert!(core.contains_abs(50, 60));
        assert!(core.contains_abs(150, 100));
        assert!(!core.contains_abs(49, 60));
        assert!(!core.contains_abs(151, 60));
    }

    //--- Background Tests -------------------------------------------------

    #[test]
    fn with_background_attaches_an_image_layer() {
        let mut stage = MemoryStage::new();
        let core =
            ControlCore::with_background(&mut stage, Size::new(64, 64), ImageId::from_raw(1))
                .unwrap();

        let background = core.background().unwrap();
        assert_eq!(stage.children_of(core.root()), &[background]);
    }

    #[test]
    fn set_background_replaces_the_old_layer() {
        let mut stage = MemoryStage::new();
        let mut core =
            ControlCore::with_background(&mut stage, Size::new(64, 64), ImageId::from_raw(1))
                .unwrap();
        let old = core.background().unwrap();

        core.set_background(&mut stage, ImageId::from_raw(2)).unwrap();

        let new = core.background().unwrap();
        assert_ne!(old, new);
        assert_eq!(stage.children_of(core.root()), &[new]);
        assert!(!stage.is_live(old));
    }
}
