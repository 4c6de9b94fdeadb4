//=========================================================================
// Message
//=========================================================================
//
// A modal overlay control.
//
// While any message is active on a screen, input goes exclusively to
// the active messages; the screen's regular controls see nothing. The
// active flag is toggled by `show`/`hide`, while render-layer
// attachment is owned by the screen core, so flag and attachment always
// agree.
//
// Messages are control holders: their child controls live in a
// `ControlSet` parented to the message root and receive events with the
// standard routing rules.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::input::KeyCode;
use crate::stage::{Color, ImageId, LayerId, Rect, Size, Stage, StageError};

use super::{Action, Control, ControlCore, ControlSet, UiContext, UiError};

//=== Message =============================================================

/// Opacity applied to a message root when its layout is committed.
pub const OVERLAY_ALPHA: f32 = 0.75;

/// Left margin of the text drawn by the text factory.
const TEXT_INSET_X: i32 = 20;

/// A modal overlay holding its own child controls.
///
/// Auto-centers on the viewport by default, so a freshly built message
/// appears mid-screen once committed.
pub struct Message<A: Action> {
    core: ControlCore,
    children: ControlSet<A>,
    active: bool,
}

impl<A: Action> Message<A> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty message with no backdrop.
    pub fn new(stage: &mut dyn Stage, size: Size) -> Result<Self, StageError> {
        let core = ControlCore::new(stage, size)?;
        let children = ControlSet::new(core.root());
        Ok(Self { core, children, active: false })
    }

    /// Creates a message with a background image backdrop.
    pub fn with_background(
        stage: &mut dyn Stage,
        size: Size,
        image: ImageId,
    ) -> Result<Self, StageError> {
        let core = ControlCore::with_background(stage, size, image)?;
        let children = ControlSet::new(core.root());
        Ok(Self { core, children, active: false })
    }

    /// Creates a text-only message: white text on the default
    /// translucent black scrim.
    pub fn text(stage: &mut dyn Stage, size: Size, text: &str) -> Result<Self, StageError> {
        Self::text_styled(stage, size, text, Color::SCRIM, Color::WHITE)
    }

    /// Creates a text-only message with explicit backdrop and text
    /// colors.
    pub fn text_styled(
        stage: &mut dyn Stage,
        size: Size,
        text: &str,
        backdrop: Color,
        text_color: Color,
    ) -> Result<Self, StageError> {
        let message = Self::new(stage, size)?;

        let canvas = stage.create_canvas(size)?;
        stage.attach(message.core.root(), canvas)?;
        stage.fill_rect(canvas, Rect::from_size(size), backdrop)?;
        stage.draw_text(canvas, text, TEXT_INSET_X, size.height / 2, text_color)?;

        Ok(message)
    }

    //--- Activation -------------------------------------------------------

    /// Marks the message active. Attachment is handled by the screen.
    pub fn show(&mut self) {
        self.active = true;
    }

    /// Marks the message inactive.
    pub fn hide(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    //--- Children ---------------------------------------------------------

    /// Adds a child control, attaching its root under the message root.
    pub fn add_child<C>(&mut self, stage: &mut dyn Stage, child: C) -> Result<(), StageError>
    where
        C: Control<A> + 'static,
    {
        self.children.insert(stage, child)
    }

    /// Removes the child whose root is `layer`, detaching it.
    pub fn remove_child_by_layer(
        &mut self,
        stage: &mut dyn Stage,
        layer: LayerId,
    ) -> Result<Option<Box<dyn Control<A>>>, StageError> {
        self.children.remove_by_layer(stage, layer)
    }

    pub fn children(&self) -> &ControlSet<A> {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut ControlSet<A> {
        &mut self.children
    }

    //--- Layout -----------------------------------------------------------

    /// Applies the overlay alpha, then pushes the translation.
    pub fn commit_layout(&self, stage: &mut dyn Stage) -> Result<(), StageError> {
        stage.set_alpha(self.core.root(), OVERLAY_ALPHA)?;
        self.core.commit_layout(stage)
    }
}

//=== Control Implementation ==============================================

impl<A: Action> Control<A> for Message<A> {
    fn core(&self) -> &ControlCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControlCore {
        &mut self.core
    }

    fn update(&mut self, delta: f32, ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        self.children.update_all(delta, ctx);
        Ok(())
    }

    fn paint(&mut self, alpha: f32, ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        self.children.paint_all(alpha, ctx);
        Ok(())
    }

    fn on_pointer_down(
        &mut self,
        x: i32,
        y: i32,
        ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        self.children.route_pointer_down(x, y, ctx);
        Ok(())
    }

    fn on_pointer_up(
        &mut self,
        x: i32,
        y: i32,
        ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        self.children.route_pointer_up(x, y, ctx);
        Ok(())
    }

    fn on_pointer_move(
        &mut self,
        x: i32,
        y: i32,
        ctx: &mut UiContext<'_, A>,
    ) -> Result<(), UiError> {
        self.children.route_pointer_move(x, y, ctx);
        Ok(())
    }

    fn on_scroll(&mut self, velocity: i32, ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        self.children.route_scroll(velocity, ctx);
        Ok(())
    }

    fn on_key_down(&mut self, key: KeyCode, ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        self.children.route_key_down(key, ctx);
        Ok(())
    }

    fn on_key_up(&mut self, key: KeyCode, ctx: &mut UiContext<'_, A>) -> Result<(), UiError> {
        self.children.route_key_up(key, ctx);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::FrameQueue;
    use crate::stage::memory::DrawCall;
    use crate::stage::MemoryStage;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Dismiss,
    }
    impl Action for TestAction {}

    //--- Activation Tests -------------------------------------------------

    #[test]
    fn show_and_hide_toggle_the_active_flag() {
        let mut stage = MemoryStage::new();
        let mut message: Message<TestAction> =
            Message::new(&mut stage, Size::new(200, 100)).unwrap();

        assert!(!message.is_active());
        message.show();
        assert!(message.is_active());
        message.hide();
        assert!(!message.is_active());
    }

    #[test]
    fn new_message_auto_centers_on_the_viewport() {
        let mut stage = MemoryStage::new();
        let message: Message<TestAction> =
            Message::new(&mut stage, Size::new(200, 100)).unwrap();

        assert_eq!((message.core().x(), message.core().y()), (220, 190));
    }

    //--- Layout Tests -----------------------------------------------------

    #[test]
    fn commit_layout_applies_the_overlay_alpha() {
        let mut stage = MemoryStage::new();
        let message: Message<TestAction> =
            Message::new(&mut stage, Size::new(200, 100)).unwrap();

        message.commit_layout(&mut stage).unwrap();

        assert_eq!(stage.alpha_of(message.core().root()), Some(OVERLAY_ALPHA));
        assert_eq!(stage.translation_of(message.core().root()), Some((220.0, 190.0)));
    }

    //--- Text Factory Tests -----------------------------------------------

    #[test]
    fn text_factory_fills_a_scrim_and_draws_white_text() {
        let mut stage = MemoryStage::new();
        let message: Message<TestAction> =
            Message::text(&mut stage, Size::new(300, 80), "Game over").unwrap();

        let children = stage.children_of(message.core().root()).to_vec();
        assert_eq!(children.len(), 1);

        assert_eq!(
            stage.draw_calls(children[0]),
            &[
                DrawCall::FillRect { rect: Rect::new(0, 0, 300, 80), color: Color::SCRIM },
                DrawCall::Text { text: "Game over".into(), x: 20, y: 40, color: Color::WHITE },
            ]
        );
    }

    #[test]
    fn text_styled_uses_the_given_colors() {
        let mut stage = MemoryStage::new();
        let red = Color::rgb(200, 0, 0);
        let message: Message<TestAction> =
            Message::text_styled(&mut stage, Size::new(100, 40), "!", Color::BLACK, red)
                .unwrap();

        let canvas = stage.children_of(message.core().root())[0];
        let calls = stage.draw_calls(canvas);
        assert!(matches!(calls[0], DrawCall::FillRect { color: Color::BLACK, .. }));
        assert!(matches!(&calls[1], DrawCall::Text { color, .. } if *color == red));
    }

    //--- Child Routing Tests ----------------------------------------------

    #[test]
    fn children_attach_under_the_message_root() {
        let mut stage = MemoryStage::new();
        let mut message: Message<TestAction> =
            Message::new(&mut stage, Size::new(200, 100)).unwrap();

        let button = crate::control::Button::bare(&mut stage, Size::new(50, 20)).unwrap();
        let button_root = button.core().root();
        message.add_child(&mut stage, button).unwrap();

        assert_eq!(stage.children_of(message.core().root()), &[button_root]);
        assert_eq!(message.children().len(), 1);
    }

    #[test]
    fn pointer_up_on_a_child_button_emits_its_action() {
        let mut stage = MemoryStage::new();
        let mut message: Message<TestAction> =
            Message::new(&mut stage, Size::new(200, 100)).unwrap();

        let mut button = crate::control::Button::bare(&mut stage, Size::new(50, 20))
            .unwrap()
            .with_action(TestAction::Dismiss);
        button.core_mut().commit_layout_at(&mut stage, 10, 10).unwrap();
        message.add_child(&mut stage, button).unwrap();

        let mut actions = FrameQueue::new();
        let mut ctx = UiContext { stage: &mut stage, actions: &mut actions };

        // (20, 20) in message space → (10, 10) in button space.
        message.on_pointer_down(20, 20, &mut ctx).unwrap();
        message.on_pointer_up(20, 20, &mut ctx).unwrap();

        let emitted: Vec<TestAction> = actions.drain().collect();
        assert_eq!(emitted, vec![TestAction::Dismiss]);
    }
}
