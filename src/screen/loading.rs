//=========================================================================
// Loading Screen
//=========================================================================
//
// Crate-provided screen shown while the application boots.
//
// A viewport-sized canvas filled black with centered white text.
// Applications register it under a key of their own and mark it via
// `ScreenDirector::set_loading`; the game shows it at init and swaps
// it out after the deferred boot step.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::control::{Action, UiError};
use crate::stage::{Color, LayerId, Rect, Stage, StageError};

use super::{Screen, ScreenContext, ScreenCore, ScreenKey};

//=== Loading Screen ======================================================

const DEFAULT_TEXT: &str = "Loading...";

/// A minimal full-screen "Loading..." display.
pub struct LoadingScreen<A: Action> {
    core: ScreenCore<A>,
    text: String,
    canvas: Option<LayerId>,
}

impl<A: Action> LoadingScreen<A> {
    /// Creates a loading screen sized to the stage viewport.
    pub fn new(stage: &mut dyn Stage) -> Result<Self, StageError> {
        let size = stage.viewport();
        let core = ScreenCore::new(stage, size)?;
        Ok(Self { core, text: DEFAULT_TEXT.to_owned(), canvas: None })
    }

    /// Overrides the displayed text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<K: ScreenKey, A: Action> Screen<K, A> for LoadingScreen<A> {
    fn core(&self) -> &ScreenCore<A> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore<A> {
        &mut self.core
    }

    /// Draws the backdrop and text in one go; the canvas never changes
    /// afterwards.
    fn init(&mut self, ctx: &mut ScreenContext<'_, K, A>) -> Result<(), UiError> {
        let size = self.core.size();
        let canvas = ctx.stage.create_canvas(size)?;
        ctx.stage.attach(self.core.root(), canvas)?;

        ctx.stage.fill_rect(canvas, Rect::from_size(size), Color::BLACK)?;
        ctx.stage.draw_text(canvas, &self.text, size.width / 2, size.height / 2, Color::WHITE)?;

        self.canvas = Some(canvas);
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
    use crate::screen::ScreenTransition;
    use crate::stage::memory::DrawCall;
    use crate::stage::{MemoryStage, Size};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKey {
        Loading,
    }
    impl ScreenKey for TestKey {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {}
    impl Action for TestAction {}

    #[test]
    fn init_paints_black_backdrop_and_centered_text() {
        let mut stage = MemoryStage::new();
        stage.set_viewport(Size::new(800, 600));

        let mut screen: LoadingScreen<TestAction> = LoadingScreen::new(&mut stage).unwrap();
        let mut actions = FrameQueue::new();
        let mut nav: FrameQueue<ScreenTransition<TestKey>> = FrameQueue::new();
        let mut ctx =
            ScreenContext { stage: &mut stage, actions: &mut actions, nav: &mut nav };

        Screen::<TestKey, TestAction>::init(&mut screen, &mut ctx).unwrap();

        let root = screen.core.root();
        let canvas = stage.children_of(root)[1];
        assert_eq!(
            stage.draw_calls(canvas),
            &[
                DrawCall::FillRect { rect: Rect::new(0, 0, 800, 600), color: Color::BLACK },
                DrawCall::Text {
                    text: "Loading...".into(),
                    x: 400,
                    y: 300,
                    color: Color::WHITE
                },
            ]
        );
    }

    #[test]
    fn with_text_overrides_the_default() {
        let mut stage = MemoryStage::new();
        let screen: LoadingScreen<TestAction> =
            LoadingScreen::new(&mut stage).unwrap().with_text("One moment");

        assert_eq!(screen.text(), "One moment");
    }
}
