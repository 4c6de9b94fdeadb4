//=========================================================================
// Control Set
//=========================================================================
//
// Ordered child collection bound to a parent layer.
//
// Owns the boxed controls of one holder (screen or message), keeps
// their root layers attached under the holder's layer, and routes
// events downward with per-kind coordinate rules:
//
//   pointer down   translate, deliver only inside the child's bounds
//   pointer up     translate, deliver unconditionally (un-press)
//   pointer move   inside → move(local), outside → leave(parent-space)
//   scroll / keys  broadcast untranslated
//
// A failing child is logged and skipped so its siblings still receive
// the event.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::input::KeyCode;
use crate::stage::{LayerId, Stage, StageError};

use super::{Action, Control, UiContext, UiError};

//=== Error Policy ========================================================

/// Logs a failed child hook and keeps the broadcast going.
fn guard(result: Result<(), UiError>, hook: &str) {
    if let Err(err) = result {
        warn!("child control failed in {}: {}", hook, err);
    }
}

//=== Control Set =========================================================

/// The child controls of one holder, in insertion order.
///
/// Inserting a control attaches its root layer under the holder's
/// parent layer; removing detaches it again, so membership in the set
/// and membership in the scene graph always agree.
pub struct ControlSet<A: Action> {
    parent: LayerId,
    controls: Vec<Box<dyn Control<A>>>,
}

impl<A: Action> ControlSet<A> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty set whose children attach under `parent`.
    pub fn new(parent: LayerId) -> Self {
        Self { parent, controls: Vec::new() }
    }

    /// The layer child roots are attached under.
    pub fn parent(&self) -> LayerId {
        self.parent
    }

    //--- Membership -------------------------------------------------------

    /// Adds a control, attaching its root layer under the parent.
    pub fn insert<C>(&mut self, stage: &mut dyn Stage, control: C) -> Result<(), StageError>
    where
        C: Control<A> + 'static,
    {
        stage.attach(self.parent, control.core().root())?;
        self.controls.push(Box::new(control));
        Ok(())
    }

    /// Removes the control whose root is `layer`, detaching it.
    ///
    /// Returns the control so the caller can keep or drop it.
    pub fn remove_by_layer(
        &mut self,
        stage: &mut dyn Stage,
        layer: LayerId,
    ) -> Result<Option<Box<dyn Control<A>>>, StageError> {
        let Some(pos) = self.controls.iter().position(|c| c.core().root() == layer) else {
            return Ok(None);
        };
        stage.detach(self.parent, layer)?;
        Ok(Some(self.controls.remove(pos)))
    }

    /// Detaches and drops every control.
    pub fn clear(&mut self, stage: &mut dyn Stage) -> Result<(), StageError> {
        for control in &self.controls {
            stage.detach(self.parent, control.core().root())?;
        }
        self.controls.clear();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Box<dyn Control<A>>> {
        self.controls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Control<A>>> {
        self.controls.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    //--- Lifecycle Broadcast ----------------------------------------------

    /// Initialises every control.
    pub fn init_all(&mut self, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            guard(control.init(&mut ctx.reborrow()), "init");
        }
    }

    /// Updates every control.
    pub fn update_all(&mut self, delta: f32, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            guard(control.update(delta, &mut ctx.reborrow()), "update");
        }
    }

    /// Paints every control.
    pub fn paint_all(&mut self, alpha: f32, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            guard(control.paint(alpha, &mut ctx.reborrow()), "paint");
        }
    }

    //--- Input Routing ----------------------------------------------------

    /// Routes a press: translated, delivered only inside the child.
    pub fn route_pointer_down(&mut self, x: i32, y: i32, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            let nx = x - control.core().x();
            let ny = y - control.core().y();
            if control.core().contains_norm(nx, ny) {
                guard(control.on_pointer_down(nx, ny, &mut ctx.reborrow()), "on_pointer_down");
            }
        }
    }

    /// Routes a release: translated, delivered to every child.
    ///
    /// Ungated so a pressed child can restore its visuals when the
    /// pointer is released outside it.
    pub fn route_pointer_up(&mut self, x: i32, y: i32, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            let nx = x - control.core().x();
            let ny = y - control.core().y();
            guard(control.on_pointer_up(nx, ny, &mut ctx.reborrow()), "on_pointer_up");
        }
    }

    /// Routes a move: inside children get the local position, outside
    /// children get a leave with the parent-space position.
    pub fn route_pointer_move(&mut self, x: i32, y: i32, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            let nx = x - control.core().x();
            let ny = y - control.core().y();
            if control.core().contains_norm(nx, ny) {
                guard(control.on_pointer_move(nx, ny, &mut ctx.reborrow()), "on_pointer_move");
            } else {
                guard(control.on_pointer_leave(x, y, &mut ctx.reborrow()), "on_pointer_leave");
            }
        }
    }

    /// Broadcasts scroll motion to every child.
    pub fn route_scroll(&mut self, velocity: i32, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            guard(control.on_scroll(velocity, &mut ctx.reborrow()), "on_scroll");
        }
    }

    /// Broadcasts a key press to every child.
    pub fn route_key_down(&mut self, key: KeyCode, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            guard(control.on_key_down(key, &mut ctx.reborrow()), "on_key_down");
        }
    }

    /// Broadcasts a key release to every child.
    pub fn route_key_up(&mut self, key: KeyCode, ctx: &mut UiContext<'_, A>) {
        for control in &mut self.controls {
            guard(control.on_key_up(key, &mut ctx.reborrow()), "on_key_up");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ControlCore, FrameQueue};
    use crate::stage::{MemoryStage, Size};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Hit,
    }
    impl Action for TestAction {}

    /// Records every hook call so routing rules can be asserted.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Down(i32, i32),
        Up(i32, i32),
        Move(i32, i32),
        Leave(i32, i32),
        Scroll(i32),
        KeyDown(KeyCode),
        Update,
    }

    struct Probe {
        core: ControlCore,
        calls: Rc<RefCell<Vec<Call>>>,
        fail_update: bool,
    }

    impl Probe {
        fn new(
            stage: &mut MemoryStage,
            x: i32,
            y: i32,
            calls: Rc<RefCell<Vec<Call>>>,
        ) -> Self {
            let mut core = ControlCore::new(stage, Size::new(100, 50)).unwrap();
            core.commit_layout_at(stage, x, y).unwrap();
            Self { core, calls, fail_update: false }
        }
    }

    impl Control<TestAction> for Probe {
        fn core(&self) -> &ControlCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ControlCore {
            &mut self.core
        }

        fn update(
            &mut self,
            _delta: f32,
            _ctx: &mut UiContext<'_, TestAction>,
        ) -> Result<(), UiError> {
            if self.fail_update {
                return Err(UiError::Control("probe failure".into()));
            }
            self.calls.borrow_mut().push(Call::Update);
            Ok(())
        }

        fn on_pointer_down(
            &mut self,
            x: i32,
            y: i32,
            _ctx: &mut UiContext<'_, TestAction>,
        ) -> Result<(), UiError> {
            self.calls.borrow_mut().push(Call::Down(x, y));
            Ok(())
        }

        fn on_pointer_up(
            &mut self,
            x: i32,
            y: i32,
            _ctx: &mut UiContext<'_, TestAction>,
        ) -> Result<(), UiError> {
            self.calls.borrow_mut().push(Call::Up(x, y));
            Ok(())
        }

        fn on_pointer_move(
            &mut self,
            x: i32,
            y: i32,
            _ctx: &mut UiContext<'_, TestAction>,
        ) -> Result<(), UiError> {
            self.calls.borrow_mut().push(Call::Move(x, y));
            Ok(())
        }

        fn on_pointer_leave(
            &mut self,
            x: i32,
            y: i32,
            _ctx: &mut UiContext<'_, TestAction>,
        ) -> Result<(), UiError> {
            self.calls.borrow_mut().push(Call::Leave(x, y));
            Ok(())
        }

        fn on_scroll(
            &mut self,
            velocity: i32,
            _ctx: &mut UiContext<'_, TestAction>,
        ) -> Result<(), UiError> {
            self.calls.borrow_mut().push(Call::Scroll(velocity));
            Ok(())
        }

        fn on_key_down(
            &mut self,
            key: KeyCode,
            _ctx: &mut UiContext<'_, TestAction>,
        ) -> Result<(), UiError> {
            self.calls.borrow_mut().push(Call::KeyDown(key));
            Ok(())
        }
    }

    struct Fixture {
        stage: MemoryStage,
        actions: FrameQueue<TestAction>,
        set: ControlSet<TestAction>,
        calls: Rc<RefCell<Vec<Call>>>,
    }

    /// One probe at (10, 10), sized 100x50.
    fn fixture() -> Fixture {
        let mut stage = MemoryStage::new();
        let parent = stage.create_group().unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let probe = Probe::new(&mut stage, 10, 10, Rc::clone(&calls));

        let mut set = ControlSet::new(parent);
        set.insert(&mut stage, probe).unwrap();

        Fixture { stage, actions: FrameQueue::new(), set, calls }
    }

    //--- Membership Tests -------------------------------------------------

    #[test]
    fn insert_attaches_the_control_root() {
        let fx = fixture();
        assert_eq!(fx.stage.children_of(fx.set.parent()).len(), 1);
        assert_eq!(fx.set.len(), 1);
    }

    #[test]
    fn remove_by_layer_detaches_and_returns_the_control() {
        let mut fx = fixture();
        let layer = fx.stage.children_of(fx.set.parent())[0];

        let removed = fx.set.remove_by_layer(&mut fx.stage, layer).unwrap();

        assert!(removed.is_some());
        assert!(fx.set.is_empty());
        assert!(fx.stage.children_of(fx.set.parent()).is_empty());
    }

    #[test]
    fn remove_of_unknown_layer_returns_none() {
        let mut fx = fixture();
        let stray = fx.stage.create_group().unwrap();

        assert!(fx.set.remove_by_layer(&mut fx.stage, stray).unwrap().is_none());
        assert_eq!(fx.set.len(), 1);
    }

    #[test]
    fn clear_detaches_everything() {
        let mut fx = fixture();
        fx.set.clear(&mut fx.stage).unwrap();

        assert!(fx.set.is_empty());
        assert!(fx.stage.children_of(fx.set.parent()).is_empty());
    }

    //--- Routing Tests ----------------------------------------------------

    #[test]
    fn pointer_down_is_translated_and_gated() {
        let mut fx = fixture();

        // Inside: (30, 20) parent space → (20, 10) child space.
        let mut ctx = UiContext { stage: &mut fx.stage, actions: &mut fx.actions };
        fx.set.route_pointer_down(30, 20, &mut ctx);
        // Outside: below the control.
        fx.set.route_pointer_down(30, 200, &mut ctx);

        assert_eq!(*fx.calls.borrow(), vec![Call::Down(20, 10)]);
    }

    #[test]
    fn pointer_up_is_translated_but_ungated() {
        let mut fx = fixture();

        let mut ctx = UiContext { stage: &mut fx.stage, actions: &mut fx.actions };
        fx.set.route_pointer_up(500, 500, &mut ctx);

        assert_eq!(*fx.calls.borrow(), vec![Call::Up(490, 490)]);
    }

    #[test]
    fn pointer_move_splits_into_move_and_leave() {
        let mut fx = fixture();

        let mut ctx = UiContext { stage: &mut fx.stage, actions: &mut fx.actions };
        fx.set.route_pointer_move(15, 15, &mut ctx);
        fx.set.route_pointer_move(300, 300, &mut ctx);

        // Leave keeps parent-space coordinates.
        assert_eq!(*fx.calls.borrow(), vec![Call::Move(5, 5), Call::Leave(300, 300)]);
    }

    #[test]
    fn scroll_and_keys_broadcast_untranslated() {
        let mut fx = fixture();

        let mut ctx = UiContext { stage: &mut fx.stage, actions: &mut fx.actions };
        fx.set.route_scroll(-3, &mut ctx);
        fx.set.route_key_down(KeyCode::Enter, &mut ctx);

        assert_eq!(*fx.calls.borrow(), vec![Call::Scroll(-3), Call::KeyDown(KeyCode::Enter)]);
    }

    //--- Error Policy Tests -----------------------------------------------

    #[test]
    fn failing_child_does_not_starve_its_siblings() {
        let mut stage = MemoryStage::new();
        let parent = stage.create_group().unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let mut failing = Probe::new(&mut stage, 0, 0, Rc::clone(&calls));
        failing.fail_update = true;
        let healthy = Probe::new(&mut stage, 0, 0, Rc::clone(&calls));

        let mut set = ControlSet::new(parent);
        set.insert(&mut stage, failing).unwrap();
        set.insert(&mut stage, healthy).unwrap();

        let mut actions = FrameQueue::new();
        let mut ctx = UiContext { stage: &mut stage, actions: &mut actions };
        set.update_all(0.016, &mut ctx);

        // The second control still ran.
        assert_eq!(*calls.borrow(), vec![Call::Update]);
    }
}
