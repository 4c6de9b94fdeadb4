//=========================================================================
// Screen Core
//=========================================================================
//
// Concrete per-screen state: layers, controls, and message overlays.
//
// Layer layout:
//   stage root
//     ├─ screen root
//     │    └─ control group        (regular controls)
//     └─ message group             (overlays, attached beside the root
//                                   by the director so they render on
//                                   top of everything)
//
// Central behavior: exclusive-or dispatch. While any message is active,
// update, paint, and every input event go only to the active messages;
// otherwise they go to the control set. Message pointer input is
// translated by the message's position and delivered ungated, because
// overlays are modal.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::control::{Action, Control, ControlSet, Message, UiContext, UiError};
use crate::input::InputEvent;
use crate::stage::{LayerId, Size, Stage, StageError};

//=== Error Policy ========================================================

fn guard(result: Result<(), UiError>, hook: &str) {
    if let Err(err) = result {
        warn!("message failed in {}: {}", hook, err);
    }
}

//=== Screen Core =========================================================

/// Layers, controls, and active messages of one screen.
pub struct ScreenCore<A: Action> {
    root: LayerId,
    message_group: LayerId,
    size: Size,
    controls: ControlSet<A>,
    messages: Vec<Message<A>>,
}

impl<A: Action> ScreenCore<A> {
    //--- Construction -----------------------------------------------------

    /// Creates a core with fresh root, control, and message groups.
    pub fn new(stage: &mut dyn Stage, size: Size) -> Result<Self, StageError> {
        let root = stage.create_group()?;
        let control_group = stage.create_group()?;
        let message_group = stage.create_group()?;
        stage.attach(root, control_group)?;

        Ok(Self {
            root,
            message_group,
            size,
            controls: ControlSet::new(control_group),
            messages: Vec::new(),
        })
    }

    //--- Accessors --------------------------------------------------------

    /// The screen's root group layer.
    pub fn root(&self) -> LayerId {
        self.root
    }

    /// The group regular controls attach under.
    pub fn control_group(&self) -> LayerId {
        self.controls.parent()
    }

    /// The overlay group; the director attaches it at the stage root,
    /// beside the screen root, so messages render above everything.
    pub fn message_group(&self) -> LayerId {
        self.message_group
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn controls(&self) -> &ControlSet<A> {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlSet<A> {
        &mut self.controls
    }

    //--- Controls ---------------------------------------------------------

    /// Adds a regular control under the control group.
    pub fn add_control<C>(&mut self, stage: &mut dyn Stage, control: C) -> Result<(), StageError>
    where
        C: Control<A> + 'static,
    {
        self.controls.insert(stage, control)
    }

    /// Removes the control whose root is `layer`.
    pub fn remove_control_by_layer(
        &mut self,
        stage: &mut dyn Stage,
        layer: LayerId,
    ) -> Result<Option<Box<dyn Control<A>>>, StageError> {
        self.controls.remove_by_layer(stage, layer)
    }

    //--- Messages ---------------------------------------------------------

    /// Activates a message: flags it, attaches it to the message
    /// group, and tracks it.
    pub fn show_message(
        &mut self,
        stage: &mut dyn Stage,
        mut message: Message<A>,
    ) -> Result<(), StageError> {
        message.show();
        stage.attach(self.message_group, message.core().root())?;
        self.messages.push(message);
        Ok(())
    }

    /// Deactivates every message: hides, detaches, and untracks.
    pub fn clear_messages(&mut self, stage: &mut dyn Stage) -> Result<(), StageError> {
        for message in &mut self.messages {
            message.hide();
        }
        self.messages.clear();
        stage.detach_children(self.message_group)
    }

    /// True while any tracked message is active.
    ///
    /// All input and frame work goes exclusively to messages while
    /// this holds.
    pub fn has_active_messages(&self) -> bool {
        self.messages.iter().any(Message::is_active)
    }

    pub fn messages(&self) -> &[Message<A>] {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut Vec<Message<A>> {
        &mut self.messages
    }

    //--- Two-Phase Dispatch -----------------------------------------------

    /// Updates the active messages, or the controls when none are
    /// active.
    pub fn update(&mut self, delta: f32, ctx: &mut UiContext<'_, A>) {
        if self.has_active_messages() {
            for message in &mut self.messages {
                guard(message.update(delta, &mut ctx.reborrow()), "update");
            }
        } else {
            self.controls.update_all(delta, ctx);
        }
    }

    /// Paints the active messages, or the controls when none are
    /// active.
    pub fn paint(&mut self, alpha: f32, ctx: &mut UiContext<'_, A>) {
        if self.has_active_messages() {
            for message in &mut self.messages {
                guard(message.paint(alpha, &mut ctx.reborrow()), "paint");
            }
        } else {
            self.controls.paint_all(alpha, ctx);
        }
    }

    /// Routes an input event with the exclusive-or rule.
    ///
    /// Messages receive pointer events translated by their own
    /// position and ungated; controls receive the per-kind routing of
    /// [`ControlSet`].
    pub fn dispatch(&mut self, event: InputEvent, ctx: &mut UiContext<'_, A>) {
        if self.has_active_messages() {
            self.dispatch_to_messages(event, ctx);
        } else {
            self.dispatch_to_controls(event, ctx);
        }
    }

    fn dispatch_to_messages(&mut self, event: InputEvent, ctx: &mut UiContext<'_, A>) {
        for message in &mut self.messages {
            let mx = message.core().x();
            let my = message.core().y();
            let result = match event {
                InputEvent::PointerDown { x, y } => {
                    message.on_pointer_down(x - mx, y - my, &mut ctx.reborrow())
                }
                InputEvent::PointerUp { x, y } => {
                    message.on_pointer_up(x - mx, y - my, &mut ctx.reborrow())
                }
                InputEvent::PointerMove { x, y } => {
                    message.on_pointer_move(x - mx, y - my, &mut ctx.reborrow())
                }
                InputEvent::PointerScroll { velocity } => {
                    message.on_scroll(velocity, &mut ctx.reborrow())
                }
                InputEvent::KeyDown { key } => message.on_key_down(key, &mut ctx.reborrow()),
                InputEvent::KeyUp { key } => message.on_key_up(key, &mut ctx.reborrow()),
            };
            guard(result, "input");
        }
    }

    fn dispatch_to_controls(&mut self, event: InputEvent, ctx: &mut UiContext<'_, A>) {
        match event {
            InputEvent::PointerDown { x, y } => self.controls.route_pointer_down(x, y, ctx),
            InputEvent::PointerUp { x, y } => self.controls.route_pointer_up(x, y, ctx),
            InputEvent::PointerMove { x, y } => self.controls.route_pointer_move(x, y, ctx),
            InputEvent::PointerScroll { velocity } => self.controls.route_scroll(velocity, ctx),
            InputEvent::KeyDown { key } => self.controls.route_key_down(key, ctx),
            InputEvent::KeyUp { key } => self.controls.route_key_up(key, ctx),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
