//=========================================================================
// Screen Director
//=========================================================================
//
// Manages screen registration, the back stack, and lifecycle.
//
// Screens are stored in a HashMap by key and shown one at a time.
// Showing a screen re-roots the stage: everything is detached from the
// stage root, then the new screen's root and message group are
// attached, message group last so overlays render on top.
//
// Back navigation uses an explicit stack of previously shown keys, so
// A → B → A → back → back unwinds correctly instead of clobbering a
// per-screen back link.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::control::Action;
use crate::input::InputEvent;

use super::{Screen, ScreenContext, ScreenKey, ScreenTransition};

//=== Error Policy ========================================================

fn guard<E: std::fmt::Display>(result: Result<(), E>, what: &str) {
    if let Err(err) = result {
        warn!("{} failed: {}", what, err);
    }
}

//=== Screen Director =====================================================

/// Key-indexed screen registry with back-stack navigation.
///
/// Exactly one screen is current at a time. Screens are initialised
/// lazily on their first show and keep their state between shows.
pub struct ScreenDirector<K: ScreenKey, A: Action> {
    screens: HashMap<K, Box<dyn Screen<K, A>>>,
    current: Option<K>,
    back_stack: Vec<K>,
    loading: Option<K>,
    initialized: HashSet<K>,
}

impl<K: ScreenKey, A: Action> ScreenDirector<K, A> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty director with no current screen.
    pub fn new() -> Self {
        Self {
            screens: HashMap::new(),
            current: None,
            back_stack: Vec::new(),
            loading: None,
            initialized: HashSet::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a screen under a key.
    ///
    /// The screen is boxed for storage and initialised lazily when
    /// first shown.
    pub fn register<S>(&mut self, key: K, screen: S)
    where
        S: Screen<K, A> + 'static,
    {
        if self.screens.insert(key, Box::new(screen)).is_some() {
            warn!("Screen {:?} was already registered and has been replaced", key);
            self.initialized.remove(&key);
        }
    }

    /// Marks a registered key as the loading screen.
    pub fn set_loading(&mut self, key: K) {
        if !self.screens.contains_key(&key) {
            warn!("Loading screen {:?} is not registered", key);
        }
        self.loading = Some(key);
    }

    //--- Accessors --------------------------------------------------------

    /// The currently shown key, if any.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// The key back-navigation would return to.
    pub fn previous(&self) -> Option<K> {
        self.back_stack.last().copied()
    }

    /// The registered loading key, if set.
    pub fn loading(&self) -> Option<K> {
        self.loading
    }

    /// Borrows a registered screen.
    pub fn get(&self, key: K) -> Option<&dyn Screen<K, A>> {
        self.screens.get(&key).map(|s| s.as_ref())
    }

    /// Mutably borrows a registered screen.
    pub fn get_mut(&mut self, key: K) -> Option<&mut dyn Screen<K, A>> {
        self.screens.get_mut(&key).map(|s| s.as_mut() as &mut dyn Screen<K, A>)
    }

    //--- Navigation -------------------------------------------------------

    /// Shows the screen registered under `key`.
    ///
    /// Order: lazy init → `on_hidden` on the outgoing screen →
    /// re-root the stage → push the outgoing key → `on_shown`.
    /// Unregistered keys warn and leave the current screen in place.
    pub fn show(&mut self, key: K, ctx: &mut ScreenContext<'_, K, A>) {
        self.show_inner(key, ctx, true);
    }

    /// Returns to the previously shown screen, if any.
    pub fn show_previous(&mut self, ctx: &mut ScreenContext<'_, K, A>) {
        let Some(previous) = self.back_stack.pop() else {
            warn!("No previous screen to return to");
            return;
        };
        debug!("Returning to previous screen {:?}", previous);
        self.show_inner(previous, ctx, false);
    }

    /// Shows the registered loading screen.
    pub fn show_loading(&mut self, ctx: &mut ScreenContext<'_, K, A>) {
        let Some(loading) = self.loading else {
            warn!("No loading screen has been set");
            return;
        };
        self.show_inner(loading, ctx, true);
    }

    fn show_inner(&mut self, key: K, ctx: &mut ScreenContext<'_, K, A>, push_back: bool) {
        if !self.screens.contains_key(&key) {
            warn!("Attempted to show unregistered screen {:?}", key);
            return;
        }

        // Lazy one-time init before the first show.
        if self.initialized.insert(key) {
            debug!("Initializing screen {:?}", key);
            if let Some(screen) = self.screens.get_mut(&key) {
                guard(screen.init(&mut ctx.reborrow()), "screen init");
            }
        }

        // Hide the outgoing screen.
        let outgoing = self.current;
        if let Some(prev) = outgoing {
            if prev != key {
                if let Some(screen) = self.screens.get_mut(&prev) {
                    screen.on_hidden(&mut ctx.reborrow());
                }
            }
        }

        // Re-root the stage: screen root first, message group last so
        // overlays render above the screen's own layers.
        let stage_root = ctx.stage.root();
        guard(ctx.stage.detach_children(stage_root), "stage re-root");
        if let Some(screen) = self.screens.get_mut(&key) {
            let root = screen.core().root();
            let message_group = screen.core().message_group();
            guard(ctx.stage.attach(stage_root, root), "screen attach");
            guard(ctx.stage.attach(stage_root, message_group), "message group attach");
        }

        if push_back {
            if let Some(prev) = outgoing {
                if prev != key {
                    self.back_stack.push(prev);
                }
            }
        }

        debug!("Showing screen {:?}", key);
        self.current = Some(key);
        if let Some(screen) = self.screens.get_mut(&key) {
            screen.on_shown(&mut ctx.reborrow());
        }
    }

    //--- Frame Driving ----------------------------------------------------

    /// Updates the current screen: core two-phase update, then the
    /// screen's own hook.
    pub fn update(&mut self, delta: f32, ctx: &mut ScreenContext<'_, K, A>) {
        let Some(screen) = self.current.and_then(|k| self.screens.get_mut(&k)) else {
            return;
        };
        screen.core_mut().update(delta, &mut ctx.ui());
        guard(screen.update(delta, &mut ctx.reborrow()), "screen update");
    }

    /// Paints the current screen: core two-phase paint, then the
    /// screen's own hook.
    pub fn paint(&mut self, alpha: f32, ctx: &mut ScreenContext<'_, K, A>) {
        let Some(screen) = self.current.and_then(|k| self.screens.get_mut(&k)) else {
            return;
        };
        screen.core_mut().paint(alpha, &mut ctx.ui());
        guard(screen.paint(alpha, &mut ctx.reborrow()), "screen paint");
    }

    /// Routes an input event: core exclusive-or dispatch, then the
    /// matching screen hook.
    pub fn dispatch(&mut self, event: InputEvent, ctx: &mut ScreenContext<'_, K, A>) {
        let Some(screen) = self.current.and_then(|k| self.screens.get_mut(&k)) else {
            return;
        };
        screen.core_mut().dispatch(event, &mut ctx.ui());

        let result = match event {
            InputEvent::PointerDown { x, y } => screen.on_pointer_down(x, y, &mut ctx.reborrow()),
            InputEvent::PointerUp { x, y } => screen.on_pointer_up(x, y, &mut ctx.reborrow()),
            InputEvent::PointerMove { x, y } => screen.on_pointer_move(x, y, &mut ctx.reborrow()),
            InputEvent::PointerScroll { velocity } => {
                screen.on_scroll(velocity, &mut ctx.reborrow())
            }
            InputEvent::KeyDown { key } => screen.on_key_down(key, &mut ctx.reborrow()),
            InputEvent::KeyUp { key } => screen.on_key_up(key, &mut ctx.reborrow()),
        };
        guard(result, "screen input hook");
    }

    //--- Transition Processing --------------------------------------------

    /// Processes all queued screen transitions in FIFO order.
    ///
    /// Called by the game at the tick boundary after screen updates.
    pub fn process_transitions(&mut self, ctx: &mut ScreenContext<'_, K, A>) {
        for transition in ctx.nav.take() {
            match transition {
                ScreenTransition::Show(key) => self.show(key, ctx),
                ScreenTransition::ShowPrevious => self.show_previous(ctx),
                ScreenTransition::ShowLoading => self.show_loading(ctx),
                ScreenTransition::Empty => {}
            }
        }
    }
}

impl<K: ScreenKey, A: Action> Default for ScreenDirector<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
