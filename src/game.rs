//=========================================================================
// Game
//
// Frame driver and coordinator for the toolkit.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ←──update/paint──  host loop
//         │                       │
//         ├─ with_size()          ├─ ScreenDirector (screens)
//         └─ with_channel_        ├─ FrameQueue<A> (actions)
//            capacity()           ├─ FrameQueue<Transition> (nav)
//                                 └─ input channel (event-thread hosts)
// ```
//
// Update order within a tick:
//   input dispatch → boot step → screen update → transitions → action
//   queue clear.
// Input is dispatched before the screen update so actions emitted by a
// press are visible to the same tick's screen hooks.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::control::{Action, FrameQueue};
use crate::input::{InputEvent, KeyCode};
use crate::screen::{ScreenContext, ScreenDirector, ScreenKey, ScreenTransition};
use crate::stage::{Size, Stage};

//=== Boot Closure ========================================================

/// Deferred boot step: builds and registers the application's screens,
/// returning the key of the first screen to show.
type BootFn<K, A> =
    Box<dyn FnOnce(&mut ScreenDirector<K, A>, &mut ScreenContext<'_, K, A>) -> Option<K>>;

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// - **Surface size**: 640x480
/// - **Input channel capacity**: 128 events
///
/// # Example
///
/// ```
/// use proscenium::prelude::*;
///
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Key { Main }
/// # impl ScreenKey for Key {}
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum MenuAction { Start }
/// # impl Action for MenuAction {}
/// let game: Game<Key, MenuAction> = GameBuilder::new()
///     .with_size(800, 600)
///     .with_channel_capacity(256)
///     .build();
/// ```
pub struct GameBuilder<K: ScreenKey, A: Action> {
    size: Size,
    channel_capacity: usize,
    _phantom: std::marker::PhantomData<(K, A)>,
}

impl<K: ScreenKey, A: Action> GameBuilder<K, A> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            size: Size::new(640, 480),
            channel_capacity: 128,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the surface size the game will request from the stage.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or negative.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "Surface size must be positive, got {}x{}", width, height);
        self.size = Size::new(width, height);
        self
    }

    /// Sets the input channel capacity for event-thread hosts.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the game instance.
    pub fn build(self) -> Game<K, A> {
        info!(
            "Building game (surface: {}x{}, channel: {})",
            self.size.width, self.size.height, self.channel_capacity
        );

        let (input_tx, input_rx) = bounded(self.channel_capacity);

        Game {
            director: ScreenDirector::new(),
            actions: FrameQueue::new(),
            nav: FrameQueue::new(),
            input_tx,
            input_rx,
            size: self.size,
            boot: None,
            boot_countdown: None,
        }
    }
}

impl<K: ScreenKey, A: Action> Default for GameBuilder<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// The per-frame driver object.
///
/// The host calls [`Game::update`] and [`Game::paint`] once per frame
/// on its main thread and feeds input either through the direct
/// methods or through the channel returned by [`Game::input_port`].
/// Everything dispatches on the thread that calls `update`/`paint`;
/// the toolkit itself is single-threaded and frame-driven.
pub struct Game<K: ScreenKey, A: Action> {
    director: ScreenDirector<K, A>,
    actions: FrameQueue<A>,
    nav: FrameQueue<ScreenTransition<K>>,
    input_tx: Sender<InputEvent>,
    input_rx: Receiver<InputEvent>,
    size: Size,
    boot: Option<BootFn<K, A>>,
    boot_countdown: Option<u32>,
}

impl<K: ScreenKey, A: Action> Game<K, A> {
    //--- Setup ------------------------------------------------------------

    /// Registers the deferred boot closure.
    ///
    /// The closure runs on the second `update` tick after [`Game::init`],
    /// so the loading screen is painted for at least one frame before
    /// screen construction begins. The returned key becomes the first
    /// shown screen.
    pub fn boot<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ScreenDirector<K, A>, &mut ScreenContext<'_, K, A>) -> Option<K> + 'static,
    {
        self.boot = Some(Box::new(f));
    }

    /// Initialises the surface and shows the loading screen.
    ///
    /// Arms the deferred boot counter; the boot closure (if any) runs
    /// one tick later.
    pub fn init(&mut self, stage: &mut dyn Stage) {
        info!("Game init: surface {}x{}", self.size.width, self.size.height);
        stage.set_viewport(self.size);

        if self.director.loading().is_some() {
            let mut ctx = ScreenContext {
                stage,
                actions: &mut self.actions,
                nav: &mut self.nav,
            };
            self.director.show_loading(&mut ctx);
        } else {
            warn!("No loading screen registered; surface stays empty until boot");
        }

        // One painted tick of loading screen before the boot step runs.
        self.boot_countdown = Some(1);
    }

    //--- Accessors --------------------------------------------------------

    pub fn director(&self) -> &ScreenDirector<K, A> {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut ScreenDirector<K, A> {
        &mut self.director
    }

    /// The surface size the game was built with.
    pub fn viewport(&self) -> Size {
        self.size
    }

    /// A cloneable sender for hosts that deliver input from their own
    /// event thread. Events are drained and dispatched at the start of
    /// each tick.
    pub fn input_port(&self) -> Sender<InputEvent> {
        self.input_tx.clone()
    }

    //--- Frame Driving ----------------------------------------------------

    /// Advances one tick.
    pub fn update(&mut self, delta: f32, stage: &mut dyn Stage) {
        self.drain_input_port(stage);
        self.boot_step(stage);

        let mut ctx = ScreenContext {
            stage,
            actions: &mut self.actions,
            nav: &mut self.nav,
        };
        self.director.update(delta, &mut ctx);
        self.director.process_transitions(&mut ctx);

        // Stale actions never leak across frames.
        self.actions.clear();
    }

    /// Paints one frame.
    pub fn paint(&mut self, alpha: f32, stage: &mut dyn Stage) {
        let mut ctx = ScreenContext {
            stage,
            actions: &mut self.actions,
            nav: &mut self.nav,
        };
        self.director.paint(alpha, &mut ctx);
    }

    fn boot_step(&mut self, stage: &mut dyn Stage) {
        match self.boot_countdown {
            Some(0) => {
                self.boot_countdown = None;
                let Some(boot) = self.boot.take() else {
                    return;
                };
                debug!("Running deferred boot step");
                let mut ctx = ScreenContext {
                    stage,
                    actions: &mut self.actions,
                    nav: &mut self.nav,
                };
                if let Some(first) = boot(&mut self.director, &mut ctx) {
                    self.director.show(first, &mut ctx);
                }
            }
            Some(remaining) => {
                self.boot_countdown = Some(remaining - 1);
            }
            None => {}
        }
    }

    fn drain_input_port(&mut self, stage: &mut dyn Stage) {
        const MAX_EVENTS_PER_TICK: usize = 100;

        let mut drained = 0;
        while drained < MAX_EVENTS_PER_TICK {
            match self.input_rx.try_recv() {
                Ok(event) => {
                    self.dispatch(event, stage);
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_TICK {
            warn!("Input backlog: drained {} events this tick", drained);
        }
    }

    fn dispatch(&mut self, event: InputEvent, stage: &mut dyn Stage) {
        trace!(target: "proscenium::input", "dispatch {:?}", event);
        let mut ctx = ScreenContext {
            stage,
            actions: &mut self.actions,
            nav: &mut self.nav,
        };
        self.director.dispatch(event, &mut ctx);
    }

    //--- Direct Input -----------------------------------------------------
    //
    // The listener-adapter surface for hosts that call on the main
    // thread. Each method dispatches immediately to the current screen.
    //

    pub fn on_pointer_down(&mut self, x: i32, y: i32, stage: &mut dyn Stage) {
        self.dispatch(InputEvent::PointerDown { x, y }, stage);
    }

    pub fn on_pointer_up(&mut self, x: i32, y: i32, stage: &mut dyn Stage) {
        self.dispatch(InputEvent::PointerUp { x, y }, stage);
    }

    pub fn on_pointer_move(&mut self, x: i32, y: i32, stage: &mut dyn Stage) {
        self.dispatch(InputEvent::PointerMove { x, y }, stage);
    }

    pub fn on_pointer_scroll(&mut self, velocity: i32, stage: &mut dyn Stage) {
        self.dispatch(InputEvent::PointerScroll { velocity }, stage);
    }

    pub fn on_key_down(&mut self, key: KeyCode, stage: &mut dyn Stage) {
        self.dispatch(InputEvent::KeyDown { key }, stage);
    }

    pub fn on_key_up(&mut self, key: KeyCode, stage: &mut dyn Stage) {
        self.dispatch(InputEvent::KeyUp { key }, stage);
    }

    //--- Host-Driven Navigation -------------------------------------------
    //
    // Immediate navigation for use outside the tick; inside a tick,
    // queue a ScreenTransition instead.
    //

    /// Shows a registered screen immediately.
    pub fn show_screen(&mut self, key: K, stage: &mut dyn Stage) {
        let mut ctx = ScreenContext {
            stage,
            actions: &mut self.actions,
            nav: &mut self.nav,
        };
        self.director.show(key, &mut ctx);
    }

    /// Returns to the previous screen immediately.
    pub fn show_previous(&mut self, stage: &mut dyn Stage) {
        let mut ctx = ScreenContext {
            stage,
            actions: &mut self.actions,
            nav: &mut self.nav,
        };
        self.director.show_previous(&mut ctx);
    }

    /// Shows the loading screen immediately.
    pub fn show_loading(&mut self, stage: &mut dyn Stage) {
        let mut ctx = ScreenContext {
            stage,
            actions: &mut self.actions,
            nav: &mut self.nav,
        };
        self.director.show_loading(&mut ctx);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
