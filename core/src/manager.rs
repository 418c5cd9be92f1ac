//! The cursor state manager: single source of truth for pointer-derived state.

use crate::config::CursorConfig;
use crate::input::{PointerEvent, PositionTracker};
use crate::style::{CursorStyle, StyleStack};
use crate::subscription::{self, Callback, Subscribers, Subscription};
use crate::surface::CursorSurface;
use crate::types::{self, Point, Size, Vector};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

/// An immutable snapshot of the manager, as returned by [`CursorManager::get_state`] and passed to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorState {
    /// Raw pointer position.
    pub position: Point,
    /// `position` mapped into `[-1, 1]` across the viewport. `(0, 0)` until the viewport size is known.
    pub normalized_position: Point,
    /// Position interpolated toward `position` once per tick.
    pub smoothed_position: Point,
    /// Displacement of `position` over the last tick.
    pub velocity: Vector,
    pub is_visible: bool,
    pub is_in_viewport: bool,
    pub style: CursorStyle,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            position: Point::origin(),
            normalized_position: Point::origin(),
            smoothed_position: Point::origin(),
            velocity: Vector::zero(),
            is_visible: true,
            is_in_viewport: false,
            style: CursorStyle::Default,
        }
    }
}

struct State {
    tracker: PositionTracker,
    smoothed: Point,
    velocity: Vector,
    viewport: Option<Size>,
    is_visible: bool,
    lerp_factor: f32,
    default_factor: f32,
    styles: StyleStack,
    surface: Option<Rc<dyn CursorSurface>>,
    initialized: bool,
    ticking: bool,
}

impl State {
    fn new(config: &CursorConfig) -> Self {
        let default_factor = types::clamp_factor(config.lerp_factor, crate::config::DEFAULT_LERP_FACTOR);
        Self {
            tracker: PositionTracker::new(),
            smoothed: Point::origin(),
            velocity: Vector::zero(),
            viewport: None,
            is_visible: true,
            lerp_factor: default_factor,
            default_factor,
            styles: StyleStack::new(config.base_style.clone()),
            surface: None,
            initialized: false,
            ticking: false,
        }
    }

    fn snapshot(&self) -> CursorState {
        let position = self.tracker.position();
        CursorState {
            position,
            normalized_position: types::normalize(position, self.viewport),
            smoothed_position: self.smoothed,
            velocity: self.velocity,
            is_visible: self.is_visible,
            is_in_viewport: self.tracker.in_viewport(),
            style: self.styles.current().clone(),
        }
    }
}

/// Tracks the pointer, smooths it once per frame, and owns the stack of cursor style overrides.
///
/// A `CursorManager` is a cheap handle: clones share the same state. The application constructs one and passes
/// it to whatever needs it. All access must happen on the thread that owns the UI.
///
/// Subscribers are notified after the manager's own state has been released, so a callback may call back into
/// the manager, including [`destroy`][CursorManager::destroy].
#[derive(Clone)]
pub struct CursorManager {
    state: Rc<RefCell<State>>,
    subscribers: Subscribers,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new(CursorConfig::default())
    }
}

impl std::fmt::Debug for CursorManager {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("CursorManager")
            .field("state", &self.get_state())
            .field("initialized", &self.is_initialized())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl CursorManager {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(State::new(&config))),
            subscribers: Subscribers::default(),
        }
    }

    /// Attach a platform surface. Returns whether the manager was initialized by this call.
    ///
    /// Does nothing if the manager is already initialized, or if no usable surface is given.
    pub fn init(&self, surface: Option<Rc<dyn CursorSurface>>) -> bool {
        let style = {
            let mut state = self.state.borrow_mut();
            if state.initialized {
                debug!("cursor manager already initialized");
                return false;
            }
            let surface = match surface {
                Some(surface) if surface.has_handle() => surface,
                _ => {
                    debug!("no display surface, cursor manager stays uninitialized");
                    return false;
                }
            };
            if let Some(size) = surface.viewport_size() {
                state.viewport = Some(size);
            }
            state.surface = Some(surface);
            state.initialized = true;
            state.styles.current().clone()
        };
        debug!(viewport = ?self.state.borrow().viewport, "cursor manager initialized");
        self.propagate(&style);
        true
    }

    /// Detach the surface and drop every subscriber. Calling it again does nothing.
    pub fn destroy(&self) {
        {
            let mut state = self.state.borrow_mut();
            if !state.initialized && state.surface.is_none() && self.subscribers.len() == 0 {
                return;
            }
            state.surface = None;
            state.initialized = false;
        }
        self.subscribers.clear();
        debug!("cursor manager destroyed");
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    /// Route a platform pointer event. Ignored while the manager is not initialized.
    pub fn dispatch(&self, event: &PointerEvent) {
        if !self.is_initialized() {
            return;
        }
        match *event {
            PointerEvent::Moved { position } => self.on_pointer_move(position.x, position.y),
            PointerEvent::Entered => self.on_pointer_enter(),
            PointerEvent::Left => self.on_pointer_leave(),
        }
    }

    pub fn on_pointer_move(&self, x: f32, y: f32) {
        self.state.borrow_mut().tracker.record(Point::new(x, y));
    }

    pub fn on_pointer_enter(&self) {
        let mut state = self.state.borrow_mut();
        state.tracker.set_in_viewport(true);
        state.is_visible = true;
        trace!("pointer entered");
    }

    pub fn on_pointer_leave(&self) {
        self.state.borrow_mut().tracker.set_in_viewport(false);
        trace!("pointer left");
    }

    /// Set the viewport size used to compute [`CursorState::normalized_position`].
    pub fn set_viewport_size(&self, width: f32, height: f32) {
        self.state.borrow_mut().viewport = Some(Size::new(width, height));
    }

    /// Advance one frame: derive velocity, move the smoothed position toward the pointer, then notify subscribers.
    ///
    /// Ticks never overlap: a tick requested by a subscriber while the current one is notifying is ignored.
    pub fn tick(&self) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            if state.ticking {
                trace!("tick requested while subscribers are being notified, ignoring");
                return;
            }
            state.ticking = true;
            state.velocity = state.tracker.take_velocity();
            let factor = state.lerp_factor;
            state.smoothed = types::lerp(state.smoothed, state.tracker.position(), factor);
            state.snapshot()
        };
        self.subscribers.notify(&snapshot);
        self.state.borrow_mut().ticking = false;
    }

    /// Clamped to `[0.01, 1]`. Takes effect from the next tick.
    pub fn set_lerp_factor(&self, factor: f32) {
        let mut state = self.state.borrow_mut();
        state.lerp_factor = types::clamp_factor(factor, state.default_factor);
    }

    pub fn lerp_factor(&self) -> f32 {
        self.state.borrow().lerp_factor
    }

    pub fn push_style(&self, style: CursorStyle) {
        let current = {
            let mut state = self.state.borrow_mut();
            state.styles.push(style);
            state.styles.current().clone()
        };
        self.propagate(&current);
    }

    /// Remove the most recent override. The base style is never popped.
    pub fn pop_style(&self) {
        let current = {
            let mut state = self.state.borrow_mut();
            if state.styles.pop().is_none() {
                return;
            }
            state.styles.current().clone()
        };
        self.propagate(&current);
    }

    /// Replace the base style. Only reaches the platform if no override is active.
    pub fn set_base_style(&self, style: CursorStyle) {
        let current = {
            let mut state = self.state.borrow_mut();
            state.styles.set_base(style);
            if !state.styles.is_base() {
                return;
            }
            state.styles.current().clone()
        };
        self.propagate(&current);
    }

    pub fn hide(&self) {
        self.state.borrow_mut().is_visible = false;
        self.push_style(CursorStyle::None);
    }

    pub fn show(&self) {
        let current = {
            let mut state = self.state.borrow_mut();
            state.is_visible = true;
            state.styles.pop_hidden();
            state.styles.current().clone()
        };
        self.propagate(&current);
    }

    /// Jump the smoothed position onto the pointer, skipping interpolation.
    pub fn snap_to_position(&self) {
        let mut state = self.state.borrow_mut();
        state.smoothed = state.tracker.position();
    }

    /// Register `callback` to run on every tick. It is called once right away with the current state.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&CursorState) + 'static,
    {
        let (subscription, callback) = self.subscribers.insert(Box::new(callback) as Callback);
        let snapshot = self.get_state();
        subscription::call(subscription.id(), &callback, &snapshot);
        subscription
    }

    pub fn get_state(&self) -> CursorState {
        self.state.borrow().snapshot()
    }

    pub fn current_style(&self) -> CursorStyle {
        self.state.borrow().styles.current().clone()
    }

    /// Number of entries on the style stack, base included.
    pub fn style_depth(&self) -> usize {
        self.state.borrow().styles.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn propagate(&self, style: &CursorStyle) {
        let surface = self.state.borrow().surface.clone();
        trace!(%style, "cursor style");
        if let Some(surface) = surface {
            surface.set_cursor(style);
        }
    }
}
