//! Pointer Events - Event types and the handler registry
//!
//! The host forwards its global press/move/release events through
//! [`Dispatcher::dispatch`]; capture machines register handlers and get back
//! an explicit [`HandlerId`] token. Disable paths remove exactly the tokens
//! enable handed out, which is what makes double-enable/double-disable
//! provably idempotent.
//!
//! Dispatch snapshots the handler list before invoking, so a handler may
//! register or remove handlers while it runs (a press handler attaching the
//! gesture's move/release handlers, a release handler detaching itself).
//! Handlers registered during dispatch never see the event that was already
//! in flight.
//!
//! # Example
//!
//! ```ignore
//! use pagemark::events::{Dispatcher, PointerEvent};
//!
//! let events = Dispatcher::new();
//! let token = events.on_press(|event| {
//!     println!("press at ({}, {})", event.x, event.y);
//! });
//! events.dispatch(&PointerEvent::press(10.0, 20.0));
//! events.remove(token);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// TYPES
// =============================================================================

bitflags::bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const META  = 1 << 3;
    }
}

/// Which phase of a gesture an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
}

/// One pointer sample in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { phase, x, y, modifiers: Modifiers::NONE }
    }

    /// Create a press event.
    pub fn press(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Press, x, y)
    }

    /// Create a move event.
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    /// Create a release event.
    pub fn release(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Release, x, y)
    }

    /// Attach modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

/// Token identifying one registered handler (or selection suppressor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

type Handler = Rc<dyn Fn(&PointerEvent)>;

#[derive(Default)]
struct Registry {
    press: Vec<(HandlerId, Handler)>,
    moves: Vec<(HandlerId, Handler)>,
    release: Vec<(HandlerId, Handler)>,
    suppressors: Vec<HandlerId>,
    next_id: u64,
}

impl Registry {
    fn next_id(&mut self) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn list_mut(&mut self, phase: PointerPhase) -> &mut Vec<(HandlerId, Handler)> {
        match phase {
            PointerPhase::Press => &mut self.press,
            PointerPhase::Move => &mut self.moves,
            PointerPhase::Release => &mut self.release,
        }
    }
}

/// Instance-scoped handler registry for pointer events.
///
/// One dispatcher per [`crate::Annotator`]; nothing here is global, so
/// independent engine instances never observe each other.
#[derive(Default)]
pub struct Dispatcher {
    inner: RefCell<Registry>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, phase: PointerPhase, handler: Handler) -> HandlerId {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id();
        reg.list_mut(phase).push((id, handler));
        id
    }

    /// Register a press handler. Returns its removal token.
    pub fn on_press<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.register(PointerPhase::Press, Rc::new(handler))
    }

    /// Register a move handler. Returns its removal token.
    pub fn on_move<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.register(PointerPhase::Move, Rc::new(handler))
    }

    /// Register a release handler. Returns its removal token.
    pub fn on_release<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.register(PointerPhase::Release, Rc::new(handler))
    }

    /// Ask the host to suppress native text selection while the token lives.
    ///
    /// The engine never mutates host selection itself; the host checks
    /// [`Dispatcher::selection_suppressed`] and cancels its default behavior.
    pub fn suppress_selection(&self) -> HandlerId {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id();
        reg.suppressors.push(id);
        id
    }

    /// Whether any live token currently suppresses native selection.
    pub fn selection_suppressed(&self) -> bool {
        !self.inner.borrow().suppressors.is_empty()
    }

    /// Remove a handler or suppressor by token. Unknown tokens are a no-op.
    pub fn remove(&self, id: HandlerId) {
        let mut reg = self.inner.borrow_mut();
        reg.press.retain(|(handler_id, _)| *handler_id != id);
        reg.moves.retain(|(handler_id, _)| *handler_id != id);
        reg.release.retain(|(handler_id, _)| *handler_id != id);
        reg.suppressors.retain(|handler_id| *handler_id != id);
    }

    /// Total number of registered pointer handlers (all phases).
    pub(crate) fn handler_count(&self) -> usize {
        let reg = self.inner.borrow();
        reg.press.len() + reg.moves.len() + reg.release.len()
    }

    /// Dispatch one event to every handler registered for its phase.
    pub fn dispatch(&self, event: &PointerEvent) {
        let handlers: Vec<Handler> = {
            let mut reg = self.inner.borrow_mut();
            reg.list_mut(event.phase)
                .iter()
                .map(|(_, handler)| Rc::clone(handler))
                .collect()
        };

        for handler in handlers {
            handler(event);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_routes_by_phase() {
        let events = Dispatcher::new();

        let presses = Rc::new(Cell::new(0));
        let moves = Rc::new(Cell::new(0));

        let presses_clone = presses.clone();
        let _press = events.on_press(move |_| presses_clone.set(presses_clone.get() + 1));
        let moves_clone = moves.clone();
        let _move = events.on_move(move |_| moves_clone.set(moves_clone.get() + 1));

        events.dispatch(&PointerEvent::press(0.0, 0.0));
        events.dispatch(&PointerEvent::moved(1.0, 1.0));
        events.dispatch(&PointerEvent::moved(2.0, 2.0));
        events.dispatch(&PointerEvent::release(2.0, 2.0));

        assert_eq!(presses.get(), 1);
        assert_eq!(moves.get(), 2);
    }

    #[test]
    fn test_remove_stops_delivery() {
        let events = Dispatcher::new();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let token = events.on_press(move |_| count_clone.set(count_clone.get() + 1));

        events.dispatch(&PointerEvent::press(0.0, 0.0));
        assert_eq!(count.get(), 1);

        events.remove(token);
        events.dispatch(&PointerEvent::press(0.0, 0.0));
        assert_eq!(count.get(), 1);

        // Removing again is a no-op.
        events.remove(token);
        assert_eq!(events.handler_count(), 0);
    }

    #[test]
    fn test_handler_can_register_during_dispatch() {
        let events = Rc::new(Dispatcher::new());

        let nested_calls = Rc::new(Cell::new(0));
        let nested_clone = nested_calls.clone();
        let events_clone = events.clone();

        let _press = events.on_press(move |_| {
            let nested = nested_clone.clone();
            events_clone.on_move(move |_| nested.set(nested.get() + 1));
        });

        // The move handler is attached during this press dispatch but must
        // not see the press event itself.
        events.dispatch(&PointerEvent::press(0.0, 0.0));
        assert_eq!(nested_calls.get(), 0);

        events.dispatch(&PointerEvent::moved(1.0, 1.0));
        assert_eq!(nested_calls.get(), 1);
    }

    #[test]
    fn test_handler_can_remove_itself_during_dispatch() {
        let events = Rc::new(Dispatcher::new());

        let count = Rc::new(Cell::new(0));
        let token_slot: Rc<Cell<Option<HandlerId>>> = Rc::new(Cell::new(None));

        let count_clone = count.clone();
        let events_clone = events.clone();
        let slot_clone = token_slot.clone();
        let token = events.on_release(move |_| {
            count_clone.set(count_clone.get() + 1);
            if let Some(token) = slot_clone.get() {
                events_clone.remove(token);
            }
        });
        token_slot.set(Some(token));

        events.dispatch(&PointerEvent::release(0.0, 0.0));
        events.dispatch(&PointerEvent::release(0.0, 0.0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_selection_suppression_tokens() {
        let events = Dispatcher::new();
        assert!(!events.selection_suppressed());

        let first = events.suppress_selection();
        let second = events.suppress_selection();
        assert!(events.selection_suppressed());

        events.remove(first);
        assert!(events.selection_suppressed());

        events.remove(second);
        assert!(!events.selection_suppressed());
    }

    #[test]
    fn test_modifiers() {
        let event = PointerEvent::press(0.0, 0.0).with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);

        assert!(event.modifiers.contains(Modifiers::SHIFT));
        assert!(event.modifiers.contains(Modifiers::CTRL));
        assert!(!event.modifiers.contains(Modifiers::ALT));
    }
}
