use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::Point;

/// Event published whenever the virtual pen moves.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum PenEvent {
    /// The pen is now at this screen-space point.
    MovedTo(Point),
}

/// Handle returned by [`PenBroadcaster::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(PenEvent)>;

#[derive(Default)]
struct PenState {
    last: Option<Point>,
    suspended: u32,
    listeners: Vec<(ListenerId, Listener)>,
    // Ids of listeners taken out for the publish in progress, and those of them removed
    // during it.
    notifying: Vec<ListenerId>,
    removed: Vec<ListenerId>,
    next_id: u64,
}

/// Shared "last pen position" channel.
///
/// Last writer wins. While suspended (see [`PenBroadcaster::suspend`]) every publish is
/// dropped, which lets a host run several timelines in parallel without them fighting
/// over the pen. Listeners must not publish from inside their callback.
#[derive(Clone, Default)]
pub struct PenBroadcaster {
    state: Rc<RefCell<PenState>>,
}

impl std::fmt::Debug for PenBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("PenBroadcaster")
            .field("last", &state.last)
            .field("suspended", &state.suspended)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl PenBroadcaster {
    /// Broadcaster with no known position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcaster seeded with a starting position.
    pub fn at(start: Point) -> Self {
        let pen = Self::default();
        pen.state.borrow_mut().last = Some(start);
        pen
    }

    /// Last published position.
    pub fn last_position(&self) -> Option<Point> {
        self.state.borrow().last
    }

    /// Record a new pen position and notify listeners. Ignored while suspended.
    pub fn publish(&self, point: Point) {
        let mut listeners = {
            let mut state = self.state.borrow_mut();
            if state.suspended > 0 {
                return;
            }
            state.last = Some(point);
            let listeners = std::mem::take(&mut state.listeners);
            state.notifying = listeners.iter().map(|(id, _)| *id).collect();
            listeners
        };
        for (id, listener) in &mut listeners {
            if self.state.borrow().removed.contains(id) {
                continue;
            }
            listener(PenEvent::MovedTo(point));
        }
        let mut state = self.state.borrow_mut();
        let removed = std::mem::take(&mut state.removed);
        state.notifying.clear();
        listeners.retain(|(id, _)| !removed.contains(id));
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
    }

    /// Register a listener for pen events.
    pub fn subscribe(&self, listener: impl FnMut(PenEvent) + 'static) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    ///
    /// Safe to call from inside a listener, including on itself; a listener removed
    /// mid-publish is not called again.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(lid, _)| *lid != id);
        if state.listeners.len() != before {
            return true;
        }
        if state.notifying.contains(&id) && !state.removed.contains(&id) {
            state.removed.push(id);
            return true;
        }
        false
    }

    /// Start ignoring publishes. Nests with [`PenBroadcaster::resume`].
    pub fn suspend(&self) {
        self.state.borrow_mut().suspended += 1;
    }

    /// Undo one [`PenBroadcaster::suspend`].
    pub fn resume(&self) {
        let mut state = self.state.borrow_mut();
        state.suspended = state.suspended.saturating_sub(1);
    }

    /// `true` while at least one suspension is active.
    pub fn is_suspended(&self) -> bool {
        self.state.borrow().suspended > 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pen/broadcaster.rs"]
mod tests;
