//! Single-threaded scroll/resize dispatcher with RAII subscriptions
//!
//! Handlers for one signal kind run in registration order. Dropping a
//! `Subscription` unregisters its handler (and releases any throttle timer it
//! owns), so an unmounted consumer never observes another event.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, warn};

use crate::throttle::{Clock, Throttle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Scroll,
    Resize,
}

/// Payload delivered to handlers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub kind: SignalKind,
    pub scroll_y: f64,
    pub viewport_height: f64,
}

impl ScrollEvent {
    pub fn scroll(scroll_y: f64, viewport_height: f64) -> Self {
        Self {
            kind: SignalKind::Scroll,
            scroll_y,
            viewport_height,
        }
    }

    pub fn resize(scroll_y: f64, viewport_height: f64) -> Self {
        Self {
            kind: SignalKind::Resize,
            scroll_y,
            viewport_height,
        }
    }
}

type Handler = Rc<RefCell<dyn FnMut(&ScrollEvent)>>;

struct Entry {
    id: u64,
    kind: SignalKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}

/// Event source shared by every listener on the page
#[derive(Clone, Default)]
pub struct ScrollSignal {
    registry: Rc<RefCell<Registry>>,
    dispatching: Rc<Cell<bool>>,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it stays live until the returned guard drops
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn subscribe<F>(&self, kind: SignalKind, handler: F) -> Subscription
    where
        F: FnMut(&ScrollEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        debug!(id, ?kind, "Listener registered");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Register a handler behind a leading-edge throttle
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn subscribe_throttled<F, C>(
        &self,
        kind: SignalKind,
        interval: Duration,
        clock: C,
        handler: F,
    ) -> Subscription
    where
        F: FnMut(&ScrollEvent) + 'static,
        C: Clock + 'static,
    {
        let mut handler = handler;
        let mut throttle = Throttle::with_clock(move |event: ScrollEvent| handler(&event), interval, clock);
        self.subscribe(kind, move |event| {
            throttle.call(*event);
        })
    }

    /// Deliver an event to every handler registered for its kind
    ///
    /// Returns the number of handlers invoked. A dispatch issued from inside a
    /// handler is refused rather than recursing.
    pub fn dispatch(&self, event: ScrollEvent) -> usize {
        if self.dispatching.get() {
            warn!(kind = ?event.kind, "Re-entrant dispatch refused");
            return 0;
        }
        let _guard = DispatchGuard::enter(&self.dispatching);

        let targets: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == event.kind)
            .map(|e| (e.id, e.handler.clone()))
            .collect();

        let mut delivered = 0;
        for (id, handler) in targets {
            // Skip handlers unregistered by an earlier handler in this dispatch
            if !self.registry.borrow().contains(id) {
                continue;
            }
            (&mut *handler.borrow_mut())(&event);
            delivered += 1;
        }

        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Holds the dispatching flag; cleared on every exit, including unwinding
struct DispatchGuard<'a>(&'a Cell<bool>);

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Registration guard; unregisters on drop
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Explicit unmount, same as dropping
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            // A handler may be unsubscribing itself mid-dispatch; the entry
            // list is never borrowed across handler calls.
            let removed = {
                let mut registry = registry.borrow_mut();
                let before = registry.entries.len();
                registry.entries.retain(|e| e.id != self.id);
                before != registry.entries.len()
            };
            if removed {
                debug!(id = self.id, "Listener removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throttle::ManualClock;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&ScrollEvent) + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move |_: &ScrollEvent| c.set(c.get() + 1))
    }

    #[test]
    fn test_dispatch_by_kind() {
        let signal = ScrollSignal::new();
        let (scrolls, on_scroll) = counter();
        let (resizes, on_resize) = counter();
        let _a = signal.subscribe(SignalKind::Scroll, on_scroll);
        let _b = signal.subscribe(SignalKind::Resize, on_resize);

        assert_eq!(signal.dispatch(ScrollEvent::scroll(10.0, 600.0)), 1);
        assert_eq!(scrolls.get(), 1);
        assert_eq!(resizes.get(), 0);
    }

    #[test]
    fn test_registration_order() {
        let signal = ScrollSignal::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = order.clone();
                signal.subscribe(SignalKind::Scroll, move |_| order.borrow_mut().push(i))
            })
            .collect();

        signal.dispatch(ScrollEvent::scroll(0.0, 600.0));
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn test_unmount_stops_delivery() {
        let signal = ScrollSignal::new();
        let clock = ManualClock::new();
        let (count, handler) = counter();
        let sub = signal.subscribe_throttled(SignalKind::Scroll, Duration::from_millis(16), clock.clone(), handler);

        signal.dispatch(ScrollEvent::scroll(1.0, 600.0));
        assert_eq!(count.get(), 1);

        sub.unsubscribe();
        assert_eq!(signal.listener_count(), 0);

        clock.advance(Duration::from_millis(50));
        assert_eq!(signal.dispatch(ScrollEvent::scroll(2.0, 600.0)), 0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_throttled_subscription() {
        let signal = ScrollSignal::new();
        let clock = ManualClock::new();
        let (count, handler) = counter();
        let _sub = signal.subscribe_throttled(SignalKind::Scroll, Duration::from_millis(16), clock.clone(), handler);

        for _ in 0..10 {
            signal.dispatch(ScrollEvent::scroll(1.0, 600.0));
        }
        assert_eq!(count.get(), 1);

        clock.advance(Duration::from_millis(20));
        signal.dispatch(ScrollEvent::scroll(3.0, 600.0));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_reentrant_dispatch_refused() {
        let signal = ScrollSignal::new();
        let inner = signal.clone();
        let nested = Rc::new(Cell::new(usize::MAX));
        let n = nested.clone();
        let _sub = signal.subscribe(SignalKind::Scroll, move |e| {
            n.set(inner.dispatch(*e));
        });

        assert_eq!(signal.dispatch(ScrollEvent::scroll(0.0, 600.0)), 1);
        assert_eq!(nested.get(), 0);
    }

    #[test]
    fn test_panicking_handler_does_not_wedge_dispatch() {
        let signal = ScrollSignal::new();
        let (count, on_scroll) = counter();
        let _panics = signal.subscribe(SignalKind::Scroll, |e| {
            if e.scroll_y < 0.0 {
                panic!("bad scroll offset");
            }
        });
        let _counts = signal.subscribe(SignalKind::Scroll, on_scroll);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            signal.dispatch(ScrollEvent::scroll(-1.0, 600.0))
        }));
        assert!(result.is_err());
        assert_eq!(count.get(), 0);

        assert_eq!(signal.dispatch(ScrollEvent::scroll(10.0, 600.0)), 2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_removed_mid_dispatch_is_skipped() {
        let signal = ScrollSignal::new();
        let (count, handler) = counter();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let v = victim.clone();
        let _killer = signal.subscribe(SignalKind::Scroll, move |_| {
            v.borrow_mut().take();
        });
        *victim.borrow_mut() = Some(signal.subscribe(SignalKind::Scroll, handler));

        assert_eq!(signal.dispatch(ScrollEvent::scroll(0.0, 600.0)), 1);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_subscription_outliving_signal() {
        let signal = ScrollSignal::new();
        let (_count, handler) = counter();
        let sub = signal.subscribe(SignalKind::Scroll, handler);
        drop(signal);
        drop(sub);
    }
}
