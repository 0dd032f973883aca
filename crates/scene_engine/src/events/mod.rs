//! Observer plumbing used to propagate camera and light state to shaders
//!
//! Key principles:
//! - Subscriptions are append-only; insertion order is notification order
//! - Delivery is synchronous, on the notifier's stack
//! - A notification snapshots the observer list, so observers may subscribe
//!   further observers without invalidating the ongoing broadcast

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared observer callback
pub type Observer<T> = Rc<dyn Fn(&T)>;

/// Ordered publish/subscribe broadcaster
///
/// `T` may be unsized, so a distributor can broadcast a slice such as
/// `&[PointLight]`.
pub struct EventDistributor<T: ?Sized> {
    observers: RefCell<Vec<Observer<T>>>,
}

impl<T: ?Sized> EventDistributor<T> {
    /// Create a distributor without subscribers
    pub fn new() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Append an observer; it will be called on every later notification
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&T) + 'static,
    {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Call every observer once, in subscription order
    pub fn notify(&self, event: &T) {
        let snapshot: Vec<Observer<T>> = self.observers.borrow().clone();
        for observer in &snapshot {
            observer(event);
        }
    }

    /// Number of subscribed observers
    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Whether nobody subscribed yet
    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }
}

impl<T: ?Sized> Default for EventDistributor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for EventDistributor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDistributor")
            .field("observers", &self.len())
            .finish()
    }
}

/// Single notify-callback slot carried by value objects that announce changes
pub struct EventProducer<T: ?Sized> {
    callback: Option<Box<dyn Fn(&T)>>,
}

impl<T: ?Sized> EventProducer<T> {
    /// Create a producer with no callback installed
    pub const fn new() -> Self {
        Self { callback: None }
    }

    /// Install (or replace) the callback
    pub fn set_notify_callback<F>(&mut self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Whether a callback is installed
    pub const fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Forward `event` to the callback; does nothing when none is set
    pub fn notify(&self, event: &T) {
        if let Some(callback) = &self.callback {
            callback(event);
        }
    }
}

impl<T: ?Sized> Default for EventProducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for EventProducer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventProducer")
            .field("has_callback", &self.has_callback())
            .finish()
    }
}
