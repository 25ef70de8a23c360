// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Synchronous delivery of [`Event`]s to a [`Subscriber`].
//!
//! Every [`Subscriber`] declares which handler runs on which [`EventKind`]
//! and with which priority. A [`Dispatcher`] turns these declarations into a
//! dispatch table once, and then runs the handlers of every delivered
//! [`Event`] in the descending order of their priorities (declaration order
//! for equal priorities), returning only once all of them finished.

use std::{
    cell::RefCell,
    cmp::Reverse,
    collections::HashMap,
    fmt, io,
    rc::Rc,
};

use crate::{
    error::{DispatchError, DispatchResult},
    event::{Event, EventKind},
};

/// Handler of an [`Event`] by a [`Subscriber`] `S`.
pub type Handler<S> = fn(&mut S, &Event) -> io::Result<()>;

/// Binding of a [`Handler`] to an [`EventKind`].
pub struct Subscription<S> {
    /// [`EventKind`] the [`Handler`] is bound to.
    pub kind: EventKind,

    /// Priority of the [`Handler`]: higher runs earlier.
    pub priority: i32,

    /// Bound [`Handler`].
    pub handler: Handler<S>,
}

impl<S> Subscription<S> {
    /// Creates a new [`Subscription`].
    #[must_use]
    pub const fn new(kind: EventKind, priority: i32, handler: Handler<S>) -> Self {
        Self {
            kind,
            priority,
            handler,
        }
    }
}

impl<S> Clone for Subscription<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Subscription<S> {}

impl<S> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Something handling [`Event`]s.
pub trait Subscriber: Sized {
    /// [`Subscription`]s of this [`Subscriber`].
    fn subscriptions() -> Vec<Subscription<Self>>;
}

/// Dispatch table delivering [`Event`]s to a single [`Subscriber`].
pub struct Dispatcher<S> {
    subscriber: S,
    table: HashMap<EventKind, Vec<Subscription<S>>>,
}

impl<S: fmt::Debug> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("subscriber", &self.subscriber)
            .field("table", &self.table)
            .finish()
    }
}

impl<S: Subscriber> Dispatcher<S> {
    /// Creates a new [`Dispatcher`] for the given `subscriber`.
    #[must_use]
    pub fn new(subscriber: S) -> Self {
        let mut table = HashMap::<_, Vec<_>>::new();
        for sub in S::subscriptions() {
            table.entry(sub.kind).or_default().push(sub);
        }
        for subs in table.values_mut() {
            subs.sort_by_key(|s| Reverse(s.priority));
        }
        Self { subscriber, table }
    }
}

impl<S> Dispatcher<S> {
    /// Delivers the given `event` to every [`Handler`] bound to its
    /// [`EventKind`].
    ///
    /// # Errors
    ///
    /// If any [`Handler`] fails. The remaining ones are not run.
    pub fn dispatch(&mut self, event: &Event) -> DispatchResult {
        let kind = event.kind();
        let Some(subs) = self.table.get(&kind) else {
            tracing::trace!(%kind, "no handlers subscribed");
            return Ok(());
        };

        tracing::trace!(%kind, handlers = subs.len(), "dispatching event");
        for sub in subs {
            (sub.handler)(&mut self.subscriber, event)?;
        }
        Ok(())
    }

    /// Priorities of the [`Handler`]s bound to the given `kind`, in the order
    /// they run.
    #[must_use]
    pub fn priorities(&self, kind: EventKind) -> Vec<i32> {
        self.table
            .get(&kind)
            .map(|subs| subs.iter().map(|s| s.priority).collect())
            .unwrap_or_default()
    }

    /// Returns the wrapped [`Subscriber`].
    #[must_use]
    pub const fn subscriber(&self) -> &S {
        &self.subscriber
    }

    /// Unwraps this [`Dispatcher`] into its [`Subscriber`].
    #[must_use]
    pub fn into_inner(self) -> S {
        self.subscriber
    }
}

/// [`Dispatcher`] shared between several callers.
///
/// Rejects an [`Event`] delivered while another delivery through any clone of
/// it is still running, instead of handling it in the middle of the other
/// one.
pub struct SharedDispatcher<S>(Rc<RefCell<Dispatcher<S>>>);

impl<S> Clone for SharedDispatcher<S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<S: fmt::Debug> fmt::Debug for SharedDispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedDispatcher").field(&self.0).finish()
    }
}

impl<S> From<Dispatcher<S>> for SharedDispatcher<S> {
    fn from(dispatcher: Dispatcher<S>) -> Self {
        Self(Rc::new(RefCell::new(dispatcher)))
    }
}

impl<S> SharedDispatcher<S> {
    /// Delivers the given `event`, see [`Dispatcher::dispatch()`].
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Reentrant`] if another delivery is still running;
    /// - [`DispatchError::Io`] if any handler fails.
    pub fn dispatch(&self, event: &Event) -> DispatchResult {
        let kind = event.kind();
        let mut dispatcher = self.0.try_borrow_mut().map_err(|_| {
            tracing::warn!(%kind, "re-entrant event delivery rejected");
            DispatchError::Reentrant { kind }
        })?;
        dispatcher.dispatch(event)
    }

    /// Runs the given function on the wrapped [`Subscriber`].
    ///
    /// Returns [`None`] if called from inside a delivery.
    pub fn inspect<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.0.try_borrow().ok().map(|d| f(d.subscriber()))
    }

    /// Unwraps the [`Dispatcher`] if this is its last handle.
    ///
    /// # Errors
    ///
    /// Returns this [`SharedDispatcher`] back if other handles exist.
    pub fn try_unwrap(self) -> Result<Dispatcher<S>, Self> {
        Rc::try_unwrap(self.0).map(RefCell::into_inner).map_err(Self)
    }
}
