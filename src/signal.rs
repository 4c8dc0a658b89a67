//! Typed publish/subscribe between nodes.
//!
//! Subscriptions are keyed by the emitting node and the signal kind, and
//! callbacks run synchronously in registration order. There is no
//! unsubscribe; a subscription lives as long as the engine.

use rustc_hash::FxHashMap;

use crate::scene::tree::{NodeId, Tree};

/// A transient event record describing something that just happened.
///
/// Signals are constructed, dispatched, and dropped within a single emit
/// call; no node holds on to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// A positioned node is inside an area trigger this frame.
    BodyInArea { area: NodeId, body: NodeId },
    /// A positioned node was first detected inside an area trigger.
    BodyEntered { area: NodeId, body: NodeId },
    /// A previously detected node is no longer inside an area trigger.
    BodyExited { area: NodeId, body: NodeId },
}

/// The variant tag of a [`Signal`], used to address subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    BodyInArea,
    BodyEntered,
    BodyExited,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::BodyInArea { .. } => SignalKind::BodyInArea,
            Signal::BodyEntered { .. } => SignalKind::BodyEntered,
            Signal::BodyExited { .. } => SignalKind::BodyExited,
        }
    }

    /// The node that emitted this signal.
    pub fn emitter(&self) -> NodeId {
        match self {
            Signal::BodyInArea { area, .. }
            | Signal::BodyEntered { area, .. }
            | Signal::BodyExited { area, .. } => *area,
        }
    }
}

/// A subscriber callback. Gets the signal and mutable access to the scene
/// tree. Mutating the tree from a callback while a frame is in flight is
/// allowed but can affect nodes still to be visited this frame.
pub type SignalCallback = Box<dyn FnMut(&Signal, &mut Tree)>;

/// The signal registry: subscriber lists addressed by emitter and kind.
#[derive(Default)]
pub struct SignalHub {
    subscribers: FxHashMap<(NodeId, SignalKind), Vec<SignalCallback>>,
}

impl SignalHub {
    pub fn new() -> Self {
        SignalHub::default()
    }

    /// Register `callback` to run whenever `emitter` emits a signal of
    /// `kind`. Multiple subscriptions per key run in registration order.
    pub fn connect(
        &mut self,
        emitter: NodeId,
        kind: SignalKind,
        callback: impl FnMut(&Signal, &mut Tree) + 'static,
    ) {
        self.subscribers
            .entry((emitter, kind))
            .or_default()
            .push(Box::new(callback));
    }

    /// Synchronously invoke every subscriber registered for this signal's
    /// emitter and kind.
    ///
    /// The subscriber list is taken out of the registry for the duration of
    /// the dispatch, so callbacks that connect to the same key are kept for
    /// the next emission rather than invoked mid-iteration.
    pub fn emit(&mut self, signal: Signal, tree: &mut Tree) {
        let key = (signal.emitter(), signal.kind());
        let Some(mut list) = self.subscribers.remove(&key) else {
            return;
        };
        for callback in list.iter_mut() {
            callback(&signal, tree);
        }
        if let Some(added) = self.subscribers.remove(&key) {
            list.extend(added);
        }
        self.subscribers.insert(key, list);
    }

    /// Number of subscribers for an (emitter, kind) pair.
    pub fn subscriber_count(&self, emitter: NodeId, kind: SignalKind) -> usize {
        self.subscribers
            .get(&(emitter, kind))
            .map_or(0, |list| list.len())
    }
}
