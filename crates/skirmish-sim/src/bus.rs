//! Simulation-scoped publish/subscribe.
//!
//! `publish` runs every handler subscribed to the event's topic on the
//! caller's stack, in subscription order, with `Stage::Core` handlers (an
//! entity's own subsystems) ahead of `Stage::Observer` handlers. Every
//! handler can read the simulation context, but only `Core` handlers may
//! write to it. Anything a handler does to the bus itself is deferred: events they emit are delivered after the current
//! event's handlers, and subscriptions they make or drop take effect once
//! the outermost `publish` returns. A handler released before its turn is
//! skipped.
//!
//! Subscriptions are owned tokens. Dropping a [`Subscription`] removes its
//! handler, so a component that is torn down cannot leave a dangling
//! handler behind.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use skirmish_core::enums::Topic;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::EntityId;

use crate::context::SimContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Delivery tier. All `Core` handlers for a topic run before any `Observer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Core,
    Observer,
}

pub type Handler = Box<dyn FnMut(&CombatEvent, &mut HandlerCx<'_>)>;

type ReleaseList = Rc<RefCell<Vec<SubscriptionId>>>;

/// Lifetime-scoped registration token.
#[derive(Debug)]
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    id: SubscriptionId,
    topic: Topic,
    released: Weak<RefCell<Vec<SubscriptionId>>>,
    detached: bool,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Keep the handler registered for the rest of the bus's lifetime.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Some(released) = self.released.upgrade() {
            released.borrow_mut().push(self.id);
        }
    }
}

struct Registration {
    id: SubscriptionId,
    topic: Topic,
    stage: Stage,
    handler: Handler,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    released: ReleaseList,
    deferred: Vec<Registration>,
    outbox: VecDeque<CombatEvent>,
}

impl BusState {
    fn register(&mut self, topic: Topic, stage: Stage, handler: Handler) -> (Registration, Subscription) {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        let subscription = Subscription {
            id,
            topic,
            released: Rc::downgrade(&self.released),
            detached: false,
        };
        let registration = Registration {
            id,
            topic,
            stage,
            handler,
        };
        (registration, subscription)
    }

    fn is_released(&self, id: SubscriptionId) -> bool {
        self.released.borrow().contains(&id)
    }
}

/// What a handler may touch while an event is being delivered.
pub struct HandlerCx<'a> {
    ctx: &'a mut SimContext,
    stage: Stage,
    state: &'a mut BusState,
}

impl HandlerCx<'_> {
    pub fn ctx(&self) -> &SimContext {
        &*self.ctx
    }

    /// Write access to the context. `None` for observers.
    pub fn ctx_mut(&mut self) -> Option<&mut SimContext> {
        match self.stage {
            Stage::Core => Some(&mut *self.ctx),
            Stage::Observer => None,
        }
    }

    /// Stage of the handler being invoked.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Queue a follow-up event. It is delivered, within the same `publish`
    /// call, after every handler of the current event has run.
    pub fn emit(&mut self, event: CombatEvent) {
        self.state.outbox.push_back(event);
    }

    /// Subscribe from inside a handler. The handler becomes active once the
    /// current `publish` completes.
    pub fn subscribe(
        &mut self,
        topic: Topic,
        handler: impl FnMut(&CombatEvent, &mut HandlerCx<'_>) + 'static,
    ) -> Subscription {
        let (registration, subscription) = self.state.register(topic, Stage::Observer, Box::new(handler));
        self.state.deferred.push(registration);
        subscription
    }

    /// Release a subscription. Takes effect immediately for delivery; the
    /// registration itself is removed after the current `publish`.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        drop(subscription);
    }
}

#[derive(Default)]
pub struct EventBus {
    registrations: Vec<Registration>,
    state: BusState,
    journal: Vec<CombatEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe an observer to every event on `topic`.
    pub fn subscribe(
        &mut self,
        topic: Topic,
        handler: impl FnMut(&CombatEvent, &mut HandlerCx<'_>) + 'static,
    ) -> Subscription {
        self.subscribe_staged(topic, Stage::Observer, handler)
    }

    pub fn subscribe_staged(
        &mut self,
        topic: Topic,
        stage: Stage,
        handler: impl FnMut(&CombatEvent, &mut HandlerCx<'_>) + 'static,
    ) -> Subscription {
        let (registration, subscription) = self.state.register(topic, stage, Box::new(handler));
        self.insert(registration);
        subscription
    }

    /// Subscribe to `topic`, filtered to events about `entity`.
    pub fn subscribe_entity(
        &mut self,
        topic: Topic,
        stage: Stage,
        entity: EntityId,
        mut handler: impl FnMut(&CombatEvent, &mut HandlerCx<'_>) + 'static,
    ) -> Subscription {
        self.subscribe_staged(topic, stage, move |event, cx| {
            if event.entity() == entity {
                handler(event, cx);
            }
        })
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        drop(subscription);
        self.collect_released();
    }

    /// Deliver `event` and any follow-ups emitted by its handlers. Returns
    /// the number of handler invocations.
    pub fn publish(&mut self, event: CombatEvent, ctx: &mut SimContext) -> usize {
        self.state.outbox.push_back(event);
        let mut invoked = 0;

        while let Some(event) = self.state.outbox.pop_front() {
            self.collect_released();
            debug!("publish {:?}", event);

            let topic = event.topic();
            for registration in self.registrations.iter_mut() {
                if registration.topic != topic || self.state.is_released(registration.id) {
                    continue;
                }
                let mut cx = HandlerCx {
                    ctx: &mut *ctx,
                    stage: registration.stage,
                    state: &mut self.state,
                };
                (registration.handler)(&event, &mut cx);
                invoked += 1;
            }

            self.journal.push(event);
        }

        self.flush_deferred();
        self.collect_released();
        invoked
    }

    /// Live handlers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.topic == topic && !self.state.is_released(r.id))
            .count()
    }

    /// Every event delivered since the last drain, in delivery order.
    pub fn drain_journal(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Drop registrations whose tokens have been released.
    pub fn collect_released(&mut self) {
        let released: Vec<SubscriptionId> = self.state.released.borrow_mut().drain(..).collect();
        if released.is_empty() {
            return;
        }
        trace!("removing {} released subscriptions", released.len());
        self.registrations.retain(|r| !released.contains(&r.id));
        self.state.deferred.retain(|r| !released.contains(&r.id));
    }

    fn flush_deferred(&mut self) {
        for registration in std::mem::take(&mut self.state.deferred) {
            self.insert(registration);
        }
    }

    /// Insert after the last registration of the same or an earlier stage.
    fn insert(&mut self, registration: Registration) {
        let at = self
            .registrations
            .iter()
            .position(|r| r.stage > registration.stage)
            .unwrap_or(self.registrations.len());
        self.registrations.insert(at, registration);
    }
}
