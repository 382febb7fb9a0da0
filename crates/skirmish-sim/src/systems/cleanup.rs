//! Death bookkeeping and delayed despawn.

use log::info;

use skirmish_core::components::{Corpse, Identity};
use skirmish_core::enums::Topic;
use skirmish_core::types::EntityId;

use crate::bus::{EventBus, Stage, Subscription};
use crate::context::SimContext;

/// Dead entities whose grace period has run out, in id order.
pub fn expired(ctx: &SimContext, grace_secs: f64) -> Vec<EntityId> {
    let now = ctx.time.elapsed_secs;
    let mut ids: Vec<EntityId> = ctx
        .world
        .query::<(&Identity, &Corpse)>()
        .iter()
        .filter(|(_, (_, corpse))| now - corpse.died_at_secs >= grace_secs)
        .map(|(_, (identity, _))| identity.id)
        .collect();
    ids.sort();
    ids
}

/// On the owner's death the registry entry goes inactive. The hurt-volume
/// stops accepting hits from here on.
pub fn wire(bus: &mut EventBus, id: EntityId) -> Subscription {
    bus.subscribe_entity(Topic::Died, Stage::Core, id, move |_event, cx| {
        let Some(ctx) = cx.ctx_mut() else {
            return;
        };
        if ctx.registry.set_active(id, false).is_ok() {
            info!("{id} died at {:.2}s", ctx.time.elapsed_secs);
        }
    })
}
