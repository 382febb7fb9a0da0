//! Player motor system: velocity from the controlled agent's move input.

use log::debug;

use skirmish_core::components::{Identity, MoveTuning, PlayerMotor};
use skirmish_core::enums::{MotionMode, Topic};
use skirmish_core::types::{EntityId, MoveInput, Velocity};

use crate::bus::{EventBus, Stage, Subscription};
use crate::context::SimContext;

pub fn run(ctx: &mut SimContext, dt: f64) {
    let registry = &ctx.registry;
    for (_entity, (identity, vel, motor, tuning)) in ctx
        .world
        .query_mut::<(&Identity, &mut Velocity, &PlayerMotor, &MoveTuning)>()
    {
        if motor.mode == MotionMode::Frozen || !registry.is_active(identity.id) {
            continue;
        }
        *vel = skirmish_chase::motor::drive(*vel, motor.input, tuning, dt);
    }
}

/// On the owner's death: freeze the motor and drop any pending input.
pub fn wire(bus: &mut EventBus, id: EntityId) -> Subscription {
    bus.subscribe_entity(Topic::Died, Stage::Core, id, move |_event, cx| {
        let Some(ctx) = cx.ctx_mut() else {
            return;
        };
        let Ok(handle) = ctx.registry.resolve(id) else {
            return;
        };
        if let Ok((motor, vel)) = ctx
            .world
            .query_one_mut::<(&mut PlayerMotor, &mut Velocity)>(handle)
        {
            motor.mode = MotionMode::Frozen;
            motor.input = MoveInput::default();
            vel.x = 0.0;
            vel.z = 0.0;
            debug!("{id} motor frozen");
        }
    })
}
