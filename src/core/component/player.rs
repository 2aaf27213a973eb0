//=========================================================================
// Player Component
//=========================================================================
//
// The player's behavior state machine.
//
// Architecture:
//   each frame (Think phase)
//     ├─ latch buttons, pick up ghost notices
//     ├─ inventory: power-up, win condition, invincibility expiry
//     ├─ interrupts: death (life, fall, die zone) > hit reaction
//     ├─ state body
//     │    Move ──attack in air──────> Stomp ──landed + delay──> Move
//     │    Move ──attack held, ground─> ghost (Move idles until it expires)
//     │    ghost expired ────────────> PostGhostDelay ──delay──> Move
//     │    HitReact ──timer──> Move        Frozen ──action Move──> Move
//     │    Dead ──grounded, delay──> fade + restart level
//     │    Win  ──real-time delay──> fade + next level
//     └─ HUD: fuel gauge, button state
//
// Motion is produced as impulse; physics components fold it into
// velocity later in the same frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::lifetime::GhostExpired;
use super::{ComponentPhase, ComponentSwap, GameComponent};
use crate::core::error::SimResult;
use crate::core::flow::GameFlowEvent;
use crate::core::input::InputGameInterface;
use crate::core::math::Vec2;
use crate::core::systems::HotSpotType;
use crate::core::world::{ActionType, FrameContext, HitType, ObjectState};

//=== PlayerState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Move,
    Stomp,
    HitReact,
    Dead,
    Win,
    Frozen,
    PostGhostDelay,
}

//=== PlayerTuning ========================================================

/// Numeric tuning of the player. Defaults are the shipped values.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTuning {
    //--- Motion -----------------------------------------------------------
    pub ground_impulse_speed: f32,
    pub air_horizontal_impulse_speed: f32,
    /// Jet thrust per second.
    pub air_vertical_impulse_speed: f32,
    /// Instant take-off velocity.
    pub air_vertical_impulse_speed_from_ground: f32,
    pub air_drag_speed: f32,
    pub max_ground_horizontal_speed: f32,
    pub max_air_horizontal_speed: f32,
    pub max_upward_speed: f32,
    /// Upward impulse above which a grounded player counts as airborne.
    pub vertical_impulse_tolerance: f32,

    //--- Fuel -------------------------------------------------------------
    pub fuel_amount: f32,
    pub fuel_air_refill_speed: f32,
    pub fuel_ground_refill_speed: f32,
    pub jump_to_jets_delay: f32,

    //--- Stomp ------------------------------------------------------------
    pub stomp_velocity: f32,
    /// Hold on the ground after landing; also the shake duration.
    pub stomp_delay_time: f32,
    pub stomp_air_hang_time: f32,
    pub stomp_shake_magnitude: f32,
    pub stomp_vibrate_time: f32,
    /// Dust spawn offsets from the player position.
    pub stomp_dust_offsets: [Vec2; 2],

    pub hit_react_time: f32,

    //--- Ghost ------------------------------------------------------------
    pub ghost_reactivation_delay: f32,
    pub ghost_charge_time: f32,
    /// Ghost lifetime by rubies held: none, one, two or more. Zero is
    /// unlimited.
    pub ghost_time_by_rubies: [f32; 3],

    //--- Inventory --------------------------------------------------------
    pub max_player_life: i32,
    pub max_gems_per_level: u32,
    pub coins_per_powerup: u32,
    pub glow_duration: f32,

    //--- Level End --------------------------------------------------------
    pub death_delay: f32,
    /// Real seconds.
    pub win_delay: f32,
    pub fade_duration: f32,
    pub win_time_scale: f32,
    pub win_scale_duration: f32,
    /// Height above the feet probed for die zones.
    pub hot_spot_probe_height: f32,

    //--- Difficulty Adjustment --------------------------------------------
    pub dda_stage_1_attempts: u32,
    pub dda_stage_2_attempts: u32,
    pub dda_stage_1_life_boost: i32,
    pub dda_stage_2_life_boost: i32,
    pub fuel_air_refill_speed_dda1: f32,
    pub fuel_air_refill_speed_dda2: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            ground_impulse_speed: 5000.0,
            air_horizontal_impulse_speed: 4000.0,
            air_vertical_impulse_speed: 1200.0,
            air_vertical_impulse_speed_from_ground: 250.0,
            air_drag_speed: 4000.0,
            max_ground_horizontal_speed: 500.0,
            max_air_horizontal_speed: 150.0,
            max_upward_speed: 250.0,
            vertical_impulse_tolerance: 50.0,

            fuel_amount: 1.0,
            fuel_air_refill_speed: 0.15,
            fuel_ground_refill_speed: 2.0,
            jump_to_jets_delay: 0.5,

            stomp_velocity: -1000.0,
            stomp_delay_time: 0.15,
            stomp_air_hang_time: 0.0,
            stomp_shake_magnitude: 15.0,
            stomp_vibrate_time: 0.05,
            stomp_dust_offsets: [Vec2::new(0.0, -16.0), Vec2::new(32.0, -16.0)],

            hit_react_time: 0.5,

            ghost_reactivation_delay: 0.3,
            ghost_charge_time: 0.75,
            ghost_time_by_rubies: [3.0, 8.0, 0.0],

            max_player_life: 3,
            max_gems_per_level: 3,
            coins_per_powerup: 20,
            glow_duration: 15.0,

            death_delay: 2.0,
            win_delay: 2.0,
            fade_duration: 1.5,
            win_time_scale: 0.1,
            win_scale_duration: 8.0,
            hot_spot_probe_height: 10.0,

            dda_stage_1_attempts: 3,
            dda_stage_2_attempts: 8,
            dda_stage_1_life_boost: 1,
            dda_stage_2_life_boost: 2,
            fuel_air_refill_speed_dda1: 0.22,
            fuel_air_refill_speed_dda2: 0.30,
        }
    }
}

//=== PlayerComponent =====================================================

pub struct PlayerComponent {
    tuning: PlayerTuning,
    state: PlayerState,
    /// Start of the current HitReact/Dead (game time) or Win (real time).
    timer: f32,
    stomp_started: Option<f32>,
    stomp_landed: Option<f32>,
    flow_event_sent: bool,

    touching_ground: bool,
    jump_pressed: bool,
    attack_pressed: bool,
    attack_triggered: bool,
    rockets_on: bool,

    fuel: f32,
    fuel_air_refill_speed: f32,
    jump_time: f32,

    ghost_active: bool,
    ghost_deactivated_time: Option<f32>,
    ghost_charge_time: f32,

    invincible_swap: Option<Box<dyn ComponentSwap>>,
    invincible_end_time: f32,
}

impl Default for PlayerComponent {
    fn default() -> Self {
        Self::new(PlayerTuning::default())
    }
}

impl PlayerComponent {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            fuel_air_refill_speed: tuning.fuel_air_refill_speed,
            tuning,
            state: PlayerState::Move,
            timer: 0.0,
            stomp_started: None,
            stomp_landed: None,
            flow_event_sent: false,
            touching_ground: false,
            jump_pressed: false,
            attack_pressed: false,
            attack_triggered: false,
            rockets_on: false,
            fuel: 0.0,
            jump_time: 0.0,
            ghost_active: false,
            ghost_deactivated_time: None,
            ghost_charge_time: 0.0,
            invincible_swap: None,
            invincible_end_time: 0.0,
        }
    }

    /// Visual swap toggled while invincible.
    pub fn with_invincible_swap(mut self, swap: Box<dyn ComponentSwap>) -> Self {
        self.invincible_swap = Some(swap);
        self
    }

    pub fn set_invincible_swap(&mut self, swap: Option<Box<dyn ComponentSwap>>) {
        self.invincible_swap = swap;
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    /// Jets fired this frame.
    pub fn rockets_on(&self) -> bool {
        self.rockets_on
    }

    pub fn ghost_active(&self) -> bool {
        self.ghost_active
    }

    /// Game time invincibility ends, if active.
    pub fn invincible_until(&self) -> Option<f32> {
        (self.invincible_end_time > 0.0).then_some(self.invincible_end_time)
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    //--- Control ----------------------------------------------------------

    /// Hands control back from a ghost; another ghost may be spawned once
    /// `delay` seconds plus the reactivation delay have passed.
    pub fn deactivate_ghost(&mut self, delay: f32, now: f32) {
        self.ghost_active = false;
        self.ghost_deactivated_time = Some(now + delay);
        if !matches!(self.state, PlayerState::Dead | PlayerState::Win) {
            self.transition(PlayerState::PostGhostDelay);
        }
    }

    /// Quietly eases the level after repeated attempts: extra life and
    /// faster air refuelling.
    pub fn adjust_difficulty(&mut self, state: &mut ObjectState, level_attempts: u32) {
        let t = &self.tuning;
        if level_attempts >= t.dda_stage_2_attempts {
            state.life += t.dda_stage_2_life_boost;
            self.fuel_air_refill_speed = t.fuel_air_refill_speed_dda2;
        } else if level_attempts >= t.dda_stage_1_attempts {
            state.life += t.dda_stage_1_life_boost;
            self.fuel_air_refill_speed = t.fuel_air_refill_speed_dda1;
        } else {
            return;
        }
        debug!(
            "Difficulty eased after {} attempts: life {}, air refill {}",
            level_attempts, state.life, self.fuel_air_refill_speed
        );
    }

    //--- Frame Steps ------------------------------------------------------

    fn latch_buttons(&mut self, input: &InputGameInterface) {
        self.jump_pressed = input.jump().pressed();
        self.attack_pressed = input.attack().pressed();
        self.attack_triggered = input.attack().triggered();
    }

    fn receive_ghost_notices(&mut self, state: &ObjectState, ctx: &FrameContext<'_>) {
        let delay = ctx
            .messages
            .read::<GhostExpired>()
            .iter()
            .find(|notice| notice.owner == state.id)
            .map(|notice| notice.reactivation_delay);

        if let Some(delay) = delay {
            self.deactivate_ghost(delay, ctx.game_time());
        }
    }

    fn update_inventory(&mut self, state: &mut ObjectState, ctx: &mut FrameContext<'_>, now: f32) {
        if matches!(self.state, PlayerState::Win | PlayerState::Dead) {
            return;
        }
        let Some(mut inventory) = state.inventory else {
            return;
        };

        if inventory.coin_count >= self.tuning.coins_per_powerup {
            inventory.coin_count = 0;
            inventory.changed = true;
            state.life = self.tuning.max_player_life;

            if self.invincible_end_time <= now {
                info!("Player {} powered up until {:.2}", state.id, now + self.tuning.glow_duration);
                if let Some(swap) = self.invincible_swap.as_mut() {
                    swap.activate(state);
                }
                self.invincible_end_time = now + self.tuning.glow_duration;
                if let Some(reaction) = state.hit_reaction.as_mut() {
                    reaction.force_invincible = true;
                }
            }
        }
        state.inventory = Some(inventory);

        // A lethal frame is a death even if it also brought the last gem.
        if inventory.ruby_count >= self.tuning.max_gems_per_level && state.life > 0 {
            self.goto_win(ctx);
        }
    }

    fn update_invincibility(&mut self, state: &mut ObjectState, now: f32) {
        if self.invincible_end_time > 0.0 && self.invincible_end_time < now {
            debug!("Player {} invincibility over", state.id);
            if let Some(swap) = self.invincible_swap.as_mut() {
                swap.activate(state);
            }
            self.invincible_end_time = 0.0;
            if let Some(reaction) = state.hit_reaction.as_mut() {
                reaction.force_invincible = false;
            }
        }
    }

    /// Death preempts everything but death; a hit preempts the rest.
    fn check_interrupts(&mut self, state: &mut ObjectState, ctx: &FrameContext<'_>, now: f32) {
        if self.state == PlayerState::Dead {
            return;
        }

        if state.life <= 0 {
            self.goto_dead(now);
        } else if state.fell_off_world() {
            state.life = 0;
            self.goto_dead(now);
        } else if self.state != PlayerState::HitReact
            && state.last_hit_type != HitType::Invalid
            && state.action == ActionType::HitReact
        {
            self.goto_hit_react(state, now);
        } else if let Some(hot_spots) = ctx.systems.hot_spots() {
            let probe_y = state.position.y + self.tuning.hot_spot_probe_height;
            if hot_spots.hot_spot(state.centered_position_x(), probe_y) == HotSpotType::Die {
                state.life = 0;
                self.goto_dead(now);
            }
        }
    }

    //--- Transitions ------------------------------------------------------

    fn transition(&mut self, next: PlayerState) {
        if self.state != next {
            debug!("Player {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    fn goto_move(&mut self, state: &mut ObjectState) {
        state.action = ActionType::Move;
        self.transition(PlayerState::Move);
    }

    fn goto_stomp(&mut self, state: &mut ObjectState) {
        state.action = ActionType::Attack;
        state.impulse = Vec2::ZERO;
        state.velocity = Vec2::ZERO;
        state.position_locked = true;
        self.stomp_started = None;
        self.stomp_landed = None;
        self.transition(PlayerState::Stomp);
    }

    fn goto_hit_react(&mut self, state: &mut ObjectState, now: f32) {
        if state.last_hit_type == HitType::Launch {
            if self.state != PlayerState::Frozen {
                self.goto_frozen(state);
            }
        } else {
            self.timer = now;
            self.transition(PlayerState::HitReact);
        }
    }

    fn goto_dead(&mut self, now: f32) {
        info!("Player died at {:.2}", now);
        self.timer = now;
        self.flow_event_sent = false;
        self.transition(PlayerState::Dead);
    }

    fn goto_win(&mut self, ctx: &mut FrameContext<'_>) {
        info!("Player won at {:.2}", ctx.game_time());
        self.timer = ctx.real_time();
        self.flow_event_sent = false;
        ctx.time
            .apply_scale(self.tuning.win_time_scale, self.tuning.win_scale_duration, true);
        self.transition(PlayerState::Win);
    }

    fn goto_frozen(&mut self, state: &mut ObjectState) {
        state.action = ActionType::Frozen;
        self.transition(PlayerState::Frozen);
    }

    //--- State Bodies -----------------------------------------------------

    fn state_move(
        &mut self,
        now: f32,
        dt: f32,
        state: &mut ObjectState,
        ctx: &mut FrameContext<'_>,
    ) -> SimResult<()> {
        if self.ghost_active {
            return Ok(());
        }

        self.apply_motion(now, dt, state, ctx.input);

        let ghost_ready = self
            .ghost_deactivated_time
            .map_or(true, |t| t + self.tuning.ghost_reactivation_delay < now);

        if self.attack_triggered && !self.touching_ground {
            self.goto_stomp(state);
        } else if self.attack_pressed && self.touching_ground && ghost_ready {
            self.ghost_charge_time += dt;
            if self.ghost_charge_time >= self.tuning.ghost_charge_time {
                self.spawn_ghost(state, ctx)?;
            }
        } else if !self.attack_pressed {
            self.ghost_charge_time = 0.0;
        }
        Ok(())
    }

    fn spawn_ghost(&mut self, state: &ObjectState, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        let rubies = state.inventory.map_or(0, |inventory| inventory.ruby_count) as usize;
        let table = self.tuning.ghost_time_by_rubies;
        let lifetime = table[rubies.min(table.len() - 1)];

        let Some(factory) = ctx.systems.factory() else {
            return Ok(());
        };
        let Some(ghost) = factory.spawn_player_ghost(state.position, state.id, lifetime) else {
            return Ok(());
        };
        let ghost_id = ctx.spawns.enqueue(ghost)?;

        info!("Player {} spawned ghost {} (lifetime {:.1})", state.id, ghost_id, lifetime);
        self.ghost_active = true;
        self.ghost_charge_time = 0.0;
        if let Some(camera) = ctx.systems.camera() {
            camera.set_target(ghost_id);
        }
        ctx.input.attack_mut().consume_trigger();
        Ok(())
    }

    fn apply_motion(&mut self, now: f32, dt: f32, state: &mut ObjectState, input: &InputGameInterface) {
        let t = &self.tuning;

        if self.fuel < t.fuel_amount {
            let refill = if self.touching_ground {
                t.fuel_ground_refill_speed
            } else {
                self.fuel_air_refill_speed
            };
            self.fuel = (self.fuel + refill * dt).min(t.fuel_amount);
        }

        let dpad = input.dpad();
        if !dpad.pressed() && !self.jump_pressed {
            return;
        }

        let mut impulse = Vec2::ZERO;
        if dpad.pressed() {
            impulse.x = dpad.x();
        }

        if self.jump_pressed {
            if input.jump().triggered() && self.touching_ground {
                // Take-off is an instant velocity, not scaled by time.
                impulse.y = t.air_vertical_impulse_speed_from_ground;
                self.jump_time = now;
            } else if now > self.jump_time + t.jump_to_jets_delay && self.fuel > 0.0 {
                self.fuel -= dt;
                impulse.y = t.air_vertical_impulse_speed * dt;
                self.rockets_on = true;
            }
        }

        let in_the_air = !self.touching_ground || impulse.y > t.vertical_impulse_tolerance;
        let (horizontal_speed, max_horizontal) = if in_the_air {
            (t.air_horizontal_impulse_speed, t.max_air_horizontal_speed)
        } else {
            (t.ground_impulse_speed, t.max_ground_horizontal_speed)
        };
        impulse.x *= horizontal_speed * dt;

        let mut current = state.velocity.x;
        if (current + impulse.x).abs() > max_horizontal {
            if current.abs() < max_horizontal {
                current = max_horizontal * sign(impulse.x);
                state.velocity.x = current;
            }
            impulse.x = 0.0;
        }

        if impulse.y > 0.0 && state.velocity.y + impulse.y > t.max_upward_speed {
            impulse.y = 0.0;
            if state.velocity.y < t.max_upward_speed {
                state.velocity.y = t.max_upward_speed;
            }
        }

        if in_the_air && current.abs() > max_horizontal {
            let mut after_drag = current - t.air_drag_speed * dt * sign(current);
            if sign(current) != sign(after_drag) {
                after_drag = 0.0;
            } else if after_drag.abs() < max_horizontal {
                after_drag = max_horizontal * sign(after_drag);
            }
            state.velocity.x = after_drag;
        }

        state.impulse += impulse;
    }

    fn state_stomp(&mut self, now: f32, state: &mut ObjectState, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        match self.stomp_started {
            None => self.stomp_started = Some(now),
            Some(start) if now - start > self.tuning.stomp_air_hang_time => {
                state.velocity = Vec2::new(0.0, self.tuning.stomp_velocity);
                state.position_locked = false;
            }
            Some(_) => {}
        }

        if self.touching_ground && self.stomp_landed.is_none() {
            self.stomp_landed = Some(now);
            self.stomp_impact(state, ctx)?;
        }

        if let Some(landed) = self.stomp_landed {
            if now - landed > self.tuning.stomp_delay_time {
                state.position_locked = false;
                self.goto_move(state);
            }
        }
        Ok(())
    }

    fn stomp_impact(&self, state: &ObjectState, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        let t = &self.tuning;
        if let Some(camera) = ctx.systems.camera() {
            camera.shake(t.stomp_delay_time, t.stomp_shake_magnitude);
        }
        if let Some(vibration) = ctx.systems.vibration() {
            vibration.vibrate(t.stomp_vibrate_time);
        }
        if let Some(factory) = ctx.systems.factory() {
            let [left, right] = t.stomp_dust_offsets;
            let puffs = [
                factory.spawn_dust(state.position + left, true),
                factory.spawn_dust(state.position + right, false),
            ];
            for dust in puffs.into_iter().flatten() {
                ctx.spawns.enqueue(dust)?;
            }
        }
        Ok(())
    }

    fn state_hit_react(&mut self, now: f32, state: &mut ObjectState) {
        if now - self.timer > self.tuning.hit_react_time {
            self.goto_move(state);
        }
    }

    fn state_dead(&mut self, now: f32, state: &mut ObjectState, ctx: &mut FrameContext<'_>) {
        let settled = self.touching_ground || state.fell_off_world();
        if settled && state.action != ActionType::Death {
            state.action = ActionType::Death;
            state.velocity = Vec2::ZERO;
            state.target_velocity = Vec2::ZERO;
        }

        if state.action == ActionType::Death
            && !self.flow_event_sent
            && now - self.timer > self.tuning.death_delay
            && self.request_fade(GameFlowEvent::RestartLevel, ctx)
        {
            ctx.recorder.set_last_death_position(state.position);
        }
    }

    fn state_win(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.flow_event_sent && ctx.real_time() - self.timer > self.tuning.win_delay {
            self.request_fade(GameFlowEvent::GoToNextLevel, ctx);
        }
    }

    fn state_frozen(&mut self, state: &mut ObjectState) {
        if state.action == ActionType::Move {
            self.goto_move(state);
        }
    }

    fn state_post_ghost_delay(&mut self, now: f32, state: &mut ObjectState, ctx: &mut FrameContext<'_>) {
        if self.ghost_deactivated_time.map_or(true, |t| now > t) {
            // A new ghost may have been spawned during the delay.
            if !self.ghost_active {
                if let Some(camera) = ctx.systems.camera() {
                    camera.set_target(state.id);
                }
            }
            self.goto_move(state);
        }
    }

    /// Fades out and has `event` delivered at the end of the fade. Without
    /// a HUD the event is posted directly. Returns false while another fade
    /// is still running.
    fn request_fade(&mut self, event: GameFlowEvent, ctx: &mut FrameContext<'_>) -> bool {
        match ctx.systems.hud() {
            Some(hud) => {
                if hud.is_fading() {
                    return false;
                }
                hud.start_fade(false, self.tuning.fade_duration);
                hud.send_event_on_fade_complete(event, 0);
            }
            None => ctx.flow.post(event, 0),
        }
        self.flow_event_sent = true;
        true
    }
}

impl GameComponent for PlayerComponent {
    fn phase(&self) -> ComponentPhase {
        ComponentPhase::Think
    }

    fn update(&mut self, dt: f32, state: &mut ObjectState, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        let now = ctx.game_time();
        let was_stomping = self.state == PlayerState::Stomp;
        self.touching_ground = state.touching_ground;
        self.rockets_on = false;
        self.latch_buttons(ctx.input);
        self.receive_ghost_notices(state, ctx);

        if state.action == ActionType::Invalid {
            self.goto_move(state);
        }

        self.update_inventory(state, ctx, now);
        self.update_invincibility(state, now);
        self.check_interrupts(state, ctx, now);

        match self.state {
            PlayerState::Move => self.state_move(now, dt, state, ctx)?,
            PlayerState::Stomp => self.state_stomp(now, state, ctx)?,
            PlayerState::HitReact => self.state_hit_react(now, state),
            PlayerState::Dead => self.state_dead(now, state, ctx),
            PlayerState::Win => self.state_win(ctx),
            PlayerState::Frozen => self.state_frozen(state),
            PlayerState::PostGhostDelay => self.state_post_ghost_delay(now, state, ctx),
        }

        // The stomp lock never outlives the stomp.
        if was_stomping && self.state != PlayerState::Stomp {
            state.position_locked = false;
        }

        if let Some(hud) = ctx.systems.hud() {
            hud.set_fuel_percent(self.fuel / self.tuning.fuel_amount);
            hud.set_button_state(self.jump_pressed, self.attack_pressed);
        }
        Ok(())
    }

    fn reset(&mut self) {
        let mut swap = self.invincible_swap.take();
        if let Some(swap) = swap.as_mut() {
            swap.reset();
        }
        *self = Self::new(self.tuning.clone());
        self.invincible_swap = swap;
    }
}

//=== Helpers =============================================================

/// -1, 0 or +1.
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::GlowSwap;
    use crate::core::systems::mocks::{self, FixedHotSpot, SharedLog};
    use crate::core::world::context::ContextRig;
    use crate::core::world::{HitReaction, Inventory, ObjectId};

    const DT: f32 = 1.0 / 60.0;
    const PLAYER_ID: ObjectId = ObjectId(100);

    //--- Test Helpers -----------------------------------------------------

    struct Harness {
        rig: ContextRig,
        log: SharedLog,
        player: PlayerComponent,
        state: ObjectState,
    }

    impl Harness {
        fn new() -> Self {
            let mut rig = ContextRig::new();
            let log = mocks::install(&mut rig.systems);
            let mut state = ObjectState::new(Vec2::new(100.0, 0.0), 32.0, 32.0);
            state.id = PLAYER_ID;
            state.touching_ground = true;
            Self {
                rig,
                log,
                player: PlayerComponent::default(),
                state,
            }
        }

        fn without_hud(mut self) -> Self {
            self.rig.systems.hud = None;
            self
        }

        /// One frame: clock, input aging, then the player.
        fn frame(&mut self) {
            self.frame_with(|_, _| {});
        }

        /// Like [`frame`](Self::frame), with input applied after aging.
        fn frame_with(&mut self, drive: impl FnOnce(&mut InputGameInterface, f32)) {
            self.rig.advance(DT);
            let now = self.rig.time.game_time();
            drive(&mut self.rig.input, now);
            self.player
                .update(DT, &mut self.state, &mut self.rig.context())
                .unwrap();
        }

        /// Folds impulse into velocity as the physics phase would.
        fn integrate(&mut self) {
            self.state.velocity += self.state.impulse;
            self.state.impulse = Vec2::ZERO;
        }

        fn frames_for(&mut self, seconds: f32) {
            let n = (seconds / DT).ceil() as usize;
            for _ in 0..n {
                self.frame();
            }
        }

        fn restart_events(&self) -> usize {
            let mut count = 0;
            self.rig.flow.drain(&mut |event: GameFlowEvent, _: i32| {
                if event == GameFlowEvent::RestartLevel {
                    count += 1;
                }
            });
            count
        }
    }

    //=====================================================================
    // Motion
    //=====================================================================

    #[test]
    fn ground_impulse_scales_with_pad_magnitude() {
        let mut h = Harness::new();
        h.frame_with(|input, now| input.dpad_mut().press(now, 0.6, 0.0));

        let expected = 0.6 * 5000.0 * DT;
        assert!((h.state.impulse.x - expected).abs() < 1e-3);
        assert_eq!(h.state.impulse.y, 0.0);
        assert_eq!(h.player.state(), PlayerState::Move);
        assert_eq!(h.state.action, ActionType::Move);
    }

    #[test]
    fn ground_speed_is_capped() {
        let mut h = Harness::new();
        for _ in 0..120 {
            h.frame_with(|input, now| input.dpad_mut().press(now, 0.6, 0.0));
            h.integrate();
            assert!(h.state.velocity.x <= 500.0);
        }
        assert_eq!(h.state.velocity.x, 500.0);
    }

    #[test]
    fn airborne_speed_is_dragged_to_air_cap() {
        let mut h = Harness::new();
        h.state.touching_ground = false;
        h.state.velocity.x = 400.0;

        h.frame_with(|input, now| input.dpad_mut().press(now, 1.0, 0.0));

        // 400 - 4000 * DT, still above the 150 air cap.
        assert!((h.state.velocity.x - (400.0 - 4000.0 * DT)).abs() < 1e-3);
        assert_eq!(h.state.impulse.x, 0.0);

        for _ in 0..10 {
            h.frame_with(|input, now| input.dpad_mut().press(now, 1.0, 0.0));
        }
        assert_eq!(h.state.velocity.x, 150.0);
    }

    #[test]
    fn jump_from_ground_then_jets() {
        let mut h = Harness::new();
        h.frames_for(0.6);
        let full = h.player.fuel();
        assert_eq!(full, 1.0);

        h.frame_with(|input, now| input.jump_mut().press(now, 1.0));
        assert_eq!(h.state.impulse.y, 250.0);
        h.integrate();
        h.state.touching_ground = false;

        // Held, inside the jets delay: nothing.
        h.frame_with(|input, now| input.jump_mut().press(now, 1.0));
        assert_eq!(h.state.impulse.y, 0.0);
        assert!(!h.player.rockets_on());

        for _ in 0..40 {
            h.frame_with(|input, now| input.jump_mut().press(now, 1.0));
            h.state.impulse = Vec2::ZERO;
            h.state.velocity.y = 0.0;
        }
        assert!(h.player.rockets_on());
        assert!(h.player.fuel() < full);
    }

    #[test]
    fn upward_speed_is_capped() {
        let mut h = Harness::new();
        h.state.velocity.y = 249.0;
        h.frame_with(|input, now| input.jump_mut().press(now, 1.0));

        assert_eq!(h.state.impulse.y, 0.0);
        assert_eq!(h.state.velocity.y, 250.0);
    }

    #[test]
    fn fuel_refills_faster_on_ground() {
        let mut ground = Harness::new();
        let mut air = Harness::new();
        air.state.touching_ground = false;
        air.state.position.y = 500.0;

        ground.frames_for(0.25);
        air.frames_for(0.25);

        assert!(ground.player.fuel() > air.player.fuel() * 10.0);
    }

    //=====================================================================
    // Death
    //=====================================================================

    #[test]
    fn lethal_hit_kills_this_frame_and_restarts_once() {
        let mut h = Harness::new().without_hud();
        h.state.life = 1;
        h.state.velocity = Vec2::new(30.0, 0.0);
        h.frame();

        h.state.life = 0;
        h.frame();
        assert_eq!(h.player.state(), PlayerState::Dead);
        assert_eq!(h.state.action, ActionType::Death);
        assert_eq!(h.state.velocity, Vec2::ZERO);

        h.frames_for(1.9);
        assert_eq!(h.restart_events(), 0);

        h.frames_for(0.5);
        h.frames_for(3.0);
        assert_eq!(h.restart_events(), 1);
        assert_eq!(h.rig.recorder.deaths(), 1);
        assert_eq!(h.rig.recorder.last_death_position(), Some(h.state.position));
    }

    #[test]
    fn death_waits_for_ground() {
        let mut h = Harness::new().without_hud();
        h.state.touching_ground = false;
        h.state.position.y = 200.0;
        h.state.life = 0;

        h.frames_for(3.0);
        assert_eq!(h.player.state(), PlayerState::Dead);
        assert_ne!(h.state.action, ActionType::Death);
        assert_eq!(h.restart_events(), 0);

        h.state.touching_ground = true;
        h.frame();
        assert_eq!(h.state.action, ActionType::Death);
    }

    #[test]
    fn falling_off_the_world_kills() {
        let mut h = Harness::new().without_hud();
        h.state.touching_ground = false;
        h.state.position.y = -40.0;
        h.frame();

        assert_eq!(h.player.state(), PlayerState::Dead);
        assert_eq!(h.state.life, 0);
        assert_eq!(h.state.action, ActionType::Death);
    }

    #[test]
    fn die_zone_kills() {
        let mut h = Harness::new();
        h.rig.systems.hot_spots = Some(Box::new(FixedHotSpot(HotSpotType::Die)));
        h.frame();
        assert_eq!(h.player.state(), PlayerState::Dead);
        assert_eq!(h.state.life, 0);
    }

    #[test]
    fn hud_fade_carries_the_restart() {
        let mut h = Harness::new();
        h.state.life = 0;
        h.log.borrow_mut().fading = true;
        h.frames_for(2.5);
        assert!(h.log.borrow().fade_events.is_empty(), "Waits for the running fade");

        h.log.borrow_mut().fading = false;
        h.frames_for(1.0);

        let log = h.log.borrow();
        assert_eq!(log.fades, vec![(false, 1.5)]);
        assert_eq!(log.fade_events, vec![(GameFlowEvent::RestartLevel, 0)]);
        assert_eq!(h.rig.flow.pending(), 0);
    }

    //=====================================================================
    // Hits
    //=====================================================================

    #[test]
    fn hit_reaction_holds_then_moves() {
        let mut h = Harness::new();
        h.frame();
        h.state.last_hit_type = HitType::Hit;
        h.state.action = ActionType::HitReact;
        h.frame();
        assert_eq!(h.player.state(), PlayerState::HitReact);

        h.frames_for(0.3);
        assert_eq!(h.player.state(), PlayerState::HitReact);
        h.frames_for(0.3);
        assert_eq!(h.player.state(), PlayerState::Move);
        assert_eq!(h.state.action, ActionType::Move);
    }

    #[test]
    fn launch_hit_freezes_until_released() {
        let mut h = Harness::new();
        h.frame();
        h.state.last_hit_type = HitType::Launch;
        h.state.action = ActionType::HitReact;
        h.frame();
        assert_eq!(h.player.state(), PlayerState::Frozen);
        assert_eq!(h.state.action, ActionType::Frozen);

        h.frames_for(1.0);
        assert_eq!(h.player.state(), PlayerState::Frozen);

        h.state.action = ActionType::Move;
        h.frame();
        assert_eq!(h.player.state(), PlayerState::Move);
    }

    //=====================================================================
    // Stomp
    //=====================================================================

    #[test]
    fn stomp_drives_down_and_lands() {
        let mut h = Harness::new();
        h.state.touching_ground = false;
        h.state.position.y = 100.0;
        h.state.velocity = Vec2::new(40.0, 20.0);

        h.frame_with(|input, now| input.attack_mut().press(now, 1.0));
        assert_eq!(h.player.state(), PlayerState::Stomp);
        assert_eq!(h.state.action, ActionType::Attack);
        assert!(h.state.position_locked);
        assert_eq!(h.state.velocity, Vec2::ZERO);

        h.frame();
        h.frame();
        assert_eq!(h.state.velocity, Vec2::new(0.0, -1000.0));
        assert!(!h.state.position_locked);

        h.state.touching_ground = true;
        h.state.position.y = 0.0;
        h.frame();
        {
            let log = h.log.borrow();
            assert_eq!(log.shakes, vec![(0.15, 15.0)]);
            assert_eq!(log.vibrations, vec![0.05]);
            assert_eq!(
                log.dust,
                vec![(Vec2::new(100.0, -16.0), true), (Vec2::new(132.0, -16.0), false)]
            );
        }
        assert_eq!(h.rig.spawns.len(), 2);

        h.frames_for(0.2);
        assert_eq!(h.player.state(), PlayerState::Move);
        assert_eq!(h.log.borrow().shakes.len(), 1, "Impact effects fire once");
    }

    #[test]
    fn hit_during_stomp_hang_releases_the_lock() {
        let mut h = Harness::new();
        h.player = PlayerComponent::new(PlayerTuning {
            stomp_air_hang_time: 0.5,
            ..PlayerTuning::default()
        });
        h.state.touching_ground = false;
        h.state.position.y = 100.0;

        h.frame_with(|input, now| input.attack_mut().press(now, 1.0));
        assert_eq!(h.player.state(), PlayerState::Stomp);
        assert!(h.state.position_locked);

        h.state.last_hit_type = HitType::Hit;
        h.state.action = ActionType::HitReact;
        h.frame();
        assert_eq!(h.player.state(), PlayerState::HitReact);
        assert!(!h.state.position_locked);

        h.frames_for(1.0);
        assert_eq!(h.player.state(), PlayerState::Move);
        assert!(!h.state.position_locked);
    }

    #[test]
    fn death_during_stomp_hang_lets_the_body_fall() {
        let mut h = Harness::new().without_hud();
        h.player = PlayerComponent::new(PlayerTuning {
            stomp_air_hang_time: 0.5,
            ..PlayerTuning::default()
        });
        h.state.touching_ground = false;
        h.state.position.y = 100.0;

        h.frame_with(|input, now| input.attack_mut().press(now, 1.0));
        h.state.life = 0;
        h.frame();

        assert_eq!(h.player.state(), PlayerState::Dead);
        assert!(!h.state.position_locked);
    }

    //=====================================================================
    // Ghost
    //=====================================================================

    #[test]
    fn held_attack_spawns_one_ghost() {
        let mut h = Harness::new();
        for _ in 0..90 {
            h.frame_with(|input, now| input.attack_mut().press(now, 1.0));
        }

        assert!(h.player.ghost_active());
        assert_eq!(h.rig.spawns.len(), 1);
        let log = h.log.borrow();
        assert_eq!(log.ghosts.len(), 1);
        assert_eq!(log.ghosts[0].1, PLAYER_ID);
        assert_eq!(log.ghosts[0].2, 3.0, "No rubies: short ghost");
        assert_eq!(log.targets.len(), 1);
        assert_ne!(log.targets[0], PLAYER_ID, "Camera follows the ghost");
    }

    #[test]
    fn early_release_spawns_nothing() {
        let mut h = Harness::new();
        for _ in 0..30 {
            h.frame_with(|input, now| input.attack_mut().press(now, 1.0));
        }
        h.frame_with(|input, _| input.attack_mut().release());
        for _ in 0..30 {
            h.frame_with(|input, now| input.attack_mut().press(now, 1.0));
        }

        assert!(!h.player.ghost_active());
        assert!(h.log.borrow().ghosts.is_empty());
    }

    #[test]
    fn rubies_lengthen_the_ghost() {
        let mut h = Harness::new();
        h.state.inventory = Some(Inventory {
            ruby_count: 2,
            ..Inventory::default()
        });
        for _ in 0..60 {
            h.frame_with(|input, now| input.attack_mut().press(now, 1.0));
        }
        assert_eq!(h.log.borrow().ghosts[0].2, 0.0);
    }

    #[test]
    fn ghost_expiry_returns_camera_after_delay() {
        let mut h = Harness::new();
        for _ in 0..60 {
            h.frame_with(|input, now| input.attack_mut().press(now, 1.0));
        }
        assert!(h.player.ghost_active());

        h.rig.messages.post(GhostExpired {
            owner: PLAYER_ID,
            reactivation_delay: 0.3,
        });
        h.rig.messages.swap();
        h.frame();
        h.rig.messages.swap();

        assert!(!h.player.ghost_active());
        assert_eq!(h.player.state(), PlayerState::PostGhostDelay);

        h.frames_for(0.4);
        assert_eq!(h.player.state(), PlayerState::Move);
        assert_eq!(h.log.borrow().targets.last(), Some(&PLAYER_ID));
    }

    #[test]
    fn notices_for_other_owners_are_ignored() {
        let mut h = Harness::new();
        h.rig.messages.post(GhostExpired {
            owner: ObjectId(99),
            reactivation_delay: 0.3,
        });
        h.rig.messages.swap();
        h.frame();
        assert_eq!(h.player.state(), PlayerState::Move);
    }

    //=====================================================================
    // Inventory
    //=====================================================================

    #[test]
    fn coins_power_up_with_invincibility() {
        let mut h = Harness::new();
        h.player = PlayerComponent::default().with_invincible_swap(Box::new(GlowSwap::new()));
        h.state.life = 1;
        h.state.hit_reaction = Some(HitReaction::default());
        h.state.inventory = Some(Inventory {
            coin_count: 20,
            ..Inventory::default()
        });

        h.frame();

        let inventory = h.state.inventory.unwrap();
        assert_eq!(inventory.coin_count, 0);
        assert!(inventory.changed);
        assert_eq!(h.state.life, 3);
        assert!(h.state.glow);
        assert!(h.state.hit_reaction.unwrap().force_invincible);
        assert!(h.player.invincible_until().is_some());

        h.frames_for(15.1);
        assert!(!h.state.glow);
        assert!(!h.state.hit_reaction.unwrap().force_invincible);
        assert_eq!(h.player.invincible_until(), None);
    }

    #[test]
    fn missing_swap_is_tolerated() {
        let mut h = Harness::new();
        h.state.inventory = Some(Inventory {
            coin_count: 25,
            ..Inventory::default()
        });
        h.frame();
        assert_eq!(h.state.life, 3);
        assert!(!h.state.glow);
    }

    #[test]
    fn rubies_win_the_level_once() {
        let mut h = Harness::new().without_hud();
        h.state.inventory = Some(Inventory {
            ruby_count: 3,
            ..Inventory::default()
        });
        h.frame();

        assert_eq!(h.player.state(), PlayerState::Win);
        assert!(h.rig.time.is_scaled());

        h.frames_for(1.5);
        assert_eq!(h.rig.flow.pending(), 0);

        h.frames_for(1.0);
        let mut events = Vec::new();
        h.rig.flow.drain(&mut |event, _| events.push(event));
        assert_eq!(events, vec![GameFlowEvent::GoToNextLevel]);

        h.frames_for(1.0);
        assert_eq!(h.rig.flow.pending(), 0);
    }

    #[test]
    fn dead_player_with_every_gem_restarts_once() {
        let mut h = Harness::new().without_hud();
        h.state.life = 0;
        h.state.inventory = Some(Inventory {
            ruby_count: 3,
            ..Inventory::default()
        });

        for _ in 0..600 {
            h.frame();
            assert_eq!(h.player.state(), PlayerState::Dead);
        }

        let mut events = Vec::new();
        h.rig.flow.drain(&mut |event, _| events.push(event));
        assert_eq!(events, vec![GameFlowEvent::RestartLevel]);
        assert!(!h.rig.time.is_scaled(), "Death does not start the win slow-motion");
    }

    #[test]
    fn falling_off_during_win_restarts_once() {
        let mut h = Harness::new().without_hud();
        h.state.inventory = Some(Inventory {
            ruby_count: 3,
            ..Inventory::default()
        });
        h.frame();
        assert_eq!(h.player.state(), PlayerState::Win);

        h.state.touching_ground = false;
        h.state.position.y = -40.0;
        for _ in 0..900 {
            h.frame();
        }

        assert_eq!(h.player.state(), PlayerState::Dead);
        let mut events = Vec::new();
        h.rig.flow.drain(&mut |event, _| events.push(event));
        assert_eq!(events, vec![GameFlowEvent::RestartLevel]);
    }

    //=====================================================================
    // HUD and Difficulty
    //=====================================================================

    #[test]
    fn hud_receives_fuel_and_buttons() {
        let mut h = Harness::new();
        h.frame_with(|input, now| input.jump_mut().press(now, 1.0));

        let log = h.log.borrow();
        assert_eq!(log.buttons.last(), Some(&(true, false)));
        assert_eq!(log.fuel.len(), 1);
    }

    #[test]
    fn difficulty_stages() {
        let mut player = PlayerComponent::default();
        let mut state = ObjectState::default();
        state.life = 3;

        player.adjust_difficulty(&mut state, 2);
        assert_eq!(state.life, 3);

        player.adjust_difficulty(&mut state, 3);
        assert_eq!(state.life, 4);

        player.adjust_difficulty(&mut state, 8);
        assert_eq!(state.life, 6);
        assert_eq!(player.fuel_air_refill_speed, 0.30);
    }

    #[test]
    fn reset_returns_to_move() {
        let mut h = Harness::new();
        h.state.life = 0;
        h.frame();
        assert_eq!(h.player.state(), PlayerState::Dead);

        h.player.reset();
        assert_eq!(h.player.state(), PlayerState::Move);
        assert_eq!(h.player.fuel(), 0.0);
    }
}
