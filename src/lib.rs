//=========================================================================
// Platformer Core: Library Root
//
// Real-time simulation substrate for a 2D platformer: debounced input,
// phase-ordered object pipelines and the player state machine.
//
// Typical usage:
// ```no_run
// use platformer_core::SimulationBuilder;
// use platformer_core::core::input::KeyCode;
//
// let mut sim = SimulationBuilder::new().build();
// sim.key_down(KeyCode::ArrowRight);
// loop {
//     sim.update(1.0 / 60.0).unwrap();
//     sim.drain_flow_events(&mut |event, index| println!("{:?} {}", event, index));
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every frame-thread subsystem. `platform` adapts Winit
// window events to raw simulation input for hosts that use Winit.
//
pub mod core;
pub mod platform;
pub mod prelude;

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Simulation, SimulationBuilder};
pub use crate::core::error::{CapacityError, PoolError, SimResult, SimulationError};
