//=========================================================================
// Core Systems
//
// Frame-thread subsystems of the simulation.
//
// Layering (lower modules never reach upward):
// ```text
//  collections, math, error           fixed-capacity storage, value types
//        ↓
//  time, input, message_bus, flow     clocks, debounced signals, mailboxes
//        ↓
//  render, systems                    draw ordering, host collaborators
//        ↓
//  component ⇄ world                  pipelines, objects, frame context
// ```
//
// Notes:
// Nothing here owns a thread. Device input crosses threads only through
// `input::InputSender`, flow events only through `flow::FlowEventQueue`.
//
//=========================================================================

pub mod collections;
pub mod component;
pub mod error;
pub mod flow;
pub mod input;
pub mod math;
pub mod message_bus;
pub mod render;
pub mod systems;
pub mod time;
pub mod world;
