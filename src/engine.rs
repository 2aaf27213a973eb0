//=========================================================================
// Simulation
//
// Host-facing facade that owns every subsystem and steps one frame.
//
// Architecture:
// ```text
//     SimulationBuilder  ──build()──>  Simulation  ──update(dt)──>  [Frame]
//         │                              │
//         ├─ with_object_capacity()      ├─ InputSender (any thread)
//         ├─ with_input_config()         ├─ GameObjectManager
//         └─ with_camera() ...           └─ FlowEventQueue (host drains)
// ```
//
// Frame order:
// ```text
//  1. TimeSystem::update(dt)                      (skipped while paused)
//  2. InputSystem / InputGameInterface age signals
//  3. drain queued raw events, stamped with the frame's game time
//  4. InputGameInterface::refresh
//  5. object pipelines                            (skipped while paused)
//  6. register spawns, drop removed objects, swap the message bus
//  7. sort and hand the render queue to the sink
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::collections::SortStrategy;
use crate::core::component::PlayerComponent;
use crate::core::error::SimResult;
use crate::core::flow::{EventRecorder, FlowEventHandler, FlowEventQueue};
use crate::core::input::{
    input_channel, InputCollector, InputConfig, InputGameInterface, InputSender, InputSystem,
    KeyCode, RawInputEvent,
};
use crate::core::message_bus::MessageBus;
use crate::core::render::RenderQueue;
use crate::core::systems::{
    CameraSystem, HotSpotSystem, HudSystem, ObjectFactory, RenderSink, Systems, VibrationSystem,
};
use crate::core::time::TimeSystem;
use crate::core::world::{BasicObjectFactory, FrameContext, GameObject, GameObjectManager, ObjectId, SpawnQueue};

//=== SimulationBuilder ===================================================

/// Builder for configuring and constructing a [`Simulation`].
///
/// # Default Values
///
/// - **Object capacity**: 384
/// - **Spawn capacity**: 64 objects created per frame
/// - **Render capacity**: 512 elements
/// - **Input channel capacity**: 256 events
/// - **Sort strategy**: `QuickSort`
/// - **Viewport**: 480x320
/// - **Object factory**: [`BasicObjectFactory`]; no other collaborators
///
/// # Examples
///
/// ```
/// use platformer_core::SimulationBuilder;
///
/// let mut sim = SimulationBuilder::new()
///     .with_object_capacity(128)
///     .with_viewport(800.0, 480.0)
///     .build();
///
/// sim.update(1.0 / 60.0).unwrap();
/// ```
pub struct SimulationBuilder {
    object_capacity: usize,
    spawn_capacity: usize,
    render_capacity: usize,
    input_channel_capacity: usize,
    sort_strategy: SortStrategy,
    input_config: InputConfig,
    systems: Systems,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        let mut systems = Systems::new();
        systems.factory = Some(Box::new(BasicObjectFactory::new()));

        Self {
            object_capacity: 384,
            spawn_capacity: 64,
            render_capacity: 512,
            input_channel_capacity: 256,
            sort_strategy: SortStrategy::QuickSort,
            input_config: InputConfig::default(),
            systems,
        }
    }

    //--- Capacities -------------------------------------------------------

    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_object_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Object capacity must be positive");
        self.object_capacity = capacity;
        self
    }

    /// Objects that can be created within a single frame.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_spawn_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Spawn capacity must be positive");
        self.spawn_capacity = capacity;
        self
    }

    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_render_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Render capacity must be positive");
        self.render_capacity = capacity;
        self
    }

    /// Raw events buffered between two frames. Larger values survive
    /// longer frame spikes; a full queue drops events with a warning.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_input_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Input channel capacity must be positive");
        self.input_channel_capacity = capacity;
        self
    }

    //--- Behavior ---------------------------------------------------------

    pub fn with_sort_strategy(mut self, strategy: SortStrategy) -> Self {
        self.sort_strategy = strategy;
        self
    }

    pub fn with_input_config(mut self, config: InputConfig) -> Self {
        self.input_config = config;
        self
    }

    /// # Panics
    ///
    /// Panics if a dimension is not positive.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.input_config = self.input_config.with_viewport(width, height);
        self
    }

    //--- Collaborators ----------------------------------------------------

    /// Replaces every collaborator at once, including the default factory.
    pub fn with_systems(mut self, systems: Systems) -> Self {
        self.systems = systems;
        self
    }

    pub fn with_camera(mut self, camera: Box<dyn CameraSystem>) -> Self {
        self.systems.camera = Some(camera);
        self
    }

    pub fn with_hud(mut self, hud: Box<dyn HudSystem>) -> Self {
        self.systems.hud = Some(hud);
        self
    }

    pub fn with_vibration(mut self, vibration: Box<dyn VibrationSystem>) -> Self {
        self.systems.vibration = Some(vibration);
        self
    }

    pub fn with_hot_spots(mut self, hot_spots: Box<dyn HotSpotSystem>) -> Self {
        self.systems.hot_spots = Some(hot_spots);
        self
    }

    pub fn with_factory(mut self, factory: Box<dyn ObjectFactory>) -> Self {
        self.systems.factory = Some(factory);
        self
    }

    pub fn with_render_sink(mut self, sink: Box<dyn RenderSink>) -> Self {
        self.systems.render_sink = Some(sink);
        self
    }

    //--- Build ------------------------------------------------------------

    pub fn build(self) -> Simulation {
        info!(
            "Building simulation (objects: {}, render: {}, input channel: {}, sort: {:?})",
            self.object_capacity, self.render_capacity, self.input_channel_capacity, self.sort_strategy
        );

        let (sender, collector) = input_channel(self.input_channel_capacity);

        Simulation {
            time: TimeSystem::new(),
            input: InputSystem::new(self.input_config.viewport_height),
            game_input: InputGameInterface::new(self.input_config),
            sender,
            collector,
            manager: GameObjectManager::new(self.object_capacity),
            spawns: SpawnQueue::new(self.spawn_capacity),
            messages: MessageBus::new(),
            render: RenderQueue::new(self.render_capacity, self.sort_strategy),
            flow: FlowEventQueue::new(),
            recorder: EventRecorder::new(),
            systems: self.systems,
            paused: false,
            frame: 0,
        }
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Simulation ==========================================================

/// One running level: objects, input, clocks and their collaborators.
///
/// Raw input may be produced on any thread through [`input_sender`];
/// everything else runs on the thread that calls [`update`].
///
/// [`input_sender`]: Simulation::input_sender
/// [`update`]: Simulation::update
pub struct Simulation {
    time: TimeSystem,
    input: InputSystem,
    game_input: InputGameInterface,
    sender: InputSender,
    collector: InputCollector,
    manager: GameObjectManager,
    spawns: SpawnQueue,
    messages: MessageBus,
    render: RenderQueue,
    flow: FlowEventQueue,
    recorder: EventRecorder,
    systems: Systems,
    paused: bool,
    frame: u64,
}

impl Simulation {
    //--- Frame ------------------------------------------------------------

    /// Steps one frame of `dt` real seconds.
    ///
    /// While paused, queued input is still drained so signals stay current,
    /// but neither the clocks nor the object pipelines advance.
    pub fn update(&mut self, dt: f32) -> SimResult<()> {
        if !self.paused {
            self.time.update(dt);
        }
        let now = self.time.game_time();

        self.input.update(now);
        self.game_input.update(now);

        let input = &mut self.input;
        self.collector.collect_frame(|event| input.apply(event, now));
        self.game_input.refresh(&mut self.input, now);

        if self.paused {
            return Ok(());
        }

        let frame_delta = self.time.frame_delta();
        let mut ctx = FrameContext {
            time: &mut self.time,
            input: &mut self.game_input,
            systems: &mut self.systems,
            spawns: &mut self.spawns,
            messages: &mut self.messages,
            render: &mut self.render,
            flow: &self.flow,
            recorder: &self.recorder,
        };
        self.manager.update(frame_delta, &mut ctx)?;

        self.manager.commit(&mut self.spawns)?;
        self.messages.swap();
        self.render.flush(self.systems.render_sink.as_deref_mut())?;

        self.frame += 1;
        Ok(())
    }

    //--- Raw Input --------------------------------------------------------
    //
    // Each call queues one event for the next frame. Returns `false` when
    // the queue is full.
    //

    /// Screen coordinates, top-left origin.
    pub fn touch_down(&self, x: f32, y: f32) -> bool {
        self.sender.send(RawInputEvent::TouchDown { x, y })
    }

    pub fn touch_up(&self, x: f32, y: f32) -> bool {
        self.sender.send(RawInputEvent::TouchUp { x, y })
    }

    pub fn roll(&self, dx: f32, dy: f32) -> bool {
        self.sender.send(RawInputEvent::Roll { dx, dy })
    }

    /// Degrees.
    pub fn set_orientation(&self, azimuth: f32, pitch: f32, roll: f32) -> bool {
        self.sender.send(RawInputEvent::Orientation { azimuth, pitch, roll })
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.sender.send(RawInputEvent::KeyDown(key))
    }

    pub fn key_up(&self, key: KeyCode) -> bool {
        self.sender.send(RawInputEvent::KeyUp(key))
    }

    pub fn release_all_keys(&self) -> bool {
        self.sender.send(RawInputEvent::ReleaseAll)
    }

    /// Producer handle for device callbacks on other threads.
    pub fn input_sender(&self) -> InputSender {
        self.sender.clone()
    }

    //--- Objects ----------------------------------------------------------

    /// Registers `object` right away and returns its id.
    pub fn add_object(&mut self, object: GameObject) -> SimResult<ObjectId> {
        let id = self.spawns.enqueue(object)?;
        self.manager.commit(&mut self.spawns)?;
        debug!("Added object {}", id);
        Ok(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.manager.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.manager.get_mut(id)
    }

    /// The first object carrying a [`PlayerComponent`].
    pub fn player_mut(&mut self) -> Option<&mut GameObject> {
        self.manager.find_with_component_mut::<PlayerComponent>()
    }

    pub fn objects(&self) -> &GameObjectManager {
        &self.manager
    }

    //--- Pause ------------------------------------------------------------

    /// Freezes clocks and pipelines and masks the game controls.
    pub fn pause(&mut self) {
        if !self.paused {
            info!("Simulation paused at frame {}", self.frame);
            self.paused = true;
            self.game_input.set_active(false);
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            info!("Simulation resumed at frame {}", self.frame);
            self.paused = false;
            self.game_input.set_active(true);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    //--- Flow Events ------------------------------------------------------

    /// Runs every flow event posted since the last drain.
    pub fn drain_flow_events<H: FlowEventHandler + ?Sized>(&mut self, handler: &mut H) -> usize {
        self.flow.drain(handler)
    }

    pub fn flow_events(&self) -> &FlowEventQueue {
        &self.flow
    }

    /// Shared handle; clones observe the same record.
    pub fn event_recorder(&self) -> EventRecorder {
        self.recorder.clone()
    }

    //--- Accessors --------------------------------------------------------

    pub fn time(&self) -> &TimeSystem {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut TimeSystem {
        &mut self.time
    }

    pub fn game_input(&self) -> &InputGameInterface {
        &self.game_input
    }

    pub fn systems_mut(&mut self) -> &mut Systems {
        &mut self.systems
    }

    pub fn messages(&self) -> &MessageBus {
        &self.messages
    }

    /// Frames stepped since build or the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    //--- Reset ------------------------------------------------------------

    /// Clears the level: objects, pending spawns, messages, render
    /// elements, queued input and flow events, and both clocks.
    ///
    /// The event recorder survives so the next attempt can use the last
    /// death position.
    pub fn reset(&mut self) -> SimResult<()> {
        info!("Level reset after {} frames", self.frame);

        self.manager.reset();
        self.spawns.clear();
        self.messages.clear_all();
        self.render.clear()?;
        self.collector.clear();
        self.input.reset();
        self.game_input.reset();
        self.flow.clear();
        self.time.reset();
        self.frame = 0;
        Ok(())
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("frame", &self.frame)
            .field("paused", &self.paused)
            .field("objects", &self.manager.len())
            .field("game_time", &self.time.game_time())
            .field("systems", &self.systems)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
