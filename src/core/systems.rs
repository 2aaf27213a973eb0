//=========================================================================
// Collaborator Systems
//=========================================================================
//
// Narrow interfaces to the systems the simulation drives but does not
// implement: camera, HUD, haptics, level hot spots, object factory and
// render submission.
//
// Every collaborator is optional. A component that needs a missing one
// skips the effect.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::flow::GameFlowEvent;
use crate::core::math::Vec2;
use crate::core::render::RenderElement;
use crate::core::world::{GameObject, ObjectId};

//=== Camera ==============================================================

pub trait CameraSystem {
    /// Pulls the camera toward `position` this frame.
    fn add_camera_bias(&mut self, position: Vec2);

    fn set_target(&mut self, target: ObjectId);

    fn shake(&mut self, duration: f32, magnitude: f32);
}

//=== HUD =================================================================

pub trait HudSystem {
    fn set_fuel_percent(&mut self, percent: f32);

    fn set_button_state(&mut self, jump_pressed: bool, attack_pressed: bool);

    /// `fade_in == false` fades to black.
    fn start_fade(&mut self, fade_in: bool, duration: f32);

    /// Posts `event` to the host once the running fade completes.
    fn send_event_on_fade_complete(&mut self, event: GameFlowEvent, index: i32);

    fn is_fading(&self) -> bool;
}

//=== Vibration ===========================================================

pub trait VibrationSystem {
    fn vibrate(&mut self, seconds: f32);
}

//=== Hot Spots ===========================================================

/// Special tile behaviour at a world position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HotSpotType {
    #[default]
    None,
    /// Touching it kills the player.
    Die,
    EndLevel,
}

pub trait HotSpotSystem {
    fn hot_spot(&self, x: f32, y: f32) -> HotSpotType;
}

//=== Object Factory ======================================================

/// Builds spawnable objects. Returned objects are not yet registered;
/// the caller queues them and receives their id.
pub trait ObjectFactory {
    /// Ghost that `owner` controls for `lifetime` seconds (0 = unlimited).
    fn spawn_player_ghost(&mut self, position: Vec2, owner: ObjectId, lifetime: f32)
        -> Option<GameObject>;

    /// Cosmetic dust puff; `flip` mirrors the sprite.
    fn spawn_dust(&mut self, position: Vec2, flip: bool) -> Option<GameObject>;
}

//=== Render Sink =========================================================

/// Receives the sorted draw list once per frame.
pub trait RenderSink {
    fn draw(&mut self, elements: &[RenderElement]);
}

//=== Systems =============================================================

/// Collaborators wired in at assembly time.
#[derive(Default)]
pub struct Systems {
    pub camera: Option<Box<dyn CameraSystem>>,
    pub hud: Option<Box<dyn HudSystem>>,
    pub vibration: Option<Box<dyn VibrationSystem>>,
    pub hot_spots: Option<Box<dyn HotSpotSystem>>,
    pub factory: Option<Box<dyn ObjectFactory>>,
    pub render_sink: Option<Box<dyn RenderSink>>,
}

impl Systems {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Null-Safe Accessors ----------------------------------------------

    pub fn camera(&mut self) -> Option<&mut (dyn CameraSystem + 'static)> {
        self.camera.as_deref_mut()
    }

    pub fn hud(&mut self) -> Option<&mut (dyn HudSystem + 'static)> {
        self.hud.as_deref_mut()
    }

    pub fn vibration(&mut self) -> Option<&mut (dyn VibrationSystem + 'static)> {
        self.vibration.as_deref_mut()
    }

    pub fn hot_spots(&self) -> Option<&(dyn HotSpotSystem + 'static)> {
        self.hot_spots.as_deref()
    }

    pub fn factory(&mut self) -> Option<&mut (dyn ObjectFactory + 'static)> {
        self.factory.as_deref_mut()
    }
}

impl std::fmt::Debug for Systems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Systems")
            .field("camera", &self.camera.is_some())
            .field("hud", &self.hud.is_some())
            .field("vibration", &self.vibration.is_some())
            .field("hot_spots", &self.hot_spots.is_some())
            .field("factory", &self.factory.is_some())
            .field("render_sink", &self.render_sink.is_some())
            .finish()
    }
}

//=========================================================================
// Test Support
//=========================================================================

/// Recording collaborators shared by component and scenario tests.
#[cfg(test)]
pub(crate) mod mocks {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::component::LifetimeComponent;
    use crate::core::world::ObjectState;

    #[derive(Debug, Default)]
    pub struct Log {
        pub biases: Vec<Vec2>,
        pub targets: Vec<ObjectId>,
        pub shakes: Vec<(f32, f32)>,
        pub fuel: Vec<f32>,
        pub buttons: Vec<(bool, bool)>,
        pub fades: Vec<(bool, f32)>,
        pub fade_events: Vec<(GameFlowEvent, i32)>,
        /// What `is_fading` reports.
        pub fading: bool,
        pub vibrations: Vec<f32>,
        pub ghosts: Vec<(Vec2, ObjectId, f32)>,
        pub dust: Vec<(Vec2, bool)>,
        pub draws: Vec<Vec<RenderElement>>,
    }

    pub type SharedLog = Rc<RefCell<Log>>;

    pub struct MockCamera(pub SharedLog);

    impl CameraSystem for MockCamera {
        fn add_camera_bias(&mut self, position: Vec2) {
            self.0.borrow_mut().biases.push(position);
        }

        fn set_target(&mut self, target: ObjectId) {
            self.0.borrow_mut().targets.push(target);
        }

        fn shake(&mut self, duration: f32, magnitude: f32) {
            self.0.borrow_mut().shakes.push((duration, magnitude));
        }
    }

    pub struct MockHud(pub SharedLog);

    impl HudSystem for MockHud {
        fn set_fuel_percent(&mut self, percent: f32) {
            self.0.borrow_mut().fuel.push(percent);
        }

        fn set_button_state(&mut self, jump_pressed: bool, attack_pressed: bool) {
            self.0.borrow_mut().buttons.push((jump_pressed, attack_pressed));
        }

        fn start_fade(&mut self, fade_in: bool, duration: f32) {
            self.0.borrow_mut().fades.push((fade_in, duration));
        }

        fn send_event_on_fade_complete(&mut self, event: GameFlowEvent, index: i32) {
            self.0.borrow_mut().fade_events.push((event, index));
        }

        fn is_fading(&self) -> bool {
            self.0.borrow().fading
        }
    }

    pub struct MockVibration(pub SharedLog);

    impl VibrationSystem for MockVibration {
        fn vibrate(&mut self, seconds: f32) {
            self.0.borrow_mut().vibrations.push(seconds);
        }
    }

    pub struct MockFactory(pub SharedLog);

    impl ObjectFactory for MockFactory {
        fn spawn_player_ghost(&mut self, position: Vec2, owner: ObjectId, lifetime: f32)
            -> Option<GameObject> {
            self.0.borrow_mut().ghosts.push((position, owner, lifetime));
            GameObject::new(ObjectState::new(position, 32.0, 32.0))
                .with_component(LifetimeComponent::ghost(lifetime, owner, 0.3))
                .ok()
        }

        fn spawn_dust(&mut self, position: Vec2, flip: bool) -> Option<GameObject> {
            self.0.borrow_mut().dust.push((position, flip));
            Some(GameObject::new(ObjectState::new(position, 16.0, 16.0)))
        }
    }

    pub struct MockSink(pub SharedLog);

    impl RenderSink for MockSink {
        fn draw(&mut self, elements: &[RenderElement]) {
            self.0.borrow_mut().draws.push(elements.to_vec());
        }
    }

    pub struct FixedHotSpot(pub HotSpotType);

    impl HotSpotSystem for FixedHotSpot {
        fn hot_spot(&self, _x: f32, _y: f32) -> HotSpotType {
            self.0
        }
    }

    /// Installs every recording collaborator except hot spots.
    pub fn install(systems: &mut Systems) -> SharedLog {
        let log = SharedLog::default();
        systems.camera = Some(Box::new(MockCamera(Rc::clone(&log))));
        systems.hud = Some(Box::new(MockHud(Rc::clone(&log))));
        systems.vibration = Some(Box::new(MockVibration(Rc::clone(&log))));
        systems.factory = Some(Box::new(MockFactory(Rc::clone(&log))));
        systems.render_sink = Some(Box::new(MockSink(Rc::clone(&log))));
        log
    }
}
