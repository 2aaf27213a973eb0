//=========================================================================
// Camera Bias Component
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ComponentPhase, GameComponent};
use crate::core::error::SimResult;
use crate::core::world::{FrameContext, ObjectState};

//=== CameraBiasComponent =================================================

/// Pulls the camera toward its object every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraBiasComponent;

impl CameraBiasComponent {
    pub fn new() -> Self {
        Self
    }
}

impl GameComponent for CameraBiasComponent {
    fn phase(&self) -> ComponentPhase {
        ComponentPhase::Think
    }

    fn update(&mut self, _dt: f32, state: &mut ObjectState, ctx: &mut FrameContext<'_>) -> SimResult<()> {
        if let Some(camera) = ctx.systems.camera() {
            camera.add_camera_bias(state.position);
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vec2;
    use crate::core::systems::CameraSystem;
    use crate::core::world::context::ContextRig;
    use crate::core::world::ObjectId;
    use std::sync::{Arc, Mutex};

    struct BiasLog(Arc<Mutex<Vec<Vec2>>>);

    impl CameraSystem for BiasLog {
        fn add_camera_bias(&mut self, position: Vec2) {
            self.0.lock().unwrap().push(position);
        }
        fn set_target(&mut self, _target: ObjectId) {}
        fn shake(&mut self, _duration: f32, _magnitude: f32) {}
    }

    #[test]
    fn biases_toward_object_position() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut rig = ContextRig::new();
        rig.systems.camera = Some(Box::new(BiasLog(Arc::clone(&log))));

        let mut state = ObjectState::new(Vec2::new(3.0, 4.0), 1.0, 1.0);
        CameraBiasComponent::new()
            .update(0.016, &mut state, &mut rig.context())
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec![Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn missing_camera_is_skipped() {
        let mut rig = ContextRig::new();
        let mut state = ObjectState::default();
        assert!(CameraBiasComponent::new()
            .update(0.016, &mut state, &mut rig.context())
            .is_ok());
    }
}
