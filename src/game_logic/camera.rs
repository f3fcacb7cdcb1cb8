use bevy::prelude::*;

/// Third-person orbit camera around the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Orbit angle around the Y axis in radians
    pub angle: f32,
    pub distance: f32,
    /// Height of the eye above the target
    pub height: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            angle: 0.0,
            distance: 10.0,
            height: 5.0,
            min_zoom: 5.0,
            max_zoom: 30.0,
        }
    }
}

impl CameraRig {
    pub fn orbit(&mut self, radians: f32) {
        self.angle = (self.angle + radians).rem_euclid(std::f32::consts::TAU);
    }

    /// Positive amounts move the camera closer
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance - amount).clamp(self.min_zoom, self.max_zoom);
    }

    /// Eye position for a camera looking at `target`
    pub fn eye(&self, target: Vec3) -> Vec3 {
        target
            + Vec3::new(
                self.angle.sin() * self.distance,
                self.height,
                self.angle.cos() * self.distance,
            )
    }
}
