use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A movement speed value constrained to [0.5, 60.0] units per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct MovementSpeed(f32);

impl MovementSpeed {
    const MIN: f32 = 0.5;
    const MAX: f32 = 60.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// A body bounding radius constrained to [0.1, 5.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct BoundingRadius(f32);

impl BoundingRadius {
    const MIN: f32 = 0.1;
    const MAX: f32 = 5.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for BoundingRadius {
    fn default() -> Self {
        Self::new(1.2)
    }
}

/// A collision push-out margin constrained to [1.0, 2.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct PushOutMargin(f32);

impl PushOutMargin {
    const MIN: f32 = 1.0;
    const MAX: f32 = 2.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for PushOutMargin {
    fn default() -> Self {
        Self::new(1.05)
    }
}

/// A docking distance constrained to [0.5, 20.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct DockingDistance(f32);

impl DockingDistance {
    const MIN: f32 = 0.5;
    const MAX: f32 = 20.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for DockingDistance {
    fn default() -> Self {
        Self::new(3.0)
    }
}

/// A docking duration constrained to [0.5, 60.0] seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct DockingDuration(f32);

impl DockingDuration {
    const MIN: f32 = 0.5;
    const MAX: f32 = 60.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for DockingDuration {
    fn default() -> Self {
        Self::new(4.0)
    }
}

/// A cooldown constrained to [0.0, 300.0] seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct CooldownSeconds(f32);

impl CooldownSeconds {
    const MIN: f32 = 0.0;
    const MAX: f32 = 300.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for CooldownSeconds {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// A dock attempt throttle window constrained to [0.05, 5.0] seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ThrottleWindow(f32);

impl ThrottleWindow {
    const MIN: f32 = 0.05;
    const MAX: f32 = 5.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for ThrottleWindow {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// An undock grace period constrained to [0.0, 5.0] seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct GracePeriod(f32);

impl GracePeriod {
    const MIN: f32 = 0.0;
    const MAX: f32 = 5.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for GracePeriod {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// A camera zoom distance constrained to [2.0, 100.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ZoomDistance(f32);

impl ZoomDistance {
    const MIN: f32 = 2.0;
    const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for ZoomDistance {
    fn default() -> Self {
        Self::new(10.0)
    }
}
