//! Docking state machine: proximity search, attempt throttling, timed
//! phosphorylation and the post-undock grace period.
//!
//! All timers advance from the `delta` handed to [`DockingController::update`],
//! so the controller is fully deterministic and needs no wall clock.

use crate::game_logic::errors::{CamkiiError, CamkiiResult};
use crate::game_logic::obstacles::{CylinderBoundary, WorldTransform};
use bevy::prelude::*;
use derive_more::{Display, From};

/// Index of an obstacle in the ordered obstacle list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("microtubule#{_0}")]
pub struct ObstacleId(pub usize);

/// Index of an attachment point inside its controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("site#{_0}")]
pub struct AttachmentPointId(pub usize);

/// The only player fields the docking core reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub position: Vec3,
    pub bounding_radius: f32,
}

impl PlayerBody {
    pub fn new(position: Vec3, bounding_radius: f32) -> Self {
        Self {
            position,
            bounding_radius,
        }
    }
}

/// Fixed docking target on an obstacle's surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentPoint {
    pub id: AttachmentPointId,
    pub owner: ObstacleId,
    pub local_position: Vec3,
    pub local_normal: Vec3,
    /// Set once docked into; used points are never offered again
    pub used: bool,
}

impl AttachmentPoint {
    pub fn world_position<T: WorldTransform + ?Sized>(&self, owner: &T) -> Vec3 {
        owner.local_to_world(self.local_position)
    }

    pub fn world_normal<T: WorldTransform + ?Sized>(&self, owner: &T) -> Vec3 {
        owner.direction_to_world(self.local_normal)
    }
}

/// Configuration for docking behaviour
#[derive(Debug, Clone, Copy)]
pub struct DockingConfig {
    /// Maximum distance (exclusive) from player to attachment point
    pub docking_distance: f32,
    /// Seconds spent docked before phosphorylation completes
    pub docking_duration: f32,
    /// Seconds an obstacle cools down after phosphorylation
    pub cooldown_duration: f32,
    /// Minimum seconds between processed dock attempts
    pub throttle_window: f32,
    /// Seconds after undocking during which docking is refused
    pub grace_period: f32,
    pub points_per_obstacle: usize,
    /// Fraction of the half-length covered by attachment points
    pub attachment_span: f32,
}

impl Default for DockingConfig {
    fn default() -> Self {
        Self {
            docking_distance: 3.0,
            docking_duration: 4.0,
            cooldown_duration: 10.0,
            throttle_window: 0.5,
            grace_period: 0.5,
            points_per_obstacle: 5,
            attachment_span: 1.0,
        }
    }
}

/// A live binding between the player and one attachment point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockingSession {
    pub point: AttachmentPointId,
    pub obstacle: ObstacleId,
    pub elapsed: f32,
    pub duration: f32,
    /// World position of the attachment point when docking started
    pub anchor: Vec3,
}

impl DockingSession {
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Persistent docking states. Attempting is a transition guard, not a state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DockingState {
    #[default]
    Free,
    Docked(DockingSession),
}

/// Nearest unused attachment point within docking distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub point: AttachmentPointId,
    pub obstacle: ObstacleId,
    pub distance: f32,
    pub world_position: Vec3,
    /// 1.0 on top of the point, falling to 0.0 at the docking distance
    pub attraction: f32,
}

/// Outcome of a single dock attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockAttempt {
    Docked(Proximity),
    AlreadyDocked,
    Throttled,
    NotReady,
    NoPointInRange,
}

impl DockAttempt {
    pub fn is_docked(&self) -> bool {
        matches!(self, DockAttempt::Docked(_))
    }
}

/// Discrete docking notifications for the scene layer
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum DockingEvent {
    DockStarted {
        point: AttachmentPointId,
        obstacle: ObstacleId,
        world_position: Vec3,
        world_normal: Vec3,
    },
    DockCompleted {
        point: AttachmentPointId,
        obstacle: ObstacleId,
        /// False when the obstacle was still cooling down from an earlier phosphorylation
        phosphorylated: bool,
    },
    Undocked {
        point: AttachmentPointId,
    },
}

/// Owns every piece of docking state: attachment points, obstacle cooldowns,
/// the active session and the attempt/grace timers.
#[derive(Debug, Clone)]
pub struct DockingController {
    config: DockingConfig,
    points: Vec<AttachmentPoint>,
    cooldowns: Vec<f32>,
    state: DockingState,
    clock: f64,
    last_attempt: Option<f64>,
    grace_remaining: f32,
    affordance: Option<Proximity>,
    landing_sites: Vec<Vec3>,
    pending: Vec<DockingEvent>,
}

impl Default for DockingController {
    fn default() -> Self {
        Self::new(DockingConfig::default())
    }
}

impl DockingController {
    pub fn new(config: DockingConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            cooldowns: Vec::new(),
            state: DockingState::Free,
            clock: 0.0,
            last_attempt: None,
            grace_remaining: 0.0,
            affordance: None,
            landing_sites: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &DockingConfig {
        &self.config
    }

    /// Register the next obstacle in list order and create its attachment batch.
    ///
    /// Points sit on the cylinder surface (local +Y side) and are spread evenly
    /// along the local Z axis.
    pub fn register_obstacle<O: CylinderBoundary + ?Sized>(&mut self, obstacle: &O) -> ObstacleId {
        let owner = ObstacleId(self.cooldowns.len());
        self.cooldowns.push(0.0);

        let count = self.config.points_per_obstacle;
        let half_span = obstacle.length() * 0.5 * self.config.attachment_span.clamp(0.0, 1.0);

        for i in 0..count {
            let ratio = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.5
            };
            let z = (ratio * 2.0 - 1.0) * half_span;
            self.points.push(AttachmentPoint {
                id: AttachmentPointId(self.points.len()),
                owner,
                local_position: Vec3::new(0.0, obstacle.radius(), z),
                local_normal: Vec3::Y,
                used: false,
            });
        }

        owner
    }

    pub fn obstacle_count(&self) -> usize {
        self.cooldowns.len()
    }

    pub fn attachment_points(&self) -> &[AttachmentPoint] {
        &self.points
    }

    pub fn attachment_point(&self, id: AttachmentPointId) -> Option<&AttachmentPoint> {
        self.points.get(id.0)
    }

    pub fn points_of(&self, obstacle: ObstacleId) -> impl Iterator<Item = &AttachmentPoint> {
        self.points.iter().filter(move |point| point.owner == obstacle)
    }

    pub fn cooldown_remaining(&self, obstacle: ObstacleId) -> CamkiiResult<f32> {
        self.cooldowns
            .get(obstacle.0)
            .copied()
            .ok_or(CamkiiError::UnknownObstacle(obstacle))
    }

    pub fn state(&self) -> &DockingState {
        &self.state
    }

    pub fn is_docked(&self) -> bool {
        matches!(self.state, DockingState::Docked(_))
    }

    pub fn session(&self) -> Option<&DockingSession> {
        match &self.state {
            DockingState::Docked(session) => Some(session),
            DockingState::Free => None,
        }
    }

    /// Docking progress in `[0, 1]` while docked
    pub fn progress(&self) -> Option<f32> {
        self.session().map(DockingSession::progress)
    }

    /// False while docked or during the post-undock grace period
    pub fn ready_to_dock(&self) -> bool {
        !self.is_docked() && self.grace_remaining <= 0.0
    }

    pub fn last_attempt_time(&self) -> Option<f64> {
        self.last_attempt
    }

    /// Nearest dockable point as of the last tick, for UI cues
    pub fn affordance(&self) -> Option<&Proximity> {
        self.affordance.as_ref()
    }

    /// World positions of every successful dock, oldest first
    pub fn landing_sites(&self) -> &[Vec3] {
        &self.landing_sites
    }

    /// Find the closest unused attachment point strictly within docking distance.
    ///
    /// Pure: safe to call every tick. Ties keep the first point in iteration order.
    ///
    /// # Examples
    /// ```
    /// use camkii::game_logic::docking::DockingController;
    /// use camkii::game_logic::obstacles::{Microtubule, Pose};
    /// use bevy::prelude::Vec3;
    ///
    /// let tubes = [Microtubule::standard(Pose::IDENTITY)];
    /// let mut controller = DockingController::default();
    /// controller.register_obstacle(&tubes[0]);
    ///
    /// // Middle attachment point sits at (0, 0.5, 0)
    /// let near = controller.find_nearest_attachment(Vec3::new(0.0, 2.0, 0.0), &tubes);
    /// assert!(near.is_some());
    ///
    /// let far = controller.find_nearest_attachment(Vec3::new(0.0, 5.5, 0.0), &tubes);
    /// assert!(far.is_none());
    /// ```
    pub fn find_nearest_attachment<O: CylinderBoundary>(
        &self,
        position: Vec3,
        obstacles: &[O],
    ) -> Option<Proximity> {
        let threshold = self.config.docking_distance;
        let mut best: Option<Proximity> = None;

        for point in self.points.iter().filter(|point| !point.used) {
            let Some(owner) = obstacles.get(point.owner.0) else {
                continue;
            };
            let world_position = point.world_position(owner);
            let distance = position.distance(world_position);

            if distance >= threshold {
                continue;
            }
            if best.is_some_and(|current| distance >= current.distance) {
                continue;
            }

            best = Some(Proximity {
                point: point.id,
                obstacle: point.owner,
                distance,
                world_position,
                attraction: 1.0 - distance / threshold,
            });
        }

        best
    }

    /// Attempt to dock the player to the nearest unused attachment point.
    ///
    /// The throttle is checked before the attempt time is stamped, so a
    /// throttled attempt never extends the window.
    pub fn try_dock<O: CylinderBoundary>(
        &mut self,
        player: &PlayerBody,
        obstacles: &[O],
    ) -> DockAttempt {
        if self.is_docked() {
            return DockAttempt::AlreadyDocked;
        }

        if let Some(last) = self.last_attempt {
            if self.clock - last < f64::from(self.config.throttle_window) {
                debug!("Dock attempt throttled");
                return DockAttempt::Throttled;
            }
        }
        self.last_attempt = Some(self.clock);

        if self.grace_remaining > 0.0 {
            debug!(
                "Dock attempt refused: {:.2}s of undock grace remaining",
                self.grace_remaining
            );
            return DockAttempt::NotReady;
        }

        let Some(nearest) = self.find_nearest_attachment(player.position, obstacles) else {
            debug!("Dock attempt found no attachment point in range");
            return DockAttempt::NoPointInRange;
        };

        let world_normal = match (self.points.get(nearest.point.0), obstacles.get(nearest.obstacle.0)) {
            (Some(point), Some(owner)) => point.world_normal(owner),
            _ => Vec3::Y,
        };

        if let Some(point) = self.points.get_mut(nearest.point.0) {
            point.used = true;
        }

        self.state = DockingState::Docked(DockingSession {
            point: nearest.point,
            obstacle: nearest.obstacle,
            elapsed: 0.0,
            duration: self.config.docking_duration,
            anchor: nearest.world_position,
        });
        self.affordance = None;
        self.landing_sites.push(nearest.world_position);
        self.pending.push(DockingEvent::DockStarted {
            point: nearest.point,
            obstacle: nearest.obstacle,
            world_position: nearest.world_position,
            world_normal,
        });

        info!(
            "Docked to {} on {} at ({:.2}, {:.2}, {:.2})",
            nearest.point,
            nearest.obstacle,
            nearest.world_position.x,
            nearest.world_position.y,
            nearest.world_position.z
        );

        DockAttempt::Docked(nearest)
    }

    /// Advance the controller by one tick and return the events it produced.
    ///
    /// `interact_requested` must be a one-shot edge signal. A missing player
    /// or an empty obstacle list is a valid no-op apart from timers advancing.
    pub fn update<O: CylinderBoundary>(
        &mut self,
        delta: f32,
        player: Option<&PlayerBody>,
        obstacles: &[O],
        interact_requested: bool,
    ) -> Vec<DockingEvent> {
        let delta = delta.max(0.0);
        self.clock += f64::from(delta);

        for cooldown in &mut self.cooldowns {
            *cooldown = (*cooldown - delta).max(0.0);
        }
        self.grace_remaining = (self.grace_remaining - delta).max(0.0);

        self.advance_session(delta);

        if !self.is_docked() {
            if interact_requested {
                if let Some(player) = player {
                    self.try_dock(player, obstacles);
                }
            }

            self.affordance = match player {
                Some(player) if self.ready_to_dock() => {
                    self.find_nearest_attachment(player.position, obstacles)
                }
                _ => None,
            };
        }

        std::mem::take(&mut self.pending)
    }

    fn advance_session(&mut self, delta: f32) {
        let DockingState::Docked(session) = &mut self.state else {
            return;
        };

        session.elapsed += delta;
        if !session.is_complete() {
            return;
        }

        let finished = *session;
        // Leaving Docked here guarantees completion fires exactly once
        self.state = DockingState::Free;

        let phosphorylated = match self.cooldowns.get_mut(finished.obstacle.0) {
            Some(cooldown) if *cooldown <= 0.0 => {
                *cooldown = self.config.cooldown_duration;
                true
            }
            _ => false,
        };

        if phosphorylated {
            info!("Phosphorylation complete on {}", finished.obstacle);
        } else {
            info!(
                "Docking on {} finished while it was still cooling down",
                finished.obstacle
            );
        }

        self.pending.push(DockingEvent::DockCompleted {
            point: finished.point,
            obstacle: finished.obstacle,
            phosphorylated,
        });

        self.grace_remaining = self.config.grace_period;
        self.pending.push(DockingEvent::Undocked {
            point: finished.point,
        });
        info!("Undocked from {}", finished.point);
    }
}
