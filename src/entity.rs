//! Composite figures whose eyes follow a peer.
//!
//! An [`AlignedEntity`] is a body disk with four satellites (two eyes, two
//! pupils) and a mouth. Only the body moves under commands; satellites are
//! re-placed from scratch by [`AlignedEntity::realign`] every frame:
//!
//! 1. Take the body centre's planar ("lateral") heading, turn it left by the
//!    eye offset and step out one body radius: left eye.
//! 2. From the eye, aim at the peer's body and step `eye − pupil/2`: left pupil.
//! 3. Same to the right.
//! 4. Straight ahead one body radius: mouth.
//!
//! All five centres are computed before any disk moves, so a failed step
//! leaves the figure where it was.

use tracing::{trace, warn};

use crate::config::{FigureConfig, SimulationConfig};
use crate::disk::HyperbolicDisk;
use crate::error::GeometryError;
use crate::point::HyperbolicPoint;
use crate::render::{Color, Drawable, Renderer};
use crate::scene::EntityId;
use crate::trail::Trail;

pub const LEFT_EYE: usize = 0;
pub const RIGHT_EYE: usize = 1;
pub const LEFT_PUPIL: usize = 2;
pub const RIGHT_PUPIL: usize = 3;

/// Mouth radius bouncing between `0` and `max` by `step` per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthOscillator {
    radius: f64,
    max: f64,
    step: f64,
    closing: bool,
}

impl MouthOscillator {
    /// Starts fully open and closing.
    pub fn new(max: f64, step: f64) -> Self {
        Self {
            radius: max,
            max,
            step,
            closing: true,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Advance one tick and return the new radius, always within `[0, max]`.
    pub fn tick(&mut self) -> f64 {
        if self.closing {
            self.radius = (self.radius - self.step).max(0.0);
            if self.radius <= 0.0 {
                self.closing = false;
            }
        } else {
            self.radius = (self.radius + self.step).min(self.max);
            if self.radius >= self.max {
                self.closing = true;
            }
        }
        self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignedEntity {
    body: HyperbolicDisk,
    eyes: [HyperbolicDisk; 4],
    mouth: HyperbolicDisk,
    mouth_motion: MouthOscillator,
    eye_offset: f64,
    peer: Option<EntityId>,
    trail: Trail,
}

impl AlignedEntity {
    /// A figure at the disk origin heading north, not yet wired to a peer.
    pub fn new(
        figure: &FigureConfig,
        body_color: Color,
        trail_color: Color,
        segments: usize,
    ) -> Result<Self, GeometryError> {
        let origin = HyperbolicPoint::origin();
        let disk = |radius, color| HyperbolicDisk::with_segments(radius, origin, color, segments);
        Ok(Self {
            body: disk(figure.body_radius, body_color)?,
            eyes: [
                disk(figure.eye_radius, figure.eye_color)?,
                disk(figure.eye_radius, figure.eye_color)?,
                disk(figure.pupil_radius, figure.pupil_color)?,
                disk(figure.pupil_radius, figure.pupil_color)?,
            ],
            mouth: disk(figure.mouth_radius, figure.mouth_color)?,
            mouth_motion: MouthOscillator::new(figure.mouth_radius, figure.mouth_step),
            eye_offset: figure.eye_offset,
            peer: None,
            trail: Trail::new(trail_color),
        })
    }

    pub fn from_config(config: &SimulationConfig, body_color: Color) -> Result<Self, GeometryError> {
        Self::new(&config.figure, body_color, config.trail_color, config.segments)
    }

    pub fn body(&self) -> &HyperbolicDisk {
        &self.body
    }

    /// Indexed by [`LEFT_EYE`], [`RIGHT_EYE`], [`LEFT_PUPIL`], [`RIGHT_PUPIL`].
    pub fn eyes(&self) -> &[HyperbolicDisk; 4] {
        &self.eyes
    }

    pub fn mouth(&self) -> &HyperbolicDisk {
        &self.mouth
    }

    pub fn mouth_motion(&self) -> &MouthOscillator {
        &self.mouth_motion
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn peer(&self) -> Option<EntityId> {
        self.peer
    }

    pub(crate) fn set_peer(&mut self, peer: EntityId) {
        self.peer = Some(peer);
    }

    /// Re-place eyes, pupils and mouth around the body, gazing at `peer_body`.
    pub fn realign(&mut self, peer_body: &HyperbolicPoint) -> Result<(), GeometryError> {
        let mut frame = self.body.center().lateral_rotated(self.eye_offset);
        let left = self.aim_eye(LEFT_EYE, LEFT_PUPIL, &frame, peer_body)?;

        frame.rotate(-2.0 * self.eye_offset);
        let right = self.aim_eye(RIGHT_EYE, RIGHT_PUPIL, &frame, peer_body)?;

        frame.rotate(self.eye_offset);
        let mouth = frame.try_advance(self.body.radius())?;

        for (eye, pupil, (eye_center, pupil_center)) in
            [(LEFT_EYE, LEFT_PUPIL, left), (RIGHT_EYE, RIGHT_PUPIL, right)]
        {
            self.eyes[eye].set_center(eye_center);
            self.eyes[pupil].set_center(pupil_center);
        }
        self.mouth.set_center(mouth);
        trace!(body = ?self.body.center().to_plane(), "realigned");
        Ok(())
    }

    /// Eye and pupil centres for one side, one body radius out along `anchor`.
    fn aim_eye(
        &self,
        eye: usize,
        pupil: usize,
        anchor: &HyperbolicPoint,
        peer_body: &HyperbolicPoint,
    ) -> Result<(HyperbolicPoint, HyperbolicPoint), GeometryError> {
        let center = anchor.try_advance(self.body.radius())?;

        let mut gaze = center;
        let bearing = center.distance_and_direction(peer_body);
        if bearing.is_degenerate() {
            // peer sits on the eye; keep looking outward
            warn!(eye, at = ?center.to_plane(), "peer coincides with eye, gaze left unchanged");
        } else {
            gaze.set_direction(bearing.direction)?;
        }
        // visual offset so the pupil stays inside the eye
        let reach = self.eyes[eye].radius() - self.eyes[pupil].radius() / 2.0;
        Ok((center, gaze.try_advance(reach)?))
    }

    /// Bounce the mouth radius by one step.
    pub fn breathe(&mut self) -> Result<(), GeometryError> {
        let radius = self.mouth_motion.tick();
        self.mouth.set_radius(radius)
    }

    /// Record the body's current disk coordinate on the trail.
    pub fn append_trail_point(&mut self) {
        self.trail.push(self.body.center().to_plane());
    }

    pub fn move_forward(&mut self, distance: f64) {
        self.body.move_forward(distance);
    }

    pub fn move_backward(&mut self, distance: f64) {
        self.body.move_backward(distance);
    }

    pub fn rotate_left(&mut self, angle: f64) {
        self.body.rotate_left(angle);
    }

    pub fn rotate_right(&mut self, angle: f64) {
        self.body.rotate_right(angle);
    }
}

impl Drawable for AlignedEntity {
    fn draw(&self, renderer: &mut dyn Renderer) {
        self.trail.draw(renderer);
        self.body.draw(renderer);
        self.mouth.draw(renderer);
        for eye in &self.eyes {
            eye.draw(renderer);
        }
    }
}
