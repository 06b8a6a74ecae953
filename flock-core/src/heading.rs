//! Orientation of an agent mesh from its velocity.
//!
//! Renderers model each agent pointing down `+Z` and rotate it onto the
//! velocity. This is the axis/angle form of that rotation.

use crate::vector::Vector3D;

/// Direction an unrotated agent mesh points in
pub const DEFAULT_LOOK: Vector3D = Vector3D::new(0.0, 0.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    /// Unit rotation axis
    pub axis: Vector3D,
    /// Radians, right-handed about `axis`
    pub angle: f32,
}

impl Heading {
    pub const IDENTITY: Self = Self {
        axis: Vector3D::new(0.0, 1.0, 0.0),
        angle: 0.0,
    };

    /// Rotation taking [`DEFAULT_LOOK`] onto the direction of `velocity`.
    ///
    /// A zero velocity keeps the mesh unrotated; a velocity straight down `-Z`
    /// turns half a revolution about `+Y`.
    pub fn from_velocity(velocity: Vector3D) -> Self {
        let direction = velocity.normalize();
        if direction.is_zero() {
            return Self::IDENTITY;
        }

        let axis = DEFAULT_LOOK.cross(&direction);
        let cos = DEFAULT_LOOK.dot(&direction).clamp(-1.0, 1.0);
        if axis.magnitude_squared() < 1e-12 {
            return if cos > 0.0 {
                Self::IDENTITY
            } else {
                Self {
                    axis: Vector3D::new(0.0, 1.0, 0.0),
                    angle: std::f32::consts::PI,
                }
            };
        }

        Self {
            axis: axis.normalize(),
            angle: cos.acos(),
        }
    }

    /// Rotate `v` by this heading (Rodrigues' formula)
    pub fn rotate(&self, v: Vector3D) -> Vector3D {
        let (sin, cos) = self.angle.sin_cos();
        let k = self.axis;
        v * cos + k.cross(&v) * sin + k * (k.dot(&v) * (1.0 - cos))
    }
}
