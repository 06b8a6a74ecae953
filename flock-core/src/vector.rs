/// A 3D vector used for position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3D {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn dot(&self, other: &Vector3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3D) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// True only for an exact zero vector (either sign of zero)
    pub fn is_zero(&self) -> bool {
        self.magnitude_squared() == 0.0
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            *self / mag
        } else {
            Self::zero()
        }
    }

    /// Rescale to `length` keeping direction; the zero vector stays zero
    pub fn with_magnitude(&self, length: f32) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            *self * (length / mag)
        } else {
            Self::zero()
        }
    }

    pub fn distance_squared(&self, other: &Vector3D) -> f32 {
        (*self - *other).magnitude_squared()
    }

    pub fn distance(&self, other: &Vector3D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3D {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3D> for [f32; 3] {
    fn from(v: Vector3D) -> Self {
        v.to_array()
    }
}

impl core::ops::Add for Vector3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl core::ops::Sub for Vector3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl core::ops::Neg for Vector3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl core::ops::Mul<f32> for Vector3D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector3D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector3D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl core::ops::SubAssign for Vector3D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl core::iter::Sum for Vector3D {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, v| acc + v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector3d_new() {
        let v = Vector3D::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vector3d_magnitude() {
        let v = Vector3D::new(2.0, 3.0, 6.0);
        assert_eq!(v.magnitude(), 7.0);
        assert_eq!(v.magnitude_squared(), 49.0);
    }

    #[test]
    fn test_vector3d_normalize() {
        let v = Vector3D::new(3.0, 4.0, 12.0);
        assert!((v.normalize().magnitude() - 1.0).abs() < 0.0001);
        assert_eq!(Vector3D::zero().normalize(), Vector3D::zero());
    }

    #[test]
    fn test_vector3d_with_magnitude() {
        let v = Vector3D::new(0.0, 0.0, -2.0).with_magnitude(5.0);
        assert_eq!(v, Vector3D::new(0.0, 0.0, -5.0));
        assert!(Vector3D::zero().with_magnitude(5.0).is_zero());
    }

    #[test]
    fn test_negative_zero_counts_as_zero() {
        let v = -Vector3D::zero();
        assert!(v.is_zero());
    }

    #[test]
    fn test_vector3d_operations() {
        let v1 = Vector3D::new(1.0, 2.0, 3.0);
        let v2 = Vector3D::new(4.0, 6.0, 8.0);

        assert_eq!(v1 + v2, Vector3D::new(5.0, 8.0, 11.0));
        assert_eq!(v2 - v1, Vector3D::new(3.0, 4.0, 5.0));
        assert_eq!(v1 * 2.0, Vector3D::new(2.0, 4.0, 6.0));
        assert_eq!(v2 / 2.0, Vector3D::new(2.0, 3.0, 4.0));
        assert_eq!(-v1, Vector3D::new(-1.0, -2.0, -3.0));
        assert_eq!(v1.dot(&v2), 40.0);
        assert_eq!(v1.distance_squared(&v2), 50.0);
        assert_eq!(Vector3D::new(3.0, 0.0, 4.0).distance(&Vector3D::zero()), 5.0);
    }

    #[test]
    fn test_vector3d_cross() {
        let x = Vector3D::new(1.0, 0.0, 0.0);
        let y = Vector3D::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3D::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_vector3d_sum() {
        let total: Vector3D = [Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(0.0, 2.0, 1.0)]
            .into_iter()
            .sum();
        assert_eq!(total, Vector3D::new(1.0, 2.0, 1.0));
    }
}
