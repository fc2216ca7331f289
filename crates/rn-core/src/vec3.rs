//! 3-D point type and ground-plane spatial utilities.
//!
//! The game world is a flat plane: roads and vehicles live on XZ with y
//! typically 0 (y survives so elevated geometry keeps working downstream).
//! All distances are plain Euclidean — there is no geographic projection.

/// A point in world space stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Squared Euclidean distance — cheaper than `distance` for nearest
    /// comparisons and tolerance checks.
    #[inline]
    pub fn distance_sq(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy.  Returns `Vec3::ZERO` for a zero-length vector
    /// rather than producing NaNs.
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len <= f32::EPSILON {
            return Vec3::ZERO;
        }
        Vec3::new(self.x / len, self.y / len, self.z / len)
    }

    /// Linear interpolation from `self` to `other` at `t` (unclamped).
    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Heading angle on the ground plane, in radians, measured from +X
    /// toward +Z.  Used for vehicle yaw and intersection approach angles.
    #[inline]
    pub fn yaw(self) -> f32 {
        self.z.atan2(self.x)
    }

    /// Ground-plane perpendicular (rotated 90° about Y), unnormalized.
    /// Applied to lane offsets: `pos + perp * lateral`.
    #[inline]
    pub fn perp_xz(self) -> Vec3 {
        Vec3::new(-self.z, 0.0, self.x)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
