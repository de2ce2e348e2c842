use glam::{Mat3, Vec3};

/// An orthonormal frame built around a single direction, used as its +Z axis
pub struct Frame {
    frame: Mat3,
}

impl Frame {
    /// "Building an Orthonormal Basis, Revisited" (Duff et al., JCGT 2017).
    /// `n` is expected to be normalized.
    pub fn new(n: Vec3) -> Self {
        let sign = 1.0_f32.copysign(n.z);
        let a = -1.0 / (sign + n.z);
        let b = n.x * n.y * a;

        Self {
            frame: Mat3::from_cols(
                Vec3::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x),
                Vec3::new(b, sign + n.y * n.y * a, -n.y),
                n,
            ),
        }
    }

    pub fn to_local(&self, global: Vec3) -> Vec3 {
        self.frame.transpose() * global
    }

    pub fn from_local(&self, local: Vec3) -> Vec3 {
        self.frame * local
    }

    pub fn z(&self) -> Vec3 {
        self.frame.z_axis
    }
}
