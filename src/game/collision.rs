//! Collision Helpers
//!
//! The few geometric tests combat needs: a ray against a sphere for melee
//! swings, and point-in-sphere for projectiles and pickups.

use macroquad::math::Vec3;

/// A ray with a unit-length direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` toward `target`. Returns None when the two points
    /// coincide (no direction).
    pub fn toward(origin: Vec3, target: Vec3) -> Option<Self> {
        let direction = (target - origin).try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Distance along the ray to the first point on the sphere, if the ray
/// hits it. A ray starting inside the sphere hits at distance 0.
/// Spheres entirely behind the origin are missed.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - ray.origin;
    let dist_sq = to_center.length_squared();
    let r_sq = radius * radius;

    if dist_sq <= r_sq {
        return Some(0.0);
    }

    // Projection of the center onto the ray
    let along = to_center.dot(ray.direction);
    if along < 0.0 {
        return None;
    }

    let perp_sq = dist_sq - along * along;
    if perp_sq > r_sq {
        return None;
    }

    Some(along - (r_sq - perp_sq).sqrt())
}

/// Is `point` strictly within `radius` of `center`?
pub fn within_radius(point: Vec3, center: Vec3, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}
