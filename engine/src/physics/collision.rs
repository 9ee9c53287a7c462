//! Collision detection module
//!
//! Static track obstacles are axis-aligned boxes. The car only ever asks one
//! question: "what is the first surface along this ray, within this radius?"
//! That question is answered with slab-method ray/AABB intersection.
//!
//! # Example
//!
//! ```ignore
//! use drift_rush_engine::physics::collision::{CollisionField, ObstacleField};
//! use glam::Vec3;
//!
//! let mut field = ObstacleField::new();
//! field.add_box(Vec3::new(9.0, 0.0, -5.0), Vec3::new(10.0, 2.0, 5.0));
//!
//! let origin = Vec3::new(0.0, 0.5, 0.0);
//! if let Some(hit) = field.first_hit(origin, Vec3::X, 20.0) {
//!     println!("wall {} at {} m, normal {:?}", hit.obstacle, hit.distance, hit.normal);
//! }
//! ```

use glam::Vec3;

/// Smallest box extent kept along any axis, so face normals stay defined.
const MIN_EXTENT: f32 = 0.01;

/// Information about a ray striking an obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// World-space position where the ray met the surface
    pub position: Vec3,
    /// Outward surface normal at the hit point (normalized)
    pub normal: Vec3,
    /// Index of the struck obstacle in its field
    pub obstacle: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

impl HitInfo {
    /// Creates a new HitInfo with the given parameters.
    pub fn new(position: Vec3, normal: Vec3, obstacle: usize, distance: f32) -> Self {
        Self {
            position,
            normal,
            obstacle,
            distance,
        }
    }
}

/// Anything the car can crash into.
///
/// The session only needs the nearest surface along a ray; the presentation
/// layer can back this with its own track geometry instead of
/// [`ObstacleField`].
pub trait CollisionField {
    /// First surface struck along `direction` (normalized) within `max_dist`.
    fn first_hit(&self, origin: Vec3, direction: Vec3, max_dist: f32) -> Option<HitInfo>;
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero components get a huge inverse so that slab never limits the range
    let inv = |d: f32| {
        if d.abs() > 1e-10 {
            1.0 / d
        } else {
            f32::MAX * if d.is_sign_negative() { -1.0 } else { 1.0 }
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_enter = t1.min(t2).max_element();
    let t_exit = t1.max(t2).min_element();

    if t_exit >= t_enter && t_exit >= 0.0 {
        if t_enter >= 0.0 {
            Some(t_enter)
        } else {
            // Origin inside the box
            Some(t_exit)
        }
    } else {
        None
    }
}

/// Outward normal of the AABB face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = (aabb_max - aabb_min) * 0.5;
    let normalized = (point - center) / half_extents;
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Reflect `velocity` about a surface `normal`: `v - 2(v.n)n`.
///
/// `normal` must be normalized. Pure value operation.
pub fn reflect(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

// =============================================================================
// Obstacle - a static box on the track
// =============================================================================

/// A static axis-aligned box (wall segment, barrier, building footprint).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub min: Vec3,
    pub max: Vec3,
}

impl Obstacle {
    /// Box spanning two opposite corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let mut max = a.max(b);
        // Degenerate boxes would give undefined face normals
        max = max.max(min + Vec3::splat(MIN_EXTENT));
        Self { min, max }
    }

    /// Box from a ground-plane rectangle (x/z corners) and a height.
    pub fn from_footprint(x0: f32, z0: f32, x1: f32, z1: f32, height: f32) -> Self {
        Self::new(Vec3::new(x0, 0.0, z0), Vec3::new(x1, height, z1))
    }
}

// =============================================================================
// ObstacleField - every static obstacle on the track
// =============================================================================

/// Flat list of obstacles, ray cast by brute force.
///
/// Track layouts hold a few hundred boxes at most, so a linear scan per
/// frame is well inside budget.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Square arena of side `2 * half_extent` enclosed by four walls.
    pub fn walled_arena(half_extent: f32, wall_thickness: f32, wall_height: f32) -> Self {
        let mut field = Self::new();
        let h = half_extent;
        let t = wall_thickness;
        // North / south
        field.push(Obstacle::from_footprint(-h - t, -h - t, h + t, -h, wall_height));
        field.push(Obstacle::from_footprint(-h - t, h, h + t, h + t, wall_height));
        // West / east
        field.push(Obstacle::from_footprint(-h - t, -h, -h, h, wall_height));
        field.push(Obstacle::from_footprint(h, -h, h + t, h, wall_height));
        field
    }

    /// Add a box from two corners and return its index.
    pub fn add_box(&mut self, a: Vec3, b: Vec3) -> usize {
        self.push(Obstacle::new(a, b))
    }

    /// Add an obstacle and return its index.
    pub fn push(&mut self, obstacle: Obstacle) -> usize {
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Closest hit along the ray, if any lies within `max_dist`.
    pub fn ray_cast(&self, origin: Vec3, direction: Vec3, max_dist: f32) -> Option<HitInfo> {
        let mut closest: Option<HitInfo> = None;
        let mut closest_dist = max_dist;

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if let Some(t) = ray_aabb_intersect(origin, direction, obstacle.min, obstacle.max) {
                if t < closest_dist {
                    let position = origin + direction * t;
                    let normal = aabb_surface_normal(position, obstacle.min, obstacle.max);
                    closest = Some(HitInfo::new(position, normal, index, t));
                    closest_dist = t;
                }
            }
        }

        closest
    }
}

impl CollisionField for ObstacleField {
    fn first_hit(&self, origin: Vec3, direction: Vec3, max_dist: f32) -> Option<HitInfo> {
        self.ray_cast(origin, direction, max_dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_aabb_from_front() {
        let origin = Vec3::new(0.0, 0.0, -5.0);
        let t = ray_aabb_intersect(origin, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        let t = t.expect("ray should hit");
        assert!((t - 4.0).abs() < 0.001, "Expected t=4.0, got t={}", t);
    }

    #[test]
    fn test_ray_misses_aabb() {
        let origin = Vec3::new(0.0, 5.0, -5.0);
        let result = ray_aabb_intersect(origin, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(result.is_none());
    }

    #[test]
    fn test_ray_starts_inside_aabb() {
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        // Exit face at z=1
        assert!((t.unwrap() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let result = ray_aabb_intersect(origin, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(result.is_none());
    }

    #[test]
    fn test_axis_parallel_ray_outside_slab() {
        // Direction has zero x; origin outside the x slab must miss
        let origin = Vec3::new(3.0, 0.0, -5.0);
        let result = ray_aabb_intersect(origin, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(result.is_none());
    }

    #[test]
    fn test_surface_normals() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        assert_eq!(aabb_surface_normal(Vec3::new(1.0, 0.0, 0.0), min, max), Vec3::X);
        assert_eq!(aabb_surface_normal(Vec3::new(-1.0, 0.0, 0.0), min, max), Vec3::NEG_X);
        assert_eq!(aabb_surface_normal(Vec3::new(0.0, 0.0, -1.0), min, max), Vec3::NEG_Z);
        assert_eq!(aabb_surface_normal(Vec3::new(0.0, 1.0, 0.2), min, max), Vec3::Y);
    }

    #[test]
    fn test_reflect_head_on() {
        let v = Vec3::new(0.0, 0.0, -20.0);
        let reflected = reflect(v, Vec3::Z);
        assert!((reflected - Vec3::new(0.0, 0.0, 20.0)).length() < 1e-5);
    }

    #[test]
    fn test_reflect_glancing_keeps_tangent() {
        let v = Vec3::new(3.0, 0.0, -4.0);
        let reflected = reflect(v, Vec3::Z);
        assert!((reflected - Vec3::new(3.0, 0.0, 4.0)).length() < 1e-5);
        assert!((reflected.length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn test_obstacle_new_orders_corners() {
        let obstacle = Obstacle::new(Vec3::new(2.0, 3.0, 4.0), Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(obstacle.min, Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(obstacle.max, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_degenerate_obstacle_gets_thickness() {
        let obstacle = Obstacle::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 5.0));
        assert!(obstacle.max.x > obstacle.min.x);
    }

    #[test]
    fn test_field_returns_closest_hit() {
        let mut field = ObstacleField::new();
        let far = field.add_box(Vec3::new(-5.0, 0.0, -20.0), Vec3::new(5.0, 2.0, -19.0));
        let near = field.add_box(Vec3::new(-5.0, 0.0, -10.0), Vec3::new(5.0, 2.0, -9.0));

        let origin = Vec3::new(0.0, 0.5, 0.0);
        let hit = field.first_hit(origin, Vec3::NEG_Z, 50.0).unwrap();
        assert_eq!(hit.obstacle, near);
        assert_ne!(hit.obstacle, far);
        assert!((hit.distance - 9.0).abs() < 1e-4);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_field_respects_max_distance() {
        let mut field = ObstacleField::new();
        field.add_box(Vec3::new(-5.0, 0.0, -10.0), Vec3::new(5.0, 2.0, -9.0));

        let origin = Vec3::new(0.0, 0.5, 0.0);
        assert!(field.first_hit(origin, Vec3::NEG_Z, 2.0).is_none());
        assert!(field.first_hit(origin, Vec3::NEG_Z, 9.5).is_some());
    }

    #[test]
    fn test_walled_arena_encloses_origin() {
        let field = ObstacleField::walled_arena(50.0, 2.0, 3.0);
        assert_eq!(field.len(), 4);

        let origin = Vec3::new(0.0, 0.5, 0.0);
        for direction in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z] {
            let hit = field.first_hit(origin, direction, 100.0).expect("walls all around");
            assert!((hit.distance - 50.0).abs() < 1e-3);
            assert!(hit.normal.dot(direction) < 0.0, "normal faces the car");
        }
    }
}
