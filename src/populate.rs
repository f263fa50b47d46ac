//! Random scene population.
//!
//! Runs once at startup: picks how many primitives to create, then builds each
//! one with a random shape, size, grid position, spin and material.

use std::ops::RangeInclusive;
use std::sync::Arc;

use glam::{IVec3, Vec3};
use log::{debug, info};
use rand::Rng;

use crate::core::{Entity, Material, Scene, Shape, Texture};

pub const MIN_OBJECTS: usize = 5;
pub const MAX_OBJECTS: usize = 30;

/// Percentage (out of 100) below which a cube is created instead of a pyramid.
pub const CUBE_THRESHOLD: f64 = 50.0;

pub const MIN_EDGE_LENGTH: f32 = 0.1;
pub const MAX_EDGE_LENGTH: f32 = 0.5;

pub const GRID_XZ: RangeInclusive<i32> = -10..=10;
pub const GRID_Y: RangeInclusive<i32> = -1..=1;

/// Upper (exclusive) bound of each axis' per-frame rotation increment.
pub const MAX_ROTATION_INCREMENT: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulateConfig {
    pub min_objects: usize,
    pub max_objects: usize,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            min_objects: MIN_OBJECTS,
            max_objects: MAX_OBJECTS,
        }
    }
}

/// Fills `scene` with a random number of primitives and returns how many were added.
pub fn populate<R: Rng + ?Sized>(
    scene: &mut Scene,
    rng: &mut R,
    config: &PopulateConfig,
    texture: &Arc<Texture>,
) -> usize {
    let count = rng.gen_range(config.min_objects..=config.max_objects);

    for i in 0..count {
        let shape = if rng.gen::<f64>() * 100.0 < CUBE_THRESHOLD {
            Shape::Cube
        } else {
            Shape::Pyramid
        };
        let entity = make_object(rng, shape, format!("{}-{}", shape, i), texture);
        debug!("Created {}", entity);
        scene.add_entity(entity);
    }

    let cubes = scene
        .entities
        .iter()
        .filter(|e| e.shape == Shape::Cube)
        .count();
    info!(
        "Populated scene with {} objects ({} cubes, {} pyramids)",
        count,
        cubes,
        scene.entities.len() - cubes
    );
    count
}

/// Builds one primitive of `shape` with random size, placement, spin and material.
pub fn make_object<R: Rng + ?Sized>(
    rng: &mut R,
    shape: Shape,
    name: String,
    texture: &Arc<Texture>,
) -> Entity {
    let size = rng.gen_range(MIN_EDGE_LENGTH..MAX_EDGE_LENGTH);
    let position = IVec3::new(
        rng.gen_range(GRID_XZ),
        rng.gen_range(GRID_Y),
        rng.gen_range(GRID_XZ),
    );
    let rotation_increment = Vec3::new(
        rng.gen_range(0.0..MAX_ROTATION_INCREMENT),
        rng.gen_range(0.0..MAX_ROTATION_INCREMENT),
        rng.gen_range(0.0..MAX_ROTATION_INCREMENT),
    );
    let material = Material::select(rng, shape.face_count(), texture);

    Entity::new(name, shape, size, position, rotation_increment, material)
}
