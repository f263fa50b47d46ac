use crate::core::{Camera, Entity, Light};

/// Everything that gets drawn: the objects, the single active light and the camera.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub entities: Vec<Entity>,
    light: Option<Light>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            entities: Vec::new(),
            light: Some(Light::default()),
        }
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Advance every object by its own rotation increment.
    pub fn spin_all(&mut self) {
        for entity in &mut self.entities {
            entity.spin();
        }
    }

    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    /// Removes the active light (and its target, if any) from the scene.
    pub fn take_light(&mut self) -> Option<Light> {
        self.light.take()
    }

    /// Installs `light`, returning whatever it replaced.
    pub fn set_light(&mut self, light: Light) -> Option<Light> {
        self.light.replace(light)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}
