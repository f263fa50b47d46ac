use std::fmt::{Display, Formatter};

use crate::core::Color;
use glam::Vec3;

/// Light color used before the user submits anything.
pub const INITIAL_LIGHT_COLOR: Color = Color::WHITE;

/// The two kinds of lights the viewer supports.
#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    /// Lights every surface equally, regardless of orientation.
    Ambient {
        /// The light’s color.
        color: Color,
        /// A scalar multiplier for the light’s strength.
        intensity: f32,
    },
    /// A distant source shining from `position` towards `target`.
    Directional {
        /// The light’s color.
        color: Color,
        /// A scalar multiplier for the light’s strength.
        intensity: f32,
        /// Where the light sits in world space.
        position: Vec3,
        /// The point the light is aimed at. Owned by the light, so it leaves
        /// the scene together with it.
        target: Vec3,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    pub fn directional(color: Color, intensity: f32, position: Vec3, target: Vec3) -> Self {
        Light::Directional {
            color,
            intensity,
            position,
            target,
        }
    }

    pub fn target(&self) -> Option<Vec3> {
        match self {
            Light::Ambient { .. } => None,
            Light::Directional { target, .. } => Some(*target),
        }
    }

    /// Unit vector from a lit surface back towards the light, if directional.
    pub fn to_light(&self) -> Option<Vec3> {
        match self {
            Light::Ambient { .. } => None,
            Light::Directional {
                position, target, ..
            } => Some((*position - *target).normalize_or_zero()),
        }
    }

    /// Incoming light reaching a surface with world-space `normal` (Lambert).
    ///
    /// The result is multiplied with the surface color; it is not clamped, so
    /// intensities above one brighten the surface until the final clamp.
    pub fn irradiance(&self, normal: Vec3) -> Color {
        match self {
            Light::Ambient { color, intensity } => color.scale(*intensity),
            Light::Directional {
                color, intensity, ..
            } => {
                let to_light = self.to_light().unwrap_or(Vec3::ZERO);
                let diffuse = normal.dot(to_light).max(0.0);
                color.scale(intensity * diffuse)
            }
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Light::ambient(INITIAL_LIGHT_COLOR, 1.0)
    }
}

impl Display for Light {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Light::Ambient { color, intensity } => {
                write!(f, "ambient #{} x{}", color.to_hex(), intensity)
            }
            Light::Directional {
                color,
                intensity,
                position,
                target,
            } => write!(
                f,
                "sun #{} x{} from {} towards {}",
                color.to_hex(),
                intensity,
                position,
                target
            ),
        }
    }
}
