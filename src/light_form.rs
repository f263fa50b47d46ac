//! The light form: field values the user edits, and what happens on submit.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use glam::Vec3;
use thiserror::Error;

use crate::core::{Color, Light, Scene};

/// Intensity scalar every submitted light gets.
pub const SUBMITTED_INTENSITY: f32 = 2.0;
/// Where a submitted sun sits; the direction fields only move its target.
pub const SUN_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

#[derive(Debug, Error, PartialEq)]
pub enum LightFormError {
    #[error("unknown light type '{0}' (expected 'ambient' or 'sun')")]
    UnknownType(String),
    #[error("{field} must be an integer between 0 and 255, got '{value}'")]
    InvalidChannel { field: &'static str, value: String },
    #[error("{field} must be a finite number, got '{value}'")]
    InvalidDirection { field: &'static str, value: String },
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("expected field=value, 'submit', 'reset' or 'show', got '{0}'")]
    Malformed(String),
}

/// A submission that did not produce a light.
///
/// The light removed at the start of the submission is handed back rather
/// than restored, so the scene stays unlit unless the caller reinstalls it.
#[derive(Debug, Error)]
#[error("light not replaced: {reason}")]
pub struct Rejected {
    pub previous: Option<Light>,
    #[source]
    pub reason: LightFormError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    Ambient,
    Sun,
}

impl FromStr for LightType {
    type Err = LightFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ambient" => Ok(LightType::Ambient),
            "sun" => Ok(LightType::Sun),
            other => Err(LightFormError::UnknownType(other.to_string())),
        }
    }
}

/// Raw form fields, kept as the text the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct LightForm {
    pub light_type: String,
    pub direction_x: String,
    pub direction_y: String,
    pub direction_z: String,
    pub intensity_r: String,
    pub intensity_g: String,
    pub intensity_b: String,
}

impl Default for LightForm {
    fn default() -> Self {
        Self {
            light_type: "ambient".to_string(),
            direction_x: "0".to_string(),
            direction_y: "0".to_string(),
            direction_z: "0".to_string(),
            intensity_r: "255".to_string(),
            intensity_g: "255".to_string(),
            intensity_b: "255".to_string(),
        }
    }
}

impl Display for LightForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lightType={} directionX={} directionY={} directionZ={} intensityR={} intensityG={} intensityB={}",
            self.light_type,
            self.direction_x,
            self.direction_y,
            self.direction_z,
            self.intensity_r,
            self.intensity_g,
            self.intensity_b
        )
    }
}

impl LightForm {
    pub const FIELDS: [&'static str; 7] = [
        "lightType",
        "directionX",
        "directionY",
        "directionZ",
        "intensityR",
        "intensityG",
        "intensityB",
    ];

    /// Sets a field by its form identifier.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), LightFormError> {
        let slot = match field {
            "lightType" => &mut self.light_type,
            "directionX" => &mut self.direction_x,
            "directionY" => &mut self.direction_y,
            "directionZ" => &mut self.direction_z,
            "intensityR" => &mut self.intensity_r,
            "intensityG" => &mut self.intensity_g,
            "intensityB" => &mut self.intensity_b,
            other => return Err(LightFormError::UnknownField(other.to_string())),
        };
        *slot = value.trim().to_string();
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The intensity channels as "rrggbb".
    pub fn color_hex(&self) -> Result<String, LightFormError> {
        Ok(format!(
            "{}{}{}",
            to_hex("intensityR", &self.intensity_r)?,
            to_hex("intensityG", &self.intensity_g)?,
            to_hex("intensityB", &self.intensity_b)?
        ))
    }

    pub fn color(&self) -> Result<Color, LightFormError> {
        Ok(Color::from_rgb8(
            parse_channel("intensityR", &self.intensity_r)?,
            parse_channel("intensityG", &self.intensity_g)?,
            parse_channel("intensityB", &self.intensity_b)?,
        ))
    }

    pub fn direction(&self) -> Result<Vec3, LightFormError> {
        Ok(Vec3::new(
            parse_direction("directionX", &self.direction_x)?,
            parse_direction("directionY", &self.direction_y)?,
            parse_direction("directionZ", &self.direction_z)?,
        ))
    }

    /// Builds the light these fields describe, without touching any scene.
    pub fn to_light(&self) -> Result<Light, LightFormError> {
        let light_type: LightType = self.light_type.parse()?;
        let color = self.color()?;

        Ok(match light_type {
            LightType::Ambient => Light::ambient(color, SUBMITTED_INTENSITY),
            LightType::Sun => {
                Light::directional(color, SUBMITTED_INTENSITY, SUN_POSITION, self.direction()?)
            }
        })
    }

    /// Handles a form submission against `scene`.
    ///
    /// The current light is removed first. On success the new light is
    /// installed and the replaced one returned; on failure the scene is left
    /// without a light and the removed one comes back inside [`Rejected`].
    /// The form is reset either way.
    pub fn submit(&mut self, scene: &mut Scene) -> Result<Option<Light>, Rejected> {
        let previous = scene.take_light();
        let built = self.to_light();
        self.reset();

        match built {
            Ok(light) => {
                scene.set_light(light);
                Ok(previous)
            }
            Err(reason) => Err(Rejected { previous, reason }),
        }
    }
}

/// Two lowercase hex digits for an 8 bit channel given as text.
pub fn to_hex(field: &'static str, value: &str) -> Result<String, LightFormError> {
    Ok(format!("{:02x}", parse_channel(field, value)?))
}

fn parse_channel(field: &'static str, value: &str) -> Result<u8, LightFormError> {
    value
        .trim()
        .parse()
        .map_err(|_| LightFormError::InvalidChannel {
            field,
            value: value.to_string(),
        })
}

fn parse_direction(field: &'static str, value: &str) -> Result<f32, LightFormError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LightFormError::InvalidDirection {
            field,
            value: value.to_string(),
        })
}

/// One line typed into the form console.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    Set { field: String, value: String },
    Submit,
    Reset,
    Show,
}

impl FormCommand {
    /// Parses a whitespace separated line such as
    /// `lightType=sun directionX=1 intensityR=255 submit`.
    pub fn parse_line(line: &str) -> Result<Vec<FormCommand>, LightFormError> {
        line.split_whitespace()
            .map(|token| match token {
                "submit" => Ok(FormCommand::Submit),
                "reset" => Ok(FormCommand::Reset),
                "show" => Ok(FormCommand::Show),
                _ => match token.split_once('=') {
                    Some((field, value)) if !field.is_empty() => Ok(FormCommand::Set {
                        field: field.to_string(),
                        value: value.to_string(),
                    }),
                    _ => Err(LightFormError::Malformed(token.to_string())),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> LightForm {
        let mut form = LightForm::default();
        for (k, v) in pairs {
            form.set(k, v).unwrap();
        }
        form
    }

    #[test]
    fn to_hex_zero_pads() {
        assert_eq!(to_hex("intensityR", "0").unwrap(), "00");
        assert_eq!(to_hex("intensityR", "10").unwrap(), "0a");
        assert_eq!(to_hex("intensityR", "255").unwrap(), "ff");
    }

    #[test]
    fn to_hex_rejects_out_of_range_and_garbage() {
        for bad in ["256", "-1", "abc", "", "1.5"] {
            assert!(matches!(
                to_hex("intensityG", bad),
                Err(LightFormError::InvalidChannel { field: "intensityG", .. })
            ));
        }
    }

    #[test]
    fn ambient_submission_replaces_light() {
        let mut scene = Scene::default();
        let mut f = form(&[
            ("lightType", "ambient"),
            ("intensityR", "255"),
            ("intensityG", "0"),
            ("intensityB", "0"),
        ]);
        assert_eq!(f.color_hex().unwrap(), "ff0000");

        let replaced = f.submit(&mut scene).unwrap();
        assert_eq!(replaced, Some(Light::ambient(Color::WHITE, 1.0)));
        assert_eq!(
            scene.light(),
            Some(&Light::ambient(Color::RED, SUBMITTED_INTENSITY))
        );
    }

    #[test]
    fn sun_submission_aims_at_direction_fields() {
        let mut scene = Scene::default();
        let mut f = form(&[
            ("lightType", "sun"),
            ("directionX", "1"),
            ("directionY", "-2.5"),
            ("directionZ", "0"),
            ("intensityR", "0"),
            ("intensityG", "128"),
            ("intensityB", "255"),
        ]);
        f.submit(&mut scene).unwrap();
        match scene.light() {
            Some(Light::Directional {
                color,
                intensity,
                position,
                target,
            }) => {
                assert_eq!(color.to_hex(), "0080ff");
                assert_eq!(*intensity, 2.0);
                assert_eq!(*position, Vec3::new(5.0, 5.0, 5.0));
                assert_eq!(*target, Vec3::new(1.0, -2.5, 0.0));
            }
            other => panic!("expected a directional light, got {:?}", other),
        }
    }

    #[test]
    fn unknown_type_leaves_scene_without_light() {
        let mut scene = Scene::default();
        let before = scene.light().cloned();
        let mut f = form(&[("lightType", "spot")]);

        let rejected = f.submit(&mut scene).unwrap_err();
        assert_eq!(
            rejected.reason,
            LightFormError::UnknownType("spot".to_string())
        );
        assert!(scene.light().is_none());
        assert_eq!(rejected.previous, before);
    }

    #[test]
    fn replacing_a_sun_drops_its_target() {
        let mut scene = Scene::default();
        form(&[("lightType", "sun"), ("directionY", "1")])
            .submit(&mut scene)
            .unwrap();
        assert!(scene.light().and_then(Light::target).is_some());

        form(&[("lightType", "ambient")]).submit(&mut scene).unwrap();
        assert!(scene.light().and_then(Light::target).is_none());
    }

    #[test]
    fn invalid_numbers_are_rejected_after_removal() {
        let mut scene = Scene::default();
        let err = form(&[("intensityB", "300")]).submit(&mut scene).unwrap_err();
        assert!(matches!(err.reason, LightFormError::InvalidChannel { .. }));
        assert!(scene.light().is_none());

        let mut scene = Scene::default();
        let err = form(&[("lightType", "sun"), ("directionZ", "NaN")])
            .submit(&mut scene)
            .unwrap_err();
        assert!(matches!(err.reason, LightFormError::InvalidDirection { .. }));
    }

    #[test]
    fn ambient_ignores_malformed_direction() {
        let mut scene = Scene::default();
        form(&[("lightType", "ambient"), ("directionX", "left")])
            .submit(&mut scene)
            .unwrap();
        assert!(matches!(scene.light(), Some(Light::Ambient { .. })));
    }

    #[test]
    fn form_resets_after_submit_either_way() {
        let mut scene = Scene::default();
        let mut f = form(&[("lightType", "sun"), ("intensityR", "3")]);
        f.submit(&mut scene).unwrap();
        assert_eq!(f, LightForm::default());

        let mut f = form(&[("lightType", "nope")]);
        let _ = f.submit(&mut scene);
        assert_eq!(f, LightForm::default());
    }

    #[test]
    fn unknown_field_is_an_error() {
        let mut f = LightForm::default();
        assert_eq!(
            f.set("colour", "red"),
            Err(LightFormError::UnknownField("colour".to_string()))
        );
    }

    #[test]
    fn bad_channel_names_the_offending_field() {
        let f = form(&[("intensityG", "300")]);
        assert_eq!(
            f.to_light(),
            Err(LightFormError::InvalidChannel {
                field: "intensityG",
                value: "300".to_string()
            })
        );
        assert_eq!(
            form(&[("intensityR", "12"), ("intensityG", "0")]).color(),
            Ok(Color::from_rgb8(12, 0, 255))
        );
    }

    #[test]
    fn parse_console_line() {
        let cmds = FormCommand::parse_line("  lightType=sun intensityR=12  submit ").unwrap();
        assert_eq!(
            cmds,
            vec![
                FormCommand::Set {
                    field: "lightType".to_string(),
                    value: "sun".to_string()
                },
                FormCommand::Set {
                    field: "intensityR".to_string(),
                    value: "12".to_string()
                },
                FormCommand::Submit,
            ]
        );
        assert!(FormCommand::parse_line("").unwrap().is_empty());
        assert!(FormCommand::parse_line("lightType").is_err());
        assert!(FormCommand::parse_line("=sun").is_err());
    }

    #[test]
    fn display_lists_every_field() {
        let shown = LightForm::default().to_string();
        for field in LightForm::FIELDS {
            assert!(shown.contains(field), "{} missing from {}", field, shown);
        }
    }
}
