//! Application state and the frame loop.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use minifb::{Key, Scale, Window, WindowOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::config::{ConfigError, ViewerConfig};
use crate::console::FormConsole;
use crate::core::{Camera, Scene, Texture};
use crate::input::{InputController, WindowInput};
use crate::light_form::{FormCommand, LightForm};
use crate::pipeline::Pipeline;
use crate::populate::populate;
use crate::Metrics;

pub const WINDOW_TITLE: &str = "Scene Viewer";

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not start logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Everything the running viewer owns. Only the UI thread touches it.
pub struct Viewer {
    config: ViewerConfig,
    scene: Scene,
    input: InputController,
    form: LightForm,
    pipeline: Pipeline,
    metrics: Metrics,
}

impl Viewer {
    /// Loads the shared texture and populates a fresh scene.
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => {
                info!("Using scene seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        let texture = Arc::new(Texture::load_or_placeholder(&config.texture));

        let aspect = config.width as f32 / config.height as f32;
        let camera = Camera::new(Camera::START_POSITION, aspect).with_far(config.far);
        let mut scene = Scene::new(camera);
        populate(&mut scene, &mut rng, &config.populate, &texture);

        Ok(Self {
            pipeline: Pipeline::new(config.width, config.height),
            config,
            scene,
            input: InputController::new(),
            form: LightForm::default(),
            metrics: Metrics::new(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn form(&self) -> &LightForm {
        &self.form
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// One frame: spin every object, then draw.
    pub fn tick(&mut self) {
        self.scene.spin_all();
        self.pipeline.render_frame(&self.scene);
    }

    /// Applies one console line to the light form.
    pub fn apply_form_line(&mut self, line: &str) {
        match FormCommand::parse_line(line) {
            Ok(commands) => {
                for command in commands {
                    self.apply_form_command(command);
                }
            }
            Err(e) => warn!("Ignoring form input: {}", e),
        }
    }

    fn apply_form_command(&mut self, command: FormCommand) {
        match command {
            FormCommand::Set { field, value } => {
                if let Err(e) = self.form.set(&field, &value) {
                    warn!("{}", e);
                }
            }
            FormCommand::Submit => match self.form.submit(&mut self.scene) {
                Ok(previous) => {
                    let old = previous.map_or("none".to_string(), |l| l.to_string());
                    if let Some(light) = self.scene.light() {
                        info!("Light changed from {} to {}", old, light);
                    }
                }
                Err(rejected) => warn!("{}; the scene is now unlit", rejected),
            },
            FormCommand::Reset => {
                self.form.reset();
                info!("Form reset: {}", self.form);
            }
            FormCommand::Show => match self.form.color_hex() {
                Ok(hex) => info!("{} (color #{})", self.form, hex),
                Err(e) => info!("{} ({})", self.form, e),
            },
        }
    }

    /// Opens the window and runs until it is closed or Escape is pressed.
    pub fn run(mut self) -> Result<(), ViewerError> {
        let mut window = Window::new(
            WINDOW_TITLE,
            self.config.width,
            self.config.height,
            WindowOptions {
                resize: false,
                scale: Scale::X1,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(self.config.fps);

        let mut window_input = WindowInput::new();
        let mut console = FormConsole::spawn();
        info!(
            "Light form ready on stdin, e.g. 'lightType=sun directionX=1 intensityG=0 submit'. Fields: {}",
            LightForm::FIELDS.join(", ")
        );

        let mut last_frame = Instant::now();
        while window.is_open() && !window.is_key_down(Key::Escape) {
            for event in window_input.poll(&window) {
                self.input.handle(event, &mut self.scene.camera);
            }
            if !console.is_closed() {
                for line in console.drain() {
                    self.apply_form_line(&line);
                }
            }

            self.tick();
            self.pipeline.present(&mut window)?;

            let now = Instant::now();
            if self.metrics.update(now - last_frame) {
                let camera = &self.scene.camera;
                debug!(
                    "{} | camera at {} facing {}",
                    self.metrics,
                    camera.position,
                    camera.forward()
                );
                window.set_title(&format!("{} | {}", WINDOW_TITLE, self.metrics));
            }
            last_frame = now;
        }

        info!("Window closed after {} frames", self.metrics.total_frames);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Light};
    use crate::populate::PopulateConfig;
    use std::path::PathBuf;

    fn config(seed: u64) -> ViewerConfig {
        ViewerConfig {
            width: 64,
            height: 48,
            populate: PopulateConfig {
                min_objects: 5,
                max_objects: 30,
            },
            seed: Some(seed),
            texture: PathBuf::from("does/not/exist.png"),
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn new_populates_within_bounds_with_initial_light() {
        let viewer = Viewer::new(config(3)).unwrap();
        let n = viewer.scene().entities.len();
        assert!((5..=30).contains(&n));
        assert_eq!(viewer.scene().light(), Some(&Light::ambient(Color::WHITE, 1.0)));
        assert_eq!(viewer.scene().camera.position, Camera::START_POSITION);
        assert_eq!(viewer.scene().camera.far, Camera::DEFAULT_FAR);
    }

    #[test]
    fn inverted_object_range_is_an_error_not_a_panic() {
        let mut cfg = config(2);
        cfg.populate = PopulateConfig {
            min_objects: 9,
            max_objects: 3,
        };
        assert!(matches!(
            Viewer::new(cfg),
            Err(ViewerError::Config(ConfigError::InvalidObjectRange { min: 9, max: 3 }))
        ));
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let mut cfg = config(2);
        cfg.height = 0;
        assert!(matches!(
            Viewer::new(cfg),
            Err(ViewerError::Config(ConfigError::ZeroWindowSize { .. }))
        ));
    }

    #[test]
    fn same_seed_same_scene() {
        let a = Viewer::new(config(11)).unwrap();
        let b = Viewer::new(config(11)).unwrap();
        let describe = |v: &Viewer| {
            v.scene()
                .entities
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(describe(&a), describe(&b));
    }

    #[test]
    fn ticks_accumulate_each_objects_own_increment() {
        let mut viewer = Viewer::new(config(5)).unwrap();
        let k = 10;
        for _ in 0..k {
            viewer.tick();
        }
        for entity in &viewer.scene().entities {
            let expected = entity.rotation_increment * k as f32;
            assert!(
                (entity.rotation - expected).abs().max_element() < 1e-5,
                "{} rotated to {}, expected {}",
                entity.name,
                entity.rotation,
                expected
            );
        }
        assert_eq!(viewer.pipeline().buffer().data.len(), 64 * 48);
    }

    #[test]
    fn ambient_red_submission_from_console() {
        let mut viewer = Viewer::new(config(1)).unwrap();
        viewer.apply_form_line("lightType=ambient intensityR=255 intensityG=0 intensityB=0 submit");
        assert_eq!(
            viewer.scene().light(),
            Some(&Light::ambient(Color::RED, 2.0))
        );
        assert_eq!(viewer.form(), &LightForm::default());
    }

    #[test]
    fn fields_carry_over_between_lines() {
        let mut viewer = Viewer::new(config(1)).unwrap();
        viewer.apply_form_line("lightType=sun directionY=-1");
        viewer.apply_form_line("intensityB=0");
        viewer.apply_form_line("submit");
        assert_eq!(
            viewer.scene().light().and_then(Light::target),
            Some(glam::Vec3::new(0.0, -1.0, 0.0))
        );
    }

    #[test]
    fn unknown_type_leaves_the_scene_unlit() {
        let mut viewer = Viewer::new(config(1)).unwrap();
        viewer.apply_form_line("lightType=spot submit");
        assert!(viewer.scene().light().is_none());
    }

    #[test]
    fn malformed_line_leaves_form_untouched() {
        let mut viewer = Viewer::new(config(1)).unwrap();
        viewer.apply_form_line("lightType=sun bogus");
        assert_eq!(viewer.form(), &LightForm::default());
        viewer.apply_form_line("colour=red");
        assert_eq!(viewer.form(), &LightForm::default());
    }
}
