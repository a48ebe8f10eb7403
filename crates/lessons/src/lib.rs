//! Small interactive lessons built on the `graphics` and `font` crates.
//!
//! There are no globals here. An [`App`] owns the frame canvas and the asset
//! cache, and each lesson drives it from its own loop:
//!
//! ```no_run
//! use lessons::{App, Config};
//!
//! let mut app = App::new(Config::from_args("Example"));
//! let font = app.load_font("lazyfont.png")?;
//! let canvas = app.begin_frame();
//! font.render_text(canvas, geometry::Point::new(0, 0), "Hello")?;
//! app.present()?;
//! # Ok::<(), lessons::AppError>(())
//! ```
//!
//! Frames are rendered in software and can be written out as PNG files, so
//! the lessons run without a window.

mod animation;
mod app;
pub mod camera;
mod dot;
mod input;
pub mod logging;
mod particle;
mod save_data;
mod task;
mod timer;

pub use animation::{Animation, FRAMES_PER_STEP};
pub use app::{App, AppError, Config};
pub use dot::{Colliders, Dot, DOT_HEIGHT, DOT_VELOCITY, DOT_WIDTH};
pub use input::{ButtonState, Key, KeyEvent};
pub use particle::{Emitter, Particle, ParticleTextures, Tint, PARTICLE_LIFETIME, TOTAL_PARTICLES};
pub use save_data::{SaveData, SaveDataError, TOTAL_DATA};
pub use task::{Task, TaskError};
pub use timer::{average_fps, FrameCounter, Timer, MAX_PLAUSIBLE_FPS};
