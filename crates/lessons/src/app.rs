use std::{path::PathBuf, sync::Arc};

use font::{BitmapFont, FontError};
use geometry::{Extent, Px};
use graphics::{AssetCache, Canvas, Color, GraphicsError, Texture, TextureConfig};
use thiserror::Error;

use crate::{save_data::SaveDataError, task::TaskError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Graphics(#[from] GraphicsError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error(transparent)]
    SaveData(#[from] SaveDataError),
}

#[derive(Clone, Debug)]
pub struct Config {
    /// The name the application logs under. Defaults to "Lesson".
    pub title: String,

    /// The size of the canvas frames are drawn to.
    ///
    /// Defaults to 640x480.
    pub screen_size: Extent<u32, Px>,

    /// The color every frame starts from. Defaults to white.
    pub clear_color: Color,

    /// The directory asset paths are resolved against. Defaults to `assets`.
    pub assets_root: PathBuf,

    /// Where `present` writes the finished frame as a PNG.
    ///
    /// Defaults to `None`, which discards frames once presented. Each
    /// presented frame overwrites the previous one.
    pub output: Option<PathBuf>,

    /// How loaded images become textures (color key, blending).
    pub texture: TextureConfig,
}

impl Config {
    /// Overrides the assets root and output path with the first and second
    /// positional arguments, when present.
    #[must_use]
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(root) = args.next() {
            self.assets_root = root.into();
        }

        if let Some(output) = args.next() {
            self.output = Some(output.into());
        }

        self
    }

    /// Default configuration with the process's command line applied.
    #[must_use]
    pub fn from_args(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
        .with_args(std::env::args().skip(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Lesson".to_owned(),
            screen_size: Extent::new(640, 480),
            clear_color: Color::WHITE,
            assets_root: PathBuf::from("assets"),
            output: None,
            texture: TextureConfig::default(),
        }
    }
}

/// Everything a lesson draws with: the frame canvas and the loaded assets.
pub struct App {
    config: Config,
    canvas: Canvas,
    assets: AssetCache,
    frames_presented: u64,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        tracing::info!(
            title = %config.title,
            width = config.screen_size.width,
            height = config.screen_size.height,
            assets = %config.assets_root.display(),
            "starting"
        );

        let mut canvas = Canvas::new(config.screen_size);
        canvas.set_draw_color(config.clear_color);
        canvas.clear();

        let assets = AssetCache::new(config.assets_root.clone(), config.texture);

        Self {
            config,
            canvas,
            assets,
            frames_presented: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn screen_size(&self) -> Extent<i32, Px> {
        Extent::new(
            self.config.screen_size.width as i32,
            self.config.screen_size.height as i32,
        )
    }

    #[must_use]
    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Loads (or reuses) the texture at `path`, relative to the assets root.
    pub fn load_texture(&self, path: &str) -> Result<Arc<Texture>, AppError> {
        Ok(self.assets.texture(path)?)
    }

    /// Loads a font sheet and scans it into a bitmap font.
    pub fn load_font(&self, path: &str) -> Result<BitmapFont, AppError> {
        let texture = self.load_texture(path)?;
        Ok(BitmapFont::build(texture)?)
    }

    /// Clears the canvas to the configured color and hands it out for
    /// drawing the next frame.
    pub fn begin_frame(&mut self) -> &mut Canvas {
        self.canvas.set_draw_color(self.config.clear_color);
        self.canvas.clear();
        &mut self.canvas
    }

    /// Finishes the current frame, writing it out if an output path is set.
    pub fn present(&mut self) -> Result<(), AppError> {
        if let Some(output) = &self.config.output {
            self.canvas.save_png(output)?;
        }

        self.frames_presented += 1;
        tracing::trace!(frame = self.frames_presented, "presented");
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        tracing::info!(
            title = %self.config.title,
            frames = self.frames_presented,
            textures = self.assets.len(),
            "shutting down"
        );
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("frames_presented", &self.frames_presented)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use graphics::{save_png, PixelBuffer};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lessons-app-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(root: &Path) -> Config {
        Config {
            screen_size: Extent::new(32, 32),
            assets_root: root.to_owned(),
            ..Config::default()
        }
    }

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.screen_size, Extent::new(640, 480));
        assert_eq!(config.clear_color, Color::WHITE);
        assert_eq!(config.assets_root, PathBuf::from("assets"));
        assert!(config.output.is_none());
    }

    #[test]
    fn args_override_paths() {
        let args = ["media", "out.png"].map(str::to_owned);
        let config = Config::default().with_args(args.into_iter());
        assert_eq!(config.assets_root, PathBuf::from("media"));
        assert_eq!(config.output, Some(PathBuf::from("out.png")));

        let config = Config::default().with_args(std::iter::empty());
        assert_eq!(config.assets_root, PathBuf::from("assets"));
    }

    #[test]
    fn frames_start_cleared() {
        let mut app = App::new(config(Path::new(".")));
        let white = Color::WHITE.to_rgba8888();
        assert_eq!(app.canvas().pixels().pixel32(5, 5), white);

        let canvas = app.begin_frame();
        canvas.set_draw_color(Color::RED);
        canvas.fill_rect(geometry::PixelRect::from_xywh(0, 0, 10, 10));
        assert_ne!(app.canvas().pixels().pixel32(5, 5), white);

        app.present().unwrap();
        app.begin_frame();
        assert_eq!(app.canvas().pixels().pixel32(5, 5), white);
        assert_eq!(app.frames_presented(), 1);
    }

    #[test]
    fn present_writes_output() {
        let dir = scratch_dir("present");
        let output = dir.join("frame.png");
        let mut app = App::new(Config {
            output: Some(output.clone()),
            ..config(&dir)
        });

        app.present().unwrap();

        let written = graphics::load_png(&output).unwrap();
        assert_eq!(written.width(), 32);
        assert_eq!(written.height(), 32);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn textures_are_shared() {
        let dir = scratch_dir("textures");
        save_png(&PixelBuffer::filled(4, 4, Color::CYAN), dir.join("key.png")).unwrap();
        let app = App::new(config(&dir));

        let first = app.load_texture("key.png").unwrap();
        let second = app.load_texture("key.png").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        // The cyan color key becomes transparent.
        assert_eq!(first.lock().unwrap().pixel32(0, 0), 0x00FF_FF00);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_assets() {
        let app = App::new(config(Path::new("does-not-exist")));

        assert!(matches!(
            app.load_texture("nothing.png"),
            Err(AppError::Graphics(GraphicsError::Io { .. }))
        ));
        assert!(matches!(
            app.load_font("nothing.png"),
            Err(AppError::Graphics(_))
        ));
    }
}
