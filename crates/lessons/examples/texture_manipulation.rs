use std::sync::Arc;

use geometry::Point;
use graphics::{load_png, Color, Flip, Texture};
use lessons::{logging, App, AppError, Config};

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Texture Manipulation"));
    let pixels = load_png(app.config().assets_root.join("foo.png"))?;
    let foo = Arc::new(Texture::from_buffer(pixels));

    // Key out cyan by hand through the lock, as transparent white.
    {
        let mut lock = foo.lock()?;
        let key = Color::CYAN.to_rgba8888();
        let transparent = Color::rgba8(0xFF, 0xFF, 0xFF, 0x00).to_rgba8888();
        let mut keyed = 0;

        for y in 0..foo.height() {
            for x in 0..foo.width() {
                if lock.pixel32(x, y) == key {
                    lock.set_pixel32(x, y, transparent);
                    keyed += 1;
                }
            }
        }

        tracing::info!(keyed, "removed the background");
    }

    let screen = app.screen_size();
    let at = Point::new(
        (screen.width - foo.bounds().width()) / 2,
        (screen.height - foo.bounds().height()) / 2,
    );

    let canvas = app.begin_frame();
    canvas.copy(&foo, at, None, Flip::empty())?;
    app.present()
}
