use geometry::Point;
use graphics::{load_png, Flip, PixelBuffer, Texture};
use lessons::{logging, Animation, App, AppError, Config, FRAMES_PER_STEP};

const FRAMES: u64 = 160;

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Texture Streaming"));
    let root = app.config().assets_root.clone();

    let frames = (0..4)
        .map(|i| load_png(root.join(format!("foo_walk_{i}.png"))))
        .collect::<Result<Vec<_>, _>>()?;
    let (width, height) = (frames[0].width(), frames[0].height());
    let mut stream = Animation::new(frames, FRAMES_PER_STEP);

    let streaming = Texture::from_buffer(PixelBuffer::new(width, height));
    let screen = app.screen_size();

    for _ in 0..FRAMES {
        streaming.lock()?.copy_from(stream.current().as_ref())?;
        stream.advance();

        let at = Point::new(
            (screen.width - streaming.bounds().width()) / 2,
            (screen.height - streaming.bounds().height()) / 2,
        );

        let canvas = app.begin_frame();
        canvas.copy(&streaming, at, None, Flip::empty())?;
        app.present()?;
    }

    Ok(())
}
