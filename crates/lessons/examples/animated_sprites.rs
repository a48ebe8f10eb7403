use geometry::{Extent, Point};
use graphics::Flip;
use lessons::{logging, Animation, App, AppError, Config, FRAMES_PER_STEP};

const FRAMES: u64 = 160;

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Animated Sprites"));
    let sheet = app.load_texture("foo.png")?;
    let screen = app.screen_size();

    let mut walk = Animation::strip(Extent::new(64, 205), 4, FRAMES_PER_STEP);

    for _ in 0..FRAMES {
        let clip = *walk.current();
        let at = Point::new(
            (screen.width - clip.width()) / 2,
            (screen.height - clip.height()) / 2,
        );

        let canvas = app.begin_frame();
        canvas.copy(&sheet, at, Some(clip), Flip::empty())?;
        app.present()?;

        walk.advance();
    }

    tracing::info!(step = walk.step(), "walk cycle stopped");
    Ok(())
}
