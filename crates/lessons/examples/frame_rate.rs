use geometry::Point;
use lessons::{logging, App, AppError, Config, FrameCounter};

const FRAMES: u64 = 600;

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Calculating Frame Rate"));
    let font = app.load_font("lazyfont.png")?;
    let screen = app.screen_size();

    let mut counter = FrameCounter::new();

    while counter.frames() < FRAMES {
        let text = format!("Average Frames Per Second {}", counter.average_fps());

        let extent = font.measure(&text)?;
        let at = Point::new(
            (screen.width - extent.width) / 2,
            (screen.height - extent.height) / 2,
        );

        let canvas = app.begin_frame();
        font.render_text(canvas, at, &text)?;
        app.present()?;
        counter.tick();
    }

    tracing::info!(
        frames = counter.frames(),
        ms = counter.timer().ticks(),
        fps = counter.average_fps(),
        "done"
    );

    Ok(())
}
