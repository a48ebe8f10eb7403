use std::time::Duration;

use geometry::Point;
use graphics::Flip;
use lessons::{logging, App, AppError, Config, Task};

const FRAMES: u64 = 120;

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Multithreading"));
    let splash = app.load_texture("splash.png")?;

    let data = 101;
    let task = Task::spawn("LazyThread", move || {
        tracing::info!("running thread with value = {data}");
        data
    })?;

    let mut reported = false;
    for _ in 0..FRAMES {
        if !reported && task.wait_timeout(Duration::ZERO) {
            tracing::info!(task = task.name(), frame = app.frames_presented(), "task finished");
            reported = true;
        }

        let canvas = app.begin_frame();
        canvas.copy(&splash, Point::new(0, 0), None, Flip::empty())?;
        app.present()?;
    }

    let value = task.join()?;
    tracing::info!(value, "joined worker");

    Ok(())
}
