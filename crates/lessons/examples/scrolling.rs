use geometry::{Extent, Point};
use graphics::Flip;
use lessons::{
    camera::{self, LEVEL_HEIGHT, LEVEL_WIDTH},
    logging, App, AppError, Config, Dot, Key, KeyEvent,
};

const DOT_SPEED: i32 = 10;

/// Key events to deliver before the given frame is drawn.
const SCRIPT: &[(u64, KeyEvent)] = &[
    (0, KeyEvent::pressed(Key::Right)),
    (0, KeyEvent::pressed(Key::Down)),
    (90, KeyEvent::released(Key::Down)),
    (140, KeyEvent::released(Key::Right)),
    (140, KeyEvent::pressed(Key::Left)),
    (200, KeyEvent::pressed(Key::Escape)),
];

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Scrolling"));
    let dot_texture = app.load_texture("dot.png")?;
    let background = app.load_texture("bg.png")?;

    let level = Extent::new(LEVEL_WIDTH, LEVEL_HEIGHT);
    let mut dot = Dot::with_speed(0, 0, DOT_SPEED);

    'frames: for frame in 0.. {
        for (_, event) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            if event.key == Key::Escape {
                break 'frames;
            }
            dot.handle_key(*event);
        }

        dot.move_by(level, &[]);
        let view = camera::follow(dot.center(), app.screen_size(), level);

        let canvas = app.begin_frame();
        canvas.copy(&background, Point::zero(), Some(view), Flip::empty())?;
        dot.render_from(canvas, &dot_texture, view.top_left())?;
        app.present()?;
    }

    tracing::info!(
        x = dot.position().x,
        y = dot.position().y,
        "dot came to rest"
    );

    Ok(())
}
