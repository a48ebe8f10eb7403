use lessons::{logging, App, AppError, Config, Dot, Key, KeyEvent};

/// Key events to deliver before the given frame is drawn.
const SCRIPT: &[(u64, KeyEvent)] = &[
    (0, KeyEvent::pressed(Key::Right)),
    (0, KeyEvent::pressed(Key::Down)),
    (1, KeyEvent::repeated(Key::Right, 1)),
    (200, KeyEvent::released(Key::Down)),
    (320, KeyEvent::released(Key::Right)),
    (320, KeyEvent::pressed(Key::Down)),
    (500, KeyEvent::pressed(Key::Escape)),
];

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Collision Detection"));
    let texture = app.load_texture("dot.png")?;

    let screen = app.screen_size();
    let mut dot = Dot::new(0, 0);
    let other = Dot::new(screen.width / 4, screen.height / 4);

    'frames: for frame in 0.. {
        for (_, event) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            if event.key == Key::Escape {
                break 'frames;
            }
            dot.handle_key(*event);
        }

        dot.move_by(screen, other.colliders());

        let canvas = app.begin_frame();
        dot.render(canvas, &texture)?;
        other.render(canvas, &texture)?;
        app.present()?;
    }

    tracing::info!(
        x = dot.position().x,
        y = dot.position().y,
        "dot came to rest"
    );

    Ok(())
}
