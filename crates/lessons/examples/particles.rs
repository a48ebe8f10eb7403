use lessons::{
    logging, App, AppError, Config, Dot, Emitter, Key, KeyEvent, ParticleTextures,
};

const DOT_SPEED: i32 = 10;
const PARTICLE_ALPHA: u8 = 192;

/// Key events to deliver before the given frame is drawn.
const SCRIPT: &[(u64, KeyEvent)] = &[
    (0, KeyEvent::pressed(Key::Right)),
    (30, KeyEvent::pressed(Key::Down)),
    (60, KeyEvent::released(Key::Right)),
    (80, KeyEvent::released(Key::Down)),
    (120, KeyEvent::pressed(Key::Escape)),
];

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Particle Engines"));
    let dot_texture = app.load_texture("dot.png")?;
    let textures = ParticleTextures {
        red: app.load_texture("red.png")?,
        green: app.load_texture("green.png")?,
        blue: app.load_texture("blue.png")?,
        shimmer: app.load_texture("shimmer.png")?,
    };

    for texture in [&textures.red, &textures.green, &textures.blue, &textures.shimmer] {
        texture.set_alpha(PARTICLE_ALPHA);
    }

    let screen = app.screen_size();
    let mut dot = Dot::with_speed(0, 0, DOT_SPEED);
    let mut emitter = Emitter::new(dot.position(), 0x5EED);

    'frames: for frame in 0.. {
        for (_, event) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            if event.key == Key::Escape {
                break 'frames;
            }
            dot.handle_key(*event);
        }

        dot.move_by(screen, &[]);

        let canvas = app.begin_frame();
        dot.render(canvas, &dot_texture)?;
        emitter.render(dot.position(), canvas, &textures)?;
        app.present()?;
    }

    Ok(())
}
