use geometry::Point;
use graphics::Color;
use lessons::{logging, App, AppError, Config, Key, KeyEvent, SaveData};

/// Key events to deliver, one per frame.
const SCRIPT: &[KeyEvent] = &[
    KeyEvent::pressed(Key::Right),
    KeyEvent::repeated(Key::Right, 1),
    KeyEvent::released(Key::Right),
    KeyEvent::pressed(Key::Down),
    KeyEvent::pressed(Key::Left),
    KeyEvent::pressed(Key::Up),
    KeyEvent::pressed(Key::Up),
    KeyEvent::pressed(Key::Right),
];

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("File Reading and Writing"));
    let font = app.load_font("lazyfont.png")?;
    let mut data = SaveData::open(app.config().assets_root.join("nums.bin"))?;

    let screen = app.screen_size();
    let prompt = "Enter Data:";
    let line = font.newline_height();

    for &event in SCRIPT {
        data.handle_key(event);

        let canvas = app.begin_frame();
        font.texture().set_color(0, 0, 0);
        let extent = font.measure(prompt)?;
        font.render_text(canvas, Point::new((screen.width - extent.width) / 2, 0), prompt)?;

        let mut y = line;
        for (index, value) in data.values().iter().enumerate() {
            let text = value.to_string();
            let extent = font.measure(&text)?;
            let at = Point::new((screen.width - extent.width) / 2, y);

            if index == data.selected() {
                let [r, g, b, _] = Color::RED.to_rgba8();
                font.texture().set_color(r, g, b);
            } else {
                font.texture().set_color(0, 0, 0);
            }

            font.render_text(canvas, at, &text)?;
            y += line;
        }

        app.present()?;
    }

    data.save()?;
    tracing::info!(values = ?data.values(), "saved");

    Ok(())
}
