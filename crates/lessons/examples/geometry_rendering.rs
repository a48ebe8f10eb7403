use geometry::{PixelRect, Point};
use graphics::Color;
use lessons::{logging, App, AppError, Config};

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Geometry Rendering"));
    let screen = app.screen_size();
    let (width, height) = (screen.width, screen.height);

    let canvas = app.begin_frame();

    canvas.set_draw_color(Color::RED);
    canvas.fill_rect(PixelRect::from_xywh(width / 4, height / 4, width / 2, height / 2));

    canvas.set_draw_color(Color::GREEN);
    canvas.draw_rect(PixelRect::from_xywh(
        width / 6,
        height / 6,
        width * 2 / 3,
        height * 2 / 3,
    ));

    canvas.set_draw_color(Color::BLUE);
    canvas.draw_line(Point::new(0, height / 2), Point::new(width, height / 2));

    // A dotted vertical line down the middle.
    canvas.set_draw_color(Color::rgb8(0xFF, 0xFF, 0x00));
    for y in (0..height).step_by(4) {
        canvas.draw_point(Point::new(width / 2, y));
    }

    app.present()
}
