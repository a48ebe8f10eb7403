use geometry::Point;
use lessons::{logging, App, AppError, Config};

const TEXT: &str =
    "Bitmap Font:\nABDCEFGHIJKLMNOPQRSTUVWXYZ\nabcdefghijklmnopqrstuvwxyz\n0123456789";

fn main() -> Result<(), AppError> {
    logging::init();

    let mut app = App::new(Config::from_args("Bitmap Fonts"));
    let font = app.load_font("lazyfont.png")?;

    let extent = font.measure(TEXT)?;
    tracing::info!(width = extent.width, height = extent.height, "text extent");

    let canvas = app.begin_frame();
    font.render_text(canvas, Point::new(0, 0), TEXT)?;
    app.present()
}
