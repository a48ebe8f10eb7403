use geometry::{collides, Extent, Offset, PixelRect, Point, Px};
use graphics::{Canvas, Flip, GraphicsError, Texture};
use smallvec::SmallVec;

use crate::input::{ButtonState, Key, KeyEvent};

pub const DOT_WIDTH: i32 = 20;
pub const DOT_HEIGHT: i32 = 20;

/// Pixels per frame while a direction key is held, unless the dot was made
/// with [`Dot::with_speed`].
pub const DOT_VELOCITY: i32 = 1;

/// (width, height) of each collider row, top to bottom. Together they
/// approximate a 20x20 circle.
const PROFILE: [(i32, i32); 11] = [
    (6, 1),
    (10, 1),
    (14, 1),
    (16, 2),
    (18, 2),
    (20, 6),
    (18, 2),
    (16, 2),
    (14, 1),
    (10, 1),
    (6, 1),
];

pub type Colliders = SmallVec<[PixelRect; PROFILE.len()]>;

/// A keyboard-driven dot that collides per row rather than by bounding box.
#[derive(Clone, Debug)]
pub struct Dot {
    position: Point<i32, Px>,
    velocity: Offset<i32, Px>,
    speed: i32,
    colliders: Colliders,
}

impl Dot {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self::with_speed(x, y, DOT_VELOCITY)
    }

    #[must_use]
    pub fn with_speed(x: i32, y: i32, speed: i32) -> Self {
        let mut dot = Self {
            position: Point::new(x, y),
            velocity: Offset::zero(),
            speed,
            colliders: PROFILE
                .iter()
                .map(|&(w, h)| PixelRect::from_xywh(0, 0, w, h))
                .collect(),
        };
        dot.shift_colliders();
        dot
    }

    #[must_use]
    pub fn position(&self) -> Point<i32, Px> {
        self.position
    }

    #[must_use]
    pub fn center(&self) -> Point<i32, Px> {
        self.position + Offset::new(DOT_WIDTH / 2, DOT_HEIGHT / 2)
    }

    #[must_use]
    pub fn velocity(&self) -> Offset<i32, Px> {
        self.velocity
    }

    #[must_use]
    pub fn colliders(&self) -> &[PixelRect] {
        &self.colliders
    }

    /// Pressing a direction key adds its velocity, releasing it takes the
    /// velocity away again. Key repeats are ignored.
    pub fn handle_key(&mut self, event: KeyEvent) {
        if !event.state.is_edge() {
            return;
        }

        let delta = match event.key {
            Key::Up => Offset::new(0, -self.speed),
            Key::Down => Offset::new(0, self.speed),
            Key::Left => Offset::new(-self.speed, 0),
            Key::Right => Offset::new(self.speed, 0),
            Key::Escape | Key::Other(_) => return,
        };

        if event.state == ButtonState::Pressed {
            self.velocity += delta;
        } else {
            self.velocity -= delta;
        }
    }

    /// Moves by the current velocity, one axis at a time. A move along an
    /// axis is undone if it takes the dot outside `bounds` or into `others`.
    pub fn move_by(&mut self, bounds: Extent<i32, Px>, others: &[PixelRect]) {
        self.position.x += self.velocity.x;
        self.shift_colliders();

        if self.position.x < 0
            || self.position.x + DOT_WIDTH > bounds.width
            || collides(&self.colliders, others)
        {
            self.position.x -= self.velocity.x;
            self.shift_colliders();
        }

        self.position.y += self.velocity.y;
        self.shift_colliders();

        if self.position.y < 0
            || self.position.y + DOT_HEIGHT > bounds.height
            || collides(&self.colliders, others)
        {
            self.position.y -= self.velocity.y;
            self.shift_colliders();
        }
    }

    /// Centres each collider row on the dot and stacks the rows downward
    /// from its top edge.
    pub fn shift_colliders(&mut self) {
        let mut row = 0;

        for collider in &mut self.colliders {
            let (width, height) = (collider.width(), collider.height());
            *collider = PixelRect::from_xywh(
                self.position.x + (DOT_WIDTH - width) / 2,
                self.position.y + row,
                width,
                height,
            );
            row += height;
        }
    }

    pub fn render(&self, canvas: &mut Canvas, texture: &Texture) -> Result<(), GraphicsError> {
        self.render_from(canvas, texture, Point::zero())
    }

    /// Draws the dot as seen by a camera whose top-left corner is at
    /// `camera` in level coordinates.
    pub fn render_from(
        &self,
        canvas: &mut Canvas,
        texture: &Texture,
        camera: Point<i32, Px>,
    ) -> Result<(), GraphicsError> {
        let at = self.position - camera.to_vector();
        canvas.copy(texture, at, None, Flip::empty())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn screen() -> Extent<i32, Px> {
        Extent::new(640, 480)
    }

    fn moving(x: i32, y: i32, keys: &[Key]) -> Dot {
        let mut dot = Dot::new(x, y);
        for &key in keys {
            dot.handle_key(KeyEvent::pressed(key));
        }
        dot
    }

    #[test]
    fn colliders_approximate_a_circle() {
        let dot = Dot::new(100, 50);
        let colliders = dot.colliders();

        assert_eq!(colliders.len(), 11);
        assert_eq!(colliders[0], PixelRect::from_xywh(107, 50, 6, 1));
        assert_eq!(colliders[5], PixelRect::from_xywh(100, 50 + 7, 20, 6));
        assert_eq!(colliders[10], PixelRect::from_xywh(107, 50 + 19, 6, 1));

        let total: i32 = colliders.iter().map(PixelRect::height).sum();
        assert_eq!(total, DOT_HEIGHT);

        for pair in colliders.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].y());
        }
    }

    #[test]
    fn keys_set_velocity() {
        let mut dot = moving(0, 0, &[Key::Right, Key::Down]);
        assert_eq!(dot.velocity(), Offset::new(1, 1));

        dot.handle_key(KeyEvent::repeated(Key::Right, 3));
        assert_eq!(dot.velocity(), Offset::new(1, 1));

        dot.handle_key(KeyEvent::pressed(Key::Left));
        assert_eq!(dot.velocity(), Offset::new(0, 1));

        dot.handle_key(KeyEvent::released(Key::Right));
        dot.handle_key(KeyEvent::released(Key::Down));
        assert_eq!(dot.velocity(), Offset::new(-1, 0));

        dot.handle_key(KeyEvent::pressed(Key::Escape));
        assert_eq!(dot.velocity(), Offset::new(-1, 0));
    }

    #[test]
    fn stays_on_screen() {
        let mut dot = moving(0, 0, &[Key::Left, Key::Up]);
        dot.move_by(screen(), &[]);
        assert_eq!(dot.position(), Point::new(0, 0));

        let mut dot = moving(620, 460, &[Key::Right, Key::Down]);
        dot.move_by(screen(), &[]);
        assert_eq!(dot.position(), Point::new(620, 460));

        let mut dot = moving(619, 459, &[Key::Right, Key::Down]);
        dot.move_by(screen(), &[]);
        assert_eq!(dot.position(), Point::new(620, 460));
    }

    #[test]
    fn touching_is_not_blocked() {
        let wall = [PixelRect::from_xywh(21, 0, 10, 100)];

        let mut dot = moving(0, 0, &[Key::Right]);
        dot.move_by(screen(), &wall);
        assert_eq!(dot.position(), Point::new(1, 0));
        assert_eq!(dot.colliders()[5].right(), wall[0].x());

        dot.move_by(screen(), &wall);
        assert_eq!(dot.position(), Point::new(1, 0));
    }

    #[test]
    fn blocked_axis_does_not_stop_the_other() {
        let wall = [PixelRect::from_xywh(20, 0, 10, 100)];

        let mut dot = moving(0, 0, &[Key::Right, Key::Down]);
        dot.move_by(screen(), &wall);

        assert_eq!(dot.position(), Point::new(0, 1));
    }

    #[test]
    fn rounded_corners_slip_past() {
        // The other dot sits diagonally below-right; the bounding boxes would
        // overlap by one pixel but the corner rows are narrow.
        let other = Dot::new(19, 19);
        assert!(!collides(Dot::new(0, 0).colliders(), other.colliders()));

        let mut dot = moving(0, 0, &[Key::Down]);
        dot.move_by(screen(), other.colliders());
        assert_eq!(dot.position(), Point::new(0, 1));
    }

    #[test]
    fn faster_dots() {
        let mut dot = Dot::with_speed(100, 100, 10);
        dot.handle_key(KeyEvent::pressed(Key::Left));
        dot.handle_key(KeyEvent::pressed(Key::Up));
        assert_eq!(dot.velocity(), Offset::new(-10, -10));

        dot.move_by(screen(), &[]);
        assert_eq!(dot.position(), Point::new(90, 90));
        assert_eq!(dot.center(), Point::new(100, 100));
        assert_eq!(dot.colliders()[0].top_left(), Point::new(97, 90));
    }

    #[test]
    fn rendered_relative_to_the_camera() {
        use graphics::{Color, PixelBuffer};

        let texture = Texture::from_buffer(PixelBuffer::filled(2, 2, Color::RED));
        let mut canvas = Canvas::new(Extent::new(8, 8));
        let dot = Dot::new(105, 53);

        dot.render_from(&mut canvas, &texture, Point::new(100, 50))
            .unwrap();

        let red = Color::RED.to_rgba8888();
        assert_eq!(canvas.pixels().pixel32(5, 3), red);
        assert_eq!(canvas.pixels().pixel32(6, 4), red);
        assert_ne!(canvas.pixels().pixel32(4, 3), red);
    }

    proptest! {
        #[test]
        fn never_moves_into_an_obstacle(
            start in (0..200, 0..200),
            velocity in (-1..=1, -1..=1),
            steps in 1..60usize,
        ) {
            let other = Dot::new(100, 100);
            let mut dot = Dot::new(start.0, start.1);
            prop_assume!(!collides(dot.colliders(), other.colliders()));

            dot.velocity = Offset::new(velocity.0, velocity.1);
            for _ in 0..steps {
                dot.move_by(screen(), other.colliders());
                prop_assert!(!collides(dot.colliders(), other.colliders()));
                prop_assert!(dot.position().x >= 0 && dot.position().y >= 0);
            }
        }
    }
}
