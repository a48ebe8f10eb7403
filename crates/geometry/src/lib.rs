use std::ops::{Add, Sub};

use euclid::num::Zero;
pub use euclid::{Point2D as Point, Size2D as Extent, Vector2D as Offset};

mod collision;

pub use collision::collides;

/// Image or canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Px();

/// An integer rectangle in pixel space, as used for clip rectangles and
/// colliders.
pub type PixelRect = Rect<i32, Px>;

/// An axis-aligned rectangle. The top-left corner is inclusive and the
/// bottom-right corner is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect<T, U>(euclid::Box2D<T, U>);

impl<T, U> Rect<T, U> {
    pub fn new(origin: Point<T, U>, extent: Extent<T, U>) -> Self
    where
        T: Copy + Add<T, Output = T>,
    {
        Self(euclid::Box2D::from_origin_and_size(origin, extent))
    }

    pub fn from_xywh(x: T, y: T, width: T, height: T) -> Self
    where
        T: Copy + Add<T, Output = T>,
    {
        Self::new(Point::new(x, y), Extent::new(width, height))
    }

    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self(euclid::Box2D::zero())
    }

    pub fn x(&self) -> T
    where
        T: Copy,
    {
        self.0.min.x
    }

    pub fn y(&self) -> T
    where
        T: Copy,
    {
        self.0.min.y
    }

    pub fn width(&self) -> T
    where
        T: Copy + Sub<T, Output = T>,
    {
        self.0.width()
    }

    pub fn height(&self) -> T
    where
        T: Copy + Sub<T, Output = T>,
    {
        self.0.height()
    }

    /// The exclusive right edge.
    pub fn right(&self) -> T
    where
        T: Copy,
    {
        self.0.max.x
    }

    /// The exclusive bottom edge.
    pub fn bottom(&self) -> T
    where
        T: Copy,
    {
        self.0.max.y
    }

    pub fn top_left(&self) -> Point<T, U>
    where
        T: Copy,
    {
        self.0.min
    }

    pub fn extent(&self) -> Extent<T, U>
    where
        T: Copy + Sub<T, Output = T>,
    {
        self.0.size()
    }

    /// Returns true if the rectangle has no area.
    pub fn is_empty(&self) -> bool
    where
        T: PartialOrd,
    {
        self.0.is_empty()
    }

    pub fn contains(&self, point: Point<T, U>) -> bool
    where
        T: PartialOrd,
    {
        self.0.contains(point)
    }

    /// Strict overlap test. Rectangles that only share an edge do not
    /// overlap: they are disjoint when one's bottom is at or above the other's
    /// top, or one's right is at or left of the other's left, and so on.
    pub fn overlaps(&self, rhs: &Rect<T, U>) -> bool
    where
        T: PartialOrd,
    {
        self.0.intersects(&rhs.0)
    }

    pub fn intersection(&self, rhs: &Rect<T, U>) -> Option<Rect<T, U>>
    where
        T: Copy + PartialOrd,
    {
        self.0.intersection(&rhs.0).map(|r| Rect(r))
    }
}
