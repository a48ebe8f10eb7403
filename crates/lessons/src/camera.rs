use geometry::{Extent, PixelRect, Point, Px};

/// Size of the scrolling lesson's level, twice the default screen each way.
pub const LEVEL_WIDTH: i32 = 1280;
pub const LEVEL_HEIGHT: i32 = 960;

/// A view of `view` size centred on `target` and kept inside a level of
/// `level` size.
///
/// When the level is smaller than the view along an axis, the view is pinned
/// so its far edge meets the level's far edge.
#[must_use]
pub fn follow(target: Point<i32, Px>, view: Extent<i32, Px>, level: Extent<i32, Px>) -> PixelRect {
    let clamp = |centre: i32, view: i32, level: i32| {
        let mut start = centre - view / 2;

        if start < 0 {
            start = 0;
        }

        if start > level - view {
            start = level - view;
        }

        start
    };

    PixelRect::from_xywh(
        clamp(target.x, view.width, level.width),
        clamp(target.y, view.height, level.height),
        view.width,
        view.height,
    )
}
