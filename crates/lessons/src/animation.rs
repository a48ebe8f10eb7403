use geometry::{Extent, PixelRect, Px};
use smallvec::SmallVec;

/// Frames each item of an animation is shown for.
pub const FRAMES_PER_STEP: usize = 4;

/// Cycles through a fixed list of items (sprite clips, streamed images),
/// showing each for a number of frames before moving to the next.
#[derive(Clone, Debug)]
pub struct Animation<T> {
    steps: SmallVec<[T; 4]>,
    frames_per_step: usize,
    frame: usize,
}

impl<T> Animation<T> {
    /// Panics if `steps` is empty or `frames_per_step` is zero.
    pub fn new(steps: impl IntoIterator<Item = T>, frames_per_step: usize) -> Self {
        let steps: SmallVec<[T; 4]> = steps.into_iter().collect();
        assert!(!steps.is_empty(), "an animation needs at least one step");
        assert!(frames_per_step > 0, "each step must last at least one frame");

        Self {
            steps,
            frames_per_step,
            frame: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> &T {
        &self.steps[self.step()]
    }

    #[must_use]
    pub fn step(&self) -> usize {
        self.frame / self.frames_per_step
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Moves on by one frame, wrapping back to the first step after the last.
    pub fn advance(&mut self) {
        self.frame += 1;

        if self.step() >= self.steps.len() {
            self.frame = 0;
        }
    }
}

impl Animation<PixelRect> {
    /// `count` equally sized clips laid side by side along the top of a sprite
    /// sheet.
    #[must_use]
    pub fn strip(clip: Extent<i32, Px>, count: i32, frames_per_step: usize) -> Self {
        Self::new(
            (0..count).map(|i| PixelRect::from_xywh(i * clip.width, 0, clip.width, clip.height)),
            frames_per_step,
        )
    }
}
