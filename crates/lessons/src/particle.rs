use std::sync::Arc;

use geometry::{Offset, Point, Px};
use graphics::{Canvas, Flip, GraphicsError, Texture};

/// Particles trailing each emitter.
pub const TOTAL_PARTICLES: usize = 20;

/// A particle dies once it has been drawn this many times past its first
/// frame.
pub const PARTICLE_LIFETIME: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Red,
    Green,
    Blue,
}

/// The textures particles are drawn with.
#[derive(Clone, Debug)]
pub struct ParticleTextures {
    pub red: Arc<Texture>,
    pub green: Arc<Texture>,
    pub blue: Arc<Texture>,
    /// Drawn over a particle on every other frame.
    pub shimmer: Arc<Texture>,
}

impl ParticleTextures {
    fn tint(&self, tint: Tint) -> &Texture {
        match tint {
            Tint::Red => &self.red,
            Tint::Green => &self.green,
            Tint::Blue => &self.blue,
        }
    }
}

/// A short-lived speck scattered around the point it was spawned near.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Particle {
    position: Point<i32, Px>,
    frame: u32,
    tint: Tint,
}

impl Particle {
    /// Spawns a particle up to 5 pixels above or left of `near` and up to 19
    /// below or right of it, part way through its life.
    pub fn spawn(near: Point<i32, Px>, rng: &mut fastrand::Rng) -> Self {
        let scatter = Offset::new(rng.i32(-5..20), rng.i32(-5..20));
        let tint = match rng.u8(0..3) {
            0 => Tint::Red,
            1 => Tint::Green,
            _ => Tint::Blue,
        };

        Self {
            position: near + scatter,
            frame: rng.u32(0..5),
            tint,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point<i32, Px> {
        self.position
    }

    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[must_use]
    pub fn tint(&self) -> Tint {
        self.tint
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.frame > PARTICLE_LIFETIME
    }

    /// Whether the shimmer is drawn over the particle this frame.
    #[must_use]
    pub fn shimmers(&self) -> bool {
        self.frame % 2 == 0
    }

    /// Draws the particle and ages it by one frame.
    pub fn render(
        &mut self,
        canvas: &mut Canvas,
        textures: &ParticleTextures,
    ) -> Result<(), GraphicsError> {
        canvas.copy(textures.tint(self.tint), self.position, None, Flip::empty())?;

        if self.shimmers() {
            canvas.copy(&textures.shimmer, self.position, None, Flip::empty())?;
        }

        self.frame += 1;
        Ok(())
    }
}

/// A fixed set of particles that are replaced near the emitter as they die.
#[derive(Clone, Debug)]
pub struct Emitter {
    particles: [Particle; TOTAL_PARTICLES],
    rng: fastrand::Rng,
}

impl Emitter {
    /// Seeding makes the particle pattern repeatable.
    #[must_use]
    pub fn new(at: Point<i32, Px>, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let particles = std::array::from_fn(|_| Particle::spawn(at, &mut rng));
        Self { particles, rng }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Replaces every dead particle with a new one near `at`, returning how
    /// many were replaced.
    pub fn respawn(&mut self, at: Point<i32, Px>) -> usize {
        let mut respawned = 0;

        for particle in &mut self.particles {
            if particle.is_dead() {
                *particle = Particle::spawn(at, &mut self.rng);
                respawned += 1;
            }
        }

        respawned
    }

    /// Respawns dead particles near `at`, then draws and ages every particle.
    pub fn render(
        &mut self,
        at: Point<i32, Px>,
        canvas: &mut Canvas,
        textures: &ParticleTextures,
    ) -> Result<(), GraphicsError> {
        let respawned = self.respawn(at);
        tracing::trace!(respawned, "respawned particles");

        for particle in &mut self.particles {
            particle.render(canvas, textures)?;
        }

        Ok(())
    }
}
