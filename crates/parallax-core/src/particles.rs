//! Bouncing particle field drawn behind the scan canvas

use crate::random::RandomSource;

/// Particle colours, blue-400 through blue-700
pub const PALETTE: [&str; 4] = ["#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8"];

/// Fraction of the stored speed applied per frame
pub const DAMPING: f64 = 0.8;

/// Speed magnitude cap on each axis
pub const MAX_SPEED: f64 = 1.5;

/// Random speed nudge applied on each wall bounce, ±JITTER/2
const JITTER: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Index into `PALETTE`
    pub color: usize,
    pub speed_x: f64,
    pub speed_y: f64,
}

impl Particle {
    pub fn spawn<R: RandomSource + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        Self {
            x: rng.next_f64() * width,
            y: rng.next_f64() * height,
            radius: rng.range(1.0, 4.0),
            color: rng.index(PALETTE.len()),
            speed_x: rng.range(-1.0, 1.0),
            speed_y: rng.range(-1.0, 1.0),
        }
    }

    pub fn color_hex(&self) -> &'static str {
        PALETTE[self.color % PALETTE.len()]
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: RandomSource + ?Sized>(count: usize, width: f64, height: f64, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| Particle::spawn(width, height, rng)).collect();
        Self {
            width,
            height,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Move every particle one frame, bouncing off the field edges
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            p.x += p.speed_x * DAMPING;
            p.y += p.speed_y * DAMPING;

            if p.x < 0.0 || p.x > width {
                p.speed_x = -p.speed_x + (rng.next_f64() - 0.5) * JITTER;
            }
            if p.y < 0.0 || p.y > height {
                p.speed_y = -p.speed_y + (rng.next_f64() - 0.5) * JITTER;
            }

            p.speed_x = p.speed_x.clamp(-MAX_SPEED, MAX_SPEED);
            p.speed_y = p.speed_y.clamp(-MAX_SPEED, MAX_SPEED);
        }
    }

    /// Drop all particles, as on unmount
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
