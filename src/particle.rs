use nalgebra::Vector2;
use rand::Rng;

pub type Vec2 = Vector2<f32>;

/// Active color theme, sampled by the host once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Fixed light-theme palette. Dark theme always renders white.
const LIGHT_PALETTE: [(u8, u8, u8); 12] = [
    (0x63, 0x66, 0xf1),
    (0x8b, 0x5c, 0xf6),
    (0x06, 0xb6, 0xd4),
    (0x10, 0xb9, 0x81),
    (0xf5, 0x9e, 0x0b),
    (0xef, 0x44, 0x44),
    (0xec, 0x48, 0x99),
    (0x84, 0xcc, 0x16),
    (0x3b, 0x82, 0xf6),
    (0xf9, 0x73, 0x16),
    (0xa8, 0x55, 0xf7),
    (0x14, 0xb8, 0xa6),
];

pub fn particle_color(rng: &mut impl Rng, theme: Theme) -> Rgba {
    match theme {
        Theme::Dark => Rgba::WHITE,
        Theme::Light => {
            let (r, g, b) = LIGHT_PALETTE[rng.gen_range(0..LIGHT_PALETTE.len())];
            Rgba::from_rgb8(r, g, b)
        }
    }
}

/// One ambient background particle.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub color: Rgba,
    /// Pull force in [0, 1] from the most recent tick, when inside the well.
    pub well_force: Option<f32>,
}

impl Particle {
    pub fn spawn(
        rng: &mut impl Rng,
        width: f32,
        height: f32,
        speed: f32,
        size: f32,
        theme: Theme,
    ) -> Self {
        Self {
            position: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * speed,
                (rng.gen::<f32>() - 0.5) * speed,
            ),
            size: rng.gen::<f32>() * size + 1.0,
            opacity: rng.gen::<f32>() * 0.5 + 0.5,
            color: particle_color(rng, theme),
            well_force: None,
        }
    }

    pub fn respawn(
        &mut self,
        rng: &mut impl Rng,
        width: f32,
        height: f32,
        speed: f32,
        size: f32,
        theme: Theme,
    ) {
        *self = Self::spawn(rng, width, height, speed, size, theme);
    }
}

/// The singleton golden particle. Exactly one exists at any time; a capture
/// replaces it with a fresh instance.
#[derive(Debug, Clone)]
pub struct GoldenParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// Clock value at which this instance was created, in milliseconds.
    pub spawned_at_ms: f64,
    pub well_force: Option<f32>,
}

impl GoldenParticle {
    /// Spawns slower than ambient particles (half the base speed bound) and
    /// three times the base size, always from the unscaled defaults.
    pub fn spawn(
        rng: &mut impl Rng,
        width: f32,
        height: f32,
        base_speed: f32,
        base_size: f32,
        now_ms: f64,
    ) -> Self {
        Self {
            position: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * base_speed * 0.5,
                (rng.gen::<f32>() - 0.5) * base_speed * 0.5,
            ),
            size: base_size * 3.0,
            spawned_at_ms: now_ms,
            well_force: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawn_respects_bounds_and_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, 800.0, 600.0, 0.3, 1.5, Theme::Light);
            assert!(p.position.x >= 0.0 && p.position.x <= 800.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 600.0);
            assert!(p.velocity.x.abs() <= 0.15 && p.velocity.y.abs() <= 0.15);
            assert!(p.size >= 1.0 && p.size <= 2.5);
            assert!(p.opacity >= 0.5 && p.opacity <= 1.0);
        }
    }

    #[test]
    fn dark_theme_spawns_white() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = Particle::spawn(&mut rng, 800.0, 600.0, 0.3, 1.5, Theme::Dark);
        assert_eq!(p.color, Rgba::WHITE);
    }

    #[test]
    fn golden_spawn_is_larger_and_slower() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = GoldenParticle::spawn(&mut rng, 800.0, 600.0, 0.3, 1.5, 1234.0);
        assert_eq!(g.size, 4.5);
        assert_eq!(g.spawned_at_ms, 1234.0);
        assert!(g.velocity.x.abs() <= 0.075 && g.velocity.y.abs() <= 0.075);
    }
}
