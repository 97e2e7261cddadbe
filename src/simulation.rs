use rand::Rng;

use crate::config::{derive_config, AppSettings, SimConfig, MOBILE_WIDTH};
use crate::lifecycle::{
    CounterStore, AMBIENT_CAPTURE_RADIUS, GOLDEN_CAPTURE_RADIUS, INACTIVITY_TIMEOUT_MS,
};
use crate::particle::{GoldenParticle, Particle, Theme, Vec2};
use crate::physics::{self, Bounds};

/// The whole particle field plus its lifecycle bookkeeping. One `tick` runs
/// integrate, then the capture and inactivity rules, with every timestamp
/// supplied by the caller so tests can drive a synthetic clock.
pub struct Simulation {
    settings: AppSettings,
    /// Device-scaled parameters used for the initial spawn and the well.
    config: SimConfig,
    /// Unscaled defaults; every respawn after init draws from these.
    base: SimConfig,
    bounds: Bounds,
    mobile: bool,
    pub particles: Vec<Particle>,
    pub golden: GoldenParticle,
    capture_count: u64,
    store: Box<dyn CounterStore>,
    last_activity_ms: f64,
    theme: Theme,
}

impl Simulation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        settings: AppSettings,
        hardware_concurrency: usize,
        width: f32,
        height: f32,
        store: Box<dyn CounterStore>,
        theme: Theme,
        now_ms: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let config = derive_config(&settings, hardware_concurrency, width);
        let base = SimConfig::base(&settings);

        let particles = (0..config.particle_count)
            .map(|_| {
                Particle::spawn(rng, width, height, config.particle_speed, config.particle_size, theme)
            })
            .collect();
        let golden =
            GoldenParticle::spawn(rng, width, height, base.particle_speed, base.particle_size, now_ms);

        let capture_count = store.load();
        log::info!(
            "field initialized: {} particles, well radius {}, {} prior captures",
            config.particle_count,
            config.mouse_radius,
            capture_count
        );

        Self {
            settings,
            config,
            base,
            bounds: Bounds { width, height },
            mobile: width <= MOBILE_WIDTH,
            particles,
            golden,
            capture_count,
            store,
            last_activity_ms: now_ms,
            theme,
        }
    }

    pub fn capture_count(&self) -> u64 {
        self.capture_count
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Called by the host on any pointer move, click, or hover.
    pub fn record_activity(&mut self, now_ms: f64) {
        self.last_activity_ms = now_ms;
    }

    /// Updates the viewport. Crossing the mobile width threshold rebuilds the
    /// ambient field under the re-derived config; the golden particle stays.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        hardware_concurrency: usize,
        rng: &mut impl Rng,
    ) {
        self.bounds = Bounds { width, height };
        let mobile = width <= MOBILE_WIDTH;
        if mobile != self.mobile {
            self.mobile = mobile;
            self.config = derive_config(&self.settings, hardware_concurrency, width);
            log::info!(
                "device class changed, rebuilding field with {} particles",
                self.config.particle_count
            );
            self.particles = (0..self.config.particle_count)
                .map(|_| {
                    Particle::spawn(
                        rng,
                        width,
                        height,
                        self.config.particle_speed,
                        self.config.particle_size,
                        self.theme,
                    )
                })
                .collect();
        }
    }

    /// One animation tick: integrate every particle, apply the capture rules,
    /// then the inactivity rule.
    pub fn tick(&mut self, now_ms: f64, pointer: Option<Vec2>, theme: Theme, rng: &mut impl Rng) {
        if theme != self.theme {
            self.theme = theme;
            for particle in &mut self.particles {
                particle.color = crate::particle::particle_color(rng, theme);
            }
        }

        let mut well_active = false;

        for particle in &mut self.particles {
            let outcome = physics::step(
                &mut particle.position,
                &mut particle.velocity,
                pointer,
                self.bounds,
                self.config.mouse_radius,
                &physics::AMBIENT,
            );
            particle.well_force = outcome.pull;
            well_active |= outcome.pull.is_some();

            if let Some(distance) = outcome.pointer_distance {
                if distance < AMBIENT_CAPTURE_RADIUS {
                    particle.respawn(
                        rng,
                        self.bounds.width,
                        self.bounds.height,
                        self.base.particle_speed,
                        self.base.particle_size,
                        theme,
                    );
                }
            }
        }

        let outcome = physics::step(
            &mut self.golden.position,
            &mut self.golden.velocity,
            pointer,
            self.bounds,
            self.config.mouse_radius,
            &physics::GOLDEN,
        );
        self.golden.well_force = outcome.pull;
        well_active |= outcome.pull.is_some();

        if let Some(distance) = outcome.pointer_distance {
            if distance < GOLDEN_CAPTURE_RADIUS {
                self.capture_count += 1;
                self.store.save(self.capture_count);
                log::debug!("golden particle captured, total {}", self.capture_count);
                self.golden = GoldenParticle::spawn(
                    rng,
                    self.bounds.width,
                    self.bounds.height,
                    self.base.particle_speed,
                    self.base.particle_size,
                    now_ms,
                );
            }
        }

        // A particle sitting inside the well counts as activity, so the field
        // never resets out from under an engaged pointer.
        if well_active {
            self.last_activity_ms = now_ms;
        }

        if now_ms - self.last_activity_ms > INACTIVITY_TIMEOUT_MS {
            log::debug!("pointer idle, respawning the ambient field");
            for particle in &mut self.particles {
                particle.respawn(
                    rng,
                    self.bounds.width,
                    self.bounds.height,
                    self.base.particle_speed,
                    self.base.particle_size,
                    theme,
                );
            }
            self.last_activity_ms = now_ms;
        }
    }
}
