use crate::particle::{GoldenParticle, Particle, Rgba, Theme, Vec2};

/// One filled circle, in screen coordinates. The composed list is ordered
/// back-to-front and drawn with alpha blending.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

/// Urgency state of the golden glow, derived from survival time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlowState {
    Gold,
    /// Intensity ramps 0 to 1 across the 10 s window.
    Orange(f32),
    Red(f32),
    DarkRed,
}

pub fn glow_state(elapsed_secs: f64) -> GlowState {
    if elapsed_secs < 10.0 {
        GlowState::Gold
    } else if elapsed_secs < 20.0 {
        GlowState::Orange(((elapsed_secs - 10.0) / 10.0).min(1.0) as f32)
    } else if elapsed_secs < 30.0 {
        GlowState::Red(((elapsed_secs - 20.0) / 10.0).min(1.0) as f32)
    } else {
        GlowState::DarkRed
    }
}

/// Layer colors for the five-circle glow, outermost first. In the gold state
/// the two outer margins are sky blue; later states tint every layer with the
/// urgency color, faded in by the ramp intensity.
struct GlowPalette {
    halo: Rgba,
    halo_middle: Rgba,
    outer: Rgba,
    middle: Rgba,
    main: Rgba,
}

fn glow_palette(state: GlowState) -> GlowPalette {
    let gold = Rgba::from_rgb8(0xff, 0xd7, 0x00);
    let sky = Rgba::from_rgb8(0x87, 0xce, 0xeb);
    match state {
        GlowState::Gold => GlowPalette {
            halo: sky.with_alpha(0.4),
            halo_middle: sky.with_alpha(0.6),
            outer: gold.with_alpha(0.3),
            middle: gold.with_alpha(0.6),
            main: gold,
        },
        GlowState::Orange(i) => tinted(Rgba::from_rgb8(0xff, 0xa5, 0x00), i),
        GlowState::Red(i) => tinted(Rgba::from_rgb8(0xff, 0x45, 0x00), i),
        GlowState::DarkRed => tinted(Rgba::from_rgb8(0x8b, 0x00, 0x00), 1.0),
    }
}

fn tinted(color: Rgba, intensity: f32) -> GlowPalette {
    GlowPalette {
        halo: color.with_alpha(0.4 * intensity),
        halo_middle: color.with_alpha(0.6 * intensity),
        outer: color.with_alpha(0.3 * intensity),
        middle: color.with_alpha(0.6 * intensity),
        main: color,
    }
}

/// Composes one frame into `circles`. Ambient particles caught in the well
/// are drawn as dark attractor bodies; the golden particle gets its layered
/// glow plus three orbiting sparks, all phase-locked to the caller's clock.
pub fn compose_frame(
    particles: &[Particle],
    golden: &GoldenParticle,
    theme: Theme,
    now_ms: f64,
    circles: &mut Vec<Circle>,
) {
    circles.clear();

    for particle in particles {
        match particle.well_force {
            Some(force) => {
                circles.push(Circle {
                    center: particle.position,
                    radius: particle.size * 1.5,
                    color: Rgba::BLACK.with_alpha(force * 0.3),
                });
                circles.push(Circle {
                    center: particle.position,
                    radius: particle.size,
                    color: Rgba::BLACK.with_alpha(0.8 + force * 0.2),
                });
            }
            None => {
                let color = match theme {
                    Theme::Dark => Rgba::WHITE.with_alpha(particle.opacity),
                    Theme::Light => particle.color,
                };
                circles.push(Circle {
                    center: particle.position,
                    radius: particle.size,
                    color,
                });
            }
        }
    }

    let elapsed_secs = (now_ms - golden.spawned_at_ms) / 1_000.0;
    let palette = glow_palette(glow_state(elapsed_secs));

    let phase = now_ms * 0.005;
    let pulse = 0.8 + (phase.sin() as f32) * 0.2;

    let layers = [
        (2.5, palette.halo),
        (2.2, palette.halo_middle),
        (2.0, palette.outer),
        (1.5, palette.middle),
    ];
    for (scale, color) in layers {
        circles.push(Circle {
            center: golden.position,
            radius: golden.size * scale,
            color: color.with_alpha(color.a * pulse),
        });
    }
    circles.push(Circle {
        center: golden.position,
        radius: golden.size,
        color: palette.main,
    });

    for i in 0..3 {
        let angle = phase as f32 + i as f32 * std::f32::consts::TAU / 3.0;
        circles.push(Circle {
            center: golden.position
                + Vec2::new(angle.cos(), angle.sin()) * golden.size * 1.2,
            radius: 1.0,
            color: Rgba::WHITE.with_alpha(0.8 * pulse),
        });
    }
}
