use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::particle::Theme;

/// Viewport widths (logical pixels) below which the field is scaled down.
pub const MOBILE_WIDTH: f32 = 768.0;
pub const SMALL_MOBILE_WIDTH: f32 = 480.0;

/// Application settings that control the particle field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Number of ambient particles before device scaling
    pub particle_count: usize,
    /// Pointer attraction radius in pixels
    pub mouse_radius: f32,
    /// Bound on random spawn velocity components
    pub particle_speed: f32,
    /// Bound on the random part of spawn size
    pub particle_size: f32,
    /// Initial theme, "light" or "dark"
    pub theme: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            particle_count: 15_000,
            mouse_radius: 200.0,
            particle_speed: 0.3,
            particle_size: 1.5,
            theme: "light".to_string(),
        }
    }
}

impl AppSettings {
    const SETTINGS_FILE: &'static str = "settings.toml";

    /// Loads settings from the settings file, or returns default settings if the file doesn't exist
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        if Path::new(Self::SETTINGS_FILE).exists() {
            let contents = fs::read_to_string(Self::SETTINGS_FILE)?;
            let settings: AppSettings = toml::from_str(&contents)?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    pub fn theme(&self) -> Theme {
        if self.theme.eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Field parameters actually used by the simulation, after device scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub particle_count: usize,
    pub mouse_radius: f32,
    pub particle_speed: f32,
    pub particle_size: f32,
}

impl SimConfig {
    /// The unscaled values, used for every respawn after initialization.
    pub fn base(settings: &AppSettings) -> Self {
        Self {
            particle_count: settings.particle_count,
            mouse_radius: settings.mouse_radius,
            particle_speed: settings.particle_speed,
            particle_size: settings.particle_size,
        }
    }
}

/// Scales the field down for constrained devices. Evaluated at startup and
/// again only when a resize crosses the mobile width threshold.
pub fn derive_config(
    settings: &AppSettings,
    hardware_concurrency: usize,
    viewport_width: f32,
) -> SimConfig {
    let low_performance = hardware_concurrency < 4;
    let small_mobile = viewport_width <= SMALL_MOBILE_WIDTH;
    let mobile = viewport_width <= MOBILE_WIDTH;

    let particle_count = if low_performance {
        500
    } else if small_mobile {
        1_000
    } else if mobile {
        2_000
    } else {
        settings.particle_count
    };

    SimConfig {
        particle_count,
        mouse_radius: if mobile { 100.0 } else { settings.mouse_radius },
        particle_speed: if mobile { 0.2 } else { settings.particle_speed },
        particle_size: if mobile { 1.0 } else { settings.particle_size },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_keeps_configured_values() {
        let settings = AppSettings::default();
        let config = derive_config(&settings, 8, 1920.0);
        assert_eq!(config, SimConfig::base(&settings));
    }

    #[test]
    fn low_core_count_wins_over_width() {
        let settings = AppSettings::default();
        let config = derive_config(&settings, 2, 1920.0);
        assert_eq!(config.particle_count, 500);
        // Width is still desktop, so the motion parameters are untouched.
        assert_eq!(config.mouse_radius, 200.0);
    }

    #[test]
    fn mobile_widths_scale_the_field() {
        let settings = AppSettings::default();

        let small = derive_config(&settings, 8, 480.0);
        assert_eq!(small.particle_count, 1_000);

        let mobile = derive_config(&settings, 8, 768.0);
        assert_eq!(mobile.particle_count, 2_000);
        assert_eq!(mobile.mouse_radius, 100.0);
        assert_eq!(mobile.particle_speed, 0.2);
        assert_eq!(mobile.particle_size, 1.0);
    }

    #[test]
    fn theme_string_parses() {
        let mut settings = AppSettings::default();
        assert_eq!(settings.theme(), Theme::Light);
        settings.theme = "Dark".to_string();
        assert_eq!(settings.theme(), Theme::Dark);
    }
}
