//! Electron orbit animation state

use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use crate::config::LayoutConfig;
use crate::error::{AtomError, Result};

/// One electron circling the nucleus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Current angle within the orbital plane, in `[0, TAU)`
    pub angle: f32,
    /// Radians per second
    pub angular_speed: f32,
    pub radius: f32,
    /// Shell index, innermost = 0
    pub shell: usize,
    /// Inclination of the orbital plane about the X axis
    pub tilt: f32,
}

impl OrbitState {
    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.angular_speed * dt).rem_euclid(TAU);
    }

    /// Position relative to the nucleus
    pub fn position(&self) -> Vec3 {
        let flat = Vec3::new(
            self.radius * self.angle.cos(),
            0.0,
            self.radius * self.angle.sin(),
        );
        Quat::from_rotation_x(self.tilt) * flat
    }
}

/// Orbit radius of shell `shell` around a nucleus of `nucleus_radius`
pub fn shell_radius(shell: usize, nucleus_radius: f32, layout: &LayoutConfig) -> f32 {
    nucleus_radius + (shell as f32 + 1.0) * layout.shell_gap
}

/// Build one orbit per electron, shell by shell.
///
/// Electrons of a shell are spread evenly around its ring; outer shells turn
/// more slowly.
pub fn build_orbits(
    shells: &[u32],
    nucleus_radius: f32,
    layout: &LayoutConfig,
) -> Vec<OrbitState> {
    let mut orbits = Vec::with_capacity(shells.iter().sum::<u32>() as usize);

    for (shell, &count) in shells.iter().enumerate() {
        let radius = shell_radius(shell, nucleus_radius, layout);
        let angular_speed = layout.orbit_speed / (shell as f32 + 1.0);
        let tilt = layout.shell_tilts.get(shell).copied().unwrap_or(0.0);

        for j in 0..count {
            orbits.push(OrbitState {
                angle: j as f32 * TAU / count as f32,
                angular_speed,
                radius,
                shell,
                tilt,
            });
        }
    }

    orbits
}

/// Check a frame delta before feeding it to the animation
pub fn validate_dt(dt: f32) -> Result<f32> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(dt)
    } else {
        Err(AtomError::InvalidArgument(format!(
            "frame delta must be finite and non-negative, got {dt}"
        )))
    }
}
