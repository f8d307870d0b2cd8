//! Command-line options and layout settings

use clap::Parser;

use crate::elements::ELEMENTS;
use crate::error::{AtomError, Result};
use crate::packing;
use crate::shells::SHELL_CAPACITIES;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Element shown at startup, by name (e.g. "Carbon").
    #[arg(short, long, default_value = "Hydrogen")]
    pub element: String,

    /// Radius of a single proton or neutron, in scene units.
    #[arg(long, default_value_t = 0.5)]
    pub nucleon_radius: f32,

    /// Multiplier applied to electron orbit and nucleus spin speeds.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f32,

    /// Initial window width in pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Start with the animation paused.
    #[arg(long, default_value_t = false)]
    pub paused: bool,
}

/// Sizes, speeds and colors used to build the atom scene
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Radius of a proton or neutron.
    pub nucleon_radius: f32,
    /// Radius of an electron sphere.
    pub electron_radius: f32,
    /// Gap between successive electron shells.
    pub shell_gap: f32,
    /// Angular speed of the innermost shell, in radians per second.
    pub orbit_speed: f32,
    /// Rotation speed of the nucleus about the vertical axis.
    pub nucleus_spin: f32,
    /// Inclination of each shell's orbital plane, in radians.
    pub shell_tilts: [f32; SHELL_CAPACITIES.len()],
    pub proton_color: [f32; 4],
    pub neutron_color: [f32; 4],
    pub electron_color: [f32; 4],
    pub ring_color: [f32; 4],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            nucleon_radius: 0.5,
            electron_radius: 0.2,
            shell_gap: 1.5,
            orbit_speed: 1.6,
            nucleus_spin: 0.3,
            shell_tilts: [0.0, 0.45, -0.35, 0.8],
            proton_color: [0.90, 0.25, 0.25, 1.0],  // Red
            neutron_color: [0.35, 0.55, 0.95, 1.0], // Blue
            electron_color: [1.0, 0.90, 0.30, 1.0], // Yellow
            ring_color: [0.6, 0.8, 1.0, 0.35],
        }
    }
}

impl LayoutConfig {
    /// Build a layout from command-line options, rejecting unusable values
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        if !args.nucleon_radius.is_finite() || args.nucleon_radius <= 0.0 {
            return Err(AtomError::InvalidArgument(format!(
                "--nucleon-radius must be positive, got {}",
                args.nucleon_radius
            )));
        }
        if !args.speed.is_finite() || args.speed < 0.0 {
            return Err(AtomError::InvalidArgument(format!(
                "--speed must be zero or positive, got {}",
                args.speed
            )));
        }

        let defaults = Self::default();
        let scale = args.nucleon_radius / defaults.nucleon_radius;

        let layout = Self {
            nucleon_radius: args.nucleon_radius,
            electron_radius: defaults.electron_radius * scale,
            shell_gap: defaults.shell_gap * scale,
            orbit_speed: defaults.orbit_speed * args.speed,
            nucleus_spin: defaults.nucleus_spin * args.speed,
            ..defaults
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check that every element in the table can be laid out with finite
    /// coordinates
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("nucleon radius", self.nucleon_radius),
            ("electron radius", self.electron_radius),
            ("shell gap", self.shell_gap),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(AtomError::InvalidArgument(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        let speeds = [("orbit speed", self.orbit_speed), ("nucleus spin", self.nucleus_spin)];
        for (name, value) in speeds.into_iter().chain(self.shell_tilts.map(|t| ("shell tilt", t))) {
            if !value.is_finite() {
                return Err(AtomError::InvalidArgument(format!("{name} must be finite, got {value}")));
            }
        }

        let extent = self.max_scene_radius();
        if !extent.is_finite() {
            return Err(AtomError::InvalidArgument(format!(
                "nucleon radius {} makes the scene too large to draw",
                self.nucleon_radius
            )));
        }
        Ok(())
    }

    /// Radius of the largest atom this layout can produce
    pub fn max_scene_radius(&self) -> f32 {
        let nucleons = ELEMENTS.iter().map(|e| e.atomic_mass).max().unwrap_or(0) as usize;
        let nucleus = packing::layer_radius(packing::outermost_layer(nucleons), self.nucleon_radius)
            + self.nucleon_radius;
        nucleus + SHELL_CAPACITIES.len() as f32 * self.shell_gap + self.electron_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("atom_viewer").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_layout_defaults() {
        let layout = LayoutConfig::from_args(&parse(&[])).unwrap();
        assert_eq!(layout, LayoutConfig::default());
    }

    #[test]
    fn cli_overrides() {
        let args = parse(&["--element", "Neon", "--nucleon-radius", "1.0", "--speed", "2", "--paused"]);
        assert_eq!(args.element, "Neon");
        assert!(args.paused);

        let layout = LayoutConfig::from_args(&args).unwrap();
        assert_relative_eq!(layout.shell_gap, 3.0);
        assert_relative_eq!(layout.electron_radius, 0.4);
        assert_relative_eq!(layout.orbit_speed, 3.2);
    }

    #[test]
    fn rejects_bad_radius_and_speed() {
        let args = parse(&["--nucleon-radius", "0"]);
        assert!(matches!(LayoutConfig::from_args(&args), Err(AtomError::InvalidArgument(_))));

        let args = parse(&["--speed=-1"]);
        assert!(matches!(LayoutConfig::from_args(&args), Err(AtomError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_radius_too_large_to_draw() {
        let args = parse(&["--nucleon-radius", "1e38"]);
        assert!(matches!(LayoutConfig::from_args(&args), Err(AtomError::InvalidArgument(_))));

        let args = parse(&["--nucleon-radius", "1e30"]);
        let layout = LayoutConfig::from_args(&args).unwrap();
        assert!(layout.max_scene_radius().is_finite());
    }

    #[test]
    fn validate_checks_every_field() {
        assert_eq!(LayoutConfig::default().validate(), Ok(()));

        let broken = [
            LayoutConfig { electron_radius: 0.0, ..LayoutConfig::default() },
            LayoutConfig { shell_gap: f32::INFINITY, ..LayoutConfig::default() },
            LayoutConfig { shell_gap: f32::MAX, ..LayoutConfig::default() },
            LayoutConfig { orbit_speed: f32::NAN, ..LayoutConfig::default() },
            LayoutConfig { nucleus_spin: f32::NEG_INFINITY, ..LayoutConfig::default() },
            LayoutConfig { shell_tilts: [0.0, f32::NAN, 0.0, 0.0], ..LayoutConfig::default() },
        ];
        for layout in broken {
            assert!(matches!(layout.validate(), Err(AtomError::InvalidArgument(_))), "{layout:?}");
        }
    }

    #[test]
    fn max_scene_radius_covers_heaviest_element() {
        let layout = LayoutConfig::default();
        // 40 nucleons reach layer 3: 3 * 0.5 * 1.35 + 0.5, then four shell gaps
        assert_relative_eq!(layout.max_scene_radius(), 2.525 + 6.0 + 0.2, epsilon = 1e-5);
    }
}
