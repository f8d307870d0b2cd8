//! Atom scene state
//!
//! Everything the viewer shows lives in one [`AtomState`]: the selected
//! element, the packed nucleus, the shell distribution and one orbit per
//! electron. The caller's loop drives it with [`AtomState::advance`].

use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use crate::config::LayoutConfig;
use crate::elements::{self, ElementRecord};
use crate::error::{AtomError, Result};
use crate::ion::IonInfo;
use crate::orbit::{self, OrbitState};
use crate::packing;
use crate::shells::{self, ShellDistribution, MAX_ELECTRONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NucleonKind {
    Proton,
    Neutron,
}

/// A proton or neutron at its packed position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nucleon {
    pub kind: NucleonKind,
    pub position: Vec3,
}

/// The atom currently on screen
pub struct AtomState {
    element: &'static ElementRecord,
    layout: LayoutConfig,
    electrons: u32,
    nucleons: Vec<Nucleon>,
    nucleus_radius: f32,
    shells: ShellDistribution,
    orbits: Vec<OrbitState>,
    /// Nucleus rotation about the vertical axis
    spin: f32,
    pub paused: bool,
    /// Multiplier on every animation speed
    speed: f32,
}

impl AtomState {
    pub fn new(element: &'static ElementRecord, layout: LayoutConfig) -> Result<Self> {
        layout.validate()?;
        let (nucleons, nucleus_radius) = build_nucleus(element, layout.nucleon_radius)?;
        let electrons = element.electrons();
        let shells = shells::distribute(electrons);
        let orbits = orbit::build_orbits(&shells, nucleus_radius, &layout);

        Ok(Self {
            element,
            layout,
            electrons,
            nucleons,
            nucleus_radius,
            shells,
            orbits,
            spin: 0.0,
            paused: false,
            speed: 1.0,
        })
    }

    /// Start from an element name
    pub fn from_name(name: &str, layout: LayoutConfig) -> Result<Self> {
        Self::new(elements::lookup(name)?, layout)
    }

    /// Switch to the element called `name`, resetting to the neutral atom.
    ///
    /// The current state is left untouched when the name is unknown.
    pub fn select_element(&mut self, name: &str) -> Result<()> {
        let element = elements::lookup(name)?;
        self.set_element(element)
    }

    pub fn set_element(&mut self, element: &'static ElementRecord) -> Result<()> {
        let (nucleons, nucleus_radius) = build_nucleus(element, self.layout.nucleon_radius)?;

        self.element = element;
        self.nucleons = nucleons;
        self.nucleus_radius = nucleus_radius;
        self.spin = 0.0;
        self.rebuild_electrons(element.electrons());

        log::info!(
            "Selected {} ({}): {} protons, {} neutrons, shells {:?}",
            element.name,
            element.symbol,
            element.protons(),
            element.neutrons(),
            self.shells
        );
        Ok(())
    }

    /// Change the electron count, turning the atom into an ion.
    ///
    /// Counts beyond what the shell model holds are clamped.
    pub fn set_electron_count(&mut self, electrons: u32) {
        let electrons = electrons.min(MAX_ELECTRONS);
        if electrons == self.electrons {
            return;
        }

        let before = self.ion().kind();
        self.rebuild_electrons(electrons);
        let ion = self.ion();

        if ion.kind() != before {
            log::info!("{} is now: {} (charge {})", self.element.name, ion.kind(), ion.charge_label());
        } else {
            log::debug!("{} electrons, charge {}", electrons, ion.charge_label());
        }
    }

    /// Back to the neutral atom
    pub fn reset_electrons(&mut self) {
        self.set_electron_count(self.element.electrons());
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the animation speed multiplier; the old value stays on error
    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(AtomError::InvalidArgument(format!(
                "speed must be finite and non-negative, got {speed}"
            )));
        }
        self.speed = speed;
        Ok(())
    }

    /// Step the animation by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> Result<()> {
        let dt = orbit::validate_dt(dt)?;
        if self.paused {
            return Ok(());
        }

        let dt = orbit::validate_dt(dt * self.speed)?;
        for orbit in &mut self.orbits {
            orbit.advance(dt);
        }
        self.spin = (self.spin + self.layout.nucleus_spin * dt).rem_euclid(TAU);

        log::trace!("advanced {} electrons by {dt:.4}s", self.orbits.len());
        Ok(())
    }

    fn rebuild_electrons(&mut self, electrons: u32) {
        self.electrons = electrons;
        self.shells = shells::distribute(electrons);
        self.orbits = orbit::build_orbits(&self.shells, self.nucleus_radius, &self.layout);
    }

    pub fn element(&self) -> &'static ElementRecord {
        self.element
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn electron_count(&self) -> u32 {
        self.electrons
    }

    pub fn shells(&self) -> &[u32] {
        &self.shells
    }

    pub fn orbits(&self) -> &[OrbitState] {
        &self.orbits
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn nucleus_radius(&self) -> f32 {
        self.nucleus_radius
    }

    pub fn ion(&self) -> IonInfo {
        IonInfo::new(self.element.protons(), self.element.neutrons(), self.electrons)
    }

    /// Nucleons in scene space, including the current spin
    pub fn nucleons(&self) -> impl Iterator<Item = Nucleon> + '_ {
        let rotation = Quat::from_rotation_y(self.spin);
        self.nucleons.iter().map(move |n| Nucleon {
            kind: n.kind,
            position: rotation * n.position,
        })
    }

    /// Electron positions in scene space
    pub fn electrons(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.orbits.iter().map(OrbitState::position)
    }

    /// `(radius, tilt)` of every occupied shell's ring
    pub fn orbit_rings(&self) -> Vec<(f32, f32)> {
        (0..self.shells.len())
            .map(|shell| {
                let radius = orbit::shell_radius(shell, self.nucleus_radius, &self.layout);
                let tilt = self.layout.shell_tilts.get(shell).copied().unwrap_or(0.0);
                (radius, tilt)
            })
            .collect()
    }

    /// Radius of a sphere that contains the whole atom
    pub fn scene_radius(&self) -> f32 {
        match self.shells.len() {
            0 => self.nucleus_radius,
            n => {
                orbit::shell_radius(n - 1, self.nucleus_radius, &self.layout)
                    + self.layout.electron_radius
            }
        }
    }
}

/// Pack protons first, then neutrons, and report the nucleus's outer radius
fn build_nucleus(element: &ElementRecord, nucleon_radius: f32) -> Result<(Vec<Nucleon>, f32)> {
    let protons = element.protons() as usize;
    let total = protons + element.neutrons() as usize;
    let positions = packing::pack(total, nucleon_radius)?;
    let radius = packing::packed_radius(&positions, nucleon_radius);

    let nucleons = positions
        .into_iter()
        .enumerate()
        .map(|(i, position)| Nucleon {
            kind: if i < protons {
                NucleonKind::Proton
            } else {
                NucleonKind::Neutron
            },
            position,
        })
        .collect();

    Ok((nucleons, radius))
}
