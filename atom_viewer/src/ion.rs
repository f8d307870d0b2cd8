//! Mass number and ionic charge

use std::fmt;

/// Sign of an atom's net charge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeKind {
    Cation,
    Anion,
    Neutral,
}

impl ChargeKind {
    pub fn from_charge(charge: i32) -> Self {
        match charge {
            c if c > 0 => ChargeKind::Cation,
            c if c < 0 => ChargeKind::Anion,
            _ => ChargeKind::Neutral,
        }
    }
}

impl fmt::Display for ChargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeKind::Cation => write!(f, "Cation"),
            ChargeKind::Anion => write!(f, "Anion"),
            ChargeKind::Neutral => write!(f, "No ionic charge"),
        }
    }
}

/// Particle counts of the current configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IonInfo {
    pub protons: u32,
    pub neutrons: u32,
    pub electrons: u32,
}

impl IonInfo {
    pub fn new(protons: u32, neutrons: u32, electrons: u32) -> Self {
        Self {
            protons,
            neutrons,
            electrons,
        }
    }

    pub fn mass_number(&self) -> u32 {
        self.protons + self.neutrons
    }

    /// Protons minus electrons
    pub fn charge(&self) -> i32 {
        self.protons as i32 - self.electrons as i32
    }

    pub fn kind(&self) -> ChargeKind {
        ChargeKind::from_charge(self.charge())
    }

    /// Charge written the way it appears on an ion symbol: "2+", "1-", "0"
    pub fn charge_label(&self) -> String {
        match self.charge() {
            0 => "0".to_string(),
            c if c > 0 => format!("{c}+"),
            c => format!("{}-", -c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_hydrogen() {
        let ion = IonInfo::new(1, 0, 1);
        assert_eq!(ion.mass_number(), 1);
        assert_eq!(ion.charge(), 0);
        assert_eq!(ion.kind(), ChargeKind::Neutral);
        assert_eq!(ion.charge_label(), "0");
    }

    #[test]
    fn hydride_is_an_anion() {
        let ion = IonInfo::new(1, 0, 2);
        assert_eq!(ion.charge(), -1);
        assert_eq!(ion.kind(), ChargeKind::Anion);
        assert_eq!(ion.charge_label(), "1-");
    }

    #[test]
    fn magnesium_ion_is_a_cation() {
        let ion = IonInfo::new(12, 12, 10);
        assert_eq!(ion.mass_number(), 24);
        assert_eq!(ion.charge(), 2);
        assert_eq!(ion.kind(), ChargeKind::Cation);
        assert_eq!(ion.charge_label(), "2+");
    }

    #[test]
    fn kind_display() {
        assert_eq!(ChargeKind::Cation.to_string(), "Cation");
        assert_eq!(ChargeKind::Anion.to_string(), "Anion");
        assert_eq!(ChargeKind::Neutral.to_string(), "No ionic charge");
    }
}
