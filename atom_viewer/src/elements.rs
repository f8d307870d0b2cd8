//! Periodic table slice covering hydrogen through calcium
//!
//! Atomic masses are the rounded mass numbers of each element's most common
//! isotope, so `atomic_mass - atomic_number` is the neutron count drawn in
//! the nucleus.

use crate::error::{AtomError, Result};

/// Static facts about one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRecord {
    pub name: &'static str,
    pub atomic_number: u32,
    pub atomic_mass: u32,
    pub symbol: &'static str,
    pub group_name: &'static str,
    pub group: u32,
    pub period: u32,
}

impl ElementRecord {
    pub const fn protons(&self) -> u32 {
        self.atomic_number
    }

    pub const fn neutrons(&self) -> u32 {
        self.atomic_mass - self.atomic_number
    }

    /// Electron count of the neutral atom
    pub const fn electrons(&self) -> u32 {
        self.atomic_number
    }

    /// Highlight color for the element's chemical group
    pub fn group_color(&self) -> [f32; 4] {
        match self.group_name {
            "Alkali Metal" => [0.95, 0.55, 0.35, 1.0],
            "Alkaline Earth Metal" => [0.95, 0.80, 0.40, 1.0],
            "Metalloid" => [0.55, 0.75, 0.55, 1.0],
            "Post-transition Metal" => [0.65, 0.70, 0.80, 1.0],
            "Halogen" => [0.60, 0.90, 0.50, 1.0],
            "Noble Gas" => [0.70, 0.55, 0.95, 1.0],
            _ => [0.50, 0.80, 0.95, 1.0],
        }
    }
}

macro_rules! element {
    ($name:expr, $z:expr, $mass:expr, $symbol:expr, $group_name:expr, $group:expr, $period:expr) => {
        ElementRecord {
            name: $name,
            atomic_number: $z,
            atomic_mass: $mass,
            symbol: $symbol,
            group_name: $group_name,
            group: $group,
            period: $period,
        }
    };
}

/// Elements 1 through 20 in atomic-number order
pub const ELEMENTS: [ElementRecord; 20] = [
    element!("Hydrogen", 1, 1, "H", "Nonmetal", 1, 1),
    element!("Helium", 2, 4, "He", "Noble Gas", 18, 1),
    element!("Lithium", 3, 7, "Li", "Alkali Metal", 1, 2),
    element!("Beryllium", 4, 9, "Be", "Alkaline Earth Metal", 2, 2),
    element!("Boron", 5, 11, "B", "Metalloid", 13, 2),
    element!("Carbon", 6, 12, "C", "Nonmetal", 14, 2),
    element!("Nitrogen", 7, 14, "N", "Nonmetal", 15, 2),
    element!("Oxygen", 8, 16, "O", "Nonmetal", 16, 2),
    element!("Fluorine", 9, 19, "F", "Halogen", 17, 2),
    element!("Neon", 10, 20, "Ne", "Noble Gas", 18, 2),
    element!("Sodium", 11, 23, "Na", "Alkali Metal", 1, 3),
    element!("Magnesium", 12, 24, "Mg", "Alkaline Earth Metal", 2, 3),
    element!("Aluminium", 13, 27, "Al", "Post-transition Metal", 13, 3),
    element!("Silicon", 14, 28, "Si", "Metalloid", 14, 3),
    element!("Phosphorus", 15, 31, "P", "Nonmetal", 15, 3),
    element!("Sulfur", 16, 32, "S", "Nonmetal", 16, 3),
    element!("Chlorine", 17, 35, "Cl", "Halogen", 17, 3),
    element!("Argon", 18, 40, "Ar", "Noble Gas", 18, 3),
    element!("Potassium", 19, 39, "K", "Alkali Metal", 1, 4),
    element!("Calcium", 20, 40, "Ca", "Alkaline Earth Metal", 2, 4),
];

/// Look up an element by name, ignoring ASCII case
pub fn find(name: &str) -> Option<&'static ElementRecord> {
    let name = name.trim();
    ELEMENTS.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

/// Like [`find`], but reports a missing name as an error
pub fn lookup(name: &str) -> Result<&'static ElementRecord> {
    find(name).ok_or_else(|| AtomError::UnknownElement(name.to_string()))
}

pub fn by_atomic_number(z: u32) -> Option<&'static ElementRecord> {
    ELEMENTS.iter().find(|e| e.atomic_number == z)
}

/// The element after `current` in table order, wrapping around
pub fn next(current: &ElementRecord) -> &'static ElementRecord {
    let idx = index_of(current);
    &ELEMENTS[(idx + 1) % ELEMENTS.len()]
}

/// The element before `current` in table order, wrapping around
pub fn previous(current: &ElementRecord) -> &'static ElementRecord {
    let idx = index_of(current);
    &ELEMENTS[(idx + ELEMENTS.len() - 1) % ELEMENTS.len()]
}

fn index_of(element: &ElementRecord) -> usize {
    ELEMENTS
        .iter()
        .position(|e| e.atomic_number == element.atomic_number)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_by_atomic_number() {
        for (i, element) in ELEMENTS.iter().enumerate() {
            assert_eq!(element.atomic_number, i as u32 + 1, "{}", element.name);
        }
    }

    #[test]
    fn neutron_counts_are_non_negative() {
        for element in &ELEMENTS {
            assert!(element.atomic_mass >= element.atomic_number, "{}", element.name);
        }
    }

    #[test]
    fn names_and_symbols_are_unique() {
        for (i, a) in ELEMENTS.iter().enumerate() {
            for b in &ELEMENTS[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.symbol, b.symbol);
            }
        }
    }

    #[test]
    fn periods_match_atomic_number() {
        for element in &ELEMENTS {
            let expected = match element.atomic_number {
                1..=2 => 1,
                3..=10 => 2,
                11..=18 => 3,
                _ => 4,
            };
            assert_eq!(element.period, expected, "{}", element.name);
        }
    }

    #[test]
    fn find_ignores_case_and_whitespace() {
        let carbon = find("  carbon ").unwrap();
        assert_eq!(carbon.symbol, "C");
        assert_eq!(carbon.neutrons(), 6);
    }

    #[test]
    fn lookup_reports_unknown_names() {
        assert_eq!(
            lookup("Unobtainium"),
            Err(AtomError::UnknownElement("Unobtainium".to_string()))
        );
    }

    #[test]
    fn argon_is_heavier_than_potassium() {
        let argon = find("Argon").unwrap();
        let potassium = find("Potassium").unwrap();
        assert_eq!(argon.neutrons(), 22);
        assert_eq!(potassium.neutrons(), 20);
    }

    #[test]
    fn next_and_previous_wrap() {
        let hydrogen = &ELEMENTS[0];
        let calcium = &ELEMENTS[19];
        assert_eq!(next(calcium).name, "Hydrogen");
        assert_eq!(previous(hydrogen).name, "Calcium");
        assert_eq!(next(hydrogen).name, "Helium");
    }

    #[test]
    fn by_atomic_number_bounds() {
        assert_eq!(by_atomic_number(20).map(|e| e.symbol), Some("Ca"));
        assert!(by_atomic_number(0).is_none());
        assert!(by_atomic_number(21).is_none());
    }
}
