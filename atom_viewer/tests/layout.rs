//! Integration tests for shell filling, nucleon packing and the atom state.

use approx::assert_relative_eq;
use clap::Parser;
use atom_viewer::{
    distribute, pack, AtomError, AtomState, CliArgs, LayoutConfig, NucleonKind, ELEMENTS,
    SHELL_CAPACITIES,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn distribution_properties_for_table_range() {
    for n in 0..=20 {
        let shells = distribute(n);
        assert_eq!(shells.iter().sum::<u32>(), n, "n = {n}");
        assert!(shells.len() <= SHELL_CAPACITIES.len());
        for (i, &count) in shells.iter().enumerate() {
            assert!(count <= SHELL_CAPACITIES[i], "n = {n}, shell {i}");
        }
    }
}

#[test]
fn distribution_reference_values() {
    assert!(distribute(0).is_empty());
    assert_eq!(distribute(2), vec![2]);
    assert_eq!(distribute(10), vec![2, 8]);
    assert_eq!(distribute(20), vec![2, 8, 8, 2]);
}

#[test]
fn distribution_saturates_past_capacity_total() {
    let full = vec![2, 8, 8, 8];
    for n in [26, 27, 40, 1000] {
        assert_eq!(distribute(n), full, "n = {n}");
    }
}

#[test]
fn pack_length_matches_count() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let count = rng.gen_range(0..200);
        let radius = rng.gen_range(0.05..5.0);
        assert_eq!(pack(count, radius).unwrap().len(), count);
    }
}

#[test]
fn pack_small_cases() {
    assert!(pack(0, 0.5).unwrap().is_empty());
    assert_eq!(pack(1, 0.5).unwrap(), vec![glam::Vec3::ZERO]);
}

#[test]
fn pack_is_bit_identical_across_calls() {
    for count in [0, 1, 5, 21, 40, 77] {
        let a = pack(count, 0.37).unwrap();
        let b = pack(count, 0.37).unwrap();
        let bits = |v: &[glam::Vec3]| -> Vec<[u32; 3]> {
            v.iter()
                .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
                .collect()
        };
        assert_eq!(bits(&a), bits(&b), "count = {count}");
    }
}

#[test]
fn pack_never_repeats_a_position() {
    for count in [2, 5, 20, 40, 100] {
        let positions = pack(count, 0.5).unwrap();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(a.distance(*b) > 1e-4, "count = {count}: {a} repeats");
            }
        }
    }
}

#[test]
fn pack_rejects_invalid_radius() {
    assert!(matches!(pack(4, 0.0), Err(AtomError::InvalidArgument(_))));
    assert!(matches!(pack(4, f32::NAN), Err(AtomError::InvalidArgument(_))));
}

#[test]
fn huge_radius_never_yields_infinite_positions() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let count = rng.gen_range(2..=40);
        let exponent = rng.gen_range(30.0f32..38.5);
        let radius = 10f32.powf(exponent);
        match pack(count, radius) {
            Ok(positions) => assert!(positions.iter().all(|p| p.is_finite()), "r = {radius}"),
            Err(e) => assert!(matches!(e, AtomError::InvalidArgument(_))),
        }
    }

    let args = CliArgs::parse_from(["atom_viewer", "--element", "Calcium", "--nucleon-radius", "1e38"]);
    assert!(matches!(LayoutConfig::from_args(&args), Err(AtomError::InvalidArgument(_))));
    assert!(matches!(pack(usize::MAX, 1.0), Err(AtomError::InvalidArgument(_))));
}

#[test]
fn every_element_builds() {
    for element in &ELEMENTS {
        let atom = AtomState::new(element, LayoutConfig::default()).unwrap();
        let nucleons: Vec<_> = atom.nucleons().collect();

        assert_eq!(nucleons.len() as u32, element.atomic_mass, "{}", element.name);
        let protons = nucleons.iter().filter(|n| n.kind == NucleonKind::Proton).count();
        assert_eq!(protons as u32, element.atomic_number, "{}", element.name);
        assert_eq!(atom.electrons().count() as u32, element.atomic_number);
        assert_eq!(atom.ion().charge(), 0);
    }
}

#[test]
fn nucleons_follow_packing_order() {
    let layout = LayoutConfig::default();
    let atom = AtomState::from_name("Nitrogen", layout.clone()).unwrap();
    let expected = pack(14, layout.nucleon_radius).unwrap();

    for (i, (nucleon, position)) in atom.nucleons().zip(&expected).enumerate() {
        let kind = if i < 7 { NucleonKind::Proton } else { NucleonKind::Neutron };
        assert_eq!(nucleon.kind, kind);
        assert_relative_eq!(nucleon.position.distance(*position), 0.0);
    }
}

#[test]
fn animation_loop_keeps_electrons_on_their_shells() {
    let mut atom = AtomState::from_name("Potassium", LayoutConfig::default()).unwrap();
    for _ in 0..600 {
        atom.advance(1.0 / 60.0).unwrap();
    }

    for (orbit, position) in atom.orbits().iter().zip(atom.electrons()) {
        assert_relative_eq!(position.length(), orbit.radius, epsilon = 1e-3);
        assert!(orbit.angle >= 0.0 && orbit.angle < std::f32::consts::TAU);
    }
}
