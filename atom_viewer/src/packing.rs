//! Nucleon placement
//!
//! Nucleons are laid out on concentric spherical shells. Each shell is
//! filled with a Fibonacci (golden-angle) spiral, which spreads points almost
//! evenly over the sphere without any randomness.

use glam::Vec3;
use std::f32::consts::PI;

use crate::error::{AtomError, Result};

/// Distance between successive layers, in nucleon radii
const LAYER_SPACING: f32 = 1.5;
/// Layers are pulled in slightly so the nucleus reads as one cluster
const LAYER_TIGHTENING: f32 = 0.9;

/// Number of points layer `layer` holds
pub fn layer_capacity(layer: usize) -> usize {
    if layer == 0 {
        1
    } else {
        4 * layer * layer
    }
}

/// Radius of layer `layer` for nucleons of radius `unit_radius`
pub fn layer_radius(layer: usize, unit_radius: f32) -> f32 {
    layer as f32 * unit_radius * LAYER_SPACING * LAYER_TIGHTENING
}

/// Index of the last layer needed to hold `total_count` points
pub fn outermost_layer(total_count: usize) -> usize {
    let mut layer = 0;
    let mut held = layer_capacity(0);
    while held < total_count {
        layer += 1;
        held = held.saturating_add(layer_capacity(layer));
    }
    layer
}

/// The `index`-th of `count` golden-spiral points on a sphere of `radius`
pub fn fibonacci_point(index: usize, count: usize, radius: f32) -> Vec3 {
    let golden = PI * (1.0 + 5.0f32.sqrt());
    let theta = (1.0 - 2.0 * (index as f32 + 0.5) / count as f32).acos();
    let phi = golden * index as f32;

    Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    )
}

/// Place `total_count` nucleons of radius `unit_radius` around the origin.
///
/// Layers fill outward from a single nucleon at the origin; the outermost
/// layer is truncated once `total_count` positions exist. The result only
/// depends on the arguments.
pub fn pack(total_count: usize, unit_radius: f32) -> Result<Vec<Vec3>> {
    if !unit_radius.is_finite() || unit_radius <= 0.0 {
        return Err(AtomError::InvalidArgument(format!(
            "nucleon radius must be positive and finite, got {unit_radius}"
        )));
    }

    let outer = layer_radius(outermost_layer(total_count), unit_radius);
    if !outer.is_finite() {
        return Err(AtomError::InvalidArgument(format!(
            "nucleon radius {unit_radius} is too large for {total_count} nucleons"
        )));
    }

    let mut positions = Vec::new();
    positions.try_reserve(total_count).map_err(|_| {
        AtomError::InvalidArgument(format!("cannot place {total_count} nucleons"))
    })?;
    let mut layer = 0;

    while positions.len() < total_count {
        let capacity = layer_capacity(layer);
        let radius = layer_radius(layer, unit_radius);
        let take = capacity.min(total_count - positions.len());

        positions.extend((0..take).map(|i| fibonacci_point(i, capacity, radius)));
        layer += 1;
    }

    Ok(positions)
}

/// Distance from the origin to the outer surface of the packed nucleus
pub fn packed_radius(positions: &[Vec3], unit_radius: f32) -> f32 {
    positions
        .iter()
        .map(|p| p.length())
        .fold(0.0, f32::max)
        + unit_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_nucleus() {
        assert!(pack(0, 1.0).unwrap().is_empty());
    }

    #[test]
    fn single_nucleon_sits_at_origin() {
        assert_eq!(pack(1, 0.5).unwrap(), vec![Vec3::ZERO]);
    }

    #[test]
    fn layer_capacities() {
        assert_eq!(layer_capacity(0), 1);
        assert_eq!(layer_capacity(1), 4);
        assert_eq!(layer_capacity(2), 16);
        assert_eq!(layer_capacity(3), 36);
    }

    #[test]
    fn second_nucleon_starts_first_layer() {
        let positions = pack(2, 1.0).unwrap();
        assert_relative_eq!(positions[1].length(), 1.35, epsilon = 1e-5);
    }

    #[test]
    fn layers_fill_in_order() {
        let unit = 0.5;
        let positions = pack(40, unit).unwrap();
        let expected_layers = std::iter::once(0)
            .chain(std::iter::repeat(1).take(4))
            .chain(std::iter::repeat(2).take(16))
            .chain(std::iter::repeat(3).take(19));

        for (p, layer) in positions.iter().zip(expected_layers) {
            assert_relative_eq!(p.length(), layer_radius(layer, unit), epsilon = 1e-4);
        }
    }

    #[test]
    fn partial_layer_is_prefix_of_full_layer() {
        let partial = pack(10, 1.0).unwrap();
        let full = pack(21, 1.0).unwrap();
        assert_eq!(&partial[..], &full[..10]);
    }

    #[test]
    fn rejects_bad_radius() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(pack(3, radius), Err(AtomError::InvalidArgument(_))));
        }
    }

    #[test]
    fn outermost_layer_counts() {
        assert_eq!(outermost_layer(0), 0);
        assert_eq!(outermost_layer(1), 0);
        assert_eq!(outermost_layer(2), 1);
        assert_eq!(outermost_layer(5), 1);
        assert_eq!(outermost_layer(6), 2);
        assert_eq!(outermost_layer(21), 2);
        assert_eq!(outermost_layer(22), 3);
    }

    #[test]
    fn rejects_radius_that_overflows_outer_layer() {
        assert!(matches!(pack(30, 1e38), Err(AtomError::InvalidArgument(_))));
        assert!(matches!(pack(2, f32::MAX), Err(AtomError::InvalidArgument(_))));
        // A lone nucleon at the origin never leaves layer 0
        assert_eq!(pack(1, 1e38).unwrap(), vec![Vec3::ZERO]);
    }

    #[test]
    fn unplaceable_count_is_an_error() {
        assert!(matches!(pack(usize::MAX, 1.0), Err(AtomError::InvalidArgument(_))));
    }

    #[test]
    fn packed_radius_includes_nucleon() {
        let positions = pack(5, 1.0).unwrap();
        assert_relative_eq!(packed_radius(&positions, 1.0), 2.35, epsilon = 1e-5);
        assert_relative_eq!(packed_radius(&[], 1.0), 1.0);
    }
}
