//! Electron shell filling
//!
//! Electrons fill shells innermost first, using the simplified capacities
//! 2, 8, 8, 8. Only four shells exist, which is enough for the table's last
//! element (calcium, 20 electrons).

/// Maximum electrons per shell, innermost first
pub const SHELL_CAPACITIES: [u32; 4] = [2, 8, 8, 8];

/// Electron count per shell, innermost first
pub type ShellDistribution = Vec<u32>;

/// Total electrons the shell model can hold
pub const MAX_ELECTRONS: u32 = {
    let mut total = 0;
    let mut i = 0;
    while i < SHELL_CAPACITIES.len() {
        total += SHELL_CAPACITIES[i];
        i += 1;
    }
    total
};

/// Split `electron_count` across shells.
///
/// Empty shells are never emitted. Electrons beyond [`MAX_ELECTRONS`] have no
/// shell and are dropped.
pub fn distribute(electron_count: u32) -> ShellDistribution {
    let mut remaining = electron_count;
    let mut shells = Vec::with_capacity(SHELL_CAPACITIES.len());

    for &capacity in &SHELL_CAPACITIES {
        if remaining == 0 {
            break;
        }
        let filled = remaining.min(capacity);
        shells.push(filled);
        remaining -= filled;
    }

    shells
}
