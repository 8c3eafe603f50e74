//! Per-field random source. Each field owns its own `SmallRng`; nothing is
//! shared between instances.

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Fresh RNG seeded from the host.
pub fn host_rng() -> SmallRng {
    SmallRng::seed_from_u64(host_seed())
}

/// Deterministic RNG for reproducible fields (tests, screenshots).
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn host_seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => return u64::from_le_bytes(buf),
            Err(e) => log::debug!("getrandom unavailable ({e}); seeding from clock"),
        }
    }
    clock_seed()
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    // Simple linear transform so close timestamps still diverge (not crypto secure)
    (now.to_bits())
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
