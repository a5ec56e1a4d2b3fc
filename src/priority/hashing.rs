use sha2::{Digest, Sha256};

pub const HASH_MODULUS: u64 = 1_000_000_007;
pub const FACTOR_SHIFTS: [u32; 8] = [0, 8, 16, 24, 32, 40, 48, 56];

/// Stable 64-bit hash: the leading 8 bytes of SHA-256, big-endian.
pub fn stable_hash(input: &str) -> u64 {
    let digest = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Maps a hash to [0, 1) through the modulus.
pub fn unit_factor(hash: u64) -> f64 {
    (hash % HASH_MODULUS) as f64 / HASH_MODULUS as f64
}

/// Mixing hashes for one candidate's identity string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHashes {
    pub primary: u64,
    pub secondary: u64,
    pub tertiary: u64,
    pub resource: u64,
}

impl SlotHashes {
    pub fn new(identity: &str, resource_product: u64) -> Self {
        Self {
            primary: stable_hash(identity),
            secondary: stable_hash(&format!("{identity}_secondary")),
            tertiary: stable_hash(&format!("{identity}_tertiary")),
            resource: stable_hash(&resource_product.to_string()),
        }
    }

    pub fn as_array(&self) -> [u64; 4] {
        [self.primary, self.secondary, self.tertiary, self.resource]
    }

    /// 32 factors in [0, 1): each hash shifted by every width in
    /// [`FACTOR_SHIFTS`], hash-major.
    pub fn factors(&self) -> Vec<f64> {
        self.as_array()
            .iter()
            .flat_map(|hash| FACTOR_SHIFTS.iter().map(move |shift| unit_factor(hash >> shift)))
            .collect()
    }

    /// Offset below 0.0112 built from four decreasing scales, used only to split ties.
    pub fn micro_adjustment(&self) -> f64 {
        (self.primary % HASH_MODULUS) as f64 / 1e11
            + (self.secondary % HASH_MODULUS) as f64 / 1e12
            + (self.tertiary % HASH_MODULUS) as f64 / 1e13
            + (self.resource % HASH_MODULUS) as f64 / 1e14
    }
}
