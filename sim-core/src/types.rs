/// Identifier of a particle group (one colour in the viewer).
///
/// Types are dense indices in `0..group_count`, so they double as row and
/// column indices into a [`crate::rules::RuleTable`].
pub type ParticleType = u32;

/// Packed key for a directed `(source, target)` type pair.
///
/// The source occupies the high 32 bits and the target the low 32 bits, so
/// the packing is injective over the whole `u32` range and `(a, b)` never
/// equals `(b, a)` unless `a == b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(u64);

impl PairKey {
    pub const fn new(source: ParticleType, target: ParticleType) -> Self {
        Self(((source as u64) << 32) | target as u64)
    }

    pub const fn source(self) -> ParticleType {
        (self.0 >> 32) as ParticleType
    }

    pub const fn target(self) -> ParticleType {
        self.0 as ParticleType
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source(), self.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_unpacks_to_its_parts() {
        let key = PairKey::new(7, 42);
        assert_eq!(key.source(), 7);
        assert_eq!(key.target(), 42);
    }

    #[test]
    fn key_is_directed() {
        assert_ne!(PairKey::new(1, 2), PairKey::new(2, 1));
        assert_eq!(PairKey::new(3, 3).source(), PairKey::new(3, 3).target());
    }

    #[test]
    fn key_survives_large_ids() {
        let big = (1u32 << 31) - 1;
        let key = PairKey::new(big, 0);
        assert_eq!(key.source(), big);
        assert_eq!(key.target(), 0);
        assert_ne!(key, PairKey::new(0, big));
    }

    #[test]
    fn key_displays_as_arrow() {
        assert_eq!(PairKey::new(0, 3).to_string(), "0 -> 3");
    }
}
