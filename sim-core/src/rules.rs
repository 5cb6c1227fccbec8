//! Directed interaction rules between particle types.
//!
//! A [`RuleTable`] holds exactly one [`Rule`] for every ordered pair of types
//! in `0..type_count`, self-pairs included, stored densely as
//! `rules[source * type_count + target]`. Tables are never edited in place:
//! regenerating rules builds a new table and replaces the old one.

use crate::{
    error::{Result, SimError},
    types::{PairKey, ParticleType},
};
use rand::Rng;

/// Lower bound for a generated rule's `min_distance`.
pub const MIN_DISTANCE_FLOOR: f32 = 0.25;
/// Upper bound for a generated rule's `max_distance`.
pub const MAX_DISTANCE_CEIL: f32 = 3.25;

/// How particles of one type react to particles of another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// Signed long-range gain; positive attracts.
    pub g: f32,
    /// Distance below which short-range repulsion kicks in.
    pub min_distance: f32,
    /// Interaction cutoff.
    pub max_distance: f32,
}

impl Rule {
    pub fn new(g: f32, min_distance: f32, max_distance: f32) -> Self {
        Self {
            g,
            min_distance,
            max_distance,
        }
    }

    /// Draws a random rule.
    ///
    /// `|g|` is uniform in `g_range` with a fair sign flip. `min_distance` is
    /// uniform in `[MIN_DISTANCE_FLOOR, distance_range[0]]` and
    /// `max_distance` in `[distance_range[1], MAX_DISTANCE_CEIL]`, so the
    /// configured range is the gap the two distances straddle rather than a
    /// range either of them is drawn from.
    pub fn random(g_range: [f32; 2], distance_range: [f32; 2], rng: &mut impl Rng) -> Self {
        let g_lo = g_range[0].min(g_range[1]);
        let g_hi = g_range[0].max(g_range[1]);
        let magnitude = rng.random_range(g_lo..=g_hi);
        let g = if rng.random_bool(0.5) {
            -magnitude
        } else {
            magnitude
        };

        let min_hi = distance_range[0].clamp(MIN_DISTANCE_FLOOR, MAX_DISTANCE_CEIL);
        let max_lo = distance_range[1].clamp(min_hi, MAX_DISTANCE_CEIL);

        Self {
            g,
            min_distance: rng.random_range(MIN_DISTANCE_FLOOR..=min_hi),
            max_distance: rng.random_range(max_lo..=MAX_DISTANCE_CEIL),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    type_count: usize,
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Builds a table by asking `f` for the rule of every ordered pair.
    pub fn from_fn(
        type_count: usize,
        mut f: impl FnMut(ParticleType, ParticleType) -> Rule,
    ) -> Self {
        let mut rules = Vec::with_capacity(type_count * type_count);
        for source in 0..type_count {
            for target in 0..type_count {
                rules.push(f(source as ParticleType, target as ParticleType));
            }
        }
        Self { type_count, rules }
    }

    /// Generates a fresh random rule for every ordered pair of types,
    /// self-pairs included. Zero types yields an empty table.
    pub fn generate(
        type_count: usize,
        g_range: [f32; 2],
        distance_range: [f32; 2],
        rng: &mut impl Rng,
    ) -> Self {
        let table = Self::from_fn(type_count, |_, _| {
            Rule::random(g_range, distance_range, &mut *rng)
        });
        log::debug!(
            "generated {} rules for {} particle types",
            table.len(),
            type_count
        );
        table
    }

    pub fn type_count(&self) -> usize {
        self.type_count
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether every pair involving `kind` has a rule.
    #[inline]
    pub fn covers(&self, kind: ParticleType) -> bool {
        (kind as usize) < self.type_count
    }

    /// Rule governing how `source` particles react to `target` particles.
    ///
    /// A missing pair is a setup bug, not something a caller should paper
    /// over: the error is meant to abort the tick.
    #[inline]
    pub fn lookup(&self, source: ParticleType, target: ParticleType) -> Result<Rule> {
        if self.covers(source) && self.covers(target) {
            Ok(self.rules[source as usize * self.type_count + target as usize])
        } else {
            Err(SimError::MissingRule {
                key: PairKey::new(source, target),
            })
        }
    }

    /// All rules in `(source, target)` row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (PairKey, &Rule)> + '_ {
        let n = self.type_count.max(1);
        self.rules.iter().enumerate().map(move |(i, rule)| {
            let key = PairKey::new((i / n) as ParticleType, (i % n) as ParticleType);
            (key, rule)
        })
    }

    /// One line per rule, `"{source} -> {target}: {g} ({min} - {max})"`,
    /// with type names supplied by `name`.
    pub fn summary(&self, name: impl Fn(ParticleType) -> String) -> Vec<String> {
        self.iter()
            .map(|(key, rule)| {
                format!(
                    "{} -> {}: {} ({} - {})",
                    name(key.source()),
                    name(key.target()),
                    rule.g,
                    rule.min_distance,
                    rule.max_distance
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generate_covers_every_ordered_pair() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let table = RuleTable::generate(4, [0.2, 1.0], [0.5, 2.0], &mut rng);

        assert_eq!(table.len(), 16);
        for a in 0..4 {
            for b in 0..4 {
                assert!(table.lookup(a, b).is_ok(), "missing {a} -> {b}");
            }
        }
    }

    #[test]
    fn generated_rules_respect_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let table = RuleTable::generate(6, [0.2, 0.7], [0.6, 1.8], &mut rng);

        for (_, rule) in table.iter() {
            assert!((0.2..=0.7).contains(&rule.g.abs()));
            assert!((MIN_DISTANCE_FLOOR..=0.6).contains(&rule.min_distance));
            assert!((1.8..=MAX_DISTANCE_CEIL).contains(&rule.max_distance));
            assert!(rule.min_distance < rule.max_distance);
        }
    }

    #[test]
    fn generated_signs_are_mixed() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let table = RuleTable::generate(8, [0.5, 1.0], [0.5, 2.0], &mut rng);

        assert!(table.iter().any(|(_, r)| r.g > 0.0));
        assert!(table.iter().any(|(_, r)| r.g < 0.0));
    }

    #[test]
    fn same_seed_same_table() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        let a = RuleTable::generate(3, [0.0, 1.0], [0.25, 3.0], &mut rng_a);
        let b = RuleTable::generate(3, [0.0, 1.0], [0.25, 3.0], &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_types_gives_empty_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let table = RuleTable::generate(0, [0.2, 1.0], [0.5, 2.0], &mut rng);
        assert!(table.is_empty());
        assert!(matches!(
            table.lookup(0, 0),
            Err(SimError::MissingRule { .. })
        ));
    }

    #[test]
    fn lookup_is_directed() {
        let table = RuleTable::from_fn(2, |a, b| Rule::new(a as f32 * 10.0 + b as f32, 0.5, 2.0));
        assert_eq!(table.lookup(0, 1).map(|r| r.g).ok(), Some(1.0));
        assert_eq!(table.lookup(1, 0).map(|r| r.g).ok(), Some(10.0));
    }

    #[test]
    fn lookup_outside_table_reports_pair() {
        let table = RuleTable::from_fn(2, |_, _| Rule::new(1.0, 0.5, 2.0));
        match table.lookup(1, 5) {
            Err(SimError::MissingRule { key }) => assert_eq!(key, PairKey::new(1, 5)),
            other => panic!("expected MissingRule, got {other:?}"),
        }
    }

    #[test]
    fn summary_formats_each_rule() {
        let table = RuleTable::from_fn(2, |a, b| {
            if a == b {
                Rule::new(0.5, 0.25, 3.0)
            } else {
                Rule::new(-1.0, 0.5, 2.0)
            }
        });
        let names = ["Red", "Green"];
        let lines = table.summary(|t| names[t as usize].to_string());

        assert_eq!(
            lines,
            vec![
                "Red -> Red: 0.5 (0.25 - 3)",
                "Red -> Green: -1 (0.5 - 2)",
                "Green -> Red: -1 (0.5 - 2)",
                "Green -> Green: 0.5 (0.25 - 3)",
            ]
        );
    }
}
