// src/world_lib/random.rs

// String seed -> 32-bit hash (h * 31 + c over UTF-16 units) -> Park-Miller stream.

const MODULUS: i64 = 2_147_483_647;
const MULTIPLIER: i64 = 16_807;

#[derive(Clone, Debug)]
pub struct SeededStream {
    state: i64,
}

impl SeededStream {
    pub fn from_seed(seed: &str) -> Self {
        Self::from_hash(hash_seed(seed))
    }

    pub fn from_hash(hash: i32) -> Self {
        // The Lehmer recurrence needs a state in [1, MODULUS - 1].
        let mut state = i64::from(hash).rem_euclid(MODULUS);
        if state == 0 {
            state = 1;
        }
        Self { state }
    }

    // Next value, uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    pub fn next_bool(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

pub fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededStream::from_seed("default");
        let mut b = SeededStream::from_seed("default");
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededStream::from_seed("alpha");
        let mut b = SeededStream::from_seed("beta");
        let same = (0..32).filter(|_| a.next_f64() == b.next_f64()).count();
        assert!(same < 32);
    }

    #[test]
    fn values_stay_in_unit_interval() {
        // Empty and negative-hash seeds included.
        for seed in ["", "default", "zzzzzzzzzzzzzzzzzzzzzz", "\u{ffff}\u{ffff}\u{ffff}"] {
            let mut stream = SeededStream::from_seed(seed);
            for _ in 0..10_000 {
                let v = stream.next_f64();
                assert!((0.0..1.0).contains(&v), "{seed:?} produced {v}");
            }
        }
    }

    #[test]
    fn hash_matches_known_values() {
        assert_eq!(hash_seed(""), 0);
        assert_eq!(hash_seed("a"), 97);
        assert_eq!(hash_seed("ab"), 97 * 31 + 98);
    }
}
