//! Random password generation.

use rand::Rng;

/// Letters, digits and the shifted-number-row symbols.
const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+";

/// Generate a password of `length` characters drawn uniformly from
/// [`CHARSET`] using the thread-local RNG.
pub fn generate(length: usize) -> String {
    generate_with(&mut rand::thread_rng(), length)
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn respects_requested_length() {
        for length in [0, 1, 12, 30, 128] {
            assert_eq!(generate(length).len(), length);
        }
    }

    #[test]
    fn only_draws_from_the_charset() {
        let mut rng = StdRng::seed_from_u64(7);
        let password = generate_with(&mut rng, 512);
        assert!(password.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate_with(&mut StdRng::seed_from_u64(42), 16);
        let b = generate_with(&mut StdRng::seed_from_u64(42), 16);
        assert_eq!(a, b);
    }
}
