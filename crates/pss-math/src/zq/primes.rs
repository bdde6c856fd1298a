//! Generation of primes suitable for number-theoretic transforms.

use pss_util::is_prime;

/// Returns the largest prime `p` of `num_bits` bits with `p < upper_bound`
/// and `p ≡ 1 (mod modulo)`, if one exists.
///
/// Returns None if `num_bits` is not between 10 and 62, if `modulo` is zero,
/// or if `upper_bound` does not lie in `(2^(num_bits - 1), 2^num_bits]`.
pub fn generate_prime(num_bits: usize, modulo: u64, upper_bound: u64) -> Option<u64> {
    if !(10..=62).contains(&num_bits) || modulo == 0 {
        return None;
    }
    let lower_bound = 1u64 << (num_bits - 1);
    if upper_bound <= lower_bound || upper_bound > (1u64 << num_bits) {
        return None;
    }

    let mut candidate = upper_bound - 1;
    candidate -= candidate % modulo;
    candidate += 1;
    if candidate >= upper_bound {
        candidate = candidate.checked_sub(modulo)?;
    }

    while candidate > lower_bound {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate = candidate.checked_sub(modulo)?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::generate_prime;
    use pss_util::is_prime;

    #[test]
    fn invalid_arguments() {
        assert_eq!(generate_prime(9, 2, 1 << 9), None);
        assert_eq!(generate_prime(63, 2, 1 << 62), None);
        assert_eq!(generate_prime(20, 0, 1 << 20), None);
        assert_eq!(generate_prime(20, 2, 1 << 19), None);
        assert_eq!(generate_prime(20, 2, (1 << 20) + 1), None);
    }

    #[test]
    fn known_primes() {
        assert_eq!(generate_prime(30, 119 << 23, 1 << 30), Some(998244353));
        // 2013265921 = 15 * 2^27 + 1 is the largest candidate below 2^31.
        assert_eq!(generate_prime(31, 1 << 27, 1 << 31), Some(2013265921));
        // Nothing of 11 bits is 1 modulo 2^12.
        assert_eq!(generate_prime(11, 1 << 12, 1 << 11), None);
    }

    #[test]
    fn ntt_friendly_62_bits() {
        let mut upper_bound = 1u64 << 62;
        for _ in 0..3 {
            let p = generate_prime(62, 1 << 21, upper_bound).unwrap();
            assert!(is_prime(p));
            assert_eq!(p % (1 << 21), 1);
            assert_eq!(64 - p.leading_zeros(), 62);
            assert!(p < upper_bound);
            upper_bound = p;
        }
    }
}
