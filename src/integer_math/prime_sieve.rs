// src/integer_math/prime_sieve.rs

pub struct PrimeSieve;

impl PrimeSieve {
    /// All primes <= bound via the sieve of Eratosthenes.
    /// Returns an empty vector for bound < 2.
    pub fn primes_up_to(bound: u64) -> Vec<u64> {
        if bound < 2 {
            return Vec::new();
        }
        let limit = bound as usize;
        let mut composite = vec![false; limit + 1];
        let mut i = 2usize;
        while i * i <= limit {
            if !composite[i] {
                let mut j = i * i;
                while j <= limit {
                    composite[j] = true;
                    j += i;
                }
            }
            i += 1;
        }
        (2..=limit)
            .filter(|&i| !composite[i])
            .map(|i| i as u64)
            .collect()
    }
}
