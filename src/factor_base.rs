// src/factor_base.rs

use crate::integer_math::legendre::Legendre;
use crate::integer_math::prime_sieve::PrimeSieve;
use num::{BigInt, Integer};

/// The ordered set of primes p <= bound for which n is a quadratic
/// residue mod p. The position of a prime in the list is its column in
/// the parity matrix. Immutable once built; a parameter change rebuilds
/// it from scratch.
#[derive(Clone, Debug)]
pub struct FactorBase {
    primes: Vec<u64>,
}

impl FactorBase {
    pub fn build(n: &BigInt, bound: u64) -> Self {
        let mut primes = Vec::new();
        for p in PrimeSieve::primes_up_to(bound) {
            let p_big = BigInt::from(p);
            if Legendre::is_residue(&n.mod_floor(&p_big), &p_big) {
                primes.push(p);
            }
        }
        FactorBase { primes }
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }
}
