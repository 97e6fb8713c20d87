// src/integer_math/legendre.rs

use crate::integer_math::modular::Modular;
use num::{BigInt, One};

pub struct Legendre;

impl Legendre {
    /// Legendre symbol (a/p) computed by Euler's criterion: a^((p-1)/2) mod p.
    /// Returns 1 for a quadratic residue, p-1 for a non-residue, 0 when p divides a.
    pub fn symbol(a: &BigInt, p: &BigInt) -> BigInt {
        let exp = (p - 1) / 2;
        Modular::fast_power(a, &exp, p)
    }

    /// True when a is a (nonzero) quadratic residue mod p.
    pub fn is_residue(a: &BigInt, p: &BigInt) -> bool {
        Self::symbol(a, p).is_one()
    }
}
