// src/integer_math/gcd.rs

use crate::error::MathError;
use num::{BigInt, Integer, One, Signed, Zero};

pub struct GCD;

impl GCD {
    /// Extended Euclidean algorithm.
    /// Returns (g, x, y) such that a*x + b*y = g = gcd(a, b).
    pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
        let (mut old_r, mut r) = (a.clone(), b.clone());
        let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
        let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

        while !r.is_zero() {
            let q = &old_r / &r;
            let next_r = &old_r - &q * &r;
            old_r = std::mem::replace(&mut r, next_r);
            let next_x = &old_x - &q * &x;
            old_x = std::mem::replace(&mut x, next_x);
            let next_y = &old_y - &q * &y;
            old_y = std::mem::replace(&mut y, next_y);
        }

        (old_r, old_x, old_y)
    }

    /// Modular inverse of a mod m, normalized into [0, m).
    pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt, MathError> {
        let (g, x, _) = Self::extended_gcd(a, m);
        if !g.abs().is_one() {
            return Err(MathError::NoInverse {
                value: a.clone(),
                modulus: m.clone(),
            });
        }
        Ok(x.mod_floor(m))
    }

    pub fn find_gcd_pair(left: &BigInt, right: &BigInt) -> BigInt {
        left.gcd(right)
    }
}
