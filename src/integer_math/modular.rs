// src/integer_math/modular.rs

use num::{BigInt, Integer, One, Signed};

pub struct Modular;

impl Modular {
    /// Binary (square-and-multiply) modular exponentiation: base^exp mod modulus.
    /// Requires exp >= 0 and modulus >= 1. exp = 0 yields 1 % modulus,
    /// which is 0 when modulus = 1.
    pub fn fast_power(base: &BigInt, exp: &BigInt, modulus: &BigInt) -> BigInt {
        assert!(!exp.is_negative(), "fast_power requires a non-negative exponent");
        assert!(modulus.is_positive(), "fast_power requires a positive modulus");

        let mut result = BigInt::one() % modulus;
        let mut base = base.mod_floor(modulus);
        let mut exp = exp.clone();
        while exp.is_positive() {
            if exp.is_odd() {
                result = (&result * &base) % modulus;
            }
            exp >>= 1u32;
            base = (&base * &base) % modulus;
        }
        result
    }

    /// Rounded-down integer square root, exact for perfect squares.
    pub fn integer_sqrt(n: &BigInt) -> BigInt {
        n.sqrt()
    }

    pub fn is_perfect_square(n: &BigInt) -> bool {
        if n.is_negative() {
            return false;
        }
        let root = n.sqrt();
        &root * &root == *n
    }
}
