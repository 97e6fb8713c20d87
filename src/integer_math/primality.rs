// src/integer_math/primality.rs

use num::{BigInt, Integer, One};

pub struct Primality;

impl Primality {
    const WITNESS_BASES: [i64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

    /// Miller-Rabin over a fixed set of witness bases.
    /// Deterministic for every input below 3.3 * 10^24, which covers the
    /// moduli this crate targets by a wide margin.
    pub fn is_probable_prime(input: &BigInt) -> bool {
        if input == &BigInt::from(2) || input == &BigInt::from(3) {
            return true;
        }
        if input < &BigInt::from(2) || input.is_even() {
            return false;
        }

        let mut d: BigInt = input - 1;
        let mut s = 0u32;
        while d.is_even() {
            d /= 2;
            s += 1;
        }

        for &a in &Self::WITNESS_BASES {
            let a = BigInt::from(a);
            if &a >= input {
                continue;
            }
            let mut x = a.modpow(&d, input);
            if x.is_one() || x == input - 1 {
                continue;
            }
            let mut r = 1;
            while r < s {
                x = x.modpow(&BigInt::from(2), input);
                if x.is_one() {
                    return false;
                }
                if x == input - 1 {
                    break;
                }
                r += 1;
            }
            if x != input - 1 {
                return false;
            }
        }
        true
    }
}
