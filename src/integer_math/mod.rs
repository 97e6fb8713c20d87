// src/integer_math/mod.rs

pub mod gcd;
pub mod legendre;
pub mod modular;
pub mod primality;
pub mod prime_sieve;
