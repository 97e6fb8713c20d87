// src/algorithms/mod.rs

pub mod quadratic_sieve;
