// src/lib.rs

pub mod algorithms;
pub mod error;
pub mod factor_base;
pub mod integer_math;
pub mod matrix;
pub mod rsa;

pub use crate::algorithms::quadratic_sieve::{factor, factor_with_params, QuadraticSieve};
pub use crate::error::{MathError, QsError};
