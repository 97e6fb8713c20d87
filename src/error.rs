// src/error.rs

use num::BigInt;
use std::error::Error;
use std::fmt;

/// Failures from the modular-arithmetic layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// No modular inverse exists because gcd(value, modulus) != 1.
    NoInverse { value: BigInt, modulus: BigInt },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::NoInverse { value, modulus } => {
                write!(f, "modular inverse does not exist for {} mod {}", value, modulus)
            }
        }
    }
}

impl Error for MathError {}

/// Failures from the quadratic sieve engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QsError {
    /// Rejected before any sieving work began.
    InvalidParameter(String),
    /// The retry ceiling was reached without recovering a factor.
    FactorizationExhausted { attempts: u32 },
    Math(MathError),
}

impl fmt::Display for QsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QsError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            QsError::FactorizationExhausted { attempts } => {
                write!(f, "factorization exhausted after {} attempts", attempts)
            }
            QsError::Math(e) => write!(f, "{}", e),
        }
    }
}

impl Error for QsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QsError::Math(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MathError> for QsError {
    fn from(e: MathError) -> Self {
        QsError::Math(e)
    }
}
