// src/algorithms/quadratic_sieve.rs
//
// Quadratic Sieve factorization for semiprimes a few dozen bits wide.
//
// Algorithm Overview:
// 1. Choose a smoothness bound B and build the factor base (primes p <= B
//    with n a quadratic residue mod p)
// 2. Scan Q(x) = x² - n for x = isqrt(n) + offset, offset in [0, M)
// 3. Keep relations where Q(x) factors completely over the factor base
// 4. Reduce the exponent vectors mod 2 and find linear dependencies over
//    GF(2) (Gaussian elimination with an identity-tracking block)
// 5. Each dependency gives X² ≡ Y² (mod n); gcd(X±Y, n) may split n
// 6. Too few relations or only trivial gcds: double B and M and retry
//
// References:
// - Pomerance (1984): "The Quadratic Sieve Factoring Algorithm"
// - Gerver (1983): "Factoring Large Numbers with a Quadratic Sieve"

use log::{debug, info, warn};
use num::{BigInt, Integer, One, Signed, ToPrimitive, Zero};

use crate::error::QsError;
use crate::factor_base::FactorBase;
use crate::integer_math::gcd::GCD;
use crate::integer_math::modular::Modular;
use crate::integer_math::primality::Primality;
use crate::matrix::gaussian_gf2::GaussianGf2;

/// Extra relations collected beyond the factor base size, so the parity
/// matrix is guaranteed at least one null-space vector.
const RELATION_MARGIN: usize = 5;

/// Parameter doublings allowed before giving up.
const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Factors n = p * q with default parameters.
///
/// Returns (p, q) with p <= q and p * q = n. Rejects n < 2 and prime n
/// with `QsError::InvalidParameter`; even n and perfect squares are split
/// without sieving.
///
/// # Examples
/// ```
/// use num::BigInt;
/// use qsieve_rsa::algorithms::quadratic_sieve::factor;
///
/// let n = BigInt::from(8051); // 83 × 97
/// let (p, q) = factor(&n).unwrap();
/// assert_eq!(&p * &q, n);
/// ```
pub fn factor(n: &BigInt) -> Result<(BigInt, BigInt), QsError> {
    factor_with_params(n, None, None)
}

/// Factors n with explicit starting parameters; either may be None to use
/// the defaults `smooth_bound = max(50, n^(1/4) + 50)` and
/// `interval = max(100, 2 * smooth_bound)`. Undersized parameters are not
/// an error: the retry loop escalates them.
pub fn factor_with_params(
    n: &BigInt,
    smooth_bound: Option<u64>,
    interval: Option<u64>,
) -> Result<(BigInt, BigInt), QsError> {
    if let Some((p, q)) = screen_trivial(n)? {
        return Ok((p, q));
    }
    QuadraticSieve::with_params(n, smooth_bound, interval)?.run()
}

/// Trivial-case screen shared by the public entry points: validation,
/// even n, perfect squares, and the prime-input termination policy.
fn screen_trivial(n: &BigInt) -> Result<Option<(BigInt, BigInt)>, QsError> {
    if n < &BigInt::from(2) {
        return Err(QsError::InvalidParameter(format!(
            "modulus must be >= 2, got {}",
            n
        )));
    }
    let two = BigInt::from(2);
    if n.is_even() && n != &two {
        let quotient = n / &two;
        return Ok(Some((two, quotient)));
    }
    if Modular::is_perfect_square(n) {
        info!("Modulus {} is a perfect square", n);
        let root = Modular::integer_sqrt(n);
        return Ok(Some((root.clone(), root)));
    }
    // A prime modulus would never leave the retry loop.
    if Primality::is_probable_prime(n) {
        return Err(QsError::InvalidParameter(format!(
            "modulus {} is prime and has no non-trivial factors",
            n
        )));
    }
    Ok(None)
}

/// One quadratic sieve search: owns the parameters and the retry loop.
/// The factor base, relation set and parity matrix of every attempt are
/// rebuilt from scratch on escalation.
pub struct QuadraticSieve {
    n: BigInt,
    smooth_bound: u64,
    interval: u64,
    max_attempts: u32,
}

/// A smooth relation: q(x) = x² - n factors completely over the base.
/// `exponents[i]` is the exponent of the i-th factor-base prime in |q(x)|;
/// the sign of q(x) rides in a separate flag, never in the exponent vector.
struct Relation {
    x: BigInt,
    exponents: Vec<u32>,
    negative: bool,
}

/// Result of one sieve attempt. Both failure cases are recoverable and
/// handled inside the retry loop by doubling the parameters.
enum Attempt {
    Factored(BigInt, BigInt),
    InsufficientRelations { found: usize, needed: usize },
    NoFactorFound { dependencies: usize },
}

impl QuadraticSieve {
    pub fn new(n: &BigInt) -> Result<Self, QsError> {
        Self::with_params(n, None, None)
    }

    pub fn with_params(
        n: &BigInt,
        smooth_bound: Option<u64>,
        interval: Option<u64>,
    ) -> Result<Self, QsError> {
        if n < &BigInt::from(2) {
            return Err(QsError::InvalidParameter(format!(
                "modulus must be >= 2, got {}",
                n
            )));
        }
        if let Some(b) = smooth_bound {
            if b < 2 {
                return Err(QsError::InvalidParameter(format!(
                    "smooth_bound must be >= 2, got {}",
                    b
                )));
            }
        }
        if let Some(m) = interval {
            if m < 1 {
                return Err(QsError::InvalidParameter("interval must be >= 1".into()));
            }
        }

        let smooth_bound = smooth_bound.unwrap_or_else(|| Self::default_smooth_bound(n));
        let interval = interval.unwrap_or_else(|| 100.max(smooth_bound.saturating_mul(2)));

        Ok(QuadraticSieve {
            n: n.clone(),
            smooth_bound,
            interval,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Overrides the retry ceiling.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    // max(50, floor(n^(1/4)) + 50)
    fn default_smooth_bound(n: &BigInt) -> u64 {
        let fourth_root = Modular::integer_sqrt(&Modular::integer_sqrt(n))
            .to_u64()
            .unwrap_or(u64::MAX);
        50.max(fourth_root.saturating_add(50))
    }

    /// Runs sieve attempts, doubling both parameters after each recoverable
    /// failure, until a factor pair is found or the ceiling is reached.
    pub fn run(&self) -> Result<(BigInt, BigInt), QsError> {
        let mut bound = self.smooth_bound;
        let mut interval = self.interval;

        for attempt in 1..=self.max_attempts {
            info!(
                "Sieve attempt {}/{}: smooth_bound = {}, interval = {}",
                attempt, self.max_attempts, bound, interval
            );

            match self.attempt(bound, interval) {
                Attempt::Factored(p, q) => {
                    info!("Found factors: {} × {}", p, q);
                    return Ok((p, q));
                }
                Attempt::InsufficientRelations { found, needed } => {
                    warn!(
                        "Not enough smooth relations: found {}, need {} - doubling parameters",
                        found, needed
                    );
                }
                Attempt::NoFactorFound { dependencies } => {
                    warn!(
                        "All {} dependencies gave trivial gcds - doubling parameters",
                        dependencies
                    );
                }
            }

            bound = bound.saturating_mul(2);
            interval = interval.saturating_mul(2);
        }

        Err(QsError::FactorizationExhausted {
            attempts: self.max_attempts,
        })
    }

    fn attempt(&self, bound: u64, interval: u64) -> Attempt {
        let factor_base = FactorBase::build(&self.n, bound);
        info!("Factor base size: {} primes (bound: {})", factor_base.len(), bound);

        let relations = self.sieve(&factor_base, interval);
        info!("Found {} smooth relations", relations.len());

        if relations.len() < factor_base.len() {
            return Attempt::InsufficientRelations {
                found: relations.len(),
                needed: factor_base.len(),
            };
        }

        let dependencies = Self::dependencies(&factor_base, &relations);
        if dependencies.is_empty() {
            return Attempt::NoFactorFound { dependencies: 0 };
        }

        for (idx, dependency) in dependencies.iter().enumerate() {
            debug!("Trying dependency {} of {}", idx + 1, dependencies.len());
            if let Some((p, q)) = self.extract_factors(&factor_base, &relations, dependency) {
                return Attempt::Factored(p, q);
            }
        }

        Attempt::NoFactorFound {
            dependencies: dependencies.len(),
        }
    }

    /// Collects smooth relations for q(x) = x² - n, x = isqrt(n) + offset.
    /// Trial-divides |q(x)| by the whole base; the relation is accepted only
    /// when the remaining cofactor is exactly 1. Stops early once the base
    /// size plus margin is reached.
    fn sieve(&self, factor_base: &FactorBase, interval: u64) -> Vec<Relation> {
        let sqrt_n = Modular::integer_sqrt(&self.n);
        let target = factor_base.len() + RELATION_MARGIN;
        let mut relations = Vec::new();

        for offset in 0..interval {
            let x = &sqrt_n + BigInt::from(offset);
            let q_x = &x * &x - &self.n;
            if q_x.is_zero() {
                continue;
            }

            let mut remaining = q_x.abs();
            let mut exponents = vec![0u32; factor_base.len()];
            for (i, &p) in factor_base.primes().iter().enumerate() {
                let p_big = BigInt::from(p);
                while remaining.is_multiple_of(&p_big) {
                    remaining /= &p_big;
                    exponents[i] += 1;
                }
                if remaining.is_one() {
                    break;
                }
            }

            if remaining.is_one() {
                relations.push(Relation {
                    x,
                    exponents,
                    negative: q_x.is_negative(),
                });
                if relations.len() >= target {
                    break;
                }
            }
        }

        relations
    }

    /// Builds the exponent-parity matrix and solves it over GF(2). The sign
    /// column is appended only when some relation has q(x) < 0.
    fn dependencies(factor_base: &FactorBase, relations: &[Relation]) -> Vec<Vec<bool>> {
        let has_negative = relations.iter().any(|r| r.negative);
        debug!(
            "Parity matrix: {} × {}{}",
            relations.len(),
            factor_base.len(),
            if has_negative { " (+ sign column)" } else { "" }
        );

        let rows: Vec<Vec<bool>> = relations
            .iter()
            .map(|rel| {
                let mut row: Vec<bool> =
                    rel.exponents.iter().map(|&e| e % 2 == 1).collect();
                if has_negative {
                    row.push(rel.negative);
                }
                row
            })
            .collect();

        GaussianGf2::new(rows).dependencies()
    }

    /// Builds the congruence-of-squares candidates for one dependency:
    /// X multiplies the selected x values mod n; Y multiplies p^(e/2) with
    /// each relation's own halved exponents, over factor-base primes only.
    /// The sign flag decides linear dependence, never the square root.
    fn reconstruct(
        &self,
        factor_base: &FactorBase,
        relations: &[Relation],
        dependency: &[bool],
    ) -> (BigInt, BigInt) {
        let mut x_product = BigInt::one();
        let mut y_product = BigInt::one();

        for (i, &selected) in dependency.iter().enumerate() {
            if !selected {
                continue;
            }
            let relation = &relations[i];
            x_product = (&x_product * &relation.x).mod_floor(&self.n);

            for (j, &exp) in relation.exponents.iter().enumerate() {
                if exp >= 2 {
                    let p = BigInt::from(factor_base.primes()[j]);
                    let half = BigInt::from(exp / 2);
                    y_product =
                        (&y_product * Modular::fast_power(&p, &half, &self.n)).mod_floor(&self.n);
                }
            }
        }

        (x_product, y_product)
    }

    /// gcd(X-Y, n) and gcd(X+Y, n); anything strictly between 1 and n is a
    /// non-trivial factor.
    fn extract_factors(
        &self,
        factor_base: &FactorBase,
        relations: &[Relation],
        dependency: &[bool],
    ) -> Option<(BigInt, BigInt)> {
        let (x_product, y_product) = self.reconstruct(factor_base, relations, dependency);

        let difference = (&x_product - &y_product).mod_floor(&self.n);
        let sum = (&x_product + &y_product).mod_floor(&self.n);

        for candidate in [
            GCD::find_gcd_pair(&difference, &self.n),
            GCD::find_gcd_pair(&sum, &self.n),
        ] {
            if candidate > BigInt::one() && candidate < self.n {
                let quotient = &self.n / &candidate;
                return if candidate <= quotient {
                    Some((candidate, quotient))
                } else {
                    Some((quotient, candidate))
                };
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_3599() {
        let n = BigInt::from(3599); // 59 × 61
        let (p, q) = factor(&n).unwrap();
        assert_eq!(p, BigInt::from(59));
        assert_eq!(q, BigInt::from(61));
    }

    #[test]
    fn test_factor_8051() {
        let n = BigInt::from(8051); // 83 × 97
        let (p, q) = factor(&n).unwrap();
        assert_eq!(&p * &q, n);
        assert!(p <= q);
        assert!(Primality::is_probable_prime(&p));
        assert!(Primality::is_probable_prime(&q));
    }

    #[test]
    fn test_factor_even() {
        let n = BigInt::from(100);
        let (p, q) = factor(&n).unwrap();
        assert_eq!(p, BigInt::from(2));
        assert_eq!(q, BigInt::from(50));
    }

    #[test]
    fn test_factor_perfect_square() {
        let n = BigInt::from(121);
        let (p, q) = factor(&n).unwrap();
        assert_eq!(p, BigInt::from(11));
        assert_eq!(q, BigInt::from(11));
    }

    #[test]
    fn test_factor_rejects_prime() {
        let err = factor(&BigInt::from(131071)).unwrap_err();
        assert!(matches!(err, QsError::InvalidParameter(_)));
        // 2 is even but prime, so it must not reach the even-n split
        let err = factor(&BigInt::from(2)).unwrap_err();
        assert!(matches!(err, QsError::InvalidParameter(_)));
    }

    #[test]
    fn test_factor_rejects_too_small() {
        assert!(matches!(
            factor(&BigInt::from(1)),
            Err(QsError::InvalidParameter(_))
        ));
        assert!(matches!(
            factor(&BigInt::from(-15)),
            Err(QsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let n = BigInt::from(8051);
        assert!(matches!(
            factor_with_params(&n, Some(1), None),
            Err(QsError::InvalidParameter(_))
        ));
        assert!(matches!(
            factor_with_params(&n, None, Some(0)),
            Err(QsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_undersized_bound_escalates() {
        // Far below the default of 50; the retry loop must recover.
        let n = BigInt::from(8051);
        let (p, q) = factor_with_params(&n, Some(10), None).unwrap();
        assert_eq!(&p * &q, n);
    }

    #[test]
    fn test_unit_interval_exhausts() {
        // One offset can never produce |FB| relations, and doubling keeps
        // the interval far behind the base size, so the ceiling trips.
        let n = BigInt::from(8051);
        let result = QuadraticSieve::with_params(&n, None, Some(1))
            .unwrap()
            .max_attempts(3)
            .run();
        assert_eq!(result, Err(QsError::FactorizationExhausted { attempts: 3 }));
    }

    #[test]
    fn test_default_parameters() {
        // n^(1/4) small: floor(8051^(1/4)) = 9
        let qs = QuadraticSieve::new(&BigInt::from(8051)).unwrap();
        assert_eq!(qs.smooth_bound, 59);
        assert_eq!(qs.interval, 118);

        let qs = QuadraticSieve::new(&BigInt::from(15)).unwrap();
        assert_eq!(qs.smooth_bound, 51);
        assert_eq!(qs.interval, 102);

        // a pathological bound must saturate, not overflow
        let qs = QuadraticSieve::with_params(&BigInt::from(8051), Some(u64::MAX), None).unwrap();
        assert_eq!(qs.interval, u64::MAX);
    }

    #[test]
    fn test_sign_column_blocks_odd_sign_subsets() {
        // Two relations with square exponent vectors but negative q(x):
        // neither is a dependency alone, only their combination is.
        let relations = vec![
            Relation {
                x: BigInt::from(10),
                exponents: vec![2, 0, 0],
                negative: true,
            },
            Relation {
                x: BigInt::from(11),
                exponents: vec![0, 2, 0],
                negative: true,
            },
        ];
        let fb = FactorBase::build(&BigInt::from(8051), 10); // primes {2, 5, 7}
        let deps = QuadraticSieve::dependencies(&fb, &relations);
        // exponent vectors are even, so only the sign column distinguishes
        // the rows: the single dependency must select both relations
        assert_eq!(deps, vec![vec![true, true]]);
    }

    #[test]
    fn test_sign_flag_excluded_from_square_root() {
        // Y reconstruction reads halved factor-base exponents only; the
        // negative flag of a relation must not change it.
        let n = BigInt::from(8051);
        let qs = QuadraticSieve::new(&n).unwrap();
        let fb = FactorBase::build(&n, 10); // {2, 5, 7}
        let make = |negative| {
            vec![
                Relation {
                    x: BigInt::from(90),
                    exponents: vec![0, 0, 2],
                    negative,
                },
                Relation {
                    x: BigInt::from(99),
                    exponents: vec![1, 3, 1],
                    negative,
                },
            ]
        };
        let dependency = vec![true, true];
        let (x_pos, y_pos) = qs.reconstruct(&fb, &make(false), &dependency);
        let (x_neg, y_neg) = qs.reconstruct(&fb, &make(true), &dependency);
        assert_eq!(x_pos, x_neg);
        assert_eq!(y_pos, y_neg);
        // 7^(2/2) * 2^(1/2=0) * 5^(3/2=1) * 7^(1/2=0) = 7 * 5
        assert_eq!(y_pos, BigInt::from(35));
        assert_eq!(x_pos, BigInt::from(90 * 99 % 8051));
    }

    #[test]
    fn test_sieved_relations_cofactor_one() {
        // Every accepted relation re-factors completely over the base.
        let n = BigInt::from(8051);
        let qs = QuadraticSieve::new(&n).unwrap();
        let fb = FactorBase::build(&n, qs.smooth_bound);
        let relations = qs.sieve(&fb, qs.interval);
        assert!(relations.len() >= fb.len());
        assert!(relations.iter().any(|r| r.negative), "q(0) < 0 expected");
        for rel in &relations {
            let q_x = &rel.x * &rel.x - &n;
            let mut rebuilt = BigInt::one();
            for (j, &exp) in rel.exponents.iter().enumerate() {
                rebuilt *= BigInt::from(fb.primes()[j]).pow(exp);
            }
            if rel.negative {
                rebuilt = -rebuilt;
            }
            assert_eq!(rebuilt, q_x, "relation at x = {} is not smooth", rel.x);
        }
    }

    #[test]
    fn test_idempotent() {
        let n = BigInt::from(3599);
        assert_eq!(factor(&n).unwrap(), factor(&n).unwrap());
    }
}
