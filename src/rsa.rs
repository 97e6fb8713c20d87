// src/rsa.rs
//
// Textbook RSA over BigInt: key derivation and the modular-exponentiation
// transform. Used to cross-check factorization output; the sieve itself
// never calls into this module.

use crate::error::MathError;
use crate::integer_math::gcd::GCD;
use crate::integer_math::modular::Modular;
use num::BigInt;

/// A full RSA key tuple. `d` is derived from (p, q, e) at construction
/// and lives only as part of this value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMaterial {
    pub p: BigInt,
    pub q: BigInt,
    pub n: BigInt,
    pub e: BigInt,
    pub d: BigInt,
}

impl KeyMaterial {
    pub fn derive(p: &BigInt, q: &BigInt, e: &BigInt) -> Result<Self, MathError> {
        let d = derive_private_key(p, q, e)?;
        Ok(KeyMaterial {
            p: p.clone(),
            q: q.clone(),
            n: p * q,
            e: e.clone(),
            d,
        })
    }
}

/// d = e^(-1) mod (p-1)(q-1). Fails when e shares a factor with phi(n).
pub fn derive_private_key(p: &BigInt, q: &BigInt, e: &BigInt) -> Result<BigInt, MathError> {
    let phi = (p - 1) * (q - 1);
    GCD::mod_inverse(e, &phi)
}

/// ciphertext = message^e mod n
pub fn encrypt(message: &BigInt, e: &BigInt, n: &BigInt) -> BigInt {
    Modular::fast_power(message, e, n)
}

/// message = ciphertext^d mod n
pub fn decrypt(ciphertext: &BigInt, d: &BigInt, n: &BigInt) -> BigInt {
    Modular::fast_power(ciphertext, d, n)
}

/// Outcome of a single derive-encrypt-decrypt verification pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roundtrip {
    pub d: BigInt,
    pub ciphertext: BigInt,
    pub decrypted: BigInt,
}

/// Derives d from (p, q, e), then encrypts and decrypts `message` mod p*q.
/// For a valid key the caller observes `decrypted == message % (p*q)`.
pub fn roundtrip(
    p: &BigInt,
    q: &BigInt,
    e: &BigInt,
    message: &BigInt,
) -> Result<Roundtrip, MathError> {
    let key = KeyMaterial::derive(p, q, e)?;
    let ciphertext = encrypt(message, &key.e, &key.n);
    let decrypted = decrypt(&ciphertext, &key.d, &key.n);
    Ok(Roundtrip {
        d: key.d,
        ciphertext,
        decrypted,
    })
}
