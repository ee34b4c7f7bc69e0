//! Number theory on arbitrary-precision integers: extended Euclid, gcd/lcm,
//! linear congruences, modular inverses, modular exponentiation and the
//! Chinese Remainder Theorem.
//!
//! Every operand is a [`BigUint`], so negative inputs are ruled out by the
//! type. Bézout coefficients are the only signed values and use [`BigInt`].

use alloc::vec::Vec;
use num_bigint::Sign::Plus;
use num_bigint::{BigInt, BigUint, ToBigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use zeroize::Zeroizing;

/// The residue class `x ≡ base (mod modulus)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Congruence {
    /// Smallest non-negative member of the class.
    pub base: BigUint,
    /// Modulus of the class.
    pub modulus: BigUint,
}

impl Congruence {
    /// Creates the class of `base` modulo `modulus`, reducing `base` when the
    /// modulus is nonzero.
    pub fn new(base: BigUint, modulus: BigUint) -> Self {
        let base = if modulus.is_zero() {
            base
        } else {
            base % &modulus
        };
        Congruence { base, modulus }
    }

    /// Returns `true` if `x` belongs to this class.
    pub fn contains(&self, x: &BigUint) -> bool {
        if self.modulus.is_zero() {
            return x == &self.base;
        }
        x % &self.modulus == self.base
    }
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `g = gcd(a, b)` and `a·x + b·y = g` for the
/// arguments in the order given. `egcd(0, 0)` is `(0, 0, 1)`.
pub fn egcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let swapped = a < b;
    let (mut a, mut b) = if swapped {
        (b.clone(), a.clone())
    } else {
        (a.clone(), b.clone())
    };

    // Descend (a, b) -> (b mod a, a) until a == 0, keeping the quotients.
    let mut quotients = Vec::new();
    while !a.is_zero() {
        let (q, r) = b.div_rem(&a);
        quotients.push(BigInt::from_biguint(Plus, q));
        b = core::mem::replace(&mut a, r);
    }

    // gcd(0, b) = b·1 + 0·0, then back-substitute each level.
    let mut x = BigInt::zero();
    let mut y = BigInt::one();
    for q in quotients.iter().rev() {
        let next_x = &y - q * &x;
        y = x;
        x = next_x;
    }

    if swapped {
        (b, y, x)
    } else {
        (b, x, y)
    }
}

/// Greatest common divisor of two values.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = core::mem::replace(&mut b, r);
    }
    a
}

/// Greatest common divisor of all `values`, folded left to right.
///
/// Stops as soon as an intermediate result is one. An empty slice yields zero,
/// the identity of gcd.
pub fn gcd_all(values: &[BigUint]) -> BigUint {
    let mut acc = BigUint::zero();
    for value in values {
        acc = gcd(&acc, value);
        if acc.is_one() {
            break;
        }
    }
    acc
}

/// Least common multiple of two values. `lcm(0, x)` is zero.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }
    (a / gcd(a, b)) * b
}

/// Least common multiple of all `values`. An empty slice yields one.
pub fn lcm_all(values: &[BigUint]) -> BigUint {
    values
        .iter()
        .fold(BigUint::one(), |acc, value| lcm(&acc, value))
}

/// Least non-negative residue of a signed value.
fn residue(x: &BigInt, m: &BigUint) -> BigUint {
    let m = BigInt::from_biguint(Plus, m.clone());
    x.mod_floor(&m).to_biguint().unwrap_or_else(BigUint::zero)
}

/// Solves `a·x ≡ b (mod n)` and returns `(g, first, step)` where the solutions
/// are `first + k·step` for `k` in `[0, g)`.
fn congruence_parts(a: &BigUint, b: &BigUint, n: &BigUint) -> Option<(BigUint, BigUint, BigUint)> {
    if n.is_zero() {
        return None;
    }

    let a = a % n;
    let b = b % n;
    let (g, x0, _) = egcd(&a, n);

    let (b_over_g, rem) = b.div_rem(&g);
    if !rem.is_zero() {
        return None;
    }

    // (b·x0 + n·k) / g = (b/g)·x0 + (n/g)·k
    let step = n / &g;
    let first = residue(&(BigInt::from_biguint(Plus, b_over_g) * x0), &step);
    Some((g, first, step))
}

/// Solves the linear congruence `a·x ≡ b (mod n)`.
///
/// Returns the solution set as a single class modulo `n / gcd(a, n)`, or
/// `None` if `gcd(a, n)` does not divide `b` or `n` is zero.
pub fn solve_linear_congruence(a: &BigUint, b: &BigUint, n: &BigUint) -> Option<Congruence> {
    let (_, base, modulus) = congruence_parts(a, b, n)?;
    Some(Congruence { base, modulus })
}

/// Every solution of `a·x ≡ b (mod n)` in `[0, n)`, ascending.
///
/// There are `gcd(a, n)` of them; callers with a possibly large gcd should use
/// [`solve_linear_congruence`] instead.
pub fn linear_congruence_solutions(a: &BigUint, b: &BigUint, n: &BigUint) -> Option<Vec<BigUint>> {
    let (g, first, step) = congruence_parts(a, b, n)?;

    let mut solutions = Vec::new();
    let mut k = BigUint::zero();
    let mut x = first;
    while k < g {
        solutions.push(x.clone());
        x += &step;
        k += 1u32;
    }
    Some(solutions)
}

/// Modular inverse of `a` modulo `n`, as the class of `x` with `a·x ≡ 1 (mod n)`.
///
/// `None` iff `gcd(a, n) != 1`.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Option<Congruence> {
    solve_linear_congruence(a, &BigUint::one(), n)
}

/// Generic trait to implement modular inverse
pub trait ModInverse<R: Sized>: Sized {
    /// Returns the [modular multiplicative inverse] of `self` modulo `m`, or
    /// `None` if there is none.
    ///
    /// [modular multiplicative inverse]: https://en.wikipedia.org/wiki/Modular_multiplicative_inverse
    fn mod_inverse(self, m: R) -> Option<Self>;
}

impl<'a> ModInverse<&'a BigUint> for BigUint {
    fn mod_inverse(self, m: &'a BigUint) -> Option<BigUint> {
        mod_inverse(&self, m).map(|c| c.base)
    }
}

impl ModInverse<BigUint> for BigUint {
    fn mod_inverse(self, m: BigUint) -> Option<BigUint> {
        mod_inverse(&self, &m).map(|c| c.base)
    }
}

/// Positions of the set bits of `value`, least significant first.
fn set_bits(value: &BigUint) -> Vec<usize> {
    value
        .to_bytes_le()
        .iter()
        .enumerate()
        .flat_map(|(i, byte)| {
            let byte = *byte;
            (0..8)
                .filter(move |bit| (byte >> bit) & 1 == 1)
                .map(move |bit| i * 8 + bit)
        })
        .collect()
}

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// A table of `base^(2^i) mod modulus` is built up to the highest set bit of
/// the exponent and the entries for the set bits are multiplied together,
/// reducing after every product. A zero modulus means plain exponentiation.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_zero() {
        return int_pow(base, exponent);
    }
    if modulus.is_one() {
        return BigUint::zero();
    }

    let bits = Zeroizing::new(set_bits(exponent));
    let highest = match bits.last() {
        Some(&highest) => highest,
        None => return BigUint::one(),
    };

    let mut table = Vec::with_capacity(highest + 1);
    table.push(base % modulus);
    for i in 1..=highest {
        let square = &table[i - 1] * &table[i - 1];
        table.push(square % modulus);
    }

    bits.iter()
        .fold(BigUint::one(), |acc, &i| (acc * &table[i]) % modulus)
}

/// Computes `base^exponent` without reduction.
pub fn int_pow(base: &BigUint, exponent: &BigUint) -> BigUint {
    let mut acc = BigUint::one();
    let mut square = base.clone();
    let bits = set_bits(exponent);
    let mut current = 0;
    for bit in bits {
        while current < bit {
            square = &square * &square;
            current += 1;
        }
        acc *= &square;
    }
    acc
}

/// Solves a system of congruences `x ≡ a_i (mod n_i)` with the Chinese
/// Remainder Theorem.
///
/// The moduli must be nonzero and pairwise coprime, otherwise `None`. The
/// result is reduced modulo the product of the moduli. An empty system is
/// `0 mod 1`.
pub fn crt(system: &[Congruence]) -> Option<Congruence> {
    if system.iter().any(|c| c.modulus.is_zero()) {
        return None;
    }
    for (i, ci) in system.iter().enumerate() {
        for cj in &system[i + 1..] {
            if !gcd(&ci.modulus, &cj.modulus).is_one() {
                return None;
            }
        }
    }

    let product = system
        .iter()
        .fold(BigUint::one(), |acc, c| acc * &c.modulus);

    let mut x = BigUint::zero();
    for c in system {
        let partial = &product / &c.modulus;
        let inverse = mod_inverse(&partial, &c.modulus)?;
        x += (&c.base % &c.modulus) * &partial * inverse.base;
    }

    Some(Congruence::new(x, product))
}
