//! Probabilistic primality tests.
//!
//! [`is_probably_prime`] is what key generation uses: trial division by the
//! first twenty primes, then [`miller_rabin`]. None of these tests ever proves
//! primality. A [`Primality::Composite`] verdict is certain, a
//! [`Primality::ProbablyPrime`] verdict from `k` Miller-Rabin rounds is wrong
//! with probability at most `4^-k`.
//!
//! The tests are not suitable for judging numbers that an adversary may have
//! crafted to fool them with a weak random source.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand_core::CryptoRngCore;

use crate::math::mod_pow;

/// Miller-Rabin rounds used for key generation.
pub const DEFAULT_ROUNDS: usize = 40;

/// The first twenty primes, used as a cheap composite filter.
const SMALL_PRIMES: [u32; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Outcome of a primality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    /// Definitely composite (zero and one included).
    Composite,
    /// No witness of compositeness was found.
    ProbablyPrime,
}

impl Primality {
    /// `true` for [`Primality::ProbablyPrime`].
    pub fn is_probably_prime(self) -> bool {
        self == Primality::ProbablyPrime
    }
}

impl From<bool> for Primality {
    fn from(probably_prime: bool) -> Self {
        if probably_prime {
            Primality::ProbablyPrime
        } else {
            Primality::Composite
        }
    }
}

/// Trial division by the first twenty primes.
///
/// Returns `Composite` if one of them properly divides `n` (or `n < 2`). The
/// small primes themselves are reported as `ProbablyPrime`.
pub fn division_test(n: &BigUint) -> Primality {
    if n < &BigUint::from(2u32) {
        return Primality::Composite;
    }

    for &p in SMALL_PRIMES.iter() {
        if n.to_u32() == Some(p) {
            return Primality::ProbablyPrime;
        }
        if (n % p).is_zero() {
            return Primality::Composite;
        }
    }

    Primality::ProbablyPrime
}

/// Reports whether `n` is a strong probable prime to base `a`, where
/// `n - 1 = 2^r * d` with `d` odd.
fn passes_base(n: &BigUint, n_minus_one: &BigUint, a: &BigUint, d: &BigUint, r: usize) -> bool {
    let mut x = mod_pow(a, d, n);
    if x.is_one() || &x == n_minus_one {
        return true;
    }

    for _ in 1..r {
        x = (&x * &x) % n;
        if &x == n_minus_one {
            return true;
        }
        if x.is_one() {
            // 1 was reached without passing through n - 1
            return false;
        }
    }

    false
}

/// Miller-Rabin test with `rounds` random witnesses drawn from `[2, n - 2]`.
///
/// `2` and `3` are prime, `1` and even numbers above two are composite. The
/// first witness of compositeness ends the test.
pub fn miller_rabin<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    n: &BigUint,
    rounds: usize,
) -> Primality {
    if n.to_u32().map_or(false, |n| n == 2 || n == 3) {
        return Primality::ProbablyPrime;
    }
    if n <= &BigUint::one() || n.is_even() {
        return Primality::Composite;
    }

    let n_minus_one = n - 1u32;
    let r = match n_minus_one.trailing_zeros() {
        Some(r) => r,
        None => return Primality::Composite,
    };
    let d = &n_minus_one >> r;

    let low = BigUint::from(2u32);
    for _ in 0..rounds {
        // uniform in [2, n - 2]
        let a = rng.gen_biguint_range(&low, &n_minus_one);
        if !passes_base(n, &n_minus_one, &a, &d, r) {
            return Primality::Composite;
        }
    }

    Primality::ProbablyPrime
}

/// Fermat test with `rounds` random bases drawn from `[2, n - 2]`.
///
/// Weaker than [`miller_rabin`]: Carmichael numbers pass it for every base
/// coprime to them.
pub fn fermat_test<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    n: &BigUint,
    rounds: usize,
) -> Primality {
    if n.to_u32().map_or(false, |n| n == 2 || n == 3) {
        return Primality::ProbablyPrime;
    }
    if n <= &BigUint::one() || n.is_even() {
        return Primality::Composite;
    }

    let n_minus_one = n - 1u32;
    let low = BigUint::from(2u32);
    for _ in 0..rounds {
        let a = rng.gen_biguint_range(&low, &n_minus_one);
        if !mod_pow(&a, &n_minus_one, n).is_one() {
            return Primality::Composite;
        }
    }

    Primality::ProbablyPrime
}

/// Trial division followed by `rounds` rounds of Miller-Rabin.
pub fn is_probably_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    n: &BigUint,
    rounds: usize,
) -> Primality {
    match division_test(n) {
        Primality::Composite => Primality::Composite,
        Primality::ProbablyPrime => miller_rabin(rng, n, rounds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    const PRIMES: &[&str] = &[
        "2",
        "3",
        "5",
        "7",
        "11",
        "71",
        "73",
        "5003",

        "13756265695458089029",
        "13496181268022124907",
        "10953742525620032441",
        "17908251027575790097",

        // https://golang.org/issue/638
        "18699199384836356663",

        "98920366548084643601728869055592650835572950932266967461790948584315647051443",
        "94560208308847015747498523884063394671606671904944666360068158221458669711639",

        // http://primes.utm.edu/lists/small/small3.html
        "449417999055441493994709297093108513015373787049558499205492347871729927573118262811508386655998299074566974373711472560655026288668094291699357843464363003144674940345912431129144354948751003607115263071543163",
        "230975859993204150666423538988557839555560243929065415434980904258310530753006723857139742334640122533598517597674807096648905501653461687601339782814316124971547968912893214002992086353183070342498989426570593",
        // Curve25519: 2^255-19
        "57896044618658097711785492504343953926634992332820282019728792003956564819949",
        // E-521: 2^521-1
        "6864797660130609714981900799081393217269435300143305409394463459185543183397656052122559640661454554977296311391480858037121987999716643812574028291115057151",
    ];

    const COMPOSITES: &[&str] = &[
        "0",
        "1",
        "4",
        "561",
        "5041",

        "21284175091214687912771199898307297748211672914763848041968395774954376176754",
        "6084766654921918907427900243509372380954290099172559290432744450051395395951",
        "84594350493221918389213352992032324280367711247940675652888030554255915464401",
        "82793403787388584738507275144194252681",

        // Arnault, "Rabin-Miller Primality Test: Composite Numbers Which Pass It",
        // Mathematics of Computation, 64(209) (January 1995), pp. 335-361.
        "1195068768795265792518361315725116351898245581", // strong pseudoprime to prime bases 2 through 29
        // strong pseudoprime to all prime bases up to 200
        "8038374574536394912570796143419421081388376882875581458374889175222974273765333652186502336163960045457915042023603208766569966760987284043965408232928738791850869166857328267761771029389697739470167082304286871099974399765441448453411558724506334092790222752962294149842306881685404326457534018329786111298960644845216191652872597534901",

        // Extra-strong Lucas pseudoprimes. https://oeis.org/A217719
        "989",
        "3239",
        "5777",
        "10877",
        "27971",
        "29681",

        "3673744903",
        "3281593591",
        "2385076987",
        "2738053141",
        "2009621503",
        "1502682721",
        "255866131",
        "117987841",
        "587861",

        "6368689",
        "8725753",
        "80579735209",
        "105919633",
    ];

    fn parse(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 10).unwrap()
    }

    #[test]
    fn test_primes() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for prime in PRIMES.iter() {
            let p = parse(prime);
            for rounds in [0, 1, 20] {
                assert_eq!(
                    is_probably_prime(&mut rng, &p, rounds),
                    Primality::ProbablyPrime,
                    "{} is a prime ({})",
                    prime,
                    rounds,
                );
            }
            assert!(fermat_test(&mut rng, &p, 10).is_probably_prime(), "{}", prime);
        }
    }

    #[test]
    fn test_composites() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for comp in COMPOSITES.iter() {
            let c = parse(comp);
            assert_eq!(
                is_probably_prime(&mut rng, &c, 20),
                Primality::Composite,
                "{} is a composite",
                comp,
            );
        }
    }

    #[test]
    fn test_division_test() {
        for p in SMALL_PRIMES.iter() {
            let n = BigUint::from_u32(*p).unwrap();
            assert_eq!(division_test(&n), Primality::ProbablyPrime, "{}", p);
        }
        for c in [0u32, 1, 4, 9, 15, 49, 71 * 73, 2 * 1_000_003] {
            let n = BigUint::from_u32(c).unwrap();
            assert_eq!(division_test(&n), Primality::Composite, "{}", c);
        }
        // 73 * 79 has no factor among the first twenty primes
        let n = BigUint::from_u32(73 * 79).unwrap();
        assert_eq!(division_test(&n), Primality::ProbablyPrime);
    }

    #[test]
    fn test_miller_rabin_small() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let sieve = {
            let mut is_prime = vec![true; 2000];
            is_prime[0] = false;
            is_prime[1] = false;
            for i in 2..2000 {
                if is_prime[i] {
                    let mut j = i * i;
                    while j < 2000 {
                        is_prime[j] = false;
                        j += i;
                    }
                }
            }
            is_prime
        };

        for (n, &expected) in sieve.iter().enumerate() {
            let big = BigUint::from_usize(n).unwrap();
            assert_eq!(
                miller_rabin(&mut rng, &big, 20).is_probably_prime(),
                expected,
                "miller_rabin({})",
                n
            );
        }
    }

    #[test]
    fn test_strong_pseudoprimes_base_2() {
        // https://oeis.org/A001262
        let want = [
            2047u64, 3277, 4033, 4681, 8321, 15841, 29341, 42799, 49141, 52633, 65281, 74665,
            80581, 85489, 88357, 90751,
        ];

        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let two = BigUint::from_u64(2).unwrap();
        let mut found = Vec::new();
        let mut i = 5u64;
        while i < 100_000 {
            let n = BigUint::from_u64(i).unwrap();
            let n_minus_one = &n - 1u32;
            let r = n_minus_one.trailing_zeros().unwrap();
            let d = &n_minus_one >> r;
            if passes_base(&n, &n_minus_one, &two, &d, r)
                && miller_rabin(&mut rng, &n, 20) == Primality::Composite
            {
                found.push(i);
            }
            i += 2;
        }

        assert_eq!(found, want);
    }

    #[test]
    fn test_fermat_carmichael() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let carmichael = BigUint::from_u64(75_361).unwrap(); // 11 * 13 * 17 * 31
        assert_eq!(miller_rabin(&mut rng, &carmichael, 20), Primality::Composite);

        // a^(n-1) = 1 for every base coprime to a Carmichael number
        let n_minus_one = &carmichael - 1u32;
        for a in [2u32, 3, 5, 7, 19, 23] {
            let a = BigUint::from_u32(a).unwrap();
            assert!(mod_pow(&a, &n_minus_one, &carmichael).is_one());
        }

        let composite = BigUint::from_u64(75_359 * 3).unwrap();
        assert_eq!(fermat_test(&mut rng, &composite, 20), Primality::Composite);
    }
}
