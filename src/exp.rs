//! The batch exponentiation coordinators.

use crate::{
    common_bits::{fourfold_gcw, gcw, threefold_gcw},
    modular::{assemble_and_convert, multi_montgomery, multi_montgomery_precomputed, MontyParams},
    table::PreTable,
    Nat,
};

/// Computes `[x^y1 mod m, x^y2 mod m]` with one shared squaring ladder.
///
/// The fast path requires `x > 1`, `m` positive and odd, and both
/// exponents positive; anything else silently falls back to two reference
/// exponentiations (which still return the correct results). Bits the two
/// exponents share are extracted once and paid for once.
///
/// Not a constant-time operation: unsuitable for secret exponents.
///
/// # Panics
///
/// Panics with "modulus is zero" if `m` is zero.
pub fn double_exp(x: &Nat, m: &Nat, exponents: &[Nat; 2]) -> [Nat; 2] {
    if *x <= Nat::one() || m.is_zero() || !m.is_odd() || exponents.iter().any(Nat::is_zero) {
        return [x.exp_mod(&exponents[0], m), x.exp_mod(&exponents[1], m)];
    }

    let (y1, y2, common) = gcw(&exponents[0], &exponents[1]);

    let params = MontyParams::new(x, m);
    let mut z = multi_montgomery(&params, &[y1, y2, common]);

    // z = [x^y1', x^y2', x^common]; fold the shared part into both.
    let common = z.pop().expect("engine returns one result per exponent");
    let mut r2 = z.pop().expect("engine returns one result per exponent");
    let mut r1 = z.pop().expect("engine returns one result per exponent");
    assemble_and_convert(&mut r1, &[&common], &params);
    assemble_and_convert(&mut r2, &[&common], &params);

    [r1, r2]
}

/// Computes `[x^y1 mod m, ..., x^y4 mod m]` with one shared squaring
/// ladder.
///
/// Validation matches [`double_exp`]: degenerate inputs fall back to four
/// reference exponentiations. The four exponents are decomposed into 15
/// parts (four residuals plus the common bits of every subset of size
/// 2, 3 and 4), so a bit shared by several exponents is paid for once.
///
/// Not a constant-time operation: unsuitable for secret exponents.
///
/// # Panics
///
/// Panics with "modulus is zero" if `m` is zero.
pub fn fourfold_exp(x: &Nat, m: &Nat, exponents: &[Nat; 4]) -> [Nat; 4] {
    if *x <= Nat::one() || m.is_zero() || !m.is_odd() || exponents.iter().any(Nat::is_zero) {
        return fallback4(x, m, exponents);
    }

    let params = MontyParams::new(x, m);
    let parts = decompose(exponents);
    let z = multi_montgomery(&params, &parts);
    assemble4(z, &params)
}

/// Table-driven [`fourfold_exp`]: every multiplication uses the
/// precomputed power instead of a live squaring chain.
///
/// # Panics
///
/// Unlike the table-free APIs, this panics rather than falling back when
/// the modulus is zero or even, an exponent is zero, the table does not
/// match `(x, m)`, or the table has fewer rows than the exponent scan
/// needs. Only the trivial base `x <= 1` falls back.
pub fn fourfold_exp_precomputed(
    x: &Nat,
    m: &Nat,
    exponents: &[Nat; 4],
    table: &PreTable,
) -> [Nat; 4] {
    if *x <= Nat::one() {
        return fallback4(x, m, exponents);
    }
    validate_precomputed(x, m, exponents, table);

    let params = MontyParams::new(x, m);
    let parts = decompose(exponents);
    let z = multi_montgomery_precomputed(&params, &parts, table);
    assemble4(z, &params)
}

/// Shared validation for the table-driven fourfold APIs.
pub(crate) fn validate_precomputed(x: &Nat, m: &Nat, exponents: &[Nat; 4], table: &PreTable) {
    if m.is_zero() {
        panic!("invalid modulus: zero value");
    }
    if !m.is_odd() {
        panic!("modulus is not odd");
    }
    if exponents.iter().any(Nat::is_zero) {
        panic!("invalid exponent: zero value");
    }
    if table.base() != x || table.modulus() != m {
        panic!("precompute table does not match the call's base and modulus");
    }
}

/// Per-exponent reference fallback.
fn fallback4(x: &Nat, m: &Nat, exponents: &[Nat; 4]) -> [Nat; 4] {
    [
        x.exp_mod(&exponents[0], m),
        x.exp_mod(&exponents[1], m),
        x.exp_mod(&exponents[2], m),
        x.exp_mod(&exponents[3], m),
    ]
}

/// Decomposes four exponents into the 15 engine inputs, in the fixed
/// order the assembly index sets refer to:
///
/// ```text
///  0..4     4      5     6     7     8     9    10   11   12   13   14
/// y1'..y4' c0123  c012  c013  c023  c123  c01  c23  c02  c13  c03  c12
/// ```
pub(crate) fn decompose(exponents: &[Nat; 4]) -> Vec<Nat> {
    // Zero round: bits common to all four.
    let (mut ys, c0123) = fourfold_gcw(exponents);

    // First round: bits common to each subset of three.
    let c012 = {
        let [a, b, c, _] = &mut ys;
        threefold_gcw([a, b, c])
    };
    let c013 = {
        let [a, b, _, d] = &mut ys;
        threefold_gcw([a, b, d])
    };
    let c023 = {
        let [a, _, c, d] = &mut ys;
        threefold_gcw([a, c, d])
    };
    let c123 = {
        let [_, b, c, d] = &mut ys;
        threefold_gcw([b, c, d])
    };

    // Second round: pairwise.
    let mut pair = |i: usize, j: usize| {
        let (a, b, common) = gcw(&ys[i], &ys[j]);
        ys[i] = a;
        ys[j] = b;
        common
    };
    let c01 = pair(0, 1);
    let c23 = pair(2, 3);
    let c02 = pair(0, 2);
    let c13 = pair(1, 3);
    let c03 = pair(0, 3);
    let c12 = pair(1, 2);

    let [y1, y2, y3, y4] = ys;
    vec![
        y1, y2, y3, y4, c0123, c012, c013, c023, c123, c01, c23, c02, c13, c03, c12,
    ]
}

/// Index sets of the common parts each output multiplies in, positions
/// 4..15 of the engine order. Output `k` folds every subset containing
/// exponent `k`.
pub(crate) const ASSEMBLE_SETS: [[usize; 7]; 4] = [
    [4, 5, 6, 7, 9, 11, 13],
    [4, 5, 6, 8, 9, 12, 14],
    [4, 5, 7, 8, 10, 11, 14],
    [4, 6, 7, 8, 10, 12, 13],
];

/// Folds the 15 engine results into the four outputs and converts them
/// out of the Montgomery domain.
fn assemble4(mut z: Vec<Nat>, params: &MontyParams) -> [Nat; 4] {
    let (heads, tails) = z.split_at_mut(4);
    for (head, set) in heads.iter_mut().zip(&ASSEMBLE_SETS) {
        let parts: Vec<&Nat> = set.iter().map(|&i| &tails[i - 4]).collect();
        assemble_and_convert(head, &parts, params);
    }

    z.truncate(4);
    let mut iter = z.into_iter();
    [(); 4].map(|()| iter.next().expect("exactly four outputs"))
}
