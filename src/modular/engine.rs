//! The multi-exponent scanning engine.
//!
//! One squaring ladder serves the whole exponent batch: per bit position
//! the engine multiplies every accumulator whose exponent has that bit
//! set, then squares once. Squarings cost `W * max_len` regardless of the
//! batch size; multiplications equal the batch's total Hamming weight.

use super::MontyParams;
use crate::{table::PreTable, Limb, Nat};
use core::mem;

/// Runs the shared ladder over `exponents`, returning the Montgomery-form
/// power of the params' base for each exponent. Results are denormalized
/// at the kernel width and may exceed the modulus.
pub(crate) fn multi_montgomery(params: &MontyParams, exponents: &[Nat]) -> Vec<Nat> {
    let n = params.num_words;
    let mut z: Vec<Nat> = exponents.iter().map(|_| params.one.clone()).collect();
    let mut squared = params.base.clone();

    let max_len = exponents.iter().map(Nat::nlimbs).max().unwrap_or(0).max(1);

    // The kernel forbids writing over its own operands, so every call
    // lands in `temp` and ownership is swapped back.
    let mut temp = Nat::zero_with_limbs(n);
    for i in 0..max_len {
        for j in 0..Limb::BITS {
            for (k, exponent) in exponents.iter().enumerate() {
                if exponent.nlimbs() <= i {
                    continue;
                }
                if exponent.limbs[i].shr(j).0 & 1 == 0 {
                    continue;
                }
                temp.montgomery(&z[k], &squared, &params.modulus, params.k0, n);
                mem::swap(&mut z[k], &mut temp);
            }
            temp.montgomery(&squared, &squared, &params.modulus, params.k0, n);
            mem::swap(&mut squared, &mut temp);
        }
    }

    z
}

/// Table-driven variant of [`multi_montgomery`]: no squaring chain, each
/// set bit multiplies by the tabled power `g^(2^(W*i+j))` instead.
pub(crate) fn multi_montgomery_precomputed(
    params: &MontyParams,
    exponents: &[Nat],
    table: &PreTable,
) -> Vec<Nat> {
    let n = params.num_words;
    let mut z: Vec<Nat> = exponents.iter().map(|_| params.one.clone()).collect();

    let max_len = exponents.iter().map(Nat::nlimbs).max().unwrap_or(0).max(1);
    assert!(
        table.table_size() >= max_len,
        "precompute table too small: {} rows, exponent scan needs {}",
        table.table_size(),
        max_len
    );

    let mut temp = Nat::zero_with_limbs(n);
    for i in 0..max_len {
        for j in 0..Limb::BITS {
            for (k, exponent) in exponents.iter().enumerate() {
                if exponent.nlimbs() <= i {
                    continue;
                }
                if exponent.limbs[i].shr(j).0 & 1 == 0 {
                    continue;
                }
                temp.montgomery(&z[k], table.entry(i, j), &params.modulus, params.k0, n);
                mem::swap(&mut z[k], &mut temp);
            }
        }
    }

    z
}

/// Montgomery-multiplies the subset results in `parts` into `acc`,
/// converts the product out of the Montgomery domain, and fully reduces
/// it below the modulus.
///
/// The high bit of the modulus is usually set, so one subtraction removes
/// the only possible extra multiple; the division is a fallback for the
/// remaining cases.
pub(crate) fn assemble_and_convert(acc: &mut Nat, parts: &[&Nat], params: &MontyParams) {
    let n = params.num_words;
    let mut temp = Nat::zero_with_limbs(n);

    for part in parts {
        temp.montgomery(acc, part, &params.modulus, params.k0, n);
        mem::swap(acc, &mut temp);
    }

    // Multiplying by plain 1 under the kernel divides by R: out of the
    // Montgomery domain.
    let mut plain_one = Nat::zero_with_limbs(n);
    plain_one.limbs[0] = Limb::ONE;
    temp.montgomery(acc, &plain_one, &params.modulus, params.k0, n);
    mem::swap(acc, &mut temp);

    acc.norm();
    if *acc >= params.modulus {
        *acc = acc.sub(&params.modulus);
        if *acc >= params.modulus {
            *acc = acc.rem(&params.modulus);
        }
    }
}
