//! Precomputed power tables for table-driven exponentiation.

use crate::{modular::MontyParams, Limb, Nat};
use core::mem;

/// A table of Montgomery-form powers `base^(2^(W*i + j))` for
/// `i in 0..table_size`, `j in 0..W`, built once and shared read-only
/// across any number of exponentiations (and worker threads) afterwards.
///
/// The table carries the base and modulus it was built for; the
/// table-driven APIs require them to match the call's arguments exactly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreTable {
    base: Nat,
    modulus: Nat,
    table_size: usize,
    table: Vec<Vec<Nat>>,
}

impl PreTable {
    /// Builds the table for `base` and the odd `modulus`, with
    /// `table_size` rows of `W` entries each.
    ///
    /// A scan of an exponent `y` touches rows `0..y.nlimbs()`, so
    /// `table_size` must be at least `ceil(bits(y) / W)` for every
    /// exponent the table will serve.
    ///
    /// Returns `None` instead of building a useless or unbuildable table:
    /// zero `table_size`, `base <= 1`, zero or even modulus, or a table
    /// whose size in limbs does not even fit an address space.
    pub fn new(base: &Nat, modulus: &Nat, table_size: usize) -> Option<Self> {
        if table_size == 0 {
            return None;
        }
        if *base <= Nat::one() {
            return None;
        }
        if modulus.is_zero() || !modulus.is_odd() {
            return None;
        }

        let num_words = modulus.nlimbs();
        // Refuse sizes that could never be allocated rather than letting
        // the allocator abort: table_size * W * num_words limbs.
        table_size
            .checked_mul(Limb::BITS as usize)
            .and_then(|entries| entries.checked_mul(num_words))
            .and_then(|limbs| limbs.checked_mul(Limb::BYTES))?;

        let params = MontyParams::new(base, modulus);
        let mut squared = params.base.clone();
        let mut temp = Nat::zero_with_limbs(num_words);

        let mut table = Vec::with_capacity(table_size);
        for _ in 0..table_size {
            let mut row = Vec::with_capacity(Limb::BITS as usize);
            for _ in 0..Limb::BITS {
                row.push(squared.clone());
                temp.montgomery(&squared, &squared, &params.modulus, params.k0, num_words);
                mem::swap(&mut squared, &mut temp);
            }
            table.push(row);
        }

        tracing::debug!(
            table_size,
            num_words,
            bits = modulus.bits(),
            "built precompute table"
        );

        Some(Self {
            base: base.clone(),
            modulus: modulus.clone(),
            table_size,
            table,
        })
    }

    /// The base this table was built for.
    pub fn base(&self) -> &Nat {
        &self.base
    }

    /// The modulus this table was built for.
    pub fn modulus(&self) -> &Nat {
        &self.modulus
    }

    /// Number of rows; each row covers one limb of exponent scan.
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// The Montgomery form of `base^(2^(W*i + j))`.
    pub(crate) fn entry(&self, i: usize, j: u32) -> &Nat {
        &self.table[i][j as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::PreTable;
    use crate::Nat;

    #[test]
    fn rejects_degenerate_inputs() {
        let five = Nat::from(5u64);
        let m = Nat::from(23u64);
        assert!(PreTable::new(&five, &m, 0).is_none());
        assert!(PreTable::new(&Nat::one(), &m, 4).is_none());
        assert!(PreTable::new(&Nat::zero(), &m, 4).is_none());
        assert!(PreTable::new(&five, &Nat::zero(), 4).is_none());
        assert!(PreTable::new(&five, &Nat::from(24u64), 4).is_none());
    }

    #[test]
    fn rejects_absurd_sizes() {
        let five = Nat::from(5u64);
        let m = Nat::from(23u64);
        assert!(PreTable::new(&five, &m, usize::MAX / 2).is_none());
    }

    #[test]
    fn entries_are_successive_squares() {
        // table[0][j] decodes to 5^(2^j) mod 23
        let five = Nat::from(5u64);
        let m = Nat::from(23u64);
        let table = PreTable::new(&five, &m, 2).unwrap();

        let mut expect = Nat::from(5u64);
        for j in 0..crate::Limb::BITS {
            let decoded = decode(table.entry(0, j), &five, &m);
            assert_eq!(decoded, expect, "entry 0,{j}");
            expect = expect.mul(&expect).rem(&m);
        }
    }

    fn decode(entry: &Nat, base: &Nat, modulus: &Nat) -> Nat {
        let params = crate::modular::MontyParams::new(base, modulus);
        let mut acc = entry.clone();
        crate::modular::assemble_and_convert(&mut acc, &[], &params);
        acc
    }
}
