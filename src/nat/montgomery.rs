//! The Montgomery multiplication kernel.

use crate::{
    nat::{mul::add_mul_vvw, sub::sub_vv},
    Limb, Nat,
};

impl Nat {
    /// Computes `self = x * y * 2^(-n*W) mod m` into this buffer, assuming
    /// `k0 = -1/m mod 2^W`.
    ///
    /// See Gueron, "Efficient Software Implementations of Modular
    /// Exponentiation" (<https://eprint.iacr.org/2011/239.pdf>). In that
    /// paper's terminology this is an "Almost Montgomery Multiplication":
    /// for `0 <= x, y < 2^(n*W)` the result satisfies
    /// `0 <= self < 2^(n*W)` but may exceed `m`. Callers perform the final
    /// conditional subtraction.
    ///
    /// The output buffer cannot alias `x`, `y` or `m`; the exclusive
    /// borrow enforces what the original slice-based code documented.
    ///
    /// # Panics
    ///
    /// Panics if `x`, `y` and `m` are not all exactly `n` limbs. A length
    /// mismatch here is a bug in the caller, never a data-dependent
    /// condition.
    pub(crate) fn montgomery(&mut self, x: &Nat, y: &Nat, m: &Nat, k0: Limb, n: usize) {
        if x.nlimbs() != n || y.nlimbs() != n || m.nlimbs() != n {
            panic!("mismatched montgomery operand lengths");
        }

        self.clear_resize(2 * n);
        let z = &mut self.limbs;

        let mut c = Limb::ZERO;
        for i in 0..n {
            let d = y.limbs[i];
            let c2 = add_mul_vvw(&mut z[i..n + i], &x.limbs, d);
            let t = z[i].wrapping_mul(k0);
            let c3 = add_mul_vvw(&mut z[i..n + i], &m.limbs, t);
            let (cx, over_x) = c.overflowing_add(c2);
            let (cy, over_y) = cx.overflowing_add(c3);
            z[n + i] = cy;
            c = Limb(over_x.0 | over_y.0);
        }

        let (lo, hi) = z.split_at_mut(n);
        if !c.is_zero() {
            sub_vv(lo, hi, &m.limbs);
        } else {
            lo.copy_from_slice(hi);
        }
        self.limbs.truncate(n);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Limb, Nat, WideWord, Word};

    /// Single-limb reference: x*y*R^{-1} mod m with R = 2^W, computed by
    /// scanning the W bits of the inverse power.
    fn reference(x: Word, y: Word, m: Word) -> Word {
        let mut acc = ((x as WideWord) * (y as WideWord) % (m as WideWord)) as Word;
        // divide by 2 mod m, W times (m odd)
        for _ in 0..Limb::BITS {
            acc = if acc & 1 == 0 {
                acc >> 1
            } else {
                ((acc as WideWord + m as WideWord) >> 1) as Word
            };
        }
        acc
    }

    fn k0_for(m: Word) -> Limb {
        let m0 = Limb(m);
        let mut k0 = Limb(2).wrapping_sub(m0);
        let mut t = m0.wrapping_sub(Limb::ONE);
        let mut i = 1;
        while i < Limb::BITS {
            t = t.wrapping_mul(t);
            k0 = k0.wrapping_mul(t.wrapping_add(Limb::ONE));
            i <<= 1;
        }
        k0.wrapping_neg()
    }

    #[test]
    fn single_limb_kernel() {
        for &(x, y, m) in &[(3, 5, 7), (100, 200, 257), (12345, 54321, 99991)] {
            let mut z = Nat::zero();
            z.montgomery(
                &Nat { limbs: vec![Limb(x)] },
                &Nat { limbs: vec![Limb(y)] },
                &Nat { limbs: vec![Limb(m)] },
                k0_for(m),
                1,
            );
            let got = z.limbs[0].0 % m;
            assert_eq!(got, reference(x, y, m), "x={x} y={y} m={m}");
        }
    }

    #[test]
    #[should_panic(expected = "mismatched montgomery operand lengths")]
    fn length_mismatch_panics() {
        let mut z = Nat::zero();
        let one = Nat::one();
        let m = Nat::from(7u64);
        z.montgomery(&one, &one, &m, Limb::ONE, 2);
    }
}
