//! Parameters to go to and from the Montgomery domain for an odd modulus
//! chosen at call time.

use crate::{Limb, Nat};

/// Per-call Montgomery parameters for a base `x` and an odd modulus `m`:
/// the padded modulus width, the reduction constant `k0`, and the
/// Montgomery forms of 1 and of the base.
///
/// All the width-`num_words` vectors kept here are deliberately
/// denormalized: the kernel requires its operands at exactly the modulus
/// width.
#[derive(Clone, Debug)]
pub(crate) struct MontyParams {
    /// The modulus; normalized, so exactly `num_words` limbs.
    pub(crate) modulus: Nat,
    /// `m.nlimbs()`, the operand width of every kernel call.
    pub(crate) num_words: usize,
    /// `-m^-1 mod 2^W`, consumed by the kernel's inner loop.
    pub(crate) k0: Limb,
    /// Montgomery form of 1, i.e. `R mod m`.
    pub(crate) one: Nat,
    /// Montgomery form of the base.
    pub(crate) base: Nat,
}

impl MontyParams {
    /// Computes the parameters for `x` and the odd modulus `m`.
    ///
    /// `x` longer than the modulus is reduced by division first; `x >= m`
    /// at equal length is fine, the final conditional subtraction absorbs
    /// it.
    pub(crate) fn new(x: &Nat, m: &Nat) -> Self {
        debug_assert!(m.is_odd());
        let num_words = m.nlimbs();

        let reduced;
        let x = if x.nlimbs() > num_words {
            reduced = x.rem(m);
            &reduced
        } else {
            x
        };
        let mut x_padded = Nat::zero();
        x_padded.set_padded(&x.limbs, num_words);

        // k0 = -m^-1 mod 2^W by Newton iteration over the machine word.
        // Dumas, "On Newton-Raphson Iteration for Multiplicative Inverses
        // Modulo Prime Powers".
        let m0 = m.limbs[0];
        let mut k0 = Limb(2).wrapping_sub(m0);
        let mut t = m0.wrapping_sub(Limb::ONE);
        let mut i = 1;
        while i < Limb::BITS {
            t = t.wrapping_mul(t);
            k0 = k0.wrapping_mul(t.wrapping_add(Limb::ONE));
            i <<= 1;
        }
        let k0 = k0.wrapping_neg();

        // rr = 2^(2*W*num_words) mod m, for entering the Montgomery domain.
        let rr = Nat::one()
            .shl(2 * num_words * Limb::BITS as usize)
            .rem(m);
        let mut rr_padded = Nat::zero();
        rr_padded.set_padded(&rr.limbs, num_words);

        let mut plain_one = Nat::zero_with_limbs(num_words);
        plain_one.limbs[0] = Limb::ONE;

        let mut one = Nat::zero();
        one.montgomery(&plain_one, &rr_padded, m, k0, num_words);
        let mut base = Nat::zero();
        base.montgomery(&x_padded, &rr_padded, m, k0, num_words);

        Self {
            modulus: m.clone(),
            num_words,
            k0,
            one,
            base,
        }
    }
}
