//! Reference single-exponent modular exponentiation.

use crate::{Limb, Nat};

impl Nat {
    /// Computes `self^exp mod modulus` by plain square-and-multiply with
    /// division-based reduction after every product.
    ///
    /// This is the reference path the batch APIs fall back to for inputs
    /// the shared squaring ladder cannot take: even moduli, trivial bases
    /// and zero exponents. It makes no Montgomery assumptions, so any
    /// positive modulus works.
    ///
    /// # Panics
    ///
    /// Panics with "modulus is zero" if `modulus` is zero; an unreduced
    /// power would grow without bound.
    pub fn exp_mod(&self, exp: &Nat, modulus: &Nat) -> Nat {
        if modulus.is_zero() {
            panic!("modulus is zero");
        }
        if num_traits::One::is_one(modulus) {
            return Nat::zero();
        }
        if exp.is_zero() {
            return Nat::one();
        }

        let base = self.rem(modulus);
        if base.is_zero() {
            return Nat::zero();
        }

        let mut ret = Nat::one();
        for idx in (0..exp.bits()).rev() {
            ret = ret.mul(&ret).rem(modulus);
            if exp.bit(idx) {
                ret = ret.mul(&base).rem(modulus);
            }
        }
        ret
    }

    /// Returns bit `idx`, counting from the least significant bit.
    /// Out-of-range bits are zero.
    pub(crate) fn bit(&self, idx: usize) -> bool {
        let limb = idx / Limb::BITS as usize;
        let shift = (idx % Limb::BITS as usize) as u32;
        self.limbs
            .get(limb)
            .is_some_and(|l| l.shr(shift).0 & 1 == 1)
    }
}

#[cfg(test)]
mod tests {
    use crate::Nat;

    #[test]
    fn small_powers() {
        let two = Nat::from(2u64);
        assert_eq!(two.exp_mod(&Nat::from(10u64), &Nat::from(1000u64)), Nat::from(24u64));
        assert_eq!(two.exp_mod(&Nat::from(3u64), &Nat::from(7u64)), Nat::one());
    }

    #[test]
    fn even_modulus() {
        let two = Nat::from(2u64);
        assert!(two.exp_mod(&Nat::from(3u64), &Nat::from(8u64)).is_zero());
        assert_eq!(
            Nat::from(3u64).exp_mod(&Nat::from(4u64), &Nat::from(10u64)),
            Nat::one()
        );
    }

    #[test]
    fn degenerate_inputs() {
        assert!(Nat::from(5u64).exp_mod(&Nat::from(3u64), &Nat::one()).is_zero());
        assert_eq!(Nat::from(5u64).exp_mod(&Nat::zero(), &Nat::from(9u64)), Nat::one());
        assert!(Nat::zero().exp_mod(&Nat::from(3u64), &Nat::from(9u64)).is_zero());
    }

    #[test]
    #[should_panic(expected = "modulus is zero")]
    fn zero_modulus_panics() {
        let _ = Nat::from(2u64).exp_mod(&Nat::from(3u64), &Nat::zero());
    }
}
