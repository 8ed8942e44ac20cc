//! Limb addition

use crate::{Limb, WideWord, Word};

impl Limb {
    /// Computes `self + rhs + carry`, returning the result along with the
    /// new carry.
    #[inline(always)]
    #[must_use]
    pub const fn carrying_add(self, rhs: Limb, carry: Limb) -> (Limb, Limb) {
        let ret = (self.0 as WideWord) + (rhs.0 as WideWord) + (carry.0 as WideWord);
        (Limb(ret as Word), Limb((ret >> Limb::BITS) as Word))
    }

    /// Computes `self + rhs`, returning the result along with the carry
    /// (0 or 1).
    #[inline(always)]
    #[must_use]
    pub const fn overflowing_add(self, rhs: Limb) -> (Limb, Limb) {
        let (res, carry) = self.0.overflowing_add(rhs.0);
        (Limb(res), Limb(carry as Word))
    }

    /// Perform wrapping addition, discarding overflow.
    #[inline(always)]
    #[must_use]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Limb(self.0.wrapping_add(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Limb;

    #[test]
    fn carrying_add_no_carry() {
        let (res, carry) = Limb::ZERO.carrying_add(Limb::ONE, Limb::ZERO);
        assert_eq!(res, Limb::ONE);
        assert_eq!(carry, Limb::ZERO);
    }

    #[test]
    fn carrying_add_with_carry() {
        let (res, carry) = Limb::MAX.carrying_add(Limb::ONE, Limb::ZERO);
        assert_eq!(res, Limb::ZERO);
        assert_eq!(carry, Limb::ONE);
    }

    #[test]
    fn carrying_add_saturated() {
        let (res, carry) = Limb::MAX.carrying_add(Limb::MAX, Limb::ONE);
        assert_eq!(res, Limb::MAX);
        assert_eq!(carry, Limb::ONE);
    }
}
