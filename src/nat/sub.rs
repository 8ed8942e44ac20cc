//! [`Nat`] subtraction and the underlying limb-vector primitives.

use crate::{Limb, Nat};
use core::ops::Sub;

/// Computes `z = x - y` limb by limb over `z.len()` limbs, returning the
/// final borrow. Requires `x.len()` and `y.len()` at least `z.len()`.
pub(crate) fn sub_vv(z: &mut [Limb], x: &[Limb], y: &[Limb]) -> Limb {
    let mut borrow = Limb::ZERO;
    for (i, zi) in z.iter_mut().enumerate() {
        let (diff, b) = x[i].borrowing_sub(y[i], borrow);
        *zi = diff;
        borrow = b;
    }
    Limb(borrow.0 & 1)
}

/// Subtracts `y` from `z` in place, returning the final borrow.
/// Requires `z.len() == y.len()`.
pub(crate) fn sub_vv_assign(z: &mut [Limb], y: &[Limb]) -> Limb {
    debug_assert_eq!(z.len(), y.len());
    let mut borrow = Limb::ZERO;
    for (zi, &yi) in z.iter_mut().zip(y) {
        let (diff, b) = zi.borrowing_sub(yi, borrow);
        *zi = diff;
        borrow = b;
    }
    Limb(borrow.0 & 1)
}

/// Propagates the single-limb subtrahend `w` through `z`, returning the
/// final borrow.
pub(crate) fn sub_vw_assign(z: &mut [Limb], w: Limb) -> Limb {
    let mut borrow = w;
    for zi in z.iter_mut() {
        if borrow.is_zero() {
            break;
        }
        let (diff, b) = zi.overflowing_sub(borrow);
        *zi = diff;
        borrow = b;
    }
    borrow
}

impl Nat {
    /// Compute `self - rhs`.
    ///
    /// # Panics
    ///
    /// Panics with "underflow" when `rhs > self`: a negative result is an
    /// internal invariant violation everywhere this crate subtracts.
    pub fn sub(&self, rhs: &Self) -> Self {
        let m = self.nlimbs();
        let n = rhs.nlimbs();

        if m < n {
            panic!("underflow");
        }
        if n == 0 {
            return self.clone();
        }

        let mut limbs = vec![Limb::ZERO; m];
        let borrow = sub_vv(&mut limbs[..n], &self.limbs, &rhs.limbs);
        let borrow = if m > n {
            limbs[n..].copy_from_slice(&self.limbs[n..]);
            sub_vw_assign(&mut limbs[n..], borrow)
        } else {
            borrow
        };
        if !borrow.is_zero() {
            panic!("underflow");
        }

        let mut ret = Self { limbs };
        ret.norm();
        ret
    }
}

impl Sub<&Nat> for &Nat {
    type Output = Nat;

    fn sub(self, rhs: &Nat) -> Nat {
        Nat::sub(self, rhs)
    }
}

impl Sub<Nat> for Nat {
    type Output = Nat;

    fn sub(self, rhs: Nat) -> Nat {
        Nat::sub(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use crate::Nat;

    #[test]
    fn sub_borrows_across_limbs() {
        let x = Nat::from_words(vec![0, 0, 1]);
        let diff = &x - &Nat::one();
        assert_eq!(diff.to_words(), vec![crate::Limb::MAX.0, crate::Limb::MAX.0]);
    }

    #[test]
    fn sub_to_zero_normalizes() {
        let x = Nat::from_words(vec![3, 9]);
        assert!((&x - &x).is_zero());
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn sub_underflow_panics() {
        let _ = &Nat::one() - &Nat::from(2u64);
    }
}
