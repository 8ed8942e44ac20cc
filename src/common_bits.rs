//! Common-bit extraction over exponent digit vectors.
//!
//! Splitting a set of exponents into per-limb shared bits and residuals is
//! an exact rewrite (`a = a' + c` with `a' & c = 0`), and every bit moved
//! into a shared part saves multiplications in the shared squaring ladder:
//! the ladder pays once for a bit that several exponents have in common.
//!
//! The per-limb subtraction can never borrow because the common part is a
//! bitwise subset of each input.

use crate::{Limb, Nat};

/// Splits `a` and `b` into residuals and their common bits:
/// `gcw(a, b) = (a', b', c)` with `a = a' + c`, `b = b' + c` and
/// `a' & c = b' & c = 0`. `c` spans the shorter input; the unshared top
/// limbs of the longer input carry into its residual.
pub(crate) fn gcw(a: &Nat, b: &Nat) -> (Nat, Nat, Nat) {
    let min_len = a.nlimbs().min(b.nlimbs());

    let mut a_extra = vec![Limb::ZERO; a.nlimbs()];
    let mut b_extra = vec![Limb::ZERO; b.nlimbs()];
    let mut common = vec![Limb::ZERO; min_len];

    for i in 0..min_len {
        common[i] = Limb(a.limbs[i].0 & b.limbs[i].0);
        a_extra[i] = a.limbs[i].wrapping_sub(common[i]);
        b_extra[i] = b.limbs[i].wrapping_sub(common[i]);
    }
    a_extra[min_len..].copy_from_slice(&a.limbs[min_len..]);
    b_extra[min_len..].copy_from_slice(&b.limbs[min_len..]);

    (nat(a_extra), nat(b_extra), nat(common))
}

/// In-place threefold variant: subtracts the per-limb common bits of the
/// three inputs from each of them and returns the common part.
pub(crate) fn threefold_gcw(inputs: [&mut Nat; 3]) -> Nat {
    let min_len = inputs.iter().map(|x| x.nlimbs()).min().unwrap_or(0);

    let mut common = vec![Limb::ZERO; min_len];
    for i in 0..min_len {
        common[i] = Limb(inputs[0].limbs[i].0 & inputs[1].limbs[i].0 & inputs[2].limbs[i].0);
    }
    for input in inputs {
        for i in 0..min_len {
            input.limbs[i] = input.limbs[i].wrapping_sub(common[i]);
        }
        input.norm();
    }
    nat(common)
}

/// Fourfold variant, functional: returns the four residuals and the common
/// part.
pub(crate) fn fourfold_gcw(inputs: &[Nat; 4]) -> ([Nat; 4], Nat) {
    let min_len = inputs.iter().map(Nat::nlimbs).min().unwrap_or(0);

    let mut common = vec![Limb::ZERO; min_len];
    for i in 0..min_len {
        common[i] = Limb(
            inputs[0].limbs[i].0
                & inputs[1].limbs[i].0
                & inputs[2].limbs[i].0
                & inputs[3].limbs[i].0,
        );
    }

    let residuals = [0, 1, 2, 3].map(|k| {
        let input: &Nat = &inputs[k];
        let mut extra = input.limbs.clone();
        for i in 0..min_len {
            extra[i] = extra[i].wrapping_sub(common[i]);
        }
        nat(extra)
    });

    (residuals, nat(common))
}

fn nat(limbs: Vec<Limb>) -> Nat {
    let mut ret = Nat { limbs };
    ret.norm();
    ret
}

#[cfg(test)]
mod tests {
    use super::{fourfold_gcw, gcw, threefold_gcw};
    use crate::Nat;
    use proptest::prelude::*;

    fn and(a: &Nat, b: &Nat) -> Nat {
        let limbs = a
            .as_limbs()
            .iter()
            .zip(b.as_limbs())
            .map(|(x, y)| crate::Limb(x.0 & y.0))
            .collect();
        super::nat(limbs)
    }

    fn nat_from_bytes(bytes: &[u8]) -> Nat {
        Nat::from_be_slice(bytes)
    }

    #[test]
    fn gcw_example() {
        // a = 11011111, b = 11100000: common bits 11000000
        let (a1, b1, c) = gcw(&Nat::from(0b1101_1111u64), &Nat::from(0b1110_0000u64));
        assert_eq!(c, Nat::from(0b1100_0000u64));
        assert_eq!(a1, Nat::from(0b0001_1111u64));
        assert_eq!(b1, Nat::from(0b0010_0000u64));
    }

    #[test]
    fn gcw_mixed_lengths() {
        let a = Nat::from_words(vec![0b1111, 0b1010, 0b1]);
        let b = Nat::from_words(vec![0b1001]);
        let (a1, b1, c) = gcw(&a, &b);
        assert_eq!(&a1 + &c, a);
        assert_eq!(&b1 + &c, b);
        assert_eq!(c, Nat::from_words(vec![0b1001]));
    }

    proptest! {
        #[test]
        fn gcw_decomposition_law(xs in any::<Vec<u8>>(), ys in any::<Vec<u8>>()) {
            let a = nat_from_bytes(&xs);
            let b = nat_from_bytes(&ys);
            let (a1, b1, c) = gcw(&a, &b);
            prop_assert_eq!(&a1 + &c, a);
            prop_assert_eq!(&b1 + &c, b);
            prop_assert!(and(&a1, &c).is_zero());
            prop_assert!(and(&b1, &c).is_zero());
        }

        #[test]
        fn threefold_decomposition_law(
            xs in any::<Vec<u8>>(),
            ys in any::<Vec<u8>>(),
            zs in any::<Vec<u8>>(),
        ) {
            let (a, b, c) = (nat_from_bytes(&xs), nat_from_bytes(&ys), nat_from_bytes(&zs));
            let (mut a1, mut b1, mut c1) = (a.clone(), b.clone(), c.clone());
            let common = threefold_gcw([&mut a1, &mut b1, &mut c1]);
            prop_assert_eq!(&a1 + &common, a);
            prop_assert_eq!(&b1 + &common, b);
            prop_assert_eq!(&c1 + &common, c);
            prop_assert!(and(&a1, &common).is_zero());
        }

        #[test]
        fn fourfold_decomposition_law(
            xs in any::<Vec<u8>>(),
            ys in any::<Vec<u8>>(),
            zs in any::<Vec<u8>>(),
            ws in any::<Vec<u8>>(),
        ) {
            let inputs = [
                nat_from_bytes(&xs),
                nat_from_bytes(&ys),
                nat_from_bytes(&zs),
                nat_from_bytes(&ws),
            ];
            let (residuals, common) = fourfold_gcw(&inputs);
            for (residual, input) in residuals.iter().zip(&inputs) {
                prop_assert_eq!(&(residual + &common), input);
                prop_assert!(and(residual, &common).is_zero());
            }
        }
    }
}
