//! [`Nat`] multiplication: schoolbook below the Karatsuba threshold,
//! Karatsuba above it.

use crate::{
    nat::{
        add::{add_at, add_vv_assign, add_vw_assign},
        norm_slice,
        sub::{sub_vv, sub_vv_assign, sub_vw_assign},
    },
    pool, Limb, Nat,
};
use core::cmp::max;
use core::ops::Mul;

/// Operands shorter than this many limbs are multiplied "grade school"
/// style; longer operands go through Karatsuba.
pub(crate) const KARATSUBA_THRESHOLD: usize = 40;

/// Computes `z = x * y + r` for single-limb `y` and `r`, returning the
/// carry limb. Requires `z.len() == x.len()`.
pub(crate) fn mul_add_vww(z: &mut [Limb], x: &[Limb], y: Limb, r: Limb) -> Limb {
    debug_assert_eq!(z.len(), x.len());
    let mut carry = r;
    for (zi, &xi) in z.iter_mut().zip(x) {
        let (lo, hi) = xi.carrying_mul_add(y, carry, Limb::ZERO);
        *zi = lo;
        carry = hi;
    }
    carry
}

/// Computes `z += x * y` for a single-limb `y`, returning the carry limb.
/// Requires `z.len() == x.len()`.
pub(crate) fn add_mul_vvw(z: &mut [Limb], x: &[Limb], y: Limb) -> Limb {
    debug_assert_eq!(z.len(), x.len());
    let mut carry = Limb::ZERO;
    for (zi, &xi) in z.iter_mut().zip(x) {
        let (lo, hi) = xi.carrying_mul_add(y, *zi, carry);
        *zi = lo;
        carry = hi;
    }
    carry
}

/// Schoolbook multiplication; the (non-normalized) product is placed in
/// `z[0..x.len() + y.len()]`.
fn basic_mul(z: &mut [Limb], x: &[Limb], y: &[Limb]) {
    z[..x.len() + y.len()].fill(Limb::ZERO);
    for (i, &d) in y.iter().enumerate() {
        if !d.is_zero() {
            z[x.len() + i] = add_mul_vvw(&mut z[i..i + x.len()], x, d);
        }
    }
}

/// Fast version of `z[0..n + n/2] += x[0..n]` used only by [`karatsuba`].
fn karatsuba_add(z: &mut [Limb], x: &[Limb], n: usize) {
    let carry = add_vv_assign(&mut z[..n], &x[..n]);
    if !carry.is_zero() {
        add_vw_assign(&mut z[n..n + (n >> 1)], carry);
    }
}

/// Like [`karatsuba_add`], but subtracts.
fn karatsuba_sub(z: &mut [Limb], x: &[Limb], n: usize) {
    let borrow = sub_vv_assign(&mut z[..n], &x[..n]);
    if !borrow.is_zero() {
        sub_vw_assign(&mut z[n..n + (n >> 1)], borrow);
    }
}

/// Karatsuba multiplication. `x` and `y` must have the same even length
/// `n`; `z` must be at least `6 * n` limbs, of which the first `2 * n`
/// receive the (non-normalized) product and the rest is scratch.
///
/// The three half-size products are computed recursively; the cross term
/// is reconstructed from `(x1 - x0) * (y0 - y1)` with an explicit sign so
/// no signed arithmetic is needed.
fn karatsuba(z: &mut [Limb], x: &[Limb], y: &[Limb]) {
    let n = y.len();

    // Odd-length or small operands drop back to schoolbook.
    if n & 1 != 0 || n < KARATSUBA_THRESHOLD || n < 2 {
        basic_mul(z, x, y);
        return;
    }

    let n2 = n >> 1;
    let (x0, x1) = x.split_at(n2);
    let (y0, y1) = y.split_at(n2);

    // z layout during this call:
    //
    //   6*n     5*n     4*n     3*n     2*n     1*n     0*n
    // z = [z2 copy|z0 copy| xd*yd | yd:xd | x1*y1 | x0*y0 ]
    karatsuba(z, x0, y0);
    karatsuba(&mut z[n..], x1, y1);

    // xd = |x1 - x0|, yd = |y0 - y1|; sign tracks the cross product
    let mut sign = true;
    {
        let (xd, yd) = z[2 * n..3 * n].split_at_mut(n2);
        if !sub_vv(xd, x1, x0).is_zero() {
            sign = !sign;
            sub_vv(xd, x0, x1);
        }
        if !sub_vv(yd, y0, y1).is_zero() {
            sign = !sign;
            sub_vv(yd, y1, y0);
        }
    }

    // p = xd * yd
    {
        let (lo, p) = z.split_at_mut(3 * n);
        let (xd, yd) = lo[2 * n..].split_at(n2);
        karatsuba(p, xd, yd);
    }

    // save original z2:z0 before accumulating into the low half
    {
        let (lo, r) = z.split_at_mut(4 * n);
        r[..2 * n].copy_from_slice(&lo[..2 * n]);
    }

    // add up all partial products:
    //
    //   2*n     n     0
    // z = [ z2  | z0  ]
    //   +    [ z0  ]
    //   +    [ z2  ]
    //   +    [  p  ]
    let (lo, rest) = z.split_at_mut(2 * n);
    let target = &mut lo[n2..];
    let p = &rest[n..2 * n];
    let saved = &rest[2 * n..4 * n];
    karatsuba_add(target, &saved[..n], n);
    karatsuba_add(target, &saved[n..2 * n], n);
    if sign {
        karatsuba_add(target, p, n);
    } else {
        karatsuba_sub(target, p, n);
    }
}

/// Computes an approximation to the maximum `k <= n` such that
/// `k = p << i` for a number `p <= threshold` and an `i >= 0`.
fn karatsuba_len(mut n: usize, threshold: usize) -> usize {
    let mut i = 0u32;
    while n > threshold {
        n >>= 1;
        i += 1;
    }
    n << i
}

/// Multiplies `x` by `y` into `buf`, reusing `buf`'s allocation. The
/// result is denormalized: `buf.len() == x.len() + y.len()` (or empty for
/// a zero operand).
pub(crate) fn mul_into(buf: &mut Vec<Limb>, x: &[Limb], y: &[Limb]) {
    let m = x.len();
    let n = y.len();

    if m < n {
        mul_into(buf, y, x);
        return;
    }
    if n == 0 {
        buf.clear();
        return;
    }
    if n == 1 {
        buf.clear();
        buf.resize(m + 1, Limb::ZERO);
        let (lo, hi) = buf.split_at_mut(m);
        hi[0] = mul_add_vww(lo, x, y[0], Limb::ZERO);
        return;
    }
    // m >= n > 1

    if n < KARATSUBA_THRESHOLD {
        buf.clear();
        buf.resize(m + n, Limb::ZERO);
        basic_mul(buf, x, y);
        return;
    }
    // m >= n && n >= KARATSUBA_THRESHOLD && n >= 2

    // Karatsuba handles the aligned k-limb prefix; the ragged upper parts
    // are fixed up afterwards with schoolbook sub-products.
    let k = karatsuba_len(n, KARATSUBA_THRESHOLD);
    let x0 = &x[..k];
    let y0 = &y[..k];
    buf.clear();
    buf.resize(max(6 * k, m + n), Limb::ZERO);
    karatsuba(buf, x0, y0);
    buf.truncate(m + n);
    buf[2 * k..].fill(Limb::ZERO);

    if k < n || m != n {
        let mut t = pool::get(0);

        // add x0*y1*b
        let x0 = norm_slice(x0);
        let y1 = &y[k..];
        mul_into(&mut t, x0, y1);
        add_at(buf, norm_slice(&t), k);

        // add xi*y0<<i, xi*y1*b<<(i+k)
        let y0 = norm_slice(y0);
        let mut i = k;
        while i < x.len() {
            let xi = &x[i..(i + k).min(x.len())];
            let xi = norm_slice(xi);
            mul_into(&mut t, xi, y0);
            add_at(buf, norm_slice(&t), i);
            mul_into(&mut t, xi, y1);
            add_at(buf, norm_slice(&t), i + k);
            i += k;
        }

        pool::put(t);
    }
}

impl Nat {
    /// Compute `self * rhs`.
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut limbs = Vec::new();
        mul_into(&mut limbs, &self.limbs, &rhs.limbs);
        let mut ret = Self { limbs };
        ret.norm();
        ret
    }
}

impl Mul<&Nat> for &Nat {
    type Output = Nat;

    fn mul(self, rhs: &Nat) -> Nat {
        Nat::mul(self, rhs)
    }
}

impl Mul<Nat> for Nat {
    type Output = Nat;

    fn mul(self, rhs: Nat) -> Nat {
        Nat::mul(&self, &rhs)
    }
}
