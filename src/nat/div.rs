//! [`Nat`] division: short division for single-limb divisors, long
//! division with Knuth-style 3-by-2 quotient refinement below the
//! recursive threshold, wide-digit recursive division above it.

use crate::{
    limb::div::{div_ww, reciprocal_word},
    nat::{
        add::{add_at, add_vv_assign},
        cmp::{cmp_denormalized, cmp_slice},
        mul::{mul_add_vww, mul_into},
        norm_slice, norm_slice_mut,
        shl::{shl_vu, shr_vu_assign},
        sub::{sub_vv_assign, sub_vw_assign},
    },
    pool, Limb, Nat, WideWord, Word,
};
use core::cmp::Ordering;

/// Divisors with at least this many limbs use recursive division.
pub(crate) const DIV_RECURSIVE_THRESHOLD: usize = 100;

impl Nat {
    /// Computes `self / rhs`, returning the quotient and the remainder.
    ///
    /// # Panics
    ///
    /// Panics with "division by zero" if `rhs` is zero.
    pub fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        if rhs.is_zero() {
            panic!("division by zero");
        }

        if cmp_slice(&self.limbs, &rhs.limbs) == Ordering::Less {
            return (Self::zero(), self.clone());
        }

        if rhs.nlimbs() == 1 {
            // Short division: long division optimized for a single-limb
            // divisor, where the 2-by-1 guess is exact at each step.
            let (q, r) = div_w(&self.limbs, rhs.limbs[0]);
            return (q, r.into());
        }

        div_large(&self.limbs, &rhs.limbs)
    }

    /// Computes `self % rhs`, returning the remainder.
    ///
    /// # Panics
    ///
    /// Panics with "division by zero" if `rhs` is zero.
    pub fn rem(&self, rhs: &Self) -> Self {
        self.div_rem(rhs).1
    }
}

/// Divides `x` by the single limb `y`, returning the quotient and the
/// remainder limb.
fn div_w(x: &[Limb], y: Limb) -> (Nat, Limb) {
    let m = x.len();
    if y.is_zero() {
        panic!("division by zero");
    }
    if y == Limb::ONE {
        let mut q = Nat {
            limbs: x.to_vec(),
        };
        q.norm();
        return (q, Limb::ZERO);
    }
    if m == 0 {
        return (Nat::zero(), Limb::ZERO);
    }
    // m > 0

    let mut limbs = vec![Limb::ZERO; m];
    let r = div_wvw(&mut limbs, Limb::ZERO, x, y);
    let mut q = Nat { limbs };
    q.norm();
    (q, r)
}

/// Overwrites `z` with `(xn:x) / y` digit by digit, returning the
/// remainder. The caller must ensure `z.len() == x.len()` and `xn < y`.
fn div_wvw(z: &mut [Limb], xn: Limb, x: &[Limb], y: Limb) -> Limb {
    let mut r = xn;
    if x.len() == 1 {
        let t = ((r.0 as WideWord) << Limb::BITS) | (x[0].0 as WideWord);
        z[0] = Limb((t / (y.0 as WideWord)) as Word);
        return Limb((t % (y.0 as WideWord)) as Word);
    }

    let rec = reciprocal_word(y);
    for i in (0..z.len()).rev() {
        let (q, r2) = div_ww(r, x[i], y, rec);
        z[i] = q;
        r = r2;
    }
    r
}

/// Long division for a multi-limb divisor. The inputs are scaled so the
/// divisor's top bit is set, then basic or recursive division runs
/// depending on the divisor size, and the remainder is unscaled.
fn div_large(u_in: &[Limb], v_in: &[Limb]) -> (Nat, Nat) {
    let n = v_in.len();
    let m = u_in.len() - n;

    let shift = v_in[n - 1].leading_zeros();
    let mut v = pool::get(n);
    shl_vu(&mut v, v_in, shift);
    let mut u = vec![Limb::ZERO; u_in.len() + 1];
    {
        let (lo, hi) = u.split_at_mut(u_in.len());
        hi[0] = shl_vu(lo, u_in, shift);
    }

    let mut q = vec![Limb::ZERO; m + 1];
    if n < DIV_RECURSIVE_THRESHOLD {
        div_basic(&mut q, &mut u, &v);
    } else {
        div_recursive(&mut q, &mut u, &v);
    }
    pool::put(v);

    let mut quotient = Nat { limbs: q };
    quotient.norm();

    // Undo the scaling of the remainder.
    shr_vu_assign(&mut u, shift);
    let mut remainder = Nat { limbs: u };
    remainder.norm();

    (quotient, remainder)
}

/// Reports whether the two-digit number `x1:x2` exceeds `y1:y2`
/// (high digits first).
fn greater_than(x1: Limb, x2: Limb, y1: Limb, y2: Limb) -> bool {
    x1 > y1 || (x1 == y1 && x2 > y2)
}

/// Basic long division. Overwrites `q` with `u / v` and `u` with the
/// remainder. `v` must be scaled so its top bit is set; `q` must be large
/// enough to hold the quotient.
fn div_basic(q: &mut [Limb], u: &mut [Limb], v: &[Limb]) {
    let n = v.len();
    if u.len() < n {
        return;
    }
    let m = u.len() - n;

    let mut qhatv = pool::get(n + 1);

    // Precompute the reciprocal for the 2-by-1 guesses.
    let vn1 = v[n - 1];
    let rec = reciprocal_word(vn1);

    // Compute each digit of the quotient.
    for j in (0..=m).rev() {
        // The 2-by-1 guess q̂. The first iteration invents a leading 0
        // for u.
        let mut qhat = Limb::MAX;
        let ujn = if j + n < u.len() {
            u[j + n]
        } else {
            Limb::ZERO
        };

        // ujn <= vn1, or q̂ would be more than one digit. For
        // ujn == vn1 the max digit above stands; otherwise compute the
        // 2-by-1 guess and refine it to a 3-by-2 guess.
        if ujn != vn1 {
            let (mut qh, mut rhat) = div_ww(ujn, u[j + n - 1], vn1, rec);

            let vn2 = v[n - 2];
            let (mut x2, mut x1) = qh.widening_mul(vn2);
            let ujn2 = u[j + n - 2];
            while greater_than(x1, x2, rhat, ujn2) {
                qh = qh.wrapping_sub(Limb::ONE);
                let prev_rhat = rhat;
                rhat = rhat.wrapping_add(vn1);
                // If r̂ overflowed, q̂ is now certainly small enough.
                if rhat < prev_rhat {
                    break;
                }
                let (lo, hi) = qh.widening_mul(vn2);
                x2 = lo;
                x1 = hi;
            }
            qhat = qh;
        }

        // Compute q̂·v.
        {
            let (lo, hi) = qhatv.split_at_mut(n);
            hi[0] = mul_add_vww(lo, v, qhat, Limb::ZERO);
        }
        let mut qhl = qhatv.len();
        if j + qhl > u.len() && qhatv[n].is_zero() {
            qhl -= 1;
        }

        // Subtract q̂·v from the current section of u. On underflow q̂
        // was one too large; add v back and decrement it.
        let borrow = sub_vv_assign(&mut u[j..j + qhl], &qhatv[..qhl]);
        if !borrow.is_zero() {
            let carry = add_vv_assign(&mut u[j..j + n], &v[..n]);
            // When n == qhl the borrow and the carry cancel in u[j+n].
            if n < qhl {
                u[j + n] = u[j + n].wrapping_add(carry);
            }
            qhat = qhat.wrapping_sub(Limb::ONE);
        }

        // The caller may know the top digit is zero and not leave room
        // for it.
        if j == m && m == q.len() && qhat.is_zero() {
            continue;
        }
        q[j] = qhat;
    }

    pool::put(qhatv);
}

/// Recursive division. Overwrites `z` with `u / v` and `u` with the
/// remainder. Allocates and frees the temporaries shared across the
/// recursion; `div_recursive_step` does the work.
fn div_recursive(z: &mut [Limb], u: &mut [Limb], v: &[Limb]) {
    // Recursion depth is (much) less than 2 log2(v.len()).
    let rec_depth = 2 * (usize::BITS - v.len().leading_zeros()) as usize;
    let mut tmp = pool::get(3 * v.len());
    let mut temps: Vec<Option<Vec<Limb>>> = vec![None; rec_depth];

    z.fill(Limb::ZERO);
    div_recursive_step(z, u, v, 0, &mut tmp, &mut temps);

    for temp in temps.into_iter().flatten() {
        pool::put(temp);
    }
    pool::put(tmp);
}

/// One level of recursive division: adds `u / v` into `z` and overwrites
/// `u` with the remainder, treating `b = n/2` limbs as a single wide
/// digit. `temps[depth]` holds the wide quotient guess buffer live across
/// the recursive call; `tmp` holds `q̂·v`, not live across it.
fn div_recursive_step(
    z: &mut [Limb],
    u: &mut [Limb],
    v: &[Limb],
    depth: usize,
    tmp: &mut Vec<Limb>,
    temps: &mut Vec<Option<Vec<Limb>>>,
) {
    let u = norm_slice_mut(u);
    let v = norm_slice(v);
    if u.is_empty() {
        z.fill(Limb::ZERO);
        return;
    }

    // Fall back to basic division once the problem is small enough.
    let n = v.len();
    if n < DIV_RECURSIVE_THRESHOLD {
        div_basic(z, u, v);
        return;
    }

    // Nothing to do if u is shorter than v (implies u < v).
    if u.len() < n {
        return;
    }
    let m = u.len() - n;

    // b limbs in a row form one wide digit.
    let b = n / 2;

    let mut qhat = temps[depth].take().unwrap_or_else(|| pool::get(n));

    // Compute each wide digit of the quotient.
    let mut j = m;
    while j > b {
        // Divide u[j-b..j+n] (3 wide digits) by v (2 wide digits): first
        // a 2-by-1 wide guess from a recursive call, then the 3-by-2
        // extension. Dropping s = b-1 limbs leaves (2b+1)-by-(b+1)
        // digits, which guarantees q̂ is off by at most 1.
        let s = b - 1;

        let uu = &mut u[j - b..];

        // The 2-by-1 wide guess q̂, leaving r̂ in uu[s..b+n].
        qhat.clear();
        qhat.resize(b + 1, Limb::ZERO);
        div_recursive_step(&mut qhat, &mut uu[s..b + n], &v[s..], depth + 1, tmp, temps);
        let qhat_len = norm_slice(&qhat).len();

        // Extend to a 3-by-2 quotient and remainder: uu already holds
        // the equivalent of r̂·B + u_{n-2}, so subtracting q̂·v_{n-2}
        // computes the full-length remainder. If q̂ is one too large the
        // comparison loop repairs it.
        mul_into(tmp, &qhat[..qhat_len], &v[..s]);
        let qhatv_len = norm_slice(tmp).len();
        tmp.resize(3 * n, Limb::ZERO);
        for _ in 0..2 {
            if cmp_denormalized(tmp, uu) != Ordering::Greater {
                break;
            }
            sub_vw_assign(&mut qhat[..qhat_len], Limb::ONE);
            let borrow = sub_vv_assign(&mut tmp[..s], &v[..s]);
            if qhatv_len > s {
                sub_vw_assign(&mut tmp[s..qhatv_len], borrow);
            }
            add_at(&mut uu[s..], &v[s..], 0);
        }
        if cmp_denormalized(tmp, uu) == Ordering::Greater {
            panic!("impossible");
        }
        let borrow = sub_vv_assign(&mut uu[..qhatv_len], &tmp[..qhatv_len]);
        if !borrow.is_zero() {
            sub_vw_assign(&mut uu[qhatv_len..], borrow);
        }
        add_at(z, &qhat[..qhat_len], j - b);
        j -= b;
    }

    // Now u < (v << b); compute the low digits with the same shift.
    let s = b - 1;
    qhat.clear();
    qhat.resize(b + 1, Limb::ZERO);
    div_recursive_step(&mut qhat, &mut u[s..], &v[s..], depth + 1, tmp, temps);
    let qhat_len = norm_slice(&qhat).len();
    mul_into(tmp, &qhat[..qhat_len], &v[..s]);
    let qhatv_len = norm_slice(tmp).len();
    tmp.resize(3 * n, Limb::ZERO);
    for _ in 0..2 {
        if cmp_denormalized(tmp, u) == Ordering::Greater {
            sub_vw_assign(&mut qhat[..qhat_len], Limb::ONE);
            let borrow = sub_vv_assign(&mut tmp[..s], &v[..s]);
            if qhatv_len > s {
                sub_vw_assign(&mut tmp[s..qhatv_len], borrow);
            }
            add_at(&mut u[s..], &v[s..], 0);
        }
    }
    if cmp_denormalized(tmp, u) == Ordering::Greater {
        panic!("impossible");
    }
    let borrow = sub_vv_assign(&mut u[..qhatv_len], &tmp[..qhatv_len]);
    if !borrow.is_zero() {
        let borrow = sub_vw_assign(&mut u[qhatv_len..], borrow);
        if !borrow.is_zero() {
            panic!("impossible");
        }
    }

    add_at(z, &qhat[..qhat_len], 0);

    temps[depth] = Some(qhat);
}

#[cfg(test)]
mod tests {
    use super::DIV_RECURSIVE_THRESHOLD;
    use crate::{Limb, Nat, Word};

    fn check_div_rem(u: &Nat, v: &Nat) {
        let (q, r) = u.div_rem(v);
        assert!(r < *v, "remainder not reduced");
        assert_eq!(&q.mul(v).add(&r), u, "q*v + r != u");
    }

    #[test]
    fn div_single_limb() {
        let (q, r) = Nat::from(1000u64).div_rem(&Nat::from(7u64));
        assert_eq!(q, Nat::from(142u64));
        assert_eq!(r, Nat::from(6u64));

        let (q, r) = Nat::from(42u64).div_rem(&Nat::one());
        assert_eq!(q, Nat::from(42u64));
        assert!(r.is_zero());
    }

    #[test]
    fn div_smaller_dividend() {
        let (q, r) = Nat::from(3u64).div_rem(&Nat::from(10u64));
        assert!(q.is_zero());
        assert_eq!(r, Nat::from(3u64));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn div_by_zero_panics() {
        let _ = Nat::one().div_rem(&Nat::zero());
    }

    fn fill_words(seed: Word, len: usize) -> Vec<Word> {
        let mut state = seed | 1;
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005u64 as Word)
                    .wrapping_add(1442695040888963407u64 as Word);
                state
            })
            .collect()
    }

    #[test]
    fn div_basic_path() {
        for &(un, vn) in &[(8, 3), (16, 2), (40, 20), (99, 98)] {
            let u = Nat::from_words(fill_words(un as Word, un));
            let v = Nat::from_words(fill_words(vn as Word, vn));
            check_div_rem(&u, &v);
        }
    }

    #[test]
    fn div_recursive_path() {
        let un = 2 * DIV_RECURSIVE_THRESHOLD + 17;
        let vn = DIV_RECURSIVE_THRESHOLD + 3;
        let u = Nat::from_words(fill_words(3, un));
        let v = Nat::from_words(fill_words(5, vn));
        check_div_rem(&u, &v);
    }

    #[test]
    fn div_exact() {
        let v = Nat::from_words(fill_words(11, 6));
        let q = Nat::from_words(fill_words(13, 4));
        let u = v.mul(&q);
        let (q2, r) = u.div_rem(&v);
        assert_eq!(q2, q);
        assert!(r.is_zero());
    }

    #[test]
    fn div_top_bit_divisor() {
        // divisor already normalized (top bit set): shift == 0 path
        let mut v_words = fill_words(17, 5);
        v_words[4] |= (1 as Word) << (Limb::BITS - 1);
        let v = Nat::from_words(v_words);
        let u = Nat::from_words(fill_words(19, 12));
        check_div_rem(&u, &v);
    }
}
