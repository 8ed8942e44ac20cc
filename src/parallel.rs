//! Table-driven exponentiation across worker threads.
//!
//! Workers share the read-only precompute table and the call parameters;
//! each owns its scratch buffers and its accumulator. The work queue is an
//! atomic chunk counter, the result channel is bounded at one slot per
//! worker so emission never blocks, and a cancellation token is raised on
//! every coordinator exit path so workers never outlive the call.

use crate::{
    exp::{decompose, validate_precomputed, ASSEMBLE_SETS},
    modular::{assemble_and_convert, multi_montgomery_precomputed, MontyParams},
    table::PreTable,
    Limb, Nat,
};
use core::mem;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    mpsc,
};
use std::thread;

/// Limbs of exponent per work-queue chunk when the caller passes 0.
const DEFAULT_WORD_CHUNK_SIZE: usize = 2;

/// Raises the cancellation token when dropped, which covers both the
/// normal return and unwinding out of the coordinator.
struct CancelGuard<'a>(&'a AtomicBool);

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Computes `x^y mod m` using the precomputed `table`, scanning the
/// exponent with `num_workers` threads in chunks of `word_chunk_size`
/// limbs.
///
/// `num_workers` is clamped to at least 1; a `word_chunk_size` of 0
/// selects the default of 2 limbs. Partial products are folded in arrival
/// order, which is sound because Montgomery multiplication commutes; the
/// result is identical for every worker count.
///
/// Not a constant-time operation: unsuitable for secret exponents.
///
/// # Panics
///
/// Panics if the table does not match `(x, m)` or has fewer rows than the
/// exponent scan needs. Degenerate inputs (`x <= 1`, `y = 0`, `m` even)
/// fall back to a reference exponentiation; `m = 0` panics there.
pub fn exp_parallel(
    x: &Nat,
    y: &Nat,
    m: &Nat,
    table: &PreTable,
    num_workers: usize,
    word_chunk_size: usize,
) -> Nat {
    if table.base() != x {
        panic!("precompute table does not match the call's base");
    }
    if table.modulus() != m {
        panic!("precompute table does not match the call's modulus");
    }
    if *x <= Nat::one() || y.is_zero() || m.is_zero() || !m.is_odd() {
        return x.exp_mod(y, m);
    }

    let num_workers = num_workers.max(1);
    let word_chunk_size = if word_chunk_size == 0 {
        DEFAULT_WORD_CHUNK_SIZE
    } else {
        word_chunk_size
    };
    assert!(
        table.table_size() >= y.nlimbs(),
        "precompute table too small: {} rows, exponent scan needs {}",
        table.table_size(),
        y.nlimbs()
    );

    let params = MontyParams::new(x, m);
    let n = params.num_words;
    let num_pivots = y.nlimbs().div_ceil(word_chunk_size);
    tracing::debug!(
        num_workers,
        num_pivots,
        word_chunk_size,
        exponent_limbs = y.nlimbs(),
        "dispatching parallel exponent scan"
    );

    let next_chunk = AtomicUsize::new(0);
    let cancelled = AtomicBool::new(false);
    let (emit, partials) = mpsc::sync_channel::<Nat>(num_workers);

    let mut acc = thread::scope(|scope| {
        let _guard = CancelGuard(&cancelled);
        let params = &params;
        let table = &table;
        let next_chunk = &next_chunk;
        let cancelled = &cancelled;

        for _ in 0..num_workers {
            let emit = emit.clone();
            scope.spawn(move || {
                let mut acc = params.one.clone();
                let mut temp = Nat::zero_with_limbs(n);
                loop {
                    if cancelled.load(Ordering::Relaxed) {
                        return;
                    }
                    let chunk = next_chunk.fetch_add(1, Ordering::Relaxed);
                    if chunk >= num_pivots {
                        break;
                    }
                    let l = chunk * word_chunk_size;
                    let r = (l + word_chunk_size).min(y.nlimbs());
                    for i in l..r {
                        for j in 0..Limb::BITS {
                            if y.limbs[i].shr(j).0 & 1 == 0 {
                                continue;
                            }
                            temp.montgomery(&acc, table.entry(i, j), &params.modulus, params.k0, n);
                            mem::swap(&mut acc, &mut temp);
                        }
                    }
                }
                // The send only fails when the coordinator is already
                // gone; nothing left to do with the accumulator then.
                let _ = emit.send(acc);
            });
        }
        drop(emit);

        let mut acc = params.one.clone();
        let mut temp = Nat::zero_with_limbs(n);
        for _ in 0..num_workers {
            let part = partials
                .recv()
                .expect("worker terminated without emitting a partial product");
            temp.montgomery(&acc, &part, &params.modulus, params.k0, n);
            mem::swap(&mut acc, &mut temp);
        }
        acc
    });

    assemble_and_convert(&mut acc, &[], &params);
    acc
}

/// Parallel variant of
/// [`fourfold_exp_precomputed`][`crate::fourfold_exp_precomputed`]:
/// the 15 decomposed exponents are scanned by four threads over fixed
/// subsets, and the four outputs are assembled by four more.
///
/// # Panics
///
/// Same contract as [`fourfold_exp_precomputed`][`crate::fourfold_exp_precomputed`].
pub fn fourfold_exp_precomputed_parallel(
    x: &Nat,
    m: &Nat,
    exponents: &[Nat; 4],
    table: &PreTable,
) -> [Nat; 4] {
    if *x <= Nat::one() {
        return [
            x.exp_mod(&exponents[0], m),
            x.exp_mod(&exponents[1], m),
            x.exp_mod(&exponents[2], m),
            x.exp_mod(&exponents[3], m),
        ];
    }
    validate_precomputed(x, m, exponents, table);

    let params = MontyParams::new(x, m);
    let parts = decompose(exponents);

    // Scan the 15 exponent parts as four groups of at most four.
    let mut z: Vec<Nat> = thread::scope(|scope| {
        let params = &params;
        let handles: Vec<_> = parts
            .chunks(4)
            .map(|group| scope.spawn(move || multi_montgomery_precomputed(params, group, table)))
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("scan worker panicked"))
            .collect()
    });

    // Assemble the four outputs concurrently.
    let (heads, tails) = z.split_at_mut(4);
    thread::scope(|scope| {
        let params = &params;
        let tails = &*tails;
        for (head, set) in heads.iter_mut().zip(&ASSEMBLE_SETS) {
            scope.spawn(move || {
                let parts: Vec<&Nat> = set.iter().map(|&i| &tails[i - 4]).collect();
                assemble_and_convert(head, &parts, params);
            });
        }
    });

    z.truncate(4);
    let mut iter = z.into_iter();
    [(); 4].map(|()| iter.next().expect("exactly four outputs"))
}
