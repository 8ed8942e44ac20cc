//! Batch modular exponentiation for a shared base and odd modulus.
//!
//! # About
//! Protocols built on RSA accumulators, verifiable delay functions and
//! their class-group analogues repeatedly compute `x^y mod m` for one
//! fixed base and modulus but many large exponents. This crate amortizes
//! that cost two ways:
//!
//! - [`double_exp`] and [`fourfold_exp`] run a single Montgomery squaring
//!   ladder for a whole batch of exponents, and extract bits the
//!   exponents share so each shared bit is paid for once.
//! - [`PreTable`] precomputes `x^(2^i)` in Montgomery form, after which
//!   [`exp_parallel`], [`fourfold_exp_precomputed`] and
//!   [`fourfold_exp_precomputed_parallel`] replace the squaring chain
//!   entirely and spread the exponent scan across worker threads.
//!
//! Every result is bit-for-bit identical to a reference single-exponent
//! modular exponentiation.
//!
//! # Warning
//! All arithmetic here is variable-time by design. Do not use this crate
//! with secret exponents.
//!
//! # Example
//! ```
//! use multi_modexp::{double_exp, Nat};
//!
//! let x = Nat::from(2u64);
//! let m = Nat::from(7u64);
//! let [r1, r2] = double_exp(&x, &m, &[Nat::from(3u64), Nat::from(5u64)]);
//! assert_eq!(r1, Nat::from(1u64));
//! assert_eq!(r2, Nat::from(4u64));
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod common_bits;
mod exp;
mod limb;
mod modular;
mod nat;
mod parallel;
mod pool;
mod table;
mod word;

pub use crate::{
    exp::{double_exp, fourfold_exp, fourfold_exp_precomputed},
    limb::Limb,
    nat::Nat,
    parallel::{exp_parallel, fourfold_exp_precomputed_parallel},
    table::PreTable,
    word::{WideWord, Word},
};
