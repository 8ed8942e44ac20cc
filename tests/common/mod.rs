//! Shared helpers for converting between [`Nat`] and `num-bigint`.

use multi_modexp::Nat;
use num_bigint::BigUint;

pub fn to_biguint(n: &Nat) -> BigUint {
    BigUint::from_bytes_be(&n.to_be_bytes())
}

pub fn to_nat(n: &BigUint) -> Nat {
    Nat::from_be_slice(&n.to_bytes_be())
}
