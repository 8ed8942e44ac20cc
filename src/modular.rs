//! Montgomery-domain machinery shared by the exponentiation coordinators:
//! per-call parameter setup and the multi-exponent scanning engine.

mod engine;
mod params;

pub(crate) use engine::{assemble_and_convert, multi_montgomery, multi_montgomery_precomputed};
pub(crate) use params::MontyParams;
