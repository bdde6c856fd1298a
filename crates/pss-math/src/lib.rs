#![crate_name = "pss_math"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Mathematical utilities for the packed secret sharing library: prime field
//! arithmetic and number-theoretic transforms over a root-of-unity table.

mod errors;

pub mod ntt;
pub mod zq;

pub use errors::{Error, Result};
