#![doc = include_str!("../README.md")]

pub use crate::error::{Error, Result};
pub use crate::glide::*;
pub use crate::hull::*;
pub use crate::terrain::*;
pub use crate::thermal::*;
pub use crate::types::*;

mod error;
mod glide;
mod hull;
mod terrain;
mod thermal;
mod types;
