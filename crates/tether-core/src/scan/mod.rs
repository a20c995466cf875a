//! Signature scanning and relative-address resolution.

mod pattern;
mod resolver;
mod scanner;
mod signature;

pub use pattern::Pattern;
pub use resolver::{read_displacement, resolve_relative};
pub use scanner::{Scanner, find_in_buffer};
pub use signature::{
    HANDLING_DATA, Signature, SignatureSet, TIME_SCALE, builtin_signatures, handling_signature,
    load_signatures, save_signatures, time_scale_signature,
};
