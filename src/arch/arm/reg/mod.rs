//! Register identifiers for 32-bit ARM cores.

/// Register identifiers, including banked registers.
pub mod id;

pub use id::ArmCoreRegId;
