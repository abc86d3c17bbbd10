//! Architecture-specific definitions: register identifiers, program status
//! register layouts, processor modes, and the trap encodings which mark a
//! semihosting request.
//!
//! Semihosting is currently only implemented for 32-bit ARM cores (ARMv4T
//! and later, running in either the ARM or Thumb instruction set).

pub mod arm;
