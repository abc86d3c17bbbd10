//! Host-side [ARM semihosting](https://developer.arm.com/documentation/dui0471/m/what-is-semihosting-/what-is-semihosting-)
//! support for debuggers and emulators.
//!
//! Code running on an ARM core can request host operating-system services
//! (file I/O, console I/O, the wall clock, the command line...) by raising a
//! well-known `SVC` instruction with a request code in `r0` and a pointer to a
//! parameter block in `r1`. When the core halts on the Supervisor Call vector,
//! the debugger hands the halt to [`Semihosting::handle_trap`], which:
//!
//! 1. checks that the halt really was caused by the semihosting trap,
//! 2. decodes the request and its parameter block from target memory,
//! 3. services the request against a [`HostIo`](host::HostIo) backend,
//! 4. writes the result back into `r0`, restores `pc` / `cpsr` from the
//!    banked `lr_svc` / `spsr_svc`, and resumes the core.
//!
//! `semihost` doesn't know how to talk to a core. That's the job of the
//! [`Target`](target::Target) trait, which is implemented by whatever drives
//! the core (a JTAG/SWD probe, an emulator, etc...).
//!
//! ```rust,ignore
//! let mut semihosting = Semihosting::builder()
//!     .cmdline("app --verbose")
//!     .build()?;
//! let mut host = StdHost::new();
//!
//! // ... the core halted ...
//! match semihosting.handle_trap(&mut core, &mut host)? {
//!     TrapOutcome::NotApplicable => { /* some other debug event */ }
//!     TrapOutcome::Resumed => { /* core is running again */ }
//!     TrapOutcome::Halted(reason) => { /* target reported an exception */ }
//! }
//! ```
//!
//! ## Errors
//!
//! Three kinds of errors may occur while servicing a request:
//!
//! - Lost contact with the core (a register or memory access failed). The
//!   request is abandoned, the core is left halted, and a
//!   [`SemihostingError`] is returned.
//! - The host operation failed (e.g: file not found). The host's
//!   [`Errno`](common::Errno) is stored in the session's error slot, `r0`
//!   reports the failure, and the core is resumed as normal.
//! - The request itself was malformed or unsupported. A synthesized
//!   [`Errno`](common::Errno) is stored, and the core is resumed as normal.
//!
//! ## Features
//!
//! - `std` (default):
//!   - Provides [`StdHost`](host::StdHost), a [`HostIo`](host::HostIo)
//!     backend built on `std::fs` and `std::io`.
//!   - Implements `std::error::Error` for the crate's error types.
//!
//! Without `std`, the crate is `#![no_std]`, but still requires `alloc` for
//! the per-request transfer buffers.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

extern crate alloc;

pub mod arch;
pub mod common;
pub mod host;
pub mod stub;
pub mod target;

pub use stub::{Semihosting, SemihostingBuilder, SemihostingError, TrapOutcome};
