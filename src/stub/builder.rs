use alloc::vec::Vec;
use core::fmt::{self, Display};

use super::Semihosting;
use crate::common::Errno;

/// The command line reported to targets unless configured otherwise.
pub(super) const DEFAULT_CMDLINE: &[u8] = b"foobar";

/// An error which may occur when building a [`Semihosting`] session.
#[derive(Debug)]
#[non_exhaustive]
pub enum SemihostingBuilderError {
    /// The command line contains an interior NUL byte.
    CmdlineContainsNul,
}

impl Display for SemihostingBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::SemihostingBuilderError::*;
        match self {
            CmdlineContainsNul => write!(f, "The command line must not contain NUL bytes."),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SemihostingBuilderError {}

/// Helper to construct and customize a [`Semihosting`] session.
pub struct SemihostingBuilder {
    enabled: bool,
    high_vectors: bool,
    cmdline: Option<Vec<u8>>,
}

impl Default for SemihostingBuilder {
    fn default() -> Self {
        SemihostingBuilder::new()
    }
}

impl SemihostingBuilder {
    /// Create a new `SemihostingBuilder`.
    pub fn new() -> SemihostingBuilder {
        SemihostingBuilder {
            enabled: true,
            high_vectors: false,
            cmdline: None,
        }
    }

    /// Whether semihosting requests should be serviced. Defaults to `true`.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Specify the command line reported by `SYS_GET_CMDLINE`. Defaults to
    /// `"foobar"`.
    pub fn cmdline(mut self, cmdline: impl Into<Vec<u8>>) -> Self {
        self.cmdline = Some(cmdline.into());
        self
    }

    /// Whether the core's exception vectors live at `0xffff_0000` (i.e: the
    /// `V` bit of the system control register is set). Defaults to `false`.
    pub fn high_vectors(mut self, high_vectors: bool) -> Self {
        self.high_vectors = high_vectors;
        self
    }

    /// Build the session, returning an error if something went wrong.
    pub fn build(self) -> Result<Semihosting, SemihostingBuilderError> {
        let cmdline = match self.cmdline {
            Some(cmdline) => {
                if cmdline.contains(&0) {
                    return Err(SemihostingBuilderError::CmdlineContainsNul);
                }
                cmdline
            }
            None => DEFAULT_CMDLINE.to_vec(),
        };

        Ok(Semihosting {
            enabled: self.enabled,
            high_vectors: self.high_vectors,
            cmdline,
            errno: Errno::NONE,
        })
    }
}
