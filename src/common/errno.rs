/// A host `errno` value, as reported to target code by `SYS_ERRNO`.
///
/// Host I/O errors are passed through verbatim, so the numbering follows the
/// host platform. The named constants below cover the values `semihost`
/// synthesizes itself, plus common values for host backends to use.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Errno(pub i32);

#[allow(clippy::upper_case_acronyms)]
#[rustfmt::skip]
impl Errno {
    #[doc = "No error"]                        pub const NONE:    Self = Self(0);
    #[doc = "Operation not permitted"]         pub const EPERM:   Self = Self(1);
    #[doc = "No such file or directory"]       pub const ENOENT:  Self = Self(2);
    #[doc = "Interrupted function call"]       pub const EINTR:   Self = Self(4);
    #[doc = "Input/output error"]              pub const EIO:     Self = Self(5);
    #[doc = "Bad file descriptor"]             pub const EBADF:   Self = Self(9);
    #[doc = "Not enough space"]                pub const ENOMEM:  Self = Self(12);
    #[doc = "Permission denied"]               pub const EACCES:  Self = Self(13);
    #[doc = "Bad address"]                     pub const EFAULT:  Self = Self(14);
    #[doc = "Device or resource busy"]         pub const EBUSY:   Self = Self(16);
    #[doc = "File exists"]                     pub const EEXIST:  Self = Self(17);
    #[doc = "No such device"]                  pub const ENODEV:  Self = Self(19);
    #[doc = "Not a directory"]                 pub const ENOTDIR: Self = Self(20);
    #[doc = "Is a directory"]                  pub const EISDIR:  Self = Self(21);
    #[doc = "Invalid argument"]                pub const EINVAL:  Self = Self(22);
    #[doc = "Too many open files in system"]   pub const ENFILE:  Self = Self(23);
    #[doc = "Too many open files"]             pub const EMFILE:  Self = Self(24);
    #[doc = "Not a typewriter"]                pub const ENOTTY:  Self = Self(25);
    #[doc = "File too large"]                  pub const EFBIG:   Self = Self(27);
    #[doc = "No space left on device"]         pub const ENOSPC:  Self = Self(28);
    #[doc = "Invalid seek"]                    pub const ESPIPE:  Self = Self(29);
    #[doc = "Read-only filesystem"]            pub const EROFS:   Self = Self(30);
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd",
                 target_os = "netbsd", target_os = "openbsd", target_os = "dragonfly"))] {
        const ENOTSUP: i32 = 45;
    } else if #[cfg(windows)] {
        const ENOTSUP: i32 = 129;
    } else {
        const ENOTSUP: i32 = 95;
    }
}

impl Errno {
    /// Operation not supported.
    ///
    /// Unlike the other constants, this value differs between host platforms.
    pub const ENOTSUP: Self = Self(ENOTSUP);

    /// Check if this value represents an error.
    pub fn is_err(self) -> bool {
        self != Errno::NONE
    }
}

impl core::fmt::Display for Errno {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "errno {}", self.0)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Errno {
    fn from(e: std::io::Error) -> Errno {
        cfg_if::cfg_if! {
            if #[cfg(unix)] {
                // on unix, raw OS errors _are_ errno values
                if let Some(code) = e.raw_os_error() {
                    return Errno(code);
                }
            }
        }

        use std::io::ErrorKind::*;
        match e.kind() {
            NotFound => Errno::ENOENT,
            PermissionDenied => Errno::EACCES,
            AlreadyExists => Errno::EEXIST,
            InvalidInput | InvalidData => Errno::EINVAL,
            Interrupted => Errno::EINTR,
            OutOfMemory => Errno::ENOMEM,
            Unsupported => Errno::ENOTSUP,
            _ => Errno::EIO,
        }
    }
}
