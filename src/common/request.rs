use core::fmt;

/// A semihosting request code, as passed in `r0`.
///
/// These values are defined by the semihosting protocol, and must never be
/// renumbered.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Request(pub u32);

#[rustfmt::skip]
impl Request {
    #[doc = "Open a file or the console"]               pub const SYS_OPEN:         Self = Self(0x01);
    #[doc = "Close a file"]                             pub const SYS_CLOSE:        Self = Self(0x02);
    #[doc = "Write a character to the console"]         pub const SYS_WRITEC:       Self = Self(0x03);
    #[doc = "Write a NUL-terminated string to the console"] pub const SYS_WRITE0:   Self = Self(0x04);
    #[doc = "Write to a file"]                          pub const SYS_WRITE:        Self = Self(0x05);
    #[doc = "Read from a file"]                         pub const SYS_READ:         Self = Self(0x06);
    #[doc = "Read a character from the console"]        pub const SYS_READC:        Self = Self(0x07);
    #[doc = "Check if a return code is an error"]       pub const SYS_ISERROR:      Self = Self(0x08);
    #[doc = "Check if a file is a terminal"]            pub const SYS_ISTTY:        Self = Self(0x09);
    #[doc = "Seek to an absolute position in a file"]   pub const SYS_SEEK:         Self = Self(0x0a);
    #[doc = "Get the length of a file"]                 pub const SYS_FLEN:         Self = Self(0x0c);
    #[doc = "Get a temporary file name"]                pub const SYS_TMPNAM:       Self = Self(0x0d);
    #[doc = "Remove a file"]                            pub const SYS_REMOVE:       Self = Self(0x0e);
    #[doc = "Rename a file"]                            pub const SYS_RENAME:       Self = Self(0x0f);
    #[doc = "Execution time in centiseconds"]           pub const SYS_CLOCK:        Self = Self(0x10);
    #[doc = "Seconds since the epoch"]                  pub const SYS_TIME:         Self = Self(0x11);
    #[doc = "Run a host command"]                       pub const SYS_SYSTEM:       Self = Self(0x12);
    #[doc = "Last host errno"]                          pub const SYS_ERRNO:        Self = Self(0x13);
    #[doc = "Get the command line"]                     pub const SYS_GET_CMDLINE:  Self = Self(0x15);
    #[doc = "Get heap and stack limits"]                pub const SYS_HEAPINFO:     Self = Self(0x16);
    #[doc = "Switch to supervisor mode"]                pub const ENTER_SVC:        Self = Self(0x17);
    #[doc = "Report an exception (e.g: exit)"]          pub const REPORT_EXCEPTION: Self = Self(0x18);
    #[doc = "Elapsed target ticks"]                     pub const SYS_ELAPSED:      Self = Self(0x30);
    #[doc = "Target tick frequency"]                    pub const SYS_TICKFREQ:     Self = Self(0x31);
}

impl Request {
    /// The protocol name of this request code, if it's a known one.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::SYS_OPEN => "SYS_OPEN",
            Self::SYS_CLOSE => "SYS_CLOSE",
            Self::SYS_WRITEC => "SYS_WRITEC",
            Self::SYS_WRITE0 => "SYS_WRITE0",
            Self::SYS_WRITE => "SYS_WRITE",
            Self::SYS_READ => "SYS_READ",
            Self::SYS_READC => "SYS_READC",
            Self::SYS_ISERROR => "SYS_ISERROR",
            Self::SYS_ISTTY => "SYS_ISTTY",
            Self::SYS_SEEK => "SYS_SEEK",
            Self::SYS_FLEN => "SYS_FLEN",
            Self::SYS_TMPNAM => "SYS_TMPNAM",
            Self::SYS_REMOVE => "SYS_REMOVE",
            Self::SYS_RENAME => "SYS_RENAME",
            Self::SYS_CLOCK => "SYS_CLOCK",
            Self::SYS_TIME => "SYS_TIME",
            Self::SYS_SYSTEM => "SYS_SYSTEM",
            Self::SYS_ERRNO => "SYS_ERRNO",
            Self::SYS_GET_CMDLINE => "SYS_GET_CMDLINE",
            Self::SYS_HEAPINFO => "SYS_HEAPINFO",
            Self::ENTER_SVC => "angel_SWIreason_EnterSVC",
            Self::REPORT_EXCEPTION => "angel_SWIreason_ReportException",
            Self::SYS_ELAPSED => "SYS_ELAPSED",
            Self::SYS_TICKFREQ => "SYS_TICKFREQ",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}({:#04x})", name, self.0),
            None => write!(f, "{:#x}", self.0),
        }
    }
}
