use core::fmt;

/// Reason code passed in `r1` by `angel_SWIreason_ReportException`.
///
/// Transcribed from the `ADP_Stopped_*` values in the ARM semihosting
/// documentation.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExceptionReason(pub u32);

#[allow(non_upper_case_globals)]
#[rustfmt::skip]
impl ExceptionReason {
    #[doc = "Branch through zero"]          pub const BranchThroughZero:   Self = Self(0x20000);
    #[doc = "Undefined instruction"]        pub const UndefinedInstr:      Self = Self(0x20001);
    #[doc = "Software interrupt"]           pub const SoftwareInterrupt:   Self = Self(0x20002);
    #[doc = "Prefetch abort"]               pub const PrefetchAbort:       Self = Self(0x20003);
    #[doc = "Data abort"]                   pub const DataAbort:           Self = Self(0x20004);
    #[doc = "Address exception"]            pub const AddressException:    Self = Self(0x20005);
    #[doc = "IRQ"]                          pub const Irq:                 Self = Self(0x20006);
    #[doc = "FIQ"]                          pub const Fiq:                 Self = Self(0x20007);
    #[doc = "Breakpoint"]                   pub const BreakPoint:          Self = Self(0x20020);
    #[doc = "Watchpoint"]                   pub const WatchPoint:          Self = Self(0x20021);
    #[doc = "Step complete"]                pub const StepComplete:        Self = Self(0x20022);
    #[doc = "Unknown run-time error"]       pub const RunTimeErrorUnknown: Self = Self(0x20023);
    #[doc = "Internal error"]               pub const InternalError:       Self = Self(0x20024);
    #[doc = "User interruption"]            pub const UserInterruption:    Self = Self(0x20025);
    #[doc = "Application exit"]             pub const ApplicationExit:     Self = Self(0x20026);
    #[doc = "Stack overflow"]               pub const StackOverflow:       Self = Self(0x20027);
    #[doc = "Division by zero"]             pub const DivisionByZero:      Self = Self(0x20028);
    #[doc = "OS-specific"]                  pub const OSSpecific:          Self = Self(0x20029);
}

impl ExceptionReason {
    /// The `ADP_Stopped_*` name of this reason, if it's a known one.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::BranchThroughZero => "ADP_Stopped_BranchThroughZero",
            Self::UndefinedInstr => "ADP_Stopped_UndefinedInstr",
            Self::SoftwareInterrupt => "ADP_Stopped_SoftwareInterrupt",
            Self::PrefetchAbort => "ADP_Stopped_PrefetchAbort",
            Self::DataAbort => "ADP_Stopped_DataAbort",
            Self::AddressException => "ADP_Stopped_AddressException",
            Self::Irq => "ADP_Stopped_IRQ",
            Self::Fiq => "ADP_Stopped_FIQ",
            Self::BreakPoint => "ADP_Stopped_BreakPoint",
            Self::WatchPoint => "ADP_Stopped_WatchPoint",
            Self::StepComplete => "ADP_Stopped_StepComplete",
            Self::RunTimeErrorUnknown => "ADP_Stopped_RunTimeErrorUnknown",
            Self::InternalError => "ADP_Stopped_InternalError",
            Self::UserInterruption => "ADP_Stopped_UserInterruption",
            Self::ApplicationExit => "ADP_Stopped_ApplicationExit",
            Self::StackOverflow => "ADP_Stopped_StackOverflow",
            Self::DivisionByZero => "ADP_Stopped_DivisionByZero",
            Self::OSSpecific => "ADP_Stopped_OSSpecific",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ExceptionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({:#x})", name, self.0),
            None => write!(f, "{:#x}", self.0),
        }
    }
}
