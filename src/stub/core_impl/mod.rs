//! The request dispatcher, and the catalog of request handlers.
//!
//! Each handler receives a [`Ctx`] holding everything a request may touch:
//! target memory (via the [`Marshaler`]), the host, and the session's error
//! slot. Handlers decode their own parameter block, validate it, call into the
//! host, and return a [`Completion`] describing how the request finished.

use log::*;

use super::marshal::Marshaler;
use super::SemihostingError;
use crate::common::{Errno, ExceptionReason, Request};
use crate::host::{HostIo, HostIoResult};
use crate::target::Target;

mod console;
mod file;
mod misc;

/// Common imports used by the handler modules.
mod prelude {
    pub(super) use super::{Completion, Ctx, HandlerResult};
    pub(super) use crate::common::Errno;
    pub(super) use crate::host::{HostHandle, HostIo};
    pub(super) use crate::target::Target;
}

/// How a request finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Completion {
    /// Write the result into `r0`, and resume the core.
    Resume(i32),
    /// The target reported an exception. Leave the core halted.
    Halt(ExceptionReason),
}

pub(super) type HandlerResult<T> = Result<Completion, SemihostingError<<T as Target>::Error>>;

type Handler<T, H> = fn(&mut Ctx<'_, T, H>) -> HandlerResult<T>;

/// Everything a request handler has access to.
pub(super) struct Ctx<'a, T: Target, H: HostIo> {
    /// The request being serviced.
    pub request: Request,
    /// The raw value of `r1`. Usually the address of the parameter block.
    pub arg: u32,
    pub mem: Marshaler<'a, T>,
    pub host: &'a mut H,
    pub errno: &'a mut Errno,
    pub cmdline: &'a [u8],
}

impl<'a, T: Target, H: HostIo> Ctx<'a, T, H> {
    /// Read the request's `N`-word parameter block.
    pub fn params<const N: usize>(&mut self) -> Result<[u32; N], SemihostingError<T::Error>> {
        let params = self.mem.read_words(self.arg)?;
        trace!("semihosting: params {:#010x?}", params);
        Ok(params)
    }

    /// Update the error slot from the outcome of a host call, returning the
    /// call's value on success.
    ///
    /// Successful calls _clear_ the error slot.
    pub fn record<V>(&mut self, res: HostIoResult<V>) -> Option<V> {
        match res {
            Ok(v) => {
                *self.errno = Errno::NONE;
                Some(v)
            }
            Err(e) => {
                debug!("semihosting: {} failed on the host: {}", self.request, e);
                *self.errno = e;
                None
            }
        }
    }

    /// Fail the request without touching the host.
    pub fn fail(&mut self, e: Errno) -> Completion {
        debug!("semihosting: rejecting {}: {}", self.request, e);
        *self.errno = e;
        Completion::Resume(-1)
    }
}

/// Map each request code onto its handler.
///
/// Codes not listed here are handled by [`misc::unsupported`].
fn catalog<T: Target, H: HostIo>() -> [(Request, Handler<T, H>); 18] {
    [
        (Request::SYS_OPEN, file::open::<T, H>),
        (Request::SYS_CLOSE, file::close::<T, H>),
        (Request::SYS_WRITEC, console::writec::<T, H>),
        (Request::SYS_WRITE0, console::write0::<T, H>),
        (Request::SYS_WRITE, file::write::<T, H>),
        (Request::SYS_READ, file::read::<T, H>),
        (Request::SYS_READC, console::readc::<T, H>),
        (Request::SYS_ISERROR, misc::iserror::<T, H>),
        (Request::SYS_ISTTY, file::istty::<T, H>),
        (Request::SYS_SEEK, file::seek::<T, H>),
        (Request::SYS_FLEN, file::flen::<T, H>),
        (Request::SYS_REMOVE, file::remove::<T, H>),
        (Request::SYS_RENAME, file::rename::<T, H>),
        (Request::SYS_TIME, misc::time::<T, H>),
        (Request::SYS_ERRNO, misc::errno::<T, H>),
        (Request::SYS_GET_CMDLINE, misc::get_cmdline::<T, H>),
        (Request::SYS_HEAPINFO, misc::heapinfo::<T, H>),
        (Request::REPORT_EXCEPTION, misc::report_exception::<T, H>),
    ]
}

/// Route a request to its handler.
pub(super) fn dispatch<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    debug!("semihosting: {} r1={:#010x}", ctx.request, ctx.arg);

    let handler = catalog::<T, H>()
        .iter()
        .find(|(code, _)| *code == ctx.request)
        .map(|(_, handler)| *handler)
        .unwrap_or(misc::unsupported::<T, H>);

    handler(ctx)
}
