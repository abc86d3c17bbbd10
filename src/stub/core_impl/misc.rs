use alloc::vec::Vec;

use log::*;

use super::prelude::*;
use crate::common::ExceptionReason;
use crate::stub::SemihostingError;
use crate::target::TargetEvent;

pub(super) fn iserror<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [status] = ctx.params::<1>()?;
    Ok(Completion::Resume((status != 0) as i32))
}

pub(super) fn time<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    Ok(Completion::Resume(ctx.host.time() as i32))
}

pub(super) fn errno<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    Ok(Completion::Resume(ctx.errno.0))
}

pub(super) fn get_cmdline<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [addr, max_len] = ctx.params::<2>()?;

    let mut cmdline = Vec::with_capacity(ctx.cmdline.len() + 1);
    cmdline.extend_from_slice(ctx.cmdline);
    cmdline.push(0);

    if (max_len as usize) < cmdline.len() {
        debug!(
            "semihosting: command line needs {} bytes, target buffer holds {}",
            cmdline.len(),
            max_len
        );
        return Ok(Completion::Resume(-1));
    }

    ctx.mem.write_bytes(addr, &cmdline)?;
    Ok(Completion::Resume(0))
}

pub(super) fn heapinfo<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [addr] = ctx.params::<1>()?;
    // heap base, heap limit, stack base, stack limit: all unknown
    ctx.mem.write_words(addr, &[0; 4])?;
    Ok(Completion::Resume(0))
}

pub(super) fn report_exception<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let reason = ExceptionReason(ctx.arg);
    if reason == ExceptionReason::ApplicationExit {
        info!("semihosting: application exited");
    } else {
        warn!("semihosting: target reported exception {}", reason);
    }

    ctx.mem
        .target()
        .notify(TargetEvent::Halted)
        .map_err(SemihostingError::Notify)?;
    Ok(Completion::Halt(reason))
}

pub(super) fn unsupported<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    warn!("semihosting: unsupported request {}", ctx.request);
    Ok(ctx.fail(Errno::ENOTSUP))
}
