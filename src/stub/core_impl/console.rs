//! Console requests. These take their argument directly from `r1`, and never
//! touch the error slot.

use super::prelude::*;

pub(super) fn writec<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let c = ctx.mem.read_u8(ctx.arg)?;
    ctx.host.console_write(&[c]);
    Ok(Completion::Resume(0))
}

pub(super) fn write0<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let mut addr = ctx.arg;
    loop {
        let c = ctx.mem.read_u8(addr)?;
        if c == 0 {
            break;
        }
        ctx.host.console_write(&[c]);
        addr = addr.wrapping_add(1);
    }
    Ok(Completion::Resume(0))
}

pub(super) fn readc<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let c = ctx.host.console_read();
    Ok(Completion::Resume(c.map_or(-1, i32::from)))
}
