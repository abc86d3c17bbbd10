use alloc::vec::Vec;
use core::convert::TryFrom;

use log::*;

use super::prelude::*;
use crate::host::{ConsoleStream, HostIoOpenFlags, HostSeek};

/// Filenames longer than this are rejected outright.
const MAX_NAME_LEN: u32 = 255;

/// Special filename which refers to the host console.
const CONSOLE_NAME: &[u8] = b":tt";

/// Most bytes moved through a host buffer at once.
const MAX_CHUNK: u32 = 0x1_0000;

/// Translate an `fopen`-style mode index (`"r"`, `"rb"`, `"r+"`, ... `"a+b"`)
/// into host open flags. The "binary" bit carries no meaning on the host.
fn open_flags(mode: u32) -> HostIoOpenFlags {
    let mut flags = if mode & 2 != 0 {
        HostIoOpenFlags::O_RDWR
    } else if mode & 0xc != 0 {
        HostIoOpenFlags::O_WRONLY
    } else {
        HostIoOpenFlags::O_RDONLY
    };

    if mode >= 8 {
        flags |= HostIoOpenFlags::O_CREAT | HostIoOpenFlags::O_APPEND;
    } else if mode >= 4 {
        flags |= HostIoOpenFlags::O_CREAT | HostIoOpenFlags::O_TRUNC;
    }

    flags
}

/// Read a filename of `len` bytes, stopping early at a NUL.
fn read_filename<T: Target, H: HostIo>(
    ctx: &mut Ctx<'_, T, H>,
    addr: u32,
    len: u32,
) -> Result<Vec<u8>, crate::SemihostingError<T::Error>> {
    let mut name = alloc::vec![0; len as usize];
    ctx.mem.read_bytes(addr, &mut name)?;
    if let Some(nul) = name.iter().position(|&c| c == 0) {
        name.truncate(nul);
    }
    Ok(name)
}

/// Allocate a zeroed transfer buffer for (at most one chunk of) a `len` byte
/// transfer, reporting failure instead of aborting.
fn transfer_buf(len: u32) -> Option<Vec<u8>> {
    let len = len.min(MAX_CHUNK) as usize;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).ok()?;
    buf.resize(len, 0);
    Some(buf)
}

pub(super) fn open<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [addr, mode, len] = ctx.params::<3>()?;
    if len > MAX_NAME_LEN || mode > 11 {
        return Ok(ctx.fail(Errno::EINVAL));
    }

    let name = read_filename(ctx, addr, len)?;
    let flags = open_flags(mode);

    let res = if name == CONSOLE_NAME {
        let stream = if flags.is_read_only() {
            ConsoleStream::Stdin
        } else {
            ConsoleStream::Stdout
        };
        trace!("semihosting: opening console as {:?}", stream);
        ctx.host.dup_console(stream)
    } else {
        ctx.host.open(&name, flags)
    };

    Ok(Completion::Resume(ctx.record(res).unwrap_or(-1)))
}

pub(super) fn close<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [fd] = ctx.params::<1>()?;
    let res = ctx.host.close(fd as HostHandle);
    Ok(Completion::Resume(ctx.record(res).map_or(-1, |()| 0)))
}

pub(super) fn write<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [fd, addr, len] = ctx.params::<3>()?;
    let mut buf = match transfer_buf(len) {
        Some(buf) => buf,
        None => return Ok(ctx.fail(Errno::ENOMEM)),
    };

    let mut written = 0;
    loop {
        let chunk = &mut buf[..(len - written).min(MAX_CHUNK) as usize];
        ctx.mem.read_bytes(addr.wrapping_add(written), chunk)?;
        let res = ctx.host.write(fd as HostHandle, chunk);
        let n = match ctx.record(res) {
            Some(n) => n.min(chunk.len()),
            None => return Ok(Completion::Resume(-1)),
        };

        written += n as u32;
        if n < chunk.len() || written == len {
            break;
        }
    }
    Ok(Completion::Resume((len - written) as i32))
}

pub(super) fn read<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [fd, addr, len] = ctx.params::<3>()?;
    let mut buf = match transfer_buf(len) {
        Some(buf) => buf,
        None => return Ok(ctx.fail(Errno::ENOMEM)),
    };

    let res = ctx.host.read(fd as HostHandle, &mut buf);
    let n = match ctx.record(res) {
        Some(n) => n.min(buf.len()),
        None => return Ok(Completion::Resume(-1)),
    };

    ctx.mem.write_bytes(addr, &buf[..n])?;
    Ok(Completion::Resume((len - n as u32) as i32))
}

pub(super) fn istty<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [fd] = ctx.params::<1>()?;
    Ok(Completion::Resume(ctx.host.is_tty(fd as HostHandle) as i32))
}

pub(super) fn seek<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [fd, pos] = ctx.params::<2>()?;
    let res = ctx.host.seek(fd as HostHandle, HostSeek::Start(pos as u64));
    let ret = match ctx.record(res) {
        Some(new_pos) if new_pos == pos as u64 => 0,
        _ => -1,
    };
    Ok(Completion::Resume(ret))
}

pub(super) fn flen<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [fd] = ctx.params::<1>()?;
    let fd = fd as HostHandle;

    let res = ctx.host.seek(fd, HostSeek::Current(0));
    let saved = match ctx.record(res) {
        Some(pos) => pos,
        None => return Ok(Completion::Resume(-1)),
    };

    let res = ctx.host.seek(fd, HostSeek::End(0));
    let len = ctx.record(res);

    // restore the original position even if the length couldn't be determined
    if let Err(e) = ctx.host.seek(fd, HostSeek::Start(saved)) {
        debug!("semihosting: could not restore position of fd {}: {}", fd, e);
        *ctx.errno = e;
        return Ok(Completion::Resume(-1));
    }

    let len = match len {
        Some(len) => len,
        None => return Ok(Completion::Resume(-1)),
    };
    match i32::try_from(len) {
        Ok(len) => Ok(Completion::Resume(len)),
        Err(_) => Ok(ctx.fail(Errno::EFBIG)),
    }
}

pub(super) fn remove<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [addr, len] = ctx.params::<2>()?;
    if len > MAX_NAME_LEN {
        return Ok(ctx.fail(Errno::EINVAL));
    }

    let name = read_filename(ctx, addr, len)?;
    let res = ctx.host.remove(&name);
    Ok(Completion::Resume(ctx.record(res).map_or(-1, |()| 0)))
}

pub(super) fn rename<T: Target, H: HostIo>(ctx: &mut Ctx<'_, T, H>) -> HandlerResult<T> {
    let [from_addr, from_len, to_addr, to_len] = ctx.params::<4>()?;
    if from_len > MAX_NAME_LEN || to_len > MAX_NAME_LEN {
        return Ok(ctx.fail(Errno::EINVAL));
    }

    let from = read_filename(ctx, from_addr, from_len)?;
    let to = read_filename(ctx, to_addr, to_len)?;
    let res = ctx.host.rename(&from, &to);
    Ok(Completion::Resume(ctx.record(res).map_or(-1, |()| 0)))
}
