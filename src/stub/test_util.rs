//! Fake core and host used by the unit tests.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

use crate::arch::arm::reg::ArmCoreRegId;
use crate::arch::arm::{CoreState, InstrSet, ProcessorMode};
use crate::common::{Endianness, Errno, Request};
use crate::host::{ConsoleStream, HostHandle, HostIo, HostIoOpenFlags, HostIoResult, HostSeek};
use crate::target::{AccessSize, Target, TargetEvent};

/// Address of the instruction following the trap.
pub const TRAP_RETURN: u32 = 0x1000;
/// Where tests put parameter blocks.
pub const PARAMS: u32 = 0x2000;

#[derive(Debug, PartialEq, Eq)]
pub struct FakeError;

/// A halted core with a flat, sparse memory.
pub struct FakeCore {
    regs: Vec<(ArmCoreRegId, u32)>,
    mem: BTreeMap<u32, u8>,
    pub state: CoreState,
    pub endianness: Endianness,

    pub fail_memory: bool,
    /// Fail only the accesses starting at this address.
    pub fail_memory_at: Option<u32>,
    pub fail_registers: bool,
    pub fail_resume: bool,
    pub fail_notify: bool,

    pub dirty: Vec<ArmCoreRegId>,
    pub mem_reads: Vec<(u32, AccessSize, usize)>,
    pub resumed: bool,
    pub events: Vec<TargetEvent>,
}

impl FakeCore {
    pub fn new() -> FakeCore {
        FakeCore {
            regs: Vec::new(),
            mem: BTreeMap::new(),
            state: CoreState {
                mode: ProcessorMode::User,
                instr_set: InstrSet::Arm,
            },
            endianness: Endianness::Little,

            fail_memory: false,
            fail_memory_at: None,
            fail_registers: false,
            fail_resume: false,
            fail_notify: false,

            dirty: Vec::new(),
            mem_reads: Vec::new(),
            resumed: false,
            events: Vec::new(),
        }
    }

    /// A core which just took the semihosting trap from user mode.
    pub fn trapped(instr_set: InstrSet, request: Request, arg: u32) -> FakeCore {
        let mut core = FakeCore::new();
        core.state.mode = ProcessorMode::Supervisor;

        core.set_reg(ArmCoreRegId::R0, request.0);
        core.set_reg(ArmCoreRegId::R1, arg);
        core.set_reg(ArmCoreRegId::Pc, 0x08);
        core.set_reg(ArmCoreRegId::Cpsr, 0x6000_00d3);
        core.set_reg(ArmCoreRegId::LrBanked(ProcessorMode::Supervisor), TRAP_RETURN);
        match instr_set {
            InstrSet::Arm => {
                core.set_reg(ArmCoreRegId::Spsr(ProcessorMode::Supervisor), 0x6000_0010);
                core.write_mem(TRAP_RETURN - 4, &0xEF12_3456_u32.to_le_bytes());
            }
            InstrSet::Thumb => {
                core.set_reg(ArmCoreRegId::Spsr(ProcessorMode::Supervisor), 0x6000_0030);
                core.write_mem(TRAP_RETURN - 2, &0xDFAB_u16.to_le_bytes());
            }
        }
        core
    }

    pub fn reg(&self, reg: ArmCoreRegId) -> u32 {
        self.regs
            .iter()
            .find(|(id, _)| *id == reg)
            .map(|(_, val)| *val)
            .unwrap_or(0)
    }

    pub fn set_reg(&mut self, reg: ArmCoreRegId, val: u32) {
        match self.regs.iter_mut().find(|(id, _)| *id == reg) {
            Some((_, v)) => *v = val,
            None => self.regs.push((reg, val)),
        }
    }

    pub fn write_mem(&mut self, addr: u32, data: &[u8]) {
        for (i, b) in data.iter().enumerate() {
            self.mem.insert(addr + i as u32, *b);
        }
    }

    pub fn write_words(&mut self, addr: u32, words: &[u32]) {
        for (i, w) in words.iter().enumerate() {
            self.write_mem(addr + 4 * i as u32, &w.to_le_bytes());
        }
    }

    pub fn read_mem(&self, addr: u32, len: usize) -> Vec<u8> {
        (0..len as u32)
            .map(|i| self.mem.get(&(addr + i)).copied().unwrap_or(0))
            .collect()
    }

    /// Total number of bytes read from target memory.
    pub fn bytes_read(&self) -> usize {
        self.mem_reads.iter().map(|(_, _, len)| len).sum()
    }
}

impl Target for FakeCore {
    type Error = FakeError;

    fn read_register(&mut self, reg: ArmCoreRegId) -> Result<u32, FakeError> {
        if self.fail_registers {
            return Err(FakeError);
        }
        Ok(self.reg(reg))
    }

    fn write_register(&mut self, reg: ArmCoreRegId, val: u32) -> Result<(), FakeError> {
        if self.fail_registers {
            return Err(FakeError);
        }
        self.set_reg(reg, val);
        self.dirty.push(reg);
        Ok(())
    }

    fn read_memory(
        &mut self,
        start_addr: u32,
        size: AccessSize,
        data: &mut [u8],
    ) -> Result<(), FakeError> {
        assert_eq!(data.len() % size.bytes(), 0);
        if self.fail_memory || self.fail_memory_at == Some(start_addr) {
            return Err(FakeError);
        }
        self.mem_reads.push((start_addr, size, data.len()));
        data.copy_from_slice(&self.read_mem(start_addr, data.len()));
        Ok(())
    }

    fn write_memory(
        &mut self,
        start_addr: u32,
        size: AccessSize,
        data: &[u8],
    ) -> Result<(), FakeError> {
        assert_eq!(data.len() % size.bytes(), 0);
        if self.fail_memory || self.fail_memory_at == Some(start_addr) {
            return Err(FakeError);
        }
        self.write_mem(start_addr, data);
        Ok(())
    }

    fn core_state(&self) -> CoreState {
        self.state
    }

    fn set_core_state(&mut self, state: CoreState) {
        self.state = state;
    }

    fn resume(&mut self) -> Result<(), FakeError> {
        if self.fail_resume {
            return Err(FakeError);
        }
        self.resumed = true;
        Ok(())
    }

    fn notify(&mut self, event: TargetEvent) -> Result<(), FakeError> {
        if self.fail_notify {
            return Err(FakeError);
        }
        self.events.push(event);
        Ok(())
    }

    fn endianness(&self) -> Endianness {
        self.endianness
    }
}

struct FakeFile {
    name: Vec<u8>,
    pos: u64,
    console: Option<ConsoleStream>,
}

/// An in-memory filesystem and console.
#[derive(Default)]
pub struct FakeHost {
    pub fs: BTreeMap<Vec<u8>, Vec<u8>>,
    handles: Vec<Option<FakeFile>>,

    pub console_out: Vec<u8>,
    pub console_in: VecDeque<u8>,
    pub clock: u64,

    /// Accept at most this many bytes per `write`.
    pub write_limit: Option<usize>,
    pub fail_seek_start: Option<Errno>,
    pub fail_seek_end: Option<Errno>,
    pub fail_seek_current: Option<Errno>,
    /// Report every file as this long when seeking from the end.
    pub apparent_len: Option<u64>,

    /// Size of the buffer handed to each `read`.
    pub read_lens: Vec<usize>,

    /// Names of the fallible host calls made, in order.
    pub calls: Vec<&'static str>,
}

const FIRST_HANDLE: HostHandle = 3;

impl FakeHost {
    pub fn new() -> FakeHost {
        FakeHost::default()
    }

    pub fn with_file(mut self, name: &[u8], contents: &[u8]) -> FakeHost {
        self.fs.insert(name.to_vec(), contents.to_vec());
        self
    }

    fn insert(&mut self, file: FakeFile) -> HostHandle {
        self.handles.push(Some(file));
        self.handles.len() as HostHandle - 1 + FIRST_HANDLE
    }

    fn file(&mut self, fd: HostHandle) -> HostIoResult<&mut FakeFile> {
        if fd < FIRST_HANDLE {
            return Err(Errno::EBADF);
        }
        self.handles
            .get_mut((fd - FIRST_HANDLE) as usize)
            .and_then(|f| f.as_mut())
            .ok_or(Errno::EBADF)
    }

    /// Current position of an open handle.
    pub fn pos(&mut self, fd: HostHandle) -> u64 {
        self.file(fd).map(|f| f.pos).unwrap_or(0)
    }

    pub fn console_of(&mut self, fd: HostHandle) -> Option<ConsoleStream> {
        self.file(fd).ok().and_then(|f| f.console)
    }
}

impl HostIo for FakeHost {
    fn open(&mut self, filename: &[u8], flags: HostIoOpenFlags) -> HostIoResult<HostHandle> {
        self.calls.push("open");
        if !self.fs.contains_key(filename) {
            if !flags.contains(HostIoOpenFlags::O_CREAT) {
                return Err(Errno::ENOENT);
            }
            self.fs.insert(filename.to_vec(), Vec::new());
        }
        let contents = self.fs.get_mut(filename).ok_or(Errno::ENOENT)?;
        if flags.contains(HostIoOpenFlags::O_TRUNC) {
            contents.clear();
        }
        let pos = if flags.contains(HostIoOpenFlags::O_APPEND) {
            contents.len() as u64
        } else {
            0
        };
        Ok(self.insert(FakeFile {
            name: filename.to_vec(),
            pos,
            console: None,
        }))
    }

    fn dup_console(&mut self, stream: ConsoleStream) -> HostIoResult<HostHandle> {
        self.calls.push("dup_console");
        Ok(self.insert(FakeFile {
            name: Vec::new(),
            pos: 0,
            console: Some(stream),
        }))
    }

    fn close(&mut self, fd: HostHandle) -> HostIoResult<()> {
        self.calls.push("close");
        self.file(fd)?;
        self.handles[(fd - FIRST_HANDLE) as usize] = None;
        Ok(())
    }

    fn write(&mut self, fd: HostHandle, data: &[u8]) -> HostIoResult<usize> {
        self.calls.push("write");
        let n = data.len().min(self.write_limit.unwrap_or(usize::MAX));
        match self.file(fd)?.console {
            Some(ConsoleStream::Stdout) => {
                self.console_out.extend_from_slice(&data[..n]);
                return Ok(n);
            }
            Some(ConsoleStream::Stdin) => return Err(Errno::EBADF),
            None => {}
        }

        let file = self.file(fd)?;
        let (name, pos) = (file.name.clone(), file.pos as usize);
        file.pos += n as u64;
        let contents = self.fs.get_mut(&name).ok_or(Errno::EBADF)?;
        if contents.len() < pos + n {
            contents.resize(pos + n, 0);
        }
        contents[pos..pos + n].copy_from_slice(&data[..n]);
        Ok(n)
    }

    fn read(&mut self, fd: HostHandle, buf: &mut [u8]) -> HostIoResult<usize> {
        self.calls.push("read");
        self.read_lens.push(buf.len());
        let file = self.file(fd)?;
        if file.console.is_some() {
            return Err(Errno::EBADF);
        }
        let (name, pos) = (file.name.clone(), file.pos as usize);
        let contents = self.fs.get(&name).ok_or(Errno::EBADF)?;
        let avail = contents.get(pos..).unwrap_or(&[]);
        let n = avail.len().min(buf.len());
        buf[..n].copy_from_slice(&avail[..n]);
        self.file(fd)?.pos += n as u64;
        Ok(n)
    }

    fn seek(&mut self, fd: HostHandle, pos: HostSeek) -> HostIoResult<u64> {
        self.calls.push("seek");
        let failure = match pos {
            HostSeek::Start(_) => self.fail_seek_start,
            HostSeek::End(_) => self.fail_seek_end,
            HostSeek::Current(_) => self.fail_seek_current,
        };
        if let Some(e) = failure {
            return Err(e);
        }

        let file = self.file(fd)?;
        if file.console.is_some() {
            return Err(Errno::ESPIPE);
        }
        let name = file.name.clone();
        let len = match self.apparent_len {
            Some(len) => len as i64,
            None => self.fs.get(&name).map(|c| c.len()).unwrap_or(0) as i64,
        };
        let file = self.file(fd)?;
        let new_pos = match pos {
            HostSeek::Start(n) => n as i64,
            HostSeek::End(n) => len + n,
            HostSeek::Current(n) => file.pos as i64 + n,
        };
        if new_pos < 0 {
            return Err(Errno::EINVAL);
        }
        file.pos = new_pos as u64;
        Ok(file.pos)
    }

    fn is_tty(&mut self, fd: HostHandle) -> bool {
        self.console_of(fd).is_some()
    }

    fn remove(&mut self, filename: &[u8]) -> HostIoResult<()> {
        self.calls.push("remove");
        self.fs.remove(filename).map(drop).ok_or(Errno::ENOENT)
    }

    fn rename(&mut self, from: &[u8], to: &[u8]) -> HostIoResult<()> {
        self.calls.push("rename");
        let contents = self.fs.remove(from).ok_or(Errno::ENOENT)?;
        self.fs.insert(to.to_vec(), contents);
        Ok(())
    }

    fn time(&mut self) -> u64 {
        self.clock
    }

    fn console_write(&mut self, data: &[u8]) {
        self.console_out.extend_from_slice(data);
    }

    fn console_read(&mut self) -> Option<u8> {
        self.console_in.pop_front()
    }
}
