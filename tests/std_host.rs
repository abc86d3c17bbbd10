//! Drive semihosting requests end-to-end against the real host filesystem.

use std::collections::HashMap;

use semihost::arch::arm::reg::ArmCoreRegId;
use semihost::arch::arm::{CoreState, InstrSet, ProcessorMode};
use semihost::common::{Errno, Request};
use semihost::host::StdHost;
use semihost::target::{AccessSize, Target, TargetEvent};
use semihost::{Semihosting, TrapOutcome};

const TRAP_RETURN: u32 = 0x1000;
const PARAMS: u32 = 0x2000;
const NAME: u32 = 0x3000;
const BUF: u32 = 0x4000;

/// A core which is always halted on a fresh ARM-state semihosting trap.
struct MockCore {
    regs: HashMap<ArmCoreRegId, u32>,
    mem: HashMap<u32, u8>,
    state: CoreState,
}

#[derive(Debug)]
struct Unreachable;

impl MockCore {
    fn new() -> MockCore {
        let mut core = MockCore {
            regs: HashMap::new(),
            mem: HashMap::new(),
            state: CoreState {
                mode: ProcessorMode::User,
                instr_set: InstrSet::Arm,
            },
        };
        core.poke(TRAP_RETURN - 4, &0xEF12_3456_u32.to_le_bytes());
        core
    }

    fn poke(&mut self, addr: u32, data: &[u8]) {
        for (i, b) in data.iter().enumerate() {
            self.mem.insert(addr + i as u32, *b);
        }
    }

    fn peek(&self, addr: u32, len: usize) -> Vec<u8> {
        (0..len as u32)
            .map(|i| self.mem.get(&(addr + i)).copied().unwrap_or(0))
            .collect()
    }

    /// Raise a semihosting request, as the core would on executing `SVC`.
    fn svc(&mut self, request: Request, params: &[u32]) {
        for (i, p) in params.iter().enumerate() {
            self.poke(PARAMS + 4 * i as u32, &p.to_le_bytes());
        }
        self.regs.insert(ArmCoreRegId::R0, request.0);
        self.regs.insert(ArmCoreRegId::R1, PARAMS);
        self.regs.insert(ArmCoreRegId::Pc, 0x08);
        self.regs
            .insert(ArmCoreRegId::LrBanked(ProcessorMode::Supervisor), TRAP_RETURN);
        self.regs
            .insert(ArmCoreRegId::Spsr(ProcessorMode::Supervisor), 0x10);
        self.state.mode = ProcessorMode::Supervisor;
    }

    fn r0(&self) -> i32 {
        self.regs[&ArmCoreRegId::R0] as i32
    }
}

impl Target for MockCore {
    type Error = Unreachable;

    fn read_register(&mut self, reg: ArmCoreRegId) -> Result<u32, Unreachable> {
        Ok(self.regs.get(&reg).copied().unwrap_or(0))
    }

    fn write_register(&mut self, reg: ArmCoreRegId, val: u32) -> Result<(), Unreachable> {
        self.regs.insert(reg, val);
        Ok(())
    }

    fn read_memory(
        &mut self,
        start_addr: u32,
        _size: AccessSize,
        data: &mut [u8],
    ) -> Result<(), Unreachable> {
        data.copy_from_slice(&self.peek(start_addr, data.len()));
        Ok(())
    }

    fn write_memory(
        &mut self,
        start_addr: u32,
        _size: AccessSize,
        data: &[u8],
    ) -> Result<(), Unreachable> {
        self.poke(start_addr, data);
        Ok(())
    }

    fn core_state(&self) -> CoreState {
        self.state
    }

    fn set_core_state(&mut self, state: CoreState) {
        self.state = state;
    }

    fn resume(&mut self) -> Result<(), Unreachable> {
        Ok(())
    }

    fn notify(&mut self, _event: TargetEvent) -> Result<(), Unreachable> {
        Ok(())
    }
}

struct Harness {
    core: MockCore,
    host: StdHost,
    semihosting: Semihosting,
}

impl Harness {
    fn new() -> Harness {
        let _ = pretty_env_logger::try_init();
        Harness {
            core: MockCore::new(),
            host: StdHost::new(),
            semihosting: Semihosting::new(),
        }
    }

    fn call(&mut self, request: Request, params: &[u32]) -> i32 {
        self.core.svc(request, params);
        let outcome = self
            .semihosting
            .handle_trap(&mut self.core, &mut self.host)
            .unwrap();
        assert_eq!(outcome, TrapOutcome::Resumed);
        assert_eq!(self.core.state.mode, ProcessorMode::User);
        self.core.r0()
    }

    fn open(&mut self, path: &std::path::Path, mode: u32) -> i32 {
        let name = path.to_str().unwrap().as_bytes().to_vec();
        self.core.poke(NAME, &name);
        self.call(Request::SYS_OPEN, &[NAME, mode, name.len() as u32])
    }
}

#[test]
fn write_then_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut h = Harness::new();

    // "w"
    let fd = h.open(&path, 4);
    assert!(fd >= 0);
    assert_eq!(h.semihosting.errno(), Errno::NONE);

    h.core.poke(BUF, b"hello, world");
    assert_eq!(h.call(Request::SYS_WRITE, &[fd as u32, BUF, 12]), 0);
    assert_eq!(h.call(Request::SYS_CLOSE, &[fd as u32]), 0);
    assert_eq!(std::fs::read(&path).unwrap(), b"hello, world");

    // "r"
    let fd = h.open(&path, 0) as u32;
    assert_eq!(h.call(Request::SYS_FLEN, &[fd]), 12);
    assert_eq!(h.call(Request::SYS_SEEK, &[fd, 7]), 0);
    assert_eq!(h.call(Request::SYS_FLEN, &[fd]), 12);
    assert_eq!(h.call(Request::SYS_READ, &[fd, BUF, 16]), 11);
    assert_eq!(h.core.peek(BUF, 5), b"world");
    assert_eq!(h.call(Request::SYS_ISTTY, &[fd]), 0);
    assert_eq!(h.call(Request::SYS_CLOSE, &[fd]), 0);
}

#[test]
fn append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    std::fs::write(&path, b"one\n").unwrap();
    let mut h = Harness::new();

    // "a"
    let fd = h.open(&path, 8) as u32;
    h.core.poke(BUF, b"two\n");
    assert_eq!(h.call(Request::SYS_WRITE, &[fd, BUF, 4]), 0);
    h.call(Request::SYS_CLOSE, &[fd]);

    assert_eq!(std::fs::read(&path).unwrap(), b"one\ntwo\n");
}

#[test]
fn missing_file_sets_errno() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = Harness::new();

    assert_eq!(h.open(&dir.path().join("nope"), 0), -1);
    assert_eq!(h.semihosting.errno(), Errno::ENOENT);
    assert_eq!(h.call(Request::SYS_ERRNO, &[]), Errno::ENOENT.0);
}

#[test]
fn rename_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let from = dir.path().join("a");
    let to = dir.path().join("b");
    std::fs::write(&from, b"data").unwrap();
    let mut h = Harness::new();

    let from_name = from.to_str().unwrap().as_bytes().to_vec();
    let to_name = to.to_str().unwrap().as_bytes().to_vec();
    h.core.poke(NAME, &from_name);
    h.core.poke(BUF, &to_name);
    let res = h.call(
        Request::SYS_RENAME,
        &[NAME, from_name.len() as u32, BUF, to_name.len() as u32],
    );
    assert_eq!(res, 0);
    assert!(!from.exists());
    assert_eq!(std::fs::read(&to).unwrap(), b"data");

    h.core.poke(NAME, &to_name);
    assert_eq!(h.call(Request::SYS_REMOVE, &[NAME, to_name.len() as u32]), 0);
    assert!(!to.exists());

    assert_eq!(h.call(Request::SYS_REMOVE, &[NAME, to_name.len() as u32]), -1);
    assert_eq!(h.semihosting.errno(), Errno::ENOENT);
}

#[test]
fn console_handles() {
    let mut h = Harness::new();

    h.core.poke(NAME, b":tt");
    let stdin = h.call(Request::SYS_OPEN, &[NAME, 0, 3]);
    let stdout = h.call(Request::SYS_OPEN, &[NAME, 4, 3]);
    assert!(stdin >= 0);
    assert!(stdout >= 0);
    assert_ne!(stdin, stdout);

    assert_eq!(h.call(Request::SYS_SEEK, &[stdout as u32, 0]), -1);
    assert_eq!(h.semihosting.errno(), Errno::ESPIPE);
}
