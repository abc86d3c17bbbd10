use armv4t_emu::reg;
use armv4t_emu::Cpu;
use armv4t_emu::ExampleMem;
use armv4t_emu::Memory;
use armv4t_emu::Mode;

/// `SVC 0x123456`
const SEMIHOSTING_SVC: u32 = 0xef12_3456;
/// `B .`
const SPIN: u32 = 0xeaff_fffe;

const SVC_VECTOR: u32 = 0x08;
const PROGRAM_BASE: u32 = 0x1000;
const STRING_BASE: u32 = 0x1100;

/// Prints a greeting via `SYS_WRITE0`, then exits via `REPORT_EXCEPTION`.
#[rustfmt::skip]
static TEST_PROGRAM: &[u32] = &[
    0xe3a0_0004, // mov r0, #0x04       ; SYS_WRITE0
    0xe59f_1010, // ldr r1, [pc, #0x10] ; =greeting
    SEMIHOSTING_SVC,
    0xe3a0_0018, // mov r0, #0x18       ; REPORT_EXCEPTION
    0xe59f_1008, // ldr r1, [pc, #0x08] ; =ADP_Stopped_ApplicationExit
    SEMIHOSTING_SVC,
    SPIN,
    STRING_BASE,
    0x0002_0026,
];

static GREETING: &[u8] = b"Hello from the emulated core!\n\0";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    /// Halted on the SVC vector.
    SvcVector,
    /// The core is spinning on a branch-to-self.
    Spinning,
}

/// Registers banked on entry to supervisor mode.
#[derive(Debug, Copy, Clone)]
pub struct SvcFrame {
    pub lr: u32,
    pub spsr: u32,
}

/// incredibly barebones armv4t-based emulator, which halts on the SVC vector
pub struct Emu {
    pub(crate) cpu: Cpu,
    pub(crate) mem: ExampleMem,

    /// Set while the core is "in" supervisor mode.
    pub(crate) svc: Option<SvcFrame>,
}

impl Emu {
    pub fn new() -> Emu {
        let mut cpu = Cpu::new();
        let mut mem = ExampleMem::new();

        for (i, word) in TEST_PROGRAM.iter().enumerate() {
            mem.w32(PROGRAM_BASE + 4 * i as u32, *word);
        }
        for (i, b) in GREETING.iter().enumerate() {
            mem.w8(STRING_BASE + i as u32, *b);
        }

        cpu.reg_set(Mode::User, reg::SP, 0x10000000);
        cpu.reg_set(Mode::User, reg::PC, PROGRAM_BASE);
        cpu.reg_set(Mode::User, reg::CPSR, 0x10); // user mode

        Emu {
            cpu,
            mem,
            svc: None,
        }
    }

    /// single-step the interpreter
    pub fn step(&mut self) -> Option<Event> {
        let pc = self.cpu.reg_get(Mode::User, reg::PC);

        match self.mem.r32(pc) {
            // armv4t_emu doesn't model exceptions, so take the SVC exception by
            // hand, and halt on the vector like a vector-catch would.
            SEMIHOSTING_SVC if !self.cpu.thumb_mode() => {
                self.svc = Some(SvcFrame {
                    lr: pc + 4,
                    spsr: self.cpu.reg_get(Mode::User, reg::CPSR),
                });
                self.cpu.reg_set(Mode::User, reg::PC, SVC_VECTOR);
                Some(Event::SvcVector)
            }
            SPIN => Some(Event::Spinning),
            _ => {
                self.cpu.step(&mut self.mem);
                None
            }
        }
    }

    /// run the emulator until something interesting happens
    pub fn run(&mut self) -> Event {
        loop {
            if let Some(event) = self.step() {
                break event;
            }
        }
    }
}
