use armv4t_emu::{reg, Memory, Mode};
use semihost::arch::arm::reg::ArmCoreRegId;
use semihost::arch::arm::{CoreState, InstrSet, ProcessorMode};
use semihost::target::{AccessSize, Target, TargetEvent};

use crate::emu::Emu;

/// `cpsr` reported while the core is in supervisor mode, with IRQs masked.
const SVC_CPSR: u32 = 0xd3;

/// Turn a `ArmCoreRegId` into an internal register number of `armv4t_emu`.
fn cpu_reg_id(id: ArmCoreRegId) -> Option<u8> {
    match id {
        ArmCoreRegId::Gpr(i) if i < 13 => Some(i),
        ArmCoreRegId::Sp => Some(reg::SP),
        ArmCoreRegId::Lr => Some(reg::LR),
        ArmCoreRegId::Pc => Some(reg::PC),
        _ => None,
    }
}

impl Target for Emu {
    type Error = &'static str;

    fn read_register(&mut self, reg_id: ArmCoreRegId) -> Result<u32, &'static str> {
        const SVC: ProcessorMode = ProcessorMode::Supervisor;

        match (reg_id, self.svc) {
            (ArmCoreRegId::Cpsr, Some(_)) => Ok(SVC_CPSR),
            (ArmCoreRegId::Cpsr, None) => Ok(self.cpu.reg_get(Mode::User, reg::CPSR)),
            (ArmCoreRegId::LrBanked(SVC), Some(frame)) => Ok(frame.lr),
            (ArmCoreRegId::Spsr(SVC), Some(frame)) => Ok(frame.spsr),
            _ => match cpu_reg_id(reg_id) {
                Some(i) => Ok(self.cpu.reg_get(Mode::User, i)),
                None => Err("unsupported register"),
            },
        }
    }

    fn write_register(&mut self, reg_id: ArmCoreRegId, val: u32) -> Result<(), &'static str> {
        match reg_id {
            ArmCoreRegId::Cpsr => self.cpu.reg_set(Mode::User, reg::CPSR, val),
            _ => match cpu_reg_id(reg_id) {
                Some(i) => self.cpu.reg_set(Mode::User, i, val),
                None => return Err("unsupported register"),
            },
        }
        Ok(())
    }

    fn read_memory(
        &mut self,
        start_addr: u32,
        _size: AccessSize,
        data: &mut [u8],
    ) -> Result<(), &'static str> {
        for (addr, val) in (start_addr..).zip(data.iter_mut()) {
            *val = self.mem.r8(addr)
        }
        Ok(())
    }

    fn write_memory(
        &mut self,
        start_addr: u32,
        _size: AccessSize,
        data: &[u8],
    ) -> Result<(), &'static str> {
        for (addr, val) in (start_addr..).zip(data.iter().copied()) {
            self.mem.w8(addr, val)
        }
        Ok(())
    }

    fn core_state(&self) -> CoreState {
        match self.svc {
            Some(_) => CoreState {
                mode: ProcessorMode::Supervisor,
                instr_set: InstrSet::Arm,
            },
            None => CoreState {
                mode: ProcessorMode::User,
                instr_set: if self.cpu.thumb_mode() {
                    InstrSet::Thumb
                } else {
                    InstrSet::Arm
                },
            },
        }
    }

    fn set_core_state(&mut self, state: CoreState) {
        if state.mode != ProcessorMode::Supervisor {
            self.svc = None;
        }
    }

    fn resume(&mut self) -> Result<(), &'static str> {
        // registers are written straight through to the cpu
        Ok(())
    }

    fn notify(&mut self, event: TargetEvent) -> Result<(), &'static str> {
        eprintln!("target event: {:?}", event);
        Ok(())
    }
}
