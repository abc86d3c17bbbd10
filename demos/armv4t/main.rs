use semihost::host::StdHost;
use semihost::{Semihosting, TrapOutcome};

pub type DynResult<T> = Result<T, Box<dyn std::error::Error>>;

mod emu;
mod target;

fn main() -> DynResult<()> {
    pretty_env_logger::init();

    let mut emu = emu::Emu::new();
    let mut host = StdHost::new();
    let mut semihosting = Semihosting::builder().cmdline("armv4t").build()?;

    loop {
        match emu.run() {
            emu::Event::SvcVector => match semihosting.handle_trap(&mut emu, &mut host)? {
                TrapOutcome::Resumed => {}
                TrapOutcome::Halted(reason) => {
                    println!("Target halted: {}", reason);
                    break;
                }
                TrapOutcome::NotApplicable => {
                    eprintln!("Unexpected SVC, giving up");
                    break;
                }
            },
            emu::Event::Spinning => {
                eprintln!("Target is spinning, giving up");
                break;
            }
        }
    }

    let ret = emu.cpu.reg_get(armv4t_emu::Mode::User, 0);
    println!("Program completed. r0: {:#x}", ret);

    Ok(())
}
