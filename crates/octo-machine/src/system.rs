//! Top-level machine.
//!
//! Ties the CPU, bus, and PPU into a runnable whole: one [`run_frame`]
//! drives CPU steps until the PPU has completed a full tick period,
//! collecting every emitted pixel into a framebuffer the host can blit.

use std::path::Path;

use octo_core::traits::{Cpu as CpuTrait, Emulator};
use octo_core::types::{Button, ControllerState};
use octo_core::{EmulatorError, Result};
use tracing::debug;

use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::memory::Bus;
use crate::ppu::{Ppu, SCR_HEIGHT, SCR_WIDTH};

/// The complete machine: CPU, bus, and PPU wired together (§4).
pub struct Machine {
    cpu: Cpu<Bus>,
    ppu: Ppu,
    paused: bool,
    framebuffer: Vec<u8>,
    ticks_this_frame: u32,
}

impl Machine {
    /// Loads a ROM from disk and resets the machine to its initial state.
    pub fn new(rom_path: &Path) -> Result<Self> {
        let bytes = std::fs::read(rom_path).map_err(EmulatorError::IoError)?;
        Self::with_rom(&bytes)
    }

    /// Builds a machine from an in-memory ROM image (used by tests and by
    /// anything loading a ROM from somewhere other than a plain file).
    pub fn with_rom(bytes: &[u8]) -> Result<Self> {
        let cartridge = Cartridge::load(bytes)?;
        debug!("loaded ROM: {} page(s)", cartridge.page_count());

        let mut bus = Bus::new();
        bus.load_cartridge(cartridge);

        let mut cpu = Cpu::new(bus);
        cpu.reset();

        Ok(Self {
            cpu,
            ppu: Ppu::new(),
            paused: false,
            framebuffer: vec![0; (SCR_WIDTH * SCR_HEIGHT) as usize],
            ticks_this_frame: 0,
        })
    }

    fn period() -> u32 {
        SCR_WIDTH * SCR_HEIGHT + (SCR_WIDTH * SCR_HEIGHT) / 3
    }

    pub fn cpu(&self) -> &Cpu<Bus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu<Bus> {
        &mut self.cpu
    }

    pub fn terminated(&self) -> bool {
        self.cpu.terminated()
    }

    /// The most recently composited frame, one palette index per pixel,
    /// row-major from the top-left (§4.6).
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    /// Shadows a controller's MMIO bytes at the bus, the way the host input
    /// handler does once per frame (§5).
    pub fn set_controller(&mut self, index: u8, state: ControllerState) {
        self.cpu.bus_mut().set_controller(index, state);
    }

    pub fn set_button(&mut self, index: u8, button: Button, pressed: bool) {
        let base = if index == 0 { 0x0903 } else { 0x0905 };
        let mut state = ControllerState::from_bytes([
            self.cpu.bus_mut().peek(base),
            self.cpu.bus_mut().peek(base + 1),
        ]);
        state.set(button, pressed);
        self.set_controller(index, state);
    }
}

impl Emulator for Machine {
    fn reset(&mut self) {
        self.cpu.reset();
        self.ppu = Ppu::new();
        self.ticks_this_frame = 0;
        self.framebuffer.iter_mut().for_each(|p| *p = 0);
    }

    /// Steps the CPU until the PPU completes one full tick period,
    /// compositing every visible-phase pixel into the framebuffer. Stops
    /// early if the ROM sets the terminate flag (`INT 0x01`, §4.7).
    fn run_frame(&mut self) -> Result<usize> {
        if self.paused {
            return Ok(0);
        }

        let mut total_cycles = 0usize;
        while self.ticks_this_frame < Self::period() {
            if self.cpu.terminated() {
                break;
            }
            let cycles = self.cpu.step()?;
            total_cycles += cycles as usize;

            for _ in 0..(cycles as u32 * 3) {
                if let Some(pixel) = self.ppu.tick(self.cpu.bus_mut()) {
                    let idx = pixel.y as usize * SCR_WIDTH as usize + pixel.x as usize;
                    self.framebuffer[idx] = pixel.color;
                }
                self.ticks_this_frame = (self.ticks_this_frame + 1) % Self::period();
            }
        }
        self.ticks_this_frame = 0;

        Ok(total_cycles)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octo_core::isa;

    fn rom_with(program: &[u8]) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8001];
        rom[..program.len()].copy_from_slice(program);
        rom
    }

    #[test]
    fn resets_cpu_to_documented_entry_point() {
        let machine = Machine::with_rom(&rom_with(&[isa::OP_NOP])).unwrap();
        assert_eq!(machine.cpu().pc, 0x7FFF);
    }

    #[test]
    fn run_frame_executes_until_terminate() {
        let mut machine =
            Machine::with_rom(&rom_with(&[isa::OPIV_LDA, 0x05, isa::OP_INT, 0x01])).unwrap();
        let cycles = machine.run_frame().unwrap();
        assert!(cycles > 0);
        assert!(machine.terminated());
    }

    #[test]
    fn paused_machine_runs_no_cycles() {
        let mut machine = Machine::with_rom(&rom_with(&[isa::OP_NOP])).unwrap();
        machine.set_paused(true);
        assert_eq!(machine.run_frame().unwrap(), 0);
    }

    #[test]
    fn set_button_round_trips_through_bus() {
        let mut machine = Machine::with_rom(&rom_with(&[isa::OP_NOP])).unwrap();
        machine.set_button(0, Button::A, true);
        assert_eq!(machine.cpu.bus_mut().peek(0x0903), Button::A.bits() as u8);
    }

    #[test]
    fn cal_then_ret_round_trips_through_real_bus() {
        // CAL $8010 at $7FFF; the call target is a RET, so control bounces
        // back to $8002 -- the byte after the 3-byte CAL -- where an LDA
        // then an INT 1 prove execution actually resumed there, not just
        // that PC landed on the right number.
        let mut program = vec![0u8; 0x12];
        program[0] = isa::OP_CAL;
        program[1] = 0x80;
        program[2] = 0x10;
        program[3] = isa::OPIV_LDA;
        program[4] = 0x2A;
        program[5] = isa::OP_INT;
        program[6] = 0x01;
        program[0x11] = isa::OP_RET;

        let mut machine = Machine::with_rom(&rom_with(&program)).unwrap();
        machine.run_frame().unwrap();
        assert!(machine.terminated());
        assert_eq!(machine.cpu().a, 0x2A);
    }
}
