//! Emulator host shell: window, keyboard, and the 60 Hz frame pump (§6).
//!
//! Thin by design -- all emulation semantics live in `octo-machine`; this
//! binary only turns palette indices into pixels and keys into controller
//! bits.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use minifb::{Key, Window, WindowOptions};
use octo_core::traits::Emulator;
use octo_core::types::{Button, ControllerState};
use octo_machine::{to_0rgb, Machine, SCR_HEIGHT, SCR_WIDTH};
use tracing::error;

const KEYMAP: &[(Key, Button)] = &[
    (Key::Up, Button::UP),
    (Key::Down, Button::DOWN),
    (Key::Left, Button::LEFT),
    (Key::Right, Button::RIGHT),
    (Key::V, Button::A),
    (Key::C, Button::B),
    (Key::F, Button::X),
    (Key::D, Button::Y),
    (Key::E, Button::SELECT),
    (Key::R, Button::START),
    (Key::S, Button::L1),
    (Key::W, Button::L2),
    (Key::G, Button::R1),
    (Key::T, Button::R2),
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Some(rom_arg) = std::env::args().nth(1) else {
        eprintln!("usage: emu ROMFILE");
        return ExitCode::FAILURE;
    };

    let mut machine = match Machine::new(&PathBuf::from(rom_arg)) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut window = match Window::new(
        "octo",
        SCR_WIDTH as usize,
        SCR_HEIGHT as usize,
        WindowOptions::default(),
    ) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    window.limit_update_rate(Some(Duration::from_micros(16_667)));

    let mut pixels = vec![0u32; (SCR_WIDTH * SCR_HEIGHT) as usize];

    while window.is_open() && !window.is_key_down(Key::Escape) && !machine.terminated() {
        machine.set_controller(0, poll_controller(&window));

        if let Err(e) = machine.run_frame() {
            error!("frame aborted: {e}");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }

        for (pixel, &index) in pixels.iter_mut().zip(machine.framebuffer()) {
            *pixel = to_0rgb(index);
        }
        let _ = window.update_with_buffer(&pixels, SCR_WIDTH as usize, SCR_HEIGHT as usize);
    }

    ExitCode::SUCCESS
}

fn poll_controller(window: &Window) -> ControllerState {
    let mut state = ControllerState::new();
    for (key, button) in KEYMAP {
        state.set(*button, window.is_key_down(*key));
    }
    state
}
