//! Controller state shared between the host input layer and the bus.

use bitflags::bitflags;

bitflags! {
    /// One controller's buttons, packed the way the bus stores them: the
    /// low byte mirrors the first MMIO byte (`DOWN,RIGHT,LEFT,UP,Y,X,B,A`
    /// from bit 0), the high byte mirrors the second (`START,SELECT,R1,
    /// R2,L1,L2` from bit 0).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Button: u16 {
        const DOWN   = 0b0000_0000_0000_0001;
        const RIGHT  = 0b0000_0000_0000_0010;
        const LEFT   = 0b0000_0000_0000_0100;
        const UP     = 0b0000_0000_0000_1000;
        const Y      = 0b0000_0000_0001_0000;
        const X      = 0b0000_0000_0010_0000;
        const B      = 0b0000_0000_0100_0000;
        const A      = 0b0000_0000_1000_0000;

        const START  = 0b0000_0001_0000_0000;
        const SELECT = 0b0000_0010_0000_0000;
        const R1     = 0b0000_0100_0000_0000;
        const R2     = 0b0000_1000_0000_0000;
        const L1     = 0b0001_0000_0000_0000;
        const L2     = 0b0010_0000_0000_0000;
    }
}

/// State of a single game controller, as shadowed by the host's input
/// handler and read by the CPU through the memory bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    pub buttons: Button,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons.contains(button)
    }

    pub fn press(&mut self, button: Button) {
        self.buttons.insert(button);
    }

    pub fn release(&mut self, button: Button) {
        self.buttons.remove(button);
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.press(button);
        } else {
            self.release(button);
        }
    }

    /// The two MMIO bytes the bus exposes for this controller, low byte first.
    pub fn to_bytes(self) -> [u8; 2] {
        let bits = self.buttons.bits();
        [(bits & 0xFF) as u8, (bits >> 8) as u8]
    }

    /// Reconstructs a controller's button state from its two MMIO bytes.
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        let bits = bytes[0] as u16 | ((bytes[1] as u16) << 8);
        Self {
            buttons: Button::from_bits_truncate(bits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let mut state = ControllerState::new();
        state.press(Button::A);
        state.press(Button::START);
        let bytes = state.to_bytes();
        assert_eq!(ControllerState::from_bytes(bytes), state);
    }
}
