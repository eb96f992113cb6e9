use rppal::gpio::Level;

/// Logical state of an output, independent of how the device is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    /// Both the LED and the buzzer are wired active-low: LOW energizes them.
    pub fn level(self) -> Level {
        match self {
            Switch::On => Level::Low,
            Switch::Off => Level::High,
        }
    }
}
