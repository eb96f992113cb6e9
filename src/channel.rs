use std::fmt;

// BCM numbering; physical pins 11 and 13 on the 40-pin header.
pub const LED_PIN: u8 = 17;
pub const BUZZER_PIN: u8 = 27;

/// One remotely controlled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Light,
    Buzzer,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Light, Channel::Buzzer];

    /// Key read from the remote store.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Light => "light",
            Channel::Buzzer => "buzzer",
        }
    }

    pub fn pin(self) -> u8 {
        match self {
            Channel::Light => LED_PIN,
            Channel::Buzzer => BUZZER_PIN,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
