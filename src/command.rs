//! Interpretation of the raw tokens found in the remote store.

use crate::switch::Switch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    Set(Switch),
    Blink,
    Unrecognized,
}

impl LightCommand {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("on") => LightCommand::Set(Switch::On),
            Some("off") => LightCommand::Set(Switch::Off),
            Some("blink") => LightCommand::Blink,
            _ => LightCommand::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerCommand {
    Set(Switch),
    Unrecognized,
}

impl BuzzerCommand {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("on") => BuzzerCommand::Set(Switch::On),
            Some("off") => BuzzerCommand::Set(Switch::Off),
            _ => BuzzerCommand::Unrecognized,
        }
    }
}
