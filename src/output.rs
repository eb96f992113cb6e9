use log::{debug, info};
use rppal::gpio::{Gpio, Level, OutputPin};

use crate::channel::Channel;

/// Write side of the hardware: one digital output per channel.
pub trait DigitalOutputs {
    fn write(&mut self, channel: Channel, level: Level);

    /// Return every pin to its safe default. Must tolerate repeated calls.
    fn release_all(&mut self);
}

struct Pins {
    led: OutputPin,
    buzzer: OutputPin,
}

/// LED and buzzer on the Raspberry Pi GPIO header.
pub struct GpioOutputs {
    pins: Option<Pins>,
}

impl GpioOutputs {
    /// Configures both pins as outputs, starting HIGH so the devices are off.
    pub fn new() -> Result<Self, rppal::gpio::Error> {
        let gpio = Gpio::new()?;
        let led = gpio.get(Channel::Light.pin())?.into_output_high();
        let buzzer = gpio.get(Channel::Buzzer.pin())?.into_output_high();
        Ok(GpioOutputs {
            pins: Some(Pins { led, buzzer }),
        })
    }
}

impl DigitalOutputs for GpioOutputs {
    fn write(&mut self, channel: Channel, level: Level) {
        let Some(pins) = self.pins.as_mut() else {
            debug!("ignoring {channel} write after release");
            return;
        };
        let pin = match channel {
            Channel::Light => &mut pins.led,
            Channel::Buzzer => &mut pins.buzzer,
        };
        pin.write(level);
        debug!("GPIO{} <- {level:?}", channel.pin());
    }

    fn release_all(&mut self) {
        // Dropping an OutputPin restores the pin's original mode (input).
        if let Some(pins) = self.pins.take() {
            drop(pins);
            info!("GPIO pins released");
        }
    }
}

impl Drop for GpioOutputs {
    fn drop(&mut self) {
        self.release_all();
    }
}
