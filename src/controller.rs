//! The poll-and-actuate loop.
//!
//! Each channel is edge-triggered: a pin is only written when the value read
//! from the store differs from the last value acted upon. The one exception is
//! blink mode, where the LED is re-driven every half-period for as long as the
//! store keeps answering `"blink"`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info, warn};

use crate::channel::Channel;
use crate::command::{BuzzerCommand, LightCommand};
use crate::delay::Delay;
use crate::output::DigitalOutputs;
use crate::store::KeyValueStore;
use crate::switch::Switch;

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const BLINK_HALF_PERIOD: Duration = Duration::from_millis(500);

/// Last value a channel acted upon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Observed {
    /// Nothing seen yet; differs from every value, null included.
    #[default]
    Unset,
    Seen(Option<String>),
}

impl Observed {
    pub fn differs_from(&self, value: Option<&str>) -> bool {
        match self {
            Observed::Unset => true,
            Observed::Seen(previous) => previous.as_deref() != value,
        }
    }
}

/// What a single channel did during one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Unchanged,
    ReadFailed,
    /// Stop was requested; the channel was left alone.
    Stopped,
    Switched(Switch),
    Blinked { cycles: usize },
    Unrecognized(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub light: Action,
    pub buzzer: Action,
}

pub struct Controller<S: KeyValueStore, O: DigitalOutputs, D: Delay> {
    store: S,
    outputs: O,
    delay: D,
    running: Arc<AtomicBool>,
    last_light: Observed,
    last_buzzer: Observed,
    released: bool,
}

impl<S: KeyValueStore, O: DigitalOutputs, D: Delay> Controller<S, O, D> {
    pub fn new(store: S, outputs: O, delay: D, running: Arc<AtomicBool>) -> Self {
        Controller {
            store,
            outputs,
            delay,
            running,
            last_light: Observed::Unset,
            last_buzzer: Observed::Unset,
            released: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn last_observed(&self, channel: Channel) -> &Observed {
        match channel {
            Channel::Light => &self.last_light,
            Channel::Buzzer => &self.last_buzzer,
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Polls until the running flag is cleared, then releases the pins.
    pub fn run(&mut self) {
        for channel in Channel::ALL {
            self.drive(channel, Switch::Off);
        }
        info!(
            "Polling `{}` and `{}` every {:?}",
            Channel::Light,
            Channel::Buzzer,
            POLL_INTERVAL
        );

        while self.is_running() {
            let report = self.poll_once();
            debug!("poll: {report:?}");
            if self.is_running() {
                self.delay.delay(POLL_INTERVAL);
            }
        }

        info!("Stop requested");
        self.release();
    }

    /// One pass over both channels.
    pub fn poll_once(&mut self) -> PollReport {
        let light = self.service_light();
        let buzzer = self.service_buzzer();
        PollReport { light, buzzer }
    }

    /// Releases the pins; later calls do nothing.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.outputs.release_all();
        }
    }

    fn fetch(&mut self, channel: Channel) -> Option<Option<String>> {
        match self.store.get(channel.key()) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Could not read {channel} state, keeping previous: {err}");
                None
            }
        }
    }

    fn drive(&mut self, channel: Channel, switch: Switch) {
        self.outputs.write(channel, switch.level());
    }

    fn service_light(&mut self) -> Action {
        if !self.is_running() {
            return Action::Stopped;
        }
        let Some(value) = self.fetch(Channel::Light) else {
            return Action::ReadFailed;
        };
        // The stop may have arrived while the read was in flight.
        if !self.is_running() {
            return Action::Stopped;
        }
        if !self.last_light.differs_from(value.as_deref()) {
            return Action::Unchanged;
        }

        info!("Light state changed to: {}", describe(&value));
        let action = match LightCommand::parse(value.as_deref()) {
            LightCommand::Set(switch) => {
                self.drive(Channel::Light, switch);
                info!("Turning LED {}", label(switch));
                Action::Switched(switch)
            }
            LightCommand::Blink => {
                info!("Blinking LED...");
                let cycles = self.blink();
                Action::Blinked { cycles }
            }
            LightCommand::Unrecognized => {
                warn!("Unknown light state received: {}", describe(&value));
                Action::Unrecognized(value.clone())
            }
        };
        self.last_light = Observed::Seen(value);
        action
    }

    fn service_buzzer(&mut self) -> Action {
        if !self.is_running() {
            return Action::Stopped;
        }
        let Some(value) = self.fetch(Channel::Buzzer) else {
            return Action::ReadFailed;
        };
        if !self.is_running() {
            return Action::Stopped;
        }
        if !self.last_buzzer.differs_from(value.as_deref()) {
            return Action::Unchanged;
        }

        info!("Buzzer state changed to: {}", describe(&value));
        let action = match BuzzerCommand::parse(value.as_deref()) {
            BuzzerCommand::Set(switch) => {
                self.drive(Channel::Buzzer, switch);
                info!("Turning buzzer {}", label(switch));
                Action::Switched(switch)
            }
            BuzzerCommand::Unrecognized => {
                warn!("Unknown buzzer state received: {}", describe(&value));
                Action::Unrecognized(value.clone())
            }
        };
        self.last_buzzer = Observed::Seen(value);
        action
    }

    /// Toggles the LED while the store keeps answering `"blink"`. The buzzer
    /// is serviced once per cycle so it is not starved.
    fn blink(&mut self) -> usize {
        let mut cycles = 0;
        while self.still_blinking() {
            self.drive(Channel::Light, Switch::On);
            self.delay.delay(BLINK_HALF_PERIOD);
            self.drive(Channel::Light, Switch::Off);
            self.delay.delay(BLINK_HALF_PERIOD);
            cycles += 1;

            let buzzer = self.service_buzzer();
            if !matches!(buzzer, Action::Unchanged | Action::Stopped) {
                debug!("buzzer during blink: {buzzer:?}");
            }
        }
        debug!("blink ended after {cycles} cycles");
        cycles
    }

    // A failed read keeps blinking. The flag is checked on both sides of the
    // read so no new cycle starts after a stop.
    fn still_blinking(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let blinking = match self.fetch(Channel::Light) {
            Some(value) => LightCommand::parse(value.as_deref()) == LightCommand::Blink,
            None => true,
        };
        blinking && self.is_running()
    }
}

impl<S: KeyValueStore, O: DigitalOutputs, D: Delay> Drop for Controller<S, O, D> {
    fn drop(&mut self) {
        self.release();
    }
}

fn describe(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

fn label(switch: Switch) -> &'static str {
    match switch {
        Switch::On => "ON",
        Switch::Off => "OFF",
    }
}
