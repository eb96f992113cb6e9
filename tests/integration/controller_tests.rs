//! Single-pass behaviour of the controller, driven through `poll_once`.

use crate::mock_hw::{
    RecordingDelay, RecordingOutputs, Reply, ScriptedStore, blink, null, off, on, running, token,
};
use remote_switch::controller::BLINK_HALF_PERIOD;
use remote_switch::{Action, Channel, Controller, Observed, Switch};
use rppal::gpio::Level::{High, Low};

type TestController = Controller<ScriptedStore, RecordingOutputs, RecordingDelay>;

fn controller(light: Vec<Reply>, buzzer: Vec<Reply>) -> TestController {
    let store = ScriptedStore::new()
        .script("light", light)
        .script("buzzer", buzzer);
    Controller::new(
        store,
        RecordingOutputs::new(),
        RecordingDelay::default(),
        running(),
    )
}

// ── Edge triggering ───────────────────────────────────────────

#[test]
fn light_acts_only_when_value_changes() {
    let mut c = controller(vec![off(), on(), on(), off()], vec![off()]);

    let actions: Vec<Action> = (0..4).map(|_| c.poll_once().light).collect();

    assert_eq!(
        actions,
        vec![
            Action::Switched(Switch::Off),
            Action::Switched(Switch::On),
            Action::Unchanged,
            Action::Switched(Switch::Off),
        ]
    );
    assert_eq!(c.outputs().levels(Channel::Light), vec![High, Low, High]);
}

#[test]
fn buzzer_null_is_reported_but_not_driven() {
    let mut c = controller(vec![off()], vec![null(), on(), on(), off()]);

    let actions: Vec<Action> = (0..4).map(|_| c.poll_once().buzzer).collect();

    assert_eq!(
        actions,
        vec![
            Action::Unrecognized(None),
            Action::Switched(Switch::On),
            Action::Unchanged,
            Action::Switched(Switch::Off),
        ]
    );
    assert_eq!(c.outputs().levels(Channel::Buzzer), vec![Low, High]);
}

#[test]
fn repeated_unknown_token_is_reported_once() {
    let mut c = controller(vec![token("strobe"), token("strobe")], vec![off()]);

    assert_eq!(
        c.poll_once().light,
        Action::Unrecognized(Some("strobe".into()))
    );
    assert_eq!(c.poll_once().light, Action::Unchanged);
    assert!(c.outputs().levels(Channel::Light).is_empty());
    assert_eq!(
        c.last_observed(Channel::Light),
        &Observed::Seen(Some("strobe".into()))
    );
}

#[test]
fn first_value_is_always_acted_upon() {
    let mut c = controller(vec![off()], vec![off()]);

    let report = c.poll_once();

    assert_eq!(report.light, Action::Switched(Switch::Off));
    assert_eq!(report.buzzer, Action::Switched(Switch::Off));
    assert_eq!(
        c.outputs().writes,
        vec![(Channel::Light, High), (Channel::Buzzer, High)]
    );
}

#[test]
fn buzzer_ignores_blink_token() {
    let mut c = controller(vec![off()], vec![blink()]);

    assert_eq!(
        c.poll_once().buzzer,
        Action::Unrecognized(Some("blink".into()))
    );
    assert!(c.outputs().levels(Channel::Buzzer).is_empty());
}

// ── Blink mode ────────────────────────────────────────────────

#[test]
fn sustained_blink_toggles_twice_per_cycle() {
    let mut c = controller(
        vec![blink(), blink(), blink(), blink(), off()],
        vec![off()],
    );

    let report = c.poll_once();

    assert_eq!(report.light, Action::Blinked { cycles: 3 });
    assert_eq!(
        c.outputs().levels(Channel::Light),
        vec![Low, High, Low, High, Low, High]
    );
    assert_eq!(c.delay().waits, vec![BLINK_HALF_PERIOD; 6]);
    assert_eq!(
        c.last_observed(Channel::Light),
        &Observed::Seen(Some("blink".into()))
    );

    // The value that ended blink mode is picked up on the next pass.
    assert_eq!(c.poll_once().light, Action::Switched(Switch::Off));
    assert_eq!(c.outputs().levels(Channel::Light).last(), Some(&High));
}

#[test]
fn blink_ending_immediately_toggles_nothing() {
    let mut c = controller(vec![blink(), on()], vec![off()]);

    assert_eq!(c.poll_once().light, Action::Blinked { cycles: 0 });
    assert!(c.outputs().levels(Channel::Light).is_empty());
    assert_eq!(c.poll_once().light, Action::Switched(Switch::On));
}

#[test]
fn buzzer_is_serviced_during_blink() {
    let mut c = controller(
        vec![blink(), blink(), blink(), blink(), off()],
        vec![off(), on()],
    );

    let report = c.poll_once();

    assert_eq!(report.light, Action::Blinked { cycles: 3 });
    // Already applied inside the blink loop.
    assert_eq!(report.buzzer, Action::Unchanged);
    assert_eq!(
        c.outputs().writes,
        vec![
            (Channel::Light, Low),
            (Channel::Light, High),
            (Channel::Buzzer, High),
            (Channel::Light, Low),
            (Channel::Light, High),
            (Channel::Buzzer, Low),
            (Channel::Light, Low),
            (Channel::Light, High),
        ]
    );
}

// ── Read failures ─────────────────────────────────────────────

#[test]
fn read_failure_keeps_previous_state() {
    let mut c = controller(vec![on(), Reply::Fail, on()], vec![off()]);

    assert_eq!(c.poll_once().light, Action::Switched(Switch::On));
    assert_eq!(c.poll_once().light, Action::ReadFailed);
    assert_eq!(
        c.last_observed(Channel::Light),
        &Observed::Seen(Some("on".into()))
    );
    assert_eq!(c.poll_once().light, Action::Unchanged);
    assert_eq!(c.outputs().levels(Channel::Light), vec![Low]);
}

#[test]
fn read_failure_before_first_value_leaves_state_unset() {
    let mut c = controller(vec![Reply::Fail, off()], vec![Reply::Fail, off()]);

    let report = c.poll_once();
    assert_eq!(report.light, Action::ReadFailed);
    assert_eq!(report.buzzer, Action::ReadFailed);
    assert_eq!(c.last_observed(Channel::Light), &Observed::Unset);
    assert!(c.outputs().writes.is_empty());

    let report = c.poll_once();
    assert_eq!(report.light, Action::Switched(Switch::Off));
    assert_eq!(report.buzzer, Action::Switched(Switch::Off));
}

#[test]
fn read_failure_during_blink_keeps_blinking() {
    let mut c = controller(vec![blink(), blink(), Reply::Fail, off()], vec![off()]);

    assert_eq!(c.poll_once().light, Action::Blinked { cycles: 2 });
    assert_eq!(
        c.outputs().levels(Channel::Light),
        vec![Low, High, Low, High]
    );
}
