//! Desktop stand-ins for the host capabilities.

use std::cell::Cell;
use std::fmt::Write;
use std::rc::Rc;

use glass_sensor_display::readout::Channel;
use glass_sensor_display::{ConnectionBridge, Cue, CueId, CuePlayer};
use heapless::String;

/// Prints cues to the console instead of playing audio.
#[derive(Debug, Default)]
pub struct ConsoleCuePlayer {
    loaded: Vec<Cue>,
}

impl CuePlayer for ConsoleCuePlayer {
    fn load_cue(
        &mut self,
        cue: Cue,
    ) -> CueId {
        self.loaded.push(cue);
        CueId((self.loaded.len() - 1) as u16)
    }

    fn play(
        &mut self,
        id: CueId,
    ) {
        match self.loaded.get(usize::from(id.0)) {
            Some(Cue::Tick) => println!("cue: tick"),
            Some(Cue::Connected) => println!("cue: connected"),
            None => println!("cue: unknown id {}", id.0),
        }
    }
}

/// Sensor link state shared between the key handler and the coordinator.
#[derive(Clone, Debug, Default)]
pub struct SensorLink(Rc<Cell<bool>>);

impl SensorLink {
    pub fn set(
        &self,
        connected: bool,
    ) {
        self.0.set(connected);
    }
}

impl ConnectionBridge for SensorLink {
    fn is_connected(&self) -> bool { self.0.get() }
}

/// Produces plausible-looking channel strings from a time base.
pub struct FakeSensor;

impl FakeSensor {
    /// Formatted value of `channel` at time `t` (seconds).
    pub fn value(
        channel: Channel,
        t: f32,
    ) -> String<16> {
        let mut out = String::new();
        let phase = channel.index() as f32;
        let written = match channel {
            Channel::Temperature => write!(out, "{:.1} C", fake_signal(t + phase, 19.0, 24.0, 0.1)),
            Channel::Humidity => write!(out, "{:.0} %", fake_signal(t + phase, 35.0, 55.0, 0.05)),
            Channel::Pressure => write!(out, "{:.1} hPa", fake_signal(t + phase, 1005.0, 1020.0, 0.02)),
            Channel::IrTemperature => write!(out, "{:.1} C", fake_signal(t + phase, 25.0, 33.0, 0.2)),
            Channel::Illuminance => write!(out, "{:.0} lx", fake_signal(t + phase, 80.0, 900.0, 0.3)),
            Channel::Gas => write!(out, "{:.0} ppm", fake_signal(t + phase, 400.0, 1200.0, 0.07)),
            Channel::Proximity => write!(out, "{:.0} cm", fake_signal(t + phase, 2.0, 80.0, 0.5)),
            Channel::Voltage => write!(out, "{:.2} V", fake_signal(t + phase, 3.6, 4.2, 0.01)),
            Channel::Altitude => write!(out, "{:.0} m", fake_signal(t + phase, 110.0, 140.0, 0.03)),
            Channel::Battery => write!(out, "{:.0} %", fake_signal(t + phase, 60.0, 100.0, 0.005)),
        };
        written.ok();
        out
    }
}

fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}
