//! Desktop simulator for the wearable sensor display.
//!
//! Drives the display core with a `std` monotonic clock and an SDL window.
//!
//! # Keys
//!
//! - `C`: sensor connects (pushed notification)
//! - `P`: sensor connects silently; only the countdown's final tick notices
//! - `S`: destroy / recreate the drawing surface
//! - `V`: toggle readout visibility
//! - `R`: push a fresh set of channel values now
//! - `L`: print the event log

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod host;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use glass_sensor_display::colors::BLACK;
use glass_sensor_display::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use glass_sensor_display::{Channel, DisplayConfig, DoubleBuffer, Phase, SurfaceCoordinator};

use crate::host::{ConsoleCuePlayer, FakeSensor, SensorLink};
use crate::timing::{COUNTDOWN_SECS, FEED_INTERVAL_MS, POLL_INTERVAL};

type SimSurface = DoubleBuffer<SimulatorDisplay<Rgb565>>;

fn new_surface() -> SimSurface {
    let size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    DoubleBuffer::new(SimulatorDisplay::new(size), SimulatorDisplay::new(size))
}

fn feed_channels(
    coordinator: &mut SurfaceCoordinator<SimSurface, ConsoleCuePlayer, SensorLink>,
    now: u64,
) {
    let t = now as f32 / 1000.0;
    for channel in Channel::ALL {
        coordinator.set_channel(channel, &FakeSensor::value(channel, t));
    }
}

fn main() {
    let config = DisplayConfig::new().with_countdown_secs(COUNTDOWN_SECS);
    let link = SensorLink::default();
    let mut coordinator = match SurfaceCoordinator::with_cards(config, ConsoleCuePlayer::default(), link.clone()) {
        Ok(coordinator) => coordinator,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return;
        }
    };

    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Sensor Display Sim", &output_settings);
    let mut blank: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    blank.clear(BLACK).ok();
    window.update(&blank);

    let start = Instant::now();
    let clock = || start.elapsed().as_millis() as u64;

    coordinator.on_surface_changed(SCREEN_WIDTH, SCREEN_HEIGHT);
    coordinator.on_surface_created(new_surface(), clock());
    coordinator.on_readout_visibility_changed(true, clock());

    let mut readout_visible = true;
    let mut last_feed = 0u64;

    loop {
        let now = clock();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    coordinator.shutdown(now);
                    return;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::C => {
                            link.set(true);
                            coordinator.on_connection_established(now);
                        }
                        Keycode::P => link.set(true),
                        Keycode::S => {
                            if coordinator.phase() == Phase::NoSurface {
                                coordinator.on_surface_created(new_surface(), now);
                            } else {
                                coordinator.on_surface_destroyed(now);
                            }
                        }
                        Keycode::V => {
                            readout_visible = !readout_visible;
                            if readout_visible {
                                coordinator.on_readout_visibility_changed(true, now);
                            } else {
                                coordinator.on_readout_detached();
                            }
                        }
                        Keycode::R => feed_channels(&mut coordinator, now),
                        Keycode::L => {
                            for entry in coordinator.event_log().iter() {
                                println!("{entry}");
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if coordinator.is_connected() && now.saturating_sub(last_feed) >= FEED_INTERVAL_MS {
            feed_channels(&mut coordinator, now);
            last_feed = now;
        }

        coordinator.poll(now);
        match coordinator.surface() {
            Some(surface) => window.update(surface.front()),
            None => window.update(&blank),
        }

        thread::sleep(POLL_INTERVAL);
    }
}
