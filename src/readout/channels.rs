//! The ten sensor channels and their last-known display strings.
//!
//! Values arrive already formatted by the sensor service. They are stored
//! verbatim, truncated to [`VALUE_CAPACITY`] bytes on a character boundary.

use heapless::String;

/// Number of sensor channels on the readout card.
pub const CHANNEL_COUNT: usize = 10;

/// Maximum stored length of one channel value in bytes.
pub const VALUE_CAPACITY: usize = 16;

/// Placeholder shown until a channel receives its first value.
pub const SENTINEL: &str = "--";

/// One sensor channel. Discriminants index [`ChannelValues`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    Temperature = 0,
    Humidity = 1,
    Pressure = 2,
    IrTemperature = 3,
    Illuminance = 4,
    Gas = 5,
    Proximity = 6,
    Voltage = 7,
    Altitude = 8,
    Battery = 9,
}

impl Channel {
    /// Every channel in display order.
    pub const ALL: [Self; CHANNEL_COUNT] = [
        Self::Temperature,
        Self::Humidity,
        Self::Pressure,
        Self::IrTemperature,
        Self::Illuminance,
        Self::Gas,
        Self::Proximity,
        Self::Voltage,
        Self::Altitude,
        Self::Battery,
    ];

    /// Slot index.
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Short label drawn above the value.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "TEMP",
            Self::Humidity => "HUMIDITY",
            Self::Pressure => "PRESSURE",
            Self::IrTemperature => "IR TEMP",
            Self::Illuminance => "LIGHT",
            Self::Gas => "GAS",
            Self::Proximity => "PROXIMITY",
            Self::Voltage => "VOLTAGE",
            Self::Altitude => "ALTITUDE",
            Self::Battery => "BATTERY",
        }
    }
}

/// Last-known value of every channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelValues {
    values: [String<VALUE_CAPACITY>; CHANNEL_COUNT],
}

impl ChannelValues {
    /// All channels at the sentinel.
    pub fn new() -> Self {
        let mut values = Self {
            values: [const { String::new() }; CHANNEL_COUNT],
        };
        values.reset();
        values
    }

    /// Put every channel back to the sentinel.
    pub fn reset(&mut self) {
        for slot in &mut self.values {
            slot.clear();
            slot.push_str(SENTINEL).ok();
        }
    }

    /// Store `value` for `channel`. Returns `true` if it had to be truncated.
    pub fn set(
        &mut self,
        channel: Channel,
        value: &str,
    ) -> bool {
        let slot = &mut self.values[channel.index()];
        slot.clear();
        let mut truncated = false;
        for c in value.chars() {
            if slot.push(c).is_err() {
                truncated = true;
                break;
            }
        }
        truncated
    }

    /// Current string for `channel`.
    #[inline]
    pub fn get(
        &self,
        channel: Channel,
    ) -> &str {
        self.values[channel.index()].as_str()
    }

    /// Channels paired with their values, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &str)> + '_ {
        Channel::ALL.into_iter().map(move |channel| (channel, self.get(channel)))
    }
}

impl Default for ChannelValues {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_sentinel() {
        let values = ChannelValues::new();
        assert!(values.iter().all(|(_, v)| v == SENTINEL));
        assert_eq!(values.iter().count(), CHANNEL_COUNT);
    }

    #[test]
    fn test_set_stores_verbatim() {
        let mut values = ChannelValues::new();
        assert!(!values.set(Channel::Humidity, "42.5 %"));
        assert_eq!(values.get(Channel::Humidity), "42.5 %");
        assert_eq!(values.get(Channel::Temperature), SENTINEL);
    }

    #[test]
    fn test_set_accepts_empty_and_odd_strings() {
        let mut values = ChannelValues::new();
        values.set(Channel::Gas, "");
        assert_eq!(values.get(Channel::Gas), "");
        values.set(Channel::Gas, "NaN");
        assert_eq!(values.get(Channel::Gas), "NaN");
    }

    #[test]
    fn test_long_value_is_truncated_on_char_boundary() {
        let mut values = ChannelValues::new();
        assert!(values.set(Channel::Pressure, "1013.25 hPa (sea level)"));
        assert_eq!(values.get(Channel::Pressure), "1013.25 hPa (sea");

        // 2-byte characters: 8 fit exactly, the 9th does not
        assert!(values.set(Channel::Temperature, "ééééééééé"));
        assert_eq!(values.get(Channel::Temperature).chars().count(), 8);
    }

    #[test]
    fn test_reset() {
        let mut values = ChannelValues::new();
        values.set(Channel::Battery, "87 %");
        values.reset();
        assert_eq!(values, ChannelValues::new());
    }

    #[test]
    fn test_channel_order_matches_index() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }
}
