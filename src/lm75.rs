//! LM75-family temperature sensor with over-temperature alert.
//!
//! The sensor is configured in thermostat interrupt mode: its OS line pulls
//! low once the temperature crosses TOS and stays latched until read back
//! below THYST. The board wires that line to an edge interrupt which calls
//! [`AlertFlag::raise`]; [`TemperaturePoller`] samples until then and keeps
//! a bounded history of readings for dumping when the alert fires.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::i2c::I2c;
use heapless::Deque;

use crate::config::{
    DEFAULT_HYSTERESIS_C, DEFAULT_OVER_TEMP_C, LM75_ADDRESS, TEMPERATURE_HISTORY_LEN,
};

/// Register pointers.
pub mod register {
    pub const TEMP: u8 = 0x00;
    pub const CONF: u8 = 0x01;
    pub const THYST: u8 = 0x02;
    pub const TOS: u8 = 0x03;
}

/// CONF value: interrupt (rather than comparator) mode, fault queue of one.
pub const CONF_INTERRUPT_MODE: u8 = 0x02;

// Limit registers only hold 9 significant bits (0.5 degree steps)
const LIMIT_MASK: i16 = 0xFF80u16 as i16;

/// Errors from sensor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// The I2C transaction failed.
    Bus(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::Bus(e) => write!(f, "i2c transaction failed: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for SensorError<E> {}

/// Encodes a TOS/THYST limit as the register's big-endian bytes.
pub fn encode_limit(celsius: f32) -> [u8; 2] {
    (((celsius * 256.0) as i16) & LIMIT_MASK).to_be_bytes()
}

/// Decodes the TEMP register's big-endian bytes to degrees Celsius.
pub fn decode_temperature(bytes: [u8; 2]) -> f32 {
    f32::from(i16::from_be_bytes(bytes)) / 256.0
}

/// LM75 driver over a blocking I2C bus.
pub struct Lm75<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Lm75<I2C> {
    /// Creates a driver at the default address.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, LM75_ADDRESS)
    }

    /// Creates a driver at a 7-bit `address` (A0-A2 strapped differently).
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Switches to interrupt mode and programs the alert window.
    pub fn configure_thermostat(
        &mut self,
        over_temp_c: f32,
        hysteresis_c: f32,
    ) -> Result<(), SensorError<I2C::Error>> {
        self.write(&[register::CONF, CONF_INTERRUPT_MODE])?;

        let [hi, lo] = encode_limit(over_temp_c);
        self.write(&[register::TOS, hi, lo])?;

        let [hi, lo] = encode_limit(hysteresis_c);
        self.write(&[register::THYST, hi, lo])?;

        debug!("lm75 alert window set");
        Ok(())
    }

    /// Programs the board's default alert window (28 °C on, 26 °C off).
    pub fn configure_default_thermostat(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.configure_thermostat(DEFAULT_OVER_TEMP_C, DEFAULT_HYSTERESIS_C)
    }

    /// Reads the current temperature in degrees Celsius.
    pub fn read_celsius(&mut self) -> Result<f32, SensorError<I2C::Error>> {
        let mut bytes = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register::TEMP], &mut bytes)
            .map_err(SensorError::Bus)?;
        Ok(decode_temperature(bytes))
    }

    /// Returns the 7-bit bus address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), SensorError<I2C::Error>> {
        self.i2c.write(self.address, bytes).map_err(SensorError::Bus)
    }
}

/// Over-temperature flag set from the OS-line interrupt.
#[derive(Debug)]
pub struct AlertFlag(AtomicBool);

impl AlertFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Latches the alert. Safe to call from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for AlertFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Most recent `N` readings, oldest first.
#[derive(Debug, Clone)]
pub struct TemperatureLog<const N: usize = TEMPERATURE_HISTORY_LEN> {
    readings: Deque<f32, N>,
}

impl<const N: usize> TemperatureLog<N> {
    pub const fn new() -> Self {
        Self {
            readings: Deque::new(),
        }
    }

    /// Appends a reading, dropping the oldest when full.
    pub fn push(&mut self, celsius: f32) {
        if self.readings.is_full() {
            self.readings.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.readings.push_back(celsius);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Number of readings kept before the oldest is dropped.
    pub fn capacity(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Iterates readings in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.readings.iter().copied()
    }

    /// Most recent reading.
    pub fn latest(&self) -> Option<f32> {
        self.readings.back().copied()
    }
}

impl<const N: usize> Default for TemperatureLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one [`TemperaturePoller::poll`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// No alert; a reading was taken and logged.
    Sample(f32),
    /// The alert just latched; the history should be dumped now.
    Dump,
    /// The alert is still latched and the history was already dumped.
    Alert,
}

/// Polls the sensor until the alert latches, logging every reading.
///
/// # Type Parameters
/// * `'a` - Lifetime of the alert flag reference
/// * `I2C` - I2C bus implementation type
/// * `N` - Number of readings kept in the history, 60 unless overridden
pub struct TemperaturePoller<'a, I2C, const N: usize = TEMPERATURE_HISTORY_LEN> {
    sensor: Lm75<I2C>,
    alert: &'a AlertFlag,
    history: TemperatureLog<N>,
    dumped: bool,
}

impl<'a, I2C: I2c, const N: usize> TemperaturePoller<'a, I2C, N> {
    pub fn new(sensor: Lm75<I2C>, alert: &'a AlertFlag) -> Self {
        Self {
            sensor,
            alert,
            history: TemperatureLog::new(),
            dumped: false,
        }
    }

    /// Takes a reading, or reports the alert state once it has latched.
    pub fn poll(&mut self) -> Result<PollOutcome, SensorError<I2C::Error>> {
        if !self.alert.is_raised() {
            let celsius = self.sensor.read_celsius()?;
            self.history.push(celsius);
            trace!("temperature sample {}", celsius);
            return Ok(PollOutcome::Sample(celsius));
        }

        if self.dumped {
            Ok(PollOutcome::Alert)
        } else {
            warn!("over-temperature alert, {} readings logged", self.history.len());
            self.dumped = true;
            Ok(PollOutcome::Dump)
        }
    }

    /// Clears the alert and resumes sampling. The history is kept.
    pub fn acknowledge(&mut self) {
        self.alert.clear();
        self.dumped = false;
    }

    pub fn history(&self) -> &TemperatureLog<N> {
        &self.history
    }

    pub fn sensor_mut(&mut self) -> &mut Lm75<I2C> {
        &mut self.sensor
    }
}
