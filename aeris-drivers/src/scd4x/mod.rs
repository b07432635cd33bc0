//! SCD4x CO2/temperature/humidity sensor driver
//!
//! Blocking driver for the Sensirion SCD40/SCD41 over I2C. Commands
//! are 16-bit words sent big-endian; responses come back as 16-bit
//! words each followed by a CRC-8 checksum. The driver owns the fixed
//! command execution delays from the datasheet, so callers see every
//! command as a single blocking operation.

mod crc;

use aeris_core::traits::{Co2Sensor, Measurement, SensorError};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crc::crc8;

/// Fixed I2C address of all SCD4x parts
pub const SCD4X_I2C_ADDR: u8 = 0x62;

const CMD_START_PERIODIC_MEASUREMENT: u16 = 0x21b1;
const CMD_STOP_PERIODIC_MEASUREMENT: u16 = 0x3f86;
const CMD_MEASURE_SINGLE_SHOT: u16 = 0x219d;
const CMD_GET_DATA_READY_STATUS: u16 = 0xe4b8;
const CMD_READ_MEASUREMENT: u16 = 0xec05;
const CMD_PERFORM_FORCED_RECALIBRATION: u16 = 0x362f;
const CMD_WAKE_UP: u16 = 0x36f6;
const CMD_POWER_DOWN: u16 = 0x36e0;
const CMD_REINIT: u16 = 0x3646;
const CMD_GET_SERIAL_NUMBER: u16 = 0x3682;

/// Lower 11 bits of the data-ready word are nonzero when a
/// measurement is waiting.
const DATA_READY_MASK: u16 = 0x07ff;

/// SCD4x driver over a blocking I2C bus
pub struct Scd4x<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Scd4x<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Release the underlying bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Soft-reset the sensor state, reloading calibration from EEPROM
    ///
    /// Only valid while idle; issue
    /// [`stop_periodic_measurement`](Co2Sensor::stop_periodic_measurement)
    /// first.
    pub fn reinit(&mut self) -> Result<(), SensorError> {
        self.send_command(CMD_REINIT, 30)
    }

    /// Read the 48-bit serial number
    pub fn serial_number(&mut self) -> Result<u64, SensorError> {
        self.send_command(CMD_GET_SERIAL_NUMBER, 1)?;
        let mut words = [0u16; 3];
        self.read_words(&mut words)?;
        Ok(u64::from(words[0]) << 32 | u64::from(words[1]) << 16 | u64::from(words[2]))
    }

    /// Write a bare command word, then wait out its execution time
    fn send_command(&mut self, cmd: u16, exec_ms: u32) -> Result<(), SensorError> {
        self.i2c
            .write(SCD4X_I2C_ADDR, &cmd.to_be_bytes())
            .map_err(|_| SensorError::Bus)?;
        if exec_ms > 0 {
            self.delay.delay_ms(exec_ms);
        }
        Ok(())
    }

    /// Write a command word with one checksummed argument word
    fn send_command_with_arg(
        &mut self,
        cmd: u16,
        arg: u16,
        exec_ms: u32,
    ) -> Result<(), SensorError> {
        let c = cmd.to_be_bytes();
        let a = arg.to_be_bytes();
        let frame = [c[0], c[1], a[0], a[1], crc8(&a)];
        self.i2c
            .write(SCD4X_I2C_ADDR, &frame)
            .map_err(|_| SensorError::Bus)?;
        if exec_ms > 0 {
            self.delay.delay_ms(exec_ms);
        }
        Ok(())
    }

    /// Read `out.len()` response words, verifying each checksum
    fn read_words(&mut self, out: &mut [u16]) -> Result<(), SensorError> {
        // Largest response is three words (9 bytes on the wire)
        let mut buf = [0u8; 9];
        let n = out.len() * 3;
        debug_assert!(n <= buf.len());

        self.i2c
            .read(SCD4X_I2C_ADDR, &mut buf[..n])
            .map_err(|_| SensorError::Bus)?;

        for (word, chunk) in out.iter_mut().zip(buf[..n].chunks_exact(3)) {
            if crc8(&chunk[..2]) != chunk[2] {
                return Err(SensorError::Crc);
            }
            *word = u16::from_be_bytes([chunk[0], chunk[1]]);
        }
        Ok(())
    }
}

impl<I2C, D> Co2Sensor for Scd4x<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn stop_periodic_measurement(&mut self) -> Result<(), SensorError> {
        self.send_command(CMD_STOP_PERIODIC_MEASUREMENT, 500)
    }

    fn start_periodic_measurement(&mut self) -> Result<(), SensorError> {
        self.send_command(CMD_START_PERIODIC_MEASUREMENT, 0)
    }

    fn measure_single_shot(&mut self) -> Result<(), SensorError> {
        // Returns once the command is accepted; the result is ready
        // after the sensor's ~5 s measurement time, signalled through
        // data_ready.
        self.send_command(CMD_MEASURE_SINGLE_SHOT, 0)
    }

    fn data_ready(&mut self) -> Result<bool, SensorError> {
        self.send_command(CMD_GET_DATA_READY_STATUS, 1)?;
        let mut words = [0u16; 1];
        self.read_words(&mut words)?;
        Ok(words[0] & DATA_READY_MASK != 0)
    }

    fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
        self.send_command(CMD_READ_MEASUREMENT, 1)?;
        let mut words = [0u16; 3];
        self.read_words(&mut words)?;

        // Datasheet conversions, kept in integer fixed point:
        //   T [m°C]  = 175_000 * raw / 65_536 - 45_000
        //   RH [m%]  = 100_000 * raw / 65_536
        let temperature_mc = ((u32::from(words[1]) * 21_875) >> 13) as i32 - 45_000;
        let humidity_mpct = ((u32::from(words[2]) * 12_500) >> 13) as i32;

        Ok(Measurement {
            co2_ppm: words[0],
            temperature_mc,
            humidity_mpct,
        })
    }

    fn perform_forced_recalibration(
        &mut self,
        reference_ppm: u16,
    ) -> Result<u16, SensorError> {
        self.send_command_with_arg(CMD_PERFORM_FORCED_RECALIBRATION, reference_ppm, 400)?;
        let mut words = [0u16; 1];
        self.read_words(&mut words)?;
        // 0xffff (sensor not ready) is a valid response word here;
        // decoding it is the caller's job.
        Ok(words[0])
    }

    fn wake_up(&mut self) -> Result<(), SensorError> {
        // The SCD4x does not acknowledge its own wake-up command, so a
        // NACK from a sleeping part is expected.
        let _ = self.i2c.write(SCD4X_I2C_ADDR, &CMD_WAKE_UP.to_be_bytes());
        self.delay.delay_ms(30);
        Ok(())
    }

    fn power_down(&mut self) -> Result<(), SensorError> {
        self.send_command(CMD_POWER_DOWN, 1)
    }
}
