#![cfg_attr(not(test), no_std)]

//! Waveshare 2.7" e-paper (176x264, 1bpp) driver primitives.

mod framebuffer;
pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use framebuffer::FrameBuffer;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Expected SPI clock in Hz (documented for board glue).
    pub spi_hz: u32,
    /// Reset pulse width in milliseconds.
    pub reset_pulse_ms: u32,
    /// Upper bound on one BUSY wait, in milliseconds. A full refresh on
    /// this panel takes roughly one second; anything past this is a fault.
    pub busy_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spi_hz: 2_000_000,
            reset_pulse_ms: 200,
            busy_timeout_ms: 5_000,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, DcErr, RstErr, BusyErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// DC pin operation failed.
    Dc(DcErr),
    /// RST pin operation failed.
    Rst(RstErr),
    /// BUSY pin read failed.
    Busy(BusyErr),
    /// Panel stayed busy past the configured timeout.
    BusyTimeout,
}

pub type DriverResult<SpiErr, DcErr, RstErr, BusyErr> =
    Result<(), Error<SpiErr, DcErr, RstErr, BusyErr>>;

/// 2.7" e-paper driver.
///
/// BUSY is active low on this panel: the controller holds the pin low while
/// a refresh is in progress.
#[derive(Debug)]
pub struct Epd2in7<SPI, DC, RST, BUSY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    config: Config,
}

impl<SPI, DC, RST, BUSY> Epd2in7<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Creates a new driver instance.
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, config: Config) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            config,
        }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, DC, RST, BUSY) {
        (self.spi, self.dc, self.rst, self.busy)
    }

    /// Hardware reset followed by the vendor power-up sequence.
    pub fn init<D>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error>
    where
        D: DelayNs,
    {
        self.reset(delay)?;

        self.command_with_data(protocol::cmd::POWER_SETTING, &protocol::POWER_SETTING_DATA)?;
        self.command_with_data(
            protocol::cmd::BOOSTER_SOFT_START,
            &protocol::BOOSTER_SOFT_START_DATA,
        )?;
        for payload in &protocol::POWER_OPTIMIZATION_SEQUENCE {
            self.command_with_data(protocol::cmd::POWER_OPTIMIZATION, payload)?;
        }
        self.command_with_data(protocol::cmd::PARTIAL_DISPLAY_REFRESH, &[0x00])?;

        self.command(protocol::cmd::POWER_ON)?;
        self.wait_until_idle(delay)?;

        self.command_with_data(protocol::cmd::PANEL_SETTING, &[protocol::PANEL_SETTING_DATA])?;
        self.command_with_data(protocol::cmd::PLL_CONTROL, &[protocol::PLL_CONTROL_DATA])?;
        self.command_with_data(protocol::cmd::TCON_RESOLUTION, &protocol::resolution_payload())?;
        self.command_with_data(protocol::cmd::VCM_DC_SETTING, &[protocol::VCM_DC_SETTING_DATA])?;
        delay.delay_ms(2);

        self.write_luts()
    }

    /// Clears the panel to white and refreshes.
    pub fn clear<D>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error>
    where
        D: DelayNs,
    {
        self.command(protocol::cmd::DATA_START_TRANSMISSION_1)?;
        self.write_repeated(0xFF, protocol::BUFFER_SIZE)?;
        self.command(protocol::cmd::DATA_START_TRANSMISSION_2)?;
        self.write_repeated(0xFF, protocol::BUFFER_SIZE)?;

        self.command(protocol::cmd::DISPLAY_REFRESH)?;
        self.wait_until_idle(delay)
    }

    /// Transmits a full framebuffer and triggers a refresh cycle.
    ///
    /// Blocks on BUSY until the refresh completes; a full-panel refresh is
    /// on the order of one second.
    pub fn display_frame<D>(
        &mut self,
        frame: &FrameBuffer,
        delay: &mut D,
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error>
    where
        D: DelayNs,
    {
        self.command(protocol::cmd::DATA_START_TRANSMISSION_2)?;
        self.data(frame.bytes())?;

        self.command(protocol::cmd::DISPLAY_REFRESH)?;
        self.wait_until_idle(delay)
    }

    /// Powers the panel down into deep sleep. A hardware reset (`init`) is
    /// required to wake it.
    pub fn sleep<D>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error>
    where
        D: DelayNs,
    {
        self.command(protocol::cmd::POWER_OFF)?;
        self.wait_until_idle(delay)?;
        self.command_with_data(protocol::cmd::DEEP_SLEEP, &[protocol::DEEP_SLEEP_CHECK])
    }

    fn reset<D>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error>
    where
        D: DelayNs,
    {
        self.rst.set_high().map_err(Error::Rst)?;
        delay.delay_ms(self.config.reset_pulse_ms);
        self.rst.set_low().map_err(Error::Rst)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(Error::Rst)?;
        delay.delay_ms(self.config.reset_pulse_ms);
        Ok(())
    }

    fn write_luts(&mut self) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error> {
        self.command_with_data(protocol::cmd::LUT_FOR_VCOM, &protocol::LUT_VCOM_DC)?;
        self.command_with_data(protocol::cmd::LUT_WHITE_TO_WHITE, &protocol::LUT_WW)?;
        self.command_with_data(protocol::cmd::LUT_BLACK_TO_WHITE, &protocol::LUT_BW)?;
        self.command_with_data(protocol::cmd::LUT_WHITE_TO_BLACK, &protocol::LUT_WB)?;
        self.command_with_data(protocol::cmd::LUT_BLACK_TO_BLACK, &protocol::LUT_BB)
    }

    fn command(&mut self, command: u8) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error> {
        self.dc.set_low().map_err(Error::Dc)?;
        self.spi.write(&[command]).map_err(Error::Spi)
    }

    fn data(&mut self, data: &[u8]) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error> {
        self.dc.set_high().map_err(Error::Dc)?;
        self.spi.write(data).map_err(Error::Spi)
    }

    fn command_with_data(
        &mut self,
        command: u8,
        data: &[u8],
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error> {
        self.command(command)?;
        self.data(data)
    }

    fn write_repeated(
        &mut self,
        byte: u8,
        count: usize,
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error> {
        self.dc.set_high().map_err(Error::Dc)?;

        let chunk = [byte; 64];
        let mut remaining = count;
        while remaining > 0 {
            let len = remaining.min(chunk.len());
            self.spi.write(&chunk[..len]).map_err(Error::Spi)?;
            remaining -= len;
        }

        Ok(())
    }

    fn wait_until_idle<D>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, DC::Error, RST::Error, BUSY::Error>
    where
        D: DelayNs,
    {
        let mut waited_ms = 0u32;
        while self.busy.is_low().map_err(Error::Busy)? {
            if waited_ms >= self.config.busy_timeout_ms {
                return Err(Error::BusyTimeout);
            }
            delay.delay_ms(1);
            waited_ms += 1;
        }

        Ok(())
    }
}
