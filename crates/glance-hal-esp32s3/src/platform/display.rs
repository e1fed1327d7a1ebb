use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};
use epd2in7::{Config, Epd2in7, Error, FrameBuffer};
use log::debug;

pub type EpdResult<SPI, DC, RST, BUSY> = Result<(), EpdDisplayError<SPI, DC, RST, BUSY>>;

pub type EpdDisplayError<SPI, DC, RST, BUSY> = Error<
    <SPI as embedded_hal::spi::ErrorType>::Error,
    <DC as embedded_hal::digital::ErrorType>::Error,
    <RST as embedded_hal::digital::ErrorType>::Error,
    <BUSY as embedded_hal::digital::ErrorType>::Error,
>;

/// Board-level adapter over the 2.7" panel driver.
///
/// Every frame push is a full refresh; the panel takes on the order of a
/// second per refresh, which the half-second controller tick tolerates
/// because pushes are change-gated.
#[derive(Debug)]
pub struct EpdDisplay<SPI, DC, RST, BUSY> {
    epd: Epd2in7<SPI, DC, RST, BUSY>,
}

impl<SPI, DC, RST, BUSY> EpdDisplay<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self {
            epd: Epd2in7::new(spi, dc, rst, busy, Config::default()),
        }
    }

    /// Hardware reset, vendor init sequence, and an initial all-white pass.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> EpdResult<SPI, DC, RST, BUSY> {
        self.epd.init(delay)?;
        self.epd.clear(delay)?;
        debug!("e-paper panel initialized");
        Ok(())
    }

    /// Pushes a full framebuffer and blocks through the refresh.
    pub fn flush_frame<D: DelayNs>(
        &mut self,
        frame: &FrameBuffer,
        delay: &mut D,
    ) -> EpdResult<SPI, DC, RST, BUSY> {
        self.epd.display_frame(frame, delay)
    }

    /// Deep sleep; `initialize` is required to wake the panel again.
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> EpdResult<SPI, DC, RST, BUSY> {
        self.epd.sleep(delay)
    }
}
