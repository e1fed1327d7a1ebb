//! Command-level protocol constants for the 2.7" e-paper panel.

/// Panel width in pixels (portrait).
pub const WIDTH: usize = 176;
/// Panel height in pixels (portrait).
pub const HEIGHT: usize = 264;
/// Number of bytes in one display line.
pub const LINE_BYTES: usize = WIDTH / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = LINE_BYTES * HEIGHT;

/// Controller command set (UC8176-class, as used by the 2.7" HAT).
pub mod cmd {
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_SETTING: u8 = 0x01;
    pub const POWER_OFF: u8 = 0x02;
    pub const POWER_ON: u8 = 0x04;
    pub const BOOSTER_SOFT_START: u8 = 0x06;
    pub const DEEP_SLEEP: u8 = 0x07;
    pub const DATA_START_TRANSMISSION_1: u8 = 0x10;
    pub const DISPLAY_REFRESH: u8 = 0x12;
    pub const DATA_START_TRANSMISSION_2: u8 = 0x13;
    pub const PARTIAL_DISPLAY_REFRESH: u8 = 0x16;
    pub const LUT_FOR_VCOM: u8 = 0x20;
    pub const LUT_WHITE_TO_WHITE: u8 = 0x21;
    pub const LUT_BLACK_TO_WHITE: u8 = 0x22;
    pub const LUT_WHITE_TO_BLACK: u8 = 0x23;
    pub const LUT_BLACK_TO_BLACK: u8 = 0x24;
    pub const PLL_CONTROL: u8 = 0x30;
    pub const VCOM_AND_DATA_INTERVAL: u8 = 0x50;
    pub const TCON_RESOLUTION: u8 = 0x61;
    pub const VCM_DC_SETTING: u8 = 0x82;
    pub const POWER_OPTIMIZATION: u8 = 0xF8;
}

/// Deep-sleep check code; the controller ignores `DEEP_SLEEP` without it.
pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

/// VCOM waveform, 44 bytes.
pub const LUT_VCOM_DC: [u8; 44] = [
    0x00, 0x00, 0x00, 0x0F, 0x0F, 0x00, 0x00, 0x05, 0x00, 0x32, 0x32, 0x00, 0x00, 0x02, 0x00,
    0x0F, 0x0F, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// White-to-white waveform, 42 bytes.
pub const LUT_WW: [u8; 42] = [
    0x50, 0x0F, 0x0F, 0x00, 0x00, 0x05, 0x60, 0x32, 0x32, 0x00, 0x00, 0x02, 0xA0, 0x0F, 0x0F,
    0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Black-to-white waveform, 42 bytes (shared shape with [`LUT_WW`]).
pub const LUT_BW: [u8; 42] = LUT_WW;

/// Black-to-black waveform, 42 bytes.
pub const LUT_BB: [u8; 42] = [
    0xA0, 0x0F, 0x0F, 0x00, 0x00, 0x05, 0x60, 0x32, 0x32, 0x00, 0x00, 0x02, 0x50, 0x0F, 0x0F,
    0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// White-to-black waveform, 42 bytes (shared shape with [`LUT_BB`]).
pub const LUT_WB: [u8; 42] = LUT_BB;

/// Power-setting payload: VDS/VDG internal, VCOM/VGHL levels.
pub const POWER_SETTING_DATA: [u8; 5] = [0x03, 0x00, 0x2B, 0x2B, 0x09];

/// Booster soft-start periods for phases A/B/C.
pub const BOOSTER_SOFT_START_DATA: [u8; 3] = [0x07, 0x07, 0x17];

/// Undocumented power-optimization register writes issued during init,
/// taken from the vendor bring-up sequence.
pub const POWER_OPTIMIZATION_SEQUENCE: [[u8; 2]; 7] = [
    [0x60, 0xA5],
    [0x89, 0xA5],
    [0x90, 0x00],
    [0x93, 0x2A],
    [0xA0, 0xA5],
    [0xA1, 0x00],
    [0x73, 0x41],
];

/// Panel-setting payload: KW mode, LUT from register, scan directions.
pub const PANEL_SETTING_DATA: u8 = 0xAF;

/// PLL payload: 100 Hz frame rate.
pub const PLL_CONTROL_DATA: u8 = 0x3A;

/// VCOM_DC payload.
pub const VCM_DC_SETTING_DATA: u8 = 0x12;

/// Resolution payload for `TCON_RESOLUTION` (width, height big-endian).
#[inline]
pub const fn resolution_payload() -> [u8; 4] {
    [
        WIDTH as u8,
        (HEIGHT >> 8) as u8,
        (HEIGHT & 0xFF) as u8,
        0x00,
    ]
}
