//! SSD1306 command definitions
//!
//! This module defines the command bytes used to control the SSD1306 OLED
//! controller. Commands travel in an I2C write transaction whose first byte
//! is the command-stream control byte; pixel data uses the data-stream
//! control byte instead (see [`StreamKind`](crate::interface::StreamKind)).
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Start condition + device address (write intent)
//! 2. Control byte (`0x00` for commands)
//! 3. Command byte(s), each followed by its argument bytes (if any)
//! 4. Stop condition
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_i2c::{command, BusInterface, I2cInterface, StreamKind};
//! # use core::convert::Infallible;
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl embedded_hal::i2c::I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [embedded_hal::i2c::Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let mut interface = I2cInterface::new(MockI2c);
//! // Set contrast to half scale
//! let _ = interface.start(StreamKind::Command);
//! let _ = interface.write(&[command::SET_CONTRAST, 0x7F]);
//! let _ = interface.stop();
//! ```

// Fundamental commands

/// Display off / sleep command (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on / wake command (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

/// Set contrast control register command (0x81)
///
/// Requires 1 byte: contrast level 0-255.
pub const SET_CONTRAST: u8 = 0x81;

/// Resume display output from RAM content command (0xA4)
///
/// The 0xA5 counterpart forces every pixel on regardless of RAM.
pub const RESUME_TO_RAM: u8 = 0xA4;

/// Normal display mode command (0xA6)
///
/// RAM bit 1 lights the pixel.
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverse display mode command (0xA7)
///
/// RAM bit 0 lights the pixel.
pub const INVERT_DISPLAY: u8 = 0xA7;

// Addressing commands

/// Set memory addressing mode command (0x20)
///
/// Requires 1 byte: 0x00 = horizontal, 0x01 = vertical,
/// 0x02 = page (reset default).
pub const MEMORY_ADDRESSING_MODE: u8 = 0x20;

/// Page start address command base (0xB0)
///
/// OR in the page number 0-7.
pub const PAGE_START: u8 = 0xB0;

/// Lower column start address command base (0x00)
///
/// OR in the low nibble of the column.
pub const SET_LOW_COLUMN: u8 = 0x00;

/// Higher column start address command base (0x10)
///
/// OR in the high nibble of the column.
pub const SET_HIGH_COLUMN: u8 = 0x10;

/// Display start line command base (0x40)
///
/// OR in the RAM row mapped to COM0, 0-63.
pub const SET_START_LINE: u8 = 0x40;

/// Set column address range command (0x21)
///
/// Requires 2 bytes: start column, end column. Effective in horizontal and
/// vertical addressing modes.
pub const SET_COLUMN_RANGE: u8 = 0x21;

/// Set page address range command (0x22)
///
/// Requires 2 bytes: start page, end page. Effective in horizontal and
/// vertical addressing modes.
pub const SET_PAGE_RANGE: u8 = 0x22;

// Hardware configuration commands

/// Segment remap command, column 127 mapped to SEG0 (0xA1)
///
/// The 0xA0 counterpart maps column 0 to SEG0.
pub const SEGMENT_REMAP: u8 = 0xA1;

/// Set multiplex ratio command (0xA8)
///
/// Requires 1 byte: ratio - 1 (0x3F selects all 64 rows).
pub const SET_MULTIPLEX: u8 = 0xA8;

/// COM output scan direction command, remapped (0xC8)
///
/// Scans from COM63 to COM0; combined with [`SEGMENT_REMAP`] this puts the
/// origin in the upper left corner.
pub const COM_SCAN_REMAPPED: u8 = 0xC8;

/// Set display offset command (0xD3)
///
/// Requires 1 byte: vertical COM shift 0-63.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration command (0xDA)
///
/// Requires 1 byte; 0x12 is the alternative configuration used by 128x64
/// modules.
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and driving scheme commands

/// Set display clock divide ratio / oscillator frequency command (0xD5)
///
/// Requires 1 byte: low nibble divide ratio, high nibble oscillator
/// frequency.
pub const SET_CLOCK_DIVIDE: u8 = 0xD5;

/// Set pre-charge period command (0xD9)
///
/// Requires 1 byte: low nibble phase 1, high nibble phase 2, in clocks.
pub const SET_PRECHARGE: u8 = 0xD9;

/// Set VCOMH deselect level command (0xDB)
///
/// Requires 1 byte; 0x20 selects 0.77 x Vcc.
pub const SET_VCOMH_DESELECT: u8 = 0xDB;

/// Charge pump setting command (0x8D)
///
/// Requires 1 byte: 0x14 enables the internal charge pump, 0x10 disables
/// it. Must precede display on.
pub const CHARGE_PUMP: u8 = 0x8D;

/// Power-up configuration replayed verbatim by
/// [`Display::init`](crate::Display::init)
///
/// This sequence is a fixed protocol constant: the controller expects these
/// exact bytes in this exact order, and panels are qualified against it. Do
/// not reorder or recompute entries.
pub const INIT_SEQUENCE: [u8; 28] = [
    DISPLAY_OFF,
    MEMORY_ADDRESSING_MODE,
    0x00, // horizontal addressing
    PAGE_START,
    COM_SCAN_REMAPPED,
    SET_LOW_COLUMN,
    SET_HIGH_COLUMN,
    SET_START_LINE,
    SET_CONTRAST,
    0x00,
    SEGMENT_REMAP,
    NORMAL_DISPLAY,
    SET_MULTIPLEX,
    0x3F, // 64 rows
    RESUME_TO_RAM,
    SET_DISPLAY_OFFSET,
    0x00,
    SET_CLOCK_DIVIDE,
    0xF0,
    SET_PRECHARGE,
    0x22,
    SET_COM_PINS,
    0x12,
    SET_VCOMH_DESELECT,
    0x20, // 0.77 x Vcc
    CHARGE_PUMP,
    0x14, // charge pump on
    DISPLAY_ON,
];
