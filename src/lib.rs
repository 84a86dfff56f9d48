//! SSD1306 128x64 OLED Display Driver (I2C)
//!
//! A minimal driver for 128x64 monochrome OLED panels built on the SSD1306
//! controller, communicating over I2C.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Cursor-addressed text rendering with a built-in 5x8 ASCII font
//! - Axis-aligned line drawing against the controller's page-organized RAM
//! - No host-side framebuffer: every operation writes controller RAM
//!   directly, so RAM usage stays in the tens of bytes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ssd1306_i2c::{Display, I2cInterface};
//!
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
//! # let i2c = MockI2c;
//! let interface = I2cInterface::new(i2c);
//! let mut display = Display::new(interface);
//!
//! let _ = display.init();
//! let _ = display.clear();
//! let _ = display.set_position(0, 0);
//! let _ = display.print_str("Hello");
//! let _ = display.set_position(0, 1);
//! let _ = display.print_int(1306);
//! let _ = display.draw_horizontal(0, 63, 128);
//! ```
//!
//! ## Page-addressed rendering
//!
//! The controller's RAM holds 8 pages of 128 bytes; each byte drives 8
//! vertically stacked pixels. There is no read-modify-write over the bus,
//! so every byte written replaces all 8 rows of its page at that column,
//! and a horizontal line clobbers text sharing its page. Callers lay out
//! content page-aligned to avoid this.

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// SSD1306 command definitions
pub mod command;
/// Unsigned decimal conversion for the text renderer
pub mod decimal;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// 5x8 ASCII column font
pub mod font;
/// Bus transaction primitives and the I2C binding
pub mod interface;

pub use display::{Display, HEIGHT, PAGES, WIDTH};
pub use error::Error;
pub use interface::{BusInterface, DEFAULT_ADDRESS, I2cInterface, InterfaceError, StreamKind};
