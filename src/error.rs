//! Error types for the driver
//!
//! This module defines the driver-level [`Error`] type. Interface-level
//! failures are wrapped so the underlying hardware error stays matchable;
//! see [`InterfaceError`](crate::interface::InterfaceError) for those.
//!
//! Out-of-range inputs are rejected with typed errors before any bus
//! traffic is issued; the controller itself leaves such inputs undefined
//! (wraparound or garbage rendering). Byte streams emitted for valid
//! inputs are unaffected by validation.
//!
//! ## Example
//!
//! ```
//! # use ssd1306_i2c::{BusInterface, Display, Error, StreamKind};
//! # #[derive(Debug)]
//! # struct NullBus;
//! # impl BusInterface for NullBus {
//! #     type Error = core::convert::Infallible;
//! #     fn start(&mut self, _stream: StreamKind) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write_byte(&mut self, _byte: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn stop(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut display = Display::new(NullBus);
//!
//! // Page 8 does not exist on a 64-row panel
//! let result = display.set_position(0, 8);
//! assert!(matches!(result, Err(Error::InvalidPosition { x: 0, page: 8 })));
//! ```

use crate::interface::BusInterface;

/// Errors that can occur when driving the display
///
/// Generic over the bus interface type to preserve the specific error
/// type, so error handling code can match on the underlying hardware
/// failure.
#[derive(Debug)]
pub enum Error<B: BusInterface> {
    /// Bus transaction error
    ///
    /// Wraps the underlying error from the [`BusInterface`]
    /// implementation. The open session is closed before this is returned.
    Bus(B::Error),
    /// Cursor position outside the 128x8 page grid
    InvalidPosition {
        /// Requested column, valid range 0-127
        x: u8,
        /// Requested page, valid range 0-7
        page: u8,
    },
    /// Line degenerate or extending past the panel edge
    InvalidLine {
        /// Start column
        x: u8,
        /// Start pixel row
        y: u8,
        /// Requested length in pixels
        length: u8,
    },
    /// Character not covered by the font table (`' '..='z'`)
    UnsupportedChar(char),
}

impl<B: BusInterface> core::fmt::Display for Error<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(_) => write!(f, "Bus error"),
            Self::InvalidPosition { x, page } => {
                write!(f, "Invalid position: x={x}, page={page}")
            }
            Self::InvalidLine { x, y, length } => {
                write!(f, "Invalid line: x={x}, y={y}, length={length}")
            }
            Self::UnsupportedChar(ch) => write!(f, "Unsupported character: {ch:?}"),
        }
    }
}

impl<B: BusInterface + core::fmt::Debug> core::error::Error for Error<B> {}
