//! Bus transaction primitives and the I2C binding
//!
//! This module provides the [`BusInterface`] trait, the driver's seam for
//! one logical bus session (`start` / `write_byte` / `stop`), and the
//! [`I2cInterface`] struct binding it to any [`embedded_hal::i2c::I2c`]
//! implementation.
//!
//! ## Session model
//!
//! The SSD1306 frames every addressed write with a control byte that tells
//! the controller whether the following bytes are commands or pixel data.
//! A session is the span between one `start` and its matching `stop`; any
//! number of bytes may be written in between. Every step returns a
//! `Result`, so an acknowledgment failure on the wire is observable at the
//! exact step that caused it.
//!
//! Exclusive access for the duration of a session is expressed through
//! ownership: the session holds `&mut` on the interface, so no other bus
//! traffic can be interleaved from safe code. Integrations that share the
//! bus with interrupt handlers must additionally bracket whole operations
//! in a critical section of their platform; the driver itself takes no
//! platform dependency for this.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_i2c::{BusInterface, I2cInterface, StreamKind};
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
//! let mut interface = I2cInterface::new(MockI2c);
//!
//! // One command session: display on
//! let _ = interface.start(StreamKind::Command);
//! let _ = interface.write_byte(0xAF);
//! let _ = interface.stop();
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Default 7-bit I2C address of SSD1306 modules (0x3C)
///
/// Modules with the SA0 pad pulled high respond on 0x3D instead; see
/// [`I2cInterface::set_address`].
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x3C;

/// Framing selector for an addressed write session
///
/// The controller interprets every byte of a session according to the
/// control byte transmitted right after the address phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamKind {
    /// Subsequent bytes are controller commands
    Command,
    /// Subsequent bytes are pixel data written to display RAM
    Data,
}

impl StreamKind {
    /// Control byte transmitted right after the address phase
    pub fn control_byte(self) -> u8 {
        match self {
            Self::Command => 0x00,
            Self::Data => 0x40,
        }
    }
}

/// Trait for the logical bus transactions the driver is built on
///
/// An implementation carries one session at a time. The driver guarantees
/// every `start` is paired with exactly one `stop` on all code paths,
/// including error paths; implementations are expected to report pairing
/// violations rather than desynchronize the controller.
pub trait BusInterface {
    /// Error type for bus operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Open a session: start condition, device address with write intent,
    /// then the control byte for `stream`
    ///
    /// # Errors
    ///
    /// Returns an error if any step of the handshake is not acknowledged,
    /// or if a session is already open.
    fn start(&mut self, stream: StreamKind) -> Result<(), Self::Error>;

    /// Transmit one byte within the open session
    ///
    /// # Errors
    ///
    /// Returns an error on negative acknowledgment or if no session is
    /// open.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Transmit a run of bytes within the open session
    ///
    /// # Errors
    ///
    /// Returns the first byte's error, leaving the session open.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Close the session, releasing the bus with a stop condition
    ///
    /// # Errors
    ///
    /// Returns an error if pending bytes could not be transmitted or if no
    /// session is open. The session is considered closed either way.
    fn stop(&mut self) -> Result<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over the HAL's I2C error type.
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<E> {
    /// I2C transaction error
    ///
    /// Acknowledgment failures arrive here as the HAL's
    /// [`NoAcknowledge`](embedded_hal::i2c::ErrorKind::NoAcknowledge) kind.
    I2c(E),
    /// `start` was called while a session was already open
    SessionAlreadyOpen,
    /// `write_byte` or `stop` was called with no open session
    SessionNotOpen,
}

impl<E: Debug> core::fmt::Display for InterfaceError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "I2C error: {e:?}"),
            Self::SessionAlreadyOpen => write!(f, "bus session already open"),
            Self::SessionNotOpen => write!(f, "no open bus session"),
        }
    }
}

impl<E: Debug> core::error::Error for InterfaceError<E> {}

/// Payload bytes carried per I2C write transaction
const CHUNK_SIZE: usize = 16;

/// I2C binding for the SSD1306
///
/// Implements [`BusInterface`] for embedded-hal v1.0 I2C buses. Session
/// bytes are streamed in chunks of 16, each chunk sent as its own I2C
/// write transaction prefixed with the session's control byte. The
/// controller's address pointer persists across write transactions, so a
/// chunked stream lands in RAM exactly like a single long one; the address
/// phase of a session is therefore (re-)issued at each flush, and
/// acknowledgment failures surface from `write_byte` or `stop` rather than
/// `start`.
///
/// ## Example
///
/// ```rust,no_run
/// use ssd1306_i2c::{Display, I2cInterface};
/// # use core::convert::Infallible;
/// # struct MockI2c;
/// # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
/// # impl embedded_hal::i2c::I2c for MockI2c {
/// #     fn transaction(
/// #         &mut self,
/// #         _address: u8,
/// #         _operations: &mut [embedded_hal::i2c::Operation<'_>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// let mut interface = I2cInterface::new(MockI2c);
/// interface.set_address(0x3D); // SA0 high module
///
/// let _display = Display::new(interface);
/// ```
pub struct I2cInterface<I2C> {
    /// Underlying I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: SevenBitAddress,
    /// Control byte at index 0, then up to CHUNK_SIZE buffered payload bytes
    buffer: [u8; CHUNK_SIZE + 1],
    /// Payload bytes currently buffered
    pending: usize,
    /// Whether a session is open
    open: bool,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create a new interface on the default address (0x3C)
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_ADDRESS,
            buffer: [0; CHUNK_SIZE + 1],
            pending: 0,
            open: false,
        }
    }

    /// Set the 7-bit device address
    ///
    /// Default is 0x3C; modules with SA0 pulled high use 0x3D.
    pub fn set_address(&mut self, address: SevenBitAddress) -> &mut Self {
        self.address = address;
        self
    }

    /// Get the configured 7-bit device address
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Destroy the interface and release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Send the buffered chunk as one control-byte-prefixed transaction
    fn flush(&mut self) -> Result<(), InterfaceError<I2C::Error>> {
        let end = 1 + self.pending;
        self.pending = 0;
        self.i2c
            .write(self.address, &self.buffer[..end])
            .map_err(InterfaceError::I2c)
    }
}

impl<I2C> BusInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = InterfaceError<I2C::Error>;

    fn start(&mut self, stream: StreamKind) -> Result<(), Self::Error> {
        if self.open {
            return Err(InterfaceError::SessionAlreadyOpen);
        }
        self.buffer[0] = stream.control_byte();
        self.pending = 0;
        self.open = true;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if !self.open {
            return Err(InterfaceError::SessionNotOpen);
        }
        self.buffer[1 + self.pending] = byte;
        self.pending += 1;
        if self.pending == CHUNK_SIZE {
            self.flush()?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        if !self.open {
            return Err(InterfaceError::SessionNotOpen);
        }
        let result = if self.pending > 0 { self.flush() } else { Ok(()) };
        self.open = false;
        result
    }
}
