//! Core display operations
//!
//! The [`Display`] struct composes the bus transaction layer into the
//! public drawing surface: initialization, power and contrast control,
//! cursor addressing, text rendering, and axis-aligned line drawing.
//!
//! All drawing goes straight to the controller's RAM; no framebuffer is
//! kept on the host. The RAM is organized as 8 pages of 128 columns, one
//! byte per column driving 8 vertically stacked pixels, which is why every
//! write lands on a page granularity (see [`Display::draw_horizontal`] for
//! the practical consequence).

use embedded_hal::delay::DelayNs;

use crate::command::{
    DISPLAY_OFF, DISPLAY_ON, INIT_SEQUENCE, PAGE_START, SET_COLUMN_RANGE, SET_CONTRAST,
    SET_HIGH_COLUMN, SET_LOW_COLUMN, SET_PAGE_RANGE,
};
use crate::decimal;
use crate::error::Error;
use crate::font;
use crate::interface::{BusInterface, StreamKind};

type DisplayResult<B> = core::result::Result<(), Error<B>>;

/// Panel width in pixels (columns)
pub const WIDTH: u8 = 128;

/// Panel height in pixels
pub const HEIGHT: u8 = 64;

/// Number of 8-pixel-tall pages
pub const PAGES: u8 = 8;

/// Driver for a 128x64 SSD1306 panel
///
/// Owns its [`BusInterface`]; every operation opens the session(s) it
/// needs and closes them before returning, on success and error paths
/// alike.
pub struct Display<B>
where
    B: BusInterface,
{
    /// Bus transaction layer
    bus: B,
}

impl<B> Display<B>
where
    B: BusInterface,
{
    /// Create a new Display over a bus interface
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Destroy the driver and release the bus interface
    pub fn release(self) -> B {
        self.bus
    }

    /// Initialize the controller
    ///
    /// Replays the fixed power-up command sequence
    /// ([`INIT_SEQUENCE`](crate::command::INIT_SEQUENCE)) verbatim, then
    /// opens the addressable window to the full panel: columns 0-127,
    /// pages 0-7. Leaves the display on with contrast 0.
    pub fn init(&mut self) -> DisplayResult<B> {
        log::debug!("initializing SSD1306");
        self.stream(StreamKind::Command, |bus| {
            bus.write(&INIT_SEQUENCE)?;
            bus.write(&[SET_COLUMN_RANGE, 0x00, WIDTH - 1])?;
            bus.write(&[SET_PAGE_RANGE, 0x00, PAGES - 1])
        })
    }

    /// Turn the panel on (wake from sleep)
    pub fn power_on(&mut self) -> DisplayResult<B> {
        self.command(&[DISPLAY_ON])
    }

    /// Turn the panel off (sleep mode, RAM retained)
    pub fn power_off(&mut self) -> DisplayResult<B> {
        self.command(&[DISPLAY_OFF])
    }

    /// Set the contrast (brightness), full 0-255 range
    pub fn set_contrast(&mut self, value: u8) -> DisplayResult<B> {
        self.command(&[SET_CONTRAST, value])
    }

    /// Set the cursor to column `x` (0-127) within page `page` (0-7)
    ///
    /// The controller auto-increments the column after each data byte
    /// written at this position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if `x` or `page` is out of
    /// range.
    pub fn set_position(&mut self, x: u8, page: u8) -> DisplayResult<B> {
        if x >= WIDTH || page >= PAGES {
            return Err(Error::InvalidPosition { x, page });
        }
        self.command(&[
            PAGE_START | page,
            SET_HIGH_COLUMN | (x >> 4),
            SET_LOW_COLUMN | (x & 0x0F),
        ])
    }

    /// Blank the whole panel
    ///
    /// Writes one full frame (128 x 8 = 1024 zero bytes) in a single data
    /// session starting at (0, 0). This is the only operation touching the
    /// full framebuffer.
    pub fn clear(&mut self) -> DisplayResult<B> {
        log::trace!("clearing display");
        self.set_position(0, 0)?;
        self.stream(StreamKind::Data, |bus| {
            for _ in 0..u16::from(WIDTH) * u16::from(PAGES) {
                bus.write_byte(0x00)?;
            }
            Ok(())
        })
    }

    /// Draw a horizontal line of `length` pixels starting at (`x`, `y`)
    ///
    /// The line is one pixel thick, but every byte written drives all 8
    /// rows of its page: the other 7 rows of page `y / 8` are cleared at
    /// the touched columns, erasing any text or graphics sharing that
    /// page. This matches the controller's page-write granularity and is
    /// inherent to the unbuffered design.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLine`] if the line is empty or extends past
    /// column 127.
    pub fn draw_horizontal(&mut self, x: u8, y: u8, length: u8) -> DisplayResult<B> {
        if length == 0 || y >= HEIGHT || x >= WIDTH || u16::from(x) + u16::from(length) > u16::from(WIDTH) {
            return Err(Error::InvalidLine { x, y, length });
        }
        let dot = 1u8 << (y % 8);
        self.set_position(x, y / 8)?;
        self.stream(StreamKind::Data, |bus| {
            for _ in 0..length {
                bus.write_byte(dot)?;
            }
            Ok(())
        })
    }

    /// Draw a vertical line of `length` pixels starting at (`x`, `y`)
    ///
    /// The line spans pages `y / 8` through `(y + length - 1) / 8`. The
    /// first and last pages get partial-byte masks; fully covered pages in
    /// between get `0xFF`. Each page write is its own positioning plus
    /// data session, since the controller does not advance pages down a
    /// column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLine`] if the line is empty or extends past
    /// row 63.
    pub fn draw_vertical(&mut self, x: u8, y: u8, length: u8) -> DisplayResult<B> {
        if length == 0 || x >= WIDTH || y >= HEIGHT || u16::from(y) + u16::from(length) > u16::from(HEIGHT) {
            return Err(Error::InvalidLine { x, y, length });
        }
        let first_page = y / 8;
        let last_page = (y + length - 1) / 8;
        // Bits y%8..7 on the first page, bits 0..7-(y+length)%8 on the
        // last. A span ending exactly on a page boundary yields an end
        // mask of 0xFF on the last covered page.
        let start_mask = 0xFFu8 << (y % 8);
        let end_mask = 0xFFu8 >> ((y + length) % 8);

        if first_page == last_page {
            self.write_page_segment(x, first_page, start_mask & end_mask)
        } else {
            self.write_page_segment(x, first_page, start_mask)?;
            for page in first_page + 1..last_page {
                self.write_page_segment(x, page, 0xFF)?;
            }
            self.write_page_segment(x, last_page, end_mask)
        }
    }

    /// Print one character at the current cursor position
    ///
    /// Emits a leading blank column followed by the 5 glyph columns, so
    /// each character advances the cursor by 6 columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChar`] for characters outside the font
    /// range `' '..='z'`.
    pub fn print_char(&mut self, ch: char) -> DisplayResult<B> {
        let glyph = font::glyph(ch).ok_or(Error::UnsupportedChar(ch))?;
        self.stream(StreamKind::Data, |bus| {
            bus.write_byte(0x00)?;
            bus.write(glyph)
        })
    }

    /// Print a string at the current cursor position
    ///
    /// Characters advance left to right; there is no wrapping at the edge
    /// of the addressable window beyond what the controller's column range
    /// does on its own.
    pub fn print_str(&mut self, s: &str) -> DisplayResult<B> {
        for ch in s.chars() {
            self.print_char(ch)?;
        }
        Ok(())
    }

    /// Print an unsigned integer at the current cursor position
    ///
    /// Renders `value` in decimal without leading zeros ("0" for zero).
    /// The rendered width varies with the magnitude, one to five
    /// characters.
    pub fn print_int(&mut self, value: u16) -> DisplayResult<B> {
        let mut digits = [0u8; decimal::MAX_DIGITS];
        let offset = decimal::to_ascii(value, &mut digits);
        for &byte in &digits[offset..] {
            self.print_char(byte as char)?;
        }
        Ok(())
    }

    /// Run the demonstration sequence
    ///
    /// Frames the panel, prints a caption block, power-cycles the display,
    /// runs a visible countdown, and sweeps the contrast range. Purely a
    /// sequenced caller of the public surface.
    pub fn demo<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<B> {
        log::debug!("running display demo");
        self.clear()?;
        self.draw_horizontal(0, 0, 127)?;
        self.draw_horizontal(0, 63, 127)?;
        self.draw_vertical(0, 0, 64)?;
        self.draw_vertical(127, 0, 64)?;
        self.set_position(25, 1)?;
        self.print_str("DEMONSTRATION")?;
        self.set_position(6, 3)?;
        self.print_str("The display will be")?;
        self.set_position(34, 4)?;
        self.print_str("turned off")?;
        self.set_position(30, 5)?;
        self.print_str("temporarily")?;
        delay.delay_ms(2000);

        self.power_off()?;
        delay.delay_ms(500);
        self.clear()?;
        self.power_on()?;
        delay.delay_ms(500);

        self.set_position(2, 3)?;
        self.print_str("   Counter = ")?;
        for i in (1..=800u16).rev() {
            self.set_position(2 + 13 * 6, 3)?;
            self.print_int(i)?;
        }

        self.clear()?;
        self.set_position(18, 4)?;
        self.print_str("LOWEST CONTRAST")?;
        delay.delay_ms(1000);
        self.set_contrast(0xFF)?;
        self.set_position(14, 4)?;
        self.print_str("HIGHEST CONTRAST")?;
        delay.delay_ms(1000);
        self.set_contrast(0x00)
    }

    /// One positioned single-byte page write, used by the vertical
    /// rasterizer
    fn write_page_segment(&mut self, x: u8, page: u8, byte: u8) -> DisplayResult<B> {
        self.set_position(x, page)?;
        self.stream(StreamKind::Data, |bus| bus.write_byte(byte))
    }

    /// One command session carrying `bytes`
    fn command(&mut self, bytes: &[u8]) -> DisplayResult<B> {
        self.stream(StreamKind::Command, |bus| bus.write(bytes))
    }

    /// Run `body` inside an open/close session bracket
    ///
    /// The session is closed on every path: a failed start still attempts
    /// a stop to release the bus, and a body error still closes the
    /// session before propagating. The body's error wins over a stop
    /// error.
    fn stream<F>(&mut self, kind: StreamKind, body: F) -> DisplayResult<B>
    where
        F: FnOnce(&mut B) -> Result<(), B::Error>,
    {
        if let Err(e) = self.bus.start(kind) {
            let _ = self.bus.stop();
            return Err(Error::Bus(e));
        }
        let result = body(&mut self.bus);
        let stop = self.bus.stop();
        result.and(stop).map_err(Error::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum BusEvent {
        Start(StreamKind),
        Byte(u8),
        Stop,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    /// Recording bus that can be told to fail after N transmitted bytes
    #[derive(Debug, Default)]
    struct MockBus {
        events: Vec<BusEvent>,
        fail_after_bytes: Option<usize>,
        bytes_sent: usize,
    }

    impl BusInterface for MockBus {
        type Error = MockError;

        fn start(&mut self, stream: StreamKind) -> Result<(), Self::Error> {
            self.events.push(BusEvent::Start(stream));
            Ok(())
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
            if let Some(limit) = self.fail_after_bytes {
                if self.bytes_sent >= limit {
                    return Err(MockError);
                }
            }
            self.bytes_sent += 1;
            self.events.push(BusEvent::Byte(byte));
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Self::Error> {
            self.events.push(BusEvent::Stop);
            Ok(())
        }
    }

    fn test_display() -> Display<MockBus> {
        Display::new(MockBus::default())
    }

    /// Split the recorded events into (kind, payload) sessions, asserting
    /// strict open/close bracketing along the way
    fn sessions(events: &[BusEvent]) -> Vec<(StreamKind, Vec<u8>)> {
        let mut out = Vec::new();
        let mut current: Option<(StreamKind, Vec<u8>)> = None;
        for event in events {
            match *event {
                BusEvent::Start(kind) => {
                    assert!(current.is_none(), "start inside an open session");
                    current = Some((kind, Vec::new()));
                }
                BusEvent::Byte(byte) => {
                    current.as_mut().expect("byte outside a session").1.push(byte);
                }
                BusEvent::Stop => out.push(current.take().expect("stop without start")),
            }
        }
        assert!(current.is_none(), "session left open");
        out
    }

    fn position_bytes(x: u8, page: u8) -> Vec<u8> {
        alloc::vec![PAGE_START | page, SET_HIGH_COLUMN | (x >> 4), x & 0x0F]
    }

    #[test]
    fn test_init_emits_sequence_verbatim_then_ranges() {
        let mut display = test_display();
        display.init().unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions.len(), 1);
        let (kind, payload) = &sessions[0];
        assert_eq!(*kind, StreamKind::Command);

        let mut expected: Vec<u8> = INIT_SEQUENCE.to_vec();
        expected.extend_from_slice(&[SET_COLUMN_RANGE, 0x00, 0x7F]);
        expected.extend_from_slice(&[SET_PAGE_RANGE, 0x00, 0x07]);
        assert_eq!(payload, &expected);
    }

    #[test]
    fn test_power_toggles() {
        let mut display = test_display();
        display.power_off().unwrap();
        display.power_on().unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(
            sessions,
            alloc::vec![
                (StreamKind::Command, alloc::vec![0xAE]),
                (StreamKind::Command, alloc::vec![0xAF]),
            ]
        );
    }

    #[test]
    fn test_set_contrast() {
        let mut display = test_display();
        display.set_contrast(0xCD).unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions, alloc::vec![(StreamKind::Command, alloc::vec![0x81, 0xCD])]);
    }

    #[test]
    fn test_set_position_encoding() {
        let mut display = test_display();
        display.set_position(123, 5).unwrap();

        let sessions = sessions(&display.bus.events);
        // 123 = 0x7B: page select 0xB5, high nibble 0x17, low nibble 0x0B
        assert_eq!(
            sessions,
            alloc::vec![(StreamKind::Command, alloc::vec![0xB5, 0x17, 0x0B])]
        );
    }

    #[test]
    fn test_set_position_rejects_out_of_range() {
        let mut display = test_display();
        assert!(matches!(
            display.set_position(128, 0),
            Err(Error::InvalidPosition { x: 128, page: 0 })
        ));
        assert!(matches!(
            display.set_position(0, 8),
            Err(Error::InvalidPosition { x: 0, page: 8 })
        ));
        // Validation happens before any bus traffic.
        assert!(display.bus.events.is_empty());
    }

    #[test]
    fn test_clear_writes_one_full_frame() {
        let mut display = test_display();
        display.clear().unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0], (StreamKind::Command, position_bytes(0, 0)));

        let (kind, payload) = &sessions[1];
        assert_eq!(*kind, StreamKind::Data);
        assert_eq!(payload.len(), 1024);
        assert!(payload.iter().all(|&byte| byte == 0x00));
    }

    #[test]
    fn test_draw_horizontal_writes_dot_bytes() {
        let mut display = test_display();
        display.draw_horizontal(10, 12, 20).unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions.len(), 2);
        // y = 12 lands in page 1 with bit 4 set
        assert_eq!(sessions[0], (StreamKind::Command, position_bytes(10, 1)));

        let (kind, payload) = &sessions[1];
        assert_eq!(*kind, StreamKind::Data);
        assert_eq!(payload.len(), 20);
        assert!(payload.iter().all(|&byte| byte == 0x10));
    }

    #[test]
    fn test_draw_horizontal_full_width_top_row() {
        let mut display = test_display();
        display.draw_horizontal(0, 0, 128).unwrap();

        let sessions = sessions(&display.bus.events);
        let (_, payload) = &sessions[1];
        assert_eq!(payload.len(), 128);
        assert!(payload.iter().all(|&byte| byte == 0x01));
    }

    #[test]
    fn test_draw_horizontal_rejects_bad_extents() {
        let mut display = test_display();
        assert!(matches!(
            display.draw_horizontal(0, 0, 0),
            Err(Error::InvalidLine { length: 0, .. })
        ));
        assert!(matches!(
            display.draw_horizontal(120, 0, 20),
            Err(Error::InvalidLine { x: 120, length: 20, .. })
        ));
        assert!(matches!(
            display.draw_horizontal(0, 64, 10),
            Err(Error::InvalidLine { y: 64, .. })
        ));
        assert!(display.bus.events.is_empty());
    }

    #[test]
    fn test_draw_vertical_single_page_masks() {
        let mut display = test_display();
        // y=1, len=4 stays in page 0: (0xFF << 1) & (0xFF >> 5) = 0x06
        display.draw_vertical(5, 1, 4).unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0], (StreamKind::Command, position_bytes(5, 0)));
        assert_eq!(sessions[1], (StreamKind::Data, alloc::vec![0x06]));
    }

    #[test]
    fn test_draw_vertical_bottom_of_page_masks() {
        let mut display = test_display();
        // y=6, len=2 fills rows 6-7: (0xFF << 6) & (0xFF >> 0) = 0xC0
        display.draw_vertical(0, 6, 2).unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions[1], (StreamKind::Data, alloc::vec![0xC0]));
    }

    #[test]
    fn test_draw_vertical_spanning_three_pages() {
        let mut display = test_display();
        // y=4, len=13 spans pages 0-2: 0xF0, 0xFF, then 0xFF >> (17 % 8)
        display.draw_vertical(64, 4, 13).unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions.len(), 6);
        assert_eq!(sessions[0], (StreamKind::Command, position_bytes(64, 0)));
        assert_eq!(sessions[1], (StreamKind::Data, alloc::vec![0xF0]));
        assert_eq!(sessions[2], (StreamKind::Command, position_bytes(64, 1)));
        assert_eq!(sessions[3], (StreamKind::Data, alloc::vec![0xFF]));
        assert_eq!(sessions[4], (StreamKind::Command, position_bytes(64, 2)));
        assert_eq!(sessions[5], (StreamKind::Data, alloc::vec![0x7F]));
    }

    #[test]
    fn test_draw_vertical_page_boundary_end_does_not_spill() {
        let mut display = test_display();
        // Ends exactly on a page boundary: one write, mask 0xFF.
        display.draw_vertical(0, 0, 8).unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[1], (StreamKind::Data, alloc::vec![0xFF]));
    }

    #[test]
    fn test_draw_vertical_full_height() {
        let mut display = test_display();
        display.draw_vertical(127, 0, 64).unwrap();

        let sessions = sessions(&display.bus.events);
        // 8 pages, each its own position + data bracket
        assert_eq!(sessions.len(), 16);
        for page in 0..8u8 {
            assert_eq!(
                sessions[2 * page as usize],
                (StreamKind::Command, position_bytes(127, page))
            );
            assert_eq!(
                sessions[2 * page as usize + 1],
                (StreamKind::Data, alloc::vec![0xFF])
            );
        }
    }

    #[test]
    fn test_draw_vertical_page_write_count_property() {
        // ceil((y%8 + len) / 8) page writes for every valid extent.
        for y in 0..HEIGHT {
            for length in 1..=(HEIGHT - y) {
                let mut display = test_display();
                display.draw_vertical(0, y, length).unwrap();

                let sessions = sessions(&display.bus.events);
                let data_sessions = sessions
                    .iter()
                    .filter(|(kind, _)| *kind == StreamKind::Data)
                    .count();
                let expected = (usize::from(y % 8) + usize::from(length)).div_ceil(8);
                assert_eq!(data_sessions, expected, "y={y} length={length}");
            }
        }
    }

    #[test]
    fn test_draw_vertical_mask_property() {
        // First and last data bytes follow the shift-mask formulas; all
        // intermediate bytes are 0xFF.
        for y in 0..HEIGHT {
            for length in 1..=(HEIGHT - y) {
                let mut display = test_display();
                display.draw_vertical(0, y, length).unwrap();

                let bytes: Vec<u8> = sessions(&display.bus.events)
                    .iter()
                    .filter(|(kind, _)| *kind == StreamKind::Data)
                    .map(|(_, payload)| payload[0])
                    .collect();

                let start_mask = 0xFFu8 << (y % 8);
                let end_mask = 0xFFu8 >> ((y + length) % 8);
                if bytes.len() == 1 {
                    assert_eq!(bytes[0], start_mask & end_mask, "y={y} length={length}");
                } else {
                    assert_eq!(bytes[0], start_mask, "y={y} length={length}");
                    assert_eq!(*bytes.last().unwrap(), end_mask, "y={y} length={length}");
                    assert!(
                        bytes[1..bytes.len() - 1].iter().all(|&byte| byte == 0xFF),
                        "y={y} length={length}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_draw_vertical_rejects_bad_extents() {
        let mut display = test_display();
        assert!(matches!(
            display.draw_vertical(0, 0, 0),
            Err(Error::InvalidLine { length: 0, .. })
        ));
        assert!(matches!(
            display.draw_vertical(0, 60, 8),
            Err(Error::InvalidLine { y: 60, length: 8, .. })
        ));
        assert!(matches!(
            display.draw_vertical(128, 0, 8),
            Err(Error::InvalidLine { x: 128, .. })
        ));
        assert!(display.bus.events.is_empty());
    }

    #[test]
    fn test_print_char_emits_blank_then_glyph() {
        let mut display = test_display();
        display.print_char('A').unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(
            sessions,
            alloc::vec![(
                StreamKind::Data,
                alloc::vec![0x00, 0x7C, 0x12, 0x11, 0x12, 0x7C]
            )]
        );
    }

    #[test]
    fn test_print_char_rejects_unsupported() {
        let mut display = test_display();
        assert!(matches!(
            display.print_char('{'),
            Err(Error::UnsupportedChar('{'))
        ));
        assert!(matches!(
            display.print_char('\n'),
            Err(Error::UnsupportedChar('\n'))
        ));
        assert!(display.bus.events.is_empty());
    }

    #[test]
    fn test_print_str_one_session_per_char() {
        let mut display = test_display();
        display.print_str("Hi").unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].1.len(), 6);
        assert_eq!(sessions[1].1.len(), 6);
        // 'H' then 'i'
        assert_eq!(sessions[0].1[1..], [0x7F, 0x08, 0x08, 0x08, 0x7F]);
        assert_eq!(sessions[1].1[1..], [0x00, 0x44, 0x7D, 0x40, 0x00]);
    }

    #[test]
    fn test_print_int_zero_renders_single_zero() {
        let mut display = test_display();
        display.print_int(0).unwrap();

        let sessions = sessions(&display.bus.events);
        assert_eq!(sessions.len(), 1);
        // Glyph for '0'
        assert_eq!(sessions[0].1[1..], [0x3E, 0x51, 0x49, 0x45, 0x3E]);
    }

    #[test]
    fn test_print_int_blanks_leading_positions() {
        let mut display = test_display();
        display.print_int(7).unwrap();
        // One character, no leading spaces rendered
        assert_eq!(sessions(&display.bus.events).len(), 1);

        let mut display = test_display();
        display.print_int(12_345).unwrap();
        assert_eq!(sessions(&display.bus.events).len(), 5);

        let mut display = test_display();
        display.print_int(100).unwrap();
        assert_eq!(sessions(&display.bus.events).len(), 3);
    }

    #[test]
    fn test_failed_write_still_closes_session() {
        let mut display = test_display();
        display.bus.fail_after_bytes = Some(3);
        assert!(matches!(display.clear(), Err(Error::Bus(MockError))));

        // The set_position bytes went through; the data session opened,
        // failed on its first byte, and was still closed.
        let events = &display.bus.events;
        assert_eq!(events.last(), Some(&BusEvent::Stop));
        let starts = events
            .iter()
            .filter(|e| matches!(e, BusEvent::Start(_)))
            .count();
        let stops = events.iter().filter(|e| **e == BusEvent::Stop).count();
        assert_eq!(starts, stops);
    }

    #[test]
    fn test_failed_print_stops_mid_string() {
        let mut display = test_display();
        display.bus.fail_after_bytes = Some(8);
        assert!(matches!(display.print_str("Hi"), Err(Error::Bus(MockError))));

        let events = &display.bus.events;
        let starts = events
            .iter()
            .filter(|e| matches!(e, BusEvent::Start(_)))
            .count();
        let stops = events.iter().filter(|e| **e == BusEvent::Stop).count();
        assert_eq!(starts, stops);
        assert_eq!(events.last(), Some(&BusEvent::Stop));
    }

    #[test]
    fn test_every_operation_brackets_sessions() {
        let mut display = test_display();
        display.init().unwrap();
        display.clear().unwrap();
        display.set_contrast(0x7F).unwrap();
        display.set_position(0, 0).unwrap();
        display.print_str("ok").unwrap();
        display.draw_horizontal(0, 10, 64).unwrap();
        display.draw_vertical(32, 3, 40).unwrap();
        display.power_off().unwrap();
        display.power_on().unwrap();

        // sessions() panics on any unbracketed or nested session.
        let _ = sessions(&display.bus.events);
    }
}
