//! Output buffer and low-level JSON token writing.
//!
//! [`Writer`] appends bytes either into a caller-supplied fixed buffer or
//! into an owned growable one. When a fixed buffer runs out the written
//! prefix is copied into an owned buffer and writing continues there, so
//! already-written bytes are never lost.
//!
//! Besides plain appends the writer exposes a mark/restore pair. The label
//! encoder uses it to render a label into the tail of the document, copy the
//! bytes out, and rewind to where the document left off.

use crate::Result;
use std::borrow::Cow;
use std::fmt::Write as _;

const INITIAL_CAPACITY: usize = 256;
const HEX: &[u8; 16] = b"0123456789abcdef";

/// Doubles at or above this magnitude are written in exponent notation.
/// Every double this large is a whole number.
const EXPONENT_NOTATION_MIN: f64 = 1e16;

const POW10: [u64; 16] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
];

enum Storage<'b> {
    Fixed { buf: &'b mut [u8], len: usize },
    Growable(Vec<u8>),
}

/// Append-only byte buffer with JSON string escaping.
pub struct Writer<'b> {
    storage: Storage<'b>,
    ensure_ascii: bool,
    escape_html: bool,
}

impl Writer<'static> {
    /// Creates a writer over an owned, growable buffer.
    pub fn growable() -> Self {
        Writer {
            storage: Storage::Growable(Vec::with_capacity(INITIAL_CAPACITY)),
            ensure_ascii: true,
            escape_html: false,
        }
    }
}

impl<'b> Writer<'b> {
    /// Creates a writer that fills `buf` first and spills to the heap if needed.
    pub fn fixed(buf: &'b mut [u8]) -> Self {
        Writer {
            storage: Storage::Fixed { buf, len: 0 },
            ensure_ascii: true,
            escape_html: false,
        }
    }

    /// Configures string escaping.
    pub fn with_escaping(mut self, ensure_ascii: bool, escape_html: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self.escape_html = escape_html;
        self
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Fixed { len, .. } => *len,
            Storage::Growable(vec) => vec.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` once a fixed buffer has been outgrown.
    pub fn spilled(&self) -> bool {
        matches!(self.storage, Storage::Growable(_))
    }

    fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Fixed { buf, len } => &buf[..*len],
            Storage::Growable(vec) => vec,
        }
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        match &mut self.storage {
            Storage::Fixed { buf, len } => {
                if *len + additional <= buf.len() {
                    return Ok(());
                }
                let mut vec = Vec::new();
                vec.try_reserve((buf.len() * 2).max(*len + additional).max(INITIAL_CAPACITY))?;
                vec.extend_from_slice(&buf[..*len]);
                tracing::trace!(bytes = *len, "output outgrew caller buffer");
                self.storage = Storage::Growable(vec);
            }
            Storage::Growable(vec) => vec.try_reserve(additional)?,
        }
        Ok(())
    }

    /// Appends raw bytes.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        match &mut self.storage {
            Storage::Fixed { buf, len } => {
                buf[*len..*len + bytes.len()].copy_from_slice(bytes);
                *len += bytes.len();
            }
            Storage::Growable(vec) => vec.extend_from_slice(bytes),
        }
        Ok(())
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.write_raw(&[byte])
    }

    /// Current write position.
    pub fn mark(&self) -> usize {
        self.len()
    }

    /// Bytes written since `mark`.
    pub fn since(&self, mark: usize) -> &[u8] {
        let bytes = self.as_bytes();
        &bytes[mark.min(bytes.len())..]
    }

    /// Discards everything written after `mark`.
    pub fn restore(&mut self, mark: usize) {
        match &mut self.storage {
            Storage::Fixed { len, .. } => *len = (*len).min(mark),
            Storage::Growable(vec) => vec.truncate(mark),
        }
    }

    pub fn write_null(&mut self) -> Result<()> {
        self.write_raw(b"null")
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        if value {
            self.write_raw(b"true")
        } else {
            self.write_raw(b"false")
        }
    }

    /// Writes a signed integer in decimal.
    pub fn write_long(&mut self, value: i64) -> Result<()> {
        let mut digits = [0u8; 20];
        let mut pos = digits.len();
        let mut rest = value.unsigned_abs();
        loop {
            pos -= 1;
            digits[pos] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        if value < 0 {
            self.push(b'-')?;
        }
        self.write_raw(&digits[pos..])
    }

    /// Writes a finite double with at most `precision` fractional digits.
    pub fn write_double(&mut self, value: f64, precision: usize) -> Result<()> {
        let text = format_double(value, precision);
        self.write_raw(text.as_bytes())
    }

    /// Writes `s` as a quoted, escaped JSON string.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.reserve(s.len() + 2)?;
        self.push(b'"')?;
        let bytes = s.as_bytes();
        let mut start = 0;
        for (i, ch) in s.char_indices() {
            let named: Option<&[u8]> = match ch {
                '"' => Some(b"\\\""),
                '\\' => Some(b"\\\\"),
                '\u{08}' => Some(b"\\b"),
                '\u{0C}' => Some(b"\\f"),
                '\n' => Some(b"\\n"),
                '\r' => Some(b"\\r"),
                '\t' => Some(b"\\t"),
                _ => None,
            };
            let escape_unicode = ch < '\u{20}'
                || (self.escape_html && matches!(ch, '<' | '>' | '&'))
                || (self.ensure_ascii && !ch.is_ascii());
            if named.is_none() && !escape_unicode {
                continue;
            }
            if start < i {
                self.write_raw(&bytes[start..i])?;
            }
            match named {
                Some(seq) => self.write_raw(seq)?,
                None => {
                    let mut units = [0u16; 2];
                    for unit in ch.encode_utf16(&mut units) {
                        self.write_unicode_escape(*unit)?;
                    }
                }
            }
            start = i + ch.len_utf8();
        }
        if start < bytes.len() {
            self.write_raw(&bytes[start..])?;
        }
        self.push(b'"')
    }

    fn write_unicode_escape(&mut self, unit: u16) -> Result<()> {
        self.write_raw(&[
            b'\\',
            b'u',
            HEX[(unit >> 12) as usize & 0xF],
            HEX[(unit >> 8) as usize & 0xF],
            HEX[(unit >> 4) as usize & 0xF],
            HEX[unit as usize & 0xF],
        ])
    }

    /// Finishes writing; borrowed when the document fit the caller buffer.
    pub fn into_output(self) -> Cow<'b, [u8]> {
        match self.storage {
            Storage::Fixed { buf, len } => {
                let buf: &'b [u8] = buf;
                Cow::Borrowed(&buf[..len])
            }
            Storage::Growable(vec) => Cow::Owned(vec),
        }
    }
}

/// Renders a finite double the way the encoder writes it.
///
/// Fractions are rounded half-to-even at `precision` digits and trailing
/// zeros are stripped; whole values keep a `.0` unless `precision` is 0.
/// Magnitudes of `1e16` and above, which are always whole, use exponent
/// notation with the shortest mantissa that reads back exactly.
///
/// # Examples
///
/// ```rust
/// use objson::format_double;
///
/// assert_eq!(format_double(1.23456, 3), "1.235");
/// assert_eq!(format_double(2.0, 10), "2.0");
/// assert_eq!(format_double(2.5, 0), "2");
/// assert_eq!(format_double(1.5e10, 10), "15000000000.0");
/// assert_eq!(format_double(1.5e20, 10), "1.5e+20");
/// ```
pub fn format_double(value: f64, precision: usize) -> String {
    let precision = precision.min(POW10.len() - 1);
    let negative = value < 0.0;
    let magnitude = value.abs();
    let mut out = String::with_capacity(24);

    if magnitude >= EXPONENT_NOTATION_MIN {
        // Shortest round-trip mantissa; there are no fractional digits to round.
        let formatted = format!("{:e}", magnitude);
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        if negative {
            out.push('-');
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(out, "{}e{}{:02}", mantissa, sign, exponent.unsigned_abs());
        return out;
    }

    let mut whole = magnitude.trunc() as u64;
    let pow = POW10[precision];
    let scaled = (magnitude - whole as f64) * pow as f64;
    let mut frac = scaled as u64;
    let diff = scaled - frac as f64;

    if precision == 0 {
        if diff > 0.5 || (diff == 0.5 && whole & 1 == 1) {
            whole += 1;
        }
        if negative && whole != 0 {
            out.push('-');
        }
        let _ = write!(out, "{}", whole);
        return out;
    }

    if diff > 0.5 || (diff == 0.5 && frac & 1 == 1) {
        frac += 1;
        if frac >= pow {
            frac = 0;
            whole += 1;
        }
    }
    if negative && (whole != 0 || frac != 0) {
        out.push('-');
    }
    if frac == 0 {
        let _ = write!(out, "{}.0", whole);
    } else {
        let digits = format!("{:0width$}", frac, width = precision);
        let _ = write!(out, "{}.{}", whole, digits.trim_end_matches('0'));
    }
    out
}
