/*!
Provides convenience routines for escaping raw bytes in error messages.

Parsers in this crate work on `&[u8]`, so the input they complain about
isn't necessarily valid UTF-8. These wrappers print whatever they're given
in a readable form.
*/

/// Provides a convenient `Display` implementation for a `u8`.
///
/// The byte is treated as ASCII. Anything else is emitted as a hex escape
/// sequence.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.0 == b' ' {
            return f.write_str(" ");
        }
        if self.0.is_ascii() {
            write!(f, "{}", self.0.escape_ascii())
        } else {
            write!(f, r"\x{:02X}", self.0)
        }
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Provides a convenient `Display` implementation for `&[u8]`.
///
/// Valid UTF-8 is printed with control characters escaped. Invalid UTF-8
/// sequences are emitted as hex escapes, one byte at a time.
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for chunk in self.0.utf8_chunks() {
            for ch in chunk.valid().chars() {
                if ch.is_control() {
                    write!(f, "{}", ch.escape_debug())?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            for &byte in chunk.invalid() {
                write!(f, r"\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(Bytes(b"03/12/2007").to_string(), "03/12/2007");
        assert_eq!(Bytes(b"a\nb").to_string(), r"a\nb");
        assert_eq!(Bytes(b"a\xFFb").to_string(), r"a\xffb");
        assert_eq!(Bytes("Zürich".as_bytes()).to_string(), "Zürich");
    }

    #[test]
    fn byte() {
        assert_eq!(Byte(b'a').to_string(), "a");
        assert_eq!(Byte(b'\t').to_string(), r"\t");
        assert_eq!(Byte(0xFF).to_string(), r"\xFF");
    }
}
