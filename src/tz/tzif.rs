/*!
A decoder for the TZif binary format described by RFC 8536.

Only what's needed to compute offsets is kept: the transition times, the
UTC offset of each local time type and the POSIX footer. Abbreviations,
leap second records and the standard/wall and UT/local indicators are
skipped over.
*/

use crate::{
    error::{tz::tzif::Error as E, Error, ErrorContext},
    tz::{
        posix::PosixTimeZone,
        transitions::{self, Transition},
        AmbiguousOffset, Offset,
    },
    Instant,
};

macro_rules! err {
    ($($tt:tt)*) => {{
        E::Message(format!($($tt)*).into_boxed_str())
    }}
}

/// Decoded TZif data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Tzif {
    /// The offset in effect before the first transition. This is local
    /// time type `0`.
    initial: Offset,
    /// Every transition that actually changes the (truncated) offset.
    transitions: Vec<Transition>,
    /// The rule to use after the last transition.
    footer: Option<PosixTimeZone>,
}

impl Tzif {
    /// Parses the given data as a TZif formatted file.
    ///
    /// The name is only used for error messages.
    pub(crate) fn parse(name: &str, bytes: &[u8]) -> Result<Tzif, Error> {
        Tzif::parse_impl(bytes)
            .with_context(|| E::Invalid { name: name.into() })
    }

    fn parse_impl(bytes: &[u8]) -> Result<Tzif, Error> {
        let (header32, rest) = Header::parse(4, bytes)?;
        if header32.version == 0 {
            let (tzif, _) = Tzif::parse_block(&header32, rest)?;
            return Ok(tzif);
        }
        let (_, rest) = split_at(rest, header32.data_block_len()?, "v1 data block")?;
        let (header64, rest) = Header::parse(8, rest)?;
        let (mut tzif, rest) = Tzif::parse_block(&header64, rest)?;
        tzif.footer = parse_footer(rest)?;
        Ok(tzif)
    }

    fn parse_block<'b>(
        header: &Header,
        bytes: &'b [u8],
    ) -> Result<(Tzif, &'b [u8]), Error> {
        let (times, rest) =
            split_at(bytes, header.transition_times_len()?, "transition times")?;
        let (type_indices, rest) =
            split_at(rest, header.timecnt, "transition types")?;
        let (types, rest) =
            split_at(rest, header.local_time_types_len()?, "local time types")?;
        let (_, rest) = split_at(rest, header.rest_len()?, "trailing records")?;

        let offsets = types
            .chunks_exact(6)
            .map(|chunk| {
                let seconds = from_be_bytes_i32(&chunk[..4]);
                Offset::from_seconds_truncated(seconds).with_context(|| {
                    err!("found local time type with invalid offset")
                })
            })
            .collect::<Result<Vec<Offset>, Error>>()?;
        // The header guarantees at least one type.
        let initial = offsets[0];

        let mut transitions = Vec::with_capacity(header.timecnt);
        let mut previous = initial;
        let mut last_at = i64::MIN;
        let chunks = times.chunks_exact(header.time_size);
        for (chunk, &index) in chunks.zip(type_indices) {
            let at = if header.time_size == 4 {
                i64::from(from_be_bytes_i32(chunk))
            } else {
                from_be_bytes_i64(chunk)
            };
            if at < last_at {
                return Err(Error::from(err!(
                    "found transition at `{at}` that comes before the \
                     previous transition at `{last_at}`",
                )));
            }
            last_at = at;
            let Some(&after) = offsets.get(usize::from(index)) else {
                return Err(Error::from(err!(
                    "found transition with local time type index \
                     `{index}`, but there are only {} types",
                    offsets.len(),
                )));
            };
            if after == previous {
                continue;
            }
            let clamped = at.clamp(
                Instant::MIN.epoch_second(),
                Instant::MAX.epoch_second(),
            );
            if clamped != at {
                warn!(
                    "found TZif transition at `{at}` outside of the \
                     supported range, clamping to `{clamped}`",
                );
            }
            transitions.push(Transition {
                at: clamped,
                before: previous,
                after,
            });
            previous = after;
        }
        transitions.shrink_to_fit();
        Ok((Tzif { initial, transitions, footer: None }, rest))
    }

    /// Returns the fixed offset of this data when it has no transitions
    /// and no footer with daylight saving time.
    pub(crate) fn to_fixed_offset(&self) -> Option<Offset> {
        if !self.transitions.is_empty() {
            return None;
        }
        match self.footer {
            None => Some(self.initial),
            Some(ref posix) => posix.to_fixed_offset(),
        }
    }

    /// Returns the offset in effect at the given Unix timestamp.
    pub(crate) fn to_offset(&self, timestamp: i64) -> Offset {
        if let Some(ref posix) = self.footer {
            let after_last =
                self.transitions.last().map_or(true, |t| timestamp >= t.at);
            if after_last {
                return posix.to_offset(timestamp);
            }
        }
        transitions::offset_at(&self.transitions, self.initial, timestamp)
    }

    /// Returns the possibly ambiguous offset of a local datetime, given as
    /// seconds since the Unix epoch as if it were in UTC.
    pub(crate) fn to_ambiguous_offset(&self, local: i64) -> AmbiguousOffset {
        if let Some(ref posix) = self.footer {
            let after_last = self
                .transitions
                .last()
                .map_or(true, |t| local >= t.wall_end());
            if after_last {
                return posix.to_ambiguous_offset(local);
            }
        }
        transitions::ambiguous_offset_at(
            &self.transitions,
            self.initial,
            local,
        )
    }
}

/// The header of a TZif data block.
#[derive(Debug)]
struct Header {
    /// Either 4 (the v1 block) or 8 (the v2+ block).
    time_size: usize,
    version: u8,
    isutcnt: usize,
    isstdcnt: usize,
    leapcnt: usize,
    timecnt: usize,
    typecnt: usize,
    charcnt: usize,
}

impl Header {
    /// Parse the header record from the given bytes.
    ///
    /// Upon success, return the header and all bytes after the header.
    fn parse(
        time_size: usize,
        bytes: &[u8],
    ) -> Result<(Header, &[u8]), Error> {
        if bytes.len() < 44 {
            return Err(Error::from(err!(
                "expected at least 44 bytes for TZif header, but found {}",
                bytes.len(),
            )));
        }
        let (magic, rest) = bytes.split_at(4);
        if magic != b"TZif" {
            return Err(Error::from(err!(
                "expected TZif magic bytes at beginning of header"
            )));
        }
        let (version, rest) = rest.split_at(1);
        let (_reserved, rest) = rest.split_at(15);
        let (counts, rest) = rest.split_at(24);
        let mut it = counts.chunks_exact(4).map(from_be_bytes_u32_to_usize);
        let mut next = || it.next().unwrap_or(Ok(0));
        let header = Header {
            time_size,
            version: version[0],
            isutcnt: next()?,
            isstdcnt: next()?,
            leapcnt: next()?,
            timecnt: next()?,
            typecnt: next()?,
            charcnt: next()?,
        };
        if header.typecnt < 1 {
            return Err(Error::from(err!(
                "expected at least one local time type in TZif header"
            )));
        }
        Ok((header, rest))
    }

    fn data_block_len(&self) -> Result<usize, Error> {
        self.transition_times_len()?
            .checked_add(self.timecnt)
            .and_then(|n| n.checked_add(self.local_time_types_len().ok()?))
            .and_then(|n| n.checked_add(self.rest_len().ok()?))
            .ok_or_else(|| Error::from(err!("TZif data block length overflows")))
    }

    fn transition_times_len(&self) -> Result<usize, Error> {
        self.timecnt.checked_mul(self.time_size).ok_or_else(|| {
            Error::from(err!("TZif transition count is too big"))
        })
    }

    fn local_time_types_len(&self) -> Result<usize, Error> {
        self.typecnt.checked_mul(6).ok_or_else(|| {
            Error::from(err!("TZif local time type count is too big"))
        })
    }

    /// The length of everything after the local time types: designations,
    /// leap second records and the two indicator arrays.
    fn rest_len(&self) -> Result<usize, Error> {
        self.leapcnt
            .checked_mul(self.time_size + 4)
            .and_then(|n| n.checked_add(self.charcnt))
            .and_then(|n| n.checked_add(self.isstdcnt))
            .and_then(|n| n.checked_add(self.isutcnt))
            .ok_or_else(|| Error::from(err!("TZif record counts are too big")))
    }
}

/// Parses the `\nTZ\n` footer following the v2+ data block.
fn parse_footer(bytes: &[u8]) -> Result<Option<PosixTimeZone>, Error> {
    let Some((&b'\n', bytes)) = bytes.split_first() else {
        return Err(Error::from(err!(
            "expected newline at beginning of TZif footer"
        )));
    };
    // Only scan up to 1KB for the terminator.
    let toscan = &bytes[..bytes.len().min(1024)];
    let Some(end) = toscan.iter().position(|&b| b == b'\n') else {
        return Err(Error::from(err!(
            "could not find terminating newline of TZif footer"
        )));
    };
    let posix = &bytes[..end];
    if posix.is_empty() {
        return Ok(None);
    }
    PosixTimeZone::parse_bytes(posix).map(Some)
}

fn split_at<'b>(
    bytes: &'b [u8],
    at: usize,
    what: &'static str,
) -> Result<(&'b [u8], &'b [u8]), Error> {
    if at > bytes.len() {
        return Err(Error::from(err!(
            "expected {at} bytes for {what}, but found only {}",
            bytes.len(),
        )));
    }
    Ok(bytes.split_at(at))
}

fn from_be_bytes_u32_to_usize(bytes: &[u8]) -> Result<usize, Error> {
    let mut buf = [0; 4];
    buf.copy_from_slice(bytes);
    usize::try_from(u32::from_be_bytes(buf))
        .map_err(|_| Error::from(err!("TZif count does not fit in usize")))
}

/// # Panics
///
/// When `bytes.len() != 4`.
fn from_be_bytes_i32(bytes: &[u8]) -> i32 {
    let mut buf = [0; 4];
    buf.copy_from_slice(bytes);
    i32::from_be_bytes(buf)
}

/// # Panics
///
/// When `bytes.len() != 8`.
fn from_be_bytes_i64(bytes: &[u8]) -> i64 {
    let mut buf = [0; 8];
    buf.copy_from_slice(bytes);
    i64::from_be_bytes(buf)
}

/// Builds TZif v2 data from local time type offsets, transitions (as pairs
/// of a Unix timestamp and a type index) and a POSIX footer.
#[cfg(test)]
pub(crate) fn build_v2(
    offsets: &[i32],
    transitions: &[(i64, u8)],
    footer: &str,
) -> Vec<u8> {
    fn header(out: &mut Vec<u8>, timecnt: usize, typecnt: usize) {
        out.extend_from_slice(b"TZif2");
        out.extend_from_slice(&[0; 15]);
        for count in [0, 0, 0, timecnt, typecnt, 1] {
            out.extend_from_slice(&(count as u32).to_be_bytes());
        }
    }

    let mut out = vec![];
    // An empty v1 block with one type.
    header(&mut out, 0, 1);
    out.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0]);

    header(&mut out, transitions.len(), offsets.len());
    for &(at, _) in transitions {
        out.extend_from_slice(&at.to_be_bytes());
    }
    for &(_, index) in transitions {
        out.push(index);
    }
    for &offset in offsets {
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&[0, 0]);
    }
    out.push(0);
    out.push(b'\n');
    out.extend_from_slice(footer.as_bytes());
    out.push(b'\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn o(hours: i8) -> Offset {
        Offset::constant(hours)
    }

    // 2023-03-12T07:00:00Z and 2023-11-05T06:00:00Z
    const SPRING_2023: i64 = 1678604400;
    const FALL_2023: i64 = 1699164000;

    fn new_york() -> Tzif {
        let data = build_v2(
            &[-17762, -18000, -14400],
            &[(-2717650800, 1), (SPRING_2023, 2), (FALL_2023, 1)],
            "EST5EDT,M3.2.0,M11.1.0",
        );
        Tzif::parse("America/New_York", &data).unwrap()
    }

    #[test]
    fn offsets() {
        let tz = new_york();
        // Local mean time, truncated to whole minutes.
        assert_eq!(tz.to_offset(-3000000000).minutes(), -296);
        assert_eq!(tz.to_offset(SPRING_2023 - 1), o(-5));
        assert_eq!(tz.to_offset(SPRING_2023), o(-4));
        assert_eq!(tz.to_offset(FALL_2023), o(-5));
        // 2024-03-10T07:00:00Z comes from the footer.
        assert_eq!(tz.to_offset(1710053999), o(-5));
        assert_eq!(tz.to_offset(1710054000), o(-4));
    }

    #[test]
    fn ambiguous_offsets() {
        let tz = new_york();
        // 2023-03-12T02:30 local
        let local = SPRING_2023 - 5 * 3600 + 1800;
        assert_eq!(
            tz.to_ambiguous_offset(local),
            AmbiguousOffset::Gap { before: o(-5), after: o(-4) },
        );
        // 2024-11-03T01:30 local, from the footer
        let local = 1730613600 - 5 * 3600 + 1800;
        assert_eq!(
            tz.to_ambiguous_offset(local),
            AmbiguousOffset::Fold { before: o(-4), after: o(-5) },
        );
    }

    #[test]
    fn fixed() {
        let data = build_v2(&[0], &[], "UTC0");
        let tz = Tzif::parse("Etc/UTC", &data).unwrap();
        assert_eq!(tz.to_fixed_offset(), Some(Offset::UTC));
        assert_eq!(new_york().to_fixed_offset(), None);
    }

    #[test]
    fn errors() {
        insta::assert_snapshot!(
            Tzif::parse("nope", b"TZif").unwrap_err(),
            @"invalid TZif data for time zone `nope`: expected at least 44 bytes for TZif header, but found 4",
        );

        let mut data = build_v2(&[0], &[(0, 3)], "");
        let err = Tzif::parse("bad", &data).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"invalid TZif data for time zone `bad`: found transition with local time type index `3`, but there are only 1 types",
        );

        data = build_v2(&[0], &[], "UTC0");
        data.pop();
        assert!(Tzif::parse("bad", &data).is_err());

        data = build_v2(&[0], &[], "UTC0");
        data[0] = b'X';
        assert!(Tzif::parse("bad", &data).is_err());
    }

    #[test]
    fn offset_out_of_range() {
        let data = build_v2(&[-70_000], &[], "");
        let err = Tzif::parse("bad", &data).unwrap_err();
        assert!(err.is_range());
        assert!(err.to_string().contains("invalid offset"));

        let data = build_v2(&[64_859], &[], "");
        let tz = Tzif::parse("ok", &data).unwrap();
        assert_eq!(tz.to_fixed_offset(), Some(Offset::MAX));
    }
}
