/// Parses an `i64` number from the beginning to the end of the given slice
/// of ASCII digit characters.
///
/// Returns `None` if any byte isn't a digit, if the slice is empty or if
/// the number would overflow an `i64`.
pub(crate) fn i64(bytes: &[u8]) -> Option<i64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: i64 = 0;
    for &byte in bytes {
        let digit = byte.checked_sub(b'0').filter(|&d| d <= 9)?;
        n = n.checked_mul(10)?.checked_add(i64::from(digit))?;
    }
    Some(n)
}

/// Parses a fractional second from the given slice of ASCII digits and
/// returns it as a number of nanoseconds.
///
/// The slice must contain between 1 and 9 digits, inclusive.
pub(crate) fn fraction(bytes: &[u8]) -> Option<i32> {
    if bytes.is_empty() || bytes.len() > 9 {
        return None;
    }
    let mut nanos = i32::try_from(i64(bytes)?).ok()?;
    for _ in bytes.len()..9 {
        nanos *= 10;
    }
    Some(nanos)
}

/// Splits off at most `max` leading ASCII digits from `input`.
///
/// The first slice returned contains the digits (possibly empty) and the
/// second contains everything after them.
pub(crate) fn split_digits(input: &[u8], max: usize) -> (&[u8], &[u8]) {
    let len = input
        .iter()
        .take(max)
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    input.split_at(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_i64() {
        assert_eq!(i64(b"2007"), Some(2007));
        assert_eq!(i64(b"03"), Some(3));
        assert_eq!(i64(b""), None);
        assert_eq!(i64(b"2o07"), None);
        assert_eq!(i64(b"99999999999999999999"), None);
    }

    #[test]
    fn parse_fraction() {
        assert_eq!(fraction(b"5"), Some(500_000_000));
        assert_eq!(fraction(b"123"), Some(123_000_000));
        assert_eq!(fraction(b"000000001"), Some(1));
        assert_eq!(fraction(b"1234567890"), None);
        assert_eq!(fraction(b""), None);
    }

    #[test]
    fn digits() {
        assert_eq!(split_digits(b"2007-12", 4), (&b"2007"[..], &b"-12"[..]));
        assert_eq!(split_digits(b"12345", 2), (&b"12"[..], &b"345"[..]));
        assert_eq!(split_digits(b"x1", 2), (&b""[..], &b"x1"[..]));
    }
}
