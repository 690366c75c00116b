use std::{fmt, str::FromStr};

/// Splits `s` on `sep`, ignoring separators inside double-quoted strings.
///
/// Backslash escapes inside quoted strings are honored so `"a\"b,c"` stays in one piece.
pub(crate) fn split_quoted(s: &str, sep: u8) -> impl Iterator<Item = &str> {
    let bytes = s.as_bytes();
    let mut start = 0;
    let mut pos = 0;
    let mut quoted = false;
    let mut done = false;

    std::iter::from_fn(move || {
        if done {
            return None;
        }

        while pos < bytes.len() {
            match bytes[pos] {
                b'\\' if quoted => pos += 1,
                b'"' => quoted = !quoted,
                b if b == sep && !quoted => {
                    let part = &s[start..pos];
                    pos += 1;
                    start = pos;
                    return Some(part);
                }
                _ => {}
            }

            pos += 1;
        }

        done = true;
        Some(&s[start.min(s.len())..])
    })
}

/// Strips surrounding double quotes and backslash escapes from a parameter value.
pub(crate) fn unquote(val: &str) -> String {
    match val
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();

            while let Some(ch) = chars.next() {
                match ch {
                    '\\' => out.extend(chars.next()),
                    ch => out.push(ch),
                }
            }

            out
        }

        None => val.to_owned(),
    }
}

/// Reads comma-delimited raw header values into a Vec.
///
/// Items that fail to parse are dropped; the rest of the header is still honored.
#[inline]
pub fn from_comma_delimited<'a, I, T>(all: I) -> Vec<T>
where
    I: IntoIterator<Item = &'a str>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let mut result = Vec::new();

    for h in all {
        result.extend(
            split_quoted(h, b',')
                .filter_map(|x| match x.trim() {
                    "" => None,
                    y => Some(y),
                })
                .filter_map(|x| match x.parse() {
                    Ok(item) => Some(item),
                    Err(err) => {
                        log::trace!("dropping header item {:?}: {}", x, err);
                        None
                    }
                }),
        )
    }

    result
}

/// Format an array into a comma-delimited string.
#[inline]
pub fn fmt_comma_delimited<T>(f: &mut fmt::Formatter<'_>, parts: &[T]) -> fmt::Result
where
    T: fmt::Display,
{
    let mut iter = parts.iter();
    if let Some(part) = iter.next() {
        fmt::Display::fmt(part, f)?;
    }
    for part in iter {
        f.write_str(", ")?;
        fmt::Display::fmt(part, f)?;
    }
    Ok(())
}
