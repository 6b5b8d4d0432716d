use super::{Cursor, Error};

/// Longest label RFC 1035 allows.
pub const MAX_LABEL_LEN: usize = 63;

const POINTER_MASK: u8 = 0b1100_0000;

/// Appends `name` to `buf` in wire format: each label prefixed by its
/// length, terminated by a zero-length label. `"example.com"` becomes
/// `\x07example\x03com\x00`.
///
/// `buf` is a fresh output buffer owned by the builder; the input string is
/// never touched. The encoded name must stay within `limit` bytes,
/// terminator included.
pub fn push_encoded(name: &str, buf: &mut Vec<u8>, limit: usize) -> Result<(), Error> {
    for label in name.split('.') {
        // a trailing dot yields one empty label, which the terminator covers
        if label.is_empty() {
            continue;
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(Error::LabelTooLong);
        }
        if buf.len() + 1 + label.len() >= limit {
            return Err(Error::QueryTooLong);
        }
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    if buf.len() >= limit {
        return Err(Error::QueryTooLong);
    }
    buf.push(0);
    Ok(())
}

/// Advances the cursor past one possibly-compressed name.
///
/// A compression pointer is any length byte with the two top bits set and
/// occupies exactly two bytes; the pointer target is never followed, since
/// skipping only needs the field's own length.
pub fn skip(cursor: &mut Cursor) -> Result<(), Error> {
    loop {
        let len = cursor.read_u8()?;
        if len == 0 {
            return Ok(());
        }
        match len & POINTER_MASK {
            0 => cursor.skip(usize::from(len))?,
            POINTER_MASK => {
                cursor.skip(1)?;
                return Ok(());
            }
            _ => return Err(Error::UnknownLabelFormat),
        }
    }
}
