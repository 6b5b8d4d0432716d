use byteorder::{BigEndian, ByteOrder};

use super::Error;

/// Read position within a received message.
///
/// Every read or skip checks the remaining length first and fails with
/// `Error::UnexpectedEof` instead of stepping outside the buffer.
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Cursor<'a> {
        Cursor { buf, pos: 0 }
    }

    /// Consumes the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self.pos.checked_add(len).ok_or(Error::UnexpectedEof)?;
        let bytes = self.buf.get(self.pos..end).ok_or(Error::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), Error> {
        self.take(len).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.take(1).map(|bytes| bytes[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.take(2).map(BigEndian::read_u16)
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.take(4).map(BigEndian::read_u32)
    }
}

#[cfg(test)]
mod test {
    use super::{Cursor, Error};

    #[test]
    fn reads_in_network_order() {
        let mut cursor = Cursor::new(&[0x12, 0x34, 0x00, 0x00, 0x00, 0x2a, 0x07]);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32().unwrap(), 42);
        assert_eq!(cursor.read_u8().unwrap(), 7);
    }

    #[test]
    fn fails_closed_at_the_end() {
        let mut cursor = Cursor::new(&[1, 2, 3]);
        cursor.skip(2).unwrap();
        assert_eq!(cursor.read_u16(), Err(Error::UnexpectedEof));
        // the failed read must not consume anything
        assert_eq!(cursor.read_u8().unwrap(), 3);
        assert_eq!(cursor.read_u8(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn skip_past_the_end_is_an_error() {
        let mut cursor = Cursor::new(&[0; 4]);
        assert_eq!(cursor.skip(5), Err(Error::UnexpectedEof));
        assert_eq!(cursor.skip(usize::MAX), Err(Error::UnexpectedEof));
    }
}
