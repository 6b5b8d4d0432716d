use byteorder::{BigEndian, ByteOrder};

use super::{Cursor, Error};

pub const HEADER_SIZE: usize = 12;

const FLAG_RESPONSE: u16 = 0x8000;
const FLAG_AUTHORITATIVE: u16 = 0x0400;
const FLAG_TRUNCATED: u16 = 0x0200;
const FLAG_RECURSION_DESIRED: u16 = 0x0100;
const FLAG_RECURSION_AVAILABLE: u16 = 0x0080;

/// DNS message header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub query: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: u8,
    pub questions: u16,
    pub answers: u16,
    pub nameservers: u16,
    pub additional: u16,
}

impl Header {
    /// Header of an outgoing standard query: recursion desired, one
    /// question, all other sections empty.
    pub fn for_query(id: u16) -> Header {
        Header {
            id,
            query: true,
            opcode: 0,
            authoritative: false,
            truncated: false,
            recursion_desired: true,
            recursion_available: false,
            response_code: 0,
            questions: 1,
            answers: 0,
            nameservers: 0,
            additional: 0,
        }
    }

    /// Serializes the header into the first `HEADER_SIZE` bytes of `buf`.
    pub fn write(&self, buf: &mut [u8]) {
        BigEndian::write_u16(&mut buf[0..2], self.id);
        let mut flags = 0u16;
        if !self.query {
            flags |= FLAG_RESPONSE;
        }
        flags |= u16::from(self.opcode & 0x0f) << 11;
        if self.authoritative {
            flags |= FLAG_AUTHORITATIVE;
        }
        if self.truncated {
            flags |= FLAG_TRUNCATED;
        }
        if self.recursion_desired {
            flags |= FLAG_RECURSION_DESIRED;
        }
        if self.recursion_available {
            flags |= FLAG_RECURSION_AVAILABLE;
        }
        flags |= u16::from(self.response_code & 0x0f);
        BigEndian::write_u16(&mut buf[2..4], flags);
        BigEndian::write_u16(&mut buf[4..6], self.questions);
        BigEndian::write_u16(&mut buf[6..8], self.answers);
        BigEndian::write_u16(&mut buf[8..10], self.nameservers);
        BigEndian::write_u16(&mut buf[10..12], self.additional);
    }

    pub fn parse(cursor: &mut Cursor) -> Result<Header, Error> {
        let buf = cursor.take(HEADER_SIZE).map_err(|_| Error::HeaderTooShort)?;
        let flags = BigEndian::read_u16(&buf[2..4]);
        Ok(Header {
            id: BigEndian::read_u16(&buf[0..2]),
            query: flags & FLAG_RESPONSE == 0,
            opcode: ((flags >> 11) & 0x0f) as u8,
            authoritative: flags & FLAG_AUTHORITATIVE != 0,
            truncated: flags & FLAG_TRUNCATED != 0,
            recursion_desired: flags & FLAG_RECURSION_DESIRED != 0,
            recursion_available: flags & FLAG_RECURSION_AVAILABLE != 0,
            response_code: (flags & 0x0f) as u8,
            questions: BigEndian::read_u16(&buf[4..6]),
            answers: BigEndian::read_u16(&buf[6..8]),
            nameservers: BigEndian::read_u16(&buf[8..10]),
            additional: BigEndian::read_u16(&buf[10..12]),
        })
    }
}

#[cfg(test)]
mod test {
    use super::{Cursor, Error, Header, HEADER_SIZE};

    #[test]
    fn query_header_round_trip() {
        let header = Header::for_query(0x0625);
        let mut buf = [0u8; HEADER_SIZE];
        header.write(&mut buf);
        assert_eq!(
            &buf,
            b"\x06\x25\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00"
        );
        let parsed = Header::parse(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn parses_a_response_header() {
        // id 0x1234, QR + RD + RA, one question, two answers
        let buf = b"\x12\x34\x81\x80\x00\x01\x00\x02\x00\x00\x00\x00";
        let header = Header::parse(&mut Cursor::new(buf)).unwrap();
        assert!(!header.query);
        assert!(header.recursion_desired);
        assert!(header.recursion_available);
        assert_eq!(header.response_code, 0);
        assert_eq!(header.questions, 1);
        assert_eq!(header.answers, 2);
    }

    #[test]
    fn short_header_is_an_error() {
        let buf = [0u8; HEADER_SIZE - 1];
        assert_eq!(
            Header::parse(&mut Cursor::new(&buf)),
            Err(Error::HeaderTooShort)
        );
    }
}
