use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use byteorder::{BigEndian, ByteOrder};
use log::trace;

use super::{name, Cursor, Error, Header, QueryType};

/// Extracts the A/AAAA answer addresses from a received message.
///
/// Skips the echoed question section, then walks answer records in order
/// until the declared answer count or `max_results` is reached, whichever
/// comes first. Record types other than A/AAAA are skipped by their declared
/// data length. Every advance is bounds-checked; a response whose declared
/// structure runs past the buffer fails with `Error::UnexpectedEof`.
pub fn extract_addresses(message: &[u8], max_results: usize) -> Result<Vec<IpAddr>, Error> {
    let mut cursor = Cursor::new(message);
    let header = Header::parse(&mut cursor)?;

    for _ in 0..header.questions {
        name::skip(&mut cursor)?;
        // qtype + qclass
        cursor.skip(4)?;
    }

    let mut addresses = Vec::with_capacity(max_results.min(usize::from(header.answers)));
    for _ in 0..header.answers {
        if addresses.len() == max_results {
            break;
        }
        name::skip(&mut cursor)?;
        let typ = cursor.read_u16()?;
        let _class = cursor.read_u16()?;
        let _ttl = cursor.read_u32()?;
        let data_len = usize::from(cursor.read_u16()?);
        let data = cursor.take(data_len)?;

        if typ == QueryType::A as u16 {
            if data.len() != 4 {
                return Err(Error::WrongRdataLength);
            }
            addresses.push(IpAddr::V4(Ipv4Addr::from(BigEndian::read_u32(data))));
        } else if typ == QueryType::AAAA as u16 {
            if data.len() != 16 {
                return Err(Error::WrongRdataLength);
            }
            let mut segments = [0u16; 8];
            BigEndian::read_u16_into(data, &mut segments);
            addresses.push(IpAddr::V6(Ipv6Addr::from(segments)));
        } else {
            trace!("skipping answer record of type {}", typ);
        }
    }

    Ok(addresses)
}
