use byteorder::{BigEndian, WriteBytesExt};

use super::{name, Error, Header, QueryClass, QueryType, HEADER_SIZE, QUERY_BUFFER_SIZE};

// qtype + qclass trailing the encoded name
const QUESTION_TAIL: usize = 4;

/// Builds a one-question query message
///
/// The output is capacity-bounded: a name that would push the message past
/// `QUERY_BUFFER_SIZE` fails with `Error::QueryTooLong` instead of producing
/// a truncated query.
pub struct QueryBuilder {
    buf: Vec<u8>,
}

impl QueryBuilder {
    /// Starts a standard recursive query with the given transaction id.
    pub fn new(id: u16) -> QueryBuilder {
        let mut buf = vec![0u8; HEADER_SIZE];
        Header::for_query(id).write(&mut buf[..HEADER_SIZE]);
        QueryBuilder { buf }
    }

    /// Appends the question and returns the serialized message.
    pub fn question(mut self, qname: &str, qtype: QueryType) -> Result<Vec<u8>, Error> {
        name::push_encoded(qname, &mut self.buf, QUERY_BUFFER_SIZE - QUESTION_TAIL)?;
        self.buf.write_u16::<BigEndian>(qtype as u16).unwrap();
        self.buf.write_u16::<BigEndian>(QueryClass::IN as u16).unwrap();
        Ok(self.buf)
    }
}
