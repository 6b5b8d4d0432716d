use thiserror::Error;

/// Error building a DNS query or parsing a DNS response
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("message is smaller than header size")]
    HeaderTooShort,
    #[error("message has incomplete data")]
    UnexpectedEof,
    #[error("wrong (too short or too long) size of RDATA")]
    WrongRdataLength,
    #[error("label in domain name has unknown label format")]
    UnknownLabelFormat,
    #[error("label in domain name is longer than 63 bytes")]
    LabelTooLong,
    #[error("encoded query does not fit the query buffer")]
    QueryTooLong,
}
