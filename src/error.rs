use std::io;

use thiserror::Error;

use crate::dns_wire;

/// What went wrong inside a lookup or probe.
///
/// The collapsed entry points (`lookup`, `probe`) reduce all of these to an
/// empty result or `None` after logging; the typed variants keep the cause
/// visible for callers and tests.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not create socket: {0}")]
    SocketCreation(#[source] io::Error),
    #[error("could not send request: {0}")]
    Send(#[source] io::Error),
    #[error("no usable reply within the timeout: {0}")]
    Receive(#[source] io::Error),
    #[error("malformed message: {0}")]
    Packet(#[from] dns_wire::Error),
    #[error("{0:?} did not resolve to any address")]
    Resolution(String),
}
