//! Diagnostic primitives for hosts-file managers: resolve a domain through a
//! caller-chosen DNS server, and measure reachability latency with an ICMP
//! echo probe.
//!
//! Both operations are synchronous and blocking, own their socket for the
//! duration of the call, and never retry; the caller picks the timeout and
//! decides what to do with a failure.

pub mod address_family;
pub mod dns_wire;
mod error;
pub mod icmp;
mod transport;

use std::net::IpAddr;
use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::address_family::{Inet, Inet6};
use crate::dns_wire::{QueryBuilder, QueryType, RESPONSE_BUFFER_SIZE};

pub use crate::error::Error;

/// Every query goes to the standard DNS port.
pub const DNS_PORT: u16 = 53;

/// A lookup never returns more addresses than this; extra answer records
/// are ignored.
pub const MAX_RESULTS: usize = 32;

/// Resolves `domain` by querying `server` directly, one A query then one
/// AAAA query, and returns the answers as address literals, A records first,
/// capped at [`MAX_RESULTS`].
///
/// Failures are logged and collapse into a shorter (possibly empty) list.
pub fn lookup(domain: &str, server: &str, timeout: Duration) -> Vec<String> {
    match lookup_addrs(domain, server, timeout) {
        Ok(addresses) => addresses.iter().map(ToString::to_string).collect(),
        Err(err) => {
            debug!("lookup of {} via {} failed: {}", domain, server, err);
            Vec::new()
        }
    }
}

/// Like [`lookup`], but returns typed addresses and surfaces a server that
/// cannot be classified or resolved as an error. A failure of one of the
/// two queries still only costs that query's answers.
pub fn lookup_addrs(domain: &str, server: &str, timeout: Duration) -> Result<Vec<IpAddr>, Error> {
    lookup_on(domain, server, DNS_PORT, timeout)
}

fn lookup_on(
    domain: &str,
    server: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<IpAddr>, Error> {
    let server_addr = address_family::resolve_target(server)?;

    let mut addresses = Vec::new();
    for &qtype in &[QueryType::A, QueryType::AAAA] {
        if addresses.len() == MAX_RESULTS {
            break;
        }
        match query_server(
            domain,
            server_addr,
            port,
            qtype,
            MAX_RESULTS - addresses.len(),
            timeout,
        ) {
            Ok(found) => addresses.extend(found),
            Err(err) => debug!("{:?} query for {} failed: {}", qtype, domain, err),
        }
    }
    Ok(addresses)
}

/// One query, one response: build, exchange, extract.
fn query_server(
    domain: &str,
    server: IpAddr,
    port: u16,
    qtype: QueryType,
    max_results: usize,
    timeout: Duration,
) -> Result<Vec<IpAddr>, Error> {
    let id = rand::thread_rng().gen();
    let query = QueryBuilder::new(id).question(domain, qtype)?;
    let mut response = [0u8; RESPONSE_BUFFER_SIZE];
    let len = transport::exchange(server, port, &query, &mut response, timeout)?;
    Ok(dns_wire::extract_addresses(&response[..len], max_results)?)
}

/// Measures round-trip latency to `host` with a single ICMP echo.
///
/// `host` may be an IPv4 literal, an IPv6 literal, or a hostname; a hostname
/// is resolved through the system resolver and its first address picks the
/// probe family. Any failure, including no reply within the timeout,
/// returns `None`.
pub fn probe(host: &str, timeout: Duration) -> Option<Duration> {
    match try_probe(host, timeout) {
        Ok(latency) => Some(latency),
        Err(err) => {
            debug!("probe of {} failed: {}", host, err);
            None
        }
    }
}

/// Like [`probe`], but keeps the failure cause.
pub fn try_probe(host: &str, timeout: Duration) -> Result<Duration, Error> {
    match address_family::resolve_target(host)? {
        target @ IpAddr::V4(_) => transport::probe::<Inet>(target, timeout),
        target @ IpAddr::V6(_) => transport::probe::<Inet6>(target, timeout),
    }
}
