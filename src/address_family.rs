use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, ToSocketAddrs};

use byteorder::{BigEndian, ByteOrder};
use socket2::{Domain, Protocol, Socket, Type};

use crate::error::Error;
use crate::icmp;

pub enum Inet {}

pub enum Inet6 {}

/// Socket constants and ICMP framing details of one IP family.
pub trait AddressFamily {
    const DOMAIN: Domain;
    const ICMP_PROTOCOL: Protocol;
    const ECHO_REQUEST: u8;
    const ECHO_REPLY: u8;

    fn udp_socket() -> io::Result<Socket> {
        Socket::new(Self::DOMAIN, Type::DGRAM, Some(Protocol::UDP))
    }

    fn icmp_socket() -> io::Result<Socket> {
        Socket::new(Self::DOMAIN, Type::RAW, Some(Self::ICMP_PROTOCOL))
    }

    /// Embeds the echo checksum where the family requires it in userspace.
    fn seal_echo(packet: &mut [u8]);

    /// The ICMP message within a received datagram.
    fn icmp_message(datagram: &[u8]) -> Option<&[u8]>;
}

impl AddressFamily for Inet {
    const DOMAIN: Domain = Domain::IPV4;
    const ICMP_PROTOCOL: Protocol = Protocol::ICMPV4;
    const ECHO_REQUEST: u8 = 8;
    const ECHO_REPLY: u8 = 0;

    fn seal_echo(packet: &mut [u8]) {
        let sum = icmp::checksum(packet);
        BigEndian::write_u16(&mut packet[2..4], sum);
    }

    /// Raw IPv4 sockets deliver the IP header in front of the ICMP message.
    fn icmp_message(datagram: &[u8]) -> Option<&[u8]> {
        let header_len = usize::from(datagram.first()? & 0x0f) * 4;
        if header_len < 20 {
            return None;
        }
        datagram.get(header_len..)
    }
}

impl AddressFamily for Inet6 {
    const DOMAIN: Domain = Domain::IPV6;
    const ICMP_PROTOCOL: Protocol = Protocol::ICMPV6;
    const ECHO_REQUEST: u8 = 128;
    const ECHO_REPLY: u8 = 129;

    // ICMPv6 checksums are computed and validated by the kernel
    fn seal_echo(_packet: &mut [u8]) {}

    fn icmp_message(datagram: &[u8]) -> Option<&[u8]> {
        Some(datagram)
    }
}

pub fn is_ipv4(literal: &str) -> bool {
    literal.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(literal: &str) -> bool {
    literal.parse::<Ipv6Addr>().is_ok()
}

/// Classifies `host` as an IPv4 or IPv6 literal; anything else goes to the
/// system resolver, whose first address picks the family.
pub fn resolve_target(host: &str) -> Result<IpAddr, Error> {
    if let Ok(address) = host.parse::<IpAddr>() {
        return Ok(address);
    }
    let mut addresses = (host, 0u16)
        .to_socket_addrs()
        .map_err(|_| Error::Resolution(host.to_owned()))?;
    addresses
        .next()
        .map(|address| address.ip())
        .ok_or_else(|| Error::Resolution(host.to_owned()))
}
