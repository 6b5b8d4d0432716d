use std::io;
use std::net::{IpAddr, UdpSocket};
use std::time::{Duration, Instant};

use log::trace;
use rand::Rng;

use crate::address_family::{AddressFamily, Inet, Inet6};
use crate::error::Error;
use crate::icmp;

// Room for a full echo reply plus the IPv4 header and options in front.
const REPLY_BUFFER_SIZE: usize = 512;

/// Sends one datagram to `server:port` and performs one bounded receive
/// into `response`, returning the received byte count.
///
/// The socket is owned by this call and released on every exit path.
pub fn exchange(
    server: IpAddr,
    port: u16,
    request: &[u8],
    response: &mut [u8],
    timeout: Duration,
) -> Result<usize, Error> {
    let socket = match server {
        IpAddr::V4(_) => Inet::udp_socket(),
        IpAddr::V6(_) => Inet6::udp_socket(),
    }
    .map_err(Error::SocketCreation)?;
    let socket: UdpSocket = socket.into();
    socket
        .set_read_timeout(Some(timeout))
        .map_err(Error::SocketCreation)?;

    socket
        .send_to(request, (server, port))
        .map_err(Error::Send)?;
    let (len, _) = socket.recv_from(response).map_err(Error::Receive)?;
    Ok(len)
}

/// Sends an echo request to `target` and waits for the matching reply,
/// returning the elapsed wall-clock time.
///
/// Datagrams that are not our echo reply are discarded and the receive is
/// re-armed with whatever remains of the deadline.
pub fn probe<AF: AddressFamily>(target: IpAddr, timeout: Duration) -> Result<Duration, Error> {
    let socket = AF::icmp_socket().map_err(Error::SocketCreation)?;
    let socket: UdpSocket = socket.into();

    let ident = rand::thread_rng().gen();
    let packet = icmp::echo_request::<AF>(ident, icmp::ECHO_SEQUENCE);

    let started = Instant::now();
    socket.send_to(&packet, (target, 0)).map_err(Error::Send)?;
    let deadline = started + timeout;

    let mut reply = [0u8; REPLY_BUFFER_SIZE];
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(Error::Receive(io::ErrorKind::TimedOut.into()));
        }
        socket
            .set_read_timeout(Some(remaining))
            .map_err(Error::Receive)?;
        let (len, _) = socket.recv_from(&mut reply).map_err(Error::Receive)?;
        if icmp::is_echo_reply::<AF>(&reply[..len], ident, icmp::ECHO_SEQUENCE) {
            return Ok(started.elapsed());
        }
        trace!("ignoring {} byte datagram that is not our reply", len);
    }
}
