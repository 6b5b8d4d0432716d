use byteorder::{BigEndian, ByteOrder};

use crate::address_family::AddressFamily;

/// Total size of an outgoing echo request, header included.
pub const PACKET_SIZE: usize = 64;

/// Fixed size of the ICMP echo header.
pub const HEADER_SIZE: usize = 8;

/// A probe sends a single request, so the sequence number never moves.
pub const ECHO_SEQUENCE: u16 = 1;

/// Builds an echo request for the family: echo-request type, code 0, the
/// caller's identifier and sequence, zero payload, checksum sealed in
/// userspace where the family needs it.
pub fn echo_request<AF: AddressFamily>(ident: u16, sequence: u16) -> [u8; PACKET_SIZE] {
    let mut packet = [0u8; PACKET_SIZE];
    packet[0] = AF::ECHO_REQUEST;
    BigEndian::write_u16(&mut packet[4..6], ident);
    BigEndian::write_u16(&mut packet[6..8], sequence);
    AF::seal_echo(&mut packet);
    packet
}

/// Whether `datagram` carries the echo reply matching (`ident`, `sequence`).
///
/// Anything else that lands on the raw socket is rejected, including other
/// callers' echo replies and non-echo ICMP messages.
pub fn is_echo_reply<AF: AddressFamily>(datagram: &[u8], ident: u16, sequence: u16) -> bool {
    let message = match AF::icmp_message(datagram) {
        Some(message) if message.len() >= HEADER_SIZE => message,
        _ => return false,
    };
    message[0] == AF::ECHO_REPLY
        && message[1] == 0
        && BigEndian::read_u16(&message[4..6]) == ident
        && BigEndian::read_u16(&message[6..8]) == sequence
}

/// RFC 1071 internet checksum over `data`.
///
/// Sums the buffer as network-order 16-bit words into a 32-bit accumulator,
/// counting a trailing odd byte as the high half of a final word. The carry
/// is folded back twice, since the first fold can itself carry, then the sum
/// is complemented.
pub fn checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut words = data.chunks_exact(2);
    for word in words.by_ref() {
        sum += u32::from(BigEndian::read_u16(word));
    }
    if let Some(&odd) = words.remainder().first() {
        sum += u32::from(odd) << 8;
    }
    sum = (sum >> 16) + (sum & 0xffff);
    sum += sum >> 16;
    !(sum as u16)
}

#[cfg(test)]
mod test {
    use super::{checksum, echo_request, is_echo_reply, HEADER_SIZE, PACKET_SIZE};
    use crate::address_family::{Inet, Inet6};
    use byteorder::{BigEndian, ByteOrder};

    #[test]
    fn checksum_of_zeros_is_all_ones() {
        assert_eq!(checksum(&[0, 0, 0, 0]), 0xffff);
    }

    #[test]
    fn checksum_counts_a_trailing_odd_byte_high() {
        assert_eq!(checksum(&[0x12]), !0x1200);
    }

    #[test]
    fn checksum_folds_the_carry() {
        // two words summing past 16 bits
        assert_eq!(checksum(&[0xff, 0xff, 0x00, 0x01]), !0x0001 & 0xffff);
    }

    #[test]
    fn sealed_packet_re_sums_to_zero() {
        let packet = echo_request::<Inet>(0x4d2, 1);
        assert_eq!(checksum(&packet), 0);
    }

    #[test]
    fn v4_request_layout() {
        let packet = echo_request::<Inet>(0xbeef, 1);
        assert_eq!(packet.len(), PACKET_SIZE);
        assert_eq!(packet[0], 8);
        assert_eq!(packet[1], 0);
        assert_ne!(BigEndian::read_u16(&packet[2..4]), 0);
        assert_eq!(BigEndian::read_u16(&packet[4..6]), 0xbeef);
        assert_eq!(BigEndian::read_u16(&packet[6..8]), 1);
    }

    #[test]
    fn v6_request_leaves_the_checksum_to_the_kernel() {
        let packet = echo_request::<Inet6>(0xbeef, 1);
        assert_eq!(packet[0], 128);
        assert_eq!(BigEndian::read_u16(&packet[2..4]), 0);
        assert_eq!(BigEndian::read_u16(&packet[4..6]), 0xbeef);
    }

    /// 20-byte IPv4 header followed by an echo reply.
    fn v4_reply(ident: u16, sequence: u16) -> Vec<u8> {
        let mut datagram = vec![0u8; 20 + HEADER_SIZE];
        datagram[0] = 0x45;
        datagram[20] = 0; // echo reply
        BigEndian::write_u16(&mut datagram[24..26], ident);
        BigEndian::write_u16(&mut datagram[26..28], sequence);
        datagram
    }

    #[test]
    fn v4_reply_is_matched_behind_the_ip_header() {
        assert!(is_echo_reply::<Inet>(&v4_reply(7, 1), 7, 1));
    }

    #[test]
    fn foreign_identifier_is_rejected() {
        assert!(!is_echo_reply::<Inet>(&v4_reply(8, 1), 7, 1));
        assert!(!is_echo_reply::<Inet>(&v4_reply(7, 2), 7, 1));
    }

    #[test]
    fn non_reply_types_are_rejected() {
        let mut datagram = v4_reply(7, 1);
        datagram[20] = 8; // our own echo request looping back
        assert!(!is_echo_reply::<Inet>(&datagram, 7, 1));
    }

    #[test]
    fn truncated_datagram_is_rejected() {
        let datagram = v4_reply(7, 1);
        assert!(!is_echo_reply::<Inet>(&datagram[..24], 7, 1));
        assert!(!is_echo_reply::<Inet>(&[], 7, 1));
    }

    #[test]
    fn v6_reply_has_no_ip_header() {
        let mut message = vec![0u8; HEADER_SIZE];
        message[0] = 129;
        BigEndian::write_u16(&mut message[4..6], 7);
        BigEndian::write_u16(&mut message[6..8], 1);
        assert!(is_echo_reply::<Inet6>(&message, 7, 1));
    }
}
