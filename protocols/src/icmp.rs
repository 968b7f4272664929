//! ICMP echo wire format.
//!
//! Builds the echo requests the prober sends and picks echo replies out
//! of the raw frames the listener receives. Everything else arriving on
//! the ICMP channel (destination-unreachable, other sessions' pings) is
//! filtered to `None` rather than treated as an error.

use anyhow::Context;
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{self, IcmpCode, IcmpPacket, IcmpTypes};

const ICMP_HDR_LEN: usize = 8;
const ECHO_PAYLOAD_LEN: usize = 8;

pub const ECHO_REQUEST_LEN: usize = ICMP_HDR_LEN + ECHO_PAYLOAD_LEN;

/// Correlation fields carried by an echo reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoReply {
    pub identifier: u16,
    pub sequence: u16,
}

/// Builds an ICMP echo request (type 8, code 0) tagged with the given
/// identifier and sequence number.
pub fn build_echo_request(identifier: u16, sequence: u16) -> anyhow::Result<Vec<u8>> {
    let mut buffer: Vec<u8> = vec![0u8; ECHO_REQUEST_LEN];
    {
        let mut echo = MutableEchoRequestPacket::new(&mut buffer)
            .context("failed to create echo request packet")?;
        echo.set_icmp_type(IcmpTypes::EchoRequest);
        echo.set_icmp_code(IcmpCode(0));
        echo.set_identifier(identifier);
        echo.set_sequence_number(sequence);

        echo.set_checksum(0);
        let echo_imm = echo.to_immutable();
        let icmp_pkt =
            IcmpPacket::new(echo_imm.packet()).context("failed to create ICMP packet")?;
        let csm = icmp::checksum(&icmp_pkt);
        echo.set_checksum(csm);
    }
    Ok(buffer)
}

/// Parses bytes received from a Layer-4 ICMP channel.
///
/// Returns the correlation fields when the frame is a well-formed echo
/// reply, `None` for anything else.
pub fn parse_echo_reply(bytes: &[u8]) -> Option<EchoReply> {
    let packet = IcmpPacket::new(bytes)?;
    if packet.get_icmp_type() != IcmpTypes::EchoReply {
        return None;
    }

    let reply = EchoReplyPacket::new(bytes)?;
    Some(EchoReply {
        identifier: reply.get_identifier(),
        sequence: reply.get_sequence_number(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::icmp::echo_request::EchoRequestPacket;

    #[test]
    fn echo_request_has_expected_shape() {
        let bytes = build_echo_request(0xBEEF, 7).unwrap();
        assert_eq!(bytes.len(), ECHO_REQUEST_LEN);

        let request = EchoRequestPacket::new(&bytes).unwrap();
        assert_eq!(request.get_icmp_type(), IcmpTypes::EchoRequest);
        assert_eq!(request.get_icmp_code(), IcmpCode(0));
        assert_eq!(request.get_identifier(), 0xBEEF);
        assert_eq!(request.get_sequence_number(), 7);
        assert_ne!(request.get_checksum(), 0);
    }

    #[test]
    fn reply_parsing_extracts_correlation_fields() {
        // An echo reply differs from a request only in the type octet.
        let mut bytes = build_echo_request(0x1234, 42).unwrap();
        bytes[0] = IcmpTypes::EchoReply.0;

        let reply = parse_echo_reply(&bytes).unwrap();
        assert_eq!(reply.identifier, 0x1234);
        assert_eq!(reply.sequence, 42);
    }

    #[test]
    fn reply_parsing_ignores_other_frames() {
        // Echo request, not a reply
        let request = build_echo_request(1, 1).unwrap();
        assert_eq!(parse_echo_reply(&request), None);

        // Truncated frame
        assert_eq!(parse_echo_reply(&[0u8; 4]), None);

        // Destination unreachable (type 3)
        let mut unreachable = build_echo_request(1, 1).unwrap();
        unreachable[0] = IcmpTypes::DestinationUnreachable.0;
        assert_eq!(parse_echo_reply(&unreachable), None);
    }
}
