use crate::{MIN_RTCP_PACKET_SIZE, MIN_RTP_PACKET_SIZE, RTCP_CONFLICT_AVOIDANCE, RTP_VERSION};

/// The marker bit of an RTP header shares the top bit of the second octet
/// with the RTCP packet type.
const PAYLOAD_TYPE_MASK: u8 = 0x7f;

/// What a datagram received on a multiplexed port carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    Rtcp,
    Rtp,
    Unknown,
}

#[inline]
fn is_version_ok(bytes: &[u8]) -> bool {
    bytes[0] >> 6 == RTP_VERSION
}

/// Check whether the buffer is an RTCP packet.
///
/// Only the length, the version bits and the second octet are looked at,
/// the rest of the header is left to [`crate::Header::decode`].
///
/// # Test
///
/// ```
/// use rtcp_demux_codec::is_rtcp_packet;
///
/// assert!(is_rtcp_packet(&[0x81, 0xc9, 0x00, 0x07]));
/// assert!(!is_rtcp_packet(&[0x80, 0x08, 0x00, 0x01]));
/// assert!(!is_rtcp_packet(&[0x80, 0xc8, 0x00]));
/// assert!(!is_rtcp_packet(&[]));
/// ```
pub fn is_rtcp_packet(bytes: &[u8]) -> bool {
    if bytes.len() < MIN_RTCP_PACKET_SIZE {
        return false;
    }

    is_version_ok(bytes) && RTCP_CONFLICT_AVOIDANCE.contains(&(bytes[1] & PAYLOAD_TYPE_MASK))
}

/// Check whether the buffer is an RTP data packet.
///
/// A buffer that passes [`is_rtcp_packet`] is never an RTP packet.
///
/// # Test
///
/// ```
/// use rtcp_demux_codec::is_rtp_packet;
///
/// let buffer = [
///     0x90, 0x72, 0x04, 0xf1, 0xf8, 0x87, 0x3f, 0xad, 0x67, 0xfe,
///     0x9d, 0xfc,
/// ];
///
/// assert!(is_rtp_packet(&buffer));
/// assert!(!is_rtp_packet(&buffer[..11]));
/// ```
pub fn is_rtp_packet(bytes: &[u8]) -> bool {
    if bytes.len() < MIN_RTP_PACKET_SIZE {
        return false;
    }

    is_version_ok(bytes) && !is_rtcp_packet(bytes)
}

/// Route a received buffer to the RTP or RTCP handler.
///
/// # Test
///
/// ```
/// use rtcp_demux_codec::{PacketKind, classify};
///
/// assert_eq!(classify(&[0x80, 0xc8, 0x00, 0x06]), PacketKind::Rtcp);
/// assert_eq!(classify(&[0x00, 0x01, 0x00, 0x00]), PacketKind::Unknown);
/// ```
pub fn classify(bytes: &[u8]) -> PacketKind {
    if is_rtcp_packet(bytes) {
        PacketKind::Rtcp
    } else if is_rtp_packet(bytes) {
        PacketKind::Rtp
    } else {
        PacketKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_buffers_are_never_rtcp() {
        for len in 0..MIN_RTCP_PACKET_SIZE {
            assert!(!is_rtcp_packet(&[0x80, 0xc8, 0x00][..len]));
        }
    }

    #[test]
    fn marker_bit_is_ignored() {
        // 0xc8 & 0x7f == 72, 0x48 is the same payload type without the marker.
        assert!(is_rtcp_packet(&[0x80, 0xc8, 0x00, 0x06]));
        assert!(is_rtcp_packet(&[0x80, 0x48, 0x00, 0x06]));
    }

    #[test]
    fn conflict_avoidance_bounds() {
        assert!(!is_rtcp_packet(&[0x80, 71, 0x00, 0x00]));
        assert!(is_rtcp_packet(&[0x80, 72, 0x00, 0x00]));
        assert!(is_rtcp_packet(&[0x80, 76, 0x00, 0x00]));
        assert!(!is_rtcp_packet(&[0x80, 77, 0x00, 0x00]));
        assert!(!is_rtcp_packet(&[0x80, 0xcd, 0x00, 0x00]));
    }

    #[test]
    fn wrong_version_is_never_rtcp() {
        for first in [0x00u8, 0x40, 0xc0, 0x3f] {
            assert!(!is_rtcp_packet(&[first, 0xc8, 0x00, 0x06]));
        }
    }

    #[test]
    fn classify_media() {
        let mut buffer = [0u8; MIN_RTP_PACKET_SIZE];
        buffer[0] = 0x80;
        buffer[1] = 0x08;

        assert_eq!(classify(&buffer), PacketKind::Rtp);
        assert_eq!(classify(&buffer[..4]), PacketKind::Unknown);

        buffer[1] = 0xc9;
        assert_eq!(classify(&buffer), PacketKind::Rtcp);
    }
}
