//! ## RTP Control Protocol (RTCP) common header
//!
//! [RFC3550]: https://tools.ietf.org/html/rfc3550
//! [RFC5761]: https://tools.ietf.org/html/rfc5761
//!
//! The RTP control protocol (RTCP) is based on the periodic transmission
//! of control packets to all participants in the session, using the same
//! distribution mechanism as the data packets [RFC3550].  Every RTCP
//! packet begins with a fixed part similar to that of RTP data packets,
//! carrying the version, a padding flag, a 5-bit count (or feedback
//! format), the packet type and the length of the packet.
//!
//! When RTP and RTCP are multiplexed on a single port [RFC5761], the
//! receiver distinguishes them by the second octet: RTP payload types
//! 72-76 are reserved so that they never collide with the RTCP packet
//! types 200-204 once the marker bit is masked off.

pub mod classify;
pub mod compound;
pub mod header;

pub use self::{
    classify::{PacketKind, classify, is_rtcp_packet, is_rtp_packet},
    compound::Compound,
    header::{HEADER_SIZE, Header, MAX_COUNT, PacketType},
};

use std::ops::RangeInclusive;

/// Version of RTP, which is the same in RTCP packets as in RTP data packets.
pub const RTP_VERSION: u8 = 2;

/// Size of the fixed RTP header without CSRC identifiers.
pub const MIN_RTP_PACKET_SIZE: usize = 12;

/// Size of the RTCP common header, also the smallest possible RTCP packet.
pub const MIN_RTCP_PACKET_SIZE: usize = 4;

/// 72-76 reserved for RTCP conflict avoidance [RFC1889].
pub const RTCP_CONFLICT_AVOIDANCE: RangeInclusive<u8> = 72..=76;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("rtcp: invalid header")]
    InvalidHeader,
    #[error("rtcp: packet too short")]
    PacketTooShort,
    #[error("rtcp: invalid packet version")]
    BadVersion,
}
