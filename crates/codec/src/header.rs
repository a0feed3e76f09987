use bytes::{BufMut, BytesMut};
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::{Error, MIN_RTCP_PACKET_SIZE, RTP_VERSION};

const VERSION_SHIFT: u8 = 6;
const PADDING_MASK: u8 = 0b00100000;
const COUNT_MASK: u8 = 0b00011111;

/// Largest value the 5-bit count (or feedback format) can carry.
pub const MAX_COUNT: u8 = 31;

/// The common header is always 4 bytes on the wire.
pub const HEADER_SIZE: usize = MIN_RTCP_PACKET_SIZE;

/// RTCP packet types registered with IANA.
///
/// [IANA]: https://www.iana.org/assignments/rtp-parameters/rtp-parameters.xhtml#rtp-parameters-4
///
/// Types that are not in the registry are kept as [`PacketType::Unknown`],
/// it is up to the caller to drop or forward them.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
pub enum PacketType {
    /// RFC 3550, 6.4.1
    SenderReport = 200,
    /// RFC 3550, 6.4.2
    ReceiverReport = 201,
    /// RFC 3550, 6.5
    SourceDescription = 202,
    /// RFC 3550, 6.6
    Goodbye = 203,
    /// RFC 3550, 6.7
    ApplicationDefined = 204,
    /// RFC 4585, 6051
    TransportSpecificFeedback = 205,
    /// RFC 4585, 6.3
    PayloadSpecificFeedback = 206,
    /// RFC 3611
    ExtendedReport = 207,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// RTCP common header
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|    RC   |       PT      |             length            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The version is not stored, a decoded header always has version 2 and
/// an encoded header always writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// padding (P): 1 bit
    /// If the padding bit is set, this individual RTCP packet contains
    /// some additional padding octets at the end which are not part of
    /// the control information but are included in the length field.  The
    /// last octet of the padding is a count of how many padding octets
    /// should be ignored, including itself (it will be a multiple of
    /// four).
    pub padding: bool,
    /// reception report count (RC) or feedback message type (FMT): 5 bits
    /// The meaning depends on the packet type. A value of zero is valid.
    pub count: u8,
    /// packet type (PT): 8 bits
    pub kind: PacketType,
    /// length: 16 bits
    /// The length of this RTCP packet in 32-bit words minus one,
    /// including the header and any padding.  (The offset of one makes
    /// zero a valid length and avoids a possible infinite loop in
    /// scanning a compound RTCP packet, while counting 32-bit words
    /// avoids a validity check for a multiple of 4.)
    pub length: u16,
}

impl Header {
    pub fn new(kind: PacketType, count: u8, length: u16) -> Self {
        Self {
            padding: false,
            count,
            kind,
            length,
        }
    }

    pub fn with_padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }

    /// A header can only be encoded when the count fits in 5 bits.
    ///
    /// # Test
    ///
    /// ```
    /// use rtcp_demux_codec::{Header, PacketType};
    ///
    /// assert!(Header::new(PacketType::ReceiverReport, 31, 1).validate());
    /// assert!(!Header::new(PacketType::ReceiverReport, 32, 1).validate());
    /// ```
    pub fn validate(&self) -> bool {
        self.count <= MAX_COUNT
    }

    /// Size in bytes of the whole packet this header describes, including
    /// the header itself and any padding.
    ///
    /// # Test
    ///
    /// ```
    /// use rtcp_demux_codec::{Header, PacketType};
    ///
    /// assert_eq!(Header::new(PacketType::SenderReport, 0, 6).packet_size(), 28);
    /// assert_eq!(Header::new(PacketType::Goodbye, 0, 0).packet_size(), 4);
    /// ```
    pub fn packet_size(&self) -> usize {
        (self.length as usize + 1) * 4
    }

    /// Read the packet size without decoding the rest of the header.
    ///
    /// # Test
    ///
    /// ```
    /// use rtcp_demux_codec::Header;
    ///
    /// let buffer = [
    ///     0x80, 0xc8, 0x00, 0x06, 0x79, 0x26, 0x69, 0x55,
    ///     0xe8, 0xe2, 0xe2, 0x17, 0xd4, 0x2f, 0x05, 0x91,
    ///     0x36, 0x01, 0xb0, 0xaf, 0x34, 0x85, 0x78, 0x5e,
    ///     0x2d, 0xbc, 0x2a, 0x98
    /// ];
    ///
    /// assert_eq!(Header::peek_size(&buffer).unwrap(), 28);
    /// assert!(Header::peek_size(&buffer[..3]).is_err());
    /// ```
    pub fn peek_size(bytes: &[u8]) -> Result<usize, Error> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::PacketTooShort);
        }

        let length = u16::from_be_bytes([bytes[2], bytes[3]]);
        Ok((length as usize + 1) * 4)
    }

    /// Append the header to the buffer.
    ///
    /// Nothing is written if the header does not pass [`Header::validate`].
    ///
    /// # Test
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use rtcp_demux_codec::{Header, PacketType};
    ///
    /// let mut bytes = BytesMut::with_capacity(1500);
    /// Header::new(PacketType::Goodbye, 1, 1)
    ///     .with_padding(true)
    ///     .encode(&mut bytes)
    ///     .unwrap();
    ///
    /// assert_eq!(&bytes[..], &[0xa1, 0xcb, 0x00, 0x01]);
    /// ```
    pub fn encode(&self, bytes: &mut BytesMut) -> Result<(), Error> {
        bytes.put_slice(&self.to_bytes()?);
        Ok(())
    }

    /// # Test
    ///
    /// ```
    /// use rtcp_demux_codec::{Error, Header, PacketType};
    ///
    /// let header = Header::new(PacketType::SenderReport, 0, 6);
    /// assert_eq!(header.to_bytes(), Ok([0x80, 0xc8, 0x00, 0x06]));
    ///
    /// let header = Header::new(PacketType::SenderReport, 32, 6);
    /// assert_eq!(header.to_bytes(), Err(Error::InvalidHeader));
    /// ```
    pub fn to_bytes(&self) -> Result<[u8; HEADER_SIZE], Error> {
        if !self.validate() {
            return Err(Error::InvalidHeader);
        }

        let mut first = RTP_VERSION << VERSION_SHIFT;
        if self.padding {
            first |= PADDING_MASK;
        }

        first |= self.count;

        let [high, low] = self.length.to_be_bytes();
        Ok([first, self.kind.into(), high, low])
    }

    /// Decode the common header, bytes after the first four are ignored.
    ///
    /// # Test
    ///
    /// ```
    /// use rtcp_demux_codec::{Header, PacketType};
    ///
    /// let header = Header::decode(&[0x80, 0xc8, 0x00, 0x06]).unwrap();
    ///
    /// assert!(!header.padding);
    /// assert_eq!(header.count, 0);
    /// assert_eq!(header.kind, PacketType::SenderReport);
    /// assert_eq!(header.length, 6);
    /// ```
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::PacketTooShort);
        }

        if bytes[0] >> VERSION_SHIFT != RTP_VERSION {
            return Err(Error::BadVersion);
        }

        Ok(Self {
            padding: bytes[0] & PADDING_MASK != 0,
            count: bytes[0] & COUNT_MASK,
            kind: PacketType::from(bytes[1]),
            length: u16::from_be_bytes([bytes[2], bytes[3]]),
        })
    }
}

impl TryFrom<&[u8]> for Header {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(bytes)
    }
}
