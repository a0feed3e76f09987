use crate::{Error, header::{HEADER_SIZE, Header}};

/// Compound RTCP packet
///
/// Individual RTCP packets are sent stacked in a single datagram, each one
/// starting with its own common header. The iterator yields every header
/// together with the bytes that follow it up to the declared packet size,
/// and stops after the first error.
///
/// # Test
///
/// ```
/// use rtcp_demux_codec::{Compound, PacketType};
///
/// let buffer = [
///     0x81, 0xc9, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
///     0x81, 0xcb, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
/// ];
///
/// let kinds = Compound::new(&buffer)
///     .map(|item| item.map(|(header, _)| header.kind))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
///
/// assert_eq!(kinds, [PacketType::ReceiverReport, PacketType::Goodbye]);
/// ```
pub struct Compound<'a> {
    bytes: &'a [u8],
    done: bool,
}

impl<'a> Compound<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, done: false }
    }

    /// Bytes that have not been walked yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes
    }

    fn next_packet(&mut self) -> Result<(Header, &'a [u8]), Error> {
        let header = Header::decode(self.bytes)?;
        let size = header.packet_size();
        if size > self.bytes.len() {
            return Err(Error::PacketTooShort);
        }

        let body = &self.bytes[HEADER_SIZE..size];
        self.bytes = &self.bytes[size..];
        Ok((header, body))
    }
}

impl<'a> Iterator for Compound<'a> {
    type Item = Result<(Header, &'a [u8]), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.bytes.is_empty() {
            return None;
        }

        let ret = self.next_packet();
        if ret.is_err() {
            self.done = true;
        }

        Some(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_packet_stops_iteration() {
        // second header declares 8 bytes but only 6 are left.
        let buffer = [
            0x80, 0xcb, 0x00, 0x00, 0x81, 0xcb, 0x00, 0x01, 0x00, 0x00,
        ];

        let mut compound = Compound::new(&buffer);
        let (header, body) = compound.next().unwrap().unwrap();
        assert_eq!(header.packet_size(), 4);
        assert!(body.is_empty());

        assert_eq!(compound.next(), Some(Err(Error::PacketTooShort)));
        assert_eq!(compound.next(), None);
        assert_eq!(compound.remaining().len(), 6);
    }

    #[test]
    fn bad_version_stops_iteration() {
        let buffer = [0x40, 0xc8, 0x00, 0x00, 0x80, 0xcb, 0x00, 0x00];

        let mut compound = Compound::new(&buffer);
        assert_eq!(compound.next(), Some(Err(Error::BadVersion)));
        assert_eq!(compound.next(), None);
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(Compound::new(&[]).count(), 0);
    }
}
