use std::io::BufRead;

use anyhow::{Result, anyhow};
use base64::{Engine, prelude::BASE64_STANDARD};
use rtcp_demux_codec::{Compound, Error, Header, PacketKind, classify, header::HEADER_SIZE};

use crate::{
    config::{Encoding, Input},
    statistics::{Statistics, Stats},
};

/// What the inspector found in one datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub kind: PacketKind,
    /// Every common header that decoded, in wire order.
    pub headers: Vec<Header>,
    /// The error that stopped decoding, if any.
    pub error: Option<Error>,
}

/// Reads captured datagrams line by line, routes them the way a
/// multiplexed RTP/RTCP port would and decodes the RTCP common headers.
pub struct Inspector {
    encoding: Encoding,
    compound: bool,
    statistics: Statistics,
}

impl Inspector {
    pub fn new(input: &Input) -> Self {
        Self {
            encoding: input.encoding,
            compound: input.compound,
            statistics: Statistics::default(),
        }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Decode one capture line, blank lines and `#` comments yield `None`.
    ///
    /// # Test
    ///
    /// ```
    /// use rtcp_demux::{config::Input, inspector::Inspector};
    ///
    /// let inspector = Inspector::new(&Input::default());
    ///
    /// assert_eq!(
    ///     inspector.decode_line("80 c8 00:06").unwrap(),
    ///     Some(vec![0x80, 0xc8, 0x00, 0x06])
    /// );
    /// assert_eq!(inspector.decode_line("  # comment").unwrap(), None);
    /// assert!(inspector.decode_line("80c").is_err());
    /// ```
    pub fn decode_line(&self, line: &str) -> Result<Option<Vec<u8>>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        Ok(Some(match self.encoding {
            Encoding::Hex => decode_hex(line)?,
            Encoding::Base64 => BASE64_STANDARD.decode(line)?,
        }))
    }

    pub fn inspect(&mut self, bytes: &[u8]) -> Inspection {
        self.statistics.add(&Stats::ReceivedPkts(1));
        self.statistics.add(&Stats::ReceivedBytes(bytes.len() as u64));

        let kind = classify(bytes);
        let mut inspection = Inspection {
            kind,
            headers: Vec::new(),
            error: None,
        };

        match kind {
            PacketKind::Rtp => {
                self.statistics.add(&Stats::RtpPkts(1));

                log::debug!(
                    "rtp packet: size={}, payload type={}",
                    bytes.len(),
                    bytes[1] & 0x7f
                );
            }
            PacketKind::Unknown => {
                self.statistics.add(&Stats::UnknownPkts(1));

                log::debug!("unknown packet: size={}", bytes.len());
            }
            PacketKind::Rtcp => {
                self.statistics.add(&Stats::RtcpPkts(1));

                if self.compound {
                    for item in Compound::new(bytes) {
                        match item {
                            Ok((header, body)) => {
                                self.accept(&header, body.len());
                                inspection.headers.push(header);
                            }
                            Err(e) => inspection.error = Some(e),
                        }
                    }
                } else {
                    match Header::decode(bytes) {
                        Ok(header) => {
                            self.accept(&header, bytes.len() - HEADER_SIZE);
                            inspection.headers.push(header);
                        }
                        Err(e) => inspection.error = Some(e),
                    }
                }

                if let Some(e) = inspection.error {
                    self.statistics.add(&Stats::ErrorPkts(1));

                    log::warn!("rtcp packet rejected: size={}, err={}", bytes.len(), e);
                }
            }
        }

        inspection
    }

    /// Inspect every datagram of a capture.
    ///
    /// Malformed lines are counted and skipped, only read errors are fatal.
    pub fn read<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::with_capacity(4096);
        let mut index = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            index += 1;

            let ret = std::str::from_utf8(&buf)
                .map_err(anyhow::Error::from)
                .and_then(|line| self.decode_line(line));

            match ret {
                Ok(Some(bytes)) => {
                    self.inspect(&bytes);
                }
                Ok(None) => (),
                Err(e) => {
                    self.statistics.add(&Stats::MalformedLines(1));

                    log::warn!("skip malformed line: line={}, err={}", index, e);
                }
            }
        }

        Ok(())
    }

    fn accept(&mut self, header: &Header, body: usize) {
        self.statistics.add(&Stats::Kind(header.kind));

        log::info!(
            "rtcp packet: kind={:?}, count={}, padding={}, length={}, body={}",
            header.kind,
            header.count,
            header.padding,
            header.length,
            body
        );
    }
}

/// Whitespace and `:` separators between digits are allowed.
fn decode_hex(line: &str) -> Result<Vec<u8>> {
    let digits = line
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .map(|c| {
            c.to_digit(16)
                .map(|v| v as u8)
                .ok_or_else(|| anyhow!("invalid hex digit: {c}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if digits.len() % 2 != 0 {
        return Err(anyhow!("odd number of hex digits"));
    }

    Ok(digits.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect())
}
