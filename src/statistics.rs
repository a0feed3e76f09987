use ahash::AHashMap;
use rtcp_demux_codec::PacketType;

/// A single counter update.
#[derive(Debug, Clone, Copy)]
pub enum Stats {
    ReceivedBytes(u64),
    ReceivedPkts(u64),
    RtcpPkts(u64),
    RtpPkts(u64),
    UnknownPkts(u64),
    ErrorPkts(u64),
    MalformedLines(u64),
    Kind(PacketType),
}

/// Counters of a single inspection run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub received_bytes: u64,
    pub received_pkts: u64,
    pub rtcp_pkts: u64,
    pub rtp_pkts: u64,
    pub unknown_pkts: u64,
    pub error_pkts: u64,
    pub malformed_lines: u64,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    counts: Counts,
    kinds: AHashMap<PacketType, u64>,
}

impl Statistics {
    /// # Test
    ///
    /// ```
    /// use rtcp_demux::statistics::{Statistics, Stats};
    /// use rtcp_demux_codec::PacketType;
    ///
    /// let mut statistics = Statistics::default();
    ///
    /// statistics.add(&Stats::ReceivedPkts(2));
    /// statistics.add(&Stats::Kind(PacketType::Goodbye));
    /// statistics.add(&Stats::Kind(PacketType::Goodbye));
    ///
    /// assert_eq!(statistics.counts().received_pkts, 2);
    /// assert_eq!(statistics.kind(PacketType::Goodbye), 2);
    /// assert_eq!(statistics.kind(PacketType::SenderReport), 0);
    /// ```
    pub fn add(&mut self, payload: &Stats) {
        match *payload {
            Stats::ReceivedBytes(v) => self.counts.received_bytes += v,
            Stats::ReceivedPkts(v) => self.counts.received_pkts += v,
            Stats::RtcpPkts(v) => self.counts.rtcp_pkts += v,
            Stats::RtpPkts(v) => self.counts.rtp_pkts += v,
            Stats::UnknownPkts(v) => self.counts.unknown_pkts += v,
            Stats::ErrorPkts(v) => self.counts.error_pkts += v,
            Stats::MalformedLines(v) => self.counts.malformed_lines += v,
            Stats::Kind(kind) => *self.kinds.entry(kind).or_default() += 1,
        }
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    /// Number of individual RTCP packets seen with the given type.
    pub fn kind(&self, kind: PacketType) -> u64 {
        self.kinds.get(&kind).copied().unwrap_or(0)
    }

    /// Per packet type counters, sorted by the wire value.
    pub fn kinds(&self) -> Vec<(PacketType, u64)> {
        let mut kinds = self
            .kinds
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect::<Vec<_>>();

        kinds.sort_by_key(|(k, _)| u8::from(*k));
        kinds
    }
}
