//! In-memory representations of the RLC AM PDUs handled by this crate.
//!
//! These structures are the decode targets and encode sources of the
//! functions in [`crate::packet_processor`]: the AM data-PDU header
//! ([`AmPduHeader`]) and the Status PDU ([`StatusPdu`] with its
//! [`NackRecord`] entries). The Status-PDU container tracks its packed wire
//! size incrementally; every mutation goes through [`StatusPdu::push_nack`]
//! or [`StatusPdu::reset`] so the cached size can never drift.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONTROL_PDU_TYPE_STATUS, NACK_RANGE_SIZE_BYTES, NACK_SO_SIZE_BYTES,
    STATUS_PDU_HEADER_SIZE_BYTES, STATUS_PDU_TYPICAL_NACKS,
};
use crate::types::{SegmentOffset, SequenceNumber, SnSize};

/// D/C field: discriminates data PDUs from control PDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataControl {
    /// Control PDU (D/C = 0).
    Control,
    /// Data PDU (D/C = 1).
    Data,
}

impl DataControl {
    /// Decodes the D/C field from its single wire bit.
    #[inline]
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 0x01 == 0 {
            DataControl::Control
        } else {
            DataControl::Data
        }
    }

    /// The single wire bit of this D/C value.
    #[inline]
    pub const fn to_bit(self) -> u8 {
        match self {
            DataControl::Control => 0,
            DataControl::Data => 1,
        }
    }
}

/// SI field: position of a data PDU's payload within its SDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentationInfo {
    /// PDU carries the complete SDU (SI = 00).
    FullSdu,
    /// First segment of a segmented SDU (SI = 01).
    FirstSegment,
    /// Last segment of a segmented SDU (SI = 10).
    LastSegment,
    /// Segment that is neither first nor last (SI = 11).
    MiddleSegment,
}

impl SegmentationInfo {
    /// Decodes the SI field from its two wire bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => SegmentationInfo::FullSdu,
            0b01 => SegmentationInfo::FirstSegment,
            0b10 => SegmentationInfo::LastSegment,
            _ => SegmentationInfo::MiddleSegment,
        }
    }

    /// The two wire bits of this SI value.
    #[inline]
    pub const fn to_bits(self) -> u8 {
        match self {
            SegmentationInfo::FullSdu => 0b00,
            SegmentationInfo::FirstSegment => 0b01,
            SegmentationInfo::LastSegment => 0b10,
            SegmentationInfo::MiddleSegment => 0b11,
        }
    }

    /// Whether a header with this SI carries the 16-bit segment offset.
    ///
    /// Only non-initial segments do; a full SDU or first segment starts at
    /// offset zero by definition.
    #[inline]
    pub const fn has_segment_offset(self) -> bool {
        matches!(
            self,
            SegmentationInfo::LastSegment | SegmentationInfo::MiddleSegment
        )
    }
}

/// CPT field of a control PDU. Only the status type is defined; every other
/// value is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlPduType {
    /// Status report (CPT = 000).
    Status,
}

impl ControlPduType {
    /// Decodes the CPT field from its three wire bits, if recognized.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & 0x07 == CONTROL_PDU_TYPE_STATUS {
            Some(ControlPduType::Status)
        } else {
            None
        }
    }
}

/// Header of an AM data PDU.
///
/// The segment offset is carried as an explicit `Option`: it is present on
/// the wire iff `si.has_segment_offset()`, and the writer is driven by the
/// option, not by whether the numeric offset happens to be zero. Callers
/// constructing headers keep `si` and `so` consistent; the serializer
/// debug-asserts the pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmPduHeader {
    /// Data/control discriminator. Data PDUs carry `Data`.
    pub dc: DataControl,
    /// Polling bit: transmitter requests a status report.
    pub poll: bool,
    /// Segmentation info of the carried payload.
    pub si: SegmentationInfo,
    /// Configured SN width of the bearer.
    pub sn_size: SnSize,
    /// Sequence number; must be below `sn_size.modulus()`.
    pub sn: SequenceNumber,
    /// Segment offset, present iff `si` indicates a non-initial segment.
    pub so: Option<SegmentOffset>,
}

impl AmPduHeader {
    /// Packed wire length of this header: a pure function of `si` and the SN
    /// width. 2 or 3 bytes without segment offset, 4 or 5 with it.
    pub const fn packed_len(&self) -> usize {
        let base = match self.sn_size {
            SnSize::Size12 => 2,
            SnSize::Size18 => 3,
        };
        if self.si.has_segment_offset() {
            base + 2
        } else {
            base
        }
    }
}

impl fmt::Display for AmPduHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?} P={} SI={:?} {} {}",
            self.dc,
            self.poll as u8,
            self.si,
            self.sn_size,
            self.sn
        )?;
        if let Some(so) = self.so {
            write!(f, " {so}")?;
        }
        write!(f, "]")
    }
}

/// Byte sub-range of an SDU that is specifically missing.
///
/// `start` and `end` are inclusive byte offsets within the NACKed SDU, as
/// carried by SO_START/SO_END on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRange {
    pub start: SegmentOffset,
    pub end: SegmentOffset,
}

/// One negatively-acknowledged entry of a status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NackRecord {
    /// Base sequence number of the NACK.
    pub nack_sn: SequenceNumber,
    /// Optional missing byte range within the NACKed SDU (E2).
    pub so: Option<SegmentRange>,
    /// Optional count of consecutive NACKed SNs starting at `nack_sn` (E3).
    pub range: Option<u8>,
}

impl NackRecord {
    /// Wire contribution of this record at the given SN width.
    pub const fn wire_size(&self, sn_size: SnSize) -> usize {
        let mut size = sn_size.nack_sn_ext_len();
        if self.so.is_some() {
            size += NACK_SO_SIZE_BYTES;
        }
        if self.range.is_some() {
            size += NACK_RANGE_SIZE_BYTES;
        }
        size
    }
}

impl fmt::Display for NackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NACK_{}", self.nack_sn)?;
        if let Some(so) = self.so {
            write!(f, " [{}..{}]", so.start, so.end)?;
        }
        if let Some(range) = self.range {
            write!(f, " +{range}")?;
        }
        Ok(())
    }
}

/// In-memory status report: cumulative ACK plus an ordered NACK list.
///
/// Constructed for a fixed SN width that never changes for the object's
/// life. Insertion order of NACKs is wire order. The packed wire size is
/// tracked incrementally across [`Self::push_nack`] and [`Self::reset`];
/// [`Self::recompute_packed_size`] exists as a from-scratch equivalence
/// check, not as the primary update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPdu {
    sn_size: SnSize,
    cpt: ControlPduType,
    ack_sn: SequenceNumber,
    nacks: Vec<NackRecord>,
    packed_size: usize,
}

impl StatusPdu {
    /// Creates an empty ACK-only report: no NACKs, `ack_sn` at the invalid
    /// sentinel, packed size equal to the fixed part.
    pub fn new(sn_size: SnSize) -> Self {
        Self {
            sn_size,
            cpt: ControlPduType::Status,
            ack_sn: SequenceNumber::INVALID,
            nacks: Vec::with_capacity(STATUS_PDU_TYPICAL_NACKS),
            packed_size: STATUS_PDU_HEADER_SIZE_BYTES,
        }
    }

    /// Returns to the just-constructed state. The SN width is retained.
    pub fn reset(&mut self) {
        self.cpt = ControlPduType::Status;
        self.ack_sn = SequenceNumber::INVALID;
        self.nacks.clear();
        self.packed_size = STATUS_PDU_HEADER_SIZE_BYTES;
    }

    /// Configured SN width of this report.
    #[inline]
    pub fn sn_size(&self) -> SnSize {
        self.sn_size
    }

    /// Control PDU type; always the status type for a live container.
    #[inline]
    pub fn cpt(&self) -> ControlPduType {
        self.cpt
    }

    /// Cumulative acknowledgment SN: the first SN not yet received.
    #[inline]
    pub fn ack_sn(&self) -> SequenceNumber {
        self.ack_sn
    }

    /// Sets the cumulative acknowledgment SN.
    #[inline]
    pub fn set_ack_sn(&mut self, ack_sn: SequenceNumber) {
        self.ack_sn = ack_sn;
    }

    /// NACK entries in wire order.
    #[inline]
    pub fn nacks(&self) -> &[NackRecord] {
        &self.nacks
    }

    /// Total byte length this report occupies on the wire.
    #[inline]
    pub fn packed_size(&self) -> usize {
        self.packed_size
    }

    /// Appends a NACK record, updating the packed size by the record's wire
    /// contribution.
    ///
    /// No SN-range or duplicate validation happens here; semantic
    /// correctness of the report is the caller's responsibility, this layer
    /// only guarantees structural packing correctness.
    pub fn push_nack(&mut self, nack: NackRecord) {
        self.packed_size += nack.wire_size(self.sn_size);
        self.nacks.push(nack);
    }

    /// Recomputes the packed size from scratch by summing all current NACKs
    /// and stores the result.
    ///
    /// For any container mutated only through `push_nack`/`reset` this is a
    /// no-op; it exists as the verifiable equivalence check for the
    /// incremental tracking.
    pub fn recompute_packed_size(&mut self) -> usize {
        self.packed_size = STATUS_PDU_HEADER_SIZE_BYTES
            + self
                .nacks
                .iter()
                .map(|nack| nack.wire_size(self.sn_size))
                .sum::<usize>();
        self.packed_size
    }
}

impl fmt::Display for StatusPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "STATUS({}) ACK_{}",
            self.sn_size, self.ack_sn
        )?;
        for nack in &self.nacks {
            write!(f, " {nack}")?;
        }
        Ok(())
    }
}
