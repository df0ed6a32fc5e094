//! Error types for the RLC AM wire codec.
//!
//! Distinguishes parsing errors (malformed or truncated wire input) from
//! building errors (capacity violations in caller-supplied buffers), with a
//! top-level [`RlcError`] consolidating both. The `thiserror` crate is used
//! for ergonomic error definitions.
//!
//! Decode-time failures abort the current call; no partial rollback of a
//! status container is performed. Callers reset the container after any
//! reported parse failure before reusing it.

use std::fmt;

use thiserror::Error;

/// Location within a PDU where a parse ran out of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseContext {
    /// Fixed part of the AM data-PDU header (D/C, P, SI, SN).
    DataHeaderFixed,
    /// 16-bit segment offset of the AM data-PDU header.
    DataHeaderSegmentOffset,
    /// Fixed part of the Status PDU (CPT, ACK_SN, E1).
    StatusFixedPart,
    /// NACK_SN and extension bits of one NACK record.
    NackSn,
    /// SO_START/SO_END pair of one NACK record.
    NackSegmentOffset,
    /// Range byte of one NACK record.
    NackRange,
}

impl fmt::Display for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseContext::DataHeaderFixed => "data PDU header fixed part",
            ParseContext::DataHeaderSegmentOffset => "data PDU header segment offset",
            ParseContext::StatusFixedPart => "status PDU fixed part",
            ParseContext::NackSn => "NACK sequence number",
            ParseContext::NackSegmentOffset => "NACK segment offset pair",
            ParseContext::NackRange => "NACK range",
        };
        f.write_str(name)
    }
}

/// Wire structure in which a reserved-bit violation was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireStructure {
    /// First byte of the AM data-PDU header (18-bit SN reserved bits).
    DataHeader,
    /// Third byte of the Status-PDU fixed part.
    StatusFixedPart,
    /// Trailing extension byte of a NACK record.
    NackExtension,
}

impl fmt::Display for WireStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireStructure::DataHeader => "data PDU header",
            WireStructure::StatusFixedPart => "status PDU fixed part",
            WireStructure::NackExtension => "NACK extension byte",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while parsing a PDU from wire bytes.
///
/// These indicate malformed or truncated input; the offending PDU is
/// discarded by the caller, never retried at this layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RlcParsingError {
    /// Decode cursor would pass the end of the supplied byte region.
    #[error("Incomplete PDU: needed {needed} bytes, got {got} for {context}")]
    NotEnoughData {
        needed: usize,
        got: usize,
        context: ParseContext,
    },

    /// Bits that must be zero on the wire were set.
    #[error("Malformed PDU: reserved bits set in {structure}")]
    ReservedBitsSet { structure: WireStructure },

    /// The CPT field did not carry the status-PDU type value.
    #[error("Invalid control PDU type: 0b{0:03b}")]
    InvalidControlPduType(u8),
}

/// Errors that can occur while writing a PDU into a caller-supplied buffer.
///
/// Building trusts its in-memory input; the only failure modes are capacity
/// preconditions of the output region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RlcBuildingError {
    /// Output slice shorter than the packed PDU.
    #[error("Buffer too small: needed {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// Not enough unused capacity before the region start to prepend a header.
    #[error("Insufficient headroom: needed {needed} bytes before region start, have {available}")]
    InsufficientHeadroom { needed: usize, available: usize },
}

/// Main error type for RLC wire-codec operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RlcError {
    /// Error while parsing wire bytes.
    #[error("Parsing error: {0}")]
    Parsing(#[from] RlcParsingError),

    /// Error while building wire bytes.
    #[error("Building error: {0}")]
    Building(#[from] RlcBuildingError),
}
