//! Serialization and deserialization of RLC AM PDUs.
//!
//! This module provides the low-level utilities to:
//! 1. Deserialize the AM data-PDU header preceding a data fragment into an
//!    [`AmPduHeader`], and serialize it back, including prepending it in
//!    front of an already-buffered payload.
//! 2. Deserialize a Status PDU into a [`StatusPdu`] container and serialize
//!    a container back to wire bytes, in both supported SN widths.
//!
//! Wire layout follows 3GPP TS 38.322 (Sections 6.2.2.4 and 6.2.2.5). The
//! two SN widths are structurally identical state machines differing only in
//! field splits, so each direction has one private function per width and a
//! public dispatch wrapper.

use crate::buffer::PduBuffer;
use crate::constants::*;
use crate::error::{ParseContext, RlcBuildingError, RlcParsingError, WireStructure};
use crate::fields::{ByteReader, ByteWriter};
use crate::packet_types::{
    AmPduHeader, ControlPduType, DataControl, NackRecord, SegmentRange, SegmentationInfo,
    StatusPdu,
};
use crate::types::{SegmentOffset, SequenceNumber, SnSize};

/// Parses an AM data-PDU header from the start of `data`.
///
/// Reads the fixed byte (D/C, P, SI), the sequence number at the configured
/// width, and the 16-bit segment offset when `SI` indicates a non-initial
/// segment. At 18-bit width the two reserved bits of the first byte must be
/// zero.
///
/// # Returns
/// The parsed header and the number of bytes consumed.
///
/// # Errors
/// - [`RlcParsingError::NotEnoughData`] - Header truncated
/// - [`RlcParsingError::ReservedBitsSet`] - 18-bit SN reserved bits non-zero
pub fn parse_data_pdu_header(
    data: &[u8],
    sn_size: SnSize,
) -> Result<(AmPduHeader, usize), RlcParsingError> {
    let mut reader = ByteReader::new(data);

    let first = reader.read_u8(ParseContext::DataHeaderFixed)?;
    let dc = DataControl::from_bit(first >> 7);
    let poll = first & DATA_HEADER_POLL_MASK != 0;
    let si = SegmentationInfo::from_bits((first & DATA_HEADER_SI_MASK) >> DATA_HEADER_SI_SHIFT);

    let sn = match sn_size {
        SnSize::Size12 => {
            let low = reader.read_u8(ParseContext::DataHeaderFixed)?;
            ((first & DATA_HEADER_SN12_HIGH_MASK) as u32) << 8 | low as u32
        }
        SnSize::Size18 => {
            if first & DATA_HEADER_SN18_RESERVED_MASK != 0 {
                return Err(RlcParsingError::ReservedBitsSet {
                    structure: WireStructure::DataHeader,
                });
            }
            let mid = reader.read_u8(ParseContext::DataHeaderFixed)?;
            let low = reader.read_u8(ParseContext::DataHeaderFixed)?;
            ((first & DATA_HEADER_SN18_HIGH_MASK) as u32) << 16
                | (mid as u32) << 8
                | low as u32
        }
    };

    let so = if si.has_segment_offset() {
        Some(SegmentOffset::new(
            reader.read_u16_be(ParseContext::DataHeaderSegmentOffset)?,
        ))
    } else {
        None
    };

    let header = AmPduHeader {
        dc,
        poll,
        si,
        sn_size,
        sn: SequenceNumber::new(sn),
        so,
    };
    debug_assert_eq!(reader.position(), header.packed_len());
    Ok((header, reader.position()))
}

/// Serializes an AM data-PDU header into the start of `out`.
///
/// The segment offset is written iff `header.so` is present; callers keep
/// `header.si` and `header.so` consistent.
///
/// # Returns
/// The number of bytes written, equal to `header.packed_len()`.
///
/// # Errors
/// - [`RlcBuildingError::BufferTooSmall`] - `out` shorter than the packed header
pub fn serialize_data_pdu_header(
    header: &AmPduHeader,
    out: &mut [u8],
) -> Result<usize, RlcBuildingError> {
    debug_assert_eq!(
        header.si.has_segment_offset(),
        header.so.is_some(),
        "segment offset presence must follow SI"
    );
    debug_assert!(header.sn_size.contains(header.sn), "SN exceeds modulus");

    let needed = header.packed_len();
    if out.len() < needed {
        return Err(RlcBuildingError::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let mut writer = ByteWriter::new(out);
    let mut first = header.dc.to_bit() << 7;
    if header.poll {
        first |= DATA_HEADER_POLL_MASK;
    }
    first |= header.si.to_bits() << DATA_HEADER_SI_SHIFT;

    let sn = header.sn.value();
    match header.sn_size {
        SnSize::Size12 => {
            first |= (sn >> 8) as u8 & DATA_HEADER_SN12_HIGH_MASK;
            writer.write_u8(first)?;
            writer.write_u8(sn as u8)?;
        }
        SnSize::Size18 => {
            first |= (sn >> 16) as u8 & DATA_HEADER_SN18_HIGH_MASK;
            writer.write_u8(first)?;
            writer.write_u8((sn >> 8) as u8)?;
            writer.write_u8(sn as u8)?;
        }
    }

    if let Some(so) = header.so {
        writer.write_u16_be(so.value())?;
    }

    debug_assert_eq!(writer.position(), needed);
    Ok(writer.position())
}

/// Serializes an AM data-PDU header into the headroom of `buf`, immediately
/// before the buffered payload.
///
/// Grows the region start backward by `header.packed_len()` bytes and fills
/// the exposed prefix; the payload bytes already in the region are untouched.
///
/// # Errors
/// - [`RlcBuildingError::InsufficientHeadroom`] - Not enough prefix capacity
pub fn prepend_data_pdu_header(
    header: &AmPduHeader,
    buf: &mut PduBuffer,
) -> Result<usize, RlcBuildingError> {
    let len = header.packed_len();
    let dst = buf.prepend(len)?;
    serialize_data_pdu_header(header, dst)
}

/// Parses a Status PDU from `data` into `status`.
///
/// The container is reset first and then populated through its `push_nack`
/// accessor; its configured SN width selects the wire variant. On failure
/// the container may hold the NACKs decoded before the error was detected;
/// callers reset it before reuse.
///
/// # Returns
/// The number of bytes consumed, equal to the container's packed size.
///
/// # Errors
/// - [`RlcParsingError::InvalidControlPduType`] - CPT is not the status type
/// - [`RlcParsingError::ReservedBitsSet`] - Reserved bits non-zero
/// - [`RlcParsingError::NotEnoughData`] - Declared fields pass the region end
pub fn parse_status_pdu(data: &[u8], status: &mut StatusPdu) -> Result<usize, RlcParsingError> {
    status.reset();
    let consumed = match status.sn_size() {
        SnSize::Size12 => parse_status_pdu_12bit(data, status)?,
        SnSize::Size18 => parse_status_pdu_18bit(data, status)?,
    };
    debug_assert_eq!(consumed, status.packed_size());
    Ok(consumed)
}

/// Reads the CPT field out of the first Status-PDU byte, rejecting every
/// value but the status type.
fn read_cpt(first: u8) -> Result<ControlPduType, RlcParsingError> {
    let bits = (first & STATUS_CPT_MASK) >> STATUS_CPT_SHIFT;
    ControlPduType::from_bits(bits).ok_or(RlcParsingError::InvalidControlPduType(bits))
}

fn parse_status_pdu_12bit(
    data: &[u8],
    status: &mut StatusPdu,
) -> Result<usize, RlcParsingError> {
    let mut reader = ByteReader::new(data);

    // Fixed part: CPT, ACK_SN, E1.
    let first = reader.read_u8(ParseContext::StatusFixedPart)?;
    read_cpt(first)?;

    let mut ack_sn = ((first & 0x0F) as u32) << 8;
    ack_sn |= reader.read_u8(ParseContext::StatusFixedPart)? as u32;

    let ext = reader.read_u8(ParseContext::StatusFixedPart)?;
    if ext & STATUS_12BIT_RESERVED_MASK != 0 {
        return Err(RlcParsingError::ReservedBitsSet {
            structure: WireStructure::StatusFixedPart,
        });
    }
    let mut e1 = ext & STATUS_12BIT_E1_MASK != 0;
    status.set_ack_sn(SequenceNumber::new(ack_sn));

    while e1 {
        let mut nack_sn = (reader.read_u8(ParseContext::NackSn)? as u32) << 4;
        let ext = reader.read_u8(ParseContext::NackSn)?;

        e1 = ext & NACK_12BIT_E1_MASK != 0;
        let e2 = ext & NACK_12BIT_E2_MASK != 0;
        let e3 = ext & NACK_12BIT_E3_MASK != 0;
        if ext & NACK_12BIT_RESERVED_MASK != 0 {
            return Err(RlcParsingError::ReservedBitsSet {
                structure: WireStructure::NackExtension,
            });
        }
        nack_sn |= ((ext & 0xF0) >> 4) as u32;

        let nack = read_nack_trailer(&mut reader, SequenceNumber::new(nack_sn), e2, e3)?;
        status.push_nack(nack);
    }

    Ok(reader.position())
}

fn parse_status_pdu_18bit(
    data: &[u8],
    status: &mut StatusPdu,
) -> Result<usize, RlcParsingError> {
    let mut reader = ByteReader::new(data);

    // Fixed part: CPT, ACK_SN, E1.
    let first = reader.read_u8(ParseContext::StatusFixedPart)?;
    read_cpt(first)?;

    let mut ack_sn = ((first & 0x0F) as u32) << 14;
    ack_sn |= (reader.read_u8(ParseContext::StatusFixedPart)? as u32) << 6;
    let ext = reader.read_u8(ParseContext::StatusFixedPart)?;
    ack_sn |= ((ext & 0xFC) as u32) >> 2;

    if ext & STATUS_18BIT_RESERVED_MASK != 0 {
        return Err(RlcParsingError::ReservedBitsSet {
            structure: WireStructure::StatusFixedPart,
        });
    }
    let mut e1 = ext & STATUS_18BIT_E1_MASK != 0;
    status.set_ack_sn(SequenceNumber::new(ack_sn));

    while e1 {
        let mut nack_sn = (reader.read_u8(ParseContext::NackSn)? as u32) << 10;
        nack_sn |= (reader.read_u8(ParseContext::NackSn)? as u32) << 2;
        let ext = reader.read_u8(ParseContext::NackSn)?;
        nack_sn |= ((ext & 0xC0) as u32) >> 6;

        e1 = ext & NACK_18BIT_E1_MASK != 0;
        let e2 = ext & NACK_18BIT_E2_MASK != 0;
        let e3 = ext & NACK_18BIT_E3_MASK != 0;
        if ext & NACK_18BIT_RESERVED_MASK != 0 {
            return Err(RlcParsingError::ReservedBitsSet {
                structure: WireStructure::NackExtension,
            });
        }

        let nack = read_nack_trailer(&mut reader, SequenceNumber::new(nack_sn), e2, e3)?;
        status.push_nack(nack);
    }

    Ok(reader.position())
}

/// Reads the optional SO pair and range byte that trail a NACK_SN at either
/// width, assembling the record.
fn read_nack_trailer(
    reader: &mut ByteReader<'_>,
    nack_sn: SequenceNumber,
    e2: bool,
    e3: bool,
) -> Result<NackRecord, RlcParsingError> {
    let so = if e2 {
        let start = reader.read_u16_be(ParseContext::NackSegmentOffset)?;
        let end = reader.read_u16_be(ParseContext::NackSegmentOffset)?;
        Some(SegmentRange {
            start: SegmentOffset::new(start),
            end: SegmentOffset::new(end),
        })
    } else {
        None
    };
    let range = if e3 {
        Some(reader.read_u8(ParseContext::NackRange)?)
    } else {
        None
    };
    Ok(NackRecord { nack_sn, so, range })
}

/// Serializes a Status PDU into the start of `out`.
///
/// # Returns
/// The number of bytes written, always equal to `status.packed_size()`.
///
/// # Errors
/// - [`RlcBuildingError::BufferTooSmall`] - `out` shorter than the packed report
pub fn serialize_status_pdu(
    status: &StatusPdu,
    out: &mut [u8],
) -> Result<usize, RlcBuildingError> {
    debug_assert!(
        status.sn_size().contains(status.ack_sn()),
        "ACK_SN exceeds modulus"
    );

    let needed = status.packed_size();
    if out.len() < needed {
        return Err(RlcBuildingError::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let written = match status.sn_size() {
        SnSize::Size12 => serialize_status_pdu_12bit(status, out)?,
        SnSize::Size18 => serialize_status_pdu_18bit(status, out)?,
    };
    debug_assert_eq!(written, needed);
    Ok(written)
}

/// Serializes a Status PDU at the end of `buf`, advancing the region end by
/// exactly the bytes written.
///
/// # Errors
/// - [`RlcBuildingError::BufferTooSmall`] - Not enough tail capacity
pub fn serialize_status_pdu_into(
    status: &StatusPdu,
    buf: &mut PduBuffer,
) -> Result<usize, RlcBuildingError> {
    let dst = buf.extend_tail(status.packed_size())?;
    serialize_status_pdu(status, dst)
}

fn serialize_status_pdu_12bit(
    status: &StatusPdu,
    out: &mut [u8],
) -> Result<usize, RlcBuildingError> {
    let mut writer = ByteWriter::new(out);
    let ack_sn = status.ack_sn().value();

    // Fixed part: D/C and CPT all zero, then ACK_SN split 4/8.
    writer.write_u8((ack_sn >> 8) as u8 & 0x0F)?;
    writer.write_u8(ack_sn as u8)?;
    let e1 = if status.nacks().is_empty() {
        0
    } else {
        STATUS_12BIT_E1_MASK
    };
    writer.write_u8(e1)?;

    let last = status.nacks().len().saturating_sub(1);
    for (i, nack) in status.nacks().iter().enumerate() {
        let nack_sn = nack.nack_sn.value();
        writer.write_u8((nack_sn >> 4) as u8)?;

        let mut ext = (nack_sn as u8 & 0x0F) << 4;
        if i < last {
            ext |= NACK_12BIT_E1_MASK;
        }
        if nack.so.is_some() {
            ext |= NACK_12BIT_E2_MASK;
        }
        if nack.range.is_some() {
            ext |= NACK_12BIT_E3_MASK;
        }
        writer.write_u8(ext)?;

        write_nack_trailer(&mut writer, nack)?;
    }

    Ok(writer.position())
}

fn serialize_status_pdu_18bit(
    status: &StatusPdu,
    out: &mut [u8],
) -> Result<usize, RlcBuildingError> {
    let mut writer = ByteWriter::new(out);
    let ack_sn = status.ack_sn().value();

    // Fixed part: D/C and CPT all zero, then ACK_SN split 4/8/6 with E1 in
    // the third byte.
    writer.write_u8((ack_sn >> 14) as u8 & 0x0F)?;
    writer.write_u8((ack_sn >> 6) as u8)?;
    let mut third = (ack_sn << 2) as u8 & 0xFC;
    if !status.nacks().is_empty() {
        third |= STATUS_18BIT_E1_MASK;
    }
    writer.write_u8(third)?;

    let last = status.nacks().len().saturating_sub(1);
    for (i, nack) in status.nacks().iter().enumerate() {
        let nack_sn = nack.nack_sn.value();
        writer.write_u8((nack_sn >> 10) as u8)?;
        writer.write_u8((nack_sn >> 2) as u8)?;

        let mut ext = (nack_sn << 6) as u8 & 0xC0;
        if i < last {
            ext |= NACK_18BIT_E1_MASK;
        }
        if nack.so.is_some() {
            ext |= NACK_18BIT_E2_MASK;
        }
        if nack.range.is_some() {
            ext |= NACK_18BIT_E3_MASK;
        }
        writer.write_u8(ext)?;

        write_nack_trailer(&mut writer, nack)?;
    }

    Ok(writer.position())
}

/// Writes the optional SO pair and range byte of one NACK record.
fn write_nack_trailer(
    writer: &mut ByteWriter<'_>,
    nack: &NackRecord,
) -> Result<(), RlcBuildingError> {
    if let Some(so) = nack.so {
        writer.write_u16_be(so.start.value())?;
        writer.write_u16_be(so.end.value())?;
    }
    if let Some(range) = nack.range {
        writer.write_u8(range)?;
    }
    Ok(())
}
