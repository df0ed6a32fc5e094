//! Property-based tests for the RLC AM wire codec.
//!
//! Uses QuickCheck to generate random PDU contents and verify the codec
//! invariants: encode/decode round trips at both SN widths, exact length
//! accounting, and the equivalence of incremental and from-scratch packed
//! size tracking.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck as qc_quickcheck;
use rlcwire::{
    AmPduHeader, DataControl, NackRecord, SegmentOffset, SegmentRange, SegmentationInfo,
    SequenceNumber, SnSize, StatusPdu, parse_data_pdu_header, parse_status_pdu,
    serialize_data_pdu_header, serialize_status_pdu,
};

fn build_status(
    sn_size: SnSize,
    ack_sn: u32,
    nacks: &[(u32, Option<(u16, u16)>, Option<u8>)],
) -> StatusPdu {
    let mut status = StatusPdu::new(sn_size);
    status.set_ack_sn(SequenceNumber::new(ack_sn % sn_size.modulus()));
    for &(sn, so, range) in nacks {
        status.push_nack(NackRecord {
            nack_sn: SequenceNumber::new(sn % sn_size.modulus()),
            so: so.map(|(start, end)| SegmentRange {
                start: SegmentOffset::new(start),
                end: SegmentOffset::new(end),
            }),
            range,
        });
    }
    status
}

fn status_round_trips(status: &StatusPdu) -> bool {
    let mut out = vec![0u8; status.packed_size()];
    let written = match serialize_status_pdu(status, &mut out) {
        Ok(written) => written,
        Err(_) => return false,
    };
    if written != status.packed_size() {
        return false;
    }

    let mut decoded = StatusPdu::new(status.sn_size());
    match parse_status_pdu(&out, &mut decoded) {
        Ok(consumed) => consumed == written && decoded == *status,
        Err(_) => false,
    }
}

/// Property: any status content round-trips bit-exactly at 12-bit width and
/// the encoded length equals the container's packed size.
#[qc_quickcheck]
fn status_round_trip_12bit(
    ack_sn: u32,
    nacks: Vec<(u32, Option<(u16, u16)>, Option<u8>)>,
) -> TestResult {
    if nacks.len() > 64 {
        return TestResult::discard();
    }
    let status = build_status(SnSize::Size12, ack_sn, &nacks);
    TestResult::from_bool(status_round_trips(&status))
}

/// Property: any status content round-trips bit-exactly at 18-bit width.
#[qc_quickcheck]
fn status_round_trip_18bit(
    ack_sn: u32,
    nacks: Vec<(u32, Option<(u16, u16)>, Option<u8>)>,
) -> TestResult {
    if nacks.len() > 64 {
        return TestResult::discard();
    }
    let status = build_status(SnSize::Size18, ack_sn, &nacks);
    TestResult::from_bool(status_round_trips(&status))
}

/// Property: after any sequence of pushes, the incrementally tracked packed
/// size equals a from-scratch recomputation.
#[qc_quickcheck]
fn packed_size_incremental_matches_recompute(
    nacks: Vec<(u32, Option<(u16, u16)>, Option<u8>)>,
    use_18bit: bool,
) -> TestResult {
    if nacks.len() > 256 {
        return TestResult::discard();
    }
    let sn_size = if use_18bit {
        SnSize::Size18
    } else {
        SnSize::Size12
    };
    let mut status = build_status(sn_size, 0, &nacks);
    let incremental = status.packed_size();
    TestResult::from_bool(status.recompute_packed_size() == incremental)
}

/// Property: any valid data-PDU header round-trips and consumes exactly its
/// packed length, for all four SI variants at both widths.
#[qc_quickcheck]
fn data_header_round_trip(
    sn: u32,
    si_bits: u8,
    poll: bool,
    so: u16,
    use_18bit: bool,
) -> TestResult {
    let sn_size = if use_18bit {
        SnSize::Size18
    } else {
        SnSize::Size12
    };
    let si = SegmentationInfo::from_bits(si_bits);
    let header = AmPduHeader {
        dc: DataControl::Data,
        poll,
        si,
        sn_size,
        sn: SequenceNumber::new(sn % sn_size.modulus()),
        so: si.has_segment_offset().then_some(SegmentOffset::new(so)),
    };

    let mut out = [0u8; 8];
    let written = match serialize_data_pdu_header(&header, &mut out) {
        Ok(written) => written,
        Err(_) => return TestResult::failed(),
    };
    if written != header.packed_len() {
        return TestResult::failed();
    }

    match parse_data_pdu_header(&out[..written], sn_size) {
        Ok((decoded, consumed)) => {
            TestResult::from_bool(consumed == written && decoded == header)
        }
        Err(_) => TestResult::failed(),
    }
}

/// Property: a truncated status PDU never parses successfully once any byte
/// of a declared field is missing.
#[qc_quickcheck]
fn truncated_status_never_parses(ack_sn: u32, cut: usize) -> TestResult {
    let status = build_status(
        SnSize::Size12,
        ack_sn,
        &[(7, Some((1, 2)), Some(3)), (8, None, None)],
    );
    let mut out = vec![0u8; status.packed_size()];
    serialize_status_pdu(&status, &mut out).unwrap();

    if cut == 0 || cut >= out.len() {
        return TestResult::discard();
    }

    let mut decoded = StatusPdu::new(SnSize::Size12);
    TestResult::from_bool(parse_status_pdu(&out[..cut], &mut decoded).is_err())
}
