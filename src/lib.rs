//! `rlcwire`: wire encoding and decoding of RLC Acknowledged-Mode PDUs.
//!
//! This library implements the bit-packed binary formats of the RLC AM
//! control plane used for selective-repeat ARQ on a cellular link layer
//! (3GPP TS 38.322): the header prepended to AM data PDUs and the Status PDU
//! carrying the receiver's ACK/NACK state, at both supported sequence-number
//! widths (12-bit and 18-bit).
//!
//! ## Core Concepts
//!
//! - **[`SnSize`]**: the configured sequence-number width of a bearer. Fixed
//!   per logical channel; every codec entry point carries or takes it.
//! - **[`AmPduHeader`]**: the fixed-plus-optional header in front of a data
//!   fragment, parsed and serialized by [`parse_data_pdu_header`],
//!   [`serialize_data_pdu_header`], and [`prepend_data_pdu_header`].
//! - **[`StatusPdu`]**: the in-memory status report, owning an ordered list
//!   of [`NackRecord`] entries and tracking its packed wire size
//!   incrementally. Driven by [`parse_status_pdu`] and
//!   [`serialize_status_pdu`].
//! - **[`PduBuffer`]**: an owned byte region with tracked headroom, so a
//!   header can be prepended in front of an already-buffered payload without
//!   moving it.
//!
//! The retransmission state machine that decides when to send a status
//! report, and which SNs it names, lives outside this crate; so do transport
//! and radio scheduling. Malformed or truncated input is a terminal,
//! immediately-reported condition for the affected call, never retried here.
//!
//! ## Quick Start
//!
//! ```rust
//! use rlcwire::{
//!     NackRecord, SequenceNumber, SnSize, StatusPdu, parse_status_pdu, serialize_status_pdu,
//! };
//!
//! fn main() -> Result<(), rlcwire::RlcError> {
//!     // Receiver side: report everything up to SN 5 received, except SN 3.
//!     let mut status = StatusPdu::new(SnSize::Size12);
//!     status.set_ack_sn(SequenceNumber::new(5));
//!     status.push_nack(NackRecord {
//!         nack_sn: SequenceNumber::new(3),
//!         so: None,
//!         range: None,
//!     });
//!
//!     let mut wire = [0u8; 16];
//!     let written = serialize_status_pdu(&status, &mut wire)?;
//!     assert_eq!(written, status.packed_size());
//!
//!     // Transmitter side: decode the report back.
//!     let mut decoded = StatusPdu::new(SnSize::Size12);
//!     parse_status_pdu(&wire[..written], &mut decoded)?;
//!     assert_eq!(decoded.ack_sn(), 5);
//!     assert_eq!(decoded.nacks().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod buffer;
pub mod constants;
pub mod error;
pub mod fields;
pub mod packet_processor;
pub mod packet_types;
pub mod types;

pub use buffer::PduBuffer;
pub use error::{
    ParseContext, RlcBuildingError, RlcError, RlcParsingError, WireStructure,
};
pub use packet_processor::{
    parse_data_pdu_header, parse_status_pdu, prepend_data_pdu_header, serialize_data_pdu_header,
    serialize_status_pdu, serialize_status_pdu_into,
};
pub use packet_types::{
    AmPduHeader, ControlPduType, DataControl, NackRecord, SegmentRange, SegmentationInfo,
    StatusPdu,
};
pub use types::{SegmentOffset, SequenceNumber, SnSize};
