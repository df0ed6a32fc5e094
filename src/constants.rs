//! RLC AM NR wire-format constants and bitmasks.
//!
//! Defines the fixed field sizes, masks, and shifts of the AM data-PDU header
//! and the Status PDU (3GPP TS 38.322 Sections 6.2.2.4 and 6.2.2.5). All
//! multi-byte fields on the wire are big-endian, MSB-first within each byte.

// --- Sequence number spaces ---

/// Modulus of the 12-bit sequence number space.
pub const SN_MODULUS_12BIT: u32 = 1 << 12;
/// Modulus of the 18-bit sequence number space.
pub const SN_MODULUS_18BIT: u32 = 1 << 18;

// --- AM data-PDU header, fixed byte ---

/// Mask for the D/C bit (data/control discriminator) in the first header byte.
pub const DATA_HEADER_DC_MASK: u8 = 0x80;
/// Mask for the P (polling) bit in the first header byte.
pub const DATA_HEADER_POLL_MASK: u8 = 0x40;
/// Mask for the two SI (segmentation info) bits in the first header byte.
pub const DATA_HEADER_SI_MASK: u8 = 0x30;
/// Right-shift aligning the SI bits to the LSBs.
pub const DATA_HEADER_SI_SHIFT: u8 = 4;
/// Mask for the upper 4 SN bits in the first header byte (12-bit SN).
pub const DATA_HEADER_SN12_HIGH_MASK: u8 = 0x0F;
/// Reserved bits of the first header byte at 18-bit SN width; must be zero.
pub const DATA_HEADER_SN18_RESERVED_MASK: u8 = 0x0C;
/// Mask for the upper 2 SN bits in the first header byte (18-bit SN).
pub const DATA_HEADER_SN18_HIGH_MASK: u8 = 0x03;

// --- Status PDU, fixed part ---

/// Byte length of the fixed Status-PDU part (CPT + ACK_SN + E1), either SN width.
pub const STATUS_PDU_HEADER_SIZE_BYTES: usize = 3;
/// Mask for the 3-bit CPT (control PDU type) field in the first byte.
pub const STATUS_CPT_MASK: u8 = 0x70;
/// Right-shift aligning the CPT bits to the LSBs.
pub const STATUS_CPT_SHIFT: u8 = 4;
/// CPT value identifying a Status PDU; all other values are rejected.
pub const CONTROL_PDU_TYPE_STATUS: u8 = 0b000;

/// E1 bit (at least one NACK follows) in the third fixed byte, 12-bit SN.
pub const STATUS_12BIT_E1_MASK: u8 = 0x80;
/// Reserved bits of the third fixed byte at 12-bit SN width; must be zero.
pub const STATUS_12BIT_RESERVED_MASK: u8 = 0x7F;
/// E1 bit in the third fixed byte, 18-bit SN.
pub const STATUS_18BIT_E1_MASK: u8 = 0x02;
/// Reserved bit of the third fixed byte at 18-bit SN width; must be zero.
pub const STATUS_18BIT_RESERVED_MASK: u8 = 0x01;

// --- Status PDU, per-NACK extension byte ---

/// E1' bit (another NACK follows) in the NACK trailing byte, 12-bit SN.
pub const NACK_12BIT_E1_MASK: u8 = 0x08;
/// E2 bit (SO_START/SO_END pair follows), 12-bit SN.
pub const NACK_12BIT_E2_MASK: u8 = 0x04;
/// E3 bit (NACK range byte follows), 12-bit SN.
pub const NACK_12BIT_E3_MASK: u8 = 0x02;
/// Reserved bit of the NACK trailing byte at 12-bit SN width; must be zero.
pub const NACK_12BIT_RESERVED_MASK: u8 = 0x01;

/// E1' bit in the NACK trailing byte, 18-bit SN.
pub const NACK_18BIT_E1_MASK: u8 = 0x20;
/// E2 bit, 18-bit SN.
pub const NACK_18BIT_E2_MASK: u8 = 0x10;
/// E3 bit, 18-bit SN.
pub const NACK_18BIT_E3_MASK: u8 = 0x08;
/// Reserved bits of the NACK trailing byte at 18-bit SN width; must be zero.
pub const NACK_18BIT_RESERVED_MASK: u8 = 0x07;

// --- Status PDU, per-NACK wire sizes ---

/// NACK_SN plus extension bits, 12-bit SN width.
pub const NACK_SN_EXT_SIZE_12BIT: usize = 2;
/// NACK_SN plus extension bits, 18-bit SN width.
pub const NACK_SN_EXT_SIZE_18BIT: usize = 3;
/// SO_START and SO_END pair, present when E2 is set.
pub const NACK_SO_SIZE_BYTES: usize = 4;
/// NACK range count, present when E3 is set.
pub const NACK_RANGE_SIZE_BYTES: usize = 1;

/// NACK-list preallocation for the common status-report case.
pub const STATUS_PDU_TYPICAL_NACKS: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sn_moduli_match_field_widths() {
        assert_eq!(SN_MODULUS_12BIT, 4096);
        assert_eq!(SN_MODULUS_18BIT, 262144);
    }

    #[test]
    fn fixed_part_masks_are_disjoint_12bit() {
        assert_eq!(STATUS_12BIT_E1_MASK & STATUS_12BIT_RESERVED_MASK, 0);
        assert_eq!(
            STATUS_12BIT_E1_MASK | STATUS_12BIT_RESERVED_MASK,
            0xFF,
            "E1 and reserved bits must cover the whole byte"
        );
    }

    #[test]
    fn nack_extension_masks_are_disjoint() {
        let all_12 = NACK_12BIT_E1_MASK
            | NACK_12BIT_E2_MASK
            | NACK_12BIT_E3_MASK
            | NACK_12BIT_RESERVED_MASK;
        assert_eq!(all_12, 0x0F, "low nibble of the 12-bit NACK trailing byte");

        let all_18 = NACK_18BIT_E1_MASK
            | NACK_18BIT_E2_MASK
            | NACK_18BIT_E3_MASK
            | NACK_18BIT_RESERVED_MASK;
        assert_eq!(all_18, 0x3F, "low 6 bits of the 18-bit NACK trailing byte");
    }

    #[test]
    fn data_header_masks_cover_first_byte() {
        assert_eq!(
            DATA_HEADER_DC_MASK
                | DATA_HEADER_POLL_MASK
                | DATA_HEADER_SI_MASK
                | DATA_HEADER_SN12_HIGH_MASK,
            0xFF
        );
        assert_eq!(
            DATA_HEADER_SN18_RESERVED_MASK | DATA_HEADER_SN18_HIGH_MASK,
            DATA_HEADER_SN12_HIGH_MASK
        );
    }
}
