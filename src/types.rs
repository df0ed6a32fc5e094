//! Core type definitions for the RLC AM wire codec.
//!
//! Provides zero-cost newtypes to prevent field mixups at compile time, plus
//! the [`SnSize`] configuration enum that fixes every sequence-number field
//! width in this crate. All newtypes use `#[repr(transparent)]` for guaranteed
//! zero runtime cost.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::constants::{
    NACK_SN_EXT_SIZE_12BIT, NACK_SN_EXT_SIZE_18BIT, SN_MODULUS_12BIT, SN_MODULUS_18BIT,
};

/// Macro to generate protocol-scalar newtype wrappers with common implementations.
macro_rules! rlc_newtype {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) => $prefix:literal
        $(, custom_methods: { $($custom:tt)* })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Creates a new instance
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Raw value
            #[inline]
            pub const fn value(self) -> $inner {
                self.0
            }

            /// Wrapping addition
            #[inline]
            pub const fn wrapping_add(self, rhs: $inner) -> Self {
                Self(self.0.wrapping_add(rhs))
            }

            $($($custom)*)?
        }

        // Display with custom prefix
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        // Deref for transparent access
        impl Deref for $name {
            type Target = $inner;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        // From/Into conversions
        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        // Enable direct comparisons with raw values
        impl PartialEq<$inner> for $name {
            #[inline]
            fn eq(&self, other: &$inner) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for $inner {
            #[inline]
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

rlc_newtype!(
    /// RLC sequence number. Valid values are below the modulus of the
    /// configured [`SnSize`]; the codec masks on write and never produces
    /// out-of-range values on read.
    SequenceNumber(u32) => "SN",
    custom_methods: {
        /// Sentinel for "no sequence number set yet". Outside both SN spaces.
        pub const INVALID: Self = Self::new(u32::MAX);
    }
);

rlc_newtype!(
    /// Byte offset of a segment within its original unsegmented SDU.
    SegmentOffset(u16) => "SO",
    custom_methods: {
        /// Converts the offset to big-endian bytes.
        #[inline]
        pub const fn to_be_bytes(self) -> [u8; 2] {
            self.0.to_be_bytes()
        }
    }
);

/// Configured sequence-number width of an AM bearer.
///
/// Fixed per logical channel; selects field widths and the SN modulus for
/// every sequence-number-valued field in both the data-PDU header and the
/// Status PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnSize {
    /// 12-bit sequence numbers (modulus 4096).
    Size12,
    /// 18-bit sequence numbers (modulus 262144).
    Size18,
}

impl SnSize {
    /// Number of bits carried by a sequence-number field at this width.
    #[inline]
    pub const fn bits(self) -> u8 {
        match self {
            SnSize::Size12 => 12,
            SnSize::Size18 => 18,
        }
    }

    /// Sequence number modulus at this width.
    #[inline]
    pub const fn modulus(self) -> u32 {
        match self {
            SnSize::Size12 => SN_MODULUS_12BIT,
            SnSize::Size18 => SN_MODULUS_18BIT,
        }
    }

    /// Whether `sn` is representable at this width.
    #[inline]
    pub fn contains(self, sn: SequenceNumber) -> bool {
        sn.value() < self.modulus()
    }

    /// Wire size of one NACK_SN plus its extension bits at this width.
    #[inline]
    pub const fn nack_sn_ext_len(self) -> usize {
        match self {
            SnSize::Size12 => NACK_SN_EXT_SIZE_12BIT,
            SnSize::Size18 => NACK_SN_EXT_SIZE_18BIT,
        }
    }
}

impl fmt::Display for SnSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bit", self.bits())
    }
}
