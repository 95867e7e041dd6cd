//! 64-bit integers carried as two 32-bit words
//!
//! Slice `long` values cannot be represented by a JSON number in general, so
//! they travel as a pair of 32-bit halves. [`Long::to_number`] derives the
//! numeric value used by the plain form: it is exact inside the safe integer
//! range (|n| < 2^53) and saturates to ±Infinity outside it.

use std::fmt;

/// Largest integer a double represents exactly together with all its
/// predecessors.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const HIGH_MASK: f64 = 4_294_967_296.0;
const HIGH_MAX: u32 = 0x001F_FFFF;
const SIGN_MASK: u32 = 0x8000_0000;

/// A signed 64-bit integer stored as two's-complement high/low words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Long {
    high: u32,
    low: u32,
}

impl Long {
    /// Build from the two 32-bit words.
    pub const fn new(high: u32, low: u32) -> Self {
        Long { high, low }
    }

    /// High 32 bits.
    pub fn high(&self) -> u32 {
        self.high
    }

    /// Low 32 bits.
    pub fn low(&self) -> u32 {
        self.low
    }

    /// Split a native integer into its words.
    pub fn from_i64(value: i64) -> Self {
        let bits = value as u64;
        Long {
            high: (bits >> 32) as u32,
            low: bits as u32,
        }
    }

    /// Reassemble the native integer.
    pub fn to_i64(&self) -> i64 {
        (((self.high as u64) << 32) | self.low as u64) as i64
    }

    /// Build from a number, accepting only safe integers.
    pub fn from_number(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_INTEGER {
            return None;
        }
        Some(Long::from_i64(value as i64))
    }

    /// Numeric value, or ±Infinity when outside the safe integer range.
    pub fn to_number(&self) -> f64 {
        if self.high & SIGN_MASK != 0 {
            let low = !self.low;
            let high = !self.high;
            if high > HIGH_MAX || (high == HIGH_MAX && low == u32::MAX) {
                return f64::NEG_INFINITY;
            }
            -((high as f64) * HIGH_MASK + low as f64 + 1.0)
        } else {
            if self.high > HIGH_MAX {
                return f64::INFINITY;
            }
            (self.high as f64) * HIGH_MASK + self.low as f64
        }
    }

    /// Whether [`Long::to_number`] is exact.
    pub fn is_safe(&self) -> bool {
        self.to_number().is_finite()
    }
}

impl From<i64> for Long {
    fn from(value: i64) -> Self {
        Long::from_i64(value)
    }
}

impl From<i32> for Long {
    fn from(value: i32) -> Self {
        Long::from_i64(value as i64)
    }
}

impl fmt::Display for Long {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i64())
    }
}
