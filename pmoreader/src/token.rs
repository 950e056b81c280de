//! Fixed-width primitive decoders.
//!
//! Each token is a unit struct implementing [`Token`]; `T::get` decodes the
//! first `T::LEN` bytes of a slice, and [`TokenizerExt::read_token`] reads one
//! straight from a tokenizer.
//!
//! [`TokenizerExt::read_token`]: crate::TokenizerExt::read_token

/// A value decoded from exactly `LEN` bytes.
pub trait Token {
    type Value: Send;
    const LEN: usize;

    /// Decodes the value from the start of `buf`.
    ///
    /// Panics if `buf` is shorter than `LEN`.
    fn get(buf: &[u8]) -> Self::Value;
}

macro_rules! token {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $len:expr, |$b:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Token for $name {
            type Value = $ty;
            const LEN: usize = $len;

            fn get($b: &[u8]) -> $ty {
                $body
            }
        }
    };
}

token!(Uint8, u8, 1, |b| b[0]);
token!(Int8, i8, 1, |b| b[0] as i8);
token!(Uint16Be, u16, 2, |b| u16::from_be_bytes([b[0], b[1]]));
token!(Uint16Le, u16, 2, |b| u16::from_le_bytes([b[0], b[1]]));
token!(Int16Be, i16, 2, |b| i16::from_be_bytes([b[0], b[1]]));
token!(Uint24Be, u32, 3, |b| u32::from_be_bytes([0, b[0], b[1], b[2]]));
token!(Uint24Le, u32, 3, |b| u32::from_le_bytes([b[0], b[1], b[2], 0]));
token!(Int24Be, i32, 3, |b| i32::from_be_bytes([b[0], b[1], b[2], 0]) >> 8);
token!(Uint32Be, u32, 4, |b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]));
token!(Uint32Le, u32, 4, |b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
token!(Int32Be, i32, 4, |b| i32::from_be_bytes([b[0], b[1], b[2], b[3]]));
token!(Uint40Be, u64, 5, |b| u64::from_be_bytes([0, 0, 0, b[0], b[1], b[2], b[3], b[4]]));
token!(Uint64Be, u64, 8, |b| u64::from_be_bytes([
    b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]
]));
token!(Uint64Le, u64, 8, |b| u64::from_le_bytes([
    b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]
]));
token!(Float32Be, f32, 4, |b| f32::from_be_bytes([b[0], b[1], b[2], b[3]]));
token!(Float64Be, f64, 8, |b| f64::from_be_bytes([
    b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]
]));
token!(
    /// 28-bit integer stored as four 7-bit groups (ID3v2 sizes).
    SyncSafeU32,
    u32,
    4,
    |b| decode_syncsafe([b[0], b[1], b[2], b[3]])
);

/// Decodes a syncsafe integer: the low 7 bits of each byte, most significant first.
///
/// This is not a big-endian `u32`; the high bit of every byte is ignored.
pub fn decode_syncsafe(bytes: [u8; 4]) -> u32 {
    (bytes[3] as u32 & 0x7F)
        | (bytes[2] as u32 & 0x7F) << 7
        | (bytes[1] as u32 & 0x7F) << 14
        | (bytes[0] as u32 & 0x7F) << 21
}

/// Encodes the low 28 bits of `value` as a syncsafe integer.
pub fn encode_syncsafe(value: u32) -> [u8; 4] {
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

/// Reads bit `bit` (0 = least significant) of byte `offset`.
pub fn get_bit(buf: &[u8], offset: usize, bit: u8) -> bool {
    buf[offset] & (1 << bit) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syncsafe_decodes_low_seven_bits() {
        assert_eq!(decode_syncsafe([0x00, 0x00, 0x02, 0x01]), 257);
        assert_eq!(decode_syncsafe([0x7F, 0x7F, 0x7F, 0x7F]), 0x0FFF_FFFF);
        assert_eq!(SyncSafeU32::get(&[0x00, 0x00, 0x01, 0x7F]), 255);
    }

    #[test]
    fn syncsafe_roundtrip_on_valid_bytes() {
        // Every byte value in every position, others held at a mixed pattern.
        let base = [0x12, 0x7F, 0x00, 0x55];
        for position in 0..4 {
            for byte in 0..=0x7Fu8 {
                let mut bytes = base;
                bytes[position] = byte;
                assert_eq!(encode_syncsafe(decode_syncsafe(bytes)), bytes);
            }
        }
        // A stride over the whole 28-bit space.
        for value in (0..=0x0FFF_FFFFu32).step_by(9_973) {
            let bytes = encode_syncsafe(value);
            assert!(bytes.iter().all(|b| b & 0x80 == 0));
            assert_eq!(encode_syncsafe(decode_syncsafe(bytes)), bytes);
            assert_eq!(decode_syncsafe(bytes), value);
        }
    }

    #[test]
    fn syncsafe_differs_from_big_endian() {
        let bytes = [0x00, 0x00, 0x02, 0x01];
        assert_ne!(decode_syncsafe(bytes), Uint32Be::get(&bytes));
    }

    #[test]
    fn odd_width_integers() {
        assert_eq!(Uint24Be::get(&[0x01, 0x02, 0x03]), 0x010203);
        assert_eq!(Uint24Le::get(&[0x01, 0x02, 0x03]), 0x030201);
        assert_eq!(Int24Be::get(&[0xFF, 0xFF, 0xFE]), -2);
        assert_eq!(Uint40Be::get(&[0x01, 0x00, 0x00, 0x00, 0x00]), 0x01_0000_0000);
    }

    #[test]
    fn floats_and_bits() {
        assert_eq!(Float32Be::get(&1.5f32.to_be_bytes()), 1.5);
        assert_eq!(Float64Be::get(&(-0.25f64).to_be_bytes()), -0.25);
        assert!(get_bit(&[0b0000_0010], 0, 1));
        assert!(!get_bit(&[0b0000_0010], 0, 0));
    }
}
