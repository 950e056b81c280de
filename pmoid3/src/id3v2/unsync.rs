/// Reverses ID3v2 unsynchronisation: drops the `0x00` that follows every `0xFF`.
pub fn remove_unsync_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut previous_ff = false;
    for &byte in data {
        if !(previous_ff && byte == 0x00) {
            out.push(byte);
        }
        previous_ff = byte == 0xFF;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_stuffed_zero() {
        assert_eq!(remove_unsync_bytes(&[0xFF, 0x00, 0xE0]), vec![0xFF, 0xE0]);
        assert_eq!(
            remove_unsync_bytes(&[0x01, 0xFF, 0x00, 0x00, 0xFF, 0x00]),
            vec![0x01, 0xFF, 0x00, 0xFF]
        );
    }

    #[test]
    fn data_without_pairs_is_unchanged() {
        let data = [0x00, 0xFF, 0x01, 0x00, 0xFE, 0xFF];
        assert_eq!(remove_unsync_bytes(&data), data.to_vec());
        assert!(remove_unsync_bytes(&[]).is_empty());
    }

    #[test]
    fn consecutive_ff_bytes() {
        assert_eq!(
            remove_unsync_bytes(&[0xFF, 0x00, 0xFF, 0x00]),
            vec![0xFF, 0xFF]
        );
    }
}
