use std::hint::black_box;

/// Compares two byte strings in time independent of where they differ.
///
/// Inputs of different length are reported unequal immediately; length is
/// not treated as secret. For equal lengths every byte pair is visited.
pub fn compare_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut acc = 0u8;
    for (x, y) in a.iter().zip(b) {
        acc = black_box(acc | (x ^ y));
    }
    acc == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_inputs() {
        assert!(compare_equal(b"", b""));
        assert!(compare_equal(b"abc", b"abc"));
    }

    #[test]
    fn different_lengths() {
        assert!(!compare_equal(b"abc", b"abcd"));
        assert!(!compare_equal(b"", b"a"));
    }

    #[test]
    fn difference_at_any_position() {
        let base = [0x55u8; 60];
        for i in 0..base.len() {
            let mut other = base;
            other[i] ^= 0x01;
            assert!(!compare_equal(&base, &other), "difference at {i} missed");
        }
    }
}
