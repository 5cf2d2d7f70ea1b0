/// Compares two byte strings without data-dependent branches or early exits.
///
/// The length difference is folded into the same accumulator as the byte
/// differences and every position up to the longer input is visited, so a
/// length mismatch costs the same as a content mismatch.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut acc = (a.len() ^ b.len()) as u64;
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        acc |= (x ^ y) as u64;
    }
    // top bit is set for any non-zero acc
    ((acc | acc.wrapping_neg()) >> 63) == 0
}
