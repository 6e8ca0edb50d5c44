/*++

Licensed under the Apache-2.0 license.

File Name:

    ct.rs

Abstract:

    File contains the constant time comparison of secret dependent buffers.

--*/

/// OR of the XOR of every pair. Every pair is visited; the result is only
/// meaningful once the iterator is exhausted.
pub fn accumulate_diff<'a, I>(pairs: I) -> u8
where
    I: IntoIterator<Item = (&'a u8, &'a u8)>,
{
    pairs.into_iter().fold(0u8, |diff, (a, b)| diff | (a ^ b))
}

/// Returns true if the buffers have the same length and content
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    accumulate_diff(a.iter().zip(b.iter())) == 0
}
