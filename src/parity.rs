//! Parity over 32-bit words.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Parity bit makes the total number of set bits odd.
    Odd,
    /// Parity bit makes the total number of set bits even.
    Even,
}

/// Parity bit for `bits` under the given convention.
pub fn parity32(bits: u32, parity: Parity) -> bool {
    let odd_count = bits.count_ones() & 1 == 1;
    match parity {
        Parity::Even => odd_count,
        Parity::Odd => !odd_count,
    }
}

#[inline]
pub fn even_parity32(bits: u32) -> bool {
    parity32(bits, Parity::Even)
}

#[inline]
pub fn odd_parity32(bits: u32) -> bool {
    parity32(bits, Parity::Odd)
}
