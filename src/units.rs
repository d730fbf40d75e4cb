use crate::config::RESOLUTION_BITS;
use core::ops::RangeInclusive;

/// Raw converter output, right aligned.
pub type Sample = u16;
/// Microvolts.
pub type Uv = i32;

pub const SAMPLE_MAX: Sample = ((1u32 << RESOLUTION_BITS) - 1) as Sample;
/// Mask applied to a transfer word to extract the sample.
pub const SAMPLE_MASK: u32 = SAMPLE_MAX as u32;

/// Extract the sample from a word written by the transfer hardware.
///
/// Data is right aligned so the upper bits are zero on a healthy converter.
pub const fn sample_from_word(word: u32) -> Sample {
    (word & SAMPLE_MASK) as Sample
}

/// Convert a raw sample to microvolts.
///
/// Callers must only pass scalars accepted by [`scalar_fits`].
pub const fn to_uv(raw: Sample, scalar: Uv) -> Uv {
    raw as Uv * scalar
}

/// Whether every sample in `0..=SAMPLE_MAX` multiplied by `scalar` fits into [`Uv`].
pub const fn scalar_fits(scalar: Uv) -> bool {
    scalar >= 0 && (SAMPLE_MAX as i64) * (scalar as i64) <= Uv::MAX as i64
}

/// Values [`to_uv`] can produce for `scalar`.
pub const fn uv_range(scalar: Uv) -> RangeInclusive<Uv> {
    0..=to_uv(SAMPLE_MAX, scalar)
}
