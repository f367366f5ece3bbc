//! Conversion between floating point colours and packed 32-bit colours.

use crate::{num::Float, vector::Vector4};

/// Packs an RGBA colour with channels in `[0, 1]` into a `0xAARRGGBB` word.
///
/// Each channel is scaled by 255 and truncated. Channels outside `[0, 1]`
/// saturate at the ends of the 8-bit range.
pub fn pack_color(color: &Vector4<f32>) -> u32 {
    let channel = |value: f32| u32::from((value * f32::COLOR_CHANNEL_MAX) as u8);
    (channel(color.a()) << 24)
        | (channel(color.r()) << 16)
        | (channel(color.g()) << 8)
        | channel(color.b())
}

/// Unpacks a `0xAARRGGBB` word into an RGBA colour with channels in `[0, 1]`.
pub fn unpack_color(packed: u32) -> Vector4<f32> {
    let channel = |shift: u32| f32::from((packed >> shift) as u8) / f32::COLOR_CHANNEL_MAX;
    Vector4::new(channel(16), channel(8), channel(0), channel(24))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn packing_places_alpha_in_high_byte() {
        assert_eq!(pack_color(&Vector4::new(1.0, 0.0, 0.0, 1.0)), 0xffff0000);
        assert_eq!(pack_color(&Vector4::new(0.0, 1.0, 0.0, 0.0)), 0x0000ff00);
        assert_eq!(pack_color(&Vector4::new(0.0, 0.0, 1.0, 0.0)), 0x000000ff);
    }

    #[test]
    fn packing_truncates_channels() {
        assert_eq!(pack_color(&Vector4::new(0.5, 0.5, 0.5, 0.5)), 0x7f7f7f7f);
    }

    #[test]
    fn packing_saturates_out_of_range_channels() {
        assert_eq!(pack_color(&Vector4::new(2.0, -1.0, 0.0, 1.0)), 0xffff0000);
    }

    #[test]
    fn unpacking_inverts_packing_for_whole_steps() {
        let color = unpack_color(0x80402010);
        assert_abs_diff_eq!(color.a(), 128.0 / 255.0);
        assert_abs_diff_eq!(color.r(), 64.0 / 255.0);
        assert_abs_diff_eq!(color.g(), 32.0 / 255.0);
        assert_abs_diff_eq!(color.b(), 16.0 / 255.0);
        assert_eq!(pack_color(&unpack_color(0xff000000)), 0xff000000);
    }
}
