/*!
  Bit-level conversion between IEEE-754 single precision and the 16 bit half
  format stored in the result buffer when half floats are enabled.

  ```text
  Bit:  15 | 14-10 | 9-0
        S  |  Exp  | Mantissa
  ```

  The encoder truncates the mantissa and never produces half subnormals: values
  below the smallest normal half flush to a signed zero, values above the largest
  normal half saturate to a signed infinity. The decoder understands the full format,
  subnormals included, so `half_to_float(float_to_half(x))` is lossy but never rounds
  away from zero.
*/

pub type HalfBits = u16;

const F32_EXPONENT_BIAS: i32 = 127;
const F16_EXPONENT_BIAS: i32 = 15;
const F16_SIGN_MASK: u32 = 0x8000;
const F16_INFINITY: HalfBits = 0x7C00;
const F16_MANTISSA_MASK: u32 = 0x03FF;
const F16_IMPLICIT_BIT: u32 = 0x0400;
const F16_EXPONENT_MAX: u32 = 0x1F;

/// Encodes `value` as a half float bit pattern by truncation.
pub fn float_to_half(value: f32) -> HalfBits {
  let bits     = value.to_bits();
  let sign     = (bits >> 16) & F16_SIGN_MASK;
  let exponent = ((bits >> 23) & 0xFF) as i32 - F32_EXPONENT_BIAS + F16_EXPONENT_BIAS;
  let mantissa = (bits >> 13) & F16_MANTISSA_MASK;

  if exponent <= 0 {
    sign as HalfBits
  } else if exponent >= F16_EXPONENT_MAX as i32 {
    sign as HalfBits | F16_INFINITY
  } else {
    (sign | ((exponent as u32) << 10) | mantissa) as HalfBits
  }
}

/// Expands a half float bit pattern to single precision.
pub fn half_to_float(half: HalfBits) -> f32 {
  let half     = half as u32;
  let sign     = (half >> 15) & 0x1;
  let exponent = (half >> 10) & F16_EXPONENT_MAX;
  let fraction = half & F16_MANTISSA_MASK;

  let f32_sign = sign << 31;

  let (f32_exponent, f32_fraction) =
    match exponent {

      0 if fraction == 0 => (0, 0),

      0 => {
        // Subnormal half: shift the leading set bit up to the implicit bit.
        let mut working_exponent: i32 = 1;
        let mut fraction = fraction;
        while fraction & F16_IMPLICIT_BIT == 0 {
          fraction <<= 1;
          working_exponent -= 1;
        }
        fraction &= F16_MANTISSA_MASK;
        (
          ((F32_EXPONENT_BIAS - F16_EXPONENT_BIAS + working_exponent) as u32) << 23,
          fraction << 13
        )
      }

      F16_EXPONENT_MAX => (0xFF << 23, fraction << 13),

      _ => (
        ((F32_EXPONENT_BIAS - F16_EXPONENT_BIAS) as u32 + exponent) << 23,
        fraction << 13
      )

    };

  f32::from_bits(f32_sign | f32_exponent | f32_fraction)
}

/// Round-trips `value` through the half format, discarding whatever precision
/// and range a half cannot hold.
pub fn truncate_to_half(value: f32) -> f32 {
  half_to_float(float_to_half(value))
}
