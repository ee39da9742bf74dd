// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in value codecs.
//!
//! | Tag  | Type     | Example payload      |
//! |------|----------|----------------------|
//! | `s`  | `String` | `Cutiemoo`           |
//! | `b`  | `bool`   | `true`               |
//! | `i`  | `i32`    | `9001`               |
//! | `l`  | `i64`    | `-9223372036854775808` |
//! | `f`  | `f32`    | `0.1`                |
//! | `d`  | `f64`    | `2.718281828459045`  |
//! | `v2` | `Vec2`   | `1.0,2.0`            |
//! | `v3` | `Vec3`   | `34.0,1.0,700.0`     |
//!
//! Floats are written with Rust's shortest representation that parses back to the
//! same bits, so decimal round trips are exact.

use crate::adapters::escape::{escape, unescape};
use crate::domain::{DecodeError, Vec2, Vec3};
use crate::ports::ConfigType;

/// Separator between the components of a compound value.
pub const COMPONENT_SEPARATOR: char = ',';

impl ConfigType for String {
    const TAG: &'static str = "s";

    fn encode(&self) -> String {
        escape(self).into_owned()
    }

    fn decode(text: &str) -> Result<Self, DecodeError> {
        unescape(text)
    }
}

impl ConfigType for bool {
    const TAG: &'static str = "b";

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(text: &str) -> Result<Self, DecodeError> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(DecodeError::InvalidBool {
                text: text.to_string(),
            })
        }
    }
}

macro_rules! integer_codec {
    ($ty:ty, $tag:literal) => {
        impl ConfigType for $ty {
            const TAG: &'static str = $tag;

            fn encode(&self) -> String {
                self.to_string()
            }

            fn decode(text: &str) -> Result<Self, DecodeError> {
                let text = text.trim();
                text.parse::<$ty>()
                    .map_err(|e| DecodeError::from_parse_int_error(text, e))
            }
        }
    };
}

macro_rules! float_codec {
    ($ty:ty, $tag:literal) => {
        impl ConfigType for $ty {
            const TAG: &'static str = $tag;

            fn encode(&self) -> String {
                format!("{:?}", self)
            }

            fn decode(text: &str) -> Result<Self, DecodeError> {
                parse_float::<$ty>(text)
            }
        }
    };
}

integer_codec!(i32, "i");
integer_codec!(i64, "l");
float_codec!(f32, "f");
float_codec!(f64, "d");

fn parse_float<T>(text: &str) -> Result<T, DecodeError>
where
    T: std::str::FromStr<Err = std::num::ParseFloatError>,
{
    let text = text.trim();
    text.parse::<T>()
        .map_err(|e| DecodeError::from_parse_float_error(text, e))
}

/// Splits a compound payload into exactly `N` trimmed float components.
fn decode_components<const N: usize>(text: &str) -> Result<[f32; N], DecodeError> {
    let parts: Vec<&str> = text.split(COMPONENT_SEPARATOR).collect();
    if parts.len() != N {
        return Err(DecodeError::ComponentCount {
            expected: N,
            found: parts.len(),
        });
    }

    let mut components = [0.0_f32; N];
    for (slot, part) in components.iter_mut().zip(parts) {
        *slot = parse_float(part)?;
    }
    Ok(components)
}

fn encode_components(components: &[f32]) -> String {
    components
        .iter()
        .map(|c| format!("{:?}", c))
        .collect::<Vec<_>>()
        .join(",")
}

impl ConfigType for Vec2 {
    const TAG: &'static str = "v2";

    fn encode(&self) -> String {
        encode_components(&self.to_array())
    }

    fn decode(text: &str) -> Result<Self, DecodeError> {
        decode_components::<2>(text).map(Vec2::from)
    }
}

impl ConfigType for Vec3 {
    const TAG: &'static str = "v3";

    fn encode(&self) -> String {
        encode_components(&self.to_array())
    }

    fn decode(text: &str) -> Result<Self, DecodeError> {
        decode_components::<3>(text).map(Vec3::from)
    }
}
