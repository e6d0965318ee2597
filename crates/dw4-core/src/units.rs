//! Fixed-point unit types.
//!
//! The device stores every physical quantity as an integer in a field-specific
//! scale (hundredths of a millimeter for plate geometry, tenths of a microliter
//! for volumes, and so on). Each quantity gets its own newtype so a height can
//! never be written into a spacing field by accident.
//!
//! Values enter through [`from_f64`](PlateDimension::from_f64), which rounds to
//! the nearest device unit and rejects anything the field cannot hold. JSON
//! carries the human unit (mm, µl, s), not the raw integer.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! fixed_point {
    (
        $(#[$meta:meta])*
        $name:ident($repr:ty), scale = $scale:expr, decimals = $decimals:expr, unit = $unit:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(pub $repr);

        impl $name {
            /// Raw device units per human unit.
            pub const SCALE: f64 = $scale;
            /// Fraction digits shown when displaying the value.
            pub const DECIMALS: usize = $decimals;
            /// Human unit suffix.
            pub const UNIT: &'static str = $unit;

            /// Round `value` (in the human unit) to the device scale.
            pub fn from_f64(value: f64) -> Option<Self> {
                let raw = (value * Self::SCALE).round();
                if !raw.is_finite() || raw < <$repr>::MIN as f64 || raw > <$repr>::MAX as f64 {
                    return None;
                }
                Some(Self(raw as $repr))
            }

            pub fn to_f64(self) -> f64 {
                self.0 as f64 / Self::SCALE
            }

            #[inline]
            pub fn raw(self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.*}", Self::DECIMALS, self.to_f64())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if Self::DECIMALS == 0 {
                    serializer.serialize_i64(self.0 as i64)
                } else {
                    serializer.serialize_f64(self.to_f64())
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = f64::deserialize(deserializer)?;
                Self::from_f64(value).ok_or_else(|| {
                    D::Error::custom(format_args!(
                        "{} {} is out of range for {}",
                        value,
                        Self::UNIT,
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

fixed_point! {
    /// Plate height, depth, row/column offset and well diameter (0.01 mm).
    PlateDimension(u16), scale = 100.0, decimals = 2, unit = "mm"
}

fixed_point! {
    /// Distance between well centers (0.001 mm).
    WellSpacing(u16), scale = 1000.0, decimals = 3, unit = "mm"
}

fixed_point! {
    /// Well or dispense volume (0.1 µl).
    Volume(u16), scale = 10.0, decimals = 1, unit = "µl"
}

fixed_point! {
    /// Signed vertical offset of the aspirate probe (0.1 mm).
    AspOffset(i16), scale = 10.0, decimals = 1, unit = "mm"
}

fixed_point! {
    /// Aspirate probe height above the well bottom (0.1 mm).
    ProbeHeight(u8), scale = 10.0, decimals = 1, unit = "mm"
}

fixed_point! {
    /// Aspirate duration (0.1 s).
    AspirateTime(u8), scale = 10.0, decimals = 1, unit = "s"
}

fixed_point! {
    /// Per-inlet liquid correction factor (0.01).
    LiquidFactor(u16), scale = 100.0, decimals = 2, unit = "x"
}

fixed_point! {
    /// Dispense pressure in raw device units (mbar).
    Pressure(u16), scale = 1.0, decimals = 0, unit = "mbar"
}

fixed_point! {
    /// Soak time in whole seconds.
    SoakTime(u16), scale = 1.0, decimals = 0, unit = "s"
}

impl AspOffset {
    pub const ZERO: Self = Self(0);

    /// Magnitude of the offset as a plate dimension (0.01 mm).
    pub fn magnitude(self) -> PlateDimension {
        PlateDimension(self.0.unsigned_abs().saturating_mul(10))
    }
}

impl LiquidFactor {
    pub const UNITY: Self = Self(100);
}

impl Default for LiquidFactor {
    fn default() -> Self {
        Self::UNITY
    }
}

impl Pressure {
    /// Firmware pressure selected by the short dispense command form.
    pub const DEFAULT: Self = Self(550);
}

impl Default for Pressure {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SoakTime {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(32000);
}
