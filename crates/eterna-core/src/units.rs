//! Unit newtypes for household energy quantities.
//!
//! The estimator mixes three kinds of numbers: electrical load in watts, money
//! in UAE dirhams and avoided emissions in kilograms of CO₂. Keeping them as
//! raw `f64` makes it easy to add a bill to a load by accident, so each one
//! gets its own `#[repr(transparent)]` wrapper.
//!
//! ```
//! use eterna_core::units::{Aed, Watts};
//!
//! let load = Watts(1680.0);
//! let bill = Aed(load.value() * 0.35);
//! let total = bill + Aed(12.0);
//! assert_eq!(total, Aed(600.0));
//!
//! // Does not compile: different units
//! // let wrong = load + bill;
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Same-unit addition and subtraction, scaling by a plain factor, summing and
/// two-decimal display with the unit suffix.
macro_rules! impl_unit_ops {
    ($type:ident, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                $type(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                $type(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, factor: f64) -> Self {
                $type(self.0 * factor)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                $type(iter.map(|x| x.0).sum())
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.2} {}", self.0, $unit_name)
            }
        }

        impl $type {
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }
        }
    };
}

/// Electrical load in watts (W)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Watts(pub f64);

impl_unit_ops!(Watts, "W");

/// Money in United Arab Emirates dirhams (AED)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Aed(pub f64);

impl_unit_ops!(Aed, "AED");

impl Aed {
    /// Whole dirhams, rounded toward negative infinity.
    #[inline]
    pub fn floor(self) -> Self {
        Aed(self.0.floor())
    }

    /// Size of an over- or under-spend regardless of sign.
    #[inline]
    pub fn abs(self) -> Self {
        Aed(self.0.abs())
    }
}

/// Avoided emissions in kilograms of CO₂
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KgCo2(pub f64);

impl_unit_ops!(KgCo2, "kg CO2");
