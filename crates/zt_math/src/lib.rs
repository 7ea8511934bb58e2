//! Polynomial and rational-fraction algebra over symbolic coefficients.
//!
//! [`extract`] normalizes an arbitrary expression into an unreduced
//! numerator/denominator pair in one variable, and [`bilinear_transform`]
//! uses it to map a Laplace-domain transfer function into the Z domain.

pub mod bilinear;
pub mod budget;
pub mod error;
pub mod extract;
pub mod polynomial;
pub mod rational_fraction;

pub use bilinear::{bilinear_approximation, bilinear_transform, bilinear_transform_with};
pub use budget::{ExtractBudget, TransformOptions, DEFAULT_MAX_NODES_CREATED};
pub use error::MathError;
pub use extract::{extract, extract_with};
pub use polynomial::{DisplayPoly, Polynomial};
pub use rational_fraction::{DisplayFraction, RationalFraction};
