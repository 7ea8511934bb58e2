//! Runtime realization of a Z-domain transfer function as an IIR filter.
//!
//! ```ignore
//! let mut ctx = Context::new();
//! let h = /* 1 / (1 + tau * s) */;
//! let mut filter: IirFilter<f64> = IirFilter::from_laplace(ctx, h)?;
//! filter.set_sample_period(1.0)?;
//! filter.set_variable_by_name("tau", 20.0)?;
//! let y = filter.process_one_sample(1.0)?;
//! ```

pub mod error;
pub mod history;
pub mod iir;
pub mod store;

pub use error::FilterError;
pub use history::HistoryRing;
pub use iir::IirFilter;
pub use store::VariableStore;
