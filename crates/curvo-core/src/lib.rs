//! # Curvo Core
//!
//! Core types and abstractions for the Curvo fixed income library.
//!
//! This crate provides the foundational building blocks used by the curve
//! engine in `curvo-curves`:
//!
//! - **Types**: `Date`, `Frequency`, `Compounding`
//! - **Day Count Conventions**: accrual fraction calculations (ACT/360, 30/360)
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: newtypes and enums prevent mixing incompatible values
//! - **Explicit Over Implicit**: clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use curvo_core::daycounts::{Act360, DayCount};
//! use curvo_core::types::Date;
//!
//! let start = Date::from_ymd(2016, 4, 1).unwrap();
//! let end = Date::from_ymd(2016, 10, 1).unwrap();
//! assert_eq!(Act360.day_count(start, end), 183);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Compounding, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Compounding, Date, Frequency};
