//! Domain types shared across OLI.
//!
//! All fallible library operations return [`Result<T, OliError>`]:
//!
//! ```rust,no_run
//! use oli::domain::{OliError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = oli::config::load_config("oli.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::OliError;
pub use result::Result;
