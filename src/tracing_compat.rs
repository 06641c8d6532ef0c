//! Optional tracing integration.
//!
//! With the `tracing-integration` feature the macros here are the `tracing`
//! crate's own. Without it they expand to nothing, so call sites never need
//! their own `cfg` gates.
//!
//! ```
//! use errcov::tracing_compat::{debug, trace};
//!
//! let groups = 3;
//! debug!(groups, "scanned test groups");
//! trace!("audited operation");
//! ```

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    #[doc(hidden)]
    #[macro_export]
    macro_rules! __errcov_noop_event {
        ($($arg:tt)*) => {{}};
    }
}

#[cfg(not(feature = "tracing-integration"))]
pub use crate::{
    __errcov_noop_event as debug, __errcov_noop_event as trace, __errcov_noop_event as warn,
};
