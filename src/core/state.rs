//! The `State` trait shared by every widget status enum.
//!
//! Widget statuses (a form's submission status, a counter's animation
//! phase) are small unit enums. The trait gives the shell and the
//! diagnostics log a uniform, side-effect free way to inspect them.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for widget states.
///
/// All methods are pure. A state is an immutable value describing where a
/// widget currently is in its lifecycle.
///
/// # Required Traits
///
/// - `Clone` + `PartialEq`: states are copied into the status log and compared by guards
/// - `Debug`: states show up in developer diagnostics
/// - `Serialize` + `Deserialize`: the status log can be dumped for inspection
///
/// # Example
///
/// ```rust
/// use choreo::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Upload {
///     Idle,
///     Sending,
///     Sent,
///     Failed,
/// }
///
/// impl State for Upload {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Sending => "Sending",
///             Self::Sent => "Sent",
///             Self::Failed => "Failed",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Failed)
///     }
///
///     fn is_busy(&self) -> bool {
///         matches!(self, Self::Sending)
///     }
/// }
///
/// assert!(Upload::Sending.is_busy());
/// assert!(!Upload::Sent.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Display name used in logs.
    fn name(&self) -> &str;

    /// Terminal state: the widget will not move again.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// State that represents a failure the user should see.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }

    /// State during which new input must be rejected, e.g. a request in
    /// flight.
    ///
    /// Default implementation returns `false`.
    fn is_busy(&self) -> bool {
        false
    }
}
