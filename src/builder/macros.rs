//! Macros for declaring widget status enums.

/// Declare a unit enum and implement [`State`](crate::core::State) for it.
///
/// The optional `final:`, `error:` and `busy:` lists (in that order) select
/// the variants for which the matching `State` method returns `true`.
///
/// # Example
///
/// ```
/// use choreo::core::State;
/// use choreo::state_enum;
///
/// state_enum! {
///     pub enum VideoModal {
///         Closed,
///         Buffering,
///         Playing,
///         Unavailable,
///     }
///     error: [Unavailable]
///     busy: [Buffering]
/// }
///
/// assert_eq!(VideoModal::Playing.name(), "Playing");
/// assert!(VideoModal::Buffering.is_busy());
/// assert!(VideoModal::Unavailable.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
        $(busy: [$($busy:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_busy(&self) -> bool {
                match self {
                    $($(Self::$busy => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
