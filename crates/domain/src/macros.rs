//! Display/FromStr generation for the small string-backed enums of the domain
//! (room status, schedule item kind and status).
//!
//! # Example
//!
//! ```rust
//! use roomkeeper_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DoorState {
//!     Open,
//!     Locked,
//! }
//!
//! impl_domain_status_conversions!(DoorState {
//!     Open => "open",
//!     Locked => "locked",
//! });
//!
//! assert_eq!("LOCKED".parse::<DoorState>().unwrap(), DoorState::Locked);
//! ```

/// Implements `Display` and `FromStr` for a fieldless enum.
///
/// Parsing is case-insensitive; unknown values fail with
/// [`RoomKeeperError::InvalidInput`](crate::RoomKeeperError::InvalidInput).
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Stable lowercase representation.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::RoomKeeperError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::RoomKeeperError::InvalidInput(format!(
                        "Invalid {}: {}",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}
