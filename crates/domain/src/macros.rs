//! Macro for implementing Display and FromStr for stored enums
//!
//! Schedule item types and overlap scopes are persisted and configured as
//! lowercase strings. This macro provides both conversions from a single
//! mapping so the two directions cannot drift apart.
//!
//! # Example
//!
//! ```rust
//! use timegrid_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Private,
//!     Shared,
//! }
//!
//! impl_domain_enum_conversions!(Visibility {
//!     Private => "private",
//!     Shared => "shared",
//! });
//!
//! assert_eq!(Visibility::Shared.to_string(), "shared");
//! assert_eq!("PRIVATE".parse::<Visibility>(), Ok(Visibility::Private));
//! ```

/// Implements Display and FromStr traits for domain enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their lowercase strings
/// - FromStr trait: parses case-insensitive, whitespace-trimmed strings
///
/// Parsing failures produce a message naming the enum and the rejected value.
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
