//! Macro for implementing `Display`, `FromStr` and `as_str` for string-coded enums
//!
//! Roles, domains and activity codes travel as lowercase strings between the
//! backend, spreadsheets and the CLI. The macro keeps one mapping table per
//! enum.
//!
//! # Example
//!
//! ```rust
//! use opsboard_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ServiceType {
//!     PublicUtilities,
//!     Telecom,
//! }
//!
//! impl_domain_status_conversions!(ServiceType {
//!     PublicUtilities => "servicios_publicos",
//!     Telecom => "telecomunicaciones",
//! });
//!
//! assert_eq!(ServiceType::Telecom.to_string(), "telecomunicaciones");
//! assert_eq!("Servicios_Publicos".parse::<ServiceType>(), Ok(ServiceType::PublicUtilities));
//! ```

/// Implements `Display`, `FromStr` and an `as_str` accessor for an enum whose
/// variants map one-to-one onto lowercase string codes.
///
/// Parsing trims surrounding whitespace and ignores ASCII case. Codes must be
/// written in lowercase in the mapping.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire/string code of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Every variant in declaration order.
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant,)+];
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
