//! Data models
//!
//! Shared between hr-server and hr-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Reference entities and employees use `i64` snowflake IDs; accounts use
//! UUID strings.

/// Error for a stored or submitted value outside an enum's value set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Implements `Display`, `FromStr`, `TryFrom<String>` and (with the `db`
/// feature) the sqlx TEXT column codec for an enum that already has
/// `as_str()` and `parse_str()`.
macro_rules! text_enum {
    ($ty:ty, $kind:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_str(s).ok_or_else(|| $crate::models::UnknownVariant {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = $crate::models::UnknownVariant;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        // Stored as TEXT columns
        #[cfg(feature = "db")]
        impl sqlx::Type<sqlx::Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "db")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(s.parse::<$ty>()?)
            }
        }

        #[cfg(feature = "db")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

pub(crate) use text_enum;

pub mod account;
pub mod company;
pub mod department;
pub mod designation;
pub mod employee;
pub mod status;

// Re-exports
pub use account::*;
pub use company::*;
pub use department::*;
pub use designation::*;
pub use employee::*;
pub use status::*;

pub(crate) fn trimmed(s: String) -> String {
    let t = s.trim();
    if t.len() == s.len() { s } else { t.to_string() }
}

pub(crate) fn trimmed_opt(s: Option<String>) -> Option<String> {
    s.map(trimmed)
}

/// Trimmed optional text; an empty value counts as absent.
pub(crate) fn non_empty(s: Option<String>) -> Option<String> {
    trimmed_opt(s).filter(|v| !v.is_empty())
}
