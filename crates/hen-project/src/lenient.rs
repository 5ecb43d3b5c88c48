//! Forgiving field deserializers for loaded streamsets.
//!
//! Configuration written by older front-ends may carry numbers where text is
//! expected, or labels this version does not know. Neither should make the
//! whole file unloadable.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextLike {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

impl TextLike {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Other(_) => None,
        }
    }
}

/// Accept a string, or render a number/bool as text. Anything else is empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(TextLike::deserialize(deserializer)?
        .into_text()
        .unwrap_or_default())
}

/// Like [`text`], but `None` for null and other non-scalar values so the
/// caller can substitute the field's own default.
pub(crate) fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(TextLike::deserialize(deserializer)?.into_text())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Truthy {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Loose boolean: non-zero numbers, non-empty strings and any list or map are
/// true; `false`, zero, NaN, `""` and null are false.
pub(crate) fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Truthy>::deserialize(deserializer)? {
        None => false,
        Some(Truthy::Bool(b)) => b,
        Some(Truthy::Number(n)) => n != 0.0 && !n.is_nan(),
        Some(Truthy::Text(s)) => !s.is_empty(),
        Some(Truthy::Other(_)) => true,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrDefault<T> {
    Known(T),
    Other(IgnoredAny),
}

/// Accept a valid `T`, or fall back to `T::default()` for anything else.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match OrDefault::<T>::deserialize(deserializer)? {
        OrDefault::Known(v) => v,
        OrDefault::Other(_) => T::default(),
    })
}
