//! Sparse update support.
//!
//! A patch field is `Option<Option<T>>`: the outer `None` means the key was not
//! sent, `Some(None)` means it was sent as `null`. Fields the stored type cannot
//! hold as null use a plain `Option<T>`, so `null` reads as absent.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a request body that must be a JSON object.
///
/// Derived struct impls also accept arrays positionally, which would write
/// fields the client never named.
pub fn from_object<T: DeserializeOwned>(body: Value) -> Result<T, serde_json::Error> {
    if !body.is_object() {
        return Err(serde_json::Error::custom("request body must be a JSON object"));
    }
    serde_json::from_value(body)
}

/// Deserialize a present key (including `null`) into `Some(..)`.
/// Pair with `#[serde(default)]` so a missing key stays `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A sparse update for `T`
pub trait Patch<T> {
    fn apply_to(self, target: &mut T);
}

/// Copy every present field of a patch onto its target
#[macro_export]
macro_rules! apply_present {
    ($patch:ident => $target:ident; $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(default, deserialize_with = "nullable")]
        name: Option<Option<String>>,
    }

    #[test]
    fn distinguishes_missing_null_and_value() {
        let missing: Named = serde_json::from_str("{}").unwrap();
        let null: Named = serde_json::from_str(r#"{"name": null}"#).unwrap();
        let set: Named = serde_json::from_str(r#"{"name": "x"}"#).unwrap();

        assert_eq!(missing.name, None);
        assert_eq!(null.name, Some(None));
        assert_eq!(set.name, Some(Some("x".to_string())));
    }

    #[test]
    fn from_object_rejects_positional_bodies() {
        let err = from_object::<Named>(serde_json::json!(["x"])).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
        assert!(from_object::<Named>(serde_json::json!("x")).is_err());

        let ok: Named = from_object(serde_json::json!({"name": "x"})).unwrap();
        assert_eq!(ok.name, Some(Some("x".to_string())));
    }
}
