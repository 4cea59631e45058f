use serde::{Deserialize, Deserializer};

/// One field of a partial update: left out, sent as `null`, or sent with a value.
///
/// Fields must be marked `#[serde(default)]` so a missing key becomes `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default)]
        field: Patch<String>,
    }

    #[test]
    fn distinguishes_missing_null_and_value() {
        let missing: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.field, Patch::Absent);

        let null: Body = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(null.field, Patch::Null);

        let set: Body = serde_json::from_str(r#"{"field": "hi"}"#).unwrap();
        assert_eq!(set.field, Patch::Value("hi".to_string()));
    }
}
