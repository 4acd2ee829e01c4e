use serde::{Deserialize, Serialize};

/// A stored item: key assigned by the store, value free-form text.
///
/// Both fields follow the omit-empty convention on the wire: a zero key
/// and an empty value are not emitted, and both default when absent in
/// a request body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    #[serde(default, skip_serializing_if = "key_is_zero")]
    pub key: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

fn key_is_zero(key: &u32) -> bool {
    *key == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_omits_empty_fields() {
        let full = Record { key: 3, value: "abc".into() };
        assert_eq!(
            serde_json::to_string(&full).unwrap(),
            r#"{"key":3,"value":"abc"}"#
        );

        let no_key = Record { key: 0, value: "abc".into() };
        assert_eq!(serde_json::to_string(&no_key).unwrap(), r#"{"value":"abc"}"#);

        let empty = Record { key: 0, value: String::new() };
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }

    #[test]
    fn record_fields_default_when_absent() {
        let item: Record = serde_json::from_str(r#"{"value":"abc"}"#).unwrap();
        assert_eq!(item.key, 0);
        assert_eq!(item.value, "abc");

        let item: Record = serde_json::from_str("{}").unwrap();
        assert_eq!(item.key, 0);
        assert!(item.value.is_empty());
    }
}
