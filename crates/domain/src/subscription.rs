use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `PushSubscription` is the record a browser hands out from its
/// `PushManager`: the push service endpoint and the key material needed to
/// encrypt messages for it.
///
/// The record is kept exactly as the client sent it. Two subscriptions are
/// the same subscription when their canonical serializations are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushSubscription(Value);

/// Key material of a `PushSubscription`, both values are base64url encoded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubscriptionKeys<'a> {
    /// The subscriber's P-256 public key
    pub p256dh: &'a str,
    /// The subscriber's authentication secret
    pub auth: &'a str,
}

impl PushSubscription {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.0.get("endpoint")?.as_str()
    }

    pub fn keys(&self) -> Option<SubscriptionKeys<'_>> {
        let keys = self.0.get("keys")?;
        Some(SubscriptionKeys {
            p256dh: keys.get("p256dh")?.as_str()?,
            auth: keys.get("auth")?.as_str()?,
        })
    }

    /// JSON serialization with object keys in sorted order at every level,
    /// so the key does not depend on the order fields were sent in.
    pub fn canonical_key(&self) -> String {
        let mut out = String::new();
        write_canonical(&self.0, &mut out);
        out
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries = map.iter().collect::<Vec<_>>();
            entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
            out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(value, out);
            }
            out.push('}');
        }
        Value::Array(values) => {
            out.push('[');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(value, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

impl PartialEq for PushSubscription {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl Eq for PushSubscription {}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_reads_endpoint_and_keys() {
        let sub = PushSubscription::new(json!({
            "endpoint": "https://push.example.com/abc",
            "expirationTime": null,
            "keys": { "p256dh": "BPub", "auth": "secret" }
        }));
        assert_eq!(sub.endpoint(), Some("https://push.example.com/abc"));
        assert_eq!(
            sub.keys(),
            Some(SubscriptionKeys {
                p256dh: "BPub",
                auth: "secret"
            })
        );
    }

    #[test]
    fn incomplete_subscriptions_have_no_keys() {
        let sub = PushSubscription::new(json!({ "endpoint": "https://push.example.com/abc" }));
        assert!(sub.keys().is_none());
        let sub = PushSubscription::new(json!("just a string"));
        assert!(sub.endpoint().is_none());
    }

    #[test]
    fn canonical_key_ignores_field_order() {
        let a: PushSubscription = serde_json::from_str(
            r#"{"endpoint":"https://a","keys":{"p256dh":"x","auth":"y"}}"#,
        )
        .unwrap();
        let b: PushSubscription = serde_json::from_str(
            r#"{"keys":{"auth":"y","p256dh":"x"},"endpoint":"https://a"}"#,
        )
        .unwrap();
        assert_eq!(a.canonical_key(), b.canonical_key());
        assert_eq!(a, b);
    }

    #[test]
    fn canonical_key_compares_the_whole_record() {
        let a = PushSubscription::new(json!({"endpoint": "https://a", "keys": {"auth": "y"}}));
        let b = PushSubscription::new(json!({"endpoint": "https://a", "keys": {"auth": "z"}}));
        assert_ne!(a, b);
    }
}
