/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A raw catalog response body, either from the upstream API or the mock
/// provider. Treated as a loosely-typed mapping by the normalizer.
pub type RawPayload = serde_json::Value;
