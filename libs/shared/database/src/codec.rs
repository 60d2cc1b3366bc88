use bson::{Bson, DateTime};
use serde::{Deserialize, Deserializer};

/// Reads a stored timestamp without rejecting the whole document.
///
/// Accepts BSON datetimes, integers and doubles as milliseconds since the
/// epoch, and RFC 3339 strings. Anything else reads as absent.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Bson>::deserialize(deserializer)?.and_then(|value| to_datetime(&value)))
}

pub fn to_datetime(value: &Bson) -> Option<DateTime> {
    match value {
        Bson::DateTime(dt) => Some(*dt),
        Bson::Int64(millis) => Some(DateTime::from_millis(*millis)),
        Bson::Int32(millis) => Some(DateTime::from_millis(i64::from(*millis))),
        Bson::Double(millis) if millis.is_finite() => Some(DateTime::from_millis(*millis as i64)),
        Bson::String(raw) => DateTime::parse_rfc3339_str(raw).ok(),
        _ => None,
    }
}
