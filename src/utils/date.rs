pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// helper to render a due date the way patrons see it in messages
pub(crate) fn display_date(time: chrono::NaiveDateTime) -> String {
    time.format("%Y-%m-%d").to_string()
}

pub mod serializer {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        json_to_time(&str_time).map_err(D::Error::custom)
    }

    pub(crate) fn time_to_json(t: NaiveDateTime) -> String {
        DateTime::<Utc>::from_naive_utc_and_offset(t, Utc).to_rfc3339()
    }

    // accepts both the rfc3339 output of time_to_json and the bare DATE_FMT form
    pub(crate) fn json_to_time(str_time: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(str_time) {
            Ok(time) => Ok(time.naive_utc()),
            Err(_) => NaiveDateTime::parse_from_str(str_time, DATE_FMT),
        }
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::serializer::{json_to_time, time_to_json};

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(time_to_json).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(s) => json_to_time(&s).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
