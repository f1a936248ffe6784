//! Serde utilities for jpeg-bot.

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserializer;
use std::fmt;

/// Module to deserialize `in_reply_to_id`, which servers send as a string,
/// an integer, or null.
pub mod reply_target {
    use super::{de, fmt, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use crate::domain::entities::{ReplyTarget, StatusId};

    /// Deserializes a [`ReplyTarget`] from any JSON value.
    ///
    /// Never fails on shape: unexpected values become
    /// [`ReplyTarget::Unrecognized`] so one odd field cannot drop a whole
    /// status.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying deserializer fails.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<ReplyTarget, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReplyTargetVisitor;

        impl<'de> Visitor<'de> for ReplyTargetVisitor {
            type Value = ReplyTarget;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a status id as string or integer, or null")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ReplyTarget::Absent)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ReplyTarget::Absent)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(self)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ReplyTarget::Raw(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ReplyTarget::Typed(StatusId::from(value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(u64::try_from(value).map_or_else(
                    |_| ReplyTarget::Unrecognized {
                        description: format!("negative integer {value}"),
                    },
                    |id| ReplyTarget::Typed(StatusId::from(id)),
                ))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ReplyTarget::Unrecognized {
                    description: format!("float {value}"),
                })
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ReplyTarget::Unrecognized {
                    description: format!("boolean {value}"),
                })
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(ReplyTarget::Unrecognized {
                    description: "array".to_string(),
                })
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(ReplyTarget::Unrecognized {
                    description: "object".to_string(),
                })
            }
        }

        deserializer.deserialize_option(ReplyTargetVisitor)
    }
}
