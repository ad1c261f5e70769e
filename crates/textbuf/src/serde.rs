//! `serde` support: a [`Text`] serializes as a byte string.
//!
//! Deserialization accepts byte strings, strings and sequences of `u8`, so
//! formats without a native byte type (JSON) round-trip through arrays.

use core::fmt;

use ::serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
};

use crate::Text;

/// Upper bound on capacity reserved up front from an untrusted size hint.
const MAX_PREALLOCATION: usize = 4096;

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_bytes())
    }
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Text;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a byte string")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Text, E> {
        Text::try_from_bytes(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Text, E> {
        self.visit_bytes(v.as_bytes())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Text, A::Error> {
        let hint = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATION);
        let mut text = Text::try_with_capacity(hint).map_err(de::Error::custom)?;
        while let Some(byte) = seq.next_element::<u8>()? {
            text = text.try_push(byte).map_err(de::Error::custom)?;
        }
        Ok(text)
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_byte_buf(TextVisitor)
    }
}
