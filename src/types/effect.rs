//! Statement effect.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// `Allow` or `Deny`. Parsing ignores case, rendering is canonical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum Effect {
    Allow,
    Deny,
}

impl Serialize for Effect {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for Effect {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(de)?;
        raw.parse()
            .map_err(|_| D::Error::custom(format!("unknown effect '{raw}', expected Allow or Deny")))
    }
}
