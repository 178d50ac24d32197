use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::AppError;

/// Fee priority the service uses when building payout transactions.
///
/// The wire encoding is numeric; the tool-facing encoding is the label.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TxPriority {
    NextBlock = 0,
    HalfHour = 1,
    OneHour = 2,
}

impl TxPriority {
    pub const ALL: [TxPriority; 3] = [TxPriority::NextBlock, TxPriority::HalfHour, TxPriority::OneHour];

    pub fn as_str_name(&self) -> &'static str {
        match self {
            TxPriority::NextBlock => "NEXT_BLOCK",
            TxPriority::HalfHour => "HALF_HOUR",
            TxPriority::OneHour => "ONE_HOUR",
        }
    }

    pub fn from_str_name(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str_name() == label)
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| *p as i32 == value)
    }
}

impl FromStr for TxPriority {
    type Err = AppError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::from_str_name(label).ok_or_else(|| AppError::InvalidEnumValue {
            label: label.to_string(),
        })
    }
}

impl fmt::Display for TxPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

/// When the service drains the queue into a batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    Manual(bool),
    IntervalSecs(u32),
}

impl Trigger {
    const KEYS: [&'static str; 2] = ["manual", "intervalSecs"];
}

/// Structured queue configuration as carried by the service protocol.
///
/// `None` on an optional field means "not configured", which is distinct
/// from zero. A `None` trigger only appears on objects read back from the
/// service carrying a trigger this crate does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutQueueConfig {
    pub tx_priority: i32,
    pub consolidate_deprecated_keychains: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_trigger",
        skip_serializing_if = "Option::is_none"
    )]
    pub trigger: Option<Trigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpfp_payouts_after_mins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpfp_payouts_after_blocks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_min_change_sats: Option<u64>,
}

impl PayoutQueueConfig {
    pub fn tx_priority(&self) -> Option<TxPriority> {
        TxPriority::from_i32(self.tx_priority)
    }
}

// Unknown trigger kinds from newer service versions read as `None`; unknown
// keys next to a known one are dropped. The first known key (in map order) wins.
fn deserialize_trigger<'de, D>(deserializer: D) -> Result<Option<Trigger>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let mut trigger = None;
    for (key, value) in raw {
        if !Trigger::KEYS.contains(&key.as_str()) {
            log::warn!("ignoring unrecognized payout queue trigger key: {}", key);
            continue;
        }
        if let Some(chosen) = trigger {
            log::warn!("ignoring trigger key {} alongside {:?}", key, chosen);
            continue;
        }
        let single: serde_json::Map<String, serde_json::Value> = [(key, value)].into_iter().collect();
        let parsed = serde_json::from_value(serde_json::Value::Object(single)).map_err(de::Error::custom)?;
        trigger = Some(parsed);
    }
    Ok(trigger)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutQueue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config: Option<PayoutQueueConfig>,
}
