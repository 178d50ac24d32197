use serde::{Deserialize, Serialize};

/// Marks an optional numeric attribute as not configured.
pub const UNSET: i64 = -1;

/// Flat queue configuration as the declarative tool sees it.
///
/// Attribute names match the resource schema. Optional attributes fall back
/// to the schema defaults when absent from the input.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FlatPayoutQueueConfig {
    pub tx_priority: String,
    pub consolidate_deprecated_keychains: bool,
    #[serde(default)]
    pub manual: bool,
    #[serde(default)]
    pub interval_secs: i64,
    #[serde(default = "unset")]
    pub cpfp_payouts_after_mins: i64,
    #[serde(default = "unset")]
    pub cpfp_payouts_after_blocks: i64,
    #[serde(default = "unset")]
    pub force_min_change_sats: i64,
}

fn unset() -> i64 {
    UNSET
}

impl FlatPayoutQueueConfig {
    /// A record with the given required attributes and every optional one at
    /// its default.
    pub fn new(tx_priority: impl Into<String>, consolidate_deprecated_keychains: bool) -> Self {
        Self {
            tx_priority: tx_priority.into(),
            consolidate_deprecated_keychains,
            manual: false,
            interval_secs: 0,
            cpfp_payouts_after_mins: UNSET,
            cpfp_payouts_after_blocks: UNSET,
            force_min_change_sats: UNSET,
        }
    }
}

/// Desired state of one payout queue resource.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PayoutQueueResource {
    /// Changing the name replaces the queue.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Holds exactly one block.
    pub config: Vec<FlatPayoutQueueConfig>,
}
