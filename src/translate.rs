use crate::{
    config::{FlatPayoutQueueConfig, UNSET},
    error::AppError,
    types::{PayoutQueueConfig, Trigger, TxPriority},
};

/// Builds the structured queue configuration sent on create and update.
///
/// Fails when the priority label is unknown, when no trigger is active, or
/// when a numeric attribute does not fit the protocol field. If both `manual`
/// and `interval_secs` are set, `manual` wins.
pub fn build_payout_queue_config(flat: &FlatPayoutQueueConfig) -> Result<PayoutQueueConfig, AppError> {
    let tx_priority: TxPriority = flat.tx_priority.parse()?;
    let trigger = build_trigger(flat)?;
    log::debug!("payout queue trigger: {:?}, tx_priority: {}", trigger, tx_priority);

    Ok(PayoutQueueConfig {
        tx_priority: tx_priority as i32,
        consolidate_deprecated_keychains: flat.consolidate_deprecated_keychains,
        trigger: Some(trigger),
        cpfp_payouts_after_mins: optional_field("cpfp_payouts_after_mins", flat.cpfp_payouts_after_mins)?,
        cpfp_payouts_after_blocks: optional_field("cpfp_payouts_after_blocks", flat.cpfp_payouts_after_blocks)?,
        force_min_change_sats: optional_field("force_min_change_sats", flat.force_min_change_sats)?,
    })
}

fn build_trigger(flat: &FlatPayoutQueueConfig) -> Result<Trigger, AppError> {
    if flat.manual {
        if flat.interval_secs > 0 {
            log::warn!("both manual and interval_secs ({}) are set, using manual", flat.interval_secs);
        }
        Ok(Trigger::Manual(true))
    } else if flat.interval_secs > 0 {
        Ok(Trigger::IntervalSecs(narrow("interval_secs", flat.interval_secs)?))
    } else {
        Err(AppError::MissingTrigger)
    }
}

// Negative values are the "not configured" sentinel.
fn optional_field<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<Option<T>, AppError> {
    if value < 0 {
        return Ok(None);
    }
    narrow(field, value).map(Some)
}

fn narrow<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<T, AppError> {
    T::try_from(value).map_err(|_| AppError::ValueOutOfRange { field, value })
}

/// Projects a structured configuration read from the service back onto the
/// flat record. Never fails.
///
/// Absent optional fields become [`UNSET`]. A missing trigger leaves both
/// `manual` and `interval_secs` at their defaults.
pub fn flatten_payout_queue_config(config: &PayoutQueueConfig) -> FlatPayoutQueueConfig {
    let tx_priority = match config.tx_priority() {
        Some(priority) => priority.as_str_name().to_string(),
        None => config.tx_priority.to_string(),
    };
    let mut flat = FlatPayoutQueueConfig::new(tx_priority, config.consolidate_deprecated_keychains);

    match config.trigger {
        Some(Trigger::Manual(manual)) => flat.manual = manual,
        Some(Trigger::IntervalSecs(secs)) => flat.interval_secs = i64::from(secs),
        None => log::debug!("payout queue config has no recognized trigger"),
    }

    flat.cpfp_payouts_after_mins = config.cpfp_payouts_after_mins.map_or(UNSET, i64::from);
    flat.cpfp_payouts_after_blocks = config.cpfp_payouts_after_blocks.map_or(UNSET, i64::from);
    // saturates; the tool side has no wider integer
    flat.force_min_change_sats = config
        .force_min_change_sats
        .map_or(UNSET, |sats| i64::try_from(sats).unwrap_or(i64::MAX));

    flat
}
