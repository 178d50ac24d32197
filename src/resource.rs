use std::fmt;

use crate::{
    config::{FlatPayoutQueueConfig, PayoutQueueResource},
    error::AppError,
    translate::{build_payout_queue_config, flatten_payout_queue_config},
    types::{PayoutQueue, PayoutQueueConfig},
};

/// Calls the payout queue service exposes to an account.
pub trait PayoutQueueClient {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the id of the new queue.
    fn create_payout_queue(
        &self,
        name: &str,
        description: &str,
        config: PayoutQueueConfig,
    ) -> Result<String, Self::Error>;

    /// `Ok(None)` means the queue no longer exists.
    fn read_payout_queue(&self, id: &str) -> Result<Option<PayoutQueue>, Self::Error>;

    fn update_payout_queue(
        &self,
        id: &str,
        description: &str,
        config: PayoutQueueConfig,
    ) -> Result<(), Self::Error>;
}

/// Tool-side state of one payout queue resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceData {
    /// `None` until created, and again once the queue is gone.
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub config: Vec<FlatPayoutQueueConfig>,
}

impl From<PayoutQueueResource> for ResourceData {
    fn from(resource: PayoutQueueResource) -> Self {
        Self {
            id: None,
            name: resource.name,
            description: resource.description,
            config: resource.config,
        }
    }
}

impl ResourceData {
    fn desired_config(&self) -> Result<PayoutQueueConfig, AppError> {
        match self.config.as_slice() {
            [flat] => build_payout_queue_config(flat),
            [] => Err(AppError::InputValidation("config block is required".to_string())),
            _ => Err(AppError::InputValidation(format!(
                "at most one config block is allowed, got {}",
                self.config.len()
            ))),
        }
    }

    fn require_id(&self) -> Result<&str, AppError> {
        self.id
            .as_deref()
            .ok_or_else(|| AppError::InputValidation(format!("payout queue '{}' has no id", self.name)))
    }
}

fn client_error<E: std::error::Error + Send + Sync + 'static>(context: &'static str, e: E) -> AppError {
    AppError::Client {
        context,
        source: Box::new(e),
    }
}

pub fn create<C: PayoutQueueClient>(data: &mut ResourceData, client: &C) -> Result<(), AppError> {
    let config = data.desired_config()?;
    log::info!("creating payout queue '{}'", data.name);

    let id = client
        .create_payout_queue(&data.name, &data.description, config)
        .map_err(|e| client_error("error creating payout queue", e))?;
    log::debug!("payout queue '{}' created with id {}", data.name, id);
    data.id = Some(id);

    read(data, client)
}

pub fn read<C: PayoutQueueClient>(data: &mut ResourceData, client: &C) -> Result<(), AppError> {
    let id = data.require_id()?;

    let queue = client
        .read_payout_queue(id)
        .map_err(|e| client_error("error reading payout queue", e))?;

    let Some(queue) = queue else {
        log::info!("payout queue {} no longer exists", id);
        data.id = None;
        return Ok(());
    };

    data.id = Some(queue.id);
    data.name = queue.name;
    data.description = queue.description;
    if let Some(config) = &queue.config {
        data.config = vec![flatten_payout_queue_config(config)];
    }
    Ok(())
}

pub fn update<C: PayoutQueueClient>(data: &mut ResourceData, client: &C) -> Result<(), AppError> {
    let config = data.desired_config()?;
    let id = data.require_id()?;
    log::info!("updating payout queue {}", id);

    client
        .update_payout_queue(id, &data.description, config)
        .map_err(|e| client_error("error updating payout queue", e))?;

    read(data, client)
}

/// The service has no delete call; the queue is only forgotten locally.
pub fn delete(data: &mut ResourceData) {
    if let Some(id) = data.id.take() {
        log::info!("removing payout queue {} from state", id);
    }
}

/// One attribute whose desired and observed values differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub desired: String,
    pub observed: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.observed, self.desired)
    }
}

pub fn diff_config(desired: &FlatPayoutQueueConfig, observed: &FlatPayoutQueueConfig) -> Vec<FieldChange> {
    let pairs: [(&'static str, String, String); 7] = [
        ("tx_priority", desired.tx_priority.clone(), observed.tx_priority.clone()),
        (
            "consolidate_deprecated_keychains",
            desired.consolidate_deprecated_keychains.to_string(),
            observed.consolidate_deprecated_keychains.to_string(),
        ),
        ("manual", desired.manual.to_string(), observed.manual.to_string()),
        ("interval_secs", desired.interval_secs.to_string(), observed.interval_secs.to_string()),
        (
            "cpfp_payouts_after_mins",
            desired.cpfp_payouts_after_mins.to_string(),
            observed.cpfp_payouts_after_mins.to_string(),
        ),
        (
            "cpfp_payouts_after_blocks",
            desired.cpfp_payouts_after_blocks.to_string(),
            observed.cpfp_payouts_after_blocks.to_string(),
        ),
        (
            "force_min_change_sats",
            desired.force_min_change_sats.to_string(),
            observed.force_min_change_sats.to_string(),
        ),
    ];

    pairs
        .into_iter()
        .filter(|(_, desired, observed)| desired != observed)
        .map(|(field, desired, observed)| FieldChange { field, desired, observed })
        .collect()
}
