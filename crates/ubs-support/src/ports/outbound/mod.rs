//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must
//! implement. Concrete backends (SQL, hosted stores) are out of scope; the
//! in-memory adapters serve testing and development.

use async_trait::async_trait;

use crate::domain::aggregates::{
    InventoryItem, MaintenanceRecord, PartConsumption, StockPart, Ticket, UserAccount,
};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{AssetTag, CivilDateTime, EntityId, ProtocolNumber};

/// Repository result type
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Ticket store port
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a new ticket. Fails with `Conflict` when the protocol number
    /// is already taken.
    async fn insert(&self, ticket: &Ticket) -> RepoResult<()>;

    /// Save an existing ticket
    async fn save(&self, ticket: &Ticket) -> RepoResult<()>;

    async fn find_by_id(&self, id: &EntityId) -> RepoResult<Option<Ticket>>;

    async fn find_by_protocol(&self, protocol: ProtocolNumber) -> RepoResult<Option<Ticket>>;

    async fn list_all(&self) -> RepoResult<Vec<Ticket>>;

    /// Tickets with no closing timestamp
    async fn list_open(&self) -> RepoResult<Vec<Ticket>>;

    async fn list_by_asset_tag(&self, tag: &AssetTag) -> RepoResult<Vec<Ticket>>;

    /// Highest protocol number ever stored; zero when no tickets exist
    async fn max_protocol(&self) -> RepoResult<u64>;
}

/// Inventory store port
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn find_by_asset_tag(&self, tag: &AssetTag) -> RepoResult<Option<InventoryItem>>;

    /// Insert a new machine. Fails with `Conflict` when the asset tag is
    /// already inventoried.
    async fn insert(&self, item: &InventoryItem) -> RepoResult<()>;

    async fn save(&self, item: &InventoryItem) -> RepoResult<()>;

    async fn delete(&self, tag: &AssetTag) -> RepoResult<()>;

    async fn list_all(&self) -> RepoResult<Vec<InventoryItem>>;
}

/// Parts/stock store port
#[async_trait]
pub trait PartsStore: Send + Sync {
    /// Record one part consumed by one ticket
    async fn record_consumption(&self, consumption: &PartConsumption) -> RepoResult<()>;

    /// Deduct stock for a part by name, flooring at zero. Returns the
    /// remaining quantity; `NotFound` when the part is unknown.
    async fn decrement_stock(&self, part_name: &str, quantity: u32) -> RepoResult<u32>;

    async fn find_part(&self, name: &str) -> RepoResult<Option<StockPart>>;

    async fn find_part_by_id(&self, id: &EntityId) -> RepoResult<Option<StockPart>>;

    async fn insert_part(&self, part: &StockPart) -> RepoResult<()>;

    async fn save_part(&self, part: &StockPart) -> RepoResult<()>;

    async fn delete_part(&self, id: &EntityId) -> RepoResult<()>;

    async fn list_parts(&self) -> RepoResult<Vec<StockPart>>;

    /// Consumption entries for any of the given tickets
    async fn consumptions_for_tickets(
        &self,
        ticket_ids: &[EntityId],
    ) -> RepoResult<Vec<PartConsumption>>;
}

/// Maintenance-history store port
#[async_trait]
pub trait MaintenanceLog: Send + Sync {
    async fn append(&self, record: &MaintenanceRecord) -> RepoResult<()>;

    /// Remove the record for `tag` stamped exactly at `performed_at`.
    /// Deleting an absent record is a no-op.
    async fn delete_at(&self, tag: &AssetTag, performed_at: CivilDateTime) -> RepoResult<()>;

    async fn list_for_asset(&self, tag: &AssetTag) -> RepoResult<Vec<MaintenanceRecord>>;
}

/// Name registry port, backing both the clinic and the sector directories
#[async_trait]
pub trait NameDirectory: Send + Sync {
    /// Add a name. Fails with `Conflict` on duplicates.
    async fn add(&self, name: &str) -> RepoResult<()>;

    async fn rename(&self, old: &str, new: &str) -> RepoResult<()>;

    async fn remove(&self, name: &str) -> RepoResult<()>;

    async fn list(&self) -> RepoResult<Vec<String>>;
}

/// User store port
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, username: &str) -> RepoResult<Option<UserAccount>>;

    /// Insert a new account. Fails with `Conflict` when the username exists.
    async fn insert(&self, account: &UserAccount) -> RepoResult<()>;

    async fn save(&self, account: &UserAccount) -> RepoResult<()>;

    async fn delete(&self, username: &str) -> RepoResult<()>;

    async fn list(&self) -> RepoResult<Vec<UserAccount>>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<DomainEvent>) -> RepoResult<()>;
}

/// Wall-clock port, injected so tests supply deterministic instants
pub trait Clock: Send + Sync {
    /// Current civil time in the platform's fixed UTC-3 zone
    fn now(&self) -> CivilDateTime;
}
