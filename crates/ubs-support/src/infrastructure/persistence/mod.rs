//! In-memory repository implementations for testing and development

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::aggregates::{
    InventoryItem, MaintenanceRecord, PartConsumption, StockPart, Ticket, UserAccount,
};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::civil::civil_offset;
use crate::domain::value_objects::{AssetTag, CivilDateTime, EntityId, ProtocolNumber};
use crate::ports::outbound::{
    Clock, EventPublisher, InventoryRepository, MaintenanceLog, NameDirectory, PartsStore,
    RepoResult, RepositoryError, TicketRepository, UserRepository,
};

/// In-memory ticket repository
#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: DashMap<String, Ticket>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn insert(&self, ticket: &Ticket) -> RepoResult<()> {
        let protocol = ticket.protocol();
        let duplicate = self
            .tickets
            .iter()
            .any(|entry| entry.value().protocol() == protocol);
        if duplicate {
            return Err(RepositoryError::Conflict(format!(
                "protocol {} already taken",
                protocol
            )));
        }
        self.tickets
            .insert(ticket.id().to_string(), ticket.clone());
        Ok(())
    }

    async fn save(&self, ticket: &Ticket) -> RepoResult<()> {
        self.tickets
            .insert(ticket.id().to_string(), ticket.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> RepoResult<Option<Ticket>> {
        Ok(self.tickets.get(id.as_str()).map(|t| t.value().clone()))
    }

    async fn find_by_protocol(&self, protocol: ProtocolNumber) -> RepoResult<Option<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .find(|entry| entry.value().protocol() == protocol)
            .map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> RepoResult<Vec<Ticket>> {
        Ok(self.tickets.iter().map(|e| e.value().clone()).collect())
    }

    async fn list_open(&self) -> RepoResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|e| e.value().is_open())
            .map(|e| e.value().clone())
            .collect())
    }

    async fn list_by_asset_tag(&self, tag: &AssetTag) -> RepoResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|e| e.value().asset_tag() == Some(tag))
            .map(|e| e.value().clone())
            .collect())
    }

    async fn max_protocol(&self) -> RepoResult<u64> {
        Ok(self
            .tickets
            .iter()
            .map(|e| e.value().protocol().value())
            .max()
            .unwrap_or(0))
    }
}

/// In-memory inventory repository
#[derive(Default)]
pub struct InMemoryInventoryRepository {
    items: DashMap<String, InventoryItem>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn find_by_asset_tag(&self, tag: &AssetTag) -> RepoResult<Option<InventoryItem>> {
        Ok(self.items.get(tag.as_str()).map(|i| i.value().clone()))
    }

    async fn insert(&self, item: &InventoryItem) -> RepoResult<()> {
        if self.items.contains_key(item.asset_tag.as_str()) {
            return Err(RepositoryError::Conflict(format!(
                "asset tag {} already inventoried",
                item.asset_tag
            )));
        }
        self.items
            .insert(item.asset_tag.to_string(), item.clone());
        Ok(())
    }

    async fn save(&self, item: &InventoryItem) -> RepoResult<()> {
        self.items
            .insert(item.asset_tag.to_string(), item.clone());
        Ok(())
    }

    async fn delete(&self, tag: &AssetTag) -> RepoResult<()> {
        self.items
            .remove(tag.as_str())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(tag.to_string()))
    }

    async fn list_all(&self) -> RepoResult<Vec<InventoryItem>> {
        Ok(self.items.iter().map(|e| e.value().clone()).collect())
    }
}

/// In-memory parts/stock store
#[derive(Default)]
pub struct InMemoryPartsStore {
    parts: DashMap<String, StockPart>,
    consumptions: RwLock<Vec<PartConsumption>>,
}

impl InMemoryPartsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartsStore for InMemoryPartsStore {
    async fn record_consumption(&self, consumption: &PartConsumption) -> RepoResult<()> {
        self.consumptions.write().unwrap().push(consumption.clone());
        Ok(())
    }

    async fn decrement_stock(&self, part_name: &str, quantity: u32) -> RepoResult<u32> {
        let mut entry = self
            .parts
            .iter_mut()
            .find(|e| e.value().name == part_name)
            .ok_or_else(|| RepositoryError::NotFound(part_name.to_string()))?;
        Ok(entry.value_mut().write_off(quantity))
    }

    async fn find_part(&self, name: &str) -> RepoResult<Option<StockPart>> {
        Ok(self
            .parts
            .iter()
            .find(|e| e.value().name == name)
            .map(|e| e.value().clone()))
    }

    async fn find_part_by_id(&self, id: &EntityId) -> RepoResult<Option<StockPart>> {
        Ok(self.parts.get(id.as_str()).map(|p| p.value().clone()))
    }

    async fn insert_part(&self, part: &StockPart) -> RepoResult<()> {
        if self.parts.contains_key(part.id.as_str()) {
            return Err(RepositoryError::Conflict(part.id.to_string()));
        }
        self.parts.insert(part.id.to_string(), part.clone());
        Ok(())
    }

    async fn save_part(&self, part: &StockPart) -> RepoResult<()> {
        self.parts.insert(part.id.to_string(), part.clone());
        Ok(())
    }

    async fn delete_part(&self, id: &EntityId) -> RepoResult<()> {
        self.parts
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn list_parts(&self) -> RepoResult<Vec<StockPart>> {
        Ok(self.parts.iter().map(|e| e.value().clone()).collect())
    }

    async fn consumptions_for_tickets(
        &self,
        ticket_ids: &[EntityId],
    ) -> RepoResult<Vec<PartConsumption>> {
        Ok(self
            .consumptions
            .read()
            .unwrap()
            .iter()
            .filter(|c| ticket_ids.contains(&c.ticket_id))
            .cloned()
            .collect())
    }
}

/// In-memory maintenance-history log
#[derive(Default)]
pub struct InMemoryMaintenanceLog {
    records: RwLock<Vec<MaintenanceRecord>>,
}

impl InMemoryMaintenanceLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MaintenanceLog for InMemoryMaintenanceLog {
    async fn append(&self, record: &MaintenanceRecord) -> RepoResult<()> {
        self.records.write().unwrap().push(record.clone());
        Ok(())
    }

    async fn delete_at(&self, tag: &AssetTag, performed_at: CivilDateTime) -> RepoResult<()> {
        self.records
            .write()
            .unwrap()
            .retain(|r| !(r.asset_tag == *tag && r.performed_at == performed_at));
        Ok(())
    }

    async fn list_for_asset(&self, tag: &AssetTag) -> RepoResult<Vec<MaintenanceRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.asset_tag == *tag)
            .cloned()
            .collect())
    }
}

/// In-memory name registry, preserving insertion order
#[derive(Default)]
pub struct InMemoryNameDirectory {
    names: RwLock<Vec<String>>,
}

impl InMemoryNameDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NameDirectory for InMemoryNameDirectory {
    async fn add(&self, name: &str) -> RepoResult<()> {
        let mut names = self.names.write().unwrap();
        if names.iter().any(|n| n == name) {
            return Err(RepositoryError::Conflict(name.to_string()));
        }
        names.push(name.to_string());
        Ok(())
    }

    async fn rename(&self, old: &str, new: &str) -> RepoResult<()> {
        let mut names = self.names.write().unwrap();
        if names.iter().any(|n| n == new) {
            return Err(RepositoryError::Conflict(new.to_string()));
        }
        match names.iter_mut().find(|n| *n == old) {
            Some(slot) => {
                *slot = new.to_string();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(old.to_string())),
        }
    }

    async fn remove(&self, name: &str) -> RepoResult<()> {
        let mut names = self.names.write().unwrap();
        let before = names.len();
        names.retain(|n| n != name);
        if names.len() == before {
            return Err(RepositoryError::NotFound(name.to_string()));
        }
        Ok(())
    }

    async fn list(&self) -> RepoResult<Vec<String>> {
        Ok(self.names.read().unwrap().clone())
    }
}

/// In-memory user repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, UserAccount>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find(&self, username: &str) -> RepoResult<Option<UserAccount>> {
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }

    async fn insert(&self, account: &UserAccount) -> RepoResult<()> {
        if self.users.contains_key(&account.username) {
            return Err(RepositoryError::Conflict(account.username.clone()));
        }
        self.users.insert(account.username.clone(), account.clone());
        Ok(())
    }

    async fn save(&self, account: &UserAccount) -> RepoResult<()> {
        self.users.insert(account.username.clone(), account.clone());
        Ok(())
    }

    async fn delete(&self, username: &str) -> RepoResult<()> {
        self.users
            .remove(username)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(username.to_string()))
    }

    async fn list(&self) -> RepoResult<Vec<UserAccount>> {
        Ok(self.users.iter().map(|e| e.value().clone()).collect())
    }
}

/// Event publisher that drops everything
#[derive(Default)]
pub struct NullEventPublisher;

#[async_trait]
impl EventPublisher for NullEventPublisher {
    async fn publish(&self, _events: Vec<DomainEvent>) -> RepoResult<()> {
        Ok(())
    }
}

/// Event publisher that captures everything (for tests)
#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: RwLock<Vec<DomainEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<DomainEvent> {
        self.events.read().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> RepoResult<()> {
        self.events.write().unwrap().extend(events);
        Ok(())
    }
}

/// Wall clock in the platform's fixed UTC-3 zone
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> CivilDateTime {
        CivilDateTime::new(Utc::now().with_timezone(&civil_offset()).naive_local())
    }
}

/// Settable clock for deterministic tests
pub struct FixedClock {
    now: RwLock<CivilDateTime>,
}

impl FixedClock {
    pub fn at(now: CivilDateTime) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: CivilDateTime) {
        *self.now.write().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> CivilDateTime {
        *self.now.read().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProtocolNumber;

    fn at(day: u32, hour: u32) -> CivilDateTime {
        CivilDateTime::from_ymd_hms(2024, 2, day, hour, 0, 0).unwrap()
    }

    fn ticket(protocol: u64, tag: Option<&str>) -> Ticket {
        Ticket::open(
            ProtocolNumber::new(protocol),
            "maria",
            "UBS Centro",
            "Reception",
            "Printer will not print",
            "Nothing comes out of the tray",
            tag.map(|t| AssetTag::new(t).unwrap()),
            at(5, 10),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_ticket_repository_round_trip() {
        let repo = InMemoryTicketRepository::new();
        let t = ticket(1, Some("PAT-1"));

        repo.insert(&t).await.unwrap();

        let found = repo.find_by_id(t.id()).await.unwrap().unwrap();
        assert_eq!(found.protocol(), ProtocolNumber::new(1));

        let by_protocol = repo
            .find_by_protocol(ProtocolNumber::new(1))
            .await
            .unwrap();
        assert!(by_protocol.is_some());

        let tag = AssetTag::new("PAT-1").unwrap();
        assert_eq!(repo.list_by_asset_tag(&tag).await.unwrap().len(), 1);
        assert_eq!(repo.max_protocol().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ticket_repository_rejects_duplicate_protocol() {
        let repo = InMemoryTicketRepository::new();
        repo.insert(&ticket(7, None)).await.unwrap();

        let result = repo.insert(&ticket(7, None)).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_list_open_excludes_closed() {
        let repo = InMemoryTicketRepository::new();
        let mut closed = ticket(1, None);
        closed.close("Fixed", vec![], at(5, 15)).unwrap();
        repo.insert(&closed).await.unwrap();
        repo.insert(&ticket(2, None)).await.unwrap();

        let open = repo.list_open().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].protocol(), ProtocolNumber::new(2));
    }

    #[tokio::test]
    async fn test_max_protocol_empty_store_is_zero() {
        let repo = InMemoryTicketRepository::new();
        assert_eq!(repo.max_protocol().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_inventory_repository_conflict_on_duplicate_tag() {
        let repo = InMemoryInventoryRepository::new();
        let tag = AssetTag::new("PAT-9").unwrap();
        let item = InventoryItem::placeholder(tag.clone(), "UBS Centro", "Reception");

        repo.insert(&item).await.unwrap();
        assert!(matches!(
            repo.insert(&item).await,
            Err(RepositoryError::Conflict(_))
        ));

        repo.delete(&tag).await.unwrap();
        assert!(matches!(
            repo.delete(&tag).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_parts_store_decrement_floors_at_zero() {
        let store = InMemoryPartsStore::new();
        let part = StockPart {
            id: EntityId::new(),
            name: "Toner HP 85A".to_string(),
            quantity: 2,
            description: String::new(),
            invoice_number: None,
            added_at: at(5, 9),
        };
        store.insert_part(&part).await.unwrap();

        assert_eq!(store.decrement_stock("Toner HP 85A", 1).await.unwrap(), 1);
        assert_eq!(store.decrement_stock("Toner HP 85A", 5).await.unwrap(), 0);
        assert!(matches!(
            store.decrement_stock("No such part", 1).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_consumptions_filtered_by_ticket() {
        let store = InMemoryPartsStore::new();
        let wanted = EntityId::new();
        let other = EntityId::new();
        for (ticket_id, name) in [(&wanted, "Mouse"), (&other, "Keyboard")] {
            store
                .record_consumption(&PartConsumption {
                    ticket_id: ticket_id.clone(),
                    part_name: name.to_string(),
                    used_at: at(5, 15),
                })
                .await
                .unwrap();
        }

        let found = store
            .consumptions_for_tickets(std::slice::from_ref(&wanted))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].part_name, "Mouse");
    }

    #[tokio::test]
    async fn test_maintenance_log_delete_at_exact_timestamp() {
        let log = InMemoryMaintenanceLog::new();
        let tag = AssetTag::new("PAT-1").unwrap();
        for hour in [15, 16] {
            log.append(&MaintenanceRecord {
                asset_tag: tag.clone(),
                description: "Maintenance: Fixed. Parts used: none.".to_string(),
                performed_at: at(5, hour),
            })
            .await
            .unwrap();
        }

        log.delete_at(&tag, at(5, 15)).await.unwrap();
        let remaining = log.list_for_asset(&tag).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].performed_at, at(5, 16));

        // Deleting an absent record stays a no-op.
        log.delete_at(&tag, at(5, 15)).await.unwrap();
    }

    #[tokio::test]
    async fn test_name_directory() {
        let directory = InMemoryNameDirectory::new();
        directory.add("UBS Centro").await.unwrap();
        directory.add("UBS Norte").await.unwrap();

        assert!(matches!(
            directory.add("UBS Centro").await,
            Err(RepositoryError::Conflict(_))
        ));

        directory.rename("UBS Norte", "UBS Leste").await.unwrap();
        assert_eq!(directory.list().await.unwrap(), ["UBS Centro", "UBS Leste"]);

        directory.remove("UBS Centro").await.unwrap();
        assert!(matches!(
            directory.remove("UBS Centro").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_user_repository() {
        let repo = InMemoryUserRepository::new();
        let account = UserAccount::new("tech1", false);

        repo.insert(&account).await.unwrap();
        assert!(matches!(
            repo.insert(&account).await,
            Err(RepositoryError::Conflict(_))
        ));

        let mut updated = repo.find("tech1").await.unwrap().unwrap();
        updated.is_admin = true;
        repo.save(&updated).await.unwrap();
        assert!(repo.find("tech1").await.unwrap().unwrap().is_admin);
    }

    #[test]
    fn test_fixed_clock_is_settable() {
        let clock = FixedClock::at(at(5, 10));
        assert_eq!(clock.now(), at(5, 10));
        clock.set(at(6, 10));
        assert_eq!(clock.now(), at(6, 10));
    }
}
