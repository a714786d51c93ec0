//! Command handlers
//!
//! Application services that orchestrate use cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::application::dto::*;
use crate::domain::aggregates::{
    InventoryItem, MaintenanceRecord, PartConsumption, ReopenOutcome, StockPart, Ticket,
    TicketError, UserAccount,
};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{
    AssetTag, EntityId, ProtocolNumber, WorkingDuration,
};
use crate::ports::inbound::{
    DirectoryUseCases, InventoryUseCases, StockUseCases, TicketUseCases, UseCaseError,
    UserAdminUseCases,
};
use crate::ports::outbound::{
    Clock, EventPublisher, InventoryRepository, MaintenanceLog, NameDirectory, PartsStore,
    RepositoryError, TicketRepository, UserRepository,
};

fn require_admin(session: &Session) -> Result<(), UseCaseError> {
    if session.is_admin {
        Ok(())
    } else {
        Err(UseCaseError::Unauthorized)
    }
}

fn required_field(value: &str, field: &str) -> Result<String, UseCaseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(UseCaseError::ValidationError(format!(
            "Required field is empty: {}",
            field
        )));
    }
    Ok(value.to_string())
}

/// Ticket lifecycle application service
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    parts: Arc<dyn PartsStore>,
    maintenance: Arc<dyn MaintenanceLog>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl TicketService {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        parts: Arc<dyn PartsStore>,
        maintenance: Arc<dyn MaintenanceLog>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tickets,
            parts,
            maintenance,
            events,
            clock,
        }
    }

    /// Event publication never fails a completed lifecycle operation.
    async fn publish(&self, events: Vec<DomainEvent>) {
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.events.publish(events).await {
            warn!("failed to publish domain events: {}", e);
        }
    }

    async fn load(&self, ticket_id: &str) -> Result<Ticket, UseCaseError> {
        let id = EntityId::from_string(ticket_id);
        self.tickets
            .find_by_id(&id)
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("loading ticket {}: {}", id, e)))?
            .ok_or_else(|| UseCaseError::NotFound(format!("ticket {}", id)))
    }
}

#[async_trait]
impl TicketUseCases for TicketService {
    async fn open_ticket(&self, command: OpenTicketCommand) -> Result<Ticket, UseCaseError> {
        let asset_tag = match command.asset_tag.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(
                AssetTag::new(raw).map_err(|e| UseCaseError::ValidationError(e.to_string()))?,
            ),
            _ => None,
        };
        let opened_at = self.clock.now();

        // Read-max-then-insert is racy across sessions; a failed read or a
        // collision at insert gets one re-read before giving up.
        let mut retried = false;
        loop {
            let max = match self.tickets.max_protocol().await {
                Ok(max) => max,
                Err(e) if !retried => {
                    warn!("failed to read protocol ceiling, retrying allocation: {}", e);
                    retried = true;
                    continue;
                }
                Err(e) => {
                    return Err(UseCaseError::AllocationFailed(format!(
                        "reading protocol ceiling: {}",
                        e
                    )));
                }
            };
            let protocol = ProtocolNumber::new(max + 1);

            let mut ticket = Ticket::open(
                protocol,
                &command.requester,
                &command.clinic,
                &command.sector,
                &command.defect_category,
                &command.description,
                asset_tag.clone(),
                opened_at,
            )
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;

            match self.tickets.insert(&ticket).await {
                Ok(()) => {
                    info!(protocol = %protocol, clinic = %ticket.clinic(), "ticket opened");
                    self.publish(ticket.take_events()).await;
                    return Ok(ticket);
                }
                Err(RepositoryError::Conflict(reason)) if !retried => {
                    warn!(protocol = %protocol, "protocol collision, retrying allocation: {}", reason);
                    retried = true;
                }
                Err(RepositoryError::Conflict(reason)) => {
                    return Err(UseCaseError::AllocationFailed(format!(
                        "protocol {} collided after retry: {}",
                        protocol, reason
                    )));
                }
                Err(e) => {
                    return Err(UseCaseError::RepositoryError(format!(
                        "inserting ticket {}: {}",
                        protocol, e
                    )));
                }
            }
        }
    }

    async fn close_ticket(&self, command: CloseTicketCommand) -> Result<(), UseCaseError> {
        let mut ticket = self.load(&command.ticket_id).await?;
        let closed_at = self.clock.now();
        let parts_used: Vec<String> = command
            .parts_used
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        ticket
            .close(&command.resolution, parts_used, closed_at)
            .map_err(|e| match e {
                TicketError::AlreadyClosed => UseCaseError::DomainError(e.to_string()),
                TicketError::MissingField(_) => UseCaseError::ValidationError(e.to_string()),
            })?;

        self.tickets.save(&ticket).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("closing ticket {}: {}", ticket.id(), e))
        })?;
        info!(protocol = %ticket.protocol(), "ticket closed");

        // Parts bookkeeping is best-effort: one part failing neither rolls
        // back the close nor blocks the remaining parts.
        for part_name in ticket.parts_used() {
            let consumption = PartConsumption {
                ticket_id: ticket.id().clone(),
                part_name: part_name.clone(),
                used_at: closed_at,
            };
            if let Err(e) = self.parts.record_consumption(&consumption).await {
                warn!(part = %part_name, "failed to record consumption: {}", e);
            }
            match self.parts.decrement_stock(part_name, 1).await {
                Ok(remaining) => {
                    info!(part = %part_name, remaining, "stock written off");
                }
                Err(e) => {
                    warn!(part = %part_name, "failed to write off stock: {}", e);
                }
            }
        }

        if let Some(tag) = ticket.asset_tag() {
            let record = MaintenanceRecord {
                asset_tag: tag.clone(),
                description: MaintenanceRecord::summary(
                    ticket.resolution().unwrap_or_default(),
                    ticket.parts_used(),
                ),
                performed_at: closed_at,
            };
            if let Err(e) = self.maintenance.append(&record).await {
                warn!(asset_tag = %tag, "failed to append maintenance record: {}", e);
            }
        }

        self.publish(ticket.take_events()).await;
        Ok(())
    }

    async fn reopen_ticket(
        &self,
        command: ReopenTicketCommand,
    ) -> Result<ReopenOutcome, UseCaseError> {
        let mut ticket = self.load(&command.ticket_id).await?;

        let outcome = ticket.reopen();
        let previous_closed_at = match outcome {
            ReopenOutcome::AlreadyOpen => {
                info!(protocol = %ticket.protocol(), "ticket is already open");
                return Ok(outcome);
            }
            ReopenOutcome::Reopened { previous_closed_at } => previous_closed_at,
        };

        self.tickets.save(&ticket).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("reopening ticket {}: {}", ticket.id(), e))
        })?;
        info!(protocol = %ticket.protocol(), "ticket reopened");

        if command.remove_maintenance_record {
            if let Some(tag) = ticket.asset_tag() {
                if let Err(e) = self.maintenance.delete_at(tag, previous_closed_at).await {
                    warn!(asset_tag = %tag, "failed to remove maintenance record: {}", e);
                }
            }
        }

        self.publish(ticket.take_events()).await;
        Ok(outcome)
    }

    async fn working_time(&self, ticket_id: &EntityId) -> Result<WorkingDuration, UseCaseError> {
        let ticket = self.load(ticket_id.as_str()).await?;
        Ok(ticket.working_time(self.clock.now()))
    }

    async fn get_ticket(&self, id: &EntityId) -> Result<Option<Ticket>, UseCaseError> {
        self.tickets
            .find_by_id(id)
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("loading ticket {}: {}", id, e)))
    }

    async fn get_by_protocol(
        &self,
        protocol: ProtocolNumber,
    ) -> Result<Option<Ticket>, UseCaseError> {
        self.tickets.find_by_protocol(protocol).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("loading ticket {}: {}", protocol, e))
        })
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, UseCaseError> {
        self.tickets
            .list_all()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing tickets: {}", e)))
    }

    async fn list_open_tickets(&self) -> Result<Vec<Ticket>, UseCaseError> {
        self.tickets
            .list_open()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing open tickets: {}", e)))
    }

    async fn list_for_asset(&self, tag: &AssetTag) -> Result<Vec<Ticket>, UseCaseError> {
        self.tickets.list_by_asset_tag(tag).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("listing tickets for {}: {}", tag, e))
        })
    }
}

/// Inventory application service
pub struct InventoryService {
    inventory: Arc<dyn InventoryRepository>,
    tickets: Arc<dyn TicketRepository>,
    parts: Arc<dyn PartsStore>,
    maintenance: Arc<dyn MaintenanceLog>,
    clock: Arc<dyn Clock>,
}

impl InventoryService {
    pub fn new(
        inventory: Arc<dyn InventoryRepository>,
        tickets: Arc<dyn TicketRepository>,
        parts: Arc<dyn PartsStore>,
        maintenance: Arc<dyn MaintenanceLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inventory,
            tickets,
            parts,
            maintenance,
            clock,
        }
    }
}

#[async_trait]
impl InventoryUseCases for InventoryService {
    async fn register_machine(
        &self,
        command: RegisterMachineCommand,
    ) -> Result<InventoryItem, UseCaseError> {
        let asset_tag = AssetTag::new(&command.asset_tag)
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;
        let kind = required_field(&command.kind, "kind")?;
        let clinic = required_field(&command.clinic, "clinic")?;
        let sector = required_field(&command.sector, "sector")?;

        let item = InventoryItem {
            asset_tag: asset_tag.clone(),
            kind,
            brand: command.brand.trim().to_string(),
            model: command.model.trim().to_string(),
            serial_number: command.serial_number.filter(|s| !s.trim().is_empty()),
            status: command.status,
            clinic,
            sector,
            ownership: command.ownership,
            acquired_on: command.acquired_on,
            warranty_until: command.warranty_until,
        };

        match self.inventory.insert(&item).await {
            Ok(()) => {
                info!(asset_tag = %asset_tag, "machine registered");
                Ok(item)
            }
            Err(RepositoryError::Conflict(_)) => Err(UseCaseError::ValidationError(format!(
                "Machine with asset tag {} already exists",
                asset_tag
            ))),
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "registering machine {}: {}",
                asset_tag, e
            ))),
        }
    }

    async fn update_machine(
        &self,
        command: UpdateMachineCommand,
    ) -> Result<InventoryItem, UseCaseError> {
        let tag = AssetTag::new(&command.asset_tag)
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;
        let mut item = self
            .inventory
            .find_by_asset_tag(&tag)
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("loading machine {}: {}", tag, e)))?
            .ok_or_else(|| UseCaseError::NotFound(format!("machine {}", tag)))?;

        if let Some(kind) = command.kind {
            item.kind = kind;
        }
        if let Some(brand) = command.brand {
            item.brand = brand;
        }
        if let Some(model) = command.model {
            item.model = model;
        }
        if let Some(status) = command.status {
            item.status = status;
        }
        if let Some(clinic) = command.clinic {
            item.clinic = clinic;
        }
        if let Some(sector) = command.sector {
            item.sector = sector;
        }
        if let Some(ownership) = command.ownership {
            item.ownership = ownership;
        }

        self.inventory.save(&item).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("updating machine {}: {}", tag, e))
        })?;
        Ok(item)
    }

    async fn remove_machine(&self, tag: &AssetTag) -> Result<(), UseCaseError> {
        match self.inventory.delete(tag).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound(_)) => {
                Err(UseCaseError::NotFound(format!("machine {}", tag)))
            }
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "removing machine {}: {}",
                tag, e
            ))),
        }
    }

    async fn find_machine(&self, tag: &AssetTag) -> Result<Option<InventoryItem>, UseCaseError> {
        self.inventory
            .find_by_asset_tag(tag)
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("loading machine {}: {}", tag, e)))
    }

    async fn list_machines(&self) -> Result<Vec<InventoryItem>, UseCaseError> {
        self.inventory
            .list_all()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing machines: {}", e)))
    }

    async fn ensure_registered(
        &self,
        tag: &AssetTag,
        clinic: &str,
        sector: &str,
    ) -> Result<InventoryItem, UseCaseError> {
        if let Some(existing) = self.find_machine(tag).await? {
            return Ok(existing);
        }

        let placeholder = InventoryItem::placeholder(tag.clone(), clinic, sector);
        match self.inventory.insert(&placeholder).await {
            Ok(()) => {
                info!(asset_tag = %tag, "placeholder machine registered");
                Ok(placeholder)
            }
            // Lost a race with another registration; the stored item wins.
            Err(RepositoryError::Conflict(_)) => self
                .find_machine(tag)
                .await?
                .ok_or_else(|| UseCaseError::NotFound(format!("machine {}", tag))),
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "registering placeholder {}: {}",
                tag, e
            ))),
        }
    }

    async fn machine_history(&self, tag: &AssetTag) -> Result<MachineHistoryView, UseCaseError> {
        let item = self
            .find_machine(tag)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("machine {}", tag)))?;

        let tickets = self.tickets.list_by_asset_tag(tag).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("listing tickets for {}: {}", tag, e))
        })?;
        let ticket_ids: Vec<EntityId> = tickets.iter().map(|t| t.id().clone()).collect();

        let parts_used = self
            .parts
            .consumptions_for_tickets(&ticket_ids)
            .await
            .map_err(|e| {
                UseCaseError::RepositoryError(format!("listing parts for {}: {}", tag, e))
            })?;
        let maintenance = self.maintenance.list_for_asset(tag).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("listing maintenance for {}: {}", tag, e))
        })?;

        let now = self.clock.now();
        Ok(MachineHistoryView {
            item,
            tickets: tickets
                .iter()
                .map(|t| TicketView::from_ticket(t, now))
                .collect(),
            parts_used,
            maintenance,
        })
    }
}

/// Spare-part stock application service
pub struct StockService {
    parts: Arc<dyn PartsStore>,
    clock: Arc<dyn Clock>,
}

impl StockService {
    pub fn new(parts: Arc<dyn PartsStore>, clock: Arc<dyn Clock>) -> Self {
        Self { parts, clock }
    }
}

#[async_trait]
impl StockUseCases for StockService {
    async fn add_part(&self, command: AddPartCommand) -> Result<StockPart, UseCaseError> {
        let name = required_field(&command.name, "part name")?;
        let part = StockPart {
            id: EntityId::new(),
            name,
            quantity: command.quantity,
            description: command.description,
            invoice_number: command.invoice_number,
            added_at: self.clock.now(),
        };
        self.parts.insert_part(&part).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("adding part {}: {}", part.name, e))
        })?;
        Ok(part)
    }

    async fn update_part(&self, command: UpdatePartCommand) -> Result<StockPart, UseCaseError> {
        let id = EntityId::from_string(&command.part_id);
        let mut part = self
            .parts
            .find_part_by_id(&id)
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("loading part {}: {}", id, e)))?
            .ok_or_else(|| UseCaseError::NotFound(format!("part {}", id)))?;

        if let Some(name) = command.name {
            part.name = required_field(&name, "part name")?;
        }
        if let Some(quantity) = command.quantity {
            part.quantity = quantity;
        }
        if let Some(description) = command.description {
            part.description = description;
        }
        if let Some(invoice_number) = command.invoice_number {
            part.invoice_number = Some(invoice_number);
        }

        self.parts
            .save_part(&part)
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("updating part {}: {}", id, e)))?;
        Ok(part)
    }

    async fn remove_part(&self, id: &EntityId) -> Result<(), UseCaseError> {
        match self.parts.delete_part(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound(_)) => {
                Err(UseCaseError::NotFound(format!("part {}", id)))
            }
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "removing part {}: {}",
                id, e
            ))),
        }
    }

    async fn list_parts(&self) -> Result<Vec<StockPart>, UseCaseError> {
        self.parts
            .list_parts()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing parts: {}", e)))
    }

    async fn write_off(
        &self,
        part_name: &str,
        quantity: u32,
    ) -> Result<Option<u32>, UseCaseError> {
        match self.parts.decrement_stock(part_name, quantity).await {
            Ok(remaining) => {
                info!(part = %part_name, remaining, "stock written off");
                Ok(Some(remaining))
            }
            Err(RepositoryError::NotFound(_)) => {
                warn!(part = %part_name, "part not found in stock, nothing written off");
                Ok(None)
            }
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "writing off part {}: {}",
                part_name, e
            ))),
        }
    }
}

/// Clinic/sector directory application service
pub struct DirectoryService {
    clinics: Arc<dyn NameDirectory>,
    sectors: Arc<dyn NameDirectory>,
}

impl DirectoryService {
    pub fn new(clinics: Arc<dyn NameDirectory>, sectors: Arc<dyn NameDirectory>) -> Self {
        Self { clinics, sectors }
    }

    async fn add_name(
        directory: &dyn NameDirectory,
        label: &str,
        name: &str,
    ) -> Result<(), UseCaseError> {
        let name = required_field(name, label)?;
        match directory.add(&name).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::Conflict(_)) => Err(UseCaseError::ValidationError(format!(
                "{} '{}' is already registered",
                label, name
            ))),
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "adding {} '{}': {}",
                label, name, e
            ))),
        }
    }

    async fn rename_name(
        directory: &dyn NameDirectory,
        label: &str,
        old: &str,
        new: &str,
    ) -> Result<(), UseCaseError> {
        let new = required_field(new, label)?;
        match directory.rename(old, &new).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound(_)) => {
                Err(UseCaseError::NotFound(format!("{} '{}'", label, old)))
            }
            Err(RepositoryError::Conflict(_)) => Err(UseCaseError::ValidationError(format!(
                "{} '{}' is already registered",
                label, new
            ))),
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "renaming {} '{}': {}",
                label, old, e
            ))),
        }
    }

    async fn remove_name(
        directory: &dyn NameDirectory,
        label: &str,
        name: &str,
    ) -> Result<(), UseCaseError> {
        match directory.remove(name).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound(_)) => {
                Err(UseCaseError::NotFound(format!("{} '{}'", label, name)))
            }
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "removing {} '{}': {}",
                label, name, e
            ))),
        }
    }
}

#[async_trait]
impl DirectoryUseCases for DirectoryService {
    async fn add_clinic(&self, session: &Session, name: &str) -> Result<(), UseCaseError> {
        require_admin(session)?;
        Self::add_name(self.clinics.as_ref(), "clinic", name).await
    }

    async fn rename_clinic(
        &self,
        session: &Session,
        old: &str,
        new: &str,
    ) -> Result<(), UseCaseError> {
        require_admin(session)?;
        Self::rename_name(self.clinics.as_ref(), "clinic", old, new).await
    }

    async fn remove_clinic(&self, session: &Session, name: &str) -> Result<(), UseCaseError> {
        require_admin(session)?;
        Self::remove_name(self.clinics.as_ref(), "clinic", name).await
    }

    async fn list_clinics(&self) -> Result<Vec<String>, UseCaseError> {
        self.clinics
            .list()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing clinics: {}", e)))
    }

    async fn add_sector(&self, session: &Session, name: &str) -> Result<(), UseCaseError> {
        require_admin(session)?;
        Self::add_name(self.sectors.as_ref(), "sector", name).await
    }

    async fn rename_sector(
        &self,
        session: &Session,
        old: &str,
        new: &str,
    ) -> Result<(), UseCaseError> {
        require_admin(session)?;
        Self::rename_name(self.sectors.as_ref(), "sector", old, new).await
    }

    async fn remove_sector(&self, session: &Session, name: &str) -> Result<(), UseCaseError> {
        require_admin(session)?;
        Self::remove_name(self.sectors.as_ref(), "sector", name).await
    }

    async fn list_sectors(&self) -> Result<Vec<String>, UseCaseError> {
        self.sectors
            .list()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing sectors: {}", e)))
    }
}

/// User administration application service
pub struct UserAdminService {
    users: Arc<dyn UserRepository>,
}

impl UserAdminService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserAdminUseCases for UserAdminService {
    async fn register_user(
        &self,
        session: &Session,
        username: &str,
        is_admin: bool,
    ) -> Result<UserAccount, UseCaseError> {
        require_admin(session)?;
        let username = required_field(username, "username")?;
        let account = UserAccount::new(username, is_admin);

        match self.users.insert(&account).await {
            Ok(()) => {
                info!(username = %account.username, is_admin, "user registered");
                Ok(account)
            }
            Err(RepositoryError::Conflict(_)) => Err(UseCaseError::ValidationError(format!(
                "User '{}' already exists",
                account.username
            ))),
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "registering user '{}': {}",
                account.username, e
            ))),
        }
    }

    async fn remove_user(&self, session: &Session, username: &str) -> Result<(), UseCaseError> {
        require_admin(session)?;
        match self.users.delete(username).await {
            Ok(()) => {
                info!(username = %username, "user removed");
                Ok(())
            }
            Err(RepositoryError::NotFound(_)) => {
                Err(UseCaseError::NotFound(format!("user '{}'", username)))
            }
            Err(e) => Err(UseCaseError::RepositoryError(format!(
                "removing user '{}': {}",
                username, e
            ))),
        }
    }

    async fn set_admin(
        &self,
        session: &Session,
        username: &str,
        is_admin: bool,
    ) -> Result<UserAccount, UseCaseError> {
        require_admin(session)?;
        let mut account = self
            .users
            .find(username)
            .await
            .map_err(|e| {
                UseCaseError::RepositoryError(format!("loading user '{}': {}", username, e))
            })?
            .ok_or_else(|| UseCaseError::NotFound(format!("user '{}'", username)))?;

        account.is_admin = is_admin;
        self.users.save(&account).await.map_err(|e| {
            UseCaseError::RepositoryError(format!("updating user '{}': {}", username, e))
        })?;
        Ok(account)
    }

    async fn list_users(&self, session: &Session) -> Result<Vec<UserAccount>, UseCaseError> {
        require_admin(session)?;
        self.users
            .list()
            .await
            .map_err(|e| UseCaseError::RepositoryError(format!("listing users: {}", e)))
    }
}
