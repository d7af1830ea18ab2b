//! Wire models for the portal REST API.
//!
//! The contract is owned by the backend; these structs mirror its JSON
//! shapes (camelCase field names) and add small display/paging helpers
//! for the UI layer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One page of a listed resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total records across all pages.
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Number of pages at this page size.
    pub fn page_count(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size)) as u32
    }

    /// Whether this is the last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.page_count()
    }
}

/// Paging parameters for list endpoints. Pages are 1-based.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl PageRequest {
    /// Query-string form, e.g. `page=2&pageSize=20`.
    pub fn to_query(self) -> String {
        format!("page={}&pageSize={}", self.page, self.page_size)
    }
}

/// Lifecycle state of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Pending,
    Active,
    Expired,
    Cancelled,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

/// An insurance policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: Uuid,
    /// Human-facing policy number, e.g. "POL-2024-00042".
    pub policy_number: String,
    pub customer_id: Uuid,
    /// Selling dealer, absent for direct policies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_id: Option<Uuid>,
    pub vehicle: Vehicle,
    pub status: PolicyStatus,
    pub premium: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Policy {
    /// Display label for lists: "POL-2024-00042 (34 AB 123)".
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.policy_number, self.vehicle.plate_number)
    }

    /// Whether the coverage period has ended.
    pub fn is_expired(&self) -> bool {
        self.end_date < Utc::now().date_naive()
    }
}

/// Payload for creating a policy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPolicy {
    pub customer_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_id: Option<Uuid>,
    pub vehicle_id: Uuid,
    pub premium: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Partial policy update; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// List filter for policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyFilter {
    pub status: Option<PolicyStatus>,
    pub customer_id: Option<Uuid>,
}

impl PolicyFilter {
    /// Additional query parameters, prefixed with `&` when non-empty.
    pub fn to_query(self) -> String {
        let mut query = String::new();
        if let Some(status) = self.status {
            query.push_str("&status=");
            query.push_str(status.as_str());
        }
        if let Some(customer_id) = self.customer_id {
            query.push_str("&customerId=");
            query.push_str(&customer_id.to_string());
        }
        query
    }
}

/// An insured vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: u16,
}

/// Partial vehicle update.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
}

/// A policy-holding customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload for registering a customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Workflow state of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClaimStatus {
    Submitted,
    InReview,
    Approved,
    Rejected,
    Paid,
}

/// A damage/loss claim against a policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: Uuid,
    pub policy_id: Uuid,
    pub status: ClaimStatus,
    pub description: String,
    /// Assessed amount; absent until review completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    pub filed_at: DateTime<Utc>,
}

/// Payload for filing a claim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub policy_id: Uuid,
    pub description: String,
}

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// A premium payment on a policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub policy_id: Uuid,
    pub amount: Decimal,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

/// Payload for recording a payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub policy_id: Uuid,
    pub amount: Decimal,
}

/// A selling dealer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub id: Uuid,
    pub name: String,
    /// Commission as a fraction, e.g. 0.12.
    pub commission_rate: Decimal,
}

/// Payload for registering a dealer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDealer {
    pub name: String,
    pub commission_rate: Decimal,
}

/// A read-only observer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Payload for registering an observer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObserver {
    pub name: String,
    pub email: String,
}

/// State of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Answered,
    Closed,
}

/// A support ticket with its message thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: Uuid,
    pub subject: String,
    pub status: TicketStatus,
    pub opened_by: Uuid,
    pub created_at: DateTime<Utc>,
    /// Omitted in list responses.
    #[serde(default)]
    pub messages: Vec<TicketMessage>,
}

/// One message in a ticket thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    pub id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Payload for opening a ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub body: String,
}

/// Payload for replying on a ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketReply {
    pub body: String,
}
