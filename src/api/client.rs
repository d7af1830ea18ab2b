//! Resource methods on the authenticated client.

use serde::Serialize;
use uuid::Uuid;

use super::models::{
    Claim, ClaimStatus, Customer, Dealer, NewClaim, NewCustomer, NewDealer, NewObserver,
    NewPayment, NewPolicy, NewTicket, Observer, Page, PageRequest, Payment, Policy, PolicyFilter,
    PolicyUpdate, SupportTicket, TicketMessage, TicketReply, Vehicle, VehicleUpdate,
};
use crate::error::PortalError;
use crate::http::PortalClient;

#[derive(Serialize)]
struct ClaimStatusUpdate {
    status: ClaimStatus,
}

impl PortalClient {
    // --- Policies ---

    /// List policies, optionally filtered by status or customer.
    pub async fn list_policies(
        &self,
        page: PageRequest,
        filter: PolicyFilter,
    ) -> Result<Page<Policy>, PortalError> {
        self.get_json(&format!(
            "/policies?{}{}",
            page.to_query(),
            filter.to_query()
        ))
        .await
    }

    pub async fn get_policy(&self, id: Uuid) -> Result<Policy, PortalError> {
        self.get_json(&format!("/policies/{}", id)).await
    }

    pub async fn create_policy(&self, policy: &NewPolicy) -> Result<Policy, PortalError> {
        self.post_json("/policies", policy).await
    }

    pub async fn update_policy(
        &self,
        id: Uuid,
        update: &PolicyUpdate,
    ) -> Result<Policy, PortalError> {
        self.put_json(&format!("/policies/{}", id), update).await
    }

    /// Cancel a policy. The backend flips the status and keeps the record.
    pub async fn cancel_policy(&self, id: Uuid) -> Result<Policy, PortalError> {
        self.post_empty(&format!("/policies/{}/cancel", id)).await
    }

    // --- Customers ---

    pub async fn list_customers(&self, page: PageRequest) -> Result<Page<Customer>, PortalError> {
        self.get_json(&format!("/customers?{}", page.to_query()))
            .await
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, PortalError> {
        self.get_json(&format!("/customers/{}", id)).await
    }

    pub async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, PortalError> {
        self.post_json("/customers", customer).await
    }

    pub async fn update_customer(
        &self,
        id: Uuid,
        customer: &NewCustomer,
    ) -> Result<Customer, PortalError> {
        self.put_json(&format!("/customers/{}", id), customer).await
    }

    /// Vehicles registered to a customer.
    pub async fn list_customer_vehicles(&self, id: Uuid) -> Result<Vec<Vehicle>, PortalError> {
        self.get_json(&format!("/customers/{}/vehicles", id)).await
    }

    // --- Vehicles ---

    pub async fn get_vehicle(&self, id: Uuid) -> Result<Vehicle, PortalError> {
        self.get_json(&format!("/vehicles/{}", id)).await
    }

    pub async fn update_vehicle(
        &self,
        id: Uuid,
        update: &VehicleUpdate,
    ) -> Result<Vehicle, PortalError> {
        self.put_json(&format!("/vehicles/{}", id), update).await
    }

    // --- Claims ---

    pub async fn list_claims(&self, page: PageRequest) -> Result<Page<Claim>, PortalError> {
        self.get_json(&format!("/claims?{}", page.to_query())).await
    }

    pub async fn get_claim(&self, id: Uuid) -> Result<Claim, PortalError> {
        self.get_json(&format!("/claims/{}", id)).await
    }

    pub async fn file_claim(&self, claim: &NewClaim) -> Result<Claim, PortalError> {
        self.post_json("/claims", claim).await
    }

    /// Move a claim through its workflow. Admin-only on the backend; a
    /// dealer or customer calling this sees a plain 403.
    pub async fn update_claim_status(
        &self,
        id: Uuid,
        status: ClaimStatus,
    ) -> Result<Claim, PortalError> {
        self.put_json(
            &format!("/claims/{}/status", id),
            &ClaimStatusUpdate { status },
        )
        .await
    }

    // --- Payments ---

    pub async fn list_policy_payments(
        &self,
        policy_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Payment>, PortalError> {
        self.get_json(&format!(
            "/policies/{}/payments?{}",
            policy_id,
            page.to_query()
        ))
        .await
    }

    pub async fn get_payment(&self, id: Uuid) -> Result<Payment, PortalError> {
        self.get_json(&format!("/payments/{}", id)).await
    }

    pub async fn record_payment(&self, payment: &NewPayment) -> Result<Payment, PortalError> {
        self.post_json("/payments", payment).await
    }

    // --- Dealers ---

    pub async fn list_dealers(&self, page: PageRequest) -> Result<Page<Dealer>, PortalError> {
        self.get_json(&format!("/dealers?{}", page.to_query())).await
    }

    pub async fn get_dealer(&self, id: Uuid) -> Result<Dealer, PortalError> {
        self.get_json(&format!("/dealers/{}", id)).await
    }

    pub async fn create_dealer(&self, dealer: &NewDealer) -> Result<Dealer, PortalError> {
        self.post_json("/dealers", dealer).await
    }

    // --- Observers ---

    pub async fn list_observers(&self, page: PageRequest) -> Result<Page<Observer>, PortalError> {
        self.get_json(&format!("/observers?{}", page.to_query()))
            .await
    }

    pub async fn get_observer(&self, id: Uuid) -> Result<Observer, PortalError> {
        self.get_json(&format!("/observers/{}", id)).await
    }

    pub async fn create_observer(&self, observer: &NewObserver) -> Result<Observer, PortalError> {
        self.post_json("/observers", observer).await
    }

    // --- Support tickets ---

    pub async fn list_tickets(&self, page: PageRequest) -> Result<Page<SupportTicket>, PortalError> {
        self.get_json(&format!("/tickets?{}", page.to_query())).await
    }

    pub async fn get_ticket(&self, id: Uuid) -> Result<SupportTicket, PortalError> {
        self.get_json(&format!("/tickets/{}", id)).await
    }

    pub async fn open_ticket(&self, ticket: &NewTicket) -> Result<SupportTicket, PortalError> {
        self.post_json("/tickets", ticket).await
    }

    pub async fn reply_ticket(
        &self,
        id: Uuid,
        reply: &TicketReply,
    ) -> Result<TicketMessage, PortalError> {
        self.post_json(&format!("/tickets/{}/replies", id), reply)
            .await
    }

    pub async fn close_ticket(&self, id: Uuid) -> Result<SupportTicket, PortalError> {
        self.post_empty(&format!("/tickets/{}/close", id)).await
    }
}
