//! Typed clients for the portal's REST resources.
//!
//! This module provides:
//! - Wire models mirroring the backend's JSON contract
//! - Resource methods on [`PortalClient`](crate::http::PortalClient) for
//!   policies, customers, vehicles, claims, payments, dealers, observers,
//!   and support tickets
//!
//! Every call runs through the authenticated pipeline in `crate::http`.

mod client;
pub mod models;

pub use models::{
    Claim, ClaimStatus, Customer, Dealer, NewClaim, NewCustomer, NewDealer, NewObserver,
    NewPayment, NewPolicy, NewTicket, Observer, Page, PageRequest, Payment, PaymentStatus, Policy,
    PolicyFilter, PolicyStatus, PolicyUpdate, SupportTicket, TicketMessage, TicketReply,
    TicketStatus, Vehicle, VehicleUpdate,
};
