//! Hotspot Optimizer Lead Forwarder
//!
//! Relays contact-form submissions from the marketing site to the HubSpot
//! Forms API and answers the browser with a small, fixed set of responses.
//!
//! # Modules
//!
//! - `app`: Router assembly.
//! - `config`: Configuration management.
//! - `cookies`: Cookie header parsing (HubSpot tracking token).
//! - `errors`: Error handling types.
//! - `forwarder`: Lead forwarding pipeline.
//! - `handlers`: HTTP request handlers.
//! - `hubspot_client`: HubSpot Forms API client.
//! - `lead_models`: Lead submission and HubSpot payload models.

pub mod app;
pub mod config;
pub mod cookies;
pub mod errors;
pub mod forwarder;
pub mod handlers;
pub mod hubspot_client;
pub mod lead_models;
