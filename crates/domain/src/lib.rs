//! # hubitat-exporter-domain
//!
//! Pure domain model for the Hubitat metrics exporter.
//!
//! ## Responsibilities
//! - Foundational types: opaque device identifiers, error conventions
//! - Define **Capabilities** (functional traits a device declares: `Battery`, `Switch`, …)
//! - Define the **Attribute Store** (loosely-typed device state with typed accessors)
//! - Define **Devices** (one record per device, as reported by the hub on each poll)
//! - Define **Capability Views** (typed, single-purpose readings over a device)
//! - Define the **Metric catalogue** (gauge names, help texts, value conversion)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod attribute;
pub mod capability;
pub mod device;
pub mod metric;
pub mod view;
