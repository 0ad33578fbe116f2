//! AgroCert
//!
//! Fachada del motor de persistencia de fichas de inspección:
//! - `domain`: entidades, payloads y validación.
//! - `core`: servicio transaccional (`InspectionService`) y contratos de
//!   almacenamiento, con backend en memoria.
//! - `persistence`: backend Postgres (Diesel) y utilidades de pool.

pub use agrocert_core as core;
pub use agrocert_domain as domain;
pub use agrocert_persistence as persistence;

pub use agrocert_core::{AggregateError, InMemoryAggregateStore, InspectionService};
pub use agrocert_domain::{AggregateSections, InspectionAggregate, InspectionRecordInput};
