//! agrocert-core: motor de persistencia del agregado "ficha de inspección".
//!
//! Crea, reemplaza y lee la ficha con todas sus secciones como una unidad
//! transaccional. El backend se abstrae con `AggregateStore`; este crate
//! trae el backend en memoria y el de Postgres vive en `agrocert-persistence`.
pub mod collaborators;
pub mod errors;
pub mod service;
pub mod store;

pub use collaborators::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidV4Ids};
pub use errors::AggregateError;
pub use service::{load_view, validate_payload, InspectionService};
pub use store::{AggregateReader, AggregateStore, AggregateTx, InMemoryAggregateStore, ReferenceLookup, StoreResult};
