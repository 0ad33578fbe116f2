//! Servicio de fichas de inspección.
//!
//! Orquesta create / replace / load / find / delete sobre un
//! `AggregateStore`. Los colaboradores (`IdGenerator`, `Clock`) se inyectan
//! para poder fijarlos en tests.
use log::{debug, error, warn};
use uuid::Uuid;

use agrocert_domain::InspectionAggregate;

use crate::collaborators::{Clock, IdGenerator, SystemClock, UuidV4Ids};
use crate::errors::AggregateError;
use crate::store::AggregateStore;

mod reader;
mod replace;
mod write;

pub use reader::load_view;
pub use write::validate_payload;

#[derive(Debug)]
pub struct InspectionService<S, G = UuidV4Ids, C = SystemClock>
    where S: AggregateStore,
          G: IdGenerator,
          C: Clock
{
    store: S,
    ids: G,
    clock: C,
}

impl<S> InspectionService<S>
    where S: AggregateStore
{
    /// Servicio con identificadores v4 y reloj del sistema.
    pub fn new(store: S) -> Self {
        Self::with_collaborators(store, UuidV4Ids, SystemClock)
    }
}

impl<S, G, C> InspectionService<S, G, C>
    where S: AggregateStore,
          G: IdGenerator,
          C: Clock
{
    pub fn with_collaborators(store: S, ids: G, clock: C) -> Self {
        Self { store, ids, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Agregado completo de la ficha o `NotFound`.
    pub fn load_aggregate(&self, record_id: Uuid) -> Result<InspectionAggregate, AggregateError> {
        load_view(&self.store, record_id)?.ok_or(AggregateError::NotFound(record_id))
    }

    /// Busca por la clave natural (productor, gestión).
    pub fn find_by_producer_and_cycle(&self, producer_code: &str, cycle_year: i32)
                                      -> Result<Option<InspectionAggregate>, AggregateError> {
        match self.store.find_record_by_producer_cycle(producer_code, cycle_year)? {
            Some(record) => load_view(&self.store, record.id),
            None => Ok(None),
        }
    }

    /// Borrado físico con cascada a todas las secciones.
    pub fn delete_aggregate(&self, record_id: Uuid) -> Result<(), AggregateError> {
        if !self.store.delete_record(record_id)? {
            return Err(AggregateError::NotFound(record_id));
        }
        debug!("ficha {record_id} eliminada");
        Ok(())
    }
}

/// Registra el rollback de una transacción con el nivel que corresponde al
/// tipo de error y lo devuelve sin tocar.
fn rolled_back(record_id: Uuid, err: AggregateError) -> AggregateError {
    match &err {
        AggregateError::Store(msg) => error!("rollback de ficha {record_id}: fallo del almacén: {msg}"),
        other => warn!("rollback de ficha {record_id}: {other}"),
    }
    err
}
