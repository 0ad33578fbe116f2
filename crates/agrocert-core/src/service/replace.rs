use log::debug;
use uuid::Uuid;

use agrocert_domain::{AggregateSections, InspectionAggregate, InspectionRecordInput};

use super::write::{validate_payload, write_sections};
use super::{rolled_back, InspectionService};
use crate::collaborators::{Clock, IdGenerator};
use crate::errors::AggregateError;
use crate::store::AggregateStore;

impl<S, G, C> InspectionService<S, G, C>
    where S: AggregateStore,
          G: IdGenerator,
          C: Clock
{
    /// Reemplazo completo de la ficha: actualiza la raíz, borra todas las
    /// secciones y las reinserta desde el payload, todo en una transacción.
    ///
    /// Los identificadores de las filas hijas cambian en cada reemplazo.
    pub fn replace_aggregate(&self, record_id: Uuid, record: InspectionRecordInput, sections: AggregateSections)
                             -> Result<InspectionAggregate, AggregateError> {
        validate_payload(&record, &sections)?;

        let now = self.clock.now();
        debug!("reemplazando ficha {record_id}");
        let written = self.store
                          .transaction(|tx| {
                              if !tx.update_record(record_id, &record, now)? {
                                  return Err(AggregateError::NotFound(record_id));
                              }
                              tx.delete_children(record_id)?;
                              write_sections(tx, record_id, &sections, &self.ids, now)
                          })
                          .map_err(|e| rolled_back(record_id, e))?;
        debug!("ficha {record_id} reemplazada con {written} filas hijas");

        self.load_aggregate(record_id)
    }
}
