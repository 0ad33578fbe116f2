use serde::{Deserialize, Serialize};

/// Revisión documental (0..1). Cada bandera toma `yes`, `no` o
/// `not_applicable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationReview {
    pub entry_request: String,
    pub internal_rules: String,
    pub production_contract: String,
    pub farm_sketch: String,
    pub field_diary: String,
    pub harvest_log: String,
    pub payment_receipt: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DocumentationReview {
    /// Pares (campo, valor) de las siete banderas, en orden estable.
    pub fn flags(&self) -> [(&'static str, &str); 7] {
        [("entry_request", &self.entry_request),
         ("internal_rules", &self.internal_rules),
         ("production_contract", &self.production_contract),
         ("farm_sketch", &self.farm_sketch),
         ("field_diary", &self.field_diary),
         ("harvest_log", &self.harvest_log),
         ("payment_receipt", &self.payment_receipt)]
    }
}
