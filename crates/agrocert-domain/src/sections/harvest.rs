use serde::{Deserialize, Serialize};

/// Cosecha y venta. Exactamente una por ficha; `production_type` discrimina
/// entre producción `organic` e `in-transition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestSale {
    pub production_type: String,
    #[serde(default)]
    pub estimated_yield_kg: Option<f64>,
    pub harvested_kg: f64,
    pub sold_kg: f64,
    #[serde(default)]
    pub sale_destination: Option<String>,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
