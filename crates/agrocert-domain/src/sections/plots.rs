//! Parcelas: entidad relacionada (no pertenece al agregado).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parcela tal como vive en su propio almacén.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: Uuid,
    pub producer_code: String,
    pub plot_number: i32,
    pub area_ha: f64,
    pub rotation: Option<bool>,
    pub irrigation: Option<bool>,
    pub barrier_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude_m: Option<f64>,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl Plot {
    /// Aplica una actualización parcial: sólo los campos informados
    /// sobrescriben, el resto se conserva.
    pub fn merge(&mut self, update: &PlotUpdate, now: DateTime<Utc>) {
        if let Some(v) = update.rotation {
            self.rotation = Some(v);
        }
        if let Some(v) = update.irrigation {
            self.irrigation = Some(v);
        }
        if let Some(v) = &update.barrier_type {
            self.barrier_type = Some(v.clone());
        }
        if let Some(v) = update.latitude {
            self.latitude = Some(v);
        }
        if let Some(v) = update.longitude {
            self.longitude = Some(v);
        }
        if let Some(v) = update.altitude_m {
            self.altitude_m = Some(v);
        }
        self.updated_at = now;
    }

    pub fn snapshot(&self) -> PlotSnapshot {
        PlotSnapshot { plot_id: self.id,
                       plot_number: self.plot_number,
                       area_ha: self.area_ha,
                       rotation: self.rotation,
                       irrigation: self.irrigation,
                       barrier_type: self.barrier_type.clone(),
                       latitude: self.latitude,
                       longitude: self.longitude,
                       altitude_m: self.altitude_m,
                       active: self.active }
    }
}

/// Actualización de atributos de una parcela activa (rotación, riego,
/// barreras, GPS) enviada junto con la ficha.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotUpdate {
    pub plot_id: Uuid,
    #[serde(default)]
    pub rotation: Option<bool>,
    #[serde(default)]
    pub irrigation: Option<bool>,
    #[serde(default)]
    pub barrier_type: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude_m: Option<f64>,
}

/// Atributos actuales de la parcela, adjuntados al leer un detalle de cultivo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    pub plot_id: Uuid,
    pub plot_number: i32,
    pub area_ha: f64,
    pub rotation: Option<bool>,
    pub irrigation: Option<bool>,
    pub barrier_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude_m: Option<f64>,
    pub active: bool,
}
