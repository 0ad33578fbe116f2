//! Taxonomía de errores del motor de agregados.

use thiserror::Error;
use uuid::Uuid;

/// Errores que devuelven las operaciones del motor. Se propagan sin
/// envolver: el error que dispara el rollback es el que recibe el llamador.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AggregateError {
    /// Una o más entidades violan reglas de campo. Lleva la lista completa.
    #[error("validación fallida: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
    /// Cosecha/venta ausente, repetida o con discriminador inválido.
    #[error("cardinalidad de cosecha/venta inválida: {0}")]
    CardinalityViolation(String),
    #[error("ya existe una ficha para el productor {producer_code} en la gestión {cycle_year}")]
    DuplicateAggregate { producer_code: String, cycle_year: i32 },
    #[error("ficha no encontrada: {0}")]
    NotFound(Uuid),
    /// Fallo de transporte/transacción del almacén, sin clasificar.
    #[error("error de almacenamiento: {0}")]
    Store(String),
}

impl AggregateError {
    /// `CardinalityViolation` es una especialización de validación.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed(_) | Self::CardinalityViolation(_))
    }

    /// Violaciones asociadas (vacío para errores que no son de validación).
    pub fn violations(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed(v) => v.clone(),
            Self::CardinalityViolation(msg) => vec![format!("harvest_sales: {msg}")],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_violation() {
        let e = AggregateError::ValidationFailed(vec!["a: requerido".into(), "b: requerido".into()]);
        assert_eq!(e.to_string(), "validación fallida: a: requerido; b: requerido");
        assert!(e.is_validation());
    }

    #[test]
    fn cardinality_is_a_validation_failure() {
        let e = AggregateError::CardinalityViolation("se recibieron 0".into());
        assert!(e.is_validation());
        assert_eq!(e.violations(), vec!["harvest_sales: se recibieron 0".to_string()]);
        assert!(!AggregateError::Store("x".into()).is_validation());
    }
}
