//! Geometry use cases
//!
//! Thin orchestration over the pure calculator. The batch use case is where
//! per-item isolation lives: one malformed item never aborts its siblings.

use serde_json::Value;

use crate::domain::geometry::{GeometryError, SquareArea, calculate_square_area};

/// Use case for a single square area calculation
pub struct CalculateAreaUseCase;

impl CalculateAreaUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        side: Option<&Value>,
        unit: Option<&str>,
    ) -> Result<SquareArea, GeometryError> {
        calculate_square_area(side, unit)
    }
}

impl Default for CalculateAreaUseCase {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one batch item: the computed area, or the failure message
/// paired with the original input for the client to correlate.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchItemOutcome {
    Success(SquareArea),
    Failure { error: String, input: Value },
}

/// Use case for batch square area calculation
pub struct BatchCalculateUseCase;

impl BatchCalculateUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Process every item independently, in input order.
    ///
    /// Items need not be objects; anything without a usable `side` field
    /// simply produces a failure outcome in place.
    pub fn execute(&self, squares: &[Value]) -> Vec<BatchItemOutcome> {
        squares
            .iter()
            .map(|item| {
                let side = item.get("side");
                let unit = item.get("unit").and_then(Value::as_str);
                match calculate_square_area(side, unit) {
                    Ok(area) => BatchItemOutcome::Success(area),
                    Err(e) => BatchItemOutcome::Failure {
                        error: e.to_string(),
                        input: item.clone(),
                    },
                }
            })
            .collect()
    }
}

impl Default for BatchCalculateUseCase {
    fn default() -> Self {
        Self::new()
    }
}
