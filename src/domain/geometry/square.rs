//! Square area calculation
//!
//! The calculator is a pure function: deterministic for given inputs, no
//! side effects, no I/O. Validation is atomic per input - a rejected side
//! never produces a partial result.

use serde::Serialize;
use serde_json::Value;

use super::errors::GeometryError;

/// Unit label applied when the client does not supply one
pub const DEFAULT_UNIT: &str = "unit";

/// Result of a square area calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquareArea {
    /// Computed area (`side * side`)
    pub area: f64,
    /// Side length after numeric coercion
    pub side: f64,
    /// Unit of the side length
    pub unit: String,
    /// Unit of the area (`unit` with a superscript two appended)
    pub square_unit: String,
}

/// Compute the area of a square from a raw JSON `side` value.
///
/// `side` accepts a JSON number or a numeric string; anything else, or a
/// value that is not a positive finite number, is rejected. `unit` defaults
/// to [`DEFAULT_UNIT`].
pub fn calculate_square_area(
    side: Option<&Value>,
    unit: Option<&str>,
) -> Result<SquareArea, GeometryError> {
    let raw = match side {
        None | Some(Value::Null) => return Err(GeometryError::MissingSide),
        Some(value) => value,
    };

    let side = coerce_side(raw).ok_or(GeometryError::InvalidSide)?;
    if !side.is_finite() || side <= 0.0 {
        return Err(GeometryError::InvalidSide);
    }

    let unit = unit.unwrap_or(DEFAULT_UNIT);
    Ok(SquareArea {
        area: side * side,
        side,
        unit: unit.to_string(),
        square_unit: format!("{unit}²"),
    })
}

/// Coerce a JSON value to a number: numbers pass through, strings are parsed
fn coerce_side(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_area_is_side_squared() {
        let result = calculate_square_area(Some(&json!(4)), None).unwrap();
        assert_eq!(result.area, 16.0);
        assert_eq!(result.side, 4.0);
        assert_eq!(result.unit, "unit");
        assert_eq!(result.square_unit, "unit²");
    }

    #[test]
    fn test_explicit_unit() {
        let result = calculate_square_area(Some(&json!(5)), Some("cm")).unwrap();
        assert_eq!(result.area, 25.0);
        assert_eq!(result.side, 5.0);
        assert_eq!(result.unit, "cm");
        assert_eq!(result.square_unit, "cm²");
    }

    #[test]
    fn test_numeric_string_coercion() {
        let result = calculate_square_area(Some(&json!("2.5")), Some("m")).unwrap();
        assert_eq!(result.area, 6.25);
        assert_eq!(result.side, 2.5);
    }

    #[test]
    fn test_missing_side() {
        assert_eq!(
            calculate_square_area(None, None),
            Err(GeometryError::MissingSide)
        );
        assert_eq!(
            calculate_square_area(Some(&Value::Null), None),
            Err(GeometryError::MissingSide)
        );
    }

    #[test]
    fn test_non_positive_side() {
        assert_eq!(
            calculate_square_area(Some(&json!(0)), None),
            Err(GeometryError::InvalidSide)
        );
        assert_eq!(
            calculate_square_area(Some(&json!(-1)), None),
            Err(GeometryError::InvalidSide)
        );
    }

    #[test]
    fn test_non_numeric_side() {
        assert_eq!(
            calculate_square_area(Some(&json!("abc")), None),
            Err(GeometryError::InvalidSide)
        );
        assert_eq!(
            calculate_square_area(Some(&json!({"nested": true})), None),
            Err(GeometryError::InvalidSide)
        );
        assert_eq!(
            calculate_square_area(Some(&json!([1, 2])), None),
            Err(GeometryError::InvalidSide)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GeometryError::MissingSide.to_string(),
            "Missing required parameter: 'side'"
        );
        assert_eq!(
            GeometryError::InvalidSide.to_string(),
            "Invalid input: 'side' must be a positive number"
        );
    }
}
