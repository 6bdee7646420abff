//! The built-in tool set: `echo`, `get_time`, `calculate`.
//!
//! These three tools are registered at startup and define the demo server's
//! callable surface. Each validates its own parameters and reports failures
//! as [`ToolError`] -- never by panicking.

use chrono::Local;
use serde_json::{Number, Value};

use toolbus_types::error::ToolError;
use toolbus_types::frame::ToolParameter;

use super::{Tool, ToolOutput, ToolParams};

/// Coerce a parameter to `f64`.
///
/// Accepts JSON numbers and numeric strings ("3", "2.5"); anything else is
/// an invalid parameter.
fn require_number(params: &ToolParams, name: &str) -> Result<f64, ToolError> {
    match params.get(name) {
        None => Err(ToolError::MissingParameter(name.to_string())),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ToolError::invalid(name, "a number")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ToolError::invalid(name, "a number")),
        Some(_) => Err(ToolError::invalid(name, "a number")),
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

/// Echoes back the input message.
pub struct EchoTool {
    parameters: Vec<ToolParameter>,
}

impl EchoTool {
    pub fn new() -> Self {
        Self {
            parameters: vec![ToolParameter::required(
                "message",
                "string",
                "Message to echo back",
            )],
        }
    }
}

impl Default for EchoTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echoes back the input message"
    }

    fn parameters(&self) -> &[ToolParameter] {
        &self.parameters
    }

    async fn execute(&self, params: &ToolParams) -> Result<ToolOutput, ToolError> {
        let message = params
            .get("message")
            .ok_or_else(|| ToolError::MissingParameter("message".to_string()))?;

        let mut out = ToolOutput::new();
        // Echoed back verbatim, whatever JSON value the caller supplied.
        out.insert("message".to_string(), message.clone());
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// get_time
// ---------------------------------------------------------------------------

/// Returns the current time.
pub struct TimeTool {
    parameters: Vec<ToolParameter>,
}

impl TimeTool {
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
        }
    }
}

impl Default for TimeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TimeTool {
    fn name(&self) -> &str {
        "get_time"
    }

    fn description(&self) -> &str {
        "Returns the current time"
    }

    fn parameters(&self) -> &[ToolParameter] {
        &self.parameters
    }

    async fn execute(&self, _params: &ToolParams) -> Result<ToolOutput, ToolError> {
        // ISO-8601 extended, naive local time (no offset suffix).
        let now = Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string();

        let mut out = ToolOutput::new();
        out.insert("time".to_string(), Value::String(now));
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// calculate
// ---------------------------------------------------------------------------

/// Performs basic arithmetic operations.
pub struct CalculatorTool {
    parameters: Vec<ToolParameter>,
}

impl CalculatorTool {
    pub fn new() -> Self {
        Self {
            parameters: vec![
                ToolParameter::required(
                    "operation",
                    "string",
                    "Operation to perform (add, subtract, multiply, divide)",
                ),
                ToolParameter::required("a", "number", "First number"),
                ToolParameter::required("b", "number", "Second number"),
            ],
        }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> &str {
        "Performs basic arithmetic operations"
    }

    fn parameters(&self) -> &[ToolParameter] {
        &self.parameters
    }

    async fn execute(&self, params: &ToolParams) -> Result<ToolOutput, ToolError> {
        let operation = match params.get("operation") {
            None => return Err(ToolError::MissingParameter("operation".to_string())),
            Some(Value::String(op)) => op.as_str(),
            Some(_) => return Err(ToolError::invalid("operation", "a string")),
        };
        let a = require_number(params, "a")?;
        let b = require_number(params, "b")?;

        let result = match operation {
            "add" => a + b,
            "subtract" => a - b,
            "multiply" => a * b,
            "divide" => {
                // A tool-level failure, never an infinity/NaN result.
                if b == 0.0 {
                    return Err(ToolError::DivideByZero);
                }
                a / b
            }
            other => return Err(ToolError::UnknownOperation(other.to_string())),
        };

        let mut out = ToolOutput::new();
        out.insert(
            "result".to_string(),
            Number::from_f64(result).map(Value::Number).unwrap_or(Value::Null),
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::json;

    fn params(pairs: &[(&str, Value)]) -> ToolParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn echo_returns_message_verbatim() {
        let tool = EchoTool::new();
        let result = tool
            .execute(&params(&[("message", json!("hi"))]))
            .await
            .unwrap();

        assert_eq!(serde_json::to_value(result).unwrap(), json!({"message": "hi"}));
    }

    #[tokio::test]
    async fn echo_missing_message_fails() {
        let tool = EchoTool::new();
        let err = tool.execute(&ToolParams::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter(name) if name == "message"));
    }

    #[tokio::test]
    async fn get_time_returns_parseable_local_timestamp() {
        let tool = TimeTool::new();
        let result = tool.execute(&ToolParams::new()).await.unwrap();

        // Non-deterministic output -- test by shape, not value.
        let time = result.get("time").and_then(|v| v.as_str()).unwrap();
        assert!(time.contains('T'));
        NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%.6f")
            .expect("get_time output should be ISO-8601 extended");
    }

    #[tokio::test]
    async fn calculate_add() {
        let tool = CalculatorTool::new();
        let result = tool
            .execute(&params(&[
                ("operation", json!("add")),
                ("a", json!(5)),
                ("b", json!(3)),
            ]))
            .await
            .unwrap();

        assert_eq!(result.get("result"), Some(&json!(8.0)));
    }

    #[tokio::test]
    async fn calculate_subtract_multiply_divide() {
        let tool = CalculatorTool::new();
        let cases = [
            ("subtract", 10.0, 4.0, 6.0),
            ("multiply", 2.5, 4.0, 10.0),
            ("divide", 9.0, 2.0, 4.5),
        ];
        for (operation, a, b, expected) in cases {
            let result = tool
                .execute(&params(&[
                    ("operation", json!(operation)),
                    ("a", json!(a)),
                    ("b", json!(b)),
                ]))
                .await
                .unwrap();
            assert_eq!(result.get("result"), Some(&json!(expected)), "{operation}");
        }
    }

    #[tokio::test]
    async fn calculate_divide_by_zero_is_a_failure() {
        let tool = CalculatorTool::new();
        let err = tool
            .execute(&params(&[
                ("operation", json!("divide")),
                ("a", json!(10)),
                ("b", json!(0)),
            ]))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::DivideByZero));
    }

    #[tokio::test]
    async fn calculate_unknown_operation_names_it() {
        let tool = CalculatorTool::new();
        let err = tool
            .execute(&params(&[
                ("operation", json!("modulo")),
                ("a", json!(1)),
                ("b", json!(2)),
            ]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unknown operation: modulo");
    }

    #[tokio::test]
    async fn calculate_coerces_numeric_strings() {
        let tool = CalculatorTool::new();
        let result = tool
            .execute(&params(&[
                ("operation", json!("multiply")),
                ("a", json!("3")),
                ("b", json!("2.5")),
            ]))
            .await
            .unwrap();

        assert_eq!(result.get("result"), Some(&json!(7.5)));
    }

    #[tokio::test]
    async fn calculate_rejects_non_numeric_operand() {
        let tool = CalculatorTool::new();
        let err = tool
            .execute(&params(&[
                ("operation", json!("add")),
                ("a", json!([1, 2])),
                ("b", json!(1)),
            ]))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidParameter { name, .. } if name == "a"));
    }

    #[tokio::test]
    async fn calculate_missing_operand_fails() {
        let tool = CalculatorTool::new();
        let err = tool
            .execute(&params(&[("operation", json!("add")), ("a", json!(1))]))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::MissingParameter(name) if name == "b"));
    }
}
