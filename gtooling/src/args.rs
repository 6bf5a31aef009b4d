//! Argument coercion helpers for handlers that receive string-valued arguments.
//!
//! ```rust
//! use gprovider::FunctionArgs;
//! use gtooling::{optional_arg, parse_arg, required_arg};
//!
//! let mut args = FunctionArgs::new();
//! args.insert("year".to_string(), "2024".to_string());
//! args.insert("city".to_string(), "Kyoto".to_string());
//!
//! assert_eq!(required_arg(&args, "city").expect("city present"), "Kyoto");
//! assert_eq!(parse_arg::<i32>(&args, "year").expect("numeric year"), 2024);
//! assert_eq!(optional_arg(&args, "country"), None);
//! ```

use std::fmt::Display;
use std::str::FromStr;

use gprovider::{FunctionArgs, FunctionOutput};
use serde_json::Value;

use crate::ToolError;

pub fn required_arg<'a>(args: &'a FunctionArgs, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .map(String::as_str)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required argument: '{key}'")))
}

pub fn optional_arg<'a>(args: &'a FunctionArgs, key: &str) -> Option<&'a str> {
    args.get(key).map(String::as_str)
}

pub fn parse_arg<T>(args: &FunctionArgs, key: &str) -> Result<T, ToolError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = required_arg(args, key)?;
    raw.trim().parse::<T>().map_err(|err| {
        ToolError::invalid_arguments(format!("argument '{key}' has invalid value '{raw}': {err}"))
    })
}

/// Converts a JSON object into a handler result.
pub fn json_output(value: Value) -> Result<FunctionOutput, ToolError> {
    match value {
        Value::Object(output) => Ok(output),
        other => Err(ToolError::execution(format!(
            "function output must be a JSON object, got {other}"
        ))),
    }
}
