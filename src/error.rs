// Error type shared by the flight models, hit conversion and the CLI
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FlightError {
    /// A physical constant that would make the integration meaningless or
    /// non-terminating (non-positive mass, gravity, time step, ...)
    InvalidConstant { name: &'static str, value: f64 },
    /// A field required by the chosen model was not supplied
    MissingField(&'static str),
    InvalidInput(String),
    Parse(String),
}

impl fmt::Display for FlightError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlightError::InvalidConstant { name, value } => {
                write!(f, "invalid physical constant {}: {}", name, value)
            }
            FlightError::MissingField(field) => write!(f, "missing required field: {}", field),
            FlightError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            FlightError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl Error for FlightError {}

impl From<String> for FlightError {
    fn from(msg: String) -> Self {
        FlightError::InvalidInput(msg)
    }
}

impl From<&str> for FlightError {
    fn from(msg: &str) -> Self {
        FlightError::InvalidInput(msg.to_string())
    }
}

impl From<serde_json::Error> for FlightError {
    fn from(err: serde_json::Error) -> Self {
        FlightError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = FlightError::InvalidConstant { name: "mass", value: 0.0 };
        assert_eq!(err.to_string(), "invalid physical constant mass: 0");

        let err = FlightError::MissingField("hit_distance");
        assert!(err.to_string().contains("hit_distance"));
    }

    #[test]
    fn test_from_str_and_json() {
        let err: FlightError = "bad speed".into();
        assert_eq!(err, FlightError::InvalidInput("bad speed".to_string()));

        let json_err = serde_json::from_str::<Vec<f64>>("[1.0,").unwrap_err();
        let err: FlightError = json_err.into();
        assert!(matches!(err, FlightError::Parse(_)));
    }
}
