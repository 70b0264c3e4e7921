//! Signals presented to a machine to request a state change.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping from argument name to value.
pub type Arguments = serde_json::Map<String, Value>;

/// A typed message with a read-only argument payload.
///
/// Signals are plain values: the machine inspects them during dispatch and
/// never retains them.
///
/// # Example
///
/// ```rust
/// use statewise::core::Signal;
///
/// let signal = Signal::new("complete").with("success", true);
///
/// assert_eq!(signal.signal_type(), "complete");
/// assert_eq!(signal.argument_as::<bool>("success"), Some(true));
/// assert!(signal.argument("missing").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    signal_type: String,
    #[serde(default)]
    arguments: Arguments,
}

impl Signal {
    /// Create a signal with no arguments.
    pub fn new(signal_type: impl Into<String>) -> Self {
        Self {
            signal_type: signal_type.into(),
            arguments: Arguments::new(),
        }
    }

    /// Create a signal carrying the given arguments.
    pub fn with_arguments(signal_type: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            signal_type: signal_type.into(),
            arguments,
        }
    }

    /// Add one argument while constructing the signal.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn signal_type(&self) -> &str {
        &self.signal_type
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Look up an argument by name.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// Look up an argument, falling back to `default` when it is absent.
    pub fn argument_or(&self, name: &str, default: Value) -> Value {
        self.arguments.get(name).cloned().unwrap_or(default)
    }

    /// Decode an argument into a concrete type.
    ///
    /// Returns `None` when the argument is absent or has a different shape.
    pub fn argument_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.arguments
            .get(name)
            .and_then(|value| T::deserialize(value).ok())
    }
}

impl From<&str> for Signal {
    fn from(signal_type: &str) -> Self {
        Self::new(signal_type)
    }
}

impl From<String> for Signal {
    fn from(signal_type: String) -> Self {
        Self::new(signal_type)
    }
}
