//! Field validation rules.

use tessera_core::Value;

/// Expected shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Any value is accepted.
    Any,
    Bool,
    Int,
    /// Float fields also accept integers.
    Float,
    String,
    List,
    Map,
}

impl ValueType {
    /// Name matching `Value::type_name`.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Any => "Any",
            ValueType::Bool => "Bool",
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::String => "String",
            ValueType::List => "List",
            ValueType::Map => "Map",
        }
    }

    /// Check whether a (non-null) value has this shape.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Any, _) => true,
            (ValueType::Bool, Value::Bool(_)) => true,
            (ValueType::Int, Value::Int(_)) => true,
            (ValueType::Float, Value::Float(_) | Value::Int(_)) => true,
            (ValueType::String, Value::String(_)) => true,
            (ValueType::List, Value::List(_)) => true,
            (ValueType::Map, Value::Map(_)) => true,
            _ => false,
        }
    }
}

/// Validation rule attached to a schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Expected value type.
    pub value_type: ValueType,
    /// Whether a value must be present.
    pub required: bool,
    /// Whether null satisfies a required rule.
    pub nullable: bool,
    /// Whether loosely typed input is converted (e.g. "42" to 42).
    pub convert: bool,
    /// Value used when the input is missing.
    pub default: Option<Value>,
    /// Minimum value constraint (for Int, Float).
    pub min: Option<Value>,
    /// Maximum value constraint (for Int, Float).
    pub max: Option<Value>,
    /// Minimum length (chars for strings, items for lists).
    pub length_min: Option<usize>,
    /// Maximum length (chars for strings, items for lists).
    pub length_max: Option<usize>,
    /// Regex the string value must match.
    pub pattern: Option<String>,
    /// Allowed values (one-of constraint).
    pub allowed_values: Option<Vec<Value>>,
}

impl Rule {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            required: false,
            nullable: false,
            convert: true,
            default: None,
            min: None,
            max: None,
            length_min: None,
            length_max: None,
            pattern: None,
            allowed_values: None,
        }
    }

    pub fn any() -> Self {
        Self::new(ValueType::Any)
    }

    pub fn bool() -> Self {
        Self::new(ValueType::Bool)
    }

    pub fn int() -> Self {
        Self::new(ValueType::Int)
    }

    pub fn float() -> Self {
        Self::new(ValueType::Float)
    }

    pub fn string() -> Self {
        Self::new(ValueType::String)
    }

    pub fn list() -> Self {
        Self::new(ValueType::List)
    }

    pub fn map() -> Self {
        Self::new(ValueType::Map)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Disable conversion of loosely typed input.
    pub fn strict(mut self) -> Self {
        self.convert = false;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_range(mut self, min: Option<Value>, max: Option<Value>) -> Self {
        // Merge rather than replace: only update if Some is provided
        if min.is_some() {
            self.min = min;
        }
        if max.is_some() {
            self.max = max;
        }
        self
    }

    pub fn with_min(self, min: impl Into<Value>) -> Self {
        self.with_range(Some(min.into()), None)
    }

    pub fn with_max(self, max: impl Into<Value>) -> Self {
        self.with_range(None, Some(max.into()))
    }

    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.length_min = Some(min);
        self.length_max = Some(max);
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.length_min = Some(min);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_allowed_values(mut self, values: Vec<Value>) -> Self {
        self.allowed_values = Some(values);
        self
    }
}
