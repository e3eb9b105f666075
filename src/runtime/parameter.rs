//! Named, typed configuration values attached to filters

use super::channel::Unit;

/// Value type of a filter parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    Int,
    Float,
    Enum,
    String,
}

/// A filter configuration value
///
/// Enumerated parameters additionally own an ordered label → code table; the
/// selected code is read back with [`FilterParameter::int_val`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParameter {
    param_type: ParameterType,
    unit: Unit,
    int_val: i64,
    float_val: f64,
    string_val: String,
    enum_values: Vec<(String, i64)>,
}

impl FilterParameter {
    pub fn new(param_type: ParameterType, unit: Unit) -> Self {
        Self {
            param_type,
            unit,
            int_val: 0,
            float_val: 0.0,
            string_val: String::new(),
            enum_values: Vec::new(),
        }
    }

    pub fn param_type(&self) -> ParameterType {
        self.param_type
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Append a label → code pair to the enum table
    pub fn add_enum_value(&mut self, label: impl Into<String>, code: i64) {
        self.enum_values.push((label.into(), code));
    }

    /// Labels in insertion order
    pub fn enum_labels(&self) -> impl Iterator<Item = &str> {
        self.enum_values.iter().map(|(l, _)| l.as_str())
    }

    pub fn enum_code(&self, label: &str) -> Option<i64> {
        self.enum_values
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }

    /// Label of the currently selected code, if it has one
    pub fn label(&self) -> Option<&str> {
        self.enum_values
            .iter()
            .find(|(_, c)| *c == self.int_val)
            .map(|(l, _)| l.as_str())
    }

    pub fn int_val(&self) -> i64 {
        self.int_val
    }

    pub fn set_int_val(&mut self, value: i64) {
        self.int_val = value;
        self.float_val = value as f64;
    }

    pub fn float_val(&self) -> f64 {
        self.float_val
    }

    pub fn set_float_val(&mut self, value: f64) {
        self.float_val = value;
        self.int_val = value as i64;
    }

    pub fn string_val(&self) -> &str {
        &self.string_val
    }

    pub fn set_string_val(&mut self, value: impl Into<String>) {
        self.string_val = value.into();
    }

    /// Select an enum entry by label. Returns false if the label is unknown.
    pub fn set_by_label(&mut self, label: &str) -> bool {
        match self.enum_code(label) {
            Some(code) => {
                self.set_int_val(code);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_enum() -> FilterParameter {
        let mut p = FilterParameter::new(ParameterType::Enum, Unit::Counts);
        p.add_enum_value("Slow", 1);
        p.add_enum_value("Fast", 10);
        p.set_int_val(1);
        p
    }

    #[test]
    fn test_enum_labels_keep_order() {
        let p = make_enum();
        let labels: Vec<&str> = p.enum_labels().collect();
        assert_eq!(labels, vec!["Slow", "Fast"]);
        assert_eq!(p.param_type(), ParameterType::Enum);
    }

    #[test]
    fn test_set_by_label() {
        let mut p = make_enum();
        assert!(p.set_by_label("Fast"));
        assert_eq!(p.int_val(), 10);
        assert_eq!(p.label(), Some("Fast"));

        assert!(!p.set_by_label("Medium"));
        assert_eq!(p.int_val(), 10);
    }

    #[test]
    fn test_label_of_unmapped_code() {
        let mut p = make_enum();
        p.set_int_val(3);
        assert_eq!(p.label(), None);
    }

    #[test]
    fn test_numeric_views() {
        let mut p = FilterParameter::new(ParameterType::Float, Unit::Volts);
        p.set_float_val(2.75);
        assert_eq!(p.int_val(), 2);
        assert_eq!(p.float_val(), 2.75);
        p.set_string_val("x");
        assert_eq!(p.string_val(), "x");
    }
}
