use serde_json::Value;

/// Values offered by one selector, in the order the backend returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    Json(String),
    NotAnArray,
    InvalidItem { index: usize },
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::Json(e) => write!(f, "JSON parse error: {e}"),
            OptionsError::NotAnArray => write!(f, "expected a JSON array of options"),
            OptionsError::InvalidItem { index } => {
                write!(f, "option at index {index} is not a string or number")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

impl OptionList {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Decodes a JSON array. Numbers are normalized to text so `2025` and
    /// `"2025"` name the same option.
    pub fn from_json_str(payload: &str) -> Result<Self, OptionsError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| OptionsError::Json(e.to_string()))?;
        let items = value.as_array().ok_or(OptionsError::NotAnArray)?;

        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let text = match item {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err(OptionsError::InvalidItem { index }),
            };
            values.push(text);
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// `preferred` when offered, else the first value.
    pub fn default_choice(&self, preferred: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| *v == preferred)
            .or_else(|| self.values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{OptionList, OptionsError};

    #[test]
    fn normalizes_numbers_and_keeps_order() {
        let list = OptionList::from_json_str("[2035, \"2025\", 2030]").expect("parse");
        assert_eq!(list.values(), ["2035", "2025", "2030"]);
        assert_eq!(list.default_choice("2025"), Some("2025"));
    }

    #[test]
    fn falls_back_to_first_value() {
        let list = OptionList::from_json_str(r#"["ssp126","ssp245"]"#).expect("parse");
        assert_eq!(list.default_choice("ssp585"), Some("ssp126"));
        assert_eq!(OptionList::default().default_choice("pr"), None);
    }

    #[test]
    fn default_choice_outlives_the_preferred_argument() {
        let list = OptionList::from_json_str("[1995, 2025]").expect("parse");
        let chosen = {
            let preferred = String::from("2025");
            list.default_choice(&preferred)
        };
        assert_eq!(chosen, Some("2025"));
    }

    #[test]
    fn rejects_non_scalar_items_and_objects() {
        assert_eq!(
            OptionList::from_json_str(r#"["pr", {"x": 1}]"#),
            Err(OptionsError::InvalidItem { index: 1 })
        );
        assert_eq!(
            OptionList::from_json_str(r#"{"years": []}"#),
            Err(OptionsError::NotAnArray)
        );
        assert!(matches!(
            OptionList::from_json_str("<html>"),
            Err(OptionsError::Json(_))
        ));
    }
}
