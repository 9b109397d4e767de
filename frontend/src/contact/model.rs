use std::collections::BTreeMap;

use super::rules::{rules, FieldKind};

/// Synthetic error slot for the bot check.
pub const RECAPTCHA_FIELD: &str = "recaptcha";
/// Optional opt-in checkbox that has no rule.
pub const NEWSLETTER_FIELD: &str = "newsletter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    /// Trimmed text, `"on"`/`""` for checkboxes.
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text.trim(),
            FieldValue::Checked(true) => "on",
            FieldValue::Checked(false) => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_text().is_empty()
    }

    fn cleared(&self) -> Self {
        match self {
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::Checked(_) => FieldValue::Checked(false),
        }
    }
}

/// Owned snapshot of the live form: values in form order and at most one
/// error per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
    fields: Vec<(String, FieldValue)>,
    errors: BTreeMap<String, String>,
}

impl FormModel {
    /// Empty contact form: every ruled field plus the newsletter opt-in.
    pub fn contact_form() -> Self {
        let mut model = rules().iter().fold(Self::default(), |model, rule| {
            let value = match rule.kind {
                FieldKind::Text => FieldValue::Text(String::new()),
                FieldKind::Checkbox => FieldValue::Checked(false),
            };
            model.with_field(rule.name, value)
        });
        let privacy = model.fields.iter().position(|(name, _)| name == "privacy");
        let newsletter = (NEWSLETTER_FIELD.to_string(), FieldValue::Checked(false));
        match privacy {
            Some(index) => model.fields.insert(index, newsletter),
            None => model.fields.push(newsletter),
        }
        model
    }

    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        if !self.set(name, value.clone()) {
            self.fields.push((name.to_string(), value));
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, value)| value)
    }

    /// Raw (untrimmed) text of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.value(name)? {
            FieldValue::Text(text) => Some(text),
            FieldValue::Checked(_) => None,
        }
    }

    pub fn is_checked(&self, name: &str) -> bool {
        matches!(self.value(name), Some(FieldValue::Checked(true)))
    }

    /// Returns `false` when the form has no such field.
    pub fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> bool {
        self.set(name, FieldValue::Text(text.into()))
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        self.set(name, FieldValue::Checked(checked))
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn set_error(&mut self, name: &str, message: impl Into<String>) {
        self.errors.insert(name.to_string(), message.into());
    }

    pub fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    #[cfg(test)]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// First errored input in form order; the bot check is not focusable.
    pub fn first_error_field(&self) -> Option<&str> {
        self.names().find(|name| self.errors.contains_key(*name))
    }

    /// Clears every value and error, like `form.reset()`.
    pub fn reset(&mut self) {
        for (_, value) in &mut self.fields {
            *value = value.cleared();
        }
        self.errors.clear();
    }

    /// Flat field map as the browser would post it: unchecked boxes are omitted.
    pub fn payload(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, value)| match value {
                FieldValue::Text(text) => Some((name.clone(), text.clone())),
                FieldValue::Checked(true) => Some((name.clone(), "on".to_string())),
                FieldValue::Checked(false) => None,
            })
            .collect()
    }
}
