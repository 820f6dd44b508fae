//! Form model shared by the configuration pages
//!
//! Pages are described as an ordered mapping from field name to
//! [`FormField`]; the HTML side renders each field by its `type`. Submitted
//! forms come back as [`FormData`], where every key may carry several values.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered page description: field name → field
pub type FormConfig = IndexMap<String, FormField>;

/// Field widget type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Select,
    Text,
    Hidden,
    Html,
    Button,
}

/// One form field descriptor
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub option_labels: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Space separated list of action values that enable this field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabling_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub div_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_file: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub advanced: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub refresh_on_change: bool,
}

impl FormField {
    fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            title: None,
            value: None,
            options: Vec::new(),
            option_labels: IndexMap::new(),
            presets: None,
            content: None,
            enabling_options: None,
            div_class: None,
            button_type: None,
            class: None,
            icon: None,
            script_file: None,
            inline: false,
            advanced: false,
            disabled: false,
            refresh_on_change: false,
        }
    }

    pub fn select(title: impl Into<String>, value: Option<String>) -> Self {
        let mut field = Self::new(FieldType::Select);
        field.title = Some(title.into());
        field.value = value;
        field
    }

    pub fn text(title: impl Into<String>, value: Option<String>) -> Self {
        let mut field = Self::new(FieldType::Text);
        field.title = Some(title.into());
        field.value = value;
        field
    }

    pub fn hidden(value: Option<String>) -> Self {
        let mut field = Self::new(FieldType::Hidden);
        field.value = value;
        field
    }

    pub fn html(content: impl Into<String>) -> Self {
        let mut field = Self::new(FieldType::Html);
        field.content = Some(content.into());
        field
    }

    pub fn button(title: impl Into<String>, button_type: &str) -> Self {
        let mut field = Self::new(FieldType::Button);
        field.title = Some(title.into());
        field.button_type = Some(button_type.to_string());
        field
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn option_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.option_labels = labels
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn presets(mut self, presets: serde_json::Value) -> Self {
        self.presets = Some(presets);
        self
    }

    pub fn enabling_options(mut self, options: &str) -> Self {
        self.enabling_options = Some(options.to_string());
        self
    }

    pub fn div_class(mut self, class: &str) -> Self {
        self.div_class = Some(class.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn script_file(mut self, file: &str) -> Self {
        self.script_file = Some(file.to_string());
        self
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn refresh_on_change(mut self) -> Self {
        self.refresh_on_change = true;
        self
    }
}

/// A rendered configuration page
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPage {
    pub title: String,
    pub config: FormConfig,
    /// Problems found while handling the request; the page is still usable
    pub errors: Vec<String>,
}

impl ConfigPage {
    pub fn new(title: impl Into<String>, config: FormConfig) -> Self {
        Self {
            title: title.into(),
            config,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Submitted form values, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: IndexMap<String, Vec<String>>,
}

impl FormData {
    /// Group decoded `key=value` pairs; repeated keys collect their values
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields: IndexMap<String, Vec<String>> = IndexMap::new();
        for (key, value) in pairs {
            fields.entry(key).or_default().push(value);
        }
        Self { fields }
    }

    /// First submitted value of `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|values| values.first())
            .map(|v| v.as_str())
    }

    /// First submitted value of `key`, or the empty string
    pub fn first_or_empty(&self, key: &str) -> &str {
        self.first(key).unwrap_or("")
    }

    /// Keys with their first value, in submission order
    pub fn iter_first(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(k, values)| values.first().map(|v| (k.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
