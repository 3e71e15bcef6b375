//! Field declarations consumed by the configuration-form renderer.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldType {
    Text,
    TextUrl,
    RadioInline,
    Select,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One configuration field. `id` is the storage key in the target partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    pub name: String,
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            field_type,
            description: None,
            options: Vec::new(),
            default: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Where the form is being rendered or applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderScope {
    /// Form belongs to a site-wide options page (as opposed to an entity editor).
    pub options_page: bool,
    /// The options page is the one currently being submitted.
    pub applying: bool,
}

impl RenderScope {
    /// Entity editor.
    pub fn entity_editor() -> Self {
        Self {
            options_page: false,
            applying: false,
        }
    }

    /// Options page that is being submitted right now.
    pub fn applying_options_page() -> Self {
        Self {
            options_page: true,
            applying: true,
        }
    }

    /// Options pages only hook saves while they are the page being applied.
    pub fn can_hook_saves(&self) -> bool {
        !self.options_page || self.applying
    }
}

/// Field set plus the storage key of the field whose save triggers the live override.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsContract {
    pub fields: Vec<FieldDecl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_field: Option<String>,
}

impl SettingsContract {
    pub fn field(&self, id: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_page_hooks_only_while_applying() {
        assert!(RenderScope::entity_editor().can_hook_saves());
        assert!(RenderScope::applying_options_page().can_hook_saves());
        assert!(
            !RenderScope {
                options_page: true,
                applying: false
            }
            .can_hook_saves()
        );
    }

    #[test]
    fn field_serializes_for_renderer() {
        let field = FieldDecl::new("Channel Status", "is_live", FieldType::RadioInline)
            .options(vec![FieldOption::new("1", "Live"), FieldOption::new("0", "Not Live")])
            .default_value("0");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "radio_inline");
        assert_eq!(json["options"][0]["label"], "Live");
        assert_eq!(json["default"], "0");
        assert!(json.get("description").is_none());
    }
}
