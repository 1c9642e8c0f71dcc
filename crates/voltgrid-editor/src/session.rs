//! Edit session: a draft config mutated field by field, validated, and
//! handed back through `on_change`/`on_save` hooks.
//!
//! The session never persists anything itself -- the hosting canvas
//! owns persistence and receives the finished [`WidgetConfig`] through
//! the hooks.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use voltgrid_core::model::widget::{WidgetConfig, WidgetKind};

use crate::error::EditorError;
use crate::fields::fields_for;

type ConfigHook = Box<dyn Fn(&WidgetConfig) + Send + Sync>;

/// A config dialog session for one widget.
pub struct EditSession {
    kind: WidgetKind,
    draft: Map<String, Value>,
    on_change: Option<ConfigHook>,
    on_save: Option<ConfigHook>,
}

impl EditSession {
    /// Start editing a fresh widget of `kind`, seeded with its default
    /// config.
    pub fn new(kind: WidgetKind) -> Self {
        let draft = to_draft(&WidgetConfig::default_for(kind));
        Self {
            kind,
            draft,
            on_change: None,
            on_save: None,
        }
    }

    /// Start editing an existing config in place.
    pub fn edit(config: &WidgetConfig) -> Result<Self, EditorError> {
        let kind = config.kind().ok_or(EditorError::UnknownWidgetType)?;
        Ok(Self {
            kind,
            draft: to_draft(config),
            on_change: None,
            on_save: None,
        })
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// Register the live-change hook, fired after every valid edit.
    pub fn on_change(mut self, hook: impl Fn(&WidgetConfig) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(hook));
        self
    }

    /// Register the save hook, fired by [`save()`](Self::save).
    pub fn on_save(mut self, hook: impl Fn(&WidgetConfig) + Send + Sync + 'static) -> Self {
        self.on_save = Some(Box::new(hook));
        self
    }

    /// Apply one field edit. The key must belong to this widget type's
    /// field schema. Fires `on_change` when the draft still builds.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), EditorError> {
        if !fields_for(self.kind).iter().any(|f| f.key == key) {
            return Err(EditorError::UnknownField {
                field: key.to_owned(),
                kind: self.kind.to_string(),
            });
        }
        self.draft.insert(key.to_owned(), value);
        if let Some(hook) = &self.on_change {
            if let Ok(config) = self.build() {
                hook(&config);
            }
        }
        Ok(())
    }

    /// Build and validate the current draft.
    pub fn build(&self) -> Result<WidgetConfig, EditorError> {
        let mut tagged = self.draft.clone();
        tagged.insert("widget_type".to_owned(), json!(self.kind.to_string()));
        let config = WidgetConfig::deserialize(Value::Object(tagged)).map_err(|e| {
            EditorError::InvalidDraft {
                message: e.to_string(),
            }
        })?;
        validate(&config)?;
        Ok(config)
    }

    /// Build, validate, and hand the config to the save hook.
    pub fn save(&self) -> Result<WidgetConfig, EditorError> {
        let config = self.build()?;
        if let Some(hook) = &self.on_save {
            hook(&config);
        }
        Ok(config)
    }
}

/// Semantic checks beyond deserialization. The resolver tolerates all
/// of these at render time; the dialog still refuses to save nonsense.
fn validate(config: &WidgetConfig) -> Result<(), EditorError> {
    match config {
        WidgetConfig::Gauge(g) => {
            if g.max_value <= g.min_value {
                return Err(EditorError::Validation {
                    field: "max_value".into(),
                    reason: "maximum must be greater than minimum".into(),
                });
            }
            if g.zones_enabled && g.zone_high_threshold < g.zone_low_threshold {
                return Err(EditorError::Validation {
                    field: "zone_high_threshold".into(),
                    reason: "high zone threshold is below the low zone threshold".into(),
                });
            }
        }
        WidgetConfig::Cable(c) => {
            if c.flow_upper_threshold < c.flow_lower_threshold {
                return Err(EditorError::Validation {
                    field: "flow_upper_threshold".into(),
                    reason: "forward threshold is below the reverse threshold".into(),
                });
            }
            if !c.thickness.is_finite() || c.thickness <= 0.0 {
                return Err(EditorError::Validation {
                    field: "thickness".into(),
                    reason: "thickness must be positive".into(),
                });
            }
        }
        WidgetConfig::Image(i) => {
            if i.value_strip.len() > 2 {
                return Err(EditorError::Validation {
                    field: "value_strip".into(),
                    reason: "at most two caption values are shown".into(),
                });
            }
        }
        WidgetConfig::AlarmList(a) => {
            if a.max_items == 0 {
                return Err(EditorError::Validation {
                    field: "max_items".into(),
                    reason: "must show at least one alarm".into(),
                });
            }
        }
        _ => {}
    }
    Ok(())
}

fn to_draft(config: &WidgetConfig) -> Map<String, Value> {
    // Serializing a known variant always yields a tagged object.
    match serde_json::to_value(config) {
        Ok(Value::Object(mut map)) => {
            map.remove("widget_type");
            map
        }
        _ => Map::new(),
    }
}
