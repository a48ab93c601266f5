//! Locating the homepage headline inside a theme asset document.
//!
//! Shopify themes store the homepage headline in one of three structurally
//! different JSON documents depending on the theme generation: settings-data
//! presets, versioned JSON templates, or legacy single-file sections.
//! [`AssetKind`] tags which shape a fetched document follows, and
//! [`set_headline`] mutates the document according to that shape's rule.

use serde_json::Value;
use thiserror::Error;

/// Section types whose `settings.heading` is treated as the homepage headline.
const BANNER_SECTION_TYPES: [&str; 3] = ["image-banner", "hero", "slideshow"];

/// Which of the three recognized asset documents a theme stores its homepage
/// headline in. Determined by which asset key resolved, not by inspecting
/// the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// `config/settings_data.json` — preset-based settings store.
    SettingsData,
    /// `templates/index.json` — versioned JSON template with a `sections` map.
    TemplatesIndex,
    /// `sections/index.json` — legacy single-file section document.
    SectionsIndex,
}

impl AssetKind {
    /// Fallback probe order: settings data first, then the JSON template,
    /// then the legacy sections file.
    pub const PROBE_ORDER: [AssetKind; 3] = [
        AssetKind::SettingsData,
        AssetKind::TemplatesIndex,
        AssetKind::SectionsIndex,
    ];

    /// The asset key this document lives under inside a theme.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            AssetKind::SettingsData => "config/settings_data.json",
            AssetKind::TemplatesIndex => "templates/index.json",
            AssetKind::SectionsIndex => "sections/index.json",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// What [`set_headline`] did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlineOutcome {
    /// An existing headline field was overwritten.
    Updated,
    /// No headline field existed; one (and possibly its container) was created.
    Created,
    /// Settings data named an active preset that does not exist in `presets`;
    /// the document was left untouched.
    PresetNotFound(String),
    /// No section of a recognized banner type was found; the document was
    /// left untouched.
    NoBannerSection,
    /// A field the rule needs has a JSON type the rule cannot work with;
    /// the document was left untouched.
    UnsupportedShape,
}

impl HeadlineOutcome {
    /// Whether the document was actually modified and needs writing back.
    #[must_use]
    pub fn mutated(&self) -> bool {
        matches!(self, HeadlineOutcome::Updated | HeadlineOutcome::Created)
    }
}

#[derive(Debug, Error)]
pub enum LocatorError {
    /// The asset value parsed as JSON but is not an object, so no headline
    /// rule can apply.
    #[error("asset {kind} is not a JSON object")]
    MalformedAsset { kind: AssetKind },
}

/// Sets the homepage headline inside `doc` according to the rule for `kind`.
///
/// Pure and deterministic: no I/O, and every structurally valid JSON object
/// yields an outcome rather than an error. Fields the rule does not touch
/// are preserved as-is.
///
/// # Errors
///
/// Returns [`LocatorError::MalformedAsset`] when `doc` is not a JSON object.
pub fn set_headline(
    kind: AssetKind,
    doc: &mut Value,
    text: &str,
) -> Result<HeadlineOutcome, LocatorError> {
    let root = doc
        .as_object_mut()
        .ok_or(LocatorError::MalformedAsset { kind })?;

    let outcome = match kind {
        AssetKind::SettingsData => set_settings_data_headline(root, text),
        AssetKind::TemplatesIndex => set_template_headline(root, text),
        AssetKind::SectionsIndex => match object_entry(root, "settings") {
            Some(settings) => set_field(settings, "heading", text),
            None => HeadlineOutcome::UnsupportedShape,
        },
    };

    Ok(outcome)
}

/// The shape of the `current` field in settings data, captured up front so
/// the map can be mutated afterwards.
enum CurrentShape {
    Preset(String),
    Inline,
    Absent,
    Other,
}

/// Settings-data rule: `current` is either the name of the active preset
/// (write into `presets[current].brand_headline`), the active settings
/// object itself (write into `current.brand_headline`), or absent (create
/// `current` with just the headline).
fn set_settings_data_headline(
    root: &mut serde_json::Map<String, Value>,
    text: &str,
) -> HeadlineOutcome {
    let shape = match root.get("current") {
        Some(Value::String(name)) => CurrentShape::Preset(name.clone()),
        Some(Value::Object(_)) => CurrentShape::Inline,
        None | Some(Value::Null) => CurrentShape::Absent,
        Some(_) => CurrentShape::Other,
    };

    match shape {
        CurrentShape::Preset(name) => {
            let preset = root
                .get_mut("presets")
                .and_then(Value::as_object_mut)
                .and_then(|presets| presets.get_mut(&name))
                .and_then(Value::as_object_mut);
            match preset {
                Some(preset) => set_field(preset, "brand_headline", text),
                None => HeadlineOutcome::PresetNotFound(name),
            }
        }
        CurrentShape::Inline => match root.get_mut("current").and_then(Value::as_object_mut) {
            Some(current) => set_field(current, "brand_headline", text),
            None => HeadlineOutcome::UnsupportedShape,
        },
        CurrentShape::Absent => {
            root.insert(
                "current".to_owned(),
                serde_json::json!({ "brand_headline": text }),
            );
            HeadlineOutcome::Created
        }
        CurrentShape::Other => HeadlineOutcome::UnsupportedShape,
    }
}

/// Template rule: the first section (in stored order) of a recognized banner
/// type gets `settings.heading`; scanning stops at the first match.
fn set_template_headline(
    root: &mut serde_json::Map<String, Value>,
    text: &str,
) -> HeadlineOutcome {
    let Some(sections) = root.get_mut("sections").and_then(Value::as_object_mut) else {
        return HeadlineOutcome::NoBannerSection;
    };

    for section in sections.values_mut() {
        let is_banner = section
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|t| BANNER_SECTION_TYPES.contains(&t));
        if !is_banner {
            continue;
        }
        let Some(section) = section.as_object_mut() else {
            return HeadlineOutcome::UnsupportedShape;
        };
        return match object_entry(section, "settings") {
            Some(settings) => set_field(settings, "heading", text),
            None => HeadlineOutcome::UnsupportedShape,
        };
    }

    HeadlineOutcome::NoBannerSection
}

/// Returns the object stored under `key`, inserting an empty one when the
/// key is absent. An existing non-object value is left alone and reported
/// as `None` rather than clobbered.
fn object_entry<'a>(
    map: &'a mut serde_json::Map<String, Value>,
    key: &str,
) -> Option<&'a mut serde_json::Map<String, Value>> {
    map.entry(key)
        .or_insert_with(|| Value::Object(serde_json::Map::new()))
        .as_object_mut()
}

fn set_field(
    target: &mut serde_json::Map<String, Value>,
    field: &str,
    text: &str,
) -> HeadlineOutcome {
    match target.insert(field.to_owned(), Value::String(text.to_owned())) {
        Some(_) => HeadlineOutcome::Updated,
        None => HeadlineOutcome::Created,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn probe_order_is_fixed() {
        let keys: Vec<&str> = AssetKind::PROBE_ORDER.iter().map(|k| k.key()).collect();
        assert_eq!(
            keys,
            vec![
                "config/settings_data.json",
                "templates/index.json",
                "sections/index.json"
            ]
        );
    }

    #[test]
    fn settings_data_writes_into_named_preset() {
        let mut doc = json!({"current": "Default", "presets": {"Default": {}}});
        let outcome = set_headline(AssetKind::SettingsData, &mut doc, "Hello").unwrap();
        assert_eq!(outcome, HeadlineOutcome::Created);
        assert_eq!(
            doc,
            json!({"current": "Default", "presets": {"Default": {"brand_headline": "Hello"}}})
        );
    }

    #[test]
    fn settings_data_missing_preset_is_a_noop() {
        let mut doc = json!({"current": "Dawn", "presets": {"Default": {}}});
        let before = doc.clone();
        let outcome = set_headline(AssetKind::SettingsData, &mut doc, "Hello").unwrap();
        assert_eq!(outcome, HeadlineOutcome::PresetNotFound("Dawn".to_owned()));
        assert_eq!(doc, before);
    }

    #[test]
    fn settings_data_missing_presets_map_is_a_noop() {
        let mut doc = json!({"current": "Default"});
        let before = doc.clone();
        let outcome = set_headline(AssetKind::SettingsData, &mut doc, "Hello").unwrap();
        assert_eq!(
            outcome,
            HeadlineOutcome::PresetNotFound("Default".to_owned())
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn settings_data_writes_into_current_object() {
        let mut doc = json!({"current": {"color": "teal"}});
        let outcome = set_headline(AssetKind::SettingsData, &mut doc, "Hi").unwrap();
        assert_eq!(outcome, HeadlineOutcome::Created);
        assert_eq!(doc, json!({"current": {"color": "teal", "brand_headline": "Hi"}}));
    }

    #[test]
    fn settings_data_creates_current_when_absent() {
        let mut doc = json!({});
        let outcome = set_headline(AssetKind::SettingsData, &mut doc, "Hi").unwrap();
        assert_eq!(outcome, HeadlineOutcome::Created);
        assert_eq!(doc, json!({"current": {"brand_headline": "Hi"}}));
    }

    #[test]
    fn settings_data_unexpected_current_type_is_a_noop() {
        let mut doc = json!({"current": 7});
        let before = doc.clone();
        let outcome = set_headline(AssetKind::SettingsData, &mut doc, "Hi").unwrap();
        assert_eq!(outcome, HeadlineOutcome::UnsupportedShape);
        assert_eq!(doc, before);
    }

    #[test]
    fn template_updates_first_banner_section_only() {
        let mut doc = json!({
            "sections": {
                "intro": {"type": "text", "settings": {"body": "hi"}},
                "banner": {"type": "hero", "settings": {}},
                "second": {"type": "slideshow", "settings": {}}
            },
            "order": ["intro", "banner", "second"]
        });
        let outcome = set_headline(AssetKind::TemplatesIndex, &mut doc, "Sale").unwrap();
        assert_eq!(outcome, HeadlineOutcome::Created);
        assert_eq!(
            doc["sections"]["banner"]["settings"]["heading"],
            json!("Sale")
        );
        // First match wins; later banner sections stay untouched.
        assert_eq!(doc["sections"]["second"]["settings"], json!({}));
        assert_eq!(
            doc["sections"]["intro"],
            json!({"type": "text", "settings": {"body": "hi"}})
        );
    }

    #[test]
    fn template_creates_settings_when_absent() {
        let mut doc = json!({"sections": {"banner": {"type": "image-banner"}}});
        let outcome = set_headline(AssetKind::TemplatesIndex, &mut doc, "Sale").unwrap();
        assert_eq!(outcome, HeadlineOutcome::Created);
        assert_eq!(
            doc,
            json!({"sections": {"banner": {"type": "image-banner", "settings": {"heading": "Sale"}}}})
        );
    }

    #[test]
    fn template_without_banner_section_is_a_noop() {
        let mut doc = json!({"sections": {"intro": {"type": "text"}}});
        let before = doc.clone();
        let outcome = set_headline(AssetKind::TemplatesIndex, &mut doc, "Sale").unwrap();
        assert_eq!(outcome, HeadlineOutcome::NoBannerSection);
        assert_eq!(doc, before);
    }

    #[test]
    fn template_without_sections_map_is_a_noop() {
        let mut doc = json!({"order": []});
        let outcome = set_headline(AssetKind::TemplatesIndex, &mut doc, "Sale").unwrap();
        assert_eq!(outcome, HeadlineOutcome::NoBannerSection);
    }

    #[test]
    fn sections_index_sets_heading_unconditionally() {
        let mut doc = json!({});
        let outcome = set_headline(AssetKind::SectionsIndex, &mut doc, "New").unwrap();
        assert_eq!(outcome, HeadlineOutcome::Created);
        assert_eq!(doc, json!({"settings": {"heading": "New"}}));
    }

    #[test]
    fn sections_index_overwrites_existing_heading() {
        let mut doc = json!({"settings": {"heading": "Old", "color": "red"}});
        let outcome = set_headline(AssetKind::SectionsIndex, &mut doc, "New").unwrap();
        assert_eq!(outcome, HeadlineOutcome::Updated);
        assert_eq!(doc, json!({"settings": {"heading": "New", "color": "red"}}));
    }

    #[test]
    fn non_object_document_is_malformed() {
        let mut doc = json!(["not", "an", "object"]);
        let result = set_headline(AssetKind::SectionsIndex, &mut doc, "New");
        assert!(matches!(
            result,
            Err(LocatorError::MalformedAsset {
                kind: AssetKind::SectionsIndex
            })
        ));
    }

    #[test]
    fn set_headline_is_idempotent_for_all_kinds() {
        let cases = vec![
            (
                AssetKind::SettingsData,
                json!({"current": "Default", "presets": {"Default": {}}}),
            ),
            (AssetKind::SettingsData, json!({})),
            (AssetKind::SettingsData, json!({"current": {}})),
            (AssetKind::SettingsData, json!({"current": "Gone"})),
            (
                AssetKind::TemplatesIndex,
                json!({"sections": {"a": {"type": "text"}, "b": {"type": "hero"}}}),
            ),
            (AssetKind::SectionsIndex, json!({})),
        ];

        for (kind, doc) in cases {
            let mut once = doc.clone();
            set_headline(kind, &mut once, "Same").unwrap();
            let mut twice = once.clone();
            set_headline(kind, &mut twice, "Same").unwrap();
            assert_eq!(once, twice, "applying twice diverged for {kind}");
        }
    }

    #[test]
    fn untouched_fields_survive() {
        let mut doc = json!({
            "current": {"logo": "a.png"},
            "presets": {"Spring": {"accent": "#fff"}},
            "platform_extras": [1, 2, 3]
        });
        set_headline(AssetKind::SettingsData, &mut doc, "Hello").unwrap();
        assert_eq!(doc["presets"]["Spring"]["accent"], json!("#fff"));
        assert_eq!(doc["platform_extras"], json!([1, 2, 3]));
        assert_eq!(doc["current"]["logo"], json!("a.png"));
    }
}
