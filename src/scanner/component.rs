//! Single-File Component Scanner
//!
//! Handles component files that combine a script block with a template
//! (`.vue`, `.svelte`). The script block is delegated to the general
//! script scanner; the template is scanned for referenced child
//! components, event-binding attributes, and two-way binding markers.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FileInsight, ImportKind, ImportRecord};

use super::script::ScriptScanner;
use super::traits::Scanner;
use super::FileKind;

static RE_SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script[^>]*>(.*?)</script>").expect("valid regex"));
static RE_TEMPLATE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<template[^>]*>(.*)</template>").expect("valid regex"));
/// PascalCase or multi-word kebab-case opening tags are treated as child
/// components; plain HTML elements are single lowercase words
static RE_CHILD_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Z][A-Za-z0-9]*|[a-z][a-z0-9]*(?:-[a-z0-9]+)+)[\s/>]").expect("valid regex")
});
static RE_EVENT_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:@|v-on:)([\w.-]+)\s*="#).expect("valid regex")
});
static RE_TWO_WAY_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v-model(?::[\w-]+)?\s*=").expect("valid regex"));

pub struct ComponentScanner {
    script: ScriptScanner,
}

impl ComponentScanner {
    pub fn new() -> Self {
        Self {
            script: ScriptScanner::new(),
        }
    }

    fn scan_template(template: &str, insight: &mut FileInsight) {
        for cap in RE_CHILD_COMPONENT.captures_iter(template) {
            let tag = cap[1].to_string();
            // Child component references have no module specifier; the
            // graph builder matches them against filename stems
            let name = kebab_to_pascal(&tag);
            if !insight.imports.iter().any(|i| i.imported_name == name) {
                insight
                    .imports
                    .push(ImportRecord::new(name, None, ImportKind::Named));
            }
        }
        for cap in RE_EVENT_BINDING.captures_iter(template) {
            insight.events.insert(cap[1].to_string());
        }
        if RE_TWO_WAY_BINDING.is_match(template) {
            insight.tags.push("two-way binding".to_string());
        }
    }
}

impl Default for ComponentScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner for ComponentScanner {
    fn scan(&self, path: &str, content: &str) -> FileInsight {
        let mut insight = match RE_SCRIPT_BLOCK
            .captures(content)
            .map(|cap| cap[1].to_string())
        {
            Some(script) => self.script.scan(path, &script),
            None => FileInsight::default(),
        };

        if let Some(cap) = RE_TEMPLATE_BLOCK.captures(content) {
            Self::scan_template(&cap[1], &mut insight);
        } else if path.ends_with(".svelte") {
            // Svelte markup is everything outside the script block
            let markup = RE_SCRIPT_BLOCK.replace_all(content, "");
            Self::scan_template(&markup, &mut insight);
        }

        insight.archetype = "UI component".to_string();
        insight
    }

    fn kind(&self) -> FileKind {
        FileKind::Component
    }
}

/// `patient-card` → `PatientCard`; PascalCase input passes through
fn kebab_to_pascal(tag: &str) -> String {
    if !tag.contains('-') {
        return tag.to_string();
    }
    tag.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<template>
  <div class="booking">
    <PatientCard :patient="patient" @selected="onSelect" />
    <appointment-slots v-on:book="onBook" />
    <input v-model="notes" />
  </div>
</template>

<script>
import PatientCard from './PatientCard.vue';
import { BookingService } from '../services/booking.service';

export default {
  methods: {
    async confirm() {
      await axios.post('/api/bookings');
      this.$emit('booking-confirmed');
    },
  },
};
</script>
"#;

    #[test]
    fn test_script_block_delegated() {
        let insight = ComponentScanner::new().scan("Booking.vue", SAMPLE);

        assert!(insight
            .imports
            .iter()
            .any(|i| i.imported_name == "BookingService"));
        assert!(insight.api_calls.contains("POST /api/bookings"));
        assert!(insight.events.contains("booking-confirmed"));
    }

    #[test]
    fn test_template_child_components() {
        let insight = ComponentScanner::new().scan("Booking.vue", SAMPLE);

        // PatientCard already imported in the script block, not duplicated
        let patient_cards = insight
            .imports
            .iter()
            .filter(|i| i.imported_name == "PatientCard")
            .count();
        assert_eq!(patient_cards, 1);

        // kebab-case tag recorded as a specifier-less reference
        let slots = insight
            .imports
            .iter()
            .find(|i| i.imported_name == "AppointmentSlots")
            .unwrap();
        assert!(slots.source_module.is_none());
    }

    #[test]
    fn test_template_bindings() {
        let insight = ComponentScanner::new().scan("Booking.vue", SAMPLE);

        assert!(insight.events.contains("selected"));
        assert!(insight.events.contains("book"));
        assert!(insight.tags.contains(&"two-way binding".to_string()));
        assert_eq!(insight.archetype, "UI component");
    }

    #[test]
    fn test_plain_html_tags_not_components() {
        let insight = ComponentScanner::new().scan("Booking.vue", SAMPLE);
        assert!(!insight.imports.iter().any(|i| i.imported_name == "Div"));
        assert!(!insight.imports.iter().any(|i| i.imported_name == "Input"));
    }

    #[test]
    fn test_missing_blocks_tolerated() {
        let insight = ComponentScanner::new().scan("Empty.vue", "<style>.a{}</style>");
        assert!(insight.imports.is_empty());
        assert_eq!(insight.archetype, "UI component");
    }
}
