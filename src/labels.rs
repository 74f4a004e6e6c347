//! Label selector state: a list of preset class names plus a free-text
//! `custom` entry.

use crate::editor::LabelSource;

/// Selector value that switches to the free-text field.
pub const CUSTOM_LABEL: &str = "custom";

#[derive(Clone, Debug)]
pub struct LabelControl {
    presets: Vec<String>,
    selected: String,
    pub custom_text: String,
    custom_visible: bool,
}

impl LabelControl {
    pub fn new(presets: Vec<String>) -> Self {
        let selected = presets
            .first()
            .cloned()
            .unwrap_or_else(|| CUSTOM_LABEL.to_string());
        let custom_visible = selected == CUSTOM_LABEL;
        Self {
            presets,
            selected,
            custom_text: String::new(),
            custom_visible,
        }
    }

    pub fn presets(&self) -> &[String] {
        &self.presets
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn custom_visible(&self) -> bool {
        self.custom_visible
    }

    /// Switch the selector to `value`. Returns the concrete label, or `None`
    /// when the free-text entry was chosen.
    pub fn select(&mut self, value: &str) -> Option<&str> {
        self.selected = value.to_string();
        self.custom_visible = value == CUSTOM_LABEL;
        if self.custom_visible {
            None
        } else {
            Some(&self.selected)
        }
    }
}

impl LabelSource for LabelControl {
    fn current_label(&self) -> String {
        if self.selected == CUSTOM_LABEL {
            self.custom_text.clone()
        } else {
            self.selected.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> LabelControl {
        LabelControl::new(vec!["person".into(), "car".into()])
    }

    #[test]
    fn starts_on_first_preset() {
        let c = control();
        assert_eq!(c.selected(), "person");
        assert!(!c.custom_visible());
        assert_eq!(c.current_label(), "person");
    }

    #[test]
    fn empty_presets_start_on_custom() {
        let c = LabelControl::new(Vec::new());
        assert_eq!(c.selected(), CUSTOM_LABEL);
        assert!(c.custom_visible());
    }

    #[test]
    fn custom_reveals_text_field() {
        let mut c = control();
        assert_eq!(c.select(CUSTOM_LABEL), None);
        assert!(c.custom_visible());
        c.custom_text = "forklift".into();
        assert_eq!(c.current_label(), "forklift");

        assert_eq!(c.select("car"), Some("car"));
        assert!(!c.custom_visible());
        assert_eq!(c.current_label(), "car");
    }
}
