use itertools::Itertools;
use log::debug;

use crate::error::{ModgenError, Result};
use crate::preset::Preset;

/// Ordered set of presets. The order is the order in which the difficulty
/// toggles show up in the generated mod.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Registry {
    presets: Vec<Preset>,
}

impl Registry {
    /// returns an error if two presets share a label or a label can't be used
    /// as a section name
    pub fn new(presets: Vec<Preset>) -> Result<Registry> {
        for preset in &presets {
            validate_label(&preset.label)?;
        }

        if let Some(label) = presets.iter().map(|p| p.label.as_str()).duplicates().next() {
            return Err(ModgenError::DuplicateLabel(label.to_string()));
        }

        debug!(
            "registry: {}",
            presets.iter().map(|p| p.label.as_str()).join(", ")
        );

        Ok(Registry { presets })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get_by_label(&self, label: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.label == label)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Preset;
    type IntoIter = std::slice::Iter<'a, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.presets.iter()
    }
}

fn validate_label(label: &str) -> Result<()> {
    let reason = if label.trim().is_empty() {
        "label is empty"
    } else if label.contains(['<', '>']) {
        "label contains a section bracket"
    } else if label.contains(['\n', '\r']) {
        "label contains a line break"
    } else {
        return Ok(());
    };

    Err(ModgenError::InvalidLabel {
        label: label.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Scale;

    fn preset(label: &str, health_mult: i64) -> Preset {
        Preset {
            label: label.to_string(),
            health_mult,
            shield_mult: 10,
            nonweapon_damage_mult: 2,
            arm_laser_damage_scale: Scale::Fraction(0.3),
            rocket_speed: 900,
            rocket_damage_scale: Scale::Fraction(0.5),
            shock_orb_damage_scale: Scale::Fraction(0.5),
            shock_orb_effect_chance_scale: Scale::Whole(1),
        }
    }

    #[test]
    fn keeps_declared_order() {
        let registry =
            Registry::new(vec![preset("Hard", 3), preset("Easy", 1), preset("Medium", 2)])
                .unwrap();
        let labels: Vec<_> = registry.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Hard", "Easy", "Medium"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get_by_label("Easy").unwrap().health_mult, 1);
        assert!(registry.get_by_label("Nightmare").is_none());
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = Registry::new(vec![preset("Easy", 1), preset("Hard", 2), preset("Easy", 3)])
            .unwrap_err();
        assert!(matches!(err, ModgenError::DuplicateLabel(label) if label == "Easy"));
    }

    #[test]
    fn labels_that_break_sections_are_rejected() {
        for label in ["", "   ", "Easy>", "<Easy", "Two\nLines"] {
            let err = Registry::new(vec![preset(label, 1)]).unwrap_err();
            assert!(
                matches!(err, ModgenError::InvalidLabel { .. }),
                "{:?} accepted",
                label
            );
        }
    }

    #[test]
    fn identical_values_are_allowed() {
        let registry = Registry::new(vec![preset("A", 5), preset("B", 5)]).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
    }
}
