use serde::{Deserialize, Serialize};
use std::fmt;

use crate::template::Substitutions;

/// A tuning scale factor. Keeps track of how the value was written so that it
/// is emitted exactly like its literal: whole numbers without a decimal point,
/// fractions in their shortest round-trip form.
///
/// Whole literals must fit an `i64`, larger ones are read as fractions and
/// printed with a trailing `.0`. Fractions are always printed positionally,
/// never in exponent notation.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(untagged)]
pub enum Scale {
    Whole(i64),
    Fraction(f64),
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scale::Whole(value) => write!(f, "{}", value),
            // a fractional literal like 1.0 still needs its decimal point
            Scale::Fraction(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{:.1}", value)
            }
            Scale::Fraction(value) => write!(f, "{}", value),
        }
    }
}

/// Rendered form of a single preset field
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Scale(Scale),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Scale(scale) => write!(f, "{}", scale),
        }
    }
}

/// One difficulty tier of the ECLIPSE fight. Every field is required, a
/// definition that leaves one out fails to deserialize.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// name of the toggle in the mod's category tree
    pub label: String,

    /// multiplier of the boss health pool
    pub health_mult: i64,

    /// multiplier of the boss shield pool
    pub shield_mult: i64,

    /// multiplier for all damage the boss deals without a weapon
    pub nonweapon_damage_mult: i64,

    pub arm_laser_damage_scale: Scale,

    /// travel speed of the rocket barrage
    pub rocket_speed: i64,

    /// applied to each of the four rocket spawners
    pub rocket_damage_scale: Scale,

    pub shock_orb_damage_scale: Scale,
    pub shock_orb_effect_chance_scale: Scale,
}

impl Preset {
    /// field names in schema order, these are the names templates may reference
    pub const FIELD_NAMES: [&'static str; 9] = [
        "label",
        "health_mult",
        "shield_mult",
        "nonweapon_damage_mult",
        "arm_laser_damage_scale",
        "rocket_speed",
        "rocket_damage_scale",
        "shock_orb_damage_scale",
        "shock_orb_effect_chance_scale",
    ];

    pub fn fields(&self) -> [(&'static str, FieldValue<'_>); 9] {
        [
            ("label", FieldValue::Text(&self.label)),
            ("health_mult", FieldValue::Integer(self.health_mult)),
            ("shield_mult", FieldValue::Integer(self.shield_mult)),
            (
                "nonweapon_damage_mult",
                FieldValue::Integer(self.nonweapon_damage_mult),
            ),
            (
                "arm_laser_damage_scale",
                FieldValue::Scale(self.arm_laser_damage_scale),
            ),
            ("rocket_speed", FieldValue::Integer(self.rocket_speed)),
            (
                "rocket_damage_scale",
                FieldValue::Scale(self.rocket_damage_scale),
            ),
            (
                "shock_orb_damage_scale",
                FieldValue::Scale(self.shock_orb_damage_scale),
            ),
            (
                "shock_orb_effect_chance_scale",
                FieldValue::Scale(self.shock_orb_effect_chance_scale),
            ),
        ]
    }

    /// maps every field name to its rendered text
    pub fn substitutions(&self) -> Substitutions {
        self.fields()
            .iter()
            .map(|(name, value)| (*name, value.to_string()))
            .collect()
    }
}
