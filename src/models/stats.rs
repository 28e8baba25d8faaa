use serde::Serialize;
use std::fmt;

use crate::errors::{BazaarError, Result};

/// Item stat columns the bazaar can search, display and sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Stat {
    ArmorClass,
    HitPoints,
    Mana,
    Endurance,
    Strength,
    Stamina,
    Agility,
    Dexterity,
    Wisdom,
    Intelligence,
    Charisma,
    FireResist,
    ColdResist,
    MagicResist,
    PoisonResist,
    DiseaseResist,
    Attack,
    Haste,
    Regen,
    ManaRegen,
    EnduranceRegen,
    Damage,
    Delay,
    DamageShield,
    SpellDamage,
    HealAmount,
    Weight,
    RequiredLevel,
    RecommendedLevel,
}

impl Stat {
    pub const ALL: [Stat; 29] = [
        Stat::ArmorClass,
        Stat::HitPoints,
        Stat::Mana,
        Stat::Endurance,
        Stat::Strength,
        Stat::Stamina,
        Stat::Agility,
        Stat::Dexterity,
        Stat::Wisdom,
        Stat::Intelligence,
        Stat::Charisma,
        Stat::FireResist,
        Stat::ColdResist,
        Stat::MagicResist,
        Stat::PoisonResist,
        Stat::DiseaseResist,
        Stat::Attack,
        Stat::Haste,
        Stat::Regen,
        Stat::ManaRegen,
        Stat::EnduranceRegen,
        Stat::Damage,
        Stat::Delay,
        Stat::DamageShield,
        Stat::SpellDamage,
        Stat::HealAmount,
        Stat::Weight,
        Stat::RequiredLevel,
        Stat::RecommendedLevel,
    ];

    /// Column name in the items table.
    pub fn column(self) -> &'static str {
        match self {
            Stat::ArmorClass => "ac",
            Stat::HitPoints => "hp",
            Stat::Mana => "mana",
            Stat::Endurance => "endur",
            Stat::Strength => "astr",
            Stat::Stamina => "asta",
            Stat::Agility => "aagi",
            Stat::Dexterity => "adex",
            Stat::Wisdom => "awis",
            Stat::Intelligence => "aint",
            Stat::Charisma => "acha",
            Stat::FireResist => "fr",
            Stat::ColdResist => "cr",
            Stat::MagicResist => "mr",
            Stat::PoisonResist => "pr",
            Stat::DiseaseResist => "dr",
            Stat::Attack => "attack",
            Stat::Haste => "haste",
            Stat::Regen => "regen",
            Stat::ManaRegen => "manaregen",
            Stat::EnduranceRegen => "enduranceregen",
            Stat::Damage => "damage",
            Stat::Delay => "delay",
            Stat::DamageShield => "damageshield",
            Stat::SpellDamage => "spelldmg",
            Stat::HealAmount => "healamt",
            Stat::Weight => "weight",
            Stat::RequiredLevel => "reqlevel",
            Stat::RecommendedLevel => "reclevel",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stat::ArmorClass => "Armor Class",
            Stat::HitPoints => "Hit Points",
            Stat::Mana => "Mana",
            Stat::Endurance => "Endurance",
            Stat::Strength => "Strength",
            Stat::Stamina => "Stamina",
            Stat::Agility => "Agility",
            Stat::Dexterity => "Dexterity",
            Stat::Wisdom => "Wisdom",
            Stat::Intelligence => "Intelligence",
            Stat::Charisma => "Charisma",
            Stat::FireResist => "Fire Resist",
            Stat::ColdResist => "Cold Resist",
            Stat::MagicResist => "Magic Resist",
            Stat::PoisonResist => "Poison Resist",
            Stat::DiseaseResist => "Disease Resist",
            Stat::Attack => "Attack",
            Stat::Haste => "Haste",
            Stat::Regen => "HP Regen",
            Stat::ManaRegen => "Mana Regen",
            Stat::EnduranceRegen => "Endurance Regen",
            Stat::Damage => "Damage",
            Stat::Delay => "Delay",
            Stat::DamageShield => "Damage Shield",
            Stat::SpellDamage => "Spell Damage",
            Stat::HealAmount => "Heal Amount",
            Stat::Weight => "Weight",
            Stat::RequiredLevel => "Required Level",
            Stat::RecommendedLevel => "Recommended Level",
        }
    }

    /// Looks a stat up by its column name, ignoring ASCII case.
    pub fn from_column(name: &str) -> Option<Stat> {
        Stat::ALL
            .into_iter()
            .find(|stat| stat.column().eq_ignore_ascii_case(name))
    }

    /// Like [`Stat::from_column`], but an unknown stat is invalid input.
    pub fn parse(name: &str) -> Result<Stat> {
        Stat::from_column(name)
            .ok_or_else(|| BazaarError::validation(format!("'{}' is not a searchable stat", name)))
    }
}

impl From<Stat> for &'static str {
    fn from(stat: Stat) -> Self {
        stat.column()
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_lookup() {
        assert_eq!(Stat::from_column("hp"), Some(Stat::HitPoints));
        assert_eq!(Stat::from_column("AC"), Some(Stat::ArmorClass));
        assert_eq!(Stat::from_column("luck"), None);
        assert!(Stat::parse("luck").is_err());
    }

    #[test]
    fn test_columns_are_unique() {
        let mut columns: Vec<_> = Stat::ALL.iter().map(|s| s.column()).collect();
        columns.sort();
        columns.dedup();
        assert_eq!(columns.len(), Stat::ALL.len());
    }
}
