/// Item category. Decides what picking the item up does to the hero.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    Treasure,
}

/// Corruption level. Only ever moves forward: normal, corrupted, cursed.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ItemQuality {
    #[default]
    Normal,
    Corrupted,
    Cursed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
    pub value: i32,
    quality: ItemQuality,
}

impl Item {
    pub fn new(kind: ItemKind, name: impl Into<String>, value: i32) -> Self {
        Self {
            kind,
            name: name.into(),
            value,
            quality: ItemQuality::Normal,
        }
    }

    pub fn quality(&self) -> ItemQuality {
        self.quality
    }

    /// Not normal quality. The hero grows wary of these.
    pub fn is_tainted(&self) -> bool {
        self.quality != ItemQuality::Normal
    }

    pub fn is_cursed(&self) -> bool {
        self.quality == ItemQuality::Cursed
    }

    /// Advances corruption one step.
    ///
    /// Normal halves the value (floor). Corrupted flips it to the negative of
    /// its magnitude. Returns `false` for an already cursed item, which is left
    /// untouched.
    pub fn corrupt(&mut self) -> bool {
        match self.quality {
            ItemQuality::Normal => {
                self.quality = ItemQuality::Corrupted;
                self.value = self.value.div_euclid(2);
                true
            }
            ItemQuality::Corrupted => {
                self.quality = ItemQuality::Cursed;
                self.value = -self.value.saturating_abs();
                true
            }
            ItemQuality::Cursed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corruption_walks_normal_corrupted_cursed() {
        let mut potion = Item::new(ItemKind::Potion, "Health Potion", 20);

        assert!(potion.corrupt());
        assert_eq!(potion.quality(), ItemQuality::Corrupted);
        assert_eq!(potion.value, 10);

        assert!(potion.corrupt());
        assert_eq!(potion.quality(), ItemQuality::Cursed);
        assert_eq!(potion.value, -10);

        assert!(!potion.corrupt());
        assert_eq!(potion.value, -10);
    }

    #[test]
    fn halving_floors_odd_values() {
        let mut sword = Item::new(ItemKind::Weapon, "Sword", 7);
        sword.corrupt();
        assert_eq!(sword.value, 3);
    }

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("Potion".parse::<ItemKind>(), Ok(ItemKind::Potion));
        assert_eq!(ItemKind::Treasure.to_string(), "treasure");
    }
}
