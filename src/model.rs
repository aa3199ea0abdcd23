/// Dietary properties of an ingredient packed into a single bitmask.
///
/// One bit per property, in declaration order. The codec to and from
/// lowercase names is bijective over the six valid bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngredientFlags(pub u8);

impl IngredientFlags {
    pub const GLUTEN: u8 = 1 << 0;
    pub const PORK: u8 = 1 << 1;
    pub const VEGAN: u8 = 1 << 2;
    pub const VEGETARIAN: u8 = 1 << 3;
    pub const FISH: u8 = 1 << 4;
    pub const NUTS: u8 = 1 << 5;

    const NAMES: [(&'static str, u8); 6] = [
        ("gluten", Self::GLUTEN),
        ("pork", Self::PORK),
        ("vegan", Self::VEGAN),
        ("vegetarian", Self::VEGETARIAN),
        ("fish", Self::FISH),
        ("nuts", Self::NUTS),
    ];

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub fn insert(&mut self, bit: u8) {
        self.0 |= bit;
    }

    /// Decode the bitmask into the list of lowercase property names, in
    /// declaration order.
    pub fn to_names(&self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(_, bit)| self.contains(*bit))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Encode a list of property names into a bitmask. Unrecognized names
    /// are ignored; names are matched case-insensitively.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::default();
        for name in names {
            let lower = name.as_ref().to_lowercase();
            if let Some((_, bit)) = Self::NAMES.iter().find(|(n, _)| *n == lower) {
                flags.insert(*bit);
            }
        }
        flags
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingredient {
    pub name: String,
    /// Preserved as given by the source; never numerically normalized.
    pub quantity: String,
    pub unit: String,
    pub flags: IngredientFlags,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Utensil {
    pub name: String,
    pub quantity: String,
}

/// One instruction step. The first non-empty text block inside a step
/// container becomes `name`, the second becomes `content`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub num: u32,
    pub name: String,
    pub content: String,
}

/// A recipe as extracted from one page. Default-constructs to empty so a
/// scan that fails partway still yields a usable, if incomplete, record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recipe {
    pub title: String,
    pub author: String,
    pub description: String,
    pub difficulty: String,
    pub cost: String,
    pub time: String,
    pub people: u32,
    pub note: u32,

    pub steps: Vec<Step>,
    pub ingredients: Vec<Ingredient>,
    pub utensils: Vec<Utensil>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_round_trip_all_subsets() {
        // decode(encode(S)) == S for every subset of the six properties
        for mask in 0u8..64 {
            let flags = IngredientFlags(mask);
            let names = flags.to_names();
            assert_eq!(IngredientFlags::from_names(&names), flags);
        }
    }

    #[test]
    fn test_encode_decode_is_identity_on_valid_bits() {
        for mask in 0u8..64 {
            let names = IngredientFlags(mask).to_names();
            assert_eq!(IngredientFlags::from_names(names).0, mask);
        }
    }

    #[test]
    fn test_names_follow_declaration_order() {
        let flags = IngredientFlags(IngredientFlags::NUTS | IngredientFlags::GLUTEN);
        assert_eq!(flags.to_names(), vec!["gluten", "nuts"]);
    }

    #[test]
    fn test_from_names_is_case_insensitive_and_lenient() {
        let flags = IngredientFlags::from_names(["VEGAN", "unknown", "Fish"]);
        assert!(flags.contains(IngredientFlags::VEGAN));
        assert!(flags.contains(IngredientFlags::FISH));
        assert!(!flags.contains(IngredientFlags::GLUTEN));
    }

    #[test]
    fn test_default_recipe_is_empty() {
        let recipe = Recipe::default();
        assert!(recipe.title.is_empty());
        assert_eq!(recipe.people, 0);
        assert!(recipe.steps.is_empty());
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.utensils.is_empty());
    }
}
