use std::fmt;

/// The kinds of content the compiler understands.
///
/// Declaration order is the fixed display order used by reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatasetKind {
    Weapons,
    Techniques,
    ArmourMaterials,
    ArmourPieces,
    TissueTemplates,
    BodyPlans,
    Species,
    CombatTests,
}

impl DatasetKind {
    /// Every dataset kind, in display order.
    pub const ALL: [DatasetKind; 8] = [
        DatasetKind::Weapons,
        DatasetKind::Techniques,
        DatasetKind::ArmourMaterials,
        DatasetKind::ArmourPieces,
        DatasetKind::TissueTemplates,
        DatasetKind::BodyPlans,
        DatasetKind::Species,
        DatasetKind::CombatTests,
    ];

    /// The dataset kinds that carry audit rules.
    pub const AUDITED: [DatasetKind; 6] = [
        DatasetKind::Weapons,
        DatasetKind::Techniques,
        DatasetKind::ArmourMaterials,
        DatasetKind::ArmourPieces,
        DatasetKind::TissueTemplates,
        DatasetKind::BodyPlans,
    ];

    /// Snake-case key, as used in reports and the input document.
    pub fn key(self) -> &'static str {
        match self {
            DatasetKind::Weapons => "weapons",
            DatasetKind::Techniques => "techniques",
            DatasetKind::ArmourMaterials => "armour_materials",
            DatasetKind::ArmourPieces => "armour_pieces",
            DatasetKind::TissueTemplates => "tissue_templates",
            DatasetKind::BodyPlans => "body_plans",
            DatasetKind::Species => "species",
            DatasetKind::CombatTests => "combat_tests",
        }
    }

    /// Section heading, e.g. `Armour Materials`.
    pub fn title(self) -> &'static str {
        match self {
            DatasetKind::Weapons => "Weapons",
            DatasetKind::Techniques => "Techniques",
            DatasetKind::ArmourMaterials => "Armour Materials",
            DatasetKind::ArmourPieces => "Armour Pieces",
            DatasetKind::TissueTemplates => "Tissue Templates",
            DatasetKind::BodyPlans => "Body Plans",
            DatasetKind::Species => "Species",
            DatasetKind::CombatTests => "Combat Tests",
        }
    }

    /// Singular noun for one record of this kind, used when it is the
    /// target of a reference (`unknown material 'x'`).
    pub fn noun(self) -> &'static str {
        match self {
            DatasetKind::Weapons => "weapon",
            DatasetKind::Techniques => "technique",
            DatasetKind::ArmourMaterials => "material",
            DatasetKind::ArmourPieces => "armour piece",
            DatasetKind::TissueTemplates => "tissue template",
            DatasetKind::BodyPlans => "body plan",
            DatasetKind::Species => "species",
            DatasetKind::CombatTests => "combat test",
        }
    }

    /// Singular label for a record that starts a sentence (`Armour piece 'x'`).
    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Weapons => "Weapon",
            DatasetKind::Techniques => "Technique",
            DatasetKind::ArmourMaterials => "Armour material",
            DatasetKind::ArmourPieces => "Armour piece",
            DatasetKind::TissueTemplates => "Tissue template",
            DatasetKind::BodyPlans => "Body plan",
            DatasetKind::Species => "Species",
            DatasetKind::CombatTests => "Combat test",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audited_kinds_follow_display_order() {
        let positions: Vec<usize> = DatasetKind::AUDITED
            .iter()
            .map(|k| DatasetKind::ALL.iter().position(|a| a == k).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn ord_matches_display_order() {
        let mut kinds = DatasetKind::ALL.to_vec();
        kinds.reverse();
        kinds.sort();
        assert_eq!(kinds, DatasetKind::ALL.to_vec());
    }

    #[test]
    fn display_uses_snake_case_key() {
        assert_eq!(DatasetKind::ArmourMaterials.to_string(), "armour_materials");
        assert_eq!(DatasetKind::TissueTemplates.title(), "Tissue Templates");
        assert_eq!(DatasetKind::ArmourPieces.label(), "Armour piece");
    }
}
