//! Serde record structs for combat content definitions.
//!
//! One record type per dataset kind. Defaults match what the host program
//! assumes when a field is left out, so a sparse export still types cleanly;
//! whether a sparse record is *acceptable* is decided by the auditors.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

fn default_one() -> f64 {
    1.0
}

fn default_none_mode() -> String {
    "none".to_string()
}

fn default_center() -> String {
    "center".to_string()
}

fn default_torso() -> String {
    "torso".to_string()
}

fn default_dwarf() -> String {
    "dwarf".to_string()
}

// ===========================================================================
// Weapons
// ===========================================================================

/// A weapon definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeaponData {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub length_m: f64,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub swing: bool,
    #[serde(default)]
    pub thrust: bool,
    #[serde(default)]
    pub derived: DerivedPhysics,
}

/// Physical coefficients derived by the schema tool from base weapon data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DerivedPhysics {
    pub moment_of_inertia: f64,
    pub effective_mass: f64,
    pub reference_energy_j: f64,
    pub geometry_coeff: f64,
    pub rigidity_coeff: f64,
}

// ===========================================================================
// Techniques
// ===========================================================================

/// A combat technique definition.
#[derive(Debug, Clone, Deserialize)]
pub struct TechniqueData {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_none_mode")]
    pub attack_mode: String,
    #[serde(default)]
    pub target_height: Option<String>,
    #[serde(default)]
    pub secondary_height: Option<String>,
    #[serde(default)]
    pub guard_height: Option<String>,
    #[serde(default)]
    pub covers_adjacent: bool,
    #[serde(default)]
    pub difficulty: f64,
    #[serde(default)]
    pub channels: Channels,
    #[serde(default)]
    pub damage: DamageData,
    #[serde(default = "default_one")]
    pub deflect_mult: f64,
    #[serde(default = "default_one")]
    pub parry_mult: f64,
    #[serde(default = "default_one")]
    pub dodge_mult: f64,
    #[serde(default = "default_one")]
    pub counter_mult: f64,
    #[serde(default)]
    pub overlay_bonus: OverlayBonus,
    #[serde(default)]
    pub axis_bias: Option<AxisBias>,
}

impl TechniqueData {
    /// Whether the technique attacks at all.
    pub fn is_attack(&self) -> bool {
        self.attack_mode != "none"
    }
}

/// Which bodily channels a technique occupies.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Channels {
    pub weapon: bool,
    pub off_hand: bool,
    pub footwork: bool,
}

impl Channels {
    /// True when at least one channel is active.
    pub fn any(&self) -> bool {
        self.weapon || self.off_hand || self.footwork
    }

    /// Names of the active channels, in declaration order.
    pub fn active(&self) -> Vec<&'static str> {
        [
            ("weapon", self.weapon),
            ("off_hand", self.off_hand),
            ("footwork", self.footwork),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

/// Damage a technique deals and how it scales.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DamageData {
    pub instances: Vec<DamageInstance>,
    pub scaling: Scaling,
}

/// One packet of damage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DamageInstance {
    pub amount: f64,
    pub types: Vec<String>,
}

/// Stat scaling of a technique's damage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scaling {
    pub ratio: f64,
    pub stats: ScalingStats,
}

impl Default for Scaling {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            stats: ScalingStats::default(),
        }
    }
}

/// Either a single stat accessor or the average of exactly two.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScalingStats {
    pub stat: Option<String>,
    pub average: Vec<String>,
}

/// Bonuses applied while the technique is overlaid on another.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OverlayBonus {
    pub offensive: OffensiveOverlay,
    pub defensive: DefensiveOverlay,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OffensiveOverlay {
    pub to_hit_bonus: f64,
    pub damage_mult: f64,
}

impl Default for OffensiveOverlay {
    fn default() -> Self {
        Self {
            to_hit_bonus: 0.0,
            damage_mult: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefensiveOverlay {
    pub defense_bonus: f64,
}

/// Per-axis damage multipliers. Each axis is optional so the auditor can
/// tell an explicit `1.0` from an omitted field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AxisBias {
    pub geometry_mult: Option<f64>,
    pub energy_mult: Option<f64>,
    pub rigidity_mult: Option<f64>,
}

impl AxisBias {
    pub fn is_empty(&self) -> bool {
        self.geometry_mult.is_none() && self.energy_mult.is_none() && self.rigidity_mult.is_none()
    }
}

// ===========================================================================
// Armour
// ===========================================================================

/// Shielding coefficients shared by armour materials and tissue layers.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Shielding {
    pub deflection: f64,
    pub absorption: f64,
    pub dispersion: f64,
}

impl Shielding {
    pub fn sum(&self) -> f64 {
        self.deflection + self.absorption + self.dispersion
    }
}

/// Damage susceptibility per axis. Left optional: armour materials default
/// a missing ratio to 1 while tissue layers default everything to 0.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Susceptibility {
    pub geometry_threshold: Option<f64>,
    pub geometry_ratio: Option<f64>,
    pub energy_threshold: Option<f64>,
    pub energy_ratio: Option<f64>,
    pub rigidity_threshold: Option<f64>,
    pub rigidity_ratio: Option<f64>,
}

/// The three damage axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Geometry,
    Energy,
    Rigidity,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Geometry, Axis::Energy, Axis::Rigidity];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Geometry => "geometry",
            Axis::Energy => "energy",
            Axis::Rigidity => "rigidity",
        }
    }
}

impl Susceptibility {
    /// `(threshold, ratio)` for one axis, as declared.
    pub fn axis(&self, axis: Axis) -> (Option<f64>, Option<f64>) {
        match axis {
            Axis::Geometry => (self.geometry_threshold, self.geometry_ratio),
            Axis::Energy => (self.energy_threshold, self.energy_ratio),
            Axis::Rigidity => (self.rigidity_threshold, self.rigidity_ratio),
        }
    }
}

/// An armour material definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ArmourMaterialData {
    pub name: String,
    #[serde(default)]
    pub shielding: Shielding,
    #[serde(default)]
    pub susceptibility: Susceptibility,
    #[serde(default)]
    pub shape: Option<ShapeData>,
}

/// Optional shape modifiers of an armour material.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShapeData {
    pub profile: String,
    pub dispersion_bonus: f64,
    pub absorption_bonus: f64,
}

impl Default for ShapeData {
    fn default() -> Self {
        Self {
            profile: "solid".to_string(),
            dispersion_bonus: 0.0,
            absorption_bonus: 0.0,
        }
    }
}

/// A wearable armour piece.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmourPieceData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub coverage: Vec<CoverageData>,
}

/// One coverage entry of an armour piece.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageData {
    #[serde(default)]
    pub part_tags: Vec<String>,
    #[serde(default = "default_center")]
    pub side: String,
    #[serde(default = "CoverageData::default_layer")]
    pub layer: String,
    #[serde(default = "CoverageData::default_totality")]
    pub totality: String,
}

impl CoverageData {
    fn default_layer() -> String {
        "outer".to_string()
    }

    fn default_totality() -> String {
        "frontal".to_string()
    }
}

// ===========================================================================
// Anatomy
// ===========================================================================

/// A layered tissue template referenced by body parts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TissueTemplateData {
    pub notes: String,
    pub layers: Vec<TissueLayerData>,
}

impl TissueTemplateData {
    pub fn thickness_sum(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness_ratio).sum()
    }
}

/// One tissue layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TissueLayerData {
    pub material_id: String,
    pub thickness_ratio: f64,
    pub material: LayerMaterial,
}

/// Inline material coefficients of a tissue layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayerMaterial {
    pub shielding: Shielding,
    pub susceptibility: Susceptibility,
}

/// A body plan: a forest of named parts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BodyPlanData {
    pub name: Option<String>,
    pub base_height_cm: f64,
    pub base_mass_kg: f64,
    /// Named parts in input order.
    #[serde(deserialize_with = "parts_in_input_order")]
    pub parts: Vec<(String, BodyPartData)>,
}

fn parts_in_input_order<'de, D>(deserializer: D) -> Result<Vec<(String, BodyPartData)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PartsVisitor;

    impl<'de> Visitor<'de> for PartsVisitor {
        type Value = Vec<(String, BodyPartData)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of part names to parts")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut parts = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, part)) = map.next_entry::<String, BodyPartData>()? {
                parts.push((name, part));
            }
            Ok(parts)
        }
    }

    deserializer.deserialize_map(PartsVisitor)
}

/// One anatomical part. `parent` and `enclosing` name other parts of the
/// same plan.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyPartData {
    #[serde(default = "default_torso")]
    pub tag: String,
    #[serde(default = "default_center")]
    pub side: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub enclosing: Option<String>,
    #[serde(default)]
    pub tissue_template: Option<String>,
    #[serde(default)]
    pub has_major_artery: bool,
    #[serde(default)]
    pub flags: PartFlags,
    #[serde(default)]
    pub geometry: Option<PartGeometry>,
}

impl Default for BodyPartData {
    fn default() -> Self {
        Self {
            tag: default_torso(),
            side: default_center(),
            parent: None,
            enclosing: None,
            tissue_template: None,
            has_major_artery: false,
            flags: PartFlags::default(),
            geometry: None,
        }
    }
}

impl BodyPartData {
    /// The referenced tissue template, treating an empty string as absent.
    pub fn tissue_template(&self) -> Option<&str> {
        self.tissue_template.as_deref().filter(|t| !t.is_empty())
    }

    /// Geometry thickness, zero when geometry is absent.
    pub fn thickness_cm(&self) -> f64 {
        self.geometry.as_ref().map_or(0.0, |g| g.thickness_cm)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PartFlags {
    pub vital: bool,
    pub internal: bool,
    pub grasp: bool,
    pub stand: bool,
    pub see: bool,
    pub hear: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PartGeometry {
    pub thickness_cm: f64,
    pub length_cm: f64,
    pub area_cm2: f64,
}

// ===========================================================================
// Species
// ===========================================================================

/// A playable or hostile species.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpeciesData {
    pub name: Option<String>,
    pub body_plan: String,
    pub base_blood: f64,
    pub base_stamina: f64,
    pub base_focus: f64,
    pub stamina_recovery: Option<f64>,
    pub focus_recovery: Option<f64>,
    pub blood_recovery: Option<f64>,
    pub size_modifiers: SizeModifiers,
    pub tags: Vec<String>,
    pub natural_weapons: Vec<NaturalWeapon>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct SizeModifiers {
    pub height: Option<f64>,
    pub mass: Option<f64>,
}

/// A weapon a species wields by virtue of having a particular part.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NaturalWeapon {
    pub weapon_id: String,
    pub required_part: String,
}

impl Default for NaturalWeapon {
    fn default() -> Self {
        Self {
            weapon_id: String::new(),
            required_part: "hand".to_string(),
        }
    }
}

// ===========================================================================
// Combat tests
// ===========================================================================

/// A scripted combat exchange with its expected outcome.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CombatTestData {
    pub description: String,
    pub attacker: AttackerSpec,
    pub defender: DefenderSpec,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttackerSpec {
    pub species: String,
    pub weapon_id: String,
    pub technique_id: String,
    pub stakes: String,
    pub stats: AttackerStats,
}

impl Default for AttackerSpec {
    fn default() -> Self {
        Self {
            species: default_dwarf(),
            weapon_id: String::new(),
            technique_id: String::new(),
            stakes: "committed".to_string(),
            stats: AttackerStats::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct AttackerStats {
    pub power: Option<f64>,
    pub speed: Option<f64>,
    pub skill: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefenderSpec {
    pub species: String,
    pub armour_ids: Vec<String>,
    pub pose: String,
    pub target_part: String,
}

impl Default for DefenderSpec {
    fn default() -> Self {
        Self {
            species: default_dwarf(),
            armour_ids: Vec::new(),
            pose: "balanced".to_string(),
            target_part: default_torso(),
        }
    }
}

/// Assertions on the simulated outcome; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExpectedOutcome {
    pub outcome: Option<String>,
    pub damage_dealt_min: Option<f64>,
    pub damage_dealt_max: Option<f64>,
    pub packet_energy_min: Option<f64>,
    pub packet_geometry_min: Option<f64>,
    pub armour_deflected: Option<bool>,
    pub penetrated_layers_min: Option<f64>,
    pub penetrated_layers_max: Option<f64>,
}
