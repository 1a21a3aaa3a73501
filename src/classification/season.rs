//! Season lookup over classification labels
//!
//! The season table is configuration data injected at construction. Labels
//! missing from the table resolve to [`Season::NeutralTransitional`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{
    classification::colorimetric::{Chroma, ClassificationLabel, Undertone, Value},
    AnalysisError, Result,
};

/// Personal color season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "Light Spring")]
    LightSpring,
    #[serde(rename = "Warm Spring")]
    WarmSpring,
    #[serde(rename = "Soft Autumn")]
    SoftAutumn,
    #[serde(rename = "Dark Autumn")]
    DarkAutumn,
    #[serde(rename = "Light Summer")]
    LightSummer,
    #[serde(rename = "Cool Summer")]
    CoolSummer,
    #[serde(rename = "Dark Winter")]
    DarkWinter,
    #[serde(rename = "Bright Winter")]
    BrightWinter,
    #[serde(rename = "Neutral/Transitional")]
    NeutralTransitional,
}

impl Season {
    pub fn name(&self) -> &'static str {
        match self {
            Season::LightSpring => "Light Spring",
            Season::WarmSpring => "Warm Spring",
            Season::SoftAutumn => "Soft Autumn",
            Season::DarkAutumn => "Dark Autumn",
            Season::LightSummer => "Light Summer",
            Season::CoolSummer => "Cool Summer",
            Season::DarkWinter => "Dark Winter",
            Season::BrightWinter => "Bright Winter",
            Season::NeutralTransitional => "Neutral/Transitional",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a season table, as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRule {
    pub undertone: Undertone,
    pub value: Value,
    pub chroma: Chroma,
    pub season: Season,
}

impl SeasonRule {
    pub const fn new(undertone: Undertone, value: Value, chroma: Chroma, season: Season) -> Self {
        Self {
            undertone,
            value,
            chroma,
            season,
        }
    }

    pub fn label(&self) -> ClassificationLabel {
        ClassificationLabel::new(self.undertone, self.value, self.chroma)
    }
}

const STANDARD_RULES: [SeasonRule; 10] = {
    use Chroma::*;
    use Season::*;
    use Undertone::*;
    use Value::*;
    [
        SeasonRule::new(Warm, Light, Muted, LightSpring),
        SeasonRule::new(Warm, Medium, Bright, WarmSpring),
        SeasonRule::new(Warm, Medium, Muted, SoftAutumn),
        SeasonRule::new(Warm, Deep, Muted, DarkAutumn),
        SeasonRule::new(Warm, Deep, Bright, DarkAutumn),
        SeasonRule::new(Cool, Light, Muted, LightSummer),
        SeasonRule::new(Cool, Medium, Muted, CoolSummer),
        SeasonRule::new(Cool, Medium, Bright, BrightWinter),
        SeasonRule::new(Cool, Deep, Muted, DarkWinter),
        SeasonRule::new(Cool, Deep, Bright, DarkWinter),
    ]
};

/// Immutable, partial map from label to season
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonTable {
    entries: HashMap<ClassificationLabel, Season>,
}

impl Default for SeasonTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl SeasonTable {
    /// The canonical table
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_RULES.iter().map(|r| (r.label(), r.season)).collect(),
        }
    }

    pub fn standard_rules() -> Vec<SeasonRule> {
        STANDARD_RULES.to_vec()
    }

    /// Build a table from configuration rows
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidParameter` if a label appears twice.
    pub fn from_rules(rules: &[SeasonRule]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(rules.len());
        for rule in rules {
            if entries.insert(rule.label(), rule.season).is_some() {
                return Err(AnalysisError::invalid_parameter(
                    "season_table",
                    format!("duplicate entry for {}", rule.label()),
                ));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, label: &ClassificationLabel) -> Option<Season> {
        self.entries.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in a stable order, for serialization
    pub fn rules(&self) -> Vec<SeasonRule> {
        let mut rules: Vec<SeasonRule> = self
            .entries
            .iter()
            .map(|(l, s)| SeasonRule::new(l.undertone, l.value, l.chroma, *s))
            .collect();
        rules.sort_by_key(|r| r.label());
        rules
    }
}

/// Table-driven season resolver
#[derive(Debug, Clone, Default)]
pub struct SeasonClassifier {
    table: SeasonTable,
}

impl SeasonClassifier {
    pub fn new(table: SeasonTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SeasonTable {
        &self.table
    }

    pub fn resolve_season(&self, label: &ClassificationLabel) -> Season {
        self.table
            .get(label)
            .unwrap_or(Season::NeutralTransitional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_entries() {
        let classifier = SeasonClassifier::new(SeasonTable::standard());
        let resolve = |u, v, c| classifier.resolve_season(&ClassificationLabel::new(u, v, c));

        assert_eq!(resolve(Undertone::Warm, Value::Light, Chroma::Muted), Season::LightSpring);
        assert_eq!(resolve(Undertone::Warm, Value::Medium, Chroma::Bright), Season::WarmSpring);
        assert_eq!(resolve(Undertone::Warm, Value::Deep, Chroma::Muted), Season::DarkAutumn);
        assert_eq!(resolve(Undertone::Cool, Value::Medium, Chroma::Muted), Season::CoolSummer);
        assert_eq!(resolve(Undertone::Cool, Value::Medium, Chroma::Bright), Season::BrightWinter);
        assert_eq!(resolve(Undertone::Cool, Value::Deep, Chroma::Bright), Season::DarkWinter);
    }

    #[test]
    fn test_untabulated_labels_fall_back() {
        let table = SeasonTable::standard();
        let classifier = SeasonClassifier::new(table.clone());

        let mut fallbacks = 0;
        for label in ClassificationLabel::all() {
            if table.get(&label).is_none() {
                assert_eq!(classifier.resolve_season(&label), Season::NeutralTransitional);
                fallbacks += 1;
            }
        }
        assert_eq!(fallbacks, 18 - table.len());
    }

    #[test]
    fn test_warm_light_bright_is_transitional() {
        let classifier = SeasonClassifier::default();
        let label = ClassificationLabel::new(Undertone::Warm, Value::Light, Chroma::Bright);
        assert_eq!(classifier.resolve_season(&label), Season::NeutralTransitional);
    }

    #[test]
    fn test_neutral_undertone_never_tabulated() {
        let classifier = SeasonClassifier::default();
        for label in ClassificationLabel::all().filter(|l| l.undertone == Undertone::Neutral) {
            assert_eq!(classifier.resolve_season(&label), Season::NeutralTransitional);
        }
    }

    #[test]
    fn test_injected_alternate_table() {
        let table = SeasonTable::from_rules(&[SeasonRule::new(
            Undertone::Warm,
            Value::Light,
            Chroma::Bright,
            Season::LightSpring,
        )])
        .unwrap();
        let classifier = SeasonClassifier::new(table);

        let label = ClassificationLabel::new(Undertone::Warm, Value::Light, Chroma::Bright);
        assert_eq!(classifier.resolve_season(&label), Season::LightSpring);

        let other = ClassificationLabel::new(Undertone::Warm, Value::Deep, Chroma::Muted);
        assert_eq!(classifier.resolve_season(&other), Season::NeutralTransitional);
    }

    #[test]
    fn test_duplicate_rules_rejected() {
        let rule = SeasonRule::new(Undertone::Cool, Value::Light, Chroma::Muted, Season::LightSummer);
        assert!(SeasonTable::from_rules(&[rule, rule]).is_err());
    }

    #[test]
    fn test_rules_round_trip() {
        let table = SeasonTable::standard();
        assert_eq!(SeasonTable::from_rules(&table.rules()).unwrap(), table);
        assert_eq!(table.rules().len(), SeasonTable::standard_rules().len());
    }

    #[test]
    fn test_season_names_serialize() {
        let json = serde_json::to_string(&Season::NeutralTransitional).unwrap();
        assert_eq!(json, "\"Neutral/Transitional\"");
        assert_eq!(Season::SoftAutumn.to_string(), "Soft Autumn");
    }
}
