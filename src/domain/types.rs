// ==========================================
// Bakery Cost Calculator - domain value types
// ==========================================
// Stored in the database as lowercase strings
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Material category
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Flour,
    Dairy,
    Sugar,
    Fat,
    Other,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 5] = [
        MaterialCategory::Flour,
        MaterialCategory::Dairy,
        MaterialCategory::Sugar,
        MaterialCategory::Fat,
        MaterialCategory::Other,
    ];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            MaterialCategory::Flour => "flour",
            MaterialCategory::Dairy => "dairy",
            MaterialCategory::Sugar => "sugar",
            MaterialCategory::Fat => "fat",
            MaterialCategory::Other => "other",
        }
    }

    /// Parse a stored value. Returns None for anything outside the enum.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "flour" => Some(MaterialCategory::Flour),
            "dairy" => Some(MaterialCategory::Dairy),
            "sugar" => Some(MaterialCategory::Sugar),
            "fat" => Some(MaterialCategory::Fat),
            "other" => Some(MaterialCategory::Other),
            _ => None,
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Material unit
// ==========================================
// packageSize and recipe quantities are both expressed in this unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialUnit {
    Gram,
    Milliliter,
    Piece,
}

impl MaterialUnit {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MaterialUnit::Gram => "gram",
            MaterialUnit::Milliliter => "milliliter",
            MaterialUnit::Piece => "piece",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gram" | "g" => Some(MaterialUnit::Gram),
            "milliliter" | "ml" => Some(MaterialUnit::Milliliter),
            "piece" | "pc" => Some(MaterialUnit::Piece),
            _ => None,
        }
    }
}

impl fmt::Display for MaterialUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_db_round_trip() {
        for category in MaterialCategory::ALL {
            assert_eq!(
                MaterialCategory::from_db_str(category.to_db_str()),
                Some(category)
            );
        }
        assert_eq!(MaterialCategory::from_db_str("grain"), None);
    }

    #[test]
    fn test_unit_accepts_short_forms() {
        assert_eq!(MaterialUnit::from_db_str("g"), Some(MaterialUnit::Gram));
        assert_eq!(MaterialUnit::from_db_str("ML"), Some(MaterialUnit::Milliliter));
        assert_eq!(MaterialUnit::from_db_str("piece"), Some(MaterialUnit::Piece));
        assert_eq!(MaterialUnit::from_db_str("kg"), None);
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&MaterialCategory::Dairy).unwrap();
        assert_eq!(json, "\"dairy\"");
        let unit: MaterialUnit = serde_json::from_str("\"milliliter\"").unwrap();
        assert_eq!(unit, MaterialUnit::Milliliter);
    }
}
