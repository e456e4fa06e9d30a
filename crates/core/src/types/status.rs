//! Structural enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Product structure within the catalog.
///
/// Every listing is `Standalone`: a sellable item with no variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "storefront.product_structure", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ProductStructure {
    #[default]
    Standalone,
}

impl std::fmt::Display for ProductStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standalone => write!(f, "standalone"),
        }
    }
}

impl std::str::FromStr for ProductStructure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standalone" => Ok(Self::Standalone),
            _ => Err(format!("invalid product structure: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_structure_display_matches_parse() {
        let structure = ProductStructure::Standalone;
        assert_eq!(structure.to_string().parse(), Ok(structure));
    }

    #[test]
    fn test_variant_structures_are_rejected() {
        for unknown in ["parent", "child", "variant"] {
            assert!(unknown.parse::<ProductStructure>().is_err(), "{unknown}");
        }
    }
}
