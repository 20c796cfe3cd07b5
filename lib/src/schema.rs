//! Static column classification.
//!
//! A [`Schema`] names the identifier and target columns and lists which
//! columns are numeric, ordinal or nominal. Classification is by allow-list,
//! never by sniffing cell types: a year or a dwelling-class code looks numeric
//! but is categorical, and only a fixed list gets that right.
//!
//! [`Schema::ames()`] is the built-in classification of the Ames Housing
//! columns. Alternate schemas can be built in code or loaded from JSON.

use crate::preprocessing::error::FeatureError;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Identifier column of the Ames table, always dropped.
pub const AMES_IDENTIFIER: &str = "Id";

/// Prediction target of the Ames table.
pub const AMES_TARGET: &str = "SalePrice";

/// Continuous and discrete quantities.
pub const AMES_NUMERIC: &[&str] = &[
    "LotFrontage",
    "LotArea",
    "OverallQual",
    "OverallCond",
    "MasVnrArea",
    "BsmtFinSF1",
    "BsmtFinSF2",
    "BsmtUnfSF",
    "TotalBsmtSF",
    "1stFlrSF",
    "2ndFlrSF",
    "LowQualFinSF",
    "GrLivArea",
    "FullBath",
    "HalfBath",
    "BedroomAbvGr",
    "KitchenAbvGr",
    "TotRmsAbvGrd",
    "Fireplaces",
    "GarageCars",
    "GarageArea",
    "WoodDeckSF",
    "OpenPorchSF",
    "EnclosedPorch",
    "3SsnPorch",
    "ScreenPorch",
    "PoolArea",
    "MiscVal",
];

/// Categories with a natural order (slopes, quality and condition ratings).
pub const AMES_ORDINAL: &[&str] = &[
    "LandSlope",
    "BsmtQual",
    "BsmtCond",
    "BsmtFinType1",
    "BsmtFinType2",
    "HeatingQC",
    "Electrical",
    "KitchenQual",
    "Functional",
    "FireplaceQu",
    "GarageQual",
    "GarageCond",
    "PoolQC",
];

/// Unordered categories: the text columns in file order, then the
/// numeric-looking columns that are really categorical.
pub const AMES_NOMINAL: &[&str] = &[
    "MSZoning",
    "Street",
    "Alley",
    "LotShape",
    "LandContour",
    "Utilities",
    "LotConfig",
    "Neighborhood",
    "Condition1",
    "Condition2",
    "BldgType",
    "HouseStyle",
    "RoofStyle",
    "RoofMatl",
    "Exterior1st",
    "Exterior2nd",
    "MasVnrType",
    "ExterQual",
    "ExterCond",
    "Foundation",
    "BsmtExposure",
    "Heating",
    "CentralAir",
    "GarageType",
    "GarageFinish",
    "PavedDrive",
    "Fence",
    "MiscFeature",
    "SaleType",
    "SaleCondition",
    "MSSubClass",
    "YearBuilt",
    "YearRemodAdd",
    "BsmtFullBath",
    "BsmtHalfBath",
    "GarageYrBlt",
    "MoSold",
    "YrSold",
];

/// Semantic group of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnGroup {
    Identifier,
    Target,
    Numeric,
    Ordinal,
    Nominal,
}

impl fmt::Display for ColumnGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnGroup::Identifier => "identifier",
            ColumnGroup::Target => "target",
            ColumnGroup::Numeric => "numeric",
            ColumnGroup::Ordinal => "ordinal",
            ColumnGroup::Nominal => "nominal",
        };
        f.write_str(name)
    }
}

/// Fixed partition of column names into semantic groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Row identifier; dropped from every output.
    pub identifier: String,
    /// Prediction target; placed last when present.
    pub target: String,
    pub numeric: Vec<String>,
    pub ordinal: Vec<String>,
    pub nominal: Vec<String>,
}

/// Result of checking a table against a [`Schema`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Whether the table carries the target column.
    pub has_target: bool,
    /// Whether the table carries the identifier column.
    pub has_identifier: bool,
    /// Columns of the table that belong to no group; they are ignored.
    pub unclassified: Vec<String>,
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Schema {
    /// Schema with the given identifier and target and empty feature groups.
    pub fn new(identifier: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            target: target.into(),
            numeric: Vec::new(),
            ordinal: Vec::new(),
            nominal: Vec::new(),
        }
    }

    /// The Ames Housing classification.
    pub fn ames() -> Self {
        Self {
            identifier: AMES_IDENTIFIER.to_string(),
            target: AMES_TARGET.to_string(),
            numeric: to_strings(AMES_NUMERIC),
            ordinal: to_strings(AMES_ORDINAL),
            nominal: to_strings(AMES_NOMINAL),
        }
    }

    pub fn with_numeric(mut self, names: &[&str]) -> Self {
        self.numeric = to_strings(names);
        self
    }

    pub fn with_ordinal(mut self, names: &[&str]) -> Self {
        self.ordinal = to_strings(names);
        self
    }

    pub fn with_nominal(mut self, names: &[&str]) -> Self {
        self.nominal = to_strings(names);
        self
    }

    /// Group a column name belongs to, if any.
    pub fn group_of(&self, name: &str) -> Option<ColumnGroup> {
        if name == self.identifier {
            Some(ColumnGroup::Identifier)
        } else if name == self.target {
            Some(ColumnGroup::Target)
        } else if self.numeric.iter().any(|n| n == name) {
            Some(ColumnGroup::Numeric)
        } else if self.ordinal.iter().any(|n| n == name) {
            Some(ColumnGroup::Ordinal)
        } else if self.nominal.iter().any(|n| n == name) {
            Some(ColumnGroup::Nominal)
        } else {
            None
        }
    }

    fn feature_groups(&self) -> [(ColumnGroup, &[String]); 3] {
        [
            (ColumnGroup::Numeric, self.numeric.as_slice()),
            (ColumnGroup::Ordinal, self.ordinal.as_slice()),
            (ColumnGroup::Nominal, self.nominal.as_slice()),
        ]
    }

    /// Check that every name belongs to exactly one group.
    ///
    /// # Errors
    /// [`FeatureError::InvalidParameter`] naming the first repeated column.
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.identifier == self.target {
            return Err(FeatureError::InvalidParameter(format!(
                "identifier and target are both '{}'",
                self.target
            )));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(&self.identifier);
        seen.insert(&self.target);
        for (group, names) in self.feature_groups() {
            for name in names {
                if !seen.insert(name) {
                    return Err(FeatureError::InvalidParameter(format!(
                        "column '{}' in {} group is already classified",
                        name, group
                    )));
                }
            }
        }
        Ok(())
    }

    /// Check a table against the schema.
    ///
    /// Every numeric, ordinal and nominal column must be present. The
    /// identifier and target are optional: inference tables have no target,
    /// and the identifier is dropped either way. Columns outside every group
    /// are listed in [`Classification::unclassified`].
    ///
    /// # Errors
    /// [`FeatureError::MissingColumn`] for the first absent column, with its group.
    pub fn classify(&self, table: &Table) -> Result<Classification, FeatureError> {
        for (group, names) in self.feature_groups() {
            if let Some(missing) = names.iter().find(|n| !table.contains(n)) {
                return Err(FeatureError::MissingColumn {
                    column: missing.clone(),
                    group,
                });
            }
        }

        let unclassified: Vec<String> = table
            .column_names()
            .into_iter()
            .filter(|name| self.group_of(name).is_none())
            .map(str::to_string)
            .collect();

        Ok(Classification {
            has_target: table.contains(&self.target),
            has_identifier: table.contains(&self.identifier),
            unclassified,
        })
    }

    /// Load a schema from JSON and validate it.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, FeatureError> {
        let schema: Schema = serde_json::from_reader(reader)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load a schema from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FeatureError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Pretty-printed JSON form of the schema.
    pub fn to_json_string(&self) -> Result<String, FeatureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::ames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, Column};

    fn tiny_schema() -> Schema {
        Schema::new("Id", "SalePrice")
            .with_numeric(&["LotArea"])
            .with_ordinal(&["LandSlope"])
            .with_nominal(&["Street"])
    }

    fn tiny_table(with_target: bool) -> Table {
        let mut columns = vec![
            Column::from_f64("LotArea", vec![5000.0, 7000.0]),
            Column::new("LandSlope", vec![Cell::from("Gtl"), Cell::from("Mod")]),
            Column::new("Street", vec![Cell::from("Pave"), Cell::from("Grvl")]),
        ];
        if with_target {
            columns.push(Column::from_f64("SalePrice", vec![1.0, 2.0]));
        }
        Table::new(columns).unwrap()
    }

    #[test]
    fn test_ames_group_sizes() {
        let schema = Schema::ames();
        assert_eq!(schema.numeric.len(), 28);
        assert_eq!(schema.ordinal.len(), 13);
        assert_eq!(schema.nominal.len(), 38);
    }

    #[test]
    fn test_ames_schema_is_disjoint() {
        assert!(Schema::ames().validate().is_ok());
    }

    #[test]
    fn test_ames_reclassified_columns_are_nominal() {
        let schema = Schema::ames();
        for name in ["MSSubClass", "YearBuilt", "GarageYrBlt", "YrSold"] {
            assert_eq!(schema.group_of(name), Some(ColumnGroup::Nominal));
        }
        assert_eq!(schema.group_of("PoolQC"), Some(ColumnGroup::Ordinal));
        assert_eq!(schema.group_of("Id"), Some(ColumnGroup::Identifier));
        assert_eq!(schema.group_of("SalePrice"), Some(ColumnGroup::Target));
        assert_eq!(schema.group_of("Nope"), None);
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let schema = tiny_schema().with_nominal(&["Street", "LotArea"]);
        let result = schema.validate();
        assert!(matches!(result, Err(FeatureError::InvalidParameter(_))));
    }

    #[test]
    fn test_classify_with_and_without_target() {
        let schema = tiny_schema();
        let train = schema.classify(&tiny_table(true)).unwrap();
        assert!(train.has_target);
        assert!(!train.has_identifier);

        let test = schema.classify(&tiny_table(false)).unwrap();
        assert!(!test.has_target);
    }

    #[test]
    fn test_classify_missing_column_names_group() {
        let schema = tiny_schema().with_ordinal(&["LandSlope", "PoolQC"]);
        let err = schema.classify(&tiny_table(true)).unwrap_err();
        match err {
            FeatureError::MissingColumn { column, group } => {
                assert_eq!(column, "PoolQC");
                assert_eq!(group, ColumnGroup::Ordinal);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classify_reports_unclassified() {
        let mut table = tiny_table(false);
        table
            .push_column(Column::from_f64("Extra", vec![0.0, 1.0]))
            .unwrap();
        let classification = tiny_schema().classify(&table).unwrap();
        assert_eq!(classification.unclassified, vec!["Extra".to_string()]);
    }

    #[test]
    fn test_empty_group_is_valid() {
        let schema = Schema::new("Id", "SalePrice").with_numeric(&["LotArea"]);
        assert!(schema.classify(&tiny_table(false)).is_ok());
    }

    #[test]
    fn test_schema_json_roundtrip() {
        let schema = tiny_schema();
        let json = schema.to_json_string().unwrap();
        let loaded = Schema::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(loaded, schema);
    }

    #[test]
    fn test_schema_json_rejects_overlap() {
        let json = r#"{
            "identifier": "Id",
            "target": "SalePrice",
            "numeric": ["LotArea"],
            "ordinal": ["LotArea"],
            "nominal": []
        }"#;
        let result = Schema::from_json_reader(json.as_bytes());
        assert!(matches!(result, Err(FeatureError::InvalidParameter(_))));
    }
}
