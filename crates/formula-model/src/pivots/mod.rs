//! Pivot-table vocabulary shared by the feature builders.
//!
//! Only the summary-function table lives here; pivot cache/table definitions are produced by the
//! `.xlsx` writer layers on top of this.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Summary function applied to a pivot data field (`ST_DataConsolidateFunction`).
///
/// Each variant carries a stable integer code and two names: the OOXML token written to
/// `dataField@subtotal` (unique per variant) and the caption prefix Excel shows in the generated
/// column header (not unique: `Count` and `CountNums` both display as `Count`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataConsolidateFunction {
    #[serde(rename = "average")]
    Average,
    #[serde(rename = "count")]
    Count,
    #[serde(rename = "countNums")]
    CountNums,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "product")]
    Product,
    #[serde(rename = "stdDev")]
    StdDev,
    #[serde(rename = "stdDevp")]
    StdDevP,
    #[serde(rename = "sum")]
    Sum,
    #[serde(rename = "var")]
    Var,
    #[serde(rename = "varp")]
    VarP,
}

/// Lookup failure for a function code with no table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no data consolidate function with code {code}")]
pub struct NoSuchFunctionError {
    pub code: u8,
}

/// Lookup failure for an OOXML token with no table entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown data consolidate function `{name}`")]
pub struct UnknownFunctionNameError {
    pub name: String,
}

impl DataConsolidateFunction {
    /// Every function, in code order.
    pub const ALL: [DataConsolidateFunction; 11] = [
        DataConsolidateFunction::Average,
        DataConsolidateFunction::Count,
        DataConsolidateFunction::CountNums,
        DataConsolidateFunction::Max,
        DataConsolidateFunction::Min,
        DataConsolidateFunction::Product,
        DataConsolidateFunction::StdDev,
        DataConsolidateFunction::StdDevP,
        DataConsolidateFunction::Sum,
        DataConsolidateFunction::Var,
        DataConsolidateFunction::VarP,
    ];

    pub const fn code(self) -> u8 {
        match self {
            DataConsolidateFunction::Average => 1,
            DataConsolidateFunction::Count => 2,
            DataConsolidateFunction::CountNums => 3,
            DataConsolidateFunction::Max => 4,
            DataConsolidateFunction::Min => 5,
            DataConsolidateFunction::Product => 6,
            DataConsolidateFunction::StdDev => 7,
            DataConsolidateFunction::StdDevP => 8,
            DataConsolidateFunction::Sum => 9,
            DataConsolidateFunction::Var => 10,
            DataConsolidateFunction::VarP => 11,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, NoSuchFunctionError> {
        match code {
            1 => Ok(DataConsolidateFunction::Average),
            2 => Ok(DataConsolidateFunction::Count),
            3 => Ok(DataConsolidateFunction::CountNums),
            4 => Ok(DataConsolidateFunction::Max),
            5 => Ok(DataConsolidateFunction::Min),
            6 => Ok(DataConsolidateFunction::Product),
            7 => Ok(DataConsolidateFunction::StdDev),
            8 => Ok(DataConsolidateFunction::StdDevP),
            9 => Ok(DataConsolidateFunction::Sum),
            10 => Ok(DataConsolidateFunction::Var),
            11 => Ok(DataConsolidateFunction::VarP),
            _ => Err(NoSuchFunctionError { code }),
        }
    }

    /// Caption prefix used for generated data-field headers (e.g. `Sum` in `Sum of Sales`).
    pub const fn display_name(self) -> &'static str {
        match self {
            DataConsolidateFunction::Average => "Average",
            DataConsolidateFunction::Count | DataConsolidateFunction::CountNums => "Count",
            DataConsolidateFunction::Max => "Max",
            DataConsolidateFunction::Min => "Min",
            DataConsolidateFunction::Product => "Product",
            DataConsolidateFunction::StdDev => "StdDev",
            DataConsolidateFunction::StdDevP => "StdDevp",
            DataConsolidateFunction::Sum => "Sum",
            DataConsolidateFunction::Var => "Var",
            DataConsolidateFunction::VarP => "Varp",
        }
    }

    /// OOXML `ST_DataConsolidateFunction` token.
    pub const fn xml_name(self) -> &'static str {
        match self {
            DataConsolidateFunction::Average => "average",
            DataConsolidateFunction::Count => "count",
            DataConsolidateFunction::CountNums => "countNums",
            DataConsolidateFunction::Max => "max",
            DataConsolidateFunction::Min => "min",
            DataConsolidateFunction::Product => "product",
            DataConsolidateFunction::StdDev => "stdDev",
            DataConsolidateFunction::StdDevP => "stdDevp",
            DataConsolidateFunction::Sum => "sum",
            DataConsolidateFunction::Var => "var",
            DataConsolidateFunction::VarP => "varp",
        }
    }

    /// Inverse of [`DataConsolidateFunction::xml_name`]. Matching is exact (OOXML enumerations are
    /// case-sensitive).
    pub fn from_xml_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.xml_name() == name)
    }
}

impl fmt::Display for DataConsolidateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DataConsolidateFunction {
    type Err = UnknownFunctionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_xml_name(s).ok_or_else(|| UnknownFunctionNameError {
            name: s.to_string(),
        })
    }
}

impl TryFrom<u8> for DataConsolidateFunction {
    type Error = NoSuchFunctionError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// Header for a generated data field, e.g. `Sum of Revenue`.
pub fn data_field_caption(function: DataConsolidateFunction, header: &str) -> String {
    format!("{} of {header}", function.display_name())
}
