//! The `Customer` entity and its name enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title placed before a customer's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamePrefix {
    Mr,
    Mrs,
    Miss,
    Ms,
    Dr,
}

impl NamePrefix {
    pub const ALL: &'static [&'static str] = &["Mr", "Mrs", "Miss", "Ms", "Dr"];

    pub fn as_str(&self) -> &'static str {
        match self {
            NamePrefix::Mr => "Mr",
            NamePrefix::Mrs => "Mrs",
            NamePrefix::Miss => "Miss",
            NamePrefix::Ms => "Ms",
            NamePrefix::Dr => "Dr",
        }
    }
}

impl FromStr for NamePrefix {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mr" => Ok(NamePrefix::Mr),
            "Mrs" => Ok(NamePrefix::Mrs),
            "Miss" => Ok(NamePrefix::Miss),
            "Ms" => Ok(NamePrefix::Ms),
            "Dr" => Ok(NamePrefix::Dr),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// Generational or academic suffix after a customer's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameSuffix {
    Jr,
    Sr,
    II,
    III,
    IV,
    PhD,
    MD,
}

impl NameSuffix {
    pub const ALL: &'static [&'static str] = &["Jr", "Sr", "II", "III", "IV", "PhD", "MD"];

    pub fn as_str(&self) -> &'static str {
        match self {
            NameSuffix::Jr => "Jr",
            NameSuffix::Sr => "Sr",
            NameSuffix::II => "II",
            NameSuffix::III => "III",
            NameSuffix::IV => "IV",
            NameSuffix::PhD => "PhD",
            NameSuffix::MD => "MD",
        }
    }
}

impl FromStr for NameSuffix {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Jr" => Ok(NameSuffix::Jr),
            "Sr" => Ok(NameSuffix::Sr),
            "II" => Ok(NameSuffix::II),
            "III" => Ok(NameSuffix::III),
            "IV" => Ok(NameSuffix::IV),
            "PhD" => Ok(NameSuffix::PhD),
            "MD" => Ok(NameSuffix::MD),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);

impl fmt::Display for NamePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NameSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer record. `id` is assigned by the store on insert and ignored in
/// create payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub prefix: Option<NamePrefix>,
    #[serde(default)]
    pub suffix: Option<NameSuffix>,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}
