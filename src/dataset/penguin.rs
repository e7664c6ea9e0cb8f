use serde::{Deserialize, Serialize};

/// Penguin species observed in the Palmer Archipelago study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Adelie,
    Chinstrap,
    Gentoo,
}

impl Species {
    /// All species in canonical (alphabetical) order.
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Chinstrap, Species::Gentoo];
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Species::Adelie => write!(f, "Adelie"),
            Species::Chinstrap => write!(f, "Chinstrap"),
            Species::Gentoo => write!(f, "Gentoo"),
        }
    }
}

impl std::str::FromStr for Species {
    type Err = crate::error::PenguinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adelie" => Ok(Species::Adelie),
            "chinstrap" => Ok(Species::Chinstrap),
            "gentoo" => Ok(Species::Gentoo),
            _ => Err(crate::error::PenguinError::ParseError(format!(
                "Unknown species: '{s}'"
            ))),
        }
    }
}

/// Island where an observation was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Island {
    Biscoe,
    Dream,
    Torgersen,
}

impl std::fmt::Display for Island {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Island::Biscoe => write!(f, "Biscoe"),
            Island::Dream => write!(f, "Dream"),
            Island::Torgersen => write!(f, "Torgersen"),
        }
    }
}

impl std::str::FromStr for Island {
    type Err = crate::error::PenguinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "biscoe" => Ok(Island::Biscoe),
            "dream" => Ok(Island::Dream),
            "torgersen" => Ok(Island::Torgersen),
            _ => Err(crate::error::PenguinError::ParseError(format!(
                "Unknown island: '{s}'"
            ))),
        }
    }
}

/// Recorded sex of a penguin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Female => write!(f, "Female"),
            Sex::Male => write!(f, "Male"),
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = crate::error::PenguinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" => Ok(Sex::Female),
            "male" | "m" => Ok(Sex::Male),
            _ => Err(crate::error::PenguinError::ParseError(format!(
                "Unknown sex: '{s}'"
            ))),
        }
    }
}

/// A single complete penguin observation.
///
/// Instances only exist for records where every attribute was measured;
/// rows with any missing field are dropped at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Penguin {
    pub species: Species,
    pub island: Island,
    /// Bill (culmen) length in millimeters
    pub bill_length_mm: f64,
    /// Bill (culmen) depth in millimeters
    pub bill_depth_mm: f64,
    /// Flipper length in millimeters
    pub flipper_length_mm: f64,
    /// Body mass in grams
    pub body_mass_g: f64,
    pub sex: Sex,
    /// Study year the observation was recorded
    pub year: i32,
}

/// The five numeric attributes of a penguin record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
    Year,
}

impl NumericColumn {
    /// All numeric columns in dataset order.
    pub const ALL: [NumericColumn; 5] = [
        NumericColumn::BillLength,
        NumericColumn::BillDepth,
        NumericColumn::FlipperLength,
        NumericColumn::BodyMass,
        NumericColumn::Year,
    ];

    /// Numeric columns used for pairwise plots (everything except year).
    pub const MEASUREMENTS: [NumericColumn; 4] = [
        NumericColumn::BillLength,
        NumericColumn::BillDepth,
        NumericColumn::FlipperLength,
        NumericColumn::BodyMass,
    ];

    /// Dataset column name.
    pub fn label(&self) -> &'static str {
        match self {
            NumericColumn::BillLength => "bill_length_mm",
            NumericColumn::BillDepth => "bill_depth_mm",
            NumericColumn::FlipperLength => "flipper_length_mm",
            NumericColumn::BodyMass => "body_mass_g",
            NumericColumn::Year => "year",
        }
    }

    /// Extract this column's value from a record.
    pub fn value(&self, p: &Penguin) -> f64 {
        match self {
            NumericColumn::BillLength => p.bill_length_mm,
            NumericColumn::BillDepth => p.bill_depth_mm,
            NumericColumn::FlipperLength => p.flipper_length_mm,
            NumericColumn::BodyMass => p.body_mass_g,
            NumericColumn::Year => p.year as f64,
        }
    }
}
