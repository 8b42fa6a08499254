use std::fmt;

use serde::Deserialize;

/// Label shown for any code outside its defined domain.
pub const UNKNOWN_LABEL: &str = "Unknown";

// ---------------------------------------------------------------------------
// RentalRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One hourly observation, exactly as read from the source file.
///
/// Codes are kept as signed integers so that out-of-domain values survive
/// loading and can be normalised to "Unknown" instead of being rejected.
/// Counts are unsigned: a negative count is a schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RentalRecord {
    #[serde(rename = "yr")]
    pub year_flag: i64,
    #[serde(rename = "season")]
    pub season_code: i64,
    #[serde(rename = "weathersit")]
    pub weather_code: i64,
    pub casual: u64,
    pub registered: u64,
    #[serde(rename = "cnt")]
    pub total: u64,
}

impl RentalRecord {
    /// `cnt == casual + registered`.
    pub fn is_consistent(&self) -> bool {
        self.casual.checked_add(self.registered) == Some(self.total)
    }
}

// ---------------------------------------------------------------------------
// Categorical labels
// ---------------------------------------------------------------------------

/// Calendar year derived from the `yr` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Year {
    Y2011,
    Y2012,
    Unknown,
}

impl Year {
    pub fn from_flag(flag: i64) -> Self {
        match flag {
            0 => Year::Y2011,
            1 => Year::Y2012,
            _ => Year::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Year::Y2011 => "2011",
            Year::Y2012 => "2012",
            Year::Unknown => UNKNOWN_LABEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    Unknown,
}

impl Season {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Season::Spring,
            2 => Season::Summer,
            3 => Season::Fall,
            4 => Season::Winter,
            _ => Season::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::Unknown => UNKNOWN_LABEL,
        }
    }
}

/// Weather situation (`weathersit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weather {
    Clear,
    Mist,
    LightRainSnow,
    HeavyRainSnow,
    Unknown,
}

impl Weather {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Weather::Clear,
            2 => Weather::Mist,
            3 => Weather::LightRainSnow,
            4 => Weather::HeavyRainSnow,
            _ => Weather::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Mist => "Mist",
            Weather::LightRainSnow => "Light Rain/Snow",
            Weather::HeavyRainSnow => "Heavy Rain/Snow",
            Weather::Unknown => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// NormalizedRecord – a RentalRecord with human-readable labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub raw: RentalRecord,
    pub year: Year,
    pub season: Season,
    pub weather: Weather,
}

impl NormalizedRecord {
    pub fn value(&self, field: ValueField) -> u64 {
        field.of(&self.raw)
    }
}

/// Numeric column that can be summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    Casual,
    Registered,
    Total,
}

impl ValueField {
    pub fn of(self, record: &RentalRecord) -> u64 {
        match self {
            ValueField::Casual => record.casual,
            ValueField::Registered => record.registered,
            ValueField::Total => record.total,
        }
    }
}

/// Casual and registered sums for one group (one row of the yearly table).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserSplit {
    pub casual: u64,
    pub registered: u64,
}
