//! Common domain type definitions
//!
//! Closed enumerations used by the subject record. Every type parses from the
//! spellings found in study spreadsheets and renders back to a canonical label,
//! which is what the tabulation engine groups on.

use std::fmt;
use std::str::FromStr;

/// Sex of a study subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sex {
    /// Female
    Female,
    /// Male
    Male,
}

impl Sex {
    /// Labels in rendering order
    pub const LABELS: [&'static str; 2] = ["w", "m"];
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "w" | "weiblich" | "f" | "female" => Ok(Self::Female),
            "m" | "männlich" | "maennlich" | "male" => Ok(Self::Male),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => f.write_str("w"),
            Self::Male => f.write_str("m"),
        }
    }
}

/// Tri-state laboratory marker: positive, negative or not available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NaStatus {
    /// Marker detected
    Positive,
    /// Marker not detected
    Negative,
    /// No result recorded
    #[default]
    NotAvailable,
}

impl NaStatus {
    /// Labels in rendering order
    pub const LABELS: [&'static str; 3] = ["positiv", "negativ", "n/a"];
}

impl FromStr for NaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positiv" | "positive" => Ok(Self::Positive),
            "negativ" | "negative" => Ok(Self::Negative),
            "keine angabe" | "n/a" | "" => Ok(Self::NotAvailable),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for NaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("positiv"),
            Self::Negative => f.write_str("negativ"),
            Self::NotAvailable => f.write_str("n/a"),
        }
    }
}

/// Yes/no flag that may be missing, e.g. "under therapy"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flag {
    /// Flag set
    Yes,
    /// Flag not set
    No,
    /// No answer recorded
    #[default]
    NotAvailable,
}

impl Flag {
    /// Labels in rendering order
    pub const LABELS: [&'static str; 3] = ["ja", "nein", "n/a"];
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "yes" | "1" => Ok(Self::Yes),
            "nein" | "no" | "0" => Ok(Self::No),
            "keine angabe" | "n/a" | "" => Ok(Self::NotAvailable),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("ja"),
            Self::No => f.write_str("nein"),
            Self::NotAvailable => f.write_str("n/a"),
        }
    }
}

/// Comparison operator of a relational integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelKind {
    /// Exactly the value
    #[default]
    Eq,
    /// More than the value
    Gt,
    /// Less than the value
    Lt,
    /// At least the value
    GtEq,
    /// At most the value
    LtEq,
}

impl RelKind {
    /// Prefix match order; two-character operators must be tried first.
    const PARSE_ORDER: [Self; 5] = [Self::GtEq, Self::LtEq, Self::Lt, Self::Gt, Self::Eq];

    /// Operator symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
        }
    }
}

/// An integer, or a relative integer such as `>5`, `>=3` or `<4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelInt {
    kind: RelKind,
    value: i64,
}

impl RelInt {
    /// Create a relational integer
    #[must_use]
    pub const fn new(kind: RelKind, value: i64) -> Self {
        Self { kind, value }
    }

    /// The comparison operator
    #[must_use]
    pub const fn kind(&self) -> RelKind {
        self.kind
    }

    /// The integer part
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

impl FromStr for RelInt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (kind, rest) = RelKind::PARSE_ORDER
            .iter()
            .find_map(|kind| trimmed.strip_prefix(kind.symbol()).map(|rest| (*kind, rest)))
            .unwrap_or((RelKind::Eq, trimmed));

        rest.trim()
            .parse::<i64>()
            .map(|value| Self { kind, value })
            .map_err(|_| s.to_string())
    }
}

impl fmt::Display for RelInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RelKind::Eq => write!(f, "{}", self.value),
            kind => write!(f, "{}{}", kind.symbol(), self.value),
        }
    }
}

/// A relational integer that may be missing ("keine Angabe")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NaRelInt {
    /// No value recorded
    #[default]
    NotAvailable,
    /// Recorded value
    Value(RelInt),
}

impl NaRelInt {
    /// The recorded value, if any
    #[must_use]
    pub const fn value(&self) -> Option<RelInt> {
        match self {
            Self::NotAvailable => None,
            Self::Value(v) => Some(*v),
        }
    }
}

impl FromStr for NaRelInt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keine angabe" | "n/a" | "" => Ok(Self::NotAvailable),
            _ => s.parse().map(Self::Value),
        }
    }
}

impl fmt::Display for NaRelInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAvailable => f.write_str("n/a"),
            Self::Value(v) => v.fmt(f),
        }
    }
}
