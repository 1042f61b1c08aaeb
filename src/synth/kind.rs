//! Generator kinds: the closed set of value-production strategies a field can name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value-production strategy selected by a field's generator tag.
///
/// Parsing is total: a tag that names nothing known becomes [`GeneratorKind::Unknown`]
/// and still produces a (sentinel) value, so one bad field never aborts a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeneratorKind {
    FirstName,
    LastName,
    Name,
    Email,
    UniqueEmail,
    PhoneNumber,
    Address,
    StreetAddress,
    City,
    State,
    Postcode,
    Country,
    Company,
    CatchPhrase,
    Word,
    Sentence,
    Paragraph,
    Boolean,
    Date,
    /// Uniform integer in [0, 1000]
    Int,
    /// Retail-style price under 100 with two decimals
    Price,
    /// `ABCD-1234`
    Sku,
    Unknown(String),
}

impl GeneratorKind {
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "first_name" => GeneratorKind::FirstName,
            "last_name" => GeneratorKind::LastName,
            "name" => GeneratorKind::Name,
            "email" => GeneratorKind::Email,
            "unique_email" | "unique.email" => GeneratorKind::UniqueEmail,
            "phone_number" => GeneratorKind::PhoneNumber,
            "address" => GeneratorKind::Address,
            "street_address" => GeneratorKind::StreetAddress,
            "city" => GeneratorKind::City,
            "state" | "state_abbr" => GeneratorKind::State,
            "postcode" | "zipcode" => GeneratorKind::Postcode,
            "country" => GeneratorKind::Country,
            "company" => GeneratorKind::Company,
            "catch_phrase" => GeneratorKind::CatchPhrase,
            "word" => GeneratorKind::Word,
            "sentence" => GeneratorKind::Sentence,
            "paragraph" => GeneratorKind::Paragraph,
            "boolean" => GeneratorKind::Boolean,
            "date" => GeneratorKind::Date,
            "int" => GeneratorKind::Int,
            "price" => GeneratorKind::Price,
            "sku" => GeneratorKind::Sku,
            other => GeneratorKind::Unknown(other.to_string()),
        }
    }

    /// Canonical tag for this kind.
    pub fn tag(&self) -> &str {
        match self {
            GeneratorKind::FirstName => "first_name",
            GeneratorKind::LastName => "last_name",
            GeneratorKind::Name => "name",
            GeneratorKind::Email => "email",
            GeneratorKind::UniqueEmail => "unique_email",
            GeneratorKind::PhoneNumber => "phone_number",
            GeneratorKind::Address => "address",
            GeneratorKind::StreetAddress => "street_address",
            GeneratorKind::City => "city",
            GeneratorKind::State => "state",
            GeneratorKind::Postcode => "postcode",
            GeneratorKind::Country => "country",
            GeneratorKind::Company => "company",
            GeneratorKind::CatchPhrase => "catch_phrase",
            GeneratorKind::Word => "word",
            GeneratorKind::Sentence => "sentence",
            GeneratorKind::Paragraph => "paragraph",
            GeneratorKind::Boolean => "boolean",
            GeneratorKind::Date => "date",
            GeneratorKind::Int => "int",
            GeneratorKind::Price => "price",
            GeneratorKind::Sku => "sku",
            GeneratorKind::Unknown(tag) => tag,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, GeneratorKind::Unknown(_))
    }
}

impl From<String> for GeneratorKind {
    fn from(tag: String) -> Self {
        GeneratorKind::parse(&tag)
    }
}

impl From<&str> for GeneratorKind {
    fn from(tag: &str) -> Self {
        GeneratorKind::parse(tag)
    }
}

impl From<GeneratorKind> for String {
    fn from(kind: GeneratorKind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
