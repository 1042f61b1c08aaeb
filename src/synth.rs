//! Payload Synthesis
//!
//! Turns a declarative field map into one concrete JSON record per call. Each field's
//! [`GeneratorKind`] selects a producer; textual values are flattened to one line so
//! addresses and paragraphs stay single-line in the request body.

use crate::config::FieldMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use tracing::warn;

pub mod faker;
pub mod kind;
pub mod unique;

pub use faker::Faker;
pub use kind::GeneratorKind;
pub use unique::UniqueValues;

/// One generated record: field name to value, in field-map order.
pub type Payload = Map<String, Value>;

/// Upper bound for the `int` generator (inclusive).
pub const INT_MAX: i64 = 1000;

/// Attempts at drawing a fresh unique value before falling back to a suffix.
const UNIQUE_DRAW_LIMIT: usize = 1000;

/// Produces payloads from field maps.
pub struct PayloadSynthesizer<R: Rng = StdRng> {
    faker: Faker<R>,
}

impl PayloadSynthesizer<StdRng> {
    /// Seeded when `seed` is given, otherwise seeded from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> PayloadSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            faker: Faker::new(rng),
        }
    }

    /// Synthesize one record for `fields`.
    pub fn synthesize(&mut self, fields: &FieldMap, unique: &mut UniqueValues) -> Payload {
        self.synthesize_with_overrides(fields, &Payload::new(), unique)
    }

    /// Synthesize one record, taking values from `overrides` for the fields it names.
    ///
    /// Overrides only apply to fields the map declares; extra override keys are ignored.
    pub fn synthesize_with_overrides(
        &mut self,
        fields: &FieldMap,
        overrides: &Payload,
        unique: &mut UniqueValues,
    ) -> Payload {
        let mut payload = Payload::new();
        for field in fields.iter() {
            let value = match overrides.get(&field.name) {
                Some(value) => value.clone(),
                None => self.generate(&field.generator, unique),
            };
            payload.insert(field.name.clone(), value);
        }
        payload
    }

    /// Produce a single value for `kind`.
    pub fn generate(&mut self, kind: &GeneratorKind, unique: &mut UniqueValues) -> Value {
        match kind {
            GeneratorKind::Int => json!(self.faker.rng().gen_range(0..=INT_MAX)),
            GeneratorKind::Price => json!(self.price()),
            GeneratorKind::Sku => Value::String(self.sku()),
            GeneratorKind::Boolean => Value::Bool(self.faker.boolean()),
            GeneratorKind::UniqueEmail => Value::String(self.unique_email(kind, unique)),
            GeneratorKind::Unknown(tag) => {
                warn!(generator = %tag, "No generator registered for tag, using placeholder");
                Value::String(unknown_placeholder(tag))
            }
            other => Value::String(collapse_line_breaks(&self.text(other))),
        }
    }

    fn text(&mut self, kind: &GeneratorKind) -> String {
        let faker = &mut self.faker;
        match kind {
            GeneratorKind::FirstName => faker.first_name(),
            GeneratorKind::LastName => faker.last_name(),
            GeneratorKind::Name => faker.name(),
            GeneratorKind::Email => faker.email(),
            GeneratorKind::PhoneNumber => faker.phone_number(),
            GeneratorKind::Address => faker.address(),
            GeneratorKind::StreetAddress => faker.street_address(),
            GeneratorKind::City => faker.city(),
            GeneratorKind::State => faker.state(),
            GeneratorKind::Postcode => faker.postcode(),
            GeneratorKind::Country => faker.country(),
            GeneratorKind::Company => faker.company(),
            GeneratorKind::CatchPhrase => faker.catch_phrase(),
            GeneratorKind::Word => faker.word(),
            GeneratorKind::Sentence => faker.sentence(),
            GeneratorKind::Paragraph => faker.paragraph(),
            GeneratorKind::Date => faker.date(),
            // Non-text kinds are handled in `generate`.
            GeneratorKind::UniqueEmail
            | GeneratorKind::Int
            | GeneratorKind::Price
            | GeneratorKind::Sku
            | GeneratorKind::Boolean
            | GeneratorKind::Unknown(_) => String::new(),
        }
    }

    /// Two two-digit draws combined as `whole + cents / 100`, always below 100.
    fn price(&mut self) -> f64 {
        let rng = self.faker.rng();
        let whole = rng.gen_range(0..100u32);
        let cents = rng.gen_range(0..100u32);
        round_cents(f64::from(whole) + f64::from(cents) / 100.0)
    }

    fn sku(&mut self) -> String {
        let rng = self.faker.rng();
        let letters: String = (0..4)
            .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
            .collect();
        let digits: String = (0..4)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        format!("{}-{}", letters, digits)
    }

    fn unique_email(&mut self, kind: &GeneratorKind, unique: &mut UniqueValues) -> String {
        let scope = kind.tag();
        for _ in 0..UNIQUE_DRAW_LIMIT {
            let candidate = self.faker.email();
            if unique.claim(scope, &candidate) {
                return candidate;
            }
        }
        // Pool exhausted for this batch; disambiguate the local part instead.
        let base = self.faker.email();
        let (local, domain) = base.split_once('@').unwrap_or((base.as_str(), "example.com"));
        let mut suffix = unique.len();
        loop {
            let candidate = format!("{}{}@{}", local, suffix, domain);
            if unique.claim(scope, &candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Replace embedded line breaks with `", "`.
pub fn collapse_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .collect::<Vec<_>>()
        .join(", ")
}

/// Visible stand-in for a field whose generator tag is not recognised.
pub fn unknown_placeholder(tag: &str) -> String {
    format!("<unknown generator: {}>", tag)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
