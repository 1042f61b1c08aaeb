//! Named fake-value producers.
//!
//! Word pools are small and US-flavoured; the goal is records that look plausible in
//! an inventory/customer API, not locale coverage. Every producer draws from the
//! caller's RNG so a seeded generator yields reproducible records.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas",
    "Sarah", "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty",
    "Mark", "Margaret", "Andrew", "Sandra", "Joshua", "Ashley", "Kevin", "Kimberly", "Brian",
    "Emily", "George", "Donna", "Timothy", "Michelle", "Ronald", "Carol", "Jason", "Amanda",
    "Ryan", "Melissa", "Jacob", "Deborah", "Gary", "Stephanie", "Nicholas", "Rebecca", "Eric",
    "Laura", "Jonathan", "Sharon", "Stephen", "Cynthia", "Larry", "Kathleen", "Justin", "Amy",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris",
    "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King",
    "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson",
    "Baker", "Hall", "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Phillips", "Evans",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Pine", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park", "Main",
    "Sunset", "Highland", "River", "Church", "Spring", "Willow", "Meadow", "Forest", "Ridge",
    "Jefferson", "Lincoln", "Madison", "Franklin", "Chestnut",
];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Way", "Boulevard", "Place", "Terrace",
];

const SECONDARY_UNITS: &[&str] = &["Apt.", "Suite", "Unit"];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Greenville", "Bristol", "Clinton", "Fairview",
    "Salem", "Madison", "Georgetown", "Arlington", "Ashland", "Burlington", "Dover", "Hudson",
    "Kingston", "Milton", "Newport", "Oxford", "Winchester",
];

const STATE_ABBRS: &[&str] = &[
    "AL", "AZ", "CA", "CO", "CT", "FL", "GA", "IL", "IN", "KY", "MA", "MD", "MI", "MN", "MO",
    "NC", "NJ", "NY", "OH", "OR", "PA", "TN", "TX", "VA", "WA", "WI",
];

const COUNTRIES: &[&str] = &[
    "United States", "Canada", "Mexico", "United Kingdom", "Ireland", "Germany", "France",
    "Spain", "Italy", "Netherlands", "Sweden", "Norway", "Japan", "Australia", "New Zealand",
    "Brazil", "Argentina", "India", "South Africa", "Portugal",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "PLC", "and Sons", "Ltd"];

const CATCH_PHRASE_ADJECTIVES: &[&str] = &[
    "Adaptive", "Advanced", "Automated", "Balanced", "Centralized", "Compatible",
    "Configurable", "Cross-platform", "Customizable", "Decentralized", "Digitized",
    "Distributed", "Ergonomic", "Expanded", "Face-to-face", "Focused", "Front-line",
    "Fully-configurable", "Future-proofed", "Innovative", "Integrated", "Intuitive",
    "Managed", "Multi-layered", "Networked", "Optimized", "Organic", "Persistent",
    "Proactive", "Profound", "Reactive", "Robust", "Seamless", "Streamlined", "Synergized",
    "Total", "Universal", "Upgradable", "User-friendly", "Versatile", "Virtual", "Visionary",
];

const CATCH_PHRASE_DESCRIPTORS: &[&str] = &[
    "24/7", "asymmetric", "background", "bandwidth-monitored", "client-driven",
    "client-server", "content-based", "context-sensitive", "dedicated", "demand-driven",
    "dynamic", "encompassing", "executive", "explicit", "fault-tolerant", "global",
    "heuristic", "high-level", "holistic", "homogeneous", "hybrid", "interactive",
    "local", "logistical", "maximized", "mission-critical", "modular", "multimedia",
    "national", "next generation", "optimizing", "real-time", "regional", "scalable",
    "secondary", "stable", "static", "systematic", "tangible", "transitional", "zero-defect",
];

const CATCH_PHRASE_NOUNS: &[&str] = &[
    "ability", "access", "algorithm", "alliance", "analyzer", "application", "approach",
    "architecture", "array", "attitude", "benchmark", "capability", "circuit", "collaboration",
    "complexity", "concept", "core", "database", "definition", "emulation", "encoding",
    "extranet", "firmware", "flexibility", "framework", "function", "groupware", "hardware",
    "hierarchy", "infrastructure", "initiative", "interface", "knowledge user", "leverage",
    "matrix", "methodology", "middleware", "migration", "model", "moderator", "neural-net",
    "open architecture", "paradigm", "policy", "portal", "product", "protocol",
    "service-desk", "software", "solution", "standardization", "strategy", "structure",
    "superstructure", "synergy", "throughput", "toolset", "website", "workforce",
];

const LOREM_WORDS: &[&str] = &[
    "able", "account", "across", "action", "agent", "agree", "also", "among", "analysis",
    "answer", "around", "article", "attention", "author", "available", "average", "beautiful",
    "behavior", "believe", "beyond", "budget", "building", "business", "campaign", "capital",
    "career", "central", "certain", "challenge", "choice", "citizen", "color", "community",
    "concern", "condition", "consider", "culture", "current", "decade", "decision", "degree",
    "design", "detail", "develop", "difference", "direction", "discover", "economy", "effort",
    "energy", "environment", "evening", "evidence", "experience", "factor", "family",
    "feeling", "figure", "financial", "focus", "foreign", "forward", "future", "garden",
    "general", "government", "ground", "growth", "history", "hospital", "image", "improve",
    "include", "industry", "interest", "kitchen", "language", "leader", "letter", "machine",
    "market", "material", "measure", "medical", "memory", "method", "minute", "moment",
    "morning", "nature", "network", "number", "office", "option", "organization", "painting",
    "partner", "pattern", "period", "picture", "player", "popular", "position", "practice",
    "president", "pressure", "process", "produce", "program", "project", "quality",
    "question", "reason", "record", "region", "remain", "report", "research", "resource",
    "response", "result", "science", "season", "series", "service", "similar", "simple",
    "social", "society", "source", "special", "station", "strategy", "structure", "student",
    "subject", "success", "support", "system", "technology", "theory", "thought", "through",
    "together", "tonight", "traditional", "training", "travel", "value", "various", "version",
    "village", "window", "within", "without", "worker", "writer",
];

/// Faker-style producer set over a caller-supplied RNG.
pub struct Faker<R: Rng> {
    rng: R,
}

impl<R: Rng> Faker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Direct access to the underlying RNG for numeric generators.
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    fn pick(&mut self, pool: &'static [&'static str]) -> &'static str {
        pool.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn digits(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect()
    }

    pub fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    pub fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    pub fn name(&mut self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    pub fn email(&mut self) -> String {
        let first = self.first_name().to_lowercase();
        let last = self.last_name().to_lowercase();
        let domain = self.pick(EMAIL_DOMAINS);
        match self.rng.gen_range(0..3) {
            0 => format!("{}.{}@{}", first, last, domain),
            1 => format!("{}{}@{}", &first[..1], last, domain),
            _ => format!("{}{}@{}", first, self.rng.gen_range(1..100), domain),
        }
    }

    pub fn phone_number(&mut self) -> String {
        let area = self.rng.gen_range(201..990);
        let exchange = self.rng.gen_range(200..1000);
        let line = self.digits(4);
        match self.rng.gen_range(0..4) {
            0 => format!("({}) {}-{}", area, exchange, line),
            1 => format!("{}-{}-{}", area, exchange, line),
            2 => format!("+1-{}-{}-{}", area, exchange, line),
            _ => format!("{}.{}.{}x{}", area, exchange, line, self.rng.gen_range(100..1000)),
        }
    }

    pub fn street_address(&mut self) -> String {
        let number = self.rng.gen_range(1..10000);
        let street = self.pick(STREET_NAMES);
        let suffix = self.pick(STREET_SUFFIXES);
        if self.rng.gen_bool(0.25) {
            let unit = self.pick(SECONDARY_UNITS);
            format!(
                "{} {} {} {} {}",
                number,
                street,
                suffix,
                unit,
                self.rng.gen_range(1..1000)
            )
        } else {
            format!("{} {} {}", number, street, suffix)
        }
    }

    pub fn city(&mut self) -> String {
        self.pick(CITIES).to_string()
    }

    pub fn state(&mut self) -> String {
        self.pick(STATE_ABBRS).to_string()
    }

    pub fn postcode(&mut self) -> String {
        self.digits(5)
    }

    pub fn country(&mut self) -> String {
        self.pick(COUNTRIES).to_string()
    }

    /// Two-line postal address; the synthesizer flattens the line break.
    pub fn address(&mut self) -> String {
        let street = self.street_address();
        let city = self.city();
        let state = self.state();
        let postcode = self.postcode();
        format!("{}\n{}, {} {}", street, city, state, postcode)
    }

    pub fn company(&mut self) -> String {
        match self.rng.gen_range(0..3) {
            0 => format!("{} {}", self.last_name(), self.pick(COMPANY_SUFFIXES)),
            1 => format!("{}-{}", self.last_name(), self.last_name()),
            _ => format!(
                "{}, {} and {}",
                self.last_name(),
                self.last_name(),
                self.last_name()
            ),
        }
    }

    pub fn catch_phrase(&mut self) -> String {
        format!(
            "{} {} {}",
            self.pick(CATCH_PHRASE_ADJECTIVES),
            self.pick(CATCH_PHRASE_DESCRIPTORS),
            self.pick(CATCH_PHRASE_NOUNS)
        )
    }

    pub fn word(&mut self) -> String {
        self.pick(LOREM_WORDS).to_string()
    }

    pub fn sentence(&mut self) -> String {
        let count = self.rng.gen_range(4..11);
        let words: Vec<&str> = (0..count).map(|_| self.pick(LOREM_WORDS)).collect();
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    pub fn paragraph(&mut self) -> String {
        let count = self.rng.gen_range(3..7);
        (0..count)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn boolean(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// ISO date within roughly the last three years.
    pub fn date(&mut self) -> String {
        let days_back = self.rng.gen_range(0..1095);
        (Utc::now().date_naive() - Duration::days(days_back))
            .format("%Y-%m-%d")
            .to_string()
    }
}
