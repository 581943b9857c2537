//! Naive keyword intent extraction.
//!
//! Messages arrive in French, English or Spanish. Text is lowercased, accents
//! are folded and the result is split into words; categories match whole
//! words (plural `s`/`x` tolerated), zones and dates match word sequences.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::knowledge::{KnowledgeKind, KnowledgeQuery, MAX_KNOWLEDGE_ITEMS};

/// What the user is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Restaurant,
    BeachClub,
    Nightclub,
    Bar,
    Spa,
    Hotel,
    Event,
    Yacht,
    Chauffeur,
    Villa,
    PrivateChef,
    PrivateJet,
}

impl Category {
    /// All categories, in matching order.
    pub const ALL: [Category; 12] = [
        Category::Restaurant,
        Category::BeachClub,
        Category::Nightclub,
        Category::Bar,
        Category::Spa,
        Category::Hotel,
        Category::Event,
        Category::Yacht,
        Category::Chauffeur,
        Category::Villa,
        Category::PrivateChef,
        Category::PrivateJet,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Restaurant => &[
                "restaurant", "resto", "diner", "dinner", "dejeuner", "lunch", "manger", "eat",
                "comer", "cena", "sushi", "japonais", "japanese", "italien", "italian",
                "gastronomique", "tapas",
            ],
            Category::BeachClub => &["beach", "plage", "playa", "chiringuito", "beachclub"],
            Category::Nightclub => &["nightclub", "discotheque", "boite", "discoteca", "clubbing"],
            Category::Bar => &["bar", "cocktail", "rooftop", "lounge"],
            Category::Spa => &["spa", "massage", "hammam", "wellness"],
            Category::Hotel => &["hotel", "suite"],
            Category::Event => &[
                "event", "evenement", "concert", "soiree", "party", "fete", "festival", "gala",
                "fiesta", "dj",
            ],
            Category::Yacht => &["yacht", "bateau", "boat", "barco", "catamaran"],
            Category::Chauffeur => &[
                "chauffeur", "driver", "transfer", "transfert", "limousine", "taxi", "voiture",
            ],
            Category::Villa => &["villa"],
            Category::PrivateChef => &["chef"],
            Category::PrivateJet => &["jet", "helicoptere", "helicopter", "avion"],
        }
    }

    /// Which table the category lives in.
    pub fn kind(&self) -> KnowledgeKind {
        match self {
            Category::Restaurant
            | Category::BeachClub
            | Category::Nightclub
            | Category::Bar
            | Category::Spa
            | Category::Hotel => KnowledgeKind::Establishment,
            Category::Event => KnowledgeKind::Event,
            Category::Yacht
            | Category::Chauffeur
            | Category::Villa
            | Category::PrivateChef
            | Category::PrivateJet => KnowledgeKind::Service,
        }
    }

    /// Substring matched against the store's category column.
    ///
    /// Events are not filtered by category.
    pub fn store_category(&self) -> Option<&'static str> {
        match self {
            Category::Restaurant => Some("restaurant"),
            Category::BeachClub => Some("beach"),
            Category::Nightclub => Some("nightclub"),
            Category::Bar => Some("bar"),
            Category::Spa => Some("spa"),
            Category::Hotel => Some("hotel"),
            Category::Event => None,
            Category::Yacht => Some("yacht"),
            Category::Chauffeur => Some("chauffeur"),
            Category::Villa => Some("villa"),
            Category::PrivateChef => Some("chef"),
            Category::PrivateJet => Some("jet"),
        }
    }

    fn matches(&self, words: &[String]) -> bool {
        self.keywords().iter().any(|kw| {
            words.iter().any(|word| {
                word == kw
                    || word
                        .strip_prefix(kw)
                        .map(|rest| rest == "s" || rest == "x")
                        .unwrap_or(false)
            })
        })
    }
}

/// A known Marbella area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    /// Canonical name as stored in the zone column.
    pub name: &'static str,
    aliases: &'static [&'static str],
}

const ZONES: &[Zone] = &[
    Zone { name: "Puerto Banús", aliases: &["puerto banus", "banus"] },
    Zone { name: "Golden Mile", aliases: &["golden mile", "milla de oro", "mille d or"] },
    Zone { name: "Nueva Andalucía", aliases: &["nueva andalucia"] },
    Zone { name: "San Pedro", aliases: &["san pedro"] },
    Zone { name: "Estepona", aliases: &["estepona"] },
    Zone { name: "Benahavís", aliases: &["benahavis"] },
    Zone { name: "Sierra Blanca", aliases: &["sierra blanca"] },
    Zone { name: "Casco Antiguo", aliases: &["casco antiguo", "old town", "vieille ville"] },
    Zone { name: "Elviria", aliases: &["elviria"] },
    Zone { name: "La Zagaleta", aliases: &["zagaleta"] },
];

impl Zone {
    /// All known zones.
    pub fn all() -> &'static [Zone] {
        ZONES
    }
}

/// Inclusive date range; `to: None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// A single day.
    pub fn on(day: NaiveDate) -> Self {
        Self {
            from: day,
            to: Some(day),
        }
    }

    /// Everything from `day` on.
    pub fn starting(day: NaiveDate) -> Self {
        Self { from: day, to: None }
    }
}

const TODAY_PHRASES: &[&str] = &["aujourd hui", "today", "hoy", "ce soir", "tonight", "esta noche"];
const TOMORROW_PHRASES: &[&str] = &["demain", "tomorrow", "manana"];
const WEEKEND_PHRASES: &[&str] = &["weekend", "week end", "fin de semana"];

/// Categories, zone and date extracted from a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Intent {
    pub categories: Vec<Category>,
    pub zone: Option<Zone>,
    pub dates: Option<DateRange>,
}

impl Intent {
    /// Extract an intent from free text, resolving relative dates against `today`.
    pub fn extract(text: &str, today: NaiveDate) -> Self {
        let words = words(text);
        let padded = format!(" {} ", words.join(" "));
        let has_phrase = |phrase: &&str| padded.contains(&format!(" {} ", phrase));

        let categories = Category::ALL
            .iter()
            .copied()
            .filter(|category| category.matches(&words))
            .collect();

        let zone = ZONES
            .iter()
            .find(|zone| zone.aliases.iter().any(has_phrase))
            .copied();

        let dates = if TODAY_PHRASES.iter().any(has_phrase) {
            Some(DateRange::on(today))
        } else if TOMORROW_PHRASES.iter().any(has_phrase) {
            Some(DateRange::on(today + Duration::days(1)))
        } else if WEEKEND_PHRASES.iter().any(has_phrase) {
            Some(weekend_of(today))
        } else {
            None
        };

        Self {
            categories,
            zone,
            dates,
        }
    }

    /// True when nothing was recognized.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.zone.is_none() && self.dates.is_none()
    }

    /// Store queries for this intent, in lookup order.
    ///
    /// Events never reach into the past: without an explicit date they start
    /// at `today`. A zone alone queries establishments; a date alone queries
    /// events.
    pub fn queries(&self, today: NaiveDate) -> Vec<KnowledgeQuery> {
        let zone = self.zone.map(|z| z.name.to_string());

        if self.categories.is_empty() {
            if self.dates.is_some() {
                return vec![KnowledgeQuery {
                    kind: KnowledgeKind::Event,
                    category: None,
                    zone,
                    dates: self.dates,
                    limit: MAX_KNOWLEDGE_ITEMS,
                }];
            }
            if zone.is_some() {
                return vec![KnowledgeQuery {
                    kind: KnowledgeKind::Establishment,
                    category: None,
                    zone,
                    dates: None,
                    limit: MAX_KNOWLEDGE_ITEMS,
                }];
            }
            return Vec::new();
        }

        self.categories
            .iter()
            .map(|category| {
                let kind = category.kind();
                let dates = match kind {
                    KnowledgeKind::Event => Some(self.dates.unwrap_or(DateRange::starting(today))),
                    _ => None,
                };
                KnowledgeQuery {
                    kind,
                    category: category.store_category().map(str::to_string),
                    zone: zone.clone(),
                    dates,
                    limit: MAX_KNOWLEDGE_ITEMS,
                }
            })
            .collect()
    }
}

/// Saturday through Sunday of the current week; Sunday alone if today is Sunday.
fn weekend_of(today: NaiveDate) -> DateRange {
    if today.weekday() == Weekday::Sun {
        return DateRange::on(today);
    }
    let days_to_saturday = 5 - i64::from(today.weekday().num_days_from_monday());
    let saturday = today + Duration::days(days_to_saturday);
    DateRange {
        from: saturday,
        to: Some(saturday + Duration::days(1)),
    }
}

fn fold(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'á' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' | 'í' => 'i',
        'ô' | 'ö' | 'ó' => 'o',
        'ù' | 'û' | 'ü' | 'ú' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(fold)
        .collect::<String>()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
