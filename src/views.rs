use serde::Deserialize;

/// Outcome of parsing a view-count phrase.
///
/// Parsing is best-effort: callers that only want a number use
/// [`ViewParse::count`], which resolves every miss to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewParse {
    /// No phrase was found.
    Empty,
    Parsed(u128),
    /// A phrase was found but its number could not be read.
    Unparsed,
}

impl ViewParse {
    pub fn count(self) -> u128 {
        match self {
            ViewParse::Parsed(n) => n,
            ViewParse::Empty | ViewParse::Unparsed => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Unit {
    pub symbol: String,
    pub multiplier: u64,
}

/// Tokens surrounding a view count, e.g. `觀看次數：1.2萬次`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewLocale {
    pub prefix: String,
    pub suffix: String,
    pub separators: Vec<String>,
    /// Checked in order, first symbol present wins.
    pub units: Vec<Unit>,
}

impl Default for ViewLocale {
    fn default() -> Self {
        Self {
            prefix: "觀看次數：".to_string(),
            suffix: "次".to_string(),
            separators: vec![",".to_string()],
            units: vec![
                Unit {
                    symbol: "萬".to_string(),
                    multiplier: 10_000,
                },
                Unit {
                    symbol: "億".to_string(),
                    multiplier: 100_000_000,
                },
            ],
        }
    }
}

impl ViewLocale {
    /// Regex source matching a whole view phrase with this locale's tokens.
    pub fn phrase_pattern(&self) -> String {
        let mut class = String::from(r"\d.");
        for token in self.separators.iter().chain(self.units.iter().map(|u| &u.symbol)) {
            class.push_str(&regex::escape(token));
        }
        format!(
            "{}[{}]+{}",
            regex::escape(&self.prefix),
            class,
            regex::escape(&self.suffix)
        )
    }

    pub fn parse(&self, text: &str) -> ViewParse {
        if text.is_empty() {
            return ViewParse::Empty;
        }

        let mut number = text.replace(&self.prefix, "").replace(&self.suffix, "");
        for sep in &self.separators {
            number = number.replace(sep.as_str(), "");
        }

        let mut multiplier = 1u64;
        if let Some(unit) = self.units.iter().find(|u| number.contains(&u.symbol)) {
            multiplier = unit.multiplier;
            number = number.replace(&unit.symbol, "");
        }

        match number.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => {
                ViewParse::Parsed((value * multiplier as f64) as u128)
            }
            _ => ViewParse::Unparsed,
        }
    }
}

/// Parses a view-count phrase with the default locale, resolving misses to zero.
pub fn parse_views(text: &str) -> u128 {
    ViewLocale::default().parse(text).count()
}
