use crate::core::models::Category;

/// Assigns a report category to an expense from its description.
///
/// Purely cosmetic: categories only feed the report breakdown and never
/// affect settlement.
pub trait Classifier: Send + Sync {
    fn classify(&self, description: &str) -> Category;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> Category + Send + Sync,
{
    fn classify(&self, description: &str) -> Category {
        self(description)
    }
}

/// First-match keyword lookup over the lowercased words of a description.
#[derive(Clone, Debug)]
pub struct KeywordClassifier {
    rules: Vec<(Category, Vec<String>)>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        KeywordClassifier { rules: Vec::new() }
    }

    /// Adds a rule; earlier rules win when several match.
    pub fn with_rule<I, S>(mut self, category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self.rules.push((category, keywords));
        self
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        KeywordClassifier::new()
            .with_rule(
                Category::Groceries,
                ["supermarket", "supermercado", "groceries", "mercado", "market"],
            )
            .with_rule(
                Category::Food,
                [
                    "dinner", "lunch", "breakfast", "restaurant", "pizza", "coffee", "cena", "almuerzo",
                    "desayuno", "comida", "restaurante", "café",
                ],
            )
            .with_rule(
                Category::Transport,
                [
                    "taxi", "uber", "bus", "train", "fuel", "parking", "gasolina", "tren",
                    "peaje", "vuelo", "flight",
                ],
            )
            .with_rule(
                Category::Lodging,
                ["hotel", "hostel", "airbnb", "rent", "alquiler", "hospedaje"],
            )
            .with_rule(
                Category::Entertainment,
                ["cinema", "movie", "concert", "tickets", "cine", "concierto", "entradas", "museo", "museum"],
            )
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, description: &str) -> Category {
        let text = description.to_lowercase();
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| words.contains(&k.as_str())))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}
