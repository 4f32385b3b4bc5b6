use serde::{Deserialize, Deserializer, Serialize};

/// One row of the product catalog.
///
/// Keys accept both the short names and the spreadsheet column headers the
/// catalog is usually exported with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "Brand Name")]
    pub brand: String,
    #[serde(alias = "Product Name")]
    pub name: String,
    #[serde(default, alias = "Price", deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, alias = "Ratings", deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    /// Comma-separated season tags, e.g. `"all seasons, Summer"`.
    #[serde(default, alias = "Suitable for which weather")]
    pub seasons: String,
    #[serde(default, alias = "Use for which Skin Type")]
    pub skin_types: String,
}

impl Product {
    pub fn new(brand: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            name: name.into(),
            price: None,
            rating: None,
            seasons: String::new(),
            skin_types: String::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_tags(mut self, seasons: impl Into<String>, skin_types: impl Into<String>) -> Self {
        self.seasons = seasons.into();
        self.skin_types = skin_types.into();
        self
    }

    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            brand: self.brand.clone(),
            name: self.name.clone(),
            price: self.price,
            rating: self.rating,
        }
    }
}

/// What a recommendation returns for each product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub brand: String,
    pub name: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

/// Numbers or numeric strings; anything unparseable becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNumber::Number(n)) if n.is_finite() => Some(n),
        Some(RawNumber::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}
