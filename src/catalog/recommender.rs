use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

use super::product::{Product, ProductSummary};

/// Filters `products` by season and skin type, ranks them, then samples from
/// the top of the ranking.
///
/// A product matches when its tag text contains the query term as a whole
/// word, ignoring case. Survivors are ordered by rating (high first), then
/// price (low first), with missing values last. The first `pool` of those
/// form the pool and `min(pool, sample)` products are drawn from it without
/// replacement. With a `seed` the draw is reproducible.
pub fn recommend(
    products: &[Product],
    season: &str,
    skin_type: &str,
    pool: usize,
    sample: usize,
    seed: Option<u64>,
) -> Vec<ProductSummary> {
    match seed {
        Some(seed) => recommend_with_rng(
            products,
            season,
            skin_type,
            pool,
            sample,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => recommend_with_rng(products, season, skin_type, pool, sample, &mut rand::rng()),
    }
}

pub fn recommend_with_rng<R: Rng + ?Sized>(
    products: &[Product],
    season: &str,
    skin_type: &str,
    pool: usize,
    sample: usize,
    rng: &mut R,
) -> Vec<ProductSummary> {
    let season = season.trim();
    let skin_type = skin_type.trim();

    let mut matches: Vec<&Product> = products
        .iter()
        .filter(|p| contains_word(p.seasons.trim(), season))
        .filter(|p| contains_word(p.skin_types.trim(), skin_type))
        .collect();

    // sort_by is stable, so equal rows keep catalog order.
    matches.sort_by(|a, b| {
        descending_missing_last(a.rating, b.rating)
            .then_with(|| ascending_missing_last(a.price, b.price))
    });
    matches.truncate(pool);

    let k = matches.len().min(sample);
    tracing::debug!(
        season,
        skin_type,
        pool = matches.len(),
        sampled = k,
        "Catalog query"
    );

    matches
        .into_iter()
        .choose_multiple(rng, k)
        .into_iter()
        .map(Product::summary)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_boundary(before: Option<char>, after: Option<char>) -> bool {
    before.is_some_and(is_word_char) != after.is_some_and(is_word_char)
}

/// Case-insensitive search for `term` delimited by word boundaries on both
/// sides, the way a regex `\bterm\b` matches.
pub fn contains_word(text: &str, term: &str) -> bool {
    let text = text.to_lowercase();
    let term = term.to_lowercase();

    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .filter(|&start| text[start..].starts_with(&term))
        .any(|start| {
            let end = start + term.len();
            is_boundary(text[..start].chars().next_back(), text[start..].chars().next())
                && is_boundary(text[..end].chars().next_back(), text[end..].chars().next())
        })
}

fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn ascending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
