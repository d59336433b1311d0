//! Search result formatting

use super::Symbols;
use crate::services::SearchResult;

/// Format search results, numbered by the position `add` accepts
pub fn format_search_results(results: &[SearchResult], symbols: Symbols<'_>) -> String {
    if results.is_empty() {
        return "No products found.".to_string();
    }

    let mut output = String::from("Search Results:\n");
    for result in results {
        output.push_str(&format!("{:>3}. {}\n", result.position, result.description));
        output.push_str(&format!(
            "     Price: {}\n",
            symbols.price_pair(result.price_source, result.price_normalized)
        ));
        output.push_str(&format!("     Brand: {}\n", result.brand));
        if let Some(image) = &result.image_url {
            output.push_str(&format!("     Image: {}\n", image));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_results_are_numbered() {
        let results = vec![SearchResult {
            position: 1,
            description: "Whole milk".into(),
            price_source: Money::from_decimal(1000.0),
            price_normalized: Money::from_cents(194),
            brand: "Dos Pinos".into(),
            image_url: Some("https://img/milk.png".into()),
        }];

        let output = format_search_results(&results, Symbols::default());

        assert!(output.contains("  1. Whole milk\n"));
        assert!(output.contains("Price: ₡1000.00 ($1.94)"));
        assert!(output.contains("Image: https://img/milk.png"));
    }

    #[test]
    fn test_no_results() {
        assert_eq!(
            format_search_results(&[], Symbols::default()),
            "No products found."
        );
    }
}
