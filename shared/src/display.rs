//! Formatting helpers shared by every renderer

use crate::models::TopPairEntry;

/// Zone label for ranked rows without a zone
pub const MULTI_REGION: &str = "Multi-Region";

/// "drought_tolerance" -> "Drought Tolerance"
pub fn format_trait_name(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score as a one-decimal percentage
pub fn format_score(score: f64) -> String {
    format!("{:.1}%", score)
}

/// Zone column of the ranked list
pub fn zone_label(entry: &TopPairEntry) -> &str {
    match entry.zone.as_deref() {
        Some(zone) if !zone.is_empty() => zone,
        _ => MULTI_REGION,
    }
}

/// One line summary of a ranked row, rank is 1-based
pub fn top_pair_line(rank: usize, entry: &TopPairEntry) -> String {
    let mut line = format!(
        "#{} {} + {}  {}  [{}]",
        rank,
        entry.plant_a.as_deref().unwrap_or("?"),
        entry.plant_b.as_deref().unwrap_or("?"),
        format_score(entry.score.unwrap_or(0.0)),
        zone_label(entry)
    );
    if let Some(future) = entry.future_score.filter(|_| entry.is_improving()) {
        line.push_str(&format!("  -> {}", format_score(future)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_trait_name() {
        assert_eq!(format_trait_name("drought_tolerance"), "Drought Tolerance");
        assert_eq!(format_trait_name("pathogen_alert"), "Pathogen Alert");
        assert_eq!(format_trait_name("water"), "Water");
        assert_eq!(format_trait_name(""), "");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(87.34), "87.3%");
        assert_eq!(format_score(0.0), "0.0%");
    }

    #[test]
    fn test_zone_label_fallback() {
        let mut entry = TopPairEntry::default();
        assert_eq!(zone_label(&entry), MULTI_REGION);
        entry.zone = Some(String::new());
        assert_eq!(zone_label(&entry), MULTI_REGION);
        entry.zone = Some("Sahara".into());
        assert_eq!(zone_label(&entry), "Sahara");
    }

    #[test]
    fn test_top_pair_line() {
        let entry = TopPairEntry {
            plant_a: Some("Triticum".into()),
            plant_b: Some("Trifolium".into()),
            score: Some(88.0),
            future_score: Some(90.5),
            ..Default::default()
        };
        assert_eq!(
            top_pair_line(1, &entry),
            "#1 Triticum + Trifolium  88.0%  [Multi-Region]  -> 90.5%"
        );
    }
}
