use crate::catalog::ReferenceTable;

use super::{PatternSpec, ScrapeConfig, SourceProfile, text_rows};

pub(super) fn profile() -> SourceProfile {
    SourceProfile::new("imf", "IMF")
        .with_scrape(
            ScrapeConfig::new(&[
                "https://www.imf.org/en/Countries/{iso3}",
                "https://www.imf.org/external/datamapper/profile/{iso3}",
            ])
            .with_patterns(patterns()),
        )
        .with_reference(reference())
}

fn patterns() -> Vec<PatternSpec> {
    vec![
        PatternSpec::new(
            "GDP Related Metric",
            r"GDP[^.]{0,80}?(\d+(?:\.\d+)?\s*(?:billion|million|%|percent))",
        )
        .for_topics(&["economy"]),
        PatternSpec::new(
            "Inflation Related Metric",
            r"inflation[^.]{0,80}?(\d+(?:\.\d+)?)\s*(?:percent|%)",
        )
        .for_topics(&["economy"])
        .unit("percent"),
        PatternSpec::new(
            "Growth Related Metric",
            r"growth[^.]{0,80}?(\d+(?:\.\d+)?)\s*(?:percent|%)",
        )
        .for_topics(&["economy"])
        .unit("percent"),
        PatternSpec::new(
            "Debt Related Metric",
            r"debt[^.]{0,80}?(\d+(?:\.\d+)?\s*(?:percent|%|billion))",
        )
        .for_topics(&["economy"]),
        PatternSpec::new(
            "Unemployment Related Metric",
            r"unemployment[^.]{0,80}?(\d+(?:\.\d+)?)\s*(?:percent|%)",
        )
        .for_topics(&["population", "economy"])
        .unit("percent"),
    ]
    .into_iter()
    .chain(catch_all())
    .collect()
}

/// Any percentage or money figure, for topics the named patterns skip.
fn catch_all() -> Vec<PatternSpec> {
    [
        ("Population Metric", "population"),
        ("Health Metric", "health"),
        ("Education Metric", "education"),
        ("Agriculture Metric", "agriculture"),
        ("Mining Metric", "mining"),
    ]
    .into_iter()
    .map(|(label, topic)| {
        PatternSpec::new(
            label,
            r"(\d+(?:\.\d+)?)\s*(?:percent|%|billion|million|USD|\$)",
        )
        .for_topics(&[topic])
    })
    .collect()
}

fn reference() -> ReferenceTable {
    ReferenceTable::new()
        .with_topic(
            "economy",
            text_rows(
                Some("2024"),
                &[
                    ("IMF GDP Growth Forecast", "4.2% (2024)", "percent"),
                    ("IMF Inflation Projection", "8.5% (2024)", "percent"),
                    ("Current Account Balance", "-3.2% of GDP", "percent of GDP"),
                    ("Government Debt", "132.8% of GDP", "percent of GDP"),
                ],
            ),
        )
        .with_topic(
            "population",
            text_rows(
                Some("2024"),
                &[
                    ("IMF Population Estimate", "19.6 million", "people"),
                    ("Labor Force", "7.2 million", "people"),
                    ("Unemployment Rate", "12.9%", "percent"),
                ],
            ),
        )
        .with_topic(
            "health",
            text_rows(
                Some("2025"),
                &[
                    ("Health Expenditure (% GDP)", "4.8%", "percent of GDP"),
                    ("Public Health Spending", "2.1%", "percent of GDP"),
                ],
            ),
        )
}
