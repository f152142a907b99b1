use crate::catalog::ReferenceTable;

use super::{SourceProfile, number_rows};

pub(super) fn profile() -> SourceProfile {
    SourceProfile::new("zambia_stats", "Zambia Statistics Agency").with_reference(
        ReferenceTable::new()
            .with_topic(
                "population",
                number_rows(&[
                    ("Total Population (Census projection)", 20_218_000.0, "people", "Q1 2025"),
                    ("Households", 4_680_000.0, "households", "Q1 2025"),
                    ("Average Household Size", 4.3, "people", "Q1 2025"),
                ]),
            )
            .with_topic(
                "economy",
                number_rows(&[
                    ("GDP (Kwacha billions)", 892.4, "ZMW billion", "Q4 2024"),
                    ("Inflation Rate", 8.2, "percent", "Q1 2025"),
                    ("Exchange Rate (ZMW/USD)", 26.8, "ZMW", "Q1 2025"),
                    ("Interest Rate (Policy)", 12.5, "percent", "Q1 2025"),
                ]),
            )
            .with_topic(
                "mining",
                number_rows(&[
                    ("Copper Production (tonnes)", 785_432.0, "tonnes", "Q4 2024"),
                    ("Mining Employment", 91_500.0, "jobs", "Q1 2025"),
                    ("Mining GDP Contribution", 12.3, "percent", "Q4 2024"),
                ]),
            ),
    )
}
