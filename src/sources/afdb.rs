use crate::catalog::ReferenceTable;

use super::{SourceProfile, text_rows};

/// Reference-only: the bank publishes no indicator API this crate can use.
pub(super) fn profile() -> SourceProfile {
    SourceProfile::new("afdb", "African Development Bank").with_reference(
        ReferenceTable::new()
            .with_topic(
                "economy",
                text_rows(
                    Some("2025"),
                    &[
                        (
                            "Infrastructure Development Fund (Infrastructure, Active)",
                            "$450 million",
                            "USD",
                        ),
                        ("Private Sector Support (Finance, Active)", "$180 million", "USD"),
                        ("Energy Access Program (Energy, Planning)", "$320 million", "USD"),
                    ],
                ),
            )
            .with_topic(
                "agriculture",
                text_rows(
                    Some("2025"),
                    &[
                        (
                            "Agricultural Transformation (Agriculture, Active)",
                            "$285 million",
                            "USD",
                        ),
                        ("Climate Resilience Fund (Climate, Active)", "$150 million", "USD"),
                    ],
                ),
            ),
    )
}
