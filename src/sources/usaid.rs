use crate::catalog::ReferenceTable;

use super::{PatternSpec, ScrapeConfig, SourceProfile, text_rows};

pub(super) fn profile() -> SourceProfile {
    SourceProfile::new("usaid", "USAID")
        .with_scrape(
            ScrapeConfig::new(&[
                "https://www.usaid.gov/{country}",
                "https://www.usaid.gov/{country}/fact-sheets",
            ])
            .with_global_keywords(&["usaid", "program", "beneficiaries"])
            .with_patterns(patterns()),
        )
        .with_reference(reference())
}

// Program patterns read the same whatever the topic, so no topic filter.
// Sector patterns pick up counts mentioned after the sector's own name.
fn patterns() -> Vec<PatternSpec> {
    let sectors = [
        ("Health Related Metric", "health"),
        ("Education Related Metric", "education"),
        ("Agriculture Related Metric", "agriculture"),
    ]
    .into_iter()
    .map(|(label, topic)| {
        PatternSpec::new(label, format!(r"{topic}[^.]*?(\d+(?:,\d{{3}})*)")).for_topics(&[topic])
    });

    vec![
        PatternSpec::new(
            "USAID Funding Amount",
            r"\$(\d+(?:,\d{3})*(?:\.\d+)?\s*(?:million|billion))",
        )
        .value_prefix("$")
        .unit("USD"),
        PatternSpec::new(
            "USAID Program Reach",
            r"(\d+(?:,\d{3})*)\s*(?:beneficiaries|people|children|students)",
        ),
        PatternSpec::new(
            "USAID Program Count",
            r"(\d+(?:,\d{3})*)\s*(?:programs?|projects?|schools?|clinics?)",
        ),
    ]
    .into_iter()
    .chain(sectors)
    .collect()
}

fn reference() -> ReferenceTable {
    let years = Some("2023-2024");
    ReferenceTable::new()
        .with_topic(
            "health",
            text_rows(
                years,
                &[
                    ("USAID Health Program (HIV/AIDS, Malaria, TB)", "$65 million (2023)", "USD"),
                    (
                        "Maternal Health Initiative (Healthcare Access)",
                        "15,000 beneficiaries",
                        "people",
                    ),
                    ("PEPFAR Zambia (HIV Prevention/Treatment)", "$180 million", "USD"),
                    (
                        "Malaria Prevention (Disease Prevention)",
                        "2.1 million nets distributed",
                        "nets",
                    ),
                ],
            ),
        )
        .with_topic(
            "education",
            text_rows(
                years,
                &[
                    ("Education Support (Primary Education)", "$25 million", "USD"),
                    ("Teacher Training (Capacity Building)", "5,200 teachers trained", "teachers"),
                    ("School Infrastructure (Infrastructure)", "120 schools supported", "schools"),
                    ("Girls Education (Gender Equality)", "18,000 girls supported", "people"),
                ],
            ),
        )
        .with_topic(
            "agriculture",
            text_rows(
                years,
                &[
                    ("Feed the Future (Food Security)", "$42 million", "USD"),
                    (
                        "Farmer Training (Agricultural Productivity)",
                        "85,000 farmers trained",
                        "farmers",
                    ),
                    ("Market Access (Value Chains)", "450 cooperatives supported", "cooperatives"),
                    ("Nutrition Programs (Food Security)", "120,000 beneficiaries", "people"),
                ],
            ),
        )
        .with_topic(
            "economy",
            text_rows(
                years,
                &[
                    ("Trade Facilitation (Economic Growth)", "$15 million", "USD"),
                    ("Private Sector Development (Employment)", "2,500 jobs created", "jobs"),
                    ("Financial Inclusion (Access to Finance)", "45,000 people reached", "people"),
                    (
                        "Business Training (Capacity Building)",
                        "1,200 entrepreneurs trained",
                        "people",
                    ),
                ],
            ),
        )
}
