use crate::catalog::{ReferenceRow, ReferenceTable};

use super::{ScrapeConfig, SourceProfile};

pub(super) fn profile() -> SourceProfile {
    SourceProfile::new("un", "UN Statistics Division")
        .with_scrape(ScrapeConfig::new(&[
            "https://data.un.org/_layouts/15/UNStats/Country.aspx?cid={m49}",
        ]))
        .with_reference(reference())
}

fn row(indicator: &str, value: &str, year: &str) -> ReferenceRow {
    ReferenceRow::new(indicator, value).year(year)
}

fn reference() -> ReferenceTable {
    ReferenceTable::new()
        .with_topic(
            "population",
            vec![
                row("UN Population Estimate", "19,610,769", "2023"),
                row("Population Density", "26 per km²", "2023"),
                row("Urban Population", "45.2%", "2023"),
                row("Median Age", "16.8 years", "2023"),
            ],
        )
        .with_topic(
            "health",
            vec![
                row("Life Expectancy", "63.9 years", "2023"),
                row("Under-5 Mortality", "61 per 1,000", "2022"),
                row("Maternal Mortality", "213 per 100,000", "2020"),
                row("HIV Prevalence", "11.1%", "2022"),
            ],
        )
        .with_topic(
            "education",
            vec![
                row("Adult Literacy Rate", "86.7%", "2022"),
                row("Primary Completion Rate", "84.3%", "2021"),
                row("Secondary Enrollment", "44.1%", "2021"),
                row("Gender Parity Index", "1.05", "2021"),
            ],
        )
        .with_topic(
            "economy",
            vec![
                row("Human Development Index", "0.565 (Medium)", "2022"),
                row("GNI per capita", "$3,800 PPP", "2022"),
                row("Poverty Rate", "57.5%", "2022"),
                row("Gini Coefficient", "57.1", "2019"),
            ],
        )
        .with_topic(
            "agriculture",
            vec![
                ReferenceRow::new("Prevalence of undernourishment (SDG 2)", 45.8)
                    .unit("percent")
                    .year("2025"),
                ReferenceRow::new("Agricultural productivity (SDG 2)", 2.8)
                    .unit("tonnes per hectare")
                    .year("2025"),
                ReferenceRow::new("Food security access (SDG 2)", 62.4)
                    .unit("percent")
                    .year("2025"),
            ],
        )
}
