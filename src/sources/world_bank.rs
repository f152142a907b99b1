use crate::catalog::{IndicatorCatalog, ReferenceTable};

use super::{ApiConfig, ScrapeConfig, SourceProfile, text_rows};

pub(super) fn profile() -> SourceProfile {
    SourceProfile::new("world_bank", "World Bank")
        .with_api(ApiConfig::default())
        .with_scrape(
            ScrapeConfig::new(&["https://www.worldbank.org/en/country/{country}"])
                .with_global_keywords(&["gdp", "population"]),
        )
        .with_catalog(catalog())
        .with_reference(reference())
}

fn catalog() -> IndicatorCatalog {
    IndicatorCatalog::new()
        .with_topic(
            "population",
            &[
                ("SP.POP.TOTL", "Population, total"),
                ("SP.POP.GROW", "Population growth (annual %)"),
                ("SP.URB.TOTL.IN.ZS", "Urban population (% of total)"),
                ("SP.RUR.TOTL.ZS", "Rural population (% of total)"),
                ("SP.POP.DPND", "Age dependency ratio (% of working-age population)"),
            ],
        )
        .with_topic(
            "health",
            &[
                ("SP.DYN.LE00.IN", "Life expectancy at birth, total (years)"),
                ("SH.DYN.MORT", "Mortality rate, under-5 (per 1,000 live births)"),
                ("SH.STA.MMRT", "Maternal mortality ratio"),
                ("SH.IMM.MEAS", "Immunization, measles (% of children ages 12-23 months)"),
                (
                    "SH.STA.STNT.ZS",
                    "Prevalence of stunting, height for age (% of children under 5)",
                ),
            ],
        )
        .with_topic(
            "education",
            &[
                ("SE.ADT.LITR.ZS", "Literacy rate, adult total (% of people ages 15 and above)"),
                ("SE.PRM.NENR", "School enrollment, primary (% net)"),
                ("SE.SEC.NENR", "School enrollment, secondary (% net)"),
                ("SE.TER.ENRR", "School enrollment, tertiary (% gross)"),
                ("SE.PRM.CMPT.ZS", "Primary completion rate, total (% of relevant age group)"),
            ],
        )
        .with_topic(
            "economy",
            &[
                ("NY.GDP.MKTP.CD", "GDP (current US$)"),
                ("NY.GDP.PCAP.CD", "GDP per capita (current US$)"),
                ("NY.GDP.MKTP.KD.ZG", "GDP growth (annual %)"),
                ("FP.CPI.TOTL.ZG", "Inflation, consumer prices (annual %)"),
                ("SL.UEM.TOTL.ZS", "Unemployment, total (% of total labor force)"),
            ],
        )
        .with_topic(
            "agriculture",
            &[
                ("AG.LND.AGRI.ZS", "Agricultural land (% of land area)"),
                ("AG.PRD.CROP.XD", "Crop production index (2014-2016 = 100)"),
                ("AG.LND.ARBL.ZS", "Arable land (% of land area)"),
                ("AG.YLD.CREL.KG", "Cereal yield (kg per hectare)"),
                ("AG.CON.FERT.ZS", "Fertilizer consumption (kilograms per hectare of arable land)"),
            ],
        )
        .with_topic(
            "mining",
            &[
                ("NY.GDP.MINR.RT.ZS", "Mineral rents (% of GDP)"),
                ("TX.VAL.MRCH.CD.WT", "Merchandise exports (current US$)"),
                ("TM.VAL.MRCH.CD.WT", "Merchandise imports (current US$)"),
                ("NE.EXP.GNFS.ZS", "Exports of goods and services (% of GDP)"),
            ],
        )
}

fn reference() -> ReferenceTable {
    let year = Some("2025");
    ReferenceTable::new()
        .with_topic(
            "population",
            text_rows(
                year,
                &[
                    ("Total Population", "20.22 million (2025 est.)", "people"),
                    ("Population Growth Rate", "2.8% annual", "percent"),
                    ("Urban Population", "46.8%", "percent"),
                    ("Population Density", "27 people/km²", "density"),
                ],
            ),
        )
        .with_topic(
            "health",
            text_rows(
                year,
                &[
                    ("Life Expectancy", "64.3 years (2025)", "years"),
                    ("Infant Mortality Rate", "36.2 per 1,000", "per 1000 births"),
                    ("Maternal Mortality", "198 per 100,000", "per 100k births"),
                    ("HIV Prevalence", "10.8%", "percent"),
                ],
            ),
        )
        .with_topic(
            "education",
            text_rows(
                year,
                &[
                    ("Literacy Rate", "87.3%", "percent"),
                    ("Primary School Enrollment", "91.2%", "percent"),
                    ("Secondary School Enrollment", "47.8%", "percent"),
                    ("Tertiary Enrollment", "5.4%", "percent"),
                ],
            ),
        )
        .with_topic(
            "economy",
            text_rows(
                year,
                &[
                    ("GDP (nominal)", "$31.2 billion (2025)", "USD billion"),
                    ("GDP per capita", "$1,544", "USD"),
                    ("GDP Growth Rate", "5.2%", "percent"),
                    ("Inflation Rate", "7.8%", "percent"),
                ],
            ),
        )
        .with_topic(
            "agriculture",
            text_rows(
                year,
                &[
                    ("Agricultural Land", "58.1%", "percent of total"),
                    ("Arable Land", "4.8%", "percent of total"),
                    ("Agricultural Employment", "54.8%", "percent of workforce"),
                    ("Crop Production Index", "105.2", "index"),
                ],
            ),
        )
        .with_topic(
            "mining",
            text_rows(
                year,
                &[
                    ("Copper Production", "763,287 tonnes (2022)", "tonnes"),
                    ("Mining GDP Share", "12.1%", "percent"),
                    ("Mineral Exports", "$6.8 billion", "USD"),
                    ("Mining Employment", "89,000 jobs", "jobs"),
                ],
            ),
        )
}
