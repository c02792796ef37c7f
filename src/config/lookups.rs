use once_cell::sync::Lazy;

/// Option lists shared by every profile form.
#[derive(Debug)]
pub struct LookupTables {
    pub countries: Vec<&'static str>,
    pub cities: Vec<&'static str>,
    pub skills: Vec<&'static str>,
}

static LOOKUPS: Lazy<LookupTables> = Lazy::new(|| LookupTables {
    countries: vec!["India", "USA", "UK"],
    cities: vec!["Hyderabad", "Bangalore", "Chennai", "Pune"],
    skills: vec![
        "AWS",
        "QA-Automation",
        "DevOps",
        "WebServices",
        "Full Stack Developer",
        "Middleware",
    ],
});

pub fn lookups() -> &'static LookupTables {
    &LOOKUPS
}

/// A select/checkbox entry with its checked state precomputed for templates.
#[derive(Debug, Clone)]
pub struct LookupOption {
    pub value: String,
    pub selected: bool,
}

impl LookupTables {
    pub fn country_options(&self, current: &str) -> Vec<LookupOption> {
        single_select(&self.countries, current)
    }

    pub fn city_options(&self, current: &str) -> Vec<LookupOption> {
        single_select(&self.cities, current)
    }

    pub fn skill_options(&self, chosen: &[String]) -> Vec<LookupOption> {
        self.skills
            .iter()
            .map(|skill| LookupOption {
                value: skill.to_string(),
                selected: chosen.iter().any(|c| c == skill),
            })
            .collect()
    }
}

fn single_select(values: &[&'static str], current: &str) -> Vec<LookupOption> {
    values
        .iter()
        .map(|value| LookupOption {
            value: value.to_string(),
            selected: *value == current,
        })
        .collect()
}
