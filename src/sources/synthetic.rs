// src/sources/synthetic.rs
//! Placeholder listings for demos and empty upstreams

use chrono::{Duration, NaiveDate, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

use crate::types::Opportunity;

const TITLES: [&str; 8] = [
    "Frontend Developer Intern",
    "Open Source Contributor",
    "Data Science Fellow",
    "Community Mentor",
    "Cloud Engineering Apprentice",
    "Climate Tech Volunteer",
    "Mobile App Developer",
    "Research Assistant",
];

const ORGANIZATIONS: [&str; 6] = [
    "Bright Future Labs",
    "Open Source Collective",
    "Civic Code Network",
    "Green Planet Initiative",
    "Youth Tech Alliance",
    "Northwind Studios",
];

// (type, category)
const KINDS: [(&str, &str); 5] = [
    ("Internship", "Technology"),
    ("Job", "Work"),
    ("Volunteer", "Social"),
    ("Fellowship", "Education"),
    ("Research", "Technology"),
];

const LOCATIONS: [&str; 6] = [
    "Remote",
    "New York, NY",
    "San Francisco, CA",
    "London, UK",
    "Berlin, Germany",
    "Bangalore, India",
];

const TAGS: [&str; 10] = [
    "React",
    "Python",
    "Rust",
    "Machine Learning",
    "Mentorship",
    "Sustainability",
    "Cloud",
    "Design",
    "Community",
    "Beginner Friendly",
];

const LOGO_COLORS: [&str; 4] = ["%236366f1", "%2310b981", "%23f59e0b", "%23ec4899"];

/// Generates random placeholder opportunities.
pub struct SyntheticSource {
    count: usize,
}

impl SyntheticSource {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn is_enabled(&self) -> bool {
        self.count > 0
    }

    pub fn generate(&self) -> Vec<Opportunity> {
        self.generate_with(&mut rand::rng(), Utc::now().date_naive())
    }

    /// Generate with an explicit RNG and reference date
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, today: NaiveDate) -> Vec<Opportunity> {
        (0..self.count).map(|_| placeholder(rng, today)).collect()
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

fn placeholder<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Opportunity {
    let title = pick(rng, &TITLES);
    let organization = pick(rng, &ORGANIZATIONS);
    let (kind, category) = KINDS.choose(rng).copied().unwrap_or(KINDS[0]);
    let location = pick(rng, &LOCATIONS);
    let tag_count = rng.random_range(2..=4);
    let tags = TAGS
        .choose_multiple(rng, tag_count)
        .map(|t| t.to_string())
        .collect();

    let deadline = today + Duration::days(rng.random_range(7..=90));
    let posted = today - Duration::days(rng.random_range(0..=14));
    let color = pick(rng, &LOGO_COLORS);

    Opportunity {
        id: format!("mock-{}", Uuid::new_v4()),
        title: title.to_string(),
        organization: organization.to_string(),
        kind: kind.to_string(),
        deadline: deadline.format("%Y-%m-%d").to_string(),
        eligibility: "Students and early-career applicants".to_string(),
        link: "#".to_string(),
        description: format!(
            "{} is looking for a {} to join its team. Great for building real-world experience.",
            organization,
            title.to_lowercase()
        ),
        category: category.to_string(),
        source: "Generated".to_string(),
        location: Some(location.to_string()),
        tags,
        logo: Some(logo_data_uri(organization, color)),
        posted: Some(posted.format("%Y-%m-%d").to_string()),
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

pub(crate) fn logo_data_uri(organization: &str, color: &str) -> String {
    format!(
        "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='64' height='64'>\
<rect width='64' height='64' rx='12' fill='{}'/>\
<text x='32' y='40' font-size='24' text-anchor='middle' fill='white' font-family='sans-serif'>{}</text></svg>",
        color,
        initials(organization)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_generates_requested_count_with_unique_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let opps = SyntheticSource::new(25).generate_with(&mut rng, today());
        assert_eq!(opps.len(), 25);
        let ids: HashSet<_> = opps.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids.len(), 25);
        assert!(opps.iter().all(|o| o.id.starts_with("mock-")));
    }

    #[test]
    fn test_dates_within_window() {
        let mut rng = StdRng::seed_from_u64(11);
        for opp in SyntheticSource::new(50).generate_with(&mut rng, today()) {
            let deadline = NaiveDate::parse_from_str(&opp.deadline, "%Y-%m-%d").unwrap();
            let days = (deadline - today()).num_days();
            assert!((7..=90).contains(&days), "deadline {} days out", days);

            let posted =
                NaiveDate::parse_from_str(opp.posted.as_deref().unwrap(), "%Y-%m-%d").unwrap();
            assert!(posted <= today());
            assert!((2..=4).contains(&opp.tags.len()));
        }
    }

    #[test]
    fn test_disabled_when_zero() {
        let source = SyntheticSource::new(0);
        assert!(!source.is_enabled());
        assert!(source.generate().is_empty());
    }

    #[test]
    fn test_logo_uses_initials() {
        let uri = logo_data_uri("Open Source Collective", "%2310b981");
        assert!(uri.starts_with("data:image/svg+xml;utf8,"));
        assert!(uri.contains(">OS</text>"));
    }
}
