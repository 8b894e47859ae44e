// src/sources/curated.rs
//! Hand-maintained listings that ship with the binary

use crate::types::Opportunity;

struct Entry {
    id: &'static str,
    title: &'static str,
    organization: &'static str,
    kind: &'static str,
    deadline: &'static str,
    eligibility: &'static str,
    link: &'static str,
    description: &'static str,
    category: &'static str,
    location: &'static str,
    tags: &'static [&'static str],
    logo: Option<&'static str>,
    posted: Option<&'static str>,
}

impl Entry {
    fn to_opportunity(&self, source: &str) -> Opportunity {
        Opportunity {
            id: self.id.to_string(),
            title: self.title.to_string(),
            organization: self.organization.to_string(),
            kind: self.kind.to_string(),
            deadline: self.deadline.to_string(),
            eligibility: self.eligibility.to_string(),
            link: self.link.to_string(),
            description: self.description.to_string(),
            category: self.category.to_string(),
            source: source.to_string(),
            location: Some(self.location.to_string()),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            logo: self.logo.map(str::to_string),
            posted: self.posted.map(str::to_string),
        }
    }
}

const FEATURED: [Entry; 2] = [
    Entry {
        id: "custom-1",
        title: "UN Young Leaders Programme",
        organization: "United Nations",
        kind: "Leadership Program",
        deadline: "2024-12-31",
        eligibility: "Students and young professionals aged 18-29",
        link: "https://www.un.org/youthenvoy/young-leaders-for-sdgs/",
        description: "The Young Leaders Initiative recognizes young people who are leading efforts to combat the world's most pressing issues.",
        category: "Social",
        location: "Global",
        tags: &["Leadership", "Social Impact", "Youth Development"],
        logo: Some("https://www.un.org/sites/un2.un.org/themes/bootstrap_un/images/united-nations-logo-white.svg"),
        posted: None,
    },
    Entry {
        id: "custom-2",
        title: "Global Health Corps Fellowship",
        organization: "Global Health Corps",
        kind: "Fellowship",
        deadline: "2024-01-15",
        eligibility: "Early-career professionals under 30",
        link: "https://ghcorps.org/fellows/",
        description: "One-year paid fellowship for young professionals passionate about global health equity.",
        category: "Healthcare",
        location: "Multiple Locations",
        tags: &["Healthcare", "Fellowship", "Global Health"],
        logo: Some("https://ghcorps.org/wp-content/themes/ghc/images/logo.png"),
        posted: None,
    },
];

const LATEST: [Entry; 5] = [
    Entry {
        id: "new-1",
        title: "Youth Coding Mentor",
        organization: "Code for Change",
        kind: "Volunteer",
        deadline: "2024-04-15",
        eligibility: "Basic programming knowledge",
        link: "#",
        description: "Help teach coding to underprivileged youth. Looking for passionate mentors with basic programming knowledge.",
        category: "Education",
        location: "Remote",
        tags: &["education", "programming", "mentorship"],
        logo: None,
        posted: Some("2024-03-15"),
    },
    Entry {
        id: "new-2",
        title: "Climate Research Intern",
        organization: "GreenEarth Institute",
        kind: "Internship",
        deadline: "2024-04-01",
        eligibility: "Environmental science students",
        link: "#",
        description: "Join our research team studying climate change impacts. Perfect for environmental science students.",
        category: "Environment",
        location: "New York, NY",
        tags: &["climate", "research", "science"],
        logo: None,
        posted: Some("2024-03-14"),
    },
    Entry {
        id: "new-3",
        title: "Digital Marketing Associate",
        organization: "TechStart",
        kind: "Job",
        deadline: "2024-03-31",
        eligibility: "Entry level",
        link: "#",
        description: "Entry-level position for creative minds interested in digital marketing and growth hacking.",
        category: "Work",
        location: "San Francisco, CA",
        tags: &["marketing", "social-media", "growth"],
        logo: None,
        posted: Some("2024-03-13"),
    },
    Entry {
        id: "new-4",
        title: "AI Research Assistant",
        organization: "Future Labs",
        kind: "Research",
        deadline: "2024-04-10",
        eligibility: "Strong mathematics and programming skills",
        link: "#",
        description: "Assist in cutting-edge AI research projects. Strong mathematics and programming skills required.",
        category: "Technology",
        location: "Boston, MA",
        tags: &["AI", "machine-learning", "research"],
        logo: None,
        posted: Some("2024-03-12"),
    },
    Entry {
        id: "new-5",
        title: "Community Outreach Coordinator",
        organization: "Youth Empowerment",
        kind: "Volunteer",
        deadline: "2024-03-25",
        eligibility: "Strong communication skills",
        link: "#",
        description: "Coordinate youth empowerment programs in local communities. Strong communication skills needed.",
        category: "Social",
        location: "Chicago, IL",
        tags: &["community", "leadership", "youth"],
        logo: None,
        posted: Some("2024-03-11"),
    },
];

/// Curated programmes merged into every aggregated batch
pub fn featured() -> Vec<Opportunity> {
    FEATURED.iter().map(|e| e.to_opportunity("Custom")).collect()
}

/// Recently posted listings, newest first
pub fn latest() -> Vec<Opportunity> {
    LATEST.iter().map(|e| e.to_opportunity("OppGenie")).collect()
}
