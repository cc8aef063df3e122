//! Resume Section Classifier: keyword-matches page lines against resume categories.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extraction::models::DocumentRecord;

/// Number of lines captured per match, header line included.
const CONTEXT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCategory {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
}

impl SectionCategory {
    pub const ALL: [SectionCategory; 8] = [
        SectionCategory::Contact,
        SectionCategory::Summary,
        SectionCategory::Experience,
        SectionCategory::Education,
        SectionCategory::Skills,
        SectionCategory::Projects,
        SectionCategory::Certifications,
        SectionCategory::Languages,
    ];

    /// Lower-case keywords; a line matches when it contains any of them.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionCategory::Contact => {
                &["email", "phone", "address", "linkedin", "github", "portfolio"]
            }
            SectionCategory::Summary => &["summary", "objective", "profile", "about"],
            SectionCategory::Experience => {
                &["experience", "work history", "employment", "career"]
            }
            SectionCategory::Education => {
                &["education", "degree", "university", "college", "school"]
            }
            SectionCategory::Skills => {
                &["skills", "technologies", "tools", "programming", "languages"]
            }
            SectionCategory::Projects => {
                &["projects", "portfolio", "achievements", "accomplishments"]
            }
            SectionCategory::Certifications => {
                &["certifications", "certificates", "awards", "honors"]
            }
            SectionCategory::Languages => &["languages", "fluent", "proficient", "native"],
        }
    }

    pub fn matches(self, lower_line: &str) -> bool {
        self.keywords().iter().any(|k| lower_line.contains(k))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMatch {
    pub page: u32,
    /// 1-based line index within the page text.
    pub line: usize,
    pub header: String,
    pub context: String,
}

/// Every category is present, possibly with no matches.
pub type ResumeSections = BTreeMap<SectionCategory, Vec<SectionMatch>>;

/// Scans every line of every page. A line may be recorded under several categories.
pub fn classify_sections(doc: &DocumentRecord) -> ResumeSections {
    let mut sections: ResumeSections = SectionCategory::ALL
        .into_iter()
        .map(|c| (c, Vec::new()))
        .collect();

    for page in &doc.pages {
        let lines: Vec<&str> = page.text.split('\n').collect();
        for (idx, line) in lines.iter().enumerate() {
            let lower = line.to_lowercase();
            for category in SectionCategory::ALL {
                if !category.matches(&lower) {
                    continue;
                }
                let end = (idx + CONTEXT_WINDOW).min(lines.len());
                sections.entry(category).or_default().push(SectionMatch {
                    page: page.page_number,
                    line: idx + 1,
                    header: line.trim().to_string(),
                    context: lines[idx..end].join("\n").trim().to_string(),
                });
            }
        }
    }

    sections
}
