//! Resume-specific line markers used by the table/section detector.

use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-item heading words that mark the start of a resume section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionHeading {
    Skills,
    Experience,
    Education,
    Projects,
    Languages,
    Certifications,
}

impl SectionHeading {
    pub const ALL: [SectionHeading; 6] = [
        SectionHeading::Skills,
        SectionHeading::Experience,
        SectionHeading::Education,
        SectionHeading::Projects,
        SectionHeading::Languages,
        SectionHeading::Certifications,
    ];

    /// Singular stem and whether a trailing `s` is accepted.
    fn stem(self) -> (&'static str, bool) {
        match self {
            SectionHeading::Skills => ("skill", true),
            SectionHeading::Experience => ("experience", false),
            SectionHeading::Education => ("education", false),
            SectionHeading::Projects => ("project", true),
            SectionHeading::Languages => ("language", true),
            SectionHeading::Certifications => ("certification", true),
        }
    }

    /// Case-insensitive whole-word match.
    pub fn parse(word: &str) -> Option<SectionHeading> {
        let lower = word.to_lowercase();
        Self::ALL.into_iter().find(|heading| {
            let (stem, plural) = heading.stem();
            lower == stem || (plural && lower.strip_suffix('s') == Some(stem))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMarker {
    Date,
    Label,
    Heading(SectionHeading),
}

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,4}[/\-]\d{1,2}[/\-]\d{1,4}$").unwrap());
static LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+\s*:\s*").unwrap());

/// Classifies a single glyph run. Item text is matched as-is, without trimming.
pub fn resume_marker(item: &str) -> Option<ResumeMarker> {
    if DATE_RE.is_match(item) {
        return Some(ResumeMarker::Date);
    }
    if LABEL_RE.is_match(item) {
        return Some(ResumeMarker::Label);
    }
    SectionHeading::parse(item).map(ResumeMarker::Heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_are_markers() {
        assert_eq!(resume_marker("2020-01-15"), Some(ResumeMarker::Date));
        assert_eq!(resume_marker("1/2/2021"), Some(ResumeMarker::Date));
        assert_eq!(resume_marker("2020-01-15 onwards"), None);
        assert_eq!(resume_marker("01/2021/3"), None);
    }

    #[test]
    fn test_label_prefix_is_marker() {
        assert_eq!(resume_marker("Email: jane@x.io"), Some(ResumeMarker::Label));
        assert_eq!(resume_marker("Phone :"), Some(ResumeMarker::Label));
        assert_eq!(resume_marker("email: jane@x.io"), None);
    }

    #[test]
    fn test_heading_words_case_insensitive() {
        assert_eq!(
            resume_marker("EXPERIENCE"),
            Some(ResumeMarker::Heading(SectionHeading::Experience))
        );
        assert_eq!(
            resume_marker("skill"),
            Some(ResumeMarker::Heading(SectionHeading::Skills))
        );
        assert_eq!(
            resume_marker("Certifications"),
            Some(ResumeMarker::Heading(SectionHeading::Certifications))
        );
        assert_eq!(resume_marker("Experiences"), None);
        assert_eq!(resume_marker("Work Experience"), None);
    }
}
