//! Section layout for the exported resume.
//!
//! Order is fixed: title, contact line, Professional Summary, Professional
//! Experience, Core Competencies, Education. Empty optional sections are
//! omitted entirely (heading included).

use crate::models::resume::{ContactInfo, ResumeData};

pub const SUMMARY_HEADING: &str = "Professional Summary";
pub const EXPERIENCE_HEADING: &str = "Professional Experience";
pub const SKILLS_HEADING: &str = "Core Competencies";
pub const EDUCATION_HEADING: &str = "Education";

const FILENAME_PREFIX: &str = "Civilian_Resume_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBlock {
    Title(String),
    ContactLine(String),
    SectionHeading(&'static str),
    Paragraph(String),
    /// Role on the left, duration right-aligned after a tab.
    JobHeader { role: String, duration: String },
    /// `company | location`, rendered in italics.
    JobSubheading(String),
    Bullet(String),
    /// Blank paragraph separating jobs.
    Spacer,
}

#[cfg(test)]
impl DocumentBlock {
    /// The visible text of the block, as a reader would see it.
    pub fn text(&self) -> String {
        match self {
            DocumentBlock::Title(s)
            | DocumentBlock::ContactLine(s)
            | DocumentBlock::Paragraph(s)
            | DocumentBlock::JobSubheading(s)
            | DocumentBlock::Bullet(s) => s.clone(),
            DocumentBlock::SectionHeading(s) => s.to_string(),
            DocumentBlock::JobHeader { role, duration } => format!("{role}\t{duration}"),
            DocumentBlock::Spacer => String::new(),
        }
    }
}

pub fn layout_resume(data: &ResumeData) -> Vec<DocumentBlock> {
    let mut blocks = vec![
        DocumentBlock::Title(data.contact_info.name.trim().to_string()),
        DocumentBlock::ContactLine(contact_line(&data.contact_info)),
    ];

    let summary = data.professional_summary.trim();
    if !summary.is_empty() {
        blocks.push(DocumentBlock::SectionHeading(SUMMARY_HEADING));
        blocks.push(DocumentBlock::Paragraph(summary.to_string()));
    }

    if !data.experience.is_empty() {
        blocks.push(DocumentBlock::SectionHeading(EXPERIENCE_HEADING));
        for job in &data.experience {
            blocks.push(DocumentBlock::JobHeader {
                role: job.role.trim().to_string(),
                duration: job.duration.trim().to_string(),
            });
            blocks.push(DocumentBlock::JobSubheading(join_present(
                &[job.company.as_str(), job.location.as_str()],
                " | ",
            )));
            blocks.extend(
                job.achievements
                    .iter()
                    .map(|a| a.trim())
                    .filter(|a| !a.is_empty())
                    .map(|a| DocumentBlock::Bullet(a.to_string())),
            );
            blocks.push(DocumentBlock::Spacer);
        }
    }

    let skills: Vec<&str> = data
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !skills.is_empty() {
        blocks.push(DocumentBlock::SectionHeading(SKILLS_HEADING));
        blocks.push(DocumentBlock::Paragraph(skills.join(", ")));
    }

    let education: Vec<&str> = data
        .education
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();
    if !education.is_empty() {
        blocks.push(DocumentBlock::SectionHeading(EDUCATION_HEADING));
        blocks.extend(education.into_iter().map(|e| DocumentBlock::Bullet(e.to_string())));
    }

    blocks
}

/// `email | phone | location`, skipping blank parts.
fn contact_line(contact: &ContactInfo) -> String {
    let location = contact.location.as_deref().unwrap_or_default();
    join_present(
        &[contact.email.as_str(), contact.phone.as_str(), location],
        " | ",
    )
}

fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `Civilian_Resume_<Name>.docx`, whitespace runs in the name collapsed to `_`.
pub fn suggested_filename(contact: &ContactInfo) -> String {
    let name = contact.name.split_whitespace().collect::<Vec<_>>().join("_");
    let name = if name.is_empty() { "Unknown".to_string() } else { name };
    format!("{FILENAME_PREFIX}{name}.docx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceItem;

    fn sample() -> ResumeData {
        ResumeData {
            contact_info: ContactInfo {
                name: "Jordan  Reyes".to_string(),
                email: "j@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: Some("Austin, TX".to_string()),
            },
            professional_summary: "Operations leader.".to_string(),
            experience: vec![
                ExperienceItem {
                    role: "Operations Supervisor".to_string(),
                    company: "U.S. Army".to_string(),
                    duration: "2019 - 2023".to_string(),
                    location: "Fort Hood, TX".to_string(),
                    achievements: vec!["Led 40 staff.".to_string(), "Cut downtime 20%.".to_string()],
                },
                ExperienceItem {
                    role: "Team Leader".to_string(),
                    company: "U.S. Army".to_string(),
                    duration: "2015 - 2019".to_string(),
                    location: String::new(),
                    achievements: vec!["Trained 5 personnel.".to_string()],
                },
            ],
            skills: vec!["Logistics".to_string(), "Team Leadership".to_string()],
            education: vec!["B.S. Management".to_string()],
        }
    }

    fn headings(blocks: &[DocumentBlock]) -> Vec<&'static str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                DocumentBlock::SectionHeading(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let blocks = layout_resume(&sample());
        assert_eq!(blocks[0], DocumentBlock::Title("Jordan  Reyes".to_string()));
        assert_eq!(
            blocks[1],
            DocumentBlock::ContactLine("j@example.com | 555-0100 | Austin, TX".to_string())
        );
        assert_eq!(
            headings(&blocks),
            vec![SUMMARY_HEADING, EXPERIENCE_HEADING, SKILLS_HEADING, EDUCATION_HEADING]
        );
    }

    #[test]
    fn test_job_blocks_keep_achievement_order_and_spacing() {
        let blocks = layout_resume(&sample());
        let start = blocks
            .iter()
            .position(|b| *b == DocumentBlock::SectionHeading(EXPERIENCE_HEADING))
            .unwrap();
        assert_eq!(
            &blocks[start + 1..start + 6],
            &[
                DocumentBlock::JobHeader {
                    role: "Operations Supervisor".to_string(),
                    duration: "2019 - 2023".to_string(),
                },
                DocumentBlock::JobSubheading("U.S. Army | Fort Hood, TX".to_string()),
                DocumentBlock::Bullet("Led 40 staff.".to_string()),
                DocumentBlock::Bullet("Cut downtime 20%.".to_string()),
                DocumentBlock::Spacer,
            ]
        );
        // Blank location drops the separator.
        assert!(blocks.contains(&DocumentBlock::JobSubheading("U.S. Army".to_string())));
        assert_eq!(blocks.iter().filter(|b| **b == DocumentBlock::Spacer).count(), 2);
    }

    #[test]
    fn test_skills_joined_on_one_line() {
        let blocks = layout_resume(&sample());
        assert!(blocks.contains(&DocumentBlock::Paragraph(
            "Logistics, Team Leadership".to_string()
        )));
    }

    #[test]
    fn test_empty_optional_sections_are_omitted() {
        let data = ResumeData {
            professional_summary: "  ".to_string(),
            skills: vec![],
            education: vec![],
            ..sample()
        };
        assert_eq!(headings(&layout_resume(&data)), vec![EXPERIENCE_HEADING]);
    }

    #[test]
    fn test_contact_line_without_location() {
        let mut data = sample();
        data.contact_info.location = None;
        assert_eq!(
            layout_resume(&data)[1],
            DocumentBlock::ContactLine("j@example.com | 555-0100".to_string())
        );
    }

    #[test]
    fn test_layout_is_deterministic() {
        assert_eq!(layout_resume(&sample()), layout_resume(&sample()));
    }

    #[test]
    fn test_suggested_filename_collapses_whitespace() {
        let contact = ContactInfo {
            name: " Jordan \t  Alex Reyes ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            suggested_filename(&contact),
            "Civilian_Resume_Jordan_Alex_Reyes.docx"
        );
    }

    #[test]
    fn test_suggested_filename_for_unknown_contact() {
        assert_eq!(
            suggested_filename(&ContactInfo::default()),
            "Civilian_Resume_Unknown.docx"
        );
    }
}
