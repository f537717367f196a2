//! DOCX packing for the block layout.
//!
//! Formatting mirrors a conventional one-column resume: centered title and
//! contact line, bold underlined section headings, bold role with the duration
//! on a right tab stop at the text margin, italic company line, level-0
//! bullets. Page geometry is US Letter with one-inch margins. The formatted
//! parts (`word/document.xml` and friends) are identical between renders of
//! the same data.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText, LineSpacing,
    NumberFormat, Numbering, NumberingId, PageMargin, Paragraph, Run, Start, Tab, TabValueType,
};
use thiserror::Error;

use crate::models::resume::ResumeData;
use crate::render::layout::{layout_resume, suggested_filename, DocumentBlock};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const BULLET_NUMBERING_ID: usize = 1;

// Page geometry in twips.
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const PAGE_MARGIN: i32 = 1440;
/// Right edge of the text area, where job durations are aligned.
const RIGHT_TAB_POS: usize = (PAGE_WIDTH as usize) - 2 * (PAGE_MARGIN as usize);

// Run sizes are in half-points.
const TITLE_SIZE: usize = 40;
const HEADING_SIZE: usize = 28;
const ROLE_SIZE: usize = 24;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to package document: {0}")]
    Pack(String),
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Renders `data` to a DOCX artifact plus its suggested filename.
pub fn render_document(data: &ResumeData) -> Result<RenderedDocument, RenderError> {
    let blocks = layout_resume(data);
    let bytes = pack_docx(&blocks)?;
    Ok(RenderedDocument {
        filename: suggested_filename(&data.contact_info),
        bytes,
    })
}

pub fn pack_docx(blocks: &[DocumentBlock]) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Cursor::new(Vec::new());
    build_docx(blocks)
        .build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Pack(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn build_docx(blocks: &[DocumentBlock]) -> Docx {
    let bullet_level = Level::new(
        0,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("•"),
        LevelJc::new("left"),
    );

    blocks.iter().fold(
        Docx::new()
            .page_size(PAGE_WIDTH, PAGE_HEIGHT)
            .page_margin(
                PageMargin::new()
                    .top(PAGE_MARGIN)
                    .bottom(PAGE_MARGIN)
                    .left(PAGE_MARGIN)
                    .right(PAGE_MARGIN),
            )
            .add_abstract_numbering(
                AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(bullet_level),
            )
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID)),
        |docx, block| docx.add_paragraph(paragraph_for(block)),
    )
}

fn paragraph_for(block: &DocumentBlock) -> Paragraph {
    match block {
        DocumentBlock::Title(name) => Paragraph::new()
            .add_run(Run::new().add_text(name).bold().size(TITLE_SIZE))
            .align(AlignmentType::Center)
            .line_spacing(LineSpacing::new().after(200)),
        DocumentBlock::ContactLine(line) => Paragraph::new()
            .add_run(Run::new().add_text(line))
            .align(AlignmentType::Center)
            .line_spacing(LineSpacing::new().after(400)),
        DocumentBlock::SectionHeading(title) => Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(*title)
                    .bold()
                    .underline("single")
                    .size(HEADING_SIZE),
            )
            .line_spacing(LineSpacing::new().before(200).after(100)),
        DocumentBlock::Paragraph(text) => Paragraph::new()
            .add_run(Run::new().add_text(text))
            .line_spacing(LineSpacing::new().after(400)),
        DocumentBlock::JobHeader { role, duration } => Paragraph::new()
            .add_tab(Tab::new().val(TabValueType::Right).pos(RIGHT_TAB_POS))
            .add_run(Run::new().add_text(role).bold().size(ROLE_SIZE))
            .add_run(Run::new().add_tab().add_text(duration).bold()),
        DocumentBlock::JobSubheading(text) => Paragraph::new()
            .add_run(Run::new().add_text(text).italic())
            .line_spacing(LineSpacing::new().after(100)),
        DocumentBlock::Bullet(text) => Paragraph::new()
            .add_run(Run::new().add_text(text))
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        DocumentBlock::Spacer => Paragraph::new().line_spacing(LineSpacing::new().after(200)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ContactInfo, ExperienceItem};

    fn sample() -> ResumeData {
        ResumeData {
            contact_info: ContactInfo {
                name: "Casey Lee".to_string(),
                email: "casey@example.com".to_string(),
                phone: "555-0199".to_string(),
                location: None,
            },
            professional_summary: "Logistics manager.".to_string(),
            experience: vec![ExperienceItem {
                role: "Logistics Manager".to_string(),
                company: "U.S. Marine Corps".to_string(),
                duration: "2017 - 2021".to_string(),
                location: "Camp Pendleton, CA".to_string(),
                achievements: vec!["Managed $3M of inventory.".to_string()],
            }],
            skills: vec!["Supply Chain".to_string()],
            education: vec!["A.A. Business".to_string()],
        }
    }

    #[test]
    fn test_render_produces_zip_container() {
        let rendered = render_document(&sample()).unwrap();
        assert!(rendered.bytes.starts_with(b"PK"));
        assert_eq!(rendered.filename, "Civilian_Resume_Casey_Lee.docx");
    }

    fn document_xml(data: &ResumeData) -> String {
        let xml = build_docx(&layout_resume(data)).build().document;
        String::from_utf8(xml).unwrap()
    }

    /// docx-rs numbers paragraphs from a process-wide counter.
    fn without_para_ids(xml: &str) -> String {
        const ATTR: &str = " w14:paraId=\"";
        let mut out = String::with_capacity(xml.len());
        let mut rest = xml;
        while let Some(start) = rest.find(ATTR) {
            out.push_str(&rest[..start]);
            let after = &rest[start + ATTR.len()..];
            rest = after.find('"').map_or("", |end| &after[end + 1..]);
        }
        out.push_str(rest);
        out
    }

    #[test]
    fn test_render_twice_yields_same_content_and_name() {
        let first = render_document(&sample()).unwrap();
        let second = render_document(&sample()).unwrap();
        assert_eq!(first.filename, second.filename);

        let first_xml = document_xml(&sample());
        let second_xml = document_xml(&sample());
        assert_eq!(without_para_ids(&first_xml), without_para_ids(&second_xml));
        assert!(first_xml.contains("Logistics Manager"));
        assert!(first_xml.contains("Managed $3M of inventory."));
    }

    #[test]
    fn test_job_duration_sits_on_right_tab_stop() {
        let xml = document_xml(&sample());
        assert_eq!(RIGHT_TAB_POS, 9360);
        assert!(xml.contains(r#"w:val="right""#));
        assert!(xml.contains(r#"w:pos="9360""#));
    }

    #[test]
    fn test_section_headings_are_underlined() {
        let xml = document_xml(&sample());
        assert!(xml.contains(r#"<w:u w:val="single""#));
    }

    #[test]
    fn test_render_minimal_resume() {
        let rendered = render_document(&ResumeData::default()).unwrap();
        assert!(rendered.bytes.starts_with(b"PK"));
        assert_eq!(rendered.filename, "Civilian_Resume_Unknown.docx");
    }
}
