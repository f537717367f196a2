//! Glossary annotation.
//!
//! Inserts ` [definition]` immediately after every whole-word, case-insensitive
//! occurrence of a glossary term. The source text is never altered otherwise:
//! stripping the inserted suffixes yields the input byte for byte.
//!
//! Matching works on the original text with explicit span bookkeeping:
//! - entries are visited longest term first, so "NCOIC" claims its span before
//!   "NCO" (or "Platoon Sergeant" before "Sergeant") is considered;
//! - an occurrence overlapping an already-claimed span is skipped;
//! - nothing inside a `[...]` region or an inserted ` [definition]` is
//!   annotated, even when the definition itself contains brackets;
//! - an occurrence already followed by ` [definition]` is claimed but left as
//!   is, which makes `annotate` idempotent.

use std::ops::Range;

use crate::glossary::store::usable_entries;
use crate::glossary::GlossaryEntry;

/// A planned insertion: the definition goes right after byte offset `at`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Insertion<'a> {
    at: usize,
    definition: &'a str,
}

/// Annotates `text` with the definitions from `entries`.
pub fn annotate(text: &str, entries: &[GlossaryEntry]) -> String {
    if text.is_empty() {
        return String::new();
    }

    let ordered = order_by_term_length(entries);
    let insertions = plan_insertions(text, &ordered);
    apply_insertions(text, &insertions)
}

/// Usable entries sorted by term length (in chars), longest first.
/// The sort is stable: equal-length terms keep their store order.
fn order_by_term_length(entries: &[GlossaryEntry]) -> Vec<GlossaryEntry> {
    let mut ordered: Vec<GlossaryEntry> = usable_entries(entries.to_vec())
        .into_iter()
        .map(|e| GlossaryEntry::new(e.term.trim(), e.definition.trim()))
        .collect();
    ordered.sort_by_key(|e| std::cmp::Reverse(e.term.chars().count()));
    ordered
}

fn plan_insertions<'a>(text: &str, ordered: &'a [GlossaryEntry]) -> Vec<Insertion<'a>> {
    let mut protected = bracketed_regions(text);
    protected.extend(inserted_definitions(text, ordered));
    let mut claimed: Vec<Range<usize>> = Vec::new();
    let mut insertions = Vec::new();

    for entry in ordered {
        let existing = format!(" [{}]", entry.definition);

        for span in find_whole_word(text, &entry.term) {
            if overlaps_any(&span, &protected) || overlaps_any(&span, &claimed) {
                continue;
            }
            let already_annotated = text[span.end..].starts_with(&existing);
            claimed.push(span.clone());
            if !already_annotated {
                insertions.push(Insertion {
                    at: span.end,
                    definition: &entry.definition,
                });
            }
        }
    }

    insertions.sort_by_key(|i| i.at);
    insertions
}

fn apply_insertions(text: &str, insertions: &[Insertion<'_>]) -> String {
    let extra: usize = insertions.iter().map(|i| i.definition.len() + 3).sum();
    let mut out = String::with_capacity(text.len() + extra);
    let mut cursor = 0;

    for insertion in insertions {
        out.push_str(&text[cursor..insertion.at]);
        out.push_str(" [");
        out.push_str(insertion.definition);
        out.push(']');
        cursor = insertion.at;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Non-overlapping, left-to-right whole-word occurrences of `term`.
fn find_whole_word(text: &str, term: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut search_from = 0;

    while search_from < text.len() {
        let next = text[search_from..]
            .char_indices()
            .map(|(offset, _)| search_from + offset)
            .find_map(|start| {
                match_at(text, start, term)
                    .filter(|&end| is_word_boundary(text, start, end))
                    .map(|end| start..end)
            });

        match next {
            Some(span) => {
                search_from = span.end;
                spans.push(span);
            }
            None => break,
        }
    }

    spans
}

/// If `term` matches case-insensitively at `start`, returns the end byte offset.
fn match_at(text: &str, start: usize, term: &str) -> Option<usize> {
    let mut candidate = text[start..].chars();
    let mut consumed = 0;

    for expected in term.chars() {
        let actual = candidate.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
        consumed += actual.len_utf8();
    }

    (consumed > 0).then_some(start + consumed)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The match must not be glued to a word character on either side.
fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Byte ranges of every closed `[...]` region, brackets included.
fn bracketed_regions(text: &str) -> Vec<Range<usize>> {
    let mut regions = Vec::new();
    let mut open: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match c {
            '[' if open.is_none() => open = Some(i),
            ']' => {
                if let Some(start) = open.take() {
                    regions.push(start..i + 1);
                }
            }
            _ => {}
        }
    }

    regions
}

/// Byte ranges of every ` [definition]` literal already present in `text`.
fn inserted_definitions(text: &str, ordered: &[GlossaryEntry]) -> Vec<Range<usize>> {
    ordered
        .iter()
        .flat_map(|entry| {
            let literal = format!(" [{}]", entry.definition);
            text.match_indices(literal.as_str())
                .map(|(start, found)| start..start + found.len())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn overlaps_any(span: &Range<usize>, others: &[Range<usize>]) -> bool {
    others
        .iter()
        .any(|o| span.start < o.end && o.start < span.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::default_glossary;

    fn entries(pairs: &[(&str, &str)]) -> Vec<GlossaryEntry> {
        pairs
            .iter()
            .map(|(t, d)| GlossaryEntry::new(*t, *d))
            .collect()
    }

    /// Removes every ` [definition]` suffix the annotator could have inserted.
    fn strip_annotations(text: &str, entries: &[GlossaryEntry]) -> String {
        let mut out = text.to_string();
        for e in entries {
            out = out.replace(&format!(" [{}]", e.definition), "");
        }
        out
    }

    #[test]
    fn test_empty_text_yields_empty_output() {
        assert_eq!(annotate("", &default_glossary()), "");
        assert_eq!(annotate("", &[]), "");
    }

    #[test]
    fn test_no_entries_returns_text_unchanged() {
        let text = "Served as NCO for 5 personnel.";
        assert_eq!(annotate(text, &[]), text);
    }

    #[test]
    fn test_single_term_is_annotated() {
        let glossary = entries(&[("NCO", "Team Leader")]);
        assert_eq!(
            annotate("Served as NCO for 5 personnel.", &glossary),
            "Served as NCO [Team Leader] for 5 personnel."
        );
    }

    #[test]
    fn test_longest_term_wins_over_its_prefix() {
        let glossary = entries(&[("NCO", "Team Leader*"), ("NCOIC", "Ops Supervisor*")]);
        let out = annotate("promoted to NCOIC", &glossary);
        assert_eq!(out, "promoted to NCOIC [Ops Supervisor*]");
        assert!(!out.contains("NCO [Team Leader*]"));
    }

    #[test]
    fn test_multi_word_term_blocks_contained_shorter_term() {
        let glossary = entries(&[
            ("Sergeant", "Supervisor"),
            ("Platoon Sergeant", "Operations Manager"),
        ]);
        let out = annotate("Platoon Sergeant, then First Sergeant.", &glossary);
        assert_eq!(
            out,
            "Platoon Sergeant [Operations Manager], then First Sergeant [Supervisor]."
        );
    }

    #[test]
    fn test_word_boundary_rejects_embedded_term() {
        let glossary = entries(&[("CO", "Director")]);
        assert_eq!(annotate("COMPANY", &glossary), "COMPANY");
        assert_eq!(annotate("DECO", &glossary), "DECO");
        assert_eq!(annotate("CO_LEAD", &glossary), "CO_LEAD");
        assert_eq!(
            annotate("the CO arrived", &glossary),
            "the CO [Director] arrived"
        );
    }

    #[test]
    fn test_punctuation_counts_as_boundary() {
        let glossary = entries(&[("XO", "Chief of Staff")]);
        assert_eq!(
            annotate("(XO), XO's duties; XO.", &glossary),
            "(XO [Chief of Staff]), XO [Chief of Staff]'s duties; XO [Chief of Staff]."
        );
    }

    #[test]
    fn test_matching_is_case_insensitive_and_preserves_casing() {
        let glossary = entries(&[("nco", "Team Leader")]);
        assert_eq!(
            annotate("Nco duties and NCO training", &glossary),
            "Nco [Team Leader] duties and NCO [Team Leader] training"
        );
    }

    #[test]
    fn test_every_occurrence_is_annotated() {
        let glossary = entries(&[("MOS", "Job Role")]);
        let out = annotate("MOS 11B, later MOS 68W", &glossary);
        assert_eq!(out.matches("[Job Role]").count(), 2);
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let glossary = default_glossary();
        let text = "NCOIC of the motor pool; reported to the CO and XO. Prior MOS: 88M. nco course.";
        let once = annotate(text, &glossary);
        let twice = annotate(&once, &glossary);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_idempotent_with_overlapping_multi_word_terms() {
        let glossary = entries(&[
            ("Sergeant", "Supervisor"),
            ("Platoon Sergeant", "Operations Manager"),
        ]);
        let once = annotate("Platoon Sergeant and Sergeant", &glossary);
        assert_eq!(annotate(&once, &glossary), once);
    }

    #[test]
    fn test_terms_inside_inserted_definitions_stay_unannotated() {
        // "CO" is a standalone word inside the NCO definition.
        let glossary = entries(&[("NCO", "CO deputy"), ("CO", "Director")]);
        let once = annotate("NCO duty", &glossary);
        assert_eq!(once, "NCO [CO deputy] duty");
        assert_eq!(annotate(&once, &glossary), once);
    }

    #[test]
    fn test_idempotent_when_definition_contains_closing_bracket() {
        let glossary = entries(&[("NCO", "Team]Lead"), ("Lead", "Boss")]);
        let once = annotate("NCO and Lead", &glossary);
        assert_eq!(once, "NCO [Team]Lead] and Lead [Boss]");
        assert_eq!(annotate(&once, &glossary), once);
    }

    #[test]
    fn test_idempotent_when_definition_contains_opening_bracket() {
        let glossary = entries(&[("XO", "Deputy [2IC"), ("CO", "Director")]);
        let once = annotate("XO then CO", &glossary);
        assert_eq!(once, "XO [Deputy [2IC] then CO [Director]");
        assert_eq!(annotate(&once, &glossary), once);
    }

    #[test]
    fn test_existing_bracketed_text_is_left_alone() {
        let glossary = entries(&[("OIC", "Project Manager")]);
        assert_eq!(
            annotate("Acted as [OIC] then OIC", &glossary),
            "Acted as [OIC] then OIC [Project Manager]"
        );
    }

    #[test]
    fn test_original_text_is_preserved() {
        let glossary = default_glossary();
        let text = "As NCOIC I briefed the CO daily.\nMOS 25B — XO approved.";
        let out = annotate(text, &glossary);
        assert!(out.len() > text.len());
        assert_eq!(strip_annotations(&out, &glossary), text);
    }

    #[test]
    fn test_blank_entries_are_ignored() {
        let glossary = entries(&[("", "Nothing"), ("NCO", " "), ("XO", "Chief of Staff")]);
        assert_eq!(
            annotate("NCO and XO", &glossary),
            "NCO and XO [Chief of Staff]"
        );
    }

    #[test]
    fn test_non_ascii_text_is_handled() {
        let glossary = entries(&[("CO", "Director")]);
        assert_eq!(
            annotate("Café CO — équipe", &glossary),
            "Café CO [Director] — équipe"
        );
        assert_eq!(annotate("ÉCO", &glossary), "ÉCO");
    }

    #[test]
    fn test_bracketed_regions_ignore_unclosed_bracket() {
        assert_eq!(bracketed_regions("a [b] c [d"), vec![2..5]);
    }
}
