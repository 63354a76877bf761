//! Accordion extraction.
//!
//! The FAQ page renders each topic group as a `div.accordion` whose
//! immediate children are card blocks: an `h4` holds the question and a
//! `div.card-body` holds the answer. A block missing either element is
//! skipped, not an error — the page mixes cards with decorative markup.

use askbot_core::faq::QaPair;
use scraper::{ElementRef, Html, Selector};

/// Extract every question/answer pair from the page markup.
///
/// Question text keeps only its trimmed form; answer text is the join of
/// all descendant text nodes with every whitespace run collapsed to a
/// single space, which flattens the newlines and tabs nested markup
/// produces.
pub fn extract_pairs(html: &str) -> Vec<QaPair> {
    let document = Html::parse_document(html);
    let accordion_sel = Selector::parse("div.accordion").unwrap();
    let question_sel = Selector::parse("h4").unwrap();
    let answer_sel = Selector::parse("div.card-body").unwrap();

    let mut pairs = Vec::new();
    for accordion in document.select(&accordion_sel) {
        // Immediate children only — nested accordions are not a thing on
        // this page, and descending further would double-count cards.
        for block in accordion.children().filter_map(ElementRef::wrap) {
            let Some(question_el) = block.select(&question_sel).next() else {
                continue;
            };
            let Some(answer_el) = block.select(&answer_sel).next() else {
                continue;
            };

            let question = question_el.text().collect::<String>().trim().to_string();
            let answer = collapse_whitespace(&answer_el.text().collect::<Vec<_>>().join(" "));

            if question.is_empty() || answer.is_empty() {
                continue;
            }
            pairs.push(QaPair { question, answer });
        }
    }
    pairs
}

/// Collapse every run of whitespace into a single space.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
