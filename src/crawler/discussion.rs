//! Discussion detail-page extraction
//!
//! A detail page has up to four independent sections: the question body, the
//! answer choices, the suggested answer, and the comment thread. Each section
//! is extracted on its own and simply omitted when its markup is absent; a
//! page with none of the four yields no record at all, which downstream code
//! turns into the literal no-content marker so the saved file still says
//! something meaningful.

use crate::crawler::listing::stripped_text;
use scraper::{Html, Selector};

/// Marker written in place of a record when a page had no extractable content
pub const NO_CONTENT_MARKER: &str = "[No content found]";

/// A top-level comment with its directly nested replies
///
/// Only one nesting level exists in the output: replies to replies are
/// flattened into the parent comment's reply list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub user: String,
    pub text: String,
    pub replies: Vec<String>,
}

/// Everything extracted from one discussion detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionRecord {
    pub question: Option<String>,
    pub choices: Vec<String>,
    pub suggested_answer: Option<String>,
    pub comments: Vec<Comment>,
}

impl DiscussionRecord {
    /// Renders the record as the saved text-file body
    ///
    /// Sections appear in fixed order (question, choices, suggested answer,
    /// comments) with a blank line before each non-first section header.
    /// This format is the on-disk compatibility contract.
    pub fn render(&self) -> String {
        let mut out: Vec<String> = Vec::new();

        if let Some(question) = &self.question {
            out.push(format!("📘 Question:\n{}", question));
        }

        if !self.choices.is_empty() {
            out.push("\n📝 Choices:".to_string());
            for choice in &self.choices {
                out.push(choice.clone());
            }
        }

        if let Some(answer) = &self.suggested_answer {
            out.push(format!("\n✅ Suggested Answer:\n{}", answer));
        }

        if !self.comments.is_empty() {
            out.push("\n💬 Comments:".to_string());
            for comment in &self.comments {
                out.push(format!("\n👤 {}: {}", comment.user, comment.text));
                for reply in &comment.replies {
                    out.push(format!("  ↪️ {}", reply));
                }
            }
        }

        out.join("\n")
    }
}

/// Extracts a discussion record from detail-page HTML
///
/// Returns `None` when all four sections are absent, so callers can tell a
/// parsed-but-empty page apart from an empty structure.
pub fn parse_discussion(html: &str) -> Option<DiscussionRecord> {
    let document = Html::parse_document(html);

    let question = select_first_text(&document, "div.question-body p.card-text");
    let choices = select_all_text(
        &document,
        "div.question-choices-container li.multi-choice-item",
    );
    let suggested_answer = select_first_text(&document, "div.question-answer span.correct-answer");
    let comments = extract_comments(&document);

    if question.is_none() && choices.is_empty() && suggested_answer.is_none() && comments.is_empty()
    {
        return None;
    }

    Some(DiscussionRecord {
        question,
        choices,
        suggested_answer,
        comments,
    })
}

/// Text of the first element matching the selector, if any
fn select_first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next().map(stripped_text)
}

/// Texts of all elements matching the selector, in document order
fn select_all_text(document: &Html, css: &str) -> Vec<String> {
    let mut texts = Vec::new();

    if let Ok(selector) = Selector::parse(css) {
        for element in document.select(&selector) {
            texts.push(stripped_text(element));
        }
    }

    texts
}

/// Extracts the comment thread, one nesting level deep
///
/// Comment containers missing a username or body are skipped entirely.
fn extract_comments(document: &Html) -> Vec<Comment> {
    let mut comments = Vec::new();

    let (Ok(container), Ok(username), Ok(content), Ok(reply_content)) = (
        Selector::parse("div.comment-container"),
        Selector::parse(".comment-username"),
        Selector::parse(".comment-content"),
        Selector::parse(".comment-replies .comment-content"),
    ) else {
        return comments;
    };

    for element in document.select(&container) {
        let user = element.select(&username).next().map(stripped_text);
        let text = element.select(&content).next().map(stripped_text);

        let (Some(user), Some(text)) = (user, text) else {
            continue;
        };

        let replies = element.select(&reply_content).map(stripped_text).collect();

        comments.push(Comment {
            user,
            text,
            replies,
        });
    }

    comments
}
