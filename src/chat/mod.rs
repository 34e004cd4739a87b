//! Keyword-rule replies for the support chat box.

use crate::catalog::Catalog;
use crate::eligibility::KCET_CATEGORIES;
use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Hello! How can we help you today?";
pub const DEFAULT_REPLY: &str = "Thanks for your message! Our team will get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatTopic {
    Eligibility,
    Kcet,
    Fees,
    Registration,
    Colleges,
    Degrees,
    Greeting,
    Thanks,
    Fallback,
}

/// Rules are checked in order; the first rule with a keyword in the message wins.
const RULES: &[(ChatTopic, &[&str])] = &[
    (
        ChatTopic::Eligibility,
        &["eligible", "eligibility", "qualify", "percentage", "puc"],
    ),
    (ChatTopic::Kcet, &["kcet", "rank", "cutoff", "cutoffs"]),
    (ChatTopic::Fees, &["fee", "fees", "cost", "tuition"]),
    (
        ChatTopic::Registration,
        &["register", "registration", "signup", "account"],
    ),
    (
        ChatTopic::Colleges,
        &["college", "colleges", "university", "universities", "campus"],
    ),
    (
        ChatTopic::Degrees,
        &["degree", "degrees", "course", "courses", "program", "programs"],
    ),
    (ChatTopic::Greeting, &["hello", "hi", "hey", "namaste"]),
    (ChatTopic::Thanks, &["thanks", "thank", "thx"]),
];

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub topic: ChatTopic,
    pub reply: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message must not be blank")]
    EmptyMessage,
}

/// Answers FAQ messages, quoting catalog figures captured at construction.
#[derive(Debug, Clone)]
pub struct FaqResponder {
    degree_count: usize,
    college_count: usize,
    featured_count: usize,
    categories: Vec<String>,
}

impl FaqResponder {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            degree_count: catalog.degrees().len(),
            college_count: catalog.colleges().len(),
            featured_count: catalog.featured_colleges().len(),
            categories: catalog
                .degree_categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    pub fn reply(&self, message: &str) -> Result<ChatReply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let lowered = message.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();

        let topic = RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| words.contains(keyword)))
            .map(|(topic, _)| *topic)
            .unwrap_or(ChatTopic::Fallback);

        Ok(ChatReply {
            topic,
            reply: self.answer(topic),
        })
    }

    fn answer(&self, topic: ChatTopic) -> String {
        match topic {
            ChatTopic::Eligibility => format!(
                "Use the eligibility checker with your PUC stream and percentage to see which of our {} degree programs you qualify for, and the colleges that offer them.",
                self.degree_count
            ),
            ChatTopic::Kcet => format!(
                "Enter your KCET rank and category ({}) in the rank finder to see colleges whose closing rank admits you.",
                KCET_CATEGORIES.join(", ")
            ),
            ChatTopic::Fees => {
                "Fees vary by college and program. Each college page lists its annual fee range.".to_string()
            }
            ChatTopic::Registration => {
                "Register with your name and email, and our education counselors will contact you with tailored recommendations.".to_string()
            }
            ChatTopic::Colleges => format!(
                "We list {} colleges, {} of them featured. You can filter by location and affiliation or sort by rank, rating or name.",
                self.college_count, self.featured_count
            ),
            ChatTopic::Degrees => format!(
                "We cover {} degree programs across {}.",
                self.degree_count,
                self.categories.join(", ")
            ),
            ChatTopic::Greeting => GREETING.to_string(),
            ChatTopic::Thanks => "You're welcome! Let us know if there is anything else.".to_string(),
            ChatTopic::Fallback => DEFAULT_REPLY.to_string(),
        }
    }
}
