// Prompt constants for the document pipeline. Each stage is a fresh
// conversation: system prompt plus the raw document text as the user turn.

/// System prompt for the classification stage.
pub const CLASSIFY_SYSTEM: &str = "You are a document classification expert. \
    Classify the document into one of the following categories: \
    Resume, Cover Letter, or Unknown.";

/// System prompt for the resume extraction stage.
pub const EXTRACT_SYSTEM: &str = "You are a resume data extraction expert. \
    Extract the following information from the resume: name, contact \
    information, education, years of experience, skills, work experience, \
    salary expectation, location, and open source projects.";
