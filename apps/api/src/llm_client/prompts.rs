// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// How the model must treat glossary annotations in its input.
pub const ANNOTATION_INSTRUCTION: &str = "\
    The input may contain military terms followed by a civilian definition in square brackets, \
    e.g. \"NCO [Team Leader]\". USE the bracketed definition to understand rank and scope. \
    NEVER copy the brackets, the bracketed text, or the military acronym into your output; \
    write the civilian equivalent instead. \
    Example input: \"Served as NCO [Team Leader] for 5 personnel.\" \
    Example output: \"Led a team of 5 personnel.\"";
