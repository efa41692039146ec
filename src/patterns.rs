//! Built-in pattern tables.
//!
//! Pattern sources are kept as plain tables so that stage constructors can
//! compile them together with user-supplied additions and report which set a
//! bad pattern came from.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Email addresses, as found in Cc lists and signatures.
pub(crate) static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").unwrap());

/// Structured email metadata line (`From:`, `Subject:` ...).
pub(crate) static RE_METADATA_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:From|To|Cc|Sent|Subject|Date)\s*:").unwrap());

/// Business terms. Matched case-insensitively.
pub const PROTECTED_KEYWORDS: &[&str] = &[
    // Core business
    r"\b(?:scheme|claim|invoice|bill|payment|fsn|sku|po\s*#?|order|cn|dn|debit|credit)\b",
    r"\btotal\s+amount\b",
    r"\bvendor\s+name\b",
    // Product and model
    r"\b(?:product|model|brand|item|category)\b",
    // Quantity and stock
    r"\b(?:quantity|qty|units?|stock|pieces?|items?)\b",
    // Pricing
    r"\b(?:price|amount|cost|value|rate|margin)\b",
    r"\b(?:discount|rebate|commission|incentive)\b",
    // Timing
    r"\b(?:effective|deadline|due|valid|expiry)\b",
    // Logistics
    r"\b(?:warehouse|delivery|shipping|truck|transport|dispatch|location|address)\b",
    // Actions
    r"\b(?:submit|provide|attach|send|upload|confirm)\b",
    // Documents
    r"\b(?:document|file|report|screenshot|attachment)\b",
    // Contact details
    r"\b(?:contact|phone|mobile)\b",
    // Identifiers
    r"\b(?:serial|batch|lot|tracking|id)\b",
    // Specifications
    r"\b(?:specification|spec|features?|details?)\b",
    // Currency amounts
    r"[₹€£¥$]\s*\d",
    // Quantities with units
    r"\d+\s*(?:units?|pieces?|kgs?|grams?|litres?|tons?)\b",
    // DD/MM/YYYY, DD-MM-YYYY
    r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
    // 10:30 AM
    r"\d{1,2}:\d{2}\s*(?:AM|PM)",
    // Percentages
    r"\d+\.?\d*\s*%",
];

/// Business identifiers with a recognizable uppercase prefix. Case-sensitive.
pub const BUSINESS_IDENTIFIERS: &[&str] = &[
    // CLM-123, INV-4567, PO-789
    r"\b[A-Z]{2,4}-\d{3,}",
];

/// Phrases that open a disclaimer block. Tried in order.
///
/// Gaps inside a marker stay within one paragraph: a newline is only
/// crossed when the next line has text on it.
pub const DISCLAIMER_START_MARKERS: &[&str] = &[
    r"This e-mail message may contain confidential",
    r"This email(?:[^\n]|\n[ \t]*\S){0,300}?(?:\n[ \t]*)?confidential(?:[^\n]|\n[ \t]*\S){0,300}?(?:\n[ \t]*)?legally protected",
    r"This email and any files transmitted(?:[^\n]|\n[ \t]*\S){0,300}?(?:\n[ \t]*)?confidential",
    r"This message contains confidential information",
    r"Any views or opinions presented in this email",
    r"本电子邮件及其附件含有(?:[^\n]|\n[ \t]*\S){0,200}?(?:\n[ \t]*)?保密信息",
];

/// Phrases that close a disclaimer block.
pub const DISCLAIMER_END_MARKERS: &[&str] = &[
    r"confirmation of any transaction or contract",
    r"attachments are not intended as an offer",
    r"strictly prohibited",
    r"personally liable for any damages",
    r"actions taken on the basis of the information provided",
];

/// High-confidence markers that a quoted thread starts here.
///
/// The "On ... wrote:" attribution starts a line and may wrap once.
pub const THREAD_START_PATTERNS: &[&str] = &[
    r"(?i)-{2,}\s*Forwarded message\s*-{2,}",
    r"(?i)\bBegin forwarded message\s*:",
    r"(?im)^[ \t]*On\s[^\n]{0,200}?(?:\n[^\n]{0,200}?)?\bwrote\s*:",
];

/// Per-line header shapes, besides the metadata line itself.
pub const HEADER_LINE_PATTERNS: &[&str] = &[
    r"(?i)^\s*(?:From|To|Cc|Sent|Subject|Date)\s*:",
    r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b.*?\b(?:AM|PM|at|on)\b",
    r#"(?i)^\s*(?:["']?[\w\s.-]+["']?\s*)?<[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}>"#,
    r"(?i)^\d{1,2}/\d{1,2}/\d{2,4},?\s+\d{1,2}:\d{2}\s*(?:AM|PM)$",
];

/// Footer noise: webmail and tracking links, hidden-quote markers, paging.
pub const FOOTER_PATTERNS: &[&str] = &[
    r"(?i)https?://mail\.google\.com/\S*",
    r"(?i)https?://outlook\.(?:office|office365|live)\.com/\S*",
    r"(?i)https?://\S*[?&](?:utm_[a-z]+|trk|mc_eid|tracking_id)=\S*",
    r"(?i)\[Quoted text hidden\]",
    r"^\d+\s*/\s*\d+$",
    r"(?i)click here to unsubscribe",
    r"(?i)manage preferences",
];

/// Legal vocabulary for density-based disclaimer detection.
pub const DISCLAIMER_KEYWORDS: &[&str] = &[
    "confidential",
    "legally protected",
    "intended solely",
    "disclosure",
    "dissemination",
    "distribution",
    "recipient",
    "notify the sender",
    "delete it permanently",
    "viruses",
    "malicious codes",
    "liability",
    "damages",
    "error",
    "transaction",
    "contract",
    "privilege",
    "prohibited",
    "reliance",
    "omissions",
    "disclaims",
    "attached files",
    "mutations",
    "defamatory",
    "infringement",
    "copyright",
    "electronic transmission",
    "not necessarily secure",
];

/// Direct boilerplate phrases. Matched case-insensitively.
pub const BOILERPLATE_PATTERNS: &[&str] = &[
    r"intended solely for the addressee",
    r"intended solely for the use of the individual",
    r"confidentiality notice",
    r"delete this email",
    r"views or opinions presented",
    r"accepts no liability",
    r"do not reply to this email",
    r"system generated",
    r"this email and any files transmitted",
    r"disclosing, copying, distributing or taking any action",
    r"contrary to organizational policy",
    r"employee responsible will be personally liable",
    r"on behalf of the .* group",
];

/// Compiles a pattern set, optionally prefixing each with the given inline
/// flags. Errors name the set and the pattern.
pub(crate) fn compile_set<'a>(
    set: &'static str,
    flags: &str,
    patterns: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Regex>> {
    patterns
        .into_iter()
        .map(|pattern| {
            Regex::new(&format!("{flags}{pattern}")).map_err(|source| Error::InvalidPattern {
                set,
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}
