use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_LEN: usize = 300;
pub const MAX_LEN: usize = 500;
pub const ELLIPSIS: char = '…';

const SENTENCE_CUTOFF_RATIO: f64 = 0.6;

static FENCED_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid fenced code regex"));
static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`]*`").expect("valid inline code regex"));
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid image regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").expect("valid link regex"));
static SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#>*_\-]").expect("valid markdown symbol regex"));
static NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid newline regex"));
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("valid ws regex"));

/// Link and image syntax is dropped together with its label.
pub fn plain_text(markdown: &str) -> String {
    let text = FENCED_CODE_RE.replace_all(markdown, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = IMAGE_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "");
    let text = SYMBOL_RE.replace_all(&text, "");
    let text = NEWLINES_RE.replace_all(&text, " ");
    let text = SPACES_RE.replace_all(&text, " ");
    text.trim().to_string()
}

pub fn preview(markdown: &str) -> String {
    truncate(&plain_text(markdown))
}

// Lengths are in chars.
pub fn truncate(plain: &str) -> String {
    let chars: Vec<char> = plain.chars().collect();
    let mut candidate: &[char] = &chars[..chars.len().min(MAX_LEN)];

    if candidate.len() >= chars.len() {
        return plain.to_string();
    }

    if candidate.len() < MIN_LEN && chars.len() > MIN_LEN {
        candidate = &chars[..MIN_LEN];
    }

    if let Some(last_period) = candidate.iter().rposition(|c| *c == '.') {
        if last_period as f64 > MIN_LEN as f64 * SENTENCE_CUTOFF_RATIO {
            candidate = &candidate[..=last_period];
        }
    }

    let mut out: String = candidate.iter().collect::<String>().trim().to_string();
    out.push(ELLIPSIS);
    out
}
