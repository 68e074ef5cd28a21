//! Topical domain detection over transcript text and code.
//!
//! Selected domains steer which visual vocabulary the prompt permits; they
//! are not part of the validated contract.

/// Keyword list per domain. Only cs_arch is populated today; the empty
/// sets keep their slots so scores stay comparable as lists are curated.
const DOMAIN_KEYWORDS: [(&str, &[&str]); 3] = [
    (
        "cs_arch",
        &[
            "pointer",
            "pointers",
            "array",
            "arrays",
            "dereference",
            "malloc",
            "free",
            "stack",
            "heap",
            "sizeof",
            "alignment",
            "endianness",
            "address",
            "memory",
        ],
    ),
    ("math", &[]),
    ("chem_bio", &[]),
];

/// A domain must clear this hit-ratio score to be selected.
const SELECTION_THRESHOLD: f64 = 0.55;

/// At most this many domains are selected, highest score first.
const MAX_SELECTED: usize = 2;

#[derive(Debug, Clone)]
pub struct DomainScore {
    pub id: &'static str,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct DomainDetection {
    pub domains: Vec<DomainScore>,
    pub selected: Vec<&'static str>,
}

/// Score every domain against the combined transcript + code text.
pub fn detect_domains(transcript_chunk: &str, code_snippets: &[String]) -> DomainDetection {
    let text = format!("{}\n{}", transcript_chunk, code_snippets.join("\n")).to_lowercase();

    let domains: Vec<DomainScore> = DOMAIN_KEYWORDS
        .iter()
        .map(|&(id, keywords)| {
            if keywords.is_empty() {
                return DomainScore { id, score: 0.0 };
            }
            let hits = keywords.iter().filter(|&&k| text.contains(k)).count();
            DomainScore {
                id,
                score: (hits as f64 / 3.0).min(1.0),
            }
        })
        .collect();

    let mut selected: Vec<&DomainScore> = domains
        .iter()
        .filter(|d| d.score >= SELECTION_THRESHOLD)
        .collect();
    selected.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    let selected = selected
        .into_iter()
        .take(MAX_SELECTED)
        .map(|d| d.id)
        .collect();

    DomainDetection { domains, selected }
}
