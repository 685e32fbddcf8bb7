//! Colloquial specialty names mapped to registry taxonomy descriptions.
//!
//! The registry matches `taxonomy_description` against its own vocabulary, so
//! "Cardiologist" finds nothing while "Cardiovascular Disease" does. Hosts
//! normalise user-facing terms here before the translator sees them.

/// `(colloquial term, registry taxonomy description)` pairs.
pub const SPECIALTY_ALIASES: &[(&str, &str)] = &[
    ("Cardiologist", "Cardiovascular Disease"),
    ("Dermatologist", "Dermatology"),
    ("ENT", "Otolaryngology"),
    ("Ear, Nose and Throat", "Otolaryngology"),
    ("Pediatrician", "Pediatrics"),
    ("Neurologist", "Neurology"),
    ("Psychiatrist", "Psychiatry"),
    ("Ophthalmologist", "Ophthalmology"),
    ("Eye Doctor", "Ophthalmology"),
    ("Gastroenterologist", "Gastroenterology"),
    ("OB/GYN", "Obstetrics & Gynecology"),
    ("Family Doctor", "Family Medicine"),
    ("Orthopedist", "Orthopaedic Surgery"),
];

/// Returns the registry taxonomy description for `term`.
///
/// Matching ignores ASCII case and surrounding whitespace. Unmapped terms are
/// returned trimmed but otherwise unchanged.
#[must_use]
pub fn canonical_taxonomy(term: &str) -> String {
    let term = term.trim();
    SPECIALTY_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(term))
        .map_or_else(|| term.to_string(), |(_, canonical)| (*canonical).to_string())
}

/// Renders the alias table as one `- term -> description` line per entry.
#[must_use]
pub fn mapping_table() -> String {
    SPECIALTY_ALIASES
        .iter()
        .map(|(alias, canonical)| format!("- {alias} -> {canonical}"))
        .collect::<Vec<_>>()
        .join("\n")
}
