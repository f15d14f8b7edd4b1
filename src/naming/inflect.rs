//! English inflection without regex
//!
//! Suffix rules plus small irregular and uncountable tables. Input is
//! treated case-insensitively and the result is lowercase.

/// Irregular plural to singular mappings, sorted by plural for binary search.
static IRREGULARS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("axes", "axis"),
    ("children", "child"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("media", "medium"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("vertices", "vertex"),
    ("women", "woman"),
];

/// Words that are the same in singular and plural form, sorted.
static UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
    "status",
];

/// Words ending in -ies whose singular ends in -ie, sorted.
static IE_WORDS: &[&str] = &["cookies", "movies", "pies", "ties"];

/// Convert a plural English word to its singular form
pub fn singularize_word(word: &str) -> String {
    let word = word.to_lowercase();

    if let Ok(idx) = IRREGULARS.binary_search_by_key(&word.as_str(), |&(plural, _)| plural) {
        return IRREGULARS[idx].1.to_string();
    }
    if UNCOUNTABLE.binary_search(&word.as_str()).is_ok() {
        return word;
    }

    singularize_suffix(&word).unwrap_or(word)
}

fn singularize_suffix(word: &str) -> Option<String> {
    let len = word.len();
    if len < 2 {
        return None;
    }

    if len > 3 && word.ends_with("ies") {
        let prefix = &word[..len - 3];
        if IE_WORDS.binary_search(&word).is_ok() {
            return Some(format!("{prefix}ie"));
        }
        let last = prefix.chars().last()?;
        if !matches!(last, 'a' | 'e' | 'o' | 'u') {
            return Some(format!("{prefix}y"));
        }
    }

    if len > 3 && word.ends_with("ves") {
        let prefix = &word[..len - 3];
        if matches!(prefix, "kni" | "wi" | "li") {
            return Some(format!("{prefix}fe"));
        }
        if ["ea", "oa", "al", "el", "ol"]
            .iter()
            .any(|suffix| prefix.ends_with(suffix))
        {
            return Some(format!("{prefix}f"));
        }
    }

    if len > 2 && word.ends_with("es") {
        let prefix = &word[..len - 2];
        if prefix.ends_with("zz") {
            return Some(prefix[..prefix.len() - 1].to_string());
        }
        if prefix.ends_with("ss")
            || prefix.ends_with('x')
            || prefix.ends_with("ch")
            || prefix.ends_with("sh")
        {
            return Some(prefix.to_string());
        }
    }

    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        let prefix = &word[..len - 1];
        if !prefix.is_empty() {
            return Some(prefix.to_string());
        }
    }

    None
}

/// Convert a singular English word to its plural form
///
/// Words that already look plural are returned unchanged.
pub fn pluralize_word(word: &str) -> String {
    let word = word.to_lowercase();
    if word.is_empty() {
        return word;
    }

    if UNCOUNTABLE.binary_search(&word.as_str()).is_ok() {
        return word;
    }
    if let Some(&(plural, _)) = IRREGULARS.iter().find(|&&(_, singular)| singular == word) {
        return plural.to_string();
    }
    if IRREGULARS.binary_search_by_key(&word.as_str(), |&(plural, _)| plural).is_ok() {
        return word;
    }
    if singularize_suffix(&word).is_some_and(|singular| singular != word) {
        return word;
    }

    let len = word.len();
    if word.ends_with('y') && len > 1 {
        let before = word[..len - 1].chars().last();
        if !matches!(before, Some('a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{}ies", &word[..len - 1]);
        }
    }
    if word.ends_with("fe") && matches!(&word[..len - 2], "kni" | "wi" | "li") {
        return format!("{}ves", &word[..len - 2]);
    }
    if word.ends_with('f')
        && ["ea", "oa", "al", "el", "ol"]
            .iter()
            .any(|suffix| word[..len - 1].ends_with(suffix))
    {
        return format!("{}ves", &word[..len - 1]);
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }

    format!("{word}s")
}
