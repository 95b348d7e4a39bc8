//! Recovers student identity from submission filenames such as
//! `JaneDoe_A123456B_Assignment1.txt` or `20231042-Lee-logic.txt`.

use std::sync::OnceLock;

use regex::Regex;

use super::domain::StudentIdentity;

/// Accepted student ID shapes, checked in order. First match wins.
const ID_PATTERNS: [&str; 4] = [
    r"[A-Z]\d{6}[A-Z]",
    r"[A-Z]{2}\d{6}",
    r"\d{8,10}",
    r"[A-Z]\d{7}",
];

fn id_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ID_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("static id pattern compiles"))
            .collect()
    })
}

fn delimiters() -> &'static Regex {
    static DELIMITERS: OnceLock<Regex> = OnceLock::new();
    DELIMITERS.get_or_init(|| Regex::new(r"[_\-\s]+").expect("static delimiter pattern compiles"))
}

fn word_fragment() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[A-Za-z]{2,}").expect("static word pattern compiles"))
}

/// Parse `filename` into an identity. The extension is dropped first; the
/// name is assembled from every delimiter-separated part that is not the ID
/// and carries at least two consecutive letters, then title-cased.
pub fn parse_filename(filename: &str) -> StudentIdentity {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename);

    let student_id = id_patterns()
        .iter()
        .find_map(|pattern| pattern.find(stem))
        .map(|found| found.as_str().to_string());

    let student_name = student_id.as_deref().and_then(|id| {
        let parts: Vec<&str> = delimiters()
            .split(stem)
            .filter(|part| *part != id && word_fragment().is_match(part))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(title_case(&parts.join(" ")))
        }
    });

    StudentIdentity {
        student_id,
        student_name,
    }
}

fn title_case(raw: &str) -> String {
    raw.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_id_with_underscores() {
        let identity = parse_filename("JohnSmith_A123456B_Assignment1.txt");
        assert_eq!(identity.student_id.as_deref(), Some("A123456B"));
        assert_eq!(identity.student_name.as_deref(), Some("Johnsmith Assignment1"));
    }

    #[test]
    fn parses_numeric_id_with_dashes() {
        let identity = parse_filename("20231042-Lee-logic.txt");
        assert_eq!(identity.student_id.as_deref(), Some("20231042"));
        assert_eq!(identity.student_name.as_deref(), Some("Lee Logic"));
    }

    #[test]
    fn missing_id_leaves_identity_empty() {
        let identity = parse_filename("assignment.txt");
        assert_eq!(identity.student_id, None);
        assert_eq!(identity.student_name, None);
    }

    #[test]
    fn id_only_filename_has_no_name() {
        let identity = parse_filename("AB123456.txt");
        assert_eq!(identity.student_id.as_deref(), Some("AB123456"));
        assert_eq!(identity.student_name, None);
    }

    #[test]
    fn handles_filenames_without_extension() {
        let identity = parse_filename("Maria_Garcia_B9876543");
        assert_eq!(identity.student_id.as_deref(), Some("B9876543"));
        assert_eq!(identity.student_name.as_deref(), Some("Maria Garcia"));
    }
}
