use std::collections::BTreeSet;

use regex::Regex;

/// Word, line, and character counts computed once per evaluation and shared
/// by every category scorer.
#[derive(Debug)]
pub(crate) struct TextProfile {
    pub(crate) lower: String,
    pub(crate) raw_chars: usize,
    pub(crate) trimmed_chars: usize,
    pub(crate) meaningful_words: usize,
    pub(crate) unique_words: usize,
    pub(crate) non_blank_lines: usize,
    pub(crate) total_lines: usize,
    pub(crate) indented_lines: usize,
}

impl TextProfile {
    pub(crate) fn of(text: &str) -> Self {
        let meaningful: Vec<&str> = text
            .split_whitespace()
            .filter(|token| is_meaningful(token))
            .collect();
        let unique: BTreeSet<String> =
            meaningful.iter().map(|token| token.to_lowercase()).collect();

        Self {
            lower: text.to_lowercase(),
            raw_chars: text.chars().count(),
            trimmed_chars: text.trim().chars().count(),
            meaningful_words: meaningful.len(),
            unique_words: unique.len(),
            non_blank_lines: text.lines().filter(|line| !line.trim().is_empty()).count(),
            total_lines: text.split('\n').count(),
            indented_lines: text
                .lines()
                .filter(|line| line.starts_with("    ") || line.starts_with('\t'))
                .count(),
        }
    }

    fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.lower.contains(keyword))
    }

    fn count_present(&self, keywords: &[&str]) -> usize {
        keywords
            .iter()
            .filter(|keyword| self.lower.contains(*keyword))
            .count()
    }
}

/// A token counts toward the word gates when it is longer than two characters
/// and not purely numeric.
fn is_meaningful(token: &str) -> bool {
    token.chars().count() > 2 && !token.chars().all(|c| c.is_ascii_digit())
}

/// Minimum-content thresholds applied before any signal runs. A failed gate
/// short-circuits the category to score 0 with a single explanatory note, so
/// near-empty submissions cannot collect incidental keyword credit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContentGate {
    pub(crate) min_trimmed_chars: usize,
    pub(crate) min_words: usize,
    pub(crate) min_unique_words: usize,
    pub(crate) min_lines: usize,
    pub(crate) note: &'static str,
}

impl ContentGate {
    pub(crate) fn passes(&self, profile: &TextProfile) -> bool {
        profile.trimmed_chars >= self.min_trimmed_chars
            && profile.meaningful_words >= self.min_words
            && profile.unique_words >= self.min_unique_words
            && profile.non_blank_lines >= self.min_lines
    }
}

/// One tier of a tiered signal. Count tiers match on `count >= min`; length
/// bonuses match on `value > min` (mutually exclusive, highest tier wins).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tier {
    pub(crate) min: usize,
    pub(crate) points: u32,
    pub(crate) note: Option<&'static str>,
}

/// Which line counter a line bonus reads.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LineBasis {
    Total,
    NonBlank,
}

/// One declarative scoring signal. Category logic is a list of these plus a
/// gate; [`accumulate`] is the only interpreter. Keyword checks are
/// case-insensitive substring containment.
#[derive(Debug)]
pub(crate) enum Signal {
    /// Fixed points when at least one keyword appears.
    Presence {
        keywords: &'static [&'static str],
        points: u32,
        note: &'static str,
    },
    /// Points per distinct keyword present, capped.
    Counted {
        keywords: &'static [&'static str],
        per_match: u32,
        cap: u32,
        note: &'static str,
    },
    /// Highest tier whose minimum distinct-keyword count is met.
    CountTiers {
        keywords: &'static [&'static str],
        tiers: &'static [Tier],
    },
    /// Fixed points when any pattern matches the raw text.
    PatternPresence {
        patterns: Vec<Regex>,
        points: u32,
        note: &'static str,
    },
    /// Points per pattern occurrence summed across all patterns, capped.
    PatternCounted {
        patterns: Vec<Regex>,
        per_match: u32,
        cap: u32,
        note: &'static str,
    },
    /// Opener/closer keyword pairs score higher together than either alone.
    PairedKeywords {
        openers: &'static [&'static str],
        closers: &'static [&'static str],
        both_points: u32,
        both_note: &'static str,
        either_points: u32,
        either_note: &'static str,
    },
    /// Leading indentation as a structural proxy; the full bonus needs more
    /// than three non-blank lines to back it up.
    Indentation {
        full_points: u32,
        partial_points: u32,
        note: &'static str,
    },
    /// Tiered count of header-looking lines (anchored, case-sensitive).
    HeaderLines {
        patterns: Vec<Regex>,
        tiers: &'static [Tier],
    },
    /// Points when the pattern does NOT match anywhere (e.g. no 80-letter
    /// garbage runs).
    CleanText {
        pattern: Regex,
        points: u32,
        note: &'static str,
    },
    /// Highest raw-character tier strictly exceeded.
    CharBonus { tiers: &'static [Tier] },
    /// Points when the line count strictly exceeds `over`.
    LineBonus {
        basis: LineBasis,
        over: usize,
        points: u32,
        note: Option<&'static str>,
    },
    /// Unconditional panic, for exercising the engine's fail-safe path.
    #[cfg(test)]
    Panic,
}

/// Run every signal against the text, returning the raw point total and the
/// feedback notes of the signals that fired, in definition order.
pub(crate) fn accumulate(
    text: &str,
    profile: &TextProfile,
    signals: &[Signal],
) -> (u32, Vec<String>) {
    let mut raw = 0u32;
    let mut notes: Vec<String> = Vec::new();

    for signal in signals {
        match signal {
            Signal::Presence {
                keywords,
                points,
                note,
            } => {
                if profile.contains_any(keywords) {
                    raw += points;
                    notes.push((*note).to_string());
                }
            }
            Signal::Counted {
                keywords,
                per_match,
                cap,
                note,
            } => {
                let count = profile.count_present(keywords) as u32;
                if count >= 1 {
                    raw += (count * per_match).min(*cap);
                    notes.push((*note).to_string());
                }
            }
            Signal::CountTiers { keywords, tiers } => {
                let count = profile.count_present(keywords);
                if let Some(tier) = tiers.iter().find(|tier| count >= tier.min) {
                    raw += tier.points;
                    if let Some(note) = tier.note {
                        notes.push(note.to_string());
                    }
                }
            }
            Signal::PatternPresence {
                patterns,
                points,
                note,
            } => {
                if patterns.iter().any(|pattern| pattern.is_match(text)) {
                    raw += points;
                    notes.push((*note).to_string());
                }
            }
            Signal::PatternCounted {
                patterns,
                per_match,
                cap,
                note,
            } => {
                let count: usize = patterns
                    .iter()
                    .map(|pattern| pattern.find_iter(text).count())
                    .sum();
                if count >= 1 {
                    raw += (count as u32 * per_match).min(*cap);
                    notes.push((*note).to_string());
                }
            }
            Signal::PairedKeywords {
                openers,
                closers,
                both_points,
                both_note,
                either_points,
                either_note,
            } => {
                let opened = profile.contains_any(openers);
                let closed = profile.contains_any(closers);
                if opened && closed {
                    raw += both_points;
                    notes.push((*both_note).to_string());
                } else if opened || closed {
                    raw += either_points;
                    notes.push((*either_note).to_string());
                }
            }
            Signal::Indentation {
                full_points,
                partial_points,
                note,
            } => {
                if profile.indented_lines >= 1 {
                    if profile.non_blank_lines > 3 {
                        raw += full_points;
                        notes.push((*note).to_string());
                    } else {
                        raw += partial_points;
                    }
                }
            }
            Signal::HeaderLines { patterns, tiers } => {
                let count = text
                    .split('\n')
                    .filter(|line| patterns.iter().any(|pattern| pattern.is_match(line)))
                    .count();
                if let Some(tier) = tiers.iter().find(|tier| count >= tier.min) {
                    raw += tier.points;
                    if let Some(note) = tier.note {
                        notes.push(note.to_string());
                    }
                }
            }
            Signal::CleanText {
                pattern,
                points,
                note,
            } => {
                if !pattern.is_match(text) {
                    raw += points;
                    notes.push((*note).to_string());
                }
            }
            Signal::CharBonus { tiers } => {
                if let Some(tier) = tiers.iter().find(|tier| profile.raw_chars > tier.min) {
                    raw += tier.points;
                    if let Some(note) = tier.note {
                        notes.push(note.to_string());
                    }
                }
            }
            Signal::LineBonus {
                basis,
                over,
                points,
                note,
            } => {
                let count = match basis {
                    LineBasis::Total => profile.total_lines,
                    LineBasis::NonBlank => profile.non_blank_lines,
                };
                if count > *over {
                    raw += points;
                    if let Some(note) = note {
                        notes.push(note.to_string());
                    }
                }
            }
            #[cfg(test)]
            Signal::Panic => panic!("signal interpreter panicked"),
        }
    }

    (raw, notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_counts_meaningful_words() {
        let profile = TextProfile::of("an algorithm reads 42 tokens\nand 7 lines\n");
        // "algorithm", "reads", "tokens", "and", "lines" survive; "an", "42", "7" do not.
        assert_eq!(profile.meaningful_words, 5);
        assert_eq!(profile.unique_words, 5);
        assert_eq!(profile.non_blank_lines, 2);
        assert_eq!(profile.total_lines, 3);
    }

    #[test]
    fn profile_detects_indentation() {
        let profile = TextProfile::of("header\n    indented\n\ttabbed\nplain");
        assert_eq!(profile.indented_lines, 2);
    }

    #[test]
    fn counted_signal_caps_accumulation() {
        let text = "problem goal input output task question";
        let profile = TextProfile::of(text);
        let signals = [Signal::Counted {
            keywords: &["problem", "goal", "input", "output", "task", "question"],
            per_match: 3,
            cap: 12,
            note: "breadth",
        }];
        let (raw, notes) = accumulate(text, &profile, &signals);
        // Six distinct keywords at 3 points each would be 18; the cap holds it at 12.
        assert_eq!(raw, 12);
        assert_eq!(notes, vec!["breadth".to_string()]);
    }

    #[test]
    fn count_tiers_pick_only_the_highest_tier() {
        let text = "start end process";
        let profile = TextProfile::of(text);
        let signals = [Signal::CountTiers {
            keywords: &["start", "end", "process", "decision"],
            tiers: &[
                Tier {
                    min: 3,
                    points: 12,
                    note: Some("rich"),
                },
                Tier {
                    min: 2,
                    points: 8,
                    note: Some("basic"),
                },
                Tier {
                    min: 1,
                    points: 5,
                    note: Some("some"),
                },
            ],
        }];
        let (raw, notes) = accumulate(text, &profile, &signals);
        assert_eq!(raw, 12);
        assert_eq!(notes, vec!["rich".to_string()]);
    }

    #[test]
    fn paired_keywords_distinguish_both_from_either() {
        let both = "begin then end";
        let profile = TextProfile::of(both);
        let signals = [Signal::PairedKeywords {
            openers: &["begin", "start"],
            closers: &["end"],
            both_points: 8,
            both_note: "paired",
            either_points: 4,
            either_note: "partial",
        }];
        let (raw, notes) = accumulate(both, &profile, &signals);
        assert_eq!((raw, notes.len()), (8, 1));

        let only_open = "begin then continue";
        let profile = TextProfile::of(only_open);
        let (raw, notes) = accumulate(only_open, &profile, &signals);
        assert_eq!(raw, 4);
        assert_eq!(notes, vec!["partial".to_string()]);
    }

    #[test]
    fn char_bonus_uses_strictly_greater_tiers() {
        let text = "x".repeat(200);
        let profile = TextProfile::of(&text);
        let signals = [Signal::CharBonus {
            tiers: &[Tier {
                min: 200,
                points: 4,
                note: None,
            }],
        }];
        let (raw, _) = accumulate(&text, &profile, &signals);
        assert_eq!(raw, 0, "exactly 200 chars does not exceed the 200 tier");

        let text = "x".repeat(201);
        let profile = TextProfile::of(&text);
        let (raw, _) = accumulate(&text, &profile, &signals);
        assert_eq!(raw, 4);
    }

    #[test]
    fn clean_text_rewards_absence_of_garbage_runs() {
        let pattern = Regex::new("[a-z]{80,}").expect("static pattern compiles");
        let signals = [Signal::CleanText {
            pattern,
            points: 3,
            note: "clean",
        }];
        let clean = "short words only";
        let profile = TextProfile::of(clean);
        let (raw, _) = accumulate(clean, &profile, &signals);
        assert_eq!(raw, 3);

        let garbage = "a".repeat(120);
        let profile = TextProfile::of(&garbage);
        let (raw, notes) = accumulate(&garbage, &profile, &signals);
        assert_eq!((raw, notes.len()), (0, 0));
    }
}
