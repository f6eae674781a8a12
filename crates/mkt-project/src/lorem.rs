//! Lorem ipsum filler for generated test pages.

use rand::Rng;
use rand::seq::SliceRandom;

const SENTENCE_TEMPLATES: [&str; 7] = [
    "Lorem ipsum dolor sit amet, {tail}.",
    "Sed do eiusmod tempor {action} ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, {phrase}, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.",
    "Duis aute irure dolor in reprehenderit in {setting} velit esse cillum dolore eu fugiat nulla pariatur.",
    "Excepteur sint occaecat cupidatat {effect}, sunt in culpa qui officia deserunt mollit anim id est laborum.",
    "{intro} consectetur adipiscing elit.",
    "Aenean euismod bibendum laoreet. {extra}",
];

const WORD_CHOICES: [(&str, &[&str]); 7] = [
    (
        "tail",
        &[
            "consectetur adipiscing elit",
            "accumsan et malesuada fames",
            "commodo viverra maecenas accumsan",
        ],
    ),
    (
        "action",
        &["incididunt", "aliquip tempor", "commodo consequat", "reliquaverit noditer"],
    ),
    ("phrase", &["quis minim veniam", "quis nisi", "velit esse"]),
    ("setting", &["voluptate", "laboris", "exercitation"]),
    (
        "effect",
        &["non proident", "culpa magna", "tempor incididunt", "nolenter excpidierunt"],
    ),
    ("intro", &["Maecenas", "Phasellus", "Integer", "Boticellus"]),
    (
        "extra",
        &[
            "Donec vitae sapien ut libero",
            "Curabitur blandit tempus porttitor",
            "Nulla vitae elit libero",
        ],
    ),
];

fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut sentence = SENTENCE_TEMPLATES
        .choose(rng)
        .copied()
        .unwrap_or(SENTENCE_TEMPLATES[0])
        .to_owned();
    for (key, words) in WORD_CHOICES {
        let placeholder = format!("{{{key}}}");
        if !sentence.contains(&placeholder) {
            continue;
        }
        if let Some(word) = words.choose(rng) {
            sentence = sentence.replace(&placeholder, word);
        }
    }
    sentence
}

/// Random Latin filler text.
///
/// Paragraphs are wrapped to `width` columns and separated by one blank
/// line. Every line except the very first is prefixed with `indent`, so the
/// result can be spliced into an indented literal (e.g. a YAML block or a
/// raw string passed through a dedent).
#[must_use]
pub fn lorem_ipsum(paragraphs: usize, indent: &str, width: usize) -> String {
    lorem_ipsum_with(&mut rand::thread_rng(), paragraphs, indent, width)
}

/// [`lorem_ipsum`] with an explicit random source.
#[must_use]
pub fn lorem_ipsum_with<R: Rng + ?Sized>(
    rng: &mut R,
    paragraphs: usize,
    indent: &str,
    width: usize,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    for _ in 0..paragraphs {
        let count = rng.gen_range(4..=7);
        let paragraph = (0..count)
            .map(|_| sentence(rng))
            .collect::<Vec<_>>()
            .join(" ");
        for line in textwrap::wrap(&paragraph, width) {
            if lines.is_empty() {
                lines.push(line.into_owned());
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sentence_fills_placeholders() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let s = sentence(&mut rng);
            assert!(!s.contains('{'), "unfilled placeholder in {s}");
        }
    }

    #[test]
    fn test_lorem_ipsum_wraps_and_indents() {
        let mut rng = StdRng::seed_from_u64(42);
        let text = lorem_ipsum_with(&mut rng, 2, "    ", 40);
        let lines: Vec<&str> = text.lines().collect();

        assert!(!lines[0].starts_with(' '));
        for line in &lines[1..] {
            assert!(line.is_empty() || line.starts_with("    "), "line {line:?}");
            assert!(line.len() <= 44, "line too long: {line:?}");
        }
        assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), 1);
    }

    #[test]
    fn test_lorem_ipsum_is_reproducible() {
        let a = lorem_ipsum_with(&mut StdRng::seed_from_u64(1), 3, "", 60);
        let b = lorem_ipsum_with(&mut StdRng::seed_from_u64(1), 3, "", 60);
        assert_eq!(a, b);
    }

    #[test]
    fn test_lorem_ipsum_zero_paragraphs() {
        assert_eq!(lorem_ipsum(0, "  ", 60), "");
    }

    #[test]
    fn test_lorem_ipsum_default_rng() {
        let text = lorem_ipsum(1, "", 60);
        assert!(!text.is_empty());
        assert!(text.lines().all(|line| line.len() <= 60));
    }
}
