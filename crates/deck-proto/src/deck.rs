use serde::Deserialize;
use std::collections::HashSet;

/// One slide of a deck. `id` is the stable identity used by the progress
/// strip; `duration_secs` drives autoplay pacing.
#[derive(Debug, Clone)]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub body: String,
    pub duration_secs: f64,
}

#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Ordered slide ids — the segment list published to the UI store.
    pub fn segment_ids(&self) -> Vec<String> {
        self.slides.iter().map(|s| s.id.clone()).collect()
    }
}

// ── TOML deck loader ──────────────────────────────────────────────────────────

/// Intermediate struct that matches the TOML `[[slide]]` table.
/// We keep this separate from `Slide` so the file schema can diverge from
/// the in-memory model without breaking either.
#[derive(Debug, Deserialize)]
struct TomlDeckFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    slide: Vec<TomlSlide>,
}

#[derive(Debug, Deserialize)]
struct TomlSlide {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    duration_secs: f64,
}

pub fn load_deck_from_toml(
    path: &std::path::Path,
    default_slide_secs: f64,
) -> anyhow::Result<Deck> {
    let content = std::fs::read_to_string(path)?;
    parse_deck_from_toml_str(&content, default_slide_secs)
}

pub fn parse_deck_from_toml_str(content: &str, default_slide_secs: f64) -> anyhow::Result<Deck> {
    let file: TomlDeckFile = toml::from_str(content)?;
    if file.slide.is_empty() {
        anyhow::bail!("deck has no slides");
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut slides = Vec::with_capacity(file.slide.len());
    for (i, s) in file.slide.into_iter().enumerate() {
        let id = if s.id.trim().is_empty() {
            format!("slide-{:02}", i + 1)
        } else {
            s.id.trim().to_string()
        };
        if !seen.insert(id.clone()) {
            anyhow::bail!("duplicate slide id: {id}");
        }
        let title = if s.title.is_empty() { id.clone() } else { s.title };
        let duration_secs = if s.duration_secs > 0.0 {
            s.duration_secs
        } else {
            default_slide_secs
        };
        slides.push(Slide {
            id,
            title,
            body: s.body,
            duration_secs,
        });
    }

    let title = if file.title.is_empty() {
        "untitled deck".to_string()
    } else {
        file.title
    };

    Ok(Deck { title, slides })
}

// ── Demo deck ─────────────────────────────────────────────────────────────────

/// Generated placeholder deck used when no deck file is found. Large enough
/// that the strip's window + overflow-marker path is exercised immediately.
pub fn demo_deck(n: usize, default_slide_secs: f64) -> Deck {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let slides = (0..n)
        .map(|i| {
            let jitter: f64 = rng.gen_range(0.5..1.5);
            Slide {
                id: format!("slide-{:02}", i + 1),
                title: format!("Slide {}", i + 1),
                body: format!(
                    "Demo slide {} of {}.\n\nDrop a deck.toml into the config \
                     directory (or pass a path on the command line) to play \
                     your own deck.",
                    i + 1,
                    n
                ),
                duration_secs: default_slide_secs * jitter,
            }
        })
        .collect();

    Deck {
        title: format!("demo deck ({n} slides)"),
        slides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_deck_ids_are_unique() {
        let deck = demo_deck(50, 8.0);
        let ids = deck.segment_ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_demo_deck_durations_positive() {
        let deck = demo_deck(10, 8.0);
        assert!(deck.slides.iter().all(|s| s.duration_secs > 0.0));
    }
}
