//! Turn raw provider records into display-ready `Item`s.
//!
//! Karaoke uploads carry noisy titles such as
//! `"Queen - Bohemian Rhapsody (Karaoke Version)"`. The artist is guessed
//! from the title and both fields are stripped of karaoke boilerplate.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::{Item, ProviderVideo};

/// Genre attached to every item.
pub const DEFAULT_GENRE: &str = "Karaoke";

static ARTIST_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^-()]+?)(?:\s*-\s*|\s*\()").expect("artist pattern"));

static TITLE_NOISE: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\(karaoke\s*(version|instrumental)?\)").expect("title pattern"),
        Regex::new(r"(?i)\[karaoke\s*(version|instrumental)?\]").expect("title pattern"),
        Regex::new(r"(?i)karaoke\s*(version|instrumental)?").expect("title pattern"),
        Regex::new(r"(?i)instrumental\s*version").expect("title pattern"),
    ]
});

static ARTIST_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)karaoke|official").expect("artist noise pattern"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Strip karaoke markers from a video title.
pub fn clean_title(title: &str) -> String {
    let cleaned = TITLE_NOISE
        .iter()
        .fold(title.to_string(), |acc, re| re.replace_all(&acc, "").into_owned());
    collapse_whitespace(&cleaned)
}

/// Strip karaoke/official markers from an artist name.
pub fn clean_artist(artist: &str) -> String {
    collapse_whitespace(&ARTIST_NOISE.replace_all(artist, ""))
}

/// Best-effort artist guess from a raw title, falling back to the channel.
pub fn extract_artist(title: &str, channel_title: &str) -> String {
    if let Some((artist, _)) = title.split_once(" - ") {
        return artist.to_string();
    }
    ARTIST_PREFIX
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| channel_title.to_string(), |m| m.as_str().trim().to_string())
}

/// Build the canonical item for a provider record.
pub fn to_item(video: &ProviderVideo, duration_iso: Option<String>) -> Item {
    let mut artist = clean_artist(&extract_artist(&video.title, &video.channel_title));
    if artist.is_empty() {
        artist = clean_artist(&video.channel_title);
    }

    Item {
        id: video.id.clone(),
        title: clean_title(&video.title),
        artist,
        genre: DEFAULT_GENRE.to_string(),
        source_id: video.id.clone(),
        thumbnail_url: video.thumbnail_url.clone(),
        duration_iso,
        channel_title: Some(video.channel_title.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn video(title: &str, channel: &str) -> ProviderVideo {
        ProviderVideo {
            id: "vid123".to_string(),
            title: title.to_string(),
            channel_title: channel.to_string(),
            thumbnail_url: "https://i.ytimg.com/vi/vid123/hqdefault.jpg".to_string(),
        }
    }

    #[test]
    fn test_clean_title_variants() {
        assert_eq!(
            clean_title("Queen - Bohemian Rhapsody (Karaoke Version)"),
            "Queen - Bohemian Rhapsody"
        );
        assert_eq!(clean_title("Hello [KARAOKE INSTRUMENTAL]"), "Hello");
        assert_eq!(clean_title("Wonderwall karaoke   with lyrics"), "Wonderwall with lyrics");
        assert_eq!(clean_title("Let It Go Instrumental Version"), "Let It Go");
        assert_eq!(clean_title("  Plain   Title "), "Plain Title");
    }

    #[test]
    fn test_artist_from_dash_delimiter() {
        assert_eq!(extract_artist("Queen - Bohemian Rhapsody", "Sing King"), "Queen");
        assert_eq!(extract_artist("A - B - C", "chan"), "A");
    }

    #[test]
    fn test_artist_from_prefix_pattern() {
        assert_eq!(extract_artist("Adele (Hello Karaoke)", "Sing King"), "Adele");
        assert_eq!(extract_artist("Toto-Africa", "chan"), "Toto");
    }

    #[test]
    fn test_artist_falls_back_to_channel() {
        assert_eq!(extract_artist("Hello", "Sing King"), "Sing King");
    }

    #[test]
    fn test_to_item() {
        let item = to_item(
            &video("Queen - Bohemian Rhapsody (Karaoke Version)", "Sing King"),
            Some("PT5M55S".to_string()),
        );
        assert_eq!(item.id, "vid123");
        assert_eq!(item.source_id, "vid123");
        assert_eq!(item.title, "Queen - Bohemian Rhapsody");
        assert_eq!(item.artist, "Queen");
        assert_eq!(item.genre, "Karaoke");
        assert_eq!(item.duration_iso.as_deref(), Some("PT5M55S"));
        assert_eq!(item.channel_title.as_deref(), Some("Sing King"));
    }

    #[test]
    fn test_empty_artist_uses_channel() {
        let item = to_item(&video("Karaoke - Something", "Sing King Karaoke"), None);
        assert_eq!(item.artist, "Sing King");
    }

    proptest! {
        #[test]
        fn cleaned_titles_have_normalized_whitespace(title in ".{0,80}") {
            let cleaned = clean_title(&title);
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
            prop_assert!(!cleaned.contains("  "));
        }

        #[test]
        fn titles_without_markers_only_lose_whitespace(
            words in prop::collection::vec("[a-jl-z]{1,8}", 1..6)
        ) {
            let title = words.join("   ");
            prop_assert_eq!(clean_title(&title), words.join(" "));
        }
    }
}
