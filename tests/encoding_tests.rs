// Tests for format negotiation, extension mapping, and clip assembly.
//
// These are the pure tables and functions behind the capture session's
// fallback behavior, so they are tested without any I/O.

use intervox::api::language_name;
use intervox::encoding::{
    extension_for, negotiate_format, AudioClip, CANDIDATE_FORMATS, FALLBACK_FORMAT,
};

#[test]
fn negotiation_returns_first_supported_candidate() {
    // Everything supported: the most-preferred candidate wins.
    let chosen = negotiate_format(|_| true);
    assert_eq!(chosen, Some("audio/webm;codecs=opus"));

    // Only later candidates supported: the earliest of them wins.
    let chosen = negotiate_format(|f| f == "audio/ogg" || f == "audio/wav");
    assert_eq!(chosen, Some("audio/ogg"));

    let chosen = negotiate_format(|f| f == "audio/wav");
    assert_eq!(chosen, Some("audio/wav"));
}

#[test]
fn negotiation_respects_priority_order_for_every_suffix() {
    // For each candidate, supporting it and everything after it must
    // return exactly that candidate, never a later one.
    for (i, expected) in CANDIDATE_FORMATS.iter().enumerate() {
        let supported: Vec<&str> = CANDIDATE_FORMATS[i..].to_vec();
        let chosen = negotiate_format(|f| supported.contains(&f));
        assert_eq!(chosen, Some(*expected));
    }
}

#[test]
fn negotiation_with_no_support_defers_to_platform_default() {
    assert_eq!(negotiate_format(|_| false), None);
}

#[test]
fn extension_mapping_covers_all_candidates() {
    assert_eq!(extension_for("audio/webm;codecs=opus"), "webm");
    assert_eq!(extension_for("audio/webm"), "webm");
    assert_eq!(extension_for("audio/ogg"), "ogg");
    assert_eq!(extension_for("audio/mp4"), "mp4");
    assert_eq!(extension_for("audio/mpeg"), "mp3");
    assert_eq!(extension_for("audio/wav"), "wav");
    // Unknown tags default to webm.
    assert_eq!(extension_for("audio/3gpp"), "webm");
}

#[test]
fn assembly_concatenates_chunks_in_order() {
    let chunks = vec![vec![1u8, 2, 3], vec![4u8, 5], vec![6u8]];
    let clip = AudioClip::assemble(&chunks, Some("audio/ogg"));

    assert_eq!(clip.len(), 6);
    assert_eq!(clip.bytes(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(clip.format(), "audio/ogg");
    assert_eq!(clip.extension(), "ogg");
    assert_eq!(clip.upload_filename(), "speech.ogg");
}

#[test]
fn assembly_discards_zero_length_chunks() {
    let chunks = vec![vec![], vec![7u8, 8], vec![], vec![9u8]];
    let clip = AudioClip::assemble(&chunks, Some("audio/wav"));

    assert_eq!(clip.bytes(), &[7, 8, 9]);
}

#[test]
fn assembly_byte_length_equals_sum_of_chunk_lengths() {
    let chunks = vec![vec![0u8; 500], vec![0u8; 400]];
    let clip = AudioClip::assemble(&chunks, Some("audio/webm"));

    assert_eq!(clip.len(), 900);
}

#[test]
fn assembly_without_format_tag_falls_back() {
    let clip = AudioClip::assemble(&[vec![1u8]], None);
    assert_eq!(clip.format(), FALLBACK_FORMAT);
    assert_eq!(clip.upload_filename(), "speech.webm");

    let clip = AudioClip::assemble(&[vec![1u8]], Some(""));
    assert_eq!(clip.format(), FALLBACK_FORMAT);
}

#[test]
fn empty_assembly_is_empty() {
    let clip = AudioClip::assemble(&[], Some("audio/webm"));
    assert!(clip.is_empty());
    assert_eq!(clip.len(), 0);
}

#[test]
fn language_names_map_known_codes_and_pass_through_unknown() {
    assert_eq!(language_name("en"), "English");
    assert_eq!(language_name("ja"), "Japanese");
    assert_eq!(language_name("my"), "Burmese");
    assert_eq!(language_name("pt"), "pt");
}
