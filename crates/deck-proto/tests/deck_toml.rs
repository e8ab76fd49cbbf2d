use deck_proto::deck::parse_deck_from_toml_str;

const SAMPLE: &str = r#"
title = "launch review"

[[slide]]
id = "intro"
title = "Intro"
body = "welcome"
duration_secs = 4.5

[[slide]]
title = "Numbers"

[[slide]]
id = "outro"
duration_secs = 2.0
"#;

#[test]
fn parses_slides_in_file_order() {
    let deck = parse_deck_from_toml_str(SAMPLE, 8.0).unwrap();
    assert_eq!(deck.title, "launch review");
    assert_eq!(deck.len(), 3);
    assert_eq!(
        deck.segment_ids(),
        vec!["intro".to_string(), "slide-02".to_string(), "outro".to_string()]
    );
}

#[test]
fn missing_duration_falls_back_to_default() {
    let deck = parse_deck_from_toml_str(SAMPLE, 8.0).unwrap();
    assert_eq!(deck.slides[0].duration_secs, 4.5);
    assert_eq!(deck.slides[1].duration_secs, 8.0);
}

#[test]
fn missing_title_falls_back_to_id() {
    let deck = parse_deck_from_toml_str(SAMPLE, 8.0).unwrap();
    assert_eq!(deck.slides[2].title, "outro");
}

#[test]
fn duplicate_slide_id_is_an_error() {
    let toml = r#"
        [[slide]]
        id = "a"
        [[slide]]
        id = "a"
    "#;
    let err = parse_deck_from_toml_str(toml, 8.0).unwrap_err();
    assert!(err.to_string().contains("duplicate slide id"));
}

#[test]
fn empty_deck_is_an_error() {
    let err = parse_deck_from_toml_str("title = \"empty\"", 8.0).unwrap_err();
    assert!(err.to_string().contains("no slides"));
}
