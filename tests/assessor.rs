//! Integration tests for the assessor and the built-in registry

use pretty_assertions::assert_eq;
use seo_assess::{
    assess, AssessError, AssessmentResult, Assessor, Document, DocumentOptions, FnAssessment,
    Preset, Registry, RegistryError, RuleError, ValidityPolicy,
};
use std::sync::Arc;

fn doc(text: &str, options: DocumentOptions) -> Document {
    Document::with_options(text, options).unwrap()
}

fn words(n: usize, word: &str) -> String {
    vec![word; n].join(" ")
}

fn valid_ids(document: &Document) -> Vec<String> {
    assess(document)
        .unwrap()
        .valid_ids()
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn test_empty_document() {
    assert_eq!(
        valid_ids(&Document::new("")),
        ["keyphraseLength", "metaDescriptionLength", "textLength", "titleWidth"]
    );
}

#[test]
fn test_keyword_only() {
    let document = doc("", DocumentOptions::new().with_keyword("keyword"));
    assert_eq!(
        valid_ids(&document),
        ["keyphraseLength", "metaDescriptionLength", "textLength", "titleWidth"]
    );
}

#[test]
fn test_keyword_and_title() {
    let document = doc(
        "",
        DocumentOptions::new()
            .with_keyword("keyword")
            .with_title("A keyword title"),
    );
    assert_eq!(
        valid_ids(&document),
        [
            "keyphraseLength",
            "metaDescriptionLength",
            "textLength",
            "titleKeyword",
            "titleWidth",
        ]
    );
}

#[test]
fn test_text_only() {
    let results = assess(&Document::new("text")).unwrap();
    assert_eq!(
        results.valid_ids(),
        [
            "keyphraseLength",
            "metaDescriptionLength",
            "textImages",
            "textLength",
            "externalLinks",
            "internalLinks",
            "titleWidth",
        ]
    );
}

#[test]
fn test_text_and_keyword() {
    let document = doc("text", DocumentOptions::new().with_keyword("keyword"));
    let ids = valid_ids(&document);
    assert_eq!(ids.len(), 8);
    assert_eq!(ids[0], "introductionKeyword");
}

#[test]
fn test_subheading_with_keyword() {
    let document = doc(
        "text <h2> subheading </h2> more text",
        DocumentOptions::new().with_keyword("keyword"),
    );
    assert_eq!(
        valid_ids(&document),
        [
            "introductionKeyword",
            "keyphraseLength",
            "metaDescriptionLength",
            "subheadingsKeyword",
            "textImages",
            "textLength",
            "externalLinks",
            "internalLinks",
            "titleWidth",
        ]
    );
}

#[test]
fn test_url_keyword_applies_with_url() {
    let document = doc(
        "text",
        DocumentOptions::new()
            .with_keyword("keyword")
            .with_url("https://example.com/keyword-guide"),
    );
    let ids = valid_ids(&document);
    assert_eq!(ids.len(), 9);
    assert_eq!(ids.last().map(String::as_str), Some("urlKeyword"));
}

#[test]
fn test_meta_description_keyword_position() {
    let document = doc(
        "text",
        DocumentOptions::new()
            .with_keyword("keyword")
            .with_description("A description mentioning the keyword once."),
    );
    let ids = valid_ids(&document);
    assert_eq!(ids.len(), 9);
    assert_eq!(&ids[..4], ["introductionKeyword", "keyphraseLength", "metaDescriptionKeyword", "metaDescriptionLength"]);
}

#[test]
fn test_density_needs_one_hundred_words() {
    let document = doc(&words(100, "a"), DocumentOptions::new().with_keyword("keyword"));
    let ids = valid_ids(&document);
    assert!(ids.contains(&"keywordDensity".to_string()));
    assert!(!ids.contains(&"largestKeywordDistance".to_string()));

    let short = doc(&words(99, "a"), DocumentOptions::new().with_keyword("keyword"));
    assert!(!valid_ids(&short).contains(&"keywordDensity".to_string()));
}

#[test]
fn test_long_text_without_topic_mentions() {
    let document = doc(
        &words(200, "a"),
        DocumentOptions::new()
            .with_keyword("keyword")
            .with_synonyms("synonym"),
    );
    let ids = valid_ids(&document);
    assert_eq!(ids.len(), 9);
    assert!(!ids.contains(&"largestKeywordDistance".to_string()));
}

#[test]
fn test_keyword_and_synonym_enable_distance() {
    let text = format!("keyword {} synonym", words(200, "a"));
    let document = doc(
        &text,
        DocumentOptions::new()
            .with_keyword("keyword")
            .with_synonyms("synonym"),
    );
    let ids = valid_ids(&document);
    assert_eq!(ids.len(), 10);
    assert_eq!(
        &ids[ids.len() - 2..],
        ["titleWidth", "largestKeywordDistance"]
    );
}

#[test]
fn test_keyword_twice_in_long_text() {
    let text = format!("keyword {} keyword", words(200, "a"));
    let document = doc(&text, DocumentOptions::new().with_keyword("keyword"));
    let ids = valid_ids(&document);
    assert!(ids.contains(&"keywordDensity".to_string()));
    assert_eq!(ids.last().map(String::as_str), Some("largestKeywordDistance"));
}

#[test]
fn test_misplaced_h1_is_flagged_last() {
    let results = assess(&Document::new("<p>a paragraph</p><h1>heading</h1>")).unwrap();
    let ids = results.valid_ids();
    assert_eq!(ids.len(), 8);
    assert_eq!(ids.last(), Some(&"singleH1Assessment"));
    assert_eq!(results.get("singleH1Assessment").map(|r| r.score), Some(1));
}

#[test]
fn test_opening_h1_is_not_valid() {
    let results = assess(&Document::new("<h1>Title</h1><p>a paragraph</p>")).unwrap();
    assert!(results.ids().contains(&"singleH1Assessment"));
    assert!(!results.valid_ids().contains(&"singleH1Assessment"));
}

#[test]
fn test_assessment_is_deterministic() {
    let document = doc(
        &format!("keyword {} <h2>keyword</h2> <a href=\"https://example.org\">out</a>", words(150, "a")),
        DocumentOptions::new()
            .with_keyword("keyword")
            .with_title("keyword title")
            .with_description("keyword description"),
    );
    let first = assess(&document).unwrap();
    let second = assess(&document).unwrap();
    assert_eq!(first, second);

    let parallel = Assessor::new(Arc::new(Registry::seo()))
        .with_parallel(true)
        .assess(&document)
        .unwrap();
    assert_eq!(first, parallel);
}

#[test]
fn test_extra_assessment_leaves_builtins_unchanged() {
    let document = doc("text", DocumentOptions::new().with_keyword("keyword"));
    let baseline = assess(&document).unwrap();

    let mut registry = Registry::seo();
    registry
        .register(Arc::new(FnAssessment::always("wordCheck", |_, _, _| {
            Ok(AssessmentResult::new("wordCheck", 5, "custom"))
        })))
        .unwrap();
    let results = Assessor::new(Arc::new(registry)).assess(&document).unwrap();

    assert_eq!(results.len(), baseline.len() + 1);
    assert_eq!(&results.all()[..baseline.len()], baseline.all());
    assert_eq!(results.ids().last(), Some(&"wordCheck"));
}

#[test]
fn test_failing_assessment_aborts() {
    let mut registry = Registry::seo();
    registry
        .register_at(
            0,
            Arc::new(FnAssessment::always("broken", |_, _, _| {
                Err(RuleError::Failed("no data".to_string()))
            })),
        )
        .unwrap();

    let err = Assessor::new(Arc::new(registry))
        .assess(&Document::new("text"))
        .unwrap_err();
    assert!(matches!(err, AssessError::Scoring { .. }));
    assert_eq!(err.rule(), "broken");
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut registry = Registry::seo();
    let err = registry
        .register(Arc::new(FnAssessment::always("textLength", |_, _, _| {
            Ok(AssessmentResult::new("textLength", 9, ""))
        })))
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateId("textLength".to_string()));
    assert_eq!(registry.len(), 15);
}

#[test]
fn test_has_score_policy() {
    let mut registry = Registry::new("custom");
    registry
        .register(Arc::new(FnAssessment::always("zero", |_, _, _| {
            Ok(AssessmentResult::new("zero", 0, ""))
        })))
        .unwrap();
    registry
        .register(Arc::new(FnAssessment::always("silent", |_, _, _| {
            Ok(AssessmentResult::unscored("silent"))
        })))
        .unwrap();
    let registry = Arc::new(registry);
    let document = Document::new("text");

    let strict = Assessor::new(Arc::clone(&registry)).assess(&document).unwrap();
    assert!(strict.valid_ids().is_empty());
    assert_eq!(strict.ids(), ["zero", "silent"]);

    let lenient = Assessor::new(registry)
        .with_validity(ValidityPolicy::HasScore)
        .assess(&document)
        .unwrap();
    assert_eq!(lenient.valid_ids(), ["zero"]);
}

#[test]
fn test_cornerstone_preset_is_stricter() {
    let document = Document::new(&words(300, "a"));
    let seo = assess(&document).unwrap();
    let cornerstone = Assessor::new(Arc::new(Preset::Cornerstone.registry()))
        .assess(&document)
        .unwrap();

    assert_eq!(seo.ids(), cornerstone.ids());
    assert_eq!(seo.get("textLength").map(|r| r.score), Some(9));
    assert_eq!(cornerstone.get("textLength").map(|r| r.score), Some(3));
    assert_eq!(seo.get("externalLinks").map(|r| r.score), Some(6));
    assert_eq!(cornerstone.get("externalLinks").map(|r| r.score), Some(3));
}

#[test]
fn test_invalid_locale_rejected() {
    let err = Document::with_options("text", DocumentOptions::new().with_locale("not a locale"));
    assert!(err.is_err());
}
