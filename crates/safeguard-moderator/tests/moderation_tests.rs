//! End-to-end decider behaviour against the mock classifier

use safeguard_domain::{Category, CategoryScore, ModerationVerdict};
use safeguard_moderator::{ModerationDecider, ModerationError};
use safeguard_safety::MockClassifier;
use std::sync::Arc;

#[tokio::test]
async fn hateful_example_is_rejected_with_severity() {
    let mut classifier = MockClassifier::clean();
    classifier.add_severities("I hate everyone", 2, 0, 0, 0);
    let decider = ModerationDecider::new(classifier);

    let verdict = decider.evaluate("I hate everyone").await.unwrap();

    assert_eq!(
        verdict,
        ModerationVerdict::rejected(
            "Your submission contains hateful content, which violates our community guidelines. Hate severity: 2."
        )
    );
}

#[tokio::test]
async fn each_category_rejects_on_its_own() {
    let cases = [
        (Category::Hate, "hateful", "Hate severity: 1."),
        (Category::SelfHarm, "self-harm", "Self harm severity: 1."),
        (Category::Sexual, "sexual", "Sexual severity: 1."),
        (Category::Violence, "violent", "Violence severity: 1."),
    ];

    for (category, description, suffix) in cases {
        let scores = Category::PRIORITY
            .map(|c| CategoryScore::new(c, if c == category { 1 } else { 0 }))
            .to_vec();
        let decider = ModerationDecider::new(MockClassifier::new(scores));

        let verdict = decider.evaluate("text").await.unwrap();
        let reason = verdict.reason().expect("rejected");

        assert!(reason.contains(description), "{reason}");
        assert!(reason.ends_with(suffix), "{reason}");
    }
}

#[tokio::test]
async fn hate_outranks_violence() {
    let decider = ModerationDecider::new(MockClassifier::with_severities(1, 0, 0, 1));

    let verdict = decider.evaluate("text").await.unwrap();
    let reason = verdict.reason().expect("rejected");

    assert!(reason.contains("Hate severity"));
    assert!(!reason.contains("Violence"));
}

#[tokio::test]
async fn all_zero_is_allowed() {
    let decider = ModerationDecider::new(MockClassifier::clean());
    assert_eq!(decider.evaluate("hello").await.unwrap(), ModerationVerdict::Allowed);
}

#[tokio::test]
async fn missing_sexual_category_is_an_error() {
    let decider = ModerationDecider::new(MockClassifier::new(vec![
        CategoryScore::new(Category::Hate, 0),
        CategoryScore::new(Category::SelfHarm, 0),
        CategoryScore::new(Category::Violence, 0),
    ]));

    let err = decider.evaluate("text").await.unwrap_err();

    assert!(matches!(err, ModerationError::MissingCategory(Category::Sexual)));
    assert!(err.is_contract_violation());
}

#[tokio::test]
async fn missing_category_is_reported_even_when_others_are_flagged() {
    let decider = ModerationDecider::new(MockClassifier::new(vec![
        CategoryScore::new(Category::Hate, 4),
        CategoryScore::new(Category::SelfHarm, 0),
        CategoryScore::new(Category::Sexual, 0),
    ]));

    let err = decider.evaluate("text").await.unwrap_err();
    assert!(matches!(err, ModerationError::MissingCategory(Category::Violence)));
}

#[tokio::test]
async fn transport_failure_propagates() {
    let mut classifier = MockClassifier::clean();
    classifier.add_error("text");
    let decider = ModerationDecider::new(classifier);

    let err = decider.evaluate("text").await.unwrap_err();

    assert!(matches!(err, ModerationError::ClassifierUnavailable { .. }));
    assert!(!err.is_contract_violation());
}

#[tokio::test]
async fn service_failure_keeps_diagnostic_code() {
    let mut classifier = MockClassifier::clean();
    classifier.add_service_error("text", 429, Some("TooManyRequests"), "Rate limit is exceeded.");
    let decider = ModerationDecider::new(classifier);

    match decider.evaluate("text").await {
        Err(ModerationError::ClassifierUnavailable { code, message, .. }) => {
            assert_eq!(code.as_deref(), Some("TooManyRequests"));
            assert_eq!(message, "Rate limit is exceeded.");
        }
        other => panic!("Expected ClassifierUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn error_display_includes_code() {
    let mut classifier = MockClassifier::clean();
    classifier.add_service_error("text", 401, Some("Unauthorized"), "Access denied");
    let decider = ModerationDecider::new(classifier);

    let err = decider.evaluate("text").await.unwrap_err();
    assert_eq!(err.to_string(), "Classifier unavailable (Unauthorized): Access denied");
}

#[tokio::test]
async fn one_classifier_call_per_evaluation() {
    let classifier = MockClassifier::with_severities(0, 0, 3, 2);
    let decider = ModerationDecider::new(classifier.clone());

    decider.evaluate("a").await.unwrap();
    decider.evaluate_detailed("b").await.unwrap();

    assert_eq!(classifier.call_count(), 2);
}

#[tokio::test]
async fn detailed_report_lists_every_violation() {
    let decider = ModerationDecider::new(MockClassifier::with_severities(0, 2, 0, 6));

    let report = decider.evaluate_detailed("text").await.unwrap();

    assert_eq!(report.verdict, decider.evaluate("text").await.unwrap());
    assert_eq!(
        report.violations,
        vec![
            CategoryScore::new(Category::SelfHarm, 2),
            CategoryScore::new(Category::Violence, 6),
        ]
    );
    assert_eq!(report.classification.severity(Category::Violence).value(), 6);
}

#[tokio::test]
async fn concurrent_evaluations_are_independent() {
    let mut classifier = MockClassifier::clean();
    classifier.add_severities("bad", 0, 0, 0, 2);
    let decider = Arc::new(ModerationDecider::new(classifier));

    let mut handles = Vec::new();
    for i in 0..16 {
        let decider = Arc::clone(&decider);
        let text = if i % 2 == 0 { "bad" } else { "good" };
        handles.push(tokio::spawn(async move {
            (text, decider.evaluate(text).await)
        }));
    }

    for handle in handles {
        let (text, verdict) = handle.await.unwrap();
        assert_eq!(verdict.unwrap().is_allowed(), text == "good");
    }

    assert_eq!(decider.classifier().call_count(), 16);
}

#[tokio::test]
async fn into_inner_releases_classifier() {
    let decider = ModerationDecider::new(MockClassifier::clean());
    decider.evaluate("x").await.unwrap();

    let classifier = decider.into_inner();
    assert_eq!(classifier.call_count(), 1);
}
