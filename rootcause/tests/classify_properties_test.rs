use rootcause::{
    classify, ActionTiming, Category, CheckId, Context, Framework, ObservationSet, Verdict,
};
use tracing::{info, Level};

/// Test helper to setup logging for debugging
fn setup_logging() {
    let _ = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn full_happy_path() -> ObservationSet {
    ObservationSet::new()
        .with(CheckId::DropdownDetected, true)
        .with(CheckId::DropdownInteractionSuccess, true)
        .with(CheckId::MenOptionClicked, true)
        .with(CheckId::ActionTiming, "500ms - 2s (normal)")
        .with(CheckId::SubcategoryOptionsLoaded, true)
        .with(CheckId::CorrectSubcategorySelected, true)
        .with(CheckId::NikeFilterApplied, true)
        .with(CheckId::ProductGridUpdated, true)
        .with(CheckId::PriceElementsDetected, true)
        .with(CheckId::PriceParsingSuccess, true)
        .with(CheckId::CorrectCheapestIdentified, true)
        .with(CheckId::CorrectItemAdded, true)
        .with(CheckId::CheckoutElementsDetected, true)
        .with(CheckId::CheckoutInteractionSuccess, true)
}

#[test]
fn test_repeated_calls_are_identical() {
    setup_logging();
    let obs = ObservationSet::new()
        .with(CheckId::NikeFilterApplied, true)
        .with(CheckId::ProductGridUpdated, false);
    let context = Context::from("jQuery");

    let first = classify(&obs, &context);
    for _ in 0..10 {
        assert_eq!(classify(&obs, &context), first);
    }
    info!(verdict = %first, "stable verdict");
}

#[test]
fn test_empty_observations_report_success() {
    for context in ["React", "Vue", "Svelte"] {
        let verdict = classify(&ObservationSet::new(), &Context::from(context));
        assert_eq!(
            verdict,
            Verdict {
                category: Category::Success,
                subcategory: "All Steps Completed Successfully".to_string(),
                recommendation: "No action needed".to_string(),
                framework_specific: None,
            }
        );
    }
}

#[test]
fn test_missing_dropdown_with_react() {
    let obs = ObservationSet::new().with(CheckId::DropdownDetected, false);
    let verdict = classify(&obs, &Context::from("React"));
    assert_eq!(verdict.category, Category::DomParsing);
    assert_eq!(
        verdict.framework_specific.as_deref(),
        Some("Use React Testing Library queries or React-specific selectors")
    );
}

#[test]
fn test_server_error_separates_website_state_from_dynamic_content() {
    let vue = Context::from("Vue");
    let base = ObservationSet::new()
        .with(CheckId::NikeFilterApplied, true)
        .with(CheckId::ProductGridUpdated, false);

    let verdict = classify(&base.clone().with(CheckId::ServerResponseError, true), &vue);
    assert_eq!(verdict.category, Category::WebsiteState);
    assert_eq!(verdict.framework_specific, None);

    let verdict = classify(&base.with(CheckId::ServerResponseError, false), &vue);
    assert_eq!(verdict.category, Category::DynamicContent);
    assert_eq!(
        verdict.framework_specific.as_deref(),
        Some("Use Vue reactivity system and $nextTick for DOM updates")
    );
}

#[test]
fn test_unknown_context_keeps_category_and_drops_advice() {
    let obs = ObservationSet::new().with(CheckId::DropdownDetected, false);
    let verdict = classify(&obs, &Context::from("Svelte"));
    assert_eq!(verdict.category, Category::DomParsing);
    assert_eq!(verdict.framework_specific, None);
}

#[test]
fn test_unset_context_has_no_advice() {
    let obs = ObservationSet::new().with(CheckId::DropdownDetected, false);
    let verdict = classify(&obs, &Context::default());
    assert_eq!(verdict.category, Category::DomParsing);
    assert_eq!(verdict.subcategory, "Dropdown Menu Not Detected");
    assert_eq!(verdict.framework_specific, None);
}

#[test]
fn test_framework_names_are_matched_exactly() {
    let obs = ObservationSet::new().with(CheckId::DropdownDetected, false);
    for name in ["react", "REACT", " React", "vue"] {
        let verdict = classify(&obs, &Context::from(name));
        assert_eq!(verdict.category, Category::DomParsing, "{name}");
        assert_eq!(verdict.framework_specific, None, "{name}");
    }
    assert_eq!(
        classify(&obs, &Context::from("React")).framework_specific.as_deref(),
        Some("Use React Testing Library queries or React-specific selectors")
    );
}

#[test]
fn test_full_happy_path_is_success() {
    for framework in Framework::ALL {
        assert_eq!(
            classify(&full_happy_path(), &framework.into()).category,
            Category::Success
        );
    }
}

#[test]
fn test_too_fast_click_after_happy_navigation() {
    let obs = full_happy_path().with(CheckId::ActionTiming, ActionTiming::TooFast);
    let verdict = classify(&obs, &Context::from("Bootstrap"));
    assert_eq!(verdict.category, Category::DynamicContent);
    assert_eq!(verdict.subcategory, "Action Performed Before Menu Rendered");
}

#[test]
fn test_verdict_json_shape() -> Result<(), Box<dyn std::error::Error>> {
    let obs = ObservationSet::new()
        .with(CheckId::CheckoutElementsDetected, true)
        .with(CheckId::CheckoutInteractionSuccess, false);
    let verdict = classify(&obs, &Context::from("Tailwind"));
    let json = serde_json::to_value(&verdict)?;

    assert_eq!(json["category"], "Element Interaction Failure");
    assert_eq!(json["subcategory"], "Checkout Interaction Failed");
    assert!(json["recommendation"].is_string());
    assert!(json["frameworkSpecific"].is_string());

    let success = serde_json::to_value(Verdict::success())?;
    assert!(success["frameworkSpecific"].is_null());
    Ok(())
}

#[test]
fn test_observations_load_from_json_document() -> Result<(), Box<dyn std::error::Error>> {
    let obs: ObservationSet = serde_json::from_str(
        r#"{
            "dropdown_detected": true,
            "dropdown_interaction_success": true,
            "men_option_clicked": true,
            "action_timing": "> 2s (slow)",
            "subcategory_options_loaded": true,
            "correct_subcategory_selected": false
        }"#,
    )?;
    assert_eq!(obs.action_timing(), Some(ActionTiming::Slow));

    let verdict = classify(&obs, &Context::from("Angular"));
    assert_eq!(verdict.category, Category::AgentReasoning);
    assert_eq!(verdict.framework_specific, None);

    let unknown = serde_json::from_str::<ObservationSet>(r#"{"cart_opened": true}"#);
    assert!(unknown.is_err());
    Ok(())
}
