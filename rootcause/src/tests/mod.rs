
use crate::{CheckId, ObservationSet};

// Initialize tracing for tests
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_test_writer()
        .try_init();
}

/// The smallest observation set that makes guard `number` (1-based) fire.
pub fn minimal_trigger(number: usize) -> ObservationSet {
    use CheckId::*;
    let obs = ObservationSet::new();
    match number {
        1 => obs.with(DropdownDetected, false),
        2 => obs
            .with(DropdownDetected, true)
            .with(DropdownInteractionSuccess, false),
        3 => obs
            .with(MenOptionClicked, false)
            .with(AgentSearchedInstead, true),
        4 => obs
            .with(MenOptionClicked, true)
            .with(CheckId::ActionTiming, crate::ActionTiming::TooFast),
        5 => obs.with(CorrectSubcategorySelected, false),
        6 => obs.with(SubcategoryOptionsLoaded, false),
        7 => obs
            .with(NikeFilterApplied, true)
            .with(ProductGridUpdated, false)
            .with(ServerResponseError, true),
        8 => obs
            .with(NikeFilterApplied, true)
            .with(ProductGridUpdated, false),
        9 => obs
            .with(PriceElementsDetected, true)
            .with(PriceParsingSuccess, false),
        10 => obs.with(PriceElementsDetected, false),
        11 => obs.with(CorrectCheapestIdentified, false),
        12 => obs.with(CorrectItemAdded, false),
        13 => obs.with(CheckoutElementsDetected, false),
        14 => obs
            .with(CheckoutElementsDetected, true)
            .with(CheckoutInteractionSuccess, false),
        other => panic!("no guard number {other}"),
    }
}

/// Every check answered the way a successful run would answer it.
pub fn happy_path() -> ObservationSet {
    use CheckId::*;
    ObservationSet::new()
        .with(DropdownDetected, true)
        .with(DropdownInteractionSuccess, true)
        .with(MenOptionClicked, true)
        .with(CheckId::ActionTiming, crate::ActionTiming::Normal)
        .with(SubcategoryOptionsLoaded, true)
        .with(CorrectSubcategorySelected, true)
        .with(NikeFilterApplied, true)
        .with(ProductGridUpdated, true)
        .with(PriceElementsDetected, true)
        .with(PriceParsingSuccess, true)
        .with(CorrectCheapestIdentified, true)
        .with(CorrectItemAdded, true)
        .with(CheckoutElementsDetected, true)
        .with(CheckoutInteractionSuccess, true)
}
