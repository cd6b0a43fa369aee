use crate::backend::{Backend, FeatureName, Source};

/// Enumerates the features of `source` with the two-call protocol.
///
/// The first call only counts; the second fills a buffer sized to that count.
/// A zero count skips the fill call.
pub fn query_features<B: Backend>(backend: &B, source: Source<'_, B>) -> Vec<FeatureName> {
    let count = backend.enumerate_features(source, None);
    if count == 0 {
        return Vec::new();
    }

    let mut features = vec![FeatureName::default(); count];
    let written = backend.enumerate_features(source, Some(features.as_mut_slice()));
    if written != count {
        log::warn!(
            "{} reported {count} features but filled {written}",
            source.label()
        );
        features.truncate(written);
    }

    features
}

/// Logs the features of `source` and returns them.
pub fn report_features<B: Backend>(backend: &B, source: Source<'_, B>) -> Vec<FeatureName> {
    let features = query_features(backend, source);

    log::info!("{} features:", source.label());
    for feature in &features {
        log::info!(" - {feature}");
    }

    features
}
