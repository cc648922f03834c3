use hygiene_application::{CachingSource, QueryServiceImpl, RatingSource};
use hygiene_infrastructure::{ConfigError, HttpRatingSource, SourceConfig};
use shaku::module;
use std::sync::Arc;

module! {
    pub AppModule {
        components = [
            QueryServiceImpl,
            HttpRatingSource
        ],
        providers = []
    }
}

/// Wires the query service to the ratings API, optionally behind the
/// process-lifetime cache.
pub fn create_app_module(config: &SourceConfig, cache: bool) -> Result<AppModule, ConfigError> {
    let source = HttpRatingSource::new(config)?;

    let builder = AppModule::builder();
    let builder = if cache {
        let cached: Box<dyn RatingSource> = Box::new(CachingSource::new(Arc::new(source)));
        builder.with_component_override::<dyn RatingSource>(cached)
    } else {
        builder.with_component_parameters::<HttpRatingSource>(source.into_parameters())
    };

    Ok(builder.build())
}
