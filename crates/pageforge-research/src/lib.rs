// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Research source adapters: lookups whose results are substituted into
//! generated content as dynamic elements.

pub mod weather;
pub mod youtube;

pub use weather::WeatherSource;
pub use youtube::YoutubeSource;

use std::time::Duration;

use pageforge_config::PageforgeConfig;
use pageforge_core::PageforgeError;

/// Build both built-in sources from configuration.
pub fn sources_from_config(
    config: &PageforgeConfig,
) -> Result<(YoutubeSource, WeatherSource), PageforgeError> {
    let timeout = Duration::from_secs(config.generation.request_timeout_secs);
    let youtube = YoutubeSource::new(
        config.research.youtube.api_key.clone(),
        config.research.youtube.max_results,
        timeout,
    )?;
    let weather = WeatherSource::new(
        config.research.openweathermap.api_key.clone(),
        config.research.openweathermap.units.clone(),
        timeout,
    )?;
    Ok((youtube, weather))
}
