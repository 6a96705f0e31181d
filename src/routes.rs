use crate::{api::activity, config::Config, error::ApiError};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per peer IP quota of `requests_per_min`, replenished evenly over the minute.
pub fn build_limiter(requests_per_min: u32) -> Result<LimiterConfig> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("Invalid rate limit configuration")
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &LimiterConfig) {
    // malformed ids, dates and bodies are the caller's fault
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter)) // rate limiting
            .service(
                web::scope("/activities")
                    // /activities
                    .service(
                        web::resource("")
                            .route(web::get().to(activity::list_activities))
                            .route(web::post().to(activity::create_activity)),
                    )
                    // /activities/activity/{id}
                    .service(
                        web::resource("/activity/{id}")
                            .route(web::get().to(activity::get_activity)),
                    )
                    // /activities/day/{employee_id}/{date}
                    .service(
                        web::resource("/day/{employee_id}/{date}")
                            .route(web::get().to(activity::activities_per_day)),
                    )
                    // /activities/week/{employee_id}/{week_number}
                    .service(
                        web::resource("/week/{employee_id}/{week_number}")
                            .route(web::get().to(activity::activities_per_week)),
                    )
                    // /activities/report/{employee_id}/{date}
                    .service(
                        web::resource("/report/{employee_id}/{date}")
                            .route(web::get().to(activity::activities_report)),
                    )
                    // /activities/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(activity::update_activity))
                            .route(web::delete().to(activity::delete_activity)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_accepts_zero_and_huge_rates() {
        assert!(build_limiter(0).is_ok());
        assert!(build_limiter(1_000_000).is_ok());
        assert!(build_limiter(60).is_ok());
    }
}
