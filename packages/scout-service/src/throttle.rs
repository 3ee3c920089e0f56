//! Pacing between successive upstream requests.

use std::{num::NonZeroU32, time::Duration};

use governor::{
	Quota, RateLimiter,
	clock::DefaultClock,
	state::{InMemoryState, NotKeyed},
};

use scout_config::Throttle as ThrottleConfig;

use crate::{BoxFuture, Error, Result};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

pub trait Throttle
where
	Self: Send + Sync,
{
	/// Resolves once the next upstream request may be sent.
	fn pause(&self) -> BoxFuture<'_, ()>;
}

pub struct FixedDelay {
	delay: Duration,
}
impl FixedDelay {
	pub fn new(delay: Duration) -> Self {
		Self { delay }
	}
}
impl Throttle for FixedDelay {
	fn pause(&self) -> BoxFuture<'_, ()> {
		Box::pin(tokio::time::sleep(self.delay))
	}
}

pub struct TokenBucket {
	limiter: DirectRateLimiter,
}
impl TokenBucket {
	pub fn new(per_second: NonZeroU32, burst: NonZeroU32) -> Self {
		let quota = Quota::per_second(per_second).allow_burst(burst);

		Self { limiter: RateLimiter::direct(quota) }
	}
}
impl Throttle for TokenBucket {
	fn pause(&self) -> BoxFuture<'_, ()> {
		Box::pin(self.limiter.until_ready())
	}
}

pub struct NoThrottle;
impl Throttle for NoThrottle {
	fn pause(&self) -> BoxFuture<'_, ()> {
		Box::pin(std::future::ready(()))
	}
}

pub fn from_config(cfg: &ThrottleConfig) -> Result<Box<dyn Throttle>> {
	match cfg.policy.as_str() {
		"fixed" => Ok(Box::new(FixedDelay::new(Duration::from_millis(cfg.delay_ms)))),
		"token_bucket" => {
			let (Some(per_second), Some(burst)) =
				(NonZeroU32::new(cfg.per_second), NonZeroU32::new(cfg.burst))
			else {
				return Err(Error::Configuration {
					message: "throttle.per_second and throttle.burst must be greater than zero."
						.to_string(),
				});
			};

			Ok(Box::new(TokenBucket::new(per_second, burst)))
		},
		"none" => Ok(Box::new(NoThrottle)),
		other => Err(Error::Configuration {
			message: format!("Unknown throttle policy {other:?}."),
		}),
	}
}

#[cfg(test)]
mod tests {
	use std::time::Instant;

	use super::*;

	fn cfg(policy: &str) -> ThrottleConfig {
		ThrottleConfig { policy: policy.to_string(), delay_ms: 20, per_second: 5, burst: 1 }
	}

	#[test]
	fn rejects_unknown_policy() {
		assert!(from_config(&cfg("adaptive")).is_err());
	}

	#[test]
	fn rejects_zero_rate() {
		let mut cfg = cfg("token_bucket");

		cfg.per_second = 0;

		assert!(matches!(from_config(&cfg), Err(Error::Configuration { .. })));
	}

	#[tokio::test]
	async fn fixed_delay_waits_at_least_the_delay() {
		let throttle = from_config(&cfg("fixed")).expect("Failed to build throttle.");
		let started = Instant::now();

		throttle.pause().await;

		assert!(started.elapsed() >= Duration::from_millis(20));
	}

	#[tokio::test]
	async fn token_bucket_spaces_requests_after_burst() {
		let throttle = from_config(&cfg("token_bucket")).expect("Failed to build throttle.");
		let started = Instant::now();

		throttle.pause().await;
		throttle.pause().await;

		// 5 per second with a burst of 1: the second permit arrives about 200ms later.
		assert!(started.elapsed() >= Duration::from_millis(150));
	}
}
