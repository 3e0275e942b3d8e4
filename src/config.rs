//! Client configuration and its validating builder.

// crates.io
use url::Host;
// self
use crate::{_prelude::*, auth::DEFAULT_TOKEN_TTL, throttle::ThrottleConfig};

/// Versioned REST root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.zoom.us/v2/";

/// Errors raised while validating a [`ClientConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl(#[from] url::ParseError),
	/// Base URL must use HTTPS unless it points at a loopback host.
	#[error("Base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Base URL cannot have paths joined onto it.
	#[error("Base URL cannot act as a base: {url}.")]
	CannotBeBase {
		/// Offending URL.
		url: String,
	},
	/// Throttle must admit at least one request per window.
	#[error("Throttle limit must be at least 1.")]
	ZeroLimit,
	/// Throttle window must be positive.
	#[error("Throttle window must be positive.")]
	NonPositiveWindow,
	/// Maximum stall cannot be negative.
	#[error("Maximum throttle stall must not be negative.")]
	NegativeMaxStall,
	/// Token validity window must be positive.
	#[error("Token lifetime must be positive.")]
	NonPositiveTokenTtl,
	/// Request timeout must be positive.
	#[error("Request timeout must be positive.")]
	NonPositiveTimeout,
}

/// Validated client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// REST root every resource path is joined onto; always ends with `/`.
	pub base_url: Url,
	/// Fixed-window throttle parameters.
	pub throttle: ThrottleConfig,
	/// Validity window of each bearer token.
	pub token_ttl: Duration,
	/// Optional per-request timeout applied by the HTTP client.
	pub timeout: Option<Duration>,
}
impl ClientConfig {
	/// Creates a new builder seeded with defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Joins a resource path onto the base URL; a leading `/` is ignored.
	pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
		self.base_url.join(path.trim_start_matches('/'))
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: Url::parse(DEFAULT_BASE_URL).expect("Default base URL must parse."),
			throttle: ThrottleConfig::default(),
			token_ttl: DEFAULT_TOKEN_TTL,
			timeout: None,
		}
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// REST root; defaults to [`DEFAULT_BASE_URL`].
	pub base_url: Option<Url>,
	/// Throttle parameters.
	pub throttle: ThrottleConfig,
	/// Token validity window.
	pub token_ttl: Duration,
	/// Optional per-request timeout.
	pub timeout: Option<Duration>,
}
impl ClientConfigBuilder {
	/// Sets the REST root.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Parses and sets the REST root.
	pub fn base_url_str(self, url: &str) -> Result<Self, ClientConfigError> {
		Ok(self.base_url(Url::parse(url)?))
	}

	/// Replaces all throttle parameters.
	pub fn throttle(mut self, throttle: ThrottleConfig) -> Self {
		self.throttle = throttle;

		self
	}

	/// Sets the requests-per-window limit.
	pub fn throttle_limit(mut self, limit: u32) -> Self {
		self.throttle.limit = limit;

		self
	}

	/// Sets the throttle window width.
	pub fn throttle_window(mut self, window: Duration) -> Self {
		self.throttle.window = window;

		self
	}

	/// Caps how long a request may stall on the throttle.
	pub fn max_stall(mut self, max_stall: Duration) -> Self {
		self.throttle.max_stall = Some(max_stall);

		self
	}

	/// Sets the token validity window.
	pub fn token_ttl(mut self, ttl: Duration) -> Self {
		self.token_ttl = ttl;

		self
	}

	/// Sets a per-request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Validates and freezes the configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let base_url = match self.base_url {
			Some(url) => normalize_base_url(url)?,
			None => Url::parse(DEFAULT_BASE_URL)?,
		};

		if self.throttle.limit == 0 {
			return Err(ClientConfigError::ZeroLimit);
		}
		if !self.throttle.window.is_positive() {
			return Err(ClientConfigError::NonPositiveWindow);
		}
		if self.throttle.max_stall.is_some_and(|stall| stall.is_negative()) {
			return Err(ClientConfigError::NegativeMaxStall);
		}
		if !self.token_ttl.is_positive() {
			return Err(ClientConfigError::NonPositiveTokenTtl);
		}
		if self.timeout.is_some_and(|timeout| !timeout.is_positive()) {
			return Err(ClientConfigError::NonPositiveTimeout);
		}

		Ok(ClientConfig {
			base_url,
			throttle: self.throttle,
			token_ttl: self.token_ttl,
			timeout: self.timeout,
		})
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: None,
			throttle: ThrottleConfig::default(),
			token_ttl: DEFAULT_TOKEN_TTL,
			timeout: None,
		}
	}
}

fn normalize_base_url(mut url: Url) -> Result<Url, ClientConfigError> {
	if url.cannot_be_a_base() {
		return Err(ClientConfigError::CannotBeBase { url: url.to_string() });
	}

	match url.scheme() {
		"https" => {},
		"http" if is_loopback(&url) => {},
		_ => return Err(ClientConfigError::InsecureBaseUrl { url: url.to_string() }),
	}

	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
