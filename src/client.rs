//! Transport core: one operation per HTTP verb, each throttled, freshly signed, and normalized.
//!
//! Every call follows the same path: [`ThrottleGate::admit`] (which may stall the task until
//! the window rolls over and counts the request), a new bearer token from the
//! [`RequestSigner`], the HTTP exchange, then [`ApiResponse`] normalization. Client errors
//! (4xx) come back as [`ApiResponse::ClientError`]; server errors, transport failures, and
//! undecodable bodies surface as [`Error`](crate::error::Error).

pub mod response;

pub use response::*;

// crates.io
use reqwest::{
	RequestBuilder,
	header::{ACCEPT, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, JwtSigner},
	config::ClientConfig,
	endpoint::{Meetings, Users},
	error::{ConfigError, TransportError},
	ext::{Clock, RequestSigner, SystemClock},
	http::{ReqwestHttpClient, Verb},
	obs::{self, RequestOutcome, RequestSpan},
	throttle::ThrottleGate,
};

const JSON_MIME: &str = "application/json";

/// REST client bound to one credential pair and one throttle window.
///
/// Clones share the same [`ThrottleGate`], so every clone draws from the same quota.
#[derive(Clone)]
pub struct Client {
	config: ClientConfig,
	http_client: ReqwestHttpClient,
	signer: Arc<dyn RequestSigner>,
	clock: Arc<dyn Clock>,
	gate: Arc<ThrottleGate>,
}
impl Client {
	/// Creates a client for the default REST root with default throttle settings.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
		Self::with_config(Credentials::new(key, secret), ClientConfig::default())
	}

	/// Creates a client with a JWT signer, the system clock, and a reqwest transport built from
	/// `config`.
	///
	/// Credentials are checked when each request is signed, so an unusable pair fails the first
	/// call rather than construction.
	pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;
		let signer = JwtSigner::new(credentials).with_ttl(config.token_ttl);

		Ok(Self::from_parts(config, http_client, Arc::new(signer), Arc::new(SystemClock)))
	}

	/// Assembles a client from caller-provided collaborators.
	pub fn from_parts(
		config: ClientConfig,
		http_client: ReqwestHttpClient,
		signer: Arc<dyn RequestSigner>,
		clock: Arc<dyn Clock>,
	) -> Self {
		let gate = Arc::new(ThrottleGate::new(config.throttle, clock.clone()));

		Self { config, http_client, signer, clock, gate }
	}

	/// Replaces the time source. The throttle restarts with an unarmed window.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.gate = Arc::new(ThrottleGate::new(self.config.throttle, clock.clone()));
		self.clock = clock;

		self
	}

	/// Replaces the token signer.
	pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
		self.signer = signer;

		self
	}

	/// Replaces the HTTP transport.
	pub fn with_http_client(mut self, http_client: ReqwestHttpClient) -> Self {
		self.http_client = http_client;

		self
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Throttle gate shared by this client and its clones.
	pub fn throttle(&self) -> &ThrottleGate {
		&self.gate
	}

	/// User endpoints.
	pub fn users(&self) -> Users<'_> {
		Users::new(self)
	}

	/// Meeting endpoints.
	pub fn meetings(&self) -> Meetings<'_> {
		Meetings::new(self)
	}

	/// Issues a `GET` with `query` encoded as a query string.
	pub async fn get<Q>(&self, path: &str, query: &Q) -> Result<ApiResponse>
	where
		Q: ?Sized + Serialize,
	{
		let url = self.endpoint(path)?;
		let request = self
			.http_client
			.get(url)
			.query(query)
			.build()
			.map_err(|e| ConfigError::QueryEncode { source: Box::new(e) })?;
		let request = RequestBuilder::from_parts(self.http_client.0.clone(), request);

		self.execute(Verb::Get, path, request).await
	}

	/// Issues a `POST` with `body` encoded as JSON.
	pub async fn post<B>(&self, path: &str, body: &B) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		self.send_json(Verb::Post, path, body).await
	}

	/// Issues a `PUT` with `body` encoded as JSON.
	pub async fn put<B>(&self, path: &str, body: &B) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		self.send_json(Verb::Put, path, body).await
	}

	/// Issues a `PATCH` with `body` encoded as JSON.
	pub async fn patch<B>(&self, path: &str, body: &B) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		self.send_json(Verb::Patch, path, body).await
	}

	/// Issues a `DELETE` with `body` encoded as JSON; pass an empty [`Fields`] for no fields.
	pub async fn delete<B>(&self, path: &str, body: &B) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		self.send_json(Verb::Delete, path, body).await
	}

	async fn send_json<B>(&self, verb: Verb, path: &str, body: &B) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		let url = self.endpoint(path)?;
		let payload = serde_json::to_vec_pretty(body).map_err(ConfigError::RequestEncode)?;
		let request = self.http_client.request(verb.method(), url).body(payload);

		self.execute(verb, path, request).await
	}

	async fn execute(
		&self,
		verb: Verb,
		path: &str,
		request: RequestBuilder,
	) -> Result<ApiResponse> {
		let span = RequestSpan::new(verb, path);

		obs::record_request_outcome(verb, RequestOutcome::Attempt);

		let result = span
			.instrument(async {
				self.gate.admit().await?;

				// One fresh token per request, minted after any stall.
				let token = self.signer.bearer_token(self.clock.now())?;
				let response = request
					.bearer_auth(token)
					.header(CONTENT_TYPE, JSON_MIME)
					.header(ACCEPT, JSON_MIME)
					.send()
					.await
					.map_err(TransportError::from)?;

				span.record_status(response.status().as_u16());

				response::normalize(response).await
			})
			.await;
		let outcome = match &result {
			Ok(ApiResponse::Success { .. }) => RequestOutcome::Success,
			Ok(ApiResponse::ClientError { .. }) => RequestOutcome::ClientError,
			Err(_) => RequestOutcome::Failure,
		};

		obs::record_request_outcome(verb, outcome);

		result
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		self.config
			.endpoint(path)
			.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source }.into())
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.config.base_url.as_str())
			.field("throttle", &self.config.throttle)
			.finish()
	}
}
