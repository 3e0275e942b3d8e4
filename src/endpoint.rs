//! Resource path mappers layered on [`Client`].
//!
//! These carry no auth or throttling of their own; each method forwards a verb, a path, and
//! the caller's fields to the client.

// self
use crate::{
	_prelude::*,
	client::{ApiResponse, Client, Fields},
};

/// `users` resource.
#[derive(Clone, Copy, Debug)]
pub struct Users<'a> {
	client: &'a Client,
}
impl<'a> Users<'a> {
	/// Binds the mapper to `client`.
	pub fn new(client: &'a Client) -> Self {
		Self { client }
	}

	/// `GET users` with filters such as `status` or `page_size`.
	pub async fn list<Q>(&self, query: &Q) -> Result<ApiResponse>
	where
		Q: ?Sized + Serialize,
	{
		self.client.get("users", query).await
	}

	/// `GET users/{user_id}`.
	pub async fn get(&self, user_id: &str) -> Result<ApiResponse> {
		self.client.get(&format!("users/{user_id}"), &Fields::new()).await
	}
}

/// `meetings` resource.
#[derive(Clone, Copy, Debug)]
pub struct Meetings<'a> {
	client: &'a Client,
}
impl<'a> Meetings<'a> {
	/// Binds the mapper to `client`.
	pub fn new(client: &'a Client) -> Self {
		Self { client }
	}

	/// `GET users/{user_id}/meetings`.
	pub async fn list<Q>(&self, user_id: &str, query: &Q) -> Result<ApiResponse>
	where
		Q: ?Sized + Serialize,
	{
		self.client.get(&format!("users/{user_id}/meetings"), query).await
	}

	/// `POST users/{user_id}/meetings`.
	pub async fn create<B>(&self, user_id: &str, body: &B) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		self.client.post(&format!("users/{user_id}/meetings"), body).await
	}

	/// `GET meetings/{meeting_id}`.
	pub async fn get(&self, meeting_id: &str) -> Result<ApiResponse> {
		self.client.get(&format!("meetings/{meeting_id}"), &Fields::new()).await
	}

	/// `PATCH meetings/{meeting_id}`.
	pub async fn update<B>(&self, meeting_id: &str, body: &B) -> Result<ApiResponse>
	where
		B: ?Sized + Serialize,
	{
		self.client.patch(&format!("meetings/{meeting_id}"), body).await
	}

	/// `DELETE meetings/{meeting_id}`.
	pub async fn delete(&self, meeting_id: &str) -> Result<ApiResponse> {
		self.client.delete(&format!("meetings/{meeting_id}"), &Fields::new()).await
	}
}
