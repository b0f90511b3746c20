//! Request-scoped identity of the logged-in reader.
//!
//! The display name lives in the session cookie; handlers receive it through
//! the [`IdentityContext`] extractor instead of reading the session directly.

use actix_session::{Session, SessionInsertError};
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, ResponseError};
use futures_util::future::LocalBoxFuture;
use paperclip::actix::OperationModifier;
use paperclip::v2::schema::Apiv2Schema;

pub(crate) const OWNER_KEY: &str = "owner";

#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    #[error("Failed to persist identity: {0}")]
    Persist(#[from] SessionInsertError),
}

impl ResponseError for IdentityError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[derive(Clone)]
pub struct IdentityContext(Session);

impl IdentityContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Establishes the identity, no credentials are checked
    pub fn login(&self, name: &str) -> Result<(), IdentityError> {
        self.0.renew();
        self.0.insert(OWNER_KEY, name)?;
        tracing::info!("User {} logged in", name);
        Ok(())
    }

    pub fn logout(&self) {
        if let Some(name) = self.owner() {
            tracing::info!("User {} logged out", name);
        }
        self.0.purge();
    }

    /// Name of the logged-in user, None when nobody is logged in
    pub fn owner(&self) -> Option<String> {
        match self.0.get::<String>(OWNER_KEY) {
            Ok(owner) => owner.filter(|name| !name.is_empty()),
            Err(err) => {
                tracing::warn!("Unreadable identity in session: {}", err);
                None
            }
        }
    }
}

impl FromRequest for IdentityContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(IdentityContext::new) })
    }
}

// Not part of the documented request schema
impl Apiv2Schema for IdentityContext {}
impl OperationModifier for IdentityContext {}
