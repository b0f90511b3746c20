//! Form extractor that treats a bare POST as an empty submission.
//!
//! `web::Form` answers 415 when a request carries neither a body nor a content
//! type. Pages here render their neutral view for absent fields, so such a
//! request yields the form's `Default` instead.

use std::collections::BTreeMap;

use actix_web::dev::Payload;
use actix_web::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use paperclip::actix::OperationModifier;
use paperclip::v2::models::{DefaultOperationRaw, DefaultSchemaRaw};
use paperclip::v2::schema::Apiv2Schema;
use serde::de::DeserializeOwned;

pub struct SubmittedForm<T>(pub T);

impl<T> SubmittedForm<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn is_bare_post(req: &HttpRequest) -> bool {
    let has_body = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |length| length.trim() != "0");
    !req.headers().contains_key(CONTENT_TYPE) && !has_body
}

impl<T> FromRequest for SubmittedForm<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_bare_post(req) {
            return Box::pin(async { Ok(SubmittedForm(T::default())) });
        }
        let form = web::Form::<T>::from_request(req, payload);
        Box::pin(async move { Ok(SubmittedForm(form.await?.into_inner())) })
    }
}

impl<T: Apiv2Schema> Apiv2Schema for SubmittedForm<T> {}

impl<T: Apiv2Schema> OperationModifier for SubmittedForm<T> {
    fn update_parameter(op: &mut DefaultOperationRaw) {
        web::Form::<T>::update_parameter(op);
    }

    fn update_definitions(_map: &mut BTreeMap<String, DefaultSchemaRaw>) {}
}
