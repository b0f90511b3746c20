use anyhow::{bail, Context};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use readingservice_recommendations::api::{FeedbackQuizInput, ProfileQuizInput};

use crate::api::{BookRecordId, BooksPage, FeedbackQuizView, ProfileQuizView};

/// Client of the reading service.
/// Keeps the session cookie, so every instance acts as a single user
pub struct ReadingServiceClient {
    url: String,
    client: ClientWithMiddleware,
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

impl ReadingServiceClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls POST /login endpoint
    /// Returns true if the service accepted the name
    pub async fn login(&self, username: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .post(format!("{}/login", self.url))
            .form(&[("username", username)])
            .send()
            .await?;

        if response.status() == StatusCode::FOUND {
            Ok(location(&response) == Some("/books"))
        } else if response.status().is_success() {
            Ok(false)
        } else {
            bail!("Failed to login {}", response.status())
        }
    }

    /// Calls GET /logout endpoint
    pub async fn logout(&self) -> anyhow::Result<()> {
        let response = self
            .client
            .get(format!("{}/logout", self.url))
            .send()
            .await?;

        if response.status() != StatusCode::FOUND {
            bail!("Failed to logout {}", response.status())
        }
        Ok(())
    }

    /// Calls GET /books endpoint
    /// Returns None when the client is not logged in
    pub async fn list_books(&self) -> anyhow::Result<Option<BooksPage>> {
        let response = self
            .client
            .get(format!("{}/books", self.url))
            .send()
            .await?;

        if response.status() == StatusCode::FOUND {
            Ok(None)
        } else if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else {
            bail!("Failed to list books {}", response.status())
        }
    }

    /// Calls POST /add_book endpoint
    /// Returns true if the book was stored and false if the submission was ignored
    pub async fn add_book(&self, title: &str, author: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .post(format!("{}/add_book", self.url))
            .form(&[("title", title), ("author", author)])
            .send()
            .await?;

        if response.status() == StatusCode::FOUND {
            match location(&response) {
                Some("/books") => Ok(true),
                Some("/login") => bail!("Not logged in"),
                other => bail!("Unexpected redirect {:?}", other),
            }
        } else if response.status().is_success() {
            Ok(false)
        } else {
            bail!("Failed to add book {}", response.status())
        }
    }

    /// Calls GET /delete_book/{id} endpoint
    pub async fn delete_book(&self, id: BookRecordId) -> anyhow::Result<()> {
        let response = self
            .client
            .get(format!("{}/delete_book/{}", self.url, id))
            .send()
            .await?;

        match (response.status(), location(&response)) {
            (StatusCode::FOUND, Some("/books")) => Ok(()),
            (StatusCode::FOUND, Some("/login")) => bail!("Not logged in"),
            (status, _) => bail!("Failed to delete book {}", status),
        }
    }

    /// Calls POST /quiz_profile endpoint
    pub async fn profile_quiz(&self, input: ProfileQuizInput) -> anyhow::Result<ProfileQuizView> {
        let response = self
            .client
            .post(format!("{}/quiz_profile", self.url))
            .form(&input)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            bail!("Failed to submit profile quiz {}", response.status())
        }
    }

    /// Calls POST /quiz_feedback endpoint
    pub async fn feedback_quiz(
        &self,
        input: FeedbackQuizInput,
    ) -> anyhow::Result<FeedbackQuizView> {
        let response = self
            .client
            .post(format!("{}/quiz_feedback", self.url))
            .form(&input)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            bail!("Failed to submit feedback quiz {}", response.status())
        }
    }
}
