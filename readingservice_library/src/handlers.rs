use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::web::Data;
use actix_web::{Error, HttpResponse};
use paperclip::actix::{
    api_v2_operation,
    web::{self, Json},
};

use readingservice_recommendations::api::CatalogBook;
use readingservice_recommendations::catalog::Catalog;
use readingservice_recommendations::leveling;

use crate::api::{
    AddBookForm, BookRecordId, BooksPage, FeedbackQuizForm, FeedbackQuizView, FormPage,
    LandingPage, LoginForm, ProfileQuizForm, ProfileQuizView,
};
use crate::identity::IdentityContext;
use crate::library_repository::LibraryRepository;
use crate::submitted_form::SubmittedForm;

fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header((LOCATION, location))
        .finish()
}

fn login_page() -> FormPage {
    FormPage::new("/login", &["username"])
}

fn add_book_page() -> FormPage {
    FormPage::new("/add_book", &["title", "author"])
}

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn home(identity: IdentityContext) -> Result<Json<LandingPage>, Error> {
    Ok(Json(LandingPage {
        current_user: identity.owner(),
    }))
}

#[api_v2_operation]
pub async fn login_form() -> Result<Json<FormPage>, Error> {
    Ok(Json(login_page()))
}

#[api_v2_operation]
pub async fn login(
    identity: IdentityContext,
    form: SubmittedForm<LoginForm>,
) -> Result<HttpResponse, Error> {
    match form.into_inner().username() {
        Some(username) => {
            identity.login(&username)?;
            Ok(redirect_to("/books"))
        }
        None => Ok(HttpResponse::Ok().json(login_page())),
    }
}

#[api_v2_operation]
pub async fn logout(identity: IdentityContext) -> Result<HttpResponse, Error> {
    identity.logout();
    Ok(redirect_to("/login"))
}

#[api_v2_operation]
pub async fn register_form() -> Result<Json<FormPage>, Error> {
    Ok(Json(FormPage::new("/register", &[])))
}

/// There are no accounts, registering only leads to the login page
#[api_v2_operation]
pub async fn register() -> Result<HttpResponse, Error> {
    Ok(redirect_to("/login"))
}

#[api_v2_operation]
pub async fn books(
    library_repository: Data<Arc<dyn LibraryRepository>>,
    identity: IdentityContext,
) -> Result<HttpResponse, Error> {
    let owner = match identity.owner() {
        Some(owner) => owner,
        None => return Ok(redirect_to("/login")),
    };

    Ok(match library_repository.list_books(&owner).await {
        Ok(user_books) => HttpResponse::Ok().json(BooksPage {
            owner,
            catalog: Catalog::all().iter().map(CatalogBook::from).collect(),
            user_books,
        }),
        Err(err) => {
            tracing::error!("List books failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn add_book_form(identity: IdentityContext) -> Result<HttpResponse, Error> {
    if identity.owner().is_none() {
        return Ok(redirect_to("/login"));
    }
    Ok(HttpResponse::Ok().json(add_book_page()))
}

#[api_v2_operation]
pub async fn add_book(
    library_repository: Data<Arc<dyn LibraryRepository>>,
    identity: IdentityContext,
    form: SubmittedForm<AddBookForm>,
) -> Result<HttpResponse, Error> {
    let owner = match identity.owner() {
        Some(owner) => owner,
        None => return Ok(redirect_to("/login")),
    };

    let book = match form.into_inner().into_new_book() {
        Some(book) => book,
        None => return Ok(HttpResponse::Ok().json(add_book_page())),
    };

    Ok(match library_repository.add_book(&owner, book).await {
        Ok(id) => {
            tracing::info!("Book {} added for {}", id, owner);
            redirect_to("/books")
        }
        Err(err) => {
            tracing::error!("Add book failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn delete_book(
    library_repository: Data<Arc<dyn LibraryRepository>>,
    identity: IdentityContext,
    book_id: web::Path<BookRecordId>,
) -> Result<HttpResponse, Error> {
    let owner = match identity.owner() {
        Some(owner) => owner,
        None => return Ok(redirect_to("/login")),
    };
    let book_id = book_id.into_inner();

    Ok(match library_repository.delete_book(&owner, book_id).await {
        Ok(deleted) => {
            if !deleted {
                tracing::debug!("Book {} not on the list of {}", book_id, owner);
            }
            redirect_to("/books")
        }
        Err(err) => {
            tracing::error!("Delete book failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn profile_quiz_form() -> Result<Json<ProfileQuizView>, Error> {
    Ok(Json(ProfileQuizView::default()))
}

#[api_v2_operation]
pub async fn profile_quiz(
    form: SubmittedForm<ProfileQuizForm>,
) -> Result<Json<ProfileQuizView>, Error> {
    let view = match form.into_inner().submission() {
        Some(input) => {
            let result = leveling::level_profile(&input);
            ProfileQuizView {
                level: Some(result.level),
                recommendation: Some(CatalogBook::from(result.recommendation)),
            }
        }
        None => ProfileQuizView::default(),
    };
    Ok(Json(view))
}

#[api_v2_operation]
pub async fn feedback_quiz_form() -> Result<Json<FeedbackQuizView>, Error> {
    Ok(Json(FeedbackQuizView::default()))
}

#[api_v2_operation]
pub async fn feedback_quiz(
    form: SubmittedForm<FeedbackQuizForm>,
) -> Result<Json<FeedbackQuizView>, Error> {
    let new_level = form
        .into_inner()
        .submission()
        .map(|input| leveling::relevel_feedback(&input).level);
    Ok(Json(FeedbackQuizView { new_level }))
}

#[cfg(test)]
mod handler_tests {
    use actix_session::storage::CookieSessionStore;
    use actix_session::SessionMiddleware;
    use actix_http::Request;
    use actix_web::cookie::{Cookie, Key};
    use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use paperclip::actix::OpenApiExt;

    use readingservice_recommendations::api::Level;

    use crate::api::BookRecord;
    use crate::app_config::config_app;
    use crate::library_repository::InMemoryLibraryRepository;

    use super::*;

    fn test_app() -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = Error,
            InitError = (),
        >,
    > {
        let library_repository: Arc<dyn LibraryRepository> =
            Arc::new(InMemoryLibraryRepository::default());
        App::new()
            .wrap_api()
            .app_data(Data::new(library_repository))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_name("session".to_string())
                    .cookie_secure(false)
                    .build(),
            )
            .configure(config_app)
            .build()
    }

    fn location<B>(response: &ServiceResponse<B>) -> &str {
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    async fn log_in<S, B>(app: &S, username: &str) -> Cookie<'static>
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    {
        let response = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/login")
                .set_form([("username", username)])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/books");
        session_cookie(&response)
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(test_app()).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_identity_required_pages_redirect_to_login() {
        let app = test::init_service(test_app()).await;

        for request in [
            test::TestRequest::get().uri("/books"),
            test::TestRequest::get().uri("/add_book"),
            test::TestRequest::post()
                .uri("/add_book")
                .set_form([("title", "X"), ("author", "Y")]),
            test::TestRequest::get().uri("/delete_book/0"),
        ] {
            let response = test::call_service(&app, request.to_request()).await;
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(location(&response), "/login");
        }
    }

    #[actix_web::test]
    async fn test_login_without_username_shows_form() {
        let app = test::init_service(test_app()).await;
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form([("username", "  ")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let page: FormPage = test::read_body_json(response).await;
        assert_eq!(page, login_page());

        let response = test::call_service(
            &app,
            test::TestRequest::post().uri("/login").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let page: FormPage = test::read_body_json(response).await;
        assert_eq!(page, login_page());
    }

    #[actix_web::test]
    async fn test_register_redirects_to_login() {
        let app = test::init_service(test_app()).await;
        let response =
            test::call_service(&app, test::TestRequest::post().uri("/register").to_request())
                .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/login");
    }

    #[actix_web::test]
    /// Whole library flow through the HTTP surface
    /// 1. Logs in as alice and bob
    /// 2. Alice adds a book, blank submissions are ignored
    /// 3. Bob cannot see or delete alice's book
    /// 4. Alice deletes her book
    /// 5. Logout forgets the identity
    async fn test_library_flow() {
        let app = test::init_service(test_app()).await;
        let alice = log_in(&app, "alice").await;
        let bob = log_in(&app, "bob").await;

        let landing: LandingPage = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/")
                .cookie(alice.clone())
                .to_request(),
        )
        .await;
        assert_eq!(landing.current_user, Some("alice".to_string()));

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add_book")
                .cookie(alice.clone())
                .set_form([("title", "X"), ("author", "Y")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/books");

        let ignored = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add_book")
                .cookie(alice.clone())
                .set_form([("title", "X"), ("author", "")])
                .to_request(),
        )
        .await;
        assert_eq!(ignored.status(), StatusCode::OK);

        let page: BooksPage = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/books")
                .cookie(alice.clone())
                .to_request(),
        )
        .await;
        assert_eq!(page.owner, "alice");
        assert_eq!(page.catalog.len(), 7);
        assert_eq!(page.user_books.len(), 1);
        let BookRecord { id, title, author, .. } = page.user_books[0].clone();
        assert_eq!((title.as_str(), author.as_str()), ("X", "Y"));

        let bob_page: BooksPage = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/books")
                .cookie(bob.clone())
                .to_request(),
        )
        .await;
        assert!(bob_page.user_books.is_empty());

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/delete_book/{}", id))
                .cookie(bob.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let page: BooksPage = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/books")
                .cookie(alice.clone())
                .to_request(),
        )
        .await;
        assert_eq!(page.user_books.len(), 1);

        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/delete_book/{}", id))
                .cookie(alice.clone())
                .to_request(),
        )
        .await;

        let page: BooksPage = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/books")
                .cookie(alice.clone())
                .to_request(),
        )
        .await;
        assert!(page.user_books.is_empty());

        let logout = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(alice)
                .to_request(),
        )
        .await;
        assert_eq!(logout.status(), StatusCode::FOUND);
        assert_eq!(location(&logout), "/login");
        let cleared = session_cookie(&logout);

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/books")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(location(&response), "/login");
    }

    #[actix_web::test]
    async fn test_profile_quiz() {
        let app = test::init_service(test_app()).await;

        let neutral: ProfileQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/quiz_profile").to_request(),
        )
        .await;
        assert_eq!(neutral, ProfileQuizView::default());

        let view: ProfileQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/quiz_profile")
                .set_form([("difficulty_pref", "2"), ("vocab_comfort", "2")])
                .to_request(),
        )
        .await;
        assert_eq!(view.level, Some(Level::Intermediate));
        assert_eq!(
            view.recommendation.map(|book| book.title),
            Some("Me Before You".to_string())
        );

        let missing: ProfileQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/quiz_profile")
                .set_form([("difficulty_pref", "2")])
                .to_request(),
        )
        .await;
        assert_eq!(missing, ProfileQuizView::default());

        let malformed = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/quiz_profile")
                .set_form([("difficulty_pref", "two"), ("vocab_comfort", "2")])
                .to_request(),
        )
        .await;
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

        let bare: ProfileQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post().uri("/quiz_profile").to_request(),
        )
        .await;
        assert_eq!(bare, ProfileQuizView::default());
    }

    #[actix_web::test]
    async fn test_feedback_quiz() {
        let app = test::init_service(test_app()).await;

        let neutral: FeedbackQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/quiz_feedback").to_request(),
        )
        .await;
        assert_eq!(neutral.new_level, None);

        let view: FeedbackQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/quiz_feedback")
                .set_form([("book_difficulty", "3"), ("vocab_diff", "1"), ("finished", "1")])
                .to_request(),
        )
        .await;
        assert_eq!(view.new_level, Some(Level::Advanced));

        // finished defaults to 1
        let view: FeedbackQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/quiz_feedback")
                .set_form([("book_difficulty", "1"), ("vocab_diff", "1")])
                .to_request(),
        )
        .await;
        assert_eq!(view.new_level, Some(Level::Intermediate));

        let view: FeedbackQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/quiz_feedback")
                .set_form([("book_difficulty", "1"), ("vocab_diff", "2"), ("finished", "0")])
                .to_request(),
        )
        .await;
        assert_eq!(view.new_level, Some(Level::Beginner));

        let bare: FeedbackQuizView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post().uri("/quiz_feedback").to_request(),
        )
        .await;
        assert_eq!(bare.new_level, None);
    }
}
