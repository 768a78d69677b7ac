//! Marketplace API surface used by the client.

use async_trait::async_trait;
use rarebooks_auth::{AuthError, AuthToken, Credentials, LoginResponse};
use rarebooks_catalog::url::encode_segment;
use rarebooks_catalog::{
    BookDetails, BookId, Category, CategoryFilter, PriceRangeFilter, SearchOutcome, SellerFilter,
    TitleFilter,
};
use rarebooks_data::FetchClient;
use rarebooks_data::FetchError;
use tracing::warn;

use crate::wire::{decode, decode_outcome};
use crate::ApiError;

/// Binary image as returned by the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Calls the client makes against the marketplace API.
///
/// Futures are not `Send`; the client runs on a single-threaded executor.
#[async_trait(?Send)]
pub trait SearchApi {
    async fn search_by_title(
        &self,
        filter: &TitleFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError>;

    async fn search_by_price_range(
        &self,
        filter: &PriceRangeFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError>;

    async fn search_by_seller(
        &self,
        filter: &SellerFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError>;

    async fn search_by_category(
        &self,
        filter: &CategoryFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError>;

    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    async fn book(&self, id: BookId) -> Result<BookDetails, ApiError>;

    async fn book_image(&self, id: BookId, image_name: &str) -> Result<ImageData, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;
}

/// [`SearchApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSearchApi {
    client: FetchClient,
    token: Option<AuthToken>,
}

impl HttpSearchApi {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            token: None,
        }
    }

    /// Attach the session's bearer token to every request.
    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    async fn get_json(
        &self,
        path: String,
        query: &[(&str, String)],
    ) -> Result<Vec<u8>, ApiError> {
        let mut request = self
            .client
            .get(path)
            .accept("application/json")
            .maybe_bearer_auth(self.token.as_ref().map(AuthToken::as_str));
        for (key, value) in query {
            request = request.query(*key, value);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.into_bytes())
    }

    async fn search(
        &self,
        path: String,
        query: &[(&str, String)],
    ) -> Result<SearchOutcome, ApiError> {
        let body = self.get_json(path, query).await?;
        decode_outcome(&body)
    }
}

#[async_trait(?Send)]
impl SearchApi for HttpSearchApi {
    async fn search_by_title(
        &self,
        filter: &TitleFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError> {
        self.search(
            "/books/search/title".into(),
            &[
                ("title", filter.title.clone()),
                ("exactPhrase", filter.exact_phrase.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn search_by_price_range(
        &self,
        filter: &PriceRangeFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError> {
        self.search(
            "/books/search/price".into(),
            &[
                ("minPrice", filter.min.to_string()),
                ("maxPrice", filter.max.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn search_by_seller(
        &self,
        filter: &SellerFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError> {
        self.search(
            "/books/search/seller".into(),
            &[
                ("sellerName", filter.seller_name.clone()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn search_by_category(
        &self,
        filter: &CategoryFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError> {
        self.search(
            format!("/categories/{}/books", filter.category_id),
            &[("page", page.to_string())],
        )
        .await
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.get_json("/categories".into(), &[]).await?;
        decode(&body)
    }

    async fn book(&self, id: BookId) -> Result<BookDetails, ApiError> {
        let body = self.get_json(format!("/books/{id}"), &[]).await?;
        decode(&body)
    }

    async fn book_image(&self, id: BookId, image_name: &str) -> Result<ImageData, ApiError> {
        let response = self
            .client
            .get(format!("/books/{id}/images/{}", encode_segment(image_name)))
            .accept("image/*")
            .maybe_bearer_auth(self.token.as_ref().map(AuthToken::as_str))
            .send()
            .await?
            .error_for_status()?;

        let content_type = response.content_type().map(str::to_string);
        Ok(ImageData {
            bytes: response.into_bytes(),
            content_type,
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        credentials.validate()?;

        let result = self
            .client
            .post("/auth/login")
            .accept("application/json")
            .json(credentials)?
            .send()
            .await?
            .error_for_status();

        match result {
            Ok(response) => decode(response.bytes()),
            Err(FetchError::HttpError { status, .. }) if matches!(status, 400 | 401 | 403) => {
                warn!(status, email = %credentials.email, "login rejected");
                Err(AuthError::InvalidCredentials.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
