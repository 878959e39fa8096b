use crate::config::AppConfig;
use crate::domain::OAuthProfile;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use promptshare_errors::AppError;
use serde::Deserialize;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl From<GoogleUserInfo> for OAuthProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            email: info.email,
            name: info.name,
            picture: info.picture,
        }
    }
}

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

#[derive(Clone)]
pub struct GoogleOAuth {
    client: ConfiguredClient,
    redirect_uri: RedirectUrl,
    token_http_client: oauth2::reqwest::Client,
    http_client: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Result<Self, AppError> {
        let oauth_err = |e: oauth2::url::ParseError| AppError::OAuth(e.to_string());
        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(oauth_err)?;
        let token_url = TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(oauth_err)?;
        let redirect = RedirectUrl::new(redirect_uri.to_string()).map_err(oauth_err)?;

        let client = BasicClient::new(ClientId::new(client_id.to_string()))
            .set_client_secret(ClientSecret::new(client_secret.to_string()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url);

        // Following redirects on the token endpoint would open an SSRF hole.
        let token_http_client = oauth2::reqwest::ClientBuilder::new()
            .redirect(oauth2::reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::OAuth(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            redirect_uri: redirect,
            token_http_client,
            http_client: reqwest::Client::new(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            &config.google_client_id,
            &config.google_client_secret,
            &config.google_redirect_uri,
        )
    }

    /// Authorization URL plus the CSRF token and PKCE verifier to keep until the callback.
    pub fn get_auth_url(&self) -> (String, CsrfToken, PkceCodeVerifier) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_token) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        (auth_url.to_string(), csrf_token, pkce_verifier)
    }

    /// Exchanges the authorization code and fetches the signed-in user's profile.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: PkceCodeVerifier,
    ) -> Result<OAuthProfile, AppError> {
        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&self.token_http_client)
            .await
            .map_err(|e| AppError::OAuth(format!("Token exchange failed: {:?}", e)))?;

        let access_token = token_result.access_token().secret();

        let user_info = self
            .http_client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::OAuth(format!("Failed to fetch user info: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::OAuth(format!("Failed to fetch user info: {}", e)))?
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::OAuth(format!("Failed to parse user info: {}", e)))?;

        tracing::debug!("Fetched Google profile for subject {}", user_info.sub);

        Ok(user_info.into())
    }
}
