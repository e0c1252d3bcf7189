//! Authentication Endpoints

use reqwest::Method;

use super::{read_json, send, to_json, ApiError, Body};
use crate::models::{NewUser, Token, User};

/// OAuth2 password-grant fields for `POST /token`, sent form-urlencoded
pub fn login_form(username: &str, password: &str) -> Vec<(&'static str, String)> {
    vec![("username", username.to_string()), ("password", password.to_string())]
}

pub async fn login(username: &str, password: &str) -> Result<Token, ApiError> {
    let body = Body::Form(login_form(username, password));
    let response = send(Method::POST, "/token", None, Some(body)).await?;
    read_json(response).await
}

pub async fn register(user: &NewUser<'_>) -> Result<User, ApiError> {
    let response = send(Method::POST, "/users/", None, Some(to_json(user)?)).await?;
    read_json(response).await
}

pub async fn current_user(token: &str) -> Result<User, ApiError> {
    let response = send(Method::GET, "/users/me/", Some(token), None).await?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_fields() {
        let fields = login_form("ana maria", "p&ss=word+1");
        assert_eq!(fields[0], ("username", "ana maria".to_string()));
        assert_eq!(fields[1], ("password", "p&ss=word+1".to_string()));
    }
}
