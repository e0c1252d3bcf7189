//! Form Endpoints

use reqwest::Method;

use super::{read_json, send, to_json, ApiError};
use crate::models::Form;

/// The dashboard filters and pages on the client, so it asks for everything at once
const LIST_LIMIT: u32 = 500;

pub async fn list_forms(token: &str) -> Result<Vec<Form>, ApiError> {
    let path = format!("/forms/?skip=0&limit={}", LIST_LIMIT);
    let response = send(Method::GET, &path, Some(token), None).await?;
    read_json(response).await
}

pub async fn get_form(token: &str, id: &str) -> Result<Form, ApiError> {
    let response = send(Method::GET, &format!("/forms/{}", id), Some(token), None).await?;
    read_json(response).await
}

pub async fn create_form(token: &str, form: &Form) -> Result<Form, ApiError> {
    let response = send(Method::POST, "/forms/", Some(token), Some(to_json(form)?)).await?;
    read_json(response).await
}

pub async fn update_form(token: &str, id: &str, form: &Form) -> Result<Form, ApiError> {
    let response = send(Method::PUT, &format!("/forms/{}", id), Some(token), Some(to_json(form)?)).await?;
    read_json(response).await
}

pub async fn delete_form(token: &str, id: &str) -> Result<(), ApiError> {
    send(Method::DELETE, &format!("/forms/{}", id), Some(token), None).await?;
    Ok(())
}

pub async fn toggle_form_status(token: &str, id: &str) -> Result<(), ApiError> {
    send(Method::POST, &format!("/forms/{}/toggle-status", id), Some(token), None).await?;
    Ok(())
}

pub async fn duplicate_form(token: &str, id: &str) -> Result<(), ApiError> {
    send(Method::POST, &format!("/forms/{}/duplicate", id), Some(token), None).await?;
    Ok(())
}
