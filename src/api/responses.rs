//! Response Endpoints

use reqwest::Method;

use super::{read_json, send, ApiError};
use crate::models::Submission;

pub async fn list_responses(token: &str, form_id: &str) -> Result<Vec<Submission>, ApiError> {
    let response = send(Method::GET, &format!("/forms/{}/responses", form_id), Some(token), None).await?;
    read_json(response).await
}
