use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{
    ApiEnvelope, ApiError, CreateFeeRequest, CreateStudentRequest, Fee, Student,
    UpdateFeeRequest, UpdateStudentRequest,
};

/// API client for communicating with the admissions backend.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Resolve a stored document path against the backend origin. Paths
    /// that are already absolute URLs pass through unchanged.
    pub fn file_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        self.get_json("/studentDetails/all").await
    }

    pub async fn get_student_by_id(&self, id: &str) -> Result<Student, ApiError> {
        self.get_json(&format!("/studentDetails/{}", id)).await
    }

    pub async fn get_student_by_reg_no(&self, reg_no: &str) -> Result<Student, ApiError> {
        self.get_json(&format!("/studentDetails/regNo/{}", reg_no)).await
    }

    pub async fn create_student(&self, request: CreateStudentRequest) -> Result<Student, ApiError> {
        self.post_json("/studentDetails/create", &request).await
    }

    pub async fn update_student(
        &self,
        id: &str,
        request: UpdateStudentRequest,
    ) -> Result<Student, ApiError> {
        self.put_json(&format!("/studentDetails/{}", id), &request).await
    }

    pub async fn delete_student(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/studentDetails/{}", id)).await
    }

    pub async fn list_fees(&self) -> Result<Vec<Fee>, ApiError> {
        self.get_json("/fee/all").await
    }

    pub async fn get_fee_by_id(&self, id: &str) -> Result<Fee, ApiError> {
        self.get_json(&format!("/fee/{}", id)).await
    }

    pub async fn get_fees_by_student(&self, student_id: &str) -> Result<Vec<Fee>, ApiError> {
        self.get_json(&format!("/fee/student/{}", student_id)).await
    }

    pub async fn create_fee(&self, request: CreateFeeRequest) -> Result<Fee, ApiError> {
        self.post_json("/fee/create", &request).await
    }

    pub async fn update_fee(&self, id: &str, request: UpdateFeeRequest) -> Result<Fee, ApiError> {
        self.put_json(&format!("/fee/{}", id), &request).await
    }

    pub async fn delete_fee(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/fee/{}", id)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = Request::get(&format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = Request::post(&format!("{}{}", self.base_url, path))
            .json(body)
            .map_err(|e| ApiError::Decode(format!("failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = Request::put(&format!("{}{}", self.base_url, path))
            .json(body)
            .map_err(|e| ApiError::Decode(format!("failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = Request::delete(&format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if response.status() == 404 {
            return Err(ApiError::NotFound);
        }
        response
            .json::<ApiEnvelope<Value>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .into_status()
    }

    /// Decode an envelope body. A 404 status maps to `NotFound`; any other
    /// failure status still carries an envelope with the error message.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.status() == 404 {
            return Err(ApiError::NotFound);
        }
        let envelope = response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        envelope.into_result()
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_url_joins_relative_paths() {
        let client = ApiClient::with_base_url("http://localhost:3000".to_string());
        assert_eq!(
            client.file_url("uploads/st-1/photo.jpg"),
            "http://localhost:3000/uploads/st-1/photo.jpg"
        );
        assert_eq!(
            client.file_url("/uploads/st-1/photo.jpg"),
            "http://localhost:3000/uploads/st-1/photo.jpg"
        );
    }

    #[test]
    fn file_url_passes_absolute_urls_through() {
        let client = ApiClient::new();
        assert_eq!(
            client.file_url("https://cdn.example.com/photo.jpg"),
            "https://cdn.example.com/photo.jpg"
        );
    }
}
