use serde::Serialize;

/// Uniform success envelope wrapped around every 2xx payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub status: &'static str,
    pub success: bool,
    pub message: String,
    pub data: serde_json::Value,
}

impl ApiResponse {
    pub fn new(message: &str, data: serde_json::Value) -> Self {
        Self {
            status: "success",
            success: true,
            message: message.to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_shape() {
        let body = ApiResponse::new("Courses fetched successfully", json!({ "courses": [] }));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Courses fetched successfully");
        assert_eq!(value["data"]["courses"], json!([]));
    }
}
