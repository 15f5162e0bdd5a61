//! API Response Envelope
//!
//! 成功レスポンスの統一エンベロープ。すべてのハンドラは
//! `{status, message, data}` の形でレスポンスを返します。
//! エラー側のエンベロープは [`crate::error::app_error::AppError`] が担います。

use serde::Serialize;

/// 成功レスポンスのエンベロープ
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let res = ApiResponse::ok("Posts retrieved successfully", vec!["first"]);
/// assert_eq!(res.status, 200);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// HTTP ステータスコード
    pub status: u16,
    /// ユーザー向けメッセージ
    pub message: String,
    /// ペイロード
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 任意のステータスコードでエンベロープを作成
    pub fn new(status: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            message: message.into(),
            data,
        }
    }

    /// 200 OK レスポンス
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(200, message, data)
    }

    /// 201 Created レスポンス
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(201, message, data)
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let res = ApiResponse::ok("done", 42);
        assert_eq!(res.status, 200);
        assert_eq!(res.message, "done");
        assert_eq!(res.data, 42);
    }

    #[test]
    fn test_created_envelope() {
        let res = ApiResponse::created("made", "x");
        assert_eq!(res.status, 201);
    }

    #[test]
    fn test_serialized_shape() {
        let res = ApiResponse::ok("done", serde_json::json!({"a": 1}));
        let value = serde_json::to_value(&res).unwrap();
        assert_eq!(value["status"], 200);
        assert_eq!(value["message"], "done");
        assert_eq!(value["data"]["a"], 1);
    }
}
